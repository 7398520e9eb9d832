use crate::error::{CodegenError, CodegenResult};
use serde::{Deserialize, Serialize};

/// Line break written between every line of generated output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Configuration options for declaration generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorOptions {
    /// Line ending used uniformly across the output
    pub line_ending: LineEnding,

    /// Spaces before an `interface` heading and its closing brace
    pub interface_indent: usize,

    /// Spaces before each property line
    pub property_indent: usize,

    /// Prefix interfaces with `export`
    pub export_interfaces: bool,

    /// Emit `declare namespace` instead of `namespace`, for `.d.ts` files
    pub declare_namespace: bool,

    /// Emit a `<Method>Parameters` interface for queries with undeclared parameters
    pub emit_parameters: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            line_ending: LineEnding::Lf,
            interface_indent: 4,
            property_indent: 8,
            export_interfaces: false,
            declare_namespace: false,
            emit_parameters: false,
        }
    }
}

impl GeneratorOptions {
    /// Options suited to an ambient `.d.ts` declaration file
    pub fn declaration_file() -> Self {
        Self {
            declare_namespace: true,
            export_interfaces: true,
            ..Default::default()
        }
    }

    /// Default options that also declare query parameters
    pub fn with_parameters() -> Self {
        Self {
            emit_parameters: true,
            ..Default::default()
        }
    }

    /// Properties must sit one level deeper than their interface heading
    pub fn validate(&self) -> CodegenResult<()> {
        if self.property_indent > self.interface_indent {
            Ok(())
        } else {
            Err(CodegenError::InvalidIndent {
                interface_indent: self.interface_indent,
                property_indent: self.property_indent,
            })
        }
    }

    pub fn newline(&self) -> &'static str {
        self.line_ending.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_options_fill_defaults() {
        let json = r#"{ "lineEnding": "crlf", "emitParameters": true }"#;
        let options: GeneratorOptions = serde_json::from_str(json).unwrap();

        assert_eq!(options.line_ending, LineEnding::CrLf);
        assert!(options.emit_parameters);
        assert_eq!(options.interface_indent, 4);
        assert_eq!(options.property_indent, 8);
        assert!(!options.declare_namespace);
    }

    #[test]
    fn test_validate_indent_nesting() {
        assert_eq!(GeneratorOptions::default().validate(), Ok(()));

        let flat = GeneratorOptions {
            interface_indent: 4,
            property_indent: 4,
            ..Default::default()
        };
        assert_eq!(
            flat.validate(),
            Err(CodegenError::InvalidIndent {
                interface_indent: 4,
                property_indent: 4,
            })
        );

        let custom = GeneratorOptions {
            interface_indent: 2,
            property_indent: 4,
            ..Default::default()
        };
        assert!(custom.validate().is_ok());
    }

    #[test]
    fn test_declaration_file_preset() {
        let options = GeneratorOptions::declaration_file();
        assert!(options.declare_namespace);
        assert!(options.export_interfaces);
        assert_eq!(options.newline(), "\n");
    }
}
