use crate::codegen::CodeGenerator;
use crate::error::{CodegenError, CodegenResult};
use crate::keys::format_key;
use crate::options::GeneratorOptions;
use crate::types::map_type;
use sqlts_schema::{
    is_valid_identifier, FirstResultSet, IdentifierKind, Namespace, SchemaError,
    UndeclaredParameter,
};
use std::collections::HashSet;
use tracing::debug;

/// Name of the interface declaring a query's parameters
pub fn parameter_interface_name(method_name: &str) -> String {
    format!("{}Parameters", method_name)
}

/// TypeScript code generator for query metadata
#[derive(Debug, Clone, Default)]
pub struct TypeScriptGenerator {
    options: GeneratorOptions,
}

impl TypeScriptGenerator {
    pub fn new() -> Self {
        Self::with_options(GeneratorOptions::default())
    }

    pub fn with_options(options: GeneratorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Lay out a heading, its property lines and the closing brace
    fn render_block(&self, name: &str, properties: &[String]) -> String {
        let outer = " ".repeat(self.options.interface_indent);
        let inner = " ".repeat(self.options.property_indent);
        let keyword = if self.options.export_interfaces {
            "export interface"
        } else {
            "interface"
        };

        let mut lines = Vec::with_capacity(properties.len() + 2);
        lines.push(format!("{}{} {} {{", outer, keyword, name));
        lines.extend(properties.iter().map(|prop| format!("{}{}", inner, prop)));
        lines.push(format!("{}}}", outer));
        lines.join(self.options.newline())
    }
}

fn ensure_method_name(name: &str) -> CodegenResult<()> {
    if is_valid_identifier(name) {
        Ok(())
    } else {
        Err(SchemaError::malformed(IdentifierKind::Method, name).into())
    }
}

/// First column name that appears more than once in a result set
pub(crate) fn repeated_column(columns: &[FirstResultSet]) -> Option<&str> {
    let mut seen = HashSet::new();
    columns
        .iter()
        .map(|column| column.column_name.as_str())
        .find(|name| !seen.insert(*name))
}

/// A query whose parameter interface would shadow another query's interface
pub(crate) fn parameter_name_collision(namespace: &Namespace) -> Option<CodegenError> {
    namespace
        .dmls()
        .iter()
        .filter(|dml| !dml.parameters().is_empty())
        .map(|dml| parameter_interface_name(dml.method_name()))
        .find(|generated| {
            namespace
                .dmls()
                .iter()
                .any(|other| other.method_name() == generated)
        })
        .map(|generated| SchemaError::duplicate(namespace.name(), generated).into())
}

impl CodeGenerator for TypeScriptGenerator {
    fn generate_type(&self, source_type_name: &str) -> CodegenResult<String> {
        map_type(source_type_name).map(|ts_type| ts_type.to_string())
    }

    fn generate_property(
        &self,
        name: &str,
        source_type_name: &str,
        is_nullable: bool,
    ) -> CodegenResult<String> {
        let separator = if is_nullable { "?: " } else { ": " };
        Ok(format!(
            "{}{}{}",
            format_key(name),
            separator,
            self.generate_type(source_type_name)?
        ))
    }

    fn generate_interface(&self, name: &str, columns: &[FirstResultSet]) -> CodegenResult<String> {
        ensure_method_name(name)?;

        if columns.is_empty() {
            return Err(CodegenError::empty_result_set(name));
        }

        if let Some(column) = repeated_column(columns) {
            return Err(CodegenError::duplicate_property(name, column));
        }

        let properties = columns
            .iter()
            .map(|column| {
                self.generate_property(
                    &column.column_name,
                    &column.system_type_name,
                    column.is_nullable,
                )
            })
            .collect::<CodegenResult<Vec<_>>>()?;

        debug!(interface = name, properties = properties.len(), "Generated interface");
        Ok(self.render_block(name, &properties))
    }

    fn generate_parameters(
        &self,
        method_name: &str,
        parameters: &[UndeclaredParameter],
    ) -> CodegenResult<Option<String>> {
        ensure_method_name(method_name)?;

        if parameters.is_empty() {
            return Ok(None);
        }

        // SQL Server reports parameters with their `@` sigil
        let properties = parameters
            .iter()
            .map(|param| {
                let name = param.name.strip_prefix('@').unwrap_or(&param.name);
                self.generate_property(name, &param.db_type, false)
            })
            .collect::<CodegenResult<Vec<_>>>()?;

        let name = parameter_interface_name(method_name);
        debug!(interface = %name, properties = properties.len(), "Generated parameters interface");
        Ok(Some(self.render_block(&name, &properties)))
    }

    fn generate_namespace(&self, namespace: &Namespace) -> CodegenResult<String> {
        if self.options.emit_parameters {
            if let Some(err) = parameter_name_collision(namespace) {
                return Err(err);
            }
        }

        let keyword = if self.options.declare_namespace {
            "declare namespace"
        } else {
            "namespace"
        };

        let mut lines = vec![format!("{} {} {{", keyword, namespace.name())];

        for dml in namespace.dmls() {
            lines.push(self.generate_interface(dml.method_name(), dml.first_result_set())?);

            if self.options.emit_parameters {
                if let Some(block) = self.generate_parameters(dml.method_name(), dml.parameters())? {
                    lines.push(block);
                }
            }
        }

        lines.push("}".to_string());

        debug!(
            namespace = namespace.name(),
            queries = namespace.len(),
            "Generated namespace"
        );
        Ok(lines.join(self.options.newline()))
    }
}
