use sqlts_schema::SchemaError;
use thiserror::Error;

/// Errors that can occur while generating declarations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodegenError {
    #[error("Unsupported SQL type '{type_name}'")]
    UnsupportedType { type_name: String },

    #[error("Query '{method_name}' has no result columns to declare")]
    EmptyResultSet { method_name: String },

    #[error("Query '{method_name}' declares property '{property}' more than once")]
    DuplicateProperty {
        method_name: String,
        property: String,
    },

    #[error("Property indent ({property_indent}) must be deeper than interface indent ({interface_indent})")]
    InvalidIndent {
        interface_indent: usize,
        property_indent: usize,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl CodegenError {
    pub fn unsupported_type(type_name: impl Into<String>) -> Self {
        Self::UnsupportedType {
            type_name: type_name.into(),
        }
    }

    pub fn empty_result_set(method_name: impl Into<String>) -> Self {
        Self::EmptyResultSet {
            method_name: method_name.into(),
        }
    }

    pub fn duplicate_property(method_name: impl Into<String>, property: impl Into<String>) -> Self {
        Self::DuplicateProperty {
            method_name: method_name.into(),
            property: property.into(),
        }
    }
}

pub type CodegenResult<T> = Result<T, CodegenError>;
