use thiserror::Error;

pub type SchemaResult<T> = Result<T, SchemaError>;

/// What kind of name failed identifier validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    Namespace,
    Method,
}

impl std::fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentifierKind::Namespace => write!(f, "namespace"),
            IdentifierKind::Method => write!(f, "method"),
        }
    }
}

/// Errors raised while building or loading query metadata
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Malformed {kind} name '{name}': not a valid TypeScript identifier")]
    MalformedIdentifier { kind: IdentifierKind, name: String },

    #[error("Duplicate method '{name}' in namespace '{namespace}'")]
    DuplicateName { namespace: String, name: String },

    #[error("Column '{column}' has invalid ordinal {ordinal}: ordinals start at 1")]
    InvalidOrdinal { column: String, ordinal: u32 },

    #[error("Query '{method}' reports ordinal {ordinal} more than once (column '{column}')")]
    DuplicateOrdinal {
        method: String,
        column: String,
        ordinal: u32,
    },

    #[error("Introspection failed: {0}")]
    Introspection(String),

    #[error("Invalid metadata document: {0}")]
    Json(String),
}

impl SchemaError {
    pub fn malformed(kind: IdentifierKind, name: impl Into<String>) -> Self {
        Self::MalformedIdentifier {
            kind,
            name: name.into(),
        }
    }

    pub fn duplicate(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateName {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    pub fn introspection(message: impl Into<String>) -> Self {
        Self::Introspection(message.into())
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::Json(err.to_string())
    }
}
