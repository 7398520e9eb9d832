use crate::error::{IdentifierKind, SchemaError, SchemaResult};

/// Words TypeScript refuses as namespace or interface names
pub const RESERVED_WORDS: &[&str] = &[
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "import",
    "in",
    "instanceof",
    "new",
    "null",
    "return",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
];

/// Check whether `name` can be emitted as a bare TypeScript identifier.
///
/// Only the ASCII subset is accepted: a letter, `_` or `$` followed by
/// letters, digits, `_` or `$`. Reserved words are rejected.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();

    let starts_well = match chars.next() {
        Some(first) => first.is_ascii_alphabetic() || first == '_' || first == '$',
        None => return false,
    };

    starts_well
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && !RESERVED_WORDS.contains(&name)
}

pub(crate) fn validate(kind: IdentifierKind, name: &str) -> SchemaResult<()> {
    if is_valid_identifier(name) {
        Ok(())
    } else {
        Err(SchemaError::malformed(kind, name))
    }
}
