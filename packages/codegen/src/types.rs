use crate::error::{CodegenError, CodegenResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// TypeScript type a SQL column is declared as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TsType {
    Number,
    String,
    Boolean,
    /// Rendered as the `Date` class
    Date,
    /// Opaque values (`sql_variant`, CLR types, table types)
    Any,
}

impl TsType {
    pub fn as_str(self) -> &'static str {
        match self {
            TsType::Number => "number",
            TsType::String => "string",
            TsType::Boolean => "boolean",
            TsType::Date => "Date",
            TsType::Any => "any",
        }
    }
}

impl fmt::Display for TsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SQL Server system type names and the TypeScript type each maps to
pub const TYPE_TABLE: &[(&str, TsType)] = &[
    ("bigint", TsType::Number),
    ("decimal", TsType::Number),
    ("money", TsType::Number),
    ("smallmoney", TsType::Number),
    ("float", TsType::Number),
    ("real", TsType::Number),
    ("smallint", TsType::Number),
    ("tinyint", TsType::Number),
    ("int", TsType::Number),
    ("binary", TsType::String),
    ("image", TsType::String),
    ("timestamp", TsType::String),
    ("varbinary", TsType::String),
    ("char", TsType::String),
    ("nchar", TsType::String),
    ("ntext", TsType::String),
    ("nvarchar", TsType::String),
    ("varchar", TsType::String),
    ("text", TsType::String),
    ("xml", TsType::String),
    ("uniqueidentifier", TsType::String),
    ("bit", TsType::Boolean),
    ("date", TsType::Date),
    ("datetime", TsType::Date),
    ("datetime2", TsType::Date),
    ("smalldatetime", TsType::Date),
    ("time", TsType::Date),
    ("datetimeoffset", TsType::Date),
    ("sql_variant", TsType::Any),
    ("variant", TsType::Any),
    ("udt", TsType::Any),
    ("structured", TsType::Any),
];

/// All SQL type names the mapper accepts, in table order
pub fn supported_types() -> impl Iterator<Item = &'static str> {
    TYPE_TABLE.iter().map(|(name, _)| *name)
}

/// Map a SQL Server type name to its TypeScript type.
///
/// Matching ignores case. Size and precision arguments such as the `(50)` in
/// `varchar(50)` are ignored, since `system_type_name` reports them.
pub fn map_type(source_type_name: &str) -> CodegenResult<TsType> {
    let base = base_type_name(source_type_name);

    TYPE_TABLE
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(base))
        .map(|(_, ts_type)| *ts_type)
        .ok_or_else(|| CodegenError::unsupported_type(source_type_name))
}

fn base_type_name(type_name: &str) -> &str {
    let trimmed = type_name.trim();
    match trimmed.find('(') {
        Some(open) if trimmed.ends_with(')') => trimmed[..open].trim_end(),
        _ => trimmed,
    }
}
