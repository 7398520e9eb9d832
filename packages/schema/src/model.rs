use crate::error::{IdentifierKind, SchemaError, SchemaResult};
use crate::identifier::validate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One column of a query's first result set, as described by
/// `sys.dm_exec_describe_first_result_set`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirstResultSet {
    pub column_ordinal: u32,
    pub column_name: String,
    pub is_nullable: bool,
    pub system_type_name: String,
}

impl FirstResultSet {
    pub fn new(
        column_ordinal: u32,
        column_name: impl Into<String>,
        is_nullable: bool,
        system_type_name: impl Into<String>,
    ) -> Self {
        Self {
            column_ordinal,
            column_name: column_name.into(),
            is_nullable,
            system_type_name: system_type_name.into(),
        }
    }
}

/// A parameter the query references without declaring, as suggested by
/// `sp_describe_undeclared_parameters`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UndeclaredParameter {
    pub name: String,
    pub db_type: String,
    pub length: i16,
}

impl UndeclaredParameter {
    pub fn new(name: impl Into<String>, db_type: impl Into<String>, length: i16) -> Self {
        Self {
            name: name.into(),
            db_type: db_type.into(),
            length,
        }
    }
}

/// A single data manipulation statement and everything known about its shape.
///
/// The method name is validated on construction, so a `Dml` always carries a
/// name that can be emitted as an interface name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawDml")]
pub struct Dml {
    method_name: String,
    query_text: String,
    cleaned_query_text: String,
    first_result_set: Vec<FirstResultSet>,
    parameters: Vec<UndeclaredParameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    xml_schema: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
}

impl Dml {
    pub fn new(
        method_name: impl Into<String>,
        query_text: impl Into<String>,
        first_result_set: Vec<FirstResultSet>,
    ) -> SchemaResult<Self> {
        let method_name = method_name.into();
        validate(IdentifierKind::Method, &method_name)?;

        let mut ordinals = HashSet::new();
        for column in &first_result_set {
            if column.column_ordinal == 0 {
                return Err(SchemaError::InvalidOrdinal {
                    column: column.column_name.clone(),
                    ordinal: column.column_ordinal,
                });
            }
            if !ordinals.insert(column.column_ordinal) {
                return Err(SchemaError::DuplicateOrdinal {
                    method: method_name,
                    column: column.column_name.clone(),
                    ordinal: column.column_ordinal,
                });
            }
        }

        let query_text = query_text.into();
        let cleaned_query_text = clean_query_text(&query_text);

        Ok(Self {
            method_name,
            query_text,
            cleaned_query_text,
            first_result_set,
            parameters: Vec::new(),
            xml_schema: None,
            correlation_id: None,
        })
    }

    pub fn with_parameters(mut self, parameters: Vec<UndeclaredParameter>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Override the cleaned text derived from the query text
    pub fn with_cleaned_query_text(mut self, cleaned: impl Into<String>) -> Self {
        self.cleaned_query_text = cleaned.into();
        self
    }

    pub fn with_xml_schema(mut self, xml_schema: impl Into<String>) -> Self {
        self.xml_schema = Some(xml_schema.into());
        self
    }

    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn cleaned_query_text(&self) -> &str {
        &self.cleaned_query_text
    }

    pub fn first_result_set(&self) -> &[FirstResultSet] {
        &self.first_result_set
    }

    pub fn parameters(&self) -> &[UndeclaredParameter] {
        &self.parameters
    }

    pub fn xml_schema(&self) -> Option<&str> {
        self.xml_schema.as_deref()
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDml {
    method_name: String,
    #[serde(default)]
    query_text: String,
    #[serde(default)]
    cleaned_query_text: Option<String>,
    #[serde(default)]
    first_result_set: Vec<FirstResultSet>,
    #[serde(default)]
    parameters: Vec<UndeclaredParameter>,
    #[serde(default)]
    xml_schema: Option<String>,
    #[serde(default)]
    correlation_id: Option<String>,
}

impl TryFrom<RawDml> for Dml {
    type Error = SchemaError;

    fn try_from(raw: RawDml) -> SchemaResult<Self> {
        let mut dml = Dml::new(raw.method_name, raw.query_text, raw.first_result_set)?
            .with_parameters(raw.parameters);

        if let Some(cleaned) = raw.cleaned_query_text {
            dml = dml.with_cleaned_query_text(cleaned);
        }
        dml.xml_schema = raw.xml_schema;
        dml.correlation_id = raw.correlation_id;

        Ok(dml)
    }
}

/// A generated module: one namespace holding one interface per query.
///
/// Construction validates the namespace name and rejects duplicate method
/// names, so a `Namespace` can always be rendered without name collisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNamespace")]
pub struct Namespace {
    name: String,
    dmls: Vec<Dml>,
}

impl Namespace {
    pub fn new(name: impl Into<String>, dmls: Vec<Dml>) -> SchemaResult<Self> {
        let name = name.into();
        validate(IdentifierKind::Namespace, &name)?;

        {
            let mut seen = HashSet::new();
            if let Some(duplicate) = dmls.iter().find(|dml| !seen.insert(dml.method_name())) {
                return Err(SchemaError::duplicate(&name, duplicate.method_name()));
            }
        }

        Ok(Self { name, dmls })
    }

    /// Parse and validate a metadata document
    pub fn from_json(source: &str) -> SchemaResult<Self> {
        let raw: RawNamespace = serde_json::from_str(source)?;
        Self::try_from(raw)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dmls(&self) -> &[Dml] {
        &self.dmls
    }

    pub fn len(&self) -> usize {
        self.dmls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dmls.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct RawNamespace {
    name: String,
    #[serde(default)]
    dmls: Vec<RawDml>,
}

impl TryFrom<RawNamespace> for Namespace {
    type Error = SchemaError;

    fn try_from(raw: RawNamespace) -> SchemaResult<Self> {
        let dmls = raw
            .dmls
            .into_iter()
            .map(Dml::try_from)
            .collect::<SchemaResult<Vec<_>>>()?;
        Namespace::new(raw.name, dmls)
    }
}

/// Strip surrounding whitespace and trailing semicolons from a query so it
/// can be embedded in a larger statement (e.g. `FOR XML AUTO, XMLSCHEMA`).
pub fn clean_query_text(query: &str) -> String {
    let mut cleaned = query.trim();
    while let Some(stripped) = cleaned.strip_suffix(';') {
        cleaned = stripped.trim_end();
    }
    cleaned.to_string()
}
