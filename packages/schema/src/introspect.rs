//! Boundary to the database engine that describes queries.
//!
//! The engine itself lives outside this workspace. Implementors of
//! [`MetadataSource`] run the statements below against SQL Server and hand
//! back fully materialized rows; [`describe`] folds them into a [`Dml`].

use crate::error::{SchemaError, SchemaResult};
use crate::model::{clean_query_text, Dml, FirstResultSet, UndeclaredParameter};
use std::collections::HashMap;
use tracing::debug;

/// Describes the first result set of `@Query`, skipping hidden columns.
pub const FIRST_RESULT_SET_SQL: &str = r#"
SELECT
    t.column_ordinal ColumnOrdinal
  , t.[name] ColumnName
  , t.is_nullable IsNullable
  , t.system_type_name SystemTypeName
FROM sys.dm_exec_describe_first_result_set(@Query, null, 1) t
WHERE t.is_hidden = 0;
"#;

/// Describes the input parameters `@Query` uses without declaring them.
pub const UNDECLARED_PARAMETERS_SQL: &str = r#"
DECLARE @query$ nvarchar(max) = @Query;
DECLARE @Result AS TABLE (
    parameter_ordinal INT NOT NULL
  , name SYSNAME NOT NULL
  , suggested_system_type_id INT NOT NULL
  , suggested_system_type_name NVARCHAR(256) NULL
  , suggested_max_length SMALLINT NOT NULL
  , suggested_precision TINYINT NOT NULL
  , suggested_scale TINYINT NOT NULL
  , suggested_user_type_id INT NULL
  , suggested_user_type_database SYSNAME NULL
  , suggested_user_type_schema SYSNAME NULL
  , suggested_user_type_name SYSNAME NULL
  , suggested_assembly_qualified_type_name NVARCHAR(4000) NULL
  , suggested_xml_collection_id INT NULL
  , suggested_xml_collection_database SYSNAME NULL
  , suggested_xml_collection_schema SYSNAME NULL
  , suggested_xml_collection_name SYSNAME NULL
  , suggested_is_xml_document BIT NOT NULL
  , suggested_is_case_sensitive BIT NOT NULL
  , suggested_is_fixed_length_clr_type BIT NOT NULL
  , suggested_is_input BIT NOT NULL
  , suggested_is_output BIT NOT NULL
  , formal_parameter_name SYSNAME NULL
  , suggested_tds_type_id INT NOT NULL
  , suggested_tds_length INT NOT NULL
);

INSERT @Result
EXEC sp_describe_undeclared_parameters @query$;

SELECT t.[name] [Name], t.suggested_system_type_name DbType, t.suggested_max_length [Length]
FROM @Result t
WHERE t.suggested_is_input = 1;
"#;

/// Wrap a query so the engine returns its XML schema.
pub fn xml_schema_sql(query: &str) -> String {
    format!("{}\nFOR XML AUTO, XMLSCHEMA", clean_query_text(query))
}

/// Source of query metadata (normally a live SQL Server connection)
pub trait MetadataSource {
    /// Columns of the first result set, in ordinal order
    fn first_result_set(&self, query: &str) -> SchemaResult<Vec<FirstResultSet>>;

    /// Input parameters referenced but not declared by the query
    fn undeclared_parameters(&self, query: &str) -> SchemaResult<Vec<UndeclaredParameter>>;
}

/// Ask `source` to describe `query` and build the matching [`Dml`]
pub fn describe<S: MetadataSource + ?Sized>(
    source: &S,
    method_name: &str,
    query: &str,
) -> SchemaResult<Dml> {
    let cleaned = clean_query_text(query);

    let columns = source.first_result_set(&cleaned)?;
    let parameters = source.undeclared_parameters(&cleaned)?;

    debug!(
        method = method_name,
        columns = columns.len(),
        parameters = parameters.len(),
        "Described query"
    );

    Ok(Dml::new(method_name, query, columns)?.with_parameters(parameters))
}

/// In-memory metadata keyed by cleaned query text, for fixtures and offline runs
#[derive(Debug, Clone, Default)]
pub struct StaticMetadataSource {
    entries: HashMap<String, (Vec<FirstResultSet>, Vec<UndeclaredParameter>)>,
}

impl StaticMetadataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        query: &str,
        columns: Vec<FirstResultSet>,
        parameters: Vec<UndeclaredParameter>,
    ) {
        self.entries
            .insert(clean_query_text(query), (columns, parameters));
    }

    fn lookup(
        &self,
        query: &str,
    ) -> SchemaResult<&(Vec<FirstResultSet>, Vec<UndeclaredParameter>)> {
        self.entries
            .get(&clean_query_text(query))
            .ok_or_else(|| SchemaError::introspection(format!("no metadata for query: {query}")))
    }
}

impl MetadataSource for StaticMetadataSource {
    fn first_result_set(&self, query: &str) -> SchemaResult<Vec<FirstResultSet>> {
        Ok(self.lookup(query)?.0.clone())
    }

    fn undeclared_parameters(&self, query: &str) -> SchemaResult<Vec<UndeclaredParameter>> {
        Ok(self.lookup(query)?.1.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUERY: &str = "SELECT film_id, description FROM film WHERE film_id = @id;";

    fn source() -> StaticMetadataSource {
        let mut source = StaticMetadataSource::new();
        source.insert(
            QUERY,
            vec![
                FirstResultSet::new(1, "film_id", false, "int"),
                FirstResultSet::new(2, "description", true, "text"),
            ],
            vec![UndeclaredParameter::new("@id", "int", 4)],
        );
        source
    }

    #[test]
    fn test_describe_builds_dml() {
        let dml = describe(&source(), "GetMyFilm", QUERY).unwrap();

        assert_eq!(dml.method_name(), "GetMyFilm");
        assert_eq!(dml.query_text(), QUERY);
        assert_eq!(
            dml.cleaned_query_text(),
            "SELECT film_id, description FROM film WHERE film_id = @id"
        );
        assert_eq!(dml.first_result_set().len(), 2);
        assert_eq!(dml.parameters()[0].name, "@id");
    }

    #[test]
    fn test_describe_unknown_query() {
        let err = describe(&source(), "GetOther", "SELECT 2").unwrap_err();
        assert!(matches!(err, SchemaError::Introspection(_)));
    }

    #[test]
    fn test_describe_validates_method_name() {
        let err = describe(&source(), "get film", QUERY).unwrap_err();
        assert!(matches!(err, SchemaError::MalformedIdentifier { .. }));
    }

    #[test]
    fn test_xml_schema_sql_strips_semicolon() {
        assert_eq!(
            xml_schema_sql("SELECT * FROM film;"),
            "SELECT * FROM film\nFOR XML AUTO, XMLSCHEMA"
        );
    }
}
