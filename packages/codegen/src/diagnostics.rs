use crate::codegen::typescript::{parameter_name_collision, repeated_column};
use crate::error::CodegenError;
use crate::options::GeneratorOptions;
use crate::types::map_type;
use serde::Serialize;
use sqlts_schema::Namespace;
use std::fmt;

/// A problem that would stop a namespace from generating
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Query the problem belongs to, if it is tied to one
    pub method_name: Option<String>,

    /// Column or parameter name
    pub property: Option<String>,

    #[serde(serialize_with = "serialize_error")]
    pub error: CodegenError,
}

fn serialize_error<S: serde::Serializer>(error: &CodegenError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(error)
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.method_name, &self.property) {
            (Some(method), Some(property)) => write!(f, "{}.{}: {}", method, property, self.error),
            (Some(method), None) => write!(f, "{}: {}", method, self.error),
            _ => write!(f, "{}", self.error),
        }
    }
}

/// Check a whole namespace and report every problem instead of stopping at
/// the first, unlike generation itself.
pub fn collect_diagnostics(namespace: &Namespace, options: &GeneratorOptions) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if options.emit_parameters {
        if let Some(error) = parameter_name_collision(namespace) {
            diagnostics.push(Diagnostic {
                method_name: None,
                property: None,
                error,
            });
        }
    }

    for dml in namespace.dmls() {
        let method_name = dml.method_name();

        if dml.first_result_set().is_empty() {
            diagnostics.push(Diagnostic {
                method_name: Some(method_name.to_string()),
                property: None,
                error: CodegenError::empty_result_set(method_name),
            });
        }

        if let Some(column) = repeated_column(dml.first_result_set()) {
            diagnostics.push(Diagnostic {
                method_name: Some(method_name.to_string()),
                property: Some(column.to_string()),
                error: CodegenError::duplicate_property(method_name, column),
            });
        }

        let columns = dml
            .first_result_set()
            .iter()
            .map(|c| (&c.column_name, &c.system_type_name));

        let parameters = dml
            .parameters()
            .iter()
            .filter(|_| options.emit_parameters)
            .map(|p| (&p.name, &p.db_type));

        for (property, type_name) in columns.chain(parameters) {
            if let Err(error) = map_type(type_name) {
                diagnostics.push(Diagnostic {
                    method_name: Some(method_name.to_string()),
                    property: Some(property.clone()),
                    error,
                });
            }
        }
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlts_schema::{Dml, FirstResultSet, UndeclaredParameter};

    fn namespace() -> Namespace {
        let films = Dml::new(
            "GetFilms",
            "",
            vec![
                FirstResultSet::new(1, "film_id", false, "int"),
                FirstResultSet::new(2, "location", true, "geography"),
                FirstResultSet::new(3, "path", true, "hierarchyid"),
            ],
        )
        .unwrap()
        .with_parameters(vec![UndeclaredParameter::new("@shape", "geometry", -1)]);

        let insert = Dml::new("InsertFilm", "", vec![]).unwrap();

        Namespace::new("Films", vec![films, insert]).unwrap()
    }

    #[test]
    fn test_collects_every_failure() {
        let diagnostics = collect_diagnostics(&namespace(), &GeneratorOptions::default());

        assert_eq!(
            diagnostics,
            vec![
                Diagnostic {
                    method_name: Some("GetFilms".to_string()),
                    property: Some("location".to_string()),
                    error: CodegenError::unsupported_type("geography"),
                },
                Diagnostic {
                    method_name: Some("GetFilms".to_string()),
                    property: Some("path".to_string()),
                    error: CodegenError::unsupported_type("hierarchyid"),
                },
                Diagnostic {
                    method_name: Some("InsertFilm".to_string()),
                    property: None,
                    error: CodegenError::empty_result_set("InsertFilm"),
                },
            ]
        );
    }

    #[test]
    fn test_parameters_checked_when_emitted() {
        let diagnostics = collect_diagnostics(&namespace(), &GeneratorOptions::with_parameters());

        assert_eq!(diagnostics.len(), 4);
        assert_eq!(diagnostics[2].property.as_deref(), Some("@shape"));
        assert_eq!(
            diagnostics[2].to_string(),
            "GetFilms.@shape: Unsupported SQL type 'geometry'"
        );
    }

    #[test]
    fn test_reports_repeated_column() {
        let joined = Dml::new(
            "GetJoined",
            "SELECT a.id, b.id FROM a JOIN b ON a.b_id = b.id",
            vec![
                FirstResultSet::new(1, "id", false, "int"),
                FirstResultSet::new(2, "id", true, "int"),
            ],
        )
        .unwrap();
        let namespace = Namespace::new("Joins", vec![joined]).unwrap();

        assert_eq!(
            collect_diagnostics(&namespace, &GeneratorOptions::default()),
            vec![Diagnostic {
                method_name: Some("GetJoined".to_string()),
                property: Some("id".to_string()),
                error: CodegenError::duplicate_property("GetJoined", "id"),
            }]
        );
    }

    #[test]
    fn test_clean_namespace() {
        let dml = Dml::new(
            "GetFilm",
            "",
            vec![FirstResultSet::new(1, "film_id", false, "int")],
        )
        .unwrap();
        let namespace = Namespace::new("Films", vec![dml]).unwrap();

        assert!(collect_diagnostics(&namespace, &GeneratorOptions::default()).is_empty());
    }

    #[test]
    fn test_serializes_error_message() {
        let diagnostics = collect_diagnostics(&namespace(), &GeneratorOptions::default());
        let json = serde_json::to_value(&diagnostics[0]).unwrap();

        assert_eq!(json["methodName"], "GetFilms");
        assert_eq!(json["property"], "location");
        assert_eq!(json["error"], "Unsupported SQL type 'geography'");
    }
}
