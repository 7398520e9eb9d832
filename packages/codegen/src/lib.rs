//! # SQL result-set to TypeScript declarations
//!
//! Turns the metadata SQL Server reports about a query into TypeScript
//! interfaces, one per query, grouped into one namespace per module.
//!
//! ## Pipeline
//!
//! - **Type mapping**: `int` → `number`, `nvarchar(50)` → `string`, ...
//! - **Property keys**: `film_id` stays bare, `5films` becomes `"5films"`
//! - **Property lines**: nullable columns become optional (`description?: string`)
//! - **Interfaces and namespaces**: fixed indentation, one line ending throughout
//!
//! ## Example
//!
//! ```rust
//! use sqlts_codegen::format_namespace;
//! use sqlts_schema::{Dml, FirstResultSet, Namespace};
//!
//! let dml = Dml::new(
//!     "GetMyFilm",
//!     "SELECT film_id FROM film",
//!     vec![FirstResultSet::new(1, "film_id", false, "int")],
//! )
//! .unwrap();
//! let namespace = Namespace::new("Films", vec![dml]).unwrap();
//!
//! assert_eq!(
//!     format_namespace(&namespace).unwrap(),
//!     "namespace Films {\n    interface GetMyFilm {\n        film_id: number\n    }\n}"
//! );
//! ```

pub mod codegen;
pub mod diagnostics;
pub mod error;
pub mod keys;
pub mod options;
pub mod types;

pub use codegen::{typescript::TypeScriptGenerator, CodeGenerator};
pub use diagnostics::{collect_diagnostics, Diagnostic};
pub use error::{CodegenError, CodegenResult};
pub use keys::format_key;
pub use options::{GeneratorOptions, LineEnding};
pub use types::{map_type, supported_types, TsType};

use sqlts_schema::{FirstResultSet, Namespace};

/// Render one property line with default options
pub fn format_property(name: &str, source_type_name: &str, is_nullable: bool) -> CodegenResult<String> {
    TypeScriptGenerator::new().generate_property(name, source_type_name, is_nullable)
}

/// Render one interface block with default options
pub fn format_interface(method_name: &str, columns: &[FirstResultSet]) -> CodegenResult<String> {
    TypeScriptGenerator::new().generate_interface(method_name, columns)
}

/// Render a namespace block with default options
pub fn format_namespace(namespace: &Namespace) -> CodegenResult<String> {
    TypeScriptGenerator::new().generate_namespace(namespace)
}
