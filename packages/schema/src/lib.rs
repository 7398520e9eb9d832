//! Query metadata model for SQL-to-TypeScript declaration generation.
//!
//! Records here mirror what SQL Server reports about a query: the columns of
//! its first result set and the parameters it uses without declaring. Names
//! that end up in generated code are validated when records are built.

pub mod error;
pub mod identifier;
pub mod introspect;
pub mod model;

pub use error::{IdentifierKind, SchemaError, SchemaResult};
pub use identifier::{is_valid_identifier, RESERVED_WORDS};
pub use introspect::{describe, MetadataSource, StaticMetadataSource};
pub use model::{clean_query_text, Dml, FirstResultSet, Namespace, UndeclaredParameter};
