pub mod typescript;

use crate::error::CodegenResult;
use sqlts_schema::{FirstResultSet, Namespace, UndeclaredParameter};

/// Plugin trait for turning query metadata into declarations.
/// Every method is pure: the same metadata always yields the same text.
pub trait CodeGenerator {
    /// Generate the target type for a SQL type name
    fn generate_type(&self, source_type_name: &str) -> CodegenResult<String>;

    /// Generate a single property (key + optional marker + type)
    fn generate_property(
        &self,
        name: &str,
        source_type_name: &str,
        is_nullable: bool,
    ) -> CodegenResult<String>;

    /// Generate the declaration for one query's result shape
    fn generate_interface(&self, name: &str, columns: &[FirstResultSet]) -> CodegenResult<String>;

    /// Generate the declaration for a query's parameters, if it has any
    fn generate_parameters(
        &self,
        method_name: &str,
        parameters: &[UndeclaredParameter],
    ) -> CodegenResult<Option<String>>;

    /// Generate the complete module for a namespace
    fn generate_namespace(&self, namespace: &Namespace) -> CodegenResult<String>;
}
