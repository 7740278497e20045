//! Databricks (Spark SQL) dialect.
//!
//! Databricks features:
//! - Backtick identifier quoting
//! - Backslash escapes in string literals
//! - No string aggregate; ARRAY_JOIN(COLLECT_LIST(x), sep) instead

use super::helpers;
use super::SqlDialect;
use crate::sql::token::TokenStream;
use crate::types::DataType;

/// Databricks (Spark SQL) dialect.
#[derive(Debug, Clone, Copy)]
pub struct Databricks;

impl SqlDialect for Databricks {
    fn compiler_name(&self) -> &'static str {
        "DatabricksCompiler"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["spark"]
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_backtick(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_backslash(s)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_literal(b)
    }

    fn emit_data_type(&self, dt: &DataType) -> String {
        helpers::emit_data_type_databricks(dt)
    }

    fn integer_division_truncates(&self) -> bool {
        false
    }

    fn emit_group_concat(&self, arg: &TokenStream, sep: &TokenStream) -> TokenStream {
        helpers::emit_array_join("collect_list", arg, sep)
    }
}
