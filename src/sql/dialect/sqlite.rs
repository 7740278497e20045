//! SQLite dialect.
//!
//! SQLite differences:
//! - Type names only select a storage affinity
//! - Booleans are 1/0
//! - Multi-argument MAX/MIN instead of GREATEST/LEAST
//! - GROUP_CONCAT(x, sep) for string aggregation
//! - FILTER clause on aggregates (3.30+)

use super::helpers;
use super::SqlDialect;
use crate::sql::token::TokenStream;
use crate::types::DataType;

/// SQLite dialect.
#[derive(Debug, Clone, Copy)]
pub struct Sqlite;

impl SqlDialect for Sqlite {
    fn compiler_name(&self) -> &'static str {
        "SQLiteCompiler"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_numeric(b)
    }

    fn emit_data_type(&self, dt: &DataType) -> String {
        helpers::emit_data_type_sqlite(dt)
    }

    fn remap_function(&self, name: &str) -> Option<&'static str> {
        helpers::remap_function_sqlite(name)
    }

    fn supports_aggregate_filter(&self) -> bool {
        true
    }

    fn emit_group_concat(&self, arg: &TokenStream, sep: &TokenStream) -> TokenStream {
        helpers::emit_group_concat_comma(arg, sep)
    }
}
