//! DuckDB SQL dialect.
//!
//! DuckDB is PostgreSQL-compatible with extensions:
//! - ANSI identifier quoting (`"`)
//! - FILTER clause for aggregates
//! - `/` on integers returns a double

use super::helpers;
use super::SqlDialect;
use crate::types::DataType;

/// DuckDB SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct DuckDb;

impl SqlDialect for DuckDb {
    fn compiler_name(&self) -> &'static str {
        "DuckDBCompiler"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_literal(b)
    }

    fn emit_data_type(&self, dt: &DataType) -> String {
        helpers::emit_data_type_duckdb(dt)
    }

    fn integer_division_truncates(&self) -> bool {
        false
    }

    fn supports_aggregate_filter(&self) -> bool {
        true
    }
}
