//! BigQuery SQL dialect.
//!
//! BigQuery features:
//! - Backtick identifier quoting
//! - Backslash escapes in string literals
//! - INT64 / FLOAT64 / NUMERIC / BIGNUMERIC types
//! - `/` always returns FLOAT64

use super::helpers;
use super::SqlDialect;
use crate::types::DataType;

/// BigQuery SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct BigQuery;

impl SqlDialect for BigQuery {
    fn compiler_name(&self) -> &'static str {
        "BigQueryCompiler"
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
        helpers::emit_data_type_bigquery(dt)
    }

    fn integer_division_truncates(&self) -> bool {
        false
    }
}
