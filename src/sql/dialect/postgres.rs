//! PostgreSQL SQL dialect.
//!
//! PostgreSQL features:
//! - ANSI identifier quoting (`"`)
//! - Native boolean type (true/false)
//! - FILTER clause for aggregates
//! - STRING_AGG for string aggregation
//! - Two-argument ROUND only for NUMERIC

use super::helpers;
use super::SqlDialect;

/// PostgreSQL SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Postgres;

impl SqlDialect for Postgres {
    fn compiler_name(&self) -> &'static str {
        "PostgresCompiler"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["postgresql", "pg"]
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_literal(b)
    }

    // Uses the default emit_data_type (Postgres type names)

    fn round_digits_requires_numeric(&self) -> bool {
        true
    }

    fn supports_aggregate_filter(&self) -> bool {
        true
    }
}
