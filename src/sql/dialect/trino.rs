//! Trino (Presto) dialect.
//!
//! Trino features:
//! - ANSI identifier quoting (`"`)
//! - ARRAY_JOIN(ARRAY_AGG(x), sep) for string aggregation

use super::helpers;
use super::SqlDialect;
use crate::sql::token::TokenStream;
use crate::types::DataType;

/// Trino dialect.
#[derive(Debug, Clone, Copy)]
pub struct Trino;

impl SqlDialect for Trino {
    fn compiler_name(&self) -> &'static str {
        "TrinoCompiler"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["presto"]
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_literal(b)
    }

    fn emit_data_type(&self, dt: &DataType) -> String {
        helpers::emit_data_type_trino(dt)
    }

    // A trailing FILTER would bind to ARRAY_JOIN, not to the aggregate, so
    // filtered concatenation goes through CASE WHEN instead.

    fn emit_group_concat(&self, arg: &TokenStream, sep: &TokenStream) -> TokenStream {
        helpers::emit_array_join("array_agg", arg, sep)
    }
}
