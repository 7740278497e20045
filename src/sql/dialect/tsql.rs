//! T-SQL (SQL Server / Azure SQL) dialect.
//!
//! T-SQL has significant differences from ANSI:
//! - Square bracket identifier quoting (`[name]`)
//! - No native boolean in SELECT (1/0)
//! - N'...' prefix for Unicode strings
//! - `CEILING` instead of `CEIL`
//! - `ROUND` always takes a length argument
//! - No FILTER clause; STRING_AGG since 2017
//! - No boolean predicates: `BIT` values compare against 1

use super::helpers;
use super::SqlDialect;
use crate::sql::token::TokenStream;
use crate::types::DataType;

/// T-SQL (SQL Server) dialect.
#[derive(Debug, Clone, Copy)]
pub struct TSql;

impl SqlDialect for TSql {
    fn compiler_name(&self) -> &'static str {
        "MsSqlCompiler"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["tsql", "sqlserver"]
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_bracket(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        // T-SQL uses N'...' for Unicode strings
        if !s.is_ascii() {
            helpers::quote_string_unicode(s)
        } else {
            helpers::quote_string_single(s)
        }
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_numeric(b)
    }

    fn emit_data_type(&self, dt: &DataType) -> String {
        helpers::emit_data_type_tsql(dt)
    }

    fn remap_function(&self, name: &str) -> Option<&'static str> {
        helpers::remap_function_tsql(name)
    }

    fn round_requires_digits(&self) -> bool {
        true
    }

    fn emit_predicate(&self, value: &TokenStream) -> TokenStream {
        helpers::emit_predicate_bit(value)
    }
}
