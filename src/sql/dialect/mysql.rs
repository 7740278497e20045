//! MySQL SQL dialect.
//!
//! MySQL differences from ANSI:
//! - Backtick identifier quoting
//! - Backslash escapes in string literals
//! - Booleans are 1/0
//! - Restricted CAST targets (SIGNED, DOUBLE, CHAR, DECIMAL)
//! - GROUP_CONCAT(x SEPARATOR s) for string aggregation

use super::helpers;
use super::SqlDialect;
use crate::sql::token::TokenStream;
use crate::types::DataType;

/// MySQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct MySql;

impl SqlDialect for MySql {
    fn compiler_name(&self) -> &'static str {
        "MySQLCompiler"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_backtick(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_backslash(s)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_numeric(b)
    }

    fn emit_data_type(&self, dt: &DataType) -> String {
        helpers::emit_data_type_mysql(dt)
    }

    fn integer_division_truncates(&self) -> bool {
        // `/` returns DECIMAL; DIV is the truncating operator
        false
    }

    fn emit_group_concat(&self, arg: &TokenStream, sep: &TokenStream) -> TokenStream {
        helpers::emit_group_concat_separator(arg, sep)
    }
}
