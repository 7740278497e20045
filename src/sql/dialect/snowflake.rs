//! Snowflake SQL dialect.
//!
//! Snowflake features:
//! - ANSI identifier quoting (`"`)
//! - NUMBER(p, s) for fixed-point types
//! - LISTAGG for string aggregation

use super::helpers;
use super::SqlDialect;
use crate::sql::token::TokenStream;
use crate::types::DataType;

/// Snowflake SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Snowflake;

impl SqlDialect for Snowflake {
    fn compiler_name(&self) -> &'static str {
        "SnowflakeCompiler"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_literal(b)
    }

    fn emit_data_type(&self, dt: &DataType) -> String {
        helpers::emit_data_type_snowflake(dt)
    }

    fn integer_division_truncates(&self) -> bool {
        false
    }

    fn emit_group_concat(&self, arg: &TokenStream, sep: &TokenStream) -> TokenStream {
        helpers::emit_listagg(arg, sep)
    }
}
