//! Amazon Redshift SQL dialect.
//!
//! Redshift features:
//! - PostgreSQL-based syntax
//! - ANSI identifier quoting (`"`)
//! - No FILTER clause
//! - LISTAGG instead of STRING_AGG

use super::helpers;
use super::SqlDialect;
use crate::sql::token::TokenStream;
use crate::types::DataType;

/// Amazon Redshift SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Redshift;

impl SqlDialect for Redshift {
    fn compiler_name(&self) -> &'static str {
        "RedshiftCompiler"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_literal(b)
    }

    fn emit_data_type(&self, dt: &DataType) -> String {
        helpers::emit_data_type_redshift(dt)
    }

    fn emit_group_concat(&self, arg: &TokenStream, sep: &TokenStream) -> TokenStream {
        helpers::emit_listagg(arg, sep)
    }
}
