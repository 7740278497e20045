//! Shared helper functions for SQL dialect implementations.
//!
//! This module provides reusable building blocks that dialects can compose
//! to implement the `SqlDialect` trait with minimal duplication.

use crate::sql::token::{Token, TokenStream};
use crate::types::DataType;

// =============================================================================
// Identifier Quoting
// =============================================================================

/// Quote identifier with double quotes (ANSI style).
/// Used by: Postgres, DuckDB, Snowflake, Redshift, SQLite, Trino
pub fn quote_double(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote identifier with backticks.
/// Used by: MySQL, BigQuery, Spark/Databricks
pub fn quote_backtick(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

/// Quote identifier with square brackets.
/// Used by: T-SQL (SQL Server, Azure Synapse)
pub fn quote_bracket(ident: &str) -> String {
    format!("[{}]", ident.replace(']', "]]"))
}

// =============================================================================
// String Quoting
// =============================================================================

/// Quote string with single quotes (standard SQL).
pub fn quote_string_single(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Quote string with N prefix for Unicode (T-SQL).
pub fn quote_string_unicode(s: &str) -> String {
    format!("N'{}'", s.replace('\'', "''"))
}

/// Quote string with backslash escaping (MySQL, BigQuery, Databricks).
///
/// These engines treat `\` as an escape character inside literals.
pub fn quote_string_backslash(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

// =============================================================================
// Boolean Formatting
// =============================================================================

/// Format boolean as literal true/false.
pub fn format_bool_literal(b: bool) -> &'static str {
    if b {
        "true"
    } else {
        "false"
    }
}

/// Format boolean as numeric 1/0.
/// Used by: T-SQL, MySQL, SQLite
pub fn format_bool_numeric(b: bool) -> &'static str {
    if b {
        "1"
    } else {
        "0"
    }
}

/// `x = 1`, for engines whose booleans are `BIT` values.
/// Used by: T-SQL
pub fn emit_predicate_bit(value: &TokenStream) -> TokenStream {
    let mut ts = value.clone();
    ts.space()
        .push(Token::Eq)
        .space()
        .push(Token::LitInt(1));
    ts
}

// =============================================================================
// String Aggregation
// =============================================================================

/// `STRING_AGG(x, sep)`.
/// Used by: Postgres, DuckDB, T-SQL, BigQuery
pub fn emit_string_agg(arg: &TokenStream, sep: &TokenStream) -> TokenStream {
    TokenStream::call("string_agg", &[arg.clone(), sep.clone()])
}

/// `LISTAGG(x, sep)`.
/// Used by: Snowflake, Redshift
pub fn emit_listagg(arg: &TokenStream, sep: &TokenStream) -> TokenStream {
    TokenStream::call("listagg", &[arg.clone(), sep.clone()])
}

/// `GROUP_CONCAT(x SEPARATOR sep)`.
/// Used by: MySQL
pub fn emit_group_concat_separator(arg: &TokenStream, sep: &TokenStream) -> TokenStream {
    let mut ts = TokenStream::new();
    ts.push(Token::FunctionName("group_concat".into()))
        .lparen()
        .append(arg)
        .space()
        .push(Token::Separator)
        .space()
        .append(sep)
        .rparen();
    ts
}

/// `GROUP_CONCAT(x, sep)`.
/// Used by: SQLite
pub fn emit_group_concat_comma(arg: &TokenStream, sep: &TokenStream) -> TokenStream {
    TokenStream::call("group_concat", &[arg.clone(), sep.clone()])
}

/// `ARRAY_JOIN(<collect>(x), sep)`.
/// Used by: Databricks (`COLLECT_LIST`), Trino (`ARRAY_AGG`)
pub fn emit_array_join(collect: &str, arg: &TokenStream, sep: &TokenStream) -> TokenStream {
    let collected = TokenStream::call(collect, &[arg.clone()]);
    TokenStream::call("array_join", &[collected, sep.clone()])
}

// =============================================================================
// Function Remapping
// =============================================================================

/// Remap functions for T-SQL dialect.
pub fn remap_function_tsql(name: &str) -> Option<&'static str> {
    match name.to_uppercase().as_str() {
        "CEIL" => Some("CEILING"),
        _ => None,
    }
}

/// Remap functions for SQLite dialect.
///
/// Multi-argument `MAX`/`MIN` are scalar functions in SQLite.
pub fn remap_function_sqlite(name: &str) -> Option<&'static str> {
    match name.to_uppercase().as_str() {
        "GREATEST" => Some("MAX"),
        "LEAST" => Some("MIN"),
        _ => None,
    }
}

// =============================================================================
// Data Types
// =============================================================================

fn decimal(name: &str, precision: u8, scale: u8) -> String {
    format!("{}({}, {})", name, precision, scale)
}

/// Postgres type names.
/// Used by: Postgres
pub fn emit_data_type_postgres(dt: &DataType) -> String {
    match dt {
        DataType::Boolean => "BOOLEAN".into(),
        DataType::Int8 | DataType::Int16 => "SMALLINT".into(),
        DataType::Int32 => "INTEGER".into(),
        DataType::Int64 => "BIGINT".into(),
        DataType::Float32 => "REAL".into(),
        DataType::Float64 => "DOUBLE PRECISION".into(),
        DataType::Decimal { precision, scale } => decimal("NUMERIC", *precision, *scale),
        DataType::String | DataType::Null => "TEXT".into(),
    }
}

/// DuckDB type names.
pub fn emit_data_type_duckdb(dt: &DataType) -> String {
    match dt {
        DataType::Boolean => "BOOLEAN".into(),
        DataType::Int8 => "TINYINT".into(),
        DataType::Int16 => "SMALLINT".into(),
        DataType::Int32 => "INTEGER".into(),
        DataType::Int64 => "BIGINT".into(),
        DataType::Float32 => "REAL".into(),
        DataType::Float64 => "DOUBLE".into(),
        DataType::Decimal { precision, scale } => decimal("DECIMAL", *precision, *scale),
        DataType::String | DataType::Null => "VARCHAR".into(),
    }
}

/// T-SQL type names.
pub fn emit_data_type_tsql(dt: &DataType) -> String {
    match dt {
        DataType::Boolean => "BIT".into(),
        // TINYINT is unsigned in SQL Server
        DataType::Int8 | DataType::Int16 => "SMALLINT".into(),
        DataType::Int32 => "INT".into(),
        DataType::Int64 => "BIGINT".into(),
        DataType::Float32 => "REAL".into(),
        DataType::Float64 => "FLOAT".into(),
        DataType::Decimal { precision, scale } => decimal("DECIMAL", *precision, *scale),
        DataType::String | DataType::Null => "NVARCHAR(MAX)".into(),
    }
}

/// MySQL `CAST` target names. MySQL only accepts a restricted set.
pub fn emit_data_type_mysql(dt: &DataType) -> String {
    match dt {
        DataType::Boolean
        | DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64 => "SIGNED".into(),
        DataType::Float32 => "FLOAT".into(),
        DataType::Float64 => "DOUBLE".into(),
        DataType::Decimal { precision, scale } => decimal("DECIMAL", *precision, *scale),
        DataType::String | DataType::Null => "CHAR".into(),
    }
}

/// Snowflake type names.
pub fn emit_data_type_snowflake(dt: &DataType) -> String {
    match dt {
        DataType::Boolean => "BOOLEAN".into(),
        DataType::Int8 => "TINYINT".into(),
        DataType::Int16 => "SMALLINT".into(),
        DataType::Int32 => "INT".into(),
        DataType::Int64 => "BIGINT".into(),
        DataType::Float32 => "FLOAT".into(),
        DataType::Float64 => "DOUBLE".into(),
        DataType::Decimal { precision, scale } => decimal("NUMBER", *precision, *scale),
        DataType::String | DataType::Null => "VARCHAR".into(),
    }
}

/// BigQuery type names.
pub fn emit_data_type_bigquery(dt: &DataType) -> String {
    match dt {
        DataType::Boolean => "BOOL".into(),
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 => "INT64".into(),
        DataType::Float32 | DataType::Float64 => "FLOAT64".into(),
        // NUMERIC holds at most 29 integral digits and 9 fractional digits
        DataType::Decimal { precision, scale } if precision.saturating_sub(*scale) <= 29 && *scale <= 9 => {
            decimal("NUMERIC", *precision, *scale)
        }
        DataType::Decimal { precision, scale } => decimal("BIGNUMERIC", *precision, *scale),
        DataType::String | DataType::Null => "STRING".into(),
    }
}

/// Redshift type names.
pub fn emit_data_type_redshift(dt: &DataType) -> String {
    match dt {
        DataType::String | DataType::Null => "VARCHAR(MAX)".into(),
        DataType::Decimal { precision, scale } => decimal("DECIMAL", *precision, *scale),
        other => emit_data_type_postgres(other),
    }
}

/// Databricks (Spark SQL) type names.
pub fn emit_data_type_databricks(dt: &DataType) -> String {
    match dt {
        DataType::Boolean => "BOOLEAN".into(),
        DataType::Int8 => "TINYINT".into(),
        DataType::Int16 => "SMALLINT".into(),
        DataType::Int32 => "INT".into(),
        DataType::Int64 => "BIGINT".into(),
        DataType::Float32 => "FLOAT".into(),
        DataType::Float64 => "DOUBLE".into(),
        DataType::Decimal { precision, scale } => decimal("DECIMAL", *precision, *scale),
        DataType::String | DataType::Null => "STRING".into(),
    }
}

/// SQLite type names. Only the storage affinity matters.
pub fn emit_data_type_sqlite(dt: &DataType) -> String {
    match dt {
        DataType::Boolean
        | DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64 => "INTEGER".into(),
        DataType::Float32 | DataType::Float64 => "REAL".into(),
        DataType::Decimal { .. } => "NUMERIC".into(),
        DataType::String | DataType::Null => "TEXT".into(),
    }
}

/// Trino type names.
pub fn emit_data_type_trino(dt: &DataType) -> String {
    match dt {
        DataType::Boolean => "BOOLEAN".into(),
        DataType::Int8 => "TINYINT".into(),
        DataType::Int16 => "SMALLINT".into(),
        DataType::Int32 => "INTEGER".into(),
        DataType::Int64 => "BIGINT".into(),
        DataType::Float32 => "REAL".into(),
        DataType::Float64 => "DOUBLE".into(),
        DataType::Decimal { precision, scale } => decimal("DECIMAL", *precision, *scale),
        DataType::String | DataType::Null => "VARCHAR".into(),
    }
}
