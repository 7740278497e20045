//! SQL Dialect definitions, formatting rules and the compiler registry.
//!
//! This module provides a trait-based abstraction for SQL dialect differences.
//! Each dialect implements `SqlDialect` to handle its specific syntax:
//!
//! - Identifier quoting: `"` (ANSI/PG/DuckDB), `` ` `` (MySQL), `[]` (T-SQL)
//! - Boolean literals: true/false vs 1/0
//! - Type names used in `CAST`
//! - String aggregation: STRING_AGG vs LISTAGG vs GROUP_CONCAT
//! - Function names: CEIL vs CEILING, GREATEST vs MAX
//!
//! # Registry
//!
//! Every dialect is registered under an identifier derived from its
//! compiler name: lowercase it and strip the `compiler` suffix, so
//! `PostgresCompiler` is registered as `postgres`. Lookups are
//! case-insensitive and accept either form.
//!
//! ```ignore
//! use quarry::sql::dialect::{Dialect, SqlDialect};
//!
//! let dialect = Dialect::from_name("PostgresCompiler")?;
//! assert_eq!(dialect.id(), "postgres");
//! let quoted = dialect.quote_identifier("user");  // "user"
//! ```
//!
//! # Feature Matrix
//!
//! | Feature | DuckDB | Postgres | T-SQL | MySQL | Snowflake | BigQuery | Redshift | Databricks | SQLite | Trino |
//! |---------|--------|----------|-------|-------|-----------|----------|----------|------------|--------|-------|
//! | FILTER on string aggregation | ✓ | ✓ | ❌ | ❌ | ❌ | ❌ | ❌ | ❌ | ✓ | ❌ |
//! | GREATEST/LEAST | ✓ | ✓ | 2022+ | ✓ | ✓ | ✓ | ✓ | ✓ | MAX/MIN | ✓ |
//! | Integer `/` truncates | ❌ | ✓ | ✓ | ❌ | ❌ | ❌ | ✓ | ❌ | ✓ | ✓ |
//! | `ROUND(double, n)` | ✓ | NUMERIC only | ✓ | ✓ | ✓ | ✓ | ✓ | ✓ | ✓ | ✓ |
//! | Boolean predicates | ✓ | ✓ | `= 1` | ✓ | ✓ | ✓ | ✓ | ✓ | ✓ | ✓ |

mod bigquery;
mod databricks;
mod duckdb;
pub mod helpers;
mod mysql;
mod postgres;
mod redshift;
mod snowflake;
mod sqlite;
mod trino;
mod tsql;

pub use bigquery::BigQuery;
pub use databricks::Databricks;
pub use duckdb::DuckDb;
pub use mysql::MySql;
pub use postgres::Postgres;
pub use redshift::Redshift;
pub use snowflake::Snowflake;
pub use sqlite::Sqlite;
pub use trino::Trino;
pub use tsql::TSql;

use std::str::FromStr;

use once_cell::sync::Lazy;

use super::token::TokenStream;
use crate::error::{QuarryError, Result};
use crate::types::DataType;

/// SQL dialect trait - defines how SQL constructs are rendered.
///
/// Implementations handle dialect-specific syntax differences.
/// The default implementations follow ANSI SQL where possible.
pub trait SqlDialect: std::fmt::Debug + Sync {
    /// Registered compiler name, e.g. `PostgresCompiler`.
    fn compiler_name(&self) -> &'static str;

    /// Extra lookup names accepted by [`Dialect::from_name`].
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    // =========================================================================
    // Identifier and Literal Quoting
    // =========================================================================

    /// Quote an identifier (table, column, alias).
    ///
    /// - ANSI/PostgreSQL/DuckDB: `"identifier"`
    /// - MySQL: `` `identifier` ``
    /// - T-SQL: `[identifier]`
    fn quote_identifier(&self, ident: &str) -> String;

    /// Quote a string literal.
    ///
    /// Defaults to single quotes with `''` for escaping.
    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_single(s)
    }

    /// Format a boolean literal.
    ///
    /// - PostgreSQL/DuckDB: `true`/`false`
    /// - MySQL/T-SQL/SQLite: `1`/`0`
    fn format_bool(&self, b: bool) -> &'static str;

    /// Format a NULL literal.
    fn format_null(&self) -> &'static str {
        "NULL"
    }

    // =========================================================================
    // Types
    // =========================================================================

    /// Type name used as a `CAST` target.
    fn emit_data_type(&self, dt: &DataType) -> String {
        helpers::emit_data_type_postgres(dt)
    }

    // =========================================================================
    // Functions
    // =========================================================================

    /// Remap a function name for this dialect.
    ///
    /// Returns `Some(new_name)` if the function should be remapped, `None` to keep original.
    /// The input is matched case-insensitively.
    fn remap_function(&self, name: &str) -> Option<&'static str> {
        let _ = name;
        None
    }

    /// Whether ROUND must always be given a digit count.
    ///
    /// T-SQL rejects `ROUND(x)`.
    fn round_requires_digits(&self) -> bool {
        false
    }

    /// Whether `ROUND(x, n)` needs an exact numeric `x`.
    ///
    /// PostgreSQL only defines the two-argument form for `numeric`.
    fn round_digits_requires_numeric(&self) -> bool {
        false
    }

    /// Whether `int / int` truncates, so a floating division needs a cast.
    fn integer_division_truncates(&self) -> bool {
        true
    }

    // =========================================================================
    // Aggregates
    // =========================================================================

    /// Whether the string aggregate accepts a trailing FILTER clause.
    ///
    /// PostgreSQL, DuckDB and SQLite support `agg(x) FILTER (WHERE ...)`.
    /// Elsewhere the compiler rewrites the argument to `CASE WHEN`.
    fn supports_aggregate_filter(&self) -> bool {
        false
    }

    /// Turn a boolean-valued expression into a predicate.
    ///
    /// Identity where booleans are first-class; T-SQL compares its `BIT`
    /// values against `1`.
    fn emit_predicate(&self, value: &TokenStream) -> TokenStream {
        value.clone()
    }

    /// Concatenate `arg` across rows, separated by `sep`.
    fn emit_group_concat(&self, arg: &TokenStream, sep: &TokenStream) -> TokenStream {
        helpers::emit_string_agg(arg, sep)
    }
}

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    #[default]
    DuckDb,
    Postgres,
    TSql,
    MySql,
    Snowflake,
    BigQuery,
    Redshift,
    Databricks,
    Sqlite,
    Trino,
}

/// A registry entry: the derived identifier and its dialect.
#[derive(Debug, Clone)]
pub struct Registration {
    pub id: String,
    pub dialect: Dialect,
}

static REGISTRY: Lazy<Vec<Registration>> = Lazy::new(|| {
    Dialect::ALL
        .iter()
        .map(|d| Registration {
            id: dialect_id(d.compiler_name()),
            dialect: *d,
        })
        .collect()
});

/// Identifier for a compiler name: lowercased, `compiler` suffix removed.
pub fn dialect_id(compiler_name: &str) -> String {
    let lower = compiler_name.trim().to_lowercase();
    match lower.strip_suffix("compiler") {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => lower,
    }
}

/// All registered dialects, in registration order.
pub fn registry() -> &'static [Registration] {
    &REGISTRY
}

impl Dialect {
    /// Every dialect, in registration order.
    pub const ALL: [Dialect; 10] = [
        Dialect::DuckDb,
        Dialect::Postgres,
        Dialect::TSql,
        Dialect::MySql,
        Dialect::Snowflake,
        Dialect::BigQuery,
        Dialect::Redshift,
        Dialect::Databricks,
        Dialect::Sqlite,
        Dialect::Trino,
    ];

    /// Get the dialect implementation.
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::DuckDb => &DuckDb,
            Dialect::Postgres => &Postgres,
            Dialect::TSql => &TSql,
            Dialect::MySql => &MySql,
            Dialect::Snowflake => &Snowflake,
            Dialect::BigQuery => &BigQuery,
            Dialect::Redshift => &Redshift,
            Dialect::Databricks => &Databricks,
            Dialect::Sqlite => &Sqlite,
            Dialect::Trino => &Trino,
        }
    }

    /// Registered identifier, e.g. `postgres`.
    pub fn id(&self) -> &'static str {
        registry()
            .iter()
            .find(|r| r.dialect == *self)
            .map(|r| r.id.as_str())
            .unwrap_or_else(|| self.compiler_name())
    }

    /// All registered identifiers.
    pub fn ids() -> Vec<&'static str> {
        registry().iter().map(|r| r.id.as_str()).collect()
    }

    /// Look a dialect up by identifier, compiler name or alias.
    pub fn from_name(name: &str) -> Result<Dialect> {
        let wanted = dialect_id(name);
        log::trace!("looking up dialect {:?} as {:?}", name, wanted);

        registry()
            .iter()
            .find(|r| r.id == wanted || r.dialect.aliases().contains(&wanted.as_str()))
            .map(|r| r.dialect)
            .ok_or_else(|| QuarryError::UnknownDialect {
                name: name.to_string(),
                available: Dialect::ids(),
            })
    }
}

impl FromStr for Dialect {
    type Err = QuarryError;

    fn from_str(s: &str) -> Result<Self> {
        Dialect::from_name(s)
    }
}

// Implement SqlDialect for Dialect enum by delegating to concrete types
impl SqlDialect for Dialect {
    fn compiler_name(&self) -> &'static str {
        self.dialect().compiler_name()
    }

    fn aliases(&self) -> &'static [&'static str] {
        self.dialect().aliases()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        self.dialect().quote_identifier(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        self.dialect().quote_string(s)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        self.dialect().format_bool(b)
    }

    fn format_null(&self) -> &'static str {
        self.dialect().format_null()
    }

    fn emit_data_type(&self, dt: &DataType) -> String {
        self.dialect().emit_data_type(dt)
    }

    fn remap_function(&self, name: &str) -> Option<&'static str> {
        self.dialect().remap_function(name)
    }

    fn round_requires_digits(&self) -> bool {
        self.dialect().round_requires_digits()
    }

    fn round_digits_requires_numeric(&self) -> bool {
        self.dialect().round_digits_requires_numeric()
    }

    fn integer_division_truncates(&self) -> bool {
        self.dialect().integer_division_truncates()
    }

    fn supports_aggregate_filter(&self) -> bool {
        self.dialect().supports_aggregate_filter()
    }

    fn emit_predicate(&self, value: &TokenStream) -> TokenStream {
        self.dialect().emit_predicate(value)
    }

    fn emit_group_concat(&self, arg: &TokenStream, sep: &TokenStream) -> TokenStream {
        self.dialect().emit_group_concat(arg, sep)
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_ids() {
        assert_eq!(
            Dialect::ids(),
            vec![
                "duckdb",
                "postgres",
                "mssql",
                "mysql",
                "snowflake",
                "bigquery",
                "redshift",
                "databricks",
                "sqlite",
                "trino"
            ]
        );
    }

    #[test]
    fn test_ids_derive_from_compiler_names() {
        for d in Dialect::ALL {
            let name = d.compiler_name();
            assert!(name.ends_with("Compiler"), "{}", name);
            assert_eq!(d.id(), name.trim_end_matches("Compiler").to_lowercase());
        }
    }

    #[test]
    fn test_dialect_display() {
        assert_eq!(Dialect::DuckDb.to_string(), "duckdb");
        assert_eq!(Dialect::Postgres.to_string(), "postgres");
        assert_eq!(Dialect::TSql.to_string(), "mssql");
        assert_eq!(Dialect::MySql.to_string(), "mysql");
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Dialect::from_name("postgres").unwrap(), Dialect::Postgres);
        assert_eq!(Dialect::from_name("POSTGRES").unwrap(), Dialect::Postgres);
        assert_eq!(
            Dialect::from_name("PostgresCompiler").unwrap(),
            Dialect::Postgres
        );
        assert_eq!(Dialect::from_name("tsql").unwrap(), Dialect::TSql);
        assert_eq!(Dialect::from_name("MsSqlCompiler").unwrap(), Dialect::TSql);
        assert_eq!(Dialect::from_name("postgresql").unwrap(), Dialect::Postgres);
        assert_eq!("sqlite".parse::<Dialect>().unwrap(), Dialect::Sqlite);
    }

    #[test]
    fn test_unknown_dialect() {
        let err = Dialect::from_name("oracle").unwrap_err();
        match err {
            QuarryError::UnknownDialect { name, available } => {
                assert_eq!(name, "oracle");
                assert_eq!(available.len(), Dialect::ALL.len());
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(Dialect::from_name("compiler").is_err());
        assert!(Dialect::from_name("").is_err());
    }

    #[test]
    fn test_dialect_id() {
        assert_eq!(dialect_id("PostgresCompiler"), "postgres");
        assert_eq!(dialect_id("duckdb"), "duckdb");
        assert_eq!(dialect_id("Compiler"), "compiler");
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(Dialect::DuckDb.quote_identifier("users"), "\"users\"");
        assert_eq!(Dialect::Postgres.quote_identifier("users"), "\"users\"");
        assert_eq!(Dialect::TSql.quote_identifier("users"), "[users]");
        assert_eq!(Dialect::MySql.quote_identifier("users"), "`users`");
        assert_eq!(Dialect::BigQuery.quote_identifier("users"), "`users`");
        assert_eq!(Dialect::Databricks.quote_identifier("users"), "`users`");
        assert_eq!(Dialect::Sqlite.quote_identifier("users"), "\"users\"");
        assert_eq!(Dialect::Trino.quote_identifier("users"), "\"users\"");
    }

    #[test]
    fn test_quote_identifier_escaping() {
        assert_eq!(
            Dialect::DuckDb.quote_identifier("weird\"name"),
            "\"weird\"\"name\""
        );
        assert_eq!(
            Dialect::TSql.quote_identifier("weird]name"),
            "[weird]]name]"
        );
        assert_eq!(
            Dialect::MySql.quote_identifier("weird`name"),
            "`weird``name`"
        );
    }

    #[test]
    fn test_format_bool() {
        assert_eq!(Dialect::DuckDb.format_bool(true), "true");
        assert_eq!(Dialect::Postgres.format_bool(false), "false");
        assert_eq!(Dialect::TSql.format_bool(true), "1");
        assert_eq!(Dialect::MySql.format_bool(false), "0");
        assert_eq!(Dialect::Sqlite.format_bool(true), "1");
        assert_eq!(Dialect::Trino.format_bool(true), "true");
    }

    #[test]
    fn test_aggregate_filter_support() {
        let with_filter: Vec<_> = Dialect::ALL
            .iter()
            .filter(|d| d.supports_aggregate_filter())
            .map(|d| d.id())
            .collect();
        assert_eq!(with_filter, vec!["duckdb", "postgres", "sqlite"]);
    }

    #[test]
    fn test_emit_data_type() {
        let dt = DataType::Float64;
        assert_eq!(Dialect::Postgres.emit_data_type(&dt), "DOUBLE PRECISION");
        assert_eq!(Dialect::DuckDb.emit_data_type(&dt), "DOUBLE");
        assert_eq!(Dialect::TSql.emit_data_type(&dt), "FLOAT");
        assert_eq!(Dialect::BigQuery.emit_data_type(&dt), "FLOAT64");

        assert_eq!(Dialect::MySql.emit_data_type(&DataType::Int64), "SIGNED");
        assert_eq!(Dialect::TSql.emit_data_type(&DataType::String), "NVARCHAR(MAX)");
        assert_eq!(
            Dialect::Snowflake.emit_data_type(&DataType::decimal(12, 2)),
            "NUMBER(12, 2)"
        );
    }

    #[test]
    fn test_remap_function() {
        assert_eq!(Dialect::TSql.remap_function("CEIL"), Some("CEILING"));
        assert_eq!(Dialect::Sqlite.remap_function("GREATEST"), Some("MAX"));
        assert_eq!(Dialect::Sqlite.remap_function("LEAST"), Some("MIN"));
        assert_eq!(Dialect::Postgres.remap_function("CEIL"), None);
        assert_eq!(Dialect::DuckDb.remap_function("CUSTOM_FUNC"), None);
    }
}
