//! End-to-end compilation from tables and expressions to SQL.
//!
//! This module provides the high-level API:
//!
//! ```text
//! Table / Expr → Operation tree → ExprCompiler → Query → SQL
//! ```
//!
//! # Example
//!
//! ```ignore
//! use quarry::compile::{compile, compile_to_sql, CompileOptions};
//! use quarry::sql::Dialect;
//! use quarry::table::define_table;
//!
//! let t = define_table(&[("a", "int64")], "t")?;
//! assert_eq!(compile_to_sql(&t, "postgres")?, "SELECT\n  *\nFROM \"t\"");
//!
//! let options = CompileOptions::default().with_dialect(Dialect::TSql).with_pretty(false);
//! let output = compile(&t.column("a")?.abs()?, &options)?;
//! println!("{}", output.sql);
//! ```

use crate::config::Settings;
use crate::error::{QuarryError, Result};
use crate::expr::{Expr, OpKind};
use crate::sql::compiler::ExprCompiler;
use crate::sql::query::{Query, SelectExpr, TableRef};
use crate::sql::Dialect;
use crate::table::Table;

// ============================================================================
// Targets
// ============================================================================

/// Something that can be compiled to a SELECT statement.
#[derive(Debug, Clone, Copy)]
pub enum Compilable<'a> {
    /// `SELECT * FROM <table>`
    Table(&'a Table),
    /// `SELECT <expr> AS <name> [FROM <table>]`
    Expr(&'a Expr),
}

impl<'a> From<&'a Table> for Compilable<'a> {
    fn from(table: &'a Table) -> Self {
        Compilable::Table(table)
    }
}

impl<'a> From<&'a Expr> for Compilable<'a> {
    fn from(expr: &'a Expr) -> Self {
        Compilable::Expr(expr)
    }
}

// ============================================================================
// Options
// ============================================================================

/// Options for compilation.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// SQL dialect to generate.
    pub dialect: Dialect,

    /// Multi-line layout.
    pub pretty: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::DuckDb,
            pretty: true,
        }
    }
}

impl CompileOptions {
    /// Set the SQL dialect.
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Options from loaded settings.
    ///
    /// An unknown `default_dialect` falls back to DuckDB with a warning.
    pub fn from_settings(settings: &Settings) -> Self {
        let dialect = match Dialect::from_name(&settings.compile.default_dialect) {
            Ok(d) => d,
            Err(e) => {
                log::warn!("{}; falling back to {}", e, Dialect::default());
                Dialect::default()
            }
        };
        Self {
            dialect,
            pretty: settings.compile.pretty,
        }
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Result of compiling to SQL.
#[derive(Debug, Clone)]
pub struct CompileOutput {
    /// The generated SQL string.
    pub sql: String,

    /// The SQL query AST.
    pub query: Query,

    /// The dialect used for generation.
    pub dialect: Dialect,
}

// ============================================================================
// Compilation
// ============================================================================

/// Compile a table or expression.
pub fn compile<'a>(target: impl Into<Compilable<'a>>, options: &CompileOptions) -> Result<CompileOutput> {
    let dialect = options.dialect;
    let query = match target.into() {
        Compilable::Table(table) => {
            log::debug!("compiling table {} for {}", table.name(), dialect);
            Query::new().select_star().from(TableRef::new(table.name()))
        }
        Compilable::Expr(expr) => build_expr_query(expr, dialect)?,
    };
    let query = if options.pretty { query } else { query.compact() };

    Ok(CompileOutput {
        sql: query.to_sql(dialect),
        query,
        dialect,
    })
}

fn build_expr_query(expr: &Expr, dialect: Dialect) -> Result<Query> {
    log::debug!(
        "compiling {} ({} nodes) for {}",
        expr,
        expr.op().node_count(),
        dialect
    );

    let tables = expr.op().tables();
    if tables.len() > 1 {
        return Err(QuarryError::MultipleTables {
            tables: tables.iter().map(|t| t.name().to_string()).collect(),
        });
    }

    let tokens = ExprCompiler::new(dialect).compile(expr.op())?;
    let mut item = SelectExpr::new(tokens);
    if !matches!(expr.kind(), OpKind::ColumnRef { .. }) {
        item = item.with_alias(&expr.get_name());
    }

    let mut query = Query::new().select(vec![item]);
    if let Some(table) = tables.first() {
        query = query.from(TableRef::new(table.name()));
    }
    Ok(query)
}

/// Compile for the dialect registered under `dialect` (identifier or
/// compiler name, case-insensitive).
pub fn compile_to_sql<'a>(target: impl Into<Compilable<'a>>, dialect: &str) -> Result<String> {
    let dialect = Dialect::from_name(dialect)?;
    let options = CompileOptions::default().with_dialect(dialect);
    Ok(compile(target, &options)?.sql)
}

/// Compile using the default dialect and layout from `settings`.
pub fn compile_with_settings<'a>(
    target: impl Into<Compilable<'a>>,
    settings: &Settings,
) -> Result<String> {
    Ok(compile(target, &CompileOptions::from_settings(settings))?.sql)
}

/// Identifiers of every registered dialect.
pub fn available_dialects() -> Vec<&'static str> {
    Dialect::ids()
}
