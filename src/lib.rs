//! # Quarry
//!
//! A typed, backend-agnostic query-expression builder that compiles to
//! multi-dialect SQL.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        Table (name + Schema of typed columns)           │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [column / placeholder resolve]
//! ┌─────────────────────────────────────────────────────────┐
//! │   Expr (shape × category) over an Operation tree         │
//! │   typed at construction via the promotion lattice        │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [dialect registry + compiler]
//! ┌─────────────────────────────────────────────────────────┐
//! │                     SQL text                             │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Expressions are immutable and compare structurally. Templates built
//! against [`expr::placeholder`] record their constructor calls and replay
//! them when resolved against a table.

pub mod compile;
pub mod config;
pub mod error;
pub mod expr;
pub mod sql;
pub mod table;
pub mod types;

// Re-export SQL submodules at crate level
pub use sql::dialect;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::args;
    pub use crate::compile::{compile, compile_to_sql, CompileOptions};
    pub use crate::dialect::{Dialect, SqlDialect};
    pub use crate::error::{QuarryError, Result};
    pub use crate::expr::{
        // Constructors
        coalesce,
        col,
        greatest,
        least,
        literal,
        null,
        placeholder,
        // Types
        Arg,
        Deferred,
        Expr,
        ExprClass,
        Literal,
        OpKind,
        Operation,
        Shape,
        Term,
    };
    pub use crate::table::{define_table, Schema, Table};
    pub use crate::types::{Category, DataType};
}

// Also export at crate root for convenience
pub use compile::{available_dialects, compile_to_sql};
pub use error::{QuarryError, Result};
pub use expr::{Expr, Term};
pub use table::{define_table, Table};
pub use types::DataType;
