//! SQL generation module.
//!
//! This module turns expression trees into multi-dialect SQL text.
//! It includes:
//!
//! - [`compiler`] - Operation tree walk
//! - [`query`] - SELECT statement builder
//! - [`token`] - Token types for SQL generation
//! - [`dialect`] - SQL dialect implementations and the registry

pub mod compiler;
pub mod dialect;
pub mod query;
pub mod token;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types at the sql module level
pub use compiler::{compile_expr, ExprCompiler};
pub use dialect::{Dialect, SqlDialect};
pub use query::{Query, SelectExpr, TableRef};
pub use token::{Token, TokenStream};
