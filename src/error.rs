//! Error types for expression construction and SQL compilation.
//!
//! Every failure is raised synchronously where it happens: an expression is
//! either fully built and typed, or construction fails and nothing escapes.

use crate::config::SettingsError;
use crate::types::DataType;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, QuarryError>;

/// Errors raised while building, resolving or compiling expressions.
#[derive(Debug, thiserror::Error)]
pub enum QuarryError {
    /// A type specification string could not be parsed.
    #[error("Cannot parse type '{spec}': {reason}")]
    Parse { spec: String, reason: String },

    /// Argument types share no common supertype for the operation.
    #[error("{operation}: incompatible types {}", join_types(.types))]
    TypeMismatch {
        operation: String,
        types: Vec<DataType>,
    },

    /// Wrong number of arguments.
    ///
    /// The message format is relied upon by callers that parse it.
    #[error("{function}() missing {missing} required positional argument{}", plural(.missing))]
    Arity { function: String, missing: usize },

    /// No compiler is registered under the requested identifier.
    #[error("Unknown dialect '{name}'. Available: {}", .available.join(", "))]
    UnknownDialect {
        name: String,
        available: Vec<&'static str>,
    },

    #[error("Table '{table}' has no column '{column}'")]
    NoSuchColumn { table: String, column: String },

    #[error("Table '{table}' defines column '{column}' more than once")]
    DuplicateColumn { table: String, column: String },

    /// A deferred template was used where a bound expression is required.
    #[error("{operation} cannot be used before it is resolved against a table")]
    Unresolved { operation: String },

    #[error("Expression references columns from more than one table: {}", .tables.join(", "))]
    MultipleTables { tables: Vec<String> },

    #[error("Cannot render expression to SQL: {reason}")]
    Unrenderable { reason: String },

    /// Two constructions expected to be identical produced different trees.
    #[error("Expressions are not structurally equal:\n  left:  {left}\n  right: {right}")]
    StructuralEqualityViolation { left: String, right: String },

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl QuarryError {
    pub(crate) fn type_mismatch(operation: impl Into<String>, types: Vec<DataType>) -> Self {
        QuarryError::TypeMismatch {
            operation: operation.into(),
            types,
        }
    }

    pub(crate) fn arity(function: &str, missing: usize) -> Self {
        QuarryError::Arity {
            function: function.to_string(),
            missing,
        }
    }
}

fn plural(n: &usize) -> &'static str {
    if *n == 1 {
        ""
    } else {
        "s"
    }
}

fn join_types(types: &[DataType]) -> String {
    types
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
