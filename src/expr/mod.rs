//! Typed expressions.
//!
//! An [`Expr`] wraps an [`Operation`] tree and exposes its shape, category
//! and the operation vocabulary as methods. Every method either returns a
//! fully typed expression or fails immediately.
//!
//! # Example
//!
//! ```ignore
//! use quarry::prelude::*;
//!
//! let t = define_table(&[("v1", "decimal(12, 2)"), ("v5", "float64")], "t")?;
//! let v5 = t.column("v5")?;
//!
//! assert_eq!(v5.round(None)?.category(), Category::Integer);
//! assert_eq!(v5.round(Some(2.into()))?.category(), Category::Floating);
//! assert_eq!(t.column("v1")?.ceil()?.dtype(), DataType::decimal(12, 2));
//! ```

mod build;
pub mod deferred;
pub mod functions;
pub mod op;

use std::fmt;

use crate::error::{QuarryError, Result};
use crate::types::{Category, DataType};

pub use deferred::{col, placeholder, Call, Deferred, Term};
pub use functions::{coalesce, greatest, least, literal, null};
pub use op::{Literal, OpKind, Operation, Shape};

/// Shape and category together, e.g. `IntegerColumn` or `StringScalar`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprClass {
    pub shape: Shape,
    pub category: Category,
}

impl fmt::Display for ExprClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.category, self.shape)
    }
}

/// A concrete, typed expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expr {
    op: Operation,
}

impl Expr {
    pub(crate) fn from_op(op: Operation) -> Self {
        Self { op }
    }

    pub fn op(&self) -> &Operation {
        &self.op
    }

    pub fn dtype(&self) -> DataType {
        self.op.dtype()
    }

    pub fn shape(&self) -> Shape {
        self.op.shape()
    }

    pub fn category(&self) -> Category {
        self.op.dtype().category()
    }

    pub fn class(&self) -> ExprClass {
        ExprClass {
            shape: self.shape(),
            category: self.category(),
        }
    }

    pub fn kind(&self) -> &OpKind {
        self.op.kind()
    }

    /// The output name used when the expression is selected.
    pub fn get_name(&self) -> String {
        self.op.name()
    }

    /// Structural equality.
    pub fn equals(&self, other: &Expr) -> bool {
        self == other
    }

    /// Like [`Expr::equals`], failing with both renderings on mismatch.
    pub fn assert_equals(&self, other: &Expr) -> Result<()> {
        if self.equals(other) {
            Ok(())
        } else {
            Err(QuarryError::StructuralEqualityViolation {
                left: self.to_string(),
                right: other.to_string(),
            })
        }
    }

    fn apply(call: Call) -> Result<Expr> {
        Term::call(call)?.into_expr()
    }

    fn unary(&self, kind: OpKind) -> Result<Expr> {
        build::unary(kind, self)
    }

    fn binary(&self, kind: OpKind, other: impl Into<Arg>) -> Result<Expr> {
        Self::apply(Call::Binary {
            kind,
            left: self.into(),
            right: other.into(),
        })
    }

    pub fn abs(&self) -> Result<Expr> {
        self.unary(OpKind::Abs)
    }

    /// Smallest integral value not below the input.
    ///
    /// Decimal input keeps its type; anything else becomes `int64`.
    pub fn ceil(&self) -> Result<Expr> {
        self.unary(OpKind::Ceil)
    }

    pub fn floor(&self) -> Result<Expr> {
        self.unary(OpKind::Floor)
    }

    pub fn sign(&self) -> Result<Expr> {
        self.unary(OpKind::Sign)
    }

    /// Round to `digits` places, or to an integer when `digits` is `None`.
    pub fn round(&self, digits: Option<Arg>) -> Result<Expr> {
        Self::apply(Call::Round {
            arg: self.into(),
            digits,
        })
    }

    /// Replace nulls with `value`. Builds a `Coalesce` of the two.
    pub fn fill_null(&self, value: impl Into<Arg>) -> Result<Expr> {
        Self::apply(Call::Variadic {
            kind: OpKind::Coalesce,
            args: vec![self.into(), value.into()],
        })
    }

    /// First non-null of this expression followed by `others`.
    pub fn coalesce(&self, others: Vec<Arg>) -> Result<Expr> {
        let mut args = vec![Arg::from(self)];
        args.extend(others);
        Self::apply(Call::Variadic {
            kind: OpKind::Coalesce,
            args,
        })
    }

    /// Concatenate string values, separated by `sep` (default `","`),
    /// keeping only rows where `filter` holds.
    pub fn group_concat(&self, sep: Option<Arg>, filter: Option<Arg>) -> Result<Expr> {
        Self::apply(Call::GroupConcat {
            arg: self.into(),
            sep,
            filter,
        })
    }

    pub fn cast(&self, spec: &str) -> Result<Expr> {
        self.cast_to(DataType::parse(spec)?)
    }

    pub fn cast_to(&self, to: DataType) -> Result<Expr> {
        build::cast(self, to)
    }

    pub fn add(&self, other: impl Into<Arg>) -> Result<Expr> {
        self.binary(OpKind::Add, other)
    }

    pub fn sub(&self, other: impl Into<Arg>) -> Result<Expr> {
        self.binary(OpKind::Subtract, other)
    }

    pub fn mul(&self, other: impl Into<Arg>) -> Result<Expr> {
        self.binary(OpKind::Multiply, other)
    }

    pub fn div(&self, other: impl Into<Arg>) -> Result<Expr> {
        self.binary(OpKind::Divide, other)
    }

    /// Give the expression an explicit output name.
    pub fn name(&self, alias: &str) -> Expr {
        build::alias(self, alias)
    }

    /// Compile `SELECT <expr>` for the named dialect.
    pub fn to_sql(&self, dialect: &str) -> Result<String> {
        crate::compile::compile_to_sql(self, dialect)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.op)
    }
}

/// An argument to an expression constructor.
///
/// Plain Rust values convert into literals:
///
/// ```ignore
/// let args: Vec<Arg> = args![null(), col("v3"), 2, "foo"];
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Arg {
    Expr(Expr),
    Deferred(Deferred),
    Literal(Literal),
}

impl Arg {
    /// The concrete expression for this argument; deferred arguments fail.
    pub fn bind(&self) -> Result<Expr> {
        match self {
            Arg::Expr(e) => Ok(e.clone()),
            Arg::Literal(lit) => Ok(build::literal(lit.clone())),
            Arg::Deferred(d) => Err(QuarryError::Unresolved {
                operation: d.to_string(),
            }),
        }
    }

    /// Like [`Arg::bind`], resolving deferred arguments against `table`.
    pub fn resolve(&self, table: &crate::table::Table) -> Result<Expr> {
        match self {
            Arg::Deferred(d) => d.resolve_in(table),
            other => other.bind(),
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Expr(e) => write!(f, "{}", e),
            Arg::Deferred(d) => write!(f, "{}", d),
            Arg::Literal(lit) => write!(f, "{}", lit),
        }
    }
}

impl From<Expr> for Arg {
    fn from(e: Expr) -> Self {
        Arg::Expr(e)
    }
}

impl From<&Expr> for Arg {
    fn from(e: &Expr) -> Self {
        Arg::Expr(e.clone())
    }
}

impl From<Deferred> for Arg {
    fn from(d: Deferred) -> Self {
        Arg::Deferred(d)
    }
}

impl From<&Deferred> for Arg {
    fn from(d: &Deferred) -> Self {
        Arg::Deferred(d.clone())
    }
}

impl From<Term> for Arg {
    fn from(t: Term) -> Self {
        match t {
            Term::Bound(e) => Arg::Expr(e),
            Term::Unbound(d) => Arg::Deferred(d),
        }
    }
}

impl From<&Term> for Arg {
    fn from(t: &Term) -> Self {
        t.clone().into()
    }
}

impl From<Literal> for Arg {
    fn from(lit: Literal) -> Self {
        Arg::Literal(lit)
    }
}

impl From<i64> for Arg {
    fn from(n: i64) -> Self {
        Arg::Literal(n.into())
    }
}

impl From<i32> for Arg {
    fn from(n: i32) -> Self {
        Arg::Literal(n.into())
    }
}

impl From<f64> for Arg {
    fn from(f: f64) -> Self {
        Arg::Literal(f.into())
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Arg::Literal(b.into())
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Literal(s.into())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Literal(s.into())
    }
}

/// Build a `Vec<Arg>` from mixed expressions, templates and plain values.
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        vec![$($crate::expr::Arg::from($arg)),*]
    };
}
