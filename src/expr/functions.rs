//! Free-function constructors.
//!
//! `coalesce`, `greatest` and `least` accept any mix of expressions,
//! deferred templates and plain values. When every argument is concrete
//! the result is built immediately, otherwise a template is returned.

use crate::error::{QuarryError, Result};

use super::deferred::{Call, Term};
use super::op::{Literal, OpKind};
use super::{build, Arg, Expr};

/// A literal expression with its natural type.
pub fn literal(value: impl Into<Literal>) -> Expr {
    build::literal(value.into())
}

/// The untyped null literal, as an argument.
pub fn null() -> Arg {
    Arg::Literal(Literal::Null)
}

fn variadic(kind: OpKind, args: Vec<Arg>) -> Result<Term> {
    if args.is_empty() {
        return Err(QuarryError::arity(&kind.name().to_lowercase(), 1));
    }
    Term::call(Call::Variadic { kind, args })
}

/// First non-null argument.
pub fn coalesce(args: Vec<Arg>) -> Result<Term> {
    variadic(OpKind::Coalesce, args)
}

/// Largest argument.
pub fn greatest(args: Vec<Arg>) -> Result<Term> {
    variadic(OpKind::Greatest, args)
}

/// Smallest argument.
pub fn least(args: Vec<Arg>) -> Result<Term> {
    variadic(OpKind::Least, args)
}
