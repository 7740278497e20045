//! Node construction and output typing.
//!
//! Every way of building an expression ends here: eager methods on
//! [`Expr`], the free functions, and deferred resolution all call these
//! functions with bound arguments. A single construction path keeps a
//! resolved template structurally equal to the same expression built
//! directly.

use crate::error::{QuarryError, Result};
use crate::types::{highest_precedence, unify, Category, DataType};

use super::op::{Literal, OpKind, Operation, Shape};
use super::Expr;

fn numeric_or_mismatch(kind: &OpKind, arg: &Expr) -> Result<()> {
    if arg.dtype().is_numeric() {
        Ok(())
    } else {
        Err(QuarryError::type_mismatch(kind.name(), vec![arg.dtype()]))
    }
}

fn node(kind: OpKind, args: Vec<Option<&Expr>>, dtype: DataType, shape: Shape) -> Expr {
    let args = args
        .into_iter()
        .map(|a| a.map(|e| e.op().clone()))
        .collect();
    Expr::from_op(Operation::new(kind, args, dtype, shape))
}

pub(crate) fn literal(value: Literal) -> Expr {
    Expr::from_op(Operation::literal(value))
}

/// `Abs`, `Sign`, `Ceil`, `Floor`.
pub(crate) fn unary(kind: OpKind, arg: &Expr) -> Result<Expr> {
    numeric_or_mismatch(&kind, arg)?;
    let dtype = match kind {
        OpKind::Abs | OpKind::Sign => arg.dtype(),
        OpKind::Ceil | OpKind::Floor => {
            if arg.dtype().is_decimal() {
                arg.dtype()
            } else {
                DataType::Int64
            }
        }
        other => {
            return Err(QuarryError::type_mismatch(other.name(), vec![arg.dtype()]));
        }
    };
    Ok(node(kind, vec![Some(arg)], dtype, arg.shape()))
}

/// `Round`. Missing digits become the literal `0`.
///
/// Decimal input keeps its type. Otherwise the result is integral when the
/// digits are the literal zero and floating for any other digit count.
pub(crate) fn round(arg: &Expr, digits: Option<Expr>) -> Result<Expr> {
    numeric_or_mismatch(&OpKind::Round, arg)?;
    let digits = digits.unwrap_or_else(|| literal(Literal::Int(0)));
    if !digits.dtype().is_integer() {
        return Err(QuarryError::type_mismatch(
            "Round",
            vec![arg.dtype(), digits.dtype()],
        ));
    }

    let dtype = if arg.dtype().is_decimal() {
        arg.dtype()
    } else if digits.op().as_literal() == Some(&Literal::Int(0)) {
        DataType::Int64
    } else {
        DataType::Float64
    };
    let shape = Shape::broadcast(&[arg.shape(), digits.shape()]);
    Ok(node(OpKind::Round, vec![Some(arg), Some(&digits)], dtype, shape))
}

/// `Coalesce`, `Greatest`, `Least`.
pub(crate) fn variadic(kind: OpKind, args: &[Expr]) -> Result<Expr> {
    if args.is_empty() {
        return Err(QuarryError::arity(&kind.name().to_lowercase(), 1));
    }
    let types: Vec<DataType> = args.iter().map(Expr::dtype).collect();
    let dtype = highest_precedence(kind.name(), &types)?;
    let shapes: Vec<Shape> = args.iter().map(Expr::shape).collect();
    let shape = Shape::broadcast(&shapes);
    Ok(node(kind, args.iter().map(Some).collect(), dtype, shape))
}

/// `GroupConcat`. Separator defaults to `","`; the filter stays absent.
pub(crate) fn group_concat(arg: &Expr, sep: Option<Expr>, filter: Option<Expr>) -> Result<Expr> {
    let sep = sep.unwrap_or_else(|| literal(Literal::from(",")));

    let mut bad = arg.category() != Category::String || sep.category() != Category::String;
    if let Some(f) = &filter {
        bad |= f.category() != Category::Boolean;
    }
    if bad {
        let mut types = vec![arg.dtype(), sep.dtype()];
        types.extend(filter.as_ref().map(Expr::dtype));
        return Err(QuarryError::type_mismatch("GroupConcat", types));
    }

    Ok(node(
        OpKind::GroupConcat,
        vec![Some(arg), Some(&sep), filter.as_ref()],
        DataType::String,
        Shape::Scalar,
    ))
}

/// `Cast`. Casting to the expression's own type is a no-op.
pub(crate) fn cast(arg: &Expr, to: DataType) -> Result<Expr> {
    let to = to.checked()?;
    if to == DataType::Null {
        return Err(QuarryError::type_mismatch("Cast", vec![arg.dtype(), to]));
    }
    if arg.dtype() == to {
        return Ok(arg.clone());
    }
    Ok(node(OpKind::Cast(to), vec![Some(arg)], to, arg.shape()))
}

/// `Add`, `Subtract`, `Multiply`, `Divide`.
///
/// Division is floating unless a decimal takes part.
pub(crate) fn binary(kind: OpKind, left: &Expr, right: &Expr) -> Result<Expr> {
    let (l, r) = (left.dtype(), right.dtype());
    let mismatch = || QuarryError::type_mismatch(kind.name(), vec![l, r]);
    let operand = |t: DataType| t.is_numeric() || t == DataType::Null;
    if !operand(l) || !operand(r) {
        return Err(mismatch());
    }
    let unified = unify(l, r).ok_or_else(mismatch)?;
    let dtype = match kind {
        OpKind::Divide if !unified.is_decimal() => DataType::Float64,
        _ => unified,
    };
    let shape = Shape::broadcast(&[left.shape(), right.shape()]);
    Ok(node(kind, vec![Some(left), Some(right)], dtype, shape))
}

pub(crate) fn alias(arg: &Expr, name: &str) -> Expr {
    node(
        OpKind::Alias(name.to_string()),
        vec![Some(arg)],
        arg.dtype(),
        arg.shape(),
    )
}
