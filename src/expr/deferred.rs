//! Deferred expressions: templates built against a placeholder and bound to
//! a table later.
//!
//! A template records the constructor calls made on it. Resolving replays
//! those calls with the placeholder's attribute accesses replaced by real
//! column references, so the result is structurally equal to building the
//! same expression directly:
//!
//! ```ignore
//! let t = define_table(&[("v3", "int32")], "t")?;
//! let template = coalesce(args![null(), col("v3"), 2])?;
//! let direct = coalesce(args![null(), t.column("v3")?, 2])?;
//! assert_eq!(template.resolve(&t)?, direct.into_expr()?);
//! ```

use std::fmt;

use crate::error::{QuarryError, Result};
use crate::table::Table;
use crate::types::DataType;

use super::op::OpKind;
use super::{build, Arg, Expr};

/// A deferred expression node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Deferred {
    /// The placeholder itself, standing for the table.
    Var,
    /// Attribute access on a deferred value.
    Attr { base: Box<Deferred>, name: String },
    /// A recorded constructor call.
    Call(Box<Call>),
}

/// A recorded constructor call with its (possibly deferred) arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Call {
    Unary {
        kind: OpKind,
        arg: Arg,
    },
    Round {
        arg: Arg,
        digits: Option<Arg>,
    },
    Variadic {
        kind: OpKind,
        args: Vec<Arg>,
    },
    GroupConcat {
        arg: Arg,
        sep: Option<Arg>,
        filter: Option<Arg>,
    },
    Cast {
        arg: Arg,
        to: DataType,
    },
    Binary {
        kind: OpKind,
        left: Arg,
        right: Arg,
    },
    Alias {
        arg: Arg,
        name: String,
    },
}

/// The root placeholder.
pub fn placeholder() -> Deferred {
    Deferred::Var
}

/// Shorthand for an attribute of the root placeholder.
pub fn col(name: &str) -> Deferred {
    placeholder().attr(name)
}

impl Call {
    fn operands(&self) -> Vec<&Arg> {
        match self {
            Call::Unary { arg, .. } | Call::Cast { arg, .. } | Call::Alias { arg, .. } => {
                vec![arg]
            }
            Call::Round { arg, digits } => std::iter::once(arg).chain(digits).collect(),
            Call::Variadic { args, .. } => args.iter().collect(),
            Call::GroupConcat { arg, sep, filter } => {
                std::iter::once(arg).chain(sep).chain(filter).collect()
            }
            Call::Binary { left, right, .. } => vec![left, right],
        }
    }

    /// True when no argument is deferred.
    pub fn is_bound(&self) -> bool {
        self.operands()
            .iter()
            .all(|a| !matches!(a, Arg::Deferred(_)))
    }

    /// Run the constructor with arguments produced by `bind`.
    pub(crate) fn apply<F>(&self, bind: &F) -> Result<Expr>
    where
        F: Fn(&Arg) -> Result<Expr>,
    {
        let optional = |a: &Option<Arg>| a.as_ref().map(bind).transpose();
        match self {
            Call::Unary { kind, arg } => build::unary(kind.clone(), &bind(arg)?),
            Call::Round { arg, digits } => build::round(&bind(arg)?, optional(digits)?),
            Call::Variadic { kind, args } => {
                let args = args.iter().map(bind).collect::<Result<Vec<_>>>()?;
                build::variadic(kind.clone(), &args)
            }
            Call::GroupConcat { arg, sep, filter } => {
                build::group_concat(&bind(arg)?, optional(sep)?, optional(filter)?)
            }
            Call::Cast { arg, to } => build::cast(&bind(arg)?, *to),
            Call::Binary { kind, left, right } => {
                build::binary(kind.clone(), &bind(left)?, &bind(right)?)
            }
            Call::Alias { arg, name } => Ok(build::alias(&bind(arg)?, name)),
        }
    }

    fn name(&self) -> String {
        match self {
            Call::Unary { kind, .. } | Call::Variadic { kind, .. } | Call::Binary { kind, .. } => {
                kind.name().to_lowercase()
            }
            Call::Round { .. } => "round".to_string(),
            Call::GroupConcat { .. } => "group_concat".to_string(),
            Call::Cast { .. } => "cast".to_string(),
            Call::Alias { .. } => "name".to_string(),
        }
    }
}

impl Deferred {
    fn call(call: Call) -> Deferred {
        Deferred::Call(Box::new(call))
    }

    fn unary(&self, kind: OpKind) -> Deferred {
        Self::call(Call::Unary {
            kind,
            arg: self.into(),
        })
    }

    fn binary(&self, kind: OpKind, other: impl Into<Arg>) -> Deferred {
        Self::call(Call::Binary {
            kind,
            left: self.into(),
            right: other.into(),
        })
    }

    pub fn attr(&self, name: &str) -> Deferred {
        Deferred::Attr {
            base: Box::new(self.clone()),
            name: name.to_string(),
        }
    }

    pub fn abs(&self) -> Deferred {
        self.unary(OpKind::Abs)
    }

    pub fn ceil(&self) -> Deferred {
        self.unary(OpKind::Ceil)
    }

    pub fn floor(&self) -> Deferred {
        self.unary(OpKind::Floor)
    }

    pub fn sign(&self) -> Deferred {
        self.unary(OpKind::Sign)
    }

    pub fn round(&self, digits: Option<Arg>) -> Deferred {
        Self::call(Call::Round {
            arg: self.into(),
            digits,
        })
    }

    pub fn fill_null(&self, value: impl Into<Arg>) -> Deferred {
        Self::call(Call::Variadic {
            kind: OpKind::Coalesce,
            args: vec![self.into(), value.into()],
        })
    }

    pub fn coalesce(&self, others: Vec<Arg>) -> Deferred {
        let mut args = vec![Arg::from(self)];
        args.extend(others);
        Self::call(Call::Variadic {
            kind: OpKind::Coalesce,
            args,
        })
    }

    pub fn group_concat(&self, sep: Option<Arg>, filter: Option<Arg>) -> Deferred {
        Self::call(Call::GroupConcat {
            arg: self.into(),
            sep,
            filter,
        })
    }

    /// Record a cast. The type spec is parsed now, not at resolution.
    pub fn cast(&self, spec: &str) -> Result<Deferred> {
        Ok(self.cast_to(DataType::parse(spec)?))
    }

    pub fn cast_to(&self, to: DataType) -> Deferred {
        Self::call(Call::Cast {
            arg: self.into(),
            to,
        })
    }

    pub fn add(&self, other: impl Into<Arg>) -> Deferred {
        self.binary(OpKind::Add, other)
    }

    pub fn sub(&self, other: impl Into<Arg>) -> Deferred {
        self.binary(OpKind::Subtract, other)
    }

    pub fn mul(&self, other: impl Into<Arg>) -> Deferred {
        self.binary(OpKind::Multiply, other)
    }

    pub fn div(&self, other: impl Into<Arg>) -> Deferred {
        self.binary(OpKind::Divide, other)
    }

    pub fn name(&self, alias: &str) -> Deferred {
        Self::call(Call::Alias {
            arg: self.into(),
            name: alias.to_string(),
        })
    }

    /// Bind the template to `table`, producing a concrete expression.
    pub fn resolve(&self, table: &Table) -> Result<Expr> {
        log::debug!("resolving {} against table {}", self, table.name());
        self.resolve_in(table)
    }

    pub(crate) fn resolve_in(&self, table: &Table) -> Result<Expr> {
        match self {
            Deferred::Var => Err(QuarryError::Unresolved {
                operation: "the bare placeholder".to_string(),
            }),
            Deferred::Attr { base, name } => match base.as_ref() {
                Deferred::Var => table.column(name),
                other => Err(QuarryError::Unresolved {
                    operation: format!("attribute '{}' of {}", name, other),
                }),
            },
            Deferred::Call(call) => call.apply(&|arg: &Arg| arg.resolve(table)),
        }
    }
}

impl fmt::Display for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deferred::Var => f.write_str("_"),
            Deferred::Attr { base, name } => write!(f, "{}.{}", base, name),
            Deferred::Call(call) => {
                if let Call::Cast { to, .. } = call.as_ref() {
                    return write!(f, "cast({}, {})", call.operands()[0], to);
                }
                write!(f, "{}(", call.name())?;
                for (i, arg) in call.operands().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Either a concrete expression or a deferred template.
///
/// Returned by constructors whose arguments may be deferred. When every
/// argument is bound the constructor runs immediately and the result is
/// [`Term::Bound`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Bound(Expr),
    Unbound(Deferred),
}

impl Term {
    pub(crate) fn call(call: Call) -> Result<Term> {
        if call.is_bound() {
            call.apply(&Arg::bind).map(Term::Bound)
        } else {
            Ok(Term::Unbound(Deferred::call(call)))
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, Term::Bound(_))
    }

    pub fn as_expr(&self) -> Option<&Expr> {
        match self {
            Term::Bound(e) => Some(e),
            Term::Unbound(_) => None,
        }
    }

    /// The concrete expression, or `Unresolved` for a template.
    pub fn into_expr(self) -> Result<Expr> {
        match self {
            Term::Bound(e) => Ok(e),
            Term::Unbound(d) => Err(QuarryError::Unresolved {
                operation: d.to_string(),
            }),
        }
    }

    /// Bind against `table`. Bound terms are returned unchanged.
    pub fn resolve(&self, table: &Table) -> Result<Expr> {
        match self {
            Term::Bound(e) => Ok(e.clone()),
            Term::Unbound(d) => d.resolve(table),
        }
    }

    fn unary(&self, kind: OpKind) -> Result<Term> {
        Term::call(Call::Unary {
            kind,
            arg: self.into(),
        })
    }

    fn binary(&self, kind: OpKind, other: impl Into<Arg>) -> Result<Term> {
        Term::call(Call::Binary {
            kind,
            left: self.into(),
            right: other.into(),
        })
    }

    pub fn abs(&self) -> Result<Term> {
        self.unary(OpKind::Abs)
    }

    pub fn ceil(&self) -> Result<Term> {
        self.unary(OpKind::Ceil)
    }

    pub fn floor(&self) -> Result<Term> {
        self.unary(OpKind::Floor)
    }

    pub fn sign(&self) -> Result<Term> {
        self.unary(OpKind::Sign)
    }

    pub fn round(&self, digits: Option<Arg>) -> Result<Term> {
        Term::call(Call::Round {
            arg: self.into(),
            digits,
        })
    }

    pub fn fill_null(&self, value: impl Into<Arg>) -> Result<Term> {
        Term::call(Call::Variadic {
            kind: OpKind::Coalesce,
            args: vec![self.into(), value.into()],
        })
    }

    pub fn coalesce(&self, others: Vec<Arg>) -> Result<Term> {
        let mut args = vec![Arg::from(self)];
        args.extend(others);
        Term::call(Call::Variadic {
            kind: OpKind::Coalesce,
            args,
        })
    }

    pub fn group_concat(&self, sep: Option<Arg>, filter: Option<Arg>) -> Result<Term> {
        Term::call(Call::GroupConcat {
            arg: self.into(),
            sep,
            filter,
        })
    }

    pub fn cast(&self, spec: &str) -> Result<Term> {
        self.cast_to(DataType::parse(spec)?)
    }

    pub fn cast_to(&self, to: DataType) -> Result<Term> {
        Term::call(Call::Cast {
            arg: self.into(),
            to,
        })
    }

    pub fn add(&self, other: impl Into<Arg>) -> Result<Term> {
        self.binary(OpKind::Add, other)
    }

    pub fn sub(&self, other: impl Into<Arg>) -> Result<Term> {
        self.binary(OpKind::Subtract, other)
    }

    pub fn mul(&self, other: impl Into<Arg>) -> Result<Term> {
        self.binary(OpKind::Multiply, other)
    }

    pub fn div(&self, other: impl Into<Arg>) -> Result<Term> {
        self.binary(OpKind::Divide, other)
    }

    pub fn name(&self, alias: &str) -> Result<Term> {
        Term::call(Call::Alias {
            arg: self.into(),
            name: alias.to_string(),
        })
    }
}

impl From<Expr> for Term {
    fn from(e: Expr) -> Self {
        Term::Bound(e)
    }
}

impl From<Deferred> for Term {
    fn from(d: Deferred) -> Self {
        Term::Unbound(d)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Bound(e) => write!(f, "{}", e),
            Term::Unbound(d) => write!(f, "{}", d),
        }
    }
}
