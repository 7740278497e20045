//! Operation tree to token stream.
//!
//! The walk is shared by every dialect; dialect differences come in through
//! the [`SqlDialect`] hooks (quoting, type names, function remapping, string
//! aggregation).

use crate::error::{QuarryError, Result};
use crate::expr::{Literal, OpKind, Operation};
use crate::types::{Category, DataType};

use super::dialect::{Dialect, SqlDialect};
use super::token::{Token, TokenStream};

/// Compiles operation trees for one dialect.
#[derive(Debug, Clone, Copy)]
pub struct ExprCompiler {
    dialect: Dialect,
}

impl ExprCompiler {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Compile `op` to a token stream.
    pub fn compile(&self, op: &Operation) -> Result<TokenStream> {
        match op.kind() {
            OpKind::Literal(lit) => self.literal(lit),
            OpKind::ColumnRef { name, .. } => Ok(Token::Ident(name.clone()).into()),
            OpKind::Alias(_) => self.compile(self.arg(op, 0)?),
            OpKind::Cast(to) => {
                let inner = self.compile(self.arg(op, 0)?)?;
                Ok(self.cast(inner, to))
            }

            OpKind::Abs | OpKind::Sign => {
                let inner = self.compile(self.arg(op, 0)?)?;
                Ok(TokenStream::call(op.kind().name(), &[inner]))
            }
            OpKind::Ceil | OpKind::Floor => {
                let arg = self.arg(op, 0)?;
                let call = TokenStream::call(op.kind().name(), &[self.compile(arg)?]);
                Ok(self.cast_if_category_changed(call, arg, op))
            }
            OpKind::Round => self.round(op),

            OpKind::Coalesce | OpKind::Greatest | OpKind::Least => {
                let args = op
                    .args()
                    .iter()
                    .flatten()
                    .map(|a| self.compile(a))
                    .collect::<Result<Vec<_>>>()?;
                Ok(TokenStream::call(op.kind().name(), &args))
            }

            OpKind::GroupConcat => self.group_concat(op),

            OpKind::Add | OpKind::Subtract | OpKind::Multiply | OpKind::Divide => {
                self.binary(op)
            }
        }
    }

    fn arg<'a>(&self, op: &'a Operation, index: usize) -> Result<&'a Operation> {
        op.arg(index).ok_or_else(|| QuarryError::Unrenderable {
            reason: format!("{} is missing argument {}", op.kind().name(), index),
        })
    }

    fn literal(&self, lit: &Literal) -> Result<TokenStream> {
        let token = match lit {
            Literal::Null => Token::LitNull,
            Literal::Bool(b) => Token::LitBool(*b),
            Literal::Int(n) => Token::LitInt(*n),
            Literal::Float(f) if !f.is_finite() => {
                return Err(QuarryError::Unrenderable {
                    reason: format!("float literal {} has no SQL representation", f),
                });
            }
            Literal::Float(f) => Token::LitFloat(*f),
            Literal::String(s) => Token::LitString(s.clone()),
        };
        Ok(token.into())
    }

    fn cast(&self, inner: TokenStream, to: &DataType) -> TokenStream {
        cast_named(inner, self.dialect.emit_data_type(to))
    }

    /// Engines keep the input type for CEIL/FLOOR/ROUND; cast when the
    /// expression's category says otherwise.
    fn cast_if_category_changed(
        &self,
        ts: TokenStream,
        input: &Operation,
        op: &Operation,
    ) -> TokenStream {
        if input.dtype().category() != op.dtype().category() {
            self.cast(ts, &op.dtype())
        } else {
            ts
        }
    }

    fn round(&self, op: &Operation) -> Result<TokenStream> {
        let arg = self.arg(op, 0)?;
        let digits = self.arg(op, 1)?;

        let zero_digits = digits.as_literal() == Some(&Literal::Int(0));
        if zero_digits && !self.dialect.round_requires_digits() {
            let call = TokenStream::call("round", &[self.compile(arg)?]);
            return Ok(self.cast_if_category_changed(call, arg, op));
        }

        let digits = self.compile(digits)?;
        if self.dialect.round_digits_requires_numeric() && !arg.dtype().is_decimal() {
            let numeric = cast_named(self.compile(arg)?, "NUMERIC".into());
            let call = TokenStream::call("round", &[numeric, digits]);
            return Ok(self.cast(call, &op.dtype()));
        }

        let call = TokenStream::call("round", &[self.compile(arg)?, digits]);
        Ok(self.cast_if_category_changed(call, arg, op))
    }

    fn group_concat(&self, op: &Operation) -> Result<TokenStream> {
        let mut arg = self.compile(self.arg(op, 0)?)?;
        let sep = self.compile(self.arg(op, 1)?)?;
        let filter = op.arg(2).map(|f| self.compile(f)).transpose()?;

        let trailing = match filter {
            Some(cond) if self.dialect.supports_aggregate_filter() => {
                Some(self.dialect.emit_predicate(&cond))
            }
            Some(cond) => {
                arg = case_when(&self.dialect.emit_predicate(&cond), &arg);
                None
            }
            None => None,
        };

        let mut ts = self.dialect.emit_group_concat(&arg, &sep);
        if let Some(cond) = trailing {
            ts.space()
                .push(Token::Filter)
                .space()
                .lparen()
                .push(Token::Where)
                .space()
                .append(&cond)
                .rparen();
        }
        Ok(ts)
    }

    fn binary(&self, op: &Operation) -> Result<TokenStream> {
        let left = self.arg(op, 0)?;
        let right = self.arg(op, 1)?;

        let mut lhs = self.operand(left)?;
        let rhs = self.operand(right)?;

        // Integer division truncates on some engines
        if matches!(op.kind(), OpKind::Divide)
            && op.dtype().category() == Category::Floating
            && !left.dtype().is_float()
            && !right.dtype().is_float()
            && self.dialect.integer_division_truncates()
        {
            lhs = self.cast(lhs, &DataType::Float64);
        }

        let operator = match op.kind() {
            OpKind::Add => Token::Plus,
            OpKind::Subtract => Token::Minus,
            OpKind::Multiply => Token::Mul,
            _ => Token::Div,
        };

        let mut ts = lhs;
        ts.space().push(operator).space().append(&rhs);
        Ok(ts)
    }

    /// Nested arithmetic is parenthesized.
    fn operand(&self, op: &Operation) -> Result<TokenStream> {
        let inner = self.compile(op)?;
        if op.kind().is_binary() {
            let mut ts = TokenStream::new();
            ts.lparen().append(&inner).rparen();
            Ok(ts)
        } else {
            Ok(inner)
        }
    }
}

fn cast_named(inner: TokenStream, type_name: String) -> TokenStream {
    let mut ts = TokenStream::new();
    ts.push(Token::Cast)
        .lparen()
        .append(&inner)
        .space()
        .push(Token::As)
        .space()
        .push(Token::TypeName(type_name))
        .rparen();
    ts
}

fn case_when(cond: &TokenStream, value: &TokenStream) -> TokenStream {
    let mut ts = TokenStream::new();
    ts.push(Token::Case)
        .space()
        .push(Token::When)
        .space()
        .append(cond)
        .space()
        .push(Token::Then)
        .space()
        .append(value)
        .space()
        .push(Token::Else)
        .space()
        .push(Token::LitNull)
        .space()
        .push(Token::End);
    ts
}

/// Compile `op` for `dialect` and serialize it.
pub fn compile_expr(op: &Operation, dialect: Dialect) -> Result<String> {
    Ok(ExprCompiler::new(dialect).compile(op)?.serialize(dialect))
}
