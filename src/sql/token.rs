//! SQL Tokens - the atomic units of SQL output.
//!
//! Tokens are dialect-agnostic representations that serialize
//! to dialect-specific strings.

use super::dialect::{Dialect, SqlDialect};

/// SQL Token - every element the compiler emits.
///
/// Adding a new variant here will cause compile errors everywhere
/// it needs to be handled (exhaustive matching).
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // === Keywords ===
    Select,
    From,
    Where,
    As,
    Case,
    When,
    Then,
    Else,
    End,
    Cast,
    Filter,
    Separator,

    // === Punctuation ===
    Comma,
    Star,
    LParen,
    RParen,

    // === Operators ===
    Plus,
    Minus,
    Mul,
    Div,
    Eq,

    // === Whitespace / Formatting ===
    Space,
    Newline,
    Indent(usize),

    // === Dynamic Content ===
    /// Simple identifier (table, column, alias)
    Ident(String),
    /// Integer literal
    LitInt(i64),
    /// Float literal. Must be finite; the compiler rejects NaN and infinities.
    LitFloat(f64),
    /// String literal
    LitString(String),
    /// Boolean literal
    LitBool(bool),
    /// NULL literal
    LitNull,

    /// Function name, remapped per dialect on output.
    FunctionName(String),

    /// Dialect-rendered type name, e.g. `DOUBLE PRECISION`.
    TypeName(String),
}

impl Token {
    /// Serialize this token to a string for the given dialect.
    ///
    /// # Panics
    ///
    /// Panics on a non-finite [`Token::LitFloat`]. [`ExprCompiler`](super::ExprCompiler)
    /// rejects those with `Unrenderable` before any token is built.
    pub fn serialize(&self, dialect: Dialect) -> String {
        match self {
            // Keywords
            Token::Select => "SELECT".into(),
            Token::From => "FROM".into(),
            Token::Where => "WHERE".into(),
            Token::As => "AS".into(),
            Token::Case => "CASE".into(),
            Token::When => "WHEN".into(),
            Token::Then => "THEN".into(),
            Token::Else => "ELSE".into(),
            Token::End => "END".into(),
            Token::Cast => "CAST".into(),
            Token::Filter => "FILTER".into(),
            Token::Separator => "SEPARATOR".into(),

            // Punctuation
            Token::Comma => ",".into(),
            Token::Star => "*".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),

            // Operators
            Token::Plus => "+".into(),
            Token::Minus => "-".into(),
            Token::Mul => "*".into(),
            Token::Div => "/".into(),
            Token::Eq => "=".into(),

            // Whitespace
            Token::Space => " ".into(),
            Token::Newline => "\n".into(),
            Token::Indent(n) => "  ".repeat(*n),

            // Dynamic - dialect-specific formatting
            Token::Ident(name) => dialect.quote_identifier(name),
            Token::LitInt(n) => n.to_string(),
            Token::LitFloat(f) => {
                if !f.is_finite() {
                    panic!("Cannot serialize non-finite float {} to SQL", f)
                }
                // Use ryu for fast, accurate float formatting
                let mut buffer = ryu::Buffer::new();
                buffer.format_finite(*f).to_string()
            }
            Token::LitString(s) => dialect.quote_string(s),
            Token::LitBool(b) => dialect.format_bool(*b).into(),
            Token::LitNull => dialect.format_null().into(),

            // Function names with dialect-specific remapping
            Token::FunctionName(name) => match dialect.remap_function(name) {
                Some(remapped) => remapped.to_uppercase(),
                None => name.to_uppercase(),
            },

            Token::TypeName(name) => name.clone(),
        }
    }
}

/// A stream of tokens that can be serialized to SQL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Create an empty token stream.
    pub fn new() -> Self {
        Self { tokens: vec![] }
    }

    /// Push a single token.
    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    /// Extend with multiple tokens.
    pub fn extend(&mut self, tokens: impl IntoIterator<Item = Token>) -> &mut Self {
        self.tokens.extend(tokens);
        self
    }

    /// Append another token stream.
    pub fn append(&mut self, other: &TokenStream) -> &mut Self {
        self.tokens.extend(other.tokens.iter().cloned());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Serialize all tokens to a SQL string.
    ///
    /// # Panics
    ///
    /// Panics if the stream holds a non-finite [`Token::LitFloat`].
    pub fn serialize(&self, dialect: Dialect) -> String {
        self.tokens.iter().map(|t| t.serialize(dialect)).collect()
    }

    // Convenience methods for common tokens
    pub fn space(&mut self) -> &mut Self {
        self.push(Token::Space)
    }
    pub fn newline(&mut self) -> &mut Self {
        self.push(Token::Newline)
    }
    pub fn indent(&mut self, n: usize) -> &mut Self {
        self.push(Token::Indent(n))
    }
    pub fn comma(&mut self) -> &mut Self {
        self.push(Token::Comma)
    }
    pub fn lparen(&mut self) -> &mut Self {
        self.push(Token::LParen)
    }
    pub fn rparen(&mut self) -> &mut Self {
        self.push(Token::RParen)
    }

    /// `name(arg, arg, ...)`
    pub fn call(name: &str, args: &[TokenStream]) -> TokenStream {
        let mut ts = TokenStream::new();
        ts.push(Token::FunctionName(name.into())).lparen();
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                ts.comma().space();
            }
            ts.append(arg);
        }
        ts.rparen();
        ts
    }
}

impl From<Token> for TokenStream {
    fn from(token: Token) -> Self {
        Self {
            tokens: vec![token],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_serialize() {
        assert_eq!(Token::Select.serialize(Dialect::DuckDb), "SELECT");
        assert_eq!(Token::Separator.serialize(Dialect::MySql), "SEPARATOR");
    }

    #[test]
    fn test_ident_serialize() {
        let tok = Token::Ident("users".into());
        assert_eq!(tok.serialize(Dialect::DuckDb), "\"users\"");
        assert_eq!(tok.serialize(Dialect::TSql), "[users]");
        assert_eq!(tok.serialize(Dialect::MySql), "`users`");
    }

    #[test]
    fn test_token_stream() {
        let mut ts = TokenStream::new();
        ts.push(Token::Select)
            .space()
            .push(Token::Ident("name".into()))
            .space()
            .push(Token::From)
            .space()
            .push(Token::Ident("users".into()));

        assert_eq!(
            ts.serialize(Dialect::Postgres),
            "SELECT \"name\" FROM \"users\""
        );
    }

    #[test]
    fn test_function_call() {
        let args = [
            TokenStream::from(Token::Ident("a".into())),
            TokenStream::from(Token::LitInt(0)),
        ];
        let ts = TokenStream::call("coalesce", &args);
        assert_eq!(ts.serialize(Dialect::Postgres), "COALESCE(\"a\", 0)");
    }

    #[test]
    fn test_function_remapped_per_dialect() {
        let ts = TokenStream::call("ceil", &[TokenStream::from(Token::LitFloat(1.5))]);
        assert_eq!(ts.serialize(Dialect::DuckDb), "CEIL(1.5)");
        assert_eq!(ts.serialize(Dialect::TSql), "CEILING(1.5)");
    }

    #[test]
    fn test_float_serialize() {
        assert_eq!(Token::LitFloat(3.14).serialize(Dialect::DuckDb), "3.14");
        assert_eq!(Token::LitFloat(1.0).serialize(Dialect::DuckDb), "1.0");
        assert_eq!(Token::LitFloat(-42.5).serialize(Dialect::DuckDb), "-42.5");

        let large = Token::LitFloat(1234567890.123456).serialize(Dialect::DuckDb);
        assert!(large.starts_with("1234567890"), "Large float: {}", large);
    }

    #[test]
    fn test_bool_literal_per_dialect() {
        assert_eq!(Token::LitBool(true).serialize(Dialect::Postgres), "true");
        assert_eq!(Token::LitBool(true).serialize(Dialect::TSql), "1");
    }

    #[test]
    #[should_panic(expected = "Cannot serialize non-finite float")]
    fn test_float_nan_panics() {
        Token::LitFloat(f64::NAN).serialize(Dialect::DuckDb);
    }
}
