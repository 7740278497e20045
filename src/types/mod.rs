//! Scalar data types and type-spec parsing.
//!
//! [`DataType`] is the set of value types an expression can have. Numeric
//! types take part in the promotion lattice (see [`lattice`]); `Boolean`,
//! `String` and `Null` only unify with themselves (and `Null` with anything).
//!
//! Type specs are the strings callers use to describe table columns:
//!
//! - `bool`, `boolean`
//! - `int8`, `tinyint`
//! - `int16`, `smallint`, `int2`
//! - `int32`, `int`, `integer`, `int4`
//! - `int64`, `bigint`
//! - `float32`, `float4`, `real`
//! - `float64`, `float8`, `double`, `double precision`, `float`
//! - `decimal(p, s)`, `numeric(p, s)`, `decimal(p)`, bare `decimal`
//! - `string`, `text`, `varchar`
//! - `null`

pub mod lattice;

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::TypeSettings;
use crate::error::{QuarryError, Result};

pub use lattice::{highest_precedence, unify};

/// Largest precision a decimal type may carry.
pub const MAX_DECIMAL_PRECISION: u8 = 38;

static DECIMAL_SPEC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:decimal|numeric)\s*\(\s*(\d+)\s*(?:,\s*(\d+)\s*)?\)$").unwrap()
});

/// Value type of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Type of the untyped `NULL` literal.
    Null,

    Boolean,

    Int8,
    Int16,
    Int32,
    Int64,

    Float32,
    Float64,

    /// Fixed-point decimal.
    /// - `precision`: total digits
    /// - `scale`: digits after the decimal point
    Decimal { precision: u8, scale: u8 },

    String,
}

/// The semantic value family of a type, independent of width or precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Integer,
    Floating,
    Decimal,
    Boolean,
    String,
    Null,
}

impl DataType {
    /// Parse a type spec using the default decimal precision and scale.
    ///
    /// ```ignore
    /// use quarry::types::DataType;
    ///
    /// assert_eq!(DataType::parse("int32")?, DataType::Int32);
    /// assert_eq!(DataType::parse("decimal(12, 2)")?, DataType::decimal(12, 2));
    /// ```
    pub fn parse(spec: &str) -> Result<Self> {
        Self::parse_with(spec, &TypeSettings::default())
    }

    /// Parse a type spec, taking bare `decimal` defaults from `settings`.
    pub fn parse_with(spec: &str, settings: &TypeSettings) -> Result<Self> {
        let s = spec.trim().to_lowercase();

        if let Some(caps) = DECIMAL_SPEC.captures(&s) {
            let precision = parse_param(spec, &caps[1])?;
            let scale = match caps.get(2) {
                Some(m) => parse_param(spec, m.as_str())?,
                None => 0,
            };
            return checked_decimal(spec, precision, scale);
        }

        match s.as_str() {
            "bool" | "boolean" => Ok(DataType::Boolean),

            "int8" | "tinyint" => Ok(DataType::Int8),
            "int16" | "smallint" | "int2" => Ok(DataType::Int16),
            "int32" | "int" | "integer" | "int4" => Ok(DataType::Int32),
            "int64" | "bigint" => Ok(DataType::Int64),

            "float32" | "float4" | "real" => Ok(DataType::Float32),
            "float64" | "float8" | "double" | "double precision" | "float" => {
                Ok(DataType::Float64)
            }

            "decimal" | "numeric" => {
                checked_decimal(spec, settings.decimal_precision, settings.decimal_scale)
            }

            "string" | "text" | "varchar" => Ok(DataType::String),
            "null" => Ok(DataType::Null),

            "" => Err(parse_error(spec, "empty type specification")),
            _ if s.starts_with("decimal") || s.starts_with("numeric") => {
                Err(parse_error(spec, "expected decimal(precision, scale)"))
            }
            _ => Err(parse_error(spec, "unknown type name")),
        }
    }

    /// Shorthand for a decimal type.
    ///
    /// Precision and scale are not checked here; see [`DataType::checked`].
    pub fn decimal(precision: u8, scale: u8) -> Self {
        DataType::Decimal { precision, scale }
    }

    /// Reject decimals with a precision outside 1..=38 or a scale larger
    /// than the precision. Other types pass through.
    pub fn checked(self) -> Result<Self> {
        match self {
            DataType::Decimal { precision, scale } => {
                checked_decimal(&self.to_string(), precision, scale)
            }
            other => Ok(other),
        }
    }

    pub fn category(&self) -> Category {
        match self {
            DataType::Null => Category::Null,
            DataType::Boolean => Category::Boolean,
            DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 => {
                Category::Integer
            }
            DataType::Float32 | DataType::Float64 => Category::Floating,
            DataType::Decimal { .. } => Category::Decimal,
            DataType::String => Category::String,
        }
    }

    /// Returns true for integer, floating and decimal types.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self.category(),
            Category::Integer | Category::Floating | Category::Decimal
        )
    }

    pub fn is_integer(&self) -> bool {
        self.category() == Category::Integer
    }

    pub fn is_float(&self) -> bool {
        self.category() == Category::Floating
    }

    pub fn is_decimal(&self) -> bool {
        self.category() == Category::Decimal
    }

    /// Bit width of integer and floating types.
    pub fn width(&self) -> Option<u8> {
        match self {
            DataType::Int8 => Some(8),
            DataType::Int16 => Some(16),
            DataType::Int32 | DataType::Float32 => Some(32),
            DataType::Int64 | DataType::Float64 => Some(64),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Null => write!(f, "null"),
            DataType::Boolean => write!(f, "boolean"),
            DataType::Int8 => write!(f, "int8"),
            DataType::Int16 => write!(f, "int16"),
            DataType::Int32 => write!(f, "int32"),
            DataType::Int64 => write!(f, "int64"),
            DataType::Float32 => write!(f, "float32"),
            DataType::Float64 => write!(f, "float64"),
            DataType::Decimal { precision, scale } => {
                write!(f, "decimal({}, {})", precision, scale)
            }
            DataType::String => write!(f, "string"),
        }
    }
}

impl std::str::FromStr for DataType {
    type Err = QuarryError;

    fn from_str(s: &str) -> Result<Self> {
        DataType::parse(s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Integer => "Integer",
            Category::Floating => "Floating",
            Category::Decimal => "Decimal",
            Category::Boolean => "Boolean",
            Category::String => "String",
            Category::Null => "Null",
        };
        f.write_str(name)
    }
}

fn parse_error(spec: &str, reason: &str) -> QuarryError {
    QuarryError::Parse {
        spec: spec.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_param(spec: &str, digits: &str) -> Result<u8> {
    digits
        .parse()
        .map_err(|_| parse_error(spec, "decimal parameter out of range"))
}

fn checked_decimal(spec: &str, precision: u8, scale: u8) -> Result<DataType> {
    if precision == 0 || precision > MAX_DECIMAL_PRECISION {
        return Err(parse_error(spec, "decimal precision must be between 1 and 38"));
    }
    if scale > precision {
        return Err(parse_error(spec, "decimal scale cannot exceed precision"));
    }
    Ok(DataType::decimal(precision, scale))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_types() {
        assert_eq!(DataType::parse("bool").unwrap(), DataType::Boolean);
        assert_eq!(DataType::parse("BOOLEAN").unwrap(), DataType::Boolean);

        assert_eq!(DataType::parse("int8").unwrap(), DataType::Int8);
        assert_eq!(DataType::parse("smallint").unwrap(), DataType::Int16);
        assert_eq!(DataType::parse("int32").unwrap(), DataType::Int32);
        assert_eq!(DataType::parse("integer").unwrap(), DataType::Int32);
        assert_eq!(DataType::parse("int64").unwrap(), DataType::Int64);
        assert_eq!(DataType::parse("bigint").unwrap(), DataType::Int64);

        assert_eq!(DataType::parse("float32").unwrap(), DataType::Float32);
        assert_eq!(DataType::parse("double").unwrap(), DataType::Float64);
        assert_eq!(
            DataType::parse("double precision").unwrap(),
            DataType::Float64
        );

        assert_eq!(DataType::parse("string").unwrap(), DataType::String);
        assert_eq!(DataType::parse(" text ").unwrap(), DataType::String);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(
            DataType::parse("decimal(12, 2)").unwrap(),
            DataType::decimal(12, 2)
        );
        assert_eq!(
            DataType::parse("decimal(10,4)").unwrap(),
            DataType::decimal(10, 4)
        );
        assert_eq!(
            DataType::parse("NUMERIC(38, 0)").unwrap(),
            DataType::decimal(38, 0)
        );
        assert_eq!(DataType::parse("decimal(9)").unwrap(), DataType::decimal(9, 0));
        assert_eq!(DataType::parse("decimal").unwrap(), DataType::decimal(18, 2));
    }

    #[test]
    fn test_checked_decimal_bounds() {
        assert_eq!(DataType::decimal(12, 2).checked().unwrap(), DataType::decimal(12, 2));
        assert_eq!(DataType::Int32.checked().unwrap(), DataType::Int32);
        assert!(DataType::decimal(2, 5).checked().is_err());
        assert!(DataType::decimal(0, 0).checked().is_err());
        assert!(DataType::decimal(39, 2).checked().is_err());
    }

    #[test]
    fn test_parse_decimal_uses_settings() {
        let settings = TypeSettings {
            decimal_precision: 20,
            decimal_scale: 6,
        };
        assert_eq!(
            DataType::parse_with("numeric", &settings).unwrap(),
            DataType::decimal(20, 6)
        );
    }

    #[test]
    fn test_parse_invalid() {
        for spec in [
            "",
            "unknown_type",
            "decimal(abc)",
            "decimal()",
            "decimal(12, 2",
            "decimal(39, 2)",
            "decimal(4, 6)",
            "decimal(999, 1)",
        ] {
            let err = DataType::parse(spec).unwrap_err();
            assert!(
                matches!(err, QuarryError::Parse { .. }),
                "expected parse error for {:?}, got {:?}",
                spec,
                err
            );
        }
    }

    #[test]
    fn test_categories() {
        assert_eq!(DataType::Int16.category(), Category::Integer);
        assert_eq!(DataType::Float32.category(), Category::Floating);
        assert_eq!(DataType::decimal(12, 2).category(), Category::Decimal);
        assert_eq!(DataType::Boolean.category(), Category::Boolean);
        assert_eq!(DataType::String.category(), Category::String);
        assert_eq!(DataType::Null.category(), Category::Null);

        assert!(DataType::decimal(5, 1).is_numeric());
        assert!(!DataType::Boolean.is_numeric());
        assert!(!DataType::String.is_numeric());
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for dt in [
            DataType::Boolean,
            DataType::Int8,
            DataType::Int64,
            DataType::Float32,
            DataType::decimal(12, 2),
            DataType::String,
        ] {
            assert_eq!(DataType::parse(&dt.to_string()).unwrap(), dt);
        }
    }
}
