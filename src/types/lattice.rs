//! Numeric promotion lattice.
//!
//! `unify` computes the smallest type both operands widen to. It is
//! commutative; `Null` is the bottom element and unifies with everything.
//!
//! | left \ right | IntN | FloatN | Decimal |
//! |---|---|---|---|
//! | IntM | Int(max(M, N)) | Float32 if M <= 16 and N = 32, else Float64 | Decimal |
//! | FloatM | (symmetric) | Float(max(M, N)) | Float64 |
//! | Decimal | Decimal | Float64 | Decimal (widened) |

use super::{DataType, MAX_DECIMAL_PRECISION};
use crate::error::{QuarryError, Result};

/// Unify two types, returning `None` when they share no supertype.
pub fn unify(left: DataType, right: DataType) -> Option<DataType> {
    use DataType::*;

    match (left, right) {
        (Null, other) | (other, Null) => Some(other),
        (a, b) if a == b => Some(a),

        (a, b) if a.is_integer() && b.is_integer() => Some(wider(a, b)),
        (a, b) if a.is_float() && b.is_float() => Some(Float64),

        (int, Float32) | (Float32, int) if int.is_integer() => {
            if int.width().unwrap_or(64) <= 16 {
                Some(Float32)
            } else {
                Some(Float64)
            }
        }
        (int, Float64) | (Float64, int) if int.is_integer() => Some(Float64),

        (
            Decimal {
                precision: p1,
                scale: s1,
            },
            Decimal {
                precision: p2,
                scale: s2,
            },
        ) => Some(widen_decimal((p1, s1), (p2, s2))),
        (Decimal { precision, scale }, int) | (int, Decimal { precision, scale })
            if int.is_integer() =>
        {
            Some(widen_decimal((precision, scale), (integer_digits(int), 0)))
        }
        (Decimal { .. }, f) | (f, Decimal { .. }) if f.is_float() => Some(Float64),

        _ => None,
    }
}

/// Fold `types` into the single type every argument widens to.
///
/// An empty list, or a list of only `Null`, yields `Null`.
pub fn highest_precedence(operation: &str, types: &[DataType]) -> Result<DataType> {
    types.iter().try_fold(DataType::Null, |acc, &t| {
        unify(acc, t).ok_or_else(|| QuarryError::type_mismatch(operation, types.to_vec()))
    })
}

/// The narrowest integer type that holds `value`.
pub fn integer_literal_type(value: i64) -> DataType {
    if i8::try_from(value).is_ok() {
        DataType::Int8
    } else if i16::try_from(value).is_ok() {
        DataType::Int16
    } else if i32::try_from(value).is_ok() {
        DataType::Int32
    } else {
        DataType::Int64
    }
}

fn wider(a: DataType, b: DataType) -> DataType {
    if a.width() >= b.width() {
        a
    } else {
        b
    }
}

/// Decimal digits needed to hold any value of an integer type.
fn integer_digits(int: DataType) -> u8 {
    match int {
        DataType::Int8 => 3,
        DataType::Int16 => 5,
        DataType::Int32 => 10,
        _ => 19,
    }
}

fn widen_decimal((p1, s1): (u8, u8), (p2, s2): (u8, u8)) -> DataType {
    let scale = s1.max(s2);
    let integral = p1.saturating_sub(s1).max(p2.saturating_sub(s2));
    let precision = (integral as u16 + scale as u16).min(MAX_DECIMAL_PRECISION as u16) as u8;
    DataType::decimal(precision, scale.min(precision))
}

#[cfg(test)]
mod tests {
    use super::*;
    use DataType::*;

    const NUMERIC: [DataType; 8] = [
        Int8,
        Int16,
        Int32,
        Int64,
        Float32,
        Float64,
        Decimal {
            precision: 12,
            scale: 2,
        },
        Decimal {
            precision: 10,
            scale: 4,
        },
    ];

    #[test]
    fn test_unify_is_commutative() {
        for a in NUMERIC {
            for b in NUMERIC {
                assert_eq!(unify(a, b), unify(b, a), "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn test_integers_promote_to_widest() {
        assert_eq!(unify(Int32, Int64), Some(Int64));
        assert_eq!(unify(Int8, Int16), Some(Int16));
        assert_eq!(unify(Int32, Int32), Some(Int32));
    }

    #[test]
    fn test_integer_and_float_is_floating() {
        assert_eq!(unify(Int8, Float32), Some(Float32));
        assert_eq!(unify(Int32, Float32), Some(Float64));
        assert_eq!(unify(Int64, Float64), Some(Float64));
        assert_eq!(unify(Float32, Float64), Some(Float64));
    }

    #[test]
    fn test_decimal_widening() {
        assert_eq!(
            unify(DataType::decimal(12, 2), DataType::decimal(10, 4)),
            Some(DataType::decimal(14, 4))
        );
        assert_eq!(
            unify(DataType::decimal(12, 2), Int32),
            Some(DataType::decimal(12, 2))
        );
        assert_eq!(
            unify(DataType::decimal(5, 2), Int64),
            Some(DataType::decimal(21, 2))
        );
        assert_eq!(
            unify(DataType::decimal(38, 10), DataType::decimal(38, 0)),
            Some(DataType::decimal(38, 10))
        );
        assert_eq!(unify(DataType::decimal(12, 2), Float32), Some(Float64));
    }

    #[test]
    fn test_null_is_bottom() {
        assert_eq!(unify(Null, Int32), Some(Int32));
        assert_eq!(unify(String, Null), Some(String));
        assert_eq!(unify(Null, Null), Some(Null));
    }

    #[test]
    fn test_non_numeric_only_unify_with_themselves() {
        assert_eq!(unify(String, String), Some(String));
        assert_eq!(unify(Boolean, Boolean), Some(Boolean));
        assert_eq!(unify(String, Int32), None);
        assert_eq!(unify(Boolean, Int8), None);
        assert_eq!(unify(Boolean, String), None);
    }

    #[test]
    fn test_highest_precedence() {
        assert_eq!(highest_precedence("Coalesce", &[Null, Int8, Int32]).unwrap(), Int32);
        assert_eq!(highest_precedence("Coalesce", &[]).unwrap(), Null);

        let err = highest_precedence("Greatest", &[String, Int32]).unwrap_err();
        match err {
            QuarryError::TypeMismatch { operation, types } => {
                assert_eq!(operation, "Greatest");
                assert_eq!(types, vec![String, Int32]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_integer_literal_type() {
        assert_eq!(integer_literal_type(5), Int8);
        assert_eq!(integer_literal_type(-128), Int8);
        assert_eq!(integer_literal_type(300), Int16);
        assert_eq!(integer_literal_type(70_000), Int32);
        assert_eq!(integer_literal_type(i64::MAX), Int64);
    }
}
