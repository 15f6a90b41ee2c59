use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{Float, Signed, Zero};
use strata_error::{StrataError, strata_err};

/// Largest adjusted exponent of a finite decimal. Larger magnitudes overflow to an infinity.
const MAX_EXPONENT: i64 = 6144;
/// Smallest adjusted exponent of a finite decimal. Smaller magnitudes underflow to zero.
const MIN_EXPONENT: i64 = -6176;

/// A high-precision decimal number.
///
/// Finite values are exact: an arbitrary-precision coefficient scaled by a power of ten, kept
/// normalized so that numerically equal decimals have equal representations. Like an IEEE
/// decimal128 the type also has NaN and signed infinities, and it shares decimal128's exponent
/// range: magnitudes of `1e6145` and beyond overflow to an infinity, magnitudes below `1e-6176`
/// underflow to zero.
///
/// Decimals are totally ordered, with NaN below every other value and equal to itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal(Repr);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Repr {
    NaN,
    NegInfinity,
    /// `coefficient * 10^exponent`. A non-zero coefficient has no trailing decimal zeros; zero is
    /// always stored with exponent 0.
    Finite {
        coefficient: BigInt,
        exponent: i64,
    },
    Infinity,
}

impl Repr {
    fn rank(&self) -> u8 {
        match self {
            Repr::NaN => 0,
            Repr::NegInfinity => 1,
            Repr::Finite { .. } => 2,
            Repr::Infinity => 3,
        }
    }
}

impl Decimal {
    pub const NAN: Decimal = Decimal(Repr::NaN);
    pub const INFINITY: Decimal = Decimal(Repr::Infinity);
    pub const NEG_INFINITY: Decimal = Decimal(Repr::NegInfinity);

    fn zero() -> Self {
        Self(Repr::Finite {
            coefficient: BigInt::zero(),
            exponent: 0,
        })
    }

    fn finite(mut coefficient: BigInt, mut exponent: i64) -> Self {
        if coefficient.is_zero() {
            return Self::zero();
        }
        while (&coefficient % 10u32).is_zero() {
            coefficient /= 10u32;
            exponent = exponent.saturating_add(1);
        }

        let digits = i64::try_from(coefficient.magnitude().to_string().len()).unwrap_or(i64::MAX);
        let adjusted = exponent.saturating_add(digits - 1);
        if adjusted > MAX_EXPONENT {
            return if coefficient.is_negative() {
                Self::NEG_INFINITY
            } else {
                Self::INFINITY
            };
        }
        if adjusted < MIN_EXPONENT {
            return Self::zero();
        }
        Self(Repr::Finite {
            coefficient,
            exponent,
        })
    }

    fn non_finite(value: f64) -> Self {
        if value.is_nan() {
            Self::NAN
        } else if value.is_sign_positive() {
            Self::INFINITY
        } else {
            Self::NEG_INFINITY
        }
    }

    /// The decimal with the shortest digits that round-trip to `value`, so `0.1f64` becomes
    /// exactly `0.1`. NaN and infinities map to their decimal counterparts.
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() {
            return Self::non_finite(value);
        }
        format!("{value:e}")
            .parse()
            .unwrap_or_else(|_| Self::from_f64_exact(value))
    }

    /// The exact binary value of `value`. Every finite double is a terminating decimal.
    pub fn from_f64_exact(value: f64) -> Self {
        if !value.is_finite() {
            return Self::non_finite(value);
        }
        let (mantissa, exponent, sign) = value.integer_decode();
        let mut coefficient = BigInt::from(mantissa);
        let shift = exponent.unsigned_abs();
        let exponent = if exponent >= 0 {
            coefficient <<= shift;
            0
        } else {
            // m * 2^-k == m * 5^k * 10^-k
            coefficient *= BigInt::from(5u32).pow(u32::from(shift));
            -i64::from(shift)
        };
        if sign < 0 {
            coefficient = -coefficient;
        }
        Self::finite(coefficient, exponent)
    }
}

fn scale(coefficient: &BigInt, by: i64) -> BigInt {
    coefficient * BigInt::from(10u32).pow(u32::try_from(by).unwrap_or(u32::MAX))
}

fn cmp_finite(lhs: &BigInt, lhs_exp: i64, rhs: &BigInt, rhs_exp: i64) -> Ordering {
    match lhs.sign().cmp(&rhs.sign()) {
        Ordering::Equal => {}
        unequal => return unequal,
    }
    let exponent = lhs_exp.min(rhs_exp);
    scale(lhs, lhs_exp - exponent).cmp(&scale(rhs, rhs_exp - exponent))
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.0, &other.0) {
            (
                Repr::Finite {
                    coefficient: lhs,
                    exponent: lhs_exp,
                },
                Repr::Finite {
                    coefficient: rhs,
                    exponent: rhs_exp,
                },
            ) => cmp_finite(lhs, *lhs_exp, rhs, *rhs_exp),
            (lhs, rhs) => lhs.rank().cmp(&rhs.rank()),
        }
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add<&Decimal> for &Decimal {
    type Output = Decimal;

    fn add(self, rhs: &Decimal) -> Decimal {
        match (&self.0, &rhs.0) {
            (Repr::NaN, _)
            | (_, Repr::NaN)
            | (Repr::Infinity, Repr::NegInfinity)
            | (Repr::NegInfinity, Repr::Infinity) => Decimal::NAN,
            (Repr::Infinity, _) | (_, Repr::Infinity) => Decimal::INFINITY,
            (Repr::NegInfinity, _) | (_, Repr::NegInfinity) => Decimal::NEG_INFINITY,
            (
                Repr::Finite {
                    coefficient: lhs,
                    exponent: lhs_exp,
                },
                Repr::Finite {
                    coefficient: rhs,
                    exponent: rhs_exp,
                },
            ) => {
                let exponent = (*lhs_exp).min(*rhs_exp);
                Decimal::finite(
                    scale(lhs, lhs_exp - exponent) + scale(rhs, rhs_exp - exponent),
                    exponent,
                )
            }
        }
    }
}

impl AddAssign<&Decimal> for Decimal {
    fn add_assign(&mut self, rhs: &Decimal) {
        *self = &*self + rhs;
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Self::finite(BigInt::from(value), 0)
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self::finite(BigInt::from(value), 0)
    }
}

impl FromStr for Decimal {
    type Err = StrataError;

    /// Parses plain (`-0.125`) and scientific (`1.5e-7`) literals, plus `NaN`, `Infinity` and
    /// `inf` in any case.
    fn from_str(literal: &str) -> Result<Self, Self::Err> {
        let invalid = || strata_err!("invalid decimal literal '{}'", literal);

        let (negative, body) = match literal.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, literal.strip_prefix('+').unwrap_or(literal)),
        };
        if body.eq_ignore_ascii_case("nan") {
            return Ok(Self::NAN);
        }
        if body.eq_ignore_ascii_case("inf") || body.eq_ignore_ascii_case("infinity") {
            return Ok(if negative {
                Self::NEG_INFINITY
            } else {
                Self::INFINITY
            });
        }

        let (mantissa, exponent) = match body.find(['e', 'E']) {
            Some(idx) => (
                &body[..idx],
                body[idx + 1..].parse::<i32>().map_err(|_| invalid())?,
            ),
            None => (body, 0),
        };
        let (integral, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if integral.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !integral
            .bytes()
            .chain(fraction.bytes())
            .all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let digits = format!("{integral}{fraction}");
        let coefficient = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)?;
        let fraction_len = i64::try_from(fraction.len()).map_err(|_| invalid())?;
        let coefficient = if negative { -coefficient } else { coefficient };
        Ok(Self::finite(coefficient, i64::from(exponent) - fraction_len))
    }
}

impl Display for Decimal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (coefficient, exponent) = match &self.0 {
            Repr::NaN => return f.write_str("NaN"),
            Repr::NegInfinity => return f.write_str("-Infinity"),
            Repr::Infinity => return f.write_str("Infinity"),
            Repr::Finite {
                coefficient,
                exponent,
            } => (coefficient, *exponent),
        };

        if coefficient.is_negative() {
            f.write_str("-")?;
        }
        let digits = coefficient.magnitude().to_string();
        if exponent >= 0 {
            let zeros = usize::try_from(exponent).unwrap_or_default();
            return write!(f, "{digits}{}", "0".repeat(zeros));
        }

        let fraction_len = usize::try_from(exponent.unsigned_abs()).unwrap_or_default();
        match digits.len().checked_sub(fraction_len) {
            Some(0) | None => write!(
                f,
                "0.{}{digits}",
                "0".repeat(fraction_len.saturating_sub(digits.len()))
            ),
            Some(split) => write!(f, "{}.{}", &digits[..split], &digits[split..]),
        }
    }
}
