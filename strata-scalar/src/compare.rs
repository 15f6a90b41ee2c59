use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

use crate::{Decimal, TypeClass, Value, ValueRef};

/// A comparison operator.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Operator {
    Eq,
    NotEq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Operator::Eq => "==",
            Operator::NotEq => "!=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
        };
        f.write_str(symbol)
    }
}

impl Operator {
    /// Whether `lhs <op> rhs` holds given `lhs.cmp(rhs)`.
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            Operator::Eq => ordering.is_eq(),
            Operator::NotEq => ordering.is_ne(),
            Operator::Gt => ordering.is_gt(),
            Operator::Gte => ordering.is_ge(),
            Operator::Lt => ordering.is_lt(),
            Operator::Lte => ordering.is_le(),
        }
    }
}

/// Compare two values under the canonical total order.
///
/// Type classes sort as `Missing < Number < String < Boolean`. Numbers of different tags compare
/// by numeric value, with NaN below every other number and equal to itself. Strings compare by
/// their UTF-8 bytes whether they are stored inline or on the heap.
pub fn total_cmp(lhs: ValueRef<'_>, rhs: ValueRef<'_>) -> Ordering {
    let class = lhs.tag().class();
    match class.cmp(&rhs.tag().class()) {
        Ordering::Equal => {}
        unequal => return unequal,
    }

    match class {
        TypeClass::Number => numeric_cmp(lhs, rhs),
        TypeClass::String => lhs.string_bytes().cmp(&rhs.string_bytes()),
        TypeClass::Boolean => lhs.as_bool().cmp(&rhs.as_bool()),
        // Views never carry the block class.
        TypeClass::Missing | TypeClass::Block => Ordering::Equal,
    }
}

impl PartialEq for ValueRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        let same_kind = self.tag() == other.tag()
            || (self.tag().class() == TypeClass::String && other.tag().class() == TypeClass::String);
        same_kind && total_cmp(*self, *other).is_eq()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.as_view() == other.as_view()
    }
}

/// Row-wise comparison producing a Boolean, or Missing when either side is Missing or the two
/// sides belong to different type classes.
pub fn scalar_cmp(lhs: ValueRef<'_>, rhs: ValueRef<'_>, operator: Operator) -> Value {
    if lhs.is_missing() || rhs.is_missing() || lhs.tag().class() != rhs.tag().class() {
        return Value::Missing;
    }
    Value::Boolean(operator.holds(total_cmp(lhs, rhs)))
}

fn numeric_cmp(lhs: ValueRef<'_>, rhs: ValueRef<'_>) -> Ordering {
    match (lhs, rhs) {
        (ValueRef::Int32(l), ValueRef::Int32(r)) => l.cmp(&r),
        (ValueRef::Int32(l), ValueRef::Int64(r)) => i64::from(l).cmp(&r),
        (ValueRef::Int64(l), ValueRef::Int32(r)) => l.cmp(&i64::from(r)),
        (ValueRef::Int64(l), ValueRef::Int64(r)) => l.cmp(&r),

        (ValueRef::Int32(l), ValueRef::Double(r)) => cmp_i64_f64(i64::from(l), r),
        (ValueRef::Int64(l), ValueRef::Double(r)) => cmp_i64_f64(l, r),
        (ValueRef::Double(l), ValueRef::Int32(r)) => cmp_i64_f64(i64::from(r), l).reverse(),
        (ValueRef::Double(l), ValueRef::Int64(r)) => cmp_i64_f64(r, l).reverse(),
        (ValueRef::Double(l), ValueRef::Double(r)) => cmp_f64(l, r),

        (ValueRef::Decimal(l), ValueRef::Decimal(r)) => l.cmp(r),
        (ValueRef::Decimal(l), ValueRef::Int32(r)) => l.cmp(&Decimal::from(r)),
        (ValueRef::Decimal(l), ValueRef::Int64(r)) => l.cmp(&Decimal::from(r)),
        (ValueRef::Int32(l), ValueRef::Decimal(r)) => Decimal::from(l).cmp(r),
        (ValueRef::Int64(l), ValueRef::Decimal(r)) => Decimal::from(l).cmp(r),
        (ValueRef::Decimal(l), ValueRef::Double(r)) => cmp_decimal_f64(l, r),
        (ValueRef::Double(l), ValueRef::Decimal(r)) => cmp_decimal_f64(r, l).reverse(),

        _ => Ordering::Equal,
    }
}

/// NaN sorts below every number and equal to itself.
fn cmp_f64(lhs: f64, rhs: f64) -> Ordering {
    match (lhs.is_nan(), rhs.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => lhs.partial_cmp(&rhs).unwrap_or(Ordering::Equal),
    }
}

/// Exact comparison of an integer against a double, without rounding the integer.
#[allow(clippy::cast_possible_truncation)]
fn cmp_i64_f64(lhs: i64, rhs: f64) -> Ordering {
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

    if rhs.is_nan() {
        return Ordering::Greater;
    }
    if rhs >= TWO_POW_63 {
        return Ordering::Less;
    }
    if rhs < -TWO_POW_63 {
        return Ordering::Greater;
    }

    // rhs is now within [-2^63, 2^63), so its integral part fits in an i64.
    let integral = rhs.trunc();
    match lhs.cmp(&(integral as i64)) {
        Ordering::Equal => {
            let fraction = rhs - integral;
            if fraction > 0.0 {
                Ordering::Less
            } else if fraction < 0.0 {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }
        unequal => unequal,
    }
}

/// Compares against the exact binary value of the double, never a rounded decimal form.
fn cmp_decimal_f64(lhs: &Decimal, rhs: f64) -> Ordering {
    lhs.cmp(&Decimal::from_f64_exact(rhs))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Value::Int32(1), Value::Int64(2), Ordering::Less)]
    #[case(Value::Int64(i64::MAX), Value::Double(9_223_372_036_854_775_808.0), Ordering::Less)]
    #[case(Value::Int64(i64::MIN), Value::Double(-9_223_372_036_854_775_808.0), Ordering::Equal)]
    #[case(Value::Int32(3), Value::Double(3.5), Ordering::Less)]
    #[case(Value::Int32(-3), Value::Double(-3.5), Ordering::Greater)]
    #[case(Value::Double(999.0), Value::Int64(999), Ordering::Equal)]
    #[case(Value::Double(f64::NAN), Value::Int32(i32::MIN), Ordering::Less)]
    #[case(Value::Double(f64::NAN), Value::Double(f64::NAN), Ordering::Equal)]
    #[case(Value::Double(f64::NEG_INFINITY), Value::Int64(i64::MIN), Ordering::Less)]
    #[case(Value::Int32(1), Value::string("a"), Ordering::Less)]
    #[case(Value::string("zoom"), Value::Boolean(false), Ordering::Less)]
    #[case(Value::Missing, Value::Int32(i32::MIN), Ordering::Less)]
    #[case(Value::string("abcdefg"), Value::string("abcdefgh"), Ordering::Less)]
    #[case(Value::long_string("baz"), Value::string("baz"), Ordering::Equal)]
    #[case(Value::Boolean(false), Value::Boolean(true), Ordering::Less)]
    #[case(Value::decimal(Decimal::from(0)), Value::Double(1e-30), Ordering::Less)]
    #[case(Value::decimal(Decimal::from(0)), Value::Double(-1e-300), Ordering::Greater)]
    #[case(Value::parse_decimal("0.1").unwrap(), Value::Double(0.1), Ordering::Less)]
    #[case(Value::parse_decimal("1e30").unwrap(), Value::Double(1e30), Ordering::Less)]
    #[case(Value::parse_decimal("1e400").unwrap(), Value::Double(f64::MAX), Ordering::Greater)]
    #[case(Value::parse_decimal("0.5").unwrap(), Value::Double(0.5), Ordering::Equal)]
    #[case(Value::decimal(Decimal::NAN), Value::Double(f64::NAN), Ordering::Equal)]
    #[case(Value::decimal(Decimal::NAN), Value::Int64(i64::MIN), Ordering::Less)]
    #[case(Value::decimal(Decimal::INFINITY), Value::Double(f64::INFINITY), Ordering::Equal)]
    fn total_order(#[case] lhs: Value, #[case] rhs: Value, #[case] expected: Ordering) {
        assert_eq!(total_cmp(lhs.as_view(), rhs.as_view()), expected);
        assert_eq!(total_cmp(rhs.as_view(), lhs.as_view()), expected.reverse());
    }

    #[test]
    fn decimal_against_other_numbers() {
        let fifty = Value::parse_decimal("50").unwrap();
        let half = Value::parse_decimal("0.5").unwrap();
        assert_eq!(
            total_cmp(fifty.as_view(), ValueRef::Int32(50)),
            Ordering::Equal
        );
        assert_eq!(
            total_cmp(half.as_view(), ValueRef::Double(0.25)),
            Ordering::Greater
        );
        assert_eq!(
            total_cmp(fifty.as_view(), ValueRef::Double(f64::INFINITY)),
            Ordering::Less
        );
        assert_eq!(
            total_cmp(fifty.as_view(), ValueRef::Double(f64::NAN)),
            Ordering::Greater
        );
    }

    #[rstest]
    #[case(Operator::Gt, Value::Boolean(true))]
    #[case(Operator::Gte, Value::Boolean(true))]
    #[case(Operator::Lt, Value::Boolean(false))]
    #[case(Operator::Lte, Value::Boolean(false))]
    #[case(Operator::Eq, Value::Boolean(false))]
    #[case(Operator::NotEq, Value::Boolean(true))]
    fn scalar_cmp_operators(#[case] operator: Operator, #[case] expected: Value) {
        assert_eq!(
            scalar_cmp(ValueRef::Int32(456), ValueRef::Int64(123), operator),
            expected
        );
    }

    #[test]
    fn scalar_cmp_missing() {
        assert_eq!(
            scalar_cmp(ValueRef::Missing, ValueRef::Int32(1), Operator::Eq),
            Value::Missing
        );
        assert_eq!(
            scalar_cmp(ValueRef::Int32(1), ValueRef::Missing, Operator::NotEq),
            Value::Missing
        );
        assert_eq!(
            scalar_cmp(ValueRef::Int32(1), Value::string("1").as_view(), Operator::Lt),
            Value::Missing
        );
    }

    #[test]
    fn ordering_is_antisymmetric() {
        let lhs = ValueRef::Int32(1);
        let rhs = ValueRef::Double(2.5);
        assert_eq!(scalar_cmp(lhs, rhs, Operator::Lt), Value::Boolean(true));
        assert_eq!(scalar_cmp(rhs, lhs, Operator::Gt), Value::Boolean(true));
        assert_eq!(scalar_cmp(rhs, lhs, Operator::Lte), Value::Boolean(false));
        assert_eq!(Operator::Gte.to_string(), ">=");
        assert_eq!(Operator::NotEq.to_string(), "!=");
    }
}
