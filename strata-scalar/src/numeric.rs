use crate::{Decimal, Value, ValueRef};

/// The numeric tags ordered by promotion rank: `Int32 < Int64 < Double < Decimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumericKind {
    Int32,
    Int64,
    Double,
    Decimal,
}

impl NumericKind {
    pub fn of(value: ValueRef<'_>) -> Option<Self> {
        match value {
            ValueRef::Int32(_) => Some(Self::Int32),
            ValueRef::Int64(_) => Some(Self::Int64),
            ValueRef::Double(_) => Some(Self::Double),
            ValueRef::Decimal(_) => Some(Self::Decimal),
            _ => None,
        }
    }

    /// The wider of two numeric kinds.
    #[inline]
    pub fn promote(self, other: Self) -> Self {
        self.max(other)
    }
}

/// Widen a numeric view to a double. Decimals never narrow and have no double form here.
fn to_f64(value: ValueRef<'_>) -> Option<f64> {
    match value {
        ValueRef::Int32(v) => Some(f64::from(v)),
        ValueRef::Int64(v) => Some(v as f64),
        ValueRef::Double(v) => Some(v),
        _ => None,
    }
}

/// Widen a numeric view to a decimal. A double converts through its shortest round-trip digits;
/// NaN and infinities become the matching non-finite decimals.
fn to_decimal(value: ValueRef<'_>) -> Option<Decimal> {
    match value {
        ValueRef::Int32(v) => Some(Decimal::from(v)),
        ValueRef::Int64(v) => Some(Decimal::from(v)),
        ValueRef::Double(v) => Some(Decimal::from_f64(v)),
        ValueRef::Decimal(d) => Some(d.clone()),
        _ => None,
    }
}

/// A running numeric total with SBE-style type promotion.
///
/// The total always carries the widest kind seen so far. Integer overflow widens instead of
/// wrapping: an `Int32` total continues as `Int64` and an `Int64` total continues as `Double`.
/// A decimal total is updated in place in its heap cell and absorbs NaN and infinities the way
/// IEEE arithmetic does, so adding a number never fails.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericAccumulator {
    Int32(i32),
    Int64(i64),
    Double(f64),
    Decimal(Box<Decimal>),
}

impl NumericAccumulator {
    /// Start a total from its first contributor. Returns `None` for non-numeric values.
    pub fn new(first: ValueRef<'_>) -> Option<Self> {
        match first {
            ValueRef::Int32(v) => Some(Self::Int32(v)),
            ValueRef::Int64(v) => Some(Self::Int64(v)),
            ValueRef::Double(v) => Some(Self::Double(v)),
            ValueRef::Decimal(d) => Some(Self::Decimal(Box::new(d.clone()))),
            _ => None,
        }
    }

    pub fn kind(&self) -> NumericKind {
        match self {
            Self::Int32(_) => NumericKind::Int32,
            Self::Int64(_) => NumericKind::Int64,
            Self::Double(_) => NumericKind::Double,
            Self::Decimal(_) => NumericKind::Decimal,
        }
    }

    /// Add one contributor to the total. Non-numeric values leave the total unchanged.
    pub fn add(&mut self, value: ValueRef<'_>) {
        let Some(kind) = NumericKind::of(value) else {
            return;
        };
        let target = self.kind().promote(kind);
        if target != self.kind() {
            self.widen(target);
        }

        match self {
            Self::Int32(total) => {
                let ValueRef::Int32(v) = value else {
                    unreachable!("int32 total only accepts int32 contributors")
                };
                match total.checked_add(v) {
                    Some(sum) => *total = sum,
                    None => {
                        let widened = i64::from(*total) + i64::from(v);
                        *self = Self::Int64(widened);
                    }
                }
            }
            Self::Int64(total) => {
                let v = match value {
                    ValueRef::Int32(v) => i64::from(v),
                    ValueRef::Int64(v) => v,
                    _ => unreachable!("int64 total only accepts integer contributors"),
                };
                match total.checked_add(v) {
                    Some(sum) => *total = sum,
                    None => {
                        let widened = *total as f64 + v as f64;
                        *self = Self::Double(widened);
                    }
                }
            }
            Self::Double(total) => {
                *total += to_f64(value).unwrap_or(f64::NAN);
            }
            Self::Decimal(total) => {
                if let Some(v) = to_decimal(value) {
                    **total += &v;
                }
            }
        }
    }

    fn widen(&mut self, kind: NumericKind) {
        let widened = match (&*self, kind) {
            (Self::Int32(v), NumericKind::Int64) => Self::Int64(i64::from(*v)),
            (Self::Int32(v), NumericKind::Double) => Self::Double(f64::from(*v)),
            (Self::Int64(v), NumericKind::Double) => Self::Double(*v as f64),
            (Self::Int32(v), NumericKind::Decimal) => Self::Decimal(Box::new(Decimal::from(*v))),
            (Self::Int64(v), NumericKind::Decimal) => Self::Decimal(Box::new(Decimal::from(*v))),
            (Self::Double(v), NumericKind::Decimal) => {
                Self::Decimal(Box::new(Decimal::from_f64(*v)))
            }
            _ => return,
        };
        *self = widened;
    }

    pub fn into_value(self) -> Value {
        match self {
            Self::Int32(v) => Value::Int32(v),
            Self::Int64(v) => Value::Int64(v),
            Self::Double(v) => Value::Double(v),
            Self::Decimal(d) => Value::Decimal(d),
        }
    }
}
