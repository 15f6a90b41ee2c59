use strata_error::StrataResult;

use crate::{Decimal, SmallString, TypeTag, ValueRef};

/// An owned tagged value.
///
/// Heap-backed payloads (`Decimal`, `LongString`) are uniquely owned: dropping the value releases
/// them exactly once, moving it transfers ownership, and [`Clone`] performs a deep copy into a
/// fresh allocation.
///
/// Two values are equal when they have the same tag and equal payloads under the canonical
/// order, except that strings are equal by content whether stored inline or on the heap.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Missing,
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    Double(f64),
    Decimal(Box<Decimal>),
    ShortString(SmallString),
    LongString(Box<str>),
}

impl Value {
    /// Build a string value, storing it inline when it is short enough.
    pub fn string(value: &str) -> Self {
        match SmallString::new(value) {
            Some(small) => Value::ShortString(small),
            None => Value::LongString(value.into()),
        }
    }

    /// Build a string value that is always heap-allocated, regardless of its length.
    ///
    /// Comparison never distinguishes the two storage classes.
    pub fn long_string(value: &str) -> Self {
        Value::LongString(value.into())
    }

    pub fn decimal(value: Decimal) -> Self {
        Value::Decimal(Box::new(value))
    }

    /// Parse a decimal literal such as `"59"`, `"-0.125"` or `"1.5e-7"`.
    pub fn parse_decimal(literal: &str) -> StrataResult<Self> {
        Ok(Value::decimal(literal.parse()?))
    }

    pub fn tag(&self) -> TypeTag {
        match self {
            Value::Missing => TypeTag::Missing,
            Value::Boolean(_) => TypeTag::Boolean,
            Value::Int32(_) => TypeTag::Int32,
            Value::Int64(_) => TypeTag::Int64,
            Value::Double(_) => TypeTag::Double,
            Value::Decimal(_) => TypeTag::Decimal,
            Value::ShortString(_) => TypeTag::ShortString,
            Value::LongString(_) => TypeTag::LongString,
        }
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Borrow this value as a view. The view never owns the heap payload.
    #[inline]
    pub fn as_view(&self) -> ValueRef<'_> {
        match self {
            Value::Missing => ValueRef::Missing,
            Value::Boolean(b) => ValueRef::Boolean(*b),
            Value::Int32(v) => ValueRef::Int32(*v),
            Value::Int64(v) => ValueRef::Int64(*v),
            Value::Double(v) => ValueRef::Double(*v),
            Value::Decimal(d) => ValueRef::Decimal(d),
            Value::ShortString(s) => ValueRef::ShortString(*s),
            Value::LongString(s) => ValueRef::LongString(s),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_view().as_bool()
    }

    pub fn as_decimal(&self) -> Option<&Decimal> {
        match self {
            Value::Decimal(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::ShortString(s) => Some(s.as_str()),
            Value::LongString(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int64(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Value::decimal(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::string(value)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Missing, Into::into)
    }
}

impl From<ValueRef<'_>> for Value {
    fn from(value: ValueRef<'_>) -> Self {
        value.to_value()
    }
}
