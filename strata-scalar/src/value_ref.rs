use crate::{Decimal, SmallString, TypeTag, Value};

/// A borrowed view of a tagged value.
///
/// Copying a view is a bitwise copy and dropping it releases nothing; the owner of the heap
/// payload must outlive the view, which the lifetime enforces. Equality follows [`Value`].
#[derive(Debug, Clone, Copy, Default)]
pub enum ValueRef<'a> {
    #[default]
    Missing,
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    Double(f64),
    Decimal(&'a Decimal),
    ShortString(SmallString),
    LongString(&'a str),
}

impl<'a> ValueRef<'a> {
    pub fn tag(&self) -> TypeTag {
        match self {
            ValueRef::Missing => TypeTag::Missing,
            ValueRef::Boolean(_) => TypeTag::Boolean,
            ValueRef::Int32(_) => TypeTag::Int32,
            ValueRef::Int64(_) => TypeTag::Int64,
            ValueRef::Double(_) => TypeTag::Double,
            ValueRef::Decimal(_) => TypeTag::Decimal,
            ValueRef::ShortString(_) => TypeTag::ShortString,
            ValueRef::LongString(_) => TypeTag::LongString,
        }
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, ValueRef::Missing)
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ValueRef::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// True only for a Boolean `true`; Missing and every other tag are not true.
    #[inline]
    pub fn is_true(&self) -> bool {
        matches!(self, ValueRef::Boolean(true))
    }

    /// The UTF-8 bytes of a string value, regardless of inline or heap storage.
    pub fn string_bytes(&self) -> Option<&[u8]> {
        match self {
            ValueRef::ShortString(s) => Some(s.as_bytes()),
            ValueRef::LongString(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    /// Deep copy into an owned value, allocating fresh storage for heap payloads.
    pub fn to_value(self) -> Value {
        match self {
            ValueRef::Missing => Value::Missing,
            ValueRef::Boolean(b) => Value::Boolean(b),
            ValueRef::Int32(v) => Value::Int32(v),
            ValueRef::Int64(v) => Value::Int64(v),
            ValueRef::Double(v) => Value::Double(v),
            ValueRef::Decimal(d) => Value::Decimal(Box::new(d.clone())),
            ValueRef::ShortString(s) => Value::ShortString(s),
            ValueRef::LongString(s) => Value::LongString(s.into()),
        }
    }
}

impl From<bool> for ValueRef<'_> {
    fn from(value: bool) -> Self {
        ValueRef::Boolean(value)
    }
}

impl From<Option<bool>> for ValueRef<'_> {
    fn from(value: Option<bool>) -> Self {
        value.map_or(ValueRef::Missing, ValueRef::Boolean)
    }
}

impl From<i32> for ValueRef<'_> {
    fn from(value: i32) -> Self {
        ValueRef::Int32(value)
    }
}

impl From<i64> for ValueRef<'_> {
    fn from(value: i64) -> Self {
        ValueRef::Int64(value)
    }
}

impl From<f64> for ValueRef<'_> {
    fn from(value: f64) -> Self {
        ValueRef::Double(value)
    }
}

impl<'a> From<&'a Value> for ValueRef<'a> {
    fn from(value: &'a Value) -> Self {
        value.as_view()
    }
}
