use std::fmt::{Display, Formatter};

use crate::{Value, ValueRef};

impl Display for ValueRef<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueRef::Missing => write!(f, "missing"),
            ValueRef::Boolean(b) => write!(f, "{b}"),
            ValueRef::Int32(v) => write!(f, "{v}i32"),
            ValueRef::Int64(v) => write!(f, "{v}i64"),
            ValueRef::Double(v) => write!(f, "{v}f64"),
            ValueRef::Decimal(d) => write!(f, "{d}dec"),
            ValueRef::ShortString(s) => write!(f, "\"{}\"", s.as_str()),
            ValueRef::LongString(s) => write!(f, "\"{s}\""),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.as_view(), f)
    }
}
