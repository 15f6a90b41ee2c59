use std::fmt::{Display, Formatter};

use strata_scalar::{Value, ValueRef};

use crate::{Extracted, ValueBlock};

/// A block of independently tagged values.
///
/// Each slot either borrows its value from an input that outlives the block (a view) or owns it.
/// Operators pass unchanged inputs through as views and own only the values they create.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeterogeneousBlock<'a> {
    slots: Vec<Slot<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
enum Slot<'a> {
    View(ValueRef<'a>),
    Owned(Value),
}

impl Slot<'_> {
    #[inline]
    fn as_view(&self) -> ValueRef<'_> {
        match self {
            Slot::View(view) => *view,
            Slot::Owned(value) => value.as_view(),
        }
    }
}

impl<'a> HeterogeneousBlock<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Append an owned value; the block releases it when dropped.
    pub fn push(&mut self, value: Value) {
        self.slots.push(Slot::Owned(value));
    }

    /// Append a view of a value owned elsewhere.
    pub fn push_view(&mut self, value: ValueRef<'a>) {
        self.slots.push(Slot::View(value));
    }

    pub fn get(&self, idx: usize) -> Option<ValueRef<'_>> {
        self.slots.get(idx).map(Slot::as_view)
    }

    /// Whether the value at `idx` is owned by this block rather than borrowed.
    pub fn is_owned(&self, idx: usize) -> bool {
        matches!(self.slots.get(idx), Some(Slot::Owned(_)))
    }

    /// Deep-copy every borrowed slot so the block no longer depends on its inputs.
    pub fn into_owned(self) -> HeterogeneousBlock<'static> {
        self.slots
            .into_iter()
            .map(|slot| match slot {
                Slot::View(view) => view.to_value(),
                Slot::Owned(value) => value,
            })
            .collect()
    }
}

impl ValueBlock for HeterogeneousBlock<'_> {
    fn len(&self) -> usize {
        self.slots.len()
    }

    fn extract(&self) -> Extracted<'_> {
        self.slots.iter().map(Slot::as_view).collect()
    }
}

impl FromIterator<Value> for HeterogeneousBlock<'_> {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Self {
            slots: iter.into_iter().map(Slot::Owned).collect(),
        }
    }
}

impl<'a> FromIterator<ValueRef<'a>> for HeterogeneousBlock<'a> {
    fn from_iter<T: IntoIterator<Item = ValueRef<'a>>>(iter: T) -> Self {
        Self {
            slots: iter.into_iter().map(Slot::View).collect(),
        }
    }
}

impl Display for HeterogeneousBlock<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.extract(), f)
    }
}
