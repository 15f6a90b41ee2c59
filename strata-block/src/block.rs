use std::fmt::{Debug, Display, Formatter};
use std::ops::Index;

use itertools::Itertools;
use strata_scalar::{TypeTag, ValueRef};

use crate::BoolBlock;

/// A fixed-length, ordered run of tagged values.
///
/// Row order is insertion order and the length never changes once the block is built. Operators
/// read blocks through this trait only and always produce new blocks.
pub trait ValueBlock: Debug {
    /// The number of values in the block.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Materialize the block as a dense run of views.
    ///
    /// The views borrow from `self` and never own heap payloads, so the result cannot outlive the
    /// block.
    fn extract(&self) -> Extracted<'_>;

    /// Returns the block as a [`BoolBlock`] if it already stores dense booleans.
    fn as_bool_block(&self) -> Option<&BoolBlock> {
        None
    }
}

/// The dense view of a [`ValueBlock`] returned by [`ValueBlock::extract`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Extracted<'a> {
    values: Vec<ValueRef<'a>>,
}

impl<'a> Extracted<'a> {
    pub fn new(values: Vec<ValueRef<'a>>) -> Self {
        Self { values }
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<ValueRef<'a>> {
        self.values.get(idx).copied()
    }

    pub fn tags(&self) -> impl Iterator<Item = TypeTag> + '_ {
        self.values.iter().map(ValueRef::tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = ValueRef<'a>> + '_ {
        self.values.iter().copied()
    }

    pub fn as_slice(&self) -> &[ValueRef<'a>] {
        &self.values
    }
}

impl<'a> Index<usize> for Extracted<'a> {
    type Output = ValueRef<'a>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl<'a> FromIterator<ValueRef<'a>> for Extracted<'a> {
    fn from_iter<T: IntoIterator<Item = ValueRef<'a>>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Display for Extracted<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.values.iter().format(", "))
    }
}

impl Display for dyn ValueBlock + '_ {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.extract(), f)
    }
}
