//! A mask is the set of selected rows of a block: the rows whose filter bit is `true`.
//!
//! Filters that select every row or no row at all are common (no filter, or a filter that rejects
//! the whole block), so both are kept symbolic and never allocate a bit buffer.
#![deny(missing_docs)]
mod eq;
mod iter_bools;
mod ops;

use std::sync::Arc;

use arrow_buffer::BooleanBuffer;

/// Either every row, no row, or the rows described by `T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllOr<T> {
    /// Every row.
    All,
    /// No row.
    None,
    /// Some rows, but not all of them.
    Some(T),
}

/// The selected rows of a block.
#[derive(Clone, Debug)]
pub enum Mask {
    /// Every one of the `len` rows is selected.
    AllTrue(usize),
    /// None of the `len` rows is selected.
    AllFalse(usize),
    /// At least one row is selected and at least one is not.
    Partial(Arc<PartialMask>),
}

/// The bits of a [`Mask`] that selects some but not all rows.
#[derive(Debug)]
pub struct PartialMask {
    bits: BooleanBuffer,
    selected: usize,
}

impl PartialMask {
    /// The bit buffer, one bit per row.
    pub fn bits(&self) -> &BooleanBuffer {
        &self.bits
    }

    /// The number of selected rows.
    pub fn selected(&self) -> usize {
        self.selected
    }
}

impl Mask {
    /// Select all `len` rows.
    pub fn new_true(len: usize) -> Self {
        Self::AllTrue(len)
    }

    /// Select none of `len` rows.
    pub fn new_false(len: usize) -> Self {
        Self::AllFalse(len)
    }

    /// Select the rows whose bit is set. Full and empty selections collapse to the symbolic
    /// variants.
    pub fn from_buffer(bits: BooleanBuffer) -> Self {
        let selected = bits.count_set_bits();
        match selected {
            0 => Self::AllFalse(bits.len()),
            n if n == bits.len() => Self::AllTrue(n),
            _ => Self::Partial(Arc::new(PartialMask { bits, selected })),
        }
    }

    /// The number of rows, selected or not.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        match self {
            Self::AllTrue(len) | Self::AllFalse(len) => *len,
            Self::Partial(partial) => partial.bits.len(),
        }
    }

    /// The number of selected rows.
    #[inline]
    pub fn true_count(&self) -> usize {
        match self {
            Self::AllTrue(len) => *len,
            Self::AllFalse(_) => 0,
            Self::Partial(partial) => partial.selected,
        }
    }

    /// The number of rows that are not selected.
    #[inline]
    pub fn false_count(&self) -> usize {
        self.len() - self.true_count()
    }

    /// Whether every row is selected. An empty mask selects every one of its zero rows.
    #[inline]
    pub fn all_true(&self) -> bool {
        self.true_count() == self.len()
    }

    /// Whether no row is selected.
    #[inline]
    pub fn all_false(&self) -> bool {
        self.true_count() == 0
    }

    /// Whether row `idx` is selected.
    ///
    /// ## Panics
    ///
    /// Panics if a partial mask is indexed out of bounds.
    pub fn value(&self, idx: usize) -> bool {
        match self {
            Self::AllTrue(_) => true,
            Self::AllFalse(_) => false,
            Self::Partial(partial) => partial.bits.value(idx),
        }
    }

    /// The bit buffer of a partial mask.
    pub fn boolean_buffer(&self) -> AllOr<&BooleanBuffer> {
        match self {
            Self::AllTrue(_) => AllOr::All,
            Self::AllFalse(_) => AllOr::None,
            Self::Partial(partial) => AllOr::Some(&partial.bits),
        }
    }

    /// The mask as bits, allocating a buffer for the symbolic variants.
    pub fn to_boolean_buffer(&self) -> BooleanBuffer {
        match self {
            Self::AllTrue(len) => BooleanBuffer::new_set(*len),
            Self::AllFalse(len) => BooleanBuffer::new_unset(*len),
            Self::Partial(partial) => partial.bits.clone(),
        }
    }
}

impl From<BooleanBuffer> for Mask {
    fn from(bits: BooleanBuffer) -> Self {
        Self::from_buffer(bits)
    }
}

impl FromIterator<bool> for Mask {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        Self::from_buffer(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn symbolic_masks() {
        let all = Mask::new_true(5);
        assert_eq!(all.len(), 5);
        assert_eq!(all.true_count(), 5);
        assert_eq!(all.false_count(), 0);
        assert!(all.all_true());
        assert_eq!(all.boolean_buffer(), AllOr::All);

        let none = Mask::new_false(5);
        assert_eq!(none.true_count(), 0);
        assert!(none.all_false());
        assert!(!none.value(3));
        assert_eq!(none.boolean_buffer(), AllOr::None);
    }

    #[test]
    fn partial_mask() {
        let mask = Mask::from_iter([true, false, true, true, false]);
        assert_eq!(mask.len(), 5);
        assert_eq!(mask.true_count(), 3);
        assert_eq!(mask.false_count(), 2);
        assert!(mask.value(2));
        assert!(!mask.value(4));
        assert_eq!(
            mask.to_boolean_buffer(),
            BooleanBuffer::from_iter([true, false, true, true, false])
        );
    }

    #[test]
    fn collapses_to_symbolic_variants() {
        assert!(matches!(Mask::from_iter([true, true]), Mask::AllTrue(2)));
        assert!(matches!(Mask::from_iter([false, false]), Mask::AllFalse(2)));
        assert!(matches!(
            Mask::from_buffer(BooleanBuffer::new_unset(0)),
            Mask::AllFalse(0)
        ));
    }
}
