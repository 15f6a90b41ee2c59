use std::borrow::Cow;
use std::fmt::{Display, Formatter};

use arrow_buffer::BooleanBuffer;
use strata_error::{StrataResult, strata_bail};
use strata_mask::{AllOr, Mask};
use strata_scalar::ValueRef;

use crate::{Extracted, ValueBlock};

/// A block whose elements are all Boolean or Missing.
///
/// Values are packed into a bit buffer alongside a validity [`Mask`]; an invalid position is
/// Missing and its value bit is meaningless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoolBlock {
    values: BooleanBuffer,
    validity: Mask,
}

impl BoolBlock {
    pub fn try_new(values: BooleanBuffer, validity: Mask) -> StrataResult<Self> {
        if values.len() != validity.len() {
            strata_bail!(MismatchedLengths: values.len(), validity.len());
        }
        Ok(Self { values, validity })
    }

    /// A block of `len` copies of `value`, where `None` is Missing.
    pub fn new_fill(value: Option<bool>, len: usize) -> Self {
        match value {
            Some(b) => Self {
                values: if b {
                    BooleanBuffer::new_set(len)
                } else {
                    BooleanBuffer::new_unset(len)
                },
                validity: Mask::new_true(len),
            },
            None => Self {
                values: BooleanBuffer::new_unset(len),
                validity: Mask::new_false(len),
            },
        }
    }

    /// A block with no Missing elements whose values are the selected rows of `mask`.
    pub fn from_mask(mask: &Mask) -> Self {
        Self {
            values: mask.to_boolean_buffer(),
            validity: Mask::new_true(mask.len()),
        }
    }

    /// View any block as booleans. Elements that are neither Boolean nor Missing become Missing.
    pub fn from_block(block: &dyn ValueBlock) -> Cow<'_, BoolBlock> {
        if let Some(bools) = block.as_bool_block() {
            return Cow::Borrowed(bools);
        }
        log::debug!(
            "Materializing a block of {} values into a bool block",
            block.len()
        );
        Cow::Owned(block.extract().iter().map(|v| v.as_bool()).collect())
    }

    pub fn values(&self) -> &BooleanBuffer {
        &self.values
    }

    pub fn validity(&self) -> &Mask {
        &self.validity
    }

    /// The element at `idx`, or `None` if it is Missing.
    ///
    /// ## Panics
    ///
    /// Panics if the index is out of bounds.
    pub fn value(&self, idx: usize) -> Option<bool> {
        self.validity
            .value(idx)
            .then(|| self.values.value(idx))
    }

    /// The rows whose element is `true`. Missing rows are never selected.
    pub fn to_mask(&self) -> Mask {
        match self.validity.boolean_buffer() {
            AllOr::All => Mask::from_buffer(self.values.clone()),
            AllOr::None => Mask::new_false(self.len()),
            AllOr::Some(validity) => Mask::from_buffer(&self.values & validity),
        }
    }

    /// The number of `true` elements.
    pub fn true_count(&self) -> usize {
        match self.validity.boolean_buffer() {
            AllOr::All => self.values.count_set_bits(),
            AllOr::None => 0,
            AllOr::Some(validity) => (&self.values & validity).count_set_bits(),
        }
    }

    /// The number of `false` elements. Missing elements count as neither true nor false.
    pub fn false_count(&self) -> usize {
        self.validity.true_count() - self.true_count()
    }
}

impl ValueBlock for BoolBlock {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn extract(&self) -> Extracted<'_> {
        (0..self.len())
            .map(|idx| ValueRef::from(self.value(idx)))
            .collect()
    }

    fn as_bool_block(&self) -> Option<&BoolBlock> {
        Some(self)
    }
}

impl FromIterator<bool> for BoolBlock {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        let values = BooleanBuffer::from_iter(iter);
        let validity = Mask::new_true(values.len());
        Self { values, validity }
    }
}

impl FromIterator<Option<bool>> for BoolBlock {
    fn from_iter<T: IntoIterator<Item = Option<bool>>>(iter: T) -> Self {
        let (values, validity): (Vec<bool>, Vec<bool>) = iter
            .into_iter()
            .map(|v| (v.unwrap_or(false), v.is_some()))
            .unzip();
        Self {
            values: BooleanBuffer::from(values),
            validity: Mask::from_iter(validity),
        }
    }
}

impl Display for BoolBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.extract(), f)
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rstest::rstest;
    use strata_scalar::Value;

    use super::*;
    use crate::HeterogeneousBlock;

    #[test]
    fn extract_missing_and_booleans() {
        let block = BoolBlock::from_iter([Some(true), None, Some(false)]);
        assert_eq!(
            block.extract().iter().collect_vec(),
            vec![
                ValueRef::Boolean(true),
                ValueRef::Missing,
                ValueRef::Boolean(false)
            ]
        );
        assert_eq!(block.to_string(), "[true, missing, false]");
    }

    #[rstest]
    #[case(vec![Some(true), None, Some(false), Some(true)], 2, 1)]
    #[case(vec![None, None], 0, 0)]
    #[case(vec![Some(false), Some(false)], 0, 2)]
    #[case(vec![Some(true), Some(true)], 2, 0)]
    fn counts(#[case] input: Vec<Option<bool>>, #[case] trues: usize, #[case] falses: usize) {
        let block = BoolBlock::from_iter(input);
        assert_eq!(block.true_count(), trues);
        assert_eq!(block.false_count(), falses);
        assert_eq!(block.to_mask().true_count(), trues);
    }

    #[test]
    fn new_fill() {
        assert_eq!(
            BoolBlock::new_fill(Some(false), 3),
            BoolBlock::from_iter([false, false, false])
        );
        let missing = BoolBlock::new_fill(None, 2);
        assert_eq!(missing.value(0), None);
        assert_eq!(missing.true_count(), 0);
    }

    #[test]
    fn from_block_coerces_non_booleans_to_missing() {
        let block: HeterogeneousBlock =
            [Value::Boolean(true), Value::Int32(1), Value::Missing, Value::Boolean(false)]
                .into_iter()
                .collect();
        let bools = BoolBlock::from_block(&block);
        assert!(matches!(bools, Cow::Owned(_)));
        assert_eq!(
            (0..4).map(|i| bools.value(i)).collect_vec(),
            vec![Some(true), None, None, Some(false)]
        );
    }

    #[test]
    fn from_block_borrows_dense_booleans() {
        let block = BoolBlock::from_iter([true, false]);
        assert!(matches!(BoolBlock::from_block(&block), Cow::Borrowed(_)));
    }

    #[test]
    fn try_new_length_mismatch() {
        assert!(BoolBlock::try_new(BooleanBuffer::new_set(2), Mask::new_true(3)).is_err());
    }
}
