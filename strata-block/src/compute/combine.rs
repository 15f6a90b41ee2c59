use strata_error::StrataResult;

use crate::compute::{ComputeFn, ComputeFnVTable, InvocationArgs, Output, check_same_len};
use crate::{BoolBlock, HeterogeneousBlock, ValueBlock};

/// Select between two blocks element by element: `left[i]` where `mask[i]` is `true`, `right[i]`
/// otherwise. A Missing mask element selects `right`.
///
/// Selected values are borrowed from the inputs; call
/// [`into_owned`](HeterogeneousBlock::into_owned) to detach the result.
pub fn combine<'a>(
    left: &'a dyn ValueBlock,
    right: &'a dyn ValueBlock,
    mask: &'a dyn ValueBlock,
) -> StrataResult<HeterogeneousBlock<'a>> {
    COMBINE_FN
        .invoke(&InvocationArgs {
            inputs: &[left.into(), right.into(), mask.into()],
        })?
        .unwrap_values()
}

struct Combine;

impl ComputeFnVTable for Combine {
    fn invoke<'a>(&self, args: &InvocationArgs<'_, 'a>) -> StrataResult<Output<'a>> {
        args.expect_arity(COMBINE_FN.name(), 3)?;
        let left = args.block(0)?;
        let right = args.block(1)?;
        let mask = args.block(2)?;
        check_same_len(COMBINE_FN.name(), left.len(), right.len())?;
        check_same_len(COMBINE_FN.name(), left.len(), mask.len())?;

        let mask = BoolBlock::from_block(mask).to_mask();
        let left = left.extract();
        let right = right.extract();
        let combined: HeterogeneousBlock<'a> = left
            .iter()
            .zip(right.iter())
            .enumerate()
            .map(|(idx, (l, r))| if mask.value(idx) { l } else { r })
            .collect();
        Ok(combined.into())
    }
}

pub static COMBINE_FN: ComputeFn = ComputeFn::new("valueBlockCombine", &Combine);

#[cfg(test)]
mod tests {
    use strata_scalar::{Value, ValueRef};

    use super::*;

    #[test]
    fn combine_selects_by_mask() {
        let left: HeterogeneousBlock = [
            Value::Int32(1),
            Value::Missing,
            Value::Int32(3),
            Value::Missing,
            Value::Int32(5),
        ]
        .into_iter()
        .collect();
        let right: HeterogeneousBlock = (1..=5)
            .map(|i| Value::string(&format!("This is item #{i}")))
            .collect();
        let mask = BoolBlock::from_iter([true, true, true, false, true]);

        let result = combine(&left, &right, &mask).unwrap();
        assert_eq!(
            result.extract().as_slice(),
            &[
                ValueRef::Int32(1),
                ValueRef::Missing,
                ValueRef::Int32(3),
                ValueRef::LongString("This is item #4"),
                ValueRef::Int32(5),
            ]
        );
        assert!((0..result.len()).all(|idx| !result.is_owned(idx)));
    }

    #[test]
    fn missing_mask_selects_right() {
        let left: HeterogeneousBlock = [Value::Int32(1)].into_iter().collect();
        let right: HeterogeneousBlock = [Value::Int32(2)].into_iter().collect();
        let mask = BoolBlock::from_iter([None::<bool>]);
        let result = combine(&left, &right, &mask).unwrap();
        assert_eq!(result.get(0), Some(ValueRef::Int32(2)));
    }

    #[test]
    fn length_mismatch() {
        let left: HeterogeneousBlock = [Value::Int32(1), Value::Int32(2)].into_iter().collect();
        let right: HeterogeneousBlock = [Value::Int32(2)].into_iter().collect();
        let mask = BoolBlock::from_iter([true, false]);
        assert!(combine(&left, &right, &mask).is_err());
        assert!(combine(&left, &left, &BoolBlock::from_iter([true])).is_err());
    }
}
