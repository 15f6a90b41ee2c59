use strata_error::StrataResult;
use strata_scalar::ValueRef;

use crate::compute::{ComputeFn, ComputeFnVTable, InvocationArgs, Output, check_same_len};
use crate::{HeterogeneousBlock, ValueBlock};

/// Replace every Missing element with a copy of `fill`.
///
/// Each replaced slot owns its own deep copy of `fill`; present elements are passed through as
/// views. Filling with Missing returns the block unchanged.
pub fn fill_empty<'a>(
    block: &'a dyn ValueBlock,
    fill: ValueRef<'a>,
) -> StrataResult<HeterogeneousBlock<'a>> {
    FILL_EMPTY_FN
        .invoke(&InvocationArgs {
            inputs: &[block.into(), fill.into()],
        })?
        .unwrap_values()
}

/// Replace every Missing element at index `i` with a copy of `fill[i]`.
pub fn fill_empty_block<'a>(
    block: &'a dyn ValueBlock,
    fill: &'a dyn ValueBlock,
) -> StrataResult<HeterogeneousBlock<'a>> {
    FILL_EMPTY_BLOCK_FN
        .invoke(&InvocationArgs {
            inputs: &[block.into(), fill.into()],
        })?
        .unwrap_values()
}

struct FillEmpty;

impl ComputeFnVTable for FillEmpty {
    fn invoke<'a>(&self, args: &InvocationArgs<'_, 'a>) -> StrataResult<Output<'a>> {
        args.expect_arity(FILL_EMPTY_FN.name(), 2)?;
        let block = args.block(0)?;
        let fill = args.scalar(1)?;

        let extracted = block.extract();
        if fill.is_missing() {
            return Ok(extracted.iter().collect::<HeterogeneousBlock>().into());
        }

        let mut result = HeterogeneousBlock::with_capacity(extracted.count());
        for value in extracted.iter() {
            if value.is_missing() {
                result.push(fill.to_value());
            } else {
                result.push_view(value);
            }
        }
        Ok(result.into())
    }
}

struct FillEmptyBlock;

impl ComputeFnVTable for FillEmptyBlock {
    fn invoke<'a>(&self, args: &InvocationArgs<'_, 'a>) -> StrataResult<Output<'a>> {
        args.expect_arity(FILL_EMPTY_BLOCK_FN.name(), 2)?;
        let block = args.block(0)?;
        let fill = args.block(1)?;
        check_same_len(FILL_EMPTY_BLOCK_FN.name(), block.len(), fill.len())?;

        let extracted = block.extract();
        let fill = fill.extract();
        let mut result = HeterogeneousBlock::with_capacity(extracted.count());
        for (value, fill) in extracted.iter().zip(fill.iter()) {
            if value.is_missing() {
                result.push(fill.to_value());
            } else {
                result.push_view(value);
            }
        }
        Ok(result.into())
    }
}

pub static FILL_EMPTY_FN: ComputeFn = ComputeFn::new("valueBlockFillEmpty", &FillEmpty);
pub static FILL_EMPTY_BLOCK_FN: ComputeFn =
    ComputeFn::new("valueBlockFillEmptyBlock", &FillEmptyBlock);
