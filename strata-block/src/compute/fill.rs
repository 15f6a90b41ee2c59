use strata_error::{StrataResult, strata_bail, strata_err};
use strata_scalar::{Value, ValueRef};

use crate::compute::{ComputeFn, ComputeFnVTable, InvocationArgs, Output};
use crate::{HeterogeneousBlock, ValueBlock};

/// A block of `count` copies of `value`. Every element owns its own copy.
pub fn new_fill(value: ValueRef<'_>, count: i32) -> StrataResult<HeterogeneousBlock<'static>> {
    Ok(NEW_FILL_FN
        .invoke(&InvocationArgs {
            inputs: &[value.into(), ValueRef::Int32(count).into()],
        })?
        .unwrap_values()?
        .into_owned())
}

/// The number of elements of a block, as an `Int32`.
pub fn size(block: &dyn ValueBlock) -> StrataResult<Value> {
    SIZE_FN
        .invoke(&InvocationArgs {
            inputs: &[block.into()],
        })?
        .unwrap_scalar()
}

struct NewFill;

impl ComputeFnVTable for NewFill {
    fn invoke<'a>(&self, args: &InvocationArgs<'_, 'a>) -> StrataResult<Output<'a>> {
        args.expect_arity(NEW_FILL_FN.name(), 2)?;
        let value = args.scalar(0)?;
        let count = match args.scalar(1)? {
            ValueRef::Int32(count) => usize::try_from(count).map_err(|_| {
                strata_err!("{} count must not be negative: {}", NEW_FILL_FN.name(), count)
            })?,
            other => strata_bail!(
                "{} count must be an int32, found {}",
                NEW_FILL_FN.name(),
                other.tag()
            ),
        };

        let mut block = HeterogeneousBlock::with_capacity(count);
        for _ in 0..count {
            block.push(value.to_value());
        }
        Ok(block.into())
    }
}

struct Size;

impl ComputeFnVTable for Size {
    fn invoke<'a>(&self, args: &InvocationArgs<'_, 'a>) -> StrataResult<Output<'a>> {
        args.expect_arity(SIZE_FN.name(), 1)?;
        let len = args.block(0)?.len();
        let size = i32::try_from(len).map_err(|e| {
            strata_err!(ComputeError: "block of {} values has no int32 size: {}", len, e)
        })?;
        Ok(Value::Int32(size).into())
    }
}

pub static NEW_FILL_FN: ComputeFn = ComputeFn::new("valueBlockNewFill", &NewFill);
pub static SIZE_FN: ComputeFn = ComputeFn::new("valueBlockSize", &Size);
