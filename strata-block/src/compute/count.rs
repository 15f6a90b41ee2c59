use strata_error::{StrataResult, strata_bail, strata_err};
use strata_scalar::{Value, ValueRef};

use crate::compute::{ComputeFn, ComputeFnVTable, InvocationArgs, Output};
use crate::{BoolBlock, ValueBlock};

/// Count the `true` elements of a bitset block as an `Int64`.
pub fn count(bitset: &dyn ValueBlock) -> StrataResult<Value> {
    COUNT_FN
        .invoke(&InvocationArgs {
            inputs: &[bitset.into()],
        })?
        .unwrap_scalar()
}

/// `true` iff no element of the block equals `value`. Missing equals neither boolean.
pub fn none(block: &dyn ValueBlock, value: bool) -> StrataResult<Value> {
    NONE_FN
        .invoke(&InvocationArgs {
            inputs: &[block.into(), ValueRef::Boolean(value).into()],
        })?
        .unwrap_scalar()
}

struct Count;

impl ComputeFnVTable for Count {
    fn invoke<'a>(&self, args: &InvocationArgs<'_, 'a>) -> StrataResult<Output<'a>> {
        args.expect_arity(COUNT_FN.name(), 1)?;
        let bitset = BoolBlock::from_block(args.block(0)?);
        let count = i64::try_from(bitset.true_count())
            .map_err(|e| strata_err!(ComputeError: "count does not fit in int64: {}", e))?;
        Ok(Value::Int64(count).into())
    }
}

struct NoneOf;

impl ComputeFnVTable for NoneOf {
    fn invoke<'a>(&self, args: &InvocationArgs<'_, 'a>) -> StrataResult<Output<'a>> {
        args.expect_arity(NONE_FN.name(), 2)?;
        let block = BoolBlock::from_block(args.block(0)?);
        let Some(value) = args.scalar(1)?.as_bool() else {
            strata_bail!(MismatchedTypes: "bool", args.scalar(1)?.tag());
        };

        let matches = if value {
            block.true_count()
        } else {
            block.false_count()
        };
        Ok(Value::Boolean(matches == 0).into())
    }
}

pub static COUNT_FN: ComputeFn = ComputeFn::new("valueBlockCount", &Count);
pub static NONE_FN: ComputeFn = ComputeFn::new("valueBlockNone", &NoneOf);

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::HeterogeneousBlock;

    #[rstest]
    #[case(vec![false, false, false, false, false, false], 0)]
    #[case(vec![true, false, true, true, false, true], 4)]
    #[case(vec![true, true, true, true, true, true], 6)]
    fn count_bits(#[case] bits: Vec<bool>, #[case] expected: i64) {
        let bitset = BoolBlock::from_iter(bits);
        assert_eq!(count(&bitset).unwrap(), Value::Int64(expected));
    }

    #[test]
    fn count_ignores_missing_and_non_booleans() {
        let bitset: HeterogeneousBlock = [
            Value::Boolean(true),
            Value::Missing,
            Value::Int32(1),
            Value::Boolean(true),
        ]
        .into_iter()
        .collect();
        assert_eq!(count(&bitset).unwrap(), Value::Int64(2));
    }

    #[rstest]
    #[case(vec![Some(true), Some(false), Some(true), Some(false)], true, false)]
    #[case(vec![Some(false), Some(false), Some(false), Some(false)], true, true)]
    #[case(vec![Some(true), None], false, true)]
    #[case(vec![None, Some(false)], false, false)]
    #[case(vec![], true, true)]
    fn none_matches(
        #[case] bits: Vec<Option<bool>>,
        #[case] value: bool,
        #[case] expected: bool,
    ) {
        let block = BoolBlock::from_iter(bits);
        assert_eq!(none(&block, value).unwrap(), Value::Boolean(expected));
    }
}
