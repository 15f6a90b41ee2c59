use strata_error::StrataResult;

use crate::compute::{ComputeFn, ComputeFnVTable, InvocationArgs, Output};
use crate::{BoolBlock, ValueBlock};

/// Point-wise logical _not_. Any element that is not `true` counts as `false` and so inverts to
/// `true`.
pub fn logical_not(block: &dyn ValueBlock) -> StrataResult<BoolBlock> {
    LOGICAL_NOT_FN
        .invoke(&InvocationArgs {
            inputs: &[block.into()],
        })?
        .unwrap_bool()
}

struct Invert;

impl ComputeFnVTable for Invert {
    fn invoke<'a>(&self, args: &InvocationArgs<'_, 'a>) -> StrataResult<Output<'a>> {
        args.expect_arity(LOGICAL_NOT_FN.name(), 1)?;
        let mask = BoolBlock::from_block(args.block(0)?).to_mask();
        Ok(BoolBlock::from_mask(&!mask).into())
    }
}

pub static LOGICAL_NOT_FN: ComputeFn = ComputeFn::new("valueBlockLogicalNot", &Invert);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invert() {
        let block = BoolBlock::from_iter([true, false, true, false]);
        assert_eq!(
            logical_not(&block).unwrap(),
            BoolBlock::from_iter([false, true, false, true])
        );
    }

    #[test]
    fn invert_missing() {
        let block = BoolBlock::from_iter([Some(true), None]);
        assert_eq!(
            logical_not(&block).unwrap(),
            BoolBlock::from_iter([false, true])
        );
    }
}
