use strata_error::StrataResult;

use crate::compute::{ComputeFn, ComputeFnVTable, InvocationArgs, Output, check_same_len};
use crate::{BoolBlock, ValueBlock};

/// Point-wise logical _and_ of two blocks. Any element that is not `true` counts as `false`, so
/// the result has no Missing elements.
pub fn logical_and(lhs: &dyn ValueBlock, rhs: &dyn ValueBlock) -> StrataResult<BoolBlock> {
    LOGICAL_AND_FN
        .invoke(&InvocationArgs {
            inputs: &[lhs.into(), rhs.into()],
        })?
        .unwrap_bool()
}

/// Point-wise logical _or_ of two blocks. Any element that is not `true` counts as `false`.
pub fn logical_or(lhs: &dyn ValueBlock, rhs: &dyn ValueBlock) -> StrataResult<BoolBlock> {
    LOGICAL_OR_FN
        .invoke(&InvocationArgs {
            inputs: &[lhs.into(), rhs.into()],
        })?
        .unwrap_bool()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOperator {
    And,
    Or,
}

impl BooleanOperator {
    fn name(self) -> &'static str {
        match self {
            BooleanOperator::And => "valueBlockLogicalAnd",
            BooleanOperator::Or => "valueBlockLogicalOr",
        }
    }
}

struct Boolean(BooleanOperator);

impl ComputeFnVTable for Boolean {
    fn invoke<'a>(&self, args: &InvocationArgs<'_, 'a>) -> StrataResult<Output<'a>> {
        let name = self.0.name();
        args.expect_arity(name, 2)?;
        let lhs = args.block(0)?;
        let rhs = args.block(1)?;
        check_same_len(name, lhs.len(), rhs.len())?;

        let lhs = BoolBlock::from_block(lhs).to_mask();
        let rhs = BoolBlock::from_block(rhs).to_mask();
        let result = match self.0 {
            BooleanOperator::And => &lhs & &rhs,
            BooleanOperator::Or => &lhs | &rhs,
        };
        Ok(BoolBlock::from_mask(&result).into())
    }
}

pub static LOGICAL_AND_FN: ComputeFn = ComputeFn::new(
    "valueBlockLogicalAnd",
    &Boolean(BooleanOperator::And),
);
pub static LOGICAL_OR_FN: ComputeFn =
    ComputeFn::new("valueBlockLogicalOr", &Boolean(BooleanOperator::Or));
