use strata_error::StrataResult;

use crate::compute::{ComputeFn, ComputeFnVTable, InvocationArgs, Output};
use crate::{BoolBlock, ValueBlock};

/// Test every element for existence: `true` unless the element is Missing.
pub fn exists(block: &dyn ValueBlock) -> StrataResult<BoolBlock> {
    EXISTS_FN
        .invoke(&InvocationArgs {
            inputs: &[block.into()],
        })?
        .unwrap_bool()
}

struct Exists;

impl ComputeFnVTable for Exists {
    fn invoke<'a>(&self, args: &InvocationArgs<'_, 'a>) -> StrataResult<Output<'a>> {
        args.expect_arity(EXISTS_FN.name(), 1)?;
        let block = args.block(0)?;

        if let Some(bools) = block.as_bool_block() {
            return Ok(BoolBlock::from_mask(bools.validity()).into());
        }
        Ok(block
            .extract()
            .iter()
            .map(|v| !v.is_missing())
            .collect::<BoolBlock>()
            .into())
    }
}

pub static EXISTS_FN: ComputeFn = ComputeFn::new("valueBlockExists", &Exists);
