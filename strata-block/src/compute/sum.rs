use strata_error::StrataResult;
use strata_scalar::{NumericAccumulator, Value};

use crate::compute::{ComputeFn, ComputeFnVTable, InvocationArgs, Output, check_same_len};
use crate::{BoolBlock, ValueBlock};

/// Sum the values selected by a bitset.
///
/// Element `i` contributes iff `bitset[i]` is `true` and `values[i]` is a number. The total is
/// promoted along `Int32 < Int64 < Double < Decimal` to the widest contributor, and integer
/// overflow widens rather than wraps. A decimal total absorbs NaN and infinite doubles instead
/// of failing. With no contributors the sum is Missing.
pub fn sum(bitset: &dyn ValueBlock, values: &dyn ValueBlock) -> StrataResult<Value> {
    SUM_FN
        .invoke(&InvocationArgs {
            inputs: &[bitset.into(), values.into()],
        })?
        .unwrap_scalar()
}

struct Sum;

impl ComputeFnVTable for Sum {
    fn invoke<'a>(&self, args: &InvocationArgs<'_, 'a>) -> StrataResult<Output<'a>> {
        args.expect_arity(SUM_FN.name(), 2)?;
        let bitset = args.block(0)?;
        let values = args.block(1)?;
        check_same_len(SUM_FN.name(), bitset.len(), values.len())?;

        let mask = BoolBlock::from_block(bitset).to_mask();
        if mask.all_false() {
            return Ok(Value::Missing.into());
        }

        let values = values.extract();
        let mut total: Option<NumericAccumulator> = None;
        mask.iter_bools(|selected| {
            for (value, _) in values.iter().zip(selected).filter(|(_, s)| *s) {
                match total.as_mut() {
                    Some(total) => total.add(value),
                    None => total = NumericAccumulator::new(value),
                }
            }
        });

        Ok(total.map_or(Value::Missing, NumericAccumulator::into_value).into())
    }
}

pub static SUM_FN: ComputeFn = ComputeFn::new("valueBlockSum", &Sum);
