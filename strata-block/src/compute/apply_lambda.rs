use strata_error::{StrataResult, strata_bail};
use strata_scalar::{Value, ValueRef};

use crate::compute::{ComputeFn, ComputeFnVTable, Input, InvocationArgs, Output, check_same_len};
use crate::{BoolBlock, HeterogeneousBlock, ValueBlock};

/// A scalar function evaluated on one value at a time, such as a compiled lambda expression.
pub trait ScalarFn {
    fn call(&self, value: ValueRef<'_>) -> StrataResult<Value>;
}

impl<F> ScalarFn for F
where
    F: Fn(ValueRef<'_>) -> StrataResult<Value>,
{
    fn call(&self, value: ValueRef<'_>) -> StrataResult<Value> {
        self(value)
    }
}

impl<'a> From<&'a dyn ScalarFn> for Input<'a> {
    fn from(lambda: &'a dyn ScalarFn) -> Self {
        Input::Lambda(lambda)
    }
}

/// Map `lambda` over `values`.
///
/// Without a mask the function sees every element, Missing ones included. With a mask it is only
/// invoked where the mask is `true`; every other position of the result is Missing.
pub fn apply_lambda<'a>(
    mask: Option<&'a dyn ValueBlock>,
    values: &'a dyn ValueBlock,
    lambda: &'a dyn ScalarFn,
) -> StrataResult<HeterogeneousBlock<'a>> {
    let mask = mask.map_or(Input::Scalar(ValueRef::Missing), Input::Block);
    APPLY_LAMBDA_FN
        .invoke(&InvocationArgs {
            inputs: &[mask, values.into(), lambda.into()],
        })?
        .unwrap_values()
}

struct ApplyLambda;

impl ComputeFnVTable for ApplyLambda {
    fn invoke<'a>(&self, args: &InvocationArgs<'_, 'a>) -> StrataResult<Output<'a>> {
        args.expect_arity(APPLY_LAMBDA_FN.name(), 3)?;
        let values = args.block(1)?;
        let lambda = args.lambda(2)?;

        let mask = match args.inputs[0] {
            Input::Scalar(ValueRef::Missing) => None,
            Input::Block(mask) => {
                check_same_len(APPLY_LAMBDA_FN.name(), values.len(), mask.len())?;
                Some(BoolBlock::from_block(mask).to_mask())
            }
            Input::Scalar(other) => strata_bail!(
                "{} mask must be a block or missing, found {}",
                APPLY_LAMBDA_FN.name(),
                other.tag()
            ),
            _ => strata_bail!("{} mask must be a block or missing", APPLY_LAMBDA_FN.name()),
        };

        let values = values.extract();
        let mut result = HeterogeneousBlock::with_capacity(values.count());
        match mask {
            None => {
                for value in values.iter() {
                    result.push(lambda.call(value)?);
                }
            }
            Some(mask) => {
                for (idx, value) in values.iter().enumerate() {
                    if mask.value(idx) {
                        result.push(lambda.call(value)?);
                    } else {
                        result.push_view(ValueRef::Missing);
                    }
                }
            }
        }
        Ok(result.into())
    }
}

pub static APPLY_LAMBDA_FN: ComputeFn = ComputeFn::new("valueBlockApplyLambda", &ApplyLambda);

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn double(value: ValueRef<'_>) -> StrataResult<Value> {
        Ok(match value {
            ValueRef::Int32(v) => Value::Int32(v * 2),
            _ => Value::Missing,
        })
    }

    fn values() -> HeterogeneousBlock<'static> {
        [
            Value::Int32(42),
            Value::Int32(43),
            Value::Int32(44),
            Value::Missing,
            Value::Int32(46),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn unmasked() {
        let values = values();
        let result = apply_lambda(None, &values, &double).unwrap();
        assert_eq!(
            result.extract().as_slice(),
            &[
                ValueRef::Int32(84),
                ValueRef::Int32(86),
                ValueRef::Int32(88),
                ValueRef::Missing,
                ValueRef::Int32(92),
            ]
        );
    }

    #[test]
    fn masked() {
        let values = values();
        let mask = BoolBlock::from_iter([true, false, true, true, false]);
        let calls = Cell::new(0);
        let counting = |value: ValueRef<'_>| {
            calls.set(calls.get() + 1);
            double(value)
        };

        let result = apply_lambda(Some(&mask), &values, &counting).unwrap();
        assert_eq!(
            result.extract().as_slice(),
            &[
                ValueRef::Int32(84),
                ValueRef::Missing,
                ValueRef::Int32(88),
                ValueRef::Missing,
                ValueRef::Missing,
            ]
        );
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn mask_length_mismatch() {
        let values = values();
        let mask = BoolBlock::from_iter([true]);
        assert!(apply_lambda(Some(&mask), &values, &double).is_err());
    }

    #[test]
    fn lambda_errors_propagate() {
        let values = values();
        let failing = |_: ValueRef<'_>| -> StrataResult<Value> { strata_bail!("boom") };
        assert!(apply_lambda(None, &values, &failing).is_err());
    }
}
