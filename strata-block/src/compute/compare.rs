use strata_error::StrataResult;
use strata_scalar::{Operator, ValueRef, scalar_cmp};

use crate::compute::{ComputeFn, ComputeFnVTable, InvocationArgs, Output};
use crate::{BoolBlock, ValueBlock};

/// Compare every element of `values` against one scalar.
///
/// Element `i` of the result is exactly what the row-wise comparison of `values[i]` with `scalar`
/// returns, so Missing operands and values of different type classes produce Missing.
pub fn compare_scalar(
    values: &dyn ValueBlock,
    scalar: ValueRef<'_>,
    operator: Operator,
) -> StrataResult<BoolBlock> {
    let compute = match operator {
        Operator::Eq => &EQ_SCALAR_FN,
        Operator::NotEq => &NEQ_SCALAR_FN,
        Operator::Gt => &GT_SCALAR_FN,
        Operator::Gte => &GTE_SCALAR_FN,
        Operator::Lt => &LT_SCALAR_FN,
        Operator::Lte => &LTE_SCALAR_FN,
    };
    compute
        .invoke(&InvocationArgs {
            inputs: &[values.into(), scalar.into()],
        })?
        .unwrap_bool()
}

struct CompareScalar {
    name: &'static str,
    operator: Operator,
}

impl ComputeFnVTable for CompareScalar {
    fn invoke<'a>(&self, args: &InvocationArgs<'_, 'a>) -> StrataResult<Output<'a>> {
        args.expect_arity(self.name, 2)?;
        let values = args.block(0)?;
        let scalar = args.scalar(1)?;

        if scalar.is_missing() {
            return Ok(BoolBlock::new_fill(None, values.len()).into());
        }

        Ok(values
            .extract()
            .iter()
            .map(|value| scalar_cmp(value, scalar, self.operator).as_bool())
            .collect::<BoolBlock>()
            .into())
    }
}

pub static GT_SCALAR_FN: ComputeFn = ComputeFn::new(
    "valueBlockGtScalar",
    &CompareScalar {
        name: "valueBlockGtScalar",
        operator: Operator::Gt,
    },
);
pub static GTE_SCALAR_FN: ComputeFn = ComputeFn::new(
    "valueBlockGteScalar",
    &CompareScalar {
        name: "valueBlockGteScalar",
        operator: Operator::Gte,
    },
);
pub static LT_SCALAR_FN: ComputeFn = ComputeFn::new(
    "valueBlockLtScalar",
    &CompareScalar {
        name: "valueBlockLtScalar",
        operator: Operator::Lt,
    },
);
pub static LTE_SCALAR_FN: ComputeFn = ComputeFn::new(
    "valueBlockLteScalar",
    &CompareScalar {
        name: "valueBlockLteScalar",
        operator: Operator::Lte,
    },
);
pub static EQ_SCALAR_FN: ComputeFn = ComputeFn::new(
    "valueBlockEqScalar",
    &CompareScalar {
        name: "valueBlockEqScalar",
        operator: Operator::Eq,
    },
);
pub static NEQ_SCALAR_FN: ComputeFn = ComputeFn::new(
    "valueBlockNeqScalar",
    &CompareScalar {
        name: "valueBlockNeqScalar",
        operator: Operator::NotEq,
    },
);

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use strata_scalar::Value;

    use super::*;
    use crate::HeterogeneousBlock;

    fn test_values() -> Vec<Value> {
        vec![
            Value::Missing,
            Value::Boolean(false),
            Value::Boolean(true),
            Value::Int32(0),
            Value::Int32(1),
            Value::Int32(-1),
            Value::Int64(1),
            Value::Int64(i64::MAX),
            Value::Double(1.0),
            Value::Double(0.5),
            Value::Double(f64::NAN),
            Value::Double(f64::INFINITY),
            Value::parse_decimal("1").unwrap(),
            Value::parse_decimal("0.25").unwrap(),
            Value::string(""),
            Value::string("abc"),
            Value::string("abcdefgh"),
        ]
    }

    #[rstest]
    fn agrees_with_row_wise_comparison(
        #[values(
            Operator::Eq,
            Operator::NotEq,
            Operator::Gt,
            Operator::Gte,
            Operator::Lt,
            Operator::Lte
        )]
        operator: Operator,
    ) {
        let values = test_values();
        let block: HeterogeneousBlock = values.iter().cloned().collect();

        for scalar in &values {
            let result = compare_scalar(&block, scalar.as_view(), operator).unwrap();
            assert_eq!(result.len(), values.len());
            for (idx, value) in values.iter().enumerate() {
                let expected = scalar_cmp(value.as_view(), scalar.as_view(), operator);
                assert_eq!(
                    result.value(idx),
                    expected.as_bool(),
                    "{value} {operator} {scalar}"
                );
            }
        }
    }

    #[test]
    fn cross_numeric() {
        let block: HeterogeneousBlock = [
            Value::Int32(1),
            Value::Int64(2),
            Value::Double(3.0),
            Value::string("3"),
        ]
        .into_iter()
        .collect();
        let result = compare_scalar(&block, ValueRef::Double(2.0), Operator::Gte).unwrap();
        assert_eq!(
            result,
            BoolBlock::from_iter([Some(false), Some(true), Some(true), None])
        );
    }

    #[rstest]
    #[case(Operator::Eq, false)]
    #[case(Operator::Lt, true)]
    #[case(Operator::Gt, false)]
    fn decimal_against_tiny_double(#[case] operator: Operator, #[case] expected: bool) {
        let block: HeterogeneousBlock = [Value::parse_decimal("0").unwrap()].into_iter().collect();
        let result = compare_scalar(&block, ValueRef::Double(1e-30), operator).unwrap();
        assert_eq!(result.value(0), Some(expected));
    }
}
