use std::cmp::Ordering;

use strata_error::StrataResult;
use strata_scalar::{Value, ValueRef, total_cmp};

use crate::compute::{ComputeFn, ComputeFnVTable, InvocationArgs, Output, check_same_len};
use crate::{BoolBlock, ValueBlock};

/// The smallest value selected by a bitset, under the canonical total order.
///
/// Missing and filtered-out elements are ignored; ties keep the earliest element. With nothing
/// selected the result is Missing. The result is a deep copy independent of `values`.
pub fn min(bitset: &dyn ValueBlock, values: &dyn ValueBlock) -> StrataResult<Value> {
    MIN_FN
        .invoke(&InvocationArgs {
            inputs: &[bitset.into(), values.into()],
        })?
        .unwrap_scalar()
}

/// The largest value selected by a bitset. See [`min`].
pub fn max(bitset: &dyn ValueBlock, values: &dyn ValueBlock) -> StrataResult<Value> {
    MAX_FN
        .invoke(&InvocationArgs {
            inputs: &[bitset.into(), values.into()],
        })?
        .unwrap_scalar()
}

/// Reduces to a single extremum; `replace_on` is the ordering of a candidate against the current
/// extremum that makes the candidate win.
struct Extremum {
    name: &'static str,
    replace_on: Ordering,
}

impl ComputeFnVTable for Extremum {
    fn invoke<'a>(&self, args: &InvocationArgs<'_, 'a>) -> StrataResult<Output<'a>> {
        args.expect_arity(self.name, 2)?;
        let bitset = args.block(0)?;
        let values = args.block(1)?;
        check_same_len(self.name, bitset.len(), values.len())?;

        let mask = BoolBlock::from_block(bitset).to_mask();
        let values = values.extract();
        let best = mask.iter_bools(|selected| {
            let mut best: Option<ValueRef<'a>> = None;
            for (value, _) in values.iter().zip(selected).filter(|(_, s)| *s) {
                if value.is_missing() {
                    continue;
                }
                if best.is_none_or(|current| total_cmp(value, current) == self.replace_on) {
                    best = Some(value);
                }
            }
            best
        });

        Ok(best.map_or(Value::Missing, ValueRef::to_value).into())
    }
}

pub static MIN_FN: ComputeFn = ComputeFn::new(
    "valueBlockMin",
    &Extremum {
        name: "valueBlockMin",
        replace_on: Ordering::Less,
    },
);
pub static MAX_FN: ComputeFn = ComputeFn::new(
    "valueBlockMax",
    &Extremum {
        name: "valueBlockMax",
        replace_on: Ordering::Greater,
    },
);

#[cfg(test)]
mod tests {
    use strata_scalar::TypeTag;

    use super::*;
    use crate::HeterogeneousBlock;

    #[test]
    fn min_max_shallow() {
        let values: HeterogeneousBlock = [
            Value::Int32(42),
            Value::Missing,
            Value::Int32(43),
            Value::Int32(40),
            Value::Missing,
            Value::Int32(41),
        ]
        .into_iter()
        .collect();
        let bitset = BoolBlock::from_iter([true, true, false, false, true, true]);

        assert_eq!(min(&bitset, &values).unwrap(), Value::Int32(41));
        assert_eq!(max(&bitset, &values).unwrap(), Value::Int32(42));
    }

    #[test]
    fn min_max_deep() {
        let values: HeterogeneousBlock = [
            Value::string("zoom"),
            Value::Int32(42),
            Value::Int32(41),
            Value::Int32(40),
            Value::string("abcdefg"),
            Value::string("abcdefgh"),
            Value::string("abcdefghi"),
            Value::Missing,
        ]
        .into_iter()
        .collect();
        let bitset = BoolBlock::from_iter([false, true, true, false, true, true, false, true]);

        assert_eq!(min(&bitset, &values).unwrap(), Value::Int32(41));

        let max = max(&bitset, &values).unwrap();
        drop(values);
        assert_eq!(max.tag(), TypeTag::LongString);
        assert_eq!(max.as_str(), Some("abcdefgh"));
    }

    #[test]
    fn ties_keep_the_earlier_element() {
        let values: HeterogeneousBlock = [Value::Int64(7), Value::Int32(7), Value::Double(7.0)]
            .into_iter()
            .collect();
        let bitset = BoolBlock::from_iter([true, true, true]);
        assert_eq!(min(&bitset, &values).unwrap(), Value::Int64(7));
        assert_eq!(max(&bitset, &values).unwrap(), Value::Int64(7));
    }

    #[test]
    fn nothing_selected() {
        let values: HeterogeneousBlock = [Value::Int32(1), Value::Missing].into_iter().collect();
        let bitset = BoolBlock::from_iter([Some(false), Some(true)]);
        assert_eq!(min(&bitset, &values).unwrap(), Value::Missing);
        assert_eq!(max(&bitset, &values).unwrap(), Value::Missing);
    }
}
