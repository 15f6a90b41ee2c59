//! Operators over blocks.
//!
//! Every operator is a [`ComputeFn`] registered under the name the interpreter uses for it, so an
//! operator can be called either through its typed function (e.g. [`sum`]) or by name through
//! [`invoke`] with a list of [`Input`]s.
//!
//! Operators never mutate their inputs. Values that pass through unchanged are returned as views
//! borrowed from the inputs; values an operator creates are owned by the result.

use std::collections::HashMap;
use std::sync::LazyLock;

pub use apply_lambda::*;
pub use boolean::*;
pub use combine::*;
pub use compare::*;
pub use count::*;
pub use exists::*;
pub use fill::*;
pub use fill_empty::*;
pub use fold::*;
pub use invert::*;
pub use min_max::*;
use strata_error::{StrataResult, strata_bail, strata_err};
use strata_scalar::{TypeTag, Value, ValueRef};
pub use sum::*;

use crate::{BoolBlock, CellBlock, HeterogeneousBlock, ValueBlock};

mod apply_lambda;
mod boolean;
mod combine;
mod compare;
mod count;
mod exists;
mod fill;
mod fill_empty;
mod fold;
mod invert;
mod min_max;
mod sum;

/// A single argument to a compute function.
#[derive(Clone, Copy)]
pub enum Input<'a> {
    Scalar(ValueRef<'a>),
    Block(&'a dyn ValueBlock),
    Cell(&'a CellBlock),
    Lambda(&'a dyn ScalarFn),
}

impl<'a> Input<'a> {
    pub fn scalar(&self) -> Option<ValueRef<'a>> {
        match self {
            Input::Scalar(value) => Some(*value),
            _ => None,
        }
    }

    pub fn block(&self) -> Option<&'a dyn ValueBlock> {
        match self {
            Input::Block(block) => Some(*block),
            _ => None,
        }
    }

    pub fn cell(&self) -> Option<&'a CellBlock> {
        match self {
            Input::Cell(cell) => Some(*cell),
            _ => None,
        }
    }

    pub fn lambda(&self) -> Option<&'a dyn ScalarFn> {
        match self {
            Input::Lambda(lambda) => Some(*lambda),
            _ => None,
        }
    }

    /// The tag classifying this input. Nested blocks and cell blocks are tagged `Block` and
    /// `Cell`; lambdas have no tag.
    pub fn tag(&self) -> Option<TypeTag> {
        match self {
            Input::Scalar(value) => Some(value.tag()),
            Input::Block(_) => Some(TypeTag::Block),
            Input::Cell(_) => Some(TypeTag::Cell),
            Input::Lambda(_) => None,
        }
    }

    fn describe(&self) -> String {
        self.tag()
            .map_or_else(|| "lambda".to_string(), |tag| tag.to_string())
    }
}

impl<'a> From<ValueRef<'a>> for Input<'a> {
    fn from(value: ValueRef<'a>) -> Self {
        Input::Scalar(value)
    }
}

impl<'a> From<&'a Value> for Input<'a> {
    fn from(value: &'a Value) -> Self {
        Input::Scalar(value.as_view())
    }
}

impl<'a, B: ValueBlock> From<&'a B> for Input<'a> {
    fn from(block: &'a B) -> Self {
        Input::Block(block)
    }
}

impl<'a> From<&'a dyn ValueBlock> for Input<'a> {
    fn from(block: &'a dyn ValueBlock) -> Self {
        Input::Block(block)
    }
}

impl<'a> From<&'a CellBlock> for Input<'a> {
    fn from(cell: &'a CellBlock) -> Self {
        Input::Cell(cell)
    }
}

/// The result of a compute function. Blocks may borrow values from the inputs.
#[derive(Debug)]
pub enum Output<'a> {
    Scalar(Value),
    Bool(BoolBlock),
    Values(HeterogeneousBlock<'a>),
}

impl<'a> Output<'a> {
    pub fn unwrap_scalar(self) -> StrataResult<Value> {
        match self {
            Output::Scalar(value) => Ok(value),
            _ => strata_bail!("Expected a scalar output"),
        }
    }

    pub fn unwrap_bool(self) -> StrataResult<BoolBlock> {
        match self {
            Output::Bool(block) => Ok(block),
            _ => strata_bail!("Expected a bool block output"),
        }
    }

    pub fn unwrap_values(self) -> StrataResult<HeterogeneousBlock<'a>> {
        match self {
            Output::Values(block) => Ok(block),
            _ => strata_bail!("Expected a value block output"),
        }
    }

    /// The output as a block, or `None` if it is a scalar.
    pub fn as_block(&self) -> Option<&dyn ValueBlock> {
        match self {
            Output::Scalar(_) => None,
            Output::Bool(block) => Some(block),
            Output::Values(block) => Some(block),
        }
    }
}

impl From<Value> for Output<'_> {
    fn from(value: Value) -> Self {
        Output::Scalar(value)
    }
}

impl From<BoolBlock> for Output<'_> {
    fn from(block: BoolBlock) -> Self {
        Output::Bool(block)
    }
}

impl<'a> From<HeterogeneousBlock<'a>> for Output<'a> {
    fn from(block: HeterogeneousBlock<'a>) -> Self {
        Output::Values(block)
    }
}

/// The arguments of one compute function invocation.
pub struct InvocationArgs<'s, 'a> {
    pub inputs: &'s [Input<'a>],
}

impl<'a> InvocationArgs<'_, 'a> {
    /// Fail unless exactly `arity` inputs were passed.
    pub fn expect_arity(&self, name: &str, arity: usize) -> StrataResult<()> {
        if self.inputs.len() != arity {
            strata_bail!(
                "{} expects {} arguments, found {}",
                name,
                arity,
                self.inputs.len()
            );
        }
        Ok(())
    }

    fn input(&self, idx: usize) -> StrataResult<&Input<'a>> {
        self.inputs
            .get(idx)
            .ok_or_else(|| strata_err!(OutOfBounds: idx, 0, self.inputs.len()))
    }

    pub fn block(&self, idx: usize) -> StrataResult<&'a dyn ValueBlock> {
        let input = self.input(idx)?;
        input.block().ok_or_else(|| {
            strata_err!("Expected input {} to be a block, found {}", idx, input.describe())
        })
    }

    pub fn scalar(&self, idx: usize) -> StrataResult<ValueRef<'a>> {
        let input = self.input(idx)?;
        input.scalar().ok_or_else(|| {
            strata_err!("Expected input {} to be a scalar, found {}", idx, input.describe())
        })
    }

    pub fn cell(&self, idx: usize) -> StrataResult<&'a CellBlock> {
        let input = self.input(idx)?;
        input.cell().ok_or_else(|| {
            strata_err!("Expected input {} to be a cell block, found {}", idx, input.describe())
        })
    }

    pub fn lambda(&self, idx: usize) -> StrataResult<&'a dyn ScalarFn> {
        let input = self.input(idx)?;
        input.lambda().ok_or_else(|| {
            strata_err!("Expected input {} to be a lambda, found {}", idx, input.describe())
        })
    }
}

/// The implementation behind a [`ComputeFn`].
pub trait ComputeFnVTable: Send + Sync {
    fn invoke<'a>(&self, args: &InvocationArgs<'_, 'a>) -> StrataResult<Output<'a>>;
}

/// A named compute function.
pub struct ComputeFn {
    name: &'static str,
    vtable: &'static dyn ComputeFnVTable,
}

impl ComputeFn {
    pub const fn new(name: &'static str, vtable: &'static dyn ComputeFnVTable) -> Self {
        Self { name, vtable }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn invoke<'a>(&self, args: &InvocationArgs<'_, 'a>) -> StrataResult<Output<'a>> {
        log::trace!("Invoking {} with {} inputs", self.name, args.inputs.len());
        self.vtable.invoke(args)
    }
}

static REGISTRY: LazyLock<HashMap<&'static str, &'static ComputeFn>> = LazyLock::new(|| {
    [
        &EXISTS_FN,
        &FILL_EMPTY_FN,
        &FILL_EMPTY_BLOCK_FN,
        &COUNT_FN,
        &NONE_FN,
        &SUM_FN,
        &MIN_FN,
        &MAX_FN,
        &LOGICAL_AND_FN,
        &LOGICAL_OR_FN,
        &LOGICAL_NOT_FN,
        &APPLY_LAMBDA_FN,
        &GT_SCALAR_FN,
        &GTE_SCALAR_FN,
        &LT_SCALAR_FN,
        &LTE_SCALAR_FN,
        &EQ_SCALAR_FN,
        &NEQ_SCALAR_FN,
        &NEW_FILL_FN,
        &SIZE_FN,
        &COMBINE_FN,
        &FOLD_F_FN,
    ]
    .into_iter()
    .map(|compute| (compute.name(), compute))
    .collect()
});

/// Look up a compute function by the name the interpreter uses for it.
pub fn lookup(name: &str) -> Option<&'static ComputeFn> {
    REGISTRY.get(name).copied()
}

/// Invoke a compute function by name.
pub fn invoke<'a>(name: &str, args: &InvocationArgs<'_, 'a>) -> StrataResult<Output<'a>> {
    lookup(name)
        .ok_or_else(|| strata_err!(NotImplemented: name.to_string(), "strata-block"))?
        .invoke(args)
}

/// Fail unless two operands of an elementwise operator have the same length.
pub(crate) fn check_same_len(name: &str, expected: usize, actual: usize) -> StrataResult<()> {
    if expected != actual {
        log::debug!("{name} called with operands of length {expected} and {actual}");
        strata_bail!(MismatchedLengths: expected, actual);
    }
    Ok(())
}
