use std::iter::{Fuse, FusedIterator};

use strata_error::StrataResult;

use crate::compute::{ComputeFn, ComputeFnVTable, InvocationArgs, Output, check_same_len};
use crate::{BoolBlock, CellBlock, ValueBlock};

/// Fold raw boolean values into one boolean per cell.
///
/// `values` holds one boolean per raw value of `cell`. Every run of raw values that makes up a
/// cell is reduced with logical _or_; elements that are not `true` count as `false`. With empty
/// position info each raw value is its own cell and the result is a copy of `values`.
pub fn fold_f(values: &dyn ValueBlock, cell: &CellBlock) -> StrataResult<BoolBlock> {
    FOLD_F_FN
        .invoke(&InvocationArgs {
            inputs: &[values.into(), cell.into()],
        })?
        .unwrap_bool()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FoldState {
    /// No run is open; the next marker starts one.
    Boundary,
    /// A run is open with the _or_ of its values so far.
    Accumulating(bool),
}

/// Streams `(marker, value)` pairs into one folded value per run.
struct FoldRuns<I: Iterator> {
    input: Fuse<I>,
    state: FoldState,
}

impl<I: Iterator<Item = (u8, bool)>> FoldRuns<I> {
    fn new(input: I) -> Self {
        Self {
            input: input.fuse(),
            state: FoldState::Boundary,
        }
    }
}

impl<I: Iterator<Item = (u8, bool)>> Iterator for FoldRuns<I> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        loop {
            match (self.state, self.input.next()) {
                (FoldState::Boundary, None) => return None,
                (FoldState::Boundary, Some((_, value))) => {
                    self.state = FoldState::Accumulating(value);
                }
                (FoldState::Accumulating(acc), Some((1, value))) => {
                    self.state = FoldState::Accumulating(value);
                    return Some(acc);
                }
                (FoldState::Accumulating(acc), Some((_, value))) => {
                    self.state = FoldState::Accumulating(acc || value);
                }
                (FoldState::Accumulating(acc), None) => {
                    self.state = FoldState::Boundary;
                    return Some(acc);
                }
            }
        }
    }
}

impl<I: Iterator<Item = (u8, bool)>> FusedIterator for FoldRuns<I> {}

struct FoldF;

impl ComputeFnVTable for FoldF {
    fn invoke<'a>(&self, args: &InvocationArgs<'_, 'a>) -> StrataResult<Output<'a>> {
        args.expect_arity(FOLD_F_FN.name(), 2)?;
        let values = args.block(0)?;
        let cell = args.cell(1)?;

        let positions = cell.positions();
        if positions.is_empty() {
            return Ok(BoolBlock::from_block(values).into_owned().into());
        }
        check_same_len(FOLD_F_FN.name(), positions.len(), values.len())?;

        let mask = BoolBlock::from_block(values).to_mask();
        let folded = mask.iter_bools(|bits| {
            FoldRuns::new(positions.markers().iter().copied().zip(bits)).collect::<BoolBlock>()
        });
        Ok(folded.into())
    }
}

pub static FOLD_F_FN: ComputeFn = ComputeFn::new("cellFoldValues_F", &FoldF);
