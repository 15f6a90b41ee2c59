use std::iter::FusedIterator;
use std::ops::Range;

use strata_error::{StrataResult, strata_bail, strata_err};

use crate::ValueBlock;

/// Run metadata for a [`CellBlock`]: one marker per raw value, `1` opening a new cell and `0`
/// continuing the current one.
///
/// Empty position info means every raw value is its own cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PositionInfo(Vec<u8>);

impl PositionInfo {
    /// Validate a marker sequence: every marker is 0 or 1, and a non-empty sequence starts at 1.
    pub fn try_new(markers: Vec<u8>) -> StrataResult<Self> {
        if let Some(idx) = markers.iter().position(|&m| m > 1) {
            strata_bail!(
                "position info marker {} at index {} is neither 0 nor 1",
                markers[idx],
                idx
            );
        }
        if markers.first().is_some_and(|&m| m != 1) {
            strata_bail!("position info must start a new cell at index 0");
        }
        Ok(Self(markers))
    }

    /// Position info describing one raw value per cell.
    pub fn identity() -> Self {
        Self::default()
    }

    #[inline]
    pub fn markers(&self) -> &[u8] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw-value range covered by each cell, in order.
    pub fn runs(&self) -> Runs<'_> {
        Runs {
            markers: &self.0,
            pos: 0,
        }
    }
}

impl TryFrom<Vec<u8>> for PositionInfo {
    type Error = strata_error::StrataError;

    fn try_from(value: Vec<u8>) -> StrataResult<Self> {
        Self::try_new(value)
    }
}

/// Iterator over the raw-value ranges of the cells described by a [`PositionInfo`].
pub struct Runs<'a> {
    markers: &'a [u8],
    pos: usize,
}

impl Iterator for Runs<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.markers.len() {
            return None;
        }
        let start = self.pos;
        self.pos += 1;
        while self.pos < self.markers.len() && self.markers[self.pos] == 0 {
            self.pos += 1;
        }
        Some(start..self.pos)
    }
}

impl FusedIterator for Runs<'_> {}

/// A compressed block in which several raw values may collapse into one logical cell.
#[derive(Debug)]
pub struct CellBlock {
    values: Box<dyn ValueBlock>,
    positions: PositionInfo,
}

impl CellBlock {
    /// Pair raw values with their position info.
    ///
    /// Non-empty position info must carry exactly one marker per raw value.
    pub fn try_new(values: impl ValueBlock + 'static, positions: PositionInfo) -> StrataResult<Self> {
        if !positions.is_empty() && positions.len() != values.len() {
            return Err(strata_err!(MismatchedLengths: values.len(), positions.len())
                .with_context("cell position info must have one marker per raw value"));
        }
        Ok(Self {
            values: Box::new(values),
            positions,
        })
    }

    /// The flat raw values.
    pub fn values(&self) -> &dyn ValueBlock {
        self.values.as_ref()
    }

    pub fn positions(&self) -> &PositionInfo {
        &self.positions
    }

    /// The number of logical cells.
    pub fn cell_count(&self) -> usize {
        if self.positions.is_empty() {
            self.values.len()
        } else {
            self.positions.markers().iter().filter(|&&m| m == 1).count()
        }
    }
}
