//! Blocks of tagged values and the vectorized operators that evaluate them.
//!
//! A [`ValueBlock`] is a fixed-length run of values processed as a unit. [`HeterogeneousBlock`]
//! holds arbitrary values, [`BoolBlock`] packs booleans into bits and serves as the filter
//! argument of most operators, and [`CellBlock`] pairs raw values with the run markers that group
//! them into cells. The operators live in [`compute`].

mod block;
mod blocks;
pub mod compute;

pub use block::*;
pub use blocks::*;
