mod bool;
mod cell;
mod heterogeneous;

pub use bool::*;
pub use cell::*;
pub use heterogeneous::*;
