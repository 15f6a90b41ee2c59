//! Tagged scalar values for block-oriented evaluation.
//!
//! A value is either owned ([`Value`]), in which case dropping it releases any heap payload, or a
//! view ([`ValueRef`]) that borrows the payload from its owner and is freely copyable. Converting
//! a view back into an owned value is always an explicit deep copy.

mod compare;
mod decimal;
mod display;
mod numeric;
mod small_string;
mod tag;
mod value;
mod value_ref;

pub use compare::*;
pub use decimal::*;
pub use numeric::*;
pub use small_string::*;
pub use tag::*;
pub use value::*;
pub use value_ref::*;
