use std::iter;

use crate::Mask;

impl Mask {
    /// Call `f` with an iterator over one bit per row.
    ///
    /// The iterator type depends on the variant, so it is lent to a closure rather than boxed.
    pub fn iter_bools<F, T>(&self, mut f: F) -> T
    where
        F: FnMut(&mut dyn Iterator<Item = bool>) -> T,
    {
        match self {
            Mask::AllTrue(len) => f(&mut iter::repeat_n(true, *len)),
            Mask::AllFalse(len) => f(&mut iter::repeat_n(false, *len)),
            Mask::Partial(partial) => f(&mut partial.bits().iter()),
        }
    }
}
