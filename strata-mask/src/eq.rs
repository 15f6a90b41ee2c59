use crate::Mask;

impl PartialEq for Mask {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Mask::Partial(lhs), Mask::Partial(rhs)) => lhs.bits() == rhs.bits(),
            // A partial mask never selects all or none of its rows.
            _ => self.len() == other.len() && self.true_count() == other.true_count(),
        }
    }
}

impl Eq for Mask {}

#[cfg(test)]
mod test {
    use arrow_buffer::BooleanBuffer;

    use crate::Mask;

    #[test]
    fn symbolic_equals_materialized() {
        assert_eq!(Mask::new_true(5), Mask::from_buffer(BooleanBuffer::new_set(5)));
        assert_eq!(Mask::new_false(5), Mask::from_buffer(BooleanBuffer::new_unset(5)));
        assert_ne!(Mask::new_true(5), Mask::new_true(4));
        assert_ne!(Mask::new_true(0), Mask::new_false(1));
    }

    #[test]
    fn partial_masks_compare_bits() {
        assert_eq!(
            Mask::from_iter([true, false, true]),
            Mask::from_buffer(BooleanBuffer::from_iter([true, false, true]))
        );
        assert_ne!(
            Mask::from_iter([true, false, true]),
            Mask::from_iter([true, true, false])
        );
        assert_ne!(Mask::from_iter([true, false]), Mask::new_true(2));
    }
}
