use std::ops::{BitAnd, BitOr, Not};

use strata_error::strata_panic;

use crate::Mask;

fn check_len(lhs: &Mask, rhs: &Mask) {
    if lhs.len() != rhs.len() {
        strata_panic!(
            "Masks must have the same length, got {} and {}",
            lhs.len(),
            rhs.len()
        );
    }
}

/// Rows selected by both masks.
impl BitAnd for &Mask {
    type Output = Mask;

    fn bitand(self, rhs: Self) -> Mask {
        check_len(self, rhs);
        match (self, rhs) {
            (Mask::AllFalse(len), _) | (_, Mask::AllFalse(len)) => Mask::AllFalse(*len),
            (Mask::AllTrue(_), other) | (other, Mask::AllTrue(_)) => other.clone(),
            (Mask::Partial(lhs), Mask::Partial(rhs)) => Mask::from_buffer(lhs.bits() & rhs.bits()),
        }
    }
}

/// Rows selected by either mask.
impl BitOr for &Mask {
    type Output = Mask;

    fn bitor(self, rhs: Self) -> Mask {
        check_len(self, rhs);
        match (self, rhs) {
            (Mask::AllTrue(len), _) | (_, Mask::AllTrue(len)) => Mask::AllTrue(*len),
            (Mask::AllFalse(_), other) | (other, Mask::AllFalse(_)) => other.clone(),
            (Mask::Partial(lhs), Mask::Partial(rhs)) => Mask::from_buffer(lhs.bits() | rhs.bits()),
        }
    }
}

/// Rows not selected by the mask.
impl Not for &Mask {
    type Output = Mask;

    fn not(self) -> Mask {
        match self {
            Mask::AllTrue(len) => Mask::AllFalse(*len),
            Mask::AllFalse(len) => Mask::AllTrue(*len),
            Mask::Partial(partial) => Mask::from_buffer(!partial.bits()),
        }
    }
}

impl Not for Mask {
    type Output = Mask;

    fn not(self) -> Mask {
        !&self
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use crate::Mask;

    fn mask(bits: &[bool]) -> Mask {
        bits.iter().copied().collect()
    }

    #[rstest]
    #[case(&[true, false, true, false], &[true, true, false, false], &[true, false, false, false])]
    #[case(&[true, true, true], &[true, false, true], &[true, false, true])]
    #[case(&[false, false], &[true, false], &[false, false])]
    fn and(#[case] lhs: &[bool], #[case] rhs: &[bool], #[case] expected: &[bool]) {
        assert_eq!(&mask(lhs) & &mask(rhs), mask(expected));
        assert_eq!(&mask(rhs) & &mask(lhs), mask(expected));
    }

    #[rstest]
    #[case(&[true, false, true, false], &[true, true, false, false], &[true, true, true, false])]
    #[case(&[false, false, false], &[true, false, true], &[true, false, true])]
    #[case(&[true, true], &[true, false], &[true, true])]
    fn or(#[case] lhs: &[bool], #[case] rhs: &[bool], #[case] expected: &[bool]) {
        assert_eq!(&mask(lhs) | &mask(rhs), mask(expected));
        assert_eq!(&mask(rhs) | &mask(lhs), mask(expected));
    }

    #[test]
    fn not() {
        assert_eq!(!Mask::new_true(4), Mask::new_false(4));
        assert_eq!(!Mask::new_false(4), Mask::new_true(4));
        assert_eq!(
            !mask(&[true, false, true, false]),
            mask(&[false, true, false, true])
        );
    }

    #[test]
    #[should_panic(expected = "Masks must have the same length")]
    fn length_mismatch() {
        let _ = &Mask::new_true(2) & &Mask::new_true(3);
    }
}
