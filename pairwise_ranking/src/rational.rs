use std::cmp::Ordering;
use std::fmt::Display;

use crate::config::*;

/// A non-negative fraction, compared exactly.
///
/// The fraction is not reduced: `2/4` and `1/2` are two different
/// representations of the same value, and compare as equal. Comparisons are
/// done by cross-multiplication in 128 bits, which cannot overflow for 64-bit
/// numerators and denominators.
#[derive(Debug, Clone, Copy)]
pub struct Ratio {
    numerator: u64,
    denominator: u64,
}

impl Ratio {
    pub fn new(numerator: u64, denominator: u64) -> Result<Ratio, RankingError> {
        if denominator == 0 {
            return ZeroDenominatorSnafu { numerator }.fail();
        }
        Ok(Ratio {
            numerator,
            denominator,
        })
    }

    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    /// Only for display purposes. Never use it to compare scores.
    pub fn to_f64(&self) -> f64 {
        (self.numerator as f64) / (self.denominator as f64)
    }
}

impl Ord for Ratio {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = (self.numerator as u128) * (other.denominator as u128);
        let rhs = (other.numerator as u128) * (self.denominator as u128);
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for Ratio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ratio {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ratio {}

impl Display for Ratio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: u64, d: u64) -> Ratio {
        Ratio::new(n, d).unwrap()
    }

    #[test]
    fn ordering_by_cross_multiplication() {
        assert!(r(1, 3) < r(1, 2));
        assert_eq!(r(2, 4), r(1, 2));
        assert!(r(0, 1) < r(1, 1));
        assert_eq!(r(0, 5), r(0, 1));
        assert_eq!(r(2, 4).cmp(&r(1, 2)), Ordering::Equal);
    }

    #[test]
    fn zero_denominator() {
        let e = Ratio::new(3, 0).unwrap_err();
        assert_eq!(e, RankingError::ZeroDenominator { numerator: 3 });
        assert_eq!(e.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn near_equal_ratios() {
        // Both round to the same f64.
        let a = r(u64::MAX - 1, u64::MAX);
        let b = r(u64::MAX - 2, u64::MAX - 1);
        assert_eq!(a.to_f64(), b.to_f64());
        assert!(a > b);
    }

    #[test]
    fn display() {
        assert_eq!(r(2, 4).to_string(), "2/4");
    }
}
