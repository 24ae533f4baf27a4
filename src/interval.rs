use std::cmp::{max, min};
use std::fmt::{self, Display, Formatter};

use crate::Error;

/// Closed integer range `[lo, hi]` on one coordinate axis.
///
/// An `Interval` is never empty: `lo <= hi` always holds, and operations
/// whose result may be empty return `Option<Interval>` instead of some
/// sentinel range.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Interval {
    lo: i64,
    hi: i64,
}

impl Interval {
    /// `axis` only labels the error message.
    pub fn new(axis: char, lo: i64, hi: i64) -> Result<Interval, Error> {
        if lo <= hi {
            Ok(Interval { lo, hi })
        } else {
            Err(Error::InvalidRegion { axis, lo, hi })
        }
    }

    pub fn lo(&self) -> i64 {
        self.lo
    }

    pub fn hi(&self) -> i64 {
        self.hi
    }

    /// Number of unit cells covered; at least 1.  Computed in 128 bits
    /// because the full i64 span has 2^64 cells.
    pub fn count_cells(&self) -> u128 {
        (i128::from(self.hi) - i128::from(self.lo) + 1) as u128
    }

    pub fn intersect(&self, other: &Interval) -> Option<Interval> {
        let lo = max(self.lo, other.lo);
        let hi = min(self.hi, other.hi);
        if lo <= hi {
            Some(Interval { lo, hi })
        } else {
            None
        }
    }

    /// The part of `self` strictly below `other`.
    pub fn complement_before(&self, other: &Interval) -> Option<Interval> {
        // No room below other at i64::MIN.
        let hi = other.lo.checked_sub(1)?;
        if self.lo <= hi {
            Some(Interval { lo: self.lo, hi })
        } else {
            None
        }
    }

    /// The part of `self` strictly above `other`.
    pub fn complement_after(&self, other: &Interval) -> Option<Interval> {
        let lo = other.hi.checked_add(1)?;
        if lo <= self.hi {
            Some(Interval { lo, hi: self.hi })
        } else {
            None
        }
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.lo, self.hi)
    }
}

#[cfg(test)]
fn iv(lo: i64, hi: i64) -> Interval {
    Interval::new('x', lo, hi).expect("test interval should be valid")
}

#[test]
fn test_new_rejects_inverted_range() {
    assert_eq!(
        Interval::new('y', 10, 4),
        Err(Error::InvalidRegion {
            axis: 'y',
            lo: 10,
            hi: 4
        })
    );
    assert!(Interval::new('y', 4, 4).is_ok());
}

#[test]
fn test_intersect() {
    assert_eq!(iv(0, 10).intersect(&iv(5, 20)), Some(iv(5, 10)));
    assert_eq!(iv(5, 20).intersect(&iv(0, 10)), Some(iv(5, 10)));
    assert_eq!(iv(0, 10).intersect(&iv(3, 7)), Some(iv(3, 7)));
    assert_eq!(iv(0, 10).intersect(&iv(10, 12)), Some(iv(10, 10)));
    assert_eq!(iv(0, 10).intersect(&iv(11, 12)), None);
    assert_eq!(iv(-5, -1).intersect(&iv(0, 4)), None);
}

#[test]
fn test_complement_before() {
    assert_eq!(iv(0, 10).complement_before(&iv(4, 6)), Some(iv(0, 3)));
    assert_eq!(iv(4, 10).complement_before(&iv(4, 6)), None);
    assert_eq!(iv(5, 10).complement_before(&iv(4, 6)), None);
    // Nothing lies below an interval starting at i64::MIN.
    assert_eq!(
        iv(i64::MIN, 0).complement_before(&iv(i64::MIN, -5)),
        None
    );
}

#[test]
fn test_complement_after() {
    assert_eq!(iv(0, 10).complement_after(&iv(4, 6)), Some(iv(7, 10)));
    assert_eq!(iv(0, 6).complement_after(&iv(4, 6)), None);
    assert_eq!(iv(0, 5).complement_after(&iv(4, 6)), None);
    assert_eq!(iv(0, i64::MAX).complement_after(&iv(5, i64::MAX)), None);
}

#[test]
fn test_count_cells() {
    assert_eq!(iv(3, 3).count_cells(), 1);
    assert_eq!(iv(-2, 2).count_cells(), 5);
    assert_eq!(iv(i64::MIN, i64::MAX).count_cells(), 1u128 << 64);
}
