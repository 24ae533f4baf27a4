use std::fmt::{self, Display, Formatter};

use crate::interval::Interval;
use crate::Error;

/// Axis-aligned cuboid of unit cells, the product of one closed interval
/// per axis.  Like `Interval` it is a plain value and is never empty.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cuboid {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Cuboid {
    pub fn new(x: (i64, i64), y: (i64, i64), z: (i64, i64)) -> Result<Cuboid, Error> {
        Ok(Cuboid {
            x: Interval::new('x', x.0, x.1)?,
            y: Interval::new('y', y.0, y.1)?,
            z: Interval::new('z', z.0, z.1)?,
        })
    }

    pub fn intersect(&self, other: &Cuboid) -> Option<Cuboid> {
        Some(Cuboid {
            x: self.x.intersect(&other.x)?,
            y: self.y.intersect(&other.y)?,
            z: self.z.intersect(&other.z)?,
        })
    }

    /// Number of unit cells covered.  A single cuboid can span up to
    /// 2^192 cells, so even the 128-bit product is checked.
    pub fn volume(&self) -> Result<u128, Error> {
        self.x
            .count_cells()
            .checked_mul(self.y.count_cells())
            .and_then(|xy| xy.checked_mul(self.z.count_cells()))
            .ok_or(Error::VolumeOverflow)
    }

    /// Disjoint partition of `self \ remove`, between 0 and 6 cuboids.
    ///
    /// The decomposition cuts one axis at a time in the fixed order x, y,
    /// z.  A slab lying outside `remove` on the current axis needs no
    /// further cutting, so it keeps the not-yet-processed axes of `self`
    /// unchanged; the slab overlapping `remove` on the current axis is
    /// narrowed to the overlap and carried into the next axis.  What is
    /// left after the z cut is inside `remove` on all three axes and is
    /// dropped.
    pub fn subtract(&self, remove: &Cuboid) -> Vec<Cuboid> {
        let common = match self.intersect(remove) {
            None => return vec![*self],
            Some(c) => c,
        };
        let mut pieces = Vec::with_capacity(6);
        if let Some(x) = self.x.complement_before(&remove.x) {
            pieces.push(Cuboid { x, ..*self });
        }
        if let Some(x) = self.x.complement_after(&remove.x) {
            pieces.push(Cuboid { x, ..*self });
        }
        if let Some(y) = self.y.complement_before(&remove.y) {
            pieces.push(Cuboid {
                x: common.x,
                y,
                z: self.z,
            });
        }
        if let Some(y) = self.y.complement_after(&remove.y) {
            pieces.push(Cuboid {
                x: common.x,
                y,
                z: self.z,
            });
        }
        if let Some(z) = self.z.complement_before(&remove.z) {
            pieces.push(Cuboid {
                x: common.x,
                y: common.y,
                z,
            });
        }
        if let Some(z) = self.z.complement_after(&remove.z) {
            pieces.push(Cuboid {
                x: common.x,
                y: common.y,
                z,
            });
        }
        pieces
    }
}

impl Display for Cuboid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "x={},y={},z={}", self.x, self.y, self.z)
    }
}

#[cfg(test)]
pub(crate) fn cube(x: (i64, i64), y: (i64, i64), z: (i64, i64)) -> Cuboid {
    Cuboid::new(x, y, z).expect("test cuboid should be valid")
}

#[cfg(test)]
pub(crate) fn pairwise_disjoint(cuboids: &[Cuboid]) -> bool {
    for (i, a) in cuboids.iter().enumerate() {
        for b in &cuboids[i + 1..] {
            if a.intersect(b).is_some() {
                return false;
            }
        }
    }
    true
}

#[test]
fn test_new_rejects_inverted_axis() {
    assert_eq!(
        Cuboid::new((0, 5), (3, 1), (0, 5)),
        Err(Error::InvalidRegion {
            axis: 'y',
            lo: 3,
            hi: 1
        })
    );
}

#[test]
fn test_intersect() {
    let a = cube((0, 10), (0, 10), (0, 10));
    let b = cube((5, 15), (-3, 2), (10, 20));
    assert_eq!(a.intersect(&b), Some(cube((5, 10), (0, 2), (10, 10))));
    // An empty intersection on any single axis empties the whole thing.
    let c = cube((5, 15), (-3, 2), (11, 20));
    assert_eq!(a.intersect(&c), None);
    assert_eq!(a.intersect(&a), Some(a));
}

#[test]
fn test_volume() {
    assert_eq!(cube((10, 12), (10, 12), (10, 12)).volume(), Ok(27));
    assert_eq!(cube((7, 7), (-2, -2), (0, 0)).volume(), Ok(1));
    assert_eq!(
        cube(
            (i64::MIN, i64::MAX),
            (i64::MIN, i64::MAX),
            (i64::MIN, i64::MAX)
        )
        .volume(),
        Err(Error::VolumeOverflow)
    );
}

#[test]
fn test_subtract_disjoint_is_identity() {
    let a = cube((0, 4), (0, 4), (0, 4));
    let b = cube((6, 9), (0, 4), (0, 4));
    assert_eq!(a.subtract(&b), vec![a]);
}

#[test]
fn test_subtract_covered_is_empty() {
    let a = cube((2, 3), (2, 3), (2, 3));
    let b = cube((0, 10), (0, 10), (2, 5));
    assert_eq!(a.subtract(&b), Vec::new());
    assert_eq!(a.subtract(&a), Vec::new());
}

#[test]
fn test_subtract_interior_hole_yields_six_pieces() {
    let a = cube((0, 10), (0, 10), (0, 10));
    let b = cube((4, 6), (4, 6), (4, 6));
    let pieces = a.subtract(&b);
    assert_eq!(pieces.len(), 6);
    assert!(pairwise_disjoint(&pieces));
    let total: u128 = pieces.iter().map(|p| p.volume().unwrap()).sum();
    assert_eq!(total, 11 * 11 * 11 - 27);
}

#[test]
fn test_subtract_corner_overlap() {
    let a = cube((0, 4), (0, 4), (0, 4));
    let b = cube((3, 8), (3, 8), (3, 8));
    let pieces = a.subtract(&b);
    assert_eq!(pieces.len(), 3);
    assert!(pairwise_disjoint(&pieces));
    let total: u128 = pieces.iter().map(|p| p.volume().unwrap()).sum();
    assert_eq!(total, 125 - 8);
}

/// volume(a) == volume(a ∩ b) + Σ volume(pieces of a \ b), and the pieces
/// together with a ∩ b are pairwise disjoint, over a grid of box pairs
/// covering every containment/overlap combination per axis.
#[test]
fn test_subtract_exactness() {
    let spans: &[(i64, i64)] = &[(0, 9), (2, 7), (-4, 1), (8, 15), (20, 22)];
    for &ax in spans {
        for &ay in spans {
            for &bx in spans {
                for &by in spans {
                    let a = cube(ax, ay, (0, 3));
                    let b = cube(bx, by, (2, 5));
                    let pieces = a.subtract(&b);
                    assert!(pieces.len() <= 6);
                    let outside: u128 =
                        pieces.iter().map(|p| p.volume().unwrap()).sum();
                    let inside = match a.intersect(&b) {
                        Some(c) => c.volume().unwrap(),
                        None => 0,
                    };
                    assert_eq!(
                        a.volume().unwrap(),
                        inside + outside,
                        "a={} b={}",
                        a,
                        b
                    );
                    let mut all = pieces.clone();
                    if let Some(c) = a.intersect(&b) {
                        all.push(c);
                    }
                    assert!(pairwise_disjoint(&all), "a={} b={}", a, b);
                    for piece in &pieces {
                        assert!(piece.intersect(&a).is_some());
                    }
                }
            }
        }
    }
}
