//! Exact accounting of "on" unit cells under a sequence of axis-aligned
//! cuboid on/off instructions.
//!
//! Coordinate ranges make cell-by-cell bookkeeping infeasible (volumes can
//! reach ~10^18), so the engine instead maintains a collection of
//! pairwise-disjoint cuboids covering the "on" region.  Turning a region
//! on or off decomposes the affected cuboids into disjoint pieces; the
//! final count is just the sum of per-cuboid volumes.

use std::error;
use std::fmt::{self, Display, Formatter};

pub mod cuboid;
pub mod instruction;
pub mod interval;
pub mod set;

pub use cuboid::Cuboid;
pub use instruction::{Instruction, Op};
pub use interval::Interval;
pub use set::DisjointCuboidSet;

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// A malformed instruction line; carries the 1-based line number and
    /// the offending line.
    Parse {
        line_no: usize,
        line: String,
        reason: String,
    },
    /// A range with its lower bound above its upper bound.  Rejected at
    /// ingestion; such a range never reaches the engine.
    InvalidRegion { axis: char, lo: i64, hi: i64 },
    /// Volume accumulation exceeded the 128-bit accumulator.
    VolumeOverflow,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse {
                line_no,
                line,
                reason,
            } => {
                write!(f, "line {}: cannot parse '{}': {}", line_no, line, reason)
            }
            Error::InvalidRegion { axis, lo, hi } => {
                write!(
                    f,
                    "invalid {} range {}..{}: lower bound is above upper bound",
                    axis, lo, hi
                )
            }
            Error::VolumeOverflow => {
                f.write_str("total volume does not fit in a 128-bit accumulator")
            }
        }
    }
}

impl error::Error for Error {}
