//! Integer Partitions and the Landau Function
//!
//! - Partition enumeration (largest part first, non-increasing)
//! - Exhaustive search for g(n), the maximum LCM over partitions of n
//! - Validation of caller-supplied partitions

pub mod enumerate;
pub mod solver;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use enumerate::{partitions, partitions_bounded, Partitions};
pub use solver::{
    checked_lcm_of, gcd, landau, landau_observed, landau_table, lcm, lcm_of, validate_partition,
};

/// An ordered sequence of positive part lengths, in seconds
///
/// Partitions produced by the search are non-increasing. Partitions supplied
/// by a caller keep whatever order they were given in, since that order
/// decides which slice of the input each part takes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Partition(Vec<u32>);

impl Partition {
    /// Wrap a list of parts
    pub fn new(parts: Vec<u32>) -> Self {
        Self(parts)
    }

    /// The parts in order
    #[inline]
    pub fn parts(&self) -> &[u32] {
        &self.0
    }

    /// Sum of all parts, widened so long partitions cannot overflow
    pub fn sum(&self) -> u64 {
        self.0.iter().map(|&p| u64::from(p)).sum()
    }

    /// Number of parts
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the empty partition of 0
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Unwrap into the underlying parts
    pub fn into_inner(self) -> Vec<u32> {
        self.0
    }
}

impl From<Vec<u32>> for Partition {
    fn from(parts: Vec<u32>) -> Self {
        Self(parts)
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", part)?;
        }
        write!(f, "]")
    }
}

/// The value g(n) together with the partition that attains it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandauResult {
    /// Input size in seconds
    pub n: u32,
    /// LCM of `partition`
    pub g_n: u64,
    /// Witnessing partition
    pub partition: Partition,
}
