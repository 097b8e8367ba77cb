//! Landau function search
//!
//! g(n) is found by brute force: every partition of n is visited and its LCM
//! computed in full. Only a strictly greater LCM replaces the best so far, so
//! among tied partitions the first one in enumeration order wins.

use super::enumerate::partitions;
use super::{LandauResult, Partition};
use crate::error::{LandauError, Result};
use crate::observer::{LoopEvent, LoopObserver, NoopObserver};

/// Greatest common divisor (Euclid)
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Least common multiple of two values
///
/// `lcm(0, x)` is 0. Overflows past `u64::MAX` are not checked; use
/// [`checked_lcm_of`] for untrusted input.
#[inline]
pub fn lcm(a: u64, b: u64) -> u64 {
    if a == 0 || b == 0 {
        return 0;
    }
    a / gcd(a, b) * b
}

/// LCM of a list, folding from 1 (so the empty list gives 1)
pub fn lcm_of(parts: &[u32]) -> u64 {
    parts.iter().fold(1, |acc, &p| lcm(acc, u64::from(p)))
}

/// LCM of a list, or `None` if it does not fit in a `u64`
pub fn checked_lcm_of(parts: &[u32]) -> Option<u64> {
    parts.iter().try_fold(1u64, |acc, &p| {
        let p = u64::from(p);
        if acc == 0 || p == 0 {
            return Some(0);
        }
        (acc / gcd(acc, p)).checked_mul(p)
    })
}

/// Find g(n) and the first partition attaining it
///
/// # Example
/// ```
/// let result = landau::partition::landau(12);
/// assert_eq!(result.g_n, 60);
/// assert_eq!(result.partition.parts(), &[5, 4, 3]);
/// ```
pub fn landau(n: u32) -> LandauResult {
    landau_observed(n, &mut NoopObserver)
}

/// [`landau`], reporting every improvement to `observer`
///
/// The LCM of any partition this search can finish enumerating fits easily
/// in a `u64`, so the unchecked [`lcm_of`] is used here.
pub fn landau_observed(n: u32, observer: &mut dyn LoopObserver) -> LandauResult {
    let mut best_lcm = 0;
    let mut best_partition = Vec::new();

    for partition in partitions(n) {
        let value = lcm_of(&partition);
        if value > best_lcm {
            observer.on_event(&LoopEvent::SearchImproved {
                partition: &partition,
                lcm: value,
            });
            best_lcm = value;
            best_partition = partition;
        }
    }

    LandauResult {
        n,
        g_n: best_lcm,
        partition: Partition::new(best_partition),
    }
}

/// Check a caller-supplied partition of `n` and compute its LCM
///
/// The partition is not required to be optimal or sorted. It must sum to
/// `n` and every part must be positive.
///
/// # Errors
/// * `PartitionMismatch` - the parts do not add up to `n`
/// * `ZeroPart` - a part is zero seconds long
/// * `LcmOverflow` - the LCM does not fit in a `u64`
pub fn validate_partition(n: u32, partition: &Partition) -> Result<LandauResult> {
    let sum = partition.sum();
    if sum != u64::from(n) {
        return Err(LandauError::PartitionMismatch {
            partition: partition.parts().to_vec(),
            sum,
            n,
        });
    }

    if partition.parts().contains(&0) {
        return Err(LandauError::ZeroPart {
            partition: partition.parts().to_vec(),
        });
    }

    let g_n = checked_lcm_of(partition.parts()).ok_or_else(|| LandauError::LcmOverflow {
        partition: partition.parts().to_vec(),
    })?;

    Ok(LandauResult {
        n,
        g_n,
        partition: partition.clone(),
    })
}

/// g(n) for every n in `0..=max_n`
pub fn landau_table(max_n: u32) -> Vec<LandauResult> {
    (0..=max_n).map(landau).collect()
}
