//! Capacity selection for the chained tables.
//!
//! Tables never pick an arbitrary capacity: every bucket count is one of the
//! primes below. Each entry is roughly twice its predecessor, so moving to
//! the next entry on growth gives amortized doubling. Some steps fall short
//! of a full 2x (53 -> 97); the table, not a multiplier, defines the curve.

use crate::error::Error;
use crate::error::Result;

/// Candidate capacities, strictly increasing.
pub const PRIMES: [usize; 30] = [
    2, 5, 11, 23, 53, 97, 193, 389, 769, 1543, 3079, 6151, 12289, 24593, 49157, 98317, 196613,
    393241, 786433, 1572869, 3145739, 6291469, 12582917, 25165843, 50331653, 100663319, 201326611,
    402653189, 805306457, 1610612741,
];

/// The largest capacity a table can reach. This is a hard ceiling.
pub const MAX_CAPACITY: usize = PRIMES[PRIMES.len() - 1];

/// Returns the smallest tabulated prime `>= requested` and its index in
/// [`PRIMES`].
///
/// # Errors
///
/// Returns [`Error::CapacityOverflow`] when `requested` is above
/// [`MAX_CAPACITY`]. The request is never clamped.
///
/// # Examples
///
/// ```rust
/// use entity_slots::primes::ceil_to_prime;
///
/// assert_eq!(ceil_to_prime(0), Ok((2, 0)));
/// assert_eq!(ceil_to_prime(11), Ok((11, 2)));
/// assert_eq!(ceil_to_prime(12), Ok((23, 3)));
/// assert!(ceil_to_prime(usize::MAX).is_err());
/// ```
pub fn ceil_to_prime(requested: usize) -> Result<(usize, usize)> {
    match PRIMES.binary_search(&requested) {
        Ok(index) => Ok((PRIMES[index], index)),
        Err(index) if index < PRIMES.len() => Ok((PRIMES[index], index)),
        Err(_) => Err(Error::CapacityOverflow {
            requested,
            max: MAX_CAPACITY,
        }),
    }
}

/// Returns the capacity a table of `current` buckets grows to: the first
/// tabulated prime strictly greater than `current`.
///
/// # Errors
///
/// Returns [`Error::CapacityOverflow`] once `current` has reached
/// [`MAX_CAPACITY`].
pub fn next_capacity(current: usize) -> Result<(usize, usize)> {
    let index = PRIMES.partition_point(|&p| p <= current);
    match PRIMES.get(index) {
        Some(&prime) => Ok((prime, index)),
        None => Err(Error::CapacityOverflow {
            requested: current.saturating_add(1),
            max: MAX_CAPACITY,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_strictly_increasing_primes() {
        for pair in PRIMES.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        for &p in PRIMES.iter().take(12) {
            assert!((2..p).take_while(|d| d * d <= p).all(|d| p % d != 0), "{p}");
        }
    }

    #[test]
    fn ceil_exact_and_between() {
        assert_eq!(ceil_to_prime(0), Ok((2, 0)));
        assert_eq!(ceil_to_prime(2), Ok((2, 0)));
        assert_eq!(ceil_to_prime(3), Ok((5, 1)));
        assert_eq!(ceil_to_prime(53), Ok((53, 4)));
        assert_eq!(ceil_to_prime(54), Ok((97, 5)));
        assert_eq!(ceil_to_prime(MAX_CAPACITY), Ok((MAX_CAPACITY, PRIMES.len() - 1)));
    }

    #[test]
    fn ceil_beyond_table_fails() {
        assert_eq!(
            ceil_to_prime(MAX_CAPACITY + 1),
            Err(Error::CapacityOverflow {
                requested: MAX_CAPACITY + 1,
                max: MAX_CAPACITY,
            })
        );
    }

    #[test]
    fn growth_walks_the_table() {
        assert_eq!(next_capacity(0), Ok((2, 0)));
        assert_eq!(next_capacity(2), Ok((5, 1)));
        assert_eq!(next_capacity(53), Ok((97, 5)));
        assert!(next_capacity(MAX_CAPACITY).is_err());
    }
}
