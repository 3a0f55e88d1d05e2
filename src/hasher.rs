//! Hash builders.
//!
//! Entity tags and values are keyed by small integer ids, and hashing those
//! through a keyed hasher buys nothing: consecutive ids already spread evenly
//! over a prime bucket count. [`IdBuildHasher`] passes integers through
//! unchanged and falls back to FNV-1a for anything written as bytes.

use core::hash::BuildHasher;
use core::hash::Hasher;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hasher used when a collection is created without one.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// The hasher used when a collection is created without one.
        pub type DefaultHashBuilder = std::hash::RandomState;
    } else {
        /// The hasher used when a collection is created without one.
        pub type DefaultHashBuilder = IdBuildHasher;
    }
}

const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// Keeps hashes non-negative when read back as a signed 64-bit integer.
const SIGN_MASK: u64 = i64::MAX as u64;

/// Builds [`IdHasher`]s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdBuildHasher;

impl BuildHasher for IdBuildHasher {
    type Hasher = IdHasher;

    fn build_hasher(&self) -> Self::Hasher {
        IdHasher::default()
    }
}

/// Identity hasher for integer ids.
///
/// A single integer write hashes to the integer itself (negative values are
/// reinterpreted as unsigned of the same width). Multiple writes are folded
/// together, and byte slices go through FNV-1a.
///
/// # Examples
///
/// ```rust
/// use core::hash::BuildHasher;
///
/// use entity_slots::hasher::IdBuildHasher;
///
/// assert_eq!(IdBuildHasher.hash_one(42i32), 42);
/// assert_eq!(IdBuildHasher.hash_one(-1i32), 0xFFFF_FFFF);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct IdHasher {
    state: u64,
}

impl IdHasher {
    #[inline(always)]
    fn mix(&mut self, value: u64) {
        self.state = self.state.rotate_left(5) ^ value;
    }
}

impl Hasher for IdHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.state & SIGN_MASK
    }

    fn write(&mut self, bytes: &[u8]) {
        let mut hash = FNV_OFFSET;
        for &byte in bytes {
            hash ^= byte as u64;
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        self.mix(hash);
    }

    #[inline]
    fn write_u8(&mut self, i: u8) {
        self.mix(i as u64);
    }

    #[inline]
    fn write_u16(&mut self, i: u16) {
        self.mix(i as u64);
    }

    #[inline]
    fn write_u32(&mut self, i: u32) {
        self.mix(i as u64);
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.mix(i);
    }

    #[inline]
    fn write_usize(&mut self, i: usize) {
        self.mix(i as u64);
    }

    #[inline]
    fn write_i8(&mut self, i: i8) {
        self.write_u8(i as u8);
    }

    #[inline]
    fn write_i16(&mut self, i: i16) {
        self.write_u16(i as u16);
    }

    #[inline]
    fn write_i32(&mut self, i: i32) {
        self.write_u32(i as u32);
    }

    #[inline]
    fn write_i64(&mut self, i: i64) {
        self.write_u64(i as u64);
    }

    #[inline]
    fn write_isize(&mut self, i: isize) {
        self.write_usize(i as usize);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_hash_to_themselves() {
        for id in [0i32, 1, 7, 1024, i32::MAX] {
            assert_eq!(IdBuildHasher.hash_one(id), id as u64);
        }
        assert_eq!(IdBuildHasher.hash_one(5u64), 5);
    }

    #[test]
    fn hashes_never_have_the_sign_bit() {
        assert_eq!(IdBuildHasher.hash_one(u64::MAX), i64::MAX as u64);
        assert_eq!(IdBuildHasher.hash_one(-1i64) >> 63, 0);
        assert_eq!(IdBuildHasher.hash_one("a long enough string") >> 63, 0);
    }

    #[test]
    fn strings_are_distinguished() {
        assert_ne!(IdBuildHasher.hash_one("health"), IdBuildHasher.hash_one("mana"));
        assert_eq!(IdBuildHasher.hash_one("health"), IdBuildHasher.hash_one("health"));
    }

    #[test]
    fn tuples_fold_all_fields() {
        assert_ne!(IdBuildHasher.hash_one((1u32, 2u32)), IdBuildHasher.hash_one((2u32, 1u32)));
    }
}
