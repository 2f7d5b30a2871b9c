use std::{
    collections::HashSet,
    hash::{BuildHasherDefault, Hasher},
};

/// Set of reduced hash values held by a filter.
///
/// Members are already uniformly distributed below the modulus, so the set
/// only needs to spread them across the high bits used by the table.
pub type MemberSet = HashSet<u32, BuildHasherDefault<ReducedValueHasher>>;

/// Fibonacci-hashing hasher for `u32` keys.
///
/// This hasher should only be used with `u32` keys. Using it with other types
/// will cause a panic.
#[derive(Default)]
pub struct ReducedValueHasher(u64);

const GOLDEN_RATIO: u64 = 0x9E37_79B9_7F4A_7C15;

impl Hasher for ReducedValueHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }

    #[inline]
    fn write(&mut self, _: &[u8]) {
        unimplemented!("ReducedValueHasher is only implemented for u32 keys");
    }

    #[inline]
    fn write_u32(&mut self, i: u32) {
        self.0 = (i as u64).wrapping_mul(GOLDEN_RATIO);
    }
}
