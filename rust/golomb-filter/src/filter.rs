//! The in-memory Golomb-Rice coded set.

use std::fmt;

use itertools::Itertools;

use crate::{
    error::Error,
    hasher::{Hasher32, Murmur3Hasher},
    member_set::MemberSet,
    result::{Result, verify_power},
};

/// Computes the construction modulus `count * 2^power` in 32-bit arithmetic.
pub fn modulus(count: usize, power: u32) -> Result<u32> {
    verify_power(power)?;
    if count == 0 {
        return Err(Error::empty_set());
    }
    u32::try_from(count)
        .ok()
        .and_then(|n| n.checked_mul(1u32 << power))
        .ok_or_else(|| Error::modulus_overflow(count, power))
}

/// A probabilistic set of values reduced into `[0, N * 2^power)`.
///
/// Queries never report a false negative for a value that was part of the
/// construction input, and report a false positive with probability of about
/// `2^-power`.
///
/// The filter owns a hasher used by [`GolombFilter::contains`]. Callers that
/// need to share a filter across threads should query through
/// [`GolombFilter::contains_with`] or [`GolombFilter::contains_hash`], which
/// only need `&self`.
pub struct GolombFilter<H = Murmur3Hasher> {
    members: MemberSet,
    power: u32,
    hasher: H,
}

impl<H: Hasher32> GolombFilter<H> {
    /// Builds a filter from raw 32-bit hashes.
    ///
    /// Every hash is reduced modulo `hashes.len() * 2^power`. Hashes that
    /// collide after the reduction collapse into a single member.
    pub fn from_hashes(hashes: &[u32], power: u32, hasher: H) -> Result<Self> {
        let m = modulus(hashes.len(), power)?;

        let mut members = MemberSet::default();
        members.reserve(hashes.len());
        members.extend(hashes.iter().map(|&h| h % m));

        let collisions = hashes.len() - members.len();
        if collisions > 0 {
            log::debug!(
                "golomb filter: {collisions} of {} values collapsed under modulus {m}",
                hashes.len()
            );
        }
        log::debug!(
            "golomb filter built: inputs={}, members={}, power={power}, modulus={m}",
            hashes.len(),
            members.len()
        );

        Ok(Self {
            members,
            power,
            hasher,
        })
    }

    /// Tests whether a value might be a member, hashing it with the filter's
    /// own hasher.
    #[inline]
    pub fn contains(&mut self, value: &[u8]) -> bool {
        let hash = self.hasher.hash_value(value);
        self.contains_hash(hash)
    }

    /// Tests whether a value might be a member, hashing it with a caller
    /// supplied hasher. The hasher must match the one used at construction.
    #[inline]
    pub fn contains_with<Q: Hasher32 + ?Sized>(&self, hasher: &mut Q, value: &[u8]) -> bool {
        self.contains_hash(hasher.hash_value(value))
    }
}

impl<H> GolombFilter<H> {
    /// Wraps an already reduced member set, e.g. one restored by the decoder.
    pub(crate) fn from_members(members: MemberSet, power: u32, hasher: H) -> Self {
        Self {
            members,
            power,
            hasher,
        }
    }

    /// Tests whether a pre-computed raw hash might be a member.
    ///
    /// The hash is reduced by [`GolombFilter::current_modulus`], which depends
    /// on the current member count.
    #[inline]
    pub fn contains_hash(&self, hash: u32) -> bool {
        let m = self.current_modulus();
        if m == 0 {
            return false;
        }
        self.members.contains(&((hash as u64 % m) as u32))
    }

    /// The modulus used by queries: `len() * 2^power`.
    ///
    /// This is derived from the deduplicated member count, so it is smaller
    /// than the construction modulus whenever construction inputs collided.
    #[inline]
    pub fn current_modulus(&self) -> u64 {
        (self.members.len() as u64) << self.power
    }

    #[inline]
    pub fn power(&self) -> u32 {
        self.power
    }

    /// Number of distinct members.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in unspecified order.
    pub fn members(&self) -> impl Iterator<Item = u32> + '_ {
        self.members.iter().copied()
    }

    /// Members in ascending order.
    pub fn sorted_members(&self) -> Vec<u32> {
        self.members.iter().copied().sorted_unstable().collect()
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    pub fn hasher_mut(&mut self) -> &mut H {
        &mut self.hasher
    }

    /// Expected false positive probability of a single non-member query.
    pub fn false_positive_probability(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        (-(self.power as f64)).exp2()
    }

    /// Returns true if both filters hold the same members with the same power.
    pub fn same_members<Q>(&self, other: &GolombFilter<Q>) -> bool {
        self.power == other.power && self.members == other.members
    }
}

impl<H: Clone> Clone for GolombFilter<H> {
    fn clone(&self) -> Self {
        Self {
            members: self.members.clone(),
            power: self.power,
            hasher: self.hasher.clone(),
        }
    }
}

impl<H> fmt::Debug for GolombFilter<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GolombFilter")
            .field("power", &self.power)
            .field("len", &self.members.len())
            .field("modulus", &self.current_modulus())
            .finish_non_exhaustive()
    }
}
