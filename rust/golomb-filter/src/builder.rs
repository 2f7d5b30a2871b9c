//! Golomb-Rice filter builder implementation.

use crate::{
    config::FilterConfig,
    filter::GolombFilter,
    hasher::{ConfiguredHasher, Hasher32, Murmur3Hasher},
    result::{Result, verify_power},
};

/// Accumulates raw value hashes and materializes a [`GolombFilter`].
///
/// Duplicate values are retained: every added value counts towards `N`, the
/// input count that determines the construction modulus `N * 2^power`.
#[derive(Debug, Clone)]
pub struct FilterBuilder<H = Murmur3Hasher> {
    power: u32,
    hasher: H,
    raw: Vec<u32>,
}

impl FilterBuilder<Murmur3Hasher> {
    /// Creates a builder using the default MurmurHash3 hasher.
    pub fn new(power: u32) -> Result<Self> {
        Self::with_hasher(power, Murmur3Hasher::default())
    }
}

impl FilterBuilder<ConfiguredHasher> {
    /// Creates a builder with the configured power and hasher.
    pub fn from_config(config: &FilterConfig) -> Result<Self> {
        config.validate()?;
        Self::with_hasher(config.power, config.create_hasher()?)
    }
}

impl<H: Hasher32> FilterBuilder<H> {
    /// Creates a builder with a caller supplied hasher.
    pub fn with_hasher(power: u32, hasher: H) -> Result<Self> {
        verify_power(power)?;
        Ok(Self {
            power,
            hasher,
            raw: Vec::new(),
        })
    }

    /// Hashes `value` and records the raw hash.
    #[inline]
    pub fn add_value(&mut self, value: &[u8]) {
        let hash = self.hasher.hash_value(value);
        self.raw.push(hash);
    }

    /// Records a pre-computed raw hash.
    #[inline]
    pub fn add_hash(&mut self, hash: u32) {
        self.raw.push(hash);
    }

    pub fn extend_values<I>(&mut self, values: I)
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let values = values.into_iter();
        self.raw.reserve(values.size_hint().0);
        for value in values {
            self.add_value(value.as_ref());
        }
    }

    /// Builds the filter, consuming the builder and handing its hasher over.
    pub fn into_filter(self) -> Result<GolombFilter<H>> {
        GolombFilter::from_hashes(&self.raw, self.power, self.hasher)
    }
}

impl<H: Hasher32 + Clone> FilterBuilder<H> {
    /// Builds a filter from the values added so far.
    ///
    /// Each call re-derives the filter from the full raw sequence.
    pub fn filter(&self) -> Result<GolombFilter<H>> {
        GolombFilter::from_hashes(&self.raw, self.power, self.hasher.clone())
    }
}

impl<H> FilterBuilder<H> {
    #[inline]
    pub fn power(&self) -> u32 {
        self.power
    }

    /// Number of values added, duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Raw hashes in insertion order.
    pub fn raw_hashes(&self) -> &[u32] {
        &self.raw
    }
}
