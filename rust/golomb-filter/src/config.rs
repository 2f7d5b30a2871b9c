//! Filter parameters and hasher selection.

use crate::{
    error::Error,
    hasher::{ConfiguredHasher, Murmur3Hasher, Xxh32Hasher},
    result::{Result, verify_power},
};

/// MurmurHash3 x86 32-bit algorithm name.
pub const MURMUR3_32_ALGORITHM: &str = "murmur3_32";

/// XXH32 algorithm name.
pub const XXH32_ALGORITHM: &str = "xxh32";

/// Smallest accepted Golomb-Rice parameter.
pub const MIN_POWER: u32 = 1;

/// Largest accepted Golomb-Rice parameter.
pub const MAX_POWER: u32 = 31;

/// Default Golomb-Rice parameter: roughly one false positive per 1024 queries.
pub const DEFAULT_POWER: u32 = 10;

/// Seed used by the default hashers.
pub(crate) const DEFAULT_HASH_SEED: u32 = 0;

/// Configuration for filter construction and decoding.
///
/// The same `power`, `hash_algorithm` and `hash_seed` must be used on the
/// encoding and the decoding side; none of them is carried in the bitstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Golomb-Rice parameter; the modulus is `N * 2^power`.
    pub power: u32,
    /// Hash algorithm to use: "murmur3_32" or "xxh32".
    pub hash_algorithm: String,
    /// Hash function seed.
    pub hash_seed: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            power: DEFAULT_POWER,
            hash_algorithm: MURMUR3_32_ALGORITHM.to_string(),
            hash_seed: DEFAULT_HASH_SEED,
        }
    }
}

impl FilterConfig {
    /// Creates a configuration with the given power and the default hasher.
    pub fn with_power(power: u32) -> Self {
        Self {
            power,
            ..Self::default()
        }
    }

    /// Validates the configuration and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        verify_power(self.power)?;

        if self.hash_algorithm != MURMUR3_32_ALGORITHM && self.hash_algorithm != XXH32_ALGORITHM {
            return Err(Error::invalid_parameter(
                "hash_algorithm",
                format!(
                    "unsupported hash algorithm: {}. Only {MURMUR3_32_ALGORITHM} and {XXH32_ALGORITHM} are supported",
                    self.hash_algorithm
                ),
            ));
        }

        Ok(())
    }

    /// Creates a fresh hasher for the configured algorithm and seed.
    pub fn create_hasher(&self) -> Result<ConfiguredHasher> {
        match self.hash_algorithm.as_str() {
            MURMUR3_32_ALGORITHM => Ok(ConfiguredHasher::Murmur3(Murmur3Hasher::with_seed(
                self.hash_seed,
            ))),
            XXH32_ALGORITHM => Ok(ConfiguredHasher::Xxh32(Xxh32Hasher::with_seed(
                self.hash_seed,
            ))),
            other => Err(Error::invalid_parameter(
                "hash_algorithm",
                format!("unsupported hash algorithm: {other}"),
            )),
        }
    }
}
