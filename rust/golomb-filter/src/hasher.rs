//! 32-bit value hashers used to feed the filter.
//!
//! A [`Hasher32`] is a resettable scratch object. Every "hash this value"
//! operation goes through [`Hasher32::hash_value`], which performs the full
//! reset, write, sum sequence so that no state leaks between unrelated values.

use std::fmt;

use xxhash_rust::xxh32::Xxh32;

use crate::config::DEFAULT_HASH_SEED;

/// A resettable hash function producing uniformly distributed 32-bit values.
///
/// Cryptographic strength is not required: the filter only has to tolerate
/// accidental collisions.
pub trait Hasher32 {
    /// Discards any data written since the last reset.
    fn reset(&mut self);

    /// Feeds `bytes` into the running hash.
    fn write(&mut self, bytes: &[u8]);

    /// Returns the hash of everything written since the last reset.
    fn sum32(&self) -> u32;

    /// Hashes a single value from a clean state.
    #[inline]
    fn hash_value(&mut self, value: &[u8]) -> u32 {
        self.reset();
        self.write(value);
        self.sum32()
    }
}

impl<H: Hasher32 + ?Sized> Hasher32 for Box<H> {
    #[inline]
    fn reset(&mut self) {
        (**self).reset()
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        (**self).write(bytes)
    }

    #[inline]
    fn sum32(&self) -> u32 {
        (**self).sum32()
    }
}

impl<H: Hasher32 + ?Sized> Hasher32 for &mut H {
    #[inline]
    fn reset(&mut self) {
        (**self).reset()
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        (**self).write(bytes)
    }

    #[inline]
    fn sum32(&self) -> u32 {
        (**self).sum32()
    }
}

/// MurmurHash3 (x86, 32-bit variant). This is the default filter hasher.
///
/// The reference function is not incremental, so written bytes are buffered
/// until [`Hasher32::sum32`] is called.
#[derive(Debug, Clone)]
pub struct Murmur3Hasher {
    seed: u32,
    buffer: Vec<u8>,
}

impl Default for Murmur3Hasher {
    fn default() -> Self {
        Self::with_seed(DEFAULT_HASH_SEED)
    }
}

impl Murmur3Hasher {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            buffer: Vec::new(),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Hasher32 for Murmur3Hasher {
    #[inline]
    fn reset(&mut self) {
        self.buffer.clear();
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    fn sum32(&self) -> u32 {
        murmur3::murmur3_32(&mut self.buffer.as_slice(), self.seed)
            .expect("reading from an in-memory slice cannot fail")
    }
}

/// Streaming XXH32.
#[derive(Clone)]
pub struct Xxh32Hasher {
    seed: u32,
    state: Xxh32,
}

impl Default for Xxh32Hasher {
    fn default() -> Self {
        Self::with_seed(DEFAULT_HASH_SEED)
    }
}

impl Xxh32Hasher {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            state: Xxh32::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl fmt::Debug for Xxh32Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Xxh32Hasher")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

impl Hasher32 for Xxh32Hasher {
    #[inline]
    fn reset(&mut self) {
        self.state.reset(self.seed);
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.state.update(bytes);
    }

    #[inline]
    fn sum32(&self) -> u32 {
        self.state.digest()
    }
}

/// Hasher selected at runtime by [`FilterConfig::create_hasher`].
///
/// [`FilterConfig::create_hasher`]: crate::config::FilterConfig::create_hasher
#[derive(Debug, Clone)]
pub enum ConfiguredHasher {
    Murmur3(Murmur3Hasher),
    Xxh32(Xxh32Hasher),
}

impl Hasher32 for ConfiguredHasher {
    #[inline]
    fn reset(&mut self) {
        match self {
            Self::Murmur3(h) => h.reset(),
            Self::Xxh32(h) => h.reset(),
        }
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        match self {
            Self::Murmur3(h) => h.write(bytes),
            Self::Xxh32(h) => h.write(bytes),
        }
    }

    #[inline]
    fn sum32(&self) -> u32 {
        match self {
            Self::Murmur3(h) => h.sum32(),
            Self::Xxh32(h) => h.sum32(),
        }
    }
}
