//! Golomb-Rice coded sets.
//!
//! A Golomb-Rice coded set is a compact probabilistic membership filter. Values
//! are hashed to 32 bits, reduced modulo `N * 2^power` (where `N` is the number
//! of input values) and stored as a set. The set serializes to a bitstream of
//! sorted, delta-encoded Golomb-Rice codes that takes roughly `power + 2` bits
//! per member.
//!
//! The crate includes:
//!
//! - [`FilterBuilder`] to accumulate values and build a [`GolombFilter`]
//! - [`encode`] / [`decode`] to convert filters to and from a [`BitSequence`]
//! - The [`Hasher32`] contract with MurmurHash3 (default) and XXH32 implementations
//!
//! ```
//! use golomb_filter::{FilterBuilder, Murmur3Hasher, decode, encode};
//!
//! let mut builder = FilterBuilder::new(10)?;
//! builder.add_value(b"apple");
//! builder.add_value(b"banana");
//! let mut filter = builder.filter()?;
//! assert!(filter.contains(b"apple"));
//!
//! let bits = encode(&filter);
//! let mut restored = decode(&bits, filter.power(), Murmur3Hasher::default())?;
//! assert!(restored.same_members(&filter));
//! assert!(restored.contains(b"banana"));
//! # Ok::<(), golomb_filter::error::Error>(())
//! ```

pub mod bits;
pub mod builder;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod filter;
pub mod hasher;
pub mod member_set;
pub mod result;

#[cfg(test)]
mod test;

pub use bits::{BitReader, BitSequence};
pub use builder::FilterBuilder;
pub use config::*;
pub use decoder::{RiceDecoder, decode, decode_packed};
pub use encoder::{RiceEncoder, encode, encoded_bit_len};
pub use filter::GolombFilter;
pub use hasher::{ConfiguredHasher, Hasher32, Murmur3Hasher, Xxh32Hasher};
pub use result::Result;
