//! Command implementations for golomb-cmd

use anyhow::{Context, Result};
use golomb_filter::{BitSequence, FilterConfig, GolombFilter, Hasher32, decode, decode_packed};

use crate::{HashArgs, utils};

pub mod build;
pub mod inspect;
pub mod query;

pub fn filter_config(power: u32, hash: HashArgs) -> FilterConfig {
    FilterConfig {
        power,
        hash_algorithm: hash.algorithm,
        hash_seed: hash.seed,
    }
}

/// Reads and decodes an encoded filter file.
///
/// With `bit_len` the file is decoded exactly; otherwise the zero padding of
/// the final byte is skipped.
pub fn load_filter<H: Hasher32>(
    path: &str,
    power: u32,
    bit_len: Option<usize>,
    hasher: H,
) -> Result<(GolombFilter<H>, u64)> {
    let bytes = utils::read_filter_bytes(path)?;
    let byte_len = bytes.len() as u64;

    let filter = match bit_len {
        Some(len) => {
            let bits = BitSequence::from_bytes(bytes, len)
                .with_context(|| format!("Invalid bit length {len} for filter file: {path}"))?;
            decode(&bits, power, hasher)
        }
        None => decode_packed(&bytes, power, hasher),
    }
    .with_context(|| format!("Failed to decode filter file: {path}"))?;

    Ok((filter, byte_len))
}
