//! Inspect command implementation

use anyhow::Result;
use golomb_filter::{Murmur3Hasher, encoded_bit_len};
use serde::Serialize;

use crate::{commands::load_filter, utils};

#[derive(Serialize)]
struct InspectSummary {
    member_count: usize,
    power: u32,
    modulus: u64,
    bit_len: usize,
    byte_len: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    bits_per_member: Option<f64>,
    false_positive_probability: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_member: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_member: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    members: Vec<u32>,
}

pub fn run(power: u32, bit_len: Option<usize>, verbose: u8, filter_path: String) -> Result<()> {
    println!("Inspecting filter: {filter_path}");

    // Members do not depend on the hash function; it only matters for queries.
    let (filter, byte_len) =
        load_filter(&filter_path, power, bit_len, Murmur3Hasher::default())?;
    let sorted = filter.sorted_members();
    let bit_len = encoded_bit_len(&filter);

    let summary = InspectSummary {
        member_count: filter.len(),
        power: filter.power(),
        modulus: filter.current_modulus(),
        bit_len,
        byte_len,
        bits_per_member: utils::bits_per_member(bit_len, filter.len()),
        false_positive_probability: filter.false_positive_probability(),
        min_member: sorted.first().copied(),
        max_member: sorted.last().copied(),
        members: if verbose > 0 { sorted } else { Vec::new() },
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
