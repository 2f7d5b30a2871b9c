//! Build command implementation

use anyhow::{Context, Result};
use golomb_filter::{FilterBuilder, FilterConfig, encode};
use serde::Serialize;
use std::fs;

use crate::utils;

#[derive(Serialize)]
struct BuildSummary {
    input_count: usize,
    member_count: usize,
    power: u32,
    hash_algorithm: String,
    hash_seed: u32,
    bit_len: usize,
    byte_len: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    bits_per_member: Option<f64>,
    false_positive_probability: f64,
}

pub fn run(config: FilterConfig, input_path: String, output_path: String) -> Result<()> {
    config.validate().context("Invalid filter configuration")?;

    let values = utils::read_values(&input_path)?;
    println!("Building filter from {} values in: {}", values.len(), input_path);

    let mut builder =
        FilterBuilder::from_config(&config).context("Failed to create filter builder")?;
    builder.extend_values(&values);
    let filter = builder
        .into_filter()
        .with_context(|| format!("Failed to build filter from: {input_path}"))?;

    let bits = encode(&filter);
    fs::write(&output_path, bits.as_bytes())
        .with_context(|| format!("Failed to write filter to file: {output_path}"))?;
    println!("Filter written to: {output_path}");

    let summary = BuildSummary {
        input_count: values.len(),
        member_count: filter.len(),
        power: filter.power(),
        hash_algorithm: config.hash_algorithm,
        hash_seed: config.hash_seed,
        bit_len: bits.len(),
        byte_len: bits.byte_len(),
        bits_per_member: utils::bits_per_member(bits.len(), filter.len()),
        false_positive_probability: filter.false_positive_probability(),
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
