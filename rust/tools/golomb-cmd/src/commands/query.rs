//! Query command implementation

use anyhow::{Context, Result};
use golomb_filter::FilterConfig;
use serde::Serialize;

use crate::commands::load_filter;

#[derive(Serialize)]
struct QuerySummary {
    member_count: usize,
    power: u32,
    results: Vec<QueryResult>,
}

#[derive(Serialize)]
struct QueryResult {
    value: String,
    /// False means definitely absent; true means present or a false positive.
    maybe_present: bool,
}

pub fn run(
    config: FilterConfig,
    bit_len: Option<usize>,
    filter_path: String,
    values: Vec<String>,
) -> Result<()> {
    config.validate().context("Invalid filter configuration")?;
    let hasher = config.create_hasher()?;
    let (mut filter, _) = load_filter(&filter_path, config.power, bit_len, hasher)?;

    let results = values
        .into_iter()
        .map(|value| QueryResult {
            maybe_present: filter.contains(value.as_bytes()),
            value,
        })
        .collect();

    let summary = QuerySummary {
        member_count: filter.len(),
        power: filter.power(),
        results,
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
