//! Common utilities for golomb-cmd

use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Opens an existing regular file; `role` names it in error messages.
pub fn open_file(path: &str, role: &str) -> Result<File> {
    let file_path = Path::new(path);
    if !file_path.exists() {
        bail!("{role} file does not exist: {path}");
    }
    if !file_path.is_file() {
        bail!("{role} path is not a file: {path}");
    }
    File::open(file_path).with_context(|| format!("Failed to open {role} file: {path}"))
}

/// Reads newline-separated values, one filter input per line.
///
/// Line terminators (`\n` or `\r\n`) are stripped; empty lines are kept as
/// empty values.
pub fn read_values(path: &str) -> Result<Vec<Vec<u8>>> {
    let file = open_file(path, "Input")?;

    let mut values = Vec::new();
    for line in BufReader::new(file).split(b'\n') {
        let mut line = line.with_context(|| format!("Failed to read input file: {path}"))?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        values.push(line);
    }
    Ok(values)
}

/// Reads an encoded filter file.
pub fn read_filter_bytes(path: &str) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    open_file(path, "Filter")?
        .read_to_end(&mut bytes)
        .with_context(|| format!("Failed to read filter file: {path}"))?;
    Ok(bytes)
}

/// Encoded bits spent per distinct member, or `None` for an empty filter.
///
/// A well-sized filter stays close to `power + 2`.
pub fn bits_per_member(bit_len: usize, member_count: usize) -> Option<f64> {
    (member_count > 0).then(|| bit_len as f64 / member_count as f64)
}
