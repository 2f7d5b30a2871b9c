//! Logical bit sequences and their physical byte packing.
//!
//! Bits are packed MSB-first: bit `i` of a sequence lives in byte `i / 8` at
//! bit position `7 - i % 8`. Unused trailing bits of the last byte are always
//! zero, so two sequences with the same logical bits have the same bytes.

use std::{fmt, str::FromStr};

use crate::{error::Error, result::Result};

/// An owned, growable sequence of bits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitSequence {
    bytes: Vec<u8>,
    len: usize,
}

impl BitSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty sequence with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            len: 0,
        }
    }

    /// Wraps packed bytes holding exactly `len` logical bits.
    ///
    /// Extra whole bytes and padding bits past `len` are discarded.
    pub fn from_bytes(mut bytes: Vec<u8>, len: usize) -> Result<Self> {
        let available = bytes.len().saturating_mul(8);
        if len > available {
            return Err(Error::invalid_parameter(
                "bit_len",
                format!("{len} bits requested but only {available} bits supplied"),
            ));
        }
        bytes.truncate(len.div_ceil(8));
        let mut bits = Self { bytes, len };
        bits.clear_padding();
        Ok(bits)
    }

    /// Wraps packed bytes, treating every bit as logical data.
    pub fn from_packed(bytes: Vec<u8>) -> Self {
        let len = bytes.len() * 8;
        Self { bytes, len }
    }

    /// Number of logical bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of bytes needed to store the packed bits.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Packed representation, with zeroed padding in the last byte.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Returns the bit at `index`, or `None` past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Option<bool> {
        (index < self.len).then(|| bit_at(&self.bytes, index))
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(|i| bit_at(&self.bytes, i))
    }

    #[inline]
    pub fn push(&mut self, bit: bool) {
        let offset = self.len % 8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            let last = self.bytes.len() - 1;
            self.bytes[last] |= 0x80 >> offset;
        }
        self.len += 1;
    }

    /// Appends `count` one bits.
    pub fn push_ones(&mut self, count: usize) {
        for _ in 0..count {
            self.push(true);
        }
    }

    /// Appends the low `width` bits of `value`, most significant bit first.
    pub fn push_bits(&mut self, value: u32, width: u32) {
        debug_assert!(width <= 32);
        for i in (0..width).rev() {
            self.push((value >> i) & 1 != 0);
        }
    }

    /// Shortens the sequence to `len` bits. Has no effect if `len` is not
    /// smaller than the current length.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        self.bytes.truncate(len.div_ceil(8));
        self.len = len;
        self.clear_padding();
    }

    pub fn reader(&self) -> BitReader<'_> {
        BitReader::new(&self.bytes, self.len)
    }

    fn clear_padding(&mut self) {
        let used = self.len % 8;
        if used != 0 {
            if let Some(last) = self.bytes.last_mut() {
                *last &= !(0xFFu8 >> used);
            }
        }
    }
}

impl FromIterator<bool> for BitSequence {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bits = BitSequence::new();
        bits.extend(iter);
        bits
    }
}

impl Extend<bool> for BitSequence {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        for bit in iter {
            self.push(bit);
        }
    }
}

/// Renders the sequence as a string of `0` and `1` characters.
impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Parses a string of `0` and `1` characters; whitespace and `_` are ignored
/// so codes can be grouped for readability.
impl FromStr for BitSequence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut bits = BitSequence::with_capacity(s.len());
        for (i, c) in s.chars().enumerate() {
            match c {
                '0' => bits.push(false),
                '1' => bits.push(true),
                '_' => {}
                c if c.is_whitespace() => {}
                c => {
                    return Err(Error::invalid_format(
                        "bits",
                        format!("unexpected character {c:?} at offset {i}"),
                    ));
                }
            }
        }
        Ok(bits)
    }
}

/// Sequential MSB-first reader over packed bits.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    len: usize,
    pos: usize,
}

impl<'a> BitReader<'a> {
    /// Reads at most `len` bits from `data`.
    pub fn new(data: &'a [u8], len: usize) -> Self {
        Self {
            data,
            len: len.min(data.len().saturating_mul(8)),
            pos: 0,
        }
    }

    /// Reads every bit of `data`.
    pub fn from_slice(data: &'a [u8]) -> Self {
        Self::new(data, usize::MAX)
    }

    /// Number of bits consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.len - self.pos
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.len
    }

    #[inline]
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.is_at_end() {
            return None;
        }
        let bit = bit_at(self.data, self.pos);
        self.pos += 1;
        Some(bit)
    }

    /// Reads a unary code: a run of one bits terminated by a zero bit.
    /// Returns the length of the run; the terminating zero is consumed.
    pub fn read_unary(&mut self) -> Result<u64> {
        let mut count = 0u64;
        loop {
            match self.read_bit() {
                Some(true) => count += 1,
                Some(false) => return Ok(count),
                None => return Err(Error::truncated_input(self.pos, 1, 0)),
            }
        }
    }

    /// Reads `width` bits as an unsigned integer, most significant bit first.
    ///
    /// Fails without consuming anything if fewer than `width` bits remain.
    pub fn read_bits(&mut self, width: u32) -> Result<u32> {
        debug_assert!(width <= 32);
        let available = self.remaining();
        if available < width as usize {
            return Err(Error::truncated_input(
                self.pos,
                width as usize,
                available,
            ));
        }
        let mut value = 0u64;
        for _ in 0..width {
            value = (value << 1) | bit_at(self.data, self.pos) as u64;
            self.pos += 1;
        }
        Ok(value as u32)
    }

    /// Returns true if every unread bit is zero.
    pub fn remaining_bits_are_zero(&self) -> bool {
        (self.pos..self.len).all(|i| !bit_at(self.data, i))
    }
}

#[inline]
fn bit_at(data: &[u8], index: usize) -> bool {
    (data[index / 8] >> (7 - (index % 8))) & 1 != 0
}
