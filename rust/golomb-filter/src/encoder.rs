//! Golomb-Rice encoder.
//!
//! Members are sorted, turned into gaps (the first gap is measured from zero)
//! and every gap `d` is written as `d >> power` one bits, a zero bit, and the
//! low `power` bits of `d`, most significant first. Codes are concatenated
//! without any header or terminator.

use std::iter;

use itertools::Itertools;

use crate::{
    bits::BitSequence,
    filter::GolombFilter,
    result::{Result, verify_power},
};

/// Streaming Golomb-Rice writer for a fixed `power`.
#[derive(Debug, Clone)]
pub struct RiceEncoder {
    power: u32,
    mask: u32,
    bits: BitSequence,
}

impl RiceEncoder {
    pub fn new(power: u32) -> Result<Self> {
        verify_power(power)?;
        Ok(Self::with_valid_power(power, 0))
    }

    fn with_valid_power(power: u32, capacity: usize) -> Self {
        Self {
            power,
            mask: (1u32 << power) - 1,
            bits: BitSequence::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn power(&self) -> u32 {
        self.power
    }

    /// Appends the code for a single gap.
    pub fn write_delta(&mut self, delta: u32) {
        let quotient = delta >> self.power;
        self.bits.push_ones(quotient as usize);
        self.bits.push(false);
        self.bits.push_bits(delta & self.mask, self.power);
    }

    /// Appends the codes for an ascending sequence of values.
    pub fn write_sorted(&mut self, sorted: &[u32]) {
        for delta in deltas(sorted) {
            self.write_delta(delta);
        }
    }

    /// Number of bits written so far.
    #[inline]
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    pub fn finish(self) -> BitSequence {
        self.bits
    }
}

/// Length in bits of the code for `delta`.
#[inline]
pub fn code_len(delta: u32, power: u32) -> usize {
    (delta >> power) as usize + 1 + power as usize
}

/// Encodes the members of `filter`. An empty filter yields an empty sequence.
pub fn encode<H>(filter: &GolombFilter<H>) -> BitSequence {
    let sorted = filter.sorted_members();
    let capacity = total_len(&sorted, filter.power());

    let mut encoder = RiceEncoder::with_valid_power(filter.power(), capacity);
    encoder.write_sorted(&sorted);
    let bits = encoder.finish();

    log::debug!(
        "golomb filter encoded: members={}, power={}, bits={}",
        sorted.len(),
        filter.power(),
        bits.len()
    );
    bits
}

/// Length in bits that [`encode`] produces for `filter`, computed without
/// encoding.
pub fn encoded_bit_len<H>(filter: &GolombFilter<H>) -> usize {
    total_len(&filter.sorted_members(), filter.power())
}

fn total_len(sorted: &[u32], power: u32) -> usize {
    deltas(sorted).map(|d| code_len(d, power)).sum()
}

/// Gaps of an ascending sequence, the first one measured from zero.
fn deltas(sorted: &[u32]) -> impl Iterator<Item = u32> + '_ {
    let first = sorted.first().copied();
    iter::once(first)
        .flatten()
        .chain(sorted.iter().tuple_windows().map(|(a, b)| {
            debug_assert!(a <= b, "values must be sorted");
            b - a
        }))
}
