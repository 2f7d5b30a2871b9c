//! Golomb-Rice decoder implementation.

use crate::{
    bits::{BitReader, BitSequence},
    error::Error,
    filter::GolombFilter,
    member_set::MemberSet,
    result::{Result, verify_power},
};

/// Reads consecutive Golomb-Rice codes and yields the encoded gaps.
///
/// The decoder does not know the `power` used by the encoder; decoding with
/// a different value silently produces a different set.
#[derive(Debug, Clone)]
pub struct RiceDecoder<'a> {
    reader: BitReader<'a>,
    power: u32,
    failed: bool,
}

impl<'a> RiceDecoder<'a> {
    pub fn new(bits: &'a BitSequence, power: u32) -> Result<Self> {
        Self::from_reader(bits.reader(), power)
    }

    pub fn from_reader(reader: BitReader<'a>, power: u32) -> Result<Self> {
        verify_power(power)?;
        Ok(Self {
            reader,
            power,
            failed: false,
        })
    }

    /// Number of bits consumed so far.
    #[inline]
    pub fn bit_position(&self) -> usize {
        self.reader.position()
    }

    /// Reads the next gap, or `None` once every bit has been consumed.
    pub fn read_delta(&mut self) -> Result<Option<u32>> {
        if self.reader.is_at_end() {
            return Ok(None);
        }
        let start = self.reader.position();
        let quotient = self.reader.read_unary()?;
        let remainder = self.reader.read_bits(self.power)?;

        if quotient > (u32::MAX >> self.power) as u64 {
            return Err(Error::invalid_format(
                "delta",
                format!(
                    "quotient {quotient} at bit {start} exceeds the 32-bit range for power {}",
                    self.power
                ),
            ));
        }
        Ok(Some(((quotient as u32) << self.power) | remainder))
    }

    /// Returns true if what is left can only be zero padding of the last byte.
    fn at_padding(&self) -> bool {
        let remaining = self.reader.remaining();
        remaining > 0 && remaining < 8 && self.reader.remaining_bits_are_zero()
    }
}

impl Iterator for RiceDecoder<'_> {
    type Item = Result<u32>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.read_delta() {
            Ok(delta) => delta.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Reconstructs a filter from an encoded bit sequence.
///
/// `power` must be the value used for encoding. The hasher is only used for
/// later [`GolombFilter::contains`] queries. An empty sequence yields an empty
/// filter.
pub fn decode<H>(bits: &BitSequence, power: u32, hasher: H) -> Result<GolombFilter<H>> {
    let mut decoder = RiceDecoder::new(bits, power)?;
    let members = accumulate(&mut decoder, false)?;
    log::debug!(
        "golomb filter decoded: bits={}, members={}, power={power}",
        bits.len(),
        members.len()
    );
    Ok(GolombFilter::from_members(members, power, hasher))
}

/// Reconstructs a filter from packed bytes whose exact bit length is unknown.
///
/// Zero bits that fill up the last byte after the final code are ignored.
/// A zero gap never changes the decoded set, so this cannot drop a member.
pub fn decode_packed<H>(bytes: &[u8], power: u32, hasher: H) -> Result<GolombFilter<H>> {
    let mut decoder = RiceDecoder::from_reader(BitReader::from_slice(bytes), power)?;
    let members = accumulate(&mut decoder, true)?;
    log::debug!(
        "golomb filter decoded: bytes={}, members={}, power={power}",
        bytes.len(),
        members.len()
    );
    Ok(GolombFilter::from_members(members, power, hasher))
}

fn accumulate(decoder: &mut RiceDecoder<'_>, skip_padding: bool) -> Result<MemberSet> {
    let mut members = MemberSet::default();
    let mut running = 0u32;
    let mut decoded = 0usize;
    loop {
        if skip_padding && decoded > 0 && decoder.at_padding() {
            break;
        }
        let Some(delta) = decoder.read_delta()? else {
            break;
        };
        running = running.checked_add(delta).ok_or_else(|| {
            Error::invalid_format(
                "members",
                format!(
                    "running value overflows 32 bits at bit {}",
                    decoder.bit_position()
                ),
            )
        })?;
        members.insert(running);
        decoded += 1;
    }
    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{encoder::RiceEncoder, error::ErrorKind, hasher::Murmur3Hasher};

    fn bits(s: &str) -> BitSequence {
        s.parse().unwrap()
    }

    #[test]
    fn test_reference_vector() {
        let encoded = bits("00010 00011 00100 01011");
        let filter = decode(&encoded, 4, Murmur3Hasher::default()).unwrap();
        assert_eq!(filter.sorted_members(), vec![2, 5, 9, 20]);
        assert_eq!(filter.power(), 4);
        assert_eq!(filter.current_modulus(), 64);
    }

    #[test]
    fn test_decode_needs_no_hasher() {
        // Raw-hash queries work on a filter decoded without any hasher.
        let encoded = bits("00010 00011 00100 01011");
        let filter = decode(&encoded, 4, ()).unwrap();
        assert!(filter.contains_hash(64 + 9));
        assert!(!filter.contains_hash(10));

        let filter = decode_packed(encoded.as_bytes(), 4, ()).unwrap();
        assert_eq!(filter.sorted_members(), vec![2, 5, 9, 20]);
    }

    #[test]
    fn test_bit_position_tracks_codes() {
        let encoded = bits("00010 00011 00100 01011");
        let mut decoder = RiceDecoder::new(&encoded, 4).unwrap();
        assert_eq!(decoder.bit_position(), 0);
        assert_eq!(decoder.read_delta().unwrap(), Some(2));
        assert_eq!(decoder.bit_position(), 5);
        decoder.by_ref().for_each(drop);
        assert_eq!(decoder.bit_position(), 20);
    }

    #[test]
    fn test_running_overflow_reports_bit_position() {
        let mut encoder = RiceEncoder::new(31).unwrap();
        encoder.write_delta(u32::MAX);
        encoder.write_delta(1);
        let err = decode(&encoder.finish(), 31, ()).unwrap_err();
        match err.kind() {
            ErrorKind::InvalidFormat { message, .. } => assert!(message.contains("at bit 65")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decoder_yields_deltas() {
        let encoded = bits("00010 00011 00100 01011");
        let decoder = RiceDecoder::new(&encoded, 4).unwrap();
        let deltas: Vec<u32> = decoder.collect::<Result<_>>().unwrap();
        assert_eq!(deltas, vec![2, 3, 4, 11]);
    }

    #[test]
    fn test_empty_input_decodes_to_empty_filter() {
        let filter = decode(&BitSequence::new(), 7, Murmur3Hasher::default()).unwrap();
        assert!(filter.is_empty());

        let filter = decode_packed(&[], 7, Murmur3Hasher::default()).unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_rejects_invalid_power() {
        for power in [0, 32] {
            let err = decode(&bits("00"), power, Murmur3Hasher::default()).unwrap_err();
            assert!(matches!(err.kind(), ErrorKind::InvalidParameter { .. }));
        }
    }

    #[test]
    fn test_incomplete_remainder_is_truncated() {
        let encoded = bits("00010 00011 00100 01011");
        for chop in 1..=4 {
            let mut short = encoded.clone();
            short.truncate(encoded.len() - chop);
            let err = decode(&short, 4, Murmur3Hasher::default()).unwrap_err();
            assert!(
                matches!(err.kind(), ErrorKind::TruncatedInput { .. }),
                "chop {chop}: {err}"
            );
        }
    }

    #[test]
    fn test_unterminated_unary_is_truncated() {
        let err = decode(&bits("00010 111"), 4, Murmur3Hasher::default()).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::TruncatedInput {
                position: 8,
                needed: 1,
                available: 0
            }
        ));
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let encoded = bits("00010 0001");
        let mut decoder = RiceDecoder::new(&encoded, 4).unwrap();
        assert_eq!(decoder.next().unwrap().unwrap(), 2);
        assert!(decoder.next().unwrap().is_err());
        assert!(decoder.next().is_none());
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        // Quotient 2 with power 31 cannot fit in 32 bits.
        let mut encoded = bits("110");
        encoded.push_bits(0, 31);
        let err = decode(&encoded, 31, Murmur3Hasher::default()).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidFormat { .. }));

        // Each gap fits, but the running sum does not.
        let mut encoder = RiceEncoder::new(31).unwrap();
        encoder.write_delta(u32::MAX);
        encoder.write_delta(1);
        let err = decode(&encoder.finish(), 31, Murmur3Hasher::default()).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidFormat { .. }));
    }

    #[test]
    fn test_decode_packed_ignores_padding() {
        // 20 bits -> 3 bytes with 4 bits of padding.
        let encoded = bits("00010 00011 00100 01011");
        let filter = decode_packed(encoded.as_bytes(), 4, Murmur3Hasher::default()).unwrap();
        assert_eq!(filter.sorted_members(), vec![2, 5, 9, 20]);

        // Without the logical length the padding is an incomplete code.
        let padded = BitSequence::from_packed(encoded.as_bytes().to_vec());
        let err = decode(&padded, 4, Murmur3Hasher::default()).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::TruncatedInput { .. }));
    }

    #[test]
    fn test_decode_packed_small_power() {
        // {0, 3} with power 1: "00" + "011" -> 5 bits, 3 bits of padding that
        // would otherwise decode as a zero gap.
        let mut encoder = RiceEncoder::new(1).unwrap();
        encoder.write_sorted(&[0, 3]);
        let encoded = encoder.finish();
        assert_eq!(encoded.to_string(), "00101");

        let filter = decode_packed(encoded.as_bytes(), 1, Murmur3Hasher::default()).unwrap();
        assert_eq!(filter.sorted_members(), vec![0, 3]);
    }

    #[test]
    fn test_decode_packed_single_zero_member() {
        // {0} with power 2 is "000": the only code must not be taken as padding.
        let filter = decode_packed(&[0u8], 2, Murmur3Hasher::default()).unwrap();
        assert_eq!(filter.sorted_members(), vec![0]);
    }
}
