//! End-to-end filter tests.
//!
//! These tests go through the complete workflow: hashing values with a
//! builder, reducing them into a filter, encoding the filter to a bitstream,
//! decoding it back and querying both filters.

use std::collections::HashSet;

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::{
    bits::BitSequence,
    builder::FilterBuilder,
    config::{FilterConfig, MAX_POWER, MIN_POWER, XXH32_ALGORITHM},
    decoder::{decode, decode_packed},
    encoder::{encode, encoded_bit_len},
    error::ErrorKind,
    filter::GolombFilter,
    hasher::{Hasher32, Murmur3Hasher},
};

fn int_to_bytes(v: u32) -> [u8; 4] {
    v.to_le_bytes()
}

/// Generates `count` distinct string values with a common prefix.
fn generate_test_data(count: usize, prefix: &str) -> Vec<String> {
    (0..count).map(|i| format!("{prefix}_{i:06}")).collect()
}

fn shuffled_range(count: u32, seed: u64) -> Vec<u32> {
    let mut values: Vec<u32> = (0..count).collect();
    values.shuffle(&mut StdRng::seed_from_u64(seed));
    values
}

fn build_from_ints(values: &[u32], power: u32) -> GolombFilter {
    let mut builder = FilterBuilder::new(power).unwrap();
    for &v in values {
        builder.add_value(&int_to_bytes(v));
    }
    builder.filter().unwrap()
}

fn build_from_strings(values: &[String], power: u32) -> GolombFilter {
    let mut builder = FilterBuilder::new(power).unwrap();
    builder.extend_values(values);
    builder.into_filter().unwrap()
}

#[cfg(test)]
mod build_tests {
    use super::*;

    #[test]
    fn test_builder_reduces_hashes() {
        let cases = [(vec![1u32, 3, 5], 4u32), (shuffled_range(100, 7), 4)];
        for (values, power) in cases {
            let mut hasher = Murmur3Hasher::default();
            let m = (values.len() as u32) << power;
            let expected: HashSet<u32> = values
                .iter()
                .map(|&v| hasher.hash_value(&int_to_bytes(v)) % m)
                .collect();

            let filter = build_from_ints(&values, power);
            let actual: HashSet<u32> = filter.members().collect();
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_filter_contains() {
        for power in [4, 2] {
            let mut filter = build_from_ints(&[1, 2, 4, 5], power);
            for v in [1, 2, 4, 5] {
                assert!(filter.contains(&int_to_bytes(v)), "expected to contain {v}");
            }
            assert!(
                !filter.contains(&int_to_bytes(3)),
                "expected not to contain 3 (power {power})"
            );
        }
    }

    #[test]
    fn test_no_false_negatives() {
        for (count, power) in [(2000, 16), (1000, 20)] {
            let values = generate_test_data(count, "value");
            let mut filter = build_from_strings(&values, power);
            // Only meaningful when no collision changed the query modulus.
            assert_eq!(filter.len(), count);
            for value in &values {
                assert!(filter.contains(value.as_bytes()), "false negative: {value}");
            }
        }
    }

    #[test]
    fn test_false_positive_rate() {
        let power = 6;
        let values = generate_test_data(5000, "value");
        let mut filter = build_from_strings(&values, power);
        let expected = filter.false_positive_probability();
        assert_eq!(expected, 1.0 / 64.0);

        let negatives = generate_test_data(20000, "value_negative");
        let false_positives = negatives
            .iter()
            .filter(|v| filter.contains(v.as_bytes()))
            .count();
        let rate = false_positives as f64 / negatives.len() as f64;
        assert!(
            rate > expected / 3.0 && rate < expected * 2.0,
            "false positive rate {rate} too far from {expected}"
        );
    }

    #[test]
    fn test_config_driven_filter() {
        let config = FilterConfig {
            power: 18,
            hash_algorithm: XXH32_ALGORITHM.to_string(),
            hash_seed: 0x5eed,
        };
        let values = generate_test_data(300, "cfg");
        let mut builder = FilterBuilder::from_config(&config).unwrap();
        builder.extend_values(&values);
        let filter = builder.into_filter().unwrap();

        let mut restored = decode(&encode(&filter), config.power, config.create_hasher().unwrap())
            .unwrap();
        assert!(restored.same_members(&filter));
        if restored.len() == values.len() {
            for value in &values {
                assert!(restored.contains(value.as_bytes()));
            }
        }
    }

    #[test]
    fn test_shared_filter_queried_concurrently() {
        let values = generate_test_data(1000, "value");
        let filter = build_from_strings(&values, 20);
        assert_eq!(filter.len(), values.len());

        std::thread::scope(|s| {
            for chunk in values.chunks(250) {
                let filter = &filter;
                s.spawn(move || {
                    let mut hasher = Murmur3Hasher::default();
                    for value in chunk {
                        assert!(filter.contains_with(&mut hasher, value.as_bytes()));
                    }
                });
            }
        });
    }
}

#[cfg(test)]
mod codec_tests {
    use super::*;

    #[test]
    fn test_encode_decode() {
        let cases = [(vec![1u32, 3, 4, 5], 4u32), (shuffled_range(1000, 42), 4)];
        for (values, power) in cases {
            let mut filter = build_from_ints(&values, power);
            let bits = encode(&filter);
            let mut restored = decode(&bits, filter.power(), filter.hasher().clone()).unwrap();

            assert_eq!(restored.sorted_members(), filter.sorted_members());
            for &v in &values {
                let bytes = int_to_bytes(v);
                assert_eq!(filter.contains(&bytes), restored.contains(&bytes));
            }
        }
    }

    #[test]
    fn test_roundtrip_every_power() {
        for power in MIN_POWER..=MAX_POWER {
            let count = (u32::MAX >> power).min(300) as usize;
            let values = generate_test_data(count, "power");
            let filter = build_from_strings(&values, power);

            let bits = encode(&filter);
            assert_eq!(bits.len(), encoded_bit_len(&filter), "power {power}");

            let restored = decode(&bits, power, Murmur3Hasher::default()).unwrap();
            assert!(restored.same_members(&filter), "power {power}");
            // Re-encoding a decoded filter is bit-for-bit identical.
            assert_eq!(encode(&restored), bits, "power {power}");
        }
    }

    #[test]
    fn test_overflowing_modulus_is_rejected() {
        let values = generate_test_data(2, "overflow");
        let mut builder = FilterBuilder::new(MAX_POWER).unwrap();
        builder.extend_values(&values);
        let err = builder.filter().unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::ModulusOverflow { count: 2, power: 31 }
        ));
    }

    #[test]
    fn test_truncated_stream_is_detected() {
        let power = 7;
        let filter = build_from_strings(&generate_test_data(64, "trunc"), power);
        let bits = encode(&filter);
        for chop in 1..=power as usize {
            let mut short = bits.clone();
            short.truncate(bits.len() - chop);
            let err = decode(&short, power, Murmur3Hasher::default()).unwrap_err();
            assert!(matches!(err.kind(), ErrorKind::TruncatedInput { .. }));
        }
    }

    #[test]
    fn test_packed_bytes_roundtrip() {
        for power in [1, 3, 8, 12] {
            let filter = build_from_strings(&generate_test_data(200, "packed"), power);
            let bits = encode(&filter);

            let exact = BitSequence::from_bytes(bits.as_bytes().to_vec(), bits.len()).unwrap();
            let restored = decode(&exact, power, Murmur3Hasher::default()).unwrap();
            assert!(restored.same_members(&filter));

            let restored = decode_packed(bits.as_bytes(), power, Murmur3Hasher::default()).unwrap();
            assert!(restored.same_members(&filter), "power {power}");
        }
    }

    #[test]
    fn test_empty_filter_encodes_to_nothing() {
        let empty = decode(&BitSequence::new(), 9, Murmur3Hasher::default()).unwrap();
        assert!(empty.is_empty());
        assert!(encode(&empty).is_empty());
        assert_eq!(encoded_bit_len(&empty), 0);
    }

    #[test]
    fn test_power_mismatch_is_not_detected() {
        let filter = build_from_ints(&[1, 2, 3, 4, 5, 6, 7, 8], 9);
        let bits = encode(&filter);
        // Decoding with another power is an unchecked caller contract: it may
        // fail or produce a different set, but never the original one.
        if let Ok(other) = decode(&bits, 5, Murmur3Hasher::default()) {
            assert!(!other.same_members(&filter));
        }
    }
}
