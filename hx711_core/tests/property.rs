//! Property tests over the pure conversion and statistics layers.

use hx711_core::{extend_sign_24, Mode, ReadStrategy, Stats, RAW_MAX, RAW_MIN};
use proptest::prelude::*;

proptest! {
    #[test]
    fn sign_extension_round_trips_every_sample(raw in RAW_MIN..=RAW_MAX) {
        let wire = (raw as u32) & 0xFF_FFFF;
        prop_assert_eq!(extend_sign_24(wire), raw);
    }

    #[test]
    fn sign_extension_ignores_bits_above_24(low in 0u32..0x100_0000, upper in 0u32..0x100) {
        prop_assert_eq!(extend_sign_24(low | (upper << 24)), extend_sign_24(low));
    }

    #[test]
    fn mode_pulse_mapping_round_trips(
        mode in prop::sample::select(vec![Mode::A128, Mode::B32, Mode::A64])
    ) {
        prop_assert_eq!(Mode::from_pulses(mode.pulses()).unwrap(), mode);
    }

    #[test]
    fn pulse_counts_outside_the_protocol_are_rejected(pulses in proptest::num::u8::ANY) {
        prop_assume!(!(25..=27).contains(&pulses));
        prop_assert!(Mode::from_pulses(pulses).is_err());
    }

    #[test]
    fn stats_orderings_hold(values in prop::collection::vec(-1.0e6..1.0e6f64, 1..200)) {
        let s = Stats::compute(&values);
        prop_assert!(s.min <= s.median);
        prop_assert!(s.median <= s.max);
        prop_assert!(s.std_dev >= 0.0);
        prop_assert!(s.in_range(s.median, 0.0));
    }

    #[test]
    fn constant_sequences_have_no_spread(v in -1.0e6..1.0e6f64, n in 1usize..50) {
        let s = Stats::compute(&vec![v; n]);
        prop_assert!(s.std_dev <= 1e-9 * v.abs().max(1.0));
        prop_assert_eq!(s.min, s.max);
    }

    #[test]
    fn mean_lies_within_the_sample_bounds(
        samples in prop::collection::vec(RAW_MIN..=RAW_MAX, 1..64)
    ) {
        let mean = ReadStrategy::Mean.reduce(&samples);
        let lo = *samples.iter().min().unwrap();
        let hi = *samples.iter().max().unwrap();
        prop_assert!(f64::from(lo) <= mean && mean <= f64::from(hi));
    }
}
