//! Property tests for capacity scaling and synthetic data

use proptest::prelude::*;

use sunmeter_config::WattPeak;
use sunmeter_core::capacity::{
    scale_raw, utilisation_percent, utilisation_permille, ScaleError, PERMILLE_FULL,
};
use sunmeter_core::synthetic::{SyntheticSource, MIN_PERIOD};

fn watt_peak() -> impl Strategy<Value = WattPeak> {
    (1u32..).prop_map(|w| WattPeak::new(w).unwrap())
}

proptest! {
    #[test]
    fn prop_scaled_power_never_exceeds_capacity(
        capacity in watt_peak(),
        raw in any::<u32>(),
        full_scale in 1u32..,
    ) {
        let watts = scale_raw(capacity, raw, full_scale).unwrap();
        prop_assert!(watts <= capacity.watts());
        if raw >= full_scale {
            prop_assert_eq!(watts, capacity.watts());
        }
    }

    #[test]
    fn prop_scaling_is_monotonic(
        capacity in watt_peak(),
        a in any::<u32>(),
        b in any::<u32>(),
        full_scale in 1u32..,
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            scale_raw(capacity, low, full_scale).unwrap()
                <= scale_raw(capacity, high, full_scale).unwrap()
        );
    }

    #[test]
    fn prop_zero_full_scale_rejected(capacity in watt_peak(), raw in any::<u32>()) {
        prop_assert_eq!(scale_raw(capacity, raw, 0), Err(ScaleError::ZeroFullScale));
    }

    #[test]
    fn prop_utilisation_saturates(capacity in watt_peak(), power in any::<u32>()) {
        let permille = utilisation_permille(capacity, power);
        prop_assert!(permille <= PERMILLE_FULL);
        prop_assert!(utilisation_percent(capacity, power) <= 100);
        if power >= capacity.watts() {
            prop_assert_eq!(permille, PERMILLE_FULL);
        }
    }

    #[test]
    fn prop_synthetic_day_stays_within_capacity(
        capacity in watt_peak(),
        period in 0u32..1000,
        tick in any::<u32>(),
    ) {
        let source = SyntheticSource::with_period(capacity, period);
        prop_assert!(source.period() >= MIN_PERIOD);
        prop_assert!(source.power_at(tick) <= capacity.watts());
        prop_assert_eq!(source.power_at(tick), source.power_at(tick % source.period()));
    }
}
