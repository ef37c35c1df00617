use proptest::prelude::*;
use scribe_core::timer::{TimerClock, TimerError, MAX_COMPARE};

proptest! {
    #[test]
    fn smallest_fitting_divider(ms in 1u32..=9102) {
        let clock = TimerClock::default();
        let steps = clock.steps_for(ms);
        let s = clock.settings_for(ms).unwrap();

        prop_assert!(s.compare as u32 <= MAX_COMPARE);
        prop_assert_eq!(s.compare as u64, steps / s.divider as u64);
        prop_assert_eq!(clock.dividers[s.tier as usize], s.divider);

        // No smaller tier would have fit
        for &d in &clock.dividers[..s.tier as usize] {
            prop_assert!(steps / d as u64 > MAX_COMPARE as u64);
        }
    }

    #[test]
    fn programmed_period_never_longer(ms in 1u32..=9102) {
        let clock = TimerClock::default();
        let s = clock.settings_for(ms).unwrap();
        prop_assert!(s.period_us(clock.clock_hz) <= ms as u64 * 1000);
    }

    #[test]
    fn too_long_rejected(ms in 9103u32..=u32::MAX) {
        let clock = TimerClock::default();
        prop_assert_eq!(clock.settings_for(ms), Err(TimerError::PeriodTooLong { ms }));
    }

    #[test]
    fn any_valid_clock_is_consistent(
        clock_hz in 1_000u32..200_000_000,
        ms in 1u32..60_000,
    ) {
        let clock = TimerClock::new(clock_hz, &[1, 8, 64, 256]).unwrap();
        match clock.settings_for(ms) {
            Ok(_) => prop_assert!(ms <= clock.max_period_ms()),
            Err(TimerError::PeriodTooLong { .. }) => prop_assert!(ms > clock.max_period_ms()),
            Err(TimerError::ZeroPeriod) => prop_assert_eq!(clock.steps_for(ms), 0),
            Err(e) => prop_assert!(false, "unexpected {:?}", e),
        }
    }
}

#[test]
fn reference_periods() {
    let clock = TimerClock::default();
    let cases = [(7, 1, 12902), (10, 1, 18432), (100, 8, 23040), (1000, 64, 28800)];
    for (ms, divider, compare) in cases {
        let s = clock.settings_for(ms).unwrap();
        assert_eq!((s.divider, s.compare), (divider, compare), "{ms} ms");
    }
    assert_eq!(clock.max_period_ms(), 9102);
}
