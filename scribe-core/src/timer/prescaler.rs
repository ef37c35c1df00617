//! Divider tier selection
//!
//! A countdown counts input clock steps divided by one of a fixed set of
//! dividers, and fires when the counter reaches a 16-bit compare value.
//! For a requested period the smallest divider whose compare value still
//! fits in 16 bits gives the finest resolution.

use heapless::Vec;

/// Largest compare value the counter register can hold
pub const MAX_COMPARE: u32 = u16::MAX as u32;

/// Maximum number of divider tiers a board can declare
pub const MAX_DIVIDERS: usize = 8;

/// Errors from timer period computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerError {
    /// Requested period rounds down to zero clock steps
    ZeroPeriod,
    /// No divider tier fits the requested period into the counter
    PeriodTooLong {
        /// Requested period in milliseconds
        ms: u32,
    },
    /// Divider list is empty
    NoDividers,
    /// Divider list contains a zero or is not strictly ascending
    InvalidDividers,
    /// Input clock rate is zero
    ZeroClock,
}

/// Countdown settings for one period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerSettings {
    /// Index of the divider in the board's tier list
    pub tier: u8,
    /// Clock divider applied to the counter input
    pub divider: u16,
    /// Counter value at which the countdown fires
    pub compare: u16,
}

impl TimerSettings {
    /// Programmed period in microseconds for a given input clock
    ///
    /// This is the period the hardware will actually produce, after the
    /// compare value was truncated.
    pub fn period_us(&self, clock_hz: u32) -> u64 {
        if clock_hz == 0 {
            return 0;
        }
        self.compare as u64 * self.divider as u64 * 1_000_000 / clock_hz as u64
    }
}

/// Timer input clock and its allowed divider tiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerClock {
    /// Counter input clock in Hz (instruction clock on most parts)
    pub clock_hz: u32,
    /// Allowed dividers, strictly ascending
    pub dividers: Vec<u16, MAX_DIVIDERS>,
}

impl Default for TimerClock {
    /// 7.3728 MHz crystal with Fcy = Fosc / 4 and the classic 1/8/64/256 tiers
    fn default() -> Self {
        let mut dividers = Vec::new();
        for d in [1u16, 8, 64, 256] {
            let _ = dividers.push(d);
        }
        Self {
            clock_hz: 1_843_200,
            dividers,
        }
    }
}

impl TimerClock {
    /// Create a clock from a divider list
    pub fn new(clock_hz: u32, dividers: &[u16]) -> Result<Self, TimerError> {
        let dividers = Vec::from_slice(dividers).map_err(|_| TimerError::InvalidDividers)?;
        let clock = Self { clock_hz, dividers };
        clock.validate()?;
        Ok(clock)
    }

    /// Check the clock rate and divider ordering
    pub fn validate(&self) -> Result<(), TimerError> {
        if self.clock_hz == 0 {
            return Err(TimerError::ZeroClock);
        }
        if self.dividers.is_empty() {
            return Err(TimerError::NoDividers);
        }
        if self.dividers.contains(&0) {
            return Err(TimerError::InvalidDividers);
        }
        if self.dividers.windows(2).any(|w| w[0] >= w[1]) {
            return Err(TimerError::InvalidDividers);
        }
        Ok(())
    }

    /// Number of undivided clock steps in `ms` milliseconds
    pub fn steps_for(&self, ms: u32) -> u64 {
        self.clock_hz as u64 * ms as u64 / 1000
    }

    /// Pick the smallest divider that fits `ms` into the counter
    pub fn settings_for(&self, ms: u32) -> Result<TimerSettings, TimerError> {
        let steps = self.steps_for(ms);
        if steps == 0 {
            return Err(TimerError::ZeroPeriod);
        }

        self.dividers
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d != 0)
            .find_map(|(tier, &divider)| {
                let compare = steps / divider as u64;
                (compare <= MAX_COMPARE as u64).then_some(TimerSettings {
                    tier: tier as u8,
                    divider,
                    compare: compare as u16,
                })
            })
            .ok_or(TimerError::PeriodTooLong { ms })
    }

    /// Longest period in milliseconds the largest tier can represent
    pub fn max_period_ms(&self) -> u32 {
        let Some(&largest) = self.dividers.last() else {
            return 0;
        };
        if self.clock_hz == 0 {
            return 0;
        }
        // steps / d <= MAX_COMPARE  <=>  clock * ms < (MAX_COMPARE + 1) * d * 1000
        let bound = (MAX_COMPARE as u64 + 1) * largest as u64 * 1000;
        let ms = (bound - 1) / self.clock_hz as u64;
        ms.min(u32::MAX as u64) as u32
    }

    /// Whether a period can be programmed
    pub fn supports(&self, ms: u32) -> bool {
        self.settings_for(ms).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_period_uses_first_tier() {
        let clock = TimerClock::default();
        let s = clock.settings_for(10).unwrap();
        assert_eq!(s.divider, 1);
        assert_eq!(s.tier, 0);
        assert_eq!(s.compare, 18432);
    }

    #[test]
    fn test_one_second_uses_div64() {
        let clock = TimerClock::default();
        let s = clock.settings_for(1000).unwrap();
        assert_eq!(s.divider, 64);
        assert_eq!(s.tier, 2);
        assert_eq!(s.compare, 28800);
    }

    #[test]
    fn test_guard_period_uses_div8() {
        let clock = TimerClock::default();
        let s = clock.settings_for(100).unwrap();
        assert_eq!(s.divider, 8);
        assert_eq!(s.compare, 23040);
    }

    #[test]
    fn test_boundary_of_first_tier() {
        let clock = TimerClock::default();
        // 35 ms = 64512 steps, still fits undivided
        assert_eq!(clock.settings_for(35).unwrap().divider, 1);
        // 36 ms = 66355 steps, needs the next tier
        let s = clock.settings_for(36).unwrap();
        assert_eq!(s.divider, 8);
        assert_eq!(s.compare, 8294);
    }

    #[test]
    fn test_max_period() {
        let clock = TimerClock::default();
        assert_eq!(clock.max_period_ms(), 9102);
        assert!(clock.supports(9102));
        assert_eq!(
            clock.settings_for(9103),
            Err(TimerError::PeriodTooLong { ms: 9103 })
        );
    }

    #[test]
    fn test_zero_period_rejected() {
        let clock = TimerClock::default();
        assert_eq!(clock.settings_for(0), Err(TimerError::ZeroPeriod));
    }

    #[test]
    fn test_validate_dividers() {
        assert_eq!(TimerClock::new(1000, &[]), Err(TimerError::NoDividers));
        assert_eq!(
            TimerClock::new(1000, &[8, 1]),
            Err(TimerError::InvalidDividers)
        );
        assert_eq!(
            TimerClock::new(1000, &[0, 8]),
            Err(TimerError::InvalidDividers)
        );
        assert_eq!(TimerClock::new(0, &[1]), Err(TimerError::ZeroClock));
        assert!(TimerClock::new(125_000_000, &[1, 16, 256, 4096]).is_ok());
    }

    #[test]
    fn test_programmed_period() {
        let clock = TimerClock::default();
        let s = clock.settings_for(1000).unwrap();
        assert_eq!(s.period_us(clock.clock_hz), 1_000_000);

        // 7 ms = 12902.4 steps, truncated to 12902
        let s = clock.settings_for(7).unwrap();
        assert_eq!(s.compare, 12902);
        assert_eq!(s.period_us(clock.clock_hz), 6999);
    }
}
