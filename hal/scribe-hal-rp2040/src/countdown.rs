//! Countdown on the embassy time driver
//!
//! The RP2040 has no prescaled 16-bit timer with the 1/8/64/256 tiers the
//! board configuration describes. The countdown keeps the configured tier
//! semantics by converting the loaded divider and compare value back into
//! the period that hardware would produce, and then tracks deadlines on the
//! 1 MHz system timer.

use core::future::pending;

use embassy_time::{Duration, Instant, Timer};
use scribe_core::timer::TimerSettings;
use scribe_core::traits::Countdown;

/// Free-running countdown with a latched expiry flag
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickCountdown {
    clock_hz: u32,
    period: Duration,
    deadline: Option<Instant>,
    expired: bool,
    listening: bool,
}

impl TickCountdown {
    /// Countdown emulating a timer clocked at `clock_hz`
    pub const fn new(clock_hz: u32) -> Self {
        Self {
            clock_hz,
            period: Duration::from_ticks(0),
            deadline: None,
            expired: false,
            listening: false,
        }
    }

    /// Loaded period
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Whether the expiry notification is enabled
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Latch an elapsed period and move the deadline past `now`
    ///
    /// Periods missed while nobody polled collapse into the single latched
    /// flag, the same way a hardware interrupt flag would.
    fn poll(&mut self, now: Instant) {
        let Some(mut deadline) = self.deadline else {
            return;
        };
        if now < deadline {
            return;
        }

        self.expired = true;
        while deadline <= now {
            deadline += self.period;
        }
        self.deadline = Some(deadline);
    }
}

impl Countdown for TickCountdown {
    fn stop(&mut self) {
        self.deadline = None;
    }

    fn reset(&mut self) {
        // Counting always restarts from zero in `start`
    }

    fn load(&mut self, settings: TimerSettings) {
        let us = settings.period_us(self.clock_hz).max(1);
        self.period = Duration::from_micros(us);
    }

    fn start(&mut self) {
        self.deadline = Some(Instant::now() + self.period);
    }

    fn is_expired(&mut self) -> bool {
        self.poll(Instant::now());
        self.expired
    }

    fn clear_expired(&mut self) {
        self.expired = false;
    }

    fn listen(&mut self) {
        self.listening = true;
    }

    fn unlisten(&mut self) {
        self.listening = false;
    }

    async fn expired(&mut self) {
        loop {
            if self.is_expired() {
                return;
            }
            match self.deadline {
                Some(deadline) => Timer::at(deadline).await,
                // Stopped countdowns never expire
                None => pending::<()>().await,
            }
        }
    }
}
