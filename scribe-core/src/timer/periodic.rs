//! Periodic timer over a hardware countdown

use super::prescaler::{TimerClock, TimerError, TimerSettings};
use crate::traits::Countdown;

/// A countdown programmed in milliseconds
///
/// Every [`configure`](Self::configure) stops the countdown, zeroes the
/// counter, applies the divider tier and compare value for the requested
/// period, drops any stale expiry and restarts. The countdown then keeps
/// firing once per period until reconfigured or [`disarm`](Self::disarm)ed.
pub struct PeriodicTimer<C> {
    countdown: C,
    clock: TimerClock,
    settings: Option<TimerSettings>,
    running: bool,
}

impl<C: Countdown> PeriodicTimer<C> {
    /// Wrap a countdown running from `clock`
    pub fn new(countdown: C, clock: TimerClock) -> Self {
        Self {
            countdown,
            clock,
            settings: None,
            running: false,
        }
    }

    /// Program the countdown for `ms` milliseconds and start it
    pub fn configure(&mut self, ms: u32) -> Result<TimerSettings, TimerError> {
        let settings = self.clock.settings_for(ms)?;

        self.countdown.stop();
        self.countdown.reset();
        self.countdown.load(settings);
        self.countdown.clear_expired();
        self.countdown.start();

        self.settings = Some(settings);
        self.running = true;
        Ok(settings)
    }

    /// Program the countdown and enable its expiry interrupt
    ///
    /// Does not wait; expiry is observed later through the interrupt or
    /// [`expiry`](Self::expiry).
    pub fn arm(&mut self, ms: u32) -> Result<TimerSettings, TimerError> {
        let settings = self.configure(ms)?;
        self.countdown.listen();
        Ok(settings)
    }

    /// Stop and zero the countdown, dropping any pending expiry
    pub fn disarm(&mut self) {
        self.countdown.unlisten();
        self.countdown.stop();
        self.countdown.reset();
        self.countdown.clear_expired();
        self.running = false;
    }

    /// Spin until the current period elapses, then clear the flag
    ///
    /// Never returns if the countdown was not configured.
    pub fn wait_for_expiry(&mut self) {
        while !self.countdown.is_expired() {
            core::hint::spin_loop();
        }
        self.countdown.clear_expired();
    }

    /// Wait for the current period to elapse, then clear the flag
    pub async fn expiry(&mut self) {
        self.countdown.expired().await;
        self.countdown.clear_expired();
    }

    /// Blocking delay of `ms` milliseconds
    pub fn delay_ms(&mut self, ms: u32) -> Result<(), TimerError> {
        self.configure(ms)?;
        self.wait_for_expiry();
        Ok(())
    }

    /// Cooperative delay of `ms` milliseconds
    pub async fn delay(&mut self, ms: u32) -> Result<(), TimerError> {
        self.configure(ms)?;
        self.expiry().await;
        Ok(())
    }

    /// Settings applied by the last successful configure
    pub fn settings(&self) -> Option<TimerSettings> {
        self.settings
    }

    /// Whether the countdown is currently counting
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Input clock of this timer
    pub fn clock(&self) -> &TimerClock {
        &self.clock
    }

    /// Underlying countdown
    pub fn countdown(&self) -> &C {
        &self.countdown
    }

    /// Underlying countdown, mutably
    pub fn countdown_mut(&mut self) -> &mut C {
        &mut self.countdown
    }
}
