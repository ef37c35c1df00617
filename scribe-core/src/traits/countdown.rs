//! Hardware countdown abstraction

use crate::timer::TimerSettings;

/// A free-running hardware countdown
///
/// Models a 16-bit timer with a clock divider and a period (compare)
/// register. Once started the counter reloads every period and latches an
/// expiry flag that software must clear. The flag may also raise an
/// interrupt when listening is enabled.
#[allow(async_fn_in_trait)]
pub trait Countdown {
    /// Stop counting; the expiry flag keeps its state
    fn stop(&mut self);

    /// Zero the counter
    fn reset(&mut self);

    /// Apply divider and compare value
    ///
    /// Only called while the countdown is stopped.
    fn load(&mut self, settings: TimerSettings);

    /// Start (or restart) counting from the current counter value
    fn start(&mut self);

    /// Check the expiry flag
    fn is_expired(&mut self) -> bool;

    /// Clear the expiry flag
    fn clear_expired(&mut self);

    /// Enable the expiry interrupt
    fn listen(&mut self);

    /// Disable the expiry interrupt
    fn unlisten(&mut self);

    /// Resolve once the expiry flag is set
    ///
    /// The default spins on [`is_expired`](Self::is_expired). Implementations
    /// backed by an interrupt or a time driver should suspend instead.
    async fn expired(&mut self) {
        while !self.is_expired() {
            core::hint::spin_loop();
        }
    }
}
