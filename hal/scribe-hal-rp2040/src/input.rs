//! Push buttons
//!
//! The report button is an edge line on a GPIO with the RP2040's edge
//! interrupt. The reset button only sets a latch that the control loop
//! samples once per iteration.

use embassy_rp::gpio::Input;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use scribe_core::traits::{EdgeLine, Latch};

/// Active-low button as an [`EdgeLine`]
///
/// Edge waits are armed fresh on every [`wait_edge`](EdgeLine::wait_edge)
/// call, so presses while disabled are never delivered later and
/// [`clear_pending`](EdgeLine::clear_pending) has nothing to drop. Edges
/// that arrive while disabled are counted instead.
pub struct ButtonEdge<'d> {
    pin: Input<'d>,
    enabled: bool,
    ignored: u32,
}

impl<'d> ButtonEdge<'d> {
    pub fn new(pin: Input<'d>) -> Self {
        Self {
            pin,
            enabled: false,
            ignored: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl EdgeLine for ButtonEdge<'_> {
    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn clear_pending(&mut self) {}

    async fn wait_edge(&mut self) {
        loop {
            self.pin.wait_for_falling_edge().await;
            if self.enabled {
                return;
            }
            self.ignored = self.ignored.wrapping_add(1);
            #[cfg(feature = "defmt")]
            defmt::trace!("Button edge ignored while muted ({})", self.ignored);
        }
    }

    fn ignored(&self) -> u32 {
        self.ignored
    }
}

/// Request flag raised from another task
pub type LatchSignal = Signal<CriticalSectionRawMutex, ()>;

/// [`Latch`] over a static signal
pub struct SignalLatch {
    signal: &'static LatchSignal,
}

impl SignalLatch {
    pub fn new(signal: &'static LatchSignal) -> Self {
        Self { signal }
    }
}

impl Latch for SignalLatch {
    fn take(&mut self) -> bool {
        self.signal.try_take().is_some()
    }
}
