//! Report button task
//!
//! Sends the received count over the UART on a button press, then ignores
//! the button for the guard interval.

use defmt::*;

use scribe_core::guard::GuardedEdgeInput;
use scribe_core::queue::Tally;
use scribe_hal_rp2040::{ButtonEdge, TickCountdown};

use crate::channels::SerialTx;
use crate::QUEUE_CAPACITY;

/// Guarded report button as wired on the board
pub type ReportButton = GuardedEdgeInput<TickCountdown, ButtonEdge<'static>>;

#[embassy_executor::task]
pub async fn report_button_task(
    mut button: ReportButton,
    tally: Tally<'static, QUEUE_CAPACITY>,
    mut serial: SerialTx,
) {
    info!("Report button task started (guard {} ms)", button.guard_ms());

    loop {
        match button.cycle(|| tally.received(), &mut serial).await {
            Ok(count) => debug!("Reported count {}", count),
            Err(e) => warn!("Count report failed: {:?}", e),
        }

        trace!(
            "Reports {}, suppressed {}, overwritten {}, dropped {}",
            button.reports(),
            button.suppressed(),
            tally.overwritten(),
            tally.dropped()
        );
    }
}
