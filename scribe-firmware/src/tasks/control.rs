//! Control loop task
//!
//! Consumer side of the receive queue. Runs the paced render loop forever;
//! I/O failures are logged and the next iteration carries on.

use defmt::*;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};

use scribe_core::control::ControlLoop;
use scribe_hal_rp2040::{SignalLatch, SpiLcd, TickCountdown};

use crate::channels::SerialTx;
use crate::QUEUE_CAPACITY;

/// Control loop as wired on the board
pub type ControlLoopFw = ControlLoop<
    'static,
    TickCountdown,
    SpiLcd<Spi<'static, SPI0, Blocking>>,
    SerialTx,
    SignalLatch,
    QUEUE_CAPACITY,
>;

#[embassy_executor::task]
pub async fn control_task(mut ctl: ControlLoopFw) {
    info!("Control task started");

    match ctl.start().await {
        Ok(()) => info!("Display ready"),
        Err(e) => error!("Control loop startup failed, pacing anyway: {:?}", e),
    }

    loop {
        match ctl.cycle().await {
            Ok(iteration) => {
                if let Some(byte) = iteration.byte {
                    trace!("Rendered {=u8:#04x}", byte);
                }
                if iteration.reset {
                    info!("Count reset");
                }
            }
            Err(e) => warn!("Control iteration failed: {:?}", e),
        }
    }
}
