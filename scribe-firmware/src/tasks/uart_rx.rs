//! UART receive task
//!
//! Producer side of the receive queue: every byte read from the UART is
//! pushed, whatever the control loop is doing.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use scribe_core::queue::{Producer, Push};

use crate::QUEUE_CAPACITY;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 32;

/// UART RX task - feeds received bytes into the queue
#[embassy_executor::task]
pub async fn uart_rx_task(mut rx: BufferedUartRx, mut queue: Producer<'static, QUEUE_CAPACITY>) {
    info!("UART RX task started");

    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match queue.push(byte) {
                        Push::Stored => {}
                        Push::Overwrote => warn!("RX queue full, overwrote unread byte"),
                        Push::Dropped => warn!("RX queue full, dropped {=u8:#04x}", byte),
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
