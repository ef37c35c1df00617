//! UART transmit task
//!
//! Sole owner of the UART transmitter. Drains the report outbox and writes
//! each frame asynchronously, so no other task ever waits on the line.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use crate::channels::SERIAL_TX;

#[embassy_executor::task]
pub async fn uart_tx_task(mut tx: BufferedUartTx) {
    info!("UART TX task started");

    loop {
        let frame = SERIAL_TX.receive().await;
        match tx.write_all(&frame).await {
            Ok(()) => trace!("TX: {} bytes", frame.len()),
            Err(e) => warn!("UART write error: {:?}", e),
        }
    }
}
