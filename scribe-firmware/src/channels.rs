//! Inter-task channels and signals
//!
//! The receive queue is handed to its two tasks as split halves. Everything
//! else shared between tasks lives here.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use scribe_core::outbox::{Outbox, QueuedSerial, DEFAULT_DEPTH};

/// Frames waiting for the UART transmit task
pub const SERIAL_TX_DEPTH: usize = DEFAULT_DEPTH;

/// Reset button pressed; taken by the control loop on its next iteration
pub static RESET_REQUEST: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Reports queued by the control loop and the report button
pub static SERIAL_TX: Outbox<CriticalSectionRawMutex, SERIAL_TX_DEPTH> = Channel::new();

/// Sending side of [`SERIAL_TX`]
pub type SerialTx = QueuedSerial<'static, CriticalSectionRawMutex, SERIAL_TX_DEPTH>;
