//! RP2040 implementations of the Scribe hardware traits
//!
//! - [`TickCountdown`]: divider/compare countdown emulated on the embassy
//!   time driver
//! - [`SpiLcd`]: serial-input character LCD on an SPI bus
//! - [`ButtonEdge`] and [`SignalLatch`]: report and reset buttons

#![no_std]

pub mod countdown;
pub mod input;
pub mod lcd;

pub use countdown::TickCountdown;
pub use input::{ButtonEdge, SignalLatch};
pub use lcd::SpiLcd;
