//! Board-agnostic core logic for the Scribe serial display relay
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (countdown, display, serial, edge input)
//! - Transmit outbox feeding a single UART writer task
//! - Lock-free byte queue between the UART receiver and the control loop
//! - Periodic timer maths (divider tier + compare value selection)
//! - Guarded edge input (report-and-mute debounce state machine)
//! - Console rendering and the paced control loop
//! - Board configuration types and parser

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod console;
pub mod control;
pub mod guard;
pub mod outbox;
pub mod queue;
pub mod timer;
pub mod traits;

#[cfg(test)]
mod mock;
