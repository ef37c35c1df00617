//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod countdown;
pub mod display;
pub mod input;
pub mod serial;

pub use countdown::Countdown;
pub use display::{CharDisplay, CharDisplayExt, DisplayError};
pub use input::{EdgeLine, Latch};
pub use serial::{ReportExt, SerialError, SerialOut};
