//! Periodic timer
//!
//! Converts millisecond periods into hardware countdown settings and drives
//! a [`Countdown`](crate::traits::Countdown) with them.

pub mod periodic;
pub mod prescaler;

pub use periodic::PeriodicTimer;
pub use prescaler::{TimerClock, TimerError, TimerSettings, MAX_COMPARE, MAX_DIVIDERS};
