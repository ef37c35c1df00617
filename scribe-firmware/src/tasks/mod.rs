//! Embassy async tasks
//!
//! Each task runs independently and communicates via the receive queue,
//! the transmit outbox and signals.

pub mod control;
pub mod report_button;
pub mod reset_button;
pub mod uart_rx;
pub mod uart_tx;

pub use control::{control_task, ControlLoopFw};
pub use report_button::{report_button_task, ReportButton};
pub use reset_button::reset_button_task;
pub use uart_rx::uart_rx_task;
pub use uart_tx::uart_tx_task;
