//! Reset button task
//!
//! Turns presses into a reset request. The request stays latched until the
//! control loop takes it, and presses in between collapse into one.

use defmt::*;
use embassy_rp::gpio::Input;

use crate::channels::RESET_REQUEST;

#[embassy_executor::task]
pub async fn reset_button_task(mut pin: Input<'static>) {
    info!("Reset button task started");

    loop {
        pin.wait_for_falling_edge().await;
        debug!("Reset requested");
        RESET_REQUEST.signal(());
    }
}
