//! Paced control loop
//!
//! Each iteration burns the simulated workload, drains at most one byte from
//! the receive queue onto the console, services the reset latch and then
//! waits for the next pacing tick. The pacing timer free-runs, so the
//! iteration period stays fixed whatever the work took (as long as the work
//! fits inside it).

use crate::config::{BoardConfig, LoopTiming};
use crate::console::Console;
use crate::queue::Consumer;
use crate::timer::{PeriodicTimer, TimerError};
use crate::traits::{CharDisplay, Countdown, DisplayError, Latch, ReportExt, SerialError, SerialOut};

/// Errors from one control loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlError {
    Timer(TimerError),
    Display(DisplayError),
    Serial(SerialError),
}

impl From<TimerError> for ControlError {
    fn from(e: TimerError) -> Self {
        ControlError::Timer(e)
    }
}

impl From<DisplayError> for ControlError {
    fn from(e: DisplayError) -> Self {
        ControlError::Display(e)
    }
}

impl From<SerialError> for ControlError {
    fn from(e: SerialError) -> Self {
        ControlError::Serial(e)
    }
}

/// What one iteration did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Iteration {
    /// Byte rendered this iteration
    pub byte: Option<u8>,
    /// Reset latch was observed
    pub reset: bool,
}

/// Consumer side of the relay
pub struct ControlLoop<'a, C, D, S, L, const N: usize> {
    rx: Consumer<'a, N>,
    console: Console<D>,
    serial: S,
    reset: L,
    workload: PeriodicTimer<C>,
    pacer: PeriodicTimer<C>,
    timing: LoopTiming,
    report_on_receive: bool,
    iterations: u32,
}

impl<'a, C, D, S, L, const N: usize> ControlLoop<'a, C, D, S, L, N>
where
    C: Countdown,
    D: CharDisplay,
    S: SerialOut,
    L: Latch,
{
    /// Assemble the loop; nothing is touched until [`start`](Self::start)
    pub fn new(
        rx: Consumer<'a, N>,
        console: Console<D>,
        serial: S,
        reset: L,
        workload: PeriodicTimer<C>,
        pacer: PeriodicTimer<C>,
        config: &BoardConfig,
    ) -> Self {
        Self {
            rx,
            console,
            serial,
            reset,
            workload,
            pacer,
            timing: config.timing,
            report_on_receive: config.console.report_on_receive,
            iterations: 0,
        }
    }

    /// Let the display settle, draw the count label and start pacing
    ///
    /// Pacing starts even if the label could not be drawn, so
    /// [`cycle`](Self::cycle) keeps running after a display error here.
    pub async fn start(&mut self) -> Result<(), ControlError> {
        self.workload.delay(self.timing.settle_ms).await?;
        let drawn = self.console.init();
        self.pacer.configure(self.timing.period_ms)?;
        drawn?;
        Ok(())
    }

    /// Run one iteration, including the wait for the next pacing tick
    ///
    /// The pacing wait happens even when rendering failed, so a broken
    /// display does not turn the loop into a spin.
    pub async fn cycle(&mut self) -> Result<Iteration, ControlError> {
        self.workload.delay(self.timing.workload_ms).await?;

        let outcome = self.process();
        self.iterations = self.iterations.wrapping_add(1);

        self.pacer.expiry().await;
        outcome
    }

    fn process(&mut self) -> Result<Iteration, ControlError> {
        let mut iteration = Iteration::default();

        if let Some(byte) = self.rx.pop() {
            let received = self.rx.received();
            self.console.show_byte(byte, received)?;
            if self.report_on_receive {
                self.serial.report(received)?;
            }
            iteration.byte = Some(byte);
        }

        if self.reset.take() {
            self.rx.reset();
            self.console.reset(self.rx.received())?;
            iteration.reset = true;
        }

        self.console.park_cursor()?;
        Ok(iteration)
    }

    /// Iterations run since start
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn console(&self) -> &Console<D> {
        &self.console
    }

    pub fn serial(&self) -> &S {
        &self.serial
    }

    pub fn reset_latch_mut(&mut self) -> &mut L {
        &mut self.reset
    }

    pub fn consumer(&self) -> &Consumer<'a, N> {
        &self.rx
    }

    pub fn pacer(&self) -> &PeriodicTimer<C> {
        &self.pacer
    }

    pub fn workload(&self) -> &PeriodicTimer<C> {
        &self.workload
    }
}
