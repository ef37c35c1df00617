//! Shared hardware doubles for integration tests

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use scribe_core::timer::TimerSettings;
use scribe_core::traits::{
    CharDisplay, Countdown, DisplayError, EdgeLine, Latch, SerialError, SerialOut,
};

/// Simulated clock in microseconds, shared by every countdown of a test
#[derive(Clone, Default)]
pub struct SimClock(Rc<Cell<u64>>);

impl SimClock {
    pub fn now_us(&self) -> u64 {
        self.0.get()
    }

    pub fn advance_to(&self, us: u64) {
        if us > self.0.get() {
            self.0.set(us);
        }
    }
}

/// Countdown that jumps the simulated clock to its deadline when awaited
pub struct SimCountdown {
    clock: SimClock,
    clock_hz: u32,
    period_us: u64,
    deadline: Option<u64>,
    expired: bool,
    pub listening: bool,
}

impl SimCountdown {
    pub fn new(clock: SimClock, clock_hz: u32) -> Self {
        Self {
            clock,
            clock_hz,
            period_us: 0,
            deadline: None,
            expired: false,
            listening: false,
        }
    }
}

impl Countdown for SimCountdown {
    fn stop(&mut self) {
        self.deadline = None;
    }
    fn reset(&mut self) {}
    fn load(&mut self, settings: TimerSettings) {
        self.period_us = settings.period_us(self.clock_hz);
    }
    fn start(&mut self) {
        self.deadline = Some(self.clock.now_us() + self.period_us);
    }
    fn is_expired(&mut self) -> bool {
        if let Some(deadline) = self.deadline {
            if self.clock.now_us() >= deadline {
                self.expired = true;
                self.deadline = Some(deadline + self.period_us);
            }
        }
        self.expired
    }
    fn clear_expired(&mut self) {
        self.expired = false;
    }
    fn listen(&mut self) {
        self.listening = true;
    }
    fn unlisten(&mut self) {
        self.listening = false;
    }
    async fn expired(&mut self) {
        if let Some(deadline) = self.deadline {
            self.clock.advance_to(deadline);
        }
        while !self.is_expired() {
            core::hint::spin_loop();
        }
    }
}

/// 16x2 cell buffer
pub struct Lcd {
    pub cells: [u8; 32],
    pub cursor: u8,
}

impl Default for Lcd {
    fn default() -> Self {
        Self {
            cells: [b' '; 32],
            cursor: 0,
        }
    }
}

impl Lcd {
    pub fn row(&self, row: usize) -> String {
        String::from_utf8_lossy(&self.cells[row * 16..(row + 1) * 16]).into_owned()
    }
}

impl CharDisplay for Lcd {
    fn move_cursor(&mut self, position: u8) -> Result<(), DisplayError> {
        if position >= 32 {
            return Err(DisplayError::InvalidPosition);
        }
        self.cursor = position;
        Ok(())
    }
    fn write_char(&mut self, position: u8, ch: u8) -> Result<(), DisplayError> {
        self.move_cursor(position)?;
        self.cells[position as usize] = ch;
        Ok(())
    }
}

/// Serial capture shared between the loop and the button handler
#[derive(Clone, Default)]
pub struct Wire(pub Rc<std::cell::RefCell<Vec<u8>>>);

impl Wire {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl SerialOut for Wire {
    fn write_all(&mut self, data: &[u8]) -> Result<(), SerialError> {
        self.0.borrow_mut().extend_from_slice(data);
        Ok(())
    }
}

/// Button whose edges are queued by the test
#[derive(Default)]
pub struct Button {
    pub enabled: bool,
    pub pending: bool,
}

impl EdgeLine for Button {
    fn enable(&mut self) {
        self.enabled = true;
    }
    fn disable(&mut self) {
        self.enabled = false;
    }
    fn clear_pending(&mut self) {
        self.pending = false;
    }
    async fn wait_edge(&mut self) {
        assert!(self.enabled && self.pending, "no deliverable edge");
        self.pending = false;
    }
}

/// Reset request shared with the test body
#[derive(Clone, Default)]
pub struct ResetLine(pub Rc<Cell<bool>>);

impl Latch for ResetLine {
    fn take(&mut self) -> bool {
        self.0.replace(false)
    }
}
