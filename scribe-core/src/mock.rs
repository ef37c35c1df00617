//! Hardware doubles for unit tests

use heapless::Vec;

use crate::timer::TimerSettings;
use crate::traits::{CharDisplay, Countdown, DisplayError, EdgeLine, Latch, SerialError, SerialOut};

/// Countdown whose period elapses as soon as it is polled while running
#[derive(Default)]
pub struct InstantCountdown {
    pub running: bool,
    pub listening: bool,
    pub expired: bool,
    pub loaded: Option<TimerSettings>,
    /// Compare values of every expiry observed, in order
    pub elapsed: Vec<u16, 64>,
}

impl Countdown for InstantCountdown {
    fn stop(&mut self) {
        self.running = false;
    }
    fn reset(&mut self) {}
    fn load(&mut self, settings: TimerSettings) {
        self.loaded = Some(settings);
    }
    fn start(&mut self) {
        self.running = true;
    }
    fn is_expired(&mut self) -> bool {
        if self.running && !self.expired {
            self.expired = true;
            if let Some(s) = self.loaded {
                let _ = self.elapsed.push(s.compare);
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
}

/// Edge line with an explicit pending latch
#[derive(Default)]
pub struct FakeEdge {
    pub enabled: bool,
    pub pending: bool,
    pub cleared: u32,
    pub ignored: u32,
}

impl EdgeLine for FakeEdge {
    fn enable(&mut self) {
        self.enabled = true;
    }
    fn disable(&mut self) {
        self.enabled = false;
    }
    fn clear_pending(&mut self) {
        self.pending = false;
        self.cleared += 1;
    }
    async fn wait_edge(&mut self) {
        assert!(self.enabled, "waiting on a disabled line");
        assert!(self.pending, "no edge queued");
        self.pending = false;
    }
    fn ignored(&self) -> u32 {
        self.ignored
    }
}

/// 16x2 cell buffer
pub struct FakeLcd {
    pub cells: [u8; 32],
    pub cursor: u8,
    pub fail: bool,
}

impl Default for FakeLcd {
    fn default() -> Self {
        Self {
            cells: [b' '; 32],
            cursor: 0,
            fail: false,
        }
    }
}

impl FakeLcd {
    pub fn row(&self, row: usize) -> &str {
        core::str::from_utf8(&self.cells[row * 16..(row + 1) * 16]).unwrap_or("<bin>")
    }
}

impl CharDisplay for FakeLcd {
    fn move_cursor(&mut self, position: u8) -> Result<(), DisplayError> {
        if position >= 32 {
            return Err(DisplayError::InvalidPosition);
        }
        self.cursor = position;
        Ok(())
    }
    fn write_char(&mut self, position: u8, ch: u8) -> Result<(), DisplayError> {
        if self.fail {
            return Err(DisplayError::Bus);
        }
        self.move_cursor(position)?;
        self.cells[position as usize] = ch;
        Ok(())
    }
}

/// Captured serial output
#[derive(Default)]
pub struct Capture {
    pub sent: Vec<u8, 64>,
}

impl SerialOut for Capture {
    fn write_all(&mut self, data: &[u8]) -> Result<(), SerialError> {
        self.sent.extend_from_slice(data).map_err(|_| SerialError::Write)
    }
}

/// Transmitter that always fails
pub struct BrokenSerial;

impl SerialOut for BrokenSerial {
    fn write_all(&mut self, _data: &[u8]) -> Result<(), SerialError> {
        Err(SerialError::Write)
    }
}

/// Plain boolean latch
#[derive(Default)]
pub struct FlagLatch(pub bool);

impl Latch for FlagLatch {
    fn take(&mut self) -> bool {
        core::mem::take(&mut self.0)
    }
}
