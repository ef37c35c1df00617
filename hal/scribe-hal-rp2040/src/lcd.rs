//! Character LCD with a serial (SPI) command interface
//!
//! The display controller takes one byte per transfer. A byte with the top
//! bit set moves the cursor (`0x80 + column` on the first row,
//! `0xC0 + column` on the second); anything else is written as a character
//! at the cursor.

use embedded_hal::spi::SpiBus;
use scribe_core::traits::{CharDisplay, DisplayError};

/// Set-address command for the first row
const ROW0_ADDR: u8 = 0x80;
/// Set-address command for the second row
const ROW1_ADDR: u8 = 0xC0;

/// Two-row character LCD on an SPI bus
pub struct SpiLcd<SPI> {
    spi: SPI,
    columns: u8,
}

impl<SPI: SpiBus> SpiLcd<SPI> {
    pub fn new(spi: SPI, columns: u8) -> Self {
        Self { spi, columns }
    }

    /// Cursor command for a linear cell index
    pub fn address(&self, position: u8) -> Result<u8, DisplayError> {
        let columns = self.columns.max(1);
        if position >= columns.saturating_mul(2) {
            return Err(DisplayError::InvalidPosition);
        }
        Ok(if position < columns {
            ROW0_ADDR + position
        } else {
            ROW1_ADDR + position % columns
        })
    }

    fn send(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.spi.write(bytes).map_err(|_| DisplayError::Bus)?;
        self.spi.flush().map_err(|_| DisplayError::Bus)
    }
}

impl<SPI: SpiBus> CharDisplay for SpiLcd<SPI> {
    fn move_cursor(&mut self, position: u8) -> Result<(), DisplayError> {
        let cmd = self.address(position)?;
        self.send(&[cmd])
    }

    fn write_char(&mut self, position: u8, ch: u8) -> Result<(), DisplayError> {
        let cmd = self.address(position)?;
        self.send(&[cmd, ch])
    }
}
