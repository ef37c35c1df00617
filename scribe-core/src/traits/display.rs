//! Character display trait

/// Errors that can occur talking to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer failed
    Bus,
    /// Cell position outside the display
    InvalidPosition,
}

/// Character-cell display addressed by a linear cell index
///
/// Cells `0..columns` are the first row, `columns..2 * columns` the second.
pub trait CharDisplay {
    /// Move the hardware cursor to a cell
    fn move_cursor(&mut self, position: u8) -> Result<(), DisplayError>;

    /// Write one character at a cell
    fn write_char(&mut self, position: u8, ch: u8) -> Result<(), DisplayError>;

    /// Blank `count` cells starting at `start`
    fn clear(&mut self, start: u8, count: u8) -> Result<(), DisplayError> {
        for i in 0..count {
            self.write_char(start.saturating_add(i), b' ')?;
        }
        Ok(())
    }
}

/// Helpers for drawing text
pub trait CharDisplayExt: CharDisplay {
    /// Write ASCII text starting at a cell
    fn write_text(&mut self, start: u8, text: &str) -> Result<(), DisplayError> {
        for (i, ch) in text.bytes().enumerate() {
            let pos = u8::try_from(start as usize + i).map_err(|_| DisplayError::InvalidPosition)?;
            self.write_char(pos, ch)?;
        }
        Ok(())
    }
}

// Blanket implementation for all CharDisplay types
impl<T: CharDisplay> CharDisplayExt for T {}
