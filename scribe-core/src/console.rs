//! Scrolling console on a character display
//!
//! The first row shows received text, one cell per byte. It is wiped when
//! a line terminator arrives or the row fills up. The last row shows the
//! received count after a fixed label, e.g. `Char Recv: 12`.

use core::fmt::Write;

use heapless::String;

use crate::config::{DisplayLayout, MAX_LABEL_LEN};
use crate::traits::{CharDisplay, CharDisplayExt, DisplayError};

/// Status text buffer: label, separator and a full `u32`
const STATUS_LEN: usize = MAX_LABEL_LEN + 11;

/// Text row plus count line over a [`CharDisplay`]
pub struct Console<D> {
    display: D,
    layout: DisplayLayout,
    label: String<MAX_LABEL_LEN>,
    write_index: u8,
}

impl<D: CharDisplay> Console<D> {
    pub fn new(display: D, layout: DisplayLayout, label: String<MAX_LABEL_LEN>) -> Self {
        Self {
            display,
            layout,
            label,
            write_index: 0,
        }
    }

    /// Draw the label and park the cursor at the start of the text row
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.write_index = 0;
        if self.has_status_row() {
            let start = self.layout.status_row_start();
            self.display.write_text(start, self.label.as_str())?;
        }
        self.display.move_cursor(0)
    }

    /// Render one received byte and refresh the count line
    pub fn show_byte(&mut self, byte: u8, received: u32) -> Result<(), DisplayError> {
        let columns = self.layout.columns.max(1);

        self.display.move_cursor(self.write_index)?;
        self.display.write_char(self.write_index, byte)?;
        self.write_index = (self.write_index + 1) % columns;

        if byte == b'\r' || byte == b'\n' || self.write_index == 0 {
            self.display.clear(0, columns)?;
            self.write_index = 0;
        }

        self.draw_status(received)
    }

    /// Blank the whole display and redraw the count line
    pub fn reset(&mut self, received: u32) -> Result<(), DisplayError> {
        self.write_index = 0;
        self.display.clear(0, self.layout.cells())?;
        self.draw_status(received)
    }

    /// Put the hardware cursor where the next byte will land
    pub fn park_cursor(&mut self) -> Result<(), DisplayError> {
        self.display.move_cursor(self.write_index)
    }

    /// Column the next byte is written to
    pub fn write_index(&self) -> u8 {
        self.write_index
    }

    pub fn layout(&self) -> DisplayLayout {
        self.layout
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    fn has_status_row(&self) -> bool {
        self.layout.rows >= 2
    }

    fn draw_status(&mut self, received: u32) -> Result<(), DisplayError> {
        if !self.has_status_row() {
            return Ok(());
        }

        let mut text: String<STATUS_LEN> = String::new();
        // Cannot overflow: label fits MAX_LABEL_LEN and a u32 has 10 digits
        let _ = write!(text, "{} {}", self.label, received);

        // Anything past the row edge would land on the next display line
        let visible = text.len().min(self.layout.columns as usize);
        self.display
            .write_text(self.layout.status_row_start(), &text[..visible])
    }
}
