//! Serial transmit abstraction

use core::fmt::Write;

use heapless::String;

/// Errors from the serial transmitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerialError {
    /// Transmitter reported a failure
    Write,
    /// Value did not fit the formatting buffer
    Format,
    /// Transmit queue full; nothing was sent
    Busy,
}

/// Serial transmitter
///
/// Callers may hold locks or run with interrupts masked, so implementations
/// must not wait for the line to drain.
pub trait SerialOut {
    /// Write all bytes
    fn write_all(&mut self, data: &[u8]) -> Result<(), SerialError>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), SerialError> {
        Ok(())
    }
}

/// Count reporting over a [`SerialOut`]
pub trait ReportExt: SerialOut {
    /// Send `value` as base-10 ASCII, without terminator
    fn report(&mut self, value: u32) -> Result<(), SerialError> {
        let mut text: String<10> = String::new();
        write!(text, "{}", value).map_err(|_| SerialError::Format)?;
        self.write_all(text.as_bytes())
    }
}

// Blanket implementation
impl<T: SerialOut + ?Sized> ReportExt for T {}

impl<T: SerialOut + ?Sized> SerialOut for &mut T {
    fn write_all(&mut self, data: &[u8]) -> Result<(), SerialError> {
        (**self).write_all(data)
    }

    fn flush(&mut self) -> Result<(), SerialError> {
        (**self).flush()
    }
}
