//! Transmit outbox
//!
//! Tasks never touch the UART directly. Reports are copied into short
//! frames and queued on a channel; a single transmit task owns the UART,
//! drains the channel and writes each frame asynchronously. Senders never
//! wait: a full outbox fails the write with [`SerialError::Busy`].

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Channel, Sender};
use heapless::Vec;

use crate::traits::{SerialError, SerialOut};

/// Largest frame; a full `u32` report fits in one
pub const FRAME_LEN: usize = 10;

/// Default number of queued frames
pub const DEFAULT_DEPTH: usize = 8;

/// Bytes handed to the transmit task in one piece
pub type Frame = Vec<u8, FRAME_LEN>;

/// Channel between reporting tasks and the transmit task
pub type Outbox<M, const N: usize> = Channel<M, Frame, N>;

/// [`SerialOut`] that queues frames on an [`Outbox`]
pub struct QueuedSerial<'a, M: RawMutex, const N: usize> {
    tx: Sender<'a, M, Frame, N>,
}

impl<'a, M: RawMutex, const N: usize> Clone for QueuedSerial<'a, M, N> {
    fn clone(&self) -> Self {
        Self { tx: self.tx }
    }
}

impl<'a, M: RawMutex, const N: usize> QueuedSerial<'a, M, N> {
    pub fn new(outbox: &'a Outbox<M, N>) -> Self {
        Self {
            tx: outbox.sender(),
        }
    }
}

impl<M: RawMutex, const N: usize> SerialOut for QueuedSerial<'_, M, N> {
    fn write_all(&mut self, data: &[u8]) -> Result<(), SerialError> {
        for chunk in data.chunks(FRAME_LEN) {
            let frame = Frame::from_slice(chunk).map_err(|_| SerialError::Format)?;
            self.tx.try_send(frame).map_err(|_| SerialError::Busy)?;
        }
        Ok(())
    }
}
