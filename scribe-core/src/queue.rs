//! Single-producer single-consumer byte queue
//!
//! A fixed-capacity ring shared between the UART receive context (producer)
//! and the control loop (consumer). Cursors and counters are atomics, so
//! neither side has to mask the other while it works:
//!
//! - the producer owns `head` and the slot under it, and increments
//!   `available` only after the byte is stored
//! - the consumer owns `tail`, and decrements `available` only after the
//!   byte is read
//!
//! `count` is the lifetime number of received bytes shown to the user. It
//! is cleared by [`Consumer::reset`] and nothing else.
//!
//! What happens when a byte arrives with the ring full is an explicit
//! [`OverflowPolicy`], and every push reports its [`Push`] outcome.

use portable_atomic::{AtomicU32, AtomicU8, AtomicUsize, Ordering};

/// Ring capacity of the reference board
pub const DEFAULT_CAPACITY: usize = 16;

/// Behavior of a push into a full ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OverflowPolicy {
    /// Store anyway, overwriting the oldest unread slot
    ///
    /// `available` keeps counting past the capacity, so the consumer will
    /// read wrapped-around data. This matches the reference board behavior.
    #[default]
    Overwrite,
    /// Drop the incoming byte and leave the ring untouched
    Reject,
}

/// Outcome of a single push
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Push {
    /// Byte stored in a free slot
    Stored,
    /// Byte stored over an unread slot
    Overwrote,
    /// Ring full, byte discarded
    Dropped,
}

impl Push {
    /// Whether the push lost data
    pub fn is_overflow(&self) -> bool {
        !matches!(self, Push::Stored)
    }
}

/// Fixed-capacity byte ring
pub struct ByteQueue<const N: usize> {
    buffer: [AtomicU8; N],
    head: AtomicUsize,
    tail: AtomicUsize,
    available: AtomicUsize,
    count: AtomicU32,
    dropped: AtomicU32,
    overwritten: AtomicU32,
    policy: OverflowPolicy,
}

impl<const N: usize> ByteQueue<N> {
    const NON_EMPTY: () = assert!(N > 0, "queue capacity must be non-zero");

    /// Create an empty queue
    pub const fn new(policy: OverflowPolicy) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_EMPTY;

        Self {
            buffer: [const { AtomicU8::new(0) }; N],
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
            available: AtomicUsize::new(0),
            count: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
            overwritten: AtomicU32::new(0),
            policy,
        }
    }

    /// Split into the producer and consumer halves
    pub fn split(&mut self) -> (Producer<'_, N>, Consumer<'_, N>) {
        let queue: &Self = self;
        (Producer { queue }, Consumer { queue })
    }

    /// Ring capacity
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Overflow policy
    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Next write offset
    pub fn head(&self) -> usize {
        self.head.load(Ordering::Acquire)
    }

    /// Next read offset
    pub fn tail(&self) -> usize {
        self.tail.load(Ordering::Acquire)
    }

    /// Unread bytes; exceeds the capacity after overwrites
    pub fn available(&self) -> usize {
        self.available.load(Ordering::Acquire)
    }

    /// Bytes received since start or the last reset
    pub fn received(&self) -> u32 {
        self.count.load(Ordering::Relaxed)
    }

    /// Bytes discarded by the `Reject` policy
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Pushes that overwrote an unread slot
    pub fn overwritten(&self) -> u32 {
        self.overwritten.load(Ordering::Relaxed)
    }

    fn push(&self, byte: u8) -> Push {
        if self.policy == OverflowPolicy::Reject && self.available() >= N {
            self.count.fetch_add(1, Ordering::Relaxed);
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return Push::Dropped;
        }

        let head = self.head.load(Ordering::Relaxed);
        self.buffer[head].store(byte, Ordering::Relaxed);
        self.head.store((head + 1) % N, Ordering::Release);
        self.count.fetch_add(1, Ordering::Relaxed);

        let before = self.available.fetch_add(1, Ordering::AcqRel);
        if before >= N {
            self.overwritten.fetch_add(1, Ordering::Relaxed);
            Push::Overwrote
        } else {
            Push::Stored
        }
    }

    fn pop(&self) -> Option<u8> {
        if self.available() == 0 {
            return None;
        }

        let tail = self.tail.load(Ordering::Relaxed);
        let byte = self.buffer[tail].load(Ordering::Relaxed);
        self.tail.store((tail + 1) % N, Ordering::Release);
        self.available.fetch_sub(1, Ordering::AcqRel);
        Some(byte)
    }
}

impl<const N: usize> Default for ByteQueue<N> {
    fn default() -> Self {
        Self::new(OverflowPolicy::default())
    }
}

/// Write half, owned by the receive context
pub struct Producer<'a, const N: usize> {
    queue: &'a ByteQueue<N>,
}

impl<'a, const N: usize> Producer<'a, N> {
    /// Append a received byte
    pub fn push(&mut self, byte: u8) -> Push {
        self.queue.push(byte)
    }

    /// Read-only view of the counters
    pub fn tally(&self) -> Tally<'a, N> {
        Tally { queue: self.queue }
    }
}

/// Read half, owned by the control loop
pub struct Consumer<'a, const N: usize> {
    queue: &'a ByteQueue<N>,
}

impl<'a, const N: usize> Consumer<'a, N> {
    /// Take the oldest unread byte, `None` when nothing is available
    pub fn pop(&mut self) -> Option<u8> {
        self.queue.pop()
    }

    /// Clear the received counter
    ///
    /// Unread bytes and both cursors are left as they are.
    pub fn reset(&mut self) {
        self.queue.count.store(0, Ordering::Relaxed);
    }

    /// Bytes received since start or the last reset
    pub fn received(&self) -> u32 {
        self.queue.received()
    }

    /// Whether there is nothing to read
    pub fn is_empty(&self) -> bool {
        self.queue.available() == 0
    }

    /// Read-only view of the counters
    pub fn tally(&self) -> Tally<'a, N> {
        Tally { queue: self.queue }
    }
}

/// Shared read-only view of the queue counters
#[derive(Clone, Copy)]
pub struct Tally<'a, const N: usize> {
    queue: &'a ByteQueue<N>,
}

impl<const N: usize> Tally<'_, N> {
    /// Bytes received since start or the last reset
    pub fn received(&self) -> u32 {
        self.queue.received()
    }

    /// Unread bytes
    pub fn available(&self) -> usize {
        self.queue.available()
    }

    /// Bytes discarded by the `Reject` policy
    pub fn dropped(&self) -> u32 {
        self.queue.dropped()
    }

    /// Pushes that overwrote an unread slot
    pub fn overwritten(&self) -> u32 {
        self.queue.overwritten()
    }
}
