//! External signal abstractions

/// Edge-triggered input with a software-cleared pending latch
///
/// A transition on the line latches a pending flag whether or not
/// notifications are enabled. While notifications are enabled a pending
/// edge also wakes [`wait_edge`](Self::wait_edge).
#[allow(async_fn_in_trait)]
pub trait EdgeLine {
    /// Enable edge notifications
    fn enable(&mut self);

    /// Disable edge notifications; edges still latch
    fn disable(&mut self);

    /// Discard a latched edge
    fn clear_pending(&mut self);

    /// Wait for the next notified edge and consume its latch
    async fn wait_edge(&mut self);

    /// Edges the line dropped itself because notifications were disabled
    fn ignored(&self) -> u32 {
        0
    }
}

/// Level-latched request flag
pub trait Latch {
    /// Observe the flag and clear it if set
    fn take(&mut self) -> bool;
}

impl<T: Latch + ?Sized> Latch for &mut T {
    fn take(&mut self) -> bool {
        (**self).take()
    }
}
