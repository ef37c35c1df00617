//! Guarded edge input
//!
//! Turns raw edges on a push button into a debounced "report and mute"
//! protocol. The first edge reports the received count over serial and
//! starts a guard interval; the line stays muted until the guard timer
//! expires, and anything that latched meanwhile is discarded.
//!
//! ```text
//! ARMED --edge--> GUARDED --guard expired--> ARMED
//! ```

use crate::timer::{PeriodicTimer, TimerError};
use crate::traits::{Countdown, EdgeLine, ReportExt, SerialError, SerialOut};

/// Guard interval of the reference board
pub const DEFAULT_GUARD_MS: u32 = 100;

/// Guard state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GuardState {
    /// Edges are reported
    #[default]
    Armed,
    /// Line muted until the guard timer expires
    Guarded,
}

/// Inputs to the guard state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GuardEvent {
    /// Edge delivered by the input line
    Edge,
    /// Guard timer expired
    GuardElapsed,
}

/// Side effects requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GuardAction {
    /// Mute the line, report the count, start the guard timer
    ReportAndMute,
    /// Stop the guard timer, drop latched edges, unmute the line
    Unmute,
}

impl GuardState {
    /// Process an event, returning the new state and the action to take
    pub fn transition(self, event: GuardEvent) -> (GuardState, Option<GuardAction>) {
        match (self, event) {
            (GuardState::Armed, GuardEvent::Edge) => {
                (GuardState::Guarded, Some(GuardAction::ReportAndMute))
            }
            (GuardState::Guarded, GuardEvent::GuardElapsed) => {
                (GuardState::Armed, Some(GuardAction::Unmute))
            }
            // Muted edges and stray expiries change nothing
            (state, _) => (state, None),
        }
    }
}

/// Errors while handling an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GuardError {
    /// Guard period cannot be programmed; the line stays armed
    Timer(TimerError),
    /// Report could not be sent; the guard still runs
    Serial(SerialError),
}

impl From<TimerError> for GuardError {
    fn from(e: TimerError) -> Self {
        GuardError::Timer(e)
    }
}

impl From<SerialError> for GuardError {
    fn from(e: SerialError) -> Self {
        GuardError::Serial(e)
    }
}

/// Edge input muted for a guard interval after each report
pub struct GuardedEdgeInput<C, E> {
    edge: E,
    timer: PeriodicTimer<C>,
    guard_ms: u32,
    state: GuardState,
    reports: u32,
    suppressed: u32,
}

impl<C: Countdown, E: EdgeLine> GuardedEdgeInput<C, E> {
    /// Take ownership of the line and its guard timer
    ///
    /// Stale edges are discarded and notifications enabled.
    pub fn new(mut edge: E, timer: PeriodicTimer<C>, guard_ms: u32) -> Self {
        edge.clear_pending();
        edge.enable();
        Self {
            edge,
            timer,
            guard_ms,
            state: GuardState::Armed,
            reports: 0,
            suppressed: 0,
        }
    }

    /// Handle an edge, reporting `received` if armed
    ///
    /// Returns whether a report was attempted.
    pub fn on_edge<S: SerialOut>(
        &mut self,
        received: u32,
        serial: &mut S,
    ) -> Result<bool, GuardError> {
        let (next, action) = self.state.transition(GuardEvent::Edge);
        if action != Some(GuardAction::ReportAndMute) {
            self.suppressed = self.suppressed.wrapping_add(1);
            return Ok(false);
        }

        // Guard timer goes first; a period that cannot be programmed
        // leaves the line armed and sends nothing
        self.edge.disable();
        if let Err(e) = self.timer.arm(self.guard_ms) {
            // Without a guard timer nothing would ever unmute the line
            self.edge.enable();
            return Err(e.into());
        }
        self.state = next;
        self.reports = self.reports.wrapping_add(1);

        serial.report(received)?;
        Ok(true)
    }

    /// Handle guard timer expiry
    ///
    /// Returns whether the line was unmuted.
    pub fn on_guard_expiry(&mut self) -> bool {
        let (next, action) = self.state.transition(GuardEvent::GuardElapsed);
        self.state = next;
        if action != Some(GuardAction::Unmute) {
            return false;
        }

        self.timer.disarm();
        self.edge.clear_pending();
        self.edge.enable();
        true
    }

    /// Run one full edge, report and guard cycle
    ///
    /// `received` is sampled when the edge arrives. Resolves after the guard
    /// interval with the reported value.
    pub async fn cycle<S, F>(&mut self, received: F, serial: &mut S) -> Result<u32, GuardError>
    where
        S: SerialOut,
        F: FnOnce() -> u32,
    {
        self.edge.wait_edge().await;
        let count = received();
        let outcome = self.on_edge(count, serial);

        if self.state == GuardState::Guarded {
            self.timer.expiry().await;
            self.on_guard_expiry();
        }

        outcome.map(|_| count)
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Reports sent (or attempted) since start
    pub fn reports(&self) -> u32 {
        self.reports
    }

    /// Edges ignored while guarded, including those the line dropped
    pub fn suppressed(&self) -> u32 {
        self.suppressed.wrapping_add(self.edge.ignored())
    }

    pub fn guard_ms(&self) -> u32 {
        self.guard_ms
    }

    pub fn edge(&self) -> &E {
        &self.edge
    }

    pub fn edge_mut(&mut self) -> &mut E {
        &mut self.edge
    }

    pub fn timer(&self) -> &PeriodicTimer<C> {
        &self.timer
    }
}
