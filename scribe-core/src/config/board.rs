//! Board configuration types
//!
//! Defaults describe the reference board: a 7.3728 MHz crystal, a 9600 baud
//! UART and a 16x2 character LCD.

use heapless::String;

use crate::queue::OverflowPolicy;
use crate::timer::{TimerClock, TimerError};

/// Maximum length of the count label
pub const MAX_LABEL_LEN: usize = 16;

/// Widest supported display row
pub const MAX_COLUMNS: u8 = 16;

/// Digits needed for any `u32` count
const COUNT_DIGITS: usize = 10;

/// UART settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self { baudrate: 9600 }
    }
}

/// Character display geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayLayout {
    /// Cells per row
    pub columns: u8,
    /// Number of rows (1 or 2)
    pub rows: u8,
}

impl Default for DisplayLayout {
    fn default() -> Self {
        Self {
            columns: 16,
            rows: 2,
        }
    }
}

impl DisplayLayout {
    /// Total number of cells
    pub fn cells(&self) -> u8 {
        self.columns.saturating_mul(self.rows)
    }

    /// First cell of the status row (the last row)
    pub fn status_row_start(&self) -> u8 {
        self.columns.saturating_mul(self.rows.saturating_sub(1))
    }
}

/// Control loop periods in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoopTiming {
    /// One-time delay before touching the display
    pub settle_ms: u32,
    /// Simulated processing cost per iteration
    pub workload_ms: u32,
    /// Iteration period
    pub period_ms: u32,
    /// Report button mute interval
    pub guard_ms: u32,
}

impl Default for LoopTiming {
    fn default() -> Self {
        Self {
            settle_ms: 1000,
            workload_ms: 7,
            period_ms: 10,
            guard_ms: 100,
        }
    }
}

/// Which configured period failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeriodKind {
    Settle,
    Workload,
    Pacing,
    Guard,
}

/// Receive queue settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QueueConfig {
    /// What to do with a byte that arrives while the ring is full
    pub overflow: OverflowPolicy,
}

/// Console settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Text shown before the count on the status row
    pub label: String<MAX_LABEL_LEN>,
    /// Also send the count over serial after each rendered byte
    pub report_on_receive: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        let mut label = String::new();
        let _ = label.push_str("Char Recv:");
        Self {
            label,
            report_on_receive: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Syntax error in the configuration text
    Parse(super::ParseError),
    /// Timer clock or divider list invalid
    Clock(TimerError),
    /// A period cannot be programmed with the configured clock
    Period {
        /// Offending period
        kind: PeriodKind,
        /// Why it cannot be programmed
        error: TimerError,
    },
    /// Workload delay leaves no room in the iteration period
    WorkloadExceedsPeriod,
    /// Display geometry outside 1..=16 columns and 1..=2 rows
    DisplaySize,
    /// Label and count do not fit on the status row
    LabelTooWide,
    /// Baud rate is zero
    BaudRate,
}

impl From<super::ParseError> for ConfigError {
    fn from(e: super::ParseError) -> Self {
        ConfigError::Parse(e)
    }
}

/// Complete board configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardConfig {
    pub timer: TimerClock,
    pub serial: SerialConfig,
    pub display: DisplayLayout,
    pub timing: LoopTiming,
    pub queue: QueueConfig,
    pub console: ConsoleConfig,
}

impl BoardConfig {
    /// Parse and validate configuration text
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let config = super::parse_config(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values the firmware cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timer.validate().map_err(ConfigError::Clock)?;

        let periods = [
            (PeriodKind::Settle, self.timing.settle_ms),
            (PeriodKind::Workload, self.timing.workload_ms),
            (PeriodKind::Pacing, self.timing.period_ms),
            (PeriodKind::Guard, self.timing.guard_ms),
        ];
        for (kind, ms) in periods {
            self.timer
                .settings_for(ms)
                .map_err(|error| ConfigError::Period { kind, error })?;
        }

        if self.timing.workload_ms >= self.timing.period_ms {
            return Err(ConfigError::WorkloadExceedsPeriod);
        }

        let layout = self.display;
        if layout.columns == 0 || layout.columns > MAX_COLUMNS || !(1..=2).contains(&layout.rows)
        {
            return Err(ConfigError::DisplaySize);
        }

        // Label, one space and at least one digit
        if self.console.label.len() + 2 > layout.columns as usize {
            return Err(ConfigError::LabelTooWide);
        }

        if self.serial.baudrate == 0 {
            return Err(ConfigError::BaudRate);
        }

        Ok(())
    }

    /// Whether the status row can show every possible count
    pub fn status_fits_any_count(&self) -> bool {
        self.console.label.len() + 1 + COUNT_DIGITS <= self.display.columns as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = BoardConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.display.status_row_start(), 16);
        assert_eq!(config.display.cells(), 32);
        assert_eq!(config.console.label.as_str(), "Char Recv:");
    }

    #[test]
    fn test_unrepresentable_settle_rejected() {
        let mut config = BoardConfig::default();
        config.timing.settle_ms = 10_000;
        assert_eq!(
            config.validate(),
            Err(ConfigError::Period {
                kind: PeriodKind::Settle,
                error: TimerError::PeriodTooLong { ms: 10_000 },
            })
        );
    }

    #[test]
    fn test_workload_must_fit_period() {
        let mut config = BoardConfig::default();
        config.timing.workload_ms = 10;
        assert_eq!(config.validate(), Err(ConfigError::WorkloadExceedsPeriod));
    }

    #[test]
    fn test_display_size_bounds() {
        let mut config = BoardConfig::default();
        config.display.rows = 3;
        assert_eq!(config.validate(), Err(ConfigError::DisplaySize));

        config.display.rows = 1;
        config.display.columns = 20;
        assert_eq!(config.validate(), Err(ConfigError::DisplaySize));
    }

    #[test]
    fn test_label_width() {
        let mut config = BoardConfig::default();
        config.display.columns = 11;
        assert_eq!(config.validate(), Err(ConfigError::LabelTooWide));

        config.display.columns = 12;
        assert_eq!(config.validate(), Ok(()));
        assert!(!config.status_fits_any_count());
    }
}
