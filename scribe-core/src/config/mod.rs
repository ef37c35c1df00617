//! Board configuration
//!
//! Configuration is baked into the firmware image as a small TOML file
//! and parsed at boot.

mod board;
mod parse;

pub use board::{
    BoardConfig, ConfigError, ConsoleConfig, DisplayLayout, LoopTiming, PeriodKind, QueueConfig,
    SerialConfig, MAX_COLUMNS, MAX_LABEL_LEN,
};
pub use parse::{parse_config, ParseError};
