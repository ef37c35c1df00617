//! Minimal TOML parser for board configuration
//!
//! Handles only the subset the board file uses:
//!
//! - `[section]` headers
//! - `key = value` pairs (string, integer, boolean, flat integer array)
//! - Comments (`# ...`), including trailing ones
//!
//! Keys missing from the input keep their defaults.

use heapless::{String, Vec};

use super::board::{BoardConfig, MAX_LABEL_LEN};
use crate::queue::OverflowPolicy;
use crate::timer::MAX_DIVIDERS;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not recognised in its section
    UnknownKey,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Too many items (exceeded heapless capacity)
    TooManyItems,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Timer,
    Serial,
    Display,
    Timing,
    Queue,
    Console,
}

/// Parse configuration text into a [`BoardConfig`]
///
/// The result is not validated; see [`BoardConfig::validate`].
pub fn parse_config(input: &str) -> Result<BoardConfig, ParseError> {
    let mut config = BoardConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "timer" => Ok(Section::Timer),
        "serial" => Ok(Section::Serial),
        "display" => Ok(Section::Display),
        "timing" => Ok(Section::Timing),
        "queue" => Ok(Section::Queue),
        "console" => Ok(Section::Console),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut BoardConfig,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Timer, "clock_hz") => config.timer.clock_hz = parse_int(value)?,
        (Section::Timer, "dividers") => config.timer.dividers = parse_int_array(value)?,

        (Section::Serial, "baudrate") => config.serial.baudrate = parse_int(value)?,

        (Section::Display, "columns") => config.display.columns = parse_int(value)?,
        (Section::Display, "rows") => config.display.rows = parse_int(value)?,

        (Section::Timing, "settle_ms") => config.timing.settle_ms = parse_int(value)?,
        (Section::Timing, "workload_ms") => config.timing.workload_ms = parse_int(value)?,
        (Section::Timing, "period_ms") => config.timing.period_ms = parse_int(value)?,
        (Section::Timing, "guard_ms") => config.timing.guard_ms = parse_int(value)?,

        (Section::Queue, "overflow") => {
            config.queue.overflow = match parse_string(value)? {
                "overwrite" => OverflowPolicy::Overwrite,
                "reject" => OverflowPolicy::Reject,
                _ => return Err(ParseError::InvalidValue),
            }
        }

        (Section::Console, "label") => {
            config.console.label = String::<MAX_LABEL_LEN>::try_from(parse_string(value)?)
                .map_err(|_| ParseError::TooManyItems)?;
        }
        (Section::Console, "report_on_receive") => {
            config.console.report_on_receive = parse_bool(value)?
        }

        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

/// Parse a key = value line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments unless the # is inside a string
    let value = match value.find('#') {
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> Result<&str, ParseError> {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        Ok(&value[1..value.len() - 1])
    } else {
        // Allow unquoted strings for simple values
        Ok(value)
    }
}

/// Parse an integer value, allowing `_` separators
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    let mut digits: String<24> = String::new();
    for ch in value.chars().filter(|&c| c != '_') {
        digits.push(ch).map_err(|_| ParseError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a flat array of integers like `[1, 8, 64, 256]`
fn parse_int_array(value: &str) -> Result<Vec<u16, MAX_DIVIDERS>, ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    let mut items = Vec::new();
    for item in inner.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        items
            .push(parse_int(item)?)
            .map_err(|_| ParseError::TooManyItems)?;
    }
    Ok(items)
}
