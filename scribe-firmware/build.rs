//! Build script for scribe-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates board.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Largest value of the 16-bit compare register
const MAX_COMPARE: u64 = 65535;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate board.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        fail(
            "board.toml not found!",
            &["The firmware embeds board.toml from the scribe-firmware directory.".to_string()],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read board.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in board.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    validate_keys(&config, &mut errors);
    validate_timer(&config, &mut errors);
    validate_display(&config, &mut errors);
    validate_misc(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid board configuration", &errors);
    }

    println!("cargo:warning=board.toml validated successfully");
}

/// Sections and keys the firmware parser understands
const KNOWN_KEYS: &[(&str, &[&str])] = &[
    ("timer", &["clock_hz", "dividers"]),
    ("serial", &["baudrate"]),
    ("display", &["columns", "rows"]),
    ("timing", &["settle_ms", "workload_ms", "period_ms", "guard_ms"]),
    ("queue", &["overflow"]),
    ("console", &["label", "report_on_receive"]),
];

fn validate_keys(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (section, value) in root {
        let Some(keys) = KNOWN_KEYS
            .iter()
            .find(|(name, _)| name == section)
            .map(|(_, keys)| *keys)
        else {
            errors.push(format!("unknown section [{}]", section));
            continue;
        };

        let Some(table) = value.as_table() else {
            errors.push(format!("[{}] must be a table", section));
            continue;
        };

        for key in table.keys() {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", section, key));
            }
        }
    }
}

fn int(config: &toml::Value, section: &str, key: &str, default: i64) -> i64 {
    config
        .get(section)
        .and_then(|s| s.get(key))
        .and_then(|v| v.as_integer())
        .unwrap_or(default)
}

fn validate_timer(config: &toml::Value, errors: &mut Vec<String>) {
    let clock_hz = int(config, "timer", "clock_hz", 1_843_200);
    if clock_hz <= 0 || clock_hz > u32::MAX as i64 {
        errors.push(format!("[timer] clock_hz must be 1..={}", u32::MAX));
        return;
    }

    let dividers: Vec<i64> = match config.get("timer").and_then(|t| t.get("dividers")) {
        Some(toml::Value::Array(items)) => items.iter().filter_map(|v| v.as_integer()).collect(),
        Some(_) => {
            errors.push("[timer] dividers must be an integer array".to_string());
            return;
        }
        None => vec![1, 8, 64, 256],
    };

    if dividers.is_empty() || dividers.len() > 8 {
        errors.push("[timer] dividers must list 1 to 8 values".to_string());
        return;
    }
    if dividers.iter().any(|&d| d <= 0 || d > u16::MAX as i64) {
        errors.push("[timer] dividers must be 1..=65535".to_string());
        return;
    }
    if dividers.windows(2).any(|w| w[0] >= w[1]) {
        errors.push("[timer] dividers must be strictly ascending".to_string());
        return;
    }

    let largest = *dividers.last().unwrap() as u64;
    let periods = [
        ("settle_ms", 1000),
        ("workload_ms", 7),
        ("period_ms", 10),
        ("guard_ms", 100),
    ];
    for (key, default) in periods {
        let ms = int(config, "timing", key, default);
        if ms <= 0 {
            errors.push(format!("[timing] {} must be positive", key));
            continue;
        }
        let steps = clock_hz as u64 * ms as u64 / 1000;
        if steps == 0 {
            errors.push(format!("[timing] {} = {} is shorter than one clock step", key, ms));
        } else if steps / largest > MAX_COMPARE {
            errors.push(format!(
                "[timing] {} = {} exceeds the longest programmable period",
                key, ms
            ));
        }
    }

    if int(config, "timing", "workload_ms", 7) >= int(config, "timing", "period_ms", 10) {
        errors.push("[timing] workload_ms must be shorter than period_ms".to_string());
    }
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    let columns = int(config, "display", "columns", 16);
    let rows = int(config, "display", "rows", 2);

    if !(1..=16).contains(&columns) {
        errors.push("[display] columns must be 1-16".to_string());
    }
    if !(1..=2).contains(&rows) {
        errors.push("[display] rows must be 1 or 2".to_string());
    }

    let label = config
        .get("console")
        .and_then(|c| c.get("label"))
        .and_then(|l| l.as_str())
        .unwrap_or("Char Recv:");
    if label.len() > 16 {
        errors.push("[console] label must be at most 16 characters".to_string());
    } else if label.len() as i64 + 2 > columns {
        errors.push("[console] label leaves no room for the count".to_string());
    }
}

fn validate_misc(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(policy) = config.get("queue").and_then(|q| q.get("overflow")) {
        match policy.as_str() {
            Some("overwrite") | Some("reject") => {}
            _ => errors.push("[queue] overflow must be \"overwrite\" or \"reject\"".to_string()),
        }
    }

    if int(config, "serial", "baudrate", 9600) <= 0 {
        errors.push("[serial] baudrate must be positive".to_string());
    }
}

/// Abort the build with a boxed error report
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        lines
            .iter()
            .map(|line| {
                let line = if line.chars().count() > 62 {
                    format!("{}...", line.chars().take(59).collect::<String>())
                } else {
                    line.clone()
                };
                format!("║  • {:<62} ║", line)
            })
            .collect::<Vec<_>>()
            .join("\n")
    );
}
