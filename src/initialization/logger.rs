//! Logger initialization.
//!
//! Log lines go to stderr so they never interleave with the report on stdout.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::{Level, LevelFilter};

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with custom formatting. Supports both plain text
/// (with colors and emojis) and JSON formats for structured logging.
///
/// The logger reads from the `RUST_LOG` environment variable by default, but
/// the provided `level` parameter will override it.
///
/// # Arguments
///
/// * `level` - Minimum log level to display (overrides `RUST_LOG` if set)
/// * `format` - Log format (Plain or Json)
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Use RUST_LOG for quick debugging (no CLI args needed)
/// RUST_LOG=debug mx_resolve gmail.com
///
/// # Override with CLI args (takes precedence)
/// RUST_LOG=debug mx_resolve gmail.com --log-level info
///
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=mx_resolve=debug,hickory_resolver=info mx_resolve gmail.com
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stderr);

    builder.filter_level(level);
    // hickory logs malformed or truncated UDP answers at warn level and recovers on its own
    builder.filter_module("hickory_proto", LevelFilter::Error);
    builder.filter_module("hickory_resolver", LevelFilter::Warn.min(level));
    builder.filter_module("mx_resolve", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{}",
                    json_line(
                        chrono::Utc::now().timestamp_millis(),
                        record.level(),
                        record.target(),
                        &record.args().to_string(),
                    )
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                writeln!(
                    buf,
                    "{} {} {} [{}] {}",
                    chrono::Local::now().format("%H:%M:%S%.3f"),
                    level_emoji(level),
                    record.target().cyan(),
                    colored_level(level),
                    record.args()
                )
            });
        }
    }

    // try_init() so tests that initialize twice get an error instead of a panic
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

fn colored_level(level: Level) -> ColoredString {
    let text = level.to_string();
    match level {
        Level::Error => text.red(),
        Level::Warn => text.yellow(),
        Level::Info => text.green(),
        Level::Debug => text.blue(),
        Level::Trace => text.purple(),
    }
}

fn level_emoji(level: Level) -> &'static str {
    match level {
        Level::Error => "❌",
        Level::Warn => "⚠️",
        Level::Info => "✔️",
        Level::Debug => "🔍",
        Level::Trace => "🔬",
    }
}

/// One structured log line. The message is escaped with `serde_json`.
fn json_line(ts_millis: i64, level: Level, target: &str, msg: &str) -> String {
    serde_json::json!({
        "ts": ts_millis,
        "level": level.as_str(),
        "target": target,
        "msg": msg,
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_line_is_valid_json() {
        let line = json_line(1_700_000_000_000, Level::Warn, "mx_resolve::engine", "say \"hi\"\n");
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["ts"], 1_700_000_000_000i64);
        assert_eq!(value["level"], "WARN");
        assert_eq!(value["target"], "mx_resolve::engine");
        assert_eq!(value["msg"], "say \"hi\"\n");
        assert!(!line.contains('\n'), "JSON log line must stay on one line");
    }

    #[test]
    fn test_level_emoji_distinct() {
        let emojis = [
            level_emoji(Level::Error),
            level_emoji(Level::Warn),
            level_emoji(Level::Info),
            level_emoji(Level::Debug),
            level_emoji(Level::Trace),
        ];
        let unique: std::collections::HashSet<_> = emojis.iter().collect();
        assert_eq!(unique.len(), emojis.len());
    }

    #[test]
    fn test_init_logger_twice_does_not_panic() {
        // env_logger can only be installed once per process
        let _ = init_logger_with(LevelFilter::Info, LogFormat::Plain);
        let second = init_logger_with(LevelFilter::Info, LogFormat::Json);
        assert!(second.is_err());
    }
}
