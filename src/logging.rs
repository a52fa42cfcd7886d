use crate::error::GameError;
use chrono::Local;
use log::{LevelFilter, Metadata, Record};
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::OnceLock;

// Custom logger structure
#[derive(Debug)]
struct StreetCanvasLogger {
    level: LevelFilter,
    debug_filters: Option<HashSet<String>>,
}

impl log::Log for StreetCanvasLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.level() > self.level {
            return false;
        }
        // Debug/trace output can be narrowed to topics (physics, combat, cpu, round)
        if let Some(filters) = &self.debug_filters {
            if metadata.level() >= log::Level::Debug {
                return filters.contains(metadata.target())
                    || filters.iter().any(|f| metadata.target().starts_with(f.as_str()));
            }
        }
        true
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level_color = match record.level() {
            log::Level::Error => "\x1B[31m", // Red
            log::Level::Warn => "\x1B[33m",  // Yellow
            log::Level::Info => "\x1B[32m",  // Green
            log::Level::Debug => "\x1B[36m", // Cyan
            log::Level::Trace => "\x1B[35m", // Magenta
        };
        let reset = "\x1B[0m";
        let timestamp = Local::now().format("%H:%M:%S%.3f");

        let mut output = format!(
            "{timestamp} {level_color}{level:5}{reset} {target}: {message}",
            level = record.level(),
            target = record.target(),
            message = record.args()
        );
        if let Some(module_path) = record.module_path() {
            if module_path != record.target() {
                output.push_str(&format!(" [{}]", module_path));
            }
        }

        let mut stdout = io::stdout();
        let _ = writeln!(stdout, "{}", output);
        let _ = stdout.flush();
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

static LOGGER: OnceLock<StreetCanvasLogger> = OnceLock::new();

pub fn parse_debug_filter(filter: &str) -> HashSet<String> {
    filter
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

// Initialize the logger with optional debug filters
pub fn init_logger(level: LevelFilter, debug_filter: Option<String>) -> Result<(), GameError> {
    let debug_filters = debug_filter.as_deref().map(parse_debug_filter);
    let logger = LOGGER.get_or_init(|| StreetCanvasLogger {
        level,
        debug_filters,
    });
    log::set_logger(logger)
        .map(|()| log::set_max_level(level))
        .map_err(|_| GameError::LoggerInstalled)
}

// Topic macros; the side label is prefixed to the message

#[macro_export]
macro_rules! debug_physics {
    ($side:expr, $($arg:tt)*) => {
        log::debug!(target: "physics", "[{}] {}", $side.label(), format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_combat {
    ($side:expr, $($arg:tt)*) => {
        log::debug!(target: "combat", "[{}] {}", $side.label(), format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_cpu {
    ($side:expr, $($arg:tt)*) => {
        log::debug!(target: "cpu", "[{}] {}", $side.label(), format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_round {
    ($($arg:tt)*) => {
        log::debug!(target: "round", "{}", format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), LevelFilter::Debug);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("nonsense"), LevelFilter::Info);
    }

    #[test]
    fn test_parse_debug_filter() {
        let filters = parse_debug_filter("physics, combat,,cpu");
        assert_eq!(filters.len(), 3);
        assert!(filters.contains("combat"));
        assert!(!filters.contains(""));
    }

    #[test]
    fn test_topic_filter_applies_to_debug_only() {
        let logger = StreetCanvasLogger {
            level: LevelFilter::Debug,
            debug_filters: Some(parse_debug_filter("combat")),
        };
        let debug_combat = Metadata::builder().level(log::Level::Debug).target("combat").build();
        let debug_cpu = Metadata::builder().level(log::Level::Debug).target("cpu").build();
        let info_cpu = Metadata::builder().level(log::Level::Info).target("cpu").build();
        let trace = Metadata::builder().level(log::Level::Trace).target("combat").build();
        assert!(log::Log::enabled(&logger, &debug_combat));
        assert!(!log::Log::enabled(&logger, &debug_cpu));
        assert!(log::Log::enabled(&logger, &info_cpu));
        assert!(!log::Log::enabled(&logger, &trace), "Above the configured level");
    }
}
