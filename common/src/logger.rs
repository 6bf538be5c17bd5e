use std::sync::OnceLock;
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Info,
    Warn,
}

impl LogLevel {
    fn label(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
        }
    }
}

pub struct Logger {
    prefix: Option<String>,
    min_level: LogLevel,
}

impl Logger {
    fn new(prefix: Option<String>, min_level: LogLevel) -> Self {
        Self { prefix, min_level }
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        if level < self.min_level {
            return;
        }
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        println!("{}", self.format_line(&timestamp, level, message));
    }

    fn format_line(&self, timestamp: &str, level: LogLevel, message: &str) -> String {
        if let Some(ref prefix) = self.prefix {
            format!("[{}][{}][{}] {}", timestamp, prefix, level.label(), message)
        } else {
            format!("[{}][{}] {}", timestamp, level.label(), message)
        }
    }
}

pub fn init_logger(prefix: Option<String>, min_level: LogLevel) {
    LOGGER.get_or_init(|| Logger::new(prefix, min_level));
}

pub fn log_at(level: LogLevel, message: &str) {
    match LOGGER.get() {
        Some(logger) => logger.log(level, message),
        // Library users without a logger still see warnings.
        None if level == LogLevel::Warn => eprintln!("[WARN] {}", message),
        None => {}
    }
}

pub fn log(message: &str) {
    log_at(LogLevel::Info, message);
}

pub fn warn(message: &str) {
    log_at(LogLevel::Warn, message);
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::logger::warn(&format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_without_prefix() {
        let logger = Logger::new(None, LogLevel::Info);
        let line = logger.format_line("2026-01-01 10:00:00", LogLevel::Info, "ate food");
        assert_eq!(line, "[2026-01-01 10:00:00][INFO] ate food");
    }

    #[test]
    fn test_format_line_with_prefix() {
        let logger = Logger::new(Some("Snake".to_string()), LogLevel::Info);
        let line = logger.format_line("2026-01-01 10:00:00", LogLevel::Warn, "bad state");
        assert_eq!(line, "[2026-01-01 10:00:00][Snake][WARN] bad state");
    }

    #[test]
    fn test_levels_are_ordered() {
        assert!(LogLevel::Info < LogLevel::Warn);
    }
}
