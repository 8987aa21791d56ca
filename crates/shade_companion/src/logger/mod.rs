//! Глобальный logger для симуляции
//!
//! Printer подключается снаружи (консоль, файл, тестовый буфер).
//! Фильтрация по уровню — здесь, до вызова printer'а.

use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex};

static LOGGER: Lazy<Mutex<Option<Box<dyn LogPrinter>>>> = Lazy::new(|| Mutex::new(None));

static LOGGER_LEVEL: Lazy<Mutex<LogLevel>> = Lazy::new(|| Mutex::new(LogLevel::Debug));

pub fn set_logger(logger: Box<dyn LogPrinter>) {
    if let Ok(mut slot) = LOGGER.lock() {
        *slot = Some(logger);
    }
}

pub fn set_log_level(level: LogLevel) {
    if let Ok(mut current) = LOGGER_LEVEL.lock() {
        *current = level;
    }
}

pub fn set_logger_if_needed(logger: Box<dyn LogPrinter>) {
    let is_empty = LOGGER.lock().map(|slot| slot.is_none()).unwrap_or(false);
    if is_empty {
        set_logger(logger);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

pub trait LogPrinter: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

pub fn log(message: &str) {
    log_with_level(LogLevel::Debug, message);
}

pub fn log_info(message: &str) {
    log_with_level(LogLevel::Info, message);
}

pub fn log_warning(message: &str) {
    log_with_level(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    log_with_level(LogLevel::Error, message);
}

pub fn log_with_level(level: LogLevel, message: &str) {
    let threshold = LOGGER_LEVEL.lock().map(|l| *l).unwrap_or(LogLevel::Debug);
    if level < threshold {
        return;
    }

    if let Ok(slot) = LOGGER.lock() {
        if let Some(logger) = slot.as_ref() {
            let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            logger.log(level, &format!("[{}] {}", timestamp, message));
        }
    }
}

pub struct ConsoleLogger;

impl LogPrinter for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        println!("[{}] {}", level.as_str(), message);
    }
}

/// Printer в память (для тестов и headless отладки)
///
/// Клон разделяет буфер, поэтому один экземпляр отдаём в `set_logger`,
/// второй оставляем себе для чтения.
#[derive(Clone, Default)]
pub struct MemoryLogger {
    lines: Arc<Mutex<Vec<(LogLevel, String)>>>,
}

impl MemoryLogger {
    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|(_, line)| line.contains(needle))
    }
}

impl LogPrinter for MemoryLogger {
    fn log(&self, level: LogLevel, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, message.to_string()));
        }
    }
}

pub fn init_logger() {
    set_logger_if_needed(Box::new(ConsoleLogger));
}

/// Перехват глобального logger'а в тестах
///
/// Logger глобальный, а тесты идут параллельно: держим lock, пока capture жив.
/// Drop возвращает уровень Debug.
#[cfg(test)]
pub(crate) struct LogCapture {
    logger: MemoryLogger,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
static CAPTURE_LOCK: Mutex<()> = Mutex::new(());

#[cfg(test)]
impl LogCapture {
    pub(crate) fn start(level: LogLevel) -> Self {
        // Упавший тест отравляет lock — для следующих это не важно
        let lock = CAPTURE_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let logger = MemoryLogger::default();
        set_logger(Box::new(logger.clone()));
        set_log_level(level);
        Self { logger, _lock: lock }
    }
}

#[cfg(test)]
impl std::ops::Deref for LogCapture {
    type Target = MemoryLogger;

    fn deref(&self) -> &MemoryLogger {
        &self.logger
    }
}

#[cfg(test)]
impl Drop for LogCapture {
    fn drop(&mut self) {
        set_log_level(LogLevel::Debug);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_threshold_drops_lower_levels() {
        let capture = LogCapture::start(LogLevel::Warning);

        log("threshold: debug line");
        log_info("threshold: info line");
        log_warning("threshold: warning line");
        log_error("threshold: error line");

        assert!(!capture.contains("threshold: debug line"));
        assert!(!capture.contains("threshold: info line"));
        assert!(capture.contains("threshold: warning line"));
        assert!(capture.contains("threshold: error line"));

        let levels: Vec<LogLevel> = capture
            .lines()
            .into_iter()
            .filter(|(_, line)| line.contains("threshold:"))
            .map(|(level, _)| level)
            .collect();
        assert_eq!(levels, vec![LogLevel::Warning, LogLevel::Error]);
    }

    #[test]
    fn test_debug_level_passes_everything() {
        let capture = LogCapture::start(LogLevel::Debug);

        log("verbose: debug line");
        assert!(capture.contains("verbose: debug line"));
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
        assert_eq!(LogLevel::Warning.as_str(), "WARNING");
    }

    #[test]
    fn test_memory_logger_shares_buffer() {
        let logger = MemoryLogger::default();
        let reader = logger.clone();

        logger.log(LogLevel::Info, "spawned ShadeSnail.Shade");

        assert!(reader.contains("ShadeSnail.Shade"));
        assert_eq!(reader.lines()[0].0, LogLevel::Info);
    }
}
