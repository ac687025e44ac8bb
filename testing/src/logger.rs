//! Recording logger for diagnostic assertions

use roster_core::logger::{LogCategory, LogLevel, Logger};
use std::sync::{Arc, Mutex};

/// One captured diagnostic line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// Severity the line was emitted at
    pub level: LogLevel,
    /// Originating subsystem
    pub category: LogCategory,
    /// The message text
    pub message: String,
}

/// Logger that captures every line for later assertions
///
/// Cheap to clone; clones share the captured lines.
#[derive(Debug, Clone, Default)]
pub struct RecordingLogger {
    lines: Arc<Mutex<Vec<LogLine>>>,
}

impl RecordingLogger {
    /// Create an empty recording logger
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every line captured so far
    ///
    /// # Panics
    ///
    /// Panics if a previous holder of the line buffer panicked.
    #[must_use]
    pub fn lines(&self) -> Vec<LogLine> {
        #[allow(clippy::unwrap_used)] // lock can only fail if a holder panicked
        self.lines.lock().unwrap().clone()
    }

    /// Whether any captured message contains `fragment`
    #[must_use]
    pub fn contains(&self, fragment: &str) -> bool {
        self.lines().iter().any(|l| l.message.contains(fragment))
    }

    /// Count of lines captured at `level`
    #[must_use]
    pub fn count_at(&self, level: LogLevel) -> usize {
        self.lines().iter().filter(|l| l.level == level).count()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: LogLevel, category: LogCategory, message: &str) {
        #[allow(clippy::unwrap_used)] // lock can only fail if a holder panicked
        self.lines.lock().unwrap().push(LogLine {
            level,
            category,
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_lines_with_level_and_category() {
        let logger = RecordingLogger::new();
        logger.log(LogLevel::Debug, LogCategory::Network, "GET /users");
        logger.log(LogLevel::Error, LogCategory::Network, "GET /users failed");

        assert_eq!(logger.lines().len(), 2);
        assert!(logger.contains("failed"));
        assert_eq!(logger.count_at(LogLevel::Error), 1);
        assert_eq!(logger.lines()[0].category, LogCategory::Network);
    }

    #[test]
    fn clones_share_the_buffer() {
        let logger = RecordingLogger::new();
        let clone = logger.clone();
        clone.log(LogLevel::Info, LogCategory::General, "shared");

        assert!(logger.contains("shared"));
    }
}
