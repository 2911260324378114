//! Integration tests for the process-wide formatter hook.
//!
//! Kept in its own test binary because the formatter is shared by every
//! package logger in the process.

use pkglog::{BaseLogEntry, Formatter, Level, LogEntry, new_package_logger, set_formatter};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Recorder {
    lines: Mutex<Vec<String>>,
}

impl Formatter for Recorder {
    fn format(&self, pkg: &str, level: Level, entry: &dyn LogEntry) {
        self.lines
            .lock()
            .unwrap()
            .push(format!("{} {pkg}: {}", level.as_char(), entry.log_string()));
    }
}

/// Verifies formatted output follows level changes made after registration.
#[test]
fn formatter_sees_entries_allowed_by_current_level() {
    let recorder = Arc::new(Recorder::default());
    set_formatter(recorder.clone());

    let logger = new_package_logger("fmt-repo", "server");
    logger.info("listening");
    logger.debug("hidden");

    let repo = pkglog::must_repo_logger("fmt-repo");
    repo.apply_log_level_config("server=D").unwrap();
    logger.debug(BaseLogEntry::new("now visible"));
    logger.log(Level::Trace, "still hidden");

    repo.apply_log_level_config("*=C").unwrap();
    logger.error("hidden again");
    logger.critical(format_args!("exit code {}", 2));

    let lines = recorder.lines.lock().unwrap().clone();
    assert_eq!(
        lines,
        vec![
            "I server: listening",
            "D server: now visible",
            "C server: exit code 2",
        ]
    );
}
