//! crates/pkglog/src/formatter.rs
//! The process-wide formatting hook.

use crate::entry::LogEntry;
use crate::level::Level;

/// Renders entries that passed a package logger's level check.
///
/// The registry stores exactly one formatter for the whole process, replaced
/// through [`set_formatter`](crate::set_formatter). Package loggers consult
/// their level before calling [`format`](Self::format), so implementations
/// never see suppressed entries. Rendering and output are entirely up to the
/// implementation.
///
/// Formatters are shared between threads and called without the registry
/// lock held, so they may register or look up loggers themselves.
pub trait Formatter: Send + Sync {
    /// Renders `entry`, emitted by package `pkg` at `level`.
    ///
    /// Called once per entry that passed the package's level check, on the
    /// thread that logged it.
    ///
    /// # Arguments
    ///
    /// * `pkg` - Name of the package whose logger emitted the entry
    /// * `level` - Level the entry was logged at
    /// * `entry` - The value to render, usually through [`LogEntry::log_string`]
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::{Arc, Mutex};
    /// use pkglog::{Formatter, Level, LogEntry, new_package_logger, set_formatter};
    ///
    /// #[derive(Default)]
    /// struct Lines(Mutex<Vec<String>>);
    ///
    /// impl Formatter for Lines {
    ///     fn format(&self, pkg: &str, level: Level, entry: &dyn LogEntry) {
    ///         let line = format!("{} {pkg}: {}", level.as_char(), entry.log_string());
    ///         self.0.lock().unwrap().push(line);
    ///     }
    /// }
    ///
    /// let lines = Arc::new(Lines::default());
    /// set_formatter(lines.clone());
    ///
    /// let log = new_package_logger("doc-formatter", "disk");
    /// log.warning("almost full");
    /// log.debug("hidden at INFO");
    ///
    /// assert_eq!(*lines.0.lock().unwrap(), ["W disk: almost full"]);
    /// ```
    fn format(&self, pkg: &str, level: Level, entry: &dyn LogEntry);

    /// Flushes any buffered output.
    fn flush(&self) {}
}

/// Formatter installed until one is configured; discards every entry.
#[derive(Clone, Copy, Debug, Default)]
pub struct NopFormatter;

impl Formatter for NopFormatter {
    fn format(&self, _pkg: &str, _level: Level, _entry: &dyn LogEntry) {}
}
