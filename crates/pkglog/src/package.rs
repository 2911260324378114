//! crates/pkglog/src/package.rs
//! Per-package logger handles and the lock-free level check.

use ::core::fmt;
use std::sync::atomic::{AtomicI8, Ordering};

use crate::entry::LogEntry;
use crate::level::Level;
use crate::registry::Registry;

/// Logger owned by the registry for one package of one repository.
///
/// Handles are obtained from [`new_package_logger`](crate::new_package_logger)
/// and shared as `Arc<PackageLogger>`. The current level lives in an atomic
/// cell: reading it never takes the registry lock, while every write goes
/// through the registry's bulk setters so level changes show up in all handles
/// at once.
///
/// # Examples
///
/// ```
/// use pkglog::{Level, new_package_logger};
///
/// let log = new_package_logger("doc-repo", "net");
/// assert_eq!(log.level(), Level::Info);
/// assert!(log.level_at(Level::Warning));
/// assert!(!log.level_at(Level::Debug));
///
/// log.info("listening");
/// log.debug(format_args!("{} peers", 3)); // below threshold, not formatted
/// ```
pub struct PackageLogger {
    repo: String,
    name: String,
    level: AtomicI8,
    registry: &'static Registry,
}

impl PackageLogger {
    pub(crate) fn new(registry: &'static Registry, repo: &str, name: &str, level: Level) -> Self {
        Self {
            repo: repo.to_owned(),
            name: name.to_owned(),
            level: AtomicI8::new(level.as_i8()),
            registry,
        }
    }

    /// Returns the package name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the name of the repository the package belongs to.
    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Returns the current level.
    #[must_use]
    #[inline]
    pub fn level(&self) -> Level {
        decode(self.level.load(Ordering::Relaxed))
    }

    /// Reports whether a message at `level` would be handed to the formatter.
    #[must_use]
    #[inline]
    pub fn level_at(&self, level: Level) -> bool {
        level.as_i8() <= self.level.load(Ordering::Relaxed)
    }

    /// Stores `level` and returns the level it replaced.
    ///
    /// Callers must hold the registry lock.
    pub(crate) fn set_level(&self, level: Level) -> Level {
        decode(self.level.swap(level.as_i8(), Ordering::Relaxed))
    }

    /// Hands `entry` to the process-wide formatter when `level` is enabled.
    pub fn log(&self, level: Level, entry: impl LogEntry) {
        if !self.level_at(level) {
            return;
        }
        self.registry.formatter().format(&self.name, level, &entry);
    }

    /// Logs pre-formatted arguments, usually built with `format_args!`.
    pub fn log_args(&self, level: Level, args: fmt::Arguments<'_>) {
        self.log(level, args);
    }

    /// Logs at [`Level::Critical`].
    pub fn critical(&self, entry: impl LogEntry) {
        self.log(Level::Critical, entry);
    }

    /// Logs at [`Level::Error`].
    pub fn error(&self, entry: impl LogEntry) {
        self.log(Level::Error, entry);
    }

    /// Logs at [`Level::Warning`].
    pub fn warning(&self, entry: impl LogEntry) {
        self.log(Level::Warning, entry);
    }

    /// Logs at [`Level::Notice`].
    pub fn notice(&self, entry: impl LogEntry) {
        self.log(Level::Notice, entry);
    }

    /// Logs at [`Level::Info`].
    pub fn info(&self, entry: impl LogEntry) {
        self.log(Level::Info, entry);
    }

    /// Logs at [`Level::Debug`].
    pub fn debug(&self, entry: impl LogEntry) {
        self.log(Level::Debug, entry);
    }

    /// Logs at [`Level::Trace`].
    pub fn trace(&self, entry: impl LogEntry) {
        self.log(Level::Trace, entry);
    }

    /// Logs `entry` at [`Level::Critical`] and then panics with the same text.
    pub fn panic(&self, entry: impl LogEntry) -> ! {
        let message = entry.log_string();
        self.log(Level::Critical, message.as_str());
        self.flush();
        panic!("{message}");
    }

    /// Flushes the process-wide formatter.
    pub fn flush(&self) {
        self.registry.formatter().flush();
    }
}

impl fmt::Debug for PackageLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackageLogger")
            .field("repo", &self.repo)
            .field("name", &self.name)
            .field("level", &self.level())
            .finish_non_exhaustive()
    }
}

/// Raw values only ever come from [`Level::as_i8`]; anything else means the
/// cell was corrupted.
fn decode(raw: i8) -> Level {
    Level::from_i8(raw).map_or_else(|| panic!("unhandled log level value {raw}"), |level| level)
}
