//! crates/pkglog/src/tracing_bridge.rs
//! Formatter that forwards package log entries to the tracing crate.
//!
//! Installing [`TracingFormatter`] lets programs that already run a
//! `tracing` subscriber receive every entry that passes a package logger's
//! level check. The package logger stays the only filter on what reaches the
//! bridge; the subscriber decides how events are rendered and where they go.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pkglog::{TracingFormatter, new_package_logger, set_formatter};
//!
//! tracing_subscriber::fmt().with_max_level(tracing::Level::TRACE).init();
//! set_formatter(Arc::new(TracingFormatter));
//!
//! new_package_logger("cluster", "raft").notice("became leader");
//! ```

use crate::entry::LogEntry;
use crate::formatter::Formatter;
use crate::level::Level;

/// Target of the tracing events emitted by [`TracingFormatter`].
pub const BRIDGE_TARGET: &str = "pkglog";

/// Formatter emitting one tracing event per log entry.
///
/// Events carry the package name in the `package` field and the original
/// level name in the `level` field.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingFormatter;

impl TracingFormatter {
    /// Maps a package log level onto the closest tracing level.
    #[must_use]
    pub const fn tracing_level(level: Level) -> tracing::Level {
        match level {
            Level::Critical | Level::Error => tracing::Level::ERROR,
            Level::Warning => tracing::Level::WARN,
            Level::Notice | Level::Info => tracing::Level::INFO,
            Level::Debug => tracing::Level::DEBUG,
            Level::Trace => tracing::Level::TRACE,
        }
    }
}

impl Formatter for TracingFormatter {
    fn format(&self, pkg: &str, level: Level, entry: &dyn LogEntry) {
        let message = entry.log_string();
        let name = level.name();
        match Self::tracing_level(level) {
            tracing::Level::ERROR => {
                tracing::error!(target: BRIDGE_TARGET, package = %pkg, level = name, "{message}");
            }
            tracing::Level::WARN => {
                tracing::warn!(target: BRIDGE_TARGET, package = %pkg, level = name, "{message}");
            }
            tracing::Level::INFO => {
                tracing::info!(target: BRIDGE_TARGET, package = %pkg, level = name, "{message}");
            }
            tracing::Level::DEBUG => {
                tracing::debug!(target: BRIDGE_TARGET, package = %pkg, level = name, "{message}");
            }
            _ => {
                tracing::trace!(target: BRIDGE_TARGET, package = %pkg, level = name, "{message}");
            }
        }
    }
}
