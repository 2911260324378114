#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `pkglog` is a process-wide registry of log levels. Independent components
//! ("packages") grouped into "repositories" register a named
//! [`PackageLogger`] once, then check its current [`Level`] on every log call.
//! Operators and embedding programs change verbosity per package, per
//! repository, or for the whole process while it runs; the change is visible
//! through every handle already handed out.
//!
//! # Design
//!
//! - [`Registry`] is the single, lazily created instance holding every
//!   repository, every package logger and the process-wide [`Formatter`]
//!   behind one mutex. The crate-level functions ([`new_package_logger`],
//!   [`repo_logger`], [`must_repo_logger`], [`set_global_log_level`],
//!   [`set_formatter`]) forward to it.
//! - [`PackageLogger`] stores its level in an atomic cell. The per-message
//!   check ([`PackageLogger::level_at`]) is a relaxed load that never takes
//!   the registry lock.
//! - [`RepoLogger`] applies levels to the packages of one repository, either
//!   in bulk or from the `pkg=level` configuration language parsed by
//!   [`parse_log_level_config`].
//! - Rendering is delegated to the installed [`Formatter`]; the default
//!   [`NopFormatter`] discards everything. With the `tracing` feature,
//!   `TracingFormatter` forwards entries to the `tracing` ecosystem.
//!
//! # Invariants
//!
//! - Repositories and packages are created on first registration and never
//!   removed. New packages start at [`Level::Info`].
//! - Registering an existing `(repo, pkg)` pair returns the same logger and
//!   leaves its level alone.
//! - Repository lookups never create repositories.
//! - In a configuration, the `*` entry is applied before any named package.
//!   Unknown package names are ignored.
//!
//! # Errors
//!
//! [`parse_level`] reports [`ParseLevelError`]; [`parse_log_level_config`]
//! reports [`ConfigError`]; [`repo_logger`] reports [`RepoNotFoundError`].
//! [`must_repo_logger`] panics instead of returning the lookup error.
//!
//! # Examples
//!
//! ```
//! use pkglog::{Level, must_repo_logger, new_package_logger, set_global_log_level};
//!
//! let server = new_package_logger("doc-example", "server");
//! let storage = new_package_logger("doc-example", "storage");
//!
//! must_repo_logger("doc-example")
//!     .apply_log_level_config("*=NOTICE,storage=DEBUG")
//!     .expect("valid configuration");
//! assert_eq!(server.level(), Level::Notice);
//! assert_eq!(storage.level(), Level::Debug);
//!
//! set_global_log_level(Level::Warning);
//! assert!(!storage.level_at(Level::Info));
//! ```

use std::sync::Arc;

mod config;
mod entry;
mod formatter;
mod level;
mod package;
mod registry;
mod repo;
mod trace;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use config::{ConfigError, LevelConfig, WILDCARD, parse_log_level_config};
pub use entry::{BaseLogEntry, LogEntry};
pub use formatter::{Formatter, NopFormatter};
pub use level::{InvalidLevelError, Level, ParseLevelError, parse_level};
pub use package::PackageLogger;
pub use registry::{Registry, RepoNotFoundError};
pub use repo::RepoLogger;
#[cfg(feature = "tracing")]
pub use tracing_bridge::{BRIDGE_TARGET, TracingFormatter};

/// Returns the logger for `pkg` in `repo`, registering both when needed.
///
/// See [`Registry::new_package_logger`].
pub fn new_package_logger(repo: &str, pkg: &str) -> Arc<PackageLogger> {
    Registry::global().new_package_logger(repo, pkg)
}

/// Looks up a repository without creating it.
///
/// See [`Registry::repo_logger`].
pub fn repo_logger(repo: &str) -> Result<RepoLogger, RepoNotFoundError> {
    Registry::global().repo_logger(repo)
}

/// Looks up a repository that must already exist.
///
/// # Panics
///
/// Panics when no package has been registered under `repo`.
pub fn must_repo_logger(repo: &str) -> RepoLogger {
    Registry::global().must_repo_logger(repo)
}

/// Sets every registered package in every repository to `level`.
pub fn set_global_log_level(level: Level) {
    Registry::global().set_global_log_level(level);
}

/// Replaces the process-wide formatter.
pub fn set_formatter(formatter: Arc<dyn Formatter>) {
    Registry::global().set_formatter(formatter);
}
