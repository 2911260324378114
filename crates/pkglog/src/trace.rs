//! crates/pkglog/src/trace.rs
//! Tracing of registry administration.
//!
//! Every structural change and level assignment performed by the registry is
//! reported here. The events are compiled only with the `tracing` feature;
//! without it each function is an inline no-op.
//!
//! Callers collect what happened while holding the registry lock and report
//! it only after the guard is dropped, so a subscriber is free to call back
//! into the registry from its event handler.

use std::sync::Arc;

use crate::level::Level;
use crate::package::PackageLogger;

/// Target name for registry tracing events.
#[cfg(feature = "tracing")]
pub const REGISTRY_TARGET: &str = "pkglog::registry";

/// One level assignment, recorded under the registry lock.
#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
pub struct LevelChange {
    logger: Arc<PackageLogger>,
    from: Level,
    to: Level,
}

impl LevelChange {
    /// Stores `to` in `logger` and records the transition.
    ///
    /// Callers must hold the registry lock.
    pub fn apply(logger: &Arc<PackageLogger>, to: Level) -> Self {
        let from = logger.set_level(to);
        Self {
            logger: Arc::clone(logger),
            from,
            to,
        }
    }
}

// ============================================================================
// Tracing functions (feature-gated)
// ============================================================================

/// Traces creation of a repository entry on first package registration.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_repo_created(repo: &str) {
    tracing::debug!(target: REGISTRY_TARGET, repo = %repo, "repo_created");
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_repo_created(_repo: &str) {}

/// Traces creation of a package logger.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_package_created(repo: &str, pkg: &str, level: Level) {
    tracing::debug!(
        target: REGISTRY_TARGET,
        repo = %repo,
        package = %pkg,
        level = %level,
        "package_created"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_package_created(_repo: &str, _pkg: &str, _level: Level) {}

/// Traces each recorded level assignment, in the order it was applied.
///
/// # Arguments
///
/// * `changes` - Assignments collected under the registry lock, one event each
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_level_changes(changes: &[LevelChange]) {
    for change in changes {
        tracing::trace!(
            target: REGISTRY_TARGET,
            repo = %change.logger.repo(),
            package = %change.logger.name(),
            from = %change.from,
            to = %change.to,
            "level_set"
        );
    }
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_level_changes(_changes: &[LevelChange]) {}

/// Traces a bulk assignment covering a whole repository, or every
/// repository when `repo` is `None`.
///
/// # Arguments
///
/// * `repo` - The repository assigned, or `None` for a process-wide assignment
/// * `level` - The level every package received
/// * `packages` - How many packages were assigned
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_bulk_level_set(repo: Option<&str>, level: Level, packages: usize) {
    tracing::debug!(
        target: REGISTRY_TARGET,
        repo = repo.unwrap_or("*"),
        level = %level,
        packages = packages,
        "bulk_level_set"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_bulk_level_set(_repo: Option<&str>, _level: Level, _packages: usize) {}

/// Traces replacement of the process-wide formatter.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_formatter_replaced() {
    tracing::debug!(target: REGISTRY_TARGET, "formatter_replaced");
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_formatter_replaced() {}

/// Traces a repository lookup that found nothing.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_repo_missing(repo: &str) {
    tracing::debug!(target: REGISTRY_TARGET, repo = %repo, "repo_missing");
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_repo_missing(_repo: &str) {}
