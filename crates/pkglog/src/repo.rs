//! crates/pkglog/src/repo.rs
//! Repository-scoped level management.

use std::sync::Arc;

use crate::config::{ConfigError, LevelConfig, WILDCARD, parse_log_level_config};
use crate::level::Level;
use crate::package::PackageLogger;
use crate::registry::{Registry, set_all};
use crate::trace::{LevelChange, trace_bulk_level_set, trace_level_changes};

/// Handle to the package loggers registered under one repository.
///
/// Obtained from [`repo_logger`](crate::repo_logger) or
/// [`must_repo_logger`](crate::must_repo_logger). The handle stores only the
/// repository name: packages registered after the handle was created are
/// covered by its operations too. Every method takes the registry lock.
///
/// # Examples
///
/// ```
/// use pkglog::{Level, must_repo_logger, new_package_logger};
///
/// let raft = new_package_logger("doc-cluster", "raft");
/// let wal = new_package_logger("doc-cluster", "wal");
///
/// let repo = must_repo_logger("doc-cluster");
/// repo.apply_log_level_config("*=ERROR,wal=DEBUG").unwrap();
///
/// assert_eq!(raft.level(), Level::Error);
/// assert_eq!(wal.level(), Level::Debug);
/// ```
#[derive(Clone, Debug)]
pub struct RepoLogger {
    registry: &'static Registry,
    name: String,
}

impl RepoLogger {
    pub(crate) fn new(registry: &'static Registry, name: &str) -> Self {
        Self {
            registry,
            name: name.to_owned(),
        }
    }

    /// Returns the repository name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets every package of the repository to `level`.
    pub fn set_repo_log_level(&self, level: Level) {
        let mut changes = Vec::new();
        let found = self
            .registry
            .with_packages(&self.name, |packages| set_all(packages, level, &mut changes));
        if found.is_some() {
            trace_bulk_level_set(Some(&self.name), level, changes.len());
            trace_level_changes(&changes);
        }
    }

    /// Parses a `pkg=level,...` string without changing any level.
    ///
    /// See [`parse_log_level_config`] for the accepted syntax.
    pub fn parse_log_level_config(&self, conf: &str) -> Result<LevelConfig, ConfigError> {
        parse_log_level_config(conf)
    }

    /// Applies parsed per-package levels to this repository.
    ///
    /// The [`WILDCARD`] entry, when present, is applied to every package
    /// first; named packages are applied afterwards in no particular order.
    /// Names that match no registered package are ignored, which lets one
    /// configuration string be shared by binaries with different packages.
    pub fn set_log_level(&self, config: &LevelConfig) {
        let mut changes = Vec::new();
        let mut baseline = None;
        self.registry.with_packages(&self.name, |packages| {
            if let Some(&level) = config.get(WILDCARD) {
                set_all(packages, level, &mut changes);
                baseline = Some((level, changes.len()));
            }
            for (pkg, &level) in config {
                if let Some(logger) = packages.get(pkg) {
                    changes.push(LevelChange::apply(logger, level));
                }
            }
        });
        if let Some((level, count)) = baseline {
            trace_bulk_level_set(Some(&self.name), level, count);
        }
        trace_level_changes(&changes);
    }

    /// Parses `conf` and applies it. Nothing changes when parsing fails.
    pub fn apply_log_level_config(&self, conf: &str) -> Result<(), ConfigError> {
        let config = self.parse_log_level_config(conf)?;
        self.set_log_level(&config);
        Ok(())
    }

    /// Returns the logger of an already registered package.
    #[must_use]
    pub fn package(&self, name: &str) -> Option<Arc<PackageLogger>> {
        self.registry
            .with_packages(&self.name, |packages| packages.get(name).cloned())
            .flatten()
    }

    /// Returns the names of the repository's packages, sorted.
    #[must_use]
    pub fn package_names(&self) -> Vec<String> {
        let mut names = self
            .registry
            .with_packages(&self.name, |packages| {
                packages.keys().cloned().collect::<Vec<_>>()
            })
            .unwrap_or_default();
        names.sort_unstable();
        names
    }
}
