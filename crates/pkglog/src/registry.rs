//! crates/pkglog/src/registry.rs
//! Process-wide registry of repositories, packages and the formatter.

use ::core::fmt;
use std::collections::HashMap;
use std::mem;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use thiserror::Error;

use crate::formatter::{Formatter, NopFormatter};
use crate::level::Level;
use crate::package::PackageLogger;
use crate::repo::RepoLogger;
use crate::trace::{
    LevelChange, trace_bulk_level_set, trace_formatter_replaced, trace_level_changes,
    trace_package_created, trace_repo_created, trace_repo_missing,
};

/// Global registry instance.
static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Package loggers of one repository, keyed by package name.
pub type Packages = HashMap<String, Arc<PackageLogger>>;

/// Error returned when looking up a repository that has no registered packages.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("no packages registered for repo {repo}")]
pub struct RepoNotFoundError {
    repo: String,
}

impl RepoNotFoundError {
    pub(crate) fn new(repo: &str) -> Self {
        Self {
            repo: repo.to_owned(),
        }
    }

    /// Returns the repository name that was looked up.
    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }
}

struct RegistryState {
    repos: HashMap<String, Packages>,
    formatter: Arc<dyn Formatter>,
}

/// The single registry of package loggers for the process.
///
/// Obtain it with [`Registry::global`]; it is created on first use and lives
/// until the process exits. All structural changes, bulk level assignments,
/// lookups and formatter swaps are serialised behind one mutex. Reading a
/// package's level does not touch that mutex.
///
/// The crate-level functions ([`new_package_logger`](crate::new_package_logger),
/// [`repo_logger`](crate::repo_logger), ...) forward to this instance.
///
/// # Thread Safety
///
/// Every method may be called from any thread at any time, including
/// concurrently for the same repository and package.
pub struct Registry {
    state: Mutex<RegistryState>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState {
                repos: HashMap::new(),
                formatter: Arc::new(NopFormatter),
            }),
        }
    }

    /// Returns the process-wide registry.
    #[must_use]
    pub fn global() -> &'static Self {
        REGISTRY.get_or_init(Self::new)
    }

    /// Builds a private registry for unit tests that must not observe other
    /// tests' global state.
    #[cfg(test)]
    pub(crate) fn leaked() -> &'static Self {
        Box::leak(Box::new(Self::new()))
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the logger for `pkg` within `repo`, creating either on demand.
    ///
    /// A new package starts at [`Level::Info`]. An existing package is
    /// returned as is, keeping whatever level it currently has, so every call
    /// for the same pair shares one logger.
    pub fn new_package_logger(&'static self, repo: &str, pkg: &str) -> Arc<PackageLogger> {
        let mut repo_created = false;
        let mut package_created = false;
        let logger = {
            let mut state = self.lock();
            let packages = state.repos.entry(repo.to_owned()).or_insert_with(|| {
                repo_created = true;
                Packages::new()
            });
            let logger = packages.entry(pkg.to_owned()).or_insert_with(|| {
                package_created = true;
                Arc::new(PackageLogger::new(self, repo, pkg, Level::Info))
            });
            Arc::clone(logger)
        };
        if repo_created {
            trace_repo_created(repo);
        }
        if package_created {
            trace_package_created(repo, pkg, Level::Info);
        }
        logger
    }

    /// Returns a handle to `repo`'s package loggers.
    ///
    /// Never creates the repository; it exists once at least one package has
    /// been registered under it.
    pub fn repo_logger(&'static self, repo: &str) -> Result<RepoLogger, RepoNotFoundError> {
        let found = self.lock().repos.contains_key(repo);
        if found {
            Ok(RepoLogger::new(self, repo))
        } else {
            trace_repo_missing(repo);
            Err(RepoNotFoundError::new(repo))
        }
    }

    /// Like [`repo_logger`](Self::repo_logger) for wiring code where a missing
    /// repository is a programming error.
    ///
    /// # Panics
    ///
    /// Panics when no package has been registered under `repo`.
    pub fn must_repo_logger(&'static self, repo: &str) -> RepoLogger {
        match self.repo_logger(repo) {
            Ok(logger) => logger,
            Err(err) => panic!("{err}"),
        }
    }

    /// Sets every package of every repository to `level`.
    pub fn set_global_log_level(&self, level: Level) {
        let mut changes = Vec::new();
        {
            let state = self.lock();
            for packages in state.repos.values() {
                set_all(packages, level, &mut changes);
            }
        }
        trace_bulk_level_set(None, level, changes.len());
        trace_level_changes(&changes);
    }

    /// Replaces the formatter used by every package logger.
    ///
    /// The previous formatter is released after the registry lock.
    pub fn set_formatter(&self, formatter: Arc<dyn Formatter>) {
        let previous = mem::replace(&mut self.lock().formatter, formatter);
        trace_formatter_replaced();
        drop(previous);
    }

    /// Returns the formatter currently installed.
    #[must_use]
    pub fn formatter(&self) -> Arc<dyn Formatter> {
        Arc::clone(&self.lock().formatter)
    }

    /// Returns the names of all registered repositories, sorted.
    #[must_use]
    pub fn repo_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().repos.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Runs `op` on `repo`'s packages while holding the registry lock.
    ///
    /// `op` must not call back into the registry or emit tracing events.
    pub(crate) fn with_packages<R>(
        &self,
        repo: &str,
        op: impl FnOnce(&Packages) -> R,
    ) -> Option<R> {
        self.lock().repos.get(repo).map(op)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("Registry")
            .field("repos", &state.repos.len())
            .finish_non_exhaustive()
    }
}

/// Sets every package in `packages` to `level`, recording each change.
///
/// Callers must hold the registry lock.
pub fn set_all(packages: &Packages, level: Level, changes: &mut Vec<LevelChange>) {
    for logger in packages.values() {
        changes.push(LevelChange::apply(logger, level));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::LogEntry;
    use std::thread;

    #[test]
    fn registration_is_idempotent() {
        let registry = Registry::leaked();
        let first = registry.new_package_logger("repoA", "pkgA");
        let second = registry.new_package_logger("repoA", "pkgA");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn new_packages_start_at_info() {
        let registry = Registry::leaked();
        let logger = registry.new_package_logger("repo", "fresh");
        assert_eq!(logger.level(), Level::Info);
    }

    #[test]
    fn reregistration_keeps_level() {
        let registry = Registry::leaked();
        let logger = registry.new_package_logger("repo", "pkg");
        registry.set_global_log_level(Level::Trace);
        let again = registry.new_package_logger("repo", "pkg");
        assert_eq!(again.level(), Level::Trace);
        assert_eq!(logger.level(), Level::Trace);
    }

    #[test]
    fn same_package_name_in_two_repos_is_distinct() {
        let registry = Registry::leaked();
        let a = registry.new_package_logger("one", "shared");
        let b = registry.new_package_logger("two", "shared");
        assert!(!Arc::ptr_eq(&a, &b));
        registry
            .must_repo_logger("one")
            .set_repo_log_level(Level::Error);
        assert_eq!(a.level(), Level::Error);
        assert_eq!(b.level(), Level::Info);
    }

    #[test]
    fn lookup_does_not_create() {
        let registry = Registry::leaked();
        let err = registry.repo_logger("unknown").unwrap_err();
        assert_eq!(err.repo(), "unknown");
        assert_eq!(err.to_string(), "no packages registered for repo unknown");
        assert!(registry.repo_names().is_empty());
        assert!(registry.repo_logger("unknown").is_err());
    }

    #[test]
    fn lookup_finds_registered_repo() {
        let registry = Registry::leaked();
        registry.new_package_logger("known", "pkg");
        let repo = registry.repo_logger("known").unwrap();
        assert_eq!(repo.name(), "known");
    }

    #[test]
    #[should_panic(expected = "no packages registered for repo unknown")]
    fn must_repo_logger_panics_when_missing() {
        let registry = Registry::leaked();
        let _ = registry.must_repo_logger("unknown");
    }

    #[test]
    fn global_level_reaches_every_repo() {
        let registry = Registry::leaked();
        let loggers = [
            registry.new_package_logger("r1", "a"),
            registry.new_package_logger("r1", "b"),
            registry.new_package_logger("r2", "c"),
        ];
        registry
            .must_repo_logger("r1")
            .set_repo_log_level(Level::Trace);
        registry.set_global_log_level(Level::Warning);
        for logger in &loggers {
            assert_eq!(logger.level(), Level::Warning);
        }
    }

    #[test]
    fn repo_names_are_sorted() {
        let registry = Registry::leaked();
        registry.new_package_logger("zeta", "p");
        registry.new_package_logger("alpha", "p");
        registry.new_package_logger("alpha", "q");
        assert_eq!(registry.repo_names(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn formatter_swap_is_seen_by_existing_handles() {
        struct Counting(Mutex<usize>);

        impl Formatter for Counting {
            fn format(&self, _pkg: &str, _level: Level, _entry: &dyn LogEntry) {
                *self.0.lock().unwrap() += 1;
            }
        }

        let registry = Registry::leaked();
        let logger = registry.new_package_logger("repo", "pkg");
        logger.info("before any formatter");

        let counting = Arc::new(Counting(Mutex::new(0)));
        registry.set_formatter(counting.clone());
        logger.info("counted");
        logger.debug("suppressed");
        assert_eq!(*counting.0.lock().unwrap(), 1);

        registry.set_formatter(Arc::new(NopFormatter));
        logger.info("discarded");
        assert_eq!(*counting.0.lock().unwrap(), 1);
    }

    #[test]
    fn replaced_formatter_is_dropped_after_unlocking() {
        struct Lookup(&'static Registry);

        impl Formatter for Lookup {
            fn format(&self, _pkg: &str, _level: Level, _entry: &dyn LogEntry) {}
        }

        impl Drop for Lookup {
            fn drop(&mut self) {
                let _ = self.0.repo_logger("dropped");
            }
        }

        let registry = Registry::leaked();
        registry.set_formatter(Arc::new(Lookup(registry)));
        registry.set_formatter(Arc::new(NopFormatter));
        assert!(registry.repo_names().is_empty());
    }

    #[test]
    fn formatter_may_use_the_registry() {
        struct Reentrant(&'static Registry);

        impl Formatter for Reentrant {
            fn format(&self, pkg: &str, _level: Level, _entry: &dyn LogEntry) {
                let _ = self.0.new_package_logger("formatter", pkg);
            }
        }

        let registry = Registry::leaked();
        registry.set_formatter(Arc::new(Reentrant(registry)));
        registry.new_package_logger("repo", "pkg").info("hello");
        assert_eq!(registry.repo_names(), vec!["formatter", "repo"]);
    }

    #[test]
    fn concurrent_registration_shares_one_logger() {
        let registry = Registry::leaked();
        let handles: Vec<_> = (0..16)
            .map(|_| thread::spawn(move || registry.new_package_logger("busy", "pkg")))
            .collect();
        let loggers: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for logger in &loggers[1..] {
            assert!(Arc::ptr_eq(&loggers[0], logger));
        }
        registry
            .must_repo_logger("busy")
            .set_repo_log_level(Level::Debug);
        for logger in &loggers {
            assert_eq!(logger.level(), Level::Debug);
        }
    }

    #[test]
    fn global_returns_one_instance() {
        assert!(std::ptr::eq(Registry::global(), Registry::global()));
    }

    #[test]
    fn debug_reports_repo_count() {
        let registry = Registry::leaked();
        registry.new_package_logger("one", "p");
        assert!(format!("{registry:?}").contains("repos: 1"));
    }
}
