//! Integration tests for the `pkg=level` configuration language.
//!
//! Covers parsing in isolation and applying parsed settings to registered
//! repositories, including the `*` baseline and unknown package names.

use pkglog::{
    ConfigError, Level, LevelConfig, ParseLevelError, WILDCARD, must_repo_logger,
    new_package_logger, parse_log_level_config,
};

// ============================================================================
// Parsing
// ============================================================================

/// Verifies a token with two `=` is rejected and named in the error.
#[test]
fn extra_equals_sign_is_rejected() {
    let err = parse_log_level_config("a=INFO=extra").unwrap_err();

    assert_eq!(err.setting(), Some("a=INFO=extra"));
    assert!(err.to_string().contains("a=INFO=extra"));
}

/// Verifies an invalid level aborts the whole parse with the level error.
#[test]
fn invalid_level_aborts_parse() {
    let err = parse_log_level_config("a=INFO,b=bogus").unwrap_err();

    assert_eq!(err, ConfigError::Level(ParseLevelError::new("bogus")));
    assert!(err.to_string().contains("bogus"));
}

/// Verifies digits, characters and names are all accepted in one string.
#[test]
fn mixed_level_forms_parse() {
    let config = parse_log_level_config("*=0,http=W,raft=TRACE").unwrap();

    assert_eq!(config[WILDCARD], Level::Error);
    assert_eq!(config["http"], Level::Warning);
    assert_eq!(config["raft"], Level::Trace);
}

// ============================================================================
// Applying
// ============================================================================

/// Verifies the wildcard sets a baseline before specific overrides.
#[test]
fn wildcard_then_override() {
    let a = new_package_logger("cfg-baseline", "a");
    let b = new_package_logger("cfg-baseline", "b");
    let repo = must_repo_logger("cfg-baseline");

    let config = repo.parse_log_level_config("*=ERROR,b=DEBUG").unwrap();
    repo.set_log_level(&config);

    assert_eq!(a.level(), Level::Error);
    assert_eq!(b.level(), Level::Debug);
}

/// Verifies unknown package names leave existing levels untouched.
#[test]
fn unknown_package_is_ignored() {
    let a = new_package_logger("cfg-unknown", "a");
    let b = new_package_logger("cfg-unknown", "b");
    let repo = must_repo_logger("cfg-unknown");

    let config = LevelConfig::from([("unknownpkg".to_owned(), Level::Trace)]);
    repo.set_log_level(&config);

    assert_eq!(a.level(), Level::Info);
    assert_eq!(b.level(), Level::Info);
    assert!(repo.package("unknownpkg").is_none());
}

/// Verifies a configuration shared by two repositories only touches the
/// packages each one has.
#[test]
fn shared_configuration_across_repositories() {
    let api = new_package_logger("cfg-shared-1", "api");
    let wal = new_package_logger("cfg-shared-2", "wal");
    let config = parse_log_level_config("api=DEBUG,wal=CRITICAL").unwrap();

    must_repo_logger("cfg-shared-1").set_log_level(&config);
    assert_eq!(api.level(), Level::Debug);
    assert_eq!(wal.level(), Level::Info);

    must_repo_logger("cfg-shared-2").set_log_level(&config);
    assert_eq!(wal.level(), Level::Critical);
}

/// Verifies parsing through a repository handle does not change levels.
#[test]
fn parsing_alone_does_not_apply() {
    let a = new_package_logger("cfg-pure", "a");
    let repo = must_repo_logger("cfg-pure");

    let _ = repo.parse_log_level_config("a=TRACE").unwrap();
    assert_eq!(a.level(), Level::Info);
}

/// Verifies a failing configuration string applies nothing.
#[test]
fn failed_apply_is_all_or_nothing() {
    let a = new_package_logger("cfg-atomic", "a");
    let repo = must_repo_logger("cfg-atomic");

    assert!(repo.apply_log_level_config("a=TRACE,oops").is_err());
    assert_eq!(a.level(), Level::Info);

    repo.apply_log_level_config("a=TRACE").unwrap();
    assert_eq!(a.level(), Level::Trace);
}
