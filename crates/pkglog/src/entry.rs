//! crates/pkglog/src/entry.rs
//! Values that can be handed to a formatter.

use ::core::fmt;

/// Anything that can be rendered into a log line.
///
/// Implement [`log_string`](Self::log_string) on your own types to control how
/// they appear in logs. Plain strings and `format_args!` output implement the
/// trait directly.
///
/// Rendering happens inside the formatter, after the level check, so an entry
/// logged below its package's level is never rendered.
///
/// # Examples
///
/// ```
/// use pkglog::{BaseLogEntry, LogEntry, new_package_logger};
///
/// struct Peer {
///     id: u32,
///     addr: &'static str,
/// }
///
/// impl LogEntry for Peer {
///     fn log_string(&self) -> String {
///         format!("peer {} at {}", self.id, self.addr)
///     }
/// }
///
/// let peer = Peer { id: 7, addr: "10.0.0.7:2380" };
/// assert_eq!(peer.log_string(), "peer 7 at 10.0.0.7:2380");
/// assert_eq!(BaseLogEntry::new("as is").log_string(), "as is");
/// assert_eq!(format_args!("{} peers", 3).log_string(), "3 peers");
///
/// new_package_logger("doc-entry", "membership").info(peer);
/// ```
pub trait LogEntry {
    /// Renders the entry.
    fn log_string(&self) -> String;
}

/// A plain string passed through to the formatter unchanged.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct BaseLogEntry(pub String);

impl BaseLogEntry {
    /// Wraps `text` without altering it.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl From<&str> for BaseLogEntry {
    fn from(text: &str) -> Self {
        Self(text.to_owned())
    }
}

impl From<String> for BaseLogEntry {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl LogEntry for BaseLogEntry {
    fn log_string(&self) -> String {
        self.0.clone()
    }
}

impl LogEntry for str {
    fn log_string(&self) -> String {
        self.to_owned()
    }
}

impl LogEntry for String {
    fn log_string(&self) -> String {
        self.clone()
    }
}

impl LogEntry for fmt::Arguments<'_> {
    fn log_string(&self) -> String {
        self.to_string()
    }
}

impl<T: LogEntry + ?Sized> LogEntry for &T {
    fn log_string(&self) -> String {
        (**self).log_string()
    }
}
