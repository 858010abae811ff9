//! Typed error variants for the vimb-preferences crate.
//!
//! Provides structured error types for preference I/O, value decoding, and
//! watch setup. These are used internally and exposed for library consumers
//! who want to match on specific failure modes instead of opaque `anyhow`
//! strings.

use std::fmt;

/// Errors that can occur when loading or watching preferences.
///
/// Decode failures never abort a parse: `PreferenceSet::parse` logs them and
/// keeps the default value for the offending field. They still carry the
/// field name and raw value so callers of the lower-level decode helpers can
/// report them precisely.
///
/// The watcher functions return `anyhow::Result`; `PreferenceError` values
/// are automatically coerced via the `From` impl that `anyhow` provides for
/// any `std::error::Error`.
///
/// # Example
///
/// ```rust,no_run
/// use vimb_preferences::PreferenceError;
///
/// fn check_watch_err(e: &anyhow::Error) {
///     if let Some(pref_err) = e.downcast_ref::<PreferenceError>() {
///         match pref_err {
///             PreferenceError::Io(io) => eprintln!("I/O error: {io}"),
///             PreferenceError::Decode { name, .. } => eprintln!("bad value for {name}"),
///             PreferenceError::WatchSetup(msg) => eprintln!("no live reload: {msg}"),
///         }
///     }
/// }
/// ```
#[derive(Debug)]
pub enum PreferenceError {
    /// An I/O error occurred reading the preference file.
    Io(std::io::Error),

    /// A recognized preference's value failed format validation.
    ///
    /// Carries the field name and the raw value that did not decode.
    Decode {
        /// The recognized field name, e.g. `ColorForeground`.
        name: String,
        /// The raw value text that failed to decode.
        value: String,
    },

    /// The filesystem change-notification subscription could not be
    /// established for the preference file's directory.
    ///
    /// The inner string describes the underlying backend failure.
    WatchSetup(String),
}

impl fmt::Display for PreferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferenceError::Io(e) => write!(f, "I/O error reading preferences: {e}"),
            PreferenceError::Decode { name, value } => {
                write!(f, "could not parse preference value for `{name}`: `{value}`")
            }
            PreferenceError::WatchSetup(msg) => {
                write!(f, "could not watch preference file: {msg}")
            }
        }
    }
}

impl std::error::Error for PreferenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PreferenceError::Io(e) => Some(e),
            PreferenceError::Decode { .. } | PreferenceError::WatchSetup(_) => None,
        }
    }
}

impl From<std::io::Error> for PreferenceError {
    fn from(e: std::io::Error) -> Self {
        PreferenceError::Io(e)
    }
}
