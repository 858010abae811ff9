//! Preference system for the vimb browser.
//!
//! This crate provides preference loading, default values, and live file
//! reload for the browser shell. It includes:
//!
//! - The [`PreferenceSet`] snapshot type: typed colors, a 16-slot palette,
//!   opacity, and font fields, always fully populated
//! - The `preferencerc` line-dialect parser with per-field fallback to
//!   compiled-in defaults
//! - RGBA color parsing and encoding
//! - Preference file watching with callback delivery (`watcher` feature)

pub mod color;
pub mod defaults;
pub mod error;
pub mod preference;
#[cfg(feature = "watcher")]
pub mod watcher;

// Re-export main types for convenience
pub use color::Rgba;
pub use error::PreferenceError;
pub use preference::{PALETTE_SIZE, PreferenceSet};
#[cfg(feature = "watcher")]
pub use watcher::PreferenceWatcher;
