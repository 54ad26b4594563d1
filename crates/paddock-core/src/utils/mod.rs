//! Utility functions for standings display.

pub mod format;

pub use format::{format_gap, format_missing_events, truncate_string};
