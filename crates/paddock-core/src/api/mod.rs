//! Results site access.
//!
//! This module provides the `ResultsClient` for fetching season overview and
//! event results pages, and the HTML table extraction that turns those pages
//! into schedules and raw result rows.

pub mod client;
pub mod error;
pub mod html;

pub use client::{ResultsClient, DEFAULT_BASE_URL};
pub use error::FetchError;
