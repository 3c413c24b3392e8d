//! Error types for ordsky operations.
//!
//! This module defines the main error type [`OrdskyError`] which represents
//! all possible errors that can occur while fetching pages, extracting
//! article text, rendering word clouds, and publishing them.
//!
//! # Example
//!
//! ```rust
//! use ordsky_core::{OrdskyError, Result};
//!
//! fn check_text(text: &str) -> Result<()> {
//!     if text.trim().is_empty() {
//!         return Err(OrdskyError::InvalidPageFormat("vg.no".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for word-cloud pipeline operations.
///
/// This enum represents all possible errors that can occur during page
/// fetching, text extraction, stopword configuration, image rendering,
/// and publishing.
#[derive(Error, Debug)]
pub enum OrdskyError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    ///
    /// Returned when a URL cannot be parsed or is malformed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Non-success HTTP response for a page.
    #[error("no page content from \"{url}\" (HTTP {status})")]
    FetchFailed { url: String, status: u16 },

    /// HTML parsing errors.
    ///
    /// Returned when HTML cannot be parsed, often due to malformed markup
    /// or invalid CSS selectors.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// The page yielded no usable article text.
    ///
    /// Returned when no article-like container matched, or when the matched
    /// text was empty after stopword filtering. Terminal for that URL.
    #[error("invalid page format at \"{0}\"")]
    InvalidPageFormat(String),

    /// Startup configuration errors.
    ///
    /// Returned when the stopword list or credentials file is missing or
    /// malformed. Fatal before any URL is processed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// File not found.
    ///
    /// Returned when attempting to read a file that doesn't exist.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File write errors.
    ///
    /// Wraps standard I/O errors for file operations.
    #[error("I/O error: {0}")]
    WriteError(#[from] std::io::Error),

    /// Word-cloud rendering or image-saving errors.
    #[error("Render error: {0}")]
    RenderError(String),

    /// Publishing errors.
    ///
    /// Returned when the media upload or status update is rejected.
    #[error("Publish failed: {0}")]
    PublishError(String),
}

/// Result type alias for OrdskyError.
///
/// This is a convenience alias for `std::result::Result<T, OrdskyError>`.
pub type Result<T> = std::result::Result<T, OrdskyError>;
