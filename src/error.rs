// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for devdeck
//!
//! Only boundary failures surface as errors: a failed primary page fetch,
//! an unusable URL handed to the previewer, and store/serialization trouble.
//! Everything inside the request and response pipelines degrades to a
//! fallback value instead.

use thiserror::Error;

/// Result type alias for devdeck operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for devdeck
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed at the transport level
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL was missing or could not be normalized
    #[error("Invalid URL '{input}': {reason}")]
    InvalidUrl { input: String, reason: String },

    /// Primary page fetch for a preview failed
    #[error("Failed to fetch {url}: {reason}")]
    PageFetch {
        url: String,
        status: Option<u16>,
        reason: String,
    },

    /// Transport error not coming from reqwest
    #[error("Network error: {0}")]
    Network(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key-value store error
    #[error("Store error for key '{key}': {reason}")]
    Store { key: String, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create an invalid URL error
    pub fn invalid_url(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidUrl {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a page fetch error for a non-success status
    pub fn page_status(url: impl Into<String>, status: u16) -> Self {
        Error::PageFetch {
            url: url.into(),
            status: Some(status),
            reason: format!("HTTP {}", status),
        }
    }

    /// Create a page fetch error without a status
    pub fn page_fetch(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::PageFetch {
            url: url.into(),
            status: None,
            reason: reason.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Error::Network(msg.into())
    }

    /// Create a store error
    pub fn store(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Store {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a network error
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_) | Error::Http(_))
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::PageFetch { status, .. } => *status,
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Get URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::PageFetch { url, .. } => Some(url),
            Error::InvalidUrl { input, .. } => Some(input),
            _ => None,
        }
    }
}

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    /// Turn any failure into a page fetch error for `url`
    fn with_url(self, url: &str) -> Result<T>;
}

impl<T, E: Into<Error>> ErrorContext<T> for std::result::Result<T, E> {
    fn with_url(self, url: &str) -> Result<T> {
        self.map_err(|e| match e.into() {
            err @ Error::PageFetch { .. } => err,
            other => Error::page_fetch(url, other.to_string()),
        })
    }
}
