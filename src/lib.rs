// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # devdeck - HTTP request composer and link previewer
//!
//! Two small pipelines behind a developer tool:
//!
//! - **HTTP client**: turn an editable request (rows that can be switched
//!   off, one of five body encodings) into a wire request, send it once and
//!   normalize the response. Network failures come back as a `status == 0`
//!   sentinel instead of an error.
//! - **Bookmarks**: fetch a page, read its Open Graph tags with fallbacks,
//!   and inline the preview image as a data URL.
//!
//! ## Example
//!
//! ```rust,no_run
//! use devdeck::{FieldRow, HttpClient, HttpMethod, RequestComposer, RequestDescription};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let composer = RequestComposer::new(HttpClient::new()?);
//!
//!     let request = RequestDescription::new(HttpMethod::Get, "httpbin.org/get")
//!         .param(FieldRow::new("q", "rust"))
//!         .header(FieldRow::new("Accept", "application/json"));
//!
//!     let response = composer.submit_request(&request).await;
//!     println!("{} {} ({}ms)", response.status, response.status_text, response.response_time_ms);
//!     println!("{}", response.body);
//!
//!     Ok(())
//! }
//! ```

pub mod clock;
pub mod composer;
pub mod config;
pub mod error;
pub mod http;
pub mod preview;
pub mod store;

// Re-exports for convenience

// Clock
pub use clock::{Clock, ManualClock, SystemClock};

// HTTP client feature
pub use composer::{RequestComposer, SavedRequest, SavedRequestList};
pub use http::{
    build, BodyType, BuiltRequest, FieldKind, FieldRow, HttpClient, HttpClientConfig, HttpMethod,
    NormalizedResponse, OutboundBody, RequestBody, RequestDescription, Transport,
    SUPPORTED_METHODS,
};

// Bookmarks
pub use preview::{extract, Bookmark, BookmarkList, PreviewConfig, PreviewMetadata, Previewer};

// Storage
pub use store::{FileStore, KeyValueStore, Library, MemoryStore, BOOKMARKS_KEY, SAVED_REQUESTS_KEY};

// Config and errors
pub use config::DevdeckConfig;
pub use error::{Error, ErrorContext, Result};

/// devdeck version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
