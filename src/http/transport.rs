// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport seam between the pipelines and the network
//!
//! The composer and the previewer only ever see these two primitives, so
//! tests can swap in a scripted transport without a socket.

use async_trait::async_trait;
use bytes::Bytes;

use super::request::{BuiltRequest, HeaderPairs};
use super::response::RawResponse;
use crate::error::Result;

/// A fetched resource (page or image)
#[derive(Debug, Clone)]
pub struct FetchedResource {
    /// Response status code
    pub status: u16,
    /// Declared content type, if any
    pub content_type: Option<String>,
    /// Response body
    pub body: Bytes,
}

impl FetchedResource {
    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get body as text, lossy conversion
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Network primitives consumed by devdeck
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a composed request once
    ///
    /// `Err` means the attempt failed before a status arrived. Failures
    /// while reading the body are reported inside [`RawResponse::body`].
    async fn send(&self, request: &BuiltRequest) -> Result<RawResponse>;

    /// GET a resource with extra headers, reading the whole body
    async fn fetch(&self, url: &str, headers: &HeaderPairs) -> Result<FetchedResource>;
}
