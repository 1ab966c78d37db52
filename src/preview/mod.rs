// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Link previews for bookmarks
//!
//! A page is fetched once, its Open Graph and fallback tags are read with
//! patterns (no DOM), and the preview image is optionally inlined as a
//! base64 data URL.

mod bookmark;
mod extract;
mod fetcher;

use serde::{Deserialize, Serialize};

pub use bookmark::{Bookmark, BookmarkList, UNTITLED};
pub use extract::{decode_entities, extract, normalize_page_url, resolve_image_url};
pub use fetcher::Previewer;

/// User agent sent with page fetches
pub const PREVIEW_USER_AGENT: &str = "Mozilla/5.0 (compatible; LinkPreviewBot/1.0)";

/// Preview fields read from a page; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Absolute image URL, or a data URL once inlined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    /// Canonical URL of the page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Preview fetch configuration
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    /// User agent for the page fetch
    pub user_agent: String,
    /// Replace the image URL with a data URL
    pub inline_images: bool,
    /// Images above this size keep their URL
    pub max_inline_bytes: Option<usize>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            user_agent: PREVIEW_USER_AGENT.to_string(),
            inline_images: true,
            max_inline_bytes: None,
        }
    }
}

impl PreviewConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Enable/disable image inlining
    pub fn inline_images(mut self, inline: bool) -> Self {
        self.inline_images = inline;
        self
    }

    /// Cap the size of inlined images
    pub fn max_inline_bytes(mut self, max: usize) -> Self {
        self.max_inline_bytes = Some(max);
        self
    }
}
