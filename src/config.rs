// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Top-level configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::http::HttpClientConfig;
use crate::preview::PreviewConfig;

/// Directory name used under the platform data dir
const APP_DIR: &str = "devdeck";

/// Configuration for the HTTP client, previews and local storage
#[derive(Debug, Clone)]
pub struct DevdeckConfig {
    /// Transport settings shared by requests and previews
    pub client: HttpClientConfig,
    /// Preview fetch settings
    pub preview: PreviewConfig,
    /// Where saved requests and bookmarks live
    pub store_dir: PathBuf,
}

impl Default for DevdeckConfig {
    fn default() -> Self {
        Self {
            client: HttpClientConfig::default(),
            preview: PreviewConfig::default(),
            store_dir: Self::default_store_dir(),
        }
    }
}

impl DevdeckConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform data directory, or `./.devdeck` when there is none
    pub fn default_store_dir() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from(format!(".{}", APP_DIR)))
    }

    /// Set the storage directory
    pub fn store_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.store_dir = dir.into();
        self
    }

    /// Set a request timeout on the transport
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.client = self.client.timeout(timeout);
        self
    }

    /// Enable/disable preview image inlining
    pub fn inline_images(mut self, inline: bool) -> Self {
        self.preview = self.preview.inline_images(inline);
        self
    }

    /// Config for scripted use: short timeout, previews without images
    pub fn for_scripting() -> Self {
        Self::default()
            .timeout(Duration::from_secs(15))
            .inline_images(false)
    }
}
