// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Page fetching and image inlining for previews

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::bookmark::Bookmark;
use super::extract::{extract, normalize_page_url};
use super::{PreviewConfig, PreviewMetadata};
use crate::error::{Error, ErrorContext, Result};
use crate::http::{content_types, headers, HeaderPairs, Transport};

/// Fetches pages and turns them into previews and bookmarks
pub struct Previewer<T> {
    transport: T,
    config: PreviewConfig,
}

impl<T: Transport> Previewer<T> {
    /// Create a previewer with default configuration
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, PreviewConfig::default())
    }

    /// Create a previewer with custom configuration
    pub fn with_config(transport: T, config: PreviewConfig) -> Self {
        Self { transport, config }
    }

    /// Get preview configuration
    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    /// Fetch `input` and extract its preview
    ///
    /// Fails only when the URL is unusable, the page fetch errors, or the
    /// page answers with a non-2xx status.
    pub async fn fetch_preview(&self, input: &str) -> Result<PreviewMetadata> {
        let page_url = normalize_page_url(input)?;

        let mut page_headers = HeaderPairs::new();
        page_headers.insert(headers::USER_AGENT.to_string(), self.config.user_agent.clone());

        let page = self
            .transport
            .fetch(page_url.as_str(), &page_headers)
            .await
            .with_url(page_url.as_str())?;

        if !page.is_success() {
            tracing::warn!(url = %page_url, status = page.status, "Preview page fetch failed");
            return Err(Error::page_status(page_url.as_str(), page.status));
        }

        let html = page.text_lossy();
        let mut preview = extract(&html, &page_url);

        tracing::info!(
            url = %page_url,
            title = preview.title.as_deref().unwrap_or(""),
            has_image = preview.image.is_some(),
            "Extracted preview"
        );

        if self.config.inline_images {
            if let Some(image) = preview.image.take() {
                preview.image = Some(self.inline_image(&image).await);
            }
        }

        Ok(preview)
    }

    /// Fetch an image and return it as a data URL, or `image_url` on any failure
    pub async fn inline_image(&self, image_url: &str) -> String {
        if image_url.starts_with("data:") {
            return image_url.to_string();
        }

        let resource = match self.transport.fetch(image_url, &HeaderPairs::new()).await {
            Ok(resource) if resource.is_success() => resource,
            Ok(resource) => {
                tracing::warn!(url = image_url, status = resource.status, "Image fetch failed, keeping URL");
                return image_url.to_string();
            }
            Err(e) => {
                tracing::warn!(url = image_url, error = %e, "Image fetch failed, keeping URL");
                return image_url.to_string();
            }
        };

        if let Some(max) = self.config.max_inline_bytes {
            if resource.body.len() > max {
                tracing::debug!(url = image_url, bytes = resource.body.len(), max, "Image too large to inline");
                return image_url.to_string();
            }
        }

        let content_type = resource
            .content_type
            .as_deref()
            .map(str::trim)
            .filter(|ct| !ct.is_empty())
            .unwrap_or(content_types::DEFAULT_IMAGE);

        format!("data:{};base64,{}", content_type, STANDARD.encode(&resource.body))
    }

    /// Fetch a preview for `input` and wrap it in a new bookmark
    pub async fn add_bookmark_from_url(
        &self,
        input: &str,
        category: Option<&str>,
    ) -> Result<Bookmark> {
        let page_url = normalize_page_url(input)?;
        let preview = self.fetch_preview(page_url.as_str()).await?;
        Ok(Bookmark::from_preview(&page_url, preview, category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{BuiltRequest, FetchedResource, RawResponse};
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::collections::HashMap;

    /// Serves canned resources by URL; unknown URLs fail like a DNS error
    #[derive(Default)]
    struct CannedTransport {
        resources: HashMap<String, (u16, Option<&'static str>, &'static [u8])>,
    }

    impl CannedTransport {
        fn serve(mut self, url: &str, status: u16, ct: Option<&'static str>, body: &'static [u8]) -> Self {
            self.resources.insert(url.to_string(), (status, ct, body));
            self
        }
    }

    #[async_trait]
    impl Transport for CannedTransport {
        async fn send(&self, _request: &BuiltRequest) -> Result<RawResponse> {
            Err(Error::network("not used"))
        }

        async fn fetch(&self, url: &str, _headers: &HeaderPairs) -> Result<FetchedResource> {
            let (status, ct, body) = *self
                .resources
                .get(url)
                .ok_or_else(|| Error::network(format!("dns error: {}", url)))?;
            Ok(FetchedResource {
                status,
                content_type: ct.map(str::to_string),
                body: Bytes::from_static(body),
            })
        }
    }

    const PAGE: &[u8] = br#"<html><head>
        <meta property="og:title" content="Hello">
        <meta property="og:image" content="/img.png">
        </head></html>"#;

    #[tokio::test]
    async fn test_image_inlined() {
        let transport = CannedTransport::default()
            .serve("https://example.com/page", 200, Some("text/html"), PAGE)
            .serve("https://example.com/img.png", 200, Some("image/png"), b"abc");
        let preview = Previewer::new(transport)
            .fetch_preview("example.com/page")
            .await
            .unwrap();

        assert_eq!(preview.title.as_deref(), Some("Hello"));
        assert_eq!(preview.image.as_deref(), Some("data:image/png;base64,YWJj"));
    }

    #[tokio::test]
    async fn test_missing_content_type_defaults_to_jpeg() {
        let transport = CannedTransport::default()
            .serve("https://example.com/page", 200, None, PAGE)
            .serve("https://example.com/img.png", 200, None, b"abc");
        let preview = Previewer::new(transport)
            .fetch_preview("https://example.com/page")
            .await
            .unwrap();

        assert_eq!(preview.image.as_deref(), Some("data:image/jpeg;base64,YWJj"));
    }

    #[tokio::test]
    async fn test_image_failure_keeps_resolved_url() {
        let transport =
            CannedTransport::default().serve("https://example.com/page", 200, None, PAGE);
        let preview = Previewer::new(transport)
            .fetch_preview("https://example.com/page")
            .await
            .unwrap();
        assert_eq!(preview.image.as_deref(), Some("https://example.com/img.png"));

        let transport = CannedTransport::default()
            .serve("https://example.com/page", 200, None, PAGE)
            .serve("https://example.com/img.png", 404, None, b"");
        let preview = Previewer::new(transport)
            .fetch_preview("https://example.com/page")
            .await
            .unwrap();
        assert_eq!(preview.image.as_deref(), Some("https://example.com/img.png"));
    }

    #[tokio::test]
    async fn test_inlining_disabled_or_too_large() {
        let transport = CannedTransport::default()
            .serve("https://example.com/page", 200, None, PAGE)
            .serve("https://example.com/img.png", 200, Some("image/png"), b"abcdef");

        let previewer =
            Previewer::with_config(transport, PreviewConfig::new().max_inline_bytes(4));
        let preview = previewer.fetch_preview("example.com/page").await.unwrap();
        assert_eq!(preview.image.as_deref(), Some("https://example.com/img.png"));

        let previewer = Previewer::with_config(
            previewer.transport,
            PreviewConfig::new().inline_images(false),
        );
        let preview = previewer.fetch_preview("example.com/page").await.unwrap();
        assert_eq!(preview.image.as_deref(), Some("https://example.com/img.png"));
    }

    #[tokio::test]
    async fn test_page_errors_are_hard_failures() {
        let transport =
            CannedTransport::default().serve("https://example.com/gone", 410, None, b"gone");
        let previewer = Previewer::new(transport);

        let err = previewer.fetch_preview("example.com/gone").await.unwrap_err();
        assert_eq!(err.status_code(), Some(410));

        let err = previewer.fetch_preview("unknown.example").await.unwrap_err();
        assert!(matches!(err, Error::PageFetch { status: None, .. }));
        assert_eq!(err.url(), Some("https://unknown.example/"));

        let err = previewer.fetch_preview("").await.unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_add_bookmark_from_url() {
        let transport = CannedTransport::default()
            .serve("https://example.com/", 200, None, b"<title>Example</title>");
        let bookmark = Previewer::new(transport)
            .add_bookmark_from_url("example.com", Some("  docs "))
            .await
            .unwrap();

        assert_eq!(bookmark.url, "https://example.com/");
        assert_eq!(bookmark.title(), "Example");
        assert_eq!(bookmark.site_name(), "example.com");
        assert_eq!(bookmark.category.as_deref(), Some("docs"));
        assert_eq!(bookmark.preview.image, None);
    }
}
