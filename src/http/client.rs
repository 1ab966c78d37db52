// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! reqwest-backed transport

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart;
use reqwest::redirect::Policy;
use reqwest::Client;

use super::request::{BuiltRequest, HeaderPairs, OutboundBody};
use super::response::RawResponse;
use super::transport::{FetchedResource, Transport};
use super::DEFAULT_USER_AGENT;
use crate::error::{Error, Result};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// User agent string
    pub user_agent: String,
    /// Whole-request timeout; `None` leaves it to the OS
    pub timeout: Option<Duration>,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Accept invalid certificates (dangerous!)
    pub accept_invalid_certs: bool,
    /// Proxy URL
    pub proxy: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            max_redirects: 10,
            accept_invalid_certs: false,
            proxy: None,
        }
    }
}

impl HttpClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set max redirects
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    /// Accept invalid TLS certificates
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Set proxy
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }
}

/// HTTP client used by the composer and the previewer
///
/// reqwest keeps no response cache, so every send hits the network.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .redirect(Policy::limited(config.max_redirects))
            .danger_accept_invalid_certs(config.accept_invalid_certs);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Get client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

fn attach_body(builder: reqwest::RequestBuilder, body: &OutboundBody) -> reqwest::RequestBuilder {
    match body {
        OutboundBody::Text(text) => builder.body(text.clone()),
        OutboundBody::UrlEncoded(_) => builder.body(body.encoded_form().unwrap_or_default()),
        OutboundBody::Multipart(fields) => {
            let form = fields
                .iter()
                .fold(multipart::Form::new(), |form, (key, value)| {
                    form.text(key.clone(), value.clone())
                });
            builder.multipart(form)
        }
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, request: &BuiltRequest) -> Result<RawResponse> {
        let mut builder = self
            .client
            .request(request.method.to_reqwest(), request.final_url.as_str());

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(ref body) = request.body {
            builder = attach_body(builder, body);
        }

        let response = builder.send().await?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        tracing::debug!(
            method = %request.method,
            url = %request.final_url,
            status = status.as_u16(),
            "Response headers received"
        );

        let body = response.text().await.map_err(Error::from);

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }

    async fn fetch(&self, url: &str, headers: &HeaderPairs) -> Result<FetchedResource> {
        let mut builder = self.client.get(url);
        for (name, value) in headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?;

        tracing::debug!(url, status, bytes = body.len(), "Fetched resource");

        Ok(FetchedResource {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new().unwrap();
        assert_eq!(client.config().user_agent, DEFAULT_USER_AGENT);
        assert!(client.config().timeout.is_none());
    }

    #[test]
    fn test_invalid_proxy_rejected() {
        let config = HttpClientConfig::new().proxy("http://exa mple.com");
        assert!(matches!(
            HttpClient::with_config(config),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_config_builder() {
        let config = HttpClientConfig::new()
            .timeout(Duration::from_secs(5))
            .max_redirects(0)
            .user_agent("probe/1.0");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.max_redirects, 0);
        assert_eq!(config.user_agent, "probe/1.0");
    }
}
