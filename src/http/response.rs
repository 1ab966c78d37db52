// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response types and normalization

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Status text of the synthesized response for a failed attempt
pub const NETWORK_ERROR_STATUS_TEXT: &str = "Network Error";

/// Body placeholder when the body stream could not be read
pub const BODY_READ_FAILED: &str = "Failed to read response body";

/// Response as handed over by the transport, before normalization
#[derive(Debug)]
pub struct RawResponse {
    /// Response status code
    pub status: u16,
    /// Reason phrase
    pub status_text: String,
    /// Headers in wire order, repeated names allowed
    pub headers: Vec<(String, String)>,
    /// Body text, or the error hit while reading it
    pub body: Result<String>,
}

/// Uniform response shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResponse {
    /// Status code; 0 marks a network failure
    pub status: u16,
    pub status_text: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    /// Wall-clock time from send to resolution
    pub response_time_ms: u64,
}

impl NormalizedResponse {
    /// Normalize a transport response
    pub fn from_raw(raw: RawResponse, response_time_ms: u64) -> Self {
        let body = match raw.body {
            Ok(text) => format_body(text).into_inner(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read response body");
                BODY_READ_FAILED.to_string()
            }
        };

        Self {
            status: raw.status,
            status_text: raw.status_text,
            headers: flatten_headers(raw.headers),
            body,
            response_time_ms,
        }
    }

    /// Sentinel response for a failed attempt
    pub fn network_error(message: impl Into<String>, response_time_ms: u64) -> Self {
        Self {
            status: 0,
            status_text: NETWORK_ERROR_STATUS_TEXT.to_string(),
            headers: BTreeMap::new(),
            body: message.into(),
            response_time_ms,
        }
    }

    /// Check if this is the network failure sentinel
    pub fn is_network_error(&self) -> bool {
        self.status == 0 && self.status_text == NETWORK_ERROR_STATUS_TEXT
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Get content type
    pub fn content_type(&self) -> Option<&str> {
        self.header(super::headers::CONTENT_TYPE)
    }
}

/// Collapse headers into a map; a repeated name keeps its last value
pub fn flatten_headers<I>(headers: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (String, String)>,
{
    headers.into_iter().collect()
}

/// Result of trying to pretty-print a body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattedBody {
    /// Body parsed as JSON and was re-serialized with indentation
    Pretty(String),
    /// Body kept as received
    Verbatim(String),
}

impl FormattedBody {
    pub fn is_pretty(&self) -> bool {
        matches!(self, FormattedBody::Pretty(_))
    }

    pub fn into_inner(self) -> String {
        match self {
            FormattedBody::Pretty(s) | FormattedBody::Verbatim(s) => s,
        }
    }
}

/// Pretty-print JSON text, keep anything else verbatim
pub fn format_body(text: String) -> FormattedBody {
    let pretty = serde_json::from_str::<serde_json::Value>(&text)
        .and_then(|value| serde_json::to_string_pretty(&value));
    match pretty {
        Ok(pretty) => FormattedBody::Pretty(pretty),
        Err(_) => FormattedBody::Verbatim(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn raw(body: Result<String>) -> RawResponse {
        RawResponse {
            status: 200,
            status_text: "OK".into(),
            headers: vec![("content-type".into(), "application/json".into())],
            body,
        }
    }

    #[test]
    fn test_json_body_pretty_printed() {
        let formatted = format_body("{\"a\":1}".to_string());
        assert!(formatted.is_pretty());
        assert_eq!(formatted.into_inner(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_json_key_order_preserved() {
        let formatted = format_body("{\"z\":1,\"a\":[true,null]}".to_string());
        assert_eq!(
            formatted.into_inner(),
            "{\n  \"z\": 1,\n  \"a\": [\n    true,\n    null\n  ]\n}"
        );
    }

    #[test]
    fn test_non_json_body_verbatim() {
        assert_eq!(
            format_body("not json".to_string()),
            FormattedBody::Verbatim("not json".to_string())
        );
        assert_eq!(format_body(String::new()).into_inner(), "");
    }

    #[test]
    fn test_from_raw() {
        let resp = NormalizedResponse::from_raw(raw(Ok("[1,2]".into())), 42);
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, "[\n  1,\n  2\n]");
        assert_eq!(resp.response_time_ms, 42);
        assert_eq!(resp.content_type(), Some("application/json"));
        assert!(resp.is_success());
        assert!(!resp.is_network_error());
    }

    #[test]
    fn test_body_read_failure_placeholder() {
        let resp = NormalizedResponse::from_raw(raw(Err(Error::network("stream reset"))), 5);
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, BODY_READ_FAILED);
    }

    #[test]
    fn test_repeated_headers_last_wins() {
        let headers = flatten_headers(vec![
            ("set-cookie".to_string(), "a=1".to_string()),
            ("set-cookie".to_string(), "b=2".to_string()),
        ]);
        assert_eq!(headers.len(), 1);
        assert_eq!(headers["set-cookie"], "b=2");
    }

    #[test]
    fn test_network_error_sentinel() {
        let resp = NormalizedResponse::network_error("dns error", 17);
        assert!(resp.is_network_error());
        assert_eq!(resp.status, 0);
        assert!(resp.headers.is_empty());
        assert_eq!(resp.body, "dns error");

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["statusText"], "Network Error");
        assert_eq!(json["responseTimeMs"], 17);
    }
}
