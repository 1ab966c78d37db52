// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request descriptions and the builder that turns them into wire-ready requests
//!
//! A [`RequestDescription`] is what the user edits: a method, a URL, and rows
//! of params, headers and form fields that can each be switched off. [`build`]
//! flattens that into a [`BuiltRequest`] without touching the network.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;
use url::Url;

use super::{content_types, headers, HttpMethod};

/// Flattened header map; later writes win
pub type HeaderPairs = BTreeMap<String, String>;

/// Kind of a form row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    /// File rows still contribute only their value string
    File,
}

/// One editable key/value row (param, header or form field)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRow {
    pub key: String,
    pub value: String,
    pub enabled: bool,
    #[serde(default, rename = "type")]
    pub kind: FieldKind,
}

impl FieldRow {
    /// Create an enabled text row
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
            kind: FieldKind::Text,
        }
    }

    /// Create a disabled text row
    pub fn disabled(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            enabled: false,
            ..Self::new(key, value)
        }
    }

    /// Mark as a file row
    pub fn file(mut self) -> Self {
        self.kind = FieldKind::File;
        self
    }

    /// Whether the row takes part in request construction
    pub fn is_active(&self) -> bool {
        self.enabled && !self.key.is_empty()
    }
}

/// Active rows as ordered pairs, duplicates kept
fn active_pairs(rows: &[FieldRow]) -> Vec<(String, String)> {
    rows.iter()
        .filter(|r| r.is_active())
        .map(|r| (r.key.clone(), r.value.clone()))
        .collect()
}

/// Body encoding selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    None,
    Json,
    FormData,
    UrlEncoded,
    Raw,
}

impl BodyType {
    /// Every body type, in menu order
    pub const ALL: [BodyType; 5] = [
        BodyType::None,
        BodyType::Json,
        BodyType::FormData,
        BodyType::UrlEncoded,
        BodyType::Raw,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyType::None => "none",
            BodyType::Json => "json",
            BodyType::FormData => "form-data",
            BodyType::UrlEncoded => "x-www-form-urlencoded",
            BodyType::Raw => "raw",
        }
    }
}

/// Request body as edited, one case per encoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "bodyType", content = "payload", rename_all = "kebab-case")]
pub enum RequestBody {
    #[default]
    None,
    Json(String),
    FormData(Vec<FieldRow>),
    #[serde(rename = "x-www-form-urlencoded")]
    UrlEncoded(Vec<FieldRow>),
    Raw(String),
}

impl RequestBody {
    pub fn body_type(&self) -> BodyType {
        match self {
            RequestBody::None => BodyType::None,
            RequestBody::Json(_) => BodyType::Json,
            RequestBody::FormData(_) => BodyType::FormData,
            RequestBody::UrlEncoded(_) => BodyType::UrlEncoded,
            RequestBody::Raw(_) => BodyType::Raw,
        }
    }
}

/// A request as the user composed it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RequestDescription {
    pub method: HttpMethod,
    pub url: String,
    #[serde(default)]
    pub params: Vec<FieldRow>,
    #[serde(default)]
    pub headers: Vec<FieldRow>,
    #[serde(flatten)]
    pub body: RequestBody,
}

impl RequestDescription {
    /// Create a description with no rows and no body
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            ..Default::default()
        }
    }

    /// Add a query param row
    pub fn param(mut self, row: FieldRow) -> Self {
        self.params.push(row);
        self
    }

    /// Add a header row
    pub fn header(mut self, row: FieldRow) -> Self {
        self.headers.push(row);
        self
    }

    /// Set the body
    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Build the wire-ready request
    pub fn build(&self) -> BuiltRequest {
        build(self)
    }
}

/// Body in the shape the transport sends it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundBody {
    /// Sent verbatim (json and raw bodies)
    Text(String),
    /// Multipart fields; the transport picks the boundary
    Multipart(Vec<(String, String)>),
    /// application/x-www-form-urlencoded pairs
    UrlEncoded(Vec<(String, String)>),
}

impl OutboundBody {
    /// Serialize url-encoded pairs, `None` for other encodings
    pub fn encoded_form(&self) -> Option<String> {
        match self {
            OutboundBody::UrlEncoded(pairs) => Some(
                form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(pairs)
                    .finish(),
            ),
            _ => None,
        }
    }
}

/// A request ready to go on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltRequest {
    pub final_url: String,
    pub method: HttpMethod,
    pub headers: HeaderPairs,
    pub body: Option<OutboundBody>,
}

impl BuiltRequest {
    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Outcome of URL assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlResolution {
    /// Parsed, with enabled params applied
    Parsed(Url),
    /// Could not be parsed; the input is kept untouched and params are skipped
    Unparsed(String),
}

impl UrlResolution {
    pub fn is_parsed(&self) -> bool {
        matches!(self, UrlResolution::Parsed(_))
    }

    pub fn into_string(self) -> String {
        match self {
            UrlResolution::Parsed(url) => url.into(),
            UrlResolution::Unparsed(raw) => raw,
        }
    }
}

/// Prefix `https://` unless the input already names http or https
pub(crate) fn with_default_scheme(raw: &str) -> String {
    let lower = raw.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    }
}

/// Normalize `raw` and overwrite its query with the enabled param rows
pub fn resolve_url(raw: &str, params: &[FieldRow]) -> UrlResolution {
    let mut url = match Url::parse(&with_default_scheme(raw)) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!(url = raw, error = %e, "URL did not parse, sending as typed");
            return UrlResolution::Unparsed(raw.to_string());
        }
    };

    let active = active_pairs(params);
    if !active.is_empty() {
        let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        for (key, value) in active {
            set_query_pair(&mut pairs, key, value);
        }
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }

    UrlResolution::Parsed(url)
}

/// Set semantics: first pair with `key` takes the value, later ones go, absent keys append
fn set_query_pair(pairs: &mut Vec<(String, String)>, key: String, value: String) {
    match pairs.iter().position(|(k, _)| *k == key) {
        Some(first) => {
            pairs[first].1 = value;
            let mut index = 0;
            pairs.retain(|(k, _)| {
                let keep = index <= first || *k != key;
                index += 1;
                keep
            });
        }
        None => pairs.push((key, value)),
    }
}

fn has_header(headers: &HeaderPairs, name: &str) -> bool {
    headers.keys().any(|k| k.eq_ignore_ascii_case(name))
}

fn set_default_content_type(headers: &mut HeaderPairs, content_type: &str) {
    if !has_header(headers, headers::CONTENT_TYPE) {
        headers.insert("Content-Type".to_string(), content_type.to_string());
    }
}

fn assemble_body(body: &RequestBody, headers: &mut HeaderPairs) -> Option<OutboundBody> {
    match body {
        RequestBody::None => None,
        RequestBody::Json(text) if text.is_empty() => None,
        RequestBody::Json(text) => {
            set_default_content_type(headers, content_types::JSON);
            Some(OutboundBody::Text(text.clone()))
        }
        RequestBody::FormData(rows) => Some(OutboundBody::Multipart(active_pairs(rows))),
        RequestBody::UrlEncoded(rows) => {
            set_default_content_type(headers, content_types::FORM_URLENCODED);
            Some(OutboundBody::UrlEncoded(active_pairs(rows)))
        }
        RequestBody::Raw(text) if text.is_empty() => None,
        RequestBody::Raw(text) => Some(OutboundBody::Text(text.clone())),
    }
}

/// Assemble the final URL, header map and body for `request`
pub fn build(request: &RequestDescription) -> BuiltRequest {
    let final_url = resolve_url(&request.url, &request.params).into_string();

    let mut headers: HeaderPairs = active_pairs(&request.headers).into_iter().collect();

    let body = if request.method.allows_body() {
        assemble_body(&request.body, &mut headers)
    } else {
        None
    };

    BuiltRequest {
        final_url,
        method: request.method,
        headers,
        body,
    }
}
