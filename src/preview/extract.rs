// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Pattern-based extraction of preview tags
//!
//! Tags are located with regexes and their attributes read in any order and
//! quoting style. Tag names, attribute names and the `property`/`name`/`rel`
//! values compare case-insensitively. Within one fallback tier the first tag
//! in document order with a non-blank value wins.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use url::Url;

use super::PreviewMetadata;
use crate::error::{Error, Result};
use crate::http::with_default_scheme;

lazy_static! {
    // A `>` inside a quoted attribute value does not close the tag
    static ref META_TAG: Regex =
        Regex::new(r#"(?is)<meta\b(?:[^>"']|"[^"]*"|'[^']*')*>"#).unwrap();
    static ref LINK_TAG: Regex =
        Regex::new(r#"(?is)<link\b(?:[^>"']|"[^"]*"|'[^']*')*>"#).unwrap();
    static ref SCHEME: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*:").unwrap();
    static ref TITLE_TAG: Regex = Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>").unwrap();
    static ref ATTRIBUTE: Regex = Regex::new(
        r#"(?s)([^\s"'<>/=]+)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#
    )
    .unwrap();
    static ref ENTITY: Regex =
        Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|amp|lt|gt|quot|apos|nbsp);").unwrap();
}

/// Attributes of one tag, names lowercased
struct Tag {
    attrs: Vec<(String, String)>,
}

impl Tag {
    fn parse(markup: &str) -> Self {
        let attrs = ATTRIBUTE
            .captures_iter(markup)
            .filter_map(|c| {
                let name = c.get(1)?.as_str().to_ascii_lowercase();
                let value = c.get(2).or_else(|| c.get(3)).or_else(|| c.get(4))?;
                Some((name, value.as_str().to_string()))
            })
            .collect();
        Self { attrs }
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn is(&self, attr: &str, expected: &str) -> bool {
        self.get(attr)
            .map(|v| v.trim().eq_ignore_ascii_case(expected))
            .unwrap_or(false)
    }

    fn has_rel(&self, token: &str) -> bool {
        self.get("rel")
            .map(|rel| rel.split_whitespace().any(|t| t.eq_ignore_ascii_case(token)))
            .unwrap_or(false)
    }
}

/// Decode the handful of entities that show up in attribute values
pub fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => {
                    let code = match entity.as_bytes().get(1) {
                        Some(b'x') | Some(b'X') => u32::from_str_radix(&entity[2..], 16).ok(),
                        _ => entity[1..].parse().ok(),
                    };
                    code.and_then(char::from_u32)
                }
            };
            decoded
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn clean(value: &str) -> Option<String> {
    let value = decode_entities(value.trim());
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

struct Page<'a> {
    html: &'a str,
    metas: Vec<Tag>,
}

impl<'a> Page<'a> {
    fn scan(html: &'a str) -> Self {
        let metas = META_TAG
            .find_iter(html)
            .map(|m| Tag::parse(m.as_str()))
            .collect();
        Self { html, metas }
    }

    /// `<meta property="..." content="...">`
    fn property(&self, property: &str) -> Option<String> {
        self.meta_content("property", property)
    }

    /// `<meta name="..." content="...">`
    fn named(&self, name: &str) -> Option<String> {
        self.meta_content("name", name)
    }

    fn meta_content(&self, attr: &str, key: &str) -> Option<String> {
        self.metas
            .iter()
            .filter(|tag| tag.is(attr, key))
            .find_map(|tag| tag.get("content").and_then(clean))
    }

    fn title(&self) -> Option<String> {
        TITLE_TAG
            .captures_iter(self.html)
            .find_map(|c| c.get(1).and_then(|m| clean(m.as_str())))
    }

    fn canonical(&self) -> Option<String> {
        LINK_TAG
            .find_iter(self.html)
            .map(|m| Tag::parse(m.as_str()))
            .filter(|tag| tag.has_rel("canonical"))
            .find_map(|tag| tag.get("href").and_then(clean))
    }
}

/// Normalize user input into the page URL to fetch
pub fn normalize_page_url(input: &str) -> Result<Url> {
    let input = input.trim();
    if input.is_empty() {
        return Err(Error::invalid_url(input, "URL is required"));
    }
    Url::parse(&with_default_scheme(input)).map_err(|e| Error::invalid_url(input, e.to_string()))
}

fn has_scheme(url: &str) -> bool {
    SCHEME.is_match(url)
}

/// Make an `og:image` value absolute against the page URL
pub fn resolve_image_url(image: &str, base: &Url) -> String {
    let origin = base.origin().ascii_serialization();
    if image.starts_with("//") {
        format!("{}:{}", base.scheme(), image)
    } else if image.starts_with('/') {
        format!("{}{}", origin, image)
    } else if has_scheme(image) {
        image.to_string()
    } else {
        format!("{}/{}", origin, image)
    }
}

/// Read preview fields from `html`, falling back to values derived from `base`
pub fn extract(html: &str, base: &Url) -> PreviewMetadata {
    let page = Page::scan(html);

    PreviewMetadata {
        title: page.property("og:title").or_else(|| page.title()),
        description: page
            .property("og:description")
            .or_else(|| page.named("description")),
        image: page
            .property("og:image")
            .map(|image| resolve_image_url(&image, base)),
        site_name: page
            .property("og:site_name")
            .or_else(|| base.host_str().map(str::to_string)),
        url: page
            .property("og:url")
            .or_else(|| page.canonical())
            .or_else(|| Some(base.to_string())),
    }
}
