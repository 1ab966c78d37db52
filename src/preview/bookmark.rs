// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Bookmarks built from previews

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use super::PreviewMetadata;

/// Title shown for a bookmark whose page had none
pub const UNTITLED: &str = "Untitled";

/// A saved link with its preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    /// Normalized URL the user submitted
    pub url: String,
    pub preview: PreviewMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Bookmark {
    /// Wrap a preview; a blank category is stored as none
    pub fn from_preview(url: &Url, preview: PreviewMetadata, category: Option<&str>) -> Self {
        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        Self {
            id: Uuid::new_v4().to_string(),
            url: url.to_string(),
            preview,
            category,
            created_at: Utc::now(),
        }
    }

    pub fn title(&self) -> &str {
        self.preview.title.as_deref().unwrap_or(UNTITLED)
    }

    pub fn description(&self) -> &str {
        self.preview.description.as_deref().unwrap_or_default()
    }

    /// Site name, falling back to the URL's host
    pub fn site_name(&self) -> &str {
        self.preview
            .site_name
            .as_deref()
            .or_else(|| host_of(&self.url))
            .unwrap_or_default()
    }

    fn matches_query(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title().to_lowercase().contains(needle)
            || self.description().to_lowercase().contains(needle)
            || self.url.to_lowercase().contains(needle)
    }
}

fn host_of(url: &str) -> Option<&str> {
    let rest = url.split_once("://").map(|(_, rest)| rest)?;
    rest.split(['/', '?', '#']).next().filter(|h| !h.is_empty())
}

/// Bookmarks, newest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookmarkList {
    bookmarks: Vec<Bookmark>,
}

impl BookmarkList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add to the front
    pub fn add(&mut self, bookmark: Bookmark) {
        self.bookmarks.insert(0, bookmark);
    }

    /// Remove by id
    pub fn remove(&mut self, id: &str) -> Option<Bookmark> {
        let index = self.bookmarks.iter().position(|b| b.id == id)?;
        Some(self.bookmarks.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.id == id)
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for category in self.bookmarks.iter().filter_map(|b| b.category.as_deref()) {
            if !seen.contains(&category) {
                seen.push(category);
            }
        }
        seen
    }

    /// Bookmarks in `category` (all when `None`) whose title, description
    /// or URL contains `query`, ignoring case
    pub fn filter(&self, category: Option<&str>, query: &str) -> Vec<&Bookmark> {
        let needle = query.trim().to_lowercase();
        self.bookmarks
            .iter()
            .filter(|b| category.map_or(true, |c| b.category.as_deref() == Some(c)))
            .filter(|b| b.matches_query(&needle))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bookmark> {
        self.bookmarks.iter()
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }
}
