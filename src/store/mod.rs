// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Key-value persistence for saved requests and bookmarks
//!
//! Values are opaque serialized strings. The request and preview pipelines
//! never touch a store; [`Library`] is the layer above them that does.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::composer::SavedRequestList;
use crate::error::{Error, Result};
use crate::preview::BookmarkList;

/// Key holding the saved request collection
pub const SAVED_REQUESTS_KEY: &str = "saved-requests";

/// Key holding the bookmark collection
pub const BOOKMARKS_KEY: &str = "bookmarks";

/// Opaque string store
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `None` when the key was never set
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store directory
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(Error::store(key, "keys may only contain [A-Za-z0-9_-]"));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// Typed access to the two persisted collections
pub struct Library<S> {
    store: S,
}

impl<S: KeyValueStore> Library<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn load<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        match self.store.get(key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(T::default()),
        }
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string_pretty(value)?;
        self.store.set(key, &raw)?;
        tracing::debug!(key, bytes = raw.len(), "Saved collection");
        Ok(())
    }

    pub fn bookmarks(&self) -> Result<BookmarkList> {
        self.load(BOOKMARKS_KEY)
    }

    pub fn save_bookmarks(&self, bookmarks: &BookmarkList) -> Result<()> {
        self.save(BOOKMARKS_KEY, bookmarks)
    }

    pub fn saved_requests(&self) -> Result<SavedRequestList> {
        self.load(SAVED_REQUESTS_KEY)
    }

    pub fn save_saved_requests(&self, requests: &SavedRequestList) -> Result<()> {
        self.save(SAVED_REQUESTS_KEY, requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpMethod, RequestDescription};
    use crate::preview::{Bookmark, PreviewMetadata};
    use url::Url;

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("nested")).unwrap();

        assert_eq!(store.get(BOOKMARKS_KEY).unwrap(), None);
        store.set(BOOKMARKS_KEY, "[]").unwrap();
        assert_eq!(store.get(BOOKMARKS_KEY).unwrap().as_deref(), Some("[]"));
        assert!(store.dir().join("bookmarks.json").exists());
    }

    #[test]
    fn test_file_store_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(matches!(store.set("../escape", "x"), Err(Error::Store { .. })));
        assert!(store.get("").is_err());
    }

    #[test]
    fn test_library_collections() {
        let library = Library::new(MemoryStore::new());
        assert!(library.bookmarks().unwrap().is_empty());
        assert!(library.saved_requests().unwrap().is_empty());

        let mut bookmarks = library.bookmarks().unwrap();
        let url = Url::parse("https://example.com").unwrap();
        bookmarks.add(Bookmark::from_preview(&url, PreviewMetadata::default(), Some("misc")));
        library.save_bookmarks(&bookmarks).unwrap();

        let mut requests = library.saved_requests().unwrap();
        requests.save("home", RequestDescription::new(HttpMethod::Get, "example.com"), None);
        library.save_saved_requests(&requests).unwrap();

        assert_eq!(library.bookmarks().unwrap(), bookmarks);
        assert_eq!(library.saved_requests().unwrap(), requests);
    }

    #[test]
    fn test_library_corrupt_value() {
        let store = MemoryStore::new();
        store.set(BOOKMARKS_KEY, "{not json").unwrap();
        let library = Library::new(store);
        assert!(matches!(library.bookmarks(), Err(Error::Serialization(_))));
    }
}
