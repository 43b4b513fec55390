// Vachanamrut Reader - offline-first reader core
// Copyright (C) 2026 Vachanamrut Reader contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! Versioned cache buckets on disk
//!
//! Layout: one directory per bucket under the cache root, named by the
//! bucket's version string. Each entry is a file named by the sha256 of the
//! entry's canonical URL, so lookups by clean URL hit regardless of what
//! query string the request carried.

use crate::error::Result;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use tokio::fs;

/// Strip the query string and fragment from a URL. Cache entries are keyed
/// by this canonical form.
pub fn canonical_url(url: &str) -> &str {
    let url = url.split_once('#').map_or(url, |(head, _)| head);
    url.split_once('?').map_or(url, |(head, _)| head)
}

/// Root of all cache buckets
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Open (creating if needed) the bucket named `version`.
    pub async fn open_bucket(&self, version: &str) -> Result<CacheBucket> {
        let dir = self.root.join(version);
        fs::create_dir_all(&dir).await?;
        Ok(CacheBucket {
            version: version.to_string(),
            dir,
        })
    }

    /// Names of every bucket currently on disk.
    pub async fn bucket_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(names),
            Err(err) => return Err(err.into()),
        };
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        Ok(names)
    }

    /// Delete a bucket and everything in it. Deleting a missing bucket is
    /// not an error.
    pub async fn delete_bucket(&self, version: &str) -> Result<()> {
        match fs::remove_dir_all(self.root.join(version)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// One named, versioned bucket
#[derive(Debug, Clone)]
pub struct CacheBucket {
    version: String,
    dir: PathBuf,
}

impl CacheBucket {
    pub fn version(&self) -> &str {
        &self.version
    }

    /// On-disk location of the entry for a URL
    pub fn entry_path(&self, url: &str) -> PathBuf {
        let digest = Sha256::digest(canonical_url(url).as_bytes());
        self.dir.join(hex::encode(digest))
    }

    /// Store a response body under the canonical form of `url`.
    pub async fn put(&self, url: &str, body: &[u8]) -> Result<()> {
        fs::write(self.entry_path(url), body).await?;
        Ok(())
    }

    /// Look up an entry, ignoring any query string on `url`.
    pub async fn get(&self, url: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.entry_path(url)).await {
            Ok(body) => Ok(Some(body)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn contains(&self, url: &str) -> bool {
        matches!(self.get(url).await, Ok(Some(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_url_strips_query_and_fragment() {
        assert_eq!(canonical_url("./js/app.js"), "./js/app.js");
        assert_eq!(canonical_url("./js/app.js?t=123"), "./js/app.js");
        assert_eq!(canonical_url("./index.html#id=5"), "./index.html");
        assert_eq!(canonical_url("./a.json?t=1#frag"), "./a.json");
    }

    #[tokio::test]
    async fn put_then_get_ignores_query_strings() {
        let root = tempfile::tempdir().unwrap();
        let store = CacheStore::new(root.path());
        let bucket = store.open_bucket("1.0.0").await.unwrap();

        bucket.put("./a.json?t=42", b"payload").await.unwrap();
        assert_eq!(
            bucket.get("./a.json").await.unwrap().as_deref(),
            Some(b"payload".as_ref())
        );
        assert_eq!(
            bucket.get("./a.json?v=9").await.unwrap().as_deref(),
            Some(b"payload".as_ref())
        );
        assert!(bucket.get("./b.json").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn buckets_are_enumerable_and_deletable() {
        let root = tempfile::tempdir().unwrap();
        let store = CacheStore::new(root.path());
        store.open_bucket("1").await.unwrap();
        store.open_bucket("2").await.unwrap();

        let mut names = store.bucket_names().await.unwrap();
        names.sort();
        assert_eq!(names, vec!["1", "2"]);

        store.delete_bucket("1").await.unwrap();
        store.delete_bucket("missing").await.unwrap();
        assert_eq!(store.bucket_names().await.unwrap(), vec!["2"]);
    }

    #[tokio::test]
    async fn bucket_names_on_missing_root_is_empty() {
        let store = CacheStore::new("/nonexistent/cache/root");
        assert!(store.bucket_names().await.unwrap().is_empty());
    }
}
