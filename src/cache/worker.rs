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


//! The installable cache worker
//!
//! Owns the versioned offline cache and intercepts every request the page
//! makes. The version string on [`CacheWorker`] is the sole upgrade signal:
//! bumping it installs a fresh bucket and activation deletes every other
//! bucket. No per-request revalidation ever happens; a cached entry is
//! served until a version bump replaces the whole generation.
//!
//! # Install
//! Core shell assets are all-or-nothing. Data files are fetched with a
//! cache-defeating `?t=<millis>` parameter (to bypass intermediate HTTP
//! caches) but stored under their clean URL; each file is an independent
//! unit of work whose failure is logged and skipped. Install requests
//! activation-readiness immediately rather than waiting out an old worker.
//!
//! # Fetch interception
//! 1. Navigation requests resolve to the cached shell document regardless
//!    of path, so deep-link URLs load the SPA shell offline.
//! 2. Other requests are looked up ignoring the query string and served
//!    from cache unconditionally on a hit.
//! 3. On a miss the request goes to the network; basic same-origin 200
//!    responses are stored for future hits, everything else passes through.

use crate::cache::manifest::{CacheManifest, SHELL_DOCUMENT};
use crate::cache::store::{canonical_url, CacheBucket, CacheStore};
use crate::error::{ReaderError, Result};
use crate::fetch::{FetchRequest, FetchedResponse, Fetcher, RequestMode, ResponseKind};
use futures_util::future::join_all;
use tracing::{debug, info, warn};

/// Append the cache-defeating parameter the install step uses for data
/// files. The response is still stored under the clean URL.
fn cache_busted(url: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    if url.contains('?') {
        format!("{url}&t={millis}")
    } else {
        format!("{url}?t={millis}")
    }
}

/// A response synthesized from a cache entry
fn cached_response(url: &str, body: Vec<u8>) -> FetchedResponse {
    FetchedResponse {
        url: url.to_string(),
        status: 200,
        kind: ResponseKind::Basic,
        body,
    }
}

/// The worker: one versioned bucket plus the fetch-interception policy
#[derive(Debug)]
pub struct CacheWorker<F> {
    version: String,
    store: CacheStore,
    fetcher: F,
    manifest: CacheManifest,
    activation_ready: bool,
    controls_clients: bool,
}

impl<F: Fetcher> CacheWorker<F> {
    /// A worker for `version` over the production manifest.
    pub fn new(version: impl Into<String>, store: CacheStore, fetcher: F) -> Self {
        Self::with_manifest(version, store, fetcher, CacheManifest::build())
    }

    /// A worker over a caller-supplied manifest.
    pub fn with_manifest(
        version: impl Into<String>,
        store: CacheStore,
        fetcher: F,
        manifest: CacheManifest,
    ) -> Self {
        Self {
            version: version.into(),
            store,
            fetcher,
            manifest,
            activation_ready: false,
            controls_clients: false,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Whether install has requested immediate activation (skip-waiting)
    pub fn is_activation_ready(&self) -> bool {
        self.activation_ready
    }

    /// Whether activation has claimed the open pages
    pub fn controls_clients(&self) -> bool {
        self.controls_clients
    }

    /// Fill this version's bucket from the manifest.
    ///
    /// Core assets fail the install on the first failure. Data files are
    /// fetched cache-busted, stored clean, and tolerated individually.
    pub async fn install(&mut self) -> Result<()> {
        // Request activation-readiness up front; an old worker's presence
        // never delays this one.
        self.activation_ready = true;

        let bucket = self.store.open_bucket(&self.version).await?;

        for url in &self.manifest.core {
            self.install_core_asset(&bucket, url).await?;
        }

        let results = join_all(
            self.manifest
                .data_files
                .iter()
                .map(|url| self.install_data_file(&bucket, url)),
        )
        .await;
        let cached = results.iter().filter(|ok| **ok).count();

        info!(
            version = %self.version,
            core = self.manifest.core.len(),
            data_cached = cached,
            data_total = self.manifest.data_files.len(),
            "cache install complete"
        );
        Ok(())
    }

    async fn install_core_asset(&self, bucket: &CacheBucket, url: &str) -> Result<()> {
        let response = self
            .fetcher
            .fetch(url)
            .await
            .map_err(|err| ReaderError::CacheInstallFailed {
                url: url.to_string(),
                reason: err.to_string(),
            })?;
        if !response.ok() {
            return Err(ReaderError::CacheInstallFailed {
                url: url.to_string(),
                reason: format!("status {}", response.status),
            });
        }
        bucket.put(url, &response.body).await
    }

    /// One independent unit of work; returns whether the file was cached.
    async fn install_data_file(&self, bucket: &CacheBucket, url: &str) -> bool {
        let busted = cache_busted(url);
        match self.fetcher.fetch(&busted).await {
            Ok(response) if response.ok() => match bucket.put(url, &response.body).await {
                Ok(()) => true,
                Err(err) => {
                    warn!(%url, error = %err, "failed to store data file");
                    false
                }
            },
            Ok(response) => {
                warn!(%url, status = response.status, "failed to cache data file");
                false
            }
            Err(err) => {
                warn!(%url, error = %err, "failed to cache data file");
                false
            }
        }
    }

    /// Garbage-collect every stale bucket and claim the open pages. The two
    /// run concurrently; the worker is fully active once both finish.
    pub async fn activate(&mut self) -> Result<()> {
        let gc = async {
            for name in self.store.bucket_names().await? {
                if name != self.version {
                    debug!(bucket = %name, "deleting stale cache bucket");
                    self.store.delete_bucket(&name).await?;
                }
            }
            Ok::<(), ReaderError>(())
        };
        let claim = async {
            // Claiming open pages is the embedder's hook; the worker just
            // records that it now controls them.
            Ok::<bool, ReaderError>(true)
        };

        let (gc_result, claim_result) = tokio::join!(gc, claim);
        gc_result?;
        self.controls_clients = claim_result?;

        info!(version = %self.version, "cache worker active");
        Ok(())
    }

    /// Intercept one outgoing request.
    pub async fn handle_fetch(&self, request: &FetchRequest) -> Result<FetchedResponse> {
        let bucket = self.store.open_bucket(&self.version).await?;

        // App-shell pattern: every navigation resolves to the shell
        // document, whatever the path or query.
        if request.mode == RequestMode::Navigate {
            if let Some(body) = bucket.get(SHELL_DOCUMENT).await? {
                return Ok(cached_response(SHELL_DOCUMENT, body));
            }
            debug!(url = %request.url, "shell not cached, navigation falls through");
            return self.fetcher.fetch(&request.url).await;
        }

        // Cache-first, ignoring the query string; no revalidation.
        if let Some(body) = bucket.get(&request.url).await? {
            return Ok(cached_response(canonical_url(&request.url), body));
        }

        let response = self.fetcher.fetch(&request.url).await?;
        if response.is_cacheable() {
            // Storing is best-effort; the fetched response is already in
            // hand and a cache write failure must not fail the request.
            if let Err(err) = bucket.put(&request.url, &response.body).await {
                warn!(url = %request.url, error = %err, "failed to store runtime response");
            }
        }
        Ok(response)
    }
}
