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


//! HTTP client for app resources
//!
//! The app addresses its own resources with relative URLs (`./assets/...`)
//! and a handful of absolute cross-origin URLs (font and icon stylesheets).
//! [`HttpFetcher`] resolves relative URLs against a configured app origin
//! and classifies each response as same-origin ([`ResponseKind::Basic`]) or
//! cross-origin ([`ResponseKind::Opaque`]). The cache worker's runtime
//! caching rule only stores basic 200 responses; the classification lives
//! here so the worker never has to re-derive it.

use crate::error::Result;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent sent with every request
const USER_AGENT: &str = concat!("vachanamrut-core/", env!("CARGO_PKG_VERSION"));

/// How a request reached the worker: a top-level page load or anything else.
///
/// Navigation requests are answered with the cached app shell regardless of
/// the requested path, so deep-link URLs load the SPA shell even offline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// Top-level page load
    Navigate,
    /// Subresource request (script, style, image, data file)
    Asset,
}

/// An outgoing request as seen by the cache worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub mode: RequestMode,
}

impl FetchRequest {
    /// A subresource request
    pub fn asset(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            mode: RequestMode::Asset,
        }
    }

    /// A top-level navigation request
    pub fn navigation(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            mode: RequestMode::Navigate,
        }
    }
}

/// Origin classification of a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// Same-origin response; eligible for runtime caching
    Basic,
    /// Cross-origin response; passed through uncached at runtime
    Opaque,
}

/// A fully buffered response
///
/// App resources are small (the largest is a single discourse body), so
/// responses are buffered rather than streamed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedResponse {
    /// The URL the caller asked for (not the cache-busted variant)
    pub url: String,
    pub status: u16,
    pub kind: ResponseKind,
    pub body: Vec<u8>,
}

impl FetchedResponse {
    /// Whether the response carries a success status
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the runtime-caching rule may store this response:
    /// exactly 200, same-origin. Everything else passes through.
    pub fn is_cacheable(&self) -> bool {
        self.status == 200 && self.kind == ResponseKind::Basic
    }
}

/// Seam between the cache worker / content loader and the network
pub trait Fetcher {
    /// Fetch a URL (relative to the app origin, or absolute) and buffer the
    /// response. Transport-level failures are errors; HTTP error statuses
    /// are returned as responses so callers can apply their own policy.
    fn fetch(&self, url: &str) -> impl std::future::Future<Output = Result<FetchedResponse>> + Send;
}

impl<F: Fetcher + Sync> Fetcher for &F {
    fn fetch(&self, url: &str) -> impl std::future::Future<Output = Result<FetchedResponse>> + Send {
        (**self).fetch(url)
    }
}

impl<F: Fetcher + Send + Sync> Fetcher for Arc<F> {
    fn fetch(&self, url: &str) -> impl std::future::Future<Output = Result<FetchedResponse>> + Send {
        (**self).fetch(url)
    }
}

/// Production fetcher over reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    origin: Url,
}

impl HttpFetcher {
    /// Create a fetcher rooted at the app origin, e.g.
    /// `https://reader.example.org/app/`.
    pub fn new(app_origin: &str) -> Result<Self> {
        let origin = Url::parse(app_origin)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, origin })
    }

    /// Resolve a possibly relative URL against the app origin
    pub fn resolve(&self, url: &str) -> Result<Url> {
        if url.starts_with("http://") || url.starts_with("https://") {
            Ok(Url::parse(url)?)
        } else {
            Ok(self.origin.join(url)?)
        }
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedResponse> {
        let absolute = self.resolve(url)?;
        let kind = if absolute.origin() == self.origin.origin() {
            ResponseKind::Basic
        } else {
            ResponseKind::Opaque
        };

        let response = self.client.get(absolute).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(FetchedResponse {
            url: url.to_string(),
            status,
            kind,
            body,
        })
    }
}
