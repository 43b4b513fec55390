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


//! Offline asset cache and versioning protocol
//!
//! The cache is a set of named buckets, at most one of which is
//! authoritative: the one whose name equals the worker's version string.
//! The version string is compared, never parsed; any new string invalidates
//! every previously cached entry. Entries never expire by time.
//!
//! Lifecycle mirrors an installable worker: [`CacheWorker::install`] fills
//! the bucket from the manifest, [`CacheWorker::activate`] garbage-collects
//! stale buckets and claims clients, and [`CacheWorker::handle_fetch`]
//! intercepts requests cache-first.

pub mod manifest;
pub mod store;
pub mod worker;

pub use manifest::{CacheManifest, CORE_ASSETS, EXTERNAL_STYLESHEETS, SHELL_DOCUMENT};
pub use store::{canonical_url, CacheBucket, CacheStore};
pub use worker::CacheWorker;
