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


//! Error types for the reader core
//!
//! This module defines error types using thiserror for ergonomic error handling.
//! Errors are categorized by domain (content loading, cache, navigation,
//! storage) for better error handling and reporting.
//!
//! Two properties hold across the crate:
//! - A single missing content file is never an error to the caller; it is a
//!   missing record. Only a load that yields *zero* records surfaces as
//!   [`ReaderError::NoContentLoaded`].
//! - Nothing is retried automatically. Callers either tolerate the failure
//!   (cache install of an individual data file) or degrade (unresolvable
//!   ids render Home).

use thiserror::Error;

/// Result type alias using our ReaderError type
pub type Result<T> = std::result::Result<T, ReaderError>;

/// Main error type for the reader core
#[derive(Error, Debug)]
pub enum ReaderError {
    // ===== Content Loading Errors =====

    /// A content or metadata resource could not be fetched.
    /// Callers loading the corpus treat this as "record absent".
    #[error("resource unavailable: {url}: {reason}")]
    DataUnavailable { url: String, reason: String },

    /// Every data file in the batch failed to load. This is the one fatal
    /// loading error; the shell shows its coarse inline message for it.
    #[error("no discourse data could be loaded")]
    NoContentLoaded,

    /// A resource fetched fine but its JSON did not match the expected shape
    #[error("invalid data in {url}: {reason}")]
    InvalidData { url: String, reason: String },

    // ===== Navigation Errors =====

    /// An id that does not resolve to a loaded discourse. The navigation
    /// controller converts this to a silent return to Home; it is never
    /// shown to the reader.
    #[error("unknown discourse id: {0}")]
    UnknownDiscourse(u32),

    /// A transition was requested from a screen that does not offer it
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    // ===== Cache Errors =====

    /// A core shell asset failed to cache during install. Unlike data
    /// files, core assets are all-or-nothing.
    #[error("failed to cache core asset {url}: {reason}")]
    CacheInstallFailed { url: String, reason: String },

    /// Filesystem error while reading or writing a cache bucket
    #[error("cache I/O error: {0}")]
    CacheIo(#[from] std::io::Error),

    // ===== Storage Errors =====

    /// Database error (via sqlx)
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// Failure creating or migrating the preferences database file
    #[error("storage setup failed: {0}")]
    StorageSetup(String),

    // ===== Network / Input Errors =====

    /// Network-level fetch failure (via reqwest)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A URL that could not be parsed or resolved
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Generic invalid input from the caller
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_resource() {
        let err = ReaderError::DataUnavailable {
            url: "./assets/data/english/vachanamrut-7.json".to_string(),
            reason: "404".to_string(),
        };
        assert!(err.to_string().contains("vachanamrut-7.json"));

        let err = ReaderError::UnknownDiscourse(99999);
        assert!(err.to_string().contains("99999"));
    }
}
