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


//! Content store and loading
//!
//! The corpus is fixed: up to [`loader::DISCOURSE_FILE_COUNT`] numbered
//! discourses per language, a section-mapping resource giving the canonical
//! reading order, and a video index. The loader fetches the whole batch
//! concurrently and produces an immutable [`ContentStore`]; a language
//! switch builds a new store rather than mutating the old one.

pub mod loader;
pub mod models;
pub mod store;

// Re-export commonly used types
pub use loader::{discourse_path, ContentLoader, DISCOURSE_FILE_COUNT};
pub use models::{Discourse, DiscourseId, Language, Section, Video};
pub use store::ContentStore;
