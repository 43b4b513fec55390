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


//! Immutable content store
//!
//! Written once per load cycle, read-only afterward. Discourse lookup is
//! map-backed; sections are hydrated at construction and the store never
//! changes until a language switch replaces it wholesale.

use crate::content::models::{Discourse, DiscourseId, Language, Section, Video};
use crate::error::{ReaderError, Result};
use std::collections::HashMap;

/// The loaded corpus for one language
#[derive(Debug, Clone)]
pub struct ContentStore {
    language: Language,
    discourses: HashMap<DiscourseId, Discourse>,
    /// Load order, for stable iteration independent of map ordering
    order: Vec<DiscourseId>,
    sections: Vec<Section>,
    videos: HashMap<DiscourseId, Video>,
}

impl ContentStore {
    /// Assemble a store from loaded records, hydrating every section
    /// against the discourse map. Fails only when no discourse loaded at
    /// all; a partially loaded corpus is fine.
    pub fn new(
        language: Language,
        discourses: Vec<Discourse>,
        mut sections: Vec<Section>,
        videos: Vec<Video>,
    ) -> Result<Self> {
        if discourses.is_empty() {
            return Err(ReaderError::NoContentLoaded);
        }

        let order: Vec<DiscourseId> = discourses.iter().map(|d| d.id).collect();
        let discourses: HashMap<DiscourseId, Discourse> =
            discourses.into_iter().map(|d| (d.id, d)).collect();

        for section in &mut sections {
            section.hydrate(|id| discourses.contains_key(&id));
        }

        let videos = videos.into_iter().map(|v| (v.number, v)).collect();

        Ok(Self {
            language,
            discourses,
            order,
            sections,
            videos,
        })
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// O(1) lookup by id
    pub fn discourse(&self, id: DiscourseId) -> Option<&Discourse> {
        self.discourses.get(&id)
    }

    pub fn contains(&self, id: DiscourseId) -> bool {
        self.discourses.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.discourses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.discourses.is_empty()
    }

    /// All discourses in load order
    pub fn discourses(&self) -> impl Iterator<Item = &Discourse> {
        self.order.iter().filter_map(|id| self.discourses.get(id))
    }

    /// Sections in display order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// The home section of a discourse: the first section whose reading
    /// order contains the id. Used to lazily resolve a reading context for
    /// deep-linked entries.
    pub fn section_of(&self, id: DiscourseId) -> Option<&Section> {
        self.sections.iter().find(|s| s.contains(id))
    }

    /// Resolve a section's reading order to discourse references
    pub fn discourses_in<'a>(&'a self, section: &'a Section) -> Vec<&'a Discourse> {
        section
            .discourse_ids()
            .iter()
            .filter_map(|id| self.discourses.get(id))
            .collect()
    }

    pub fn video_for(&self, id: DiscourseId) -> Option<&Video> {
        self.videos.get(&id)
    }
}
