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


//! Core data model: discourses, sections, videos, languages
//!
//! A [`Discourse`] is one numbered unit of content. Its id is assigned from
//! the data-file index at load time (1..=N) and is the only cross-reference
//! key in the system; every other field is immutable after load.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable discourse identifier, assigned from the data-file index (1-based)
pub type DiscourseId = u32;

/// Supported content languages
///
/// Every discourse and section record is language-specific, which is why a
/// language change rebuilds the whole content store instead of re-rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Gujarati,
    English,
}

impl Language {
    /// All supported languages, in the order their data files are cached
    pub const ALL: [Language; 2] = [Language::Gujarati, Language::English];

    /// Directory segment under `assets/data/`
    pub fn path_segment(self) -> &'static str {
        match self {
            Language::Gujarati => "gujarati",
            Language::English => "english",
        }
    }

    /// Token used in the `lang` query parameter and the preferences slot
    pub fn token(self) -> &'static str {
        self.path_segment()
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "gujarati" => Some(Language::Gujarati),
            "english" => Some(Language::English),
            _ => None,
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::Gujarati
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Raw shape of a per-discourse data file
///
/// The file carries no id; the loader assigns one from the file index.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscourseFile {
    /// Section + number display string, e.g. "Gadhada I-5"
    pub vachanamrut: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub setting: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// One unit of content, immutable after load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discourse {
    pub id: DiscourseId,
    /// Short display identifier (the original section+number string)
    pub label: String,
    pub title: Option<String>,
    pub setting: Option<String>,
    /// Long text, paragraph-delimited by blank lines
    pub body: String,
}

impl Discourse {
    /// Build a discourse from a data file, assigning the id from the file
    /// index. Display fields are whitespace-normalized the way the reader
    /// renders them; empty optional fields collapse to `None`.
    pub fn from_file(id: DiscourseId, file: DiscourseFile) -> Self {
        Self {
            id,
            label: file.vachanamrut.trim().to_string(),
            title: clean_optional(file.title),
            setting: clean_optional(file.setting),
            body: normalize_body(file.text.as_deref().unwrap_or("")),
        }
    }

    /// The body split into display paragraphs
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.body
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

fn clean_optional(value: Option<String>) -> Option<String> {
    let cleaned = value?.replace('\n', " ").trim().to_string();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Collapse single newlines into paragraph breaks and trim the ends,
/// matching how the source files delimit paragraphs.
fn normalize_body(text: &str) -> String {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Raw shape of one entry in the section-mapping resource
#[derive(Debug, Clone, Deserialize)]
pub struct SectionMapping {
    pub name: String,
    #[serde(default, alias = "gujaratiName", alias = "localizedName")]
    pub localized_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    /// Discourse ids in canonical reading order
    #[serde(default)]
    pub vachanamruts: Vec<DiscourseId>,
}

/// Hydration state of a section's entry list
///
/// Sections arrive as raw id lists and are hydrated exactly once against
/// the loaded corpus: ids that resolve are kept in order, ids that do not
/// are silently dropped. Keeping the state explicit makes re-hydration a
/// detectable no-op rather than a double filter.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SectionEntries {
    Raw(Vec<DiscourseId>),
    Hydrated(Vec<DiscourseId>),
}

/// A named, ordered grouping of discourses; the order IS the canonical
/// reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub localized_name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    entries: SectionEntries,
}

impl Section {
    pub fn from_mapping(mapping: SectionMapping) -> Self {
        Self {
            name: mapping.name,
            localized_name: mapping.localized_name,
            description: mapping.description,
            image: mapping.image,
            entries: SectionEntries::Raw(mapping.vachanamruts),
        }
    }

    /// A section built directly from an ordered id list (used by the legacy
    /// label-inference fallback).
    pub fn from_ids(name: impl Into<String>, ids: Vec<DiscourseId>) -> Self {
        Self {
            name: name.into(),
            localized_name: None,
            description: None,
            image: None,
            entries: SectionEntries::Raw(ids),
        }
    }

    /// Resolve raw ids against the loaded corpus, dropping ids with no
    /// record. Idempotent: hydrating a hydrated section is a no-op.
    pub fn hydrate(&mut self, exists: impl Fn(DiscourseId) -> bool) {
        if let SectionEntries::Raw(ids) = &self.entries {
            let resolved = ids.iter().copied().filter(|id| exists(*id)).collect();
            self.entries = SectionEntries::Hydrated(resolved);
        }
    }

    pub fn is_hydrated(&self) -> bool {
        matches!(self.entries, SectionEntries::Hydrated(_))
    }

    /// Discourse ids in reading order (raw or hydrated)
    pub fn discourse_ids(&self) -> &[DiscourseId] {
        match &self.entries {
            SectionEntries::Raw(ids) | SectionEntries::Hydrated(ids) => ids,
        }
    }

    pub fn count(&self) -> usize {
        self.discourse_ids().len()
    }

    pub fn contains(&self, id: DiscourseId) -> bool {
        self.discourse_ids().contains(&id)
    }
}

/// Optional supplementary video link, keyed by the discourse it annotates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// Discourse id this video annotates
    pub number: DiscourseId,
    #[serde(rename = "videoId")]
    pub video_id: String,
    pub title: String,
}
