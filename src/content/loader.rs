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


//! Bulk content loading
//!
//! One resource per discourse, path parameterized by language and a
//! sequential index 1..=[`DISCOURSE_FILE_COUNT`]. The whole batch is issued
//! concurrently and awaited together; an individual missing or malformed
//! file degrades to "record absent", never a batch failure. Only a batch
//! that yields zero records is fatal.
//!
//! # Section resolution
//! The explicit section-mapping resource is authoritative. If it is missing
//! or empty, sections are inferred the legacy way: matching a known section
//! name out of each discourse label and sorting by the embedded number.

use crate::content::models::{
    Discourse, DiscourseFile, DiscourseId, Language, Section, SectionMapping, Video,
};
use crate::content::store::ContentStore;
use crate::error::Result;
use crate::fetch::Fetcher;
use futures_util::future::join_all;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// Number of per-discourse data files per language
pub const DISCOURSE_FILE_COUNT: u32 = 262;

/// Section-mapping resource (canonical reading order)
pub const SECTION_MAPPING_PATH: &str = "./assets/chapter-mappings.json";

/// Video-index resource
pub const VIDEO_INDEX_PATH: &str = "./assets/youtube_videos.json";

/// Path of one per-discourse data file, relative to the app origin
pub fn discourse_path(language: Language, index: u32) -> String {
    format!(
        "./assets/data/{}/vachanamrut-{}.json",
        language.path_segment(),
        index
    )
}

/// Loads the corpus for one language into an immutable [`ContentStore`]
#[derive(Debug)]
pub struct ContentLoader<F> {
    fetcher: F,
}

impl<F: Fetcher> ContentLoader<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Load everything for `language` and assemble the store.
    pub async fn load(&self, language: Language) -> Result<ContentStore> {
        let discourses = self.load_discourses(language).await;
        info!(
            language = %language,
            loaded = discourses.len(),
            "discourse batch resolved"
        );

        let sections = match self.load_section_mappings().await {
            Some(mappings) if !mappings.is_empty() => {
                mappings.into_iter().map(Section::from_mapping).collect()
            }
            _ => {
                warn!("section mapping unavailable, inferring sections from labels");
                infer_sections_from_labels(&discourses)
            }
        };

        let videos = self.load_videos().await.unwrap_or_default();

        ContentStore::new(language, discourses, sections, videos)
    }

    /// Fetch all data files concurrently; failures yield absent records.
    async fn load_discourses(&self, language: Language) -> Vec<Discourse> {
        let fetches = (1..=DISCOURSE_FILE_COUNT).map(|index| {
            let url = discourse_path(language, index);
            async move {
                match self.fetcher.fetch(&url).await {
                    Ok(response) if response.ok() => {
                        match serde_json::from_slice::<DiscourseFile>(&response.body) {
                            Ok(file) => Some(Discourse::from_file(index, file)),
                            Err(err) => {
                                warn!(%url, error = %err, "malformed discourse file skipped");
                                None
                            }
                        }
                    }
                    Ok(response) => {
                        debug!(%url, status = response.status, "discourse file absent");
                        None
                    }
                    Err(err) => {
                        debug!(%url, error = %err, "discourse fetch failed");
                        None
                    }
                }
            }
        });

        join_all(fetches).await.into_iter().flatten().collect()
    }

    async fn load_section_mappings(&self) -> Option<Vec<SectionMapping>> {
        let response = match self.fetcher.fetch(SECTION_MAPPING_PATH).await {
            Ok(response) if response.ok() => response,
            Ok(response) => {
                debug!(status = response.status, "section mapping absent");
                return None;
            }
            Err(err) => {
                debug!(error = %err, "section mapping fetch failed");
                return None;
            }
        };

        match serde_json::from_slice(&response.body) {
            Ok(mappings) => Some(mappings),
            Err(err) => {
                warn!(error = %err, "malformed section mapping ignored");
                None
            }
        }
    }

    async fn load_videos(&self) -> Option<Vec<Video>> {
        let response = match self.fetcher.fetch(VIDEO_INDEX_PATH).await {
            Ok(response) if response.ok() => response,
            _ => return None,
        };

        match serde_json::from_slice(&response.body) {
            Ok(videos) => Some(videos),
            Err(err) => {
                warn!(error = %err, "malformed video index ignored");
                None
            }
        }
    }
}

/// Known sections in display order, with the label variants they appear
/// under in either language. Roman-numeral variants overlap ("Gadhada I" is
/// a prefix of "Gadhada II"), so matching picks the longest variant found.
const SECTION_PATTERNS: &[(&str, &[&str])] = &[
    ("Gadhada I", &["ગઢડા પ્રથમ", "Gadhada I"]),
    ("Sarangpur", &["સારંગપુર", "Sarangpur"]),
    ("Kariyani", &["કારિયાણી", "Kariyani"]),
    ("Loya", &["લોયા", "Loya"]),
    ("Panchala", &["પંચાળા", "Panchala"]),
    ("Gadhada II", &["ગઢડા મધ્ય", "Gadhada II"]),
    ("Vartal", &["વરતાલ", "Vartal", "Vadtal"]),
    ("Ahmedabad", &["અમદાવાદ", "Ahmedabad"]),
    ("Gadhada III", &["ગઢડા અંત્ય", "Gadhada III"]),
];

fn in_section_number() -> &'static Regex {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    NUMBER.get_or_init(|| Regex::new(r"(\d+)").unwrap())
}

/// Legacy fallback: derive sections by matching a known section name out of
/// each discourse label and sorting by the number that follows it.
pub fn infer_sections_from_labels(discourses: &[Discourse]) -> Vec<Section> {
    // (in-section number, id) per matched discourse, bucketed by section
    let mut buckets: Vec<Vec<(u32, DiscourseId)>> = vec![Vec::new(); SECTION_PATTERNS.len()];

    for discourse in discourses {
        let mut best: Option<(usize, usize, &str)> = None;
        for (section_idx, (_, variants)) in SECTION_PATTERNS.iter().enumerate() {
            for variant in *variants {
                if let Some(pos) = discourse.label.find(variant) {
                    let longer = best.map_or(true, |(_, _, v)| variant.len() > v.len());
                    if longer {
                        best = Some((section_idx, pos, variant));
                    }
                }
            }
        }

        let Some((section_idx, pos, variant)) = best else {
            debug!(label = %discourse.label, "label matches no known section");
            continue;
        };

        let tail = &discourse.label[pos + variant.len()..];
        let number = in_section_number()
            .find(tail)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0);
        buckets[section_idx].push((number, discourse.id));
    }

    SECTION_PATTERNS
        .iter()
        .zip(buckets)
        .filter(|(_, bucket)| !bucket.is_empty())
        .map(|((name, _), mut bucket)| {
            bucket.sort_by_key(|(number, _)| *number);
            Section::from_ids(*name, bucket.into_iter().map(|(_, id)| id).collect())
        })
        .collect()
}
