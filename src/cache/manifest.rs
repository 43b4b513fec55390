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


//! Install manifest: every URL the worker caches up front

use crate::content::{discourse_path, Language, DISCOURSE_FILE_COUNT};

/// The app-shell document served for every navigation request
pub const SHELL_DOCUMENT: &str = "./index.html";

/// Core shell files and metadata; failure to cache any of these fails the
/// install, unlike data files.
pub const CORE_ASSETS: &[&str] = &[
    "./",
    "./index.html",
    "./css/styles.css",
    "./js/app.js",
    "./manifest.json",
    "./assets/chapter-mappings.json",
    "./assets/youtube_videos.json",
    "./images/logo-vachanamrut.png",
    "./images/swaminarayan-bg.jpg",
    "./images/swaminarayan-bg-gold.jpg",
    "./images/192.png",
    "./images/512.png",
    "./images/app-icon.png",
    "./images/vachanamrut-locations/gadhada-1.jpg",
    "./images/vachanamrut-locations/gadhada-2.jpg",
    "./images/vachanamrut-locations/gadhada-3.jpg",
    "./images/vachanamrut-locations/sarangpur.jpg",
    "./images/vachanamrut-locations/kariyani.jpg",
    "./images/vachanamrut-locations/loya.jpg",
    "./images/vachanamrut-locations/panchala.jpg",
    "./images/vachanamrut-locations/vadtal.jpg",
    "./images/vachanamrut-locations/ahmedabad.jpg",
];

/// External font and icon stylesheets, cached alongside the shell
pub const EXTERNAL_STYLESHEETS: &[&str] = &[
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.0.0/css/all.min.css",
    "https://fonts.googleapis.com/css2?family=Noto+Sans+Gujarati:wght@300;400;500;700&family=Poppins:wght@300;400;500;600;700&display=swap",
];

/// The full install set, with data files listed separately because install
/// applies the partial-success policy only to them.
#[derive(Debug, Clone)]
pub struct CacheManifest {
    /// Shell files, metadata, external stylesheets: all-or-nothing
    pub core: Vec<String>,
    /// Per-discourse data files for every supported language: each one an
    /// independent unit of work
    pub data_files: Vec<String>,
}

impl CacheManifest {
    /// The production manifest: core assets plus every data file for every
    /// supported language.
    pub fn build() -> Self {
        let core = CORE_ASSETS
            .iter()
            .chain(EXTERNAL_STYLESHEETS)
            .map(|url| url.to_string())
            .collect();

        let data_files = Language::ALL
            .iter()
            .flat_map(|language| {
                (1..=DISCOURSE_FILE_COUNT).map(|index| discourse_path(*language, index))
            })
            .collect();

        Self { core, data_files }
    }

    pub fn total(&self) -> usize {
        self.core.len() + self.data_files.len()
    }
}
