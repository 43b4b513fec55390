//! Shared test fixtures: an in-memory fetcher and a small seeded corpus

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use vachanamrut_core::cache::canonical_url;
use vachanamrut_core::content::{discourse_path, Language};
use vachanamrut_core::fetch::{FetchedResponse, Fetcher, ResponseKind};
use vachanamrut_core::storage::{Database, Preferences};
use vachanamrut_core::Result;

/// Serves canned responses keyed by canonical URL; everything else 404s.
/// Counts the fetches that reach it so tests can prove cache hits.
#[derive(Default)]
pub struct MemoryFetcher {
    entries: Mutex<HashMap<String, (u16, ResponseKind, Vec<u8>)>>,
    network_fetches: AtomicUsize,
}

impl MemoryFetcher {
    pub fn insert(&self, url: &str, body: impl Into<Vec<u8>>) {
        self.insert_with(url, 200, ResponseKind::Basic, body);
    }

    pub fn insert_with(
        &self,
        url: &str,
        status: u16,
        kind: ResponseKind,
        body: impl Into<Vec<u8>>,
    ) {
        self.entries
            .lock()
            .unwrap()
            .insert(canonical_url(url).to_string(), (status, kind, body.into()));
    }

    pub fn remove(&self, url: &str) {
        self.entries.lock().unwrap().remove(canonical_url(url));
    }

    pub fn network_fetches(&self) -> usize {
        self.network_fetches.load(Ordering::SeqCst)
    }
}

impl Fetcher for MemoryFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedResponse> {
        self.network_fetches.fetch_add(1, Ordering::SeqCst);
        let entry = self
            .entries
            .lock()
            .unwrap()
            .get(canonical_url(url))
            .cloned();
        Ok(match entry {
            Some((status, kind, body)) => FetchedResponse {
                url: url.to_string(),
                status,
                kind,
                body,
            },
            None => FetchedResponse {
                url: url.to_string(),
                status: 404,
                kind: ResponseKind::Basic,
                body: Vec::new(),
            },
        })
    }
}

pub fn discourse_json(label: &str, title: &str, text: &str) -> String {
    serde_json::json!({
        "vachanamrut": label,
        "title": title,
        "setting": "In the assembly",
        "text": text,
    })
    .to_string()
}

/// Seven discourses per language: ids 1..=5 in "Gadhada I", 6..=7 in
/// "Sarangpur", plus the section mapping and one video.
pub fn seed_corpus(fetcher: &MemoryFetcher) {
    for language in Language::ALL {
        for id in 1..=5u32 {
            fetcher.insert(
                &discourse_path(language, id),
                discourse_json(
                    &format!("Gadhada I-{id}"),
                    &format!("Discourse {id}"),
                    "Body paragraph one.\nBody paragraph two.",
                ),
            );
        }
        for id in 6..=7u32 {
            fetcher.insert(
                &discourse_path(language, id),
                discourse_json(
                    &format!("Sarangpur {}", id - 5),
                    &format!("Discourse {id}"),
                    "Body paragraph.",
                ),
            );
        }
    }

    fetcher.insert(
        "./assets/chapter-mappings.json",
        r#"[
            {"name":"Gadhada I","vachanamruts":[1,2,3,4,5]},
            {"name":"Sarangpur","vachanamruts":[6,7]}
        ]"#,
    );
    fetcher.insert(
        "./assets/youtube_videos.json",
        r#"[{"number":1,"videoId":"v-abc","title":"Discourse one"}]"#,
    );
}

pub async fn fresh_prefs() -> Preferences {
    Preferences::new(Database::new_in_memory().await.unwrap())
}

#[test]
fn fixture_json_survives_embedded_newlines() {
    // Discourse bodies carry newlines; the fixture must escape them so the
    // loader's serde parse sees every seeded record.
    let raw = discourse_json("Gadhada I-1", "Discourse 1", "One.\nTwo.");
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["vachanamrut"], "Gadhada I-1");
    assert_eq!(value["text"], "One.\nTwo.");
}
