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


//! Deep-link URL contract
//!
//! `?id=<n>&lang=<language>` selects a discourse detail view; absence of
//! `id` means Home. A legacy `#id=<n>` or bare `#<n>` hash form is accepted
//! as a fallback when no query id is present.

use crate::content::{DiscourseId, Language};
use url::Url;

/// A parsed deep link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeepLink {
    pub id: DiscourseId,
    pub language: Option<Language>,
}

/// Base used to absolutize relative URLs handed in by the shell
const LOCAL_BASE: &str = "app://local/";

fn absolute(url: &str) -> Option<Url> {
    match Url::parse(url) {
        Ok(parsed) => Some(parsed),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(LOCAL_BASE).ok()?.join(url).ok()
        }
        Err(_) => None,
    }
}

/// Parse a current-page URL into a deep link, if it carries one.
pub fn parse_deep_link(url: &str) -> Option<DeepLink> {
    let parsed = absolute(url)?;

    let mut id: Option<DiscourseId> = None;
    let mut language: Option<Language> = None;
    for (key, value) in parsed.query_pairs() {
        match key.as_ref() {
            "id" => id = value.parse().ok(),
            "lang" => language = Language::from_token(value.as_ref()),
            _ => {}
        }
    }

    if let Some(id) = id {
        return Some(DeepLink { id, language });
    }

    // Legacy hash forms: "#id=5" and bare "#5"
    let fragment = parsed.fragment()?;
    let raw = fragment.strip_prefix("id=").unwrap_or(fragment);
    raw.parse().ok().map(|id| DeepLink { id, language })
}

/// Parse only the language selection out of a URL.
pub fn parse_language(url: &str) -> Option<Language> {
    let parsed = absolute(url)?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == "lang")
        .and_then(|(_, value)| Language::from_token(value.as_ref()))
}

/// Build the shareable URL for a discourse, preserving everything about
/// `base` except the deep-link parameters.
pub fn share_url(base: &str, id: DiscourseId, language: Language) -> String {
    let Some(mut parsed) = absolute(base) else {
        return format!("?id={id}&lang={}", language.token());
    };
    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| key != "id" && key != "lang")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    parsed.set_fragment(None);
    {
        let mut query = parsed.query_pairs_mut();
        query.clear();
        for (key, value) in kept {
            query.append_pair(&key, &value);
        }
        query.append_pair("id", &id.to_string());
        query.append_pair("lang", language.token());
    }
    restore_relative(base, parsed)
}

/// Remove the discourse id (and any legacy hash id) from a URL, leaving the
/// rest intact. Home never carries an id, so reloading from Home never
/// re-triggers a deep link.
pub fn strip_discourse_query(url: &str) -> String {
    let Some(mut parsed) = absolute(url) else {
        return url.to_string();
    };
    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| key != "id")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    parsed.set_fragment(None);
    if kept.is_empty() {
        parsed.set_query(None);
    } else {
        let mut query = parsed.query_pairs_mut();
        query.clear();
        for (key, value) in kept {
            query.append_pair(&key, &value);
        }
    }
    restore_relative(url, parsed)
}

/// If the input was relative, hand back a relative URL again.
fn restore_relative(original: &str, parsed: Url) -> String {
    let rendered = parsed.as_str();
    match rendered.strip_prefix(LOCAL_BASE) {
        Some(tail) if !original.starts_with("app://") => {
            if original.starts_with("./") {
                format!("./{tail}")
            } else if original.starts_with('/') {
                format!("/{tail}")
            } else {
                tail.to_string()
            }
        }
        _ => rendered.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_id_and_language_are_parsed() {
        let link = parse_deep_link("https://reader.example.org/app/?id=5&lang=english").unwrap();
        assert_eq!(link.id, 5);
        assert_eq!(link.language, Some(Language::English));
    }

    #[test]
    fn query_id_without_language_is_parsed() {
        let link = parse_deep_link("https://reader.example.org/app/?id=12").unwrap();
        assert_eq!(link.id, 12);
        assert_eq!(link.language, None);
    }

    #[test]
    fn hash_forms_are_a_fallback_only() {
        assert_eq!(parse_deep_link("./index.html#id=7").unwrap().id, 7);
        assert_eq!(parse_deep_link("./index.html#7").unwrap().id, 7);
        // Query id wins over a conflicting hash
        assert_eq!(parse_deep_link("./index.html?id=3#id=7").unwrap().id, 3);
    }

    #[test]
    fn garbage_is_not_a_deep_link() {
        assert!(parse_deep_link("https://reader.example.org/app/").is_none());
        assert!(parse_deep_link("./index.html?id=abc").is_none());
        assert!(parse_deep_link("./index.html#chapter-list").is_none());
    }

    #[test]
    fn share_url_replaces_deep_link_parameters() {
        let shared = share_url(
            "https://reader.example.org/app/?id=2&lang=gujarati",
            9,
            Language::English,
        );
        assert_eq!(shared, "https://reader.example.org/app/?id=9&lang=english");
    }

    #[test]
    fn strip_removes_only_the_id() {
        assert_eq!(
            strip_discourse_query("https://reader.example.org/app/?id=5&lang=english"),
            "https://reader.example.org/app/?lang=english"
        );
        assert_eq!(
            strip_discourse_query("https://reader.example.org/app/?id=5"),
            "https://reader.example.org/app/"
        );
        assert_eq!(
            strip_discourse_query("https://reader.example.org/app/#id=5"),
            "https://reader.example.org/app/"
        );
    }

    #[test]
    fn relative_urls_stay_relative() {
        let stripped = strip_discourse_query("./index.html?id=5");
        assert_eq!(stripped, "./index.html");
    }
}
