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


//! The persistence adapter: three named slots
//!
//! - `language`: the reader's language preference
//! - `bookmark`: at most one "continue reading here" discourse id
//! - `favorites`: a JSON-encoded, insertion-ordered, duplicate-free id list
//!
//! Toggles are idempotent: toggling the same id twice restores the prior
//! state, and repeated sets never produce duplicates or a second bookmark.
//! A corrupt slot value reads as absent rather than failing the caller.

use crate::content::{DiscourseId, Language};
use crate::error::Result;
use crate::storage::Database;
use tracing::warn;

/// Slot key for the language preference
pub const KEY_LANGUAGE: &str = "language";
/// Slot key for the single bookmark
pub const KEY_BOOKMARK: &str = "bookmark";
/// Slot key for the favorites set
pub const KEY_FAVORITES: &str = "favorites";

/// Durable key-value storage for reader state
#[derive(Debug, Clone)]
pub struct Preferences {
    db: Database,
}

impl Preferences {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    // ===== Slot primitives =====

    async fn get_slot(&self, key: &str) -> Result<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM Preferences WHERE key = ?")
            .bind(key)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(value)
    }

    async fn set_slot(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO Preferences (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn clear_slot(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM Preferences WHERE key = ?")
            .bind(key)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    // ===== Language =====

    /// The persisted language, defaulting when absent or unrecognized.
    pub async fn language(&self) -> Result<Language> {
        let token = self.get_slot(KEY_LANGUAGE).await?;
        Ok(token
            .as_deref()
            .and_then(Language::from_token)
            .unwrap_or_default())
    }

    pub async fn set_language(&self, language: Language) -> Result<()> {
        self.set_slot(KEY_LANGUAGE, language.token()).await
    }

    // ===== Bookmark =====

    /// The bookmarked discourse, if any.
    pub async fn bookmark(&self) -> Result<Option<DiscourseId>> {
        let value = self.get_slot(KEY_BOOKMARK).await?;
        Ok(value.and_then(|raw| match raw.parse() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!(%raw, "discarding corrupt bookmark slot");
                None
            }
        }))
    }

    pub async fn set_bookmark(&self, id: DiscourseId) -> Result<()> {
        self.set_slot(KEY_BOOKMARK, &id.to_string()).await
    }

    pub async fn clear_bookmark(&self) -> Result<()> {
        self.clear_slot(KEY_BOOKMARK).await
    }

    /// Toggle the bookmark: setting the already-bookmarked id clears it,
    /// anything else replaces it. Returns whether the id is now bookmarked.
    pub async fn toggle_bookmark(&self, id: DiscourseId) -> Result<bool> {
        if self.bookmark().await? == Some(id) {
            self.clear_bookmark().await?;
            Ok(false)
        } else {
            self.set_bookmark(id).await?;
            Ok(true)
        }
    }

    // ===== Favorites =====

    /// Favorites in insertion order.
    pub async fn favorites(&self) -> Result<Vec<DiscourseId>> {
        let value = self.get_slot(KEY_FAVORITES).await?;
        let Some(raw) = value else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<DiscourseId>>(&raw) {
            Ok(mut favorites) => {
                // Older clients could have written duplicates; drop them on read.
                let mut seen = std::collections::HashSet::new();
                favorites.retain(|id| seen.insert(*id));
                Ok(favorites)
            }
            Err(err) => {
                warn!(error = %err, "discarding corrupt favorites slot");
                Ok(Vec::new())
            }
        }
    }

    pub async fn is_favorite(&self, id: DiscourseId) -> Result<bool> {
        Ok(self.favorites().await?.contains(&id))
    }

    /// Toggle membership: add if absent (at the end), remove if present.
    /// Returns whether the id is now a favorite.
    pub async fn toggle_favorite(&self, id: DiscourseId) -> Result<bool> {
        let mut favorites = self.favorites().await?;
        let now_favorite = if let Some(index) = favorites.iter().position(|&fav| fav == id) {
            favorites.remove(index);
            false
        } else {
            favorites.push(id);
            true
        };

        let encoded = serde_json::to_string(&favorites)
            .map_err(|e| crate::error::ReaderError::InvalidInput(e.to_string()))?;
        self.set_slot(KEY_FAVORITES, &encoded).await?;
        Ok(now_favorite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn prefs() -> Preferences {
        Preferences::new(Database::new_in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn language_defaults_until_set() {
        let prefs = prefs().await;
        assert_eq!(prefs.language().await.unwrap(), Language::Gujarati);

        prefs.set_language(Language::English).await.unwrap();
        assert_eq!(prefs.language().await.unwrap(), Language::English);
    }

    #[tokio::test]
    async fn bookmark_toggle_is_idempotent() {
        let prefs = prefs().await;
        assert_eq!(prefs.bookmark().await.unwrap(), None);

        assert!(prefs.toggle_bookmark(5).await.unwrap());
        assert_eq!(prefs.bookmark().await.unwrap(), Some(5));

        assert!(!prefs.toggle_bookmark(5).await.unwrap());
        assert_eq!(prefs.bookmark().await.unwrap(), None);
    }

    #[tokio::test]
    async fn second_bookmark_replaces_the_first() {
        let prefs = prefs().await;
        prefs.set_bookmark(3).await.unwrap();
        prefs.set_bookmark(8).await.unwrap();
        assert_eq!(prefs.bookmark().await.unwrap(), Some(8));
    }

    #[tokio::test]
    async fn favorites_preserve_insertion_order_without_duplicates() {
        let prefs = prefs().await;
        prefs.toggle_favorite(4).await.unwrap();
        prefs.toggle_favorite(1).await.unwrap();
        prefs.toggle_favorite(9).await.unwrap();
        assert_eq!(prefs.favorites().await.unwrap(), vec![4, 1, 9]);

        // Toggling twice restores the original contents and size
        prefs.toggle_favorite(1).await.unwrap();
        assert_eq!(prefs.favorites().await.unwrap(), vec![4, 9]);
        prefs.toggle_favorite(1).await.unwrap();
        assert_eq!(prefs.favorites().await.unwrap(), vec![4, 9, 1]);
    }

    #[tokio::test]
    async fn corrupt_slots_read_as_absent() {
        let prefs = prefs().await;
        prefs.set_slot(KEY_BOOKMARK, "not-a-number").await.unwrap();
        prefs.set_slot(KEY_FAVORITES, "{broken").await.unwrap();

        assert_eq!(prefs.bookmark().await.unwrap(), None);
        assert!(prefs.favorites().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn slots_survive_reopen_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.db");

        {
            let prefs = Preferences::new(Database::new(&path).await.unwrap());
            prefs.set_language(Language::English).await.unwrap();
            prefs.set_bookmark(42).await.unwrap();
            prefs.toggle_favorite(7).await.unwrap();
            prefs.database().clone().close().await.unwrap();
        }

        let prefs = Preferences::new(Database::new(&path).await.unwrap());
        assert_eq!(prefs.language().await.unwrap(), Language::English);
        assert_eq!(prefs.bookmark().await.unwrap(), Some(42));
        assert_eq!(prefs.favorites().await.unwrap(), vec![7]);
    }
}
