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


//! Browser-history model
//!
//! A linear entry list with a cursor, mirroring session history semantics:
//! pushing truncates the forward entries, replacing rewrites in place, and
//! back/forward move the cursor without growing the list. Each entry
//! records whether it carries a discourse id so a pop can be rendered
//! without consulting the URL again.

use crate::content::DiscourseId;

/// One session-history entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub url: String,
    /// The deep-linked discourse, when this entry renders a detail view
    pub discourse: Option<DiscourseId>,
}

impl HistoryEntry {
    pub fn home(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            discourse: None,
        }
    }

    pub fn detail(url: impl Into<String>, id: DiscourseId) -> Self {
        Self {
            url: url.into(),
            discourse: Some(id),
        }
    }
}

/// Session history: entries plus a cursor, never empty
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

impl History {
    pub fn new(initial: HistoryEntry) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.cursor]
    }

    /// Number of entries; at least 1, the list is never empty.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Push a new entry, discarding any forward entries.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(entry);
        self.cursor += 1;
    }

    /// Replace the current entry in place.
    pub fn replace(&mut self, entry: HistoryEntry) {
        self.entries[self.cursor] = entry;
    }

    /// Move the cursor back one entry, if there is one.
    pub fn back(&mut self) -> Option<&HistoryEntry> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Move the cursor forward one entry, if there is one.
    pub fn forward(&mut self) -> Option<&HistoryEntry> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(HistoryEntry::home("./"))
    }
}
