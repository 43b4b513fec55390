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


//! Durable key-value persistence
//!
//! Three independent named slots survive app restarts: the language
//! preference, the single bookmark, and the favorites set. They live in a
//! small SQLite database behind [`Preferences`]; [`Database`] handles
//! connection pooling and migrations.

pub mod database;
pub mod migrations;
pub mod prefs;

// Re-export commonly used types
pub use database::Database;
pub use prefs::Preferences;
