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


//! Navigation: screen state machine, deep links, history, reading position
//!
//! The controller owns all mutable app state and exposes one named method
//! per user gesture; UI event handlers are expected to be thin adapters
//! over these calls. Unresolvable ids always degrade to Home silently.

pub mod controller;
pub mod deeplink;
pub mod history;
pub mod position;

pub use controller::{NavigationController, RenderHint, Screen, StartupHighlight};
pub use deeplink::{parse_deep_link, share_url, strip_discourse_query, DeepLink};
pub use history::{History, HistoryEntry};
pub use position::{position_in, ReadingPosition};
