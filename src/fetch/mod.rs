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


//! Network fetch abstraction
//!
//! Everything in the crate that touches the network goes through the
//! [`Fetcher`] trait so the cache worker and the content loader can be
//! exercised against an in-memory fetcher in tests. [`HttpFetcher`] is the
//! production implementation over reqwest.

pub mod client;

pub use client::{FetchRequest, FetchedResponse, Fetcher, HttpFetcher, RequestMode, ResponseKind};
