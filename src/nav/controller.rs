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


//! Screen state machine
//!
//! One [`NavigationController`] owns the whole mutable app state: the
//! loaded content store, the persistence handle, the current screen, the
//! reading context, and the session-history model. UI event handlers are
//! thin adapters that translate a gesture into exactly one method call
//! here.
//!
//! # Reading context
//! The context used for prev/next is the ordered list of whichever listing
//! screen the reader entered the detail view from: a section gives its
//! canonical order, Favorites gives the favorites in stored order. A
//! discourse reached directly (deep link, history pop, bookmark restore)
//! has no listing behind it, so the context is resolved lazily from the
//! owning section the first time a position is needed, and never looked up
//! again for the same visit.
//!
//! # Degradation
//! Any id that does not resolve in the content store - deep link, popped
//! history entry, bookmark - renders Home silently. The reader never sees
//! an error for a stale link.

use crate::content::{ContentLoader, ContentStore, Discourse, DiscourseId, Language, Section, Video};
use crate::error::{ReaderError, Result};
use crate::fetch::Fetcher;
use crate::nav::deeplink::{self, parse_deep_link, share_url, strip_discourse_query};
use crate::nav::history::{History, HistoryEntry};
use crate::nav::position::{neighbor, position_in, ReadingPosition};
use crate::storage::Preferences;
use tracing::{debug, info, warn};

/// Named screens of the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Home,
    SectionDetail { section: String },
    DiscourseDetail { id: DiscourseId },
    Favorites,
    Settings,
}

/// Startup side effect: expand the bookmarked discourse's section and
/// transiently emphasize its row. Applying the scroll is the shell's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupHighlight {
    pub section: String,
    pub discourse: DiscourseId,
}

/// What the shell should refresh after a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderHint {
    /// Re-render any visible section listing (bookmark indicators changed)
    SectionListing,
    /// Re-render a concurrently visible Favorites screen
    FavoritesListing,
}

/// The finite state machine over screens
pub struct NavigationController<F> {
    loader: ContentLoader<F>,
    store: ContentStore,
    prefs: Preferences,
    screen: Screen,
    history: History,
    reading_context: Vec<DiscourseId>,
    /// Whether the lazy owning-section lookup already ran for this visit
    context_resolved: bool,
}

impl<F: Fetcher> NavigationController<F> {
    /// Boot the app: load the corpus, then resolve the initial screen from
    /// the current URL or the persisted bookmark.
    ///
    /// Returns the controller plus an optional startup highlight targeting
    /// the bookmarked discourse when the app lands on Home.
    pub async fn start(
        fetcher: F,
        prefs: Preferences,
        current_url: &str,
    ) -> Result<(Self, Option<StartupHighlight>)> {
        // The lang query parameter wins over the persisted preference and
        // becomes the new preference; this is how the language-toggle
        // reload carries its selection across the restart.
        let language = match deeplink::parse_language(current_url) {
            Some(language) => {
                if prefs.language().await? != language {
                    prefs.set_language(language).await?;
                }
                language
            }
            None => prefs.language().await?,
        };

        let loader = ContentLoader::new(fetcher);
        let store = loader.load(language).await?;

        let mut controller = Self {
            loader,
            store,
            prefs,
            screen: Screen::Home,
            history: History::new(HistoryEntry::home(current_url)),
            reading_context: Vec::new(),
            context_resolved: false,
        };

        if let Some(link) = parse_deep_link(current_url) {
            if controller.store.contains(link.id) {
                // Replace the boot entry so back/forward restores the
                // resolved id even if the link used the legacy hash form.
                controller.screen = Screen::DiscourseDetail { id: link.id };
                let url = share_url(current_url, link.id, controller.store.language());
                controller.history.replace(HistoryEntry::detail(url, link.id));
                info!(id = link.id, "deep link resolved at startup");
                return Ok((controller, None));
            }
            debug!(id = link.id, "unresolvable deep link ignored");
            controller
                .history
                .replace(HistoryEntry::home(strip_discourse_query(current_url)));
        }

        // Landing on Home: surface the bookmark, if its record still exists.
        let highlight = match controller.prefs.bookmark().await? {
            Some(id) => controller
                .store
                .section_of(id)
                .map(|section| StartupHighlight {
                    section: section.name.clone(),
                    discourse: id,
                }),
            None => None,
        };
        Ok((controller, highlight))
    }

    // ===== Accessors =====

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The URL the address bar should show
    pub fn current_url(&self) -> &str {
        &self.history.current().url
    }

    pub fn active_discourse(&self) -> Option<&Discourse> {
        match &self.screen {
            Screen::DiscourseDetail { id } => self.store.discourse(*id),
            _ => None,
        }
    }

    pub fn active_section(&self) -> Option<&Section> {
        match &self.screen {
            Screen::SectionDetail { section } => self.store.section(section),
            _ => None,
        }
    }

    /// Video annotating the displayed discourse, if any
    pub fn active_video(&self) -> Option<&Video> {
        match &self.screen {
            Screen::DiscourseDetail { id } => self.store.video_for(*id),
            _ => None,
        }
    }

    pub fn reading_context(&self) -> &[DiscourseId] {
        &self.reading_context
    }

    // ===== Listing transitions =====

    /// Open a section tile from Home.
    pub fn open_section(&mut self, name: &str) -> Result<()> {
        let section = self
            .store
            .section(name)
            .ok_or_else(|| ReaderError::InvalidInput(format!("unknown section: {name}")))?;
        self.reading_context = section.discourse_ids().to_vec();
        self.context_resolved = true;
        self.screen = Screen::SectionDetail {
            section: name.to_string(),
        };
        Ok(())
    }

    /// Open the Favorites screen.
    pub fn open_favorites(&mut self) {
        self.screen = Screen::Favorites;
    }

    /// Open the Settings screen.
    pub fn open_settings(&mut self) {
        self.screen = Screen::Settings;
    }

    // ===== Detail transitions =====

    /// Open a discourse row from the current listing screen. The reading
    /// context becomes that screen's ordered list; a new history entry
    /// carrying the id and language is pushed.
    pub async fn open_discourse(&mut self, id: DiscourseId) -> Result<()> {
        if !self.store.contains(id) {
            warn!(id, "attempt to open unknown discourse, staying put");
            return Ok(());
        }

        match &self.screen {
            Screen::Favorites => {
                let favorites = self.prefs.favorites().await?;
                self.reading_context = favorites
                    .into_iter()
                    .filter(|fav| self.store.contains(*fav))
                    .collect();
                self.context_resolved = true;
            }
            Screen::SectionDetail { .. } => {
                // Context already set when the section was opened.
            }
            _ => {
                // Entered without a listing screen; resolve lazily.
                self.reading_context.clear();
                self.context_resolved = false;
            }
        }

        self.enter_detail(id, true);
        Ok(())
    }

    /// Render a detail view, preserving whatever reading context is set.
    fn enter_detail(&mut self, id: DiscourseId, push: bool) {
        self.screen = Screen::DiscourseDetail { id };
        let url = share_url(self.history.current().url.as_str(), id, self.store.language());
        let entry = HistoryEntry::detail(url, id);
        if push {
            self.history.push(entry);
        } else {
            self.history.replace(entry);
        }
    }

    // ===== Back navigation =====

    /// The in-app back button.
    pub fn back(&mut self) {
        match self.screen.clone() {
            Screen::DiscourseDetail { id } => {
                match self.store.section_of(id).map(|s| s.name.clone()) {
                    Some(name) => {
                        // open_section cannot fail for a name we just found
                        let _ = self.open_section(&name);
                        let url = strip_discourse_query(self.history.current().url.as_str());
                        self.history.replace(HistoryEntry::home(url));
                    }
                    None => self.go_home(),
                }
            }
            Screen::SectionDetail { .. }
            | Screen::Favorites
            | Screen::Settings
            | Screen::Home => self.go_home(),
        }
    }

    /// Go to Home, clearing any discourse id from the visible URL so a
    /// reload on Home never re-triggers a deep link.
    pub fn go_home(&mut self) {
        self.screen = Screen::Home;
        self.reading_context.clear();
        self.context_resolved = false;
        let url = strip_discourse_query(self.history.current().url.as_str());
        self.history.replace(HistoryEntry::home(url));
    }

    /// Browser back (history pop). Renders the popped entry without
    /// pushing a new one.
    pub fn navigate_back(&mut self) {
        if let Some(entry) = self.history.back().cloned() {
            self.apply_history_entry(&entry);
        }
    }

    /// Browser forward. Same no-push rule as back.
    pub fn navigate_forward(&mut self) {
        if let Some(entry) = self.history.forward().cloned() {
            self.apply_history_entry(&entry);
        }
    }

    fn apply_history_entry(&mut self, entry: &HistoryEntry) {
        match entry.discourse {
            Some(id) if self.store.contains(id) => {
                self.screen = Screen::DiscourseDetail { id };
                if !self.reading_context.contains(&id) {
                    // This visit may belong to a different listing; let the
                    // tracker resolve a fresh context when asked.
                    self.reading_context.clear();
                    self.context_resolved = false;
                }
            }
            Some(id) => {
                debug!(id, "popped history entry no longer resolves");
                self.screen = Screen::Home;
            }
            None => self.screen = Screen::Home,
        }
    }

    // ===== Reading position =====

    /// Position of the displayed discourse within its reading context.
    /// Resolves the context from the owning section on first use when the
    /// detail view was entered without a listing screen.
    pub fn reading_position(&mut self) -> Option<ReadingPosition> {
        let Screen::DiscourseDetail { id } = self.screen else {
            return None;
        };
        self.ensure_context(id);
        position_in(&self.reading_context, id)
    }

    /// Move to the next discourse in the same context. No-op at the edge.
    pub fn next_discourse(&mut self) -> Result<()> {
        self.step(1)
    }

    /// Move to the previous discourse in the same context. No-op at the edge.
    pub fn prev_discourse(&mut self) -> Result<()> {
        self.step(-1)
    }

    fn step(&mut self, offset: isize) -> Result<()> {
        let Screen::DiscourseDetail { id } = self.screen else {
            return Err(ReaderError::InvalidTransition(
                "prev/next outside detail view".to_string(),
            ));
        };
        self.ensure_context(id);
        if let Some(target) = neighbor(&self.reading_context, id, offset) {
            // Context is preserved across the move, not recomputed.
            self.enter_detail(target, true);
        }
        Ok(())
    }

    /// One-time lazy context resolution, memoized per visit.
    fn ensure_context(&mut self, id: DiscourseId) {
        if self.context_resolved {
            return;
        }
        if let Some(section) = self.store.section_of(id) {
            self.reading_context = section.discourse_ids().to_vec();
        }
        self.context_resolved = true;
    }

    // ===== Bookmark and favorites =====

    /// Toggle the bookmark on the displayed discourse. Only available from
    /// the detail view.
    pub async fn toggle_bookmark(&mut self) -> Result<RenderHint> {
        let Screen::DiscourseDetail { id } = self.screen else {
            return Err(ReaderError::InvalidTransition(
                "bookmark toggled outside detail view".to_string(),
            ));
        };
        self.prefs.toggle_bookmark(id).await?;
        Ok(RenderHint::SectionListing)
    }

    /// Toggle the displayed discourse in the favorites set.
    pub async fn toggle_favorite(&mut self) -> Result<RenderHint> {
        let Screen::DiscourseDetail { id } = self.screen else {
            return Err(ReaderError::InvalidTransition(
                "favorite toggled outside detail view".to_string(),
            ));
        };
        self.prefs.toggle_favorite(id).await?;
        Ok(RenderHint::FavoritesListing)
    }

    /// Whether the displayed discourse is bookmarked
    pub async fn is_bookmarked(&self) -> Result<bool> {
        match &self.screen {
            Screen::DiscourseDetail { id } => Ok(self.prefs.bookmark().await? == Some(*id)),
            _ => Ok(false),
        }
    }

    // ===== Sharing =====

    /// Shareable deep link for the displayed discourse. The shell decides
    /// between native share and clipboard copy.
    pub fn share_link(&self) -> Option<String> {
        match &self.screen {
            Screen::DiscourseDetail { id } => Some(share_url(
                self.history.current().url.as_str(),
                *id,
                self.store.language(),
            )),
            _ => None,
        }
    }

    // ===== Language =====

    /// Persist a new language and restart: the content store and all
    /// derived state are rebuilt, the screen returns to Home, and history
    /// starts over. Records are language-specific, so this is a deliberate
    /// full-restart policy rather than a live re-render.
    pub async fn set_language(&mut self, language: Language) -> Result<()> {
        if language == self.store.language() {
            return Ok(());
        }
        self.prefs.set_language(language).await?;

        // The old store stays in place until the new batch resolves.
        let store = self.loader.load(language).await?;
        self.store = store;

        self.screen = Screen::Home;
        self.reading_context.clear();
        self.context_resolved = false;
        let url = strip_discourse_query(self.history.current().url.as_str());
        self.history = History::new(HistoryEntry::home(url));
        info!(%language, "language switched, store rebuilt");
        Ok(())
    }
}
