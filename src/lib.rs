//! Offline-first reader core for the Vachanamrut corpus
//!
//! The portable core of a progressive reader app: a fixed corpus of
//! numbered discourses in named sections, two languages, offline caching
//! with version-bump invalidation, deep links, a single bookmark, and a
//! favorites set. The host shell renders; this crate decides.
//!
//! - [`content`]: immutable per-language content store and batch loader
//! - [`cache`]: the installable worker owning the versioned asset cache
//! - [`nav`]: screen state machine, history, deep links, reading position
//! - [`storage`]: durable language/bookmark/favorites slots
//! - [`fetch`]: the network seam everything above is tested through

pub mod cache;
pub mod content;
pub mod error;
pub mod fetch;
pub mod nav;
pub mod storage;

pub use error::{ReaderError, Result};
