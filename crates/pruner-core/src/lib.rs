//! # Pruner Core
//!
//! Finds duplicate rows in a rendered playlist and removes them through the
//! host page's own contextual menus.
//!
//! The page is reached only through the [`HostPage`] capability trait, so the
//! same logic runs against a real browser tab (see `pruner-cdp`) or the
//! in-memory [`MemoryPage`].
//!
//! ```text
//! check_playlist_page ─► ensure_fully_loaded ─► scan ─► Remover (highest index first)
//! ```

mod batch;
mod error;
mod loader;
mod location;
pub mod memory;
mod message;
mod page;
mod remover;
mod rules;
mod scanner;
mod settings;
mod track;

pub use batch::{BatchResult, Pruner};
pub use error::{PageError, PrunerError};
pub use loader::{LoadReport, ensure_fully_loaded};
pub use location::is_playlist_url;
pub use memory::{MemoryFixture, MemoryPage, MemoryRow};
pub use message::{DuplicateView, Request, Response, ResponseBody, ScanSummary};
pub use page::{Control, HostPage, MenuEntry, RawRow, RowHandle, ScrollAlign};
pub use remover::{RemovalOutcome, Remover};
pub use rules::{ActionMatcher, PhraseMatcher, menu_item_text};
pub use scanner::{ScanResult, scan};
pub use settings::{MatchRules, Settings, Timing};
pub use track::{IdentityKey, Track, UNKNOWN_TITLE, normalize_text};
