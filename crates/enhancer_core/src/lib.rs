//! Progressive enhancements for a server-rendered markdown viewer.
//!
//! Each component works on whatever the host page has rendered so far and
//! leaves the page untouched when its elements are missing. The components
//! only see the page through the traits in [`dom`], which keeps them testable
//! without a browser.
//!
//! # Modules
//!
//! - [`theme`] - Light/dark theme resolution and the toggle button
//! - [`storage`] - The persisted theme preference
//! - [`progress`] - Reading progress bar
//! - [`search`] - Keyboard shortcut for the search box
//! - [`section_link`] - Copy-link buttons on headings
//! - [`outline`] - In-page table of contents
//! - [`smooth_nav`] - Animated scrolling to in-page anchors
//! - [`usage`] - Console-only usage records
//! - [`diagnostics`] - Load timing and slow resources
//! - [`retry`] - Waiting for late host elements

pub mod diagnostics;
pub mod dom;
mod error;
pub mod outline;
pub mod progress;
pub mod retry;
pub mod search;
pub mod section_link;
pub mod slug;
pub mod smooth_nav;
pub mod storage;
pub mod theme;
pub mod usage;

#[cfg(test)]
mod testing;

pub use dom::{Clipboard, Dom, Location, Mount, PreferenceStorage, ScrollMetrics, Timer};
pub use error::{Error, Result};
pub use outline::{HeadingEntry, OutlineDocument, OutlineGenerator, OutlineOutcome};
pub use progress::ProgressIndicator;
pub use retry::{wait_for, RetryPolicy};
pub use search::{KeyAction, KeyPress, Platform, SearchEnhancer};
pub use section_link::{CopyOutcome, SectionLink, SectionLinker};
pub use slug::slugify;
pub use smooth_nav::SmoothNavigator;
pub use theme::{resolve_initial, Theme, ThemeController};
pub use usage::{UsageEvent, UsageObserver};
