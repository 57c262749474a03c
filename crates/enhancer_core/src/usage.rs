//! Console-only usage records.
//!
//! Nothing here leaves the browser: events go to the `usage` log target and
//! to an in-memory list that lives as long as the page.

use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageEvent {
    PageView { path: String },
    SearchStarted,
    ThemeChanged { theme: String },
}

#[derive(Debug, Default)]
pub struct UsageObserver {
    seen_pages: HashSet<String>,
    searched: bool,
    events: Vec<UsageEvent>,
}

impl UsageObserver {
    /// Records the first visit of `pathname` + `hash` in this session.
    ///
    /// Returns whether the visit was new.
    pub fn record_page_view(&mut self, pathname: &str, hash: &str) -> bool {
        let path = format!("{pathname}{hash}");
        if !self.seen_pages.insert(path.clone()) {
            return false;
        }
        tracing::info!(target: "usage", %path, "Page view");
        self.events.push(UsageEvent::PageView { path });
        true
    }

    /// Records the first keystroke in the search box.
    pub fn record_search_keystroke(&mut self) -> bool {
        if std::mem::replace(&mut self.searched, true) {
            return false;
        }
        tracing::info!(target: "usage", "Search used");
        self.events.push(UsageEvent::SearchStarted);
        true
    }

    /// Records a mutation of the theme attribute.
    pub fn record_theme_change(&mut self, theme: Option<&str>) {
        let theme = theme.unwrap_or_default().to_string();
        tracing::info!(target: "usage", %theme, "Theme changed");
        self.events.push(UsageEvent::ThemeChanged { theme });
    }

    pub fn events(&self) -> &[UsageEvent] {
        &self.events
    }
}
