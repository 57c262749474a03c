//! Keyboard shortcut focusing the host's search box.

use crate::dom::Dom;

/// Operating system family, deciding which modifier the shortcut uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Apple,
    Other,
}

impl Platform {
    pub fn from_user_agent(user_agent: &str) -> Self {
        const APPLE: [&str; 4] = ["Macintosh", "Mac OS", "iPhone", "iPad"];
        if APPLE.iter().any(|marker| user_agent.contains(marker)) {
            Self::Apple
        } else {
            Self::Other
        }
    }

    fn shortcut_hint(self) -> &'static str {
        match self {
            Self::Apple => "⌘K",
            Self::Other => "Ctrl+K",
        }
    }
}

/// The fields of a `keydown` event the shortcut looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
}

/// What happened in response to a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// The search box was focused; the default action must be prevented.
    FocusSearch,
    /// The search box lost focus.
    BlurSearch,
    Ignore,
}

#[derive(Debug)]
pub struct SearchEnhancer<N> {
    input: N,
    platform: Platform,
}

impl<N: Clone> SearchEnhancer<N> {
    /// Enhances the search box found by `selector`.
    ///
    /// Returns `None` when the host did not render one; the shortcut is then
    /// never installed.
    pub fn attach<D: Dom<Node = N>>(dom: &D, selector: &str, platform: Platform) -> Option<Self> {
        let input = dom.query(selector)?;
        let this = Self { input, platform };
        this.update_placeholder(dom);
        Some(this)
    }

    pub fn input(&self) -> &N {
        &self.input
    }

    /// Mentions the shortcut in the placeholder, once.
    fn update_placeholder<D: Dom<Node = N>>(&self, dom: &D) {
        let hint = self.platform.shortcut_hint();
        let current = dom.attribute(&self.input, "placeholder").unwrap_or_default();
        if current.contains(hint) {
            return;
        }
        let placeholder = if current.trim().is_empty() {
            format!("Search ({hint})")
        } else {
            format!("{} ({hint})", current.trim())
        };
        dom.set_attribute(&self.input, "placeholder", &placeholder);
    }

    fn is_shortcut(&self, key: &KeyPress) -> bool {
        let modifier = match self.platform {
            Platform::Apple => key.meta,
            Platform::Other => key.ctrl,
        };
        modifier && key.key.eq_ignore_ascii_case("k")
    }

    pub fn on_key<D: Dom<Node = N>>(&self, dom: &D, key: &KeyPress) -> KeyAction {
        if self.is_shortcut(key) {
            dom.focus(&self.input);
            KeyAction::FocusSearch
        } else if key.key == "Escape" && dom.is_focused(&self.input) {
            dom.blur(&self.input);
            KeyAction::BlurSearch
        } else {
            KeyAction::Ignore
        }
    }
}
