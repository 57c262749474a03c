//! Light/dark theme resolution, application and the toggle button.

use crate::dom::{Dom, Mount, PreferenceStorage};
use crate::storage::PreferenceStore;
use enhancer_config::ThemeConfig;
use std::fmt;
use std::str::FromStr;

/// Id of the toggle button inserted into the navigation bar.
pub const TOGGLE_ID: &str = "theme-toggle";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Icon of the toggle button, announcing the theme a click switches to.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Self::Light => "🌙",
            Self::Dark => "☀️",
        }
    }

    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Light => "Switch to dark theme",
            Self::Dark => "Switch to light theme",
        }
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Picks the theme to start with: an explicit choice wins over the system
/// preference, which wins over [`Theme::Light`].
pub fn resolve_initial(stored: Option<Theme>, system_prefers_dark: Option<bool>) -> Theme {
    stored.unwrap_or(match system_prefers_dark {
        Some(true) => Theme::Dark,
        Some(false) | None => Theme::Light,
    })
}

/// Owns the effective theme for the lifetime of the page.
#[derive(Debug)]
pub struct ThemeController<S> {
    store: PreferenceStore<S>,
    attribute: String,
    current: Theme,
    /// Set once the user picked a theme, even if persisting it failed.
    explicit: bool,
}

impl<S: PreferenceStorage> ThemeController<S> {
    pub fn new(storage: S, config: &ThemeConfig) -> Self {
        Self {
            store: PreferenceStore::new(storage, config.storage_key.clone()),
            attribute: config.attribute.clone(),
            current: Theme::default(),
            explicit: false,
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Whether the user has chosen a theme, now or in an earlier visit.
    pub fn has_explicit_choice(&self) -> bool {
        self.explicit || self.store.load().is_some()
    }

    /// Resolves the starting theme and applies it to the document.
    ///
    /// Nothing is persisted: a theme derived from the system preference must
    /// keep following it.
    pub fn init<D: Dom>(&mut self, dom: &D, system_prefers_dark: Option<bool>) -> Theme {
        let stored = self.store.load();
        self.explicit = stored.is_some();
        let theme = resolve_initial(stored, system_prefers_dark);
        tracing::debug!(%theme, ?stored, ?system_prefers_dark, "Resolved initial theme");
        self.show(dom, theme);
        theme
    }

    /// Applies `theme` as the user's explicit choice and persists it.
    pub fn apply<D: Dom>(&mut self, dom: &D, theme: Theme) {
        self.explicit = true;
        self.show(dom, theme);
        if let Err(e) = self.store.save(theme) {
            tracing::debug!(error = %e, %theme, "Theme applies to this session only");
        }
    }

    /// Flips between light and dark.
    pub fn toggle<D: Dom>(&mut self, dom: &D) -> Theme {
        let next = self.current.toggled();
        self.apply(dom, next);
        tracing::info!(theme = %next, "Theme toggled");
        next
    }

    /// Follows a change of the system color scheme unless the user has made an
    /// explicit choice.
    ///
    /// Returns whether the theme was changed.
    pub fn on_system_change<D: Dom>(&mut self, dom: &D, prefers_dark: bool) -> bool {
        if self.has_explicit_choice() {
            tracing::debug!(prefers_dark, "Keeping the explicitly chosen theme");
            return false;
        }
        let theme = resolve_initial(None, Some(prefers_dark));
        self.show(dom, theme);
        true
    }

    /// Inserts the toggle button into the navigation bar found by `nav_selector`.
    pub fn mount_toggle<D: Dom>(&self, dom: &D, nav_selector: &str) -> Mount<D::Node> {
        if let Some(button) = dom.element_by_id(TOGGLE_ID) {
            self.render_toggle(dom, &button);
            return Mount::AlreadyPresent(button);
        }

        let Some(nav) = dom.query(nav_selector) else {
            return Mount::MissingContainer;
        };

        let Some(button) = dom.create_element("button") else {
            return Mount::MissingContainer;
        };
        dom.set_attribute(&button, "id", TOGGLE_ID);
        dom.set_attribute(&button, "class", "theme-toggle");
        dom.set_attribute(&button, "type", "button");
        self.render_toggle(dom, &button);
        dom.append_child(&nav, &button);

        Mount::Inserted(button)
    }

    fn show<D: Dom>(&mut self, dom: &D, theme: Theme) {
        self.current = theme;
        if let Some(root) = dom.document_element() {
            dom.set_attribute(&root, &self.attribute, theme.as_str());
        }
        if let Some(button) = dom.element_by_id(TOGGLE_ID) {
            self.render_toggle(dom, &button);
        }
    }

    fn render_toggle<D: Dom>(&self, dom: &D, button: &D::Node) {
        dom.set_text_content(button, self.current.toggle_icon());
        dom.set_attribute(button, "aria-label", self.current.toggle_label());
        dom.set_attribute(button, "title", self.current.toggle_label());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeDom, MemoryStorage, BODY, HTML};

    fn controller(storage: MemoryStorage) -> ThemeController<MemoryStorage> {
        ThemeController::new(storage, &ThemeConfig::default())
    }

    fn theme_attr(dom: &FakeDom) -> Option<String> {
        dom.attribute(&HTML, "data-theme")
    }

    #[test]
    fn test_resolve_initial() {
        use Theme::{Dark, Light};

        for stored in [None, Some(Light), Some(Dark)] {
            for system in [None, Some(false), Some(true)] {
                let expected = match (stored, system) {
                    (Some(theme), _) => theme,
                    (None, Some(true)) => Dark,
                    (None, _) => Light,
                };
                assert_eq!(resolve_initial(stored, system), expected);
                assert_eq!(resolve_initial(stored, system), resolve_initial(stored, system));
            }
        }
    }

    #[test]
    fn test_parse_theme() {
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
        assert_eq!("Dark".parse::<Theme>(), Err(()));
    }

    #[test]
    fn test_init_prefers_stored_theme() {
        let dom = FakeDom::default();
        let mut controller = controller(MemoryStorage::with_item("theme", "light"));
        assert_eq!(controller.init(&dom, Some(true)), Theme::Light);
        assert_eq!(theme_attr(&dom).as_deref(), Some("light"));
        assert!(controller.has_explicit_choice());
    }

    #[test]
    fn test_init_follows_system_without_persisting() {
        let dom = FakeDom::default();
        let mut controller = controller(MemoryStorage::default());
        assert_eq!(controller.init(&dom, Some(true)), Theme::Dark);
        assert_eq!(theme_attr(&dom).as_deref(), Some("dark"));
        assert!(!controller.has_explicit_choice());
        assert_eq!(controller.store.load(), None);
    }

    #[test]
    fn test_toggle_is_an_involution() {
        let dom = FakeDom::default();
        let mut controller = controller(MemoryStorage::default());
        controller.init(&dom, None);
        let before = theme_attr(&dom);

        assert_eq!(controller.toggle(&dom), Theme::Dark);
        assert_eq!(theme_attr(&dom).as_deref(), Some("dark"));
        assert_eq!(controller.store.load(), Some(Theme::Dark));

        assert_eq!(controller.toggle(&dom), Theme::Light);
        assert_eq!(theme_attr(&dom), before);
        assert_eq!(controller.store.load(), Some(Theme::Light));
    }

    #[test]
    fn test_toggle_without_storage_still_applies() {
        let dom = FakeDom::default();
        let mut controller = controller(MemoryStorage::unavailable());
        controller.init(&dom, Some(false));
        controller.toggle(&dom);
        assert_eq!(controller.current(), Theme::Dark);
        assert_eq!(theme_attr(&dom).as_deref(), Some("dark"));
    }

    #[test]
    fn test_system_change_without_explicit_choice() {
        let dom = FakeDom::default();
        let mut controller = controller(MemoryStorage::default());
        controller.init(&dom, Some(false));

        assert!(controller.on_system_change(&dom, true));
        assert_eq!(theme_attr(&dom).as_deref(), Some("dark"));
        assert!(controller.on_system_change(&dom, false));
        assert_eq!(theme_attr(&dom).as_deref(), Some("light"));
    }

    #[test]
    fn test_system_change_never_overrides_explicit_choice() {
        let dom = FakeDom::default();
        let mut controller = controller(MemoryStorage::default());
        controller.init(&dom, Some(false));
        controller.toggle(&dom);

        for prefers_dark in [false, true, false] {
            assert!(!controller.on_system_change(&dom, prefers_dark));
            assert_eq!(controller.current(), Theme::Dark);
            assert_eq!(theme_attr(&dom).as_deref(), Some("dark"));
        }
    }

    #[test]
    fn test_system_change_with_failing_storage_after_toggle() {
        let dom = FakeDom::default();
        let mut controller = controller(MemoryStorage::unavailable());
        controller.init(&dom, Some(true));
        controller.toggle(&dom);

        assert!(!controller.on_system_change(&dom, true));
        assert_eq!(controller.current(), Theme::Light);
    }

    #[test]
    fn test_mount_toggle_waits_for_nav() {
        let dom = FakeDom::default();
        let controller = controller(MemoryStorage::default());
        assert_eq!(controller.mount_toggle(&dom, "nav"), Mount::MissingContainer);

        let nav = dom.add(BODY, "nav", &[], "");
        let Mount::Inserted(button) = controller.mount_toggle(&dom, "nav") else {
            panic!("toggle not inserted");
        };
        assert_eq!(dom.children(nav), vec![button]);
        assert_eq!(dom.text_content(&button), Theme::Light.toggle_icon());
    }

    #[test]
    fn test_mount_toggle_is_idempotent() {
        let dom = FakeDom::default();
        dom.add(BODY, "nav", &[], "");
        let controller = controller(MemoryStorage::default());

        let first = controller.mount_toggle(&dom, "nav").node();
        let second = controller.mount_toggle(&dom, "nav");
        assert_eq!(second, Mount::AlreadyPresent(first.unwrap()));
        assert_eq!(dom.count("#theme-toggle"), 1);
    }

    #[test]
    fn test_toggle_updates_button() {
        let dom = FakeDom::default();
        dom.add(BODY, "nav", &[], "");
        let mut controller = controller(MemoryStorage::default());
        controller.init(&dom, None);
        let button = controller.mount_toggle(&dom, "nav").node().unwrap();

        controller.toggle(&dom);
        assert_eq!(dom.text_content(&button), "☀️");
        assert_eq!(
            dom.attribute(&button, "aria-label").as_deref(),
            Some("Switch to light theme")
        );
    }
}
