//! Animated scrolling for same-page anchor links.

use crate::dom::Dom;
use enhancer_config::SmoothScrollConfig;
use percent_encoding::percent_decode_str;
use std::borrow::Cow;

/// Extracts the target id from an in-page `href` such as `#usage`.
///
/// The bare `#` and links to other pages yield `None`.
pub fn fragment_target(href: &str) -> Option<Cow<'_, str>> {
    let fragment = href.strip_prefix('#').filter(|f| !f.is_empty())?;
    Some(percent_decode_str(fragment).decode_utf8_lossy())
}

#[derive(Debug, Clone)]
pub struct SmoothNavigator {
    header_offset: f64,
}

impl SmoothNavigator {
    pub fn new(config: &SmoothScrollConfig) -> Self {
        Self {
            header_offset: config.header_offset,
        }
    }

    /// Handles a click on a link with the given `href`.
    ///
    /// Returns `true` if the scroll was taken over and the browser's default
    /// navigation must be prevented. Unknown targets are left to the browser.
    pub fn on_anchor_click<D: Dom>(&self, dom: &D, href: &str) -> bool {
        let Some(id) = fragment_target(href) else {
            return false;
        };
        let Some(target) = dom.element_by_id(&id) else {
            tracing::debug!(%id, "Anchor target not found");
            return false;
        };

        let top = dom.viewport_top(&target) + dom.scroll_metrics().scroll_top - self.header_offset;
        dom.smooth_scroll_to(top.max(0.0));
        true
    }
}
