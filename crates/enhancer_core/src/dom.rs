//! The host document and browser services, as seen by the components.
//!
//! The components never touch a concrete DOM. The page binding implements
//! these traits on top of `web-sys`, the tests implement them in memory.

use crate::error::Result;
use std::time::Duration;

/// Scroll geometry of the document at a given moment.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollMetrics {
    /// Distance scrolled from the top.
    pub scroll_top: f64,
    /// Full height of the document.
    pub scroll_height: f64,
    /// Height of the visible area.
    pub viewport_height: f64,
}

impl ScrollMetrics {
    /// Fraction of the document scrolled so far, in percent.
    ///
    /// Always within `[0, 100]`. A document that fits in the viewport has
    /// nothing to scroll and reports 0.
    pub fn percent(&self) -> f64 {
        let scrollable = self.scroll_height - self.viewport_height;
        if scrollable.is_nan() || scrollable <= 0.0 {
            return 0.0;
        }
        let percent = self.scroll_top / scrollable * 100.0;
        if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, 100.0)
        }
    }
}

/// The parts of `window.location` the components need.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// Scheme, host and port, e.g. `https://example.com`.
    pub origin: String,
    /// Path without query or fragment, e.g. `/blog/post`.
    pub pathname: String,
    /// Fragment including the leading `#`, or empty.
    pub hash: String,
}

impl Location {
    /// Absolute URL pointing at the element with the given id on this page.
    pub fn with_fragment(&self, id: &str) -> String {
        format!("{}{}#{id}", self.origin, self.pathname)
    }
}

/// Result of inserting a singleton element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mount<N> {
    /// The element was created by this call.
    Inserted(N),
    /// An earlier call already created it; nothing was changed.
    AlreadyPresent(N),
    /// The host element it goes into does not exist (yet), or the document
    /// refused to create the element.
    MissingContainer,
}

impl<N> Mount<N> {
    pub fn node(self) -> Option<N> {
        match self {
            Self::Inserted(node) | Self::AlreadyPresent(node) => Some(node),
            Self::MissingContainer => None,
        }
    }
}

/// Read and mutate access to the live document.
///
/// Mutations are infallible from the caller's point of view: a failing
/// mutation leaves the document as it was, which is always acceptable for an
/// enhancement.
pub trait Dom {
    type Node: Clone;

    /// The `<html>` element.
    fn document_element(&self) -> Option<Self::Node>;

    fn body(&self) -> Option<Self::Node>;

    /// First element in the document matching the CSS selector.
    fn query(&self, selector: &str) -> Option<Self::Node>;

    /// First descendant of `scope` matching the CSS selector.
    fn query_in(&self, scope: &Self::Node, selector: &str) -> Option<Self::Node>;

    /// All descendants of `scope` matching the CSS selector, in document order.
    fn query_all_in(&self, scope: &Self::Node, selector: &str) -> Vec<Self::Node>;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    fn create_element(&self, tag: &str) -> Option<Self::Node>;

    /// Lowercase tag name.
    fn tag_name(&self, node: &Self::Node) -> String;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);

    fn text_content(&self, node: &Self::Node) -> String;

    fn set_text_content(&self, node: &Self::Node, text: &str);

    /// Sets one inline style property, e.g. `("width", "42%")`.
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);

    fn append_child(&self, parent: &Self::Node, child: &Self::Node);

    /// Inserts `node` as the next sibling of `reference`.
    fn insert_after(&self, reference: &Self::Node, node: &Self::Node);

    fn focus(&self, node: &Self::Node);

    fn blur(&self, node: &Self::Node);

    /// Whether `node` is the active element.
    fn is_focused(&self, node: &Self::Node) -> bool;

    fn scroll_metrics(&self) -> ScrollMetrics;

    /// Distance between the top of the viewport and the top of `node`.
    fn viewport_top(&self, node: &Self::Node) -> f64;

    /// Animates the viewport to the absolute offset `top`.
    fn smooth_scroll_to(&self, top: f64);

    fn location(&self) -> Location;
}

/// Persisted key-value storage, e.g. `window.localStorage`.
pub trait PreferenceStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

/// System clipboard with the two copy mechanisms browsers offer.
#[async_trait::async_trait(?Send)]
pub trait Clipboard {
    /// Asynchronous clipboard API.
    async fn write_text(&self, text: &str) -> Result<()>;

    /// Synchronous selection-based copy used when the asynchronous API fails.
    fn legacy_copy(&self, text: &str) -> bool;
}

#[async_trait::async_trait(?Send)]
pub trait Timer {
    async fn sleep(&self, duration: Duration);
}
