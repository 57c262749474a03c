//! "Copy link to this section" buttons on the headings.

use crate::dom::{Clipboard, Dom, Timer};
use enhancer_config::SectionLinkConfig;
use std::time::Duration;

pub const LINK_CLASS: &str = "section-link";

const LINK_ICON: &str = "🔗";
const COPIED_ICON: &str = "✓";
const LINK_LABEL: &str = "Copy link to this section";

/// Headings that get a button.
pub const HEADING_SELECTOR: &str = "h2, h3";

/// A button attached by [`SectionLinker::decorate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionLink<N> {
    pub heading: N,
    pub button: N,
    pub id: String,
}

/// Which copy mechanism worked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The asynchronous clipboard API.
    Primary,
    /// The selection-based fallback.
    Fallback,
    /// Neither; no feedback is shown.
    Failed,
    /// The button still confirms an earlier copy; nothing was done.
    Skipped,
}

impl CopyOutcome {
    pub fn succeeded(self) -> bool {
        matches!(self, Self::Primary | Self::Fallback)
    }
}

/// Tries the clipboard API first and the legacy mechanism second.
pub async fn copy_text(clipboard: &impl Clipboard, text: &str) -> CopyOutcome {
    match clipboard.write_text(text).await {
        Ok(()) => CopyOutcome::Primary,
        Err(e) => {
            tracing::debug!(error = %e, "Falling back to legacy copy");
            if clipboard.legacy_copy(text) {
                CopyOutcome::Fallback
            } else {
                CopyOutcome::Failed
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct SectionLinker {
    feedback: Duration,
}

impl SectionLinker {
    pub fn new(config: &SectionLinkConfig) -> Self {
        Self {
            feedback: Duration::from_millis(config.feedback_ms),
        }
    }

    /// Attaches a button to every level-2/3 heading in `content` that has an
    /// id and no button yet.
    ///
    /// A heading whose content was replaced by the host gets a new button.
    /// Returns the new buttons only, so that events are bound exactly once.
    pub fn decorate<D: Dom>(&self, dom: &D, content: &D::Node) -> Vec<SectionLink<D::Node>> {
        let button_selector = format!(".{LINK_CLASS}");
        dom.query_all_in(content, HEADING_SELECTOR)
            .into_iter()
            .filter(|heading| dom.query_in(heading, &button_selector).is_none())
            .filter_map(|heading| {
                let id = dom.attribute(&heading, "id").filter(|id| !id.is_empty())?;

                let button = dom.create_element("button")?;
                dom.set_attribute(&button, "type", "button");
                dom.set_attribute(&button, "class", LINK_CLASS);
                dom.set_attribute(&button, "aria-label", LINK_LABEL);
                dom.set_attribute(&button, "title", LINK_LABEL);
                dom.set_text_content(&button, LINK_ICON);
                dom.set_style(&button, "margin-left", "0.4em");
                dom.set_style(&button, "border", "none");
                dom.set_style(&button, "background", "none");
                dom.set_style(&button, "cursor", "pointer");
                dom.set_style(&button, "transition", "opacity 0.2s");
                self.set_visible(dom, &button, false);

                dom.append_child(&heading, &button);

                Some(SectionLink {
                    heading,
                    button,
                    id,
                })
            })
            .collect()
    }

    /// Shows or hides a button without affecting the layout.
    pub fn set_visible<D: Dom>(&self, dom: &D, button: &D::Node, visible: bool) {
        dom.set_style(button, "opacity", if visible { "1" } else { "0" });
    }

    /// Copies the absolute URL of section `id` and confirms it on `button`.
    ///
    /// Clicks while the confirmation is showing are ignored, so that the
    /// earlier revert cannot cut the new confirmation short.
    pub async fn copy_link<D, C, T>(
        &self,
        dom: &D,
        clipboard: &C,
        timer: &T,
        button: &D::Node,
        id: &str,
    ) -> CopyOutcome
    where
        D: Dom,
        C: Clipboard,
        T: Timer,
    {
        if dom.text_content(button) == COPIED_ICON {
            return CopyOutcome::Skipped;
        }

        let url = dom.location().with_fragment(id);
        let outcome = copy_text(clipboard, &url).await;
        tracing::debug!(%url, ?outcome, "Copied section link");

        if outcome.succeeded() {
            dom.set_text_content(button, COPIED_ICON);
            dom.set_attribute(button, "aria-label", "Link copied");
            timer.sleep(self.feedback).await;
            dom.set_text_content(button, LINK_ICON);
            dom.set_attribute(button, "aria-label", LINK_LABEL);
        }

        outcome
    }
}

/// Text of a heading without the text of its copy button.
pub fn heading_text<D: Dom>(dom: &D, heading: &D::Node) -> String {
    let text = dom.text_content(heading);
    let text = match dom.query_in(heading, &format!(".{LINK_CLASS}")) {
        Some(button) => {
            let button_text = dom.text_content(&button);
            text.strip_suffix(button_text.as_str())
                .map(str::to_string)
                .unwrap_or(text)
        }
        None => text,
    };
    text.trim().to_string()
}
