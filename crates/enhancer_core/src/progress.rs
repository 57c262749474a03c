//! Reading progress bar pinned to the top of the viewport.

use crate::dom::{Dom, Mount};
use enhancer_config::ProgressConfig;

pub const PROGRESS_ID: &str = "reading-progress";

/// Coalesces scroll events into at most one bar update per animation frame.
#[derive(Debug)]
pub struct ProgressIndicator {
    height: String,
    color: String,
    frame_pending: bool,
}

impl ProgressIndicator {
    pub fn new(config: &ProgressConfig) -> Self {
        Self {
            height: config.height.clone(),
            color: config.color.clone(),
            frame_pending: false,
        }
    }

    /// Appends the bar to `<body>`.
    pub fn mount<D: Dom>(&self, dom: &D) -> Mount<D::Node> {
        if let Some(bar) = dom.element_by_id(PROGRESS_ID) {
            return Mount::AlreadyPresent(bar);
        }
        let Some(body) = dom.body() else {
            return Mount::MissingContainer;
        };

        let Some(bar) = dom.create_element("div") else {
            return Mount::MissingContainer;
        };
        dom.set_attribute(&bar, "id", PROGRESS_ID);
        dom.set_attribute(&bar, "role", "progressbar");
        dom.set_attribute(&bar, "aria-hidden", "true");
        for (property, value) in [
            ("position", "fixed"),
            ("top", "0"),
            ("left", "0"),
            ("z-index", "1000"),
            ("width", "0%"),
            ("height", self.height.as_str()),
            ("background", self.color.as_str()),
            ("transition", "width 50ms ease-out"),
            ("pointer-events", "none"),
        ] {
            dom.set_style(&bar, property, value);
        }
        dom.append_child(&body, &bar);

        Mount::Inserted(bar)
    }

    /// Records a scroll event.
    ///
    /// Returns `true` when the caller must request an animation frame, i.e.
    /// when no update is queued yet.
    pub fn on_scroll(&mut self) -> bool {
        if self.frame_pending {
            return false;
        }
        self.frame_pending = true;
        true
    }

    /// Runs the queued update. Returns the width applied, in percent.
    pub fn on_frame<D: Dom>(&mut self, dom: &D) -> f64 {
        self.frame_pending = false;
        self.update(dom)
    }

    /// Sets the bar width from the current scroll position.
    pub fn update<D: Dom>(&self, dom: &D) -> f64 {
        let percent = dom.scroll_metrics().percent();
        if let Some(bar) = dom.element_by_id(PROGRESS_ID) {
            dom.set_style(&bar, "width", &format!("{percent}%"));
        }
        percent
    }
}
