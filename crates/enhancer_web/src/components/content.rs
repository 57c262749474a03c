//! Outline and section links, kept in sync with the host's re-renders.

use crate::component::{Component, ComponentId};
use crate::error::StartError;
use crate::page::{listen, observe, Page};
use enhancer_core::{wait_for, Dom, OutlineGenerator, RetryPolicy, SectionLink, SectionLinker};
use std::rc::Rc;
use web_sys::{Element, MutationObserverInit};

#[derive(Debug)]
pub struct ContentComponent {
    content_selector: String,
    retry: RetryPolicy,
    outline: Option<OutlineGenerator>,
    links: Option<SectionLinker>,
}

impl ContentComponent {
    pub fn new(
        content_selector: String,
        retry: RetryPolicy,
        outline: Option<OutlineGenerator>,
        links: Option<SectionLinker>,
    ) -> Self {
        Self {
            content_selector,
            retry,
            outline,
            links,
        }
    }

    async fn watch(self: Rc<Self>, page: Page) {
        let found = wait_for(&page.timer, &self.retry, "content region", || {
            page.dom.query(&self.content_selector)
        })
        .await;
        if let Err(e) = found {
            tracing::warn!(error = %e, "Outline and section links disabled");
            return;
        }

        self.enhance(&page);

        let Some(body) = page.dom.body() else {
            return;
        };
        let options = MutationObserverInit::new();
        options.set_child_list(true);
        options.set_subtree(true);

        let this = Rc::clone(&self);
        let observer_page = page.clone();
        if let Err(e) = observe(&body, &options, move || this.enhance(&observer_page)) {
            tracing::warn!(error = %e, "Re-renders will not be followed");
        }
    }

    /// Brings the current render up to date. Running it again on an
    /// enhanced render changes nothing.
    fn enhance(&self, page: &Page) {
        let Some(content) = page.dom.query(&self.content_selector) else {
            return;
        };

        // Headings must have their ids before the links are attached.
        if let Some(outline) = &self.outline {
            outline.generate(&page.dom, &content);
        }

        if let Some(linker) = &self.links {
            for link in linker.decorate(&page.dom, &content) {
                if let Err(e) = bind_link(page, linker, &link) {
                    tracing::debug!(id = %link.id, error = %e, "Failed to bind section link");
                }
            }
        }
    }
}

fn bind_link(page: &Page, linker: &SectionLinker, link: &SectionLink<Element>) -> Result<(), StartError> {
    for (event, visible) in [("mouseenter", true), ("mouseleave", false)] {
        let (page, linker, button) = (page.clone(), linker.clone(), link.button.clone());
        listen(&link.heading, event, move |_| {
            linker.set_visible(&page.dom, &button, visible);
        })?;
    }

    let (page, linker, button, id) = (
        page.clone(),
        linker.clone(),
        link.button.clone(),
        link.id.clone(),
    );
    listen(&link.button, "click", move |event| {
        event.prevent_default();
        event.stop_propagation();
        let (page, linker, button, id) = (page.clone(), linker.clone(), button.clone(), id.clone());
        wasm_bindgen_futures::spawn_local(async move {
            linker
                .copy_link(&page.dom, &page.clipboard, &page.timer, &button, &id)
                .await;
        });
    })
}

impl Component for ContentComponent {
    fn id(&self) -> ComponentId {
        "content"
    }

    fn start(self: Rc<Self>, page: &Page) -> Result<(), StartError> {
        wasm_bindgen_futures::spawn_local(self.watch(page.clone()));
        Ok(())
    }
}
