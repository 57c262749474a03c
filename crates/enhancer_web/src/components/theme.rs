use crate::component::{Component, ComponentId};
use crate::error::{describe, StartError};
use crate::page::{listen, Page, WebStorage};
use enhancer_core::{wait_for, Dom, Mount, RetryPolicy, ThemeController};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, EventTarget, MediaQueryList, MediaQueryListEvent};

const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// The color-scheme query, or `None` when the browser has none.
///
/// A throwing `matchMedia` counts as no system preference.
pub fn color_scheme_query(queried: Result<Option<MediaQueryList>, JsValue>) -> Option<MediaQueryList> {
    queried.unwrap_or_else(|e| {
        tracing::debug!(error = %describe(&e), "matchMedia failed");
        None
    })
}

#[derive(Debug)]
pub struct ThemeComponent {
    controller: Rc<RefCell<ThemeController<WebStorage>>>,
    nav_selector: String,
    retry: RetryPolicy,
}

impl ThemeComponent {
    pub fn new(
        controller: Rc<RefCell<ThemeController<WebStorage>>>,
        nav_selector: String,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            controller,
            nav_selector,
            retry,
        }
    }

    /// Follows the `change` events of the color-scheme query `signal`.
    pub fn follow_system(self: &Rc<Self>, page: &Page, signal: &EventTarget) -> Result<(), StartError> {
        let this = Rc::clone(self);
        let page = page.clone();
        listen(signal, "change", move |event| {
            let Some(event) = event.dyn_ref::<MediaQueryListEvent>() else {
                return;
            };
            this.controller
                .borrow_mut()
                .on_system_change(&page.dom, event.matches());
        })
    }

    async fn insert_toggle(self: Rc<Self>, page: Page) {
        let found = wait_for(&page.timer, &self.retry, "navigation bar", || {
            page.dom.query(&self.nav_selector)
        })
        .await;
        if let Err(e) = found {
            tracing::warn!(error = %e, "Theme toggle not inserted");
            return;
        }

        let mounted = self
            .controller
            .borrow()
            .mount_toggle(&page.dom, &self.nav_selector);
        match mounted {
            Mount::Inserted(button) => {
                if let Err(e) = self.bind_toggle(&page, &button) {
                    tracing::error!(error = %e, "Failed to bind the theme toggle");
                }
            }
            Mount::AlreadyPresent(_) => {}
            Mount::MissingContainer => {
                tracing::warn!(selector = %self.nav_selector, "Navigation bar disappeared");
            }
        }
    }

    fn bind_toggle(self: &Rc<Self>, page: &Page, button: &Element) -> Result<(), StartError> {
        let this = Rc::clone(self);
        let page = page.clone();
        listen(button, "click", move |_| {
            this.controller.borrow_mut().toggle(&page.dom);
        })
    }
}

impl Component for ThemeComponent {
    fn id(&self) -> ComponentId {
        "theme"
    }

    fn start(self: Rc<Self>, page: &Page) -> Result<(), StartError> {
        let media = color_scheme_query(page.window.match_media(DARK_SCHEME_QUERY));
        let prefers_dark = media.as_ref().map(MediaQueryList::matches);
        self.controller.borrow_mut().init(&page.dom, prefers_dark);

        if let Some(media) = &media {
            self.follow_system(page, media)?;
        }

        wasm_bindgen_futures::spawn_local(self.insert_toggle(page.clone()));

        Ok(())
    }
}
