use crate::component::{Component, ComponentId};
use crate::error::StartError;
use crate::page::{listen, Page};
use enhancer_core::SmoothNavigator;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event};

const IN_PAGE_LINK: &str = "a[href^='#']";

#[derive(Debug)]
pub struct SmoothScrollComponent {
    navigator: SmoothNavigator,
}

impl SmoothScrollComponent {
    pub fn new(navigator: SmoothNavigator) -> Self {
        Self { navigator }
    }
}

/// `href` of the in-page link the event happened in, if any.
fn clicked_href(event: &Event) -> Option<String> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let anchor = target.closest(IN_PAGE_LINK).ok().flatten()?;
    anchor.get_attribute("href")
}

impl Component for SmoothScrollComponent {
    fn id(&self) -> ComponentId {
        "smooth-scroll"
    }

    fn start(self: Rc<Self>, page: &Page) -> Result<(), StartError> {
        let listener_page = page.clone();
        listen(&page.document, "click", move |event| {
            let Some(href) = clicked_href(&event) else {
                return;
            };
            if self.navigator.on_anchor_click(&listener_page.dom, &href) {
                event.prevent_default();
            }
        })
    }
}
