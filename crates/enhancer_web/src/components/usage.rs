use crate::component::{Component, ComponentId};
use crate::error::StartError;
use crate::page::{listen, observe, Page};
use enhancer_core::{Dom, UsageObserver};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, MutationObserverInit};

#[derive(Debug)]
pub struct UsageComponent {
    observer: Rc<RefCell<UsageObserver>>,
    search_selector: String,
    theme_attribute: String,
}

impl UsageComponent {
    pub fn new(
        observer: Rc<RefCell<UsageObserver>>,
        search_selector: String,
        theme_attribute: String,
    ) -> Self {
        Self {
            observer,
            search_selector,
            theme_attribute,
        }
    }

    fn record_page_view(&self, page: &Page) {
        let location = page.dom.location();
        self.observer
            .borrow_mut()
            .record_page_view(&location.pathname, &location.hash);
    }

    fn watch_navigation(self: &Rc<Self>, page: &Page) -> Result<(), StartError> {
        for event in ["hashchange", "popstate"] {
            let this = Rc::clone(self);
            let listener_page = page.clone();
            listen(&page.window, event, move |_| this.record_page_view(&listener_page))?;
        }
        Ok(())
    }

    fn watch_search(self: &Rc<Self>, page: &Page) -> Result<(), StartError> {
        let this = Rc::clone(self);
        listen(&page.document, "keydown", move |event| {
            let in_search_box = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|element| element.matches(&this.search_selector).ok())
                .unwrap_or(false);
            if in_search_box {
                this.observer.borrow_mut().record_search_keystroke();
            }
        })
    }

    fn watch_theme(self: &Rc<Self>, page: &Page) -> Result<(), StartError> {
        let Some(root) = page.dom.document_element() else {
            return Ok(());
        };
        let options = MutationObserverInit::new();
        options.set_attributes(true);
        options.set_attribute_filter(&js_sys::Array::of1(&JsValue::from_str(
            &self.theme_attribute,
        )));

        let this = Rc::clone(self);
        let watched = root.clone();
        observe(&root, &options, move || {
            let theme = watched.get_attribute(&this.theme_attribute);
            this.observer.borrow_mut().record_theme_change(theme.as_deref());
        })?;
        Ok(())
    }
}

impl Component for UsageComponent {
    fn id(&self) -> ComponentId {
        "usage"
    }

    fn start(self: Rc<Self>, page: &Page) -> Result<(), StartError> {
        self.record_page_view(page);
        self.watch_navigation(page)?;
        self.watch_search(page)?;
        self.watch_theme(page)
    }
}
