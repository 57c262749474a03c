use crate::component::{Component, ComponentId};
use crate::error::StartError;
use crate::page::{listen, Page};
use enhancer_core::{wait_for, KeyAction, KeyPress, Platform, RetryPolicy, SearchEnhancer};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;

#[derive(Debug)]
pub struct SearchComponent {
    selector: String,
    init_delay: Duration,
}

impl SearchComponent {
    pub fn new(selector: String, init_delay: Duration) -> Self {
        Self {
            selector,
            init_delay,
        }
    }

    async fn install(self: Rc<Self>, page: Page) {
        let platform = Platform::from_user_agent(&page.user_agent());
        let policy = RetryPolicy::once_after(self.init_delay);
        let attached = wait_for(&page.timer, &policy, "search box", || {
            SearchEnhancer::attach(&page.dom, &self.selector, platform)
        })
        .await;

        let enhancer = match attached {
            Ok(enhancer) => enhancer,
            Err(e) => {
                tracing::debug!(error = %e, "Search shortcut not installed");
                return;
            }
        };

        let listener_page = page.clone();
        let installed = listen(&page.document, "keydown", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let key = KeyPress {
                key: event.key(),
                ctrl: event.ctrl_key(),
                meta: event.meta_key(),
            };
            if enhancer.on_key(&listener_page.dom, &key) == KeyAction::FocusSearch {
                event.prevent_default();
            }
        });
        match installed {
            Ok(()) => tracing::debug!(?platform, "Search shortcut installed"),
            Err(e) => tracing::error!(error = %e, "Failed to install the search shortcut"),
        }
    }
}

impl Component for SearchComponent {
    fn id(&self) -> ComponentId {
        "search"
    }

    fn start(self: Rc<Self>, page: &Page) -> Result<(), StartError> {
        wasm_bindgen_futures::spawn_local(self.install(page.clone()));
        Ok(())
    }
}
