use crate::component::{Component, ComponentId};
use crate::error::StartError;
use crate::page::{listen, Page};
use enhancer_core::diagnostics::{self, LoadTiming, ResourceTiming};
use enhancer_core::Timer;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::JsCast;
use web_sys::PerformanceEntry;

#[derive(Debug)]
pub struct DiagnosticsComponent {
    slow_resource_ms: f64,
}

impl DiagnosticsComponent {
    pub fn new(slow_resource_ms: f64) -> Self {
        Self { slow_resource_ms }
    }

    async fn report(self: Rc<Self>, page: Page) {
        // `loadEventEnd` is only set once the load handlers have returned.
        page.timer.sleep(Duration::ZERO).await;

        let Some(performance) = page.window.performance() else {
            tracing::debug!("Performance API unavailable");
            return;
        };

        let timing = performance.timing();
        let start = timing.navigation_start();
        let load = LoadTiming {
            dom_content_loaded_ms: (timing.dom_content_loaded_event_end() - start).max(0.0),
            load_ms: (timing.load_event_end() - start).max(0.0),
        };

        let resources: Vec<_> = performance
            .get_entries_by_type("resource")
            .iter()
            .filter_map(|entry| entry.dyn_into::<PerformanceEntry>().ok())
            .map(|entry| ResourceTiming {
                name: entry.name(),
                duration_ms: entry.duration(),
            })
            .collect();

        diagnostics::report(&load, &resources, self.slow_resource_ms);
    }
}

impl Component for DiagnosticsComponent {
    fn id(&self) -> ComponentId {
        "diagnostics"
    }

    fn start(self: Rc<Self>, page: &Page) -> Result<(), StartError> {
        if page.document.ready_state() == "complete" {
            wasm_bindgen_futures::spawn_local(self.report(page.clone()));
            return Ok(());
        }

        let mut this = Some(self);
        let listener_page = page.clone();
        listen(&page.window, "load", move |_| {
            if let Some(this) = this.take() {
                wasm_bindgen_futures::spawn_local(this.report(listener_page.clone()));
            }
        })
    }
}
