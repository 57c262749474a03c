//! The root controller.

use crate::component::Registry;
use crate::components::{
    ContentComponent, DiagnosticsComponent, ProgressComponent, SearchComponent,
    SmoothScrollComponent, ThemeComponent, UsageComponent,
};
use crate::page::{Page, WebStorage};
use enhancer_config::Config;
use enhancer_core::{
    OutlineGenerator, ProgressIndicator, RetryPolicy, SectionLinker, SmoothNavigator,
    ThemeController, UsageObserver,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Owns the per-page session state and the enabled components.
#[derive(Debug)]
pub struct Enhancer {
    page: Page,
    theme: Rc<RefCell<ThemeController<WebStorage>>>,
    progress: Rc<RefCell<ProgressIndicator>>,
    usage: Rc<RefCell<UsageObserver>>,
    registry: Registry,
}

impl Enhancer {
    pub fn new(page: Page, config: &Config) -> Self {
        let theme = Rc::new(RefCell::new(ThemeController::new(
            page.storage(),
            &config.theme,
        )));
        let progress = Rc::new(RefCell::new(ProgressIndicator::new(&config.progress)));
        let usage = Rc::new(RefCell::new(UsageObserver::default()));

        let mut enhancer = Self {
            page,
            theme,
            progress,
            usage,
            registry: Registry::default(),
        };
        enhancer.register_components(config);
        enhancer
    }

    fn register_components(&mut self, config: &Config) {
        let host = &config.host;

        if config.theme.enable {
            self.registry.register(Rc::new(ThemeComponent::new(
                Rc::clone(&self.theme),
                host.nav_selector.clone(),
                RetryPolicy::from(&config.theme.retry),
            )));
        }

        if config.progress.enable {
            self.registry
                .register(Rc::new(ProgressComponent::new(Rc::clone(&self.progress))));
        }

        if config.smooth_scroll.enable {
            self.registry.register(Rc::new(SmoothScrollComponent::new(
                SmoothNavigator::new(&config.smooth_scroll),
            )));
        }

        if config.search.enable {
            self.registry.register(Rc::new(SearchComponent::new(
                host.search_selector.clone(),
                Duration::from_millis(config.search.init_delay_ms),
            )));
        }

        let outline = config
            .outline
            .enable
            .then(|| OutlineGenerator::new(&config.outline));
        let links = config
            .section_links
            .enable
            .then(|| SectionLinker::new(&config.section_links));
        if outline.is_some() || links.is_some() {
            self.registry.register(Rc::new(ContentComponent::new(
                host.content_selector.clone(),
                RetryPolicy::from(&config.outline.retry),
                outline,
                links,
            )));
        }

        if config.usage.enable {
            self.registry.register(Rc::new(UsageComponent::new(
                Rc::clone(&self.usage),
                host.search_selector.clone(),
                config.theme.attribute.clone(),
            )));
        }

        self.registry.register(Rc::new(DiagnosticsComponent::new(
            config.diagnostics.slow_resource_ms,
        )));
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Starts every registered component, returns how many started.
    pub fn start(&self) -> usize {
        let started = self.registry.start_all(&self.page);
        tracing::info!(
            started,
            registered = self.registry.ids().len(),
            "Page enhancements started"
        );
        started
    }
}
