use crate::error::StartError;
use crate::page::Page;
use std::fmt::Debug;
use std::rc::Rc;

pub type ComponentId = &'static str;

/// A unit of enhancement started once the document is parsed.
///
/// `start` installs listeners and spawns whatever waiting the component needs,
/// then returns. A failure only disables this component.
pub trait Component: Debug {
    fn id(&self) -> ComponentId;

    fn start(self: Rc<Self>, page: &Page) -> Result<(), StartError>;
}

#[derive(Debug, Default)]
pub struct Registry {
    components: Vec<Rc<dyn Component>>,
}

impl Registry {
    pub fn register(&mut self, component: Rc<dyn Component>) {
        self.components.push(component);
    }

    pub fn ids(&self) -> Vec<ComponentId> {
        self.components.iter().map(|component| component.id()).collect()
    }

    /// Starts every registered component in order, returns how many started.
    pub fn start_all(&self, page: &Page) -> usize {
        let mut started = 0;
        for component in &self.components {
            match Rc::clone(component).start(page) {
                Ok(()) => {
                    tracing::debug!(id = component.id(), "Component started");
                    started += 1;
                }
                Err(e) => {
                    tracing::error!(id = component.id(), error = %e, "Failed to start component");
                }
            }
        }
        started
    }
}
