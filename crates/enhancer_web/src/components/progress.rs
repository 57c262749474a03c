use crate::component::{Component, ComponentId};
use crate::error::StartError;
use crate::page::{listen, request_frame, Page};
use enhancer_core::{Error, Mount, ProgressIndicator};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug)]
pub struct ProgressComponent {
    indicator: Rc<RefCell<ProgressIndicator>>,
}

impl ProgressComponent {
    pub fn new(indicator: Rc<RefCell<ProgressIndicator>>) -> Self {
        Self { indicator }
    }

    fn on_scroll(self: &Rc<Self>, page: &Page) {
        if !self.indicator.borrow_mut().on_scroll() {
            return;
        }

        let this = Rc::clone(self);
        let frame_page = page.clone();
        let scheduled = request_frame(&page.window, move || {
            this.indicator.borrow_mut().on_frame(&frame_page.dom);
        });
        if let Err(e) = scheduled {
            tracing::debug!(error = %e, "No animation frame, updating now");
            self.indicator.borrow_mut().on_frame(&page.dom);
        }
    }
}

impl Component for ProgressComponent {
    fn id(&self) -> ComponentId {
        "progress"
    }

    fn start(self: Rc<Self>, page: &Page) -> Result<(), StartError> {
        if let Mount::MissingContainer = self.indicator.borrow().mount(&page.dom) {
            return Err(Error::MissingHostElement("body".into()).into());
        }
        self.indicator.borrow().update(&page.dom);

        for event in ["scroll", "resize"] {
            let this = Rc::clone(&self);
            let listener_page = page.clone();
            listen(&page.window, event, move |_| this.on_scroll(&listener_page))?;
        }

        Ok(())
    }
}
