//! The browser side of the host traits.

use crate::error::{describe, StartError};
use enhancer_core::{Clipboard, Dom, Error, Location, PreferenceStorage, Result, ScrollMetrics, Timer};
use js_sys::{Function, Promise, Reflect};
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlDocument, HtmlElement,
    HtmlTextAreaElement, MutationObserver, MutationObserverInit, Node, ScrollBehavior,
    ScrollToOptions, Storage, Window,
};

/// Everything a component needs from the browser.
#[derive(Debug, Clone)]
pub struct Page {
    pub window: Window,
    pub document: Document,
    pub dom: WebDom,
    pub clipboard: WebClipboard,
    pub timer: WebTimer,
}

impl Page {
    pub fn new() -> std::result::Result<Self, StartError> {
        let window = web_sys::window().ok_or(StartError::NoWindow)?;
        let document = window.document().ok_or(StartError::NoDocument)?;
        Ok(Self {
            dom: WebDom {
                window: window.clone(),
                document: document.clone(),
            },
            clipboard: WebClipboard {
                window: window.clone(),
                document: document.clone(),
            },
            timer: WebTimer {
                window: window.clone(),
            },
            window,
            document,
        })
    }

    pub fn storage(&self) -> WebStorage {
        WebStorage {
            window: self.window.clone(),
        }
    }

    /// The user agent string, empty if the browser hides it.
    pub fn user_agent(&self) -> String {
        self.window.navigator().user_agent().unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct WebDom {
    window: Window,
    document: Document,
}

impl Dom for WebDom {
    type Node = Element;

    fn document_element(&self) -> Option<Element> {
        self.document.document_element()
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).unwrap_or_else(|e| {
            tracing::debug!(selector, error = %describe(&e), "Invalid selector");
            None
        })
    }

    fn query_in(&self, scope: &Element, selector: &str) -> Option<Element> {
        scope.query_selector(selector).ok().flatten()
    }

    fn query_all_in(&self, scope: &Element, selector: &str) -> Vec<Element> {
        let Ok(list) = scope.query_selector_all(selector) else {
            tracing::debug!(selector, "Invalid selector");
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn create_element(&self, tag: &str) -> Option<Element> {
        self.document.create_element(tag).ok()
    }

    fn tag_name(&self, node: &Element) -> String {
        node.tag_name().to_ascii_lowercase()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        if let Err(e) = node.set_attribute(name, value) {
            tracing::debug!(name, error = %describe(&e), "Failed to set attribute");
        }
    }

    fn text_content(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text_content(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        let Some(element) = node.dyn_ref::<HtmlElement>() else {
            return;
        };
        if let Err(e) = element.style().set_property(property, value) {
            tracing::debug!(property, error = %describe(&e), "Failed to set style");
        }
    }

    fn append_child(&self, parent: &Element, child: &Element) {
        if let Err(e) = parent.append_child(child) {
            tracing::debug!(error = %describe(&e), "Failed to append child");
        }
    }

    fn insert_after(&self, reference: &Element, node: &Element) {
        if let Err(e) = reference.after_with_node_1(node) {
            tracing::debug!(error = %describe(&e), "Failed to insert node");
        }
    }

    fn focus(&self, node: &Element) {
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            let _ = element.focus();
        }
    }

    fn blur(&self, node: &Element) {
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            let _ = element.blur();
        }
    }

    fn is_focused(&self, node: &Element) -> bool {
        self.document.active_element().as_ref() == Some(node)
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: self.window.scroll_y().unwrap_or_default(),
            scroll_height: self
                .document
                .document_element()
                .map(|root| f64::from(root.scroll_height()))
                .unwrap_or_default(),
            viewport_height: self
                .window
                .inner_height()
                .ok()
                .and_then(|height| height.as_f64())
                .unwrap_or_default(),
        }
    }

    fn viewport_top(&self, node: &Element) -> f64 {
        node.get_bounding_client_rect().top()
    }

    fn smooth_scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn location(&self) -> Location {
        let location = self.window.location();
        Location {
            origin: location.origin().unwrap_or_default(),
            pathname: location.pathname().unwrap_or_default(),
            hash: location.hash().unwrap_or_default(),
        }
    }
}

/// `localStorage`, which may be missing or throw in private modes.
#[derive(Debug, Clone)]
pub struct WebStorage {
    window: Window,
}

impl WebStorage {
    fn storage(&self) -> Result<Storage> {
        self.window
            .local_storage()
            .map_err(|e| Error::StorageUnavailable(describe(&e)))?
            .ok_or_else(|| Error::StorageUnavailable("localStorage is disabled".into()))
    }
}

impl PreferenceStorage for WebStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| Error::StorageUnavailable(describe(&e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| Error::StorageUnavailable(describe(&e)))
    }
}

#[derive(Debug, Clone)]
pub struct WebClipboard {
    window: Window,
    document: Document,
}

#[async_trait::async_trait(?Send)]
impl Clipboard for WebClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        let unavailable = |e: JsValue| Error::ClipboardUnavailable(describe(&e));

        // Absent outside secure contexts, so it is looked up dynamically.
        let clipboard = Reflect::get(&self.window.navigator(), &JsValue::from_str("clipboard"))
            .map_err(unavailable)?;
        if clipboard.is_undefined() || clipboard.is_null() {
            return Err(Error::ClipboardUnavailable(
                "navigator.clipboard is not available".into(),
            ));
        }

        let write_text = Reflect::get(&clipboard, &JsValue::from_str("writeText"))
            .map_err(unavailable)?
            .dyn_into::<Function>()
            .map_err(unavailable)?;
        let promise = write_text
            .call1(&clipboard, &JsValue::from_str(text))
            .map_err(unavailable)?
            .dyn_into::<Promise>()
            .map_err(unavailable)?;
        JsFuture::from(promise).await.map_err(unavailable)?;

        Ok(())
    }

    fn legacy_copy(&self, text: &str) -> bool {
        let Some(body) = self.document.body() else {
            return false;
        };
        let Some(textarea) = self
            .document
            .create_element("textarea")
            .ok()
            .and_then(|element| element.dyn_into::<HtmlTextAreaElement>().ok())
        else {
            return false;
        };

        textarea.set_value(text);
        let _ = textarea.set_attribute("readonly", "");
        let style = textarea.style();
        for (property, value) in [("position", "fixed"), ("top", "0"), ("opacity", "0")] {
            let _ = style.set_property(property, value);
        }
        if body.append_child(&textarea).is_err() {
            return false;
        }

        textarea.select();
        let copied = self
            .document
            .dyn_ref::<HtmlDocument>()
            .and_then(|document| document.exec_command("copy").ok())
            .unwrap_or(false);
        textarea.remove();

        copied
    }
}

/// `setTimeout` wrapped in a promise.
#[derive(Debug, Clone)]
pub struct WebTimer {
    window: Window,
}

#[async_trait::async_trait(?Send)]
impl Timer for WebTimer {
    async fn sleep(&self, duration: Duration) {
        let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
        let promise = Promise::new(&mut |resolve, _reject| {
            if let Err(e) = self
                .window
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
            {
                tracing::debug!(error = %describe(&e), "setTimeout failed, not waiting");
                let _ = resolve.call0(&JsValue::UNDEFINED);
            }
        });
        let _ = JsFuture::from(promise).await;
    }
}

/// Adds an event listener that stays installed for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> std::result::Result<(), StartError>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Calls `handler` after every batch of mutations below `target`.
pub fn observe<F>(
    target: &Node,
    options: &MutationObserverInit,
    mut handler: F,
) -> std::result::Result<MutationObserver, StartError>
where
    F: FnMut() + 'static,
{
    let closure = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
        move |_records: js_sys::Array, _observer: MutationObserver| handler(),
    );
    let observer = MutationObserver::new(closure.as_ref().unchecked_ref())?;
    observer.observe_with_options(target, options)?;
    closure.forget();
    Ok(observer)
}

/// Runs `callback` before the next repaint.
pub fn request_frame(
    window: &Window,
    callback: impl FnOnce() + 'static,
) -> std::result::Result<(), StartError> {
    let callback = Closure::once_into_js(callback);
    window.request_animation_frame(callback.unchecked_ref())?;
    Ok(())
}

/// Runs `callback` once the document is parsed.
pub fn on_ready(
    document: &Document,
    callback: impl FnOnce() + 'static,
) -> std::result::Result<(), StartError> {
    when_parsed(document, document.ready_state() == "loading", callback)
}

/// Runs `callback` now, or on the first `DOMContentLoaded` event of `target`
/// while the document is still `loading`.
pub fn when_parsed(
    target: &EventTarget,
    loading: bool,
    callback: impl FnOnce() + 'static,
) -> std::result::Result<(), StartError> {
    if !loading {
        callback();
        return Ok(());
    }

    let mut callback = Some(callback);
    listen(target, "DOMContentLoaded", move |_| {
        if let Some(callback) = callback.take() {
            callback();
        }
    })
}
