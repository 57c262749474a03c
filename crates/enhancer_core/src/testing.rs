//! In-memory implementations of the host traits used by the unit tests.

use crate::dom::{Clipboard, Dom, Location, PreferenceStorage, ScrollMetrics, Timer};
use crate::error::{Error, Result};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

pub type NodeId = usize;

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    attributes: BTreeMap<String, String>,
    /// Text preceding the children.
    text: String,
    style: BTreeMap<String, String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

/// A tiny document tree supporting the selector subset the components use:
/// `tag`, `#id`, `.class`, `[attr]`, `[attr="value"]`, compounds of those and
/// comma-separated lists.
pub struct FakeDom {
    nodes: RefCell<Vec<NodeData>>,
    focused: Cell<Option<NodeId>>,
    metrics: Cell<ScrollMetrics>,
    viewport_tops: RefCell<HashMap<NodeId, f64>>,
    scrolls: RefCell<Vec<f64>>,
    location: RefCell<Location>,
}

pub const HTML: NodeId = 0;
pub const BODY: NodeId = 1;

impl Default for FakeDom {
    fn default() -> Self {
        let dom = Self {
            nodes: RefCell::new(vec![
                NodeData {
                    tag: "html".into(),
                    ..Default::default()
                },
                NodeData {
                    tag: "body".into(),
                    parent: Some(HTML),
                    ..Default::default()
                },
            ]),
            focused: Cell::new(None),
            metrics: Cell::new(ScrollMetrics::default()),
            viewport_tops: RefCell::new(HashMap::new()),
            scrolls: RefCell::new(Vec::new()),
            location: RefCell::new(Location {
                origin: "https://example.com".into(),
                pathname: "/".into(),
                hash: String::new(),
            }),
        };
        dom.nodes.borrow_mut()[HTML].children.push(BODY);
        dom
    }
}

impl FakeDom {
    /// Appends a new `<tag>` with the given attributes and text to `parent`.
    pub fn add(&self, parent: NodeId, tag: &str, attributes: &[(&str, &str)], text: &str) -> NodeId {
        let node = self.new_node(tag);
        {
            let mut nodes = self.nodes.borrow_mut();
            for (name, value) in attributes {
                nodes[node]
                    .attributes
                    .insert(name.to_string(), value.to_string());
            }
            nodes[node].text = text.to_string();
        }
        self.append_child(&parent, &node);
        node
    }

    /// Detached element, for tests that build the tree by hand.
    pub fn new_node(&self, tag: &str) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(NodeData {
            tag: tag.to_lowercase(),
            ..Default::default()
        });
        nodes.len() - 1
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes.borrow()[node].children.clone()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.borrow()[node].parent
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.nodes.borrow()[node].style.get(property).cloned()
    }

    pub fn count(&self, selector: &str) -> usize {
        self.query_all_in(&HTML, selector).len()
    }

    pub fn set_metrics(&self, metrics: ScrollMetrics) {
        self.metrics.set(metrics);
    }

    pub fn set_viewport_top(&self, node: NodeId, top: f64) {
        self.viewport_tops.borrow_mut().insert(node, top);
    }

    pub fn scrolls(&self) -> Vec<f64> {
        self.scrolls.borrow().clone()
    }

    pub fn set_location(&self, pathname: &str, hash: &str) {
        let mut location = self.location.borrow_mut();
        location.pathname = pathname.to_string();
        location.hash = hash.to_string();
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused.get()
    }

    fn detach(&self, node: NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(parent) = nodes[node].parent.take() {
            nodes[parent].children.retain(|&child| child != node);
        }
    }

    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = nodes[scope].children.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(nodes[node].children.iter().rev());
        }
        out
    }

    fn matches(&self, node: NodeId, selector: &str) -> bool {
        let nodes = self.nodes.borrow();
        let data = &nodes[node];
        selector
            .split(',')
            .map(Compound::parse)
            .any(|compound| compound.matches(data))
    }
}

#[derive(Debug, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, Option<String>)>,
}

impl Compound {
    fn parse(selector: &str) -> Self {
        fn ident(chars: &mut std::iter::Peekable<std::str::Chars>) -> String {
            let mut out = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    out.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            out
        }

        let mut compound = Self::default();
        let mut chars = selector.trim().chars().peekable();
        while let Some(&c) = chars.peek() {
            match c {
                '#' => {
                    chars.next();
                    compound.id = Some(ident(&mut chars));
                }
                '.' => {
                    chars.next();
                    compound.classes.push(ident(&mut chars));
                }
                '[' => {
                    chars.next();
                    let inner: String = chars.by_ref().take_while(|&c| c != ']').collect();
                    let attribute = match inner.split_once('=') {
                        Some((name, value)) => (
                            name.trim().to_string(),
                            Some(value.trim().trim_matches(|c| c == '"' || c == '\'').to_string()),
                        ),
                        None => (inner.trim().to_string(), None),
                    };
                    compound.attributes.push(attribute);
                }
                _ => {
                    let tag = ident(&mut chars);
                    if tag.is_empty() {
                        panic!("unsupported selector: {selector}");
                    }
                    compound.tag = Some(tag.to_lowercase());
                }
            }
        }
        compound
    }

    fn matches(&self, node: &NodeData) -> bool {
        if self.tag.as_ref().is_some_and(|tag| *tag != node.tag) {
            return false;
        }
        if self
            .id
            .as_ref()
            .is_some_and(|id| node.attributes.get("id") != Some(id))
        {
            return false;
        }
        let classes = node.attributes.get("class").cloned().unwrap_or_default();
        if !self
            .classes
            .iter()
            .all(|class| classes.split_whitespace().any(|c| c == class))
        {
            return false;
        }
        self.attributes
            .iter()
            .all(|(name, value)| match (node.attributes.get(name), value) {
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => actual == expected,
                (None, _) => false,
            })
    }
}

impl Dom for FakeDom {
    type Node = NodeId;

    fn document_element(&self) -> Option<NodeId> {
        Some(HTML)
    }

    fn body(&self) -> Option<NodeId> {
        Some(BODY)
    }

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.query_in(&HTML, selector)
    }

    fn query_in(&self, scope: &NodeId, selector: &str) -> Option<NodeId> {
        self.query_all_in(scope, selector).into_iter().next()
    }

    fn query_all_in(&self, scope: &NodeId, selector: &str) -> Vec<NodeId> {
        self.descendants(*scope)
            .into_iter()
            .filter(|&node| self.matches(node, selector))
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let nodes = self.nodes.borrow();
        self.descendants(HTML)
            .into_iter()
            .find(|&node| nodes[node].attributes.get("id").map(String::as_str) == Some(id))
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        Some(self.new_node(tag))
    }

    fn tag_name(&self, node: &NodeId) -> String {
        self.nodes.borrow()[*node].tag.clone()
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.nodes.borrow()[*node].attributes.get(name).cloned()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.nodes.borrow_mut()[*node]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn text_content(&self, node: &NodeId) -> String {
        let mut text = self.nodes.borrow()[*node].text.clone();
        for child in self.children(*node) {
            text.push_str(&self.text_content(&child));
        }
        text
    }

    fn set_text_content(&self, node: &NodeId, text: &str) {
        for child in self.children(*node) {
            self.detach(child);
        }
        self.nodes.borrow_mut()[*node].text = text.to_string();
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        self.nodes.borrow_mut()[*node]
            .style
            .insert(property.to_string(), value.to_string());
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        self.detach(*child);
        let mut nodes = self.nodes.borrow_mut();
        nodes[*parent].children.push(*child);
        nodes[*child].parent = Some(*parent);
    }

    fn insert_after(&self, reference: &NodeId, node: &NodeId) {
        self.detach(*node);
        let mut nodes = self.nodes.borrow_mut();
        let Some(parent) = nodes[*reference].parent else {
            return;
        };
        let index = nodes[parent]
            .children
            .iter()
            .position(|child| child == reference)
            .map_or(0, |i| i + 1);
        nodes[parent].children.insert(index, *node);
        nodes[*node].parent = Some(parent);
    }

    fn focus(&self, node: &NodeId) {
        self.focused.set(Some(*node));
    }

    fn blur(&self, node: &NodeId) {
        if self.focused.get() == Some(*node) {
            self.focused.set(None);
        }
    }

    fn is_focused(&self, node: &NodeId) -> bool {
        self.focused.get() == Some(*node)
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        self.metrics.get()
    }

    fn viewport_top(&self, node: &NodeId) -> f64 {
        self.viewport_tops
            .borrow()
            .get(node)
            .copied()
            .unwrap_or_default()
    }

    fn smooth_scroll_to(&self, top: f64) {
        self.scrolls.borrow_mut().push(top);
    }

    fn location(&self) -> Location {
        self.location.borrow().clone()
    }
}

/// `localStorage` stand-in, optionally failing every access.
#[derive(Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
    unavailable: bool,
}

impl MemoryStorage {
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::default();
        storage
            .items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }

    pub fn item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

impl PreferenceStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        if self.unavailable {
            return Err(Error::StorageUnavailable("SecurityError".into()));
        }
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if self.unavailable {
            return Err(Error::StorageUnavailable("QuotaExceededError".into()));
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Clipboard whose two copy paths can be switched off independently.
pub struct FakeClipboard {
    pub primary_works: bool,
    pub legacy_works: bool,
    copied: RefCell<Vec<String>>,
}

impl FakeClipboard {
    pub fn new(primary_works: bool, legacy_works: bool) -> Self {
        Self {
            primary_works,
            legacy_works,
            copied: RefCell::new(Vec::new()),
        }
    }

    pub fn copied(&self) -> Vec<String> {
        self.copied.borrow().clone()
    }
}

#[async_trait::async_trait(?Send)]
impl Clipboard for FakeClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        if !self.primary_works {
            return Err(Error::ClipboardUnavailable("NotAllowedError".into()));
        }
        self.copied.borrow_mut().push(text.to_string());
        Ok(())
    }

    fn legacy_copy(&self, text: &str) -> bool {
        if self.legacy_works {
            self.copied.borrow_mut().push(text.to_string());
        }
        self.legacy_works
    }
}

/// Timer that returns immediately and remembers every requested delay.
#[derive(Default)]
pub struct FakeTimer {
    sleeps: RefCell<Vec<Duration>>,
}

impl FakeTimer {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

#[async_trait::async_trait(?Send)]
impl Timer for FakeTimer {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selectors() {
        let dom = FakeDom::default();
        let main = dom.add(BODY, "main", &[("class", "content wide")], "");
        let h2 = dom.add(main, "h2", &[("id", "intro")], "Intro");
        let input = dom.add(BODY, "input", &[("type", "search")], "");

        assert_eq!(dom.query("main"), Some(main));
        assert_eq!(dom.query(".wide"), Some(main));
        assert_eq!(dom.query("main.content"), Some(main));
        assert_eq!(dom.query("#intro"), Some(h2));
        assert_eq!(dom.query("[id]"), Some(h2));
        assert_eq!(dom.query(r#"input[type="search"]"#), Some(input));
        assert_eq!(dom.query("input[type=text]"), None);
        assert_eq!(dom.query_all_in(&BODY, "h2, input"), vec![h2, input]);
    }

    #[test]
    fn test_tree_mutations() {
        let dom = FakeDom::default();
        let a = dom.add(BODY, "p", &[], "a");
        let c = dom.add(BODY, "p", &[], "c");
        let b = dom.new_node("p");
        dom.set_text_content(&b, "b");
        assert_eq!(dom.element_by_id("b"), None);

        dom.insert_after(&a, &b);
        assert_eq!(dom.children(BODY), vec![a, b, c]);
        assert_eq!(dom.text_content(&BODY), "abc");

        dom.set_text_content(&BODY, "gone");
        assert!(dom.children(BODY).is_empty());
    }
}
