//! Table of contents built from the rendered headings.
//!
//! The outline is rebuilt from scratch on every content render and is only
//! shown for pages with enough headings to be worth navigating.

use crate::dom::Dom;
use crate::section_link::{heading_text, HEADING_SELECTOR};
use crate::slug::SlugRegistry;
use enhancer_config::OutlineConfig;

pub const OUTLINE_ID: &str = "page-outline";

/// Indentation of level-3 entries relative to level-2 ones.
const NESTED_INDENT: &str = "1.25em";

/// A level-2 or level-3 heading of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingEntry {
    pub id: String,
    pub level: u8,
    pub text: String,
}

/// Headings in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineDocument {
    pub entries: Vec<HeadingEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineOutcome<N> {
    Inserted { block: N, outline: OutlineDocument },
    /// The current render already shows an outline.
    AlreadyPresent,
    /// Fewer headings than the configured minimum.
    TooFewHeadings(usize),
    /// Neither a paragraph nor a level-1/2 heading to insert after.
    NoInsertionPoint,
}

#[derive(Debug, Clone)]
pub struct OutlineGenerator {
    min_headings: usize,
    title: String,
}

impl OutlineGenerator {
    pub fn new(config: &OutlineConfig) -> Self {
        Self {
            min_headings: config.min_headings,
            title: config.title.clone(),
        }
    }

    /// Builds the outline of `content` and inserts it after the first
    /// paragraph, or after the first level-1/2 heading if there is none.
    pub fn generate<D: Dom>(&self, dom: &D, content: &D::Node) -> OutlineOutcome<D::Node> {
        if dom.element_by_id(OUTLINE_ID).is_some() {
            return OutlineOutcome::AlreadyPresent;
        }

        let headings = dom.query_all_in(content, HEADING_SELECTOR);
        if headings.len() < self.min_headings {
            tracing::debug!(count = headings.len(), "Too few headings for an outline");
            return OutlineOutcome::TooFewHeadings(headings.len());
        }

        let outline = collect_headings(dom, &headings);

        let Some(anchor) = dom
            .query_in(content, "p")
            .or_else(|| dom.query_in(content, "h1, h2"))
        else {
            tracing::debug!("No insertion point for the outline");
            return OutlineOutcome::NoInsertionPoint;
        };

        let Some(block) = self.render(dom, &outline) else {
            return OutlineOutcome::NoInsertionPoint;
        };
        dom.insert_after(&anchor, &block);
        tracing::debug!(entries = outline.entries.len(), "Inserted outline");

        OutlineOutcome::Inserted { block, outline }
    }

    fn render<D: Dom>(&self, dom: &D, outline: &OutlineDocument) -> Option<D::Node> {
        let nav = dom.create_element("nav")?;
        dom.set_attribute(&nav, "id", OUTLINE_ID);
        dom.set_attribute(&nav, "class", "page-outline");
        dom.set_attribute(&nav, "aria-label", &self.title);

        let title = dom.create_element("div")?;
        dom.set_attribute(&title, "class", "page-outline-title");
        dom.set_text_content(&title, &self.title);
        dom.append_child(&nav, &title);

        let list = dom.create_element("ul")?;
        for entry in &outline.entries {
            let (Some(item), Some(link)) = (dom.create_element("li"), dom.create_element("a"))
            else {
                continue;
            };
            dom.set_attribute(&item, "class", &format!("outline-h{}", entry.level));
            if entry.level > 2 {
                dom.set_style(&item, "padding-left", NESTED_INDENT);
            }

            dom.set_attribute(&link, "href", &format!("#{}", entry.id));
            dom.set_text_content(&link, &entry.text);

            dom.append_child(&item, &link);
            dom.append_child(&list, &item);
        }
        dom.append_child(&nav, &list);

        Some(nav)
    }
}

/// Reads the headings, giving an id to those without one.
///
/// Existing ids are kept as they are. Generated ones never collide with an id
/// already used in the document.
pub fn collect_headings<D: Dom>(dom: &D, headings: &[D::Node]) -> OutlineDocument {
    let mut registry = SlugRegistry::default();
    for heading in headings {
        if let Some(id) = dom.attribute(heading, "id").filter(|id| !id.is_empty()) {
            registry.reserve(&id);
        }
    }

    let entries = headings
        .iter()
        .map(|heading| {
            let text = heading_text(dom, heading);
            let level = match dom.tag_name(heading).as_str() {
                "h3" => 3,
                _ => 2,
            };
            let id = match dom.attribute(heading, "id").filter(|id| !id.is_empty()) {
                Some(id) => id,
                None => {
                    let id = registry.unique(&text, |candidate| dom.element_by_id(candidate).is_some());
                    dom.set_attribute(heading, "id", &id);
                    id
                }
            };
            HeadingEntry { id, level, text }
        })
        .collect();

    OutlineDocument { entries }
}
