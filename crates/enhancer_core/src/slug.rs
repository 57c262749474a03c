//! URL-safe identifiers generated from heading text.

use std::collections::HashMap;

/// Identifier used when the heading text has no alphanumeric character at all.
const FALLBACK_SLUG: &str = "section";

/// Converts heading text to a URL-safe slug.
///
/// 1. Convert to lowercase
/// 2. Remove all characters except alphanumerics, whitespace and hyphens
/// 3. Turn whitespace runs into single hyphens
/// 4. Collapse repeated hyphens and trim them from both ends
///
/// # Example
///
/// ```
/// use enhancer_core::slug::slugify;
///
/// assert_eq!(slugify("Hello, World!! 2024"), "hello-world-2024");
/// assert_eq!(slugify("  API -- Reference "), "api-reference");
/// ```
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() {
                Some(c)
            } else if c.is_whitespace() || c == '-' {
                Some('-')
            } else {
                None
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Hands out slugs that are unique among the ones it has seen.
///
/// The second "Usage" heading becomes `usage-1`, the third `usage-2`.
#[derive(Debug, Default)]
pub struct SlugRegistry {
    used: HashMap<String, usize>,
}

impl SlugRegistry {
    /// Marks an identifier already present in the document as taken.
    pub fn reserve(&mut self, id: &str) {
        self.used.entry(id.to_string()).or_insert(0);
    }

    /// Returns a fresh identifier for `text`.
    ///
    /// `taken` reports identifiers the registry does not know about, such as
    /// ids of unrelated elements elsewhere in the document.
    pub fn unique(&mut self, text: &str, taken: impl Fn(&str) -> bool) -> String {
        let mut base = slugify(text);
        if base.is_empty() {
            base = FALLBACK_SLUG.to_string();
        }

        let mut candidate = base.clone();
        let mut suffix = self.used.get(&base).map_or(0, |n| n + 1);
        if suffix > 0 {
            candidate = format!("{base}-{suffix}");
        }
        while self.used.contains_key(&candidate) || taken(&candidate) {
            suffix += 1;
            candidate = format!("{base}-{suffix}");
        }

        self.used.insert(base, suffix);
        self.used.entry(candidate.clone()).or_insert(0);
        candidate
    }
}
