//! Configuration for the page enhancement layer.
//!
//! Every section has a usable default, so an empty document yields a fully
//! working [`Config`]. The config is usually embedded in the page as TOML:
//!
//! ```toml
//! [host]
//! content-selector = ".markdown-section"
//!
//! [outline]
//! min-headings = 4
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Selectors locating the elements rendered by the host page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct HostConfig {
    /// Container the theme toggle is appended to.
    pub nav_selector: String,

    /// Region holding the rendered markdown (paragraphs and headings).
    pub content_selector: String,

    /// Search box rendered by the host.
    pub search_selector: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            nav_selector: "nav".into(),
            content_selector: "main".into(),
            search_selector: r#"input[type="search"]"#.into(),
        }
    }
}

/// Polling policy used while waiting for an element the host renders late.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct RetryConfig {
    /// Delay between two lookups.
    pub interval_ms: u64,

    /// Give up after this many lookups.
    ///
    /// Leave it out to keep polling for the lifetime of the page.
    pub max_attempts: Option<u32>,
}

impl RetryConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            interval_ms: 100,
            max_attempts: Some(100),
        }
    }
}

/// Theme toggle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Whether to enable the theme toggle.
    pub enable: bool,

    /// Key of the persisted preference in the local storage.
    pub storage_key: String,

    /// Attribute set on the document element, e.g. `<html data-theme="dark">`.
    pub attribute: String,

    /// How long to keep looking for the navigation bar.
    pub retry: RetryConfig,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            enable: true,
            storage_key: "theme".into(),
            attribute: "data-theme".into(),
            retry: RetryConfig::default(),
        }
    }
}

/// Reading progress bar.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct ProgressConfig {
    pub enable: bool,

    /// CSS height of the bar.
    pub height: String,

    /// CSS color of the bar.
    pub color: String,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            enable: true,
            height: "3px".into(),
            color: "#42b983".into(),
        }
    }
}

/// Keyboard shortcut for the search box.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct SearchConfig {
    pub enable: bool,

    /// The search box is looked up exactly once, after this delay.
    pub init_delay_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enable: true,
            init_delay_ms: 1000,
        }
    }
}

/// Copy-link buttons next to the section headings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct SectionLinkConfig {
    pub enable: bool,

    /// How long the success icon stays visible after a copy.
    pub feedback_ms: u64,
}

impl Default for SectionLinkConfig {
    fn default() -> Self {
        Self {
            enable: true,
            feedback_ms: 2000,
        }
    }
}

/// In-page table of contents.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct OutlineConfig {
    pub enable: bool,

    /// Pages with fewer level-2/3 headings get no outline.
    pub min_headings: usize,

    /// Caption displayed above the outline entries.
    pub title: String,

    /// How long to wait for the content region on startup.
    pub retry: RetryConfig,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            enable: true,
            min_headings: 3,
            title: "On this page".into(),
            retry: RetryConfig {
                interval_ms: 500,
                max_attempts: Some(20),
            },
        }
    }
}

/// Animated scrolling for in-page anchors.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct SmoothScrollConfig {
    pub enable: bool,

    /// Height of the fixed header the target must not end up under.
    pub header_offset: f64,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            enable: true,
            header_offset: 80.0,
        }
    }
}

/// Console-only usage records.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct UsageConfig {
    pub enable: bool,
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self { enable: true }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct DiagnosticsConfig {
    /// Resources taking longer than this to load are reported.
    pub slow_resource_ms: f64,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            slow_resource_ms: 1000.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct LogConfig {
    /// Specify the max log level.
    pub max_level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            max_level: "info".into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    pub host: HostConfig,
    pub theme: ThemeConfig,
    pub progress: ProgressConfig,
    pub search: SearchConfig,
    pub section_links: SectionLinkConfig,
    pub outline: OutlineConfig,
    pub smooth_scroll: SmoothScrollConfig,
    pub usage: UsageConfig,
    pub diagnostics: DiagnosticsConfig,
    pub log: LogConfig,
}

impl Config {
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Names of the components switched on, in start order.
    pub fn enabled_components(&self) -> Vec<&'static str> {
        [
            ("theme", self.theme.enable),
            ("progress", self.progress.enable),
            ("smooth-scroll", self.smooth_scroll.enable),
            ("search", self.search.enable),
            ("outline", self.outline.enable),
            ("section-links", self.section_links.enable),
            ("usage", self.usage.enable),
        ]
        .into_iter()
        .filter_map(|(name, enabled)| enabled.then_some(name))
        .collect()
    }
}
