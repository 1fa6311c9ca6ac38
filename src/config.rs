//! Configuration for layer composition and theme handling.
//!
//! Both structs deserialize from partial JSON (or JS objects on the web):
//! every missing field takes its default, so supplying a field replaces that
//! default outright and nothing else.

use crate::layers::catalog::{LABELS_KEY, ROADS_KEY, SENTINEL_KEY};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Errors raised while reading configuration.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// The input was not valid JSON for the expected shape.
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Options for [`LayerComposer::compose_onto`](crate::LayerComposer::compose_onto).
///
/// Fields are merged one by one over the defaults: a field that is missing,
/// `null`, or of the wrong type keeps its default without affecting the
/// others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCompositionOptions", rename_all = "camelCase")]
pub struct CompositionOptions {
    /// Start the layer control collapsed.
    pub collapsed_control: bool,
    /// Base layer shown initially. Unknown keys leave the map blank.
    pub default_base_key: String,
    /// Overlays shown initially, bottom first. Unknown keys are skipped.
    pub default_overlay_keys: Vec<String>,
    /// Replaces the widget's attribution prefix.
    pub attribution_prefix: String,
}

impl Default for CompositionOptions {
    fn default() -> Self {
        Self {
            collapsed_control: true,
            default_base_key: SENTINEL_KEY.to_string(),
            default_overlay_keys: vec![ROADS_KEY.to_string(), LABELS_KEY.to_string()],
            attribution_prefix: String::new(),
        }
    }
}

/// Untyped view of caller options; every field is `Null` when absent.
#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RawCompositionOptions {
    collapsed_control: Value,
    default_base_key: Value,
    #[serde(alias = "defaultOverlays")]
    default_overlay_keys: Value,
    attribution_prefix: Value,
}

/// Reads one option field, keeping `fallback` for `null` or a bad value.
fn merge_field<T: DeserializeOwned>(name: &str, value: Value, fallback: T) -> T {
    if value.is_null() {
        return fallback;
    }
    match serde_json::from_value(value) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::warn!("Ignoring option {}: {}", name, e);
            fallback
        }
    }
}

impl From<RawCompositionOptions> for CompositionOptions {
    fn from(raw: RawCompositionOptions) -> Self {
        let defaults = Self::default();
        Self {
            collapsed_control: merge_field(
                "collapsedControl",
                raw.collapsed_control,
                defaults.collapsed_control,
            ),
            default_base_key: merge_field(
                "defaultBaseKey",
                raw.default_base_key,
                defaults.default_base_key,
            ),
            default_overlay_keys: merge_field(
                "defaultOverlayKeys",
                raw.default_overlay_keys,
                defaults.default_overlay_keys,
            ),
            attribution_prefix: merge_field(
                "attributionPrefix",
                raw.attribution_prefix,
                defaults.attribution_prefix,
            ),
        }
    }
}

impl CompositionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn with_collapsed_control(mut self, collapsed: bool) -> Self {
        self.collapsed_control = collapsed;
        self
    }

    pub fn with_default_base_key(mut self, key: impl Into<String>) -> Self {
        self.default_base_key = key.into();
        self
    }

    /// Replaces the default overlay list.
    pub fn with_default_overlay_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_overlay_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_attribution_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.attribution_prefix = prefix.into();
        self
    }
}

/// Where the theme preference lives and how it is reflected in the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeConfig {
    /// localStorage key holding the stored theme.
    pub storage_key: String,
    /// Attribute set on `<html>` to the active theme.
    pub theme_attribute: String,
    /// Selector of the toggle button already present in the markup.
    pub toggle_selector: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            theme_attribute: "data-theme".to_string(),
            toggle_selector: "[data-theme-toggle]".to_string(),
        }
    }
}

impl ThemeConfig {
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_theme_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.theme_attribute = attribute.into();
        self
    }

    pub fn with_toggle_selector(mut self, selector: impl Into<String>) -> Self {
        self.toggle_selector = selector.into();
        self
    }
}
