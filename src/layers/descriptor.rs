//! Tile layer descriptors.
//!
//! A descriptor is the static description of one tile source: where its
//! tiles come from, how it is credited, and how it is drawn. The map widget
//! turns a descriptor into a live layer handle.

use serde::Serialize;

/// Zoom limit applied when a source does not state its own.
pub const DEFAULT_MAX_ZOOM: u8 = 18;

/// Subdomain tokens used when a template has `{s}` but no subdomain set.
/// Same as Leaflet's `subdomains` default.
const DEFAULT_SUBDOMAINS: [&str; 3] = ["a", "b", "c"];

/// Static description of a single tile source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerDescriptor {
    /// Human-readable name; also the key in the layer catalog.
    pub display_name: String,
    /// Tile URL with `{z}`, `{x}`, `{y}` and optionally `{s}` placeholders.
    pub url_template: String,
    /// Attribution HTML shown by the widget while the layer is visible.
    pub attribution: String,
    pub max_zoom: u8,
    /// Layer opacity, always within `[0, 1]`.
    pub opacity: f32,
    /// Tokens substituted for `{s}`, one per tile host.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdomains: Option<Vec<String>>,
}

impl LayerDescriptor {
    /// Creates a fully opaque descriptor with the default zoom limit.
    pub fn new(
        display_name: impl Into<String>,
        url_template: impl Into<String>,
        attribution: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            url_template: url_template.into(),
            attribution: attribution.into(),
            max_zoom: DEFAULT_MAX_ZOOM,
            opacity: 1.0,
            subdomains: None,
        }
    }

    pub fn with_max_zoom(mut self, max_zoom: u8) -> Self {
        self.max_zoom = max_zoom;
        self
    }

    /// Sets the opacity, clamped into `[0, 1]`.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = if opacity.is_nan() {
            1.0
        } else {
            opacity.clamp(0.0, 1.0)
        };
        self
    }

    /// Sets the subdomain tokens from a compact string, one token per char
    /// (`"abc"` yields `a`, `b`, `c`).
    pub fn with_subdomains(mut self, tokens: &str) -> Self {
        let tokens: Vec<String> = tokens.chars().map(|c| c.to_string()).collect();
        self.subdomains = if tokens.is_empty() { None } else { Some(tokens) };
        self
    }

    /// Subdomain tokens joined back into the compact form Leaflet accepts.
    pub fn subdomains_joined(&self) -> Option<String> {
        self.subdomains.as_ref().map(|tokens| tokens.concat())
    }

    /// Expands the URL template for one tile.
    ///
    /// The subdomain is picked round-robin by `(x + y) % len`, so adjacent
    /// tiles are spread across hosts.
    pub fn tile_url(&self, z: u8, x: u32, y: u32) -> String {
        let pick = |len: usize| ((x as u64 + y as u64) % len as u64) as usize;
        let subdomain = match self.subdomains.as_deref() {
            Some(tokens) if !tokens.is_empty() => tokens[pick(tokens.len())].as_str(),
            _ => DEFAULT_SUBDOMAINS[pick(DEFAULT_SUBDOMAINS.len())],
        };

        self.url_template
            .replace("{s}", subdomain)
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}
