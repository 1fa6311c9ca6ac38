//! Mapping widget capability.
//!
//! The composer never talks to a rendering engine directly. It drives a
//! [`MapWidget`], which owns tile loading and drawing. In the browser this is
//! Leaflet; on native targets and in tests it is the [`RecordingWidget`].
//!
//! Note: no `Send` bounds anywhere, since widget handles on the web are JS
//! objects and WASM is single-threaded.

#[cfg(target_arch = "wasm32")]
pub mod leaflet;
pub mod recording;

pub use recording::{RecordedControl, RecordedLayer, RecordedMap, RecordingWidget, WidgetCall};

use crate::layers::{LayerDescriptor, NamedLayers};

/// Errors reported by a mapping widget.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetError {
    /// The widget or map does not offer the named capability.
    Unsupported(&'static str),
    /// A call into the JS widget threw.
    Js(String),
}

impl std::fmt::Display for WidgetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WidgetError::Unsupported(what) => write!(f, "Capability not supported: {}", what),
            WidgetError::Js(msg) => write!(f, "Widget call failed: {}", msg),
        }
    }
}

impl std::error::Error for WidgetError {}

/// Options for the layer-selection control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlOptions {
    /// Show the control as an icon that expands on hover.
    pub collapsed: bool,
}

/// Operations the composer needs from a mapping widget.
///
/// Handles are opaque to callers. Once a layer is added to a map, the map
/// owns it; the composer only keeps a clone for wiring the control.
pub trait MapWidget {
    /// A live map instance.
    type Map;
    /// A configured tile layer.
    type Layer: Clone;
    /// A layer-selection control.
    type Control;

    /// Creates a tile layer for `descriptor`. The layer is not shown until
    /// added to a map.
    fn create_tile_layer(&self, descriptor: &LayerDescriptor) -> Self::Layer;

    /// Adds `layer` to `map`, making it visible above previously added layers.
    fn add_layer(&self, layer: &Self::Layer, map: &Self::Map);

    /// Creates a control listing every base layer and overlay.
    fn create_layers_control(
        &self,
        base_layers: &NamedLayers<Self::Layer>,
        overlay_layers: &NamedLayers<Self::Layer>,
        options: &ControlOptions,
    ) -> Self::Control;

    fn add_control(&self, control: &Self::Control, map: &Self::Map);

    /// Replaces the attribution prefix (the widget's own branding).
    ///
    /// Returns [`WidgetError::Unsupported`] when `map` has no attribution
    /// control.
    fn set_attribution_prefix(&self, map: &Self::Map, prefix: &str) -> Result<(), WidgetError>;
}
