#![warn(clippy::all)]

//! Trazapp map layers and theme preference.
//!
//! Builds the web map's tile layers (satellite and cartographic base layers,
//! roads and labels overlays), shows a default selection, and attaches a
//! layer-selection control. Also resolves and persists the light/dark theme.
//!
//! The mapping engine is injected through [`MapWidget`]; in the browser that
//! is Leaflet, elsewhere the [`RecordingWidget`](widget::RecordingWidget).

pub mod config;
pub mod layers;
pub mod theme;
#[cfg(target_arch = "wasm32")]
pub mod web;
pub mod widget;

pub use config::{CompositionOptions, ConfigError, ThemeConfig};
pub use layers::{Composition, LayerComposer, LayerDescriptor, NamedLayers};
pub use theme::{Theme, ThemeController, ThemeError};
pub use widget::{MapWidget, WidgetError};
