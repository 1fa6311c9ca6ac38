//! JavaScript entry points.
//!
//! Exposes the composer and the theme controller to page scripts, replacing
//! the old `window.TrazappMaps` helpers with wasm-bindgen exports.

use crate::config::{CompositionOptions, ThemeConfig};
use crate::layers::LayerComposer;
use crate::theme::dom;
use crate::widget::leaflet::Leaflet;
use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;

/// Sets up logging and panic reporting when the module loads.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Redirect `log` messages to the browser console
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("Logger init failed: {}", e)));
    }
}

fn options_from_js(options: JsValue) -> CompositionOptions {
    if options.is_undefined() || options.is_null() {
        return CompositionOptions::default();
    }
    match serde_wasm_bindgen::from_value(options) {
        Ok(options) => options,
        Err(e) => {
            log::warn!("Invalid layer options, using defaults: {}", e);
            CompositionOptions::default()
        }
    }
}

fn set_field(object: &Object, key: &str, value: &JsValue) {
    if let Err(e) = Reflect::set(object, &JsValue::from_str(key), value) {
        log::warn!("Failed to set {}: {:?}", key, e);
    }
}

/// Builds the layer catalog on `map` and returns
/// `{ baseLayers, overlayLayers, control }`.
///
/// `control` is `null` when Leaflet or the map is missing; both catalogs are
/// then empty objects.
#[wasm_bindgen(js_name = applyDefaultLayers)]
pub fn apply_default_layers(map: JsValue, options: JsValue) -> JsValue {
    let widget = Leaflet::detect();
    let map = Leaflet::map_from_js(map);
    let options = options_from_js(options);

    let composition = LayerComposer::compose_onto(widget.as_ref(), map.as_ref(), &options);

    let result = Object::new();
    set_field(
        &result,
        "baseLayers",
        &Leaflet::layers_to_object(&composition.base_layers),
    );
    set_field(
        &result,
        "overlayLayers",
        &Leaflet::layers_to_object(&composition.overlay_layers),
    );
    let control = composition
        .control
        .map(JsValue::from)
        .unwrap_or(JsValue::NULL);
    set_field(&result, "control", &control);
    result.into()
}

/// Returns `{ name: L.TileLayer }` for the base layers, or `{}` without
/// Leaflet.
#[wasm_bindgen(js_name = createBaseLayers)]
pub fn create_base_layers() -> Object {
    match Leaflet::detect() {
        Some(widget) => Leaflet::layers_to_object(&LayerComposer::build_base_layers(&widget)),
        None => Object::new(),
    }
}

/// Returns `{ name: L.TileLayer }` for the overlays, or `{}` without Leaflet.
#[wasm_bindgen(js_name = createOverlayLayers)]
pub fn create_overlay_layers() -> Object {
    match Leaflet::detect() {
        Some(widget) => Leaflet::layers_to_object(&LayerComposer::build_overlay_layers(&widget)),
        None => Object::new(),
    }
}

/// Applies the stored or system theme and wires the toggle button.
///
/// Call after `DOMContentLoaded`. `config` may override `storageKey`,
/// `themeAttribute` and `toggleSelector`.
#[wasm_bindgen(js_name = initTheme)]
pub fn init_theme(config: JsValue) -> Result<(), JsValue> {
    let config: ThemeConfig = if config.is_undefined() || config.is_null() {
        ThemeConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };

    dom::install(config)
        .map(|_| ())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
