//! Leaflet-backed mapping widget for WASM targets.
//!
//! Binds the parts of the global `L` namespace the composer needs:
//! `L.tileLayer`, `L.control.layers`, and `addTo` on the resulting objects.

use super::{ControlOptions, MapWidget, WidgetError};
use crate::layers::{LayerDescriptor, NamedLayers};
use js_sys::{Function, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
extern "C" {
    /// An `L.Map` instance.
    #[derive(Debug, Clone)]
    pub type LeafletMap;

    /// An `L.TileLayer` instance.
    #[derive(Debug, Clone)]
    pub type TileLayer;

    /// An `L.Control.Layers` instance.
    #[derive(Debug, Clone)]
    pub type LayersControl;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url_template: &str, options: &JsValue) -> TileLayer;

    #[wasm_bindgen(js_namespace = ["L", "control"], js_name = layers)]
    fn layers_control(base_layers: &Object, overlays: &Object, options: &JsValue) -> LayersControl;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_layer_to(this: &TileLayer, map: &LeafletMap) -> TileLayer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_control_to(this: &LayersControl, map: &LeafletMap) -> LayersControl;
}

/// Options object passed to `L.tileLayer`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TileLayerOptions<'a> {
    attribution: &'a str,
    max_zoom: u8,
    opacity: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    subdomains: Option<String>,
}

#[derive(Serialize)]
struct LayersControlOptions {
    collapsed: bool,
}

/// Handle to the page's Leaflet namespace.
///
/// Only obtainable through [`Leaflet::detect`], so holding one proves `L`
/// was loaded.
#[derive(Debug, Clone)]
pub struct Leaflet {
    _detected: (),
}

impl Leaflet {
    /// Returns the Leaflet capability if the global `L` namespace exists.
    pub fn detect() -> Option<Self> {
        let namespace = Reflect::get(&js_sys::global(), &JsValue::from_str("L")).ok()?;
        if namespace.is_undefined() || namespace.is_null() {
            log::warn!("Leaflet namespace `L` not found; map layers disabled");
            return None;
        }
        Some(Self { _detected: () })
    }

    /// Wraps a JS value as a map handle, rejecting `null` and `undefined`.
    pub fn map_from_js(value: JsValue) -> Option<LeafletMap> {
        if value.is_undefined() || value.is_null() {
            None
        } else {
            Some(value.unchecked_into())
        }
    }

    /// Converts a catalog into the `{ name: layer }` object Leaflet expects.
    pub fn layers_to_object(layers: &NamedLayers<TileLayer>) -> Object {
        let object = Object::new();
        for (name, layer) in layers.iter() {
            if let Err(e) = Reflect::set(&object, &JsValue::from_str(name), layer) {
                log::warn!("Failed to set layer {}: {:?}", name, e);
            }
        }
        object
    }
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    match value.serialize(&serde_wasm_bindgen::Serializer::json_compatible()) {
        Ok(js) => js,
        Err(e) => {
            log::warn!("Failed to serialize widget options: {}", e);
            Object::new().into()
        }
    }
}

impl MapWidget for Leaflet {
    type Map = LeafletMap;
    type Layer = TileLayer;
    type Control = LayersControl;

    fn create_tile_layer(&self, descriptor: &LayerDescriptor) -> TileLayer {
        let options = TileLayerOptions {
            attribution: &descriptor.attribution,
            max_zoom: descriptor.max_zoom,
            opacity: descriptor.opacity,
            subdomains: descriptor.subdomains_joined(),
        };
        tile_layer(&descriptor.url_template, &to_js(&options))
    }

    fn add_layer(&self, layer: &TileLayer, map: &LeafletMap) {
        layer.add_layer_to(map);
    }

    fn create_layers_control(
        &self,
        base_layers: &NamedLayers<TileLayer>,
        overlay_layers: &NamedLayers<TileLayer>,
        options: &ControlOptions,
    ) -> LayersControl {
        let options = LayersControlOptions {
            collapsed: options.collapsed,
        };
        layers_control(
            &Self::layers_to_object(base_layers),
            &Self::layers_to_object(overlay_layers),
            &to_js(&options),
        )
    }

    fn add_control(&self, control: &LayersControl, map: &LeafletMap) {
        control.add_control_to(map);
    }

    fn set_attribution_prefix(&self, map: &LeafletMap, prefix: &str) -> Result<(), WidgetError> {
        let attribution = Reflect::get(map, &JsValue::from_str("attributionControl"))
            .map_err(|e| WidgetError::Js(format!("{:?}", e)))?;
        if attribution.is_undefined() || attribution.is_null() {
            return Err(WidgetError::Unsupported("attribution control"));
        }

        let set_prefix = Reflect::get(&attribution, &JsValue::from_str("setPrefix"))
            .map_err(|e| WidgetError::Js(format!("{:?}", e)))?;
        let set_prefix = set_prefix
            .dyn_into::<Function>()
            .map_err(|_| WidgetError::Unsupported("attributionControl.setPrefix"))?;

        set_prefix
            .call1(&attribution, &JsValue::from_str(prefix))
            .map(|_| ())
            .map_err(|e| WidgetError::Js(format!("{:?}", e)))
    }
}
