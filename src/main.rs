//! Native dry run of the map layer setup.
//!
//! Composes the catalog onto an in-memory widget and prints what a browser
//! map would receive: the layer descriptors, the widget calls in order, and
//! the layers left visible. Takes optional JSON options as first argument,
//! e.g. `'{"defaultOverlayKeys": ["Etiquetas OSM"]}'`.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use serde_json::json;
    use trazapp_maps::layers::catalog::{base_descriptors, overlay_descriptors};
    use trazapp_maps::widget::RecordingWidget;
    use trazapp_maps::{CompositionOptions, LayerComposer};

    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(json) => CompositionOptions::from_json(&json)?,
        None => CompositionOptions::new(),
    };

    let widget = RecordingWidget::new();
    let map = widget.create_map();
    let composition = LayerComposer::compose_onto(Some(&widget), Some(&map), &options);

    let report = json!({
        "options": options,
        "baseLayers": base_descriptors(),
        "overlayLayers": overlay_descriptors(),
        "calls": widget.calls(),
        "activeLayers": widget.active_layers(&map),
        "controlBaseLayers": composition.base_keys().collect::<Vec<_>>(),
        "controlOverlayLayers": composition.overlay_keys().collect::<Vec<_>>(),
        "controlAttached": !composition.is_inert(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

// WASM entry point - main is not called on wasm32
#[cfg(target_arch = "wasm32")]
fn main() {}
