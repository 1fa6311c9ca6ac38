//! Layer composition onto a live map.
//!
//! Builds the base and overlay catalogs, shows the default selection, and
//! attaches a layer-selection control listing every layer.

use super::catalog::{base_descriptors, overlay_descriptors, NamedLayers};
use super::descriptor::LayerDescriptor;
use crate::config::CompositionOptions;
use crate::widget::{ControlOptions, MapWidget, WidgetError};

/// Result of a composition call.
///
/// `control` is `None` only when the mapping capability was missing, in which
/// case both catalogs are empty and nothing was touched.
pub struct Composition<W: MapWidget> {
    pub base_layers: NamedLayers<W::Layer>,
    pub overlay_layers: NamedLayers<W::Layer>,
    pub control: Option<W::Control>,
}

impl<W: MapWidget> Composition<W> {
    /// The empty result returned when no widget or map is available.
    pub fn inert() -> Self {
        Self {
            base_layers: NamedLayers::new(),
            overlay_layers: NamedLayers::new(),
            control: None,
        }
    }

    pub fn is_inert(&self) -> bool {
        self.control.is_none()
    }

    pub fn base_keys(&self) -> impl Iterator<Item = &str> {
        self.base_layers.keys()
    }

    pub fn overlay_keys(&self) -> impl Iterator<Item = &str> {
        self.overlay_layers.keys()
    }
}

/// Stateless builder of the map's layer setup.
pub struct LayerComposer;

impl LayerComposer {
    /// Creates the two base layers. Every call allocates new widget layers.
    pub fn build_base_layers<W: MapWidget>(widget: &W) -> NamedLayers<W::Layer> {
        Self::build(widget, base_descriptors())
    }

    /// Creates the roads and labels overlays. Every call allocates new
    /// widget layers.
    pub fn build_overlay_layers<W: MapWidget>(widget: &W) -> NamedLayers<W::Layer> {
        Self::build(widget, overlay_descriptors())
    }

    fn build<W: MapWidget>(
        widget: &W,
        descriptors: Vec<LayerDescriptor>,
    ) -> NamedLayers<W::Layer> {
        descriptors
            .into_iter()
            .map(|descriptor| {
                let layer = widget.create_tile_layer(&descriptor);
                (descriptor.display_name, layer)
            })
            .collect()
    }

    /// Builds both catalogs, shows the defaults from `options`, and attaches
    /// a layer control to `map`.
    ///
    /// With no widget or no map this returns [`Composition::inert`] without
    /// making a single widget call. Calling it twice on the same map adds a
    /// second set of layers and a second control.
    pub fn compose_onto<W: MapWidget>(
        widget: Option<&W>,
        map: Option<&W::Map>,
        options: &CompositionOptions,
    ) -> Composition<W> {
        let (widget, map) = match (widget, map) {
            (Some(widget), Some(map)) => (widget, map),
            _ => {
                log::warn!("Mapping widget or map unavailable; skipping layer setup");
                return Composition::inert();
            }
        };

        match widget.set_attribution_prefix(map, &options.attribution_prefix) {
            Ok(()) => {}
            Err(WidgetError::Unsupported(what)) => {
                log::debug!("Attribution prefix not set: {} unavailable", what);
            }
            Err(e) => log::warn!("Failed to set attribution prefix: {}", e),
        }

        let base_layers = Self::build_base_layers(widget);
        let overlay_layers = Self::build_overlay_layers(widget);

        match base_layers.get(&options.default_base_key) {
            Some(layer) => {
                widget.add_layer(layer, map);
                log::debug!("Activated base layer {}", options.default_base_key);
            }
            None => log::debug!(
                "Default base layer {} not in catalog; map starts blank",
                options.default_base_key
            ),
        }

        let mut active_overlays = 0;
        for key in &options.default_overlay_keys {
            match overlay_layers.get(key) {
                Some(layer) => {
                    widget.add_layer(layer, map);
                    active_overlays += 1;
                    log::debug!("Activated overlay {}", key);
                }
                None => log::debug!("Skipping unknown overlay {}", key),
            }
        }

        let control = widget.create_layers_control(
            &base_layers,
            &overlay_layers,
            &ControlOptions {
                collapsed: options.collapsed_control,
            },
        );
        widget.add_control(&control, map);

        log::info!(
            "Composed {} base layers and {} overlays ({} overlays active)",
            base_layers.len(),
            overlay_layers.len(),
            active_overlays
        );

        Composition {
            base_layers,
            overlay_layers,
            control: Some(control),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::catalog::{LABELS_KEY, OSM_KEY, ROADS_KEY, SENTINEL_KEY};
    use crate::widget::{RecordedMap, RecordingWidget, WidgetCall};

    fn compose(
        widget: &RecordingWidget,
        map: &RecordedMap,
        options: &CompositionOptions,
    ) -> Composition<RecordingWidget> {
        LayerComposer::compose_onto(Some(widget), Some(map), options)
    }

    #[test]
    fn test_build_returns_fixed_keys() {
        let widget = RecordingWidget::new();

        for _ in 0..3 {
            let base = LayerComposer::build_base_layers(&widget);
            assert_eq!(base.keys().collect::<Vec<_>>(), vec![SENTINEL_KEY, OSM_KEY]);

            let overlays = LayerComposer::build_overlay_layers(&widget);
            assert_eq!(
                overlays.keys().collect::<Vec<_>>(),
                vec![ROADS_KEY, LABELS_KEY]
            );
        }
    }

    #[test]
    fn test_build_allocates_new_layers_each_call() {
        let widget = RecordingWidget::new();
        let first = LayerComposer::build_base_layers(&widget);
        let second = LayerComposer::build_base_layers(&widget);

        assert_ne!(
            first.get(SENTINEL_KEY).map(|l| l.id),
            second.get(SENTINEL_KEY).map(|l| l.id)
        );
        assert_eq!(widget.calls().len(), 4);
    }

    #[test]
    fn test_default_composition() {
        let widget = RecordingWidget::new();
        let map = widget.create_map();

        let composition = compose(&widget, &map, &CompositionOptions::default());

        assert!(!composition.is_inert());
        assert_eq!(
            composition.base_keys().collect::<Vec<_>>(),
            vec![SENTINEL_KEY, OSM_KEY]
        );
        assert_eq!(
            composition.overlay_keys().collect::<Vec<_>>(),
            vec![ROADS_KEY, LABELS_KEY]
        );
        assert_eq!(composition.base_layers.len(), 2);
        assert_eq!(composition.overlay_layers.len(), 2);
        // Satellite first, then roads, labels on top
        assert_eq!(
            widget.active_layers(&map),
            vec![SENTINEL_KEY, ROADS_KEY, LABELS_KEY]
        );

        let control = composition.control.unwrap();
        assert!(control.collapsed);

        let calls = widget.calls();
        assert!(calls.contains(&WidgetCall::CreateLayersControl {
            id: control.id,
            base_layers: vec![SENTINEL_KEY.to_string(), OSM_KEY.to_string()],
            overlay_layers: vec![ROADS_KEY.to_string(), LABELS_KEY.to_string()],
            collapsed: true,
        }));
        assert_eq!(
            calls.last(),
            Some(&WidgetCall::AddControl {
                id: control.id,
                map: map.id
            })
        );
    }

    #[test]
    fn test_missing_capability_is_inert() {
        let widget = RecordingWidget::new();
        let map = widget.create_map();
        let options = CompositionOptions::default().with_attribution_prefix("X");

        let no_map = LayerComposer::compose_onto(Some(&widget), None, &options);
        assert!(no_map.is_inert());
        assert!(no_map.base_layers.is_empty());
        assert!(no_map.overlay_layers.is_empty());

        let no_widget = LayerComposer::compose_onto::<RecordingWidget>(None, Some(&map), &options);
        assert!(no_widget.is_inert());

        assert!(widget.calls().is_empty());
    }

    #[test]
    fn test_no_default_overlays() {
        let widget = RecordingWidget::new();
        let map = widget.create_map();
        let options =
            CompositionOptions::default().with_default_overlay_keys(Vec::<String>::new());

        let composition = compose(&widget, &map, &options);

        assert_eq!(widget.active_layers(&map), vec![SENTINEL_KEY]);
        assert_eq!(composition.overlay_layers.len(), 2);
        assert!(composition.control.is_some());
    }

    #[test]
    fn test_unknown_base_key_leaves_map_blank() {
        let widget = RecordingWidget::new();
        let map = widget.create_map();
        let options = CompositionOptions::default()
            .with_default_base_key("nonexistent")
            .with_default_overlay_keys(Vec::<String>::new());

        let composition = compose(&widget, &map, &options);

        assert!(widget.active_layers(&map).is_empty());
        assert!(composition.base_layers.contains_key(SENTINEL_KEY));
        assert!(composition.base_layers.contains_key(OSM_KEY));
    }

    #[test]
    fn test_overlay_order_and_unknown_keys() {
        let widget = RecordingWidget::new();
        let map = widget.create_map();
        let options = CompositionOptions::default()
            .with_default_base_key(OSM_KEY)
            .with_default_overlay_keys([LABELS_KEY, "Ríos", ROADS_KEY]);

        compose(&widget, &map, &options);

        assert_eq!(
            widget.active_layers(&map),
            vec![OSM_KEY, LABELS_KEY, ROADS_KEY]
        );
    }

    #[test]
    fn test_attribution_prefix_is_set() {
        let widget = RecordingWidget::new();
        let map = widget.create_map();
        let options = CompositionOptions::default().with_attribution_prefix("X");

        compose(&widget, &map, &options);

        assert_eq!(
            widget.calls().first(),
            Some(&WidgetCall::SetAttributionPrefix {
                map: map.id,
                prefix: "X".to_string()
            })
        );
    }

    #[test]
    fn test_attribution_prefix_unsupported_is_skipped() {
        let widget = RecordingWidget::new();
        let map = widget.create_map_without_attribution();
        let options = CompositionOptions::default().with_attribution_prefix("X");

        let composition = compose(&widget, &map, &options);

        assert!(composition.control.is_some());
        assert!(!widget
            .calls()
            .iter()
            .any(|call| matches!(call, WidgetCall::SetAttributionPrefix { .. })));
    }

    #[test]
    fn test_collapsed_flag_passed_to_control() {
        let widget = RecordingWidget::new();
        let map = widget.create_map();
        let options = CompositionOptions::default().with_collapsed_control(false);

        let composition = compose(&widget, &map, &options);

        assert_eq!(composition.control.map(|c| c.collapsed), Some(false));
    }

    #[test]
    fn test_repeated_composition_is_additive() {
        let widget = RecordingWidget::new();
        let map = widget.create_map();

        compose(&widget, &map, &CompositionOptions::default());
        compose(&widget, &map, &CompositionOptions::default());

        assert_eq!(widget.active_layers(&map).len(), 6);
        let controls = widget
            .calls()
            .iter()
            .filter(|call| matches!(call, WidgetCall::AddControl { .. }))
            .count();
        assert_eq!(controls, 2);
    }
}
