//! The fixed tile layer catalog.
//!
//! Two base layers (satellite imagery and general cartography) and two
//! overlays (roads and labels). Display names double as catalog keys and
//! layer-control labels.

use super::descriptor::LayerDescriptor;

/// Key of the satellite base layer.
pub const SENTINEL_KEY: &str = "Satélite (Sentinel-2)";
/// Key of the OpenStreetMap base layer.
pub const OSM_KEY: &str = "Cartografía OSM";
/// Key of the roads overlay.
pub const ROADS_KEY: &str = "Rutas OSM";
/// Key of the labels overlay.
pub const LABELS_KEY: &str = "Etiquetas OSM";

/// Insertion-ordered mapping from display name to layer handle.
///
/// Order matters: it is the order the layer control lists its entries.
#[derive(Debug, Clone)]
pub struct NamedLayers<H> {
    entries: Vec<(String, H)>,
}

impl<H> Default for NamedLayers<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<H> NamedLayers<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a layer under `name`, replacing any existing entry in place.
    pub fn insert(&mut self, name: impl Into<String>, handle: H) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = handle,
            None => self.entries.push((name, handle)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&H> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, handle)| handle)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &H)> {
        self.entries.iter().map(|(key, handle)| (key.as_str(), handle))
    }
}

impl<H> FromIterator<(String, H)> for NamedLayers<H> {
    fn from_iter<I: IntoIterator<Item = (String, H)>>(iter: I) -> Self {
        let mut layers = Self::new();
        for (name, handle) in iter {
            layers.insert(name, handle);
        }
        layers
    }
}

/// Cloud-free Sentinel-2 mosaic served by EOX.
pub fn sentinel_descriptor() -> LayerDescriptor {
    LayerDescriptor::new(
        SENTINEL_KEY,
        "https://tiles.maps.eox.at/wmts/1.0.0/s2cloudless-2020_3857/default/GoogleMapsCompatible/{z}/{y}/{x}.jpg",
        "Imagery &copy; <a href=\"https://eox.at\" target=\"_blank\" rel=\"noopener\">EOX IT Services GmbH</a> &middot; Datos Copernicus Sentinel modificados",
    )
    .with_max_zoom(18)
}

/// Standard OpenStreetMap cartography.
pub fn osm_descriptor() -> LayerDescriptor {
    LayerDescriptor::new(
        OSM_KEY,
        "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
        "&copy; <a href=\"https://www.openstreetmap.org/copyright\" target=\"_blank\" rel=\"noopener\">OpenStreetMap</a> contributors",
    )
    .with_subdomains("abc")
}

/// CARTO Voyager without labels, drawn half transparent over the base.
pub fn roads_descriptor() -> LayerDescriptor {
    LayerDescriptor::new(
        ROADS_KEY,
        "https://{s}.basemaps.cartocdn.com/rastertiles/voyager_nolabels/{z}/{x}/{y}.png",
        "Cartografía base &copy; <a href=\"https://carto.com/attributions\" target=\"_blank\" rel=\"noopener\">CARTO</a> &middot; Datos &copy; <a href=\"https://www.openstreetmap.org/copyright\" target=\"_blank\" rel=\"noopener\">OpenStreetMap</a> contributors",
    )
    .with_subdomains("abcd")
    .with_opacity(0.5)
    .with_max_zoom(19)
}

/// CARTO labels-only layer.
pub fn labels_descriptor() -> LayerDescriptor {
    LayerDescriptor::new(
        LABELS_KEY,
        "https://{s}.basemaps.cartocdn.com/light_only_labels/{z}/{x}/{y}.png",
        "Calles y etiquetas &copy; <a href=\"https://carto.com/attributions\" target=\"_blank\" rel=\"noopener\">CARTO</a> &middot; Datos &copy; <a href=\"https://www.openstreetmap.org/copyright\" target=\"_blank\" rel=\"noopener\">OpenStreetMap</a> contributors",
    )
    .with_subdomains("abcd")
    .with_max_zoom(20)
}

/// Base layer descriptors in control order.
pub fn base_descriptors() -> Vec<LayerDescriptor> {
    vec![sentinel_descriptor(), osm_descriptor()]
}

/// Overlay descriptors in control order.
pub fn overlay_descriptors() -> Vec<LayerDescriptor> {
    vec![roads_descriptor(), labels_descriptor()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_layers_preserves_order() {
        let mut layers = NamedLayers::new();
        layers.insert("b", 1);
        layers.insert("a", 2);
        layers.insert("c", 3);

        let keys: Vec<&str> = layers.keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(layers.get("a"), Some(&2));
        assert_eq!(layers.get("missing"), None);
    }

    #[test]
    fn test_named_layers_insert_replaces_in_place() {
        let mut layers = NamedLayers::new();
        layers.insert("x", 1);
        layers.insert("y", 2);
        layers.insert("x", 3);

        assert_eq!(layers.len(), 2);
        let entries: Vec<(&str, &i32)> = layers.iter().collect();
        assert_eq!(entries, vec![("x", &3), ("y", &2)]);
    }

    #[test]
    fn test_fixed_descriptors() {
        let base = base_descriptors();
        assert_eq!(base.len(), 2);
        assert_eq!(base[0].display_name, SENTINEL_KEY);
        assert_eq!(base[0].max_zoom, 18);
        assert!(base[0].subdomains.is_none());
        assert_eq!(base[1].display_name, OSM_KEY);
        assert_eq!(base[1].subdomains_joined().as_deref(), Some("abc"));

        let overlays = overlay_descriptors();
        assert_eq!(overlays.len(), 2);
        assert_eq!(overlays[0].display_name, ROADS_KEY);
        assert_eq!(overlays[0].opacity, 0.5);
        assert_eq!(overlays[0].max_zoom, 19);
        assert_eq!(overlays[1].display_name, LABELS_KEY);
        assert_eq!(overlays[1].opacity, 1.0);
        assert_eq!(overlays[1].max_zoom, 20);
    }

    #[test]
    fn test_sentinel_uses_row_before_column() {
        assert_eq!(
            sentinel_descriptor().tile_url(4, 3, 7),
            "https://tiles.maps.eox.at/wmts/1.0.0/s2cloudless-2020_3857/default/GoogleMapsCompatible/4/7/3.jpg"
        );
    }
}
