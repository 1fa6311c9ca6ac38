//! In-memory mapping widget.
//!
//! Records every call it receives instead of drawing anything. Backs the
//! native dry run and the composer tests.

use super::{ControlOptions, MapWidget, WidgetError};
use crate::layers::{LayerDescriptor, NamedLayers};
use serde::Serialize;
use std::cell::{Cell, RefCell};

/// A call received by the [`RecordingWidget`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum WidgetCall {
    CreateTileLayer {
        id: usize,
        name: String,
    },
    AddLayer {
        id: usize,
        map: usize,
    },
    CreateLayersControl {
        id: usize,
        base_layers: Vec<String>,
        overlay_layers: Vec<String>,
        collapsed: bool,
    },
    AddControl {
        id: usize,
        map: usize,
    },
    SetAttributionPrefix {
        map: usize,
        prefix: String,
    },
}

/// Map handle issued by the recording widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedMap {
    pub id: usize,
    /// Whether the map exposes an attribution control.
    pub has_attribution: bool,
}

/// Layer handle issued by the recording widget.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedLayer {
    pub id: usize,
    pub descriptor: LayerDescriptor,
}

/// Control handle issued by the recording widget.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedControl {
    pub id: usize,
    pub collapsed: bool,
}

#[derive(Default)]
pub struct RecordingWidget {
    calls: RefCell<Vec<WidgetCall>>,
    next_id: Cell<usize>,
}

impl RecordingWidget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new map handle with an attribution control.
    pub fn create_map(&self) -> RecordedMap {
        RecordedMap {
            id: self.allocate_id(),
            has_attribution: true,
        }
    }

    /// Issues a new map handle without an attribution control.
    pub fn create_map_without_attribution(&self) -> RecordedMap {
        RecordedMap {
            id: self.allocate_id(),
            has_attribution: false,
        }
    }

    /// All calls received so far, oldest first.
    pub fn calls(&self) -> Vec<WidgetCall> {
        self.calls.borrow().clone()
    }

    /// Names of the layers added to `map`, bottom of the stack first.
    pub fn active_layers(&self, map: &RecordedMap) -> Vec<String> {
        let calls = self.calls.borrow();
        calls
            .iter()
            .filter_map(|call| match call {
                WidgetCall::AddLayer { id, map: target } if *target == map.id => {
                    calls.iter().find_map(|created| match created {
                        WidgetCall::CreateTileLayer { id: created_id, name }
                            if created_id == id =>
                        {
                            Some(name.clone())
                        }
                        _ => None,
                    })
                }
                _ => None,
            })
            .collect()
    }

    fn allocate_id(&self) -> usize {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn record(&self, call: WidgetCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl MapWidget for RecordingWidget {
    type Map = RecordedMap;
    type Layer = RecordedLayer;
    type Control = RecordedControl;

    fn create_tile_layer(&self, descriptor: &LayerDescriptor) -> RecordedLayer {
        let id = self.allocate_id();
        self.record(WidgetCall::CreateTileLayer {
            id,
            name: descriptor.display_name.clone(),
        });
        RecordedLayer {
            id,
            descriptor: descriptor.clone(),
        }
    }

    fn add_layer(&self, layer: &RecordedLayer, map: &RecordedMap) {
        self.record(WidgetCall::AddLayer {
            id: layer.id,
            map: map.id,
        });
    }

    fn create_layers_control(
        &self,
        base_layers: &NamedLayers<RecordedLayer>,
        overlay_layers: &NamedLayers<RecordedLayer>,
        options: &ControlOptions,
    ) -> RecordedControl {
        let id = self.allocate_id();
        self.record(WidgetCall::CreateLayersControl {
            id,
            base_layers: base_layers.keys().map(str::to_string).collect(),
            overlay_layers: overlay_layers.keys().map(str::to_string).collect(),
            collapsed: options.collapsed,
        });
        RecordedControl {
            id,
            collapsed: options.collapsed,
        }
    }

    fn add_control(&self, control: &RecordedControl, map: &RecordedMap) {
        self.record(WidgetCall::AddControl {
            id: control.id,
            map: map.id,
        });
    }

    fn set_attribution_prefix(&self, map: &RecordedMap, prefix: &str) -> Result<(), WidgetError> {
        if !map.has_attribution {
            return Err(WidgetError::Unsupported("attribution control"));
        }
        self.record(WidgetCall::SetAttributionPrefix {
            map: map.id,
            prefix: prefix.to_string(),
        });
        Ok(())
    }
}
