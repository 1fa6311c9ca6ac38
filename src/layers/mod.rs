//! Tile layer catalog and composition.
//!
//! - `descriptor`: static description of one tile source
//! - `catalog`: the fixed base/overlay descriptors and the ordered catalog type
//! - `composer`: applies the catalog and default selection to a map

pub mod catalog;
mod composer;
mod descriptor;

pub use catalog::NamedLayers;
pub use composer::{Composition, LayerComposer};
pub use descriptor::{LayerDescriptor, DEFAULT_MAX_ZOOM};
