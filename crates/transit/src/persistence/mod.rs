//! Compact binary form of a catalogue.

mod proto;
pub mod snapshot;

pub use snapshot::{BusRecord, CatalogueSnapshot, RoadDistance, StopRecord};
