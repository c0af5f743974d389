//! Core data types for the catalogue.

use std::collections::{BTreeMap, HashSet};

use crate::identifiers::*;
use crate::spatial::Coordinates;

// ============================================================================
// Entities
// ============================================================================

/// A named stop with its location
#[derive(Clone, Debug, PartialEq)]
pub struct Stop {
    pub id: StopId,
    pub name: StopIdentifier,
    pub coordinates: Coordinates,
}

/// A bus line with its derived statistics.
///
/// `stops` is the full walk the vehicle makes: for lines that are not round
/// trips it already holds the outbound stops followed by the return stops.
#[derive(Clone, Debug)]
pub struct Bus {
    pub id: BusId,
    pub name: BusIdentifier,
    pub stops: Vec<StopId>,
    pub unique_stops: HashSet<StopId>,
    pub is_roundtrip: bool,

    /// Road distance in meters along consecutive stops
    pub route_length: u64,
    /// Great-circle distance in meters along consecutive stops
    pub geographic_distance: f64,
}

impl Bus {
    /// Ratio of road length to great-circle length, `None` if the line never
    /// moves geographically.
    pub fn curvature(&self) -> Option<f64> {
        if self.geographic_distance > 0.0 {
            Some(self.route_length as f64 / self.geographic_distance)
        } else {
            None
        }
    }

    pub fn info(&self) -> BusInfo {
        BusInfo {
            name: self.name.clone(),
            curvature: self.curvature(),
            route_length: self.route_length,
            stop_count: self.stops.len(),
            unique_stop_count: self.unique_stops.len(),
        }
    }
}

/// Statistics reported for a bus line
#[derive(Clone, Debug, PartialEq)]
pub struct BusInfo {
    pub name: BusIdentifier,
    pub curvature: Option<f64>,
    pub route_length: u64,
    pub stop_count: usize,
    pub unique_stop_count: usize,
}

// ============================================================================
// Load-time descriptions
// ============================================================================

/// A stop as it arrives from an input batch, with its outgoing road distances
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StopDescription {
    pub name: String,
    pub coordinates: Coordinates,
    pub road_distances: BTreeMap<String, u32>,
}

/// A bus as it arrives from an input batch.
///
/// `stops` lists the outbound direction only for lines that are not round trips.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BusDescription {
    pub name: String,
    pub stops: Vec<String>,
    pub is_roundtrip: bool,
}

impl BusDescription {
    /// Stop sequence the catalogue stores for this line
    pub fn expanded_stops(&self) -> Vec<String> {
        expand_stop_sequence(&self.stops, self.is_roundtrip)
    }
}

/// Expands an outbound stop list into the full there-and-back walk.
///
/// `[A, B, C]` becomes `[A, B, C, B, A]`. Round trips are returned unchanged.
pub fn expand_stop_sequence<S: Clone>(stops: &[S], is_roundtrip: bool) -> Vec<S> {
    if is_roundtrip || stops.len() < 2 {
        return stops.to_vec();
    }

    stops
        .iter()
        .chain(stops.iter().rev().skip(1))
        .cloned()
        .collect()
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("Stop not found: {0}")]
    StopNotFound(StopIdentifier),

    #[error("Duplicate stop: {0}")]
    DuplicateStop(StopIdentifier),

    #[error("Duplicate bus: {0}")]
    DuplicateBus(BusIdentifier),

    #[error("Invalid routing settings: {0}")]
    InvalidSettings(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, CatalogueError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn bus(route_length: u64, geographic_distance: f64) -> Bus {
        let stops = vec![StopId(0), StopId(1), StopId(0)];
        Bus {
            id: BusId(0),
            name: BusIdentifier::new("14"),
            unique_stops: stops.iter().copied().collect(),
            stops,
            is_roundtrip: false,
            route_length,
            geographic_distance,
        }
    }

    #[test]
    fn test_expand_out_and_back() {
        let expanded = expand_stop_sequence(&["S1", "S2", "S3"], false);
        assert_eq!(expanded, vec!["S1", "S2", "S3", "S2", "S1"]);
    }

    #[test]
    fn test_expand_round_trip_is_identity() {
        let expanded = expand_stop_sequence(&["S1", "S2", "S3", "S1"], true);
        assert_eq!(expanded, vec!["S1", "S2", "S3", "S1"]);
    }

    #[test]
    fn test_expand_single_stop() {
        assert_eq!(expand_stop_sequence(&["S1"], false), vec!["S1"]);
        assert!(expand_stop_sequence::<&str>(&[], false).is_empty());
    }

    #[test]
    fn test_description_expansion() {
        let description = BusDescription {
            name: "750".into(),
            stops: vec!["A".into(), "B".into()],
            is_roundtrip: false,
        };
        assert_eq!(description.expanded_stops(), vec!["A", "B", "A"]);
    }

    #[test]
    fn test_bus_info() {
        let info = bus(3000, 1500.0).info();

        assert_eq!(info.curvature, Some(2.0));
        assert_eq!(info.route_length, 3000);
        assert_eq!(info.stop_count, 3);
        assert_eq!(info.unique_stop_count, 2);
    }

    #[test]
    fn test_degenerate_curvature() {
        assert_eq!(bus(3000, 0.0).curvature(), None);
    }
}
