//! Snapshot of a catalogue with names replaced by integer ids.
//!
//! Every stop and bus name is stored once in `names`; records refer to names
//! by their index. Stops come first, in insertion order, so a stop's name id
//! equals its position in `stops`. On disk a snapshot is a protobuf message.

use prost::Message;

use super::proto::SnapshotMessage;
use crate::catalogue::TransportCatalogue;
use crate::identifiers::BusId;
use crate::models::types::{CatalogueError, Result};
use crate::router::RoutingSettings;
use crate::spatial::Coordinates;

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogueSnapshot {
    pub names: Vec<String>,
    pub stops: Vec<StopRecord>,
    pub buses: Vec<BusRecord>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub routing_settings: Option<RoutingSettings>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StopRecord {
    pub name: u32,
    pub coordinates: Coordinates,
    #[cfg_attr(feature = "serde", serde(default))]
    pub road_distances: Vec<RoadDistance>,
}

/// Explicit road distance from the owning stop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadDistance {
    pub to: u32,
    pub meters: u32,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BusRecord {
    pub name: u32,
    /// Name ids of the stored walk, already expanded for out-and-back lines
    pub stops: Vec<u32>,
    pub is_roundtrip: bool,
}

impl CatalogueSnapshot {
    pub fn capture(
        catalogue: &TransportCatalogue,
        routing_settings: Option<RoutingSettings>,
    ) -> Self {
        let mut names: Vec<String> = catalogue
            .stops()
            .iter()
            .map(|stop| stop.name.to_string())
            .collect();

        let mut outgoing = vec![Vec::new(); catalogue.stop_count()];
        for (from, to, meters) in catalogue.distances() {
            outgoing[from.index()].push(RoadDistance {
                to: to.0,
                meters,
            });
        }

        let stops = catalogue
            .stops()
            .iter()
            .zip(outgoing)
            .map(|(stop, mut road_distances)| {
                road_distances.sort_by_key(|d| d.to);
                StopRecord {
                    name: stop.id.0,
                    coordinates: stop.coordinates,
                    road_distances,
                }
            })
            .collect();

        // Insertion order, so restoring reproduces the same bus ids
        let mut buses = Vec::with_capacity(catalogue.bus_count());
        for index in 0..catalogue.bus_count() {
            let Some(bus) = catalogue.bus_by_id(BusId::from_index(index)) else {
                continue;
            };
            let name = names.len() as u32;
            names.push(bus.name.to_string());
            buses.push(BusRecord {
                name,
                stops: bus.stops.iter().map(|id| id.0).collect(),
                is_roundtrip: bus.is_roundtrip,
            });
        }

        Self {
            names,
            stops,
            buses,
            routing_settings,
        }
    }

    /// Protobuf encoding of the snapshot
    pub fn to_bytes(&self) -> Vec<u8> {
        SnapshotMessage::from(self).encode_to_vec()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        SnapshotMessage::decode(bytes)
            .map(Self::from)
            .map_err(|e| CatalogueError::InvalidData(format!("Malformed snapshot: {}", e)))
    }

    /// Rebuild the catalogue this snapshot was captured from
    pub fn restore(&self) -> Result<TransportCatalogue> {
        let mut catalogue = TransportCatalogue::new();

        for stop in &self.stops {
            catalogue.add_stop(self.name(stop.name)?, stop.coordinates)?;
        }

        for stop in &self.stops {
            let from = self.name(stop.name)?;
            for distance in &stop.road_distances {
                catalogue.set_distance(from, self.name(distance.to)?, distance.meters)?;
            }
        }

        for bus in &self.buses {
            let stops = bus
                .stops
                .iter()
                .map(|&id| self.name(id))
                .collect::<Result<Vec<_>>>()?;
            catalogue.add_bus(self.name(bus.name)?, &stops, bus.is_roundtrip)?;
        }

        Ok(catalogue)
    }

    fn name(&self, id: u32) -> Result<&str> {
        self.names
            .get(id as usize)
            .map(String::as_str)
            .ok_or_else(|| CatalogueError::InvalidData(format!("Unknown name id {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TransportCatalogue {
        let mut catalogue = TransportCatalogue::new();
        catalogue.add_stop("Marushkino", Coordinates::new(55.595884, 37.209755)).unwrap();
        catalogue.add_stop("Rasskazovka", Coordinates::new(55.632761, 37.333324)).unwrap();
        catalogue.add_stop("Depot", Coordinates::new(55.6, 37.3)).unwrap();
        catalogue.set_distance("Marushkino", "Rasskazovka", 9900).unwrap();
        catalogue.set_distance("Rasskazovka", "Marushkino", 9500).unwrap();
        catalogue.set_distance("Rasskazovka", "Depot", 1200).unwrap();
        catalogue
            .add_bus("750", &["Marushkino", "Rasskazovka", "Marushkino"], false)
            .unwrap();
        catalogue
            .add_bus("256", &["Rasskazovka", "Depot", "Marushkino", "Rasskazovka"], true)
            .unwrap();
        catalogue
    }

    #[test]
    fn test_restore_is_observationally_identical() {
        let original = sample();
        let settings = RoutingSettings::new(40.0, 6.0).unwrap();

        let snapshot = CatalogueSnapshot::capture(&original, Some(settings));
        let decoded = CatalogueSnapshot::from_bytes(&snapshot.to_bytes()).unwrap();
        assert_eq!(decoded, snapshot);
        assert_eq!(decoded.routing_settings, Some(settings));

        let restored = decoded.restore().unwrap();

        let stop_names = |c: &TransportCatalogue| -> Vec<String> {
            c.stops().iter().map(|s| s.name.to_string()).collect()
        };
        assert_eq!(stop_names(&restored), stop_names(&original));

        for bus in ["750", "256"] {
            assert_eq!(restored.bus_info(bus), original.bus_info(bus));
        }
        for stop in ["Marushkino", "Rasskazovka", "Depot"] {
            assert_eq!(restored.stop_buses(stop), original.stop_buses(stop));
        }

        let mut expected: Vec<_> = original.distances().collect();
        let mut actual: Vec<_> = restored.distances().collect();
        expected.sort();
        actual.sort();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_names_are_shared() {
        let snapshot = CatalogueSnapshot::capture(&sample(), None);

        // 3 stops + 2 buses, each name stored once
        assert_eq!(snapshot.names.len(), 5);
        assert_eq!(snapshot.buses[0].stops, vec![0, 1, 0]);
        assert_eq!(snapshot.names[snapshot.buses[1].name as usize], "256");
    }

    #[test]
    fn test_malformed_bytes() {
        let bytes = CatalogueSnapshot::capture(&sample(), None).to_bytes();

        assert!(matches!(
            CatalogueSnapshot::from_bytes(&bytes[..bytes.len() - 1]),
            Err(CatalogueError::InvalidData(_))
        ));
        assert_eq!(
            CatalogueSnapshot::from_bytes(&[]).unwrap(),
            CatalogueSnapshot::default()
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_form() {
        let snapshot = CatalogueSnapshot::capture(&sample(), None);
        let json = serde_json::to_string(&snapshot).unwrap();

        assert!(!json.contains("routing_settings"));
        let decoded: CatalogueSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn test_unknown_name_id() {
        let mut snapshot = CatalogueSnapshot::capture(&sample(), None);
        snapshot.buses[0].stops.push(42);

        assert!(matches!(
            snapshot.restore(),
            Err(CatalogueError::InvalidData(_))
        ));
    }
}
