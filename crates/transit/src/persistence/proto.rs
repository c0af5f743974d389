//! Protobuf wire messages for snapshots.

use crate::router::RoutingSettings;
use crate::spatial::Coordinates;

use super::snapshot::{BusRecord, CatalogueSnapshot, RoadDistance, StopRecord};

#[derive(Clone, PartialEq, prost::Message)]
pub(super) struct SnapshotMessage {
    #[prost(string, repeated, tag = "1")]
    pub names: Vec<String>,
    #[prost(message, repeated, tag = "2")]
    pub stops: Vec<StopMessage>,
    #[prost(message, repeated, tag = "3")]
    pub buses: Vec<BusMessage>,
    #[prost(message, optional, tag = "4")]
    pub routing_settings: Option<RoutingSettingsMessage>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub(super) struct StopMessage {
    #[prost(uint32, tag = "1")]
    pub name: u32,
    #[prost(double, tag = "2")]
    pub lat: f64,
    #[prost(double, tag = "3")]
    pub lng: f64,
    #[prost(message, repeated, tag = "4")]
    pub road_distances: Vec<RoadDistanceMessage>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub(super) struct RoadDistanceMessage {
    #[prost(uint32, tag = "1")]
    pub to: u32,
    #[prost(uint32, tag = "2")]
    pub meters: u32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub(super) struct BusMessage {
    #[prost(uint32, tag = "1")]
    pub name: u32,
    #[prost(uint32, repeated, tag = "2")]
    pub stops: Vec<u32>,
    #[prost(bool, tag = "3")]
    pub is_roundtrip: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub(super) struct RoutingSettingsMessage {
    #[prost(double, tag = "1")]
    pub bus_velocity: f64,
    #[prost(double, tag = "2")]
    pub bus_wait_time: f64,
}

impl From<&CatalogueSnapshot> for SnapshotMessage {
    fn from(snapshot: &CatalogueSnapshot) -> Self {
        Self {
            names: snapshot.names.clone(),
            stops: snapshot
                .stops
                .iter()
                .map(|stop| StopMessage {
                    name: stop.name,
                    lat: stop.coordinates.lat,
                    lng: stop.coordinates.lng,
                    road_distances: stop
                        .road_distances
                        .iter()
                        .map(|d| RoadDistanceMessage {
                            to: d.to,
                            meters: d.meters,
                        })
                        .collect(),
                })
                .collect(),
            buses: snapshot
                .buses
                .iter()
                .map(|bus| BusMessage {
                    name: bus.name,
                    stops: bus.stops.clone(),
                    is_roundtrip: bus.is_roundtrip,
                })
                .collect(),
            routing_settings: snapshot.routing_settings.map(|s| RoutingSettingsMessage {
                bus_velocity: s.bus_velocity,
                bus_wait_time: s.bus_wait_time,
            }),
        }
    }
}

impl From<SnapshotMessage> for CatalogueSnapshot {
    fn from(message: SnapshotMessage) -> Self {
        Self {
            names: message.names,
            stops: message
                .stops
                .into_iter()
                .map(|stop| StopRecord {
                    name: stop.name,
                    coordinates: Coordinates::new(stop.lat, stop.lng),
                    road_distances: stop
                        .road_distances
                        .into_iter()
                        .map(|d| RoadDistance {
                            to: d.to,
                            meters: d.meters,
                        })
                        .collect(),
                })
                .collect(),
            buses: message
                .buses
                .into_iter()
                .map(|bus| BusRecord {
                    name: bus.name,
                    stops: bus.stops,
                    is_roundtrip: bus.is_roundtrip,
                })
                .collect(),
            // Validated when a router is built from them
            routing_settings: message.routing_settings.map(|s| RoutingSettings {
                bus_velocity: s.bus_velocity,
                bus_wait_time: s.bus_wait_time,
            }),
        }
    }
}
