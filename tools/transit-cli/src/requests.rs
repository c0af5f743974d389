use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use transport_catalogue::prelude::*;

/// Top-level request document
#[derive(Debug, Default, Deserialize)]
pub struct InputDocument {
    #[serde(default)]
    pub base_requests: Vec<BaseRequest>,

    #[serde(default)]
    pub stat_requests: Vec<StatRequest>,

    #[serde(default)]
    pub routing_settings: Option<RoutingSettings>,

    #[serde(default)]
    pub serialization_settings: Option<SerializationSettings>,
}

#[derive(Debug, Deserialize)]
pub struct SerializationSettings {
    pub file: PathBuf,
}

/// Network definition records
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop {
        name: String,
        latitude: f64,
        longitude: f64,
        #[serde(default)]
        road_distances: BTreeMap<String, u32>,
    },
    Bus {
        name: String,
        stops: Vec<String>,
        is_roundtrip: bool,
    },
}

/// Queries answered against the loaded network
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum StatRequest {
    Bus { id: i64, name: String },
    Stop { id: i64, name: String },
    Route { id: i64, from: String, to: String },
    Map { id: i64 },
}

impl StatRequest {
    pub fn id(&self) -> i64 {
        match self {
            StatRequest::Bus { id, .. }
            | StatRequest::Stop { id, .. }
            | StatRequest::Route { id, .. }
            | StatRequest::Map { id } => *id,
        }
    }
}

impl InputDocument {
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse request document")
    }

    pub fn has_route_requests(&self) -> bool {
        self.stat_requests
            .iter()
            .any(|r| matches!(r, StatRequest::Route { .. }))
    }

    /// Snapshot file named by `serialization_settings`
    pub fn snapshot_path(&self) -> Result<&Path> {
        self.serialization_settings
            .as_ref()
            .map(|s| s.file.as_path())
            .context("Document has no serialization_settings.file")
    }

    /// Load `base_requests` into a catalogue: stops and distances, then buses
    pub fn build_catalogue(&self) -> Result<TransportCatalogue> {
        let mut stops = Vec::new();
        let mut buses = Vec::new();

        for request in &self.base_requests {
            match request {
                BaseRequest::Stop {
                    name,
                    latitude,
                    longitude,
                    road_distances,
                } => stops.push(StopDescription {
                    name: name.clone(),
                    coordinates: Coordinates::new(*latitude, *longitude),
                    road_distances: road_distances.clone(),
                }),
                BaseRequest::Bus {
                    name,
                    stops: bus_stops,
                    is_roundtrip,
                } => buses.push(BusDescription {
                    name: name.clone(),
                    stops: bus_stops.clone(),
                    is_roundtrip: *is_roundtrip,
                }),
            }
        }

        log::debug!(
            "Loading {} stops and {} buses",
            stops.len(),
            buses.len()
        );

        TransportCatalogue::from_descriptions(stops, buses)
            .context("Failed to load base requests")
    }
}

pub fn read_snapshot(path: &Path) -> Result<CatalogueSnapshot> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read snapshot from {}", path.display()))?;

    CatalogueSnapshot::from_bytes(&bytes)
        .with_context(|| format!("Failed to decode snapshot {}", path.display()))
}

pub fn write_snapshot(snapshot: &CatalogueSnapshot, path: &Path) -> Result<()> {
    std::fs::write(path, snapshot.to_bytes())
        .with_context(|| format!("Failed to write snapshot to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "base_requests": [
            {"type": "Bus", "name": "14", "stops": ["Lipetskaya", "Zagorye"], "is_roundtrip": false},
            {"type": "Stop", "name": "Lipetskaya", "latitude": 55.5, "longitude": 37.6,
             "road_distances": {"Zagorye": 1500}},
            {"type": "Stop", "name": "Zagorye", "latitude": 55.6, "longitude": 37.6}
        ],
        "routing_settings": {"bus_velocity": 30, "bus_wait_time": 2},
        "render_settings": {"width": 600},
        "stat_requests": [
            {"id": 1, "type": "Bus", "name": "14"},
            {"id": 2, "type": "Route", "from": "Lipetskaya", "to": "Zagorye"},
            {"id": 3, "type": "Map"}
        ]
    }"#;

    #[test]
    fn test_parse_document() {
        let doc = InputDocument::parse(DOCUMENT).unwrap();

        assert_eq!(doc.base_requests.len(), 3);
        assert_eq!(doc.stat_requests.len(), 3);
        assert_eq!(doc.stat_requests[2].id(), 3);
        assert!(doc.has_route_requests());
        assert_eq!(
            doc.routing_settings,
            Some(RoutingSettings {
                bus_velocity: 30.0,
                bus_wait_time: 2.0
            })
        );
        assert!(doc.snapshot_path().is_err());
    }

    #[test]
    fn test_buses_load_after_stops() {
        // The bus is listed before its stops in the document
        let doc = InputDocument::parse(DOCUMENT).unwrap();
        let catalogue = doc.build_catalogue().unwrap();

        let info = catalogue.bus_info("14").unwrap();
        assert_eq!(info.stop_count, 3);
        assert_eq!(info.unique_stop_count, 2);
        assert_eq!(info.route_length, 3000);
    }

    #[test]
    fn test_unknown_stop_fails_whole_batch() {
        let doc = InputDocument::parse(
            r#"{"base_requests": [
                {"type": "Bus", "name": "1", "stops": ["Ghost"], "is_roundtrip": true}
            ]}"#,
        )
        .unwrap();

        assert!(doc.build_catalogue().is_err());
    }

    #[test]
    fn test_unknown_request_type() {
        let result = InputDocument::parse(r#"{"stat_requests": [{"id": 1, "type": "Tram"}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialization_settings() {
        let doc =
            InputDocument::parse(r#"{"serialization_settings": {"file": "base.pb"}}"#).unwrap();
        assert_eq!(doc.snapshot_path().unwrap(), Path::new("base.pb"));
    }
}
