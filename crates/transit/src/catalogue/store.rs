//! In-memory transport catalogue.
//!
//! Stops and buses live in append-only vectors addressed by [`StopId`] and
//! [`BusId`]. Route statistics are computed once, when a bus is inserted.

use std::collections::{BTreeSet, HashMap, HashSet};

use geo::LineString;
use tracing::{debug, warn};

use crate::identifiers::*;
use crate::models::types::*;
use crate::spatial::{compute_distance, Coordinates};

/// Stops, buses and road distances of one transit network.
///
/// Populate it with [`add_stop`](Self::add_stop),
/// [`set_distance`](Self::set_distance) and [`add_bus`](Self::add_bus), in
/// that order, then treat it as read-only.
#[derive(Clone, Debug, Default)]
pub struct TransportCatalogue {
    // Core data
    stops: Vec<Stop>,
    buses: Vec<Bus>,

    // Lookup maps
    stop_map: HashMap<StopIdentifier, StopId>,
    bus_map: HashMap<BusIdentifier, BusId>,

    // Indexed by StopId
    stop_buses: Vec<BTreeSet<BusIdentifier>>,

    distances: HashMap<(StopId, StopId), u32>,
}

impl TransportCatalogue {
    /// Create a new empty catalogue
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalogue from one input batch.
    ///
    /// All stops are inserted first, then their road distances, then the
    /// buses. The first integrity error aborts the whole batch.
    pub fn from_descriptions(
        stops: impl IntoIterator<Item = StopDescription>,
        buses: impl IntoIterator<Item = BusDescription>,
    ) -> Result<Self> {
        let mut catalogue = Self::new();

        let mut road_distances = Vec::new();
        for stop in stops {
            catalogue.add_stop(stop.name.as_str(), stop.coordinates)?;
            road_distances.push((stop.name, stop.road_distances));
        }

        for (from, distances) in &road_distances {
            for (to, meters) in distances {
                catalogue.set_distance(from, to, *meters)?;
            }
        }

        for bus in buses {
            catalogue.add_bus(bus.name.as_str(), &bus.expanded_stops(), bus.is_roundtrip)?;
        }

        debug!(
            stops = catalogue.stops.len(),
            buses = catalogue.buses.len(),
            distances = catalogue.distances.len(),
            "catalogue loaded"
        );

        Ok(catalogue)
    }

    // ---- Mutation ----

    pub fn add_stop(
        &mut self,
        name: impl Into<StopIdentifier>,
        coordinates: Coordinates,
    ) -> Result<StopId> {
        let name = name.into();

        if self.stop_map.contains_key(&name) {
            return Err(CatalogueError::DuplicateStop(name));
        }
        if !coordinates.is_finite() {
            return Err(CatalogueError::InvalidData(format!(
                "Stop {} has non-finite coordinates",
                name
            )));
        }

        let id = StopId::from_index(self.stops.len());
        self.stop_map.insert(name.clone(), id);
        self.stops.push(Stop {
            id,
            name,
            coordinates,
        });
        self.stop_buses.push(BTreeSet::new());

        Ok(id)
    }

    /// Record the road distance from one stop to another.
    ///
    /// Later calls for the same ordered pair replace the earlier value.
    pub fn set_distance(&mut self, from: &str, to: &str, meters: u32) -> Result<()> {
        let from = self.resolve_stop(from)?;
        let to = self.resolve_stop(to)?;

        self.distances.insert((from, to), meters);
        Ok(())
    }

    /// Insert a bus line.
    ///
    /// `stops` must already be the full walk: lines that are not round trips
    /// are expected in their there-and-back form (see
    /// [`expand_stop_sequence`]). Nothing is modified if validation fails.
    pub fn add_bus<S: AsRef<str>>(
        &mut self,
        name: impl Into<BusIdentifier>,
        stops: &[S],
        is_roundtrip: bool,
    ) -> Result<BusId> {
        let name = name.into();

        if self.bus_map.contains_key(&name) {
            return Err(CatalogueError::DuplicateBus(name));
        }
        if stops.is_empty() {
            return Err(CatalogueError::InvalidData(format!(
                "Bus {} has no stops",
                name
            )));
        }

        let stops = stops
            .iter()
            .map(|stop| self.resolve_stop(stop.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        if !is_roundtrip && !stops.iter().eq(stops.iter().rev()) {
            return Err(CatalogueError::InvalidData(format!(
                "Bus {} is not a round trip but its stops do not return to the start",
                name
            )));
        }

        let mut route_length = 0u64;
        let mut geographic_distance = 0.0;

        for pair in stops.windows(2) {
            let (from, to) = (pair[0], pair[1]);

            geographic_distance += compute_distance(
                self.stops[from.index()].coordinates,
                self.stops[to.index()].coordinates,
            );

            match self.road_distance(from, to) {
                Some(meters) => route_length += u64::from(meters),
                None => warn!(
                    bus = %name,
                    from = %self.stops[from.index()].name,
                    to = %self.stops[to.index()].name,
                    "no road distance between consecutive stops"
                ),
            }
        }

        let unique_stops: HashSet<StopId> = stops.iter().copied().collect();
        for stop in &unique_stops {
            self.stop_buses[stop.index()].insert(name.clone());
        }

        let id = BusId::from_index(self.buses.len());
        debug!(
            bus = %name,
            stops = stops.len(),
            unique_stops = unique_stops.len(),
            route_length,
            "bus added"
        );

        self.bus_map.insert(name.clone(), id);
        self.buses.push(Bus {
            id,
            name,
            stops,
            unique_stops,
            is_roundtrip,
            route_length,
            geographic_distance,
        });

        Ok(id)
    }

    // ---- Lookups ----

    pub fn stop(&self, name: &str) -> Option<&Stop> {
        self.stop_map.get(name).map(|id| &self.stops[id.index()])
    }

    pub fn stop_by_id(&self, id: StopId) -> Option<&Stop> {
        self.stops.get(id.index())
    }

    pub fn bus(&self, name: &str) -> Option<&Bus> {
        self.bus_map.get(name).map(|id| &self.buses[id.index()])
    }

    pub fn bus_by_id(&self, id: BusId) -> Option<&Bus> {
        self.buses.get(id.index())
    }

    /// Statistics for a bus, `None` if the bus is unknown
    pub fn bus_info(&self, name: &str) -> Option<BusInfo> {
        self.bus(name).map(Bus::info)
    }

    /// Names of the buses serving a stop, in lexicographic order.
    ///
    /// `None` if the stop is unknown; an empty set if no bus serves it.
    pub fn stop_buses(&self, name: &str) -> Option<&BTreeSet<BusIdentifier>> {
        self.stop_map
            .get(name)
            .map(|id| &self.stop_buses[id.index()])
    }

    /// Explicit directed distance from `from` to `to`, without fallback
    pub fn distance(&self, from: &str, to: &str) -> Result<Option<u32>> {
        let from = self.resolve_stop(from)?;
        let to = self.resolve_stop(to)?;
        Ok(self.distance_between(from, to))
    }

    pub fn distance_between(&self, from: StopId, to: StopId) -> Option<u32> {
        self.distances.get(&(from, to)).copied()
    }

    /// Road distance for travelling from `from` to `to`.
    ///
    /// Falls back to the reverse direction when only that one was recorded.
    pub fn road_distance(&self, from: StopId, to: StopId) -> Option<u32> {
        self.distance_between(from, to)
            .or_else(|| self.distance_between(to, from))
    }

    /// Every explicit directed distance as `(from, to, meters)`
    pub fn distances(&self) -> impl Iterator<Item = (StopId, StopId, u32)> + '_ {
        self.distances
            .iter()
            .map(|(&(from, to), &meters)| (from, to, meters))
    }

    // ---- Collections ----

    /// All stops in insertion order
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn bus_count(&self) -> usize {
        self.buses.len()
    }

    /// All buses sorted by name
    pub fn buses(&self) -> Vec<&Bus> {
        let mut buses: Vec<&Bus> = self.buses.iter().collect();
        buses.sort_by(|a, b| a.name.cmp(&b.name));
        buses
    }

    /// Stops served by at least one bus, in insertion order
    pub fn routable_stops(&self) -> Vec<&Stop> {
        self.stops
            .iter()
            .filter(|stop| !self.stop_buses[stop.id.index()].is_empty())
            .collect()
    }

    /// Path of a bus as a line through its stop locations
    pub fn bus_geometry(&self, bus: &Bus) -> LineString {
        bus.stops
            .iter()
            .map(|id| geo::Coord::from(self.stops[id.index()].coordinates))
            .collect()
    }

    fn resolve_stop(&self, name: &str) -> Result<StopId> {
        self.stop_map
            .get(name)
            .copied()
            .ok_or_else(|| CatalogueError::StopNotFound(StopIdentifier::new(name)))
    }
}
