use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::catalogue::TransportCatalogue;
use crate::identifiers::*;
use crate::models::types::{Bus, CatalogueError, Result};

use super::graph::{EdgeKind, RouteEdge, RouteGraph, VertexId};
use super::settings::RoutingSettings;

/// One leg of an itinerary
#[derive(Clone, Debug, PartialEq)]
pub enum Item {
    Wait {
        stop: StopIdentifier,
        time: f64,
    },
    Bus {
        bus: BusIdentifier,
        span_count: usize,
        time: f64,
    },
}

impl Item {
    pub fn time(&self) -> f64 {
        match self {
            Item::Wait { time, .. } | Item::Bus { time, .. } => *time,
        }
    }
}

impl From<&RouteEdge> for Item {
    fn from(edge: &RouteEdge) -> Self {
        match &edge.kind {
            EdgeKind::Wait(stop) => Item::Wait {
                stop: stop.clone(),
                time: edge.weight,
            },
            EdgeKind::Bus(bus) => Item::Bus {
                bus: bus.clone(),
                span_count: edge.span_count,
                time: edge.weight,
            },
        }
    }
}

/// A rider itinerary with its total duration in minutes
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Route {
    pub total_time: f64,
    pub items: Vec<Item>,
}

/// Why a query produced no route
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("Stop is not served by any bus: {0}")]
    InvalidEndpoint(StopIdentifier),

    #[error("No route between the stops")]
    RouteNotFound,
}

/// Route graph compiled from a finished catalogue.
///
/// Built once, then only read; queries never mutate it.
#[derive(Clone, Debug)]
pub struct RouteBuilder {
    settings: RoutingSettings,
    graph: RouteGraph,
    // Arrival vertex of each routable stop; boarding is the next id
    stop_vertices: HashMap<StopIdentifier, VertexId>,
}

impl RouteBuilder {
    pub fn new(catalogue: &TransportCatalogue, settings: RoutingSettings) -> Result<Self> {
        settings.validate()?;

        let stops = catalogue.routable_stops();
        let mut graph = RouteGraph::with_vertices(stops.len() * 2);
        let mut stop_vertices = HashMap::with_capacity(stops.len());
        let mut vertex_by_id = HashMap::with_capacity(stops.len());

        for (index, stop) in stops.iter().enumerate() {
            let arrival = index * 2;
            stop_vertices.insert(stop.name.clone(), arrival);
            vertex_by_id.insert(stop.id, arrival);

            graph.add_edge(
                arrival,
                arrival + 1,
                RouteEdge {
                    kind: EdgeKind::Wait(stop.name.clone()),
                    span_count: 0,
                    weight: settings.bus_wait_time,
                },
            );
        }

        let mut builder = Self {
            settings,
            graph,
            stop_vertices,
        };

        for bus in catalogue.buses() {
            let positions = resolve_positions(catalogue, bus, &vertex_by_id)?;
            let offsets = cumulative_distances(catalogue, bus);
            let len = bus.stops.len();

            if bus.is_roundtrip {
                builder.add_bus_edges(bus, &positions, &offsets, 0, len, true);
            } else {
                // The stored walk is outbound + return; each half is ridden separately
                let middle = len / 2;
                builder.add_bus_edges(bus, &positions, &offsets, 0, middle + 1, false);
                builder.add_bus_edges(bus, &positions, &offsets, middle, len, false);
            }
        }

        debug!(
            vertices = builder.graph.vertex_count(),
            edges = builder.graph.edge_count(),
            "route graph built"
        );

        Ok(builder)
    }

    pub fn settings(&self) -> &RoutingSettings {
        &self.settings
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Fastest itinerary between two stops, `None` if there is none
    pub fn query(&self, from: &str, to: &str) -> Option<Route> {
        self.resolve(from, to).ok()
    }

    /// Fastest itinerary between two stops, with the reason when there is none.
    ///
    /// The search runs from the arrival vertex of `from` to the boarding
    /// vertex of `to`, so every path ends with a wait at `to` that the rider
    /// never sits through. That wait is removed from both the items and the
    /// total time.
    pub fn resolve(&self, from: &str, to: &str) -> std::result::Result<Route, QueryError> {
        let from_vertex = self.vertex(from)?;
        let to_vertex = self.vertex(to)?;

        if from == to {
            return Ok(Route::default());
        }

        let path = self
            .graph
            .shortest_path(from_vertex, to_vertex + 1)
            .ok_or(QueryError::RouteNotFound)?;

        let mut items: Vec<Item> = path
            .edges
            .iter()
            .filter_map(|&id| self.graph.edge(id))
            .map(Item::from)
            .collect();
        items.pop();

        Ok(Route {
            total_time: path.weight - self.settings.bus_wait_time,
            items,
        })
    }

    fn vertex(&self, stop: &str) -> std::result::Result<VertexId, QueryError> {
        self.stop_vertices
            .get(stop)
            .copied()
            .ok_or_else(|| QueryError::InvalidEndpoint(StopIdentifier::new(stop)))
    }

    /// Travel edges for every boarding position `i` and alighting position
    /// `j` with `begin <= i < j < end`.
    fn add_bus_edges(
        &mut self,
        bus: &Bus,
        positions: &[VertexId],
        offsets: &[u64],
        begin: usize,
        end: usize,
        is_loop: bool,
    ) {
        let before = self.graph.edge_count();

        for i in begin..end {
            for j in (i + 1)..end {
                // First to last position of a loop is the same stop
                if is_loop && i == 0 && j == positions.len() - 1 {
                    continue;
                }

                let meters = (offsets[j] - offsets[i]) as f64;
                self.graph.add_edge(
                    positions[i] + 1,
                    positions[j],
                    RouteEdge {
                        kind: EdgeKind::Bus(bus.name.clone()),
                        span_count: j - i,
                        weight: self.settings.travel_time(meters),
                    },
                );
            }
        }

        trace!(
            bus = %bus.name,
            begin,
            end,
            edges = self.graph.edge_count() - before,
            "travel edges added"
        );
    }
}

/// Arrival vertex for every position of the bus walk
fn resolve_positions(
    catalogue: &TransportCatalogue,
    bus: &Bus,
    vertex_by_id: &HashMap<StopId, VertexId>,
) -> Result<Vec<VertexId>> {
    bus.stops
        .iter()
        .map(|&id| {
            vertex_by_id
                .get(&id)
                .copied()
                .ok_or_else(|| CatalogueError::StopNotFound(stop_name(catalogue, id)))
        })
        .collect()
}

/// Road meters from the first stop of the walk to every position.
///
/// A pair with no distance in either direction counts as 0 m, the same as
/// in the bus's route length.
fn cumulative_distances(catalogue: &TransportCatalogue, bus: &Bus) -> Vec<u64> {
    let mut offsets = Vec::with_capacity(bus.stops.len());
    let mut total = 0u64;
    offsets.push(total);

    for pair in bus.stops.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let meters = catalogue.road_distance(from, to).unwrap_or_else(|| {
            warn!(
                bus = %bus.name,
                from = %stop_name(catalogue, from),
                to = %stop_name(catalogue, to),
                "no road distance between consecutive stops, riding it takes no time"
            );
            0
        });

        total += u64::from(meters);
        offsets.push(total);
    }

    offsets
}

fn stop_name(catalogue: &TransportCatalogue, id: StopId) -> StopIdentifier {
    catalogue
        .stop_by_id(id)
        .map(|stop| stop.name.clone())
        .unwrap_or_else(|| StopIdentifier::new(id.to_string()))
}
