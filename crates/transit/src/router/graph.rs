//! Weighted directed graph backing the router.
//!
//! Storage and search are delegated to petgraph. A* with a zero heuristic
//! behaves like Dijkstra but hands back the full vertex path.

use petgraph::algo::astar;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::identifiers::{BusIdentifier, StopIdentifier};

/// Dense vertex number, `0..vertex_count()`
pub type VertexId = usize;

/// What an edge of the route graph stands for
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    /// Waiting at a stop before boarding
    Wait(StopIdentifier),
    /// Riding a bus without leaving it
    Bus(BusIdentifier),
}

#[derive(Clone, Debug, PartialEq)]
pub struct RouteEdge {
    pub kind: EdgeKind,
    /// Number of stop-to-stop hops covered, zero for waits
    pub span_count: usize,
    /// Minutes
    pub weight: f64,
}

/// A least-cost path: total weight and the edges taken, in order
#[derive(Clone, Debug, PartialEq)]
pub struct PathInfo {
    pub weight: f64,
    pub edges: Vec<EdgeIndex>,
}

#[derive(Clone, Debug, Default)]
pub struct RouteGraph {
    graph: DiGraph<(), RouteEdge>,
}

impl RouteGraph {
    pub fn with_vertices(count: usize) -> Self {
        let mut graph = DiGraph::with_capacity(count, count);
        for _ in 0..count {
            graph.add_node(());
        }
        Self { graph }
    }

    /// Insert an edge. Both endpoints must be below `vertex_count()`.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, edge: RouteEdge) -> EdgeIndex {
        self.graph
            .add_edge(NodeIndex::new(from), NodeIndex::new(to), edge)
    }

    pub fn edge(&self, id: EdgeIndex) -> Option<&RouteEdge> {
        self.graph.edge_weight(id)
    }

    pub fn edges(&self) -> impl Iterator<Item = &RouteEdge> {
        self.graph.edge_weights()
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Least-cost path between two vertices, `None` if `to` is unreachable.
    ///
    /// Between two consecutive vertices of the path the cheapest parallel
    /// edge is used, the lowest edge index winning ties, so the answer only
    /// depends on the order edges were inserted in.
    pub fn shortest_path(&self, from: VertexId, to: VertexId) -> Option<PathInfo> {
        if from >= self.vertex_count() || to >= self.vertex_count() {
            return None;
        }

        let goal = NodeIndex::new(to);
        let (weight, vertices) = astar(
            &self.graph,
            NodeIndex::new(from),
            |n| n == goal,
            |e| e.weight().weight,
            |_| 0.0,
        )?;

        let edges = vertices
            .windows(2)
            .map(|pair| {
                self.graph
                    .edges_connecting(pair[0], pair[1])
                    .min_by(|a, b| {
                        a.weight()
                            .weight
                            .total_cmp(&b.weight().weight)
                            .then(a.id().cmp(&b.id()))
                    })
                    .map(|e| e.id())
            })
            .collect::<Option<Vec<_>>>()?;

        Some(PathInfo { weight, edges })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wait(stop: &str, weight: f64) -> RouteEdge {
        RouteEdge {
            kind: EdgeKind::Wait(StopIdentifier::new(stop)),
            span_count: 0,
            weight,
        }
    }

    fn ride(bus: &str, span_count: usize, weight: f64) -> RouteEdge {
        RouteEdge {
            kind: EdgeKind::Bus(BusIdentifier::new(bus)),
            span_count,
            weight,
        }
    }

    #[test]
    fn test_empty_path_to_self() {
        let graph = RouteGraph::with_vertices(2);
        let path = graph.shortest_path(1, 1).unwrap();

        assert_eq!(path.weight, 0.0);
        assert!(path.edges.is_empty());
    }

    #[test]
    fn test_unreachable_and_out_of_range() {
        let mut graph = RouteGraph::with_vertices(3);
        graph.add_edge(0, 1, wait("A", 1.0));

        assert!(graph.shortest_path(0, 2).is_none());
        assert!(graph.shortest_path(1, 0).is_none());
        assert!(graph.shortest_path(0, 7).is_none());
    }

    #[test]
    fn test_picks_cheaper_detour() {
        let mut graph = RouteGraph::with_vertices(3);
        graph.add_edge(0, 2, ride("direct", 1, 10.0));
        let first = graph.add_edge(0, 1, ride("a", 1, 3.0));
        let second = graph.add_edge(1, 2, ride("b", 1, 4.0));

        let path = graph.shortest_path(0, 2).unwrap();
        assert_eq!(path.weight, 7.0);
        assert_eq!(path.edges, vec![first, second]);
    }

    #[test]
    fn test_parallel_edges_resolve_to_cheapest() {
        let mut graph = RouteGraph::with_vertices(2);
        graph.add_edge(0, 1, ride("slow", 2, 9.0));
        let fast = graph.add_edge(0, 1, ride("fast", 2, 4.0));
        graph.add_edge(0, 1, ride("also-fast", 2, 4.0));

        let path = graph.shortest_path(0, 1).unwrap();
        assert_eq!(path.edges, vec![fast]);
        assert_eq!(graph.edge(fast).unwrap().kind, EdgeKind::Bus("fast".into()));
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.vertex_count(), 2);
    }
}
