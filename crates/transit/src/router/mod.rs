//! Shortest-time routing over the catalogue.
//!
//! Every routable stop becomes two vertices: an arrival vertex and a boarding
//! vertex joined by a wait edge. Riding a bus between two stops of the same
//! line is a single travel edge from the boarding vertex of one to the
//! arrival vertex of the other, so the wait is charged once per boarding.

pub mod builder;
pub mod graph;
pub mod settings;

pub use builder::{Item, QueryError, Route, RouteBuilder};
pub use graph::{EdgeKind, PathInfo, RouteEdge, RouteGraph, VertexId};
pub use settings::RoutingSettings;
