//! # transport-catalogue
//!
//! In-memory bus network with route statistics and shortest-time routing.
//!
//! ## Features
//!
//! - **Catalogue**: stops, bus lines and road distances, with route length
//!   and curvature computed at load time
//! - **Routing**: a wait/ride graph answering "fastest way from A to B"
//! - **Snapshots**: compact binary form of a catalogue (feature `persistence`)
//!
//! ## Example
//!
//! ```
//! use transport_catalogue::prelude::*;
//!
//! let mut catalogue = TransportCatalogue::new();
//! catalogue.add_stop("Biryulyovo", Coordinates::new(55.574371, 37.6517))?;
//! catalogue.add_stop("Universam", Coordinates::new(55.587655, 37.645687))?;
//! catalogue.set_distance("Biryulyovo", "Universam", 2400)?;
//!
//! // Lines that are not round trips are stored there and back
//! let stops = expand_stop_sequence(&["Biryulyovo", "Universam"], false);
//! catalogue.add_bus("297", &stops, false)?;
//!
//! let info = catalogue.bus_info("297").unwrap();
//! assert_eq!(info.route_length, 4800);
//! assert_eq!(info.stop_count, 3);
//!
//! let router = RouteBuilder::new(&catalogue, RoutingSettings::new(40.0, 6.0)?)?;
//! let route = router.query("Biryulyovo", "Universam").unwrap();
//! assert_eq!(route.items.len(), 2); // wait, then ride
//! assert!((route.total_time - 9.6).abs() < 1e-9);
//! # Ok::<(), CatalogueError>(())
//! ```

pub mod catalogue;
pub mod identifiers;
pub mod models;
#[cfg(feature = "persistence")]
pub mod persistence;
pub mod router;
pub mod spatial;

// Re-exports for convenience
pub mod prelude {
    pub use crate::catalogue::TransportCatalogue;
    pub use crate::identifiers::*;
    pub use crate::models::types::*;
    #[cfg(feature = "persistence")]
    pub use crate::persistence::CatalogueSnapshot;
    pub use crate::router::{Item, QueryError, Route, RouteBuilder, RoutingSettings};
    pub use crate::spatial::{compute_distance, Coordinates};
}

pub use prelude::*;
