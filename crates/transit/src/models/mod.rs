//! Catalogue data models and error types.

pub mod types;

// Re-exports for convenience
pub use types::{
    Bus, BusDescription, BusInfo, CatalogueError, Result, Stop, StopDescription,
};
