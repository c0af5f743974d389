//! The in-memory network store.

pub mod store;

pub use store::TransportCatalogue;
