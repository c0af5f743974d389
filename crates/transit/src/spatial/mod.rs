//! Geographic coordinates and distance utilities.

pub mod coordinates;
pub mod queries;

pub use coordinates::Coordinates;
pub use queries::compute_distance;
