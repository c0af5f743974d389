//! Great-circle distance on a spherical Earth.

use std::f64::consts::PI;

use super::coordinates::Coordinates;

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

const DEGREES_TO_RADIANS: f64 = PI / 180.0;

/// Great-circle distance between two points in meters.
///
/// Uses the spherical law of cosines. Identical coordinates are exactly 0.
pub fn compute_distance(from: Coordinates, to: Coordinates) -> f64 {
    if from == to {
        return 0.0;
    }

    let (lat1, lat2) = (from.lat * DEGREES_TO_RADIANS, to.lat * DEGREES_TO_RADIANS);
    let delta_lng = (from.lng - to.lng).abs() * DEGREES_TO_RADIANS;

    let cos_angle = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * delta_lng.cos();

    // Rounding can push the cosine just outside [-1, 1]
    cos_angle.clamp(-1.0, 1.0).acos() * EARTH_RADIUS_M
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identical_points() {
        let p = Coordinates::new(55.595884, 37.209755);
        assert_eq!(compute_distance(p, p), 0.0);
    }

    #[test]
    fn test_one_degree_along_equator() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(0.0, 1.0);

        let expected = EARTH_RADIUS_M * DEGREES_TO_RADIANS; // ~111.195 km
        assert_relative_eq!(compute_distance(a, b), expected, max_relative = 1e-6);
    }

    #[test]
    fn test_symmetric() {
        let a = Coordinates::new(55.611087, 37.20829);
        let b = Coordinates::new(55.595884, 37.209755);

        assert_relative_eq!(compute_distance(a, b), compute_distance(b, a));
        assert!((compute_distance(a, b) - 1692.0).abs() < 10.0);
    }
}
