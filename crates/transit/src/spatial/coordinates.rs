use geo::{Coord, Point};

/// A latitude/longitude pair in degrees
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

// geo uses x = longitude, y = latitude
impl From<Coordinates> for Point {
    fn from(c: Coordinates) -> Self {
        Point::new(c.lng, c.lat)
    }
}

impl From<Coordinates> for Coord {
    fn from(c: Coordinates) -> Self {
        Coord { x: c.lng, y: c.lat }
    }
}

impl From<Point> for Coordinates {
    fn from(p: Point) -> Self {
        Self::new(p.y(), p.x())
    }
}
