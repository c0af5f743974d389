use crate::models::types::{CatalogueError, Result};

/// Vehicle speed and boarding delay used to weigh the route graph
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutingSettings {
    /// Bus speed in km/h
    pub bus_velocity: f64,
    /// Minutes spent waiting for a bus at every boarding
    pub bus_wait_time: f64,
}

impl RoutingSettings {
    pub fn new(bus_velocity: f64, bus_wait_time: f64) -> Result<Self> {
        let settings = Self {
            bus_velocity,
            bus_wait_time,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.bus_velocity.is_finite() || self.bus_velocity <= 0.0 {
            return Err(CatalogueError::InvalidSettings(format!(
                "bus_velocity must be positive, got {}",
                self.bus_velocity
            )));
        }
        if !self.bus_wait_time.is_finite() || self.bus_wait_time < 0.0 {
            return Err(CatalogueError::InvalidSettings(format!(
                "bus_wait_time must not be negative, got {}",
                self.bus_wait_time
            )));
        }
        Ok(())
    }

    /// Minutes needed to cover `meters` at the configured speed
    pub fn travel_time(&self, meters: f64) -> f64 {
        const MINUTES_PER_HOUR: f64 = 60.0;
        const METERS_PER_KILOMETER: f64 = 1000.0;

        (meters * MINUTES_PER_HOUR) / (METERS_PER_KILOMETER * self.bus_velocity)
    }
}
