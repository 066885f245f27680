use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Geographic location coordinates (degrees, east and north positive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

impl GeoLocation {
    pub fn new(lat: f64, lon: f64) -> Result<Self, ChartError> {
        let location = Self { lat, lon };
        location.validate()?;
        Ok(location)
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        if !self.lat.is_finite() || self.lat.abs() > 90.0 {
            return Err(ChartError::Input(format!("latitude {} outside -90..=90", self.lat)));
        }
        if !self.lon.is_finite() || self.lon.abs() > 180.0 {
            return Err(ChartError::Input(format!("longitude {} outside -180..=180", self.lon)));
        }
        Ok(())
    }
}

/// Tropical ecliptic position returned by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TropicalPosition {
    /// Longitude in degrees (0-360)
    pub lon: f64,
    /// Speed in longitude (degrees per day)
    pub speed_lon: f64,
}

impl TropicalPosition {
    pub fn is_retrograde(&self) -> bool {
        self.speed_lon < 0.0
    }
}
