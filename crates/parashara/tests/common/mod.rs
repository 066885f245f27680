#![allow(dead_code)]

use std::collections::HashMap;

use parashara::ephemeris::{GeoLocation, PositionProvider, TropicalPosition};
use parashara::sidereal::{AyanamsaMode, SiderealOffsetProvider};
use parashara::{ChartCalculator, Graha, ProviderError};

/// Deterministic sky: fixed tropical longitudes and speeds, fixed Ascendant.
#[derive(Debug, Clone)]
pub struct FakeSky {
    pub bodies: HashMap<Graha, (f64, f64)>,
    pub ascendant: f64,
}

impl FakeSky {
    /// Every body at 0° Aries moving direct, Aries rising.
    pub fn new() -> Self {
        let bodies = Graha::ALL
            .iter()
            .filter(|g| **g != Graha::Ketu)
            .map(|g| (*g, (0.0, 1.0)))
            .collect();
        Self { bodies, ascendant: 0.0 }
    }

    pub fn with_body(mut self, graha: Graha, lon: f64, speed: f64) -> Self {
        self.bodies.insert(graha, (lon, speed));
        self
    }

    pub fn with_ascendant(mut self, lon: f64) -> Self {
        self.ascendant = lon;
        self
    }
}

impl PositionProvider for FakeSky {
    fn position(&self, jd_ut: f64, body: Graha) -> Result<TropicalPosition, ProviderError> {
        self.bodies
            .get(&body)
            .map(|(lon, speed)| TropicalPosition { lon: *lon, speed_lon: *speed })
            .ok_or(ProviderError::CalculationFailed {
                body: body.to_string(),
                jd: jd_ut,
                message: "body not in fake sky".to_string(),
            })
    }

    fn ascendant(&self, _jd_ut: f64, _location: GeoLocation) -> Result<f64, ProviderError> {
        Ok(self.ascendant)
    }

    fn valid_range(&self) -> (f64, f64) {
        (2_378_496.5, 2_524_593.5)
    }
}

/// Sidereal equals tropical.
pub struct NoAyanamsa;

impl SiderealOffsetProvider for NoAyanamsa {
    fn offset(&self, _jd_ut: f64, _mode: AyanamsaMode) -> Result<f64, ProviderError> {
        Ok(0.0)
    }
}

pub fn calculator(sky: FakeSky) -> ChartCalculator<FakeSky, NoAyanamsa> {
    ChartCalculator::with_offsets(sky, NoAyanamsa)
}

pub fn greenwich() -> GeoLocation {
    GeoLocation { lat: 51.48, lon: 0.0 }
}
