//! Sidereal reference frames (ayanamsa models).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ChartError, ProviderError};
use crate::time::julian_centuries;
use crate::zodiac::normalize_degrees;

/// Supported precession models. Lahiri (Chitra-Paksha) is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AyanamsaMode {
    #[default]
    Lahiri,
    Raman,
    Krishnamurti,
    Yukteshwar,
}

/// Name -> mode. Aliases map onto the same model.
const AYANAMSAS: &[(&str, AyanamsaMode)] = &[
    ("lahiri", AyanamsaMode::Lahiri),
    ("chitrapaksha", AyanamsaMode::Lahiri),
    ("raman", AyanamsaMode::Raman),
    ("krishnamurti", AyanamsaMode::Krishnamurti),
    ("kp", AyanamsaMode::Krishnamurti),
    ("yukteshwar", AyanamsaMode::Yukteshwar),
];

impl AyanamsaMode {
    /// Ayanamsa at J2000.0 in degrees.
    pub const fn reference_j2000_deg(self) -> f64 {
        match self {
            // Spica at 0 Libra sidereal
            AyanamsaMode::Lahiri => 23.853,
            AyanamsaMode::Raman => 22.370,
            AyanamsaMode::Krishnamurti => 23.850,
            AyanamsaMode::Yukteshwar => 22.376,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AyanamsaMode::Lahiri => "lahiri",
            AyanamsaMode::Raman => "raman",
            AyanamsaMode::Krishnamurti => "krishnamurti",
            AyanamsaMode::Yukteshwar => "yukteshwar",
        }
    }
}

impl fmt::Display for AyanamsaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AyanamsaMode {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', '_', ' '], "");
        AYANAMSAS
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, mode)| *mode)
            .ok_or_else(|| {
                let valid: Vec<&str> = AYANAMSAS.iter().map(|(name, _)| *name).collect();
                ChartError::Input(format!("Invalid ayanamsa: {}. Valid ayanamsas: {:?}", s, valid))
            })
    }
}

/// Source of the sidereal offset for a given instant and model.
pub trait SiderealOffsetProvider {
    fn offset(&self, jd_ut: f64, mode: AyanamsaMode) -> Result<f64, ProviderError>;
}

/// Mean ayanamsa: reference value at J2000.0 plus IAU 2006 general precession
/// in longitude.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanPrecessionAyanamsa;

impl SiderealOffsetProvider for MeanPrecessionAyanamsa {
    fn offset(&self, jd_ut: f64, mode: AyanamsaMode) -> Result<f64, ProviderError> {
        let t = julian_centuries(jd_ut);
        Ok(mode.reference_j2000_deg() + general_precession_longitude_deg(t))
    }
}

/// IAU 2006 general precession in ecliptic longitude, degrees.
pub fn general_precession_longitude_deg(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;
    let arcsec =
        5028.796195 * t + 1.1054348 * t2 + 0.00007964 * t3 - 0.000023857 * t4 - 0.0000000383 * t5;
    arcsec / 3600.0
}

/// A resolved sidereal frame: one model, one offset, shared by every body of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiderealFrame {
    pub mode: AyanamsaMode,
    pub offset_deg: f64,
}

impl SiderealFrame {
    pub fn resolve<S: SiderealOffsetProvider + ?Sized>(
        provider: &S,
        jd_ut: f64,
        mode: AyanamsaMode,
    ) -> Result<Self, ProviderError> {
        let offset_deg = provider.offset(jd_ut, mode)?;
        log::debug!("ayanamsa {} at JD {:.5}: {:.6} deg", mode, jd_ut, offset_deg);
        Ok(Self { mode, offset_deg })
    }

    /// Tropical longitude to sidereal, reduced to [0, 360).
    pub fn to_sidereal(&self, tropical_longitude: f64) -> f64 {
        normalize_degrees(tropical_longitude - self.offset_deg)
    }
}
