use std::env;
use std::path::PathBuf;

use swisseph::swe::{calc_ut, houses_ex, set_ephe_path};
use swisseph::AscMc;

use crate::ephemeris::provider::PositionProvider;
use crate::ephemeris::types::{GeoLocation, TropicalPosition};
use crate::error::ProviderError;
use crate::zodiac::{normalize_degrees, Graha};

// Swiss Ephemeris body codes. Rahu is the mean node.
const BODY_CODES: &[(Graha, i32)] = &[
    (Graha::Sun, 0),
    (Graha::Moon, 1),
    (Graha::Mercury, 2),
    (Graha::Venus, 3),
    (Graha::Mars, 4),
    (Graha::Jupiter, 5),
    (Graha::Saturn, 6),
    (Graha::Rahu, 10),
];

const FLG_SWIEPH: i32 = 2;
const FLG_SPEED: i32 = 256;

/// Equal houses; only the Ascendant is read from the result.
const HOUSE_SYSTEM: u8 = b'A';

/// Range covered by the standard `sepl_18`/`semo_18` files (1800-2399).
const SWISS_MIN_JD: f64 = 2_378_496.5;
const SWISS_MAX_JD: f64 = 2_597_641.5;

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, ProviderError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/usr/local/share/swisseph"))
        });

        if !path.exists() {
            return Err(ProviderError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }
        // Process-wide setting in the C library; the last adapter built wins.
        set_ephe_path(&path.to_string_lossy());
        log::debug!("Swiss Ephemeris files at {}", path.display());

        Ok(Self { ephemeris_path: path })
    }

    pub fn ephemeris_path(&self) -> &PathBuf {
        &self.ephemeris_path
    }

    fn body_code(body: Graha) -> Result<i32, ProviderError> {
        BODY_CODES
            .iter()
            .find(|(g, _)| *g == body)
            .map(|(_, code)| *code)
            .ok_or(ProviderError::UnsupportedBody(body))
    }
}

impl PositionProvider for SwissEphemerisAdapter {
    fn position(&self, jd_ut: f64, body: Graha) -> Result<TropicalPosition, ProviderError> {
        let code = Self::body_code(body)?;
        let result = calc_ut(jd_ut, code as u32, (FLG_SWIEPH | FLG_SPEED) as u32).map_err(|e| {
            ProviderError::CalculationFailed {
                body: body.to_string(),
                jd: jd_ut,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let out = result.out;
        Ok(TropicalPosition {
            lon: normalize_degrees(out[0]),
            speed_lon: out[3],
        })
    }

    fn ascendant(&self, jd_ut: f64, location: GeoLocation) -> Result<f64, ProviderError> {
        let (_cusps, angles) = houses_ex(jd_ut, FLG_SWIEPH, location.lat, location.lon, HOUSE_SYSTEM as i32);
        let ascmc = AscMc::from_array(angles);
        Ok(normalize_degrees(ascmc.ascendant))
    }

    fn valid_range(&self) -> (f64, f64) {
        (SWISS_MIN_JD, SWISS_MAX_JD)
    }
}
