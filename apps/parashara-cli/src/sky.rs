//! Provider selected by configuration.

use parashara::ephemeris::{GeoLocation, PositionProvider, TropicalPosition};
use parashara::zodiac::Graha;
use parashara::{AnalyticEphemeris, ProviderError};
use parashara_config::{EngineSettings, ProviderKind};

#[cfg(feature = "swisseph")]
use parashara::SwissEphemerisAdapter;

// The Swiss library keeps global state; calls are serialized.
#[cfg(feature = "swisseph")]
static SWISS_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

pub enum Sky {
    Analytic(AnalyticEphemeris),
    #[cfg(feature = "swisseph")]
    Swiss(SwissEphemerisAdapter),
}

impl Sky {
    pub fn open(engine: &EngineSettings) -> anyhow::Result<Self> {
        match engine.provider {
            ProviderKind::Analytic => Ok(Sky::Analytic(AnalyticEphemeris::new())),
            #[cfg(feature = "swisseph")]
            ProviderKind::Swiss => {
                let adapter = SwissEphemerisAdapter::new(engine.ephemeris_path.clone())?;
                Ok(Sky::Swiss(adapter))
            }
            #[cfg(not(feature = "swisseph"))]
            ProviderKind::Swiss => {
                anyhow::bail!("provider 'swiss' needs a build with the swisseph feature")
            }
        }
    }
}

impl PositionProvider for Sky {
    fn position(&self, jd_ut: f64, body: Graha) -> Result<TropicalPosition, ProviderError> {
        match self {
            Sky::Analytic(p) => p.position(jd_ut, body),
            #[cfg(feature = "swisseph")]
            Sky::Swiss(p) => {
                let _guard = SWISS_LOCK.lock().unwrap_or_else(|e| e.into_inner());
                p.position(jd_ut, body)
            }
        }
    }

    fn ascendant(&self, jd_ut: f64, location: GeoLocation) -> Result<f64, ProviderError> {
        match self {
            Sky::Analytic(p) => p.ascendant(jd_ut, location),
            #[cfg(feature = "swisseph")]
            Sky::Swiss(p) => {
                let _guard = SWISS_LOCK.lock().unwrap_or_else(|e| e.into_inner());
                p.ascendant(jd_ut, location)
            }
        }
    }

    fn valid_range(&self) -> (f64, f64) {
        match self {
            Sky::Analytic(p) => p.valid_range(),
            #[cfg(feature = "swisseph")]
            Sky::Swiss(p) => p.valid_range(),
        }
    }
}
