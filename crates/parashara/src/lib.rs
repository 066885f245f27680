//! Sidereal (Vedic) chart engine.
//!
//! A [`Chart`] is built from a birth moment and location through a
//! [`PositionProvider`] and a sidereal frame. The divisional mapper, the
//! Vimshottari dasha engine, the yoga catalogue and the transit and
//! compatibility engines all read from that chart.

pub mod chart;
pub mod compatibility;
pub mod ephemeris;
pub mod error;
pub mod sidereal;
pub mod time;
pub mod vedic;
pub mod zodiac;

pub use chart::{BodyPosition, Chart, ChartCalculator, TransitEngine, TransitReading};
pub use compatibility::{calculate_compatibility, CompatibilityReport};
pub use ephemeris::{AnalyticEphemeris, GeoLocation, PositionProvider, TropicalPosition};
pub use error::{ChartError, ProviderError};
pub use sidereal::{AyanamsaMode, MeanPrecessionAyanamsa, SiderealFrame, SiderealOffsetProvider};
pub use time::BirthDetails;
pub use vedic::{calculate_dashas, check_yogas, VimshottariTimeline, Yoga};
pub use zodiac::{Graha, Point, Sign};

#[cfg(feature = "swisseph")]
pub use ephemeris::SwissEphemerisAdapter;

/// Chart for a local birth moment using the mean-precession ayanamsa.
pub fn calculate_chart<P: PositionProvider>(
    provider: &P,
    birth: &BirthDetails,
    location: GeoLocation,
    mode: AyanamsaMode,
) -> Result<Chart, ChartError> {
    ChartCalculator::new(provider).calculate_chart(birth, location, mode)
}
