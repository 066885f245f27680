use crate::error::ProviderError;
use crate::ephemeris::types::{GeoLocation, TropicalPosition};
use crate::zodiac::Graha;

/// External source of tropical positions.
///
/// Implementations are synchronous and may be slow; the engine calls them a
/// fixed number of times per chart and never retries. `Graha::Rahu` means the
/// mean lunar north node. `Graha::Ketu` is derived by the engine and is never
/// requested.
pub trait PositionProvider {
    fn position(&self, jd_ut: f64, body: Graha) -> Result<TropicalPosition, ProviderError>;

    /// Tropical longitude of the Ascendant for an observer.
    fn ascendant(&self, jd_ut: f64, location: GeoLocation) -> Result<f64, ProviderError>;

    /// Inclusive Julian-day range the provider can answer for.
    fn valid_range(&self) -> (f64, f64);
}

impl<P: PositionProvider + ?Sized> PositionProvider for &P {
    fn position(&self, jd_ut: f64, body: Graha) -> Result<TropicalPosition, ProviderError> {
        (**self).position(jd_ut, body)
    }

    fn ascendant(&self, jd_ut: f64, location: GeoLocation) -> Result<f64, ProviderError> {
        (**self).ascendant(jd_ut, location)
    }

    fn valid_range(&self) -> (f64, f64) {
        (**self).valid_range()
    }
}
