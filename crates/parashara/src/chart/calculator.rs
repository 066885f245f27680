use crate::chart::types::{BodyPosition, Chart};
use crate::ephemeris::{GeoLocation, PositionProvider};
use crate::error::ChartError;
use crate::sidereal::{AyanamsaMode, MeanPrecessionAyanamsa, SiderealFrame, SiderealOffsetProvider};
use crate::time::BirthDetails;
use crate::zodiac::{normalize_degrees, Graha, Point};

/// Bodies queried from the provider. Ketu is derived from Rahu.
const QUERIED: [Graha; 8] = [
    Graha::Sun,
    Graha::Moon,
    Graha::Mars,
    Graha::Mercury,
    Graha::Jupiter,
    Graha::Venus,
    Graha::Saturn,
    Graha::Rahu,
];

/// Builds sidereal whole-sign charts from a position provider and an
/// ayanamsa source.
pub struct ChartCalculator<P, S = MeanPrecessionAyanamsa> {
    provider: P,
    offsets: S,
}

impl<P: PositionProvider> ChartCalculator<P, MeanPrecessionAyanamsa> {
    pub fn new(provider: P) -> Self {
        Self::with_offsets(provider, MeanPrecessionAyanamsa)
    }
}

impl<P: PositionProvider, S: SiderealOffsetProvider> ChartCalculator<P, S> {
    pub fn with_offsets(provider: P, offsets: S) -> Self {
        Self { provider, offsets }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Chart for a local birth moment.
    pub fn calculate_chart(
        &self,
        birth: &BirthDetails,
        location: GeoLocation,
        mode: AyanamsaMode,
    ) -> Result<Chart, ChartError> {
        let jd = birth.julian_day()?;
        self.chart_at(jd, location, mode)
    }

    /// Chart for a Julian day (UT).
    pub fn chart_at(
        &self,
        jd_ut: f64,
        location: GeoLocation,
        mode: AyanamsaMode,
    ) -> Result<Chart, ChartError> {
        location.validate()?;
        let (min_jd, max_jd) = self.provider.valid_range();
        if !(min_jd..=max_jd).contains(&jd_ut) {
            return Err(ChartError::range(format!(
                "JD {:.5} outside ephemeris range {:.1}..{:.1}",
                jd_ut, min_jd, max_jd
            )));
        }

        // One offset for every body of the chart.
        let frame = SiderealFrame::resolve(&self.offsets, jd_ut, mode)?;

        let mut chart = Chart::new();
        for graha in QUERIED {
            let tropical = self.provider.position(jd_ut, graha)?;
            let position = BodyPosition::body(frame.to_sidereal(tropical.lon), tropical.speed_lon)?;
            chart = chart.with(graha, position);
        }

        let rahu = chart.require(Graha::Rahu)?;
        let ketu_speed = rahu.speed.unwrap_or_default();
        let ketu = BodyPosition::body(normalize_degrees(rahu.sidereal_longitude + 180.0), ketu_speed)?;
        chart = chart.with(Graha::Ketu, ketu);

        let asc_tropical = self.provider.ascendant(jd_ut, location)?;
        let ascendant = BodyPosition::ascendant(frame.to_sidereal(asc_tropical))?;
        let asc_sign = ascendant.sign;
        log::debug!(
            "JD {:.5}: ascendant {} {:.4} ({})",
            jd_ut,
            asc_sign,
            ascendant.degree_in_sign,
            frame.mode
        );

        let mut natal = Chart::new().with(Point::Ascendant, ascendant);
        for (graha, position) in chart.grahas() {
            let house = asc_sign.house_of(position.sign);
            natal = natal.with(graha, position.clone().with_house(house));
        }
        Ok(natal)
    }
}
