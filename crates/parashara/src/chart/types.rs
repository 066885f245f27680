use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ChartError;
use crate::vedic::vargas::{calculate_varga, Varga};
use crate::zodiac::{normalize_degrees, Graha, Point, Sign, SIGN_SPAN};

/// Sidereal placement of one body (or the Ascendant).
///
/// `sidereal_longitude == sign * 30 + degree_in_sign`. The Ascendant carries no
/// motion and no house number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub sign: Sign,
    pub degree_in_sign: f64,
    pub sidereal_longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_retrograde: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    pub d9_sign: Sign,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_number: Option<u8>,
}

impl BodyPosition {
    /// A moving body at `longitude` with signed daily motion `speed`.
    pub fn body(longitude: f64, speed: f64) -> Result<Self, ChartError> {
        let mut position = Self::at(longitude)?;
        position.is_retrograde = Some(speed < 0.0);
        position.speed = Some(speed);
        Ok(position)
    }

    /// A fixed point (Ascendant) at `longitude`.
    pub fn ascendant(longitude: f64) -> Result<Self, ChartError> {
        Self::at(longitude)
    }

    fn at(longitude: f64) -> Result<Self, ChartError> {
        if !longitude.is_finite() {
            return Err(ChartError::input(format!("longitude {} is not finite", longitude)));
        }
        let lon = normalize_degrees(longitude);
        let sign = Sign::from_longitude(lon);
        let degree_in_sign = (lon - sign.index() as f64 * SIGN_SPAN).max(0.0);
        Ok(Self {
            sign,
            degree_in_sign,
            sidereal_longitude: lon,
            is_retrograde: None,
            speed: None,
            d9_sign: calculate_varga(degree_in_sign, sign)?,
            house_number: None,
        })
    }

    pub fn with_house(mut self, house: u8) -> Self {
        self.house_number = Some(house);
        self
    }
}

/// A natal (or transit) chart keyed by [`Point`].
///
/// Charts produced by the calculator hold all ten points with house numbers
/// assigned. Charts assembled by hand may be partial; each engine documents
/// how it treats a missing point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chart {
    points: BTreeMap<Point, BodyPosition>,
}

impl Chart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used by the calculator and by callers assembling a chart from
    /// stored positions.
    pub fn with(mut self, point: impl Into<Point>, position: BodyPosition) -> Self {
        self.points.insert(point.into(), position);
        self
    }

    pub fn get(&self, point: impl Into<Point>) -> Option<&BodyPosition> {
        self.points.get(&point.into())
    }

    /// Like [`Chart::get`] but a missing point is an `IncompleteChart` error.
    pub fn require(&self, point: impl Into<Point>) -> Result<&BodyPosition, ChartError> {
        let point = point.into();
        self.points.get(&point).ok_or(ChartError::IncompleteChart(point))
    }

    pub fn ascendant(&self) -> Option<&BodyPosition> {
        self.points.get(&Point::Ascendant)
    }

    pub fn ascendant_sign(&self) -> Option<Sign> {
        self.ascendant().map(|asc| asc.sign)
    }

    pub fn sign_of(&self, point: impl Into<Point>) -> Option<Sign> {
        self.get(point).map(|p| p.sign)
    }

    /// Whole-sign house of a body: the stored number, or recomputed from the
    /// Ascendant sign when it was never assigned.
    pub fn house_of(&self, graha: Graha) -> Option<u8> {
        let position = self.get(graha)?;
        position
            .house_number
            .or_else(|| self.ascendant_sign().map(|asc| asc.house_of(position.sign)))
    }

    pub fn contains(&self, point: impl Into<Point>) -> bool {
        self.points.contains_key(&point.into())
    }

    /// All nine bodies and the Ascendant present.
    pub fn is_complete(&self) -> bool {
        Graha::ALL.iter().all(|g| self.contains(*g)) && self.contains(Point::Ascendant)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Point, &BodyPosition)> {
        self.points.iter().map(|(point, position)| (*point, position))
    }

    /// Bodies in feature order, skipping the Ascendant and absent bodies.
    pub fn grahas(&self) -> impl Iterator<Item = (Graha, &BodyPosition)> {
        Graha::ALL
            .iter()
            .filter_map(move |g| self.get(*g).map(|p| (*g, p)))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The chart re-expressed in a divisional frame. Houses are counted from
    /// the divisional Ascendant when one is present.
    pub fn divisional(&self, varga: Varga) -> Result<Chart, ChartError> {
        if varga == Varga::Rashi {
            return Ok(self.clone());
        }

        let mut derived = BTreeMap::new();
        for (point, position) in &self.points {
            let lon = varga.longitude_for(position.sidereal_longitude)?;
            let mut mapped = BodyPosition::at(lon)?;
            mapped.is_retrograde = position.is_retrograde;
            mapped.speed = position.speed;
            derived.insert(*point, mapped);
        }

        if let Some(asc_sign) = derived.get(&Point::Ascendant).map(|asc| asc.sign) {
            for (point, position) in derived.iter_mut() {
                if *point != Point::Ascendant {
                    position.house_number = Some(asc_sign.house_of(position.sign));
                }
            }
        }

        Ok(Chart { points: derived })
    }
}
