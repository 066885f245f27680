//! Divisional chart (varga) helpers.
//!
//! A varga divides each sign into equal parts and maps every part onto a
//! derived sign. Only the Rashi (D1) and Navamsa (D9) are supported.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ChartError;
use crate::zodiac::{normalize_degrees, Element, Sign, SIGN_SPAN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Varga {
    /// D1, the natal chart itself.
    #[default]
    Rashi,
    /// D9
    Navamsa,
}

impl Varga {
    pub const fn division(self) -> u8 {
        match self {
            Varga::Rashi => 1,
            Varga::Navamsa => 9,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Varga::Rashi => "Rashi",
            Varga::Navamsa => "Navamsa",
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Varga::Rashi => "d1",
            Varga::Navamsa => "d9",
        }
    }

    fn part_span(self) -> f64 {
        SIGN_SPAN / self.division() as f64
    }

    /// First derived sign for parts of a sign of this element.
    fn start_sign(self, sign: Sign) -> Sign {
        match self {
            Varga::Rashi => sign,
            Varga::Navamsa => match sign.element() {
                Element::Fire => Sign::Aries,
                Element::Earth => Sign::Capricorn,
                Element::Air => Sign::Libra,
                Element::Water => Sign::Cancer,
            },
        }
    }

    /// Index of the part containing `degree_in_sign`, clamped to the last part.
    fn part_index(self, degree_in_sign: f64) -> u8 {
        let part = (degree_in_sign / self.part_span()).floor() as u8;
        part.min(self.division() - 1)
    }

    /// Derived sign of a position given as sign plus degree within it.
    pub fn sign_for(self, degree_in_sign: f64, sign: Sign) -> Result<Sign, ChartError> {
        check_degree(degree_in_sign)?;
        Ok(self
            .start_sign(sign)
            .offset(self.part_index(degree_in_sign) as i64))
    }

    /// Derived longitude: the derived sign plus the remainder inside the part
    /// scaled up to a full sign.
    pub fn longitude_for(self, longitude: f64) -> Result<f64, ChartError> {
        if !longitude.is_finite() {
            return Err(ChartError::input(format!("longitude {} is not finite", longitude)));
        }
        let lon = normalize_degrees(longitude);
        let sign = Sign::from_longitude(lon);
        let within = (lon - sign.index() as f64 * SIGN_SPAN).max(0.0);
        let derived = self.sign_for(within, sign)?;
        let part = self.part_index(within);
        let remainder = within - part as f64 * self.part_span();
        let scaled = (remainder * self.division() as f64).min(SIGN_SPAN - 1e-9);
        Ok(derived.index() as f64 * SIGN_SPAN + scaled)
    }
}

impl fmt::Display for Varga {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn check_degree(degree_in_sign: f64) -> Result<(), ChartError> {
    if !(0.0..SIGN_SPAN).contains(&degree_in_sign) {
        return Err(ChartError::input(format!(
            "degree in sign {} outside [0, 30)",
            degree_in_sign
        )));
    }
    Ok(())
}

/// Navamsa (D9) sign for a degree inside `sign`.
pub fn calculate_varga(degree_in_sign: f64, sign: Sign) -> Result<Sign, ChartError> {
    Varga::Navamsa.sign_for(degree_in_sign, sign)
}
