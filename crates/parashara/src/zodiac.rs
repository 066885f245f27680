//! Signs, bodies and the fixed reference tables shared by every engine.
//!
//! All tables here are process-wide constants: plain `const` arrays where the
//! data is indexable, `lazy_static` maps where a lookup by body is needed.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub const SIGN_SPAN: f64 = 30.0;

/// The nine grahas used by the chart, dasha and yoga engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Graha {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    Rahu,
    Ketu,
}

impl Graha {
    /// Fixed feature order: Sun, Moon, Mars, Mercury, Jupiter, Venus, Saturn, Rahu, Ketu.
    pub const ALL: [Graha; 9] = [
        Graha::Sun,
        Graha::Moon,
        Graha::Mars,
        Graha::Mercury,
        Graha::Jupiter,
        Graha::Venus,
        Graha::Saturn,
        Graha::Rahu,
        Graha::Ketu,
    ];

    /// The seven visible bodies that own signs and have dignities.
    pub const CLASSICAL: [Graha; 7] = [
        Graha::Sun,
        Graha::Moon,
        Graha::Mars,
        Graha::Mercury,
        Graha::Jupiter,
        Graha::Venus,
        Graha::Saturn,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Graha::Sun => "Sun",
            Graha::Moon => "Moon",
            Graha::Mars => "Mars",
            Graha::Mercury => "Mercury",
            Graha::Jupiter => "Jupiter",
            Graha::Venus => "Venus",
            Graha::Saturn => "Saturn",
            Graha::Rahu => "Rahu",
            Graha::Ketu => "Ketu",
        }
    }

    /// Short code used by the rule lookup store.
    pub fn code(self) -> &'static str {
        match self {
            Graha::Sun => "SUN",
            Graha::Moon => "MOON",
            Graha::Mars => "MAR",
            Graha::Mercury => "MER",
            Graha::Jupiter => "JUP",
            Graha::Venus => "VEN",
            Graha::Saturn => "SAT",
            Graha::Rahu => "RAH",
            Graha::Ketu => "KET",
        }
    }

    pub fn dignity(self) -> Option<&'static Dignity> {
        DIGNITIES.get(&self)
    }

    /// Whether `sign` is one of this body's own signs.
    pub fn owns(self, sign: Sign) -> bool {
        self.dignity().map_or(false, |d| d.own.contains(&sign))
    }

    pub fn is_exalted_in(self, sign: Sign) -> bool {
        self.dignity().map_or(false, |d| d.exaltation == sign)
    }

    pub fn is_debilitated_in(self, sign: Sign) -> bool {
        self.dignity().map_or(false, |d| d.debilitation == sign)
    }
}

impl fmt::Display for Graha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Graha {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Graha::ALL
            .iter()
            .copied()
            .find(|g| g.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown body: {}", s))
    }
}

/// A key of a chart: one of the nine grahas or the Ascendant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Point {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    Rahu,
    Ketu,
    Ascendant,
}

impl Point {
    pub fn graha(self) -> Option<Graha> {
        match self {
            Point::Sun => Some(Graha::Sun),
            Point::Moon => Some(Graha::Moon),
            Point::Mars => Some(Graha::Mars),
            Point::Mercury => Some(Graha::Mercury),
            Point::Jupiter => Some(Graha::Jupiter),
            Point::Venus => Some(Graha::Venus),
            Point::Saturn => Some(Graha::Saturn),
            Point::Rahu => Some(Graha::Rahu),
            Point::Ketu => Some(Graha::Ketu),
            Point::Ascendant => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self.graha() {
            Some(g) => g.name(),
            None => "Ascendant",
        }
    }
}

impl From<Graha> for Point {
    fn from(graha: Graha) -> Self {
        match graha {
            Graha::Sun => Point::Sun,
            Graha::Moon => Point::Moon,
            Graha::Mars => Point::Mars,
            Graha::Mercury => Point::Mercury,
            Graha::Jupiter => Point::Jupiter,
            Graha::Venus => Point::Venus,
            Graha::Saturn => Point::Saturn,
            Graha::Rahu => Point::Rahu,
            Graha::Ketu => Point::Ketu,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

/// The twelve 30° rashis, Aries = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

const SIGNS: [Sign; 12] = [
    Sign::Aries,
    Sign::Taurus,
    Sign::Gemini,
    Sign::Cancer,
    Sign::Leo,
    Sign::Virgo,
    Sign::Libra,
    Sign::Scorpio,
    Sign::Sagittarius,
    Sign::Capricorn,
    Sign::Aquarius,
    Sign::Pisces,
];

const SIGN_NAMES: [&str; 12] = [
    "Aries",
    "Taurus",
    "Gemini",
    "Cancer",
    "Leo",
    "Virgo",
    "Libra",
    "Scorpio",
    "Sagittarius",
    "Capricorn",
    "Aquarius",
    "Pisces",
];

const SIGN_CODES: [&str; 12] = [
    "ARI", "TAU", "GEM", "CAN", "LEO", "VIR", "LIB", "SCO", "SAG", "CAP", "AQU", "PIS",
];

/// Traditional rulership, indexed by sign.
const SIGN_RULERS: [Graha; 12] = [
    Graha::Mars,    // Aries
    Graha::Venus,   // Taurus
    Graha::Mercury, // Gemini
    Graha::Moon,    // Cancer
    Graha::Sun,     // Leo
    Graha::Mercury, // Virgo
    Graha::Venus,   // Libra
    Graha::Mars,    // Scorpio
    Graha::Jupiter, // Sagittarius
    Graha::Saturn,  // Capricorn
    Graha::Saturn,  // Aquarius
    Graha::Jupiter, // Pisces
];

impl Sign {
    pub const ALL: [Sign; 12] = SIGNS;

    /// Sign for any integer index, wrapped into 0..12.
    pub fn from_index(index: i64) -> Sign {
        SIGNS[index.rem_euclid(12) as usize]
    }

    /// Sign containing a longitude; the longitude is normalized first.
    pub fn from_longitude(longitude: f64) -> Sign {
        let lon = normalize_degrees(longitude);
        Sign::from_index((lon / SIGN_SPAN).floor() as i64)
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        SIGN_NAMES[self.index() as usize]
    }

    pub fn code(self) -> &'static str {
        SIGN_CODES[self.index() as usize]
    }

    pub fn ruler(self) -> Graha {
        SIGN_RULERS[self.index() as usize]
    }

    pub fn element(self) -> Element {
        match self.index() % 4 {
            0 => Element::Fire,
            1 => Element::Earth,
            2 => Element::Air,
            _ => Element::Water,
        }
    }

    /// The sign `count` places further along the zodiac.
    pub fn offset(self, count: i64) -> Sign {
        Sign::from_index(self.index() as i64 + count)
    }

    /// Whole-sign house of `other` counted from `self` (1..=12).
    pub fn house_of(self, other: Sign) -> u8 {
        ((other.index() as i64 - self.index() as i64).rem_euclid(12) + 1) as u8
    }

    /// Sign occupying `house` (1..=12) when `self` rises.
    pub fn sign_in_house(self, house: u8) -> Sign {
        self.offset(house as i64 - 1)
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Exaltation, debilitation and own signs for one classical body.
#[derive(Debug, Clone)]
pub struct Dignity {
    pub exaltation: Sign,
    pub debilitation: Sign,
    pub own: Vec<Sign>,
}

lazy_static::lazy_static! {
    static ref DIGNITIES: HashMap<Graha, Dignity> = {
        let mut table = HashMap::new();
        table.insert(Graha::Sun, Dignity { exaltation: Sign::Aries, debilitation: Sign::Libra, own: vec![Sign::Leo] });
        table.insert(Graha::Moon, Dignity { exaltation: Sign::Taurus, debilitation: Sign::Scorpio, own: vec![Sign::Cancer] });
        table.insert(Graha::Mars, Dignity { exaltation: Sign::Capricorn, debilitation: Sign::Cancer, own: vec![Sign::Aries, Sign::Scorpio] });
        table.insert(Graha::Mercury, Dignity { exaltation: Sign::Virgo, debilitation: Sign::Pisces, own: vec![Sign::Gemini, Sign::Virgo] });
        table.insert(Graha::Jupiter, Dignity { exaltation: Sign::Cancer, debilitation: Sign::Capricorn, own: vec![Sign::Sagittarius, Sign::Pisces] });
        table.insert(Graha::Venus, Dignity { exaltation: Sign::Pisces, debilitation: Sign::Virgo, own: vec![Sign::Taurus, Sign::Libra] });
        table.insert(Graha::Saturn, Dignity { exaltation: Sign::Libra, debilitation: Sign::Aries, own: vec![Sign::Capricorn, Sign::Aquarius] });
        table
    };
}

/// The classical body exalted in `sign`, if any.
pub fn exalted_in(sign: Sign) -> Option<Graha> {
    Graha::CLASSICAL
        .iter()
        .copied()
        .find(|g| g.is_exalted_in(sign))
}

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let normalized = value.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_rulers() {
        assert_eq!(Sign::Aries.ruler(), Graha::Mars);
        assert_eq!(Sign::Cancer.ruler(), Graha::Moon);
        assert_eq!(Sign::Leo.ruler(), Graha::Sun);
        assert_eq!(Sign::Aquarius.ruler(), Graha::Saturn);
        assert_eq!(Sign::Pisces.ruler(), Graha::Jupiter);
    }

    #[test]
    fn test_house_of_wraps() {
        assert_eq!(Sign::Aries.house_of(Sign::Aries), 1);
        assert_eq!(Sign::Libra.house_of(Sign::Aries), 7);
        assert_eq!(Sign::Pisces.house_of(Sign::Aries), 2);
        assert_eq!(Sign::Taurus.sign_in_house(12), Sign::Aries);
    }

    #[test]
    fn test_from_longitude() {
        assert_eq!(Sign::from_longitude(0.0), Sign::Aries);
        assert_eq!(Sign::from_longitude(359.99), Sign::Pisces);
        assert_eq!(Sign::from_longitude(-0.5), Sign::Pisces);
        assert_eq!(Sign::from_longitude(725.0), Sign::Aries);
    }

    #[test]
    fn test_exalted_in_is_unique() {
        assert_eq!(exalted_in(Sign::Libra), Some(Graha::Saturn));
        assert_eq!(exalted_in(Sign::Cancer), Some(Graha::Jupiter));
        assert_eq!(exalted_in(Sign::Gemini), None);
    }

    #[test]
    fn test_graha_round_trips_through_name() {
        for g in Graha::ALL {
            assert_eq!(g.name().parse::<Graha>().unwrap(), g);
            assert_eq!(Point::from(g).graha(), Some(g));
        }
        assert!(Point::Ascendant.graha().is_none());
    }

    #[test]
    fn test_normalize_degrees() {
        assert!((normalize_degrees(-10.0) - 350.0).abs() < 1e-12);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert!(normalize_degrees(-1e-18) < 360.0);
    }
}
