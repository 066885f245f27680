//! Nakshatra utilities.
//!
//! Nakshatras are 27 lunar mansions, each spanning 13°20' (360/27 degrees).
//! Each nakshatra is divided into 4 padas (quarters). Their lords repeat the
//! Vimshottari order three times.

use serde::Serialize;

use crate::zodiac::{normalize_degrees, Graha};

pub const NAKSHATRA_COUNT: usize = 27;
pub const NAKSHATRA_SPAN: f64 = 360.0 / NAKSHATRA_COUNT as f64;
pub const PADA_SPAN: f64 = NAKSHATRA_SPAN / 4.0;

/// Vimshottari lord order; nakshatra `i` is ruled by `DASHA_ORDER[i % 9]`.
pub const DASHA_ORDER: [Graha; 9] = [
    Graha::Ketu,
    Graha::Venus,
    Graha::Sun,
    Graha::Moon,
    Graha::Mars,
    Graha::Rahu,
    Graha::Jupiter,
    Graha::Saturn,
    Graha::Mercury,
];

const NAKSHATRA_NAMES: [&str; NAKSHATRA_COUNT] = [
    "Ashwini",
    "Bharani",
    "Krittika",
    "Rohini",
    "Mrigashira",
    "Ardra",
    "Punarvasu",
    "Pushya",
    "Ashlesha",
    "Magha",
    "Purva Phalguni",
    "Uttara Phalguni",
    "Hasta",
    "Chitra",
    "Swati",
    "Vishakha",
    "Anuradha",
    "Jyeshtha",
    "Mula",
    "Purva Ashadha",
    "Uttara Ashadha",
    "Shravana",
    "Dhanishta",
    "Shatabhisha",
    "Purva Bhadrapada",
    "Uttara Bhadrapada",
    "Revati",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Nakshatra {
    pub index: usize,
    pub name: &'static str,
    pub lord: Graha,
    pub start: f64,
    pub end: f64,
}

fn build_nakshatra_table() -> Vec<Nakshatra> {
    NAKSHATRA_NAMES
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let start = index as f64 * NAKSHATRA_SPAN;
            Nakshatra {
                index,
                name,
                lord: DASHA_ORDER[index % DASHA_ORDER.len()],
                start,
                end: start + NAKSHATRA_SPAN,
            }
        })
        .collect()
}

lazy_static::lazy_static! {
    static ref NAKSHATRA_TABLE: Vec<Nakshatra> = build_nakshatra_table();
}

/// All 27 nakshatras in zodiacal order.
pub fn nakshatras() -> &'static [Nakshatra] {
    &NAKSHATRA_TABLE
}

/// Where a longitude falls inside its nakshatra.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NakshatraPlacement {
    pub nakshatra: Nakshatra,
    /// Degrees elapsed since the nakshatra start.
    pub offset: f64,
    /// `offset / NAKSHATRA_SPAN`, in [0, 1).
    pub fraction_elapsed: f64,
    /// 1..=4
    pub pada: u8,
}

/// Nakshatra containing a sidereal longitude (normalized first).
pub fn nakshatra_for_longitude(longitude: f64) -> NakshatraPlacement {
    let lon = normalize_degrees(longitude);
    let index = ((lon / NAKSHATRA_SPAN).floor() as usize).min(NAKSHATRA_COUNT - 1);
    let nakshatra = NAKSHATRA_TABLE[index].clone();

    let offset = (lon - nakshatra.start).max(0.0);
    let fraction_elapsed = (offset / NAKSHATRA_SPAN).min(1.0);
    let pada = ((offset / PADA_SPAN).floor() as u8).min(3) + 1;

    NakshatraPlacement {
        nakshatra,
        offset,
        fraction_elapsed,
        pada,
    }
}
