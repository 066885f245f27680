//! Pairwise chart compatibility.
//!
//! Three independent sub-scores: Mars affliction (Manglik), emotional group
//! of the Moon sign, and the Sun-sign relation. A sub-score whose inputs are
//! missing from either chart is left out of the report.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::chart::Chart;
use crate::zodiac::{Graha, Point, Sign};

const MANGLIK_HOUSES: [u8; 5] = [1, 4, 7, 8, 12];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reference", rename_all = "snake_case")]
pub enum ManglikCause {
    FromAscendant { house: u8 },
    FromMoon { house: u8 },
}

impl fmt::Display for ManglikCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManglikCause::FromAscendant { house } => write!(f, "Ascendant (House {})", house),
            ManglikCause::FromMoon { house } => write!(f, "Moon (House {})", house),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManglikStatus {
    pub is_manglik: bool,
    pub causes: Vec<ManglikCause>,
}

/// Mars in 1, 4, 7, 8 or 12 counted from the Ascendant or from the Moon.
///
/// `None` when Mars is missing, or when neither reference point is present.
pub fn check_manglik(chart: &Chart) -> Option<ManglikStatus> {
    let mars = chart.sign_of(Graha::Mars)?;
    let asc = chart.sign_of(Point::Ascendant);
    let moon = chart.sign_of(Graha::Moon);
    if asc.is_none() && moon.is_none() {
        return None;
    }

    let afflicted = |reference: Option<Sign>| {
        reference
            .map(|r| r.house_of(mars))
            .filter(|house| MANGLIK_HOUSES.contains(house))
    };
    let causes: Vec<ManglikCause> = [
        afflicted(asc).map(|house| ManglikCause::FromAscendant { house }),
        afflicted(moon).map(|house| ManglikCause::FromMoon { house }),
    ]
    .into_iter()
    .flatten()
    .collect();

    Some(ManglikStatus {
        is_manglik: !causes.is_empty(),
        causes,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManglikVerdict {
    /// Both flagged.
    Cancellation,
    /// Neither flagged.
    Good,
    /// Exactly one flagged.
    Clash,
}

impl ManglikVerdict {
    pub fn from_flags(a: bool, b: bool) -> Self {
        match (a, b) {
            (true, true) => ManglikVerdict::Cancellation,
            (false, false) => ManglikVerdict::Good,
            _ => ManglikVerdict::Clash,
        }
    }

    pub fn status(self) -> &'static str {
        match self {
            ManglikVerdict::Cancellation => "Perfect (Cancellation)",
            ManglikVerdict::Good => "Good",
            ManglikVerdict::Clash => "Clash (Manglik Dosha)",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ManglikVerdict::Cancellation => "Both are Manglik. The fire cancels out.",
            ManglikVerdict::Good => "Neither has Mars Dosha. Safe.",
            ManglikVerdict::Clash => {
                "One is Manglik and the other is not. Potential for intense conflict."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManglikReport {
    pub p1: ManglikStatus,
    pub p2: ManglikStatus,
    pub verdict: ManglikVerdict,
    pub status: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmotionalGroup {
    Deva,
    Asura,
}

impl EmotionalGroup {
    /// Aries, Cancer, Leo, Scorpio, Sagittarius and Pisces are Deva.
    pub fn of(moon_sign: Sign) -> Self {
        match moon_sign {
            Sign::Aries | Sign::Cancer | Sign::Leo | Sign::Scorpio | Sign::Sagittarius | Sign::Pisces => {
                EmotionalGroup::Deva
            }
            _ => EmotionalGroup::Asura,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmotionalStatus {
    Excellent,
    Challenging,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionalReport {
    pub status: EmotionalStatus,
    pub score: u8,
    pub p1_group: EmotionalGroup,
    pub p2_group: EmotionalGroup,
}

pub fn emotional_match(moon_a: Sign, moon_b: Sign) -> EmotionalReport {
    let p1_group = EmotionalGroup::of(moon_a);
    let p2_group = EmotionalGroup::of(moon_b);
    let (status, score) = if p1_group == p2_group {
        (EmotionalStatus::Excellent, 100)
    } else {
        (EmotionalStatus::Challenging, 40)
    };
    EmotionalReport {
        status,
        score,
        p1_group,
        p2_group,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EgoRelation {
    Opposition,
    Conjunction,
    Neutral,
}

impl EgoRelation {
    /// Plain index difference `|a - b|`, not the shorter arc.
    pub fn between(sun_a: Sign, sun_b: Sign) -> Self {
        match (sun_a.index() as i8 - sun_b.index() as i8).abs() {
            6 => EgoRelation::Opposition,
            0 => EgoRelation::Conjunction,
            _ => EgoRelation::Neutral,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EgoRelation::Opposition => "Opposites Attract (7th House)",
            EgoRelation::Conjunction => "Same Sign (Conjunction)",
            EgoRelation::Neutral => "Neutral",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manglik: Option<ManglikReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotional: Option<EmotionalReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ego: Option<EgoRelation>,
}

pub fn calculate_compatibility(chart_a: &Chart, chart_b: &Chart) -> CompatibilityReport {
    let manglik = match (check_manglik(chart_a), check_manglik(chart_b)) {
        (Some(p1), Some(p2)) => {
            let verdict = ManglikVerdict::from_flags(p1.is_manglik, p2.is_manglik);
            Some(ManglikReport {
                p1,
                p2,
                verdict,
                status: verdict.status().to_string(),
                description: verdict.description().to_string(),
            })
        }
        _ => {
            log::warn!("Mars or its reference points missing; manglik check skipped");
            None
        }
    };

    let emotional = match (chart_a.sign_of(Graha::Moon), chart_b.sign_of(Graha::Moon)) {
        (Some(a), Some(b)) => Some(emotional_match(a, b)),
        _ => {
            log::warn!("Moon missing; emotional match skipped");
            None
        }
    };

    let ego = match (chart_a.sign_of(Graha::Sun), chart_b.sign_of(Graha::Sun)) {
        (Some(a), Some(b)) => Some(EgoRelation::between(a, b)),
        _ => {
            log::warn!("Sun missing; ego relation skipped");
            None
        }
    };

    CompatibilityReport {
        manglik,
        emotional,
        ego,
    }
}
