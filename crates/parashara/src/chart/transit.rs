use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::chart::calculator::ChartCalculator;
use crate::chart::types::Chart;
use crate::ephemeris::{GeoLocation, PositionProvider};
use crate::error::ChartError;
use crate::sidereal::{AyanamsaMode, SiderealOffsetProvider};
use crate::time::datetime_to_julian_day;
use crate::zodiac::{Graha, Sign};

const GENERIC_PREDICTION: &str = "Mixed results according to planetary strength.";
const KETU_DEFAULT: &str = "A period of detachment and internal searching.";

const BODY_PREDICTIONS: [(Graha, [&str; 12]); 8] = [
    (
        Graha::Sun,
        [
            "Fatigue, irritability, and difficult journeys.",
            "Loss of wealth, eye strain, and family disputes.",
            "Acquisition of wealth, health, and victory over enemies.",
            "Mental distress, domestic disturbances, and lack of comfort.",
            "Anxiety regarding children, mental confusion, and illness.",
            "Success in all undertakings, health, and joy.",
            "Fatiguing travel, stomach issues, and marital tension.",
            "Fear, excessive heat in body, and fear of authority.",
            "Loss of prestige, mental anguish, and obstacles.",
            "Success in profession, new honors, and accomplishment.",
            "New position, honor, and financial prosperity.",
            "Heavy expenses and physical exhaustion.",
        ],
    ),
    (
        Graha::Moon,
        [
            "Arrival of good food, garments, and physical joy.",
            "Obstacles in work and financial instability.",
            "Gains from siblings, courage, and success.",
            "Lack of mental peace and issues with home/mother.",
            "Sorrow, mental instability, and indigestion.",
            "Victory over enemies, health, and profit.",
            "Comforts, vehicles, and social success.",
            "Danger to health and mental distress.",
            "Fear of debt and lack of fortune.",
            "Fulfillment of desires and professional rise.",
            "Acquisition of wealth and meeting with friends.",
            "Expenditure, losses, and fatigue.",
        ],
    ),
    (
        Graha::Mars,
        [
            "Heat-related ailments and mental agitation.",
            "Harsh speech and financial losses.",
            "Great success, courage, and gain of property.",
            "Conflict with relatives and domestic stress.",
            "Anger, issues with children, and fever.",
            "Destruction of enemies and victory in disputes.",
            "Quarrels with spouse and eye trouble.",
            "Physical injuries or sudden health issues.",
            "Humiliation and loss of vitality.",
            "Irregular behavior but professional activity.",
            "Gain of gold, property, and happiness.",
            "Loss of wealth and excessive anger.",
        ],
    ),
    (
        Graha::Mercury,
        [
            "Loss of wealth through harsh speech.",
            "Financial gains and increase in knowledge.",
            "Fear of enemies and mental instability.",
            "Happiness from family and success in education.",
            "Discord with wife and children.",
            "Success, fame, and victory in debates.",
            "Domestic arguments and lack of peace.",
            "Happiness and increase in wealth.",
            "Obstacles in work and mental fatigue.",
            "Mental peace, wealth, and success.",
            "Gains from various sources and social happiness.",
            "Fear of failure and unnecessary expenses.",
        ],
    ),
    (
        Graha::Jupiter,
        [
            "Relocation, loss of wealth, and fatigue.",
            "Financial prosperity and family happiness.",
            "Loss of position and obstacles in work.",
            "Sorrow regarding relatives and home life.",
            "Birth of children, gain of knowledge, and joy.",
            "Health issues and disputes with enemies.",
            "Marriage, travel, and physical comforts.",
            "Fatigue, illness, and unsuccessful journeys.",
            "Spiritual growth, luck, and prosperity.",
            "Obstacles in profession and lack of recognition.",
            "Great wealth, new opportunities, and honors.",
            "Mental grief and spiritual detachment.",
        ],
    ),
    (
        Graha::Venus,
        [
            "Sensual pleasures, luxury, and happiness.",
            "Financial gains and birth of a child.",
            "Prosperity, influence, and social success.",
            "New vehicles, house, and domestic joy.",
            "Happiness from children and romance.",
            "Conflict with women and health issues.",
            "Success in marriage and partnerships.",
            "Unexpected wealth and luxury items.",
            "Religious deeds and general prosperity.",
            "Recognition and professional success.",
            "Gains from friends and liquid cash.",
            "Gains of comfort and luxury, but high spending.",
        ],
    ),
    (
        Graha::Saturn,
        [
            "Heavy responsibilities, fatigue, and delays.",
            "Loss of wealth and family friction.",
            "Destruction of enemies and gain of power.",
            "Separation from home and mental distress.",
            "Loss of intelligence and worry for children.",
            "Total success and physical strength.",
            "Wearisome journeys and relationship stress.",
            "Accidents or chronic health issues.",
            "Poverty and lack of focus.",
            "Hard work with slow rewards.",
            "Sudden wealth and high status.",
            "Excessive expenditure and mental agony.",
        ],
    ),
    (
        Graha::Rahu,
        [
            "Confusion and health concerns.",
            "Loss of wealth and harsh speech.",
            "Unexpected gains and victory over rivals.",
            "Fear and domestic instability.",
            "Anxiety and speculative losses.",
            "Physical health and defeat of enemies.",
            "Conflict in partnerships.",
            "Sudden obstacles and danger.",
            "Confusion in belief systems.",
            "Professional change or success through shortcuts.",
            "Massive gains and influential contacts.",
            "Secret expenses and insomnia.",
        ],
    ),
];

lazy_static::lazy_static! {
    static ref PREDICTIONS: HashMap<(Graha, u8), &'static str> = {
        let mut table = HashMap::new();
        for (graha, texts) in BODY_PREDICTIONS.iter() {
            for (i, text) in texts.iter().enumerate() {
                table.insert((*graha, i as u8 + 1), *text);
            }
        }
        table.insert((Graha::Ketu, 3), "Spiritual courage and victory.");
        table.insert((Graha::Ketu, 6), "Freedom from debt and enemies.");
        table.insert((Graha::Ketu, 11), "Inward gains and intuitive success.");
        table
    };
}

/// Canned transit text for a body passing through a natal house.
pub fn transit_prediction(graha: Graha, house: u8) -> &'static str {
    match PREDICTIONS.get(&(graha, house)) {
        Some(text) => text,
        None if graha == Graha::Ketu => KETU_DEFAULT,
        None => GENERIC_PREDICTION,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitReading {
    pub body: Graha,
    pub current_sign: Sign,
    /// House counted from the natal Ascendant sign.
    pub transiting_house: u8,
    pub prediction: String,
    pub is_retrograde: bool,
}

/// Readings for every body of `sky` against the natal Ascendant.
///
/// A natal chart without an Ascendant yields no readings.
pub fn transit_readings(natal: &Chart, sky: &Chart) -> Vec<TransitReading> {
    let Some(natal_asc) = natal.ascendant_sign() else {
        log::warn!("natal chart has no Ascendant; transit report skipped");
        return Vec::new();
    };

    sky.grahas()
        .map(|(graha, position)| {
            let house = natal_asc.house_of(position.sign);
            TransitReading {
                body: graha,
                current_sign: position.sign,
                transiting_house: house,
                prediction: transit_prediction(graha, house).to_string(),
                is_retrograde: position.is_retrograde.unwrap_or(false),
            }
        })
        .collect()
}

/// Recomputes the sky for an instant and reads it against a natal chart.
pub struct TransitEngine<'a, P, S> {
    calculator: &'a ChartCalculator<P, S>,
}

impl<'a, P: PositionProvider, S: SiderealOffsetProvider> TransitEngine<'a, P, S> {
    pub fn new(calculator: &'a ChartCalculator<P, S>) -> Self {
        Self { calculator }
    }

    pub fn transits_at(
        &self,
        natal: &Chart,
        instant: DateTime<Utc>,
        location: GeoLocation,
        mode: AyanamsaMode,
    ) -> Result<Vec<TransitReading>, ChartError> {
        if natal.ascendant().is_none() {
            log::warn!("natal chart has no Ascendant; transit report skipped");
            return Ok(Vec::new());
        }
        let sky = self
            .calculator
            .chart_at(datetime_to_julian_day(instant), location, mode)?;
        Ok(transit_readings(natal, &sky))
    }

    pub fn current_transits(
        &self,
        natal: &Chart,
        location: GeoLocation,
        mode: AyanamsaMode,
    ) -> Result<Vec<TransitReading>, ChartError> {
        self.transits_at(natal, Utc::now(), location, mode)
    }
}
