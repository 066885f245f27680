//! Jaimini chara karakas and arudha padas.

use serde::{Deserialize, Serialize};

use crate::chart::Chart;
use crate::error::ChartError;
use crate::zodiac::{Graha, Point, Sign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Karaka {
    Atmakaraka,
    Amatyakaraka,
    Bhratrikaraka,
    Matrikaraka,
    Putrakaraka,
    Gnatikaraka,
    Darakaraka,
}

impl Karaka {
    /// Assigned from the highest degree down.
    pub const ORDER: [Karaka; 7] = [
        Karaka::Atmakaraka,
        Karaka::Amatyakaraka,
        Karaka::Bhratrikaraka,
        Karaka::Matrikaraka,
        Karaka::Putrakaraka,
        Karaka::Gnatikaraka,
        Karaka::Darakaraka,
    ];

    pub fn abbreviation(self) -> &'static str {
        match self {
            Karaka::Atmakaraka => "AK",
            Karaka::Amatyakaraka => "AmK",
            Karaka::Bhratrikaraka => "BK",
            Karaka::Matrikaraka => "MK",
            Karaka::Putrakaraka => "PK",
            Karaka::Gnatikaraka => "GK",
            Karaka::Darakaraka => "DK",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharaKaraka {
    pub role: Karaka,
    pub graha: Graha,
    pub degree_in_sign: f64,
    pub sign: Sign,
}

/// Bodies ranked by degree within their sign, highest first. Rahu takes part
/// only when `include_rahu` is set. With fewer than seven bodies present the
/// lower roles stay unassigned; with eight the lowest body gets no role.
pub fn chara_karakas(chart: &Chart, include_rahu: bool) -> Vec<CharaKaraka> {
    let rahu = include_rahu.then_some(Graha::Rahu);
    let mut candidates: Vec<(Graha, f64, Sign)> = Graha::CLASSICAL
        .into_iter()
        .chain(rahu)
        .filter_map(|g| chart.get(g).map(|p| (g, p.degree_in_sign, p.sign)))
        .collect();
    // Stable: equal degrees keep body order.
    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));

    Karaka::ORDER
        .iter()
        .zip(candidates)
        .map(|(role, (graha, degree_in_sign, sign))| CharaKaraka {
            role: *role,
            graha,
            degree_in_sign,
            sign,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArudhaPada {
    pub house: u8,
    pub label: String,
    pub sign: Sign,
}

fn arudha_label(house: u8) -> String {
    match house {
        7 => "A7 (Darapada)".to_string(),
        12 => "UL (Upapada)".to_string(),
        h => format!("A{}", h),
    }
}

/// Arudha of each house: the lord's sign counted again by the distance from
/// the house to its lord. Houses whose lord is absent are skipped.
pub fn arudha_padas(chart: &Chart) -> Result<Vec<ArudhaPada>, ChartError> {
    let asc = chart.require(Point::Ascendant)?.sign;
    let mut padas = Vec::new();
    for house in 1..=12u8 {
        let house_sign = asc.sign_in_house(house);
        let Some(lord_sign) = chart.sign_of(house_sign.ruler()) else {
            continue;
        };
        let distance = (lord_sign.index() as i64 - house_sign.index() as i64).rem_euclid(12);
        padas.push(ArudhaPada {
            house,
            label: arudha_label(house),
            sign: lord_sign.offset(distance),
        });
    }
    Ok(padas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::BodyPosition;

    fn at(sign: Sign, degree: f64) -> BodyPosition {
        BodyPosition::body(sign.index() as f64 * 30.0 + degree, 1.0).unwrap()
    }

    #[test]
    fn test_karakas_sorted_by_degree() {
        let chart = Chart::new()
            .with(Graha::Sun, at(Sign::Aries, 12.0))
            .with(Graha::Moon, at(Sign::Leo, 28.5))
            .with(Graha::Mars, at(Sign::Virgo, 3.0))
            .with(Graha::Rahu, at(Sign::Pisces, 29.9));
        let karakas = chara_karakas(&chart, false);
        assert_eq!(karakas.len(), 3);
        assert_eq!(karakas[0].role, Karaka::Atmakaraka);
        assert_eq!(karakas[0].graha, Graha::Moon);
        assert_eq!(karakas[2].graha, Graha::Mars);
        assert_eq!(karakas[2].role.abbreviation(), "BK");

        let with_rahu = chara_karakas(&chart, true);
        assert_eq!(with_rahu[0].graha, Graha::Rahu);
    }

    #[test]
    fn test_arudha_lagna() {
        // Aries rising, Mars in Gemini: two signs on from Gemini is Leo
        let chart = Chart::new()
            .with(Point::Ascendant, BodyPosition::ascendant(5.0).unwrap())
            .with(Graha::Mars, at(Sign::Gemini, 1.0));
        let padas = arudha_padas(&chart).unwrap();
        let a1 = padas.iter().find(|p| p.house == 1).unwrap();
        assert_eq!(a1.sign, Sign::Leo);
        assert_eq!(a1.label, "A1");
        // Scorpio (8th) to Mars in Gemini is seven signs; Gemini + 7 is Capricorn
        let a8 = padas.iter().find(|p| p.house == 8).unwrap();
        assert_eq!(a8.sign, Sign::Capricorn);
        assert_eq!(padas.len(), 2);
    }

    #[test]
    fn test_arudha_labels() {
        assert_eq!(arudha_label(7), "A7 (Darapada)");
        assert_eq!(arudha_label(12), "UL (Upapada)");
    }

    #[test]
    fn test_arudha_requires_ascendant() {
        assert_eq!(
            arudha_padas(&Chart::new()).unwrap_err(),
            ChartError::IncompleteChart(Point::Ascendant)
        );
    }
}
