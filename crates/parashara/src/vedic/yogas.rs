//! Yoga detection.
//!
//! Yogas are structural patterns among placements. The catalogue is a fixed,
//! ordered list of rule functions; every rule runs and all matches are kept,
//! in catalogue order.

use serde::{Deserialize, Serialize};

use crate::chart::Chart;
use crate::zodiac::{exalted_in, Graha, Sign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YogaCategory {
    Mahapurusha,
    Raja,
    Vipreet,
    Wealth,
    Cancellation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Yoga {
    pub name: String,
    pub category: YogaCategory,
    pub description: String,
}

impl Yoga {
    fn new(name: impl Into<String>, category: YogaCategory, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category,
            description: description.into(),
        }
    }
}

const KENDRAS: [u8; 4] = [1, 4, 7, 10];
const DUSTHANAS: [u8; 3] = [6, 8, 12];

fn is_kendra(house: Option<u8>) -> bool {
    house.is_some_and(|h| KENDRAS.contains(&h))
}

fn is_dusthana(house: Option<u8>) -> bool {
    house.is_some_and(|h| DUSTHANAS.contains(&h))
}

/// A chart with a known Ascendant sign.
struct Lagna<'a> {
    chart: &'a Chart,
    asc: Sign,
}

impl Lagna<'_> {
    fn sign(&self, graha: Graha) -> Option<Sign> {
        self.chart.sign_of(graha)
    }

    fn house(&self, graha: Graha) -> Option<u8> {
        let position = self.chart.get(graha)?;
        Some(position.house_number.unwrap_or_else(|| self.asc.house_of(position.sign)))
    }

    /// Ruler of the sign occupying `house`.
    fn house_lord(&self, house: u8) -> Graha {
        self.asc.sign_in_house(house).ruler()
    }
}

type Rule = fn(&Lagna<'_>, &mut Vec<Yoga>);

const CATALOGUE: [Rule; 6] = [
    pancha_mahapurusha,
    gaja_kesari,
    dharma_karmadhipati,
    vipreet_raja,
    dhana,
    neecha_bhanga,
];

const MAHAPURUSHA: [(Graha, &str, &str); 5] = [
    (Graha::Mars, "Ruchaka Yoga", "Divine strength, courage, and leadership."),
    (Graha::Mercury, "Bhadra Yoga", "Intellect, wit, and communication skills."),
    (Graha::Jupiter, "Hamsa Yoga", "Wisdom, spirituality, and respect."),
    (Graha::Venus, "Malavya Yoga", "Luxury, beauty, and artistic success."),
    (Graha::Saturn, "Sasa Yoga", "Authority, discipline, and political power."),
];

/// Body in a kendra and in its own or exaltation sign.
fn pancha_mahapurusha(lagna: &Lagna<'_>, found: &mut Vec<Yoga>) {
    for (graha, name, description) in MAHAPURUSHA {
        let (Some(sign), house) = (lagna.sign(graha), lagna.house(graha)) else {
            continue;
        };
        if is_kendra(house) && (graha.owns(sign) || graha.is_exalted_in(sign)) {
            found.push(Yoga::new(name, YogaCategory::Mahapurusha, description));
        }
    }
}

/// Jupiter in a kendra counted from the Moon.
fn gaja_kesari(lagna: &Lagna<'_>, found: &mut Vec<Yoga>) {
    if let (Some(jupiter), Some(moon)) = (lagna.sign(Graha::Jupiter), lagna.sign(Graha::Moon)) {
        if is_kendra(Some(moon.house_of(jupiter))) {
            found.push(Yoga::new(
                "Gaja Kesari Yoga",
                YogaCategory::Raja,
                "Fame, virtue, and lasting reputation.",
            ));
        }
    }
}

/// Lords of the 9th and 10th in the same sign.
fn dharma_karmadhipati(lagna: &Lagna<'_>, found: &mut Vec<Yoga>) {
    let ninth = lagna.sign(lagna.house_lord(9));
    if ninth.is_some() && ninth == lagna.sign(lagna.house_lord(10)) {
        found.push(Yoga::new(
            "Dharma-Karmadhipati Yoga",
            YogaCategory::Raja,
            "Professional success and righteous power.",
        ));
    }
}

const VIPREET: [(u8, &str, &str); 3] = [
    (6, "Harsha Yoga", "Invincibility against enemies and health resilience."),
    (8, "Sarala Yoga", "Fearlessness, longevity, and success through risks."),
    (12, "Vimala Yoga", "Independence, savings, and spiritual elevation."),
];

/// Lord of a dusthana placed in a dusthana.
fn vipreet_raja(lagna: &Lagna<'_>, found: &mut Vec<Yoga>) {
    for (house, name, description) in VIPREET {
        if is_dusthana(lagna.house(lagna.house_lord(house))) {
            found.push(Yoga::new(name, YogaCategory::Vipreet, description));
        }
    }
}

/// Lords of the 2nd and 11th in the same sign.
fn dhana(lagna: &Lagna<'_>, found: &mut Vec<Yoga>) {
    let second = lagna.sign(lagna.house_lord(2));
    if second.is_some() && second == lagna.sign(lagna.house_lord(11)) {
        found.push(Yoga::new(
            "Dhana Yoga (2-11 Link)",
            YogaCategory::Wealth,
            "Great accumulation of financial assets.",
        ));
    }
}

/// A debilitated body whose dispositor, or the body exalted in its sign, is
/// in a kendra from the Ascendant.
fn neecha_bhanga(lagna: &Lagna<'_>, found: &mut Vec<Yoga>) {
    for graha in Graha::CLASSICAL {
        let Some(sign) = lagna.sign(graha) else {
            continue;
        };
        if !graha.is_debilitated_in(sign) {
            continue;
        }
        let dispositor_angular = is_kendra(lagna.house(sign.ruler()));
        let exalted_angular = exalted_in(sign).is_some_and(|g| is_kendra(lagna.house(g)));
        if dispositor_angular || exalted_angular {
            found.push(Yoga::new(
                format!("Neecha Bhanga Raja Yoga ({})", graha),
                YogaCategory::Cancellation,
                format!(
                    "Debilitation of {} is cancelled, converting weakness into strength.",
                    graha
                ),
            ));
        }
    }
}

/// Every yoga present in `chart`, in catalogue order. A chart without an
/// Ascendant yields no yogas.
pub fn check_yogas(chart: &Chart) -> Vec<Yoga> {
    let Some(asc) = chart.ascendant_sign() else {
        log::warn!("chart has no Ascendant; yoga check skipped");
        return Vec::new();
    };
    let lagna = Lagna { chart, asc };
    let mut found = Vec::new();
    for rule in CATALOGUE {
        rule(&lagna, &mut found);
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::BodyPosition;
    use crate::zodiac::Point;

    fn at(sign: Sign, degree: f64) -> BodyPosition {
        BodyPosition::body(sign.index() as f64 * 30.0 + degree, 1.0).unwrap()
    }

    fn rising(sign: Sign) -> Chart {
        Chart::new().with(Point::Ascendant, BodyPosition::ascendant(sign.index() as f64 * 30.0 + 10.0).unwrap())
    }

    fn names(yogas: &[Yoga]) -> Vec<&str> {
        yogas.iter().map(|y| y.name.as_str()).collect()
    }

    #[test]
    fn test_no_ascendant_no_yogas() {
        let chart = Chart::new()
            .with(Graha::Moon, at(Sign::Aries, 1.0))
            .with(Graha::Jupiter, at(Sign::Aries, 2.0));
        assert!(check_yogas(&chart).is_empty());
    }

    #[test]
    fn test_ruchaka_needs_kendra_and_dignity() {
        let chart = rising(Sign::Aries).with(Graha::Mars, at(Sign::Capricorn, 5.0));
        assert_eq!(names(&check_yogas(&chart)), vec!["Ruchaka Yoga"]);

        let off_angle = rising(Sign::Taurus).with(Graha::Mars, at(Sign::Capricorn, 5.0));
        assert!(!names(&check_yogas(&off_angle)).contains(&"Ruchaka Yoga"));
    }

    #[test]
    fn test_gaja_kesari_same_sign() {
        let chart = rising(Sign::Gemini)
            .with(Graha::Moon, at(Sign::Leo, 3.0))
            .with(Graha::Jupiter, at(Sign::Leo, 20.0));
        assert!(names(&check_yogas(&chart)).contains(&"Gaja Kesari Yoga"));
    }

    #[test]
    fn test_dharma_karmadhipati_single_lord() {
        // Taurus rising: Saturn rules both the 9th (Capricorn) and 10th (Aquarius)
        let chart = rising(Sign::Taurus).with(Graha::Saturn, at(Sign::Gemini, 1.0));
        assert!(names(&check_yogas(&chart)).contains(&"Dharma-Karmadhipati Yoga"));
    }

    #[test]
    fn test_dharma_karmadhipati_missing_lords() {
        // Aries rising: Jupiter (9th) and Saturn (10th) both absent
        let chart = rising(Sign::Aries);
        assert!(!names(&check_yogas(&chart)).contains(&"Dharma-Karmadhipati Yoga"));
    }

    #[test]
    fn test_vipreet_uses_stored_or_fallback_house() {
        // Aries rising: Mercury rules the 6th; Mercury in Scorpio is the 8th
        let chart = rising(Sign::Aries).with(Graha::Mercury, at(Sign::Scorpio, 2.0));
        assert!(names(&check_yogas(&chart)).contains(&"Harsha Yoga"));
    }

    #[test]
    fn test_dhana_yoga() {
        // Aries rising: Venus rules the 2nd, Saturn the 11th
        let chart = rising(Sign::Aries)
            .with(Graha::Venus, at(Sign::Leo, 2.0))
            .with(Graha::Saturn, at(Sign::Leo, 12.0));
        assert!(names(&check_yogas(&chart)).contains(&"Dhana Yoga (2-11 Link)"));
    }

    #[test]
    fn test_neecha_bhanga_by_dispositor() {
        // Sun debilitated in Libra; Venus (ruler of Libra) in the 1st
        let chart = rising(Sign::Aries)
            .with(Graha::Sun, at(Sign::Libra, 10.0))
            .with(Graha::Venus, at(Sign::Aries, 3.0));
        let yogas = check_yogas(&chart);
        let nb = yogas
            .iter()
            .find(|y| y.category == YogaCategory::Cancellation)
            .unwrap();
        assert_eq!(nb.name, "Neecha Bhanga Raja Yoga (Sun)");
    }

    #[test]
    fn test_neecha_bhanga_by_exalted_body() {
        // Sun debilitated in Libra; Saturn (exalted in Libra) in the 10th
        let chart = rising(Sign::Cancer)
            .with(Graha::Sun, at(Sign::Libra, 10.0))
            .with(Graha::Saturn, at(Sign::Aries, 3.0));
        assert!(names(&check_yogas(&chart)).contains(&"Neecha Bhanga Raja Yoga (Sun)"));
    }

    #[test]
    fn test_catalogue_order() {
        let chart = rising(Sign::Aries)
            .with(Graha::Mars, at(Sign::Aries, 5.0))
            .with(Graha::Moon, at(Sign::Cancer, 5.0))
            .with(Graha::Jupiter, at(Sign::Cancer, 7.0));
        let yogas = check_yogas(&chart);
        let found = names(&yogas);
        let ruchaka = found.iter().position(|n| *n == "Ruchaka Yoga").unwrap();
        let gaja = found.iter().position(|n| *n == "Gaja Kesari Yoga").unwrap();
        assert!(ruchaka < gaja);
    }
}
