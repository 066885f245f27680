//! Vimshottari dasha calculations.
//!
//! Dashas are time periods ruled by grahas, calculated from the Moon's
//! nakshatra at birth. Each period nests nine sub-periods down to the
//! Sookshma level.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::chart::Chart;
use crate::error::ChartError;
use crate::vedic::nakshatra::{nakshatra_for_longitude, DASHA_ORDER};
use crate::zodiac::Graha;

pub const VIMSHOTTARI_TOTAL_YEARS: f64 = 120.0;
/// Average Gregorian year. Dates are `start + years * 365.2425` days, never
/// calendar-aware addition.
pub const DASHA_YEAR_DAYS: f64 = 365.2425;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashaLevel {
    Mahadasha,
    Antardasha,
    Pratyantardasha,
    Sookshmadasha,
}

const DEPTH_LEVELS: [DashaLevel; 4] = [
    DashaLevel::Mahadasha,
    DashaLevel::Antardasha,
    DashaLevel::Pratyantardasha,
    DashaLevel::Sookshmadasha,
];

impl DashaLevel {
    pub fn depth(self) -> usize {
        self as usize
    }

    fn next(self) -> Option<DashaLevel> {
        DEPTH_LEVELS.get(self.depth() + 1).copied()
    }
}

/// Full-cycle years of a lord. The nine values sum to 120.
pub fn dasha_years(lord: Graha) -> f64 {
    match lord {
        Graha::Ketu => 7.0,
        Graha::Venus => 20.0,
        Graha::Sun => 6.0,
        Graha::Moon => 10.0,
        Graha::Mars => 7.0,
        Graha::Rahu => 18.0,
        Graha::Jupiter => 16.0,
        Graha::Saturn => 19.0,
        Graha::Mercury => 17.0,
    }
}

fn order_index(lord: Graha) -> usize {
    DASHA_ORDER.iter().position(|g| *g == lord).unwrap_or_default()
}

/// The nine lords in Vimshottari order beginning with `first`.
fn cycle_from(first: Graha) -> impl Iterator<Item = Graha> {
    let start = order_index(first);
    (0..DASHA_ORDER.len()).map(move |i| DASHA_ORDER[(start + i) % DASHA_ORDER.len()])
}

/// Years to a chrono duration at microsecond resolution.
pub fn years_to_duration(years: f64) -> Duration {
    let micros = (years * DASHA_YEAR_DAYS * 86_400.0 * 1_000_000.0).round();
    Duration::microseconds(micros as i64)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashaPeriod {
    pub lord: Graha,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(rename = "duration")]
    pub duration_years: f64,
    pub level: DashaLevel,
    /// The partially elapsed first Mahadasha.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_balance: bool,
    pub children: Vec<DashaPeriod>,
}

impl DashaPeriod {
    fn new(lord: Graha, start: DateTime<Utc>, duration_years: f64, level: DashaLevel) -> Self {
        Self {
            lord,
            start,
            end: start + years_to_duration(duration_years),
            duration_years,
            level,
            is_balance: false,
            children: Vec::new(),
        }
    }

    /// Half-open `[start, end)`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    fn child_at(&self, instant: DateTime<Utc>) -> Option<&DashaPeriod> {
        self.children.iter().find(|child| child.contains(instant))
    }
}

/// Nine sub-periods of a parent, starting with the parent's own lord, nested
/// down to Sookshma.
fn sub_periods(
    start: DateTime<Utc>,
    parent_lord: Graha,
    parent_years: f64,
    level: DashaLevel,
) -> Vec<DashaPeriod> {
    let mut children = Vec::with_capacity(DASHA_ORDER.len());
    let mut cursor = start;
    for lord in cycle_from(parent_lord) {
        let years = parent_years * dasha_years(lord) / VIMSHOTTARI_TOTAL_YEARS;
        let mut child = DashaPeriod::new(lord, cursor, years, level);
        if let Some(next) = level.next() {
            child.children = sub_periods(cursor, lord, years, next);
        }
        cursor = child.end;
        children.push(child);
    }
    children
}

/// Periods active at one instant, outermost first.
#[derive(Debug, Clone, Serialize)]
pub struct DashaLocation<'a> {
    pub mahadasha: &'a DashaPeriod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub antardasha: Option<&'a DashaPeriod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pratyantardasha: Option<&'a DashaPeriod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sookshmadasha: Option<&'a DashaPeriod>,
}

impl DashaLocation<'_> {
    /// Lords from Mahadasha down to the deepest resolved level.
    pub fn lords(&self) -> Vec<Graha> {
        [
            Some(self.mahadasha),
            self.antardasha,
            self.pratyantardasha,
            self.sookshmadasha,
        ]
        .into_iter()
        .flatten()
        .map(|p| p.lord)
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VimshottariTimeline {
    pub birth: DateTime<Utc>,
    pub starting_lord: Graha,
    pub nakshatra: String,
    pub balance_years: f64,
    /// The balance period followed by nine full Mahadashas.
    pub periods: Vec<DashaPeriod>,
}

impl VimshottariTimeline {
    /// Start of the first period to end of the last.
    pub fn span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((self.periods.first()?.start, self.periods.last()?.end))
    }

    /// Descends to the deepest period containing `instant`; `None` outside the
    /// generated span.
    pub fn locate(&self, instant: DateTime<Utc>) -> Option<DashaLocation<'_>> {
        let mahadasha = self.periods.iter().find(|p| p.contains(instant))?;
        let antardasha = mahadasha.child_at(instant);
        let pratyantardasha = antardasha.and_then(|p| p.child_at(instant));
        let sookshmadasha = pratyantardasha.and_then(|p| p.child_at(instant));
        Some(DashaLocation {
            mahadasha,
            antardasha,
            pratyantardasha,
            sookshmadasha,
        })
    }

    /// Like [`VimshottariTimeline::locate`], but an instant outside the span
    /// is a `Range` error.
    pub fn current(&self, instant: DateTime<Utc>) -> Result<DashaLocation<'_>, ChartError> {
        self.locate(instant).ok_or_else(|| {
            ChartError::range(format!("{} is outside the generated dasha timeline", instant))
        })
    }
}

/// Vimshottari timeline from the Moon's sidereal longitude at birth.
pub fn calculate_dashas(
    moon_longitude: f64,
    birth: DateTime<Utc>,
) -> Result<VimshottariTimeline, ChartError> {
    if !(0.0..360.0).contains(&moon_longitude) {
        return Err(ChartError::input(format!(
            "Moon longitude {} outside [0, 360)",
            moon_longitude
        )));
    }

    let placement = nakshatra_for_longitude(moon_longitude);
    let starting_lord = placement.nakshatra.lord;
    let balance_years = dasha_years(starting_lord) * (1.0 - placement.fraction_elapsed);
    log::debug!(
        "Moon in {} ({:.4} elapsed): {} balance {:.4} years",
        placement.nakshatra.name,
        placement.fraction_elapsed,
        starting_lord,
        balance_years
    );

    // The balance period is never subdivided.
    let mut balance = DashaPeriod::new(starting_lord, birth, balance_years, DashaLevel::Mahadasha);
    balance.is_balance = true;

    let mut cursor = balance.end;
    let mut periods = vec![balance];
    for lord in cycle_from(starting_lord).skip(1).chain(std::iter::once(starting_lord)) {
        let years = dasha_years(lord);
        let mut period = DashaPeriod::new(lord, cursor, years, DashaLevel::Mahadasha);
        period.children = sub_periods(cursor, lord, years, DashaLevel::Antardasha);
        cursor = period.end;
        periods.push(period);
    }

    Ok(VimshottariTimeline {
        birth,
        starting_lord,
        nakshatra: placement.nakshatra.name.to_string(),
        balance_years,
        periods,
    })
}

/// Timeline from a chart's Moon.
pub fn dashas_for_chart(
    chart: &Chart,
    birth: DateTime<Utc>,
) -> Result<VimshottariTimeline, ChartError> {
    let moon = chart.require(Graha::Moon)?;
    calculate_dashas(moon.sidereal_longitude, birth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn birth() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_years_sum_to_cycle() {
        let total: f64 = DASHA_ORDER.iter().map(|g| dasha_years(*g)).sum();
        assert_eq!(total, VIMSHOTTARI_TOTAL_YEARS);
    }

    #[test]
    fn test_timeline_shape() {
        let timeline = calculate_dashas(100.0, birth()).unwrap();
        assert_eq!(timeline.periods.len(), 10);
        assert!(timeline.periods[0].is_balance);
        assert!(timeline.periods[0].children.is_empty());
        for period in &timeline.periods[1..] {
            assert_eq!(period.children.len(), 9);
            assert_eq!(period.children[0].lord, period.lord);
            assert_eq!(period.children[0].level, DashaLevel::Antardasha);
        }
    }

    #[test]
    fn test_full_periods_follow_starting_lord() {
        // 85° is in Punarvasu (Jupiter), 80° to 93°20'
        let timeline = calculate_dashas(85.0, birth()).unwrap();
        assert_eq!(timeline.starting_lord, Graha::Jupiter);
        let lords: Vec<Graha> = timeline.periods.iter().map(|p| p.lord).collect();
        assert_eq!(
            lords,
            vec![
                Graha::Jupiter,
                Graha::Saturn,
                Graha::Mercury,
                Graha::Ketu,
                Graha::Venus,
                Graha::Sun,
                Graha::Moon,
                Graha::Mars,
                Graha::Rahu,
                Graha::Jupiter,
            ]
        );
    }

    #[test]
    fn test_pushya_starts_with_saturn() {
        // 100° is past Punarvasu, in Pushya
        let timeline = calculate_dashas(100.0, birth()).unwrap();
        assert_eq!(timeline.starting_lord, Graha::Saturn);
        assert_eq!(timeline.nakshatra, "Pushya");
        assert_eq!(timeline.periods[1].lord, Graha::Mercury);
    }

    #[test]
    fn test_recursion_stops_at_sookshma() {
        let timeline = calculate_dashas(200.0, birth()).unwrap();
        let antar = &timeline.periods[1].children[0];
        let pratyantar = &antar.children[0];
        let sookshma = &pratyantar.children[0];
        assert_eq!(sookshma.level, DashaLevel::Sookshmadasha);
        assert!(sookshma.children.is_empty());
    }

    #[test]
    fn test_sub_period_formula() {
        let timeline = calculate_dashas(0.0, birth()).unwrap();
        // Venus follows the Ketu balance; Venus-Venus = 20 * 20 / 120
        let venus = &timeline.periods[1];
        assert_eq!(venus.lord, Graha::Venus);
        assert!((venus.children[0].duration_years - 20.0 * 20.0 / 120.0).abs() < 1e-12);
        assert_eq!(venus.children[1].lord, Graha::Sun);
    }

    #[test]
    fn test_out_of_range_longitude() {
        for bad in [-1.0, 360.0, f64::NAN] {
            assert!(matches!(calculate_dashas(bad, birth()), Err(ChartError::Input(_))));
        }
    }

    #[test]
    fn test_current_outside_span_is_range_error() {
        let timeline = calculate_dashas(0.0, birth()).unwrap();
        let before = birth() - Duration::days(1);
        assert!(timeline.locate(before).is_none());
        assert!(matches!(timeline.current(before), Err(ChartError::Range(_))));
    }

    #[test]
    fn test_location_lords() {
        let timeline = calculate_dashas(0.0, birth()).unwrap();
        let instant = timeline.periods[2].start + Duration::days(1);
        let location = timeline.locate(instant).unwrap();
        assert_eq!(location.lords().len(), 4);
        assert_eq!(location.lords()[0], Graha::Sun);
        assert!(location.sookshmadasha.is_some());
    }
}
