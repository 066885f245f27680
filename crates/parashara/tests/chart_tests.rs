mod common;

use common::{calculator, greenwich, FakeSky};
use parashara::chart::{feature_vector, rule_keys};
use parashara::time::J2000_JD;
use parashara::vedic::{calculate_varga, Varga};
use parashara::{
    calculate_chart, AnalyticEphemeris, AyanamsaMode, BirthDetails, ChartError, GeoLocation, Graha,
    Point, Sign,
};

#[test]
fn test_ketu_always_opposes_rahu() {
    let provider = AnalyticEphemeris::new();
    let calc = parashara::ChartCalculator::new(&provider);
    let mut jd = 2_415_020.5; // 1900-01-01
    while jd < 2_488_070.5 {
        let chart = calc.chart_at(jd, greenwich(), AyanamsaMode::Lahiri).unwrap();
        let rahu = chart.get(Graha::Rahu).unwrap();
        let ketu = chart.get(Graha::Ketu).unwrap();

        let separation = (ketu.sidereal_longitude - rahu.sidereal_longitude).rem_euclid(360.0);
        assert!((separation - 180.0).abs() < 1e-9, "JD {jd}: {separation}");
        assert_eq!(ketu.sign, rahu.sign.offset(6));
        assert!((ketu.degree_in_sign - rahu.degree_in_sign).abs() < 1e-9);
        assert_eq!(ketu.speed, rahu.speed);
        assert_eq!(ketu.is_retrograde, rahu.is_retrograde);
        jd += 1_234.5;
    }
}

#[test]
fn test_houses_in_range_and_ascendant_has_none() {
    let provider = AnalyticEphemeris::new();
    let birth = BirthDetails::new(1985, 7, 14, 16, 45, 5.5);
    let location = GeoLocation::new(19.076, 72.8777).unwrap();
    let chart = calculate_chart(&provider, &birth, location, AyanamsaMode::Lahiri).unwrap();

    assert!(chart.is_complete());
    let asc = chart.ascendant().unwrap();
    assert_eq!(asc.house_number, None);
    assert_eq!(asc.is_retrograde, None);
    for (graha, position) in chart.grahas() {
        let house = position.house_number.unwrap();
        assert!((1..=12).contains(&house), "{graha}: {house}");
        assert_eq!(house, asc.sign.house_of(position.sign));
    }
}

#[test]
fn test_longitude_decomposition_invariant() {
    let provider = AnalyticEphemeris::new();
    let chart = parashara::ChartCalculator::new(&provider)
        .chart_at(J2000_JD, greenwich(), AyanamsaMode::Raman)
        .unwrap();
    for (_, position) in chart.iter() {
        let rebuilt = position.sign.index() as f64 * 30.0 + position.degree_in_sign;
        assert!((rebuilt - position.sidereal_longitude).abs() < 1e-9);
        assert!((0.0..30.0).contains(&position.degree_in_sign));
        assert!((0.0..360.0).contains(&position.sidereal_longitude));
        assert_eq!(
            position.d9_sign,
            calculate_varga(position.degree_in_sign, position.sign).unwrap()
        );
    }
}

#[test]
fn test_sun_at_j2000_is_in_sagittarius() {
    // Tropical ~280.4, Lahiri ~23.85 -> ~256.5 sidereal
    let provider = AnalyticEphemeris::new();
    let chart = parashara::ChartCalculator::new(&provider)
        .chart_at(J2000_JD, greenwich(), AyanamsaMode::Lahiri)
        .unwrap();
    let sun = chart.get(Graha::Sun).unwrap();
    assert_eq!(sun.sign, Sign::Sagittarius);
    assert!((sun.sidereal_longitude - 256.52).abs() < 0.2, "{}", sun.sidereal_longitude);
    assert_eq!(sun.is_retrograde, Some(false));
}

#[test]
fn test_outside_ephemeris_range() {
    let provider = AnalyticEphemeris::new();
    let birth = BirthDetails::new(1700, 1, 1, 12, 0, 0.0);
    let err = calculate_chart(&provider, &birth, greenwich(), AyanamsaMode::Lahiri).unwrap_err();
    assert!(matches!(err, ChartError::Range(_)));
}

#[test]
fn test_malformed_calendar_fields() {
    let provider = AnalyticEphemeris::new();
    let birth = BirthDetails::new(1999, 4, 31, 12, 0, 0.0);
    let err = calculate_chart(&provider, &birth, greenwich(), AyanamsaMode::Lahiri).unwrap_err();
    assert!(matches!(err, ChartError::Input(_)));
}

#[test]
fn test_whole_sign_houses_from_fake_sky() {
    let sky = FakeSky::new()
        .with_ascendant(180.5)
        .with_body(Graha::Mars, 10.0, 0.6)
        .with_body(Graha::Saturn, 179.5, -0.03)
        .with_body(Graha::Jupiter, 209.0, 0.1);
    let chart = calculator(sky).chart_at(J2000_JD, greenwich(), AyanamsaMode::Lahiri).unwrap();
    assert_eq!(chart.ascendant_sign(), Some(Sign::Libra));
    assert_eq!(chart.get(Graha::Mars).unwrap().house_number, Some(7));
    // Virgo 29.5° is the 12th from Libra although only a degree behind the Ascendant
    let saturn = chart.get(Graha::Saturn).unwrap();
    assert_eq!(saturn.sign, Sign::Virgo);
    assert_eq!(saturn.house_number, Some(12));
    assert_eq!(saturn.is_retrograde, Some(true));
    // Libra 29° shares the rising sign, so it is the 1st
    assert_eq!(chart.get(Graha::Jupiter).unwrap().house_number, Some(1));
}

#[test]
fn test_navamsa_chart_view() {
    let sky = FakeSky::new()
        .with_ascendant(3.0)
        .with_body(Graha::Moon, 45.0, 13.0);
    let chart = calculator(sky).chart_at(J2000_JD, greenwich(), AyanamsaMode::Lahiri).unwrap();
    let d9 = chart.divisional(Varga::Navamsa).unwrap();
    assert!(d9.is_complete());
    for (point, position) in d9.iter() {
        assert_eq!(position.sign, chart.get(point).unwrap().d9_sign);
    }
    // Taurus 15° is the fifth navamsa from Capricorn
    assert_eq!(d9.get(Point::Moon).unwrap().sign, Sign::Taurus);
}

#[test]
fn test_feature_vector_and_rule_keys() {
    let sky = FakeSky::new()
        .with_ascendant(95.0)
        .with_body(Graha::Sun, 5.0, 1.0);
    let chart = calculator(sky).chart_at(J2000_JD, greenwich(), AyanamsaMode::Lahiri).unwrap();
    let features = feature_vector(&chart).unwrap();
    assert_eq!(features.len(), 18);
    assert_eq!(&features[..2], &[0.0, 10.0]);
    let keys = rule_keys(&chart).unwrap();
    assert_eq!(keys[0], "SUN_ARI_H10");
    // Rahu at 0° Aries puts Ketu in Libra
    assert_eq!(keys[8], "KET_LIB_H4");
}
