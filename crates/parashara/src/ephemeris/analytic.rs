//! Pure-Rust low-precision ephemeris.
//!
//! Mean orbital elements of date with the principal lunar, Jupiter and Saturn
//! perturbation terms. Longitudes are geocentric, tropical, referred to the
//! equinox of date, and good to roughly an arc-minute over the valid range.

use std::f64::consts::PI;

use crate::ephemeris::provider::PositionProvider;
use crate::ephemeris::types::{GeoLocation, TropicalPosition};
use crate::error::ProviderError;
use crate::time::{julian_centuries, J2000_JD};
use crate::zodiac::{normalize_degrees, Graha};

/// 1800-01-01 00:00 UT
pub const ANALYTIC_MIN_JD: f64 = 2_378_496.5;
/// 2200-01-01 00:00 UT
pub const ANALYTIC_MAX_JD: f64 = 2_524_593.5;

/// Day numbers are counted from 2000 Jan 0.0 UT.
const DAY_ZERO_JD: f64 = 2_451_543.5;

/// Mean node regression, degrees per day.
const MEAN_NODE_RATE: f64 = -0.052_953_808_3;

const SPEED_STEP_DAYS: f64 = 0.5;

#[derive(Debug, Clone, Copy)]
struct OrbitalElements {
    /// Longitude of the ascending node (deg)
    node: f64,
    /// Inclination (deg)
    incl: f64,
    /// Argument of perihelion (deg)
    peri: f64,
    /// Semi-major axis (AU, Earth radii for the Moon)
    axis: f64,
    ecc: f64,
    /// Mean anomaly (deg)
    anomaly: f64,
}

fn elements(body: Graha, d: f64) -> Option<OrbitalElements> {
    let el = match body {
        Graha::Sun => OrbitalElements {
            node: 0.0,
            incl: 0.0,
            peri: 282.9404 + 4.70935e-5 * d,
            axis: 1.0,
            ecc: 0.016709 - 1.151e-9 * d,
            anomaly: 356.0470 + 0.985_600_258_5 * d,
        },
        Graha::Moon => OrbitalElements {
            node: 125.1228 + MEAN_NODE_RATE * d,
            incl: 5.1454,
            peri: 318.0634 + 0.164_357_322_3 * d,
            axis: 60.2666,
            ecc: 0.054900,
            anomaly: 115.3654 + 13.064_992_950_9 * d,
        },
        Graha::Mercury => OrbitalElements {
            node: 48.3313 + 3.24587e-5 * d,
            incl: 7.0047 + 5.00e-8 * d,
            peri: 29.1241 + 1.01444e-5 * d,
            axis: 0.387098,
            ecc: 0.205635 + 5.59e-10 * d,
            anomaly: 168.6562 + 4.092_334_436_8 * d,
        },
        Graha::Venus => OrbitalElements {
            node: 76.6799 + 2.46590e-5 * d,
            incl: 3.3946 + 2.75e-8 * d,
            peri: 54.8910 + 1.38374e-5 * d,
            axis: 0.723330,
            ecc: 0.006773 - 1.302e-9 * d,
            anomaly: 48.0052 + 1.602_130_224_4 * d,
        },
        Graha::Mars => OrbitalElements {
            node: 49.5574 + 2.11081e-5 * d,
            incl: 1.8497 - 1.78e-8 * d,
            peri: 286.5016 + 2.92961e-5 * d,
            axis: 1.523688,
            ecc: 0.093405 + 2.516e-9 * d,
            anomaly: 18.6021 + 0.524_020_776_6 * d,
        },
        Graha::Jupiter => OrbitalElements {
            node: 100.4542 + 2.76854e-5 * d,
            incl: 1.3030 - 1.557e-7 * d,
            peri: 273.8777 + 1.64505e-5 * d,
            axis: 5.20256,
            ecc: 0.048498 + 4.469e-9 * d,
            anomaly: 19.8950 + 0.083_085_300_1 * d,
        },
        Graha::Saturn => OrbitalElements {
            node: 113.6634 + 2.38980e-5 * d,
            incl: 2.4886 - 1.081e-7 * d,
            peri: 339.3939 + 2.97661e-5 * d,
            axis: 9.55475,
            ecc: 0.055546 - 9.499e-9 * d,
            anomaly: 316.9670 + 0.033_444_228_2 * d,
        },
        Graha::Rahu | Graha::Ketu => return None,
    };
    Some(el)
}

fn sin_deg(x: f64) -> f64 {
    x.to_radians().sin()
}

fn cos_deg(x: f64) -> f64 {
    x.to_radians().cos()
}

/// Eccentric anomaly (radians) by Newton iteration.
fn eccentric_anomaly(mean_anomaly_deg: f64, ecc: f64) -> f64 {
    let m = normalize_degrees(mean_anomaly_deg).to_radians();
    let mut e = m + ecc * m.sin() * (1.0 + ecc * m.cos());
    for _ in 0..12 {
        let delta = (e - ecc * e.sin() - m) / (1.0 - ecc * e.cos());
        e -= delta;
        if delta.abs() < 1e-12 {
            break;
        }
    }
    e
}

/// Ecliptic (longitude deg, latitude deg, distance) about the orbit's focus.
fn orbit_position(el: &OrbitalElements) -> (f64, f64, f64) {
    let e = eccentric_anomaly(el.anomaly, el.ecc);
    let xv = el.axis * (e.cos() - el.ecc);
    let yv = el.axis * ((1.0 - el.ecc * el.ecc).sqrt() * e.sin());
    let v = yv.atan2(xv);
    let r = xv.hypot(yv);

    let node = el.node.to_radians();
    let incl = el.incl.to_radians();
    let vw = v + el.peri.to_radians();

    let xh = r * (node.cos() * vw.cos() - node.sin() * vw.sin() * incl.cos());
    let yh = r * (node.sin() * vw.cos() + node.cos() * vw.sin() * incl.cos());
    let zh = r * (vw.sin() * incl.sin());

    let lon = yh.atan2(xh).to_degrees();
    let lat = zh.atan2(xh.hypot(yh)).to_degrees();
    (normalize_degrees(lon), lat, r)
}

fn moon_perturbation(sun: &OrbitalElements, moon: &OrbitalElements) -> f64 {
    let ms = sun.anomaly;
    let mm = moon.anomaly;
    let ls = ms + sun.peri;
    let lm = mm + moon.peri + moon.node;
    let dd = lm - ls;
    let f = lm - moon.node;

    -1.274 * sin_deg(mm - 2.0 * dd)
        + 0.658 * sin_deg(2.0 * dd)
        - 0.186 * sin_deg(ms)
        - 0.059 * sin_deg(2.0 * mm - 2.0 * dd)
        - 0.057 * sin_deg(mm - 2.0 * dd + ms)
        + 0.053 * sin_deg(mm + 2.0 * dd)
        + 0.046 * sin_deg(2.0 * dd - ms)
        + 0.041 * sin_deg(mm - ms)
        - 0.035 * sin_deg(dd)
        - 0.031 * sin_deg(mm + ms)
        - 0.015 * sin_deg(2.0 * f - 2.0 * dd)
        + 0.011 * sin_deg(mm - 4.0 * dd)
}

/// The great inequality and friends.
fn giant_perturbation(body: Graha, d: f64) -> f64 {
    let mj = 19.8950 + 0.083_085_300_1 * d;
    let ms = 316.9670 + 0.033_444_228_2 * d;
    match body {
        Graha::Jupiter => {
            -0.332 * sin_deg(2.0 * mj - 5.0 * ms - 67.6)
                - 0.056 * sin_deg(2.0 * mj - 2.0 * ms + 21.0)
                + 0.042 * sin_deg(3.0 * mj - 5.0 * ms + 21.0)
                - 0.036 * sin_deg(mj - 2.0 * ms)
                + 0.022 * cos_deg(mj - ms)
                + 0.023 * sin_deg(2.0 * mj - 3.0 * ms + 52.0)
                - 0.016 * sin_deg(mj - 5.0 * ms - 69.0)
        }
        Graha::Saturn => {
            0.812 * sin_deg(2.0 * mj - 5.0 * ms - 67.6)
                - 0.229 * cos_deg(2.0 * mj - 4.0 * ms - 2.0)
                + 0.119 * sin_deg(mj - 2.0 * ms - 3.0)
                + 0.046 * sin_deg(2.0 * mj - 6.0 * ms - 69.0)
                + 0.014 * sin_deg(mj - 3.0 * ms + 32.0)
        }
        _ => 0.0,
    }
}

/// Geocentric tropical longitude of a body at day number `d`.
fn geocentric_longitude(body: Graha, d: f64) -> Option<f64> {
    match body {
        Graha::Rahu => Some(normalize_degrees(125.1228 + MEAN_NODE_RATE * d)),
        Graha::Ketu => None,
        Graha::Sun => {
            let (lon, _, _) = orbit_position(&elements(Graha::Sun, d)?);
            Some(lon)
        }
        Graha::Moon => {
            let sun = elements(Graha::Sun, d)?;
            let moon = elements(Graha::Moon, d)?;
            let (lon, _, _) = orbit_position(&moon);
            Some(normalize_degrees(lon + moon_perturbation(&sun, &moon)))
        }
        _ => {
            let (sun_lon, _, sun_r) = orbit_position(&elements(Graha::Sun, d)?);
            let (lon, lat, r) = orbit_position(&elements(body, d)?);
            let lon = (lon + giant_perturbation(body, d)).to_radians();
            let lat = lat.to_radians();
            let xg = r * lon.cos() * lat.cos() + sun_r * sun_lon.to_radians().cos();
            let yg = r * lon.sin() * lat.cos() + sun_r * sun_lon.to_radians().sin();
            Some(normalize_degrees(yg.atan2(xg).to_degrees()))
        }
    }
}

/// Signed difference `b - a` folded into (-180, 180].
fn wrapped_difference(a: f64, b: f64) -> f64 {
    let diff = (b - a).rem_euclid(360.0);
    if diff > 180.0 {
        diff - 360.0
    } else {
        diff
    }
}

/// Mean obliquity of the ecliptic in degrees.
pub fn mean_obliquity_deg(jd_ut: f64) -> f64 {
    23.4393 - 3.563e-7 * (jd_ut - DAY_ZERO_JD)
}

/// Greenwich mean sidereal time in degrees (IAU 1982).
pub fn gmst_deg(jd_ut: f64) -> f64 {
    let t = julian_centuries(jd_ut);
    normalize_degrees(
        280.460_618_37 + 360.985_647_366_29 * (jd_ut - J2000_JD) + 0.000_387_933 * t * t
            - t * t * t / 38_710_000.0,
    )
}

/// Ecliptic longitude rising on the eastern horizon for a local sidereal time.
pub fn ascendant_from_lst(lst_deg: f64, latitude_deg: f64, obliquity_deg: f64) -> f64 {
    let lst = lst_deg.to_radians();
    let eps = obliquity_deg.to_radians();
    let phi = latitude_deg.to_radians();
    let asc = f64::atan2(lst.cos(), -(lst.sin() * eps.cos() + phi.tan() * eps.sin()));
    normalize_degrees(asc * 180.0 / PI)
}

/// Analytic provider. Stateless and cheap to copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self
    }
}

impl PositionProvider for AnalyticEphemeris {
    fn position(&self, jd_ut: f64, body: Graha) -> Result<TropicalPosition, ProviderError> {
        if body == Graha::Ketu {
            return Err(ProviderError::UnsupportedBody(body));
        }
        if !jd_ut.is_finite() {
            return Err(ProviderError::CalculationFailed {
                body: body.to_string(),
                jd: jd_ut,
                message: "non-finite Julian day".to_string(),
            });
        }
        let d = jd_ut - DAY_ZERO_JD;
        let failed = || ProviderError::CalculationFailed {
            body: body.to_string(),
            jd: jd_ut,
            message: "no orbital elements".to_string(),
        };

        let lon = geocentric_longitude(body, d).ok_or_else(failed)?;
        let speed_lon = if body == Graha::Rahu {
            MEAN_NODE_RATE
        } else {
            let before = geocentric_longitude(body, d - SPEED_STEP_DAYS).ok_or_else(failed)?;
            let after = geocentric_longitude(body, d + SPEED_STEP_DAYS).ok_or_else(failed)?;
            wrapped_difference(before, after) / (2.0 * SPEED_STEP_DAYS)
        };

        Ok(TropicalPosition { lon, speed_lon })
    }

    fn ascendant(&self, jd_ut: f64, location: GeoLocation) -> Result<f64, ProviderError> {
        let lst = gmst_deg(jd_ut) + location.lon;
        Ok(ascendant_from_lst(lst, location.lat, mean_obliquity_deg(jd_ut)))
    }

    fn valid_range(&self) -> (f64, f64) {
        (ANALYTIC_MIN_JD, ANALYTIC_MAX_JD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sun_at_j2000() {
        let sun = AnalyticEphemeris.position(J2000_JD, Graha::Sun).unwrap();
        assert!((sun.lon - 280.37).abs() < 0.1, "sun lon {}", sun.lon);
        assert!((sun.speed_lon - 1.019).abs() < 0.01, "sun speed {}", sun.speed_lon);
    }

    #[test]
    fn test_mean_node_at_j2000() {
        let node = AnalyticEphemeris.position(J2000_JD, Graha::Rahu).unwrap();
        assert!((node.lon - 125.04).abs() < 0.01);
        assert!(node.is_retrograde());
    }

    #[test]
    fn test_moon_moves_fast() {
        let moon = AnalyticEphemeris.position(J2000_JD, Graha::Moon).unwrap();
        assert!(moon.speed_lon > 11.0 && moon.speed_lon < 16.0, "moon speed {}", moon.speed_lon);
    }

    #[test]
    fn test_every_queryable_body_is_normalized() {
        for body in Graha::ALL.iter().copied().filter(|g| *g != Graha::Ketu) {
            for jd in [ANALYTIC_MIN_JD, J2000_JD, ANALYTIC_MAX_JD] {
                let pos = AnalyticEphemeris.position(jd, body).unwrap();
                assert!((0.0..360.0).contains(&pos.lon), "{body} at {jd}: {}", pos.lon);
                assert!(pos.speed_lon.abs() < 20.0);
            }
        }
    }

    #[test]
    fn test_ketu_is_never_queried() {
        assert_eq!(
            AnalyticEphemeris.position(J2000_JD, Graha::Ketu),
            Err(ProviderError::UnsupportedBody(Graha::Ketu))
        );
    }

    #[test]
    fn test_ascendant_formula_on_equator() {
        // 0 Aries culminating: 0 Cancer rises
        assert!((ascendant_from_lst(0.0, 0.0, 23.44) - 90.0).abs() < 1e-9);
        // 0 Cancer culminating: 0 Libra rises
        assert!((ascendant_from_lst(90.0, 0.0, 23.44) - 180.0).abs() < 1e-9);
        assert!((ascendant_from_lst(180.0, 0.0, 23.44) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_wrapped_difference() {
        assert!((wrapped_difference(359.5, 0.5) - 1.0).abs() < 1e-12);
        assert!((wrapped_difference(0.5, 359.5) + 1.0).abs() < 1e-12);
    }
}
