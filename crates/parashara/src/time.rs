//! Local civil time to the continuous time scale used by the ephemeris.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Julian day of 2000-01-01 12:00 UT.
pub const J2000_JD: f64 = 2_451_545.0;
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

const MAX_UTC_OFFSET_HOURS: f64 = 14.0;

/// Birth (or event) moment as entered by a user: local wall-clock fields plus
/// the UTC offset in hours (east positive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirthDetails {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub utc_offset: f64,
}

impl BirthDetails {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, utc_offset: f64) -> Self {
        Self { year, month, day, hour, minute, utc_offset }
    }

    /// Fields of a UTC instant (seconds are dropped).
    pub fn from_utc(instant: DateTime<Utc>) -> Self {
        Self {
            year: instant.year(),
            month: instant.month(),
            day: instant.day(),
            hour: instant.hour(),
            minute: instant.minute(),
            utc_offset: 0.0,
        }
    }

    /// Check the calendar fields; nothing is silently corrected.
    pub fn validate(&self) -> Result<NaiveDate, ChartError> {
        let date = NaiveDate::from_ymd_opt(self.year, self.month, self.day).ok_or_else(|| {
            ChartError::input(format!(
                "{:04}-{:02}-{:02} is not a calendar date",
                self.year, self.month, self.day
            ))
        })?;
        if self.hour > 23 {
            return Err(ChartError::input(format!("hour {} outside 0..=23", self.hour)));
        }
        if self.minute > 59 {
            return Err(ChartError::input(format!("minute {} outside 0..=59", self.minute)));
        }
        if !self.utc_offset.is_finite() || self.utc_offset.abs() > MAX_UTC_OFFSET_HOURS {
            return Err(ChartError::input(format!(
                "UTC offset {} outside -14..=14 hours",
                self.utc_offset
            )));
        }
        Ok(date)
    }

    /// `hour + minute/60 - utc_offset`; may fall outside 0..24 and roll the day.
    pub fn decimal_hour_ut(&self) -> f64 {
        self.hour as f64 + self.minute as f64 / 60.0 - self.utc_offset
    }

    /// Julian day (UT) of this moment.
    pub fn julian_day(&self) -> Result<f64, ChartError> {
        self.validate()?;
        Ok(julian_day(self.year, self.month, self.day, self.decimal_hour_ut()))
    }

    /// The same moment as a UTC instant.
    pub fn to_utc(&self) -> Result<DateTime<Utc>, ChartError> {
        let date = self.validate()?;
        let local = date
            .and_hms_opt(self.hour, self.minute, 0)
            .ok_or_else(|| ChartError::input("invalid time of day"))?;
        let offset_seconds = (self.utc_offset * 3600.0).round() as i64;
        Ok(Utc.from_utc_datetime(&local) - Duration::seconds(offset_seconds))
    }
}

/// Gregorian calendar date plus decimal UT hour to Julian day (Meeus ch. 7).
pub fn julian_day(year: i32, month: u32, day: u32, decimal_hour: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day as f64 + b - 1524.5
        + decimal_hour / 24.0
}

/// Julian day of a UTC instant, including seconds.
pub fn datetime_to_julian_day(instant: DateTime<Utc>) -> f64 {
    let hour = instant.hour() as f64
        + instant.minute() as f64 / 60.0
        + (instant.second() as f64 + instant.nanosecond() as f64 * 1e-9) / 3600.0;
    julian_day(instant.year(), instant.month(), instant.day(), hour)
}

/// Julian centuries since J2000.0.
pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_JULIAN_CENTURY
}
