use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use parashara::{AyanamsaMode, BirthDetails, GeoLocation};

#[derive(Parser, Debug)]
#[command(name = "parashara", author, version, about = "Sidereal chart, dasha and yoga calculator")]
pub struct Cli {
    /// Config file (default: configs/parashara.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override `engine.ayanamsa` (lahiri, raman, krishnamurti, yukteshwar).
    #[arg(long, global = true)]
    pub ayanamsa: Option<AyanamsaMode>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Natal chart with nakshatra, karakas and arudhas.
    Chart {
        #[command(flatten)]
        birth: BirthArgs,
        /// Print the Navamsa (D9) chart instead of the Rashi chart.
        #[arg(long)]
        navamsa: bool,
    },
    /// Vimshottari timeline from the Moon.
    Dasha {
        #[command(flatten)]
        birth: BirthArgs,
        /// Levels to print (1 = mahadasha only, 4 = down to sookshma).
        #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=4))]
        depth: u8,
        /// Instant to locate, RFC 3339 (default: now).
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Yogas present in the natal chart.
    Yogas {
        #[command(flatten)]
        birth: BirthArgs,
    },
    /// Transit readings against the natal Ascendant.
    Transits {
        #[command(flatten)]
        birth: BirthArgs,
        /// Transit instant, RFC 3339 (default: now).
        #[arg(long)]
        at: Option<DateTime<Utc>>,
        /// Observer latitude (default: `[location]` from config).
        #[arg(long, allow_negative_numbers = true)]
        here_lat: Option<f64>,
        /// Observer longitude (default: `[location]` from config).
        #[arg(long, allow_negative_numbers = true)]
        here_lon: Option<f64>,
    },
    /// Compatibility between two births.
    Match {
        #[command(flatten)]
        birth: BirthArgs,
        #[command(flatten)]
        partner: PartnerArgs,
    },
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|e| format!("expected HH:MM: {e}"))
}

#[derive(Args, Debug, Clone)]
pub struct BirthArgs {
    /// Local birth date, YYYY-MM-DD.
    #[arg(long, value_parser = parse_date)]
    pub date: NaiveDate,
    /// Local birth time, HH:MM.
    #[arg(long, value_parser = parse_time)]
    pub time: NaiveTime,
    /// UTC offset in hours, east positive (default: `location.utc_offset`).
    #[arg(long, allow_negative_numbers = true)]
    pub tz: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,
}

#[derive(Args, Debug, Clone)]
pub struct PartnerArgs {
    #[arg(id = "partner_date", long = "partner-date", value_parser = parse_date)]
    pub date: NaiveDate,
    #[arg(id = "partner_time", long = "partner-time", value_parser = parse_time)]
    pub time: NaiveTime,
    #[arg(id = "partner_tz", long = "partner-tz", allow_negative_numbers = true)]
    pub tz: Option<f64>,
    #[arg(id = "partner_lat", long = "partner-lat", allow_negative_numbers = true)]
    pub lat: f64,
    #[arg(id = "partner_lon", long = "partner-lon", allow_negative_numbers = true)]
    pub lon: f64,
}

impl From<PartnerArgs> for BirthArgs {
    fn from(p: PartnerArgs) -> Self {
        BirthArgs {
            date: p.date,
            time: p.time,
            tz: p.tz,
            lat: p.lat,
            lon: p.lon,
        }
    }
}

/// Birth moment and place, validated.
#[derive(Debug, Clone, Copy)]
pub struct Birth {
    pub details: BirthDetails,
    pub location: GeoLocation,
}

impl BirthArgs {
    pub fn resolve(&self, default_tz: f64) -> anyhow::Result<Birth> {
        use chrono::{Datelike, Timelike};

        let details = BirthDetails::new(
            self.date.year(),
            self.date.month(),
            self.date.day(),
            self.time.hour(),
            self.time.minute(),
            self.tz.unwrap_or(default_tz),
        );
        details.validate()?;
        let location = GeoLocation::new(self.lat, self.lon)?;
        Ok(Birth { details, location })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chart_command() {
        let cli = Cli::try_parse_from([
            "parashara", "chart", "--date", "1985-07-14", "--time", "16:45", "--tz", "5.5",
            "--lat", "19.076", "--lon", "72.8777",
        ])
        .unwrap();
        let Command::Chart { birth, navamsa } = cli.command else {
            panic!("expected chart");
        };
        assert!(!navamsa);
        let resolved = birth.resolve(0.0).unwrap();
        assert_eq!(resolved.details, BirthDetails::new(1985, 7, 14, 16, 45, 5.5));
    }

    #[test]
    fn test_negative_coordinates_and_default_tz() {
        let cli = Cli::try_parse_from([
            "parashara", "yogas", "--date", "1990-01-02", "--time", "03:04", "--lat", "-33.87",
            "--lon", "-70.6",
        ])
        .unwrap();
        let Command::Yogas { birth } = cli.command else {
            panic!("expected yogas");
        };
        let resolved = birth.resolve(-4.0).unwrap();
        assert_eq!(resolved.details.utc_offset, -4.0);
        assert_eq!(resolved.location.lat, -33.87);
    }

    #[test]
    fn test_bad_time_rejected() {
        assert!(Cli::try_parse_from([
            "parashara", "yogas", "--date", "1990-01-02", "--time", "25:00", "--lat", "0",
            "--lon", "0",
        ])
        .is_err());
    }

    #[test]
    fn test_match_takes_partner() {
        let cli = Cli::try_parse_from([
            "parashara", "match", "--date", "1990-01-02", "--time", "03:04", "--lat", "10",
            "--lon", "20", "--partner-date", "1991-02-03", "--partner-time", "04:05",
            "--partner-lat", "11", "--partner-lon", "21", "--ayanamsa", "raman",
        ])
        .unwrap();
        assert_eq!(cli.ayanamsa, Some(AyanamsaMode::Raman));
        let Command::Match { partner, .. } = cli.command else {
            panic!("expected match");
        };
        let partner: BirthArgs = partner.into();
        assert_eq!(partner.lat, 11.0);
    }

    #[test]
    fn test_depth_bounds() {
        assert!(Cli::try_parse_from([
            "parashara", "dasha", "--date", "1990-01-02", "--time", "03:04", "--lat", "0",
            "--lon", "0", "--depth", "5",
        ])
        .is_err());
    }
}
