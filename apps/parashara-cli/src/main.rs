mod args;
mod sky;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use std::sync::Arc;

use args::{Birth, BirthArgs, Cli, Command};
use parashara::chart::Chart;
use parashara::vedic::dashas::{DashaPeriod, VimshottariTimeline};
use parashara::vedic::{
    arudha_padas, chara_karakas, dashas_for_chart, nakshatra_for_longitude, planet_aspects,
    ArudhaPada, CharaKaraka, Drishti, NakshatraPlacement, Varga,
};
use parashara::zodiac::Graha;
use parashara::{
    calculate_compatibility, check_yogas, AyanamsaMode, ChartCalculator,
    GeoLocation, TransitEngine,
};
use parashara_config::Settings;
use sky::Sky;

#[derive(Serialize)]
struct ChartReport {
    varga: &'static str,
    chart: Chart,
    #[serde(skip_serializing_if = "Option::is_none")]
    moon_nakshatra: Option<NakshatraPlacement>,
    karakas: Vec<CharaKaraka>,
    arudhas: Vec<ArudhaPada>,
    aspects: Vec<Drishti>,
}

#[derive(Serialize)]
struct DashaReport {
    at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    running: Option<Vec<Graha>>,
    timeline: VimshottariTimeline,
}

struct Engine {
    calculator: ChartCalculator<Sky>,
    mode: AyanamsaMode,
    settings: Settings,
}

impl Engine {
    fn chart(&self, birth: &Birth) -> anyhow::Result<Chart> {
        Ok(self
            .calculator
            .calculate_chart(&birth.details, birth.location, self.mode)?)
    }

    fn resolve(&self, args: &BirthArgs) -> anyhow::Result<Birth> {
        args.resolve(self.settings.location.utc_offset)
    }
}

fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => parashara_config::load_settings_from(path)?,
        None => parashara_config::load_settings()?,
    };
    if let Some(mode) = cli.ayanamsa {
        settings.engine.ayanamsa = mode;
    }
    Ok(settings)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Drops children below `depth` levels.
fn prune(periods: &mut [DashaPeriod], depth: u8) {
    for period in periods {
        if period.level.depth() + 1 >= depth as usize {
            period.children.clear();
        } else {
            prune(&mut period.children, depth);
        }
    }
}

fn chart_report(engine: &Engine, birth: &Birth, navamsa: bool) -> anyhow::Result<ChartReport> {
    let natal = engine.chart(birth)?;
    let varga = if navamsa { Varga::Navamsa } else { Varga::Rashi };
    // Nakshatra always comes from the Rashi longitude
    let moon_nakshatra = natal
        .get(Graha::Moon)
        .map(|moon| nakshatra_for_longitude(moon.sidereal_longitude));
    let chart = natal.divisional(varga)?;
    Ok(ChartReport {
        varga: varga.label(),
        moon_nakshatra,
        karakas: chara_karakas(&chart, false),
        arudhas: arudha_padas(&chart)?,
        aspects: planet_aspects(&chart),
        chart,
    })
}

async fn run_match(engine: Arc<Engine>, a: Birth, b: Birth) -> anyhow::Result<()> {
    let first = {
        let engine = Arc::clone(&engine);
        tokio::task::spawn_blocking(move || engine.chart(&a))
    };
    let second = {
        let engine = Arc::clone(&engine);
        tokio::task::spawn_blocking(move || engine.chart(&b))
    };
    let chart_a = first.await.context("first chart task")??;
    let chart_b = second.await.context("second chart task")??;
    print_json(&calculate_compatibility(&chart_a, &chart_b))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let settings = load_settings(&cli)?;
    log::debug!(
        "ayanamsa {} with {:?} provider",
        settings.engine.ayanamsa,
        settings.engine.provider
    );
    let engine = Engine {
        calculator: ChartCalculator::new(Sky::open(&settings.engine)?),
        mode: settings.engine.ayanamsa,
        settings,
    };

    match cli.command {
        Command::Chart { birth, navamsa } => {
            let birth = engine.resolve(&birth)?;
            print_json(&chart_report(&engine, &birth, navamsa)?)
        }
        Command::Dasha { birth, depth, at } => {
            let birth = engine.resolve(&birth)?;
            let chart = engine.chart(&birth)?;
            let mut timeline = dashas_for_chart(&chart, birth.details.to_utc()?)?;
            let at = at.unwrap_or_else(Utc::now);
            let running = timeline.locate(at).map(|location| location.lords());
            if running.is_none() {
                log::warn!("{} is outside the dasha timeline", at);
            }
            prune(&mut timeline.periods, depth);
            print_json(&DashaReport {
                at,
                running,
                timeline,
            })
        }
        Command::Yogas { birth } => {
            let birth = engine.resolve(&birth)?;
            print_json(&check_yogas(&engine.chart(&birth)?))
        }
        Command::Transits {
            birth,
            at,
            here_lat,
            here_lon,
        } => {
            let birth = engine.resolve(&birth)?;
            let natal = engine.chart(&birth)?;
            let default_here = engine.settings.location.geo();
            let here = GeoLocation::new(
                here_lat.unwrap_or(default_here.lat),
                here_lon.unwrap_or(default_here.lon),
            )?;
            let transits = TransitEngine::new(&engine.calculator);
            let readings = match at {
                Some(instant) => transits.transits_at(&natal, instant, here, engine.mode)?,
                None => transits.current_transits(&natal, here, engine.mode)?,
            };
            print_json(&readings)
        }
        Command::Match { birth, partner } => {
            let a = engine.resolve(&birth)?;
            let b = engine.resolve(&partner.into())?;
            run_match(Arc::new(engine), a, b).await
        }
    }
}
