use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use parashara::{AyanamsaMode, GeoLocation};

/// Relative locations tried for `configs/parashara.toml`, from the workspace
/// root and from a crate directory.
pub const CONFIG_PATHS: [&str; 2] = ["configs/parashara.toml", "../../configs/parashara.toml"];

pub const EPHEMERIS_PATH_ENV: &str = "SWISS_EPHEMERIS_PATH";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    /// Pure-Rust mean-element ephemeris.
    #[default]
    Analytic,
    /// Swiss Ephemeris files; needs the `swisseph` feature.
    Swiss,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub ayanamsa: AyanamsaMode,
    pub provider: ProviderKind,
    pub ephemeris_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationSettings {
    pub latitude: f64,
    pub longitude: f64,
    pub utc_offset: f64,
}

impl LocationSettings {
    pub fn geo(&self) -> GeoLocation {
        GeoLocation {
            lat: self.latitude,
            lon: self.longitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub engine: EngineSettings,
    pub location: LocationSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            engine: EngineSettings {
                ayanamsa: AyanamsaMode::Lahiri,
                provider: ProviderKind::Analytic,
                ephemeris_path: None,
            },
            location: LocationSettings {
                latitude: 0.0,
                longitude: 0.0,
                utc_offset: 0.0,
            },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct EngineToml {
    #[serde(default)]
    ayanamsa: Option<String>,
    #[serde(default)]
    provider: Option<String>,
    #[serde(default)]
    ephemeris_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LocationToml {
    #[serde(default)]
    latitude: f64,
    #[serde(default)]
    longitude: f64,
    #[serde(default)]
    utc_offset: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    engine: EngineToml,
    #[serde(default)]
    location: LocationToml,
}

/// First readable config file, or `None` when none of the paths exist.
pub fn read_config_text() -> Option<(PathBuf, String)> {
    CONFIG_PATHS.iter().find_map(|p| {
        fs::read_to_string(p)
            .ok()
            .map(|text| (PathBuf::from(p), text))
    })
}

fn parse_provider(name: &str) -> anyhow::Result<ProviderKind> {
    match name.trim().to_lowercase().as_str() {
        "analytic" => Ok(ProviderKind::Analytic),
        "swiss" | "swisseph" => Ok(ProviderKind::Swiss),
        other => anyhow::bail!("engine.provider must be 'analytic' or 'swiss', got '{other}'"),
    }
}

/// Parses and validates config text. `ephemeris_override` wins over
/// `engine.ephemeris_path`.
pub fn parse_settings(text: &str, ephemeris_override: Option<PathBuf>) -> anyhow::Result<Settings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse parashara.toml: {e}"))?;
    let RootConfigToml { engine, location } = root;

    let ayanamsa = match engine.ayanamsa.as_deref() {
        Some(name) => name
            .parse::<AyanamsaMode>()
            .map_err(|e| anyhow::anyhow!("engine.ayanamsa: {e}"))?,
        None => AyanamsaMode::default(),
    };
    let provider = match engine.provider.as_deref() {
        Some(name) => parse_provider(name)?,
        None => ProviderKind::default(),
    };
    let ephemeris_path = ephemeris_override.or(engine.ephemeris_path);

    let location = LocationSettings {
        latitude: location.latitude,
        longitude: location.longitude,
        utc_offset: location.utc_offset,
    };
    location
        .geo()
        .validate()
        .map_err(|e| anyhow::anyhow!("[location]: {e}"))?;
    if !(-14.0..=14.0).contains(&location.utc_offset) {
        anyhow::bail!(
            "location.utc_offset must be within -14..=14 hours, got {}",
            location.utc_offset
        );
    }

    Ok(Settings {
        engine: EngineSettings {
            ayanamsa,
            provider,
            ephemeris_path,
        },
        location,
    })
}

fn env_ephemeris_path() -> Option<PathBuf> {
    env::var(EPHEMERIS_PATH_ENV)
        .ok()
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
}

/// Settings from `path`. A missing file is an error here.
pub fn load_settings_from(path: &Path) -> anyhow::Result<Settings> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Could not read {}: {e}", path.display()))?;
    parse_settings(&text, env_ephemeris_path())
}

/// Settings from the first config file found, else built-in defaults.
pub fn load_settings() -> anyhow::Result<Settings> {
    match read_config_text() {
        Some((path, text)) => parse_settings(&text, env_ephemeris_path())
            .map_err(|e| anyhow::anyhow!("{}: {e}", path.display())),
        None => {
            let mut settings = Settings::default();
            settings.engine.ephemeris_path = env_ephemeris_path();
            Ok(settings)
        }
    }
}
