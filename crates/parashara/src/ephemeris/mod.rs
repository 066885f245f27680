pub mod analytic;
pub mod provider;
pub mod types;

#[cfg(feature = "swisseph")]
pub mod adapter;

pub use analytic::AnalyticEphemeris;
pub use provider::PositionProvider;
pub use types::{GeoLocation, TropicalPosition};

#[cfg(feature = "swisseph")]
pub use adapter::SwissEphemerisAdapter;
