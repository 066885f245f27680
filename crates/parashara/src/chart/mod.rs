pub mod calculator;
pub mod features;
pub mod transit;
pub mod types;

pub use calculator::ChartCalculator;
pub use features::{feature_vector, rule_key, rule_keys, FEATURE_LEN};
pub use transit::{transit_prediction, transit_readings, TransitEngine, TransitReading};
pub use types::{BodyPosition, Chart};
