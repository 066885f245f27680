//! Chart outputs consumed by external collaborators: rule-lookup keys and the
//! numeric feature vector.

use crate::chart::types::Chart;
use crate::error::ChartError;
use crate::zodiac::{Graha, Point};

pub const FEATURE_LEN: usize = Graha::ALL.len() * 2;

fn house_or_missing(chart: &Chart, graha: Graha) -> Result<u8, ChartError> {
    chart
        .house_of(graha)
        .ok_or(ChartError::IncompleteChart(Point::Ascendant))
}

/// Rule-lookup key for one body, e.g. `SUN_ARI_H10`.
pub fn rule_key(chart: &Chart, graha: Graha) -> Result<String, ChartError> {
    let position = chart.require(graha)?;
    let house = house_or_missing(chart, graha)?;
    Ok(format!("{}_{}_H{}", graha.code(), position.sign.code(), house))
}

/// Keys for all nine bodies in feature order.
pub fn rule_keys(chart: &Chart) -> Result<Vec<String>, ChartError> {
    Graha::ALL.iter().map(|g| rule_key(chart, *g)).collect()
}

/// `[sign, house]` per body in feature order.
pub fn feature_vector(chart: &Chart) -> Result<[f32; FEATURE_LEN], ChartError> {
    let mut features = [0.0f32; FEATURE_LEN];
    for (i, graha) in Graha::ALL.iter().enumerate() {
        let position = chart.require(*graha)?;
        features[2 * i] = position.sign.index() as f32;
        features[2 * i + 1] = house_or_missing(chart, *graha)? as f32;
    }
    Ok(features)
}
