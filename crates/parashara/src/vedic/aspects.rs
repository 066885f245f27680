//! Parashari sign aspects (drishti).

use serde::{Deserialize, Serialize};

use crate::chart::Chart;
use crate::zodiac::Graha;

/// Houses counted from the body (the body's own sign is the 1st).
pub fn aspect_offsets(graha: Graha) -> &'static [u8] {
    match graha {
        Graha::Mars => &[4, 7, 8],
        Graha::Jupiter | Graha::Rahu => &[5, 7, 9],
        Graha::Saturn => &[3, 7, 10],
        Graha::Ketu => &[],
        Graha::Sun | Graha::Moon | Graha::Mercury | Graha::Venus => &[7],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drishti {
    pub from: Graha,
    pub offset: u8,
    pub to: Graha,
}

/// Every aspect a body casts on another occupied sign. The Ascendant neither
/// casts nor receives.
pub fn planet_aspects(chart: &Chart) -> Vec<Drishti> {
    let mut aspects = Vec::new();
    for (from, looker) in chart.grahas() {
        for &offset in aspect_offsets(from) {
            let target = looker.sign.offset(offset as i64 - 1);
            aspects.extend(
                chart
                    .grahas()
                    .filter(|(to, position)| *to != from && position.sign == target)
                    .map(|(to, _)| Drishti { from, offset, to }),
            );
        }
    }
    aspects
}
