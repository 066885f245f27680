pub mod aspects;
pub mod dashas;
pub mod jaimini;
pub mod nakshatra;
pub mod vargas;
pub mod yogas;

pub use aspects::{planet_aspects, Drishti};
pub use dashas::{
    calculate_dashas, dashas_for_chart, DashaLevel, DashaLocation, DashaPeriod, VimshottariTimeline,
};
pub use jaimini::{arudha_padas, chara_karakas, ArudhaPada, CharaKaraka, Karaka};
pub use nakshatra::{nakshatra_for_longitude, Nakshatra, NakshatraPlacement};
pub use vargas::{calculate_varga, Varga};
pub use yogas::{check_yogas, Yoga, YogaCategory};
