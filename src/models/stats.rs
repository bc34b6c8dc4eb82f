use super::{Fighter, FighterDetail};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryCount {
    pub country: String,
    pub count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteStats {
    #[serde(default)]
    pub total_fighters: i64,
    #[serde(default)]
    pub total_weight_classes: i64,
    #[serde(default)]
    pub total_upcoming_fights: i64,
    #[serde(default)]
    pub total_fights: i64,
    #[serde(default)]
    pub total_fight_stats: i64,
    #[serde(default)]
    pub top_countries: Vec<CountryCount>,
    /// Present when the backend degraded to zeroed totals.
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FighterStatsSummary {
    pub fighter: Fighter,
    pub total_fights: i64,
    pub total_rounds: i64,
    pub total_significant_strikes_landed: i64,
    pub total_significant_strikes_attempted: i64,
    pub average_significant_strikes_rate: f64,
    pub total_takedowns_successful: i64,
    pub total_takedowns_attempted: i64,
    pub average_takedown_rate: f64,
    pub total_knockdowns: i64,
    pub total_submission_attempts: i64,
    pub total_reversals: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub fighter1: Option<i32>,
    pub fighter2: Option<i32>,
    #[serde(default)]
    pub difference: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonTable {
    pub height: Measurement,
    pub weight: Measurement,
    pub reach: Measurement,
    pub age: Measurement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub fighter1: FighterDetail,
    pub fighter2: FighterDetail,
    pub comparison: ComparisonTable,
}
