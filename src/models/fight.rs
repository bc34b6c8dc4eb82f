use super::{Fighter, WeightClass};
use serde::{Deserialize, Serialize};

/// A fight as returned by the fights endpoints. Corners are referenced by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fight {
    pub id: i64,
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub fighter1_name: Option<String>,
    #[serde(default)]
    pub fighter2_name: Option<String>,
    #[serde(default)]
    pub weight_class: Option<String>,
    #[serde(default = "default_rounds")]
    pub scheduled_rounds: i32,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub method_details: Option<String>,
    #[serde(default)]
    pub round: Option<i32>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub fight_date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_title_fight: bool,
    #[serde(default)]
    pub is_main_event: bool,
    #[serde(default)]
    pub is_win: Option<String>,
    #[serde(default)]
    pub is_loss: Option<String>,
    #[serde(default)]
    pub is_draw: Option<String>,
    #[serde(default)]
    pub is_nc: Option<String>,
    #[serde(default)]
    pub fighter1_record: Option<String>,
    #[serde(default)]
    pub fighter2_record: Option<String>,
    #[serde(default)]
    pub fighter1_country: Option<String>,
    #[serde(default)]
    pub fighter2_country: Option<String>,
    #[serde(default)]
    pub card_type: Option<String>,
    #[serde(default)]
    pub referee: Option<String>,
    #[serde(default)]
    pub winner_name: Option<String>,
    #[serde(default)]
    pub judges_score: Option<String>,
    #[serde(default)]
    pub fight_order: Option<i32>,
}

fn default_rounds() -> i32 {
    3
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingFight {
    pub id: i64,
    pub fighter1: Fighter,
    pub fighter2: Fighter,
    pub weight_class: WeightClass,
    #[serde(default)]
    pub is_main_event: bool,
    #[serde(default)]
    pub is_title_fight: bool,
}
