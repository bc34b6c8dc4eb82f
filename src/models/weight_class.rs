use super::fighter::non_blank;
use super::Fighter;
use crate::services::slug::Sluggable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightClass {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub name_ru: String,
    #[serde(default)]
    pub name_en: Option<String>,
    #[serde(default)]
    pub weight_min: Option<i32>,
    #[serde(default)]
    pub weight_max: Option<i32>,
    #[serde(default)]
    pub weight_limit: Option<String>,
    #[serde(default = "default_gender")]
    pub gender: String,
    #[serde(default)]
    pub is_p4p: bool,
}

fn default_gender() -> String {
    "male".to_string()
}

impl WeightClass {
    pub fn label(&self) -> Option<&str> {
        non_blank(&self.name_ru)
            .or_else(|| non_blank(&self.name))
            .or_else(|| self.name_en.as_deref().and_then(non_blank))
    }

    pub fn is_female(&self) -> bool {
        self.gender.eq_ignore_ascii_case("female")
    }

    /// Rankings reference their class by English name.
    pub fn matches_ranking(&self, ranking: &Ranking) -> bool {
        match self.name_en.as_deref().and_then(non_blank) {
            Some(en) => en.eq_ignore_ascii_case(ranking.weight_class.trim()),
            None => self.name.eq_ignore_ascii_case(ranking.weight_class.trim()),
        }
    }
}

impl Sluggable for WeightClass {
    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> Option<&str> {
        self.name_en
            .as_deref()
            .and_then(non_blank)
            .or_else(|| non_blank(&self.name))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    #[serde(default)]
    pub id: i64,
    pub fighter: Fighter,
    #[serde(default)]
    pub weight_class: String,
    #[serde(default)]
    pub rank_position: Option<i32>,
    #[serde(default)]
    pub is_champion: bool,
    #[serde(default)]
    pub rank_change: i32,
}
