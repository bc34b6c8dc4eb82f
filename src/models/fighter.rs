use crate::services::slug::Sluggable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fighter {
    pub id: i64,
    /// Primary display name as sent by the backend (Russian first, English fallback).
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub name_ru: String,
    #[serde(default)]
    pub name_en: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_flag_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub height: Option<i32>,
    #[serde(default)]
    pub weight: Option<i32>,
    #[serde(default)]
    pub reach: Option<i32>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub weight_class: Option<String>,
    #[serde(default)]
    pub weight_class_id: Option<i64>,
    #[serde(default)]
    pub wins: i32,
    #[serde(default)]
    pub losses: i32,
    #[serde(default)]
    pub draws: i32,
    #[serde(default)]
    pub career: Option<String>,
}

impl Fighter {
    /// Name shown to readers: the localized name, then the primary one.
    pub fn label(&self) -> Option<&str> {
        non_blank(&self.name_ru)
            .or_else(|| non_blank(&self.name))
            .or_else(|| self.name_en.as_deref().and_then(non_blank))
    }
}

impl Sluggable for Fighter {
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
pub struct FightRecord {
    pub wins: i32,
    pub losses: i32,
    pub draws: i32,
    #[serde(default)]
    pub no_contests: i32,
    #[serde(default)]
    pub total_fights: i32,
    #[serde(default)]
    pub win_percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FighterDetail {
    #[serde(flatten)]
    pub fighter: Fighter,
    #[serde(default)]
    pub fight_record: Option<FightRecord>,
}

pub(crate) fn non_blank(s: &str) -> Option<&str> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
