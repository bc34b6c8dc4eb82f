use super::fighter::non_blank;
use crate::services::slug::Sluggable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "date")]
    pub event_date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub attendance: Option<i64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_upcoming: Option<bool>,
}

impl Event {
    pub fn is_upcoming(&self) -> bool {
        self.is_upcoming.unwrap_or(false)
    }
}

impl Sluggable for Event {
    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> Option<&str> {
        non_blank(&self.name)
    }
}
