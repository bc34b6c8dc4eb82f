//! In-memory filtering and ordering of fetched collections.
//!
//! Everything here keeps the relative backend order of the items it returns.

use crate::models::{Event, Fighter, Ranking, WeightClass};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default)]
pub struct FighterFilter {
    pub search: Option<String>,
    pub weight_class: Option<i64>,
}

impl FighterFilter {
    pub fn matches(&self, fighter: &Fighter) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                let name = fighter.label().unwrap_or_default().to_lowercase();
                let country = fighter.country.as_deref().unwrap_or_default().to_lowercase();
                name.contains(&term) || country.contains(&term)
            }
            _ => true,
        };
        let matches_class = match self.weight_class {
            Some(id) => fighter.weight_class_id == Some(id),
            None => true,
        };
        matches_search && matches_class
    }

    pub fn apply<'a>(&self, fighters: &'a [Fighter]) -> Vec<&'a Fighter> {
        fighters.iter().filter(|f| self.matches(f)).collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventTab {
    #[default]
    All,
    Upcoming,
    Past,
}

impl std::str::FromStr for EventTab {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "upcoming" => Ok(Self::Upcoming),
            "past" => Ok(Self::Past),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EventTabs {
    pub all: Vec<Event>,
    pub upcoming: Vec<Event>,
    pub past: Vec<Event>,
}

impl EventTabs {
    /// `upcoming` is fetched separately; past events are those in `all` not
    /// flagged upcoming.
    pub fn new(all: Vec<Event>, upcoming: Vec<Event>) -> Self {
        let past = all.iter().filter(|e| !e.is_upcoming()).cloned().collect();
        Self {
            all,
            upcoming,
            past,
        }
    }

    pub fn tab(&self, tab: EventTab) -> &[Event] {
        match tab {
            EventTab::All => &self.all,
            EventTab::Upcoming => &self.upcoming,
            EventTab::Past => &self.past,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct WeightClassGroups<T> {
    pub p4p: Vec<T>,
    pub men: Vec<T>,
    pub women: Vec<T>,
}

/// Split classes into pound-for-pound, men's and women's divisions.
pub fn group_weight_classes<T, F>(items: Vec<T>, class_of: F) -> WeightClassGroups<T>
where
    F: Fn(&T) -> &WeightClass,
{
    let mut groups = WeightClassGroups {
        p4p: Vec::new(),
        men: Vec::new(),
        women: Vec::new(),
    };
    for item in items {
        let class = class_of(&item);
        if class.is_p4p {
            groups.p4p.push(item);
        } else if class.is_female() {
            groups.women.push(item);
        } else {
            groups.men.push(item);
        }
    }
    groups
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DivisionRankings {
    pub champion: Option<Ranking>,
    pub contenders: Vec<Ranking>,
}

/// Rankings belonging to `class`, ordered by rank with unranked entries last.
pub fn division_rankings(class: &WeightClass, rankings: &[Ranking]) -> DivisionRankings {
    let mut selected: Vec<Ranking> = rankings
        .iter()
        .filter(|r| class.matches_ranking(r))
        .cloned()
        .collect();
    split_champion(&mut selected)
}

/// Stable-sort by position and pull the first champion out.
pub fn split_champion(rankings: &mut Vec<Ranking>) -> DivisionRankings {
    rankings.sort_by_key(|r| r.rank_position.unwrap_or(i32::MAX));
    let champion = rankings
        .iter()
        .position(|r| r.is_champion)
        .map(|i| rankings.remove(i));
    DivisionRankings {
        champion,
        contenders: std::mem::take(rankings),
    }
}
