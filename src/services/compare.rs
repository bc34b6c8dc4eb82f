//! The side-by-side comparison tray.

use crate::models::{Comparison, Measurement};
use serde::Serialize;

pub const CAPACITY: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompareError {
    #[error("at most two fighters can be compared")]
    Full,
    #[error("fighter {0} is already in the comparison")]
    AlreadyAdded(i64),
    #[error("choose two different fighters")]
    SameFighter,
}

/// Fighters picked for comparison, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompareStore {
    ids: Vec<i64>,
}

impl CompareStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a `1,2` style query value. Returns the store plus the first
    /// rejection, if any entry was refused.
    pub fn from_query(raw: &str) -> (Self, Option<CompareError>) {
        let mut store = Self::new();
        let mut rejected = None;
        for id in raw.split(',').filter_map(|p| p.trim().parse::<i64>().ok()) {
            if let Err(e) = store.add(id) {
                let e = match e {
                    CompareError::AlreadyAdded(_) => CompareError::SameFighter,
                    other => other,
                };
                rejected.get_or_insert(e);
            }
        }
        (store, rejected)
    }

    pub fn add(&mut self, id: i64) -> Result<(), CompareError> {
        if self.ids.contains(&id) {
            return Err(CompareError::AlreadyAdded(id));
        }
        if self.ids.len() >= CAPACITY {
            return Err(CompareError::Full);
        }
        self.ids.push(id);
        Ok(())
    }

    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.ids.len();
        self.ids.retain(|&existing| existing != id);
        self.ids.len() != before
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() == CAPACITY
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Both fighters, once the tray is full.
    pub fn pair(&self) -> Option<(i64, i64)> {
        match self.ids.as_slice() {
            [a, b] => Some((*a, *b)),
            _ => None,
        }
    }

    /// Query value that reproduces this store.
    pub fn to_query(&self) -> String {
        self.ids
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Query value for this store with `id` added, if it fits.
    pub fn with_added(&self, id: i64) -> Option<String> {
        let mut next = self.clone();
        next.add(id).ok().map(|_| next.to_query())
    }

    pub fn without(&self, id: i64) -> String {
        let mut next = self.clone();
        next.remove(id);
        next.to_query()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Advantage {
    Fighter1,
    Fighter2,
    Neutral,
}

/// Larger value wins; a missing side means no verdict.
pub fn advantage(m: &Measurement) -> Advantage {
    match (m.fighter1, m.fighter2) {
        (Some(a), Some(b)) if a > 0 && b > 0 && a > b => Advantage::Fighter1,
        (Some(a), Some(b)) if a > 0 && b > 0 && b > a => Advantage::Fighter2,
        _ => Advantage::Neutral,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub key: &'static str,
    pub fighter1: Option<i32>,
    pub fighter2: Option<i32>,
    pub difference: i32,
    pub advantage: Advantage,
}

pub fn comparison_rows(comparison: &Comparison) -> Vec<ComparisonRow> {
    let table = &comparison.comparison;
    [
        ("height", &table.height),
        ("weight", &table.weight),
        ("reach", &table.reach),
        ("age", &table.age),
    ]
    .into_iter()
    .map(|(key, m)| ComparisonRow {
        key,
        fighter1: m.fighter1,
        fighter2: m.fighter2,
        difference: m.difference,
        advantage: advantage(m),
    })
    .collect()
}
