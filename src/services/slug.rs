//! Route slugs for fighters, events and weight classes.
//!
//! A slug is derived from an entity's display name and resolved back against a
//! collection fetched from the backend. There is no lookup-by-name endpoint, so
//! list pages and detail pages must agree on this single derivation.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Separator that replaces whitespace runs.
pub const SEPARATOR: char = '_';

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\-']").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugError {
    #[error("cannot derive a slug from an empty name")]
    InvalidInput,
}

/// A record that can be linked to by name.
pub trait Sluggable {
    fn id(&self) -> i64;

    /// Source text for the slug. `None` when the record has no usable name.
    fn display_name(&self) -> Option<&str>;

    fn slug(&self) -> Result<Slug, SlugError> {
        slugify(self.display_name().unwrap_or_default())
    }
}

/// A URL-safe path segment derived from a display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Slug {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Slug {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Lower-case, collapse whitespace runs to `_`, then drop anything that is not
/// a word character, `-`, `_` or `'`.
///
/// Apostrophes survive so that possessive names ("Women's Strawweight") do not
/// collide with their non-possessive neighbours.
pub fn slugify(display_name: &str) -> Result<Slug, SlugError> {
    let trimmed = display_name.trim();
    if trimmed.is_empty() {
        return Err(SlugError::InvalidInput);
    }

    let lowered = fold_case(trimmed);
    let separated = WHITESPACE.replace_all(&lowered, "_");
    let stripped = DISALLOWED.replace_all(&separated, "");

    if stripped.is_empty() {
        return Err(SlugError::InvalidInput);
    }
    Ok(Slug(stripped.into_owned()))
}

/// Per-character lower-casing with apostrophe folding. Shared by slug
/// derivation and route matching so both sides agree (`Σ` always maps to `σ`).
fn fold_case(s: &str) -> String {
    s.chars()
        .map(fold_apostrophe)
        .flat_map(char::to_lowercase)
        .collect()
}

fn fold_apostrophe(c: char) -> char {
    match c {
        '\u{2019}' | '\u{2018}' | '\u{02BC}' => '\'',
        other => other,
    }
}

/// Readable label for a slug, e.g. for breadcrumbs.
pub fn slug_label(slug: &str) -> String {
    slug.replace(SEPARATOR, " ")
}

/// Outcome of matching a route slug against a collection.
#[derive(Debug, PartialEq)]
#[must_use]
pub enum Resolution<'a, T> {
    Found(&'a T),
    NotFound,
}

impl<'a, T> Resolution<'a, T> {
    pub fn found(&self) -> Option<&'a T> {
        match self {
            Resolution::Found(item) => Some(*item),
            Resolution::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }
}

/// Find the candidate whose derived slug equals `slug`.
///
/// The first match in the given order wins. Callers must pass the collection in
/// the order the backend returned it.
pub fn resolve<'a, T: Sluggable>(slug: &str, candidates: &'a [T]) -> Resolution<'a, T> {
    let wanted = fold_case(slug.trim());
    let mut found: Option<&'a T> = None;
    let mut collisions: Vec<i64> = Vec::new();

    for candidate in candidates {
        let derived = match candidate.slug() {
            Ok(derived) => derived,
            Err(e) => {
                tracing::warn!("Skipping record id={} during slug resolution: {}", candidate.id(), e);
                continue;
            }
        };
        if derived.as_str() != wanted {
            continue;
        }
        match found {
            None => found = Some(candidate),
            Some(_) => collisions.push(candidate.id()),
        }
    }

    match found {
        Some(first) => {
            if !collisions.is_empty() {
                tracing::warn!(
                    "Slug '{}' is ambiguous: id={} wins over ids {:?}",
                    wanted,
                    first.id(),
                    collisions
                );
            }
            Resolution::Found(first)
        }
        None => {
            tracing::debug!("No record matches slug '{}'", wanted);
            Resolution::NotFound
        }
    }
}

/// Slug for link generation, or `None` (logged) when the name is unusable.
pub fn link_slug<T: Sluggable>(item: &T) -> Option<Slug> {
    match item.slug() {
        Ok(slug) => Some(slug),
        Err(e) => {
            tracing::warn!("Record id={} has no linkable name: {}", item.id(), e);
            None
        }
    }
}

/// Slugs shared by more than one record, with the ids in collection order.
/// Only the first id of each group is reachable by name.
pub fn collisions<T: Sluggable>(items: &[T]) -> Vec<(Slug, Vec<i64>)> {
    let mut groups: Vec<(Slug, Vec<i64>)> = Vec::new();
    for item in items {
        let Ok(slug) = item.slug() else { continue };
        match groups.iter_mut().find(|(existing, _)| *existing == slug) {
            Some((_, ids)) => ids.push(item.id()),
            None => groups.push((slug, vec![item.id()])),
        }
    }
    groups.retain(|(_, ids)| ids.len() > 1);
    groups
}
