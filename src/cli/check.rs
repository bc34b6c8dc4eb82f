use crate::services::api::{ApiClient, CatalogSource, EventQuery, FighterQuery};
use crate::services::slug::{collisions, Sluggable};
use crate::Config;
use anyhow::Result;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Ok,
    Warn,
    Fail,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Ok => write!(f, "\x1b[32m✓ OK\x1b[0m"),
            CheckStatus::Warn => write!(f, "\x1b[33m⚠ WARN\x1b[0m"),
            CheckStatus::Fail => write!(f, "\x1b[31m✗ FAIL\x1b[0m"),
        }
    }
}

#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub detail: String,
}

pub async fn run(config_path: &Path) -> Result<()> {
    println!("\n  Fightcard check\n");

    let config = match Config::load(config_path) {
        Ok(c) => c,
        Err(e) => {
            print_results(&[CheckResult {
                name: "Configuration".into(),
                status: CheckStatus::Fail,
                detail: format!("{}", e),
            }]);
            anyhow::bail!("configuration is invalid");
        }
    };

    let client = ApiClient::new(&config.backend)?;
    let mut results = vec![CheckResult {
        name: "Configuration".into(),
        status: CheckStatus::Ok,
        detail: format!("Loaded from {}", config_path.display()),
    }];
    results.extend(probe(&client, &config).await);

    print_results(&results);
    if results.iter().any(|r| r.status == CheckStatus::Fail) {
        anyhow::bail!("some checks failed");
    }
    Ok(())
}

/// Fetch each collection the viewer resolves slugs against and report on
/// reachability and on names that cannot be linked unambiguously.
pub async fn probe(source: &dyn CatalogSource, config: &Config) -> Vec<CheckResult> {
    let mut results = Vec::new();

    let fighters_query = FighterQuery {
        limit: Some(config.backend.fighters_limit),
        ..Default::default()
    };
    match source.fighters(&fighters_query).await {
        Ok(fighters) => {
            results.push(reachable("Fighters", fighters.len()));
            results.extend(slug_report("Fighter slugs", &fighters));
            if fighters.len() as u64 >= u64::from(config.backend.fighters_limit) {
                results.push(CheckResult {
                    name: "Fighter limit".into(),
                    status: CheckStatus::Warn,
                    detail: format!(
                        "Backend returned the full {} fighters; raise backend.fighters_limit or some fighters will not resolve",
                        config.backend.fighters_limit
                    ),
                });
            }
        }
        Err(e) => results.push(unreachable("Fighters", e)),
    }

    let events_query = EventQuery {
        limit: Some(config.backend.events_limit),
        ..Default::default()
    };
    match source.events(&events_query).await {
        Ok(events) => {
            results.push(reachable("Events", events.len()));
            results.extend(slug_report("Event slugs", &events));
        }
        Err(e) => results.push(unreachable("Events", e)),
    }

    match source.weight_classes().await {
        Ok(classes) => {
            results.push(reachable("Weight classes", classes.len()));
            results.extend(slug_report("Weight class slugs", &classes));
        }
        Err(e) => results.push(unreachable("Weight classes", e)),
    }

    match source.stats().await {
        Ok(stats) if stats.error.is_some() => results.push(CheckResult {
            name: "Stats".into(),
            status: CheckStatus::Warn,
            detail: format!("Degraded: {}", stats.error.unwrap_or_default()),
        }),
        Ok(_) => results.push(CheckResult {
            name: "Stats".into(),
            status: CheckStatus::Ok,
            detail: "Available".into(),
        }),
        Err(e) => results.push(CheckResult {
            name: "Stats".into(),
            status: CheckStatus::Warn,
            detail: format!("Unavailable, the home page will omit the overview: {}", e),
        }),
    }

    results
}

fn reachable(name: &str, count: usize) -> CheckResult {
    CheckResult {
        name: name.into(),
        status: CheckStatus::Ok,
        detail: format!("{} record(s)", count),
    }
}

fn unreachable(name: &str, err: impl std::fmt::Display) -> CheckResult {
    CheckResult {
        name: name.into(),
        status: CheckStatus::Fail,
        detail: format!("Request failed: {}", err),
    }
}

fn slug_report<T: Sluggable>(name: &str, items: &[T]) -> Option<CheckResult> {
    let unnamed: Vec<i64> = items
        .iter()
        .filter(|item| item.slug().is_err())
        .map(Sluggable::id)
        .collect();
    let shared = collisions(items);
    if unnamed.is_empty() && shared.is_empty() {
        return None;
    }

    let mut notes = Vec::new();
    if !unnamed.is_empty() {
        notes.push(format!("no usable name: ids {:?}", unnamed));
    }
    for (slug, ids) in &shared {
        notes.push(format!("'{}' shared by ids {:?}", slug, ids));
    }
    Some(CheckResult {
        name: name.into(),
        status: CheckStatus::Warn,
        detail: notes.join("; "),
    })
}

fn print_results(results: &[CheckResult]) {
    let width = results.iter().map(|r| r.name.len()).max().unwrap_or(0);
    for r in results {
        println!("  {:width$}  {}  {}", r.name, r.status, r.detail, width = width);
    }
    println!();
}
