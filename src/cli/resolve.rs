use super::EntityKind;
use crate::services::api::{ApiClient, CatalogSource, EventQuery, FighterQuery};
use crate::services::format::{self, DisplayLabel};
use crate::services::slug::{resolve, Resolution};
use crate::Config;
use anyhow::Result;
use std::path::Path;

pub async fn run(config_path: &Path, kind: EntityKind, slug: &str) -> Result<()> {
    let config = Config::load(config_path)?;
    let client = ApiClient::new(&config.backend)?;
    let summary = lookup(&client, &config, kind, slug).await?;
    println!("{}", summary);
    Ok(())
}

/// Resolve `slug` the way the viewer does and describe the winning record.
pub async fn lookup(
    source: &dyn CatalogSource,
    config: &Config,
    kind: EntityKind,
    slug: &str,
) -> Result<String> {
    let locale = config.site.locale;
    match kind {
        EntityKind::Fighter => {
            let query = FighterQuery {
                limit: Some(config.backend.fighters_limit),
                ..Default::default()
            };
            let fighters = source.fighters(&query).await?;
            let Resolution::Found(fighter) = resolve(slug, &fighters) else {
                anyhow::bail!("no fighter matches '{}'", slug);
            };
            let detail = source.fighter(fighter.id).await?;
            let record = match &detail.fight_record {
                Some(r) => format!(
                    "{} ({} fights, {:.1}% wins)",
                    format::record(r.wins, r.losses, r.draws),
                    r.total_fights,
                    r.win_percentage
                ),
                None => format::fighter_record(&detail.fighter),
            };
            Ok(format!(
                "fighter id={} {} {}",
                fighter.id,
                detail.fighter.display_label(locale),
                record
            ))
        }
        EntityKind::Event => {
            let query = EventQuery {
                limit: Some(config.backend.events_limit),
                ..Default::default()
            };
            let events = source.events(&query).await?;
            let Resolution::Found(event) = resolve(slug, &events) else {
                anyhow::bail!("no event matches '{}'", slug);
            };
            let event = source.event(event.id).await?;
            Ok(format!(
                "event id={} {} {}",
                event.id,
                event.display_label(locale),
                format::format_date(event.event_date.as_deref(), locale)
            ))
        }
        EntityKind::WeightClass => {
            let classes = source.weight_classes().await?;
            let Resolution::Found(class) = resolve(slug, &classes) else {
                anyhow::bail!("no weight class matches '{}'", slug);
            };
            let champion = match source.champion(class.id).await? {
                Some(r) => format::fighter_label(&r.fighter, locale),
                None => "-".to_string(),
            };
            Ok(format!(
                "weight class id={} {} champion: {}",
                class.id,
                class.display_label(locale),
                champion
            ))
        }
    }
}
