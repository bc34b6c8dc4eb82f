//! Data loading for each view.
//!
//! Detail pages fetch a collection, resolve the route slug against it and then
//! fetch dependent data keyed by the resolved id. Every failure ends in a
//! terminal [`PageState`]; nothing here returns an error to the web layer.

use crate::config::Config;
use crate::models::{
    Comparison, Event, Fight, Fighter, FighterStatsSummary, SiteStats, UpcomingFight, WeightClass,
};
use crate::services::api::{
    ApiError, CatalogSource, EventQuery, FightQuery, FighterQuery, UpcomingQuery,
};
use crate::services::compare::{comparison_rows, CompareStore, ComparisonRow};
use crate::services::filter::{
    group_weight_classes, split_champion, DivisionRankings, EventTab, EventTabs, FighterFilter,
    WeightClassGroups,
};
use crate::services::format::{self, DisplayLabel, Locale, Outcome};
use crate::services::guard::{RequestGuard, Ticket};
use crate::services::slug::{link_slug, resolve, Resolution, Slug, Sluggable};
use serde::Serialize;
use std::future::Future;

/// Fights requested per fighter or event card.
const FIGHTS_LIMIT: u32 = 100;
/// Recent fights shown beside a fighter's aggregated stats.
const STATS_FIGHTS_LIMIT: u32 = 10;
const UPCOMING_EVENTS_LIMIT: u32 = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum PageState<T> {
    Loading,
    Found(T),
    NotFound,
    LoadError(String),
}

impl<T> PageState<T> {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PageState::Loading)
    }

    pub fn found(&self) -> Option<&T> {
        match self {
            PageState::Found(value) => Some(value),
            _ => None,
        }
    }
}

fn load_error<T>(what: &str, err: ApiError) -> PageState<T> {
    tracing::warn!("Failed to load {}: {}", what, err);
    PageState::LoadError(err.to_string())
}

/// State holder for one long-lived detail view that is navigated repeatedly.
/// A navigation that is superseded before its load settles leaves the state
/// untouched. One-shot HTTP handlers call the `load_*` functions directly.
#[derive(Debug)]
pub struct DetailPage<T> {
    guard: RequestGuard,
    state: PageState<T>,
}

impl<T> Default for DetailPage<T> {
    fn default() -> Self {
        Self {
            guard: RequestGuard::new(),
            state: PageState::Loading,
        }
    }
}

impl<T> DetailPage<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigate(&mut self, slug: &str) -> Ticket {
        self.state = PageState::Loading;
        self.guard.begin(slug)
    }

    /// Returns whether `state` was applied.
    pub fn settle(&mut self, ticket: &Ticket, state: PageState<T>) -> bool {
        match self.guard.accept(ticket, state) {
            Some(state) => {
                self.state = state;
                true
            }
            None => false,
        }
    }

    pub fn state(&self) -> &PageState<T> {
        &self.state
    }

    pub fn into_state(self) -> PageState<T> {
        self.state
    }

    /// Navigate to `slug` and settle with the result of `load`.
    pub async fn load<F>(mut self, slug: &str, load: F) -> PageState<T>
    where
        F: Future<Output = PageState<T>>,
    {
        let ticket = self.navigate(slug);
        let state = load.await;
        self.settle(&ticket, state);
        self.into_state()
    }
}

/// A record with the slug its detail link uses and the text to show.
#[derive(Debug, Clone, Serialize)]
pub struct Linked<T> {
    #[serde(flatten)]
    pub item: T,
    pub slug: Option<Slug>,
    pub label: String,
}

impl<T: Sluggable + DisplayLabel> Linked<T> {
    pub fn new(item: T, locale: Locale) -> Self {
        let slug = link_slug(&item);
        let label = item.display_label(locale);
        Self { item, slug, label }
    }

    pub fn all(items: impl IntoIterator<Item = T>, locale: Locale) -> Vec<Self> {
        items.into_iter().map(|i| Self::new(i, locale)).collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FighterFightRow {
    pub fight: Fight,
    pub outcome: Outcome,
    pub outcome_label: &'static str,
    pub opponent: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FighterView {
    pub fighter: Fighter,
    pub label: String,
    pub record: String,
    pub weight_class: Option<String>,
    pub recent: Vec<FighterFightRow>,
    pub total_fights: usize,
}

pub async fn load_fighter(source: &dyn CatalogSource, config: &Config, slug: &str) -> PageState<FighterView> {
    let locale = config.site.locale;
    let query = FighterQuery {
        limit: Some(config.backend.fighters_limit),
        ..Default::default()
    };
    let fighters = match source.fighters(&query).await {
        Ok(fighters) => fighters,
        Err(e) => return load_error("fighters", e),
    };
    let fighter = match resolve(slug, &fighters) {
        Resolution::Found(fighter) => fighter.clone(),
        Resolution::NotFound => return PageState::NotFound,
    };

    let fights_query = FightQuery {
        fighter_id: Some(fighter.id),
        limit: Some(FIGHTS_LIMIT),
        ..Default::default()
    };
    let class_lookup = async {
        match fighter.weight_class_id {
            Some(_) => source.weight_classes().await.map(Some),
            None => Ok(None),
        }
    };
    let (fights, classes) = match tokio::try_join!(source.fights(&fights_query), class_lookup) {
        Ok(loaded) => loaded,
        Err(e) => return load_error("fighter details", e),
    };

    let weight_class = classes
        .and_then(|classes| {
            classes
                .into_iter()
                .find(|c| Some(c.id) == fighter.weight_class_id)
        })
        .map(|c| c.display_label(locale))
        .or_else(|| {
            fighter
                .weight_class
                .as_deref()
                .filter(|n| !n.trim().is_empty())
                .map(|n| format::weight_class_name(n, locale))
        });

    let total_fights = fights.len();
    let recent = fights
        .into_iter()
        .take(config.display.recent_fights)
        .map(|fight| fighter_fight_row(fight, &fighter, locale))
        .collect();

    PageState::Found(FighterView {
        label: format::fighter_label(&fighter, locale),
        record: format::fighter_record(&fighter),
        fighter,
        weight_class,
        recent,
        total_fights,
    })
}

fn fighter_fight_row(fight: Fight, fighter: &Fighter, locale: Locale) -> FighterFightRow {
    let outcome = format::outcome_for(&fight, fighter);
    let opponent = format::opponent(&fight, fighter)
        .map(str::to_string)
        .unwrap_or_else(|| format::unknown_fighter(locale).to_string());
    FighterFightRow {
        date: format::short_date(fight.fight_date.as_deref(), locale),
        outcome,
        outcome_label: outcome.label(locale),
        opponent,
        fight,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FighterStatsView {
    pub fighter: Fighter,
    pub label: String,
    pub slug: Option<Slug>,
    pub stats: FighterStatsSummary,
    pub fights: Vec<FighterFightRow>,
}

pub async fn load_fighter_stats(
    source: &dyn CatalogSource,
    config: &Config,
    slug: &str,
) -> PageState<FighterStatsView> {
    let locale = config.site.locale;
    let query = FighterQuery {
        limit: Some(config.backend.fighters_limit),
        ..Default::default()
    };
    let fighters = match source.fighters(&query).await {
        Ok(fighters) => fighters,
        Err(e) => return load_error("fighters", e),
    };
    let fighter = match resolve(slug, &fighters) {
        Resolution::Found(fighter) => fighter.clone(),
        Resolution::NotFound => return PageState::NotFound,
    };

    let loaded = tokio::try_join!(
        source.fighter_stats(fighter.id),
        source.fighter_fights(fighter.id, STATS_FIGHTS_LIMIT)
    );
    let (stats, fights) = match loaded {
        Ok(loaded) => loaded,
        Err(e) if e.is_not_found() => return PageState::NotFound,
        Err(e) => return load_error("fighter stats", e),
    };

    PageState::Found(FighterStatsView {
        label: format::fighter_label(&fighter, locale),
        slug: link_slug(&fighter),
        fights: fights
            .into_iter()
            .map(|fight| fighter_fight_row(fight, &fighter, locale))
            .collect(),
        fighter,
        stats,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct EventFightRow {
    pub fight: Fight,
    pub fighter1: String,
    pub fighter2: String,
    pub card_label: String,
    pub result: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventView {
    pub event: Event,
    pub label: String,
    pub date: String,
    pub fights: Vec<EventFightRow>,
}

pub async fn load_event(source: &dyn CatalogSource, config: &Config, slug: &str) -> PageState<EventView> {
    let locale = config.site.locale;
    let query = EventQuery {
        limit: Some(config.backend.events_limit),
        ..Default::default()
    };
    let events = match source.events(&query).await {
        Ok(events) => events,
        Err(e) => return load_error("events", e),
    };
    let event = match resolve(slug, &events) {
        Resolution::Found(event) => event.clone(),
        Resolution::NotFound => return PageState::NotFound,
    };

    let fights_query = FightQuery {
        event_id: Some(event.id),
        limit: Some(FIGHTS_LIMIT),
        ..Default::default()
    };
    let fights = match source.fights(&fights_query).await {
        Ok(fights) => fights,
        Err(e) => return load_error("event fights", e),
    };

    PageState::Found(EventView {
        label: event.display_label(locale),
        date: format::format_date(event.event_date.as_deref(), locale),
        fights: fights
            .into_iter()
            .map(|fight| EventFightRow {
                fighter1: corner_name(fight.fighter1_name.as_deref(), locale),
                fighter2: corner_name(fight.fighter2_name.as_deref(), locale),
                card_label: format::card_type_label(fight.card_type.as_deref(), locale),
                result: format::result_text(&fight, locale),
                fight,
            })
            .collect(),
        event,
    })
}

fn corner_name(name: Option<&str>, locale: Locale) -> String {
    name.filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| format::unknown_fighter(locale))
        .to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedFighter {
    pub position: Option<i32>,
    pub is_champion: bool,
    pub rank_change: i32,
    pub fighter: Linked<Fighter>,
    pub record: String,
    /// Compare-tray query with this fighter added, where the tray has room.
    pub compare_query: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DivisionView {
    pub champion: Option<RankedFighter>,
    pub contenders: Vec<RankedFighter>,
}

impl DivisionView {
    fn new(division: DivisionRankings, locale: Locale) -> Self {
        let ranked = |r: crate::models::Ranking| RankedFighter {
            position: r.rank_position,
            is_champion: r.is_champion,
            rank_change: r.rank_change,
            record: format::fighter_record(&r.fighter),
            fighter: Linked::new(r.fighter, locale),
            compare_query: None,
        };
        Self {
            champion: division.champion.map(ranked),
            contenders: division.contenders.into_iter().map(ranked).collect(),
        }
    }

    fn with_compare_links(mut self, store: &CompareStore) -> Self {
        for entry in self.champion.iter_mut().chain(self.contenders.iter_mut()) {
            entry.compare_query = store.with_added(entry.fighter.item.id);
        }
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WeightClassView {
    pub class: WeightClass,
    pub label: String,
    pub division: DivisionView,
}

pub async fn load_weight_class(
    source: &dyn CatalogSource,
    config: &Config,
    slug: &str,
) -> PageState<WeightClassView> {
    let locale = config.site.locale;
    let (classes, rankings) = match tokio::try_join!(source.weight_classes(), source.all_rankings()) {
        Ok(loaded) => loaded,
        Err(e) => return load_error("weight classes", e),
    };
    let class = match resolve(slug, &classes) {
        Resolution::Found(class) => class.clone(),
        Resolution::NotFound => return PageState::NotFound,
    };

    let division = crate::services::filter::division_rankings(&class, &rankings);
    PageState::Found(WeightClassView {
        label: class.display_label(locale),
        division: DivisionView::new(division, locale),
        class,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct RankingsIndexView {
    pub groups: WeightClassGroups<Linked<WeightClass>>,
}

pub async fn load_rankings_index(
    source: &dyn CatalogSource,
    config: &Config,
) -> PageState<RankingsIndexView> {
    match source.weight_classes().await {
        Ok(classes) => {
            let linked = Linked::all(classes, config.site.locale);
            PageState::Found(RankingsIndexView {
                groups: group_weight_classes(linked, |l| &l.item),
            })
        }
        Err(e) => load_error("weight classes", e),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub stats: Option<SiteStats>,
    pub groups: WeightClassGroups<Linked<WeightClass>>,
    pub active_class: Option<Linked<WeightClass>>,
    pub division: DivisionView,
    pub compare: CompareTray,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CompareTray {
    pub store: CompareStore,
    /// `compare` query value reproducing the tray.
    pub query: String,
    pub entries: Vec<TrayEntry>,
    pub ready: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrayEntry {
    pub fighter: Linked<Fighter>,
    pub remove_query: String,
}

/// Home page: overview, division tabs and the rankings of the active division
/// (the requested one, or the first the backend lists).
pub async fn load_home(
    source: &dyn CatalogSource,
    config: &Config,
    active: Option<i64>,
    compare: &str,
) -> PageState<HomeView> {
    let locale = config.site.locale;
    let (stats, classes) = tokio::join!(source.stats(), source.weight_classes());
    let stats = match stats {
        Ok(stats) => Some(stats),
        Err(e) => {
            tracing::warn!("Stats overview unavailable: {}", e);
            None
        }
    };
    let classes = match classes {
        Ok(classes) => classes,
        Err(e) => return load_error("weight classes", e),
    };

    let active_class = active
        .and_then(|id| classes.iter().find(|c| c.id == id))
        .or_else(|| classes.first())
        .cloned();

    let (store, rejected) = CompareStore::from_query(compare);

    let rankings = async {
        match &active_class {
            Some(class) => source.rankings(class.id).await.map(Some),
            None => Ok(None),
        }
    };
    let tray_fighters = async {
        if store.is_empty() {
            return Ok(Vec::new());
        }
        let query = FighterQuery {
            limit: Some(config.backend.fighters_limit),
            ..Default::default()
        };
        source.fighters(&query).await
    };
    let (rankings, tray_fighters) = tokio::join!(rankings, tray_fighters);

    let division = match rankings {
        Ok(Some(mut rankings)) => {
            DivisionView::new(split_champion(&mut rankings), locale).with_compare_links(&store)
        }
        Ok(None) => DivisionView::default(),
        Err(e) => return load_error("rankings", e),
    };
    let entries: Vec<TrayEntry> = match tray_fighters {
        Ok(fighters) => store
            .ids()
            .iter()
            .filter_map(|id| fighters.iter().find(|f| f.id == *id))
            .map(|f| TrayEntry {
                remove_query: store.without(f.id),
                fighter: Linked::new(f.clone(), locale),
            })
            .collect(),
        Err(e) => return load_error("fighters", e),
    };

    PageState::Found(HomeView {
        stats,
        groups: group_weight_classes(Linked::all(classes, locale), |l| &l.item),
        active_class: active_class.map(|c| Linked::new(c, locale)),
        division,
        compare: CompareTray {
            ready: store.is_full(),
            query: store.to_query(),
            error: rejected.map(|e| e.to_string()),
            entries,
            store,
        },
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct FightersView {
    pub fighters: Vec<Linked<Fighter>>,
    pub weight_classes: Vec<Linked<WeightClass>>,
    pub total: usize,
    pub search: String,
    pub weight_class: Option<i64>,
}

pub async fn load_fighters(
    source: &dyn CatalogSource,
    config: &Config,
    filter: &FighterFilter,
) -> PageState<FightersView> {
    let locale = config.site.locale;
    let query = FighterQuery {
        limit: Some(config.backend.fighters_limit),
        ..Default::default()
    };
    let (fighters, classes) = match tokio::try_join!(source.fighters(&query), source.weight_classes()) {
        Ok(loaded) => loaded,
        Err(e) => return load_error("fighters", e),
    };

    let selected: Vec<Fighter> = filter.apply(&fighters).into_iter().cloned().collect();
    PageState::Found(FightersView {
        total: fighters.len(),
        fighters: Linked::all(selected, locale),
        weight_classes: Linked::all(classes, locale),
        search: filter.search.clone().unwrap_or_default(),
        weight_class: filter.weight_class,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct EventsView {
    pub tab: EventTab,
    pub events: Vec<Linked<Event>>,
    pub counts: EventCounts,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct EventCounts {
    pub all: usize,
    pub upcoming: usize,
    pub past: usize,
}

pub async fn load_events(source: &dyn CatalogSource, config: &Config, tab: EventTab) -> PageState<EventsView> {
    let locale = config.site.locale;
    let all_query = EventQuery {
        limit: Some(config.backend.events_limit),
        ..Default::default()
    };
    let upcoming_query = EventQuery {
        limit: Some(UPCOMING_EVENTS_LIMIT),
        upcoming_only: true,
        ..Default::default()
    };
    let (all, upcoming) = match tokio::try_join!(source.events(&all_query), source.events(&upcoming_query)) {
        Ok(loaded) => loaded,
        Err(e) => return load_error("events", e),
    };

    let tabs = EventTabs::new(all, upcoming);
    let counts = EventCounts {
        all: tabs.all.len(),
        upcoming: tabs.upcoming.len(),
        past: tabs.past.len(),
    };
    let events = Linked::all(tabs.tab(tab).iter().cloned(), locale);

    PageState::Found(EventsView { tab, events, counts })
}

#[derive(Debug, Clone, Serialize)]
pub struct UpcomingCard {
    pub fight: UpcomingFight,
    pub fighter1: Linked<Fighter>,
    pub fighter2: Linked<Fighter>,
    pub weight_class: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpcomingView {
    pub main_event_only: bool,
    pub fights: Vec<UpcomingCard>,
}

pub async fn load_upcoming(
    source: &dyn CatalogSource,
    config: &Config,
    main_event_only: bool,
) -> PageState<UpcomingView> {
    let locale = config.site.locale;
    let query = UpcomingQuery {
        limit: Some(config.display.upcoming_limit),
        main_event_only,
    };
    match source.upcoming_fights(&query).await {
        Ok(fights) => PageState::Found(UpcomingView {
            main_event_only,
            fights: fights
                .into_iter()
                .map(|fight| UpcomingCard {
                    fighter1: Linked::new(fight.fighter1.clone(), locale),
                    fighter2: Linked::new(fight.fighter2.clone(), locale),
                    weight_class: fight.weight_class.display_label(locale),
                    fight,
                })
                .collect(),
        }),
        Err(e) => load_error("upcoming fights", e),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompareCandidate {
    pub fighter: Linked<Fighter>,
    /// `ids` query value with this fighter added, where there is room.
    pub add_query: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompareView {
    pub candidates: Vec<CompareCandidate>,
    pub selected: Vec<TrayEntry>,
    pub store: CompareStore,
    pub comparison: Option<Comparison>,
    pub labels: Option<(String, String)>,
    pub rows: Vec<ComparisonRow>,
    pub error: Option<String>,
}

/// Candidate list plus, once two distinct fighters are picked, the backend's
/// comparison of them.
pub async fn load_compare(source: &dyn CatalogSource, config: &Config, ids: &str) -> PageState<CompareView> {
    let locale = config.site.locale;
    let (store, rejected) = CompareStore::from_query(ids);

    let query = FighterQuery {
        limit: Some(config.backend.fighters_limit),
        ..Default::default()
    };
    let comparison = async {
        match store.pair() {
            Some((a, b)) => source.compare(a, b).await.map(Some),
            None => Ok(None),
        }
    };
    let (fighters, comparison) = tokio::join!(source.fighters(&query), comparison);

    let fighters = match fighters {
        Ok(fighters) => fighters,
        Err(e) => return load_error("fighters", e),
    };
    let comparison = match comparison {
        Ok(found) => found,
        Err(e) if e.is_not_found() => return PageState::NotFound,
        Err(e) => return load_error("comparison", e),
    };

    let selected = store
        .ids()
        .iter()
        .filter_map(|id| fighters.iter().find(|f| f.id == *id))
        .map(|f| TrayEntry {
            remove_query: store.without(f.id),
            fighter: Linked::new(f.clone(), locale),
        })
        .collect();
    let candidates = fighters
        .into_iter()
        .map(|f| CompareCandidate {
            add_query: store.with_added(f.id),
            fighter: Linked::new(f, locale),
        })
        .collect();

    PageState::Found(CompareView {
        candidates,
        selected,
        labels: comparison.as_ref().map(|c| {
            (
                c.fighter1.fighter.display_label(locale),
                c.fighter2.fighter.display_label(locale),
            )
        }),
        rows: comparison.as_ref().map(comparison_rows).unwrap_or_default(),
        comparison,
        store,
        error: rejected.map(|e| e.to_string()),
    })
}
