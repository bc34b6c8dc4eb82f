use async_trait::async_trait;
use fightcard::models::{
    Comparison, ComparisonTable, Event, Fight, Fighter, FighterDetail, FighterStatsSummary,
    Measurement, Ranking, SiteStats, UpcomingFight, WeightClass,
};
use fightcard::services::api::{
    ApiError, ApiResult, CatalogSource, EventQuery, FightQuery, FighterQuery, UpcomingQuery,
};
use fightcard::services::pages::{self, PageState};
use fightcard::Config;
use std::sync::Mutex;

fn fighter(id: i64, name_en: &str, name_ru: &str) -> Fighter {
    Fighter {
        id,
        name: name_ru.to_string(),
        name_ru: name_ru.to_string(),
        name_en: Some(name_en.to_string()),
        wins: 20,
        losses: 1,
        weight_class_id: Some(2),
        ..Default::default()
    }
}

fn weight_class(id: i64, name_en: &str, gender: &str) -> WeightClass {
    WeightClass {
        id,
        name: name_en.to_string(),
        name_en: Some(name_en.to_string()),
        gender: gender.to_string(),
        ..Default::default()
    }
}

/// In-memory backend. Endpoints listed in `failures` answer with that status.
#[derive(Default)]
struct FakeSource {
    fighters: Vec<Fighter>,
    events: Vec<Event>,
    classes: Vec<WeightClass>,
    rankings: Vec<Ranking>,
    fights: Vec<Fight>,
    failures: Vec<(&'static str, u16)>,
    fight_queries: Mutex<Vec<FightQuery>>,
}

impl FakeSource {
    fn catalog() -> Self {
        let islam = fighter(5, "Islam Makhachev", "Ислам Махачев");
        let dustin = fighter(6, "Dustin Poirier", "Дастин Порье");
        let zhang = Fighter {
            weight_class_id: Some(3),
            ..fighter(7, "Zhang Weili", "Чжан Вэйли")
        };
        Self {
            fighters: vec![islam.clone(), dustin.clone(), zhang.clone()],
            events: vec![
                Event {
                    id: 11,
                    name: "UFC 302".into(),
                    event_date: Some("2024-06-01".into()),
                    is_upcoming: Some(false),
                    ..Default::default()
                },
                Event {
                    id: 12,
                    name: "UFC 310".into(),
                    event_date: Some("2024-12-07".into()),
                    is_upcoming: Some(true),
                    ..Default::default()
                },
            ],
            classes: vec![
                weight_class(2, "Lightweight", "male"),
                weight_class(3, "Women's Strawweight", "female"),
            ],
            rankings: vec![
                Ranking {
                    id: 1,
                    fighter: islam,
                    weight_class: "Lightweight".into(),
                    rank_position: Some(0),
                    is_champion: true,
                    rank_change: 0,
                },
                Ranking {
                    id: 2,
                    fighter: dustin,
                    weight_class: "Lightweight".into(),
                    rank_position: Some(3),
                    is_champion: false,
                    rank_change: -1,
                },
                Ranking {
                    id: 3,
                    fighter: zhang,
                    weight_class: "Women's Strawweight".into(),
                    rank_position: Some(0),
                    is_champion: true,
                    rank_change: 0,
                },
            ],
            fights: vec![Fight {
                id: 100,
                event_name: Some("UFC 302".into()),
                fighter1_name: Some("Islam Makhachev".into()),
                fighter2_name: Some("Dustin Poirier".into()),
                fight_date: Some("2024-06-01".into()),
                method: Some("Submission".into()),
                round: Some(5),
                is_win: Some("1".into()),
                winner_name: Some("Islam Makhachev".into()),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn failing(mut self, endpoint: &'static str, status: u16) -> Self {
        self.failures.push((endpoint, status));
        self
    }

    fn check(&self, endpoint: &str) -> ApiResult<()> {
        match self.failures.iter().find(|(e, _)| *e == endpoint) {
            Some((_, status)) => Err(ApiError::Status {
                path: endpoint.to_string(),
                status: *status,
            }),
            None => Ok(()),
        }
    }

    fn recorded_fight_queries(&self) -> Vec<FightQuery> {
        self.fight_queries.lock().unwrap().clone()
    }

    fn detail(&self, id: i64) -> ApiResult<FighterDetail> {
        self.fighters
            .iter()
            .find(|f| f.id == id)
            .map(|f| FighterDetail {
                fighter: f.clone(),
                fight_record: None,
            })
            .ok_or(ApiError::Status {
                path: format!("fighters/{}", id),
                status: 404,
            })
    }
}

#[async_trait]
impl CatalogSource for FakeSource {
    async fn fighters(&self, _query: &FighterQuery) -> ApiResult<Vec<Fighter>> {
        self.check("fighters")?;
        Ok(self.fighters.clone())
    }

    async fn fighter(&self, id: i64) -> ApiResult<FighterDetail> {
        self.check("fighter")?;
        self.detail(id)
    }

    async fn fighter_fights(&self, _id: i64, limit: u32) -> ApiResult<Vec<Fight>> {
        self.check("fighter_fights")?;
        Ok(self.fights.iter().take(limit as usize).cloned().collect())
    }

    async fn fighter_stats(&self, id: i64) -> ApiResult<FighterStatsSummary> {
        self.check("fighter_stats")?;
        Ok(FighterStatsSummary {
            fighter: self.detail(id)?.fighter,
            total_fights: 1,
            total_knockdowns: 2,
            ..Default::default()
        })
    }

    async fn weight_classes(&self) -> ApiResult<Vec<WeightClass>> {
        self.check("weight_classes")?;
        Ok(self.classes.clone())
    }

    async fn all_rankings(&self) -> ApiResult<Vec<Ranking>> {
        self.check("rankings")?;
        Ok(self.rankings.clone())
    }

    async fn rankings(&self, class_id: i64) -> ApiResult<Vec<Ranking>> {
        self.check("rankings")?;
        let Some(class) = self.classes.iter().find(|c| c.id == class_id) else {
            return Ok(Vec::new());
        };
        Ok(self
            .rankings
            .iter()
            .filter(|r| class.matches_ranking(r))
            .cloned()
            .collect())
    }

    async fn champion(&self, class_id: i64) -> ApiResult<Option<Ranking>> {
        Ok(self.rankings(class_id).await?.into_iter().find(|r| r.is_champion))
    }

    async fn compare(&self, fighter1: i64, fighter2: i64) -> ApiResult<Comparison> {
        self.check("compare")?;
        let measurement = Measurement {
            fighter1: Some(178),
            fighter2: Some(175),
            difference: 3,
        };
        Ok(Comparison {
            fighter1: self.detail(fighter1)?,
            fighter2: self.detail(fighter2)?,
            comparison: ComparisonTable {
                height: measurement,
                ..Default::default()
            },
        })
    }

    async fn upcoming_fights(&self, query: &UpcomingQuery) -> ApiResult<Vec<UpcomingFight>> {
        self.check("upcoming_fights")?;
        let fight = UpcomingFight {
            id: 1,
            fighter1: self.fighters[0].clone(),
            fighter2: self.fighters[1].clone(),
            weight_class: self.classes[0].clone(),
            is_main_event: !query.main_event_only,
            is_title_fight: true,
        };
        Ok(vec![fight])
    }

    async fn stats(&self) -> ApiResult<SiteStats> {
        self.check("stats")?;
        Ok(SiteStats {
            total_fighters: self.fighters.len() as i64,
            total_weight_classes: self.classes.len() as i64,
            ..Default::default()
        })
    }

    async fn events(&self, query: &EventQuery) -> ApiResult<Vec<Event>> {
        self.check("events")?;
        Ok(self
            .events
            .iter()
            .filter(|e| !query.upcoming_only || e.is_upcoming())
            .cloned()
            .collect())
    }

    async fn event(&self, id: i64) -> ApiResult<Event> {
        self.events
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(ApiError::Status {
                path: format!("events/{}", id),
                status: 404,
            })
    }

    async fn fights(&self, query: &FightQuery) -> ApiResult<Vec<Fight>> {
        self.fight_queries.lock().unwrap().push(query.clone());
        self.check("fights")?;
        Ok(self.fights.clone())
    }
}

mod page_loading_tests {
    use super::*;

    #[tokio::test]
    async fn test_fighter_detail_keys_dependent_fetch_by_id() {
        let source = FakeSource::catalog();
        let config = Config::default();

        let page = pages::load_fighter(&source, &config, "islam_makhachev").await;

        let view = page.found().expect("fighter should resolve");
        assert_eq!(view.fighter.id, 5);
        assert_eq!(view.label, "Ислам Махачев");
        assert_eq!(view.record, "20-1-0");
        assert_eq!(view.weight_class.as_deref(), Some("Легкий вес"));
        assert_eq!(view.recent.len(), 1);
        assert_eq!(view.recent[0].opponent, "Dustin Poirier");

        let queries = source.recorded_fight_queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].fighter_id, Some(5));
    }

    #[tokio::test]
    async fn test_fighter_slug_from_uppercase_link() {
        let source = FakeSource::catalog();
        let page = pages::load_fighter(&source, &Config::default(), "Islam_Makhachev").await;
        assert_eq!(page.found().map(|v| v.fighter.id), Some(5));
    }

    #[tokio::test]
    async fn test_unknown_fighter_is_not_found_without_dependent_fetch() {
        let source = FakeSource::catalog();
        let page = pages::load_fighter(&source, &Config::default(), "conor_mcgregor").await;
        assert!(matches!(page, PageState::NotFound));
        assert!(source.recorded_fight_queries().is_empty());
    }

    #[tokio::test]
    async fn test_collection_failure_is_load_error() {
        let source = FakeSource::catalog().failing("fighters", 500);
        let page = pages::load_fighter(&source, &Config::default(), "islam_makhachev").await;
        assert!(matches!(page, PageState::LoadError(_)));
    }

    #[tokio::test]
    async fn test_dependent_failure_is_load_error() {
        let source = FakeSource::catalog().failing("fights", 503);
        let page = pages::load_fighter(&source, &Config::default(), "islam_makhachev").await;
        match page {
            PageState::LoadError(message) => assert!(message.contains("503")),
            other => panic!("expected load error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fighter_stats() {
        let source = FakeSource::catalog();
        let page = pages::load_fighter_stats(&source, &Config::default(), "dustin_poirier").await;
        let view = page.found().expect("stats should load");
        assert_eq!(view.stats.total_knockdowns, 2);
        assert_eq!(view.slug.as_ref().map(|s| s.as_str()), Some("dustin_poirier"));
    }

    #[tokio::test]
    async fn test_missing_stats_is_not_found() {
        let source = FakeSource::catalog().failing("fighter_stats", 404);
        let page = pages::load_fighter_stats(&source, &Config::default(), "dustin_poirier").await;
        assert!(matches!(page, PageState::NotFound));
    }

    #[tokio::test]
    async fn test_event_detail_keys_fights_by_event_id() {
        let source = FakeSource::catalog();
        let page = pages::load_event(&source, &Config::default(), "ufc_302").await;
        let view = page.found().expect("event should resolve");
        assert_eq!(view.event.id, 11);
        assert_eq!(view.date, "1 июня 2024 г.");
        assert_eq!(view.fights[0].result, "Победитель: Islam Makhachev");

        let queries = source.recorded_fight_queries();
        assert_eq!(queries[0].event_id, Some(11));
        assert_eq!(queries[0].fighter_id, None);
    }

    #[tokio::test]
    async fn test_weight_class_with_apostrophe() {
        let source = FakeSource::catalog();
        let page = pages::load_weight_class(&source, &Config::default(), "women's_strawweight").await;
        let view = page.found().expect("class should resolve");
        assert_eq!(view.class.id, 3);
        assert_eq!(view.label, "Женский минимальный вес");
        let champion = view.division.champion.as_ref().expect("champion");
        assert_eq!(champion.fighter.item.id, 7);
        assert!(view.division.contenders.is_empty());
    }

    #[tokio::test]
    async fn test_home_survives_stats_failure() {
        let source = FakeSource::catalog().failing("stats", 500);
        let page = pages::load_home(&source, &Config::default(), None, "").await;
        let view = page.found().expect("home should render");
        assert!(view.stats.is_none());
        assert_eq!(view.active_class.as_ref().map(|c| c.item.id), Some(2));
        assert_eq!(view.groups.women.len(), 1);
    }

    #[tokio::test]
    async fn test_home_compare_tray() {
        let source = FakeSource::catalog();
        let page = pages::load_home(&source, &Config::default(), Some(2), "5").await;
        let view = page.found().expect("home should render");
        assert_eq!(view.compare.entries.len(), 1);
        assert!(!view.compare.ready);

        let champion = view.division.champion.as_ref().expect("champion");
        assert_eq!(champion.compare_query, None);
        assert_eq!(view.division.contenders[0].compare_query.as_deref(), Some("5,6"));
    }

    #[tokio::test]
    async fn test_events_tabs() {
        let source = FakeSource::catalog();
        let page = pages::load_events(
            &source,
            &Config::default(),
            fightcard::services::filter::EventTab::Past,
        )
        .await;
        let view = page.found().expect("events should load");
        assert_eq!(view.counts.all, 2);
        assert_eq!(view.counts.upcoming, 1);
        assert_eq!(view.events.len(), 1);
        assert_eq!(view.events[0].item.id, 11);
    }

    #[tokio::test]
    async fn test_compare_pair() {
        let source = FakeSource::catalog();
        let page = pages::load_compare(&source, &Config::default(), "5,6").await;
        let view = page.found().expect("comparison should load");
        assert!(view.comparison.is_some());
        assert_eq!(view.rows.len(), 4);
        assert_eq!(
            view.rows[0].advantage,
            fightcard::services::compare::Advantage::Fighter1
        );
    }

    #[tokio::test]
    async fn test_compare_missing_fighter_is_not_found() {
        let source = FakeSource::catalog().failing("compare", 404);
        let page = pages::load_compare(&source, &Config::default(), "5,6").await;
        assert!(matches!(page, PageState::NotFound));
    }

    #[tokio::test]
    async fn test_compare_same_fighter_reports_error() {
        let source = FakeSource::catalog();
        let page = pages::load_compare(&source, &Config::default(), "5,5").await;
        let view = page.found().expect("page should render");
        assert!(view.comparison.is_none());
        assert!(view.error.is_some());
    }
}

mod router_tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use fightcard::web::{router, AppState};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn get(source: FakeSource, uri: &str) -> (StatusCode, String) {
        let state = AppState::new(Config::default(), Arc::new(source)).expect("templates load");
        let response = router(Arc::new(state))
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_fighter_page() {
        let (status, body) = get(FakeSource::catalog(), "/fighters/islam_makhachev").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Ислам Махачев"));
        assert!(body.contains("Dustin Poirier"));
    }

    #[tokio::test]
    async fn test_unknown_fighter_is_404() {
        let (status, body) = get(FakeSource::catalog(), "/fighters/nobody").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Не найдено"));
    }

    #[tokio::test]
    async fn test_backend_failure_is_502_with_retry() {
        let source = FakeSource::catalog().failing("events", 500);
        let (status, body) = get(source, "/events/ufc_302").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.contains("Повторить"));
    }

    #[tokio::test]
    async fn test_encoded_apostrophe_route() {
        let (status, body) = get(FakeSource::catalog(), "/rankings/women%27s_strawweight").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Чжан Вэйли"));
    }

    #[tokio::test]
    async fn test_typographic_apostrophe_route() {
        let (status, body) = get(FakeSource::catalog(), "/rankings/WOMEN%E2%80%99S_STRAWWEIGHT").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Чжан Вэйли"));
    }

    #[tokio::test]
    async fn test_list_pages_render() {
        for uri in [
            "/",
            "/?class=3&compare=5,6",
            "/rankings",
            "/fighters?search=islam&weight_class=",
            "/fighters/dustin_poirier/stats",
            "/events?tab=upcoming",
            "/upcoming?main_event_only=true",
            "/compare?ids=5,6",
        ] {
            let (status, _) = get(FakeSource::catalog(), uri).await;
            assert_eq!(status, StatusCode::OK, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_fighter_list_links_by_slug() {
        let (_, body) = get(FakeSource::catalog(), "/fighters").await;
        assert!(body.contains("/fighters/islam_makhachev"));
        assert!(body.contains("/fighters/zhang_weili"));
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get(FakeSource::default(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"status\":\"ok\""));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (status, _) = get(FakeSource::default(), "/nope/at/all").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

mod api_client_tests {
    use axum::extract::{Path, Query};
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use fightcard::config::BackendConfig;
    use fightcard::services::api::{ApiClient, ApiError, CatalogSource, FightQuery, FighterQuery};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    /// Stub backend echoing query parameters back in its payloads.
    async fn spawn_backend() -> String {
        let app = Router::new()
            .route(
                "/api/fighters",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    Json(json!([
                        {"id": 5, "name": "Ислам Махачев", "name_en": "Islam Makhachev", "wins": 26},
                        {"id": 6, "name": q.get("limit").cloned().unwrap_or_default()}
                    ]))
                }),
            )
            .route(
                "/api/fights",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    let id: i64 = q.get("fighter_id").and_then(|v| v.parse().ok()).unwrap_or(0);
                    Json(json!([{"id": id, "method": q.get("limit")}]))
                }),
            )
            .route(
                "/api/compare/:a/:b",
                get(|Path((_a, _b)): Path<(i64, i64)>| async { StatusCode::NOT_FOUND }),
            )
            .route("/api/stats", get(|| async { Json(json!({"unexpected": true})) }))
            .route("/api/weight-classes", get(|| async { "not json" }))
            .route(
                "/api/rankings/:id/champion",
                get(|| async { Json(Value::Null) }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/api", addr)
    }

    fn client(base_url: String) -> ApiClient {
        ApiClient::new(&BackendConfig {
            base_url,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_fighters_with_query() {
        let client = client(spawn_backend().await);
        let query = FighterQuery {
            limit: Some(1000),
            ..Default::default()
        };
        let fighters = client.fighters(&query).await.unwrap();
        assert_eq!(fighters[0].id, 5);
        assert_eq!(fighters[0].wins, 26);
        assert_eq!(fighters[1].name, "1000");
    }

    #[tokio::test]
    async fn test_fight_query_serialization() {
        let client = client(spawn_backend().await);
        let query = FightQuery {
            fighter_id: Some(5),
            limit: Some(100),
            ..Default::default()
        };
        let fights = client.fights(&query).await.unwrap();
        assert_eq!(fights[0].id, 5);
        assert_eq!(fights[0].method.as_deref(), Some("100"));
    }

    #[tokio::test]
    async fn test_status_error() {
        let client = client(spawn_backend().await);
        let err = client.compare(1, 2).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_decode_error() {
        let client = client(spawn_backend().await);
        let err = client.weight_classes().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_lenient_stats_decode() {
        let client = client(spawn_backend().await);
        let stats = client.stats().await.unwrap();
        assert_eq!(stats.total_fighters, 0);
    }

    #[tokio::test]
    async fn test_vacant_title() {
        let client = client(spawn_backend().await);
        assert!(client.champion(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_transport_error() {
        let client = client("http://127.0.0.1:1/api".to_string());
        let err = client.events(&Default::default()).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }));
    }
}

mod cli_tests {
    use super::*;
    use fightcard::cli::check::{probe, CheckStatus};
    use fightcard::cli::resolve::lookup;
    use fightcard::cli::EntityKind;

    #[tokio::test]
    async fn test_resolve_fighter() {
        let source = FakeSource::catalog();
        let summary = lookup(&source, &Config::default(), EntityKind::Fighter, "islam_makhachev")
            .await
            .unwrap();
        assert!(summary.contains("id=5"));
        assert!(summary.contains("20-1-0"));
    }

    #[tokio::test]
    async fn test_resolve_weight_class_reports_champion() {
        let source = FakeSource::catalog();
        let summary = lookup(&source, &Config::default(), EntityKind::WeightClass, "lightweight")
            .await
            .unwrap();
        assert!(summary.contains("Ислам Махачев"));
    }

    #[tokio::test]
    async fn test_resolve_unknown_event() {
        let source = FakeSource::catalog();
        let err = lookup(&source, &Config::default(), EntityKind::Event, "ufc_1")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("ufc_1"));
    }

    #[tokio::test]
    async fn test_probe_flags_collisions() {
        let mut source = FakeSource::catalog();
        source.fighters.push(fighter(8, "Islam  Makhachev", "Ислам Махачев"));
        let results = probe(&source, &Config::default()).await;

        let slugs = results
            .iter()
            .find(|r| r.name == "Fighter slugs")
            .expect("collision reported");
        assert_eq!(slugs.status, CheckStatus::Warn);
        assert!(slugs.detail.contains("islam_makhachev"));
        assert!(results.iter().all(|r| r.status != CheckStatus::Fail));
    }

    #[tokio::test]
    async fn test_probe_reports_unreachable_backend() {
        let source = FakeSource::catalog().failing("fighters", 500);
        let results = probe(&source, &Config::default()).await;
        assert!(results
            .iter()
            .any(|r| r.name == "Fighters" && r.status == CheckStatus::Fail));
    }
}
