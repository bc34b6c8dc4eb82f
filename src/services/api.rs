//! Typed client for the rankings backend.

use crate::config::BackendConfig;
use crate::models::{
    Comparison, Event, Fight, Fighter, FighterDetail, FighterStatsSummary, Ranking, SiteStats,
    UpcomingFight, WeightClass,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid backend url: {0}")]
    Url(#[from] url::ParseError),
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("backend returned {status} for {path}")]
    Status { path: String, status: u16 },
    #[error("could not decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, Default, Serialize)]
pub struct FighterQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EventQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub upcoming_only: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FightQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fighter_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_class_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpcomingQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub main_event_only: bool,
}

/// Read-only access to the catalog collections.
///
/// Collections come back in backend order; implementations must not reorder them.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fighters(&self, query: &FighterQuery) -> ApiResult<Vec<Fighter>>;
    async fn fighter(&self, id: i64) -> ApiResult<FighterDetail>;
    async fn fighter_fights(&self, id: i64, limit: u32) -> ApiResult<Vec<Fight>>;
    async fn fighter_stats(&self, id: i64) -> ApiResult<FighterStatsSummary>;
    async fn weight_classes(&self) -> ApiResult<Vec<WeightClass>>;
    async fn all_rankings(&self) -> ApiResult<Vec<Ranking>>;
    async fn rankings(&self, class_id: i64) -> ApiResult<Vec<Ranking>>;
    async fn champion(&self, class_id: i64) -> ApiResult<Option<Ranking>>;
    async fn compare(&self, fighter1: i64, fighter2: i64) -> ApiResult<Comparison>;
    async fn upcoming_fights(&self, query: &UpcomingQuery) -> ApiResult<Vec<UpcomingFight>>;
    async fn stats(&self) -> ApiResult<SiteStats>;
    async fn events(&self, query: &EventQuery) -> ApiResult<Vec<Event>>;
    async fn event(&self, id: i64) -> ApiResult<Event>;
    async fn fights(&self, query: &FightQuery) -> ApiResult<Vec<Fight>>;
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(config: &BackendConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("fightcard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let base = base_url(&config.base_url)?;
        Ok(Self { http, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        Ok(self.base.join(path.trim_start_matches('/'))?)
    }

    async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;
        let mut request = self.http.get(url);
        if let Some(query) = query {
            request = request.query(query);
        }

        let response = request.send().await.map_err(|source| ApiError::Transport {
            path: path.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.json::<T>().await.map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })?;
        tracing::debug!("GET {} ok", path);
        Ok(body)
    }

    async fn get_plain<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.get::<T, ()>(path, None).await
    }
}

/// Normalise the configured base so that relative joins keep its path.
pub fn base_url(raw: &str) -> ApiResult<Url> {
    let mut base = Url::parse(raw)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

#[async_trait]
impl CatalogSource for ApiClient {
    async fn fighters(&self, query: &FighterQuery) -> ApiResult<Vec<Fighter>> {
        self.get("fighters", Some(query)).await
    }

    async fn fighter(&self, id: i64) -> ApiResult<FighterDetail> {
        self.get_plain(&format!("fighters/{}", id)).await
    }

    async fn fighter_fights(&self, id: i64, limit: u32) -> ApiResult<Vec<Fight>> {
        self.get(&format!("fighters/{}/fights", id), Some(&[("limit", limit)]))
            .await
    }

    async fn fighter_stats(&self, id: i64) -> ApiResult<FighterStatsSummary> {
        self.get_plain(&format!("fighters/{}/stats", id)).await
    }

    async fn weight_classes(&self) -> ApiResult<Vec<WeightClass>> {
        self.get_plain("weight-classes").await
    }

    async fn all_rankings(&self) -> ApiResult<Vec<Ranking>> {
        self.get_plain("rankings").await
    }

    async fn rankings(&self, class_id: i64) -> ApiResult<Vec<Ranking>> {
        self.get_plain(&format!("rankings/{}", class_id)).await
    }

    async fn champion(&self, class_id: i64) -> ApiResult<Option<Ranking>> {
        self.get_plain(&format!("rankings/{}/champion", class_id))
            .await
    }

    async fn compare(&self, fighter1: i64, fighter2: i64) -> ApiResult<Comparison> {
        self.get_plain(&format!("compare/{}/{}", fighter1, fighter2))
            .await
    }

    async fn upcoming_fights(&self, query: &UpcomingQuery) -> ApiResult<Vec<UpcomingFight>> {
        self.get("upcoming-fights", Some(query)).await
    }

    async fn stats(&self) -> ApiResult<SiteStats> {
        self.get_plain("stats").await
    }

    async fn events(&self, query: &EventQuery) -> ApiResult<Vec<Event>> {
        self.get("events", Some(query)).await
    }

    async fn event(&self, id: i64) -> ApiResult<Event> {
        self.get_plain(&format!("events/{}", id)).await
    }

    async fn fights(&self, query: &FightQuery) -> ApiResult<Vec<Fight>> {
        self.get("fights", Some(query)).await
    }
}
