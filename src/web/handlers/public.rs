use crate::services::filter::{EventTab, FighterFilter};
use crate::services::format::{self, Breadcrumb};
use crate::services::pages::{self, PageState};
use crate::web::error::AppResult;
use crate::web::labels::labels;
use crate::web::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tera::Context;

/// `path` is the decoded route, used for breadcrumbs and relative links.
fn make_context(state: &AppState, path: &str) -> Context {
    let locale = state.locale();
    let mut ctx = Context::new();
    ctx.insert("site", &state.config.site);
    ctx.insert("locale", &locale);
    ctx.insert("t", &labels(locale));
    ctx.insert("breadcrumbs", &format::breadcrumbs(path, locale));
    ctx.insert("current_path", path);
    ctx
}

/// Link target for "go back" on not-found and error pages.
fn back_link(state: &AppState, section: &str) -> Breadcrumb {
    format::breadcrumbs(section, state.locale())
        .pop()
        .unwrap_or_else(|| Breadcrumb {
            label: String::new(),
            path: "/".to_string(),
        })
}

fn render_page<T: Serialize>(
    state: &AppState,
    mut ctx: Context,
    template: &str,
    page: PageState<T>,
    uri: &Uri,
    section: &str,
) -> AppResult<Response> {
    match page {
        PageState::Found(view) => {
            ctx.insert("page", &view);
            let html = state.templates.render(template, &ctx)?;
            Ok(Html(html).into_response())
        }
        PageState::NotFound => {
            ctx.insert("back", &back_link(state, section));
            let html = state.templates.render("not_found.html", &ctx)?;
            Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
        }
        PageState::LoadError(message) => {
            render_load_error(state, ctx, &message, uri, section, StatusCode::BAD_GATEWAY)
        }
        // Loaders always settle before returning.
        PageState::Loading => render_load_error(
            state,
            ctx,
            "request was superseded",
            uri,
            section,
            StatusCode::SERVICE_UNAVAILABLE,
        ),
    }
}

fn render_load_error(
    state: &AppState,
    mut ctx: Context,
    message: &str,
    uri: &Uri,
    section: &str,
    status: StatusCode,
) -> AppResult<Response> {
    ctx.insert("message", message);
    ctx.insert("retry", &uri.to_string());
    ctx.insert("back", &back_link(state, section));
    let html = state.templates.render("load_error.html", &ctx)?;
    Ok((status, Html(html)).into_response())
}

/// Numeric query values arrive as text so a blank form field is not a 400.
fn parse_id(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse().ok())
}

fn parse_flag(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|s| s.trim().to_ascii_lowercase()).as_deref(),
        Some("true" | "1" | "yes" | "on")
    )
}

#[derive(Deserialize)]
pub struct HomeParams {
    class: Option<String>,
    compare: Option<String>,
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HomeParams>,
    uri: Uri,
) -> AppResult<Response> {
    let page = pages::load_home(
        state.source.as_ref(),
        &state.config,
        parse_id(params.class.as_deref()),
        params.compare.as_deref().unwrap_or_default(),
    )
    .await;

    let ctx = make_context(&state, "/");
    render_page(&state, ctx, "index.html", page, &uri, "/")
}

pub async fn rankings(State(state): State<Arc<AppState>>, uri: Uri) -> AppResult<Response> {
    let page = pages::load_rankings_index(state.source.as_ref(), &state.config).await;
    let ctx = make_context(&state, "/rankings");
    render_page(&state, ctx, "rankings.html", page, &uri, "/")
}

pub async fn weight_class(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    uri: Uri,
) -> AppResult<Response> {
    let page = pages::load_weight_class(state.source.as_ref(), &state.config, &slug).await;

    let ctx = make_context(&state, &format!("/rankings/{}", slug));
    render_page(&state, ctx, "weight_class.html", page, &uri, "/rankings")
}

#[derive(Deserialize)]
pub struct FightersParams {
    search: Option<String>,
    weight_class: Option<String>,
}

pub async fn fighters(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FightersParams>,
    uri: Uri,
) -> AppResult<Response> {
    let filter = FighterFilter {
        search: params.search.filter(|s| !s.trim().is_empty()),
        weight_class: parse_id(params.weight_class.as_deref()),
    };
    let page = pages::load_fighters(state.source.as_ref(), &state.config, &filter).await;

    let ctx = make_context(&state, "/fighters");
    render_page(&state, ctx, "fighters.html", page, &uri, "/")
}

pub async fn fighter(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    uri: Uri,
) -> AppResult<Response> {
    let page = pages::load_fighter(state.source.as_ref(), &state.config, &slug).await;

    let ctx = make_context(&state, &format!("/fighters/{}", slug));
    render_page(&state, ctx, "fighter.html", page, &uri, "/fighters")
}

pub async fn fighter_stats(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    uri: Uri,
) -> AppResult<Response> {
    let page = pages::load_fighter_stats(state.source.as_ref(), &state.config, &slug).await;

    let ctx = make_context(&state, &format!("/fighters/{}/stats", slug));
    render_page(&state, ctx, "fighter_stats.html", page, &uri, "/fighters")
}

#[derive(Deserialize)]
pub struct EventsParams {
    tab: Option<String>,
}

pub async fn events(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EventsParams>,
    uri: Uri,
) -> AppResult<Response> {
    let tab = params
        .tab
        .as_deref()
        .and_then(|t| t.parse::<EventTab>().ok())
        .unwrap_or_default();
    let page = pages::load_events(state.source.as_ref(), &state.config, tab).await;

    let ctx = make_context(&state, "/events");
    render_page(&state, ctx, "events.html", page, &uri, "/")
}

pub async fn event(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    uri: Uri,
) -> AppResult<Response> {
    let page = pages::load_event(state.source.as_ref(), &state.config, &slug).await;

    let ctx = make_context(&state, &format!("/events/{}", slug));
    render_page(&state, ctx, "event.html", page, &uri, "/events")
}

#[derive(Deserialize)]
pub struct UpcomingParams {
    main_event_only: Option<String>,
}

pub async fn upcoming(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UpcomingParams>,
    uri: Uri,
) -> AppResult<Response> {
    let main_event_only = parse_flag(params.main_event_only.as_deref());
    let page = pages::load_upcoming(state.source.as_ref(), &state.config, main_event_only).await;

    let ctx = make_context(&state, "/upcoming");
    render_page(&state, ctx, "upcoming.html", page, &uri, "/")
}

#[derive(Deserialize)]
pub struct CompareParams {
    ids: Option<String>,
}

pub async fn compare(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CompareParams>,
    uri: Uri,
) -> AppResult<Response> {
    let page = pages::load_compare(
        state.source.as_ref(),
        &state.config,
        params.ids.as_deref().unwrap_or_default(),
    )
    .await;

    let ctx = make_context(&state, "/compare");
    render_page(&state, ctx, "compare.html", page, &uri, "/")
}

#[derive(Serialize)]
pub struct Health {
    status: &'static str,
    backend: String,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Health> {
    Json(Health {
        status: "ok",
        backend: state.config.backend.base_url.clone(),
    })
}

pub async fn fallback(State(state): State<Arc<AppState>>, uri: Uri) -> AppResult<Response> {
    let mut ctx = make_context(&state, "/");
    ctx.insert("back", &back_link(&state, "/"));
    tracing::debug!("No route for {}", uri.path());
    let html = state.templates.render("not_found.html", &ctx)?;
    Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
}
