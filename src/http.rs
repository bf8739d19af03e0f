//! HTTP surface for the admin operations.
//!
//! A thin axum router over [`PageService`]; all behavior lives in the
//! service and below. Responses are JSON, errors map to status codes in
//! [`crate::error`].

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::error::Result;
use crate::i18n::Language;
use crate::page::PageDraft;
use crate::service::PageService;

#[derive(Clone)]
pub struct AppState {
    service: Arc<PageService>,
}

pub fn router(service: Arc<PageService>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/pages", get(list_pages).post(create_page))
        .route("/pages/new", get(new_page_form))
        .route("/pages/:id/edit", get(edit_page_form))
        .route("/pages/:id", put(update_page).delete(delete_page))
        .route("/pages/:id/content", get(page_content))
        .route("/pages/:id/publish", post(publish_page))
        .route("/pages/:id/unpublish", post(unpublish_page))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { service })
}

#[derive(Debug, Deserialize)]
struct TemplateQuery {
    template: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LangQuery {
    lang: Option<String>,
}

/// An unknown `?lang=` code falls back to the default language rather than
/// failing; language lookups on the read path never error.
fn pick_language(query: LangQuery) -> Option<Language> {
    query.lang.as_deref().and_then(Language::from_code)
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn list_pages(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
) -> Result<impl IntoResponse> {
    let list = state.service.list_pages(pick_language(query))?;
    Ok(Json(list))
}

async fn new_page_form(
    State(state): State<AppState>,
    Query(query): Query<TemplateQuery>,
) -> Result<impl IntoResponse> {
    let form = state.service.show_create_form(query.template.as_deref())?;
    Ok(Json(form))
}

async fn create_page(
    State(state): State<AppState>,
    Json(draft): Json<PageDraft>,
) -> Result<impl IntoResponse> {
    let page = state.service.submit_create(draft)?;
    Ok((StatusCode::CREATED, Json(page)))
}

async fn edit_page_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<TemplateQuery>,
) -> Result<impl IntoResponse> {
    let form = state
        .service
        .show_edit_form(id, query.template.as_deref())?;
    Ok(Json(form))
}

async fn update_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<PageDraft>,
) -> Result<impl IntoResponse> {
    let page = state.service.submit_update(id, draft)?;
    Ok(Json(page))
}

async fn page_content(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<LangQuery>,
) -> Result<impl IntoResponse> {
    let markup = state.service.render_content(id, pick_language(query))?;
    Ok(markup)
}

async fn publish_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let page = state.service.publish(id)?;
    Ok(Json(page))
}

async fn unpublish_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let page = state.service.unpublish(id)?;
    Ok(Json(page))
}

async fn delete_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.service.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
