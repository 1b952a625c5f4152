use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::Recommendation,
    services::{session::Session, CatalogSnapshot},
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub user_id: i64,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    #[serde(flatten)]
    pub recommendation: Recommendation,
    /// Photo to send as media, only for `http` links
    pub photo_link: Option<String>,
    /// Menu hyperlink, only for `http` links
    pub menu_link: Option<String>,
}

impl From<Recommendation> for RecommendationResponse {
    fn from(recommendation: Recommendation) -> Self {
        Self {
            photo_link: recommendation.photo_link().map(str::to_string),
            menu_link: recommendation.menu_link().map(str::to_string),
            recommendation,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub venues: usize,
    pub loaded_at: DateTime<Utc>,
}

impl From<&CatalogSnapshot> for CatalogResponse {
    fn from(snapshot: &CatalogSnapshot) -> Self {
        Self {
            venues: snapshot.len(),
            loaded_at: snapshot.loaded_at(),
        }
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Opens a session for a user (first contact)
pub async fn start_session(
    State(state): State<AppState>,
    Json(request): Json<StartSessionRequest>,
) -> (StatusCode, Json<Session>) {
    let session = state.sessions.start(request.user_id).await;
    (StatusCode::CREATED, Json(session))
}

/// Drops a user's session if one is open
pub async fn end_session(State(state): State<AppState>, Path(user_id): Path<i64>) -> StatusCode {
    state.sessions.finish(user_id).await;
    StatusCode::NO_CONTENT
}

/// Recommends one venue for the user's request and closes their session
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err(AppError::InvalidInput(
            "Request text cannot be empty".to_string(),
        ));
    }

    if !state.sessions.is_active(request.user_id).await {
        return Err(AppError::NoSession(request.user_id));
    }

    tracing::info!(
        request_id = %request_id,
        user_id = request.user_id,
        "Processing recommendation request"
    );

    let recommendation = state.engine.recommend(text).await;
    state.sessions.finish(request.user_id).await;

    match recommendation {
        Some(recommendation) => {
            tracing::info!(
                request_id = %request_id,
                venue = %recommendation.name,
                "Recommendation ready"
            );
            Ok(Json(recommendation.into()))
        }
        None => {
            tracing::warn!(request_id = %request_id, "No venue available for request");
            Err(AppError::NotFound(
                "No venues available right now, please try again later".to_string(),
            ))
        }
    }
}

/// Summary of the catalog currently in use
pub async fn get_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    let snapshot = state.catalog().snapshot().await;
    Json(CatalogResponse::from(snapshot.as_ref()))
}

/// Pulls the catalog source again and swaps in the new snapshot
pub async fn reload_catalog(State(state): State<AppState>) -> AppResult<Json<CatalogResponse>> {
    state.catalog().reload(state.catalog_source.as_ref()).await?;
    let snapshot = state.catalog().snapshot().await;
    Ok(Json(CatalogResponse::from(snapshot.as_ref())))
}
