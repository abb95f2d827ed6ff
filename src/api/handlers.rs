use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{MovieDetails, MovieSummary, Recommendation, RecommendationItem},
    services::recommendations::{self, QUERY_REQUIRED_MESSAGE, TEXT_REQUIRED_MESSAGE},
};

use super::AppState;

/// Upper bound for `?limit=` on the recent listing
const MAX_RECENT_LIMIT: usize = 50;

const INVALID_LIMIT_MESSAGE: &str = "El límite debe ser un número entero positivo";

// Request/Response types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecommendationRequest {
    /// Kept untyped so a non-string query is a 400 like a missing one
    #[serde(default)]
    pub user_query: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct CreateRecommendationResponse {
    pub recommendation: String,
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecentRecommendationsResponse {
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub enrich: bool,
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub recommendations: Vec<RecommendationItem>,
}

#[derive(Debug, Serialize)]
pub struct MovieSearchResponse {
    pub movie: Option<MovieSummary>,
}

#[derive(Debug, Serialize)]
pub struct MovieDetailsResponse {
    pub movie: Option<MovieDetails>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Generate recommendations for a free-text description
pub async fn create_recommendation(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<CreateRecommendationRequest>, JsonRejection>,
) -> AppResult<Json<CreateRecommendationResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(request_id = %request_id, error = %rejection, "Unreadable recommendation body");
        AppError::InvalidInput(QUERY_REQUIRED_MESSAGE.to_string())
    })?;

    let user_query = request
        .user_query
        .as_ref()
        .and_then(Value::as_str)
        .unwrap_or_default();

    tracing::info!(
        request_id = %request_id,
        query_len = user_query.len(),
        "Processing recommendation request"
    );

    let recommendation = recommendations::create_recommendation(
        state.generator.as_ref(),
        state.storage.as_ref(),
        user_query,
    )
    .await?;

    tracing::info!(request_id = %request_id, "Recommendation completed");

    Ok(Json(CreateRecommendationResponse { recommendation }))
}

/// Most recent recommendations, newest first
pub async fn recent_recommendations(
    State(state): State<AppState>,
    params: Result<Query<RecentQuery>, QueryRejection>,
) -> AppResult<Json<RecentRecommendationsResponse>> {
    let Query(params) = params.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable recent recommendations query");
        AppError::InvalidInput(INVALID_LIMIT_MESSAGE.to_string())
    })?;

    let limit = params
        .limit
        .unwrap_or(state.recent_limit)
        .clamp(1, MAX_RECENT_LIMIT);

    let recommendations =
        recommendations::recent_recommendations(state.storage.as_ref(), limit).await?;

    Ok(Json(RecentRecommendationsResponse { recommendations }))
}

/// Parse AI text into structured records, optionally matched against TMDB
pub async fn parse_recommendations(
    State(state): State<AppState>,
    payload: Result<Json<ParseRequest>, JsonRejection>,
) -> AppResult<Json<ParseResponse>> {
    let Json(request) =
        payload.map_err(|_| AppError::InvalidInput(TEXT_REQUIRED_MESSAGE.to_string()))?;

    let recommendations = recommendations::parse_recommendation_text(
        state.movies.as_ref(),
        &request.text,
        request.enrich,
    )
    .await?;

    Ok(Json(ParseResponse { recommendations }))
}

/// First movie matching a title
pub async fn search_movie(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> AppResult<Json<MovieSearchResponse>> {
    let movie = state.movies.search_movie(&title, None).await?;
    Ok(Json(MovieSearchResponse { movie }))
}

/// Movie details with watch providers
pub async fn movie_details(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<MovieDetailsResponse>> {
    let movie = state.movies.movie_details(id).await?;
    Ok(Json(MovieDetailsResponse { movie }))
}
