/// TMDB (The Movie Database) v3 API client
///
/// API Flow:
/// 1. Title search: /search/movie → first hit
/// 2. Details: /movie/{id} and /movie/{id}/watch/providers, fetched together
///    and merged into one record
///
/// Authentication uses the v3 `api_key` query parameter.
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    error::{AppError, AppResult},
    models::{MovieDetails, MovieSearchPage, MovieSummary, WatchProvidersResponse},
    services::movies::MovieDatabase,
};

#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    language: String,
}

impl TmdbClient {
    pub fn new(api_key: Option<String>, api_url: String, language: String) -> Self {
        let api_key = api_key.filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            tracing::warn!("TMDB_API_KEY is not set; movie lookups will fail");
        }

        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            language,
        }
    }

    /// GETs a TMDB path and decodes the body. A 404 is `Ok(None)`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> AppResult<Option<T>> {
        let api_key = self.api_key.as_deref().ok_or(AppError::MissingApiKey("TMDB"))?;
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", api_key), ("language", self.language.as_str())])
            .query(params)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(path = %path, "TMDB resource not found");
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        let value = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                path = %path,
                "Failed to deserialize TMDB response"
            );
            AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e))
        })?;

        Ok(Some(value))
    }

    fn search_params(title: &str, year: Option<i32>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("query", title.to_string()),
            ("include_adult", "false".to_string()),
        ];
        if let Some(year) = year {
            params.push(("year", year.to_string()));
        }
        params
    }
}

#[async_trait::async_trait]
impl MovieDatabase for TmdbClient {
    async fn search_movie(&self, title: &str, year: Option<i32>) -> AppResult<Option<MovieSummary>> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::InvalidInput(
                "El título de la película es requerido".to_string(),
            ));
        }

        let page: Option<MovieSearchPage> = self
            .get_json("/search/movie", &Self::search_params(title, year))
            .await?;
        let movie = page.and_then(|p| p.results.into_iter().next());

        tracing::info!(
            title = %title,
            year = ?year,
            found = movie.is_some(),
            provider = "tmdb",
            "Movie search completed"
        );

        Ok(movie)
    }

    async fn movie_details(&self, id: u64) -> AppResult<Option<MovieDetails>> {
        let details_path = format!("/movie/{}", id);
        let providers_path = format!("/movie/{}/watch/providers", id);

        // Both requests run to completion; either failing fails the lookup
        let (details, providers) = tokio::join!(
            self.get_json::<MovieDetails>(&details_path, &[]),
            self.get_json::<WatchProvidersResponse>(&providers_path, &[]),
        );
        let details = details?;
        let providers = providers?;

        let Some(details) = details else {
            return Ok(None);
        };
        let movie = details.with_watch_providers(providers.unwrap_or_default());

        tracing::info!(
            movie_id = id,
            countries = movie.watch_providers.len(),
            provider = "tmdb",
            "Movie details fetched"
        );

        Ok(Some(movie))
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
