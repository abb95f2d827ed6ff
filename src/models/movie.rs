use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Base URL for TMDB images; a size segment and the image path are appended
pub const TMDB_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Size used for posters
pub const POSTER_SIZE: &str = "w500";

/// Size used for provider logos
pub const LOGO_SIZE: &str = "w45";

/// Builds a full image URL from a TMDB image path such as `/abc.jpg`
pub fn image_url(size: &str, path: &str) -> String {
    format!("{}/{}{}", TMDB_IMAGE_BASE_URL, size, path)
}

// ============================================================================
// TMDB search
// ============================================================================

/// Search hit from `/search/movie`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
}

impl MovieSummary {
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|path| image_url(POSTER_SIZE, path))
    }
}

/// Paged response from `/search/movie`
#[derive(Debug, Deserialize)]
pub struct MovieSearchPage {
    #[serde(default)]
    pub results: Vec<MovieSummary>,
}

// ============================================================================
// TMDB details + watch providers
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Movie details from `/movie/{id}`, with watch providers merged in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    /// Keyed by ISO-3166 country code ("ES", "US", ...)
    #[serde(default)]
    pub watch_providers: HashMap<String, CountryProviders>,
}

impl MovieDetails {
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|path| image_url(POSTER_SIZE, path))
    }

    /// Attaches the provider listing returned by `/movie/{id}/watch/providers`
    pub fn with_watch_providers(mut self, providers: WatchProvidersResponse) -> Self {
        self.watch_providers = providers.results;
        self
    }

    /// Providers for one country, if the title is offered there
    pub fn providers_in(&self, country: &str) -> Option<&CountryProviders> {
        self.watch_providers.get(country)
    }
}

/// Response from `/movie/{id}/watch/providers`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchProvidersResponse {
    #[serde(default)]
    pub results: HashMap<String, CountryProviders>,
}

/// Streaming, rental and purchase options in one country
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryProviders {
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flatrate: Vec<WatchProvider>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rent: Vec<WatchProvider>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buy: Vec<WatchProvider>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub free: Vec<WatchProvider>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ads: Vec<WatchProvider>,
}

/// A streaming, rental or purchase source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchProvider {
    pub provider_id: u64,
    pub provider_name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
    #[serde(default)]
    pub display_priority: Option<u32>,
}

impl WatchProvider {
    pub fn logo_url(&self) -> Option<String> {
        self.logo_path.as_deref().map(|path| image_url(LOGO_SIZE, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_page_deserialization() {
        let json = r#"{
            "page": 1,
            "results": [{
                "id": 27205,
                "title": "Origen",
                "original_title": "Inception",
                "overview": "Dom Cobb es un ladrón...",
                "poster_path": "/poster.jpg",
                "release_date": "2010-07-15",
                "vote_average": 8.4,
                "vote_count": 35000,
                "genre_ids": [28, 878]
            }],
            "total_results": 1
        }"#;

        let page: MovieSearchPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.results.len(), 1);
        let movie = &page.results[0];
        assert_eq!(movie.id, 27205);
        assert_eq!(movie.original_title.as_deref(), Some("Inception"));
        assert_eq!(movie.genre_ids, vec![28, 878]);
        assert_eq!(
            movie.poster_url().as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster.jpg")
        );
    }

    #[test]
    fn test_details_tolerate_null_fields() {
        let json = r#"{
            "id": 1,
            "title": "Sin póster",
            "poster_path": null,
            "runtime": null,
            "genres": []
        }"#;

        let details: MovieDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.poster_url(), None);
        assert_eq!(details.runtime, None);
        assert!(details.watch_providers.is_empty());
    }

    #[test]
    fn test_merge_watch_providers() {
        let details: MovieDetails =
            serde_json::from_str(r#"{"id": 27205, "title": "Origen", "runtime": 148}"#).unwrap();
        let providers: WatchProvidersResponse = serde_json::from_str(
            r#"{
                "id": 27205,
                "results": {
                    "ES": {
                        "link": "https://www.themoviedb.org/movie/27205/watch?locale=ES",
                        "flatrate": [
                            {"provider_id": 8, "provider_name": "Netflix", "logo_path": "/netflix.jpg", "display_priority": 0}
                        ],
                        "rent": [
                            {"provider_id": 2, "provider_name": "Apple TV", "logo_path": "/apple.jpg", "display_priority": 4}
                        ]
                    }
                }
            }"#,
        )
        .unwrap();

        let merged = details.with_watch_providers(providers);
        let spain = merged.providers_in("ES").unwrap();
        assert_eq!(spain.flatrate[0].provider_name, "Netflix");
        assert_eq!(spain.rent[0].provider_id, 2);
        assert!(spain.buy.is_empty());
        assert_eq!(
            spain.flatrate[0].logo_url().as_deref(),
            Some("https://image.tmdb.org/t/p/w45/netflix.jpg")
        );
        assert!(merged.providers_in("US").is_none());

        let value = serde_json::to_value(&merged).unwrap();
        assert_eq!(value["watch_providers"]["ES"]["flatrate"][0]["provider_name"], "Netflix");
        assert_eq!(value["runtime"], 148);
    }
}
