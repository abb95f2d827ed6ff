/// Movie metadata lookups (posters, ratings, watch providers)
use crate::{
    error::AppResult,
    models::{MovieDetails, MovieSummary},
};

pub mod tmdb;

pub use tmdb::TmdbClient;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieDatabase: Send + Sync {
    /// First search hit for a title, if any
    ///
    /// `year` narrows the search when the release year is known.
    async fn search_movie(&self, title: &str, year: Option<i32>) -> AppResult<Option<MovieSummary>>;

    /// Full details with watch providers merged in; `None` for an unknown id
    async fn movie_details(&self, id: u64) -> AppResult<Option<MovieDetails>>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}
