mod movie;
mod recommendation;
mod user;

pub use movie::{
    image_url, CountryProviders, Genre, MovieDetails, MovieSearchPage, MovieSummary,
    WatchProvider, WatchProvidersResponse, LOGO_SIZE, POSTER_SIZE, TMDB_IMAGE_BASE_URL,
};
pub use recommendation::{
    MediaType, NewRecommendation, ParsedRecommendation, Recommendation, RecommendationItem,
};
pub use user::{NewUser, User};
