use crate::{
    db::Storage,
    error::{AppError, AppResult},
    models::{NewRecommendation, Recommendation, RecommendationItem},
    services::{
        generation::TextGenerator, movies::MovieDatabase, parser::parse_recommendations,
        prompt::build_prompt,
    },
};

pub const QUERY_REQUIRED_MESSAGE: &str = "La consulta del usuario es requerida";
pub const TEXT_REQUIRED_MESSAGE: &str = "El texto de las recomendaciones es requerido";

/// Asks the text generator for recommendations matching the user's query
/// and stores the exchange.
///
/// Blank queries are rejected before anything is sent upstream. Nothing is
/// stored unless generation succeeds.
pub async fn create_recommendation(
    generator: &dyn TextGenerator,
    storage: &dyn Storage,
    user_query: &str,
) -> AppResult<String> {
    let user_query = user_query.trim();
    if user_query.is_empty() {
        return Err(AppError::InvalidInput(QUERY_REQUIRED_MESSAGE.to_string()));
    }

    let prompt = build_prompt(user_query);
    let ai_response = generator.generate(&prompt).await?;

    let stored = storage
        .create_recommendation(NewRecommendation {
            user_query: user_query.to_string(),
            ai_response,
        })
        .await?;

    tracing::info!(
        recommendation_id = stored.id,
        generator = generator.name(),
        storage = storage.name(),
        "Recommendation stored"
    );

    Ok(stored.ai_response)
}

/// Most recent stored recommendations, newest first
pub async fn recent_recommendations(
    storage: &dyn Storage,
    limit: usize,
) -> AppResult<Vec<Recommendation>> {
    storage.get_recent_recommendations(limit).await
}

/// Parses AI text into display records, optionally matching each title
/// against the movie database.
///
/// Lookups run one at a time in list order. A title without a match gets a
/// `null` movie; a failed lookup fails the whole call.
pub async fn parse_recommendation_text(
    movies: &dyn MovieDatabase,
    text: &str,
    enrich: bool,
) -> AppResult<Vec<RecommendationItem>> {
    if text.trim().is_empty() {
        return Err(AppError::InvalidInput(TEXT_REQUIRED_MESSAGE.to_string()));
    }

    let mut items: Vec<RecommendationItem> = parse_recommendations(text)
        .into_iter()
        .map(RecommendationItem::from)
        .collect();

    if enrich {
        for item in items.iter_mut() {
            let year = item.parsed.year.as_deref().and_then(|y| y.parse().ok());
            let movie = movies.search_movie(&item.parsed.title, year).await?;
            item.movie = Some(movie);
        }

        tracing::debug!(
            count = items.len(),
            provider = movies.name(),
            "Recommendations enriched"
        );
    }

    Ok(items)
}
