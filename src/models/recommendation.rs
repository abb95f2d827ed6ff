use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::MovieSummary;

/// A stored user query together with the raw AI answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: i32,
    pub user_query: String,
    pub ai_response: String,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when storing a recommendation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecommendation {
    pub user_query: String,
    pub ai_response: String,
}

/// Whether a parsed recommendation is a film or a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Series,
}

/// One entry extracted from the numbered list in an AI answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedRecommendation {
    pub title: String,
    pub year: Option<String>,
    pub genre: String,
    pub description: String,
}

impl ParsedRecommendation {
    /// Series are recognised by the genre text ("Serie", "Series", "Miniserie", ...)
    pub fn media_type(&self) -> MediaType {
        if self.genre.to_lowercase().contains("serie") {
            MediaType::Series
        } else {
            MediaType::Movie
        }
    }
}

impl Display for ParsedRecommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "**{}**", self.title)?;
        if let Some(year) = &self.year {
            write!(f, " ({})", year)?;
        }
        writeln!(f, " - {}", self.genre)?;
        if !self.description.is_empty() {
            write!(f, "{}", self.description)?;
        }
        Ok(())
    }
}

/// A parsed recommendation as returned to the client, optionally matched
/// against the movie database
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationItem {
    #[serde(flatten)]
    pub parsed: ParsedRecommendation,
    pub media_type: MediaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie: Option<Option<MovieSummary>>,
}

impl From<ParsedRecommendation> for RecommendationItem {
    fn from(parsed: ParsedRecommendation) -> Self {
        Self {
            media_type: parsed.media_type(),
            parsed,
            movie: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(genre: &str, year: Option<&str>, description: &str) -> ParsedRecommendation {
        ParsedRecommendation {
            title: "Dark".to_string(),
            year: year.map(str::to_string),
            genre: genre.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_media_type_from_genre() {
        assert_eq!(parsed("Serie de ciencia ficción", None, "").media_type(), MediaType::Series);
        assert_eq!(parsed("Miniserie", None, "").media_type(), MediaType::Series);
        assert_eq!(parsed("Thriller", None, "").media_type(), MediaType::Movie);
    }

    #[test]
    fn test_display_with_year_and_description() {
        let rec = parsed("Thriller", Some("2017"), "Viajes en el tiempo.");
        assert_eq!(rec.to_string(), "**Dark** (2017) - Thriller\nViajes en el tiempo.");
    }

    #[test]
    fn test_display_without_year() {
        let rec = parsed("Thriller", None, "");
        assert_eq!(rec.to_string(), "**Dark** - Thriller\n");
    }

    #[test]
    fn test_recommendation_serializes_camel_case() {
        let rec = Recommendation {
            id: 1,
            user_query: "algo triste".to_string(),
            ai_response: "1. Up (2009) - Animación".to_string(),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value["userQuery"], "algo triste");
        assert_eq!(value["aiResponse"], "1. Up (2009) - Animación");
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn test_item_omits_movie_when_not_enriched() {
        let item = RecommendationItem::from(parsed("Serie", Some("2017"), "x"));
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["title"], "Dark");
        assert_eq!(value["mediaType"], "series");
        assert!(value.get("movie").is_none());
    }

    #[test]
    fn test_item_serializes_null_movie_when_enriched_without_match() {
        let mut item = RecommendationItem::from(parsed("Drama", None, ""));
        item.movie = Some(None);
        let value = serde_json::to_value(&item).unwrap();
        assert!(value["movie"].is_null());
        assert!(value.get("movie").is_some());
    }
}
