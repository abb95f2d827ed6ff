/// Cohere `generate` API client
///
/// POST {api_url}/v1/generate with a bearer token; the answer is the first
/// generation's text.
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    services::generation::TextGenerator,
};

const MAX_TOKENS: u32 = 500;
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    generations: Vec<Generation>,
}

#[derive(Debug, Deserialize)]
struct Generation {
    text: String,
}

#[derive(Clone)]
pub struct CohereGenerator {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    model: String,
}

impl CohereGenerator {
    /// A missing key is accepted here and reported on the first request
    pub fn new(api_key: Option<String>, api_url: String, model: String) -> Self {
        let api_key = api_key.filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            tracing::warn!("COHERE_API_KEY is not set; recommendation requests will fail");
        }

        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    fn extract_text(response: GenerateResponse) -> AppResult<String> {
        response
            .generations
            .into_iter()
            .next()
            .map(|g| g.text.trim().to_string())
            .ok_or_else(|| AppError::Generation("Cohere returned no generations".to_string()))
    }
}

#[async_trait::async_trait]
impl TextGenerator for CohereGenerator {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Generation(AppError::MissingApiKey("Cohere").to_string()))?;

        let url = format!("{}/v1/generate", self.api_url);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Generation(format!("Cohere request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Generation(format!(
                "Cohere API returned status {}: {}",
                status, body
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AppError::Generation(format!("Failed to parse Cohere response: {}", e)))?;

        let text = Self::extract_text(parsed)?;

        tracing::info!(
            model = %self.model,
            chars = text.len(),
            provider = "cohere",
            "Generation completed"
        );

        Ok(text)
    }

    fn name(&self) -> &'static str {
        "cohere"
    }
}
