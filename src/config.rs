use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// PostgreSQL connection URL. Recommendations are kept in memory when unset.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Cohere API key
    #[serde(default)]
    pub cohere_api_key: Option<String>,

    /// Legacy name for the Cohere API key, used when `COHERE_API_KEY` is unset
    #[serde(default)]
    pub cohere_api_key_env_var: Option<String>,

    /// Cohere API base URL
    #[serde(default = "default_cohere_api_url")]
    pub cohere_api_url: String,

    /// Cohere generation model
    #[serde(default = "default_cohere_model")]
    pub cohere_model: String,

    /// TMDB (v3) API key
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Language for TMDB titles and overviews
    #[serde(default = "default_tmdb_language")]
    pub tmdb_language: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of records returned by the recent recommendations endpoint
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

fn default_cohere_api_url() -> String {
    "https://api.cohere.ai".to_string()
}

fn default_cohere_model() -> String {
    "command".to_string()
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_language() -> String {
    "es-ES".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_recent_limit() -> usize {
    5
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Cohere API key, preferring `COHERE_API_KEY` over the legacy name
    pub fn cohere_api_key(&self) -> Option<String> {
        self.cohere_api_key
            .clone()
            .or_else(|| self.cohere_api_key_env_var.clone())
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
