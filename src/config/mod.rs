/// Application configuration module
use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub graphql_api_url: String,
    pub bind_addr: String,
    pub prefs_path: String,
    pub http_timeout_seconds: u64,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let graphql_api_url = env::var("GRAPHQL_API_URL")
            .unwrap_or_else(|_| "https://api.spacex.land/graphql/".to_string());

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let prefs_path =
            env::var("PREFS_PATH").unwrap_or_else(|_| "display_prefs.json".to_string());

        let http_timeout_seconds = env_u64("HTTP_TIMEOUT_SECONDS", 30);

        Ok(Self {
            graphql_api_url,
            bind_addr,
            prefs_path,
            http_timeout_seconds,
        })
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
