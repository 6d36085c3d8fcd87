use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// All fields except the Gemini API key have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory where uploaded image artifacts are stored and served from.
    pub storage_root: PathBuf,
    /// Extraction service configuration.
    pub gemini: GeminiConfig,
}

/// Configuration for the Gemini extraction service.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API base URL.
    pub api_url: String,
    /// API key. Required.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                    |
    /// |------------------------|--------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                  |
    /// | `PORT`                 | `3000`                                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`                    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                       |
    /// | `STORAGE_ROOT`         | `./data/images`                            |
    /// | `GEMINI_API_URL`       | `https://generativelanguage.googleapis.com`|
    /// | `GEMINI_MODEL`         | `gemini-2.0-flash-001`                     |
    /// | `GEMINI_API_KEY`       | required                                   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let storage_root =
            PathBuf::from(std::env::var("STORAGE_ROOT").unwrap_or_else(|_| "./data/images".into()));

        let gemini = GeminiConfig {
            api_url: std::env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| meterwise_gemini::client::DEFAULT_API_URL.into()),
            api_key: std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set"),
            model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| meterwise_gemini::client::DEFAULT_MODEL.into()),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            storage_root,
            gemini,
        }
    }
}
