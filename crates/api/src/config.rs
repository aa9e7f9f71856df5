//! Server and generator configuration loaded from environment variables.

use std::time::Duration;

use atelier_openai::RetryPolicy;

/// HTTP server configuration.
///
/// All fields have defaults suitable for local development; override via
/// environment variables in production.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `90`). Must leave room
    /// for a full generation run, which is dominated by the synthesis
    /// deadline.
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `3000`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | `90`                    |
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
            .unwrap_or_else(|_| "90".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
        }
    }
}

/// Image provider and content store configuration.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Provider API key.
    pub openai_api_key: String,
    /// Provider API root (default: the public endpoint).
    pub openai_base_url: String,
    /// Generation model name.
    pub openai_model: String,
    /// Hard deadline per synthesis attempt, in seconds.
    pub synthesis_deadline_secs: u64,
    /// Total synthesis attempts, including the first.
    pub synthesis_attempts: u32,
    /// Linear backoff base between attempts, in seconds.
    pub synthesis_backoff_secs: u64,
    /// Timeout for fetching a URL-shaped result, in seconds.
    pub fetch_timeout_secs: u64,
    /// Content store endpoint.
    pub blob_base_url: String,
    /// Content store access token.
    pub blob_token: String,
    /// Timeout per upload request, in seconds.
    pub upload_timeout_secs: u64,
    /// Bounded attempts per upload, each with a fresh key.
    pub upload_attempts: u32,
}

impl GeneratorConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                   | Default                             |
    /// |---------------------------|-------------------------------------|
    /// | `OPENAI_API_KEY`          | *(required)*                        |
    /// | `OPENAI_BASE_URL`         | `https://api.openai.com/v1`         |
    /// | `OPENAI_IMAGE_MODEL`      | `gpt-image-1`                       |
    /// | `SYNTHESIS_DEADLINE_SECS` | `45`                                |
    /// | `SYNTHESIS_ATTEMPTS`      | `2`                                 |
    /// | `SYNTHESIS_BACKOFF_SECS`  | `2`                                 |
    /// | `FETCH_TIMEOUT_SECS`      | `20`                                |
    /// | `BLOB_STORE_URL`          | `https://blob.vercel-storage.com`   |
    /// | `BLOB_READ_WRITE_TOKEN`   | *(required)*                        |
    /// | `UPLOAD_TIMEOUT_SECS`     | `30`                                |
    /// | `UPLOAD_ATTEMPTS`         | `3`                                 |
    pub fn from_env() -> Self {
        Self {
            openai_api_key: std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set"),
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| atelier_openai::client::DEFAULT_BASE_URL.into()),
            openai_model: std::env::var("OPENAI_IMAGE_MODEL")
                .unwrap_or_else(|_| atelier_openai::client::DEFAULT_MODEL.into()),
            synthesis_deadline_secs: env_u64("SYNTHESIS_DEADLINE_SECS", 45),
            synthesis_attempts: env_u64("SYNTHESIS_ATTEMPTS", 2) as u32,
            synthesis_backoff_secs: env_u64("SYNTHESIS_BACKOFF_SECS", 2),
            fetch_timeout_secs: env_u64("FETCH_TIMEOUT_SECS", 20),
            blob_base_url: std::env::var("BLOB_STORE_URL")
                .unwrap_or_else(|_| "https://blob.vercel-storage.com".into()),
            blob_token: std::env::var("BLOB_READ_WRITE_TOKEN")
                .expect("BLOB_READ_WRITE_TOKEN must be set"),
            upload_timeout_secs: env_u64("UPLOAD_TIMEOUT_SECS", 30),
            upload_attempts: env_u64("UPLOAD_ATTEMPTS", 3) as u32,
        }
    }

    /// The synthesis retry policy described by this configuration.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.synthesis_attempts,
            backoff_base: Duration::from_secs(self.synthesis_backoff_secs),
            request_deadline: Duration::from_secs(self.synthesis_deadline_secs),
            fetch_timeout: Duration::from_secs(self.fetch_timeout_secs),
        }
    }
}

/// Read a u64 env var with a default; panics at startup on garbage, which
/// is the desired fail-fast for misconfiguration.
fn env_u64(name: &str, default: u64) -> u64 {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .unwrap_or_else(|_| panic!("{name} must be a valid u64")),
        Err(_) => default,
    }
}
