/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
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
    /// Directory of `<locale>.json` message bundles.
    pub messages_dir: String,
    /// Base URL of the translation backend; `None` disables translation jobs.
    pub translator_url: Option<String>,
    /// Translation request timeout in seconds (default: `1800`).
    ///
    /// Translation jobs run against a chat-completion backend and routinely
    /// take minutes, hence the generous default.
    pub translator_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                    |
    /// |---------------------------|----------------------------|
    /// | `HOST`                    | `0.0.0.0`                  |
    /// | `PORT`                    | `3000`                     |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                       |
    /// | `MESSAGES_DIR`            | `messages`                 |
    /// | `TRANSLATOR_URL`          | unset                      |
    /// | `TRANSLATOR_TIMEOUT_SECS` | `1800`                     |
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

        let messages_dir = std::env::var("MESSAGES_DIR").unwrap_or_else(|_| "messages".into());

        let translator_url = std::env::var("TRANSLATOR_URL").ok().filter(|s| !s.is_empty());

        let translator_timeout_secs: u64 = std::env::var("TRANSLATOR_TIMEOUT_SECS")
            .unwrap_or_else(|_| "1800".into())
            .parse()
            .expect("TRANSLATOR_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            messages_dir,
            translator_url,
            translator_timeout_secs,
        }
    }
}
