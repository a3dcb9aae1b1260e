/// Base URL used when `API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:4000";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Catalog API base URL, without a trailing slash.
    pub api_url: String,
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional with defaults: `API_URL`, `LOG_LEVEL`
    ///
    /// # Errors
    ///
    /// Returns an error if `API_URL` is not an `http://` or `https://` URL.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let api_url = api_url_or_default(std::env::var("API_URL").ok());
        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self::new(&api_url, log_level)
    }

    /// Build a configuration from an explicit base URL.
    ///
    /// A blank `api_url` falls back to [`DEFAULT_API_URL`].
    ///
    /// # Errors
    ///
    /// Returns an error if `api_url` is not an `http://` or `https://` URL.
    pub fn new(api_url: &str, log_level: impl Into<String>) -> anyhow::Result<Self> {
        let api_url = normalize_api_url(&api_url_or_default(Some(api_url.to_string())))?;
        Ok(Self {
            api_url,
            log_level: log_level.into(),
        })
    }

    /// Resolve a server-relative path (e.g. an uploaded image) against the API base.
    #[must_use]
    pub fn resolve(&self, path: &str) -> String {
        format!("{}{path}", self.api_url)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Raw `API_URL` value, with unset or blank treated as the default.
fn api_url_or_default(raw: Option<String>) -> String {
    raw.filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

fn normalize_api_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');

    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(anyhow::anyhow!(
            "API_URL must start with http:// or https:// (got {raw:?})"
        ));
    }

    Ok(trimmed.to_string())
}
