//! HTTP client for the catalog backend.
//!
//! Three endpoints, no retries, no caching:
//! - `GET  /api/health` — connectivity probe
//! - `GET  /api/games`  — full game list
//! - `POST /api/games`  — multipart create

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value as JsonValue;

use crate::config::Config;
use crate::dto::{Game, NewGame};
use crate::error::{CREATE_FAILED, ClientError};

/// Operations the catalog view needs from a backend.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Probe the backend health endpoint.
    async fn check_health(&self) -> Result<JsonValue, ClientError>;

    /// Fetch every game in the catalog.
    async fn list_games(&self) -> Result<Vec<Game>, ClientError>;

    /// Create a game and return the server's copy of it.
    async fn create_game(&self, game: NewGame) -> Result<Game, ClientError>;
}

/// `reqwest`-backed catalog client bound to one base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Config,
}

impl ApiClient {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        self.config.resolve(path)
    }
}

#[async_trait]
impl CatalogApi for ApiClient {
    async fn check_health(&self) -> Result<JsonValue, ClientError> {
        let url = self.url("/api/health");
        tracing::debug!(%url, "Checking backend health");

        let resp = self.http.get(&url).send().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "Health check transport failure");
            ClientError::Connectivity(e.to_string())
        })?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "Health check failed");
            return Err(ClientError::Connectivity(format!("status {status}")));
        }

        resp.json::<JsonValue>()
            .await
            .map_err(|e| ClientError::Connectivity(format!("invalid health response: {e}")))
    }

    async fn list_games(&self) -> Result<Vec<Game>, ClientError> {
        let url = self.url("/api/games");
        tracing::debug!(%url, "Fetching games");

        let resp = self.http.get(&url).send().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "Game list transport failure");
            ClientError::Fetch(e.to_string())
        })?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "Game list request failed");
            return Err(ClientError::Fetch(format!("status {status}")));
        }

        let games = resp
            .json::<Vec<Game>>()
            .await
            .map_err(|e| ClientError::Fetch(format!("invalid game list: {e}")))?;

        tracing::debug!(count = games.len(), "Games fetched");
        Ok(games)
    }

    async fn create_game(&self, game: NewGame) -> Result<Game, ClientError> {
        let url = self.url("/api/games");
        tracing::debug!(%url, name = %game.name, "Creating game");

        let form = multipart_form(game)?;

        let resp = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(%url, error = %e, "Create game transport failure");
                ClientError::Create(CREATE_FAILED.to_string())
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(%url, status = status.as_u16(), %body, "Create game failed");
            let message = if body.is_empty() {
                CREATE_FAILED.to_string()
            } else {
                body
            };
            return Err(ClientError::Create(message));
        }

        let created = resp.json::<Game>().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "Create game returned an invalid body");
            ClientError::Create(CREATE_FAILED.to_string())
        })?;

        tracing::info!(id = created.id, name = %created.name, "Game created");
        Ok(created)
    }
}

/// Encode a new game as the multipart body the backend expects.
fn multipart_form(game: NewGame) -> Result<Form, ClientError> {
    let mut form = Form::new()
        .text("name", game.name)
        .text("description", game.description);

    if let Some(image) = game.image {
        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)
            .map_err(|e| ClientError::Create(format!("invalid image content type: {e}")))?;
        form = form.part("image", part);
    }

    if let Some(urls) = game.video_urls {
        let encoded = serde_json::to_string(&urls)
            .map_err(|e| ClientError::Create(format!("could not encode video URLs: {e}")))?;
        form = form.text("videoUrls", encoded);
    }

    Ok(form)
}
