//! In-process mock of the catalog backend.
//!
//! Serves `/api/health` and `/api/games` on `127.0.0.1:0` and records every
//! create request (multipart fields and the uploaded image) for assertions.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tokio::sync::Mutex;

use games_catalog::api::ApiClient;
use games_catalog::config::Config;
use games_catalog::dto::Game;

/// How the mock backend responds.
#[derive(Debug, Clone)]
pub struct Behavior {
    pub healthy: bool,
    pub list_fails: bool,
    /// Status and body returned for every create instead of succeeding
    pub create_failure: Option<(StatusCode, String)>,
    /// Games served by `GET /api/games`
    pub games: Vec<Game>,
    /// Id assigned to the next created game
    pub next_id: i64,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            healthy: true,
            list_fails: false,
            create_failure: None,
            games: Vec::new(),
            next_id: 1,
        }
    }
}

/// An uploaded image as the server received it.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// One recorded `POST /api/games`.
#[derive(Debug, Clone, Default)]
pub struct CreateRequest {
    pub fields: HashMap<String, String>,
    pub image: Option<Upload>,
}

#[derive(Clone)]
struct MockState {
    behavior: Arc<Mutex<Behavior>>,
    creates: Arc<Mutex<Vec<CreateRequest>>>,
    health_hits: Arc<AtomicUsize>,
}

/// Handle to a running mock backend.
pub struct MockServer {
    pub base_url: String,
    state: MockState,
}

impl MockServer {
    /// A client configured for this server.
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.config())
    }

    pub fn config(&self) -> Config {
        Config::new(&self.base_url, "debug").expect("mock url is valid")
    }

    pub async fn creates(&self) -> Vec<CreateRequest> {
        self.state.creates.lock().await.clone()
    }

    pub fn health_hits(&self) -> usize {
        self.state.health_hits.load(Ordering::SeqCst)
    }

    pub async fn set_behavior(&self, behavior: Behavior) {
        *self.state.behavior.lock().await = behavior;
    }
}

/// Start a mock backend on an ephemeral port.
pub async fn spawn(behavior: Behavior) -> MockServer {
    let state = MockState {
        behavior: Arc::new(Mutex::new(behavior)),
        creates: Arc::new(Mutex::new(Vec::new())),
        health_hits: Arc::new(AtomicUsize::new(0)),
    };

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/games", get(list_games).post(create_game))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("mock server address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    MockServer {
        base_url: format!("http://{addr}"),
        state,
    }
}

/// A base URL nothing is listening on.
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe port");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}")
}

pub fn game(id: i64, name: &str) -> Game {
    Game {
        id,
        name: name.to_string(),
        description: None,
        image_url: None,
        video_urls: None,
    }
}

async fn health(State(state): State<MockState>) -> Response {
    state.health_hits.fetch_add(1, Ordering::SeqCst);

    if state.behavior.lock().await.healthy {
        (StatusCode::OK, Json(serde_json::json!({ "status": "ok" }))).into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "down").into_response()
    }
}

async fn list_games(State(state): State<MockState>) -> Response {
    let behavior = state.behavior.lock().await;

    if behavior.list_fails {
        (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()
    } else {
        Json(behavior.games.clone()).into_response()
    }
}

async fn create_game(State(state): State<MockState>, mut multipart: Multipart) -> Response {
    let mut request = CreateRequest::default();

    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        let name = field.name().unwrap_or_default().to_string();

        if name == "image" {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field.bytes().await.expect("image bytes").to_vec();
            request.image = Some(Upload {
                file_name,
                content_type,
                bytes,
            });
        } else {
            let value = field.text().await.expect("text field");
            request.fields.insert(name, value);
        }
    }

    state.creates.lock().await.push(request.clone());

    let mut behavior = state.behavior.lock().await;
    if let Some((status, body)) = behavior.create_failure.clone() {
        return (status, body).into_response();
    }

    let id = behavior.next_id;
    behavior.next_id += 1;

    let description = request
        .fields
        .get("description")
        .filter(|d| !d.is_empty())
        .cloned();
    let video_urls = request
        .fields
        .get("videoUrls")
        .map(|raw| serde_json::from_str::<Vec<String>>(raw).expect("videoUrls is a JSON array"));
    let image_url = request
        .image
        .as_ref()
        .map(|img| format!("/uploads/{}", img.file_name));

    let created = Game {
        id,
        name: request.fields.get("name").cloned().unwrap_or_default(),
        description,
        image_url,
        video_urls,
    };
    behavior.games.insert(0, created.clone());

    (StatusCode::CREATED, Json(created)).into_response()
}
