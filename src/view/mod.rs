//! Catalog view state and its synchronization with the API.
//!
//! Each asynchronous operation is split into `begin_*`, which records a ticket,
//! and `finish_*`, which applies a result only while its ticket is current.
//! `load`, `submit` and `check_connection` run both halves around the API call.

pub mod draft;
mod render;
pub mod status;

use crate::api::CatalogApi;
use crate::config::Config;
use crate::dto::{Game, NewGame};
use crate::error::{ClientError, SubmitError};
use crate::preview::PreviewRegistry;

pub use draft::{Draft, NAME_REQUIRED};
pub use status::{BANNER_LIFETIME, ConnectionStatus, StatusBanner};

/// Game list lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    LoadFailed(String),
}

/// Generation token for a list load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Draft revision a submission was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitTicket(u64);

/// Token for the single in-flight connection check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckTicket(u64);

/// All client-side state for the games catalog screen.
#[derive(Debug)]
pub struct CatalogView<A> {
    api: A,
    config: Config,
    games: Vec<Game>,
    load_state: LoadState,
    load_generation: u64,
    draft: Draft,
    previews: PreviewRegistry,
    banner: StatusBanner,
    checking: Option<u64>,
    check_generation: u64,
}

impl<A: CatalogApi> CatalogView<A> {
    #[must_use]
    pub fn new(api: A, config: Config) -> Self {
        let previews = PreviewRegistry::new();
        Self {
            api,
            config,
            games: Vec::new(),
            load_state: LoadState::Idle,
            load_generation: 0,
            draft: Draft::new(previews.clone()),
            previews,
            banner: StatusBanner::new(),
            checking: None,
            check_generation: 0,
        }
    }

    // ============ Accessors ============

    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    #[must_use]
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    #[must_use]
    pub const fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.load_state, LoadState::Loading)
    }

    #[must_use]
    pub const fn draft(&self) -> &Draft {
        &self.draft
    }

    pub const fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    #[must_use]
    pub const fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }

    #[must_use]
    pub const fn is_checking(&self) -> bool {
        self.checking.is_some()
    }

    #[must_use]
    pub fn connection_status(&self) -> ConnectionStatus {
        self.banner.current()
    }

    #[must_use]
    pub fn status_message(&self) -> Option<&'static str> {
        self.banner.message()
    }

    /// When the connection banner should be cleared from the screen.
    #[must_use]
    pub fn banner_expires_at(&self) -> Option<tokio::time::Instant> {
        self.banner.expires_at()
    }

    /// Displayable image URL for a game, resolved against the API base.
    ///
    /// An empty path counts as no image.
    #[must_use]
    pub fn image_src(&self, game: &Game) -> Option<String> {
        game.image_url
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| self.config.resolve(path))
    }

    // ============ Game list ============

    /// Fetch the full list, replacing the current one on success.
    pub async fn load(&mut self) {
        let ticket = self.begin_load();
        let result = self.api.list_games().await;
        self.finish_load(ticket, result);
    }

    /// Enter `Loading`. Any earlier load still in flight becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_generation += 1;
        self.load_state = LoadState::Loading;
        LoadTicket(self.load_generation)
    }

    /// Apply a list result. Returns `false` if the ticket was superseded.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Game>, ClientError>,
    ) -> bool {
        if ticket.0 != self.load_generation {
            tracing::debug!(
                ticket = ticket.0,
                current = self.load_generation,
                "Discarding stale game list"
            );
            return false;
        }

        match result {
            Ok(games) => {
                tracing::info!(count = games.len(), "Game list loaded");
                self.games = games;
                self.load_state = LoadState::Loaded;
            }
            Err(err) => {
                tracing::error!("Failed to load games: {err}");
                self.load_state = LoadState::LoadFailed(err.to_string());
            }
        }
        true
    }

    // ============ Submission ============

    /// Validate and submit the draft.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Rejected`] without sending anything when the name
    /// is blank, or [`SubmitError::Failed`] when the server rejects the create.
    pub async fn submit(&mut self) -> Result<Game, SubmitError> {
        let (ticket, new_game) = self.begin_submit()?;
        let result = self.api.create_game(new_game).await;
        self.finish_submit(ticket, result)
    }

    /// Validate the draft and build its payload.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Rejected`] when the trimmed name is empty; the
    /// draft is left untouched.
    pub fn begin_submit(&mut self) -> Result<(SubmitTicket, NewGame), SubmitError> {
        match self.draft.to_new_game() {
            Ok(new_game) => Ok((SubmitTicket(self.draft.revision()), new_game)),
            Err(err) => {
                tracing::info!("Submission rejected: {err}");
                Err(err)
            }
        }
    }

    /// Apply a create result.
    ///
    /// The created game is always prepended. The draft is reset only if it was
    /// not edited after `ticket` was issued.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Failed`] when the create failed; the list and the
    /// draft are unchanged.
    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket,
        result: Result<Game, ClientError>,
    ) -> Result<Game, SubmitError> {
        match result {
            Ok(game) => {
                self.games.insert(0, game.clone());
                if ticket.0 == self.draft.revision() {
                    self.draft.reset();
                } else {
                    tracing::debug!(id = game.id, "Draft edited during submit; keeping edits");
                }
                Ok(game)
            }
            Err(err) => {
                tracing::error!("Failed to create game: {err}");
                Err(SubmitError::Failed(err))
            }
        }
    }

    // ============ Connection check ============

    /// Probe the backend and show the result on the banner.
    ///
    /// Returns `None` if a check was already running.
    pub async fn check_connection(&mut self) -> Option<ConnectionStatus> {
        let ticket = self.begin_connection_check()?;
        let result = self.api.check_health().await.map(|_| ());
        self.finish_connection_check(ticket, result)
    }

    /// Start a check, or return `None` while another is in flight.
    pub fn begin_connection_check(&mut self) -> Option<CheckTicket> {
        if self.checking.is_some() {
            tracing::debug!("Connection check already in flight; ignoring");
            return None;
        }

        self.check_generation += 1;
        self.checking = Some(self.check_generation);
        Some(CheckTicket(self.check_generation))
    }

    /// Show a check result. Returns `None` if `ticket` is not the in-flight check.
    pub fn finish_connection_check(
        &mut self,
        ticket: CheckTicket,
        result: Result<(), ClientError>,
    ) -> Option<ConnectionStatus> {
        if self.checking != Some(ticket.0) {
            return None;
        }
        self.checking = None;

        let status = match result {
            Ok(()) => ConnectionStatus::Connected,
            Err(err) => {
                tracing::warn!("Backend connection check failed: {err}");
                ConnectionStatus::Disconnected
            }
        };

        self.banner.show(status);
        Some(status)
    }
}
