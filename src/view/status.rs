use std::time::Duration;

use tokio::time::Instant;

/// How long a connection-check result stays on screen.
pub const BANNER_LIFETIME: Duration = Duration::from_secs(3);

/// Result of the most recent connection check, as displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Unknown,
    Connected,
    Disconnected,
}

impl ConnectionStatus {
    #[must_use]
    pub const fn message(self) -> Option<&'static str> {
        match self {
            Self::Unknown => None,
            Self::Connected => Some("✓ Backend is connected!"),
            Self::Disconnected => Some("✗ Backend is not connected"),
        }
    }
}

/// Transient banner that reverts to [`ConnectionStatus::Unknown`] after [`BANNER_LIFETIME`].
#[derive(Debug, Clone)]
pub struct StatusBanner {
    status: ConnectionStatus,
    shown_at: Instant,
}

impl StatusBanner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: ConnectionStatus::Unknown,
            shown_at: Instant::now(),
        }
    }

    pub fn show(&mut self, status: ConnectionStatus) {
        self.status = status;
        self.shown_at = Instant::now();
    }

    /// Status as of now; expired results read as unknown.
    #[must_use]
    pub fn current(&self) -> ConnectionStatus {
        if self.shown_at.elapsed() >= BANNER_LIFETIME {
            ConnectionStatus::Unknown
        } else {
            self.status
        }
    }

    #[must_use]
    pub fn message(&self) -> Option<&'static str> {
        self.current().message()
    }

    /// When the visible message will disappear, or `None` if nothing is shown.
    #[must_use]
    pub fn expires_at(&self) -> Option<Instant> {
        match self.current() {
            ConnectionStatus::Unknown => None,
            ConnectionStatus::Connected | ConnectionStatus::Disconnected => {
                Some(self.shown_at + BANNER_LIFETIME)
            }
        }
    }
}

impl Default for StatusBanner {
    fn default() -> Self {
        Self::new()
    }
}
