//! Local display handles for images selected in the draft.
//!
//! A handle is an opaque `blob:` style URL that stays registered until the
//! handle is dropped. The draft holds at most one, so replacing or clearing the
//! selection releases the previous handle.

use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use crate::dto::ImageFile;

/// Tracks which preview handles are currently live.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    /// handle id → file name it was created for
    live: Arc<DashMap<Uuid, String>>,
}

impl PreviewRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new handle for `image`.
    #[must_use]
    pub fn acquire(&self, image: &ImageFile) -> PreviewHandle {
        let id = Uuid::new_v4();
        self.live.insert(id, image.file_name.clone());
        tracing::trace!(%id, file = %image.file_name, "Preview acquired");

        PreviewHandle {
            id,
            live: Arc::clone(&self.live),
        }
    }

    /// Number of handles not yet released.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn is_live(&self, url: &str) -> bool {
        url.strip_prefix(PreviewHandle::SCHEME)
            .and_then(|id| Uuid::parse_str(id).ok())
            .is_some_and(|id| self.live.contains_key(&id))
    }
}

/// A live preview URL. Released on drop.
#[derive(Debug)]
pub struct PreviewHandle {
    id: Uuid,
    live: Arc<DashMap<Uuid, String>>,
}

impl PreviewHandle {
    const SCHEME: &'static str = "blob:preview/";

    #[must_use]
    pub fn url(&self) -> String {
        format!("{}{}", Self::SCHEME, self.id)
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        if self.live.remove(&self.id).is_some() {
            tracing::trace!(id = %self.id, "Preview released");
        }
    }
}
