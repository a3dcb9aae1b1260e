use crate::dto::{ImageFile, NewGame};
use crate::error::SubmitError;
use crate::preview::{PreviewHandle, PreviewRegistry};
use crate::utils::parse_video_urls;

/// Blocking message shown when the name is blank.
pub const NAME_REQUIRED: &str = "Name is required";

/// Unsaved form state for a new game.
///
/// Every edit bumps `revision`, which submissions use to tell whether the
/// draft changed while their request was in flight.
#[derive(Debug)]
pub struct Draft {
    name: String,
    description: String,
    video_urls: String,
    image: Option<ImageFile>,
    preview: Option<PreviewHandle>,
    revision: u64,
    previews: PreviewRegistry,
}

impl Draft {
    #[must_use]
    pub const fn new(previews: PreviewRegistry) -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            video_urls: String::new(),
            image: None,
            preview: None,
            revision: 0,
            previews,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Raw video-URL text as typed.
    #[must_use]
    pub fn video_urls(&self) -> &str {
        &self.video_urls
    }

    #[must_use]
    pub const fn image(&self) -> Option<&ImageFile> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn preview_url(&self) -> Option<String> {
        self.preview.as_ref().map(PreviewHandle::url)
    }

    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.touch();
    }

    pub fn set_video_urls(&mut self, video_urls: impl Into<String>) {
        self.video_urls = video_urls.into();
        self.touch();
    }

    /// Select or clear the image. The previous preview handle is released.
    pub fn select_image(&mut self, image: Option<ImageFile>) {
        self.preview = None;
        self.preview = image.as_ref().map(|img| self.previews.acquire(img));
        self.image = image;
        self.touch();
    }

    /// Clear every field and release the preview.
    pub fn reset(&mut self) {
        self.name.clear();
        self.description.clear();
        self.video_urls.clear();
        self.image = None;
        self.preview = None;
        self.touch();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.description.is_empty()
            && self.video_urls.is_empty()
            && self.image.is_none()
            && self.preview.is_none()
    }

    /// Validate the draft and build the create payload.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Rejected`] when the trimmed name is empty.
    pub fn to_new_game(&self) -> Result<NewGame, SubmitError> {
        if self.name.trim().is_empty() {
            return Err(SubmitError::Rejected(NAME_REQUIRED.to_string()));
        }

        let video_urls = if self.video_urls.is_empty() {
            None
        } else {
            Some(parse_video_urls(&self.video_urls))
        };

        Ok(NewGame {
            name: self.name.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            video_urls,
        })
    }

    const fn touch(&mut self) {
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> (Draft, PreviewRegistry) {
        let previews = PreviewRegistry::new();
        (Draft::new(previews.clone()), previews)
    }

    #[test]
    fn test_blank_name_rejected() {
        let (mut draft, _) = draft();
        draft.set_name("   ");
        draft.set_video_urls("a");

        assert_eq!(
            draft.to_new_game(),
            Err(SubmitError::Rejected(NAME_REQUIRED.to_string()))
        );
        assert_eq!(draft.name(), "   ");
        assert_eq!(draft.video_urls(), "a");
    }

    #[test]
    fn test_payload_keeps_name_as_typed() {
        let (mut draft, _) = draft();
        draft.set_name(" Pong ");
        draft.set_description("Classic");

        let game = draft.to_new_game().ok();
        assert_eq!(game.as_ref().map(|g| g.name.as_str()), Some(" Pong "));
        assert_eq!(game.as_ref().map(|g| g.description.as_str()), Some("Classic"));
        assert_eq!(game.and_then(|g| g.video_urls), None);
    }

    #[test]
    fn test_payload_splits_video_urls() {
        let (mut draft, _) = draft();
        draft.set_name("Pong");
        draft.set_video_urls("a, b\nc");

        let urls = draft.to_new_game().ok().and_then(|g| g.video_urls);
        assert_eq!(
            urls,
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn test_select_image_swaps_preview() {
        let (mut draft, previews) = draft();

        draft.select_image(Some(ImageFile::new("a.png", vec![1])));
        let first = draft.preview_url().unwrap_or_default();
        assert!(previews.is_live(&first));

        draft.select_image(Some(ImageFile::new("b.png", vec![2])));
        let second = draft.preview_url().unwrap_or_default();
        assert_ne!(first, second);
        assert!(!previews.is_live(&first));
        assert!(previews.is_live(&second));
        assert_eq!(previews.live_count(), 1);

        draft.select_image(None);
        assert!(draft.preview_url().is_none());
        assert!(draft.image().is_none());
        assert_eq!(previews.live_count(), 0);
    }

    #[test]
    fn test_reset_clears_everything() {
        let (mut draft, previews) = draft();
        draft.set_name("Pong");
        draft.set_description("d");
        draft.set_video_urls("v");
        draft.select_image(Some(ImageFile::new("a.png", vec![1])));
        let before = draft.revision();

        draft.reset();

        assert!(draft.is_empty());
        assert_eq!(previews.live_count(), 0);
        assert!(draft.revision() > before);
    }
}
