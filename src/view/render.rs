use super::{CatalogView, LoadState};
use crate::api::CatalogApi;
use crate::dto::Game;

impl<A: CatalogApi> CatalogView<A> {
    /// Render the whole screen as plain text.
    #[must_use]
    pub fn render(&self) -> String {
        let mut lines = vec![
            "# Games Catalog".to_string(),
            "Add, view and share games with images and videos".to_string(),
            format!("[{}]", self.connection_button_label()),
        ];

        if let Some(message) = self.status_message() {
            lines.push(message.to_string());
        }

        lines.push(String::new());
        lines.extend(self.render_form());
        lines.push(String::new());
        lines.extend(self.render_list());

        lines.join("\n")
    }

    #[must_use]
    pub const fn connection_button_label(&self) -> &'static str {
        if self.is_checking() {
            "Checking..."
        } else {
            "Check Backend Connection"
        }
    }

    fn render_form(&self) -> Vec<String> {
        let draft = self.draft();
        let mut lines = vec![
            "## Add New Game".to_string(),
            format!("Name: {}", draft.name()),
            format!("Description: {}", draft.description()),
            format!(
                "Video URLs: {}",
                draft.video_urls().replace('\n', "\n            ")
            ),
        ];

        match (draft.image(), draft.preview_url()) {
            (Some(image), Some(preview)) => {
                lines.push(format!("Image: {} ({preview})", image.file_name));
            }
            (Some(image), None) => lines.push(format!("Image: {}", image.file_name)),
            (None, _) => lines.push("Image: none".to_string()),
        }

        lines
    }

    fn render_list(&self) -> Vec<String> {
        let mut lines = vec!["## Games".to_string()];

        match self.load_state() {
            LoadState::Loading => lines.push("Loading...".to_string()),
            LoadState::LoadFailed(reason) => lines.push(format!("Could not load games: {reason}")),
            LoadState::Idle | LoadState::Loaded => {}
        }

        for game in self.games() {
            lines.extend(self.render_card(game));
        }

        lines
    }

    fn render_card(&self, game: &Game) -> Vec<String> {
        let mut lines = vec![format!("### {}", game.name)];

        lines.push(
            self.image_src(game)
                .map_or_else(|| "No image".to_string(), |src| format!("Image: {src}")),
        );

        if let Some(description) = game.description.as_deref().filter(|d| !d.is_empty()) {
            lines.push(description.to_string());
        }

        let videos = game.videos();
        if !videos.is_empty() {
            lines.push(format!("Videos ({})", videos.len()));
            lines.extend(videos.iter().map(|v| format!("  - {v}")));
        }

        lines
    }
}
