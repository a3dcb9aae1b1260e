/// Split raw video-URL text on commas and/or newlines.
///
/// Segments are trimmed and empty ones dropped; order is preserved.
pub fn parse_video_urls(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}
