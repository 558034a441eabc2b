use regex::Regex;
use std::error::Error;
use std::sync::LazyLock;
use thiserror::Error;

static VIDEO_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:v=|youtu\.be/)([a-zA-Z0-9_-]{11})").expect("invalid video id regex"));

#[derive(Debug, Error)]
pub enum CaptionsError {
    #[error("Not a recognizable YouTube video URL: {0}")]
    InvalidUrl(String),

    #[error("No English captions available for this video")]
    NoCaptions,

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Extracts the 11-character video id from a `watch?v=` or `youtu.be/` URL.
#[must_use]
pub fn video_id(url: &str) -> Option<&str> {
    VIDEO_ID.captures(url).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Fetches the English auto-captions for a video and returns them as plain
/// text. Videos without captions are rejected rather than processed empty.
pub async fn fetch_transcript(client: &reqwest::Client, video_url: &str) -> Result<String, CaptionsError> {
    let id = video_id(video_url).ok_or_else(|| CaptionsError::InvalidUrl(video_url.to_owned()))?;

    let endpoint = format!("https://video.google.com/timedtext?lang=en&v={id}&fmt=vtt");
    tracing::debug!(video_id = id, "fetching captions");

    let vtt = client
        .get(&endpoint)
        .send()
        .await?
        .error_for_status()
        .inspect_err(|error| tracing::warn!(error = error as &dyn Error, video_id = id, "caption fetch failed"))?
        .text()
        .await?;

    let text = parse_vtt(&vtt);
    if text.is_empty() {
        return Err(CaptionsError::NoCaptions);
    }
    Ok(text)
}

/// Strips VTT structure (header, cue indices, timing lines) and collapses
/// the remaining caption lines into one whitespace-normalized string.
#[must_use]
pub fn parse_vtt(vtt: &str) -> String {
    let lines: Vec<&str> = vtt
        .lines()
        .map(str::trim)
        .filter(|line| {
            !line.is_empty()
                && !line.contains("-->")
                && !line.starts_with("WEBVTT")
                && !line.starts_with("NOTE")
                && line.parse::<u64>().is_err()
        })
        .collect();

    lines.join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_id_from_watch_url() {
        assert_eq!(
            video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_video_id_from_short_url() {
        assert_eq!(video_id("https://youtu.be/dQw4w9WgXcQ?t=42"), Some("dQw4w9WgXcQ"));
    }

    #[test]
    fn test_video_id_rejects_other_urls() {
        assert_eq!(video_id("https://example.com/watch?v=short"), None);
        assert_eq!(video_id("not even a url"), None);
    }

    #[test]
    fn test_parse_vtt_keeps_only_caption_text() {
        let vtt = "WEBVTT\n\n1\n00:00:00.000 --> 00:00:02.000\nhello there\n\n2\n00:00:02.000 --> 00:00:04.000\ngeneral  kenobi\n";
        assert_eq!(parse_vtt(vtt), "hello there general kenobi");
    }

    #[test]
    fn test_parse_vtt_empty_input() {
        assert_eq!(parse_vtt("WEBVTT\n\n"), "");
    }
}
