use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::errors::{AppError, AppResult};

static VIDEO_ID_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?:youtube\.com/watch\?(?:[^#]*&)?v=)([A-Za-z0-9_-]{11})")
            .expect("valid watch pattern"),
        Regex::new(r"(?:youtu\.be/)([A-Za-z0-9_-]{11})").expect("valid short-link pattern"),
        Regex::new(r"(?:youtube\.com/embed/)([A-Za-z0-9_-]{11})").expect("valid embed pattern"),
        Regex::new(r"(?:youtube\.com/shorts/)([A-Za-z0-9_-]{11})").expect("valid shorts pattern"),
    ]
});

static CAPTION_TRACKS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""captionTracks":(\[.*?\])"#).expect("valid caption tracks pattern"));

static XML_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));

#[derive(Debug, Deserialize)]
struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    base_url: String,
    #[serde(rename = "languageCode", default)]
    language_code: String,
}

/// Transcript collaborator used when a lesson is requested from a video URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn load_transcript(&self, url: &str) -> AppResult<String>;
}

/// Fetches YouTube caption tracks and flattens them into plain text.
pub struct YoutubeTranscriptService {
    client: reqwest::Client,
}

impl YoutubeTranscriptService {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn extract_video_id(url: &str) -> AppResult<String> {
        VIDEO_ID_PATTERNS
            .iter()
            .find_map(|pattern| pattern.captures(url))
            .map(|captures| captures[1].to_string())
            .ok_or_else(|| {
                AppError::TranscriptError(format!("could not extract a video id from {:?}", url))
            })
    }

    fn pick_track(mut tracks: Vec<CaptionTrack>) -> AppResult<CaptionTrack> {
        if tracks.is_empty() {
            return Err(AppError::TranscriptError(
                "video has no caption tracks".to_string(),
            ));
        }

        let index = tracks
            .iter()
            .position(|track| track.language_code.starts_with("en"))
            .unwrap_or(0);

        Ok(tracks.swap_remove(index))
    }

    fn flatten_captions(xml: &str) -> String {
        let stripped = XML_TAG_RE.replace_all(xml, "\n");

        stripped
            .lines()
            .map(decode_entities)
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    async fn fetch(&self, url: &str, what: &str) -> AppResult<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::TranscriptError(format!("{} request failed: {}", what, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::TranscriptError(format!(
                "{} request returned {}",
                what, status
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::TranscriptError(format!("{} body unreadable: {}", what, e)))
    }
}

fn decode_entities(line: &str) -> String {
    line.replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptService {
    async fn load_transcript(&self, url: &str) -> AppResult<String> {
        let video_id = Self::extract_video_id(url)?;
        log::info!("loading transcript for video {}", video_id);

        let watch_url = format!("https://www.youtube.com/watch?v={}", video_id);
        let page = self.fetch(&watch_url, "watch page").await?;

        let tracks_json = CAPTION_TRACKS_RE
            .captures(&page)
            .map(|captures| captures[1].to_string())
            .ok_or_else(|| {
                AppError::TranscriptError(format!("no captions found for video {}", video_id))
            })?;

        let tracks: Vec<CaptionTrack> = serde_json::from_str(&tracks_json).map_err(|e| {
            AppError::TranscriptError(format!("caption track metadata unreadable: {}", e))
        })?;

        let track = Self::pick_track(tracks)?;
        let captions = self.fetch(&track.base_url, "caption track").await?;

        let transcript = Self::flatten_captions(&captions);
        if transcript.is_empty() {
            return Err(AppError::TranscriptError(format!(
                "caption track for video {} was empty",
                video_id
            )));
        }

        Ok(transcript)
    }
}
