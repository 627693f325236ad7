use log::{debug, info, warn};

use crate::{Error, Result, Segment, Transcript, output};

/// Languages tried in order for the primary lookup; first match wins.
pub const PREFERRED_LANGUAGES: [&str; 12] = ["id", "en", "es", "fr", "de", "pt", "it", "ru", "ja", "ko", "zh", "ar"];

/// Languages accepted from manually created tracks when the primary lookup fails.
pub const FALLBACK_LANGUAGES: [&str; 2] = ["id", "en"];

/// One caption track advertised for a video
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionTrack {
    pub language_code: String,
    pub language: String,
    pub is_generated: bool,
    pub base_url: String,
}

/// Caption tracks of one video, split by origin, in the order YouTube lists them
#[derive(Debug, Clone, Default)]
pub struct TranscriptList {
    pub video_id: String,
    pub title: String,
    pub manually_created: Vec<CaptionTrack>,
    pub generated: Vec<CaptionTrack>,
}

impl TranscriptList {
    pub fn new(video_id: &str, title: impl Into<String>, tracks: Vec<CaptionTrack>) -> Self {
        let (generated, manually_created): (Vec<_>, Vec<_>) = tracks.into_iter().partition(|t| t.is_generated);
        Self {
            video_id: video_id.to_string(),
            title: title.into(),
            manually_created,
            generated,
        }
    }

    /// First language code with any track wins; within a code, a manually
    /// created track beats a generated one.
    pub fn find_transcript(&self, language_codes: &[&str]) -> Result<&CaptionTrack> {
        language_codes
            .iter()
            .find_map(|code| find_code(&self.manually_created, code).or_else(|| find_code(&self.generated, code)))
            .ok_or_else(|| self.not_found(language_codes))
    }

    pub fn find_manually_created(&self, language_codes: &[&str]) -> Result<&CaptionTrack> {
        language_codes
            .iter()
            .find_map(|code| find_code(&self.manually_created, code))
            .ok_or_else(|| self.not_found(language_codes))
    }

    pub fn is_empty(&self) -> bool {
        self.manually_created.is_empty() && self.generated.is_empty()
    }

    fn not_found(&self, language_codes: &[&str]) -> Error {
        let available: Vec<&str> = self
            .manually_created
            .iter()
            .chain(&self.generated)
            .map(|t| t.language_code.as_str())
            .collect();
        Error::TranscriptUnavailable(format!(
            "no transcript for video {} in any of [{}] (available: [{}])",
            self.video_id,
            language_codes.join(", "),
            available.join(", ")
        ))
    }
}

fn find_code<'a>(tracks: &'a [CaptionTrack], code: &str) -> Option<&'a CaptionTrack> {
    tracks.iter().find(|t| t.language_code == code)
}

/// Where caption tracks come from
pub trait CaptionSource {
    fn list_transcripts(&self, video_id: &str) -> impl Future<Output = Result<TranscriptList>> + Send;

    fn fetch_segments(&self, track: &CaptionTrack) -> impl Future<Output = Result<Vec<Segment>>> + Send;
}

/// Picks and fetches the transcript for a video
#[derive(Debug, Clone)]
pub struct Resolver<S> {
    source: S,
}

impl<S: CaptionSource + Sync> Resolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Try the preferred languages first. On any failure there, list again
    /// and settle for a manually created track in a fallback language.
    pub async fn resolve(&self, video_id: &str) -> Result<Transcript> {
        match self.resolve_with(video_id, &PREFERRED_LANGUAGES, false).await {
            Ok(transcript) => Ok(transcript),
            Err(primary) => {
                warn!("Primary transcript lookup for {video_id} failed: {primary}; trying manually created fallback");
                self.resolve_with(video_id, &FALLBACK_LANGUAGES, true)
                    .await
                    .map_err(|fallback| pick_error(primary, fallback))
            }
        }
    }

    /// Resolve and render as language-tagged text
    pub async fn resolve_text(&self, video_id: &str) -> Result<String> {
        let transcript = self.resolve(video_id).await?;
        Ok(output::render_text(&transcript))
    }

    async fn resolve_with(&self, video_id: &str, languages: &[&str], manual_only: bool) -> Result<Transcript> {
        let list = self.source.list_transcripts(video_id).await?;
        if list.is_empty() {
            return Err(Error::TranscriptUnavailable(format!("no captions for video {video_id}")));
        }

        let track = if manual_only {
            list.find_manually_created(languages)?
        } else {
            list.find_transcript(languages)?
        };
        debug!(
            "Selected track for {video_id}: lang={} generated={}",
            track.language_code, track.is_generated
        );

        let segments = self.source.fetch_segments(track).await?;
        info!(
            "Fetched {} segments for {video_id} ({})",
            segments.len(),
            track.language_code
        );

        Ok(Transcript {
            video_id: video_id.to_string(),
            title: list.title.clone(),
            language: track.language_code.clone(),
            is_generated: track.is_generated,
            segments,
        })
    }
}

/// A service failure on either attempt outranks "not found", so an outage
/// never reads as a video without captions.
fn pick_error(primary: Error, fallback: Error) -> Error {
    match (primary, fallback) {
        (_, e @ Error::ExternalService(_)) => e,
        (e @ Error::ExternalService(_), _) => e,
        (_, e) => e,
    }
}
