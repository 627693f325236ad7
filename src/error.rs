/// Failures surfaced to the user. Kept small so callers can tell a missing
/// caption track apart from an unreachable service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid YouTube URL format: {0}")]
    InvalidUrl(String),

    #[error("transcript unavailable: {0}")]
    TranscriptUnavailable(String),

    #[error("external service error: {0}")]
    ExternalService(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::ExternalService(e.to_string())
    }
}
