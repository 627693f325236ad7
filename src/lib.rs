pub mod config;
pub mod error;
pub mod output;
pub mod resolver;
pub mod summarize;
pub mod web;
pub mod youtube;

use serde::Serialize;

pub use error::{Error, Result};

/// A single captioned segment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// Complete transcript for a video
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    pub video_id: String,
    pub title: String,
    pub language: String,
    pub is_generated: bool,
    pub segments: Vec<Segment>,
}

/// Extract the video ID from a watch URL (`...?v=ID&...`) or a short URL
/// (`youtube.be/ID?...`, `youtu.be/ID?...`).
///
/// The ID is not validated; a bogus one fails later at transcript lookup.
pub fn extract_video_id(input: &str) -> Result<String> {
    let input = input.trim();

    if let Some((_, rest)) = input.split_once("v=") {
        return Ok(rest.split('&').next().unwrap_or(rest).to_string());
    }

    for marker in ["youtube.be/", "youtu.be/"] {
        if let Some((_, rest)) = input.split_once(marker) {
            return Ok(rest.split('?').next().unwrap_or(rest).to_string());
        }
    }

    Err(Error::InvalidUrl(input.to_string()))
}
