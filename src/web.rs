use std::sync::Arc;

use axum::{
    Form, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use log::{error, info, warn};
use serde::Deserialize;

use crate::config::Settings;
use crate::output::{Notice, Page, TRANSCRIPT_FILE_NAME, render_page};
use crate::resolver::Resolver;
use crate::summarize::Summarizer;
use crate::youtube::YouTubeCaptions;
use crate::{Error, Result, extract_video_id};

const EMPTY_URL_WARNING: &str = "Please enter a YouTube URL";
const NO_CAPTIONS_ERROR: &str = "Failed to extract transcript. Please check if the video has captions available.";

#[derive(Clone)]
pub struct AppState {
    resolver: Arc<Resolver<YouTubeCaptions>>,
    summarizer: Arc<Summarizer>,
}

impl AppState {
    pub fn new(client: reqwest::Client, settings: &Settings) -> Self {
        let captions = YouTubeCaptions::new(client.clone(), settings.youtube_base_url.as_str());
        let summarizer = Summarizer::new(
            client,
            settings.api_key.as_str(),
            settings.model.as_str(),
            settings.gemini_base_url.as_str(),
        );
        Self {
            resolver: Arc::new(Resolver::new(captions)),
            summarizer: Arc::new(summarizer),
        }
    }

    async fn transcript_text(&self, url: &str) -> Result<String> {
        let video_id = extract_video_id(url)?;
        info!("Resolving transcript for {video_id}");
        self.resolver.resolve_text(&video_id).await
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UrlForm {
    #[serde(default)]
    url: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/transcript", post(show_transcript))
        .route("/summary", post(show_summary))
        .route(&format!("/{TRANSCRIPT_FILE_NAME}"), get(download_transcript))
        .with_state(state)
}

async fn index(Query(form): Query<UrlForm>) -> Html<String> {
    Html(render_page(&Page {
        url: form.url.trim(),
        ..Default::default()
    }))
}

async fn show_transcript(State(state): State<AppState>, Form(form): Form<UrlForm>) -> Html<String> {
    let url = form.url.trim();
    if url.is_empty() {
        return Html(warning_page(url));
    }

    match state.transcript_text(url).await {
        Ok(text) => Html(render_page(&Page {
            url,
            transcript: Some(&text),
            ..Default::default()
        })),
        Err(e) => Html(render_page(&Page {
            url,
            notices: transcript_notices(&e),
            ..Default::default()
        })),
    }
}

async fn show_summary(State(state): State<AppState>, Form(form): Form<UrlForm>) -> Html<String> {
    let url = form.url.trim();
    if url.is_empty() {
        return Html(warning_page(url));
    }

    let text = match state.transcript_text(url).await {
        Ok(text) => text,
        Err(e) => {
            return Html(render_page(&Page {
                url,
                notices: transcript_notices(&e),
                ..Default::default()
            }));
        }
    };

    info!("Requesting summary from {}", state.summarizer.model());
    match state.summarizer.summarize(&text).await {
        Ok(summary) => Html(render_page(&Page {
            url,
            summary: Some(&summary),
            ..Default::default()
        })),
        Err(e) => {
            error!("Summary generation failed: {e}");
            Html(render_page(&Page {
                url,
                notices: vec![Notice::Error(format!("Error generating summary: {e}"))],
                ..Default::default()
            }))
        }
    }
}

async fn download_transcript(State(state): State<AppState>, Query(form): Query<UrlForm>) -> Response {
    let url = form.url.trim();
    if url.is_empty() {
        return (StatusCode::BAD_REQUEST, EMPTY_URL_WARNING).into_response();
    }

    match state.transcript_text(url).await {
        Ok(text) => (
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{TRANSCRIPT_FILE_NAME}\""),
                ),
            ],
            text,
        )
            .into_response(),
        Err(e) => {
            warn!("Transcript download failed: {e}");
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

fn warning_page(url: &str) -> String {
    render_page(&Page {
        url,
        notices: vec![Notice::Warning(EMPTY_URL_WARNING.to_string())],
        ..Default::default()
    })
}

fn transcript_notices(e: &Error) -> Vec<Notice> {
    match e {
        Error::InvalidUrl(_) => {
            warn!("{e}");
            vec![Notice::Warning(e.to_string())]
        }
        _ => {
            error!("Error extracting transcript: {e}");
            vec![
                Notice::Error(format!("Error extracting transcript: {e}")),
                Notice::Error(NO_CAPTIONS_ERROR.to_string()),
            ]
        }
    }
}

fn error_status(e: &Error) -> StatusCode {
    match e {
        Error::InvalidUrl(_) => StatusCode::BAD_REQUEST,
        Error::TranscriptUnavailable(_) => StatusCode::NOT_FOUND,
        Error::ExternalService(_) => StatusCode::BAD_GATEWAY,
    }
}
