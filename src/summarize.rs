use log::debug;

use crate::{Error, Result};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-001";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const PROMPT: &str = "You are YouTube video summarizer. You will be taking the transcript text \
and summarizing the entire video and providing the important summary in points \
within 250 words.\n\n\
IMPORTANT: Please provide the summary in the SAME LANGUAGE as the transcript text. \
Detect the language automatically and respond in that language.\n\n\
Please provide the summary of the text given here:  ";

/// Gemini client holding the API key it was built with
#[derive(Debug, Clone)]
pub struct Summarizer {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl Summarizer {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>, model: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Summarize transcript text; the response text is returned verbatim
    pub async fn summarize(&self, transcript_text: &str) -> Result<String> {
        debug!(
            "Summarizing {} chars via Gemini model {}",
            transcript_text.len(),
            self.model
        );

        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);

        let body = serde_json::json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{"text": format!("{PROMPT}{transcript_text}")}]
                }
            ]
        });

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::ExternalService(format!("Gemini API returned {status}: {body}")));
        }

        let json: serde_json::Value = resp.json().await?;
        extract_gemini_text(&json)
    }
}

fn extract_gemini_text(json: &serde_json::Value) -> Result<String> {
    if let Some(parts) = json
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
    {
        let text: String = parts
            .iter()
            .filter_map(|part| part.get("text")?.as_str())
            .collect();
        if !text.is_empty() {
            return Ok(text);
        }
    }

    if let Some(reason) = json
        .get("promptFeedback")
        .and_then(|f| f.get("blockReason"))
        .and_then(|r| r.as_str())
    {
        return Err(Error::ExternalService(format!("Gemini blocked the prompt: {reason}")));
    }

    Err(Error::ExternalService("unexpected Gemini API response format".to_string()))
}
