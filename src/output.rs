use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::{Transcript, extract_video_id};

pub const TRANSCRIPT_FILE_NAME: &str = "transcript.txt";

pub fn language_tag(code: &str) -> String {
    format!("[Language: {code}]")
}

/// Render transcript as a language tag line, a blank line, then all segment
/// text joined by single spaces
pub fn render_text(transcript: &Transcript) -> String {
    let body = transcript
        .segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    format!("{}\n\n{body}", language_tag(&transcript.language))
}

/// Split the language tag line off rendered transcript text
pub fn split_language_header(text: &str) -> (Option<&str>, &str) {
    if text.starts_with("[Language: ") {
        if let Some((header, rest)) = text.split_once("\n\n") {
            return (Some(header), rest);
        }
    }
    (None, text)
}

pub fn thumbnail_url(video_id: &str) -> String {
    format!("http://img.youtube.com/vi/{video_id}/0.jpg")
}

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Warning(String),
    Error(String),
}

/// Everything one render of the form page shows
#[derive(Debug, Default)]
pub struct Page<'a> {
    pub url: &'a str,
    pub notices: Vec<Notice>,
    pub transcript: Option<&'a str>,
    pub summary: Option<&'a str>,
}

const STYLE: &str = "body{font-family:sans-serif;max-width:52rem;margin:2rem auto;padding:0 1rem}\
input[type=text]{width:100%;padding:.5rem;box-sizing:border-box}\
.buttons{display:flex;gap:1rem;margin:1rem 0}\
.warning{background:#fff4e5;padding:.75rem;border-radius:4px;margin:.5rem 0}\
.error{background:#fdecea;padding:.75rem;border-radius:4px;margin:.5rem 0}\
img{width:100%}textarea{width:100%;height:400px}\
.summary{white-space:pre-wrap}";

pub fn render_page(page: &Page) -> String {
    let url_attr = encode_double_quoted_attribute(page.url);
    let mut html = format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>Youtube Video Transcript Summarizer</title>\
<style>{STYLE}</style></head><body>\n\
<h1>Youtube Video Transcript Summarizer</h1>\n\
<p>Enter a YouTube video URL to get AI-powered summary using Gemini</p>\n\
<form method=\"post\">\n\
<label for=\"url\">Enter the Youtube video URL</label>\n\
<input type=\"text\" id=\"url\" name=\"url\" value=\"{url_attr}\" placeholder=\"https://www.youtube.com/watch?v=...\">\n\
<div class=\"buttons\">\
<button type=\"submit\" formaction=\"/transcript\">Show Raw Transcript</button>\
<button type=\"submit\" formaction=\"/summary\">Show Summary</button>\
</div>\n</form>\n"
    );

    if !page.url.is_empty() {
        match extract_video_id(page.url) {
            Ok(video_id) => html.push_str(&format!(
                "<img src=\"{}\" alt=\"Video thumbnail\">\n",
                encode_double_quoted_attribute(&thumbnail_url(&video_id))
            )),
            Err(_) => html.push_str(&notice_html(&Notice::Warning(
                "Could not display video thumbnail".to_string(),
            ))),
        }
    }

    for notice in &page.notices {
        html.push_str(&notice_html(notice));
    }

    if let Some(text) = page.transcript {
        let (header, body) = split_language_header(text);
        let heading = match header {
            Some(h) => format!("Raw Transcript ({})", encode_text(h)),
            None => "Raw Transcript".to_string(),
        };
        html.push_str(&format!(
            "<h2>{heading}</h2>\n<textarea readonly>{}</textarea>\n\
<form method=\"get\" action=\"/{TRANSCRIPT_FILE_NAME}\">\
<input type=\"hidden\" name=\"url\" value=\"{url_attr}\">\
<button type=\"submit\">Download Transcript</button></form>\n",
            encode_text(body)
        ));
    }

    // Markdown from the model is shown as escaped plain text
    if let Some(summary) = page.summary {
        html.push_str(&format!(
            "<h3>Summary:</h3>\n<div class=\"summary\">{}</div>\n",
            encode_text(summary)
        ));
    }

    html.push_str("</body></html>\n");
    html
}

fn notice_html(notice: &Notice) -> String {
    let (class, message) = match notice {
        Notice::Warning(m) => ("warning", m),
        Notice::Error(m) => ("error", m),
    };
    format!("<div class=\"{class}\">{}</div>\n", encode_text(message))
}
