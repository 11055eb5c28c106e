/// Continuation suggestions from an external generative-text service.
///
/// The core never performs the network call. It builds a request, hands
/// out a ticket, and later accepts the completion for that ticket. Any
/// completion whose ticket is no longer current (the panel was closed or
/// a newer request was made) is dropped.

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

pub const NO_OUTPUT: &str = "(No AI output)";
pub const WAITING: &str = "Thinking…";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SuggestionError {
    #[error("{0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Where and how to ask for a suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionSettings {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    /// Scripts longer than this (in chars) are cut to an excerpt.
    pub long_script_threshold: usize,
    /// Length of the trailing excerpt sent for long scripts.
    pub excerpt_length: usize,
}

impl Default for SuggestionSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-pro".to_string(),
            api_key: None,
            long_script_threshold: 2000,
            excerpt_length: 1000,
        }
    }
}

impl SuggestionSettings {
    pub fn url(&self) -> String {
        let base = format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        );
        match &self.api_key {
            Some(key) => format!("{base}?key={key}"),
            None => base,
        }
    }
}

/// Identifies one in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SuggestionTicket(pub u64);

/// Everything the host needs to perform the call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionRequest {
    pub ticket: SuggestionTicket,
    pub url: String,
    pub body: serde_json::Value,
}

/// The slice of the script sent as context: the whole text, or its
/// trailing `excerpt_length` chars once it grows past the threshold.
pub fn select_excerpt<'a>(text: &'a str, settings: &SuggestionSettings) -> &'a str {
    let len = text.chars().count();
    if len <= settings.long_script_threshold {
        return text;
    }
    let skip = len.saturating_sub(settings.excerpt_length);
    match text.char_indices().nth(skip) {
        Some((offset, _)) => &text[offset..],
        None => "",
    }
}

pub fn build_prompt(excerpt: &str) -> String {
    format!("Screenplay excerpt:\n{excerpt}\nSuggest the next scene or continue the story.")
}

pub fn build_request_body(prompt: &str) -> serde_json::Value {
    json!({
        "contents": [{
            "parts": [{ "text": prompt }]
        }]
    })
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Debug, Default, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

/// Pull the first candidate's text out of a service response.
pub fn parse_response(body: &str) -> Result<String, SuggestionError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| SuggestionError::Malformed(e.to_string()))?;
    let text = response
        .candidates
        .first()
        .and_then(|c| c.content.parts.first())
        .map(|p| p.text.trim())
        .filter(|t| !t.is_empty())
        .unwrap_or(NO_OUTPUT);
    Ok(text.to_string())
}

/// Text shown in the suggestion panel for a finished call.
pub fn outcome_text(result: &Result<String, SuggestionError>) -> String {
    match result {
        Ok(text) => text.clone(),
        Err(e) => format!("[Error] {e}"),
    }
}

/// State of the suggestion panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "text", rename_all = "snake_case")]
pub enum SuggestionState {
    Idle,
    Waiting,
    Ready(String),
}

/// Single-shot request tracking.
#[derive(Debug, Clone, Default)]
pub struct SuggestionSlot {
    next_ticket: u64,
    pending: Option<SuggestionTicket>,
    last: Option<String>,
}

impl SuggestionSlot {
    /// Start a new request, replacing any in flight.
    pub fn begin(&mut self, text: &str, settings: &SuggestionSettings) -> SuggestionRequest {
        let ticket = SuggestionTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending = Some(ticket);
        self.last = None;

        let prompt = build_prompt(select_excerpt(text, settings));
        SuggestionRequest {
            ticket,
            url: settings.url(),
            body: build_request_body(&prompt),
        }
    }

    /// Forget the in-flight request, if any.
    pub fn cancel(&mut self) {
        if let Some(ticket) = self.pending.take() {
            log::debug!("suggestion {:?} cancelled", ticket);
        }
    }

    /// Accept a completion. Returns the display text when `ticket` is the
    /// current request, `None` when it is stale.
    pub fn complete(
        &mut self,
        ticket: SuggestionTicket,
        result: Result<String, SuggestionError>,
    ) -> Option<String> {
        if self.pending != Some(ticket) {
            log::warn!("dropping stale suggestion {:?}", ticket);
            return None;
        }
        self.pending = None;
        let text = outcome_text(&result);
        self.last = Some(text.clone());
        Some(text)
    }

    pub fn state(&self) -> SuggestionState {
        match (&self.pending, &self.last) {
            (Some(_), _) => SuggestionState::Waiting,
            (None, Some(text)) => SuggestionState::Ready(text.clone()),
            (None, None) => SuggestionState::Idle,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
