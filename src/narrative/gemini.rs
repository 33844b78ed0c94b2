use std::cell::RefCell;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::NarrativeError;
use crate::config::GeminiSettings;

/// Single-shot text completion.
pub trait TextCompleter {
    fn complete(&self, prompt: &str) -> Result<String, NarrativeError>;
}

/// Gemini `generateContent` client.
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: Zeroizing<String>,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(settings: &GeminiSettings) -> Result<Self, NarrativeError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| NarrativeError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key: settings.api_key.clone(),
            client,
            timeout_secs: settings.timeout_secs,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

/// Request body for `models/{model}:generateContent`
#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        }
    }
}

/// Response body from `generateContent`
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

/// Concatenated text parts of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Result<String, NarrativeError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(NarrativeError::EmptyCompletion);
    }
    Ok(text)
}

impl TextCompleter for GeminiClient {
    fn complete(&self, prompt: &str) -> Result<String, NarrativeError> {
        let body = GenerateContentRequest::from_prompt(prompt);
        tracing::info!(model = %self.model, prompt_chars = prompt.len(), "Requesting narrative");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    NarrativeError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    NarrativeError::HttpClient(format!(
                        "Request timed out after {}s",
                        self.timeout_secs
                    ))
                } else {
                    NarrativeError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(NarrativeError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .map_err(|e| NarrativeError::ResponseParsing(e.to_string()))?;

        extract_text(parsed)
    }
}

/// Mock completer for testing: returns a configurable response (or a
/// connection failure) and keeps every prompt it was given.
pub struct MockTextCompleter {
    response: Option<String>,
    prompts: RefCell<Vec<String>>,
}

impl MockTextCompleter {
    pub fn new(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    /// A completer whose service is never reachable.
    pub fn unreachable() -> Self {
        Self {
            response: None,
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl TextCompleter for MockTextCompleter {
    fn complete(&self, prompt: &str) -> Result<String, NarrativeError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.response
            .clone()
            .ok_or_else(|| NarrativeError::Connection("mock://unreachable".to_string()))
    }
}
