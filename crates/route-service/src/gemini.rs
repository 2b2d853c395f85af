//! Generative Language API client for commute directions
//!
//! Calls `models/<model>:generateContent` over REST and turns the free-text
//! answer into a short list of steps.

use std::time::Duration;

use async_trait::async_trait;
use dossier_types::RouteSteps;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::RouteError;
use crate::parse::parse_route_lines;
use crate::RouteService;

/// Generative Language API base
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Deadline for one lookup, from connect until the body is read
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

const SYSTEM_INSTRUCTION: &str = "You are a professional Bengaluru navigation engineer. Provide \
    clear, turn-by-turn directions suitable for a luxury property brochure.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

pub struct GeminiRouteService {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiRouteService {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: GEMINI_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

pub fn route_prompt(origin: &str, destination: &str) -> String {
    format!(
        "Provide a 10-step driving route from {}, Bengaluru to {}, Bengaluru. Be specific with \
         road names like 'Outer Ring Road' or 'Bellary Road'. Include distance for each step. \
         Format as bullet points.",
        origin, destination
    )
}

#[async_trait]
impl RouteService for GeminiRouteService {
    async fn route_steps(&self, origin: &str, destination: &str) -> Result<RouteSteps, RouteError> {
        let prompt = route_prompt(origin, destination);
        let body = GenerateRequest {
            system_instruction: Content {
                parts: vec![Part {
                    text: SYSTEM_INSTRUCTION,
                }],
            },
            contents: vec![Content {
                parts: vec![Part { text: &prompt }],
            }],
        };

        debug!("Requesting route steps from model {}", self.model);
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(classify_failure(status.as_u16(), &text));
        }

        let answer = response_text(&text)?;
        Ok(parse_route_lines(&answer, origin, destination))
    }
}

/// Concatenated text parts of the first candidate
fn response_text(body: &str) -> Result<String, RouteError> {
    let parsed: GenerateResponse =
        serde_json::from_str(body).map_err(|e| RouteError::Malformed(e.to_string()))?;
    let content = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .ok_or_else(|| RouteError::Malformed("Response has no candidates".to_string()))?;

    Ok(content
        .parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect::<Vec<_>>()
        .join(""))
}

fn classify_failure(status: u16, body: &str) -> RouteError {
    let (message, api_status) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => (envelope.error.message, envelope.error.status),
        Err(_) => (body.trim().to_string(), String::new()),
    };

    let denied = matches!(status, 401 | 403)
        || api_status == "PERMISSION_DENIED"
        || message.contains("PERMISSION_DENIED")
        || message.contains("Requested entity was not found");

    if denied {
        warn!("Route service rejected the API key (HTTP {})", status);
        RouteError::CredentialDenied(message)
    } else {
        RouteError::Transport(format!("HTTP {}: {}", status, message))
    }
}
