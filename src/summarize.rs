//! Text-generation client used to draft folder overviews.
//!
//! The backfiller only depends on the [`Summarizer`] trait; the HTTP client
//! below talks to the Anthropic Messages API. Calls are blocking and
//! sequential, with no retry and no streaming.

use crate::config::SummarizerConfig;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("ANTHROPIC_API_KEY is not set")]
    MissingApiKey,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Response contained no text")]
    EmptyResponse,
}

/// A prompt plus the persona and token budget it runs under.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRequest {
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
}

/// Anything that turns a [`SummaryRequest`] into free text.
pub trait Summarizer {
    fn summarize(&self, request: &SummaryRequest) -> Result<String, SummarizeError>;
}

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: Vec<MessageContent<'a>>,
}

#[derive(Serialize)]
struct MessageContent<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

/// Blocking Anthropic Messages API client.
pub struct AnthropicSummarizer {
    client: reqwest::blocking::Client,
    api_key: String,
    config: SummarizerConfig,
}

impl AnthropicSummarizer {
    pub fn new(api_key: String, config: SummarizerConfig) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            api_key,
            config,
        }
    }

    /// Build a client with the key from `ANTHROPIC_API_KEY`.
    pub fn from_env(config: SummarizerConfig) -> Result<Self, SummarizeError> {
        let api_key = env::var(API_KEY_VAR)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(SummarizeError::MissingApiKey)?;
        Ok(Self::new(api_key, config))
    }

    fn request_body<'a>(&'a self, request: &'a SummaryRequest) -> ApiRequest<'a> {
        ApiRequest {
            model: &self.config.model,
            max_tokens: request.max_tokens,
            temperature: self.config.temperature,
            system: &request.system,
            messages: vec![Message {
                role: "user",
                content: vec![MessageContent {
                    content_type: "text",
                    text: &request.prompt,
                }],
            }],
        }
    }
}

impl Summarizer for AnthropicSummarizer {
    fn summarize(&self, request: &SummaryRequest) -> Result<String, SummarizeError> {
        let response = self
            .client
            .post(&self.config.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&self.request_body(request))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(SummarizeError::Api {
                status: status.as_u16(),
                message: response.text().unwrap_or_default(),
            });
        }

        let body: ApiResponse = response.json()?;
        extract_text(body)
    }
}

/// Concatenate the text blocks of a response.
fn extract_text(body: ApiResponse) -> Result<String, SummarizeError> {
    let text: String = body
        .content
        .into_iter()
        .filter(|block| block.content_type == "text")
        .filter_map(|block| block.text)
        .collect();
    if text.is_empty() {
        Err(SummarizeError::EmptyResponse)
    } else {
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SummaryRequest {
        SummaryRequest {
            system: "You write docs.".to_string(),
            prompt: "Summarize apis".to_string(),
            max_tokens: 1000,
        }
    }

    #[test]
    fn request_body_shape() {
        let client = AnthropicSummarizer::new("key".to_string(), SummarizerConfig::default());
        let req = request();
        let body = serde_json::to_value(client.request_body(&req)).unwrap();

        assert_eq!(body["model"], "claude-3-opus-20240229");
        assert_eq!(body["max_tokens"], 1000);
        assert_eq!(body["temperature"], 0.0);
        assert_eq!(body["system"], "You write docs.");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"][0]["type"], "text");
        assert_eq!(body["messages"][0]["content"][0]["text"], "Summarize apis");
    }

    #[test]
    fn extract_text_joins_text_blocks() {
        let body: ApiResponse = serde_json::from_str(
            r##"{"content":[{"type":"text","text":"# apis\n"},{"type":"text","text":"| a | b |"}]}"##,
        )
        .unwrap();
        assert_eq!(extract_text(body).unwrap(), "# apis\n| a | b |");
    }

    #[test]
    fn extract_text_skips_non_text_blocks() {
        let body: ApiResponse = serde_json::from_str(
            r#"{"content":[{"type":"tool_use","id":"x"},{"type":"text","text":"ok"}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(body).unwrap(), "ok");
    }

    #[test]
    fn extract_text_empty_is_error() {
        let body: ApiResponse = serde_json::from_str(r#"{"content":[]}"#).unwrap();
        assert!(matches!(
            extract_text(body),
            Err(SummarizeError::EmptyResponse)
        ));
    }

    #[test]
    fn unreachable_endpoint_is_http_error() {
        let config = SummarizerConfig {
            api_url: "http://127.0.0.1:9/v1/messages".to_string(),
            ..SummarizerConfig::default()
        };
        let client = AnthropicSummarizer::new("key".to_string(), config);
        assert!(matches!(
            client.summarize(&request()),
            Err(SummarizeError::Http(_))
        ));
    }
}
