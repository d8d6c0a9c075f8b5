use std::future::Future;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::service::AdvisoryError;
use crate::config::AdvisorConfig;

/// Returned when the model answers without any usable text.
pub const FALLBACK_ADVICE: &str = "Unable to generate advice at this time. Please try again.";

/// Free-text advice source behind the advisor endpoint.
pub trait AdviceGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, UpstreamError>> + Send;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UpstreamError {
    #[error("request to text generation service failed: {0}")]
    Transport(String),
    #[error("text generation service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode text generation response: {0}")]
    Decode(String),
}

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl GeminiClient {
    pub fn from_config(config: &AdvisorConfig) -> Result<Self, AdvisoryError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(AdvisoryError::MissingCredential)?;

        Ok(Self {
            client: Client::new(),
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn request_body<'a>(&self, prompt: &'a str) -> GenerateRequest<'a> {
        GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        }
    }
}

impl AdviceGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        debug!(model = %self.model, prompt_chars = prompt.len(), "requesting advice");

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|err| UpstreamError::Transport(err.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|err| UpstreamError::Decode(err.without_url().to_string()))?;

        Ok(payload
            .first_text()
            .unwrap_or_else(|| FALLBACK_ADVICE.to_string()))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: Option<&str>) -> AdvisorConfig {
        AdvisorConfig {
            api_key: api_key.map(str::to_string),
            model: "gemini-2.0-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            temperature: 0.7,
            max_output_tokens: 500,
        }
    }

    #[test]
    fn missing_key_is_reported() {
        let err = GeminiClient::from_config(&config(None))
            .err()
            .expect("missing key rejected");
        assert!(matches!(err, AdvisoryError::MissingCredential));
    }

    #[test]
    fn request_matches_generate_content_shape() {
        let client = GeminiClient::from_config(&config(Some("k"))).expect("client");
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );

        let body = serde_json::to_value(client.request_body("hello")).expect("serializes");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 500);
        let temperature = body["generationConfig"]["temperature"]
            .as_f64()
            .expect("number");
        assert!((temperature - 0.7).abs() < 1e-6);
    }

    #[test]
    fn extracts_first_candidate_text() {
        let payload: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Irrigate tonight."},{"text":"ignored"}]}}]}"#,
        )
        .expect("valid payload");
        assert_eq!(payload.first_text().as_deref(), Some("Irrigate tonight."));
    }

    #[test]
    fn empty_response_has_no_text() {
        for raw in [
            r#"{}"#,
            r#"{"candidates":[]}"#,
            r#"{"candidates":[{"content":{"parts":[]}}]}"#,
            r#"{"candidates":[{"content":{"parts":[{"text":""}]}}]}"#,
        ] {
            let payload: GenerateResponse = serde_json::from_str(raw).expect("valid payload");
            assert_eq!(payload.first_text(), None, "{raw}");
        }
    }
}
