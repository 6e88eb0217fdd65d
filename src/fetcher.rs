use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_MODEL: &str = "mistralai/Mixtral-8x7B-Instruct-v0.1";

pub const DEFAULT_MAX_NEW_TOKENS: u32 = 1000;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Endpoint URL for a hosted model on the serverless Inference API
pub fn model_url(model: &str) -> String {
    format!("https://api-inference.huggingface.co/models/{}", model)
}

#[derive(Serialize)]
struct GenerateRequest {
    inputs: String,
    parameters: GenerateParameters,
}

#[derive(Serialize)]
struct GenerateParameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}

#[derive(Deserialize)]
struct GeneratedText {
    generated_text: Option<String>,
}

/// Why a fetch fell back instead of returning generated text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    /// Transport-level error (connection refused, DNS, TLS, ...)
    Network,
    /// The API answered with a non-2xx status
    Http(u16),
    /// The body was not the expected payload, or carried no generated text
    Payload,
}

/// The result of a fetch. There is no error variant: every failure is
/// converted into a deterministic fallback reply at this boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Reply(String),
    Fallback { reason: FetchFailure, text: String },
}

impl FetchOutcome {
    pub fn text(&self) -> &str {
        match self {
            FetchOutcome::Reply(text) => text,
            FetchOutcome::Fallback { text, .. } => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, FetchOutcome::Fallback { .. })
    }
}

/// The substitute reply shown when the inference call fails
pub fn fallback_text(utterance: &str) -> String {
    format!(
        "Mock AI Response: You said \"{}\". How can I assist you further?",
        utterance
    )
}

#[derive(Clone)]
pub struct HfClient {
    client: Client,
    api_url: String,
    api_key: String,
    max_new_tokens: u32,
    temperature: f32,
}

impl HfClient {
    pub fn new(api_url: &str, api_key: &str, max_new_tokens: u32, temperature: f32) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
            max_new_tokens,
            temperature,
        }
    }

    /// Send one utterance to the inference endpoint. Never fails: any
    /// transport, HTTP, or payload problem becomes a `Fallback` outcome.
    pub async fn fetch(&self, utterance: &str) -> FetchOutcome {
        match self.generate(utterance).await {
            Ok(text) => FetchOutcome::Reply(text),
            Err(reason) => FetchOutcome::Fallback {
                reason,
                text: fallback_text(utterance),
            },
        }
    }

    async fn generate(&self, utterance: &str) -> Result<String, FetchFailure> {
        let request = GenerateRequest {
            inputs: format!("<s>[INST] You are a test assistant. {} [/INST]", utterance),
            parameters: GenerateParameters {
                max_new_tokens: self.max_new_tokens,
                temperature: self.temperature,
                return_full_text: false,
            },
        };

        debug!(
            url = %self.api_url,
            max_new_tokens = self.max_new_tokens,
            temperature = self.temperature,
            "sending generation request"
        );

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("inference request failed: {e}");
                FetchFailure::Network
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, %body, "inference API returned an error");
            return Err(FetchFailure::Http(status.as_u16()));
        }

        let payload: Vec<GeneratedText> = response.json().await.map_err(|e| {
            warn!("malformed response payload: {e}");
            FetchFailure::Payload
        })?;

        match payload.into_iter().next().and_then(|g| g.generated_text) {
            Some(text) if !text.is_empty() => {
                debug!(chars = text.len(), "received generated text");
                Ok(text)
            }
            _ => {
                warn!("response carried no generated text");
                Err(FetchFailure::Payload)
            }
        }
    }
}
