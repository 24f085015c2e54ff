//! Motivational quotes and form tips from a text-generation API.
//!
//! Purely additive: every failure (disabled, no key, network, HTTP status,
//! malformed body) turns into a fixed fallback string. Nothing here
//! returns an error to the caller.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::storage::QuoteConfig;

pub const DEFAULT_WORKOUT: &str = "The Sovereign Soul";
/// Returned when the API answers with no text.
pub const QUOTE_EMPTY: &str = "The soul that suffers, conquers.";
/// Returned when the call fails.
pub const QUOTE_FALLBACK: &str = "Discipline is the bridge between goals and accomplishment.";
pub const TIP_EMPTY: &str =
    "Focus on your breathing and maintain proper alignment throughout the movement.";
pub const TIP_FALLBACK: &str = "Stay focused and maintain consistent form.";

#[derive(Error, Debug)]
enum QuoteError {
    #[error("text generation disabled in config")]
    Disabled,

    #[error("no API key in ${0}")]
    MissingApiKey(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("text generation error: HTTP {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    fn text(&self) -> Option<String> {
        let text: String = self
            .candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

pub struct QuoteClient {
    client: Client,
    config: QuoteConfig,
    api_key: Option<String>,
}

impl QuoteClient {
    /// Build a client, reading the API key from `config.api_key_env`.
    pub fn new(config: QuoteConfig) -> Self {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty());
        Self::with_api_key(config, api_key)
    }

    pub fn with_api_key(config: QuoteConfig, api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "http client builder failed, using defaults");
                Client::new()
            });
        Self {
            client,
            config,
            api_key,
        }
    }

    /// A short stoic quote for finishing `workout`.
    pub async fn motivational_quote(&self, workout: &str) -> String {
        let prompt = format!(
            "Provide a short, powerful, and stoic motivational quote for a warrior completing \
             an intense workout named \"{workout}\". Focus on themes of discipline, internal \
             strength, and the \"Sovereign Soul\" spirit. Keep it under 20 words."
        );
        match self.generate(&prompt, Some(self.config.temperature)).await {
            Ok(Some(text)) => text,
            Ok(None) => QUOTE_EMPTY.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "motivational quote unavailable");
                QUOTE_FALLBACK.to_string()
            }
        }
    }

    /// Two or three sentences on benefit and form of an exercise.
    pub async fn exercise_tip(&self, exercise_name: &str) -> String {
        let prompt = format!(
            "Briefly explain the benefit and proper form of \"{exercise_name}\" in 2-3 \
             sentences. Make it sound encouraging but professional."
        );
        match self.generate(&prompt, None).await {
            Ok(Some(text)) => text,
            Ok(None) => TIP_EMPTY.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "exercise tip unavailable");
                TIP_FALLBACK.to_string()
            }
        }
    }

    async fn generate(
        &self,
        prompt: &str,
        temperature: Option<f64>,
    ) -> Result<Option<String>, QuoteError> {
        if !self.config.enabled {
            return Err(QuoteError::Disabled);
        }
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| QuoteError::MissingApiKey(self.config.api_key_env.clone()))?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        );
        let mut body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });
        if let Some(t) = temperature {
            body["generationConfig"] = json!({ "temperature": t });
        }

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(QuoteError::Status(resp.status()));
        }
        let parsed: GenerateResponse = resp.json().await?;
        Ok(parsed.text())
    }
}
