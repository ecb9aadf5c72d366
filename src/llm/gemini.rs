use async_trait::async_trait;
use reqwest::Client;

use super::provider::{GenerationError, TextGenerator};
use super::types::{GenerateContentRequest, GenerateContentResponse};
use crate::core::config::settings::GenerationSettings;

/// Returned when the service answers successfully but without usable text.
pub const FALLBACK_RESPONSE: &str = "Sorry, I could not generate a response.";

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: Option<String>,
    client: Client,
}

impl GeminiClient {
    pub fn new(base_url: &str, model: &str, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
            client: Client::new(),
        }
    }

    pub fn from_settings(settings: &GenerationSettings) -> Self {
        Self::new(&settings.base_url, &settings.model, settings.api_key.clone())
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let Some(api_key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
            return Err(GenerationError::Configuration(
                "GEMINI_API_KEY is not set".to_string(),
            ));
        };

        let res = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| GenerationError::Service {
                status: None,
                body: e.to_string(),
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| GenerationError::Service {
            status: Some(status.as_u16()),
            body: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(GenerationError::Service {
                status: Some(status.as_u16()),
                body,
            });
        }

        let payload: GenerateContentResponse = match serde_json::from_str(&body) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!("Unparsable Gemini response, using fallback: {}", err);
                return Ok(FALLBACK_RESPONSE.to_string());
            }
        };

        Ok(payload
            .first_text()
            .map(str::to_string)
            .unwrap_or_else(|| FALLBACK_RESPONSE.to_string()))
    }
}
