//! Gemini Client
//!
//! `generateContent` over REST. One user turn holding the prompt and, for
//! recognition, the photo as `inlineData`. The model is asked to answer
//! with `application/json`.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::config::AiConfig;
use crate::domain::image::InlineImage;
use crate::domain::model::GenerativeModel;
use crate::error::{AiError, AiResult};

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &AiConfig) -> AiResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AiError::Internal("Gemini API key is not configured".into()));
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AiError::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
            api_key: config.api_key.clone(),
        })
    }
}

impl GenerativeModel for GeminiClient {
    async fn generate(&self, prompt: &str, image: Option<&InlineImage>) -> AiResult<String> {
        let request = GeminiRequest::new(prompt, image);

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &body));
        }

        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AiError::Upstream(format!("unreadable response: {}", e.without_url())))?;

        tracing::debug!(
            with_image = image.is_some(),
            prompt_chars = prompt.len(),
            "Gemini answered"
        );
        body.into_text()
    }
}

/// Transport errors carry the request URL, which holds the key
fn classify_transport(err: reqwest::Error) -> AiError {
    if err.is_timeout() {
        AiError::Timeout
    } else {
        AiError::Upstream(err.without_url().to_string())
    }
}

fn classify_status(status: StatusCode, body: &str) -> AiError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return AiError::UpstreamBusy;
    }
    if status == StatusCode::GATEWAY_TIMEOUT || status == StatusCode::REQUEST_TIMEOUT {
        return AiError::Timeout;
    }
    let detail: String = body.chars().take(200).collect();
    AiError::Upstream(format!("status {status}: {detail}"))
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

impl GeminiRequest {
    fn new(prompt: &str, image: Option<&InlineImage>) -> Self {
        let mut parts = vec![Part {
            text: Some(prompt.to_string()),
            inline_data: None,
        }];
        if let Some(image) = image {
            parts.push(Part {
                text: None,
                inline_data: Some(InlineData {
                    mime_type: image.mime_type.clone(),
                    data: image.to_base64(),
                }),
            });
        }

        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                temperature: 0.4,
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GeminiResponse {
    fn into_text(self) -> AiResult<String> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(AiError::Upstream(format!("prompt blocked: {reason}")));
        }

        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AiError::Upstream("empty response".into()));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let image = InlineImage {
            mime_type: "image/png".into(),
            data: b"hello".to_vec(),
        };
        let value = serde_json::to_value(GeminiRequest::new("What is this?", Some(&image))).unwrap();

        assert_eq!(
            value,
            json!({
                "contents": [{
                    "role": "user",
                    "parts": [
                        {"text": "What is this?"},
                        {"inlineData": {"mimeType": "image/png", "data": "aGVsbG8="}}
                    ]
                }],
                "generationConfig": {"responseMimeType": "application/json", "temperature": 0.4}
            })
        );
    }

    #[test]
    fn test_response_text_joins_parts() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": "{\"a\":"}, {"text": "1}"}]}}]
        }))
        .unwrap();
        assert_eq!(response.into_text().unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_response_blocked_or_empty() {
        let blocked: GeminiResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();
        assert!(matches!(blocked.into_text(), Err(AiError::Upstream(msg)) if msg.contains("SAFETY")));

        let empty: GeminiResponse = serde_json::from_value(json!({"candidates": []})).unwrap();
        assert!(empty.into_text().is_err());
    }

    #[test]
    fn test_classify_status() {
        assert!(matches!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, ""),
            AiError::UpstreamBusy
        ));
        assert!(matches!(
            classify_status(StatusCode::GATEWAY_TIMEOUT, ""),
            AiError::Timeout
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_REQUEST, "API key not valid"),
            AiError::Upstream(_)
        ));
    }

    #[test]
    fn test_new_requires_key() {
        assert!(GeminiClient::new(&AiConfig::default()).is_err());
        let config = AiConfig {
            api_key: "test-key".into(),
            ..Default::default()
        };
        assert!(GeminiClient::new(&config).is_ok());
    }
}
