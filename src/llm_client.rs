use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::Config;
use crate::extraction::{parse_extraction_content, ExtractionError, LeadExtractor};
use crate::models::ExtractionResult;

const SYSTEM_PROMPT: &str = "You are an information extraction assistant. Extract lead fields as strict JSON with keys: \
full_name, email, phone, source. Use 'manual' as default for source if not provided. \
Return only valid JSON without code fences.";

fn user_prompt(input_text: &str) -> String {
    format!(
        "Input text:\n{}\n\nRespond with a JSON object like: \
         {{\"full_name\": \"...\", \"email\": \"...\", \"phone\": \"...\", \"source\": \"manual\"}}",
        input_text
    )
}

/// Extraction adapter backed by an OpenAI-compatible chat-completion API.
///
/// The first call asks for `response_format: json_object`. Providers that
/// reject structured output (or answer with something unparseable) get one
/// more call without it, and the JSON object is dug out of the free text.
#[derive(Clone)]
pub struct OpenAiExtractor {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAiExtractor {
    /// Creates a new `OpenAiExtractor`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - API root, e.g. `https://api.openai.com/v1`.
    /// * `api_key` - Bearer token. `None` makes every call fail with `CredentialMissing`.
    /// * `model` - Chat model name.
    /// * `timeout` - Per-request timeout.
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        model: String,
        timeout: Duration,
    ) -> Result<Self, ExtractionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                ExtractionError::Transport(format!("Failed to create model client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ExtractionError> {
        Self::new(
            config.openai_base_url.clone(),
            config.openai_api_key.clone(),
            config.openai_model.clone(),
            Duration::from_secs(config.llm_timeout_secs),
        )
    }

    /// Sends one chat-completion request and returns the assistant content.
    async fn complete(
        &self,
        api_key: &str,
        input_text: &str,
        strict_json: bool,
    ) -> Result<String, ExtractionError> {
        let url = format!("{}/chat/completions", self.base_url);

        let mut body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": user_prompt(input_text)},
            ],
            "temperature": 0,
        });
        if strict_json {
            body["response_format"] = json!({"type": "json_object"});
        }

        tracing::debug!(
            "Calling chat completion (model={}, strict_json={})",
            self.model,
            strict_json
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| ExtractionError::Transport(format!("Model request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ExtractionError::UpstreamStatus {
                status,
                body: error_text,
            });
        }

        let data: Value = response.json().await.map_err(|e| {
            ExtractionError::UnparseableResponse(format!("Invalid completion envelope: {}", e))
        })?;

        message_content(&data)
    }
}

/// Pulls `choices[0].message.content` out of a completion envelope.
///
/// A body without a first choice message (an empty `choices` list, or a
/// provider error object sent with 200) is unparseable. A message whose
/// content is null reads as an empty object.
fn message_content(data: &Value) -> Result<String, ExtractionError> {
    let message = data
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .ok_or_else(|| {
            ExtractionError::UnparseableResponse(format!(
                "completion has no choices[0].message: {}",
                data
            ))
        })?;

    let content = message
        .get("content")
        .and_then(|c| c.as_str())
        .filter(|c| !c.is_empty())
        .unwrap_or("{}");

    Ok(content.to_string())
}

#[async_trait]
impl LeadExtractor for OpenAiExtractor {
    fn name(&self) -> &str {
        "openai"
    }

    async fn extract(&self, text: &str) -> Result<ExtractionResult, ExtractionError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ExtractionError::CredentialMissing)?;

        let strict = match self.complete(api_key, text, true).await {
            Ok(content) => serde_json::from_str::<Value>(&content)
                .map_err(|e| ExtractionError::UnparseableResponse(e.to_string()))
                .and_then(|value| {
                    if value.is_object() {
                        Ok(ExtractionResult::from_json(&value))
                    } else {
                        Err(ExtractionError::UnparseableResponse(
                            "model response is not a JSON object".to_string(),
                        ))
                    }
                }),
            Err(e) => Err(e),
        };

        match strict {
            Ok(fields) => Ok(fields),
            Err(e) => {
                tracing::warn!(
                    "Structured extraction failed ({}), retrying without response_format",
                    e
                );
                let content = self.complete(api_key, text, false).await?;
                parse_extraction_content(&content)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation_trims_base_url() {
        let client = OpenAiExtractor::new(
            "https://api.example.com/v1/".to_string(),
            Some("key".to_string()),
            "gpt-4o-mini".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.base_url, "https://api.example.com/v1");
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_network() {
        let client = OpenAiExtractor::new(
            "http://127.0.0.1:9".to_string(),
            None,
            "gpt-4o-mini".to_string(),
            Duration::from_secs(1),
        )
        .unwrap();

        let err = client.extract("my name is Ann Lee").await.unwrap_err();
        assert_eq!(err, ExtractionError::CredentialMissing);
    }

    #[test]
    fn test_message_content_requires_first_choice() {
        for body in [
            json!({"choices": []}),
            json!({"error": {"message": "quota exceeded"}}),
            json!({"choices": [{"finish_reason": "length"}]}),
        ] {
            assert!(matches!(
                message_content(&body),
                Err(ExtractionError::UnparseableResponse(_))
            ));
        }
    }

    #[test]
    fn test_message_content_null_reads_as_empty_object() {
        let body = json!({"choices": [{"message": {"role": "assistant", "content": null}}]});
        assert_eq!(message_content(&body).unwrap(), "{}");

        let body = json!({"choices": [{"message": {"content": "{\"full_name\": \"Jo\"}"}}]});
        assert_eq!(message_content(&body).unwrap(), "{\"full_name\": \"Jo\"}");
    }

    #[test]
    fn test_user_prompt_embeds_text() {
        let prompt = user_prompt("call Jo");
        assert!(prompt.starts_with("Input text:\ncall Jo\n"));
        assert!(prompt.contains("\"source\": \"manual\""));
    }
}
