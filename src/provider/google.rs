// src/provider/google.rs — Google Generative AI (Gemini) provider

use async_trait::async_trait;

use super::{GenerationRequest, StructuredProvider};
use crate::infra::errors::TabijiError;

pub struct GoogleProvider {
    api_key: String,
    client: reqwest::Client,
}

impl GoogleProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    fn base_url(&self) -> &str {
        "https://generativelanguage.googleapis.com/v1beta"
    }

    /// Build the Gemini request body from a GenerationRequest.
    fn build_request_body(&self, request: &GenerationRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.prompt }],
            }],
        });

        // System instruction
        if let Some(ref system) = request.system {
            body["system_instruction"] = serde_json::json!({
                "parts": [{ "text": system }],
            });
        }

        // Generation config
        let mut gen_config = serde_json::json!({});
        if let Some(max_tokens) = request.max_output_tokens {
            gen_config["maxOutputTokens"] = serde_json::json!(max_tokens);
        }
        if let Some(temp) = request.temperature {
            gen_config["temperature"] = serde_json::json!(temp);
        }
        // Constrained JSON output
        if let Some(ref schema) = request.response_schema {
            gen_config["responseMimeType"] = serde_json::json!("application/json");
            gen_config["responseSchema"] = schema.clone();
        }
        if gen_config != serde_json::json!({}) {
            body["generationConfig"] = gen_config;
        }

        body
    }
}

#[async_trait]
impl StructuredProvider for GoogleProvider {
    fn id(&self) -> &str {
        "google"
    }

    fn name(&self) -> &str {
        "Google"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, TabijiError> {
        let body = self.build_request_body(&request);

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url(),
            request.model,
            self.api_key,
        );

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| TabijiError::Provider {
                provider: "google".into(),
                message: e.to_string(),
                retriable: e.is_timeout() || e.is_connect(),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TabijiError::Provider {
                provider: "google".into(),
                message: "rate limited".into(),
                retriable: true,
            });
        }

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(TabijiError::Provider {
                provider: "google".into(),
                message: format!("HTTP {}: {}", status, error_body),
                retriable: status.is_server_error(),
            });
        }

        let resp: serde_json::Value =
            response.json().await.map_err(|e| TabijiError::Provider {
                provider: "google".into(),
                message: format!("Failed to parse response: {}", e),
                retriable: false,
            })?;

        // Concatenate text content from candidates[0].content.parts
        let parts = resp["candidates"][0]["content"]["parts"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        let mut content = String::new();
        for part in &parts {
            if let Some(text) = part["text"].as_str() {
                content.push_str(text);
            }
        }

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_carries_prompt_and_system() {
        let provider = GoogleProvider::new("test-key".into());
        let body = provider.build_request_body(&GenerationRequest {
            model: "gemini-2.5-flash".into(),
            system: Some("You are a travel expert.".into()),
            prompt: "Analyze this CSV".into(),
            ..Default::default()
        });

        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            "Analyze this CSV"
        );
        assert_eq!(
            body["system_instruction"]["parts"][0]["text"],
            "You are a travel expert."
        );
        // No schema, no generationConfig
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn test_body_sets_json_mime_when_schema_present() {
        let provider = GoogleProvider::new("test-key".into());
        let schema = serde_json::json!({ "type": "OBJECT" });
        let body = provider.build_request_body(&GenerationRequest {
            model: "gemini-2.5-flash".into(),
            prompt: "go".into(),
            response_schema: Some(schema.clone()),
            max_output_tokens: Some(8192),
            ..Default::default()
        });

        let cfg = &body["generationConfig"];
        assert_eq!(cfg["responseMimeType"], "application/json");
        assert_eq!(cfg["responseSchema"], schema);
        assert_eq!(cfg["maxOutputTokens"], 8192);
    }
}
