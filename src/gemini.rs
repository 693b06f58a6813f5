//! Gemini client (Google Generative Language API).
//!
//! One prompt in, one complete response text out. Nothing is streamed, so the
//! parser only ever sees a finished response.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::config::ApiConfig;
use crate::error::{Error, Result};

/// Gemini API configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a config from the `[api]` table and the environment.
    ///
    /// The key is read from the variable named by `api_key_env`.
    /// `GEMINI_BASE_URL`, when set, overrides the configured base URL.
    pub fn from_config(api: &ApiConfig) -> Result<Self> {
        let api_key = std::env::var(&api.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::MissingApiKey(api.api_key_env.clone()))?;

        Ok(Self {
            api_key,
            base_url: resolve_base_url(std::env::var("GEMINI_BASE_URL").ok(), &api.base_url),
            model: api.model.clone(),
            timeout: Duration::from_secs(api.timeout_secs),
        })
    }
}

/// Gemini client.
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Api(format!("Client setup failed: {}", e)))?;
        Ok(Self { config, http })
    }

    /// Send one prompt and return the full response text.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        info!(model = %self.config.model, "requesting strategy");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&build_request(prompt))
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_reqwest_error)?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Gemini request failed");
            return Err(Error::Api(format!(
                "HTTP {}: {}",
                status.as_u16(),
                error_message(&body)
            )));
        }

        let text = extract_text(&body)?;
        debug!(chars = text.len(), "received response");
        Ok(text)
    }
}

fn resolve_base_url(env_url: Option<String>, config_url: &str) -> String {
    let url = env_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| config_url.trim());
    url.trim_end_matches('/').to_string()
}

fn build_request(prompt: &str) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{"text": prompt}]
        }]
    })
}

fn classify_reqwest_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Api(format!("Request timed out: {}", e))
    } else if e.is_connect() {
        Error::Api(format!("Connection failed: {}", e))
    } else {
        Error::Api(format!("Network error: {}", e))
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

/// Concatenate the text parts of the first candidate.
fn extract_text(body: &str) -> Result<String> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| Error::Api(format!("Invalid response: {}", e)))?;

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(Error::EmptyResponse);
    }
    Ok(text)
}

/// The API's own error message when the body carries one.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_shape() {
        let body = build_request("hello");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn text_parts_are_concatenated() {
        let body = r##"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "# Title\n"}, {"text": "Body"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"##;
        assert_eq!(extract_text(body).unwrap(), "# Title\nBody");
    }

    #[test]
    fn missing_or_blank_text_is_empty_response() {
        for body in [
            r#"{}"#,
            r#"{"candidates": []}"#,
            r#"{"candidates": [{"finishReason": "SAFETY"}]}"#,
            r#"{"candidates": [{"content": {"parts": [{"text": "  \n"}]}}]}"#,
        ] {
            assert!(
                matches!(extract_text(body), Err(Error::EmptyResponse)),
                "body: {body}"
            );
        }
    }

    #[test]
    fn malformed_body_is_api_error() {
        let err = extract_text("<html>bad gateway</html>").unwrap_err();
        assert!(err.to_string().starts_with("Gemini API Error: Invalid response"));
    }

    #[test]
    fn error_message_prefers_api_message() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message(body), "API key not valid.");
        assert_eq!(error_message(" upstream down \n"), "upstream down");
    }

    #[test]
    fn base_url_resolution() {
        assert_eq!(
            resolve_base_url(None, "https://example.com/v1beta/"),
            "https://example.com/v1beta"
        );
        assert_eq!(
            resolve_base_url(Some("  ".to_string()), "https://example.com"),
            "https://example.com"
        );
        assert_eq!(
            resolve_base_url(Some("http://localhost:8080".to_string()), "https://example.com"),
            "http://localhost:8080"
        );
    }

    #[test]
    fn missing_api_key() {
        let api = ApiConfig {
            api_key_env: "SEO_STRATEGY_TEST_UNSET_KEY".to_string(),
            ..ApiConfig::default()
        };
        match GeminiConfig::from_config(&api) {
            Err(Error::MissingApiKey(var)) => assert_eq!(var, "SEO_STRATEGY_TEST_UNSET_KEY"),
            other => panic!("unexpected result: {:?}", other.map(|c| c.model)),
        }
    }

    #[test]
    fn error_display() {
        assert_eq!(
            Error::EmptyResponse.to_string(),
            "The API returned an empty response."
        );
        assert_eq!(
            Error::Api("HTTP 500: boom".to_string()).to_string(),
            "Gemini API Error: HTTP 500: boom"
        );
    }
}
