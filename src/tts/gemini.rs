use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde_json::json;

use super::{CloudTtsEngine, TtsConfig};
use crate::error::AppError;

/// Gemini generative speech engine.
/// Posts a production brief to `generateContent` with the AUDIO response
/// modality; the reply carries base64 16-bit PCM as inline data.
pub struct GeminiTtsEngine {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

impl GeminiTtsEngine {
    pub fn new(api_key: String, model: Option<String>, base_url: Option<String>) -> Self {
        let base_url = base_url
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "https://generativelanguage.googleapis.com/v1beta".to_string());
        let model = model
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "gemini-2.5-flash-preview-tts".to_string());
        Self {
            api_key,
            model,
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn next_request_id() -> u64 {
        NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed)
    }

    fn response_request_id(headers: &reqwest::header::HeaderMap) -> String {
        const CANDIDATES: [&str; 4] = ["x-request-id", "request-id", "x-correlation-id", "trace-id"];
        for key in CANDIDATES {
            if let Some(value) = headers.get(key).and_then(|v| v.to_str().ok()) {
                if !value.trim().is_empty() {
                    return value.to_string();
                }
            }
        }
        "n/a".to_string()
    }
}

impl CloudTtsEngine for GeminiTtsEngine {
    async fn synthesize(&self, brief: &str, config: &TtsConfig) -> Result<String, AppError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": brief }] }],
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": {
                        "prebuiltVoiceConfig": { "voiceName": config.voice }
                    }
                }
            }
        });

        let started = Instant::now();
        let response = self
            .client
            .post(format!("{}/models/{}:generateContent", self.base_url, self.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Gemini request failed: {e}")))?;

        let status = response.status();
        let upstream_request_id = Self::response_request_id(response.headers());
        let body_text = response
            .text()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to read response: {e}")))?;
        let latency_ms = started.elapsed().as_millis();
        let local_request_id = Self::next_request_id();
        crate::app_log!(
            "[tts-http] provider=gemini request_id={} upstream_request_id={} status={} latency_ms={}",
            local_request_id, upstream_request_id, status, latency_ms
        );

        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "Gemini API error ({status}): {body_text}"
            )));
        }

        let json: serde_json::Value = serde_json::from_str(&body_text)
            .map_err(|e| AppError::Upstream(format!("Failed to parse Gemini response: {e}")))?;

        json["candidates"][0]["content"]["parts"][0]["inlineData"]["data"]
            .as_str()
            .filter(|data| !data.is_empty())
            .map(String::from)
            .ok_or_else(|| AppError::Upstream("No audio data received from the API".into()))
    }

    fn provider_name(&self) -> &str {
        "Gemini Speech"
    }
}
