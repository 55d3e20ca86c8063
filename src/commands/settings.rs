use std::time::{Duration, Instant};

use serde::Serialize;
use tauri::{Manager, State};

use crate::error::AppError;
use crate::security::keystore::{KeyStore, GEMINI_PROVIDER};
use crate::state::AppState;

const DEFAULT_HEALTH_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Save an API key for a provider.
#[tauri::command]
pub fn save_api_key(
    provider: String,
    key: String,
    keystore: State<'_, KeyStore>,
) -> Result<(), AppError> {
    crate::app_log!(
        "[settings] save_api_key provider={} key_len={}",
        provider,
        key.trim().len()
    );
    keystore.save_api_key(&provider, &key)
}

/// Check if an API key exists for a provider.
#[tauri::command]
pub fn has_api_key(provider: String, keystore: State<'_, KeyStore>) -> Result<bool, AppError> {
    crate::app_log!("[settings] has_api_key provider={}", provider);
    keystore.has_api_key(&provider)
}

/// Delete an API key for a provider.
#[tauri::command]
pub fn delete_api_key(provider: String, keystore: State<'_, KeyStore>) -> Result<(), AppError> {
    crate::app_log!("[settings] delete_api_key provider={}", provider);
    keystore.delete_api_key(&provider)
}

/// Sync frontend settings to Rust state.
/// Called by the frontend whenever settings change.
#[tauri::command]
pub fn sync_settings(
    state: State<'_, AppState>,
    voice: Option<String>,
    tts_model: Option<String>,
    tts_base_url: Option<String>,
    cloud_timeout_secs: Option<u64>,
    debug_logging_enabled: Option<bool>,
) {
    crate::app_log!(
        "[settings] sync_settings voice={:?} tts_model={:?} tts_base_url={:?} timeout={:?}",
        voice, tts_model, tts_base_url, cloud_timeout_secs
    );
    if let Some(voice) = voice {
        let trimmed = voice.trim();
        if !trimmed.is_empty() {
            *state.voice.lock().unwrap() = trimmed.to_string();
        }
    }
    if let Some(model) = tts_model {
        let trimmed = model.trim();
        *state.tts_model.lock().unwrap() = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }
    if let Some(base_url) = tts_base_url {
        let trimmed = base_url.trim();
        *state.tts_base_url.lock().unwrap() = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.trim_end_matches('/').to_string())
        };
    }
    if let Some(timeout) = cloud_timeout_secs {
        *state.cloud_timeout_secs.lock().unwrap() = timeout.clamp(10, 600);
    }
    if let Some(enabled) = debug_logging_enabled {
        *state.debug_logging_enabled.lock().unwrap() = enabled;
    }
}

/// UI debug bridge from frontend.
#[tauri::command]
pub fn debug_ui_event(event: String, payload: String, state: State<'_, AppState>) {
    if !*state.debug_logging_enabled.lock().unwrap() {
        return;
    }
    crate::app_log!("[ui-debug] {} {}", event, payload);
}

#[tauri::command]
pub fn open_devtools(app: tauri::AppHandle, window_label: Option<String>) {
    let label = window_label.unwrap_or_else(|| "main".to_string());
    match app.get_webview_window(&label) {
        Some(window) => window.open_devtools(),
        None => crate::app_log!("[settings] open_devtools: window not found: {label}"),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderHealth {
    pub ok: bool,
    pub has_key: bool,
    pub latency_ms: Option<u128>,
    pub status: String,
}

/// Ping the speech provider's models endpoint with the stored key.
#[tauri::command]
pub async fn check_provider_health(
    state: State<'_, AppState>,
    keystore: State<'_, KeyStore>,
) -> Result<ProviderHealth, AppError> {
    let Some(api_key) = keystore.get_api_key(GEMINI_PROVIDER)? else {
        return Ok(ProviderHealth {
            ok: false,
            has_key: false,
            latency_ms: None,
            status: format!("Missing API key for {GEMINI_PROVIDER}"),
        });
    };

    let base_url = state
        .tts_base_url
        .lock()
        .unwrap()
        .clone()
        .unwrap_or_else(|| DEFAULT_HEALTH_BASE_URL.to_string());

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(12))
        .build()
        .map_err(|e| AppError::Upstream(format!("Health check client error: {e}")))?;

    let started = Instant::now();
    let response = client
        .get(format!("{base_url}/models"))
        .header("x-goog-api-key", &api_key)
        .send()
        .await;
    let elapsed_ms = started.elapsed().as_millis();

    crate::app_log!(
        "[healthcheck] provider={} latency_ms={} ok={}",
        GEMINI_PROVIDER,
        elapsed_ms,
        matches!(&response, Ok(r) if r.status().is_success())
    );

    match response {
        Ok(r) if r.status().is_success() => Ok(ProviderHealth {
            ok: true,
            has_key: true,
            latency_ms: Some(elapsed_ms),
            status: format!("OK ({elapsed_ms} ms)"),
        }),
        Ok(r) => Ok(ProviderHealth {
            ok: false,
            has_key: true,
            latency_ms: Some(elapsed_ms),
            status: format!("Gemini API error: HTTP {}", r.status()),
        }),
        Err(e) => Ok(ProviderHealth {
            ok: false,
            has_key: true,
            latency_ms: Some(elapsed_ms),
            status: format!("Gemini network error: {e}"),
        }),
    }
}
