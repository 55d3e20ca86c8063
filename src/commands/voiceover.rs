use std::time::Duration;

use serde::Serialize;
use tauri::State;

use crate::audio::{pcm, wav};
use crate::error::AppError;
use crate::publisher::{PublishedResource, ResourcePublisher};
use crate::security::keystore::{KeyStore, GEMINI_PROVIDER};
use crate::state::AppState;
use crate::tts::brief::{self, ProductionNotes};
use crate::tts::gemini::GeminiTtsEngine;
use crate::tts::{CloudTtsEngine, TtsConfig, OUTPUT_CHANNEL_COUNT, OUTPUT_SAMPLE_RATE};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceoverResult {
    pub resource: PublishedResource,
    pub base64_audio: String,
    pub duration_secs: f32,
    pub rms_level: f32,
}

/// Generate a voiceover production: build the brief, synthesize via the
/// cloud engine, then decode, interpret, encode and publish the result.
/// The returned base64 payload is what the frontend persists for replay.
#[tauri::command]
pub async fn generate_voiceover(
    text: String,
    notes: ProductionNotes,
    state: State<'_, AppState>,
    keystore: State<'_, KeyStore>,
    publisher: State<'_, ResourcePublisher>,
) -> Result<VoiceoverResult, AppError> {
    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(AppError::Tts("No text provided for synthesis".into()));
    }

    let voice = state.voice.lock().unwrap().clone();
    let model = state.tts_model.lock().unwrap().clone();
    let base_url = state.tts_base_url.lock().unwrap().clone();
    let timeout_secs = (*state.cloud_timeout_secs.lock().unwrap()).clamp(10, 600);

    crate::app_log!(
        "[voiceover] generate text_len={} emotion={:?} music={:?} voice={}",
        text.len(),
        notes.emotion,
        notes.background_music,
        voice
    );

    let api_key = keystore
        .get_api_key(GEMINI_PROVIDER)?
        .ok_or_else(|| AppError::Security(format!("No API key configured for {GEMINI_PROVIDER}")))?;

    let production_brief = brief::build_production_brief(&text, &notes);
    let config = TtsConfig { voice };
    let engine = GeminiTtsEngine::new(api_key, model, base_url);

    let base64_audio = tokio::time::timeout(
        Duration::from_secs(timeout_secs),
        engine.synthesize(&production_brief, &config),
    )
    .await
    .map_err(|_| {
        AppError::Upstream("Speech synthesis timed out. Check internet and try again.".into())
    })??;

    let (resource, duration_secs, rms_level) = render_and_publish(&base64_audio, &publisher)?;

    crate::app_log!(
        "[voiceover] published {} duration={duration_secs:.2}s",
        resource.path
    );

    Ok(VoiceoverResult {
        resource,
        base64_audio,
        duration_secs,
        rms_level,
    })
}

/// Rebuild the playable resource from a persisted base64 payload without
/// calling the speech service. Used when restoring the last session.
#[tauri::command]
pub fn restore_voiceover(
    base64_audio: String,
    publisher: State<'_, ResourcePublisher>,
) -> Result<VoiceoverResult, AppError> {
    let (resource, duration_secs, rms_level) = render_and_publish(&base64_audio, &publisher)?;
    Ok(VoiceoverResult {
        resource,
        base64_audio,
        duration_secs,
        rms_level,
    })
}

/// Revoke the currently published voiceover resource, deleting its file.
#[tauri::command]
pub fn discard_voiceover(publisher: State<'_, ResourcePublisher>) -> bool {
    publisher.revoke()
}

/// decode -> interpret -> encode -> publish.
fn render_and_publish(
    base64_audio: &str,
    publisher: &ResourcePublisher,
) -> Result<(PublishedResource, f32, f32), AppError> {
    let bytes = pcm::decode_base64(base64_audio)?;
    let buffer = pcm::interpret(&bytes, OUTPUT_SAMPLE_RATE, OUTPUT_CHANNEL_COUNT)?;
    let wav_data = wav::encode_wav(&buffer)?;
    let resource = publisher.publish(&wav_data)?;
    Ok((resource, buffer.duration_secs(), wav::rms_level(&buffer)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_render_and_publish_pipeline() {
        let dir =
            std::env::temp_dir().join(format!("voiceforge-voiceover-{}", std::process::id()));
        {
            let publisher = ResourcePublisher::new(dir.clone());
            // Two mono frames: 0x0000 and 0x7FFF
            let (resource, duration, rms) = render_and_publish("AAD/fw==", &publisher).unwrap();
            assert!(Path::new(&resource.path).exists());
            assert_eq!(resource.size_bytes, 44 + 4);
            assert!((duration - 2.0 / 24000.0).abs() < 1e-9);
            assert!(rms > 0.0);
        }
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_render_rejects_malformed_base64() {
        let dir =
            std::env::temp_dir().join(format!("voiceforge-voiceover-bad-{}", std::process::id()));
        let publisher = ResourcePublisher::new(dir);
        assert!(matches!(
            render_and_publish("not!base64", &publisher),
            Err(AppError::Decode(_))
        ));
    }
}
