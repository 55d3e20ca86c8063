pub mod brief;
pub mod gemini;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Output format of the upstream speech service: mono 16-bit PCM at 24 kHz.
pub const OUTPUT_SAMPLE_RATE: u32 = 24000;
pub const OUTPUT_CHANNEL_COUNT: u16 = 1;

/// Configuration for synthesis requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsConfig {
    pub voice: String,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            voice: "Fenrir".to_string(),
        }
    }
}

/// Trait for cloud TTS engines that synthesize a complete production brief.
#[allow(async_fn_in_trait)]
pub trait CloudTtsEngine: Send + Sync {
    /// Synthesize speech for a production brief.
    /// Returns the provider's base64-encoded raw PCM payload untouched.
    async fn synthesize(&self, brief: &str, config: &TtsConfig) -> Result<String, AppError>;

    /// Get the provider name for display.
    #[allow(dead_code)]
    fn provider_name(&self) -> &str;
}
