use std::sync::Mutex;

pub struct AppState {
    /// Voice preset synced from frontend settings.
    pub voice: Mutex<String>,
    /// Optional TTS model override synced from frontend settings.
    pub tts_model: Mutex<Option<String>>,
    /// Optional Gemini-compatible endpoint synced from frontend settings.
    pub tts_base_url: Mutex<Option<String>>,
    /// Cloud synthesis timeout seconds synced from frontend settings.
    pub cloud_timeout_secs: Mutex<u64>,
    /// Frontend debug logging switch.
    pub debug_logging_enabled: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            voice: Mutex::new("Fenrir".into()),
            tts_model: Mutex::new(None),
            tts_base_url: Mutex::new(None),
            cloud_timeout_secs: Mutex::new(120),
            debug_logging_enabled: Mutex::new(true),
        }
    }
}
