pub mod session;
pub mod settings;
pub mod voiceover;

use serde::Serialize;

#[derive(Serialize)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
}

#[tauri::command]
pub fn get_app_info() -> AppInfo {
    AppInfo {
        name: "VoiceForge".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}
