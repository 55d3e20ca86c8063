use tauri::State;

use crate::error::AppError;
use crate::session::{self, FileSessionStore, SessionRecord};

/// Persist the last generated voiceover so the next launch can restore it.
#[tauri::command]
pub fn save_session(
    record: SessionRecord,
    store: State<'_, FileSessionStore>,
) -> Result<(), AppError> {
    crate::app_log!(
        "[session] save text_len={} audio_len={}",
        record.text.len(),
        record.base64_audio.len()
    );
    session::save_record(store.inner(), &record)
}

/// Load the last generated voiceover, if any. Corrupted state is discarded.
#[tauri::command]
pub fn load_session(store: State<'_, FileSessionStore>) -> Result<Option<SessionRecord>, AppError> {
    session::load_record(store.inner())
}

#[tauri::command]
pub fn clear_session(store: State<'_, FileSessionStore>) -> Result<(), AppError> {
    crate::app_log!("[session] clear");
    session::clear_record(store.inner())
}
