use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::tts::brief::ProductionNotes;

/// Well-known key for the last generated voiceover.
pub const LAST_VOICEOVER_KEY: &str = "voiceoverData";

/// The persisted form of one generated voiceover: the original base64 PCM
/// payload plus everything needed to rebuild the production without another
/// upstream call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub base64_audio: String,
    pub text: String,
    #[serde(flatten)]
    pub notes: ProductionNotes,
}

/// Pluggable key/value storage for session state.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AppError>;
    fn set(&self, key: &str, value: &[u8]) -> Result<(), AppError>;
    fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// File-backed store: one JSON document per key under the app data directory.
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn key_path(&self, key: &str) -> Result<PathBuf, AppError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(AppError::Session(format!("invalid session key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AppError> {
        match fs::read(self.key_path(key)?) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), AppError> {
        let path = self.key_path(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(path, value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        match fs::remove_file(self.key_path(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Persist the last generated voiceover under the well-known key.
pub fn save_record(store: &dyn SessionStore, record: &SessionRecord) -> Result<(), AppError> {
    let bytes = serde_json::to_vec(record)?;
    store.set(LAST_VOICEOVER_KEY, &bytes)
}

/// Load the last generated voiceover.
/// A record that fails to parse is logged, removed, and reported as absent.
pub fn load_record(store: &dyn SessionStore) -> Result<Option<SessionRecord>, AppError> {
    let Some(bytes) = store.get(LAST_VOICEOVER_KEY)? else {
        return Ok(None);
    };
    match serde_json::from_slice(&bytes) {
        Ok(record) => Ok(Some(record)),
        Err(e) => {
            crate::app_log!("[session] discarding corrupted record: {e}");
            store.remove(LAST_VOICEOVER_KEY)?;
            Ok(None)
        }
    }
}

pub fn clear_record(store: &dyn SessionStore) -> Result<(), AppError> {
    store.remove(LAST_VOICEOVER_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemorySessionStore {
        entries: Mutex<HashMap<String, Vec<u8>>>,
    }

    impl SessionStore for MemorySessionStore {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AppError> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: &[u8]) -> Result<(), AppError> {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_vec());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), AppError> {
            self.entries.lock().unwrap().remove(key);
            Ok(())
        }
    }

    fn sample_record() -> SessionRecord {
        SessionRecord {
            base64_audio: "AAD/fw==".to_string(),
            text: "The future belongs to those who believe.".to_string(),
            notes: ProductionNotes::default(),
        }
    }

    #[test]
    fn test_record_round_trip() {
        let store = MemorySessionStore::default();
        save_record(&store, &sample_record()).unwrap();
        let loaded = load_record(&store).unwrap().unwrap();
        assert_eq!(loaded, sample_record());
    }

    #[test]
    fn test_record_persists_flat_camel_case_fields() {
        let store = MemorySessionStore::default();
        save_record(&store, &sample_record()).unwrap();
        let raw = store.get(LAST_VOICEOVER_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(json["base64Audio"], "AAD/fw==");
        assert_eq!(json["emotion"], "Confident & Courageous");
        assert_eq!(json["noiseGate"], false);
        assert!(json["musicVolume"].is_number());
    }

    #[test]
    fn test_corrupted_record_is_discarded() {
        let store = MemorySessionStore::default();
        store.set(LAST_VOICEOVER_KEY, b"{not json").unwrap();
        assert!(load_record(&store).unwrap().is_none());
        assert!(store.get(LAST_VOICEOVER_KEY).unwrap().is_none());
    }

    #[test]
    fn test_clear_record() {
        let store = MemorySessionStore::default();
        save_record(&store, &sample_record()).unwrap();
        clear_record(&store).unwrap();
        assert!(load_record(&store).unwrap().is_none());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("voiceforge-session-{}", std::process::id()));
        let store = FileSessionStore::new(dir.clone());
        save_record(&store, &sample_record()).unwrap();
        assert_eq!(load_record(&store).unwrap().unwrap(), sample_record());
        clear_record(&store).unwrap();
        assert!(load_record(&store).unwrap().is_none());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let dir = std::env::temp_dir().join("voiceforge-session-keys");
        let store = FileSessionStore::new(dir);
        assert!(store.get("../escape").is_err());
        assert!(store.set("", b"x").is_err());
    }
}
