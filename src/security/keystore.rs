use crate::error::AppError;

const SERVICE_NAME: &str = "app.voiceforge";

/// Provider id for the Gemini speech service key.
pub const GEMINI_PROVIDER: &str = "gemini";

/// OS-native keychain storage for speech-service API keys.
/// Uses macOS Keychain, Windows Credential Manager, or Linux Secret Service.
pub struct KeyStore;

impl KeyStore {
    pub fn new() -> Self {
        Self
    }

    fn entry(provider: &str) -> Result<keyring::Entry, AppError> {
        keyring::Entry::new(SERVICE_NAME, provider)
            .map_err(|e| AppError::Security(format!("Keyring entry error: {e}")))
    }

    pub fn save_api_key(&self, provider: &str, key: &str) -> Result<(), AppError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(AppError::Security(format!(
                "Refusing to save empty API key for {provider}"
            )));
        }
        Self::entry(provider)?
            .set_password(key)
            .map_err(|e| AppError::Security(format!("Failed to save key for {provider}: {e}")))
    }

    pub fn get_api_key(&self, provider: &str) -> Result<Option<String>, AppError> {
        match Self::entry(provider)?.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(AppError::Security(format!(
                "Failed to get key for {provider}: {e}"
            ))),
        }
    }

    pub fn delete_api_key(&self, provider: &str) -> Result<(), AppError> {
        match Self::entry(provider)?.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already deleted
            Err(e) => Err(AppError::Security(format!(
                "Failed to delete key for {provider}: {e}"
            ))),
        }
    }

    pub fn has_api_key(&self, provider: &str) -> Result<bool, AppError> {
        Ok(self.get_api_key(provider)?.is_some())
    }
}
