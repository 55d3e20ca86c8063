use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::Local;
use serde::Serialize;

use crate::error::AppError;

static NEXT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// A playable media resource backed by a WAV file on disk.
/// Revoking the handle deletes the backing file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedResource {
    pub path: String,
    pub size_bytes: u64,
}

/// Publishes encoded WAV streams as locally addressable media resources.
///
/// Tracks the most recent handle: publishing a replacement revokes the
/// previous resource, and dropping the publisher revokes whatever is still
/// outstanding, so no backing file outlives its handle.
pub struct ResourcePublisher {
    output_dir: PathBuf,
    current: Mutex<Option<PublishedResource>>,
}

impl ResourcePublisher {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            current: Mutex::new(None),
        }
    }

    /// Write a WAV byte stream to a fresh file and return its handle.
    /// The previously published resource, if any, is revoked.
    pub fn publish(&self, wav_data: &[u8]) -> Result<PublishedResource, AppError> {
        fs::create_dir_all(&self.output_dir)?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let sequence = NEXT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let path = self
            .output_dir
            .join(format!("voiceover_{timestamp}_{sequence}.wav"));
        fs::write(&path, wav_data)?;

        let resource = PublishedResource {
            path: path.display().to_string(),
            size_bytes: wav_data.len() as u64,
        };

        let previous = self.current.lock().unwrap().replace(resource.clone());
        if let Some(previous) = previous {
            remove_resource_file(&previous);
        }

        crate::app_log!(
            "[publisher] published {} ({} bytes)",
            resource.path,
            resource.size_bytes
        );
        Ok(resource)
    }

    /// Revoke the current handle and delete its backing file.
    /// Returns whether a resource was outstanding.
    pub fn revoke(&self) -> bool {
        let current = self.current.lock().unwrap().take();
        match current {
            Some(resource) => {
                remove_resource_file(&resource);
                true
            }
            None => false,
        }
    }

    #[allow(dead_code)]
    pub fn current(&self) -> Option<PublishedResource> {
        self.current.lock().unwrap().clone()
    }
}

impl Drop for ResourcePublisher {
    fn drop(&mut self) {
        self.revoke();
    }
}

fn remove_resource_file(resource: &PublishedResource) {
    match fs::remove_file(&resource.path) {
        Ok(()) => crate::app_log!("[publisher] revoked {}", resource.path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => crate::app_log!("[publisher] failed to remove {}: {e}", resource.path),
    }
}
