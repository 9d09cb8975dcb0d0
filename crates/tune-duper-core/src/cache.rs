//! Single-slot store for the most recent scan result.

use crate::error::Error;
use crate::model::ScanResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

/// Bumped whenever the serialized layout of [`ScanResult`] changes.
const CACHE_FORMAT_VERSION: u32 = 1;

/// Holds at most one [`ScanResult`]. `save` overwrites unconditionally.
pub trait ResultStore: Send + Sync {
    fn save(&self, result: &ScanResult) -> Result<(), Error>;

    /// `Ok(None)` when nothing has been saved. Unreadable or incompatible
    /// data is an `Err`; callers treat it as a miss.
    fn load(&self) -> Result<Option<ScanResult>, Error>;

    fn clear(&self) -> Result<(), Error>;
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    format_version: u32,
    saved_at: DateTime<Utc>,
    result: &'a ScanResult,
}

#[derive(Deserialize)]
struct Envelope {
    format_version: u32,
    saved_at: DateTime<Utc>,
    result: ScanResult,
}

/// Durable slot: a bincode file written through a temporary sibling and an
/// atomic rename, so readers never observe a partial write.
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name: OsString = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl ResultStore for FileStore {
    fn save(&self, result: &ScanResult) -> Result<(), Error> {
        let envelope = EnvelopeRef {
            format_version: CACHE_FORMAT_VERSION,
            saved_at: Utc::now(),
            result,
        };
        let bytes = bincode::serialize(&envelope)
            .map_err(|e| Error::Cache(format!("Serialize error: {}", e)))?;

        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| Error::Cache(format!("Failed to lock cache: {}", e)))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let temp_path = self.temp_path();
        fs::write(&temp_path, &bytes)?;
        fs::rename(&temp_path, &self.path)?;

        info!("Results cached successfully to {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<ScanResult>, Error> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&self.path)?;
        let envelope: Envelope = bincode::deserialize(&bytes)
            .map_err(|e| Error::Cache(format!("Deserialize error: {}", e)))?;

        if envelope.format_version != CACHE_FORMAT_VERSION {
            return Err(Error::Cache(format!(
                "Unsupported cache format version {} (expected {})",
                envelope.format_version, CACHE_FORMAT_VERSION
            )));
        }

        debug!(
            "Loaded cached scan from {} saved at {}",
            self.path.display(),
            envelope.saved_at.to_rfc3339()
        );
        Ok(Some(envelope.result))
    }

    fn clear(&self) -> Result<(), Error> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| Error::Cache(format!("Failed to lock cache: {}", e)))?;

        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        info!("Result cache cleared");
        Ok(())
    }
}

/// In-process slot; nothing survives the process.
#[derive(Default)]
pub struct MemoryStore {
    slot: Mutex<Option<ScanResult>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultStore for MemoryStore {
    fn save(&self, result: &ScanResult) -> Result<(), Error> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| Error::Cache(format!("Failed to lock cache: {}", e)))?;
        *slot = Some(result.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<ScanResult>, Error> {
        let slot = self
            .slot
            .lock()
            .map_err(|e| Error::Cache(format!("Failed to lock cache: {}", e)))?;
        Ok(slot.clone())
    }

    fn clear(&self) -> Result<(), Error> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| Error::Cache(format!("Failed to lock cache: {}", e)))?;
        *slot = None;
        Ok(())
    }
}
