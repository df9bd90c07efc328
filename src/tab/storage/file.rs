use crate::tab::storage::{BillSink, StorageError};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

pub(crate) const DEFAULT_BILLS_DIR: &str = "bills";
const BILL_FILE_EXTENSION: &str = "txt";

/// Writes each bill to `<dir>/<name>.txt`, replacing any earlier save.
#[derive(Debug, Clone)]
pub(crate) struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{BILL_FILE_EXTENSION}"))
    }
}

impl BillSink for FileSink {
    fn persist(&mut self, name: &str, payload: &[u8]) -> Result<String, StorageError> {
        if !self.dir.is_dir() {
            debug!("creating bills dir={}", self.dir.display());
            fs::create_dir_all(&self.dir).map_err(|source| StorageError::CreateDir {
                path: self.dir.display().to_string(),
                source,
            })?;
        }
        let path = self.path_for(name);
        let location = path.display().to_string();
        fs::write(&path, payload).map_err(|source| StorageError::Write {
            path: location.clone(),
            source,
        })?;
        info!("bill={} written to {} ({} bytes)", name, location, payload.len());
        Ok(location)
    }
}
