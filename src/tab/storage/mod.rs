//! where finished bills end up

pub(crate) mod file;

use derive_more::{Display, Error};
use std::io;

#[derive(Debug, Display, Error)]
pub(crate) enum StorageError {
    #[display("failed to create bills directory {path}: {source}")]
    CreateDir { path: String, source: io::Error },
    #[display("failed to write bill to {path}: {source}")]
    Write { path: String, source: io::Error },
}

/// Destination for rendered bills, keyed by bill name.
pub(crate) trait BillSink {
    /// Store `payload` under `name`, returning a human readable location.
    fn persist(&mut self, name: &str, payload: &[u8]) -> Result<String, StorageError>;
}

/// for test
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemorySink {
    pub saved: Vec<(String, String)>,
}

#[cfg(test)]
impl BillSink for MemorySink {
    fn persist(&mut self, name: &str, payload: &[u8]) -> Result<String, StorageError> {
        let text = String::from_utf8_lossy(payload).into_owned();
        self.saved.push((name.to_string(), text));
        Ok(format!("memory://{name}"))
    }
}

/// for test, fails the first `failures` saves and then behaves like [`MemorySink`]
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FailingSink {
    pub failures: usize,
    pub attempts: usize,
    pub inner: MemorySink,
}

#[cfg(test)]
impl FailingSink {
    pub fn new(failures: usize) -> Self {
        Self {
            failures,
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl BillSink for FailingSink {
    fn persist(&mut self, name: &str, payload: &[u8]) -> Result<String, StorageError> {
        self.attempts += 1;
        if self.attempts <= self.failures {
            return Err(StorageError::Write {
                path: format!("memory://{name}"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.inner.persist(name, payload)
    }
}
