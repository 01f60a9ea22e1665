use pm_core::{ArticleStorage, Error, Result};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

pub mod backends;

pub use backends::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    File,
    Memory,
}

impl FromStr for StorageKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => Err(Error::Config(format!(
                "Unknown storage backend: {} (expected file or memory)",
                other
            ))),
        }
    }
}

/// Build the article store. Both backends derive the same paths under `output_dir`.
pub fn create_storage(kind: StorageKind, output_dir: impl Into<PathBuf>) -> Arc<dyn ArticleStorage> {
    let output_dir = output_dir.into();
    match kind {
        StorageKind::File => Arc::new(FileStorage::new(output_dir)),
        StorageKind::Memory => Arc::new(MemoryStorage::new(output_dir)),
    }
}
