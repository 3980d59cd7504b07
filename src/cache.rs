//! Explicit dataset cache keyed by source identity.
//!
//! Replaces the implicit memoization the dashboard runtime used to do: the
//! cache key is the source path plus a content digest, so editing the file
//! invalidates the entry on the next load. Datasets are handed out behind
//! `Arc`, and a reload installs a fresh `Arc` rather than touching the
//! previous snapshot, so in-flight aggregations always see consistent data.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::dataset::FeedbackDataset;
use crate::error::LoadError;
use crate::loader;

struct CacheEntry {
    digest: String,
    loaded_at: DateTime<Utc>,
    dataset: Arc<FeedbackDataset>,
}

/// Cache of loaded datasets, one entry per source path.
#[derive(Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, CacheEntry>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached dataset when the file contents are unchanged,
    /// otherwise loads and installs a fresh snapshot.
    ///
    /// # Errors
    ///
    /// Propagates [`LoadError`] from reading or parsing the file; a failed
    /// reload leaves any previously cached entry in place.
    pub fn load(&mut self, path: &Path) -> Result<Arc<FeedbackDataset>, LoadError> {
        let bytes = std::fs::read(path)?;
        let digest = content_digest(&bytes);

        if let Some(entry) = self.entries.get(path) {
            if entry.digest == digest {
                debug!(path = %path.display(), "Dataset cache hit");
                return Ok(entry.dataset.clone());
            }
        }

        let dataset = Arc::new(loader::from_slice(&bytes)?);
        info!(
            path = %path.display(),
            records = dataset.len(),
            "Feedback source loaded into cache"
        );
        self.entries.insert(
            path.to_path_buf(),
            CacheEntry {
                digest,
                loaded_at: Utc::now(),
                dataset: dataset.clone(),
            },
        );

        Ok(dataset)
    }

    /// When the entry for `path` was last (re)loaded, if it is cached.
    pub fn loaded_at(&self, path: &Path) -> Option<DateTime<Utc>> {
        self.entries.get(path).map(|e| e.loaded_at)
    }

    /// Drops the entry for `path`, forcing the next load to re-read it.
    pub fn invalidate(&mut self, path: &Path) {
        self.entries.remove(path);
    }
}

fn content_digest(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
