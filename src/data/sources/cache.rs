//! On-disk cache for raw HTTP responses
//!
//! Lets a season be re-analyzed without hitting the network again, and
//! supports offline runs against previously fetched responses.

use std::path::{Path, PathBuf};

use crate::{PitchError, Result};

#[derive(Debug, Clone, Default)]
pub struct ResponseCache {
    dir: Option<PathBuf>,
    offline_only: bool,
}

impl ResponseCache {
    /// A cache that stores nothing and always fetches
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        ResponseCache {
            dir: Some(dir.as_ref().to_path_buf()),
            offline_only: false,
        }
    }

    /// Set offline-only mode (no network requests, cache must exist)
    pub fn offline_only(mut self, offline: bool) -> Self {
        self.offline_only = offline;
        self
    }

    fn path(&self, key: &str) -> Option<PathBuf> {
        self.dir.as_ref().map(|dir| {
            let filename: String = key
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '.' { c } else { '_' })
                .collect();
            dir.join(filename)
        })
    }

    fn load(&self, key: &str) -> Option<String> {
        let path = self.path(key)?;
        if path.exists() {
            log::debug!("Loading from cache: {}", path.display());
            std::fs::read_to_string(&path).ok()
        } else {
            None
        }
    }

    fn save(&self, key: &str, body: &str) -> Result<()> {
        if let Some(path) = self.path(key) {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, body)?;
            log::debug!("Saved to cache: {}", path.display());
        }
        Ok(())
    }

    /// Return the cached body for `key`, or run `fetch` and cache its result
    pub fn get_or_fetch<F>(&self, key: &str, fetch: F) -> Result<String>
    where
        F: FnOnce() -> Result<String>,
    {
        if let Some(body) = self.load(key) {
            return Ok(body);
        }
        if self.offline_only {
            return Err(PitchError::CacheMiss(key.to_string()));
        }

        let body = fetch()?;
        self.save(key, &body)?;
        Ok(body)
    }
}
