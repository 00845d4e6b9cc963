// Persistent JSON cache document
//
// The whole cache is one JSON object of entries keyed by strings such as
// `agent_info` or `market_X1-AB12-C3`. The store never looks inside entries;
// callers validate what they read and treat anything odd as a miss.
//
// There is no locking between processes. Two processes saving at the same
// time race and the last rename wins, dropping the other's update.
use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

pub type CacheMap = Map<String, Value>;

#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cache document. Never fails: a missing, unreadable or
    /// corrupt file yields an empty map.
    pub fn load(&self) -> CacheMap {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No cache file yet");
            return CacheMap::new();
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read cache");
                return CacheMap::new();
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                warn!(path = %self.path.display(), "Cache file is not a JSON object, ignoring it");
                CacheMap::new()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to parse cache");
                CacheMap::new()
            }
        }
    }

    /// Write the whole cache document. Failures are logged and swallowed so
    /// a caller holding a good in-memory result can still return it.
    pub fn save(&self, data: &CacheMap) {
        if let Err(e) = self.write_atomically(data) {
            error!(path = %self.path.display(), error = %e, "Failed to save cache");
        }
    }

    /// Delete the cache file. Returns whether a file was removed.
    pub fn clear(&self) -> std::io::Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn write_atomically(&self, data: &CacheMap) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_json::to_string_pretty(data)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write next to the target and rename over it so readers see either
        // the old document or the new one.
        let tmp_path = self.tmp_path();
        {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        debug!(path = %self.path.display(), entries = data.len(), "Saved cache");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "cache.json".into());
        name.push(format!(".{}.tmp", std::process::id()));
        self.path.with_file_name(name)
    }
}
