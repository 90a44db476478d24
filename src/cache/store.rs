// Cache store for reading and writing cached timelines.
// Handles JSON serialization, mtime-based freshness, and atomic writes.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::{Duration, SystemTime};

use serde::{Serialize, de::DeserializeOwned};

use crate::error::Result;

/// Cached data together with the file's last-modified time.
#[derive(Debug, Clone)]
pub struct CachedData<T> {
    pub data: T,
    pub modified_at: SystemTime,
}

impl<T> CachedData<T> {
    /// Time since the cache file was last written.
    /// A modification time in the future counts as zero age.
    pub fn age(&self) -> Duration {
        SystemTime::now()
            .duration_since(self.modified_at)
            .unwrap_or(Duration::ZERO)
    }

    /// Fresh means strictly younger than the TTL.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.age() < ttl
    }
}

/// Read cached JSON data from a file.
pub fn read_cached<T: DeserializeOwned>(path: &Path) -> Result<Option<CachedData<T>>> {
    if !path.exists() {
        return Ok(None);
    }

    let modified_at = modified_at(path)?;
    let contents = fs::read_to_string(path)?;
    let data: T = serde_json::from_str(&contents)?;
    Ok(Some(CachedData { data, modified_at }))
}

/// Write data to cache as JSON.
pub fn write_cached<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(data)?;

    // Write atomically via temp file
    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Get the modification time of a cache file.
pub fn modified_at(path: &Path) -> io::Result<SystemTime> {
    fs::metadata(path)?.modified()
}
