// Cache store for reading and writing product snapshots.
// Handles JSON serialization, the missing manifest, and partition scans.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{CacheError, Result};
use crate::rainforest::ProductData;

use super::paths::{self, Partition};

/// On-disk home of cached product snapshots.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write a product snapshot into a partition, returning its path.
    pub fn save(&self, partition: Partition, id: &str, data: &ProductData) -> Result<PathBuf> {
        paths::validate_id(id)?;
        let path = paths::product_path(&self.root, partition, id);
        let json = serde_json::to_string(data)?;
        write_atomic(&path, json.as_bytes())?;
        Ok(path)
    }

    /// Read a product snapshot back from disk.
    pub fn load(&self, id: &str, path: &Path) -> Result<ProductData> {
        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|source| CacheError::CorruptEntry {
            id: id.to_string(),
            path: path.to_path_buf(),
            source,
        })
    }

    /// List the `(id, path)` of every snapshot in one partition.
    pub fn scan_partition(&self, partition: Partition) -> Result<Vec<(String, PathBuf)>> {
        let dir = partition.dir(&self.root);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut found = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if let Some(id) = paths::id_from_path(&path) {
                found.push((id, path));
            }
        }
        found.sort();
        Ok(found)
    }

    /// All partitions present under the root, oldest first.
    pub fn partitions(&self) -> Result<Vec<Partition>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut partitions = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            if let Some(partition) = entry.file_name().to_str().and_then(Partition::parse) {
                partitions.push(partition);
            }
        }
        partitions.sort();
        Ok(partitions)
    }

    /// Read the known-missing ids; an absent manifest means none.
    pub fn read_missing_manifest(&self) -> Result<Vec<String>> {
        let path = paths::missing_manifest_path(&self.root);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&contents)?)
    }

    /// Overwrite the known-missing manifest.
    pub fn write_missing_manifest(&self, ids: &[String]) -> Result<()> {
        let mut ids = ids.to_vec();
        ids.sort();
        let json = serde_json::to_string_pretty(&ids)?;
        write_atomic(&paths::missing_manifest_path(&self.root), json.as_bytes())
    }
}

/// Write bytes via a temp file and rename so readers never see a partial file.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}
