// Cache path utilities.
// Constructs the month-partitioned layout: <root>/<YYYY-MM>/<id>.json plus <root>/missing.json.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Local, NaiveDate};
use directories::ProjectDirs;

use crate::error::{CacheError, Result};

/// File name of the known-missing manifest under the cache root.
pub const MISSING_MANIFEST: &str = "missing.json";

/// Get the default cache directory (~/.cache/asin-cache on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "asin-cache").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Calendar month in which cache files were first written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Partition {
    year: i32,
    month: u32,
}

impl Partition {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// Partition for the current local month.
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    /// Parse a `YYYY-MM` directory name.
    pub fn parse(name: &str) -> Option<Self> {
        let (year, month) = name.split_once('-')?;
        if year.len() != 4 || month.len() != 2 {
            return None;
        }
        Self::new(year.parse().ok()?, month.parse().ok()?)
    }

    /// Directory for this partition under the cache root.
    pub fn dir(&self, root: &Path) -> PathBuf {
        root.join(self.to_string())
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Path to a product's cache file.
pub fn product_path(root: &Path, partition: Partition, id: &str) -> PathBuf {
    partition
        .dir(root)
        .join(format!("{}.json", id))
}

/// Path to the known-missing manifest.
pub fn missing_manifest_path(root: &Path) -> PathBuf {
    root.join(MISSING_MANIFEST)
}

/// Recover the product id from a cache file path, if it is one.
pub fn id_from_path(path: &Path) -> Option<String> {
    if path.extension()? != "json" {
        return None;
    }
    let id = path.file_stem()?.to_str()?;
    validate_id(id).ok()?;
    Some(id.to_string())
}

/// Check that an id can be used verbatim as a file name.
///
/// ASINs and GTINs are alphanumeric; hyphens are let through for formatted ISBNs.
/// Anything else is rejected so the file name always maps back to the same id.
pub fn validate_id(id: &str) -> Result<()> {
    if !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        Ok(())
    } else {
        Err(CacheError::InvalidId(id.to_string()))
    }
}
