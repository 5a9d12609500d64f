// Runtime configuration.
// Cache location, provider credentials, and the policies the orchestrator follows.

use std::path::PathBuf;
use std::time::Duration;

use crate::cache::paths;
use crate::error::{CacheError, Result};
use crate::rainforest::IdKind;
use crate::rainforest::client::{DEFAULT_AMAZON_DOMAIN, RAINFOREST_API_BASE};

pub const API_KEY_VAR: &str = "RAINFOREST_API_KEY";
pub const BASE_URL_VAR: &str = "RAINFOREST_BASE_URL";
pub const CACHE_DIR_VAR: &str = "ASIN_CACHE_DIR";

/// Whether a not-found response marks the id as known missing, per id kind.
///
/// The default marks GTINs but not ASINs, matching how the cache has always behaved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingPolicy {
    pub asin: bool,
    pub gtin: bool,
}

impl Default for MissingPolicy {
    fn default() -> Self {
        Self {
            asin: false,
            gtin: true,
        }
    }
}

impl MissingPolicy {
    pub fn marks(&self, kind: IdKind) -> bool {
        match kind {
            IdKind::Asin => self.asin,
            IdKind::Gtin => self.gtin,
        }
    }
}

/// Which month partitions the index loads at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartitionScan {
    /// Only the partition for the current month.
    #[default]
    CurrentMonth,
    /// Every partition under the root, oldest first so newer files win.
    All,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub api_key: String,
    pub base_url: String,
    pub amazon_domain: String,
    pub missing_policy: MissingPolicy,
    pub partition_scan: PartitionScan,
    pub timeout: Option<Duration>,
}

impl Config {
    /// Configuration with defaults for everything but the root and key.
    pub fn new(root: PathBuf, api_key: impl Into<String>) -> Self {
        Self {
            root,
            api_key: api_key.into(),
            base_url: RAINFOREST_API_BASE.to_string(),
            amazon_domain: DEFAULT_AMAZON_DOMAIN.to_string(),
            missing_policy: MissingPolicy::default(),
            partition_scan: PartitionScan::default(),
            timeout: None,
        }
    }

    /// Load configuration from the environment.
    ///
    /// An explicit `root` takes precedence over `ASIN_CACHE_DIR` and the platform default.
    pub fn from_env(root: Option<PathBuf>) -> Result<Self> {
        let api_key = std::env::var(API_KEY_VAR).map_err(|_| CacheError::MissingApiKey)?;
        let root = match root.or_else(|| std::env::var_os(CACHE_DIR_VAR).map(PathBuf::from)) {
            Some(dir) => dir,
            None => paths::cache_dir().ok_or(CacheError::NoCacheDir)?,
        };

        let mut config = Self::new(root, api_key);
        if let Ok(base_url) = std::env::var(BASE_URL_VAR) {
            config.base_url = base_url;
        }
        Ok(config)
    }
}
