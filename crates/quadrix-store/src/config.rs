//! quadrix configuration and store factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quadrix_core::engine::EngineConfig;
use quadrix_core::generator::COUNT_RANGE;
use quadrix_core::traits::EquationStore;

use crate::json_file::JsonFileStore;
use crate::memory::MemoryStore;

/// Which store backend to use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Process-local state, lost on exit.
    Memory,
    /// A single JSON document on disk.
    Json {
        #[serde(default = "default_store_path")]
        path: PathBuf,
    },
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Json {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./quadrix-store.json")
}

/// Top-level quadrix configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadrixConfig {
    /// Store backend.
    #[serde(default)]
    pub store: StoreConfig,
    /// Equations per set when `--count` is not given.
    #[serde(default = "default_count")]
    pub default_count: usize,
    /// Smallest accepted count.
    #[serde(default = "default_min_count")]
    pub min_count: usize,
    /// Largest accepted count.
    #[serde(default = "default_max_count")]
    pub max_count: usize,
    /// Fixed seed for reproducible equation sets. Seeded from the OS when
    /// unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_count() -> usize {
    10
}
fn default_min_count() -> usize {
    *COUNT_RANGE.start()
}
fn default_max_count() -> usize {
    *COUNT_RANGE.end()
}

impl Default for QuadrixConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            default_count: default_count(),
            min_count: default_min_count(),
            max_count: default_max_count(),
            seed: None,
        }
    }
}

impl QuadrixConfig {
    /// Check the count bounds against each other and the generator limits.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.min_count >= *COUNT_RANGE.start() && self.max_count <= *COUNT_RANGE.end(),
            "count bounds must lie within {}..={}",
            COUNT_RANGE.start(),
            COUNT_RANGE.end()
        );
        anyhow::ensure!(
            self.min_count <= self.max_count,
            "min_count ({}) must not exceed max_count ({})",
            self.min_count,
            self.max_count
        );
        anyhow::ensure!(
            (self.min_count..=self.max_count).contains(&self.default_count),
            "default_count ({}) must lie within {}..={}",
            self.default_count,
            self.min_count,
            self.max_count
        );
        Ok(())
    }

    /// Engine settings derived from this config.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            count_range: self.min_count..=self.max_count,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Resolve env vars in a store config.
fn resolve_store_config(config: &StoreConfig) -> StoreConfig {
    match config {
        StoreConfig::Memory => StoreConfig::Memory,
        StoreConfig::Json { path } => StoreConfig::Json {
            path: PathBuf::from(resolve_env_vars(&path.to_string_lossy())),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quadrix.toml` in the current directory
/// 2. `~/.config/quadrix/config.toml`
///
/// Environment variable overrides: `QUADRIX_STORE_PATH`, `QUADRIX_SEED`.
pub fn load_config() -> Result<QuadrixConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuadrixConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quadrix.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<QuadrixConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => QuadrixConfig::default(),
    };

    // Apply env var overrides
    if let Ok(path) = std::env::var("QUADRIX_STORE_PATH") {
        config.store = StoreConfig::Json {
            path: PathBuf::from(path),
        };
    }

    if let Ok(seed) = std::env::var("QUADRIX_SEED") {
        let seed = seed
            .trim()
            .parse::<u64>()
            .with_context(|| format!("invalid QUADRIX_SEED: '{seed}'"))?;
        config.seed = Some(seed);
    }

    config.store = resolve_store_config(&config.store);
    config.validate()?;

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quadrix"))
}

/// Create a store instance from its configuration.
pub fn create_store(config: &StoreConfig) -> Result<Arc<dyn EquationStore>> {
    match config {
        StoreConfig::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreConfig::Json { path } => Ok(Arc::new(JsonFileStore::open(path.clone())?)),
    }
}
