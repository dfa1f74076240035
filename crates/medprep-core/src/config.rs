//! medprep configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::query::{KindFilter, SystemFilter};

/// Environment variable that overrides `bank_path`.
pub const BANK_ENV_VAR: &str = "MEDPREP_BANK";

/// Top-level medprep configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedprepConfig {
    /// Path to the question bank JSON document.
    #[serde(default = "default_bank_path")]
    pub bank_path: PathBuf,
    /// Question kind filter used when none is given.
    #[serde(default)]
    pub default_kind: KindFilter,
    /// System filter used when none is given.
    #[serde(default)]
    pub default_system: SystemFilter,
}

fn default_bank_path() -> PathBuf {
    PathBuf::from("questions_database.json")
}

impl Default for MedprepConfig {
    fn default() -> Self {
        Self {
            bank_path: default_bank_path(),
            default_kind: KindFilter::All,
            default_system: SystemFilter::All,
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `medprep.toml` in the current directory
/// 2. `~/.config/medprep/config.toml`
///
/// Environment variable override: `MEDPREP_BANK`.
pub fn load_config_from(path: Option<&Path>) -> Result<MedprepConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("medprep.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("reading config from {}", path.display());
            parse_config_file(&path)?
        }
        None => MedprepConfig::default(),
    };

    if let Some(bank) = std::env::var_os(BANK_ENV_VAR).filter(|v| !v.is_empty()) {
        config.bank_path = PathBuf::from(bank);
    }

    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<MedprepConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let mut config = toml::from_str::<MedprepConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;

    // A relative bank path is relative to the config file, not the cwd.
    if config.bank_path.is_relative() {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            config.bank_path = parent.join(&config.bank_path);
        }
    }
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("medprep"))
}
