//! Civic Desk configuration.
//!
//! Config file search order:
//! 1. Explicit path (`--config`)
//! 2. `$CIVIC_CONFIG`
//! 3. `~/.config/civic/config.toml`
//! 4. `/etc/civic/config.toml`
//! 5. Defaults
//!
//! `$CIVIC_CITIZENS` overrides `data.citizens` after the file is read.

use crate::citizen::CsvCitizenStore;
use crate::error::{CivicError, Result};
use crate::faq::FaqTable;
use crate::matcher::{Matcher, DEFAULT_CUTOFF};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_ENV: &str = "CIVIC_CONFIG";
pub const CITIZENS_ENV: &str = "CIVIC_CITIZENS";

/// Color display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Minimum similarity for a fuzzy suggestion
    #[serde(default = "default_cutoff")]
    pub cutoff: f64,
}

fn default_cutoff() -> f64 {
    DEFAULT_CUTOFF
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    /// CSV with `citizen_id,name` columns
    #[serde(default = "default_citizens")]
    pub citizens: PathBuf,

    /// Replacement FAQ table; the built-in table is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faq: Option<PathBuf>,
}

fn default_citizens() -> PathBuf {
    PathBuf::from("citizen.csv")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            citizens: default_citizens(),
            faq: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CivicConfig {
    #[serde(default)]
    pub matching: MatchingConfig,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl CivicConfig {
    /// `~/.config/civic/config.toml`
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("civic").join("config.toml"))
    }

    pub fn system_config_path() -> PathBuf {
        PathBuf::from("/etc/civic/config.toml")
    }

    /// Load using the standard search order plus environment overrides
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            // An explicit path must exist
            Some(path) => Self::load_from(path)?,
            None => {
                let mut candidates = Vec::new();
                if let Some(path) = std::env::var_os(CONFIG_ENV) {
                    candidates.push(PathBuf::from(path));
                }
                candidates.extend(Self::user_config_path());
                candidates.push(Self::system_config_path());
                Self::load_first(&candidates)?
            }
        };

        if let Some(citizens) = std::env::var_os(CITIZENS_ENV) {
            config.data.citizens = PathBuf::from(citizens);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load the first existing file among `candidates`, else defaults
    pub fn load_first(candidates: &[PathBuf]) -> Result<Self> {
        for path in candidates {
            if path.exists() {
                return Self::load_from(path);
            }
        }
        debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| CivicError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config: CivicConfig = toml::from_str(&contents).map_err(|source| CivicError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let cutoff = self.matching.cutoff;
        if !(0.0..=1.0).contains(&cutoff) {
            return Err(CivicError::InvalidCutoff(cutoff));
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// FAQ table named by the config, or the built-in one
    pub fn faq_table(&self) -> Result<FaqTable> {
        match &self.data.faq {
            Some(path) => FaqTable::load(path),
            None => Ok(FaqTable::builtin()),
        }
    }

    pub fn matcher(&self) -> Result<Matcher> {
        Matcher::new(self.faq_table()?, self.matching.cutoff)
    }

    pub fn citizens(&self) -> Result<CsvCitizenStore> {
        CsvCitizenStore::load(&self.data.citizens)
    }
}
