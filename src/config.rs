use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants;
use crate::error::{PipelineError, Result};

pub const CONFIG_FILE: &str = "fedtracker.toml";
pub const DATA_DIR_ENV: &str = "FEDTRACKER_DATA_DIR";
pub const LOG_DIR_ENV: &str = "FEDTRACKER_LOG_DIR";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,
    /// Write a JSON log file next to the console output
    #[serde(default = "default_true")]
    pub file: bool,
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("public/data")
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_true() -> bool {
    true
}

fn default_filter() -> String {
    "fedtracker_data=info".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            file: default_true(),
            filter: default_filter(),
        }
    }
}

impl Config {
    /// Load `fedtracker.toml` from the working directory, falling back to
    /// defaults when it is absent, then apply environment overrides.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        let mut config = Self::from_file(Path::new(CONFIG_FILE))?;
        config.apply_env();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                self.data.dir = PathBuf::from(dir);
            }
        }
        if let Ok(dir) = std::env::var(LOG_DIR_ENV) {
            if !dir.trim().is_empty() {
                self.logging.dir = PathBuf::from(dir);
            }
        }
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data.dir = dir.into();
        self
    }

    pub fn paths(&self) -> DataPaths {
        DataPaths::new(&self.data.dir)
    }
}

/// Conventional locations of every input and output under the data directory.
#[derive(Debug, Clone)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn agency_list(&self) -> PathBuf {
        self.root.join(constants::AGENCY_LIST_FILE)
    }

    pub fn subagency_listings_dir(&self) -> PathBuf {
        self.root.join(constants::SUBAGENCY_LISTINGS_DIR)
    }

    pub fn agency_details_dir(&self) -> PathBuf {
        self.root.join(constants::AGENCY_DETAILS_DIR)
    }

    pub fn brain_drain(&self) -> PathBuf {
        self.root.join(constants::BRAIN_DRAIN_FILE)
    }

    pub fn geographic_impact(&self) -> PathBuf {
        self.root.join(constants::GEOGRAPHIC_IMPACT_FILE)
    }

    pub fn states(&self) -> PathBuf {
        self.root.join(constants::STATES_FILE)
    }

    pub fn state_detail_dir(&self) -> PathBuf {
        self.root.join(constants::STATE_DETAIL_DIR)
    }

    pub fn occupations(&self) -> PathBuf {
        self.root.join(constants::OCCUPATIONS_FILE)
    }

    pub fn separations(&self) -> PathBuf {
        self.root.join(constants::SEPARATIONS_FILE)
    }

    pub fn state_impact(&self) -> PathBuf {
        self.root.join(constants::STATE_IMPACT_FILE)
    }

    pub fn occupation_families(&self) -> PathBuf {
        self.root.join(constants::OCCUPATION_FAMILIES_FILE)
    }

    pub fn agency_risk(&self) -> PathBuf {
        self.root.join(constants::AGENCY_RISK_FILE)
    }

    pub fn comparisons_dir(&self) -> PathBuf {
        self.root.join(constants::COMPARISONS_DIR)
    }

    pub fn csv_dir(&self) -> PathBuf {
        self.root.join(constants::CSV_DIR)
    }
}
