use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::dataset::{SplitPolicy, DEFAULT_SEED};
use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,

    #[serde(default)]
    pub split: SplitConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Directory holding one sub-folder of images per person.
    #[serde(default = "default_dataset_root")]
    pub root: PathBuf,
}

fn default_dataset_root() -> PathBuf {
    PathBuf::from("datasets")
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            root: default_dataset_root(),
        }
    }
}

/// Loose split settings as they appear in the config file.
///
/// Resolved into a [`SplitPolicy`] with [`SplitConfig::resolve`]:
/// random sampling wins over a percentage, which wins over a fixed count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    #[serde(default)]
    pub random_sampling: bool,

    #[serde(default)]
    pub train_percentage: Option<f64>,

    #[serde(default)]
    pub required_no: Option<usize>,

    #[serde(default = "default_max_images_per_person")]
    pub max_images_per_person: usize,

    #[serde(default = "default_train_images_per_person")]
    pub train_images_per_person: usize,

    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_max_images_per_person() -> usize {
    20
}

fn default_train_images_per_person() -> usize {
    6
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            random_sampling: false,
            train_percentage: None,
            required_no: None,
            max_images_per_person: default_max_images_per_person(),
            train_images_per_person: default_train_images_per_person(),
            seed: default_seed(),
        }
    }
}

impl SplitConfig {
    pub fn resolve(&self) -> Result<SplitPolicy> {
        let policy = if self.random_sampling {
            SplitPolicy::RandomSampling {
                max_images: self.max_images_per_person,
                train_images: self.train_images_per_person,
                seed: self.seed,
            }
        } else if let Some(fraction) = self.train_percentage {
            SplitPolicy::Percentage { fraction }
        } else if let Some(required) = self.required_no {
            SplitPolicy::FixedCount { required }
        } else {
            return Err(ConfigError::NoPolicy);
        };

        policy.validate()?;
        Ok(policy)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// When set, logs are also written to a daily rolling file here.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Where a loaded [`Config`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No file at the expected location; built-in defaults were used.
    Defaults { missing: PathBuf },
}

impl Config {
    /// Load from [`Config::config_path`], falling back to defaults when the
    /// file does not exist. Nothing is written to disk.
    pub fn load() -> Result<(Self, ConfigSource)> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let config = Self::load_from(&config_path)?;
            Ok((config, ConfigSource::File(config_path)))
        } else {
            tracing::warn!("Config file not found at {:?}, using defaults", config_path);
            Ok((
                Config::default(),
                ConfigSource::Defaults {
                    missing: config_path,
                },
            ))
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// `$FACESPLIT_CONFIG`, else `facesplit/config.toml` in the user config directory.
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("FACESPLIT_CONFIG") {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("facesplit")
            .join("config.toml")
    }
}
