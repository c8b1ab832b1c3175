//! Error types for facesplit.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving or validating a split configuration.
///
/// These are the only fatal conditions in the crate. Missing directories and
/// undersized person folders are recovered locally by the indexer.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither random sampling, a percentage, nor a fixed count was given.
    #[error("no splitting policy specified: set random_sampling, train_percentage or required_no")]
    NoPolicy,

    /// Training fraction outside `[0, 1]` or not a finite number.
    #[error("invalid train percentage: {0} (must be in [0, 1])")]
    InvalidPercentage(f64),

    /// More training images requested than are sampled per person.
    #[error("train_images_per_person ({train}) exceeds max_images_per_person ({max})")]
    TrainExceedsSample {
        /// Requested training images per person.
        train: usize,
        /// Sample size per person.
        max: usize,
    },

    /// Random sampling with a sample size of zero.
    #[error("max_images_per_person must be at least 1")]
    EmptySample,

    /// Config file could not be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`crate::config::Config`].
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
