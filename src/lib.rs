//! Deterministic per-person train/test splitting for face image datasets.
//!
//! Point a [`DatasetIndexer`] at a directory holding one folder of images per
//! person, pick a [`SplitPolicy`], and read the resulting [`SplitIndex`].

pub mod config;
pub mod dataset;
pub mod error;
pub mod logging;

pub use config::Config;
pub use dataset::{DatasetIndexer, SkipReason, SkippedPerson, SplitIndex, SplitPolicy, SplitSummary};
pub use error::ConfigError;
