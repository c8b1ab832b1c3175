//! Per-person train/test indexing of an image dataset.
//!
//! The dataset root holds one folder per person. Every folder that satisfies
//! the [`SplitPolicy`] threshold is admitted, receives the next label, and has
//! its images divided between the train and test subsets. The whole index is
//! built once inside [`DatasetIndexer::new`] and is read-only afterwards.

pub mod discovery;
pub mod index;
pub mod policy;
pub mod sampling;
pub mod summary;

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;

pub use discovery::{discover_images, discover_people, PersonFolder, IMAGE_EXTENSIONS};
pub use index::{SplitIndex, Subset};
pub use policy::{SplitPolicy, DEFAULT_SEED};
pub use summary::SplitSummary;

/// Why a person folder did not receive a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    InsufficientImages { found: usize, required: usize },
    Unreadable { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPerson {
    pub name: String,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Scans a dataset root and owns the resulting [`SplitIndex`].
#[derive(Debug, Clone)]
pub struct DatasetIndexer {
    root: PathBuf,
    policy: SplitPolicy,
    index: SplitIndex,
    skipped: Vec<SkippedPerson>,
}

impl DatasetIndexer {
    /// Build the index for `root` under `policy`.
    ///
    /// Only an invalid policy is an error. A missing root, unreadable folders
    /// and undersized folders are logged and leave the index smaller.
    pub fn new(root: impl Into<PathBuf>, policy: SplitPolicy) -> Result<Self> {
        policy.validate()?;
        info!("Using {policy}");

        let mut indexer = Self {
            root: root.into(),
            policy,
            index: SplitIndex::default(),
            skipped: Vec::new(),
        };
        indexer.scan();
        indexer.log_summary();

        Ok(indexer)
    }

    /// Build the index described by a loaded [`Config`].
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.dataset.root, config.split.resolve()?)
    }

    fn scan(&mut self) {
        if !self.root.is_dir() {
            warn!(
                root = %self.root.display(),
                "Datasets directory does not exist; create it and add one folder of images per person"
            );
            return;
        }

        let people = match discover_people(&self.root) {
            Ok(people) => people,
            Err(e) => {
                warn!(root = %self.root.display(), error = %e, "Failed to list datasets directory");
                return;
            }
        };

        info!(root = %self.root.display(), folders = people.len(), "Using datasets directory");
        debug!(
            "Found folders: {:?}",
            people.iter().map(|p| p.name.as_str()).collect::<Vec<_>>()
        );

        for person in &people {
            self.index_person(person);
        }
    }

    fn index_person(&mut self, person: &PersonFolder) {
        let images = match discover_images(&person.path) {
            Ok(images) => images,
            Err(e) => {
                warn!(person = %person.name, error = %e, "Skipping unreadable person folder");
                self.skipped.push(SkippedPerson {
                    name: person.name.clone(),
                    reason: SkipReason::Unreadable {
                        message: e.to_string(),
                    },
                });
                return;
            }
        };

        let total = images.len();
        if !self.policy.admits(total) {
            let required = self.policy.required_images(total).max(1);
            warn!(
                person = %person.name,
                found = total,
                required,
                "Skipping person: only {total} images, need at least {required}"
            );
            self.skipped.push(SkippedPerson {
                name: person.name.clone(),
                reason: SkipReason::InsufficientImages {
                    found: total,
                    required,
                },
            });
            return;
        }

        let (train, test) = self.split_images(images);
        let label = self.index.admit(&person.name);

        info!(
            person = %person.name,
            label,
            total,
            train = train.len(),
            test = test.len(),
            "Person indexed"
        );

        for path in train {
            self.index.push(Subset::Train, label, path);
        }
        for path in test {
            self.index.push(Subset::Test, label, path);
        }
    }

    /// Divide an admitted person's images. Callers must check `admits` first.
    fn split_images(&self, images: Vec<PathBuf>) -> (Vec<PathBuf>, Vec<PathBuf>) {
        match self.policy {
            SplitPolicy::RandomSampling {
                max_images,
                train_images,
                seed,
            } => {
                let mut drawn = sampling::sample_without_replacement(&images, max_images, seed);
                let test = drawn.split_off(train_images);
                (drawn, test)
            }
            SplitPolicy::FixedCount { .. } | SplitPolicy::Percentage { .. } => {
                let mut train = images;
                let test = train.split_off(self.policy.train_count(train.len()));
                (train, test)
            }
        }
    }

    fn log_summary(&self) {
        let summary = self.summary();
        info!(
            persons = summary.persons,
            total = summary.total_images,
            train = summary.train_images,
            test = summary.test_images,
            skipped = self.skipped.len(),
            "Dataset split complete"
        );
        info!("\n{summary}");
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn policy(&self) -> SplitPolicy {
        self.policy
    }

    pub fn index(&self) -> &SplitIndex {
        &self.index
    }

    pub fn into_index(self) -> SplitIndex {
        self.index
    }

    /// Folders that were seen but not admitted, in listing order.
    pub fn skipped(&self) -> &[SkippedPerson] {
        &self.skipped
    }

    pub fn summary(&self) -> SplitSummary {
        SplitSummary::new(&self.index, self.policy)
    }
}
