use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Which side of the split an image lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subset {
    Train,
    Test,
}

/// The train/test index consumed by the training pipeline.
///
/// Paths and labels are parallel vectors. Per-person vectors are indexed by
/// label, which is the person id assigned at admission.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SplitIndex {
    train_paths: Vec<PathBuf>,
    train_labels: Vec<usize>,
    test_paths: Vec<PathBuf>,
    test_labels: Vec<usize>,
    train_counts: Vec<usize>,
    test_counts: Vec<usize>,
    names: Vec<String>,
    label_to_name: BTreeMap<usize, String>,
}

impl SplitIndex {
    /// Register a newly admitted person and return their label.
    pub(crate) fn admit(&mut self, name: &str) -> usize {
        let label = self.names.len();
        self.names.push(name.to_string());
        self.label_to_name.insert(label, name.to_string());
        self.train_counts.push(0);
        self.test_counts.push(0);
        label
    }

    pub(crate) fn push(&mut self, subset: Subset, label: usize, path: PathBuf) {
        debug_assert!(label < self.names.len(), "label {label} was never admitted");

        match subset {
            Subset::Train => {
                self.train_paths.push(path);
                self.train_labels.push(label);
                self.train_counts[label] += 1;
            }
            Subset::Test => {
                self.test_paths.push(path);
                self.test_labels.push(label);
                self.test_counts[label] += 1;
            }
        }
    }

    pub fn train_paths(&self) -> &[PathBuf] {
        &self.train_paths
    }

    pub fn train_labels(&self) -> &[usize] {
        &self.train_labels
    }

    pub fn test_paths(&self) -> &[PathBuf] {
        &self.test_paths
    }

    pub fn test_labels(&self) -> &[usize] {
        &self.test_labels
    }

    /// Training image count per person, indexed by label.
    pub fn train_counts_by_person(&self) -> &[usize] {
        &self.train_counts
    }

    /// Testing image count per person, indexed by label.
    pub fn test_counts_by_person(&self) -> &[usize] {
        &self.test_counts
    }

    /// Admitted person names, indexed by label.
    pub fn names_by_person(&self) -> &[String] {
        &self.names
    }

    pub fn label_to_name(&self) -> &BTreeMap<usize, String> {
        &self.label_to_name
    }

    pub fn person_count(&self) -> usize {
        self.names.len()
    }

    pub fn total_train(&self) -> usize {
        self.train_paths.len()
    }

    pub fn total_test(&self) -> usize {
        self.test_paths.len()
    }

    pub fn total_images(&self) -> usize {
        self.total_train() + self.total_test()
    }

    pub fn is_empty(&self) -> bool {
        self.total_images() == 0 && self.names.is_empty()
    }

    /// Iterate `(path, label)` pairs of one subset in index order.
    pub fn records(&self, subset: Subset) -> impl Iterator<Item = (&Path, usize)> {
        let (paths, labels) = match subset {
            Subset::Train => (&self.train_paths, &self.train_labels),
            Subset::Test => (&self.test_paths, &self.test_labels),
        };
        paths
            .iter()
            .map(PathBuf::as_path)
            .zip(labels.iter().copied())
    }
}
