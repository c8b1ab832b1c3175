use serde::Serialize;
use std::fmt;

use super::index::SplitIndex;
use super::policy::SplitPolicy;

/// Aggregate numbers over a finished [`SplitIndex`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitSummary {
    pub persons: usize,
    pub total_images: usize,
    pub train_images: usize,
    pub test_images: usize,
    /// `None` when the index holds no images.
    pub train_percent: Option<f64>,
    pub test_percent: Option<f64>,
    pub names: Vec<String>,
    pub policy: SplitPolicy,
}

#[allow(clippy::cast_precision_loss)]
fn percent(part: usize, whole: usize) -> Option<f64> {
    (whole > 0).then(|| part as f64 / whole as f64 * 100.0)
}

impl SplitSummary {
    pub fn new(index: &SplitIndex, policy: SplitPolicy) -> Self {
        let total = index.total_images();
        Self {
            persons: index.person_count(),
            total_images: total,
            train_images: index.total_train(),
            test_images: index.total_test(),
            train_percent: percent(index.total_train(), total),
            test_percent: percent(index.total_test(), total),
            names: index.names_by_person().to_vec(),
            policy,
        }
    }
}

struct Percent(Option<f64>);

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(p) => write!(f, "{p:.1}%"),
            None => f.write_str("N/A"),
        }
    }
}

impl fmt::Display for SplitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Dataset Split Summary ===")?;
        writeln!(f, "Total persons: {}", self.persons)?;
        writeln!(f, "Total images: {}", self.total_images)?;
        writeln!(
            f,
            "Training images: {} ({})",
            self.train_images,
            Percent(self.train_percent)
        )?;
        writeln!(
            f,
            "Testing images: {} ({})",
            self.test_images,
            Percent(self.test_percent)
        )?;
        write!(f, "Person names: {:?}", self.names)?;

        if let SplitPolicy::RandomSampling {
            max_images,
            train_images,
            ..
        } = self.policy
        {
            write!(
                f,
                "\nRandom sampling: {max_images} images per person, {train_images} train, {} test",
                max_images.saturating_sub(train_images)
            )?;
        }

        Ok(())
    }
}
