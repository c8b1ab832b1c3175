use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ConfigError, Result};

/// Seed used for random sampling when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// How each person's images are divided between train and test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SplitPolicy {
    /// The first `required` images (in listing order) go to train.
    FixedCount { required: usize },

    /// `max(1, floor(n * fraction))` images go to train.
    Percentage { fraction: f64 },

    /// Draw `max_images` without replacement, the first `train_images` of
    /// the draw go to train. The generator is re-seeded for every person.
    RandomSampling {
        max_images: usize,
        train_images: usize,
        seed: u64,
    },
}

impl SplitPolicy {
    pub fn fixed_count(required: usize) -> Self {
        Self::FixedCount { required }
    }

    pub fn percentage(fraction: f64) -> Result<Self> {
        let policy = Self::Percentage { fraction };
        policy.validate()?;
        Ok(policy)
    }

    pub fn random_sampling(max_images: usize, train_images: usize) -> Result<Self> {
        let policy = Self::RandomSampling {
            max_images,
            train_images,
            seed: DEFAULT_SEED,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Replace the sampling seed. No effect on deterministic policies.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        match self {
            Self::RandomSampling {
                max_images,
                train_images,
                ..
            } => Self::RandomSampling {
                max_images,
                train_images,
                seed,
            },
            other => other,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::FixedCount { .. } => Ok(()),
            Self::Percentage { fraction } => {
                if fraction.is_finite() && (0.0..=1.0).contains(&fraction) {
                    Ok(())
                } else {
                    Err(ConfigError::InvalidPercentage(fraction))
                }
            }
            Self::RandomSampling {
                max_images,
                train_images,
                ..
            } => {
                if max_images == 0 {
                    Err(ConfigError::EmptySample)
                } else if train_images > max_images {
                    Err(ConfigError::TrainExceedsSample {
                        train: train_images,
                        max: max_images,
                    })
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Number of images that go to train for a folder holding `total` images.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn train_count(&self, total: usize) -> usize {
        match *self {
            Self::FixedCount { required } => required.min(total),
            Self::Percentage { fraction } => ((total as f64 * fraction).floor() as usize).max(1),
            Self::RandomSampling { train_images, .. } => train_images,
        }
    }

    /// Minimum number of images a folder needs to be admitted.
    pub fn required_images(&self, total: usize) -> usize {
        match *self {
            Self::FixedCount { required } => required,
            Self::Percentage { .. } => self.train_count(total),
            Self::RandomSampling { max_images, .. } => max_images,
        }
    }

    /// Whether a folder with `total` images receives a person id.
    ///
    /// Empty folders are never admitted.
    pub fn admits(&self, total: usize) -> bool {
        total > 0 && total >= self.required_images(total)
    }

    pub fn is_random(&self) -> bool {
        matches!(self, Self::RandomSampling { .. })
    }
}

impl fmt::Display for SplitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::FixedCount { required } => {
                write!(f, "fixed number split: {required} images for training per person")
            }
            Self::Percentage { fraction } => write!(
                f,
                "percentage-based split: {:.1}% training, {:.1}% testing",
                fraction * 100.0,
                (1.0 - fraction) * 100.0
            ),
            Self::RandomSampling {
                max_images,
                train_images,
                seed,
            } => write!(
                f,
                "random sampling: {max_images} images per person, {train_images} for training, {} for testing (seed {seed})",
                max_images.saturating_sub(train_images)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_count_caps_at_available() {
        let policy = SplitPolicy::fixed_count(6);
        assert_eq!(policy.train_count(10), 6);
        assert_eq!(policy.train_count(4), 4);
    }

    #[test]
    fn fixed_count_requires_full_count() {
        let policy = SplitPolicy::fixed_count(6);
        assert!(policy.admits(6));
        assert!(policy.admits(10));
        assert!(!policy.admits(5));
        assert!(!policy.admits(0));
    }

    #[test]
    fn percentage_floors_and_keeps_one() {
        let policy = SplitPolicy::percentage(0.3).unwrap();
        assert_eq!(policy.train_count(3), 1);
        assert_eq!(policy.train_count(10), 3);
        assert_eq!(policy.train_count(19), 5);

        let zero = SplitPolicy::percentage(0.0).unwrap();
        assert_eq!(zero.train_count(50), 1);
        assert!(zero.admits(1));
    }

    #[test]
    fn percentage_skips_empty_folder() {
        let policy = SplitPolicy::percentage(0.5).unwrap();
        assert!(!policy.admits(0));
        assert!(policy.admits(1));
    }

    #[test]
    fn percentage_rejects_out_of_range() {
        assert!(matches!(
            SplitPolicy::percentage(1.5),
            Err(ConfigError::InvalidPercentage(_))
        ));
        assert!(SplitPolicy::percentage(-0.1).is_err());
        assert!(SplitPolicy::percentage(f64::NAN).is_err());
        assert!(SplitPolicy::percentage(1.0).is_ok());
    }

    #[test]
    fn random_sampling_validation() {
        assert!(SplitPolicy::random_sampling(20, 6).is_ok());
        assert!(SplitPolicy::random_sampling(20, 20).is_ok());
        assert!(SplitPolicy::random_sampling(20, 0).is_ok());
        assert!(matches!(
            SplitPolicy::random_sampling(5, 6),
            Err(ConfigError::TrainExceedsSample { train: 6, max: 5 })
        ));
        assert!(matches!(
            SplitPolicy::random_sampling(0, 0),
            Err(ConfigError::EmptySample)
        ));
    }

    #[test]
    fn random_sampling_threshold() {
        let policy = SplitPolicy::random_sampling(20, 6).unwrap();
        assert!(!policy.admits(19));
        assert!(policy.admits(20));
        assert!(policy.admits(35));
        assert_eq!(policy.train_count(35), 6);
    }

    #[test]
    fn with_seed_only_touches_random_sampling() {
        let random = SplitPolicy::random_sampling(4, 2).unwrap().with_seed(7);
        assert!(matches!(random, SplitPolicy::RandomSampling { seed: 7, .. }));

        let fixed = SplitPolicy::fixed_count(3).with_seed(7);
        assert_eq!(fixed, SplitPolicy::fixed_count(3));
    }

    #[test]
    fn display_of_unvalidated_sample_does_not_underflow() {
        let policy = SplitPolicy::RandomSampling {
            max_images: 4,
            train_images: 6,
            seed: 1,
        };
        assert!(policy.to_string().contains("0 for testing"));
    }
}
