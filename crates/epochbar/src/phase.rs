//! Pipeline phases and their row labels.

use std::fmt;

/// A stage of a batch-processing pipeline run.
///
/// `Train` is the primary phase: its row anchors the display for the
/// whole run. Every other phase is secondary and at most one secondary
/// row is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Short validation pass executed before the first training epoch.
    SanityCheck,
    /// The optimization loop over the training source.
    Train,
    /// In-loop evaluation between training epochs.
    Validate,
    /// Held-out evaluation.
    Test,
    /// Inference over an unlabeled source.
    Predict,
}

impl Phase {
    pub(crate) const COUNT: usize = 5;

    /// Whether this phase owns the primary row.
    pub fn is_primary(self) -> bool {
        matches!(self, Phase::Train)
    }

    /// Whether this phase renders as a secondary row.
    pub fn is_secondary(self) -> bool {
        !self.is_primary()
    }

    /// Row label shown in the description column. The epoch index is
    /// interpolated into the training label only.
    pub fn label(self, epoch: u64) -> String {
        match self {
            Phase::SanityCheck => "Sanity Checking".to_string(),
            Phase::Train => format!("Epoch {epoch}"),
            Phase::Validate => "Validation".to_string(),
            Phase::Test => "Testing".to_string(),
            Phase::Predict => "Predicting".to_string(),
        }
    }

    /// Stable slot for per-phase bookkeeping.
    pub(crate) fn index(self) -> usize {
        match self {
            Phase::SanityCheck => 0,
            Phase::Train => 1,
            Phase::Validate => 2,
            Phase::Test => 3,
            Phase::Predict => 4,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::SanityCheck => "sanity-check",
            Phase::Train => "train",
            Phase::Validate => "validate",
            Phase::Test => "test",
            Phase::Predict => "predict",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn train_is_the_only_primary() {
        assert!(Phase::Train.is_primary());
        for phase in [Phase::SanityCheck, Phase::Validate, Phase::Test, Phase::Predict] {
            assert!(phase.is_secondary());
        }
    }

    #[test]
    fn labels_interpolate_epoch_for_train_only() {
        assert_eq!(Phase::Train.label(4), "Epoch 4");
        assert_eq!(Phase::Validate.label(4), "Validation");
        assert_eq!(Phase::SanityCheck.label(0), "Sanity Checking");
    }

    #[test]
    fn indices_are_distinct() {
        let mut seen = [false; Phase::COUNT];
        for phase in [
            Phase::SanityCheck,
            Phase::Train,
            Phase::Validate,
            Phase::Test,
            Phase::Predict,
        ] {
            assert!(!seen[phase.index()]);
            seen[phase.index()] = true;
        }
    }
}
