use serde::Serialize;

/// Relevance threshold applied to final scores when no override is given.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// ConfusionMatrix struct
/// Counts of the four prediction outcomes. For a single scored pair the
/// matrix is one-hot; aggregated matrices sum cells across pairs.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub true_positive: u32,
    pub false_positive: u32,
    pub true_negative: u32,
    pub false_negative: u32,
}

/// Implementation for building matrices
impl ConfusionMatrix {
    /// Classify one prediction against the heuristic ground truth.
    /// Exactly one cell of the returned matrix is 1.
    ///
    /// # Arguments
    /// * `predicted` - Whether the score cleared the threshold
    /// * `actual` - Whether the pair is heuristically relevant
    pub fn classify(predicted: bool, actual: bool) -> Self {
        ConfusionMatrix {
            true_positive: (predicted && actual) as u32,
            false_positive: (predicted && !actual) as u32,
            true_negative: (!predicted && !actual) as u32,
            false_negative: (!predicted && actual) as u32,
        }
    }

    /// Add another matrix's cells into this one.
    pub fn merge(&mut self, other: &ConfusionMatrix) {
        self.true_positive += other.true_positive;
        self.false_positive += other.false_positive;
        self.true_negative += other.true_negative;
        self.false_negative += other.false_negative;
    }
}

/// Implementation for the derived metrics
/// Every division by zero resolves to 0.0, never NaN.
impl ConfusionMatrix {
    /// Get the total number of classified pairs.
    #[inline]
    pub fn total(&self) -> u32 {
        self.true_positive + self.false_positive + self.true_negative + self.false_negative
    }

    /// Get precision: `tp / (tp + fp)`. Returns 0.0 if nothing was
    /// predicted relevant.
    #[inline]
    pub fn precision(&self) -> f64 {
        let denominator = self.true_positive + self.false_positive;
        if denominator == 0 {
            return 0.0;
        }
        f64::from(self.true_positive) / f64::from(denominator)
    }

    /// Get recall: `tp / (tp + fn)`. Returns 0.0 if nothing was actually
    /// relevant.
    #[inline]
    pub fn recall(&self) -> f64 {
        let denominator = self.true_positive + self.false_negative;
        if denominator == 0 {
            return 0.0;
        }
        f64::from(self.true_positive) / f64::from(denominator)
    }

    /// Get accuracy: `(tp + tn) / total`. Returns 0.0 for an empty matrix.
    #[inline]
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        f64::from(self.true_positive + self.true_negative) / f64::from(total)
    }

    /// Get the F1 score, the harmonic mean of precision and recall.
    /// Returns 0.0 when both are 0.
    #[inline]
    pub fn f1_score(&self) -> f64 {
        let precision = self.precision();
        let recall = self.recall();
        if precision + recall == 0.0 {
            return 0.0;
        }
        2.0 * precision * recall / (precision + recall)
    }
}

/// Threshold evaluation of one scored pair.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub threshold: f64,
    pub predicted_relevant: bool,
    pub actually_relevant: bool,
    pub confusion: ConfusionMatrix,
    pub precision: f64,
    pub recall: f64,
    pub accuracy: f64,
    pub f1_score: f64,
}

/// Evaluate one scored pair against the relevance threshold.
/// The threshold comparison is inclusive: a score exactly at the threshold
/// counts as predicted relevant.
///
/// # Arguments
/// * `final_score` - The pair's final similarity score
/// * `threshold` - Relevance threshold
/// * `actually_relevant` - Heuristic ground-truth label
pub fn evaluate_pair(final_score: f64, threshold: f64, actually_relevant: bool) -> Evaluation {
    let predicted_relevant = final_score >= threshold;
    let confusion = ConfusionMatrix::classify(predicted_relevant, actually_relevant);
    Evaluation {
        threshold,
        predicted_relevant,
        actually_relevant,
        confusion,
        precision: confusion.precision(),
        recall: confusion.recall(),
        accuracy: confusion.accuracy(),
        f1_score: confusion.f1_score(),
    }
}

/// Corpus-aggregated evaluation across many scored pairs.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct EvaluationSummary {
    pub threshold: f64,
    pub pairs: u32,
    pub confusion: ConfusionMatrix,
    pub precision: f64,
    pub recall: f64,
    pub accuracy: f64,
    pub f1_score: f64,
}

/// Aggregate per-pair evaluations by summing their confusion cells.
///
/// # Arguments
/// * `threshold` - The threshold the evaluations were produced with
/// * `evaluations` - Per-pair evaluations to aggregate
pub fn summarize(threshold: f64, evaluations: &[Evaluation]) -> EvaluationSummary {
    let mut confusion = ConfusionMatrix::default();
    for evaluation in evaluations {
        confusion.merge(&evaluation.confusion);
    }
    EvaluationSummary {
        threshold,
        pairs: confusion.total(),
        confusion,
        precision: confusion.precision(),
        recall: confusion.recall(),
        accuracy: confusion.accuracy(),
        f1_score: confusion.f1_score(),
    }
}
