/// This crate is a manhwa recommendation engine built on a TF-IDF vectorizer.
pub mod catalog;
pub mod engine;
pub mod error;

/// Catalog of manhwa titles
/// The frozen item collection every other component works from.
/// It manages:
/// - The item list, in insertion order
/// - An id lookup index
/// - Document frequencies for every genre and tag label
///
/// A catalog is immutable once built; scoring, ranking and reporting all
/// treat it as a snapshot. Duplicate ids are dropped at construction with a
/// warning, so lookups stay unambiguous.
///
/// # Serialization
/// Supported. Only the item list is stored; the lookup index and document
/// frequencies are rebuilt on deserialization.
pub use catalog::Catalog;

/// Feature vocabulary
/// The ordered term list shared by every vector in one catalog snapshot.
/// Genres come first, tags after, each term at the position where it was
/// first seen. Two vectors are only comparable when they were built from
/// the same vocabulary.
pub use catalog::Vocabulary;

/// A single manhwa title and its features
/// Genres and tags drive similarity; art style, status, release year and
/// rating feed the composite-score bonus factors.
pub use catalog::item::Manhwa;

/// A free-form preference query
/// Preferred genres and tags with no backing catalog item. Vectorized like
/// an item document, but scored without attribute bonus factors.
pub use catalog::item::PreferenceQuery;

/// TF-IDF vectorizer over one catalog snapshot
/// Turns an item or a preference query into a [`FeatureVector`] aligned to
/// the catalog's vocabulary. Term frequency comes from the item's own
/// genre and tag list; inverse document frequency comes from the catalog's
/// document counts with `ln(N / (df + 1))` smoothing.
pub use engine::vectorize::Vectorizer;

/// A TF-IDF vector with per-term provenance
/// Holds the term, TF, IDF and TF-IDF weight at every vocabulary position,
/// so a similarity score can be traced back to the labels that produced it.
pub use engine::vectorize::FeatureVector;

/// Cosine similarity with a full calculation trace
/// Produces the similarity score together with every per-term product and
/// square that went into it. Zero-magnitude vectors score 0.0 rather than
/// NaN; vectors of different lengths are rejected.
pub use engine::cosine::{cosine_with_trace, CosineScore, CosineTrace};

/// Attribute bonus factors
/// The four weighted bonuses layered on top of cosine similarity for
/// item-to-item scoring: art style, status, release-year proximity and
/// rating proximity.
pub use engine::factors::{composite_score, FactorBreakdown};

/// Ranking strategies
/// Every strategy reduces a candidate to one score behind the [`Scorer`]
/// trait:
/// - `CompositeCosine`: TF-IDF cosine plus attribute bonuses, the score the
///   audit report explains
/// - `WeightedJaccard`: genre/tag set overlap plus year proximity, for fast
///   catalog ranking
/// - `PreferenceFraction`: matched fraction of preferred genres and tags
pub use engine::rank::{CompositeCosine, PreferenceFraction, Scorer, WeightedJaccard};

/// Ranking front door
/// Builds the vocabulary for a catalog snapshot once and serves the
/// recommendation, filtering, reporting and evaluation paths from it.
pub use engine::rank::{
    FilterStats, JaccardWeights, RecommendOptions, Recommender, Scored, YearRange,
};

/// Similarity audit report
/// The complete paper trail for one comparison: both TF-IDF breakdowns,
/// dense vectors, the position-by-position vector table, the cosine trace,
/// the factor breakdown and the thresholded evaluation.
pub use engine::report::SimilarityReport;

/// Prediction quality measurement
/// Classifies thresholded scores against a label-overlap ground truth and
/// aggregates the per-pair confusion matrices into precision, recall,
/// accuracy and F1.
pub use engine::evaluate::{ConfusionMatrix, Evaluation, EvaluationSummary};

/// Error type shared across the crate
pub use error::{RecommendError, Result};
