use serde::Serialize;

use crate::catalog::Vocabulary;
use crate::engine::vectorize::FeatureVector;
use crate::error::{RecommendError, Result};

/// One position of the dot-product accumulation.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DotStep {
    pub term: String,
    pub source_value: f64,
    pub target_value: f64,
    pub product: f64,
}

/// One position of a magnitude accumulation.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MagnitudeStep {
    pub term: String,
    pub value: f64,
    pub square: f64,
}

/// Full working for one vector magnitude.
#[derive(Serialize, Debug, Clone)]
pub struct MagnitudeTrace {
    pub steps: Vec<MagnitudeStep>,
    pub sum_of_squares: f64,
    pub magnitude: f64,
}

/// The headline numbers of one cosine comparison.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct CosineScore {
    pub dot_product: f64,
    pub source_magnitude: f64,
    pub target_magnitude: f64,
    pub similarity: f64,
}

/// Cosine similarity with every intermediate value retained.
/// The step lists cover every vocabulary position, including positions
/// where both weights are zero, so the audit table lines up with the
/// vocabulary ordering.
#[derive(Serialize, Debug, Clone)]
pub struct CosineTrace {
    pub score: CosineScore,
    pub dot_steps: Vec<DotStep>,
    pub source_magnitude: MagnitudeTrace,
    pub target_magnitude: MagnitudeTrace,
}

impl CosineTrace {
    /// Get the final similarity value.
    #[inline]
    pub fn similarity(&self) -> f64 {
        self.score.similarity
    }
}

/// Compute cosine similarity between two feature vectors, keeping the
/// per-term products and squares.
///
/// Similarity is defined as 0.0 when either magnitude is exactly zero, so
/// an item without any features compares as 0 to everything instead of
/// producing NaN. A negative similarity is possible when IDF goes negative
/// and is returned as-is.
///
/// # Arguments
/// * `source` - Query-side vector
/// * `target` - Candidate-side vector
/// * `vocabulary` - The vocabulary both vectors were built from
///
/// # Errors
/// Returns [`RecommendError::VectorLengthMismatch`] when the vectors and
/// vocabulary do not agree on length; vectors from different vocabularies
/// must never be compared.
pub fn cosine_with_trace(
    source: &FeatureVector,
    target: &FeatureVector,
    vocabulary: &Vocabulary,
) -> Result<CosineTrace> {
    check_len(source.len(), target.len())?;
    check_len(source.len(), vocabulary.len())?;

    let mut dot_steps = Vec::with_capacity(vocabulary.len());
    let mut source_steps = Vec::with_capacity(vocabulary.len());
    let mut target_steps = Vec::with_capacity(vocabulary.len());
    let mut dot_product = 0.0;
    let mut source_squares = 0.0;
    let mut target_squares = 0.0;

    for (position, term) in vocabulary.terms().enumerate() {
        let a = source.weight(position);
        let b = target.weight(position);
        let product = a * b;
        dot_product += product;
        source_squares += a * a;
        target_squares += b * b;
        dot_steps.push(DotStep {
            term: term.to_string(),
            source_value: a,
            target_value: b,
            product,
        });
        source_steps.push(MagnitudeStep {
            term: term.to_string(),
            value: a,
            square: a * a,
        });
        target_steps.push(MagnitudeStep {
            term: term.to_string(),
            value: b,
            square: b * b,
        });
    }

    let source_magnitude = source_squares.sqrt();
    let target_magnitude = target_squares.sqrt();
    // 0/0 must come out as 0, never NaN.
    let similarity = if source_magnitude == 0.0 || target_magnitude == 0.0 {
        0.0
    } else {
        dot_product / (source_magnitude * target_magnitude)
    };

    Ok(CosineTrace {
        score: CosineScore {
            dot_product,
            source_magnitude,
            target_magnitude,
            similarity,
        },
        dot_steps,
        source_magnitude: MagnitudeTrace {
            steps: source_steps,
            sum_of_squares: source_squares,
            magnitude: source_magnitude,
        },
        target_magnitude: MagnitudeTrace {
            steps: target_steps,
            sum_of_squares: target_squares,
            magnitude: target_magnitude,
        },
    })
}

/// Similarity alone, without retaining steps, for the bulk scoring paths.
/// Both vectors must come from the same vocabulary; positions past either
/// vector's length read as zero weight.
pub(crate) fn cosine_similarity(source: &FeatureVector, target: &FeatureVector) -> f64 {
    let positions = source.len().max(target.len());
    let mut dot_product = 0.0;
    let mut source_squares = 0.0;
    let mut target_squares = 0.0;
    for position in 0..positions {
        let a = source.weight(position);
        let b = target.weight(position);
        dot_product += a * b;
        source_squares += a * a;
        target_squares += b * b;
    }
    let source_magnitude = source_squares.sqrt();
    let target_magnitude = target_squares.sqrt();
    if source_magnitude == 0.0 || target_magnitude == 0.0 {
        0.0
    } else {
        dot_product / (source_magnitude * target_magnitude)
    }
}

#[inline]
fn check_len(left: usize, right: usize) -> Result<()> {
    if left == right {
        Ok(())
    } else {
        Err(RecommendError::VectorLengthMismatch { left, right })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::item::Manhwa;
    use crate::catalog::Catalog;
    use crate::engine::vectorize::Vectorizer;

    fn catalog_and_vocabulary(items: Vec<Manhwa>) -> (Catalog, Vocabulary) {
        let catalog = Catalog::from_items(items);
        let vocabulary = Vocabulary::build(&catalog);
        (catalog, vocabulary)
    }

    #[test]
    fn identical_items_reach_full_similarity() {
        // Four items so the shared terms keep a non-zero IDF: with only
        // three, ln(3 / (2 + 1)) would zero the whole vector out.
        let (catalog, vocabulary) = catalog_and_vocabulary(vec![
            Manhwa::new("1", "A")
                .with_genres(&["Action", "Fantasy"])
                .with_tags(&["Dungeons"]),
            Manhwa::new("2", "B")
                .with_genres(&["Action", "Fantasy"])
                .with_tags(&["Dungeons"]),
            Manhwa::new("3", "C")
                .with_genres(&["Romance"])
                .with_tags(&["School"]),
            Manhwa::new("4", "D")
                .with_genres(&["Comedy"])
                .with_tags(&["Gags"]),
        ]);
        let vectorizer = Vectorizer::new(&catalog, &vocabulary);
        let a = vectorizer.vectorize_item(catalog.get("1").unwrap());
        let b = vectorizer.vectorize_item(catalog.get("2").unwrap());

        let trace = cosine_with_trace(&a, &b, &vocabulary).unwrap();
        assert!(trace.score.source_magnitude > 0.0);
        assert!((trace.similarity() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn self_similarity_is_one_for_featured_items() {
        let (catalog, vocabulary) = catalog_and_vocabulary(vec![
            Manhwa::new("1", "A")
                .with_genres(&["Action", "Fantasy"])
                .with_tags(&["Dungeons"]),
            Manhwa::new("2", "B").with_genres(&["Romance"]),
            Manhwa::new("3", "C").with_genres(&["Comedy"]),
        ]);
        let vectorizer = Vectorizer::new(&catalog, &vocabulary);
        let vector = vectorizer.vectorize_item(catalog.get("1").unwrap());

        let trace = cosine_with_trace(&vector, &vector, &vocabulary).unwrap();
        assert!((trace.similarity() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn disjoint_items_score_zero() {
        let (catalog, vocabulary) = catalog_and_vocabulary(vec![
            Manhwa::new("1", "A").with_genres(&["Romance"]),
            Manhwa::new("2", "B").with_genres(&["Horror"]),
            Manhwa::new("3", "C").with_genres(&["Comedy"]),
        ]);
        let vectorizer = Vectorizer::new(&catalog, &vocabulary);
        let a = vectorizer.vectorize_item(catalog.get("1").unwrap());
        let b = vectorizer.vectorize_item(catalog.get("2").unwrap());

        let trace = cosine_with_trace(&a, &b, &vocabulary).unwrap();
        assert!(trace.score.source_magnitude > 0.0);
        assert!(trace.score.target_magnitude > 0.0);
        assert_eq!(trace.score.dot_product, 0.0);
        assert_eq!(trace.similarity(), 0.0);
    }

    #[test]
    fn similarity_is_symmetric() {
        let (catalog, vocabulary) = catalog_and_vocabulary(vec![
            Manhwa::new("1", "A")
                .with_genres(&["Action", "Fantasy"])
                .with_tags(&["Dungeons", "Magic"]),
            Manhwa::new("2", "B")
                .with_genres(&["Action", "Horror"])
                .with_tags(&["Magic"]),
            Manhwa::new("3", "C").with_genres(&["Comedy"]),
        ]);
        let vectorizer = Vectorizer::new(&catalog, &vocabulary);
        let a = vectorizer.vectorize_item(catalog.get("1").unwrap());
        let b = vectorizer.vectorize_item(catalog.get("2").unwrap());

        let forward = cosine_with_trace(&a, &b, &vocabulary).unwrap();
        let backward = cosine_with_trace(&b, &a, &vocabulary).unwrap();
        assert_eq!(forward.similarity(), backward.similarity());
    }

    #[test]
    fn zero_magnitude_resolves_to_zero_not_nan() {
        let (catalog, vocabulary) = catalog_and_vocabulary(vec![
            Manhwa::new("1", "Empty"),
            Manhwa::new("2", "Full")
                .with_genres(&["Action"])
                .with_tags(&["Dungeons"]),
        ]);
        let vectorizer = Vectorizer::new(&catalog, &vocabulary);
        let empty = vectorizer.vectorize_item(catalog.get("1").unwrap());
        let full = vectorizer.vectorize_item(catalog.get("2").unwrap());

        let trace = cosine_with_trace(&empty, &full, &vocabulary).unwrap();
        assert_eq!(trace.similarity(), 0.0);
        assert!(!trace.similarity().is_nan());

        // Both sides empty is the 0/0 case.
        let trace = cosine_with_trace(&empty, &empty, &vocabulary).unwrap();
        assert_eq!(trace.similarity(), 0.0);
    }

    #[test]
    fn trace_sums_match_step_lists() {
        let (catalog, vocabulary) = catalog_and_vocabulary(vec![
            Manhwa::new("1", "A")
                .with_genres(&["Action", "Fantasy"])
                .with_tags(&["Dungeons"]),
            Manhwa::new("2", "B")
                .with_genres(&["Action"])
                .with_tags(&["Dungeons", "Magic"]),
            Manhwa::new("3", "C").with_genres(&["Romance"]),
        ]);
        let vectorizer = Vectorizer::new(&catalog, &vocabulary);
        let a = vectorizer.vectorize_item(catalog.get("1").unwrap());
        let b = vectorizer.vectorize_item(catalog.get("2").unwrap());

        let trace = cosine_with_trace(&a, &b, &vocabulary).unwrap();
        assert_eq!(trace.dot_steps.len(), vocabulary.len());
        assert_eq!(trace.source_magnitude.steps.len(), vocabulary.len());
        assert_eq!(trace.target_magnitude.steps.len(), vocabulary.len());

        let dot: f64 = trace.dot_steps.iter().map(|s| s.product).sum();
        assert!((dot - trace.score.dot_product).abs() < 1e-12);

        let squares: f64 = trace.source_magnitude.steps.iter().map(|s| s.square).sum();
        assert!((squares - trace.source_magnitude.sum_of_squares).abs() < 1e-12);
        assert!((squares.sqrt() - trace.score.source_magnitude).abs() < 1e-12);
    }

    #[test]
    fn mismatched_vector_lengths_are_rejected() {
        let (catalog, vocabulary) = catalog_and_vocabulary(vec![
            Manhwa::new("1", "A").with_genres(&["Action"]),
            Manhwa::new("2", "B").with_genres(&["Romance"]),
        ]);
        let (other_catalog, other_vocabulary) = catalog_and_vocabulary(vec![
            Manhwa::new("1", "A")
                .with_genres(&["Action", "Fantasy", "Horror"])
                .with_tags(&["Dungeons"]),
        ]);
        let vectorizer = Vectorizer::new(&catalog, &vocabulary);
        let other_vectorizer = Vectorizer::new(&other_catalog, &other_vocabulary);

        let a = vectorizer.vectorize_item(catalog.get("1").unwrap());
        let b = other_vectorizer.vectorize_item(other_catalog.get("1").unwrap());

        let err = cosine_with_trace(&a, &b, &vocabulary).unwrap_err();
        assert!(matches!(err, RecommendError::VectorLengthMismatch { .. }));
    }

    #[test]
    fn traceless_similarity_agrees_with_trace() {
        // Four items keep the shared "Action" at a non-zero IDF, so the
        // agreement is checked on a non-trivial dot product.
        let (catalog, vocabulary) = catalog_and_vocabulary(vec![
            Manhwa::new("1", "A")
                .with_genres(&["Action", "Fantasy"])
                .with_tags(&["Dungeons"]),
            Manhwa::new("2", "B")
                .with_genres(&["Action"])
                .with_tags(&["Magic"]),
            Manhwa::new("3", "C").with_genres(&["Romance"]),
            Manhwa::new("4", "D").with_genres(&["Comedy"]),
        ]);
        let vectorizer = Vectorizer::new(&catalog, &vocabulary);
        let a = vectorizer.vectorize_item(catalog.get("1").unwrap());
        let b = vectorizer.vectorize_item(catalog.get("2").unwrap());

        let trace = cosine_with_trace(&a, &b, &vocabulary).unwrap();
        assert!(trace.score.dot_product > 0.0);
        let bare = cosine_similarity(&a, &b);
        assert!((bare - trace.similarity()).abs() < 1e-12);
    }
}
