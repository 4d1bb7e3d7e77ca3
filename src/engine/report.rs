use serde::Serialize;
use tracing::debug;

use crate::catalog::item::{Manhwa, PreferenceQuery};
use crate::catalog::{Catalog, Vocabulary};
use crate::engine::cosine::{cosine_with_trace, CosineTrace};
use crate::engine::evaluate::{evaluate_pair, Evaluation, DEFAULT_THRESHOLD};
use crate::engine::factors::{composite_score, FactorBreakdown};
use crate::engine::vectorize::{FeatureVector, TermWeight, Vectorizer};
use crate::error::Result;

/// One row of the side-by-side vector table.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct VectorRow {
    pub term: String,
    pub source_value: f64,
    pub target_value: f64,
    /// Whether either side carries a positive weight for this term.
    pub has_value: bool,
}

/// The non-zero TF-IDF working for one side of a comparison, split into
/// genre and tag rows.
#[derive(Serialize, Debug, Clone)]
pub struct TfidfSection {
    pub genres: Vec<TermWeight>,
    pub tags: Vec<TermWeight>,
}

/// SimilarityReport struct
/// The complete audit record for one (query, candidate) comparison: the
/// TF-IDF working on both sides, the raw vectors, the cosine trace, the
/// auxiliary factors, the final score and its threshold evaluation.
/// A report is a pure value built for a single pair; nothing in it is
/// shared or cached.
#[derive(Serialize, Debug, Clone)]
pub struct SimilarityReport {
    pub source_tfidf: TfidfSection,
    pub target_tfidf: TfidfSection,
    pub source_vector: Vec<f64>,
    pub target_vector: Vec<f64>,
    pub vector_table: Vec<VectorRow>,
    pub cosine: CosineTrace,
    /// Auxiliary factors; absent on the preference path, which has no
    /// source item attributes to compare.
    pub factors: Option<FactorBreakdown>,
    pub final_score: f64,
    pub evaluation: Evaluation,
}

/// Build the full similarity report for an item pair.
///
/// The final score is the cosine similarity plus the weighted auxiliary
/// factor bonuses; the evaluation grades that score against the default
/// threshold, with "shares at least one genre or tag" as ground truth.
///
/// # Arguments
/// * `catalog` - The frozen catalog snapshot
/// * `vocabulary` - Vocabulary built from the same snapshot
/// * `source` - Query-side item
/// * `target` - Candidate-side item
pub fn explain_items(
    catalog: &Catalog,
    vocabulary: &Vocabulary,
    source: &Manhwa,
    target: &Manhwa,
) -> Result<SimilarityReport> {
    let vectorizer = Vectorizer::new(catalog, vocabulary);
    let source_vector = vectorizer.vectorize_item(source);
    let target_vector = vectorizer.vectorize_item(target);
    let cosine = cosine_with_trace(&source_vector, &target_vector, vocabulary)?;

    let factors = FactorBreakdown::between(source, target);
    let final_score = composite_score(cosine.similarity(), &factors);
    let evaluation = evaluate_pair(final_score, DEFAULT_THRESHOLD, source.shares_feature(target));

    debug!(
        source = %source.id,
        target = %target.id,
        similarity = cosine.similarity(),
        final_score,
        "item similarity report built"
    );

    Ok(SimilarityReport {
        source_tfidf: vocabulary_sections(&source_vector, vocabulary),
        target_tfidf: vocabulary_sections(&target_vector, vocabulary),
        vector_table: vector_table(&source_vector, &target_vector, vocabulary),
        source_vector: source_vector.dense(),
        target_vector: target_vector.dense(),
        cosine,
        factors: Some(factors),
        final_score,
        evaluation,
    })
}

/// Build the similarity report for a preference query against one item.
///
/// There are no source item attributes to compare, so the final score is
/// the cosine similarity alone and the factor breakdown is absent. Ground
/// truth is "the candidate carries at least one preferred term".
///
/// # Arguments
/// * `catalog` - The frozen catalog snapshot
/// * `vocabulary` - Vocabulary built from the same snapshot
/// * `query` - Preferred genres and tags
/// * `target` - Candidate-side item
pub fn explain_preference(
    catalog: &Catalog,
    vocabulary: &Vocabulary,
    query: &PreferenceQuery,
    target: &Manhwa,
) -> Result<SimilarityReport> {
    let vectorizer = Vectorizer::new(catalog, vocabulary);
    let source_vector = vectorizer.vectorize_preference(query);
    let target_vector = vectorizer.vectorize_item(target);
    let cosine = cosine_with_trace(&source_vector, &target_vector, vocabulary)?;

    let final_score = cosine.similarity();
    let evaluation = evaluate_pair(final_score, DEFAULT_THRESHOLD, query.matches(target));

    debug!(target = %target.id, final_score, "preference similarity report built");

    Ok(SimilarityReport {
        source_tfidf: preference_sections(&source_vector, query, vocabulary),
        target_tfidf: vocabulary_sections(&target_vector, vocabulary),
        vector_table: vector_table(&source_vector, &target_vector, vocabulary),
        source_vector: source_vector.dense(),
        target_vector: target_vector.dense(),
        cosine,
        factors: None,
        final_score,
        evaluation,
    })
}

/// Collect a vector's positive weights, split along the vocabulary's
/// genre/tag partition.
fn vocabulary_sections(vector: &FeatureVector, vocabulary: &Vocabulary) -> TfidfSection {
    let split = vocabulary.genre_count().min(vector.term_weights().len());
    let (genres, tags) = vector.term_weights().split_at(split);
    TfidfSection {
        genres: positive_rows(genres),
        tags: positive_rows(tags),
    }
}

/// Collect the positive weights of the user's own selections, keeping the
/// user's ordering rather than the vocabulary's.
fn preference_sections(
    vector: &FeatureVector,
    query: &PreferenceQuery,
    vocabulary: &Vocabulary,
) -> TfidfSection {
    let selected_rows = |selected: &[String]| -> Vec<TermWeight> {
        selected
            .iter()
            .filter_map(|term| vocabulary.position(term))
            .map(|position| vector.term_weights()[position].clone())
            .filter(|row| row.tfidf > 0.0)
            .collect()
    };
    TfidfSection {
        genres: selected_rows(&query.genres),
        tags: selected_rows(&query.tags),
    }
}

fn positive_rows(rows: &[TermWeight]) -> Vec<TermWeight> {
    rows.iter().filter(|row| row.tfidf > 0.0).cloned().collect()
}

/// Lay both vectors side by side, one row per vocabulary term.
fn vector_table(
    source: &FeatureVector,
    target: &FeatureVector,
    vocabulary: &Vocabulary,
) -> Vec<VectorRow> {
    vocabulary
        .terms()
        .enumerate()
        .map(|(position, term)| {
            let source_value = source.weight(position);
            let target_value = target.weight(position);
            VectorRow {
                term: term.to_string(),
                source_value,
                target_value,
                has_value: source_value > 0.0 || target_value > 0.0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample::sample_catalog;

    fn small_catalog() -> (Catalog, Vocabulary) {
        let catalog = Catalog::from_items(vec![
            Manhwa::new("1", "First")
                .with_genres(&["Action", "Fantasy"])
                .with_tags(&["Dungeons"])
                .with_art_style("Detailed")
                .with_status("Ongoing")
                .with_release_year(2018)
                .with_rating(9.0),
            Manhwa::new("2", "Second")
                .with_genres(&["Action"])
                .with_tags(&["Dungeons", "Magic"])
                .with_art_style("Detailed")
                .with_status("Completed")
                .with_release_year(2016)
                .with_rating(8.0),
            Manhwa::new("3", "Third")
                .with_genres(&["Romance"])
                .with_tags(&["School"])
                .with_art_style("Soft")
                .with_status("Ongoing")
                .with_release_year(2020)
                .with_rating(7.5),
        ]);
        let vocabulary = Vocabulary::build(&catalog);
        (catalog, vocabulary)
    }

    #[test]
    fn item_report_blends_cosine_and_factor_bonuses() {
        let (catalog, vocabulary) = small_catalog();
        let source = catalog.get("1").unwrap();
        let target = catalog.get("2").unwrap();

        let report = explain_items(&catalog, &vocabulary, source, target).unwrap();
        let factors = report.factors.unwrap();

        // Art style matches, status does not.
        assert_eq!(factors.art_style.score, 1.0);
        assert_eq!(factors.status.score, 0.0);
        assert!((factors.year_proximity.score - 0.8).abs() < 1e-12);
        assert!((factors.rating_proximity.score - 0.9).abs() < 1e-12);

        let expected = report.cosine.similarity() + factors.bonus();
        assert!((report.final_score - expected).abs() < 1e-12);
    }

    #[test]
    fn sections_keep_only_positive_weights_in_their_partition() {
        let (catalog, vocabulary) = small_catalog();
        let source = catalog.get("1").unwrap();
        let target = catalog.get("3").unwrap();

        let report = explain_items(&catalog, &vocabulary, source, target).unwrap();

        for row in &report.source_tfidf.genres {
            assert!(row.tfidf > 0.0);
            assert!(vocabulary.genre_terms().any(|term| term == row.term));
        }
        for row in &report.source_tfidf.tags {
            assert!(row.tfidf > 0.0);
            assert!(vocabulary.tag_terms().any(|term| term == row.term));
        }
        // "Romance" appears only in the target, never in the source section.
        assert!(report
            .source_tfidf
            .genres
            .iter()
            .all(|row| row.term != "Romance"));
    }

    #[test]
    fn vector_table_flags_positions_with_weight() {
        let (catalog, vocabulary) = small_catalog();
        let source = catalog.get("1").unwrap();
        let target = catalog.get("2").unwrap();

        let report = explain_items(&catalog, &vocabulary, source, target).unwrap();
        assert_eq!(report.vector_table.len(), vocabulary.len());

        for row in &report.vector_table {
            assert_eq!(
                row.has_value,
                row.source_value > 0.0 || row.target_value > 0.0
            );
        }

        // The dense vectors mirror the table columns.
        for (position, row) in report.vector_table.iter().enumerate() {
            assert_eq!(report.source_vector[position], row.source_value);
            assert_eq!(report.target_vector[position], row.target_value);
        }
    }

    #[test]
    fn preference_report_scores_cosine_only() {
        let (catalog, vocabulary) = small_catalog();
        let query = PreferenceQuery::new(&["Action", "Fantasy"], &["Dungeons"]);
        let target = catalog.get("2").unwrap();

        let report = explain_preference(&catalog, &vocabulary, &query, target).unwrap();

        assert!(report.factors.is_none());
        assert_eq!(report.final_score, report.cosine.similarity());
        assert!(report.evaluation.actually_relevant);
    }

    #[test]
    fn preference_sections_follow_the_selection_order() {
        let (catalog, vocabulary) = small_catalog();
        // "Isekai" is unknown to the catalog and must not produce a row, and
        // the rows keep the user's ordering, not the vocabulary's.
        let query = PreferenceQuery::new(&["Romance", "Fantasy", "Isekai"], &[]);
        let target = catalog.get("3").unwrap();

        let report = explain_preference(&catalog, &vocabulary, &query, target).unwrap();
        let terms: Vec<&str> = report
            .source_tfidf
            .genres
            .iter()
            .map(|row| row.term.as_str())
            .collect();
        assert_eq!(terms, vec!["Romance", "Fantasy"]);
        assert!(report.source_tfidf.tags.is_empty());
    }

    #[test]
    fn reports_serialize_to_json() {
        let (catalog, vocabulary) = small_catalog();
        let source = catalog.get("1").unwrap();
        let target = catalog.get("2").unwrap();

        let report = explain_items(&catalog, &vocabulary, source, target).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert!(json["cosine"]["score"]["similarity"].is_number());
        assert!(json["factors"]["art_style"]["weight"].is_number());
        assert!(json["vector_table"].is_array());
        assert_eq!(json["evaluation"]["threshold"], 0.3);
    }

    #[test]
    fn relevant_pair_above_threshold_counts_as_true_positive() {
        let catalog = sample_catalog();
        let vocabulary = Vocabulary::build(&catalog);
        // The God of High School and Noblesse share two genres and the rare
        // "Friendship" tag, with close years and ratings.
        let source = catalog.get("3").unwrap();
        let target = catalog.get("4").unwrap();

        let report = explain_items(&catalog, &vocabulary, source, target).unwrap();
        assert!(report.evaluation.actually_relevant);
        assert!(report.final_score >= report.evaluation.threshold);
        assert_eq!(report.evaluation.confusion.true_positive, 1);
    }
}
