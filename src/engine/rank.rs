use indexmap::IndexSet;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::catalog::item::{Manhwa, PreferenceQuery};
use crate::catalog::{Catalog, Vocabulary};
use crate::engine::cosine::cosine_similarity;
use crate::engine::evaluate::{evaluate_pair, summarize, Evaluation, EvaluationSummary};
use crate::engine::factors::{composite_score, year_proximity, FactorBreakdown};
use crate::engine::report::{self, SimilarityReport};
use crate::engine::vectorize::{FeatureVector, Vectorizer};
use crate::error::Result;

/// Default result count for item-based recommendations.
pub const DEFAULT_ITEM_LIMIT: usize = 5;
/// Default result count for preference-based recommendations.
pub const DEFAULT_PREFERENCE_LIMIT: usize = 10;

/// Weight of the genre fraction in preference scoring.
const PREFERENCE_GENRE_WEIGHT: f64 = 0.6;
/// Weight of the tag fraction in preference scoring.
const PREFERENCE_TAG_WEIGHT: f64 = 0.4;

/// Scorer trait
///
/// One method, one number. Every ranking strategy reduces a candidate to a
/// single score against whatever query the strategy was built around, so the
/// ranking pipeline never needs to know which strategy is running.
pub trait Scorer {
    /// Score one candidate item. Higher is more similar.
    fn score(&self, target: &Manhwa) -> f64;
}

/// CompositeCosine struct
///
/// The audit-path strategy: TF-IDF cosine similarity plus the attribute
/// bonus factors, identical to the score a [`SimilarityReport`] explains.
/// The source vector is built once so bulk scoring only vectorizes the
/// candidate side.
pub struct CompositeCosine<'a> {
    vectorizer: Vectorizer<'a>,
    source: &'a Manhwa,
    source_vector: FeatureVector,
}

/// Implementation for CompositeCosine
impl<'a> CompositeCosine<'a> {
    /// Create the strategy for one source item.
    ///
    /// # Arguments
    /// * `catalog` - The frozen catalog snapshot
    /// * `vocabulary` - Vocabulary built from the same snapshot
    /// * `source` - Query-side item
    pub fn new(catalog: &'a Catalog, vocabulary: &'a Vocabulary, source: &'a Manhwa) -> Self {
        let vectorizer = Vectorizer::new(catalog, vocabulary);
        let source_vector = vectorizer.vectorize_item(source);
        CompositeCosine {
            vectorizer,
            source,
            source_vector,
        }
    }
}

impl Scorer for CompositeCosine<'_> {
    fn score(&self, target: &Manhwa) -> f64 {
        let target_vector = self.vectorizer.vectorize_item(target);
        let similarity = cosine_similarity(&self.source_vector, &target_vector);
        composite_score(similarity, &FactorBreakdown::between(self.source, target))
    }
}

/// JaccardWeights struct
///
/// Blend weights for the three components of [`WeightedJaccard`]. The
/// default profile leans harder on genres; the filtered profile shifts some
/// of that weight onto tags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JaccardWeights {
    pub genre: f64,
    pub tag: f64,
    pub year: f64,
}

/// Implementation for JaccardWeights
impl JaccardWeights {
    /// Get the profile used by the exclusion-filtered ranking path.
    pub fn filtered() -> Self {
        JaccardWeights {
            genre: 0.5,
            tag: 0.4,
            year: 0.1,
        }
    }
}

impl Default for JaccardWeights {
    fn default() -> Self {
        JaccardWeights {
            genre: 0.6,
            tag: 0.3,
            year: 0.1,
        }
    }
}

/// WeightedJaccard struct
///
/// The fast set-overlap strategy: Jaccard coefficients over the genre and
/// tag label sets plus release-year proximity, blended by fixed weights.
pub struct WeightedJaccard<'a> {
    source: &'a Manhwa,
    weights: JaccardWeights,
}

/// Implementation for WeightedJaccard
impl<'a> WeightedJaccard<'a> {
    /// Create the strategy with the default weight profile.
    pub fn new(source: &'a Manhwa) -> Self {
        WeightedJaccard {
            source,
            weights: JaccardWeights::default(),
        }
    }

    /// Create the strategy with an explicit weight profile.
    pub fn with_weights(source: &'a Manhwa, weights: JaccardWeights) -> Self {
        WeightedJaccard { source, weights }
    }
}

impl Scorer for WeightedJaccard<'_> {
    fn score(&self, target: &Manhwa) -> f64 {
        jaccard(&self.source.genres, &target.genres) * self.weights.genre
            + jaccard(&self.source.tags, &target.tags) * self.weights.tag
            + year_proximity(self.source.release_year, target.release_year) * self.weights.year
    }
}

/// PreferenceFraction struct
///
/// The preference-query strategy: the fraction of preferred genres the
/// candidate carries, weighted 0.6, plus the matched tag fraction at 0.4.
pub struct PreferenceFraction<'a> {
    query: &'a PreferenceQuery,
}

/// Implementation for PreferenceFraction
impl<'a> PreferenceFraction<'a> {
    /// Create the strategy for one preference query.
    pub fn new(query: &'a PreferenceQuery) -> Self {
        PreferenceFraction { query }
    }
}

impl Scorer for PreferenceFraction<'_> {
    fn score(&self, target: &Manhwa) -> f64 {
        match_fraction(&self.query.genres, &target.genres) * PREFERENCE_GENRE_WEIGHT
            + match_fraction(&self.query.tags, &target.tags) * PREFERENCE_TAG_WEIGHT
    }
}

/// Get the Jaccard coefficient of two label lists, compared as sets.
/// Returns 0.0 when the union is empty.
///
/// # Arguments
/// * `left` - First label list
/// * `right` - Second label list
pub fn jaccard(left: &[String], right: &[String]) -> f64 {
    let left_set: IndexSet<&str> = left.iter().map(String::as_str).collect();
    let right_set: IndexSet<&str> = right.iter().map(String::as_str).collect();
    let union = left_set.union(&right_set).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = left_set.intersection(&right_set).count();
    intersection as f64 / union as f64
}

/// Get the matched fraction of a preferred label list.
/// Counts how many of the candidate's labels appear in the preferred list
/// and divides by the preferred count. Returns 0.0 when nothing is preferred.
fn match_fraction(preferred: &[String], candidate: &[String]) -> f64 {
    if preferred.is_empty() {
        return 0.0;
    }
    let matched = candidate
        .iter()
        .filter(|label| preferred.iter().any(|p| p == *label))
        .count();
    matched as f64 / preferred.len() as f64
}

/// Scored struct
///
/// One ranked candidate: the catalog item and the score the active strategy
/// gave it.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Scored<'a> {
    pub item: &'a Manhwa,
    pub score: f64,
}

/// Sort scored candidates by descending score.
/// NaN scores are dropped first; equal scores keep their catalog order.
pub fn sort_by_score(scored: &mut Vec<Scored<'_>>) {
    scored.retain(|s| !s.score.is_nan());
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// YearRange struct
///
/// Optional inclusive release-year bounds. An unset bound never excludes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct YearRange {
    pub min: Option<i32>,
    pub max: Option<i32>,
}

/// Implementation for YearRange
impl YearRange {
    /// Check whether a release year falls inside the bounds.
    pub fn contains(&self, year: i32) -> bool {
        if let Some(min) = self.min {
            if year < min {
                return false;
            }
        }
        if let Some(max) = self.max {
            if year > max {
                return false;
            }
        }
        true
    }
}

/// RecommendOptions struct
///
/// Exclusion filters and the result limit for the filtered ranking path.
/// Empty filters exclude nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendOptions {
    pub exclude_genres: Vec<String>,
    pub exclude_tags: Vec<String>,
    pub year_range: YearRange,
    pub limit: usize,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        RecommendOptions {
            exclude_genres: Vec::new(),
            exclude_tags: Vec::new(),
            year_range: YearRange::default(),
            limit: DEFAULT_ITEM_LIMIT,
        }
    }
}

/// Implementation for RecommendOptions
impl RecommendOptions {
    /// Set the excluded genres.
    pub fn with_excluded_genres(mut self, genres: &[&str]) -> Self {
        self.exclude_genres = genres.iter().map(|g| g.to_string()).collect();
        self
    }

    /// Set the excluded tags.
    pub fn with_excluded_tags(mut self, tags: &[&str]) -> Self {
        self.exclude_tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Set the inclusive release-year bounds.
    pub fn with_year_range(mut self, min: Option<i32>, max: Option<i32>) -> Self {
        self.year_range = YearRange { min, max };
        self
    }

    /// Set the result limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Check whether the genre filter excludes an item.
    fn excludes_by_genre(&self, item: &Manhwa) -> bool {
        self.exclude_genres.iter().any(|g| item.has_genre(g))
    }

    /// Check whether the tag filter excludes an item.
    fn excludes_by_tag(&self, item: &Manhwa) -> bool {
        self.exclude_tags.iter().any(|t| item.has_tag(t))
    }

    /// Check whether the year bounds exclude an item.
    fn excludes_by_year(&self, item: &Manhwa) -> bool {
        !self.year_range.contains(item.release_year)
    }

    /// Check whether any filter excludes an item.
    fn excludes(&self, item: &Manhwa) -> bool {
        self.excludes_by_genre(item) || self.excludes_by_tag(item) || self.excludes_by_year(item)
    }
}

/// FilterStats struct
///
/// Per-criterion exclusion counts for one filter setup. An item excluded by
/// several criteria is counted once per criterion, so the per-criterion
/// counts can sum past `excluded_total`.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct FilterStats {
    /// Candidates considered, the catalog minus the source item.
    pub candidates: u32,
    pub excluded_by_genre: u32,
    pub excluded_by_tag: u32,
    pub excluded_by_year: u32,
    /// Candidates excluded by at least one criterion.
    pub excluded_total: u32,
    pub remaining: u32,
    /// Share of candidates excluded, in percent. 0.0 with no candidates.
    pub excluded_percentage: f64,
}

/// Recommender struct
///
/// Ranking front door over one catalog snapshot. Builds the vocabulary once
/// and serves every ranking, report and evaluation path from it.
pub struct Recommender<'a> {
    catalog: &'a Catalog,
    vocabulary: Vocabulary,
}

/// Implementation for Recommender
impl<'a> Recommender<'a> {
    /// Create a recommender over a catalog snapshot.
    pub fn new(catalog: &'a Catalog) -> Self {
        let vocabulary = Vocabulary::build(catalog);
        debug!(
            items = catalog.len(),
            terms = vocabulary.len(),
            "recommender ready"
        );
        Recommender {
            catalog,
            vocabulary,
        }
    }

    /// Get the catalog the recommender ranks over.
    #[inline]
    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    /// Get the vocabulary built from the catalog.
    #[inline]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Rank the items most similar to a source item.
    ///
    /// Scores every other catalog item with the default-weight
    /// [`WeightedJaccard`] strategy. Zero scores are kept; a short catalog
    /// simply yields a short list.
    ///
    /// # Arguments
    /// * `source_id` - Id of the query-side item
    /// * `limit` - Maximum result count
    ///
    /// # Returns
    /// * `Result<Vec<Scored>>` - Ranked candidates, best first
    pub fn recommend(&self, source_id: &str, limit: usize) -> Result<Vec<Scored<'a>>> {
        let source = self.catalog.require(source_id)?;
        let scorer = WeightedJaccard::new(source);
        let mut scored = self.score_candidates(source_id, &scorer, None);
        sort_by_score(&mut scored);
        scored.truncate(limit);
        Ok(scored)
    }

    /// Rank similar items with exclusion filters applied first.
    ///
    /// Filtered-out candidates are never scored. Scoring uses the
    /// [`JaccardWeights::filtered`] profile.
    ///
    /// # Arguments
    /// * `source_id` - Id of the query-side item
    /// * `options` - Exclusion filters and result limit
    pub fn recommend_filtered(
        &self,
        source_id: &str,
        options: &RecommendOptions,
    ) -> Result<Vec<Scored<'a>>> {
        let source = self.catalog.require(source_id)?;
        let scorer = WeightedJaccard::with_weights(source, JaccardWeights::filtered());
        let mut scored = self.score_candidates(source_id, &scorer, Some(options));
        sort_by_score(&mut scored);
        scored.truncate(options.limit);
        Ok(scored)
    }

    /// Rank items for a preference query.
    ///
    /// Scores the whole catalog with [`PreferenceFraction`] and drops
    /// zero-score candidates, so an unmatched query yields an empty list.
    ///
    /// # Arguments
    /// * `query` - Preferred genres and tags
    /// * `limit` - Maximum result count
    pub fn recommend_for_preference(
        &self,
        query: &PreferenceQuery,
        limit: usize,
    ) -> Vec<Scored<'a>> {
        let scorer = PreferenceFraction::new(query);
        let mut scored: Vec<Scored<'a>> = self
            .catalog
            .items()
            .par_iter()
            .map(|item| Scored {
                item,
                score: scorer.score(item),
            })
            .filter(|s| s.score > 0.0)
            .collect();
        sort_by_score(&mut scored);
        scored.truncate(limit);
        scored
    }

    /// Build the full audit report for an item pair.
    pub fn explain(&self, source_id: &str, target_id: &str) -> Result<SimilarityReport> {
        let source = self.catalog.require(source_id)?;
        let target = self.catalog.require(target_id)?;
        report::explain_items(self.catalog, &self.vocabulary, source, target)
    }

    /// Build the audit report for a preference query against one item.
    pub fn explain_preference(
        &self,
        query: &PreferenceQuery,
        target_id: &str,
    ) -> Result<SimilarityReport> {
        let target = self.catalog.require(target_id)?;
        report::explain_preference(self.catalog, &self.vocabulary, query, target)
    }

    /// Build an audit report against every other catalog item.
    ///
    /// Reports come back ordered by raw cosine similarity descending, the
    /// order an audit view walks them in.
    pub fn explain_all(&self, source_id: &str) -> Result<Vec<SimilarityReport>> {
        let source = self.catalog.require(source_id)?;
        let mut reports = self
            .catalog
            .items()
            .par_iter()
            .filter(|item| item.id != source.id)
            .map(|item| report::explain_items(self.catalog, &self.vocabulary, source, item))
            .collect::<Result<Vec<_>>>()?;
        reports.sort_by(|a, b| b.cosine.similarity().total_cmp(&a.cosine.similarity()));
        Ok(reports)
    }

    /// Build an audit report for a preference query against every item,
    /// ordered by cosine similarity descending.
    pub fn explain_preference_all(&self, query: &PreferenceQuery) -> Result<Vec<SimilarityReport>> {
        let mut reports = self
            .catalog
            .items()
            .par_iter()
            .map(|item| report::explain_preference(self.catalog, &self.vocabulary, query, item))
            .collect::<Result<Vec<_>>>()?;
        reports.sort_by(|a, b| b.cosine.similarity().total_cmp(&a.cosine.similarity()));
        Ok(reports)
    }

    /// Evaluate the composite scorer against every other catalog item.
    ///
    /// Each pair is classified at the threshold with "shares at least one
    /// genre or tag" as ground truth, then the per-pair matrices are summed.
    ///
    /// # Arguments
    /// * `source_id` - Id of the query-side item
    /// * `threshold` - Relevance threshold for the predicted label
    pub fn evaluate_all(&self, source_id: &str, threshold: f64) -> Result<EvaluationSummary> {
        let source = self.catalog.require(source_id)?;
        let scorer = CompositeCosine::new(self.catalog, &self.vocabulary, source);
        let evaluations: Vec<Evaluation> = self
            .catalog
            .items()
            .par_iter()
            .filter(|item| item.id != source.id)
            .map(|item| evaluate_pair(scorer.score(item), threshold, source.shares_feature(item)))
            .collect();
        Ok(summarize(threshold, &evaluations))
    }

    /// Evaluate a preference query against the whole catalog.
    ///
    /// The preference path has no attribute factors, so the classified score
    /// is the cosine similarity alone. Ground truth is "the candidate
    /// carries at least one preferred term".
    pub fn evaluate_preference_all(
        &self,
        query: &PreferenceQuery,
        threshold: f64,
    ) -> EvaluationSummary {
        let vectorizer = Vectorizer::new(self.catalog, &self.vocabulary);
        let source_vector = vectorizer.vectorize_preference(query);
        let evaluations: Vec<Evaluation> = self
            .catalog
            .items()
            .par_iter()
            .map(|item| {
                let target_vector = vectorizer.vectorize_item(item);
                let similarity = cosine_similarity(&source_vector, &target_vector);
                evaluate_pair(similarity, threshold, query.matches(item))
            })
            .collect();
        summarize(threshold, &evaluations)
    }

    /// Count what each exclusion filter removes from the candidate pool.
    ///
    /// # Arguments
    /// * `source_id` - Id of the query-side item
    /// * `options` - Exclusion filters to measure
    pub fn filter_stats(&self, source_id: &str, options: &RecommendOptions) -> Result<FilterStats> {
        let source = self.catalog.require(source_id)?;
        let mut excluded_by_genre = 0u32;
        let mut excluded_by_tag = 0u32;
        let mut excluded_by_year = 0u32;
        let mut excluded_total = 0u32;
        for item in self.catalog.iter() {
            if item.id == source.id {
                continue;
            }
            let by_genre = options.excludes_by_genre(item);
            let by_tag = options.excludes_by_tag(item);
            let by_year = options.excludes_by_year(item);
            excluded_by_genre += u32::from(by_genre);
            excluded_by_tag += u32::from(by_tag);
            excluded_by_year += u32::from(by_year);
            excluded_total += u32::from(by_genre || by_tag || by_year);
        }
        let candidates = (self.catalog.len() as u32).saturating_sub(1);
        let excluded_percentage = if candidates > 0 {
            f64::from(excluded_total) / f64::from(candidates) * 100.0
        } else {
            0.0
        };
        Ok(FilterStats {
            candidates,
            excluded_by_genre,
            excluded_by_tag,
            excluded_by_year,
            excluded_total,
            remaining: candidates - excluded_total,
            excluded_percentage,
        })
    }

    /// Score every candidate except the source, applying filters first.
    fn score_candidates<S: Scorer + Sync>(
        &self,
        source_id: &str,
        scorer: &S,
        options: Option<&RecommendOptions>,
    ) -> Vec<Scored<'a>> {
        self.catalog
            .items()
            .par_iter()
            .filter(|item| item.id != source_id)
            .filter(|item| options.map_or(true, |o| !o.excludes(item)))
            .map(|item| Scored {
                item,
                score: scorer.score(item),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample::sample_catalog;
    use crate::engine::report::explain_items;
    use crate::error::RecommendError;

    fn year_only_catalog() -> Catalog {
        Catalog::from_items(vec![
            Manhwa::new("1", "Source")
                .with_genres(&["Action"])
                .with_release_year(2000),
            Manhwa::new("2", "Same")
                .with_genres(&["Action"])
                .with_release_year(2000),
            Manhwa::new("3", "Also Same")
                .with_genres(&["Action"])
                .with_release_year(2000),
            Manhwa::new("4", "Unrelated")
                .with_genres(&["Romance"])
                .with_release_year(2020),
        ])
    }

    #[test]
    fn jaccard_counts_distinct_labels() {
        let left = vec!["Action".to_string(), "Adventure".to_string()];
        let right = vec!["Adventure".to_string(), "Horror".to_string()];
        assert!((jaccard(&left, &right) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn jaccard_empty_union_scores_zero() {
        assert_eq!(jaccard(&[], &[]), 0.0);
    }

    #[test]
    fn weighted_jaccard_blends_genres_tags_and_year() {
        let source = Manhwa::new("1", "A")
            .with_genres(&["Action", "Fantasy"])
            .with_tags(&["Dungeons"])
            .with_release_year(2018);
        let target = Manhwa::new("2", "B")
            .with_genres(&["Action"])
            .with_tags(&["Dungeons"])
            .with_release_year(2016);

        // Genres 1/2, tags 1/1, year gap 2.
        let expected = 0.5 * 0.6 + 1.0 * 0.3 + 0.8 * 0.1;
        let score = WeightedJaccard::new(&source).score(&target);
        assert!((score - expected).abs() < 1e-12);
    }

    #[test]
    fn weight_profiles_differ() {
        let default = JaccardWeights::default();
        let filtered = JaccardWeights::filtered();
        assert_eq!((default.genre, default.tag, default.year), (0.6, 0.3, 0.1));
        assert_eq!((filtered.genre, filtered.tag, filtered.year), (0.5, 0.4, 0.1));
    }

    #[test]
    fn composite_cosine_matches_the_audit_report() {
        let catalog = sample_catalog();
        let vocabulary = Vocabulary::build(&catalog);
        let source = catalog.require("3").unwrap();
        let target = catalog.require("4").unwrap();

        let scorer = CompositeCosine::new(&catalog, &vocabulary, source);
        let report = explain_items(&catalog, &vocabulary, source, target).unwrap();
        assert!((scorer.score(target) - report.final_score).abs() < 1e-12);
    }

    #[test]
    fn preference_fraction_divides_by_preferred_count() {
        let query = PreferenceQuery::new(&["Action", "Fantasy"], &[]);
        let item = Manhwa::new("1", "A").with_genres(&["Action"]);

        // One of two preferred genres matched, no tags preferred.
        let score = PreferenceFraction::new(&query).score(&item);
        assert!((score - 0.5 * 0.6).abs() < 1e-12);
    }

    #[test]
    fn all_strategies_share_the_scorer_seam() {
        let catalog = sample_catalog();
        let vocabulary = Vocabulary::build(&catalog);
        let source = catalog.require("1").unwrap();
        let target = catalog.require("2").unwrap();
        let query = PreferenceQuery::new(&["Action"], &["Dungeons"]);

        let composite = CompositeCosine::new(&catalog, &vocabulary, source);
        let set_overlap = WeightedJaccard::new(source);
        let preference = PreferenceFraction::new(&query);
        let scorers: Vec<&dyn Scorer> = vec![&composite, &set_overlap, &preference];
        for scorer in scorers {
            assert!(scorer.score(target).is_finite());
        }
    }

    #[test]
    fn recommend_excludes_the_source_and_honors_the_limit() {
        let catalog = sample_catalog();
        let recommender = Recommender::new(&catalog);

        let ranked = recommender.recommend("1", 3).unwrap();
        assert_eq!(ranked.len(), 3);
        assert!(ranked.iter().all(|s| s.item.id != "1"));
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn recommend_keeps_zero_scores_and_catalog_order_on_ties() {
        let catalog = year_only_catalog();
        let recommender = Recommender::new(&catalog);

        let ranked = recommender.recommend("1", 10).unwrap();
        assert_eq!(ranked.len(), 3);
        // Items 2 and 3 tie exactly; catalog order breaks the tie.
        assert_eq!(ranked[0].item.id, "2");
        assert_eq!(ranked[1].item.id, "3");
        // No shared labels and a 20-year gap leave item 4 at zero, kept.
        assert_eq!(ranked[2].item.id, "4");
        assert_eq!(ranked[2].score, 0.0);
    }

    #[test]
    fn unknown_source_id_is_an_error() {
        let catalog = sample_catalog();
        let recommender = Recommender::new(&catalog);

        let err = recommender.recommend("no-such-id", 5).unwrap_err();
        assert!(matches!(err, RecommendError::UnknownId(id) if id == "no-such-id"));
    }

    #[test]
    fn filtered_results_never_carry_an_excluded_genre() {
        let catalog = sample_catalog();
        let recommender = Recommender::new(&catalog);
        let options = RecommendOptions::default()
            .with_excluded_genres(&["Horror"])
            .with_limit(12);

        let ranked = recommender.recommend_filtered("1", &options).unwrap();
        assert!(!ranked.is_empty());
        assert!(ranked.iter().all(|s| !s.item.has_genre("Horror")));
    }

    #[test]
    fn year_bounds_are_inclusive() {
        let catalog = Catalog::from_items(vec![
            Manhwa::new("1", "Source")
                .with_genres(&["Action"])
                .with_release_year(2012),
            Manhwa::new("2", "Lower Edge")
                .with_genres(&["Action"])
                .with_release_year(2010),
            Manhwa::new("3", "Upper Edge")
                .with_genres(&["Action"])
                .with_release_year(2015),
            Manhwa::new("4", "Outside")
                .with_genres(&["Action"])
                .with_release_year(2016),
        ]);
        let recommender = Recommender::new(&catalog);
        let options = RecommendOptions::default().with_year_range(Some(2010), Some(2015));

        let ranked = recommender.recommend_filtered("1", &options).unwrap();
        let ids: Vec<&str> = ranked.iter().map(|s| s.item.id.as_str()).collect();
        assert!(ids.contains(&"2"));
        assert!(ids.contains(&"3"));
        assert!(!ids.contains(&"4"));
    }

    #[test]
    fn filters_can_empty_the_result_without_error() {
        let catalog = year_only_catalog();
        let recommender = Recommender::new(&catalog);
        let options = RecommendOptions::default()
            .with_excluded_genres(&["Action", "Romance"]);

        let ranked = recommender.recommend_filtered("1", &options).unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn preference_ranking_drops_zero_scores() {
        let catalog = sample_catalog();
        let recommender = Recommender::new(&catalog);
        let query = PreferenceQuery::new(&["Horror"], &[]);

        let ranked = recommender.recommend_for_preference(&query, DEFAULT_PREFERENCE_LIMIT);
        assert!(!ranked.is_empty());
        assert!(ranked.iter().all(|s| s.score > 0.0));
        assert!(ranked.iter().all(|s| s.item.has_genre("Horror")));
    }

    #[test]
    fn filter_stats_count_each_criterion_independently() {
        let catalog = Catalog::from_items(vec![
            Manhwa::new("1", "Source")
                .with_genres(&["Action"])
                .with_release_year(2015),
            Manhwa::new("2", "Old Horror")
                .with_genres(&["Horror"])
                .with_release_year(2000),
            Manhwa::new("3", "New Horror")
                .with_genres(&["Horror"])
                .with_release_year(2015),
            Manhwa::new("4", "Clean")
                .with_genres(&["Romance"])
                .with_release_year(2015),
        ]);
        let recommender = Recommender::new(&catalog);
        let options = RecommendOptions::default()
            .with_excluded_genres(&["Horror"])
            .with_year_range(Some(2010), None);

        let stats = recommender.filter_stats("1", &options).unwrap();
        assert_eq!(stats.candidates, 3);
        assert_eq!(stats.excluded_by_genre, 2);
        assert_eq!(stats.excluded_by_year, 1);
        assert_eq!(stats.excluded_by_tag, 0);
        // Item 2 trips both criteria but counts once in the total.
        assert_eq!(stats.excluded_total, 2);
        assert_eq!(stats.remaining, 1);
        assert!((stats.excluded_percentage - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn filter_stats_require_a_known_source() {
        let catalog = sample_catalog();
        let recommender = Recommender::new(&catalog);

        let err = recommender
            .filter_stats("missing", &RecommendOptions::default())
            .unwrap_err();
        assert!(matches!(err, RecommendError::UnknownId(_)));
    }

    #[test]
    fn evaluate_all_covers_every_other_item() {
        let catalog = sample_catalog();
        let recommender = Recommender::new(&catalog);

        let summary = recommender.evaluate_all("1", 0.3).unwrap();
        assert_eq!(summary.pairs, 11);
        assert_eq!(summary.confusion.total(), 11);
        assert_eq!(summary.threshold, 0.3);
    }

    #[test]
    fn evaluate_preference_all_covers_the_whole_catalog() {
        let catalog = sample_catalog();
        let recommender = Recommender::new(&catalog);
        let query = PreferenceQuery::new(&["Action"], &[]);

        let summary = recommender.evaluate_preference_all(&query, 0.3);
        assert_eq!(summary.pairs, 12);
        assert_eq!(summary.confusion.total(), 12);
    }

    #[test]
    fn explain_all_orders_reports_by_cosine() {
        let catalog = sample_catalog();
        let recommender = Recommender::new(&catalog);

        let reports = recommender.explain_all("1").unwrap();
        assert_eq!(reports.len(), 11);
        for pair in reports.windows(2) {
            assert!(pair[0].cosine.similarity() >= pair[1].cosine.similarity());
        }
    }

    #[test]
    fn explain_preference_all_covers_every_item() {
        let catalog = sample_catalog();
        let recommender = Recommender::new(&catalog);
        let query = PreferenceQuery::new(&["Action", "Fantasy"], &[]);

        let reports = recommender.explain_preference_all(&query).unwrap();
        assert_eq!(reports.len(), 12);
        assert!(reports.iter().all(|r| r.factors.is_none()));
    }

    #[test]
    fn strategies_can_rank_candidates_differently() {
        // "Action" sits in three of the four documents, so its IDF is zero
        // and it carries no cosine weight, while the set overlap still
        // counts it. Attributes are uniform to keep the bonus factors equal.
        let same = |item: Manhwa| {
            item.with_art_style("Detailed")
                .with_status("Ongoing")
                .with_release_year(2020)
                .with_rating(8.0)
        };
        let catalog = Catalog::from_items(vec![
            same(Manhwa::new("s", "Source").with_genres(&["Action", "Fantasy"])),
            same(Manhwa::new("x", "Common Overlap").with_genres(&["Action"])),
            same(Manhwa::new("y", "Rare Overlap").with_genres(&["Fantasy", "Horror"])),
            same(Manhwa::new("z", "Filler").with_genres(&["Action", "Horror"])),
        ]);
        let vocabulary = Vocabulary::build(&catalog);
        let source = catalog.require("s").unwrap();
        let x = catalog.require("x").unwrap();
        let y = catalog.require("y").unwrap();

        let set_overlap = WeightedJaccard::new(source);
        assert!(set_overlap.score(x) > set_overlap.score(y));

        let composite = CompositeCosine::new(&catalog, &vocabulary, source);
        assert!(composite.score(x) < composite.score(y));
    }
}
