use serde::Serialize;

use crate::catalog::item::{Manhwa, PreferenceQuery};
use crate::catalog::{Catalog, Vocabulary};

/// Per-term working record kept during vectorization.
/// Holds the TF and IDF inputs next to the weight they produced so a
/// similarity report can show where every number came from.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TermWeight {
    /// The vocabulary term.
    pub term: String,
    /// Term frequency within the document.
    pub tf: f64,
    /// Inverse document frequency over the catalog.
    pub idf: f64,
    /// The resulting weight, `tf * idf`.
    pub tfidf: f64,
}

/// FeatureVector struct
/// Dense TF-IDF weights over one vocabulary, one entry per vocabulary term.
/// Positions are only comparable between vectors built from the same
/// vocabulary; the weights are not normalized here, normalization happens
/// through the magnitude terms of cosine similarity.
///
/// # Examples
/// ```
/// use manhwa_recommender::catalog::item::Manhwa;
/// use manhwa_recommender::catalog::{Catalog, Vocabulary};
/// use manhwa_recommender::engine::vectorize::Vectorizer;
///
/// let catalog = Catalog::from_items(vec![
///     Manhwa::new("1", "A").with_genres(&["Action"]),
///     Manhwa::new("2", "B").with_genres(&["Romance"]),
/// ]);
/// let vocabulary = Vocabulary::build(&catalog);
/// let vectorizer = Vectorizer::new(&catalog, &vocabulary);
/// let vector = vectorizer.vectorize_item(catalog.get("1").unwrap());
///
/// assert_eq!(vector.len(), vocabulary.len());
/// ```
#[derive(Serialize, Debug, Clone)]
pub struct FeatureVector {
    terms: Vec<TermWeight>,
}

/// Implementation for reading vector contents
impl FeatureVector {
    /// Get the number of vector positions (the vocabulary size).
    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check whether the vector has no positions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Get the weight at a vocabulary position.
    /// Returns 0.0 for a position outside the vector.
    #[inline]
    pub fn weight(&self, position: usize) -> f64 {
        self.terms.get(position).map_or(0.0, |t| t.tfidf)
    }

    /// Get an iterator over the dense weights in vocabulary order.
    #[inline]
    pub fn weights(&self) -> impl Iterator<Item = f64> + '_ {
        self.terms.iter().map(|t| t.tfidf)
    }

    /// Get the dense weights as an owned vector.
    #[inline]
    pub fn dense(&self) -> Vec<f64> {
        self.weights().collect()
    }

    /// Get the full per-term working, in vocabulary order.
    #[inline]
    pub fn term_weights(&self) -> &[TermWeight] {
        &self.terms
    }
}

/// Vectorizer struct
/// Builds TF-IDF feature vectors against one catalog snapshot and the
/// vocabulary derived from it. The catalog must stay unchanged for as long
/// as vectors built from it are compared with each other.
#[derive(Debug, Clone, Copy)]
pub struct Vectorizer<'a> {
    catalog: &'a Catalog,
    vocabulary: &'a Vocabulary,
}

impl<'a> Vectorizer<'a> {
    /// Create a new Vectorizer over a catalog snapshot.
    ///
    /// # Arguments
    /// * `catalog` - Catalog used as the IDF statistical basis
    /// * `vocabulary` - Vocabulary defining the vector positions
    pub fn new(catalog: &'a Catalog, vocabulary: &'a Vocabulary) -> Self {
        Vectorizer {
            catalog,
            vocabulary,
        }
    }

    /// Vectorize a catalog item.
    /// The document is the item's genre list followed by its tag list,
    /// duplicates preserved.
    ///
    /// # Arguments
    /// * `item` - Item to vectorize
    ///
    /// # Returns
    /// * `FeatureVector` - Dense weights plus per-term working
    pub fn vectorize_item(&self, item: &Manhwa) -> FeatureVector {
        let document: Vec<&str> = item.feature_terms().collect();
        self.vectorize_terms(&document)
    }

    /// Vectorize a free-form preference query.
    /// The user's selected terms form the document; IDF still comes from the
    /// catalog. Selected terms missing from the vocabulary count toward the
    /// document length but get no vector position.
    ///
    /// # Arguments
    /// * `query` - Preferred genres and tags
    ///
    /// # Returns
    /// * `FeatureVector` - Dense weights plus per-term working
    pub fn vectorize_preference(&self, query: &PreferenceQuery) -> FeatureVector {
        let document: Vec<&str> = query.terms().collect();
        self.vectorize_terms(&document)
    }

    /// Vectorize an arbitrary term multiset.
    ///
    /// # Arguments
    /// * `document` - The document's terms, duplicates preserved
    ///
    /// # Returns
    /// * `FeatureVector` - One weight per vocabulary term
    pub fn vectorize_terms(&self, document: &[&str]) -> FeatureVector {
        let terms = self
            .vocabulary
            .terms()
            .map(|term| {
                let tf = term_frequency(term, document);
                let idf = self.inverse_document_frequency(term);
                TermWeight {
                    term: term.to_string(),
                    tf,
                    idf,
                    tfidf: tf * idf,
                }
            })
            .collect();
        FeatureVector { terms }
    }

    /// Get the IDF of a term over the catalog: `ln(N / (df + 1))`.
    /// The smoothing applies to the denominator only, so a term present in
    /// most documents gets a negative IDF. Returns 0.0 if the catalog is
    /// empty.
    ///
    /// # Arguments
    /// * `term` - term
    #[inline]
    pub fn inverse_document_frequency(&self, term: &str) -> f64 {
        let total = self.catalog.len();
        if total == 0 {
            return 0.0;
        }
        let with_term = self.catalog.document_frequency(term);
        ((total as f64) / ((with_term as f64) + 1.0)).ln()
    }
}

/// Get the TF of a term within a document: occurrence count over document
/// length. Returns 0.0 for an empty document.
///
/// # Arguments
/// * `term` - term
/// * `document` - The document's terms, duplicates preserved
#[inline]
pub fn term_frequency(term: &str, document: &[&str]) -> f64 {
    if document.is_empty() {
        return 0.0;
    }
    let count = document.iter().filter(|t| **t == term).count();
    (count as f64) / (document.len() as f64)
}
