pub mod item;
pub mod loader;
pub mod sample;

use std::collections::HashMap;

use ahash::RandomState;
use indexmap::{IndexMap, IndexSet};
use serde::de::{Deserializer, Error as DeError};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{RecommendError, Result};
use crate::catalog::item::Manhwa;

/// Catalog struct
/// A frozen snapshot of the item collection, used both as the candidate
/// pool for ranking and as the statistical basis for IDF.
///
/// Construction builds two derived indexes:
/// - an insertion-ordered id lookup
/// - the number of items whose feature set contains each term (document
///   frequency, counted by membership: a term repeated inside one item
///   still counts that item once)
///
/// The snapshot is never mutated after construction. Reloading data means
/// building a new `Catalog` and handing it to fresh computations; in-flight
/// computations keep the snapshot they captured.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Manhwa>,
    slots: IndexMap<String, usize>,
    feature_doc_counts: HashMap<Box<str>, u64, RandomState>,
}

/// Implementation for building a catalog
impl Catalog {
    /// Build a catalog from fully materialized items.
    /// Items repeating an earlier id are dropped; the first occurrence
    /// wins.
    ///
    /// # Arguments
    /// * `items` - parsed, typed items in their source order
    pub fn from_items(items: Vec<Manhwa>) -> Self {
        let mut kept: Vec<Manhwa> = Vec::with_capacity(items.len());
        let mut slots: IndexMap<String, usize> = IndexMap::with_capacity(items.len());
        let mut feature_doc_counts: HashMap<Box<str>, u64, RandomState> =
            HashMap::with_hasher(RandomState::new());

        for item in items {
            if slots.contains_key(&item.id) {
                warn!(id = %item.id, title = %item.title, "dropping item with duplicate id");
                continue;
            }
            let mut seen: IndexSet<&str> = IndexSet::new();
            for term in item.feature_terms() {
                seen.insert(term);
            }
            for term in seen {
                feature_doc_counts
                    .entry(term.into())
                    .and_modify(|count| *count += 1)
                    .or_insert(1);
            }
            slots.insert(item.id.clone(), kept.len());
            kept.push(item);
        }

        Catalog {
            items: kept,
            slots,
            feature_doc_counts,
        }
    }
}

/// Implementation for reading the catalog
impl Catalog {
    /// Get the number of items
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check whether the catalog holds no items
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get all items in catalog order
    #[inline]
    pub fn items(&self) -> &[Manhwa] {
        &self.items
    }

    /// Iterate items in catalog order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Manhwa> {
        self.items.iter()
    }

    /// Look up an item by id
    ///
    /// # Arguments
    /// * `id` - item identifier
    ///
    /// # Returns
    /// * `Option<&Manhwa>` - the item, if present
    #[inline]
    pub fn get(&self, id: &str) -> Option<&Manhwa> {
        self.slots.get(id).map(|&slot| &self.items[slot])
    }

    /// Look up an item by id, failing with `UnknownId` when absent
    ///
    /// # Arguments
    /// * `id` - item identifier
    pub fn require(&self, id: &str) -> Result<&Manhwa> {
        self.get(id)
            .ok_or_else(|| RecommendError::UnknownId(id.to_string()))
    }

    /// Check whether an id is present
    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.slots.contains_key(id)
    }

    /// Case-insensitive substring search over titles, catalog order
    ///
    /// # Arguments
    /// * `query` - search text
    ///
    /// # Returns
    /// * `Vec<&Manhwa>` - all items whose title contains the text
    pub fn find_by_title(&self, query: &str) -> Vec<&Manhwa> {
        let needle = query.to_lowercase();
        self.items
            .iter()
            .filter(|item| item.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Get the number of items whose feature set contains a term
    ///
    /// # Arguments
    /// * `term` - genre or tag label
    ///
    /// # Returns
    /// * `u64` - document frequency of the term
    #[inline]
    pub fn document_frequency(&self, term: &str) -> u64 {
        self.feature_doc_counts.get(term).copied().unwrap_or(0)
    }
}

// Snapshots carry only the item list; the derived indexes are rebuilt on
// deserialization so they can never drift from the items.
impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let items = Vec::<Manhwa>::deserialize(deserializer).map_err(D::Error::custom)?;
        Ok(Catalog::from_items(items))
    }
}

/// Vocabulary struct
/// The deduplicated sequence of every genre label, then every tag label,
/// appearing anywhere in a catalog, in first-seen order. Vector positions
/// are defined by this ordering, so two vectors are only comparable when
/// they were built from the same vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    terms: IndexSet<String>,
    genre_len: usize,
}

impl Vocabulary {
    /// Build the vocabulary for a catalog. Deterministic for a fixed
    /// catalog ordering: one pass over all genre lists, then one pass
    /// over all tag lists. A label seen in both passes keeps its first
    /// position.
    ///
    /// # Arguments
    /// * `catalog` - the corpus snapshot
    pub fn build(catalog: &Catalog) -> Self {
        let mut terms: IndexSet<String> = IndexSet::new();
        for item in catalog.iter() {
            for genre in &item.genres {
                terms.insert(genre.clone());
            }
        }
        let genre_len = terms.len();
        for item in catalog.iter() {
            for tag in &item.tags {
                terms.insert(tag.clone());
            }
        }
        Vocabulary { terms, genre_len }
    }

    /// Get the number of vector dimensions
    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check whether the vocabulary is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterate all terms in vector-position order
    #[inline]
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    /// Get the number of positions contributed by the genre pass
    #[inline]
    pub fn genre_count(&self) -> usize {
        self.genre_len
    }

    /// Iterate the terms contributed by the genre pass
    #[inline]
    pub fn genre_terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().take(self.genre_len).map(String::as_str)
    }

    /// Iterate the terms contributed by the tag pass
    #[inline]
    pub fn tag_terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().skip(self.genre_len).map(String::as_str)
    }

    /// Get the vector position of a term
    ///
    /// # Arguments
    /// * `term` - genre or tag label
    ///
    /// # Returns
    /// * `Option<usize>` - position, if the term is in the vocabulary
    #[inline]
    pub fn position(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    /// Get the term at a vector position
    #[inline]
    pub fn term_at(&self, position: usize) -> Option<&str> {
        self.terms.get_index(position).map(String::as_str)
    }

    /// Check whether a term is in the vocabulary
    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_catalog() -> Catalog {
        Catalog::from_items(vec![
            Manhwa::new("1", "Alpha")
                .with_genres(&["Action", "Fantasy"])
                .with_tags(&["Dungeons", "Level up"]),
            Manhwa::new("2", "Beta")
                .with_genres(&["Romance", "Action"])
                .with_tags(&["School"]),
            Manhwa::new("3", "Gamma")
                .with_genres(&["Horror"])
                .with_tags(&["Dungeons"]),
        ])
    }

    #[test]
    fn lookup_by_id_and_order_are_preserved() {
        let catalog = small_catalog();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("2").map(|m| m.title.as_str()), Some("Beta"));
        assert!(catalog.get("42").is_none());
        let ids: Vec<&str> = catalog.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn require_reports_unknown_ids() {
        let catalog = small_catalog();
        assert!(catalog.require("1").is_ok());
        let err = catalog.require("missing").unwrap_err();
        assert!(matches!(err, RecommendError::UnknownId(id) if id == "missing"));
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let catalog = Catalog::from_items(vec![
            Manhwa::new("1", "First").with_genres(&["Action"]),
            Manhwa::new("1", "Second").with_genres(&["Romance"]),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("1").map(|m| m.title.as_str()), Some("First"));
        // The dropped item must not leak into document frequencies
        assert_eq!(catalog.document_frequency("Romance"), 0);
    }

    #[test]
    fn document_frequency_counts_items_not_occurrences() {
        let catalog = Catalog::from_items(vec![
            Manhwa::new("1", "A").with_genres(&["Action", "Action"]),
            Manhwa::new("2", "B").with_genres(&["Action"]),
        ]);
        // Repeated inside one item still counts that item once
        assert_eq!(catalog.document_frequency("Action"), 2);
        assert_eq!(catalog.document_frequency("Romance"), 0);
    }

    #[test]
    fn title_search_is_case_insensitive_substring() {
        let catalog = small_catalog();
        let hits = catalog.find_by_title("alph");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");
        assert!(catalog.find_by_title("zzz").is_empty());
    }

    #[test]
    fn vocabulary_orders_genres_first_then_tags_first_seen() {
        let catalog = small_catalog();
        let vocab = Vocabulary::build(&catalog);
        let terms: Vec<&str> = vocab.terms().collect();
        assert_eq!(
            terms,
            vec![
                "Action", "Fantasy", "Romance", "Horror", // genre pass
                "Dungeons", "Level up", "School" // tag pass
            ]
        );
        assert_eq!(vocab.position("Romance"), Some(2));
        assert_eq!(vocab.genre_terms().count(), 4);
        assert_eq!(vocab.tag_terms().count(), 3);
    }

    #[test]
    fn vocabulary_dedups_across_passes() {
        let catalog = Catalog::from_items(vec![
            Manhwa::new("1", "A").with_genres(&["Action"]).with_tags(&["Action", "Cats"]),
        ]);
        let vocab = Vocabulary::build(&catalog);
        let terms: Vec<&str> = vocab.terms().collect();
        assert_eq!(terms, vec!["Action", "Cats"]);
        assert_eq!(vocab.genre_terms().count(), 1);
    }

    #[test]
    fn empty_catalog_yields_empty_vocabulary() {
        let catalog = Catalog::from_items(Vec::new());
        let vocab = Vocabulary::build(&catalog);
        assert!(vocab.is_empty());
        assert_eq!(catalog.document_frequency("Action"), 0);
    }
}
