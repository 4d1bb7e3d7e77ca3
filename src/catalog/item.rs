use serde::{Deserialize, Serialize};

/// Manhwa struct
/// One catalog entry with its categorical features and light scalar
/// attributes.
///
/// The genre and tag lists are the item's "document" for vectorization:
/// their concatenation, duplicates preserved, is what TF is counted over.
/// Collection fields are never optional; an item without data carries an
/// empty list.
///
/// # Examples
/// ```
/// use manhwa_recommender::Manhwa;
/// let item = Manhwa::new("1", "Solo Leveling")
///     .with_genres(&["Action", "Fantasy"])
///     .with_tags(&["Dungeons"]);
///
/// assert_eq!(item.feature_len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manhwa {
    pub id: String,
    pub title: String,
    pub author: String,
    pub description: String,
    pub genres: Vec<String>,
    pub tags: Vec<String>,
    pub art_style: String,
    pub status: String,
    pub release_year: i32,
    pub rating: f64,
    pub popularity: f64,
    pub cover_image: String,
    pub chapters: u32,
}

/// Implementation for constructing items
impl Manhwa {
    /// Create a new item with the given id and title; every other field
    /// starts empty.
    ///
    /// # Arguments
    /// * `id` - unique, stable identifier
    /// * `title` - display title
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Manhwa {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Replace the genre list
    pub fn with_genres(mut self, genres: &[&str]) -> Self {
        self.genres = genres.iter().map(|g| g.to_string()).collect();
        self
    }

    /// Replace the tag list
    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Set the art style label
    pub fn with_art_style(mut self, art_style: impl Into<String>) -> Self {
        self.art_style = art_style.into();
        self
    }

    /// Set the publication status label
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Set the release year
    pub fn with_release_year(mut self, year: i32) -> Self {
        self.release_year = year;
        self
    }

    /// Set the rating
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }
}

/// Implementation for reading an item's feature terms
impl Manhwa {
    /// Iterate the item's document: every genre label, then every tag
    /// label, duplicates preserved.
    ///
    /// # Returns
    /// * `impl Iterator<Item=&str>` - Iterator over the feature terms
    #[inline]
    pub fn feature_terms(&self) -> impl Iterator<Item = &str> {
        self.genres
            .iter()
            .map(String::as_str)
            .chain(self.tags.iter().map(String::as_str))
    }

    /// Length of the item's document (genre count + tag count)
    ///
    /// # Returns
    /// * `usize` - Number of feature terms, duplicates included
    #[inline]
    pub fn feature_len(&self) -> usize {
        self.genres.len() + self.tags.len()
    }

    /// Check whether the item carries a genre label
    ///
    /// # Arguments
    /// * `genre` - genre label (exact match)
    #[inline]
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }

    /// Check whether the item carries a tag label
    ///
    /// # Arguments
    /// * `tag` - tag label (exact match)
    #[inline]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Check whether two items share at least one genre
    #[inline]
    pub fn shares_genre(&self, other: &Manhwa) -> bool {
        self.genres.iter().any(|g| other.has_genre(g))
    }

    /// Check whether two items share at least one tag
    #[inline]
    pub fn shares_tag(&self, other: &Manhwa) -> bool {
        self.tags.iter().any(|t| other.has_tag(t))
    }

    /// Check whether two items share at least one genre or one tag.
    /// This is the heuristic relevance label used by the evaluation
    /// metrics for item-to-item comparisons.
    #[inline]
    pub fn shares_feature(&self, other: &Manhwa) -> bool {
        self.shares_genre(other) || self.shares_tag(other)
    }
}

/// PreferenceQuery struct
/// A free-form query built from user-selected genres and tags, with no
/// backing catalog item. It is vectorized exactly like an item: the
/// selected terms form the document, IDF still comes from the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferenceQuery {
    pub genres: Vec<String>,
    pub tags: Vec<String>,
}

impl PreferenceQuery {
    /// Create a new preference query
    ///
    /// # Arguments
    /// * `genres` - preferred genre labels
    /// * `tags` - preferred tag labels
    pub fn new<T: AsRef<str>>(genres: &[T], tags: &[T]) -> Self {
        PreferenceQuery {
            genres: genres.iter().map(|g| g.as_ref().to_string()).collect(),
            tags: tags.iter().map(|t| t.as_ref().to_string()).collect(),
        }
    }

    /// Iterate the query's document: preferred genres, then preferred
    /// tags, duplicates preserved.
    #[inline]
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.genres
            .iter()
            .map(String::as_str)
            .chain(self.tags.iter().map(String::as_str))
    }

    /// Number of selected terms, duplicates included
    #[inline]
    pub fn len(&self) -> usize {
        self.genres.len() + self.tags.len()
    }

    /// Check whether no terms are selected
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty() && self.tags.is_empty()
    }

    /// Check whether a candidate carries at least one of the selected
    /// terms. This is the heuristic relevance label used by the
    /// evaluation metrics for preference-based comparisons.
    #[inline]
    pub fn matches(&self, item: &Manhwa) -> bool {
        self.terms()
            .any(|term| item.has_genre(term) || item.has_tag(term))
    }
}
