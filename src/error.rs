use thiserror::Error;

/// Errors surfaced by the recommendation engine and the catalog loader.
///
/// Numeric degeneracies (zero-magnitude vectors, empty documents, empty
/// candidate sets) are not errors: they resolve locally to zero scores or
/// empty results. Only genuinely missing inputs and failed I/O reach this
/// type.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// A query referenced an item id that is not present in the catalog.
    #[error("unknown item id: {0}")]
    UnknownId(String),

    /// Two feature vectors (or a vector and its vocabulary) disagree on
    /// dimensionality. Vectors are only comparable when they were built
    /// against the same vocabulary.
    #[error("feature vector length mismatch: {left} vs {right}")]
    VectorLengthMismatch { left: usize, right: usize },

    /// Reading or parsing a catalog source file failed.
    #[error("catalog file {path}: {message}")]
    CatalogLoad { path: String, message: String },

    /// Saving or loading a catalog snapshot failed.
    #[error("catalog snapshot {path}: {message}")]
    Snapshot { path: String, message: String },
}

pub type Result<T> = core::result::Result<T, RecommendError>;
