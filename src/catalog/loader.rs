//! Catalog ingest and persistence.
//!
//! Catalogs come from three places: a CSV export, a binary snapshot written
//! by an earlier run, or the bundled sample set. CSV columns are resolved by
//! header name so column order does not matter, and rows that cannot produce
//! a usable item are dropped with a warning instead of failing the load.

use std::fs;
use std::io::Read;
use std::path::Path;

use chrono::Datelike;
use tracing::{info, warn};

use crate::catalog::item::Manhwa;
use crate::catalog::sample::sample_catalog;
use crate::catalog::Catalog;
use crate::error::{RecommendError, Result};

/// Author placeholder for data sources without an author column.
const UNKNOWN_AUTHOR: &str = "Unknown Author";
/// Placeholder for attribute columns the CSV export does not carry.
const UNKNOWN_ATTRIBUTE: &str = "Unknown";
const DEFAULT_DESCRIPTION: &str = "No description available.";
const DEFAULT_COVER: &str = "/placeholder.jpg";

/// Load a catalog from a CSV file.
///
/// # Arguments
/// * `path` - Path to the CSV export
///
/// # Returns
/// The parsed catalog. Rows without any title column are skipped.
///
/// # Errors
/// Returns an error if the file cannot be opened or its header row cannot
/// be read. Individual bad rows are skipped, not fatal.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let reader = csv::Reader::from_path(path).map_err(|e| RecommendError::CatalogLoad {
        path: path.display().to_string(),
        message: format!("failed to open CSV: {e}"),
    })?;
    read_catalog(reader, &path.display().to_string())
}

/// Load a catalog from `path`, falling back to the bundled sample set when
/// no path is given or the file cannot be read.
pub fn load_or_sample(path: Option<&Path>) -> Catalog {
    let Some(path) = path else {
        info!("no data file given, using bundled sample catalog");
        return sample_catalog();
    };
    match load_csv(path) {
        Ok(catalog) if !catalog.is_empty() => catalog,
        Ok(_) => {
            warn!(path = %path.display(), "catalog file has no usable rows, using bundled sample catalog");
            sample_catalog()
        }
        Err(e) => {
            warn!(error = %e, "catalog load failed, using bundled sample catalog");
            sample_catalog()
        }
    }
}

/// Write a catalog snapshot in CBOR.
///
/// Only the items are stored; the id and document-frequency indexes are
/// rebuilt when the snapshot is read back.
pub fn save_snapshot<P: AsRef<Path>>(catalog: &Catalog, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = serde_cbor::to_vec(catalog).map_err(|e| RecommendError::Snapshot {
        path: path.display().to_string(),
        message: format!("encode failed: {e}"),
    })?;
    fs::write(path, bytes).map_err(|e| RecommendError::Snapshot {
        path: path.display().to_string(),
        message: format!("write failed: {e}"),
    })?;
    info!(path = %path.display(), items = catalog.len(), "catalog snapshot written");
    Ok(())
}

/// Read a catalog snapshot written by [`save_snapshot`].
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| RecommendError::Snapshot {
        path: path.display().to_string(),
        message: format!("read failed: {e}"),
    })?;
    let catalog: Catalog = serde_cbor::from_slice(&bytes).map_err(|e| RecommendError::Snapshot {
        path: path.display().to_string(),
        message: format!("decode failed: {e}"),
    })?;
    info!(path = %path.display(), items = catalog.len(), "catalog snapshot loaded");
    Ok(catalog)
}

/// Parse catalog rows out of an open CSV reader.
fn read_catalog<R: Read>(mut reader: csv::Reader<R>, source: &str) -> Result<Catalog> {
    let headers = reader
        .headers()
        .map_err(|e| RecommendError::CatalogLoad {
            path: source.to_string(),
            message: format!("failed to read headers: {e}"),
        })?
        .clone();
    let column = |name: &str| headers.iter().position(|h| h.trim() == name);

    let id_col = column("id");
    // First non-empty title column wins.
    let title_cols = [
        column("title_romaji"),
        column("title_english"),
        column("title_native"),
    ];
    let description_col = column("description");
    let genres_col = column("genres");
    let tags_col = column("tags");
    let year_col = column("start_year");
    let cover_col = column("cover_image_url");

    let fallback_year = chrono::Utc::now().year();
    let mut items = Vec::new();
    let mut skipped = 0usize;

    for (row, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!(line = row + 2, error = %e, "skipping unreadable catalog row");
                skipped += 1;
                continue;
            }
        };

        let title = match title_cols.iter().find_map(|&c| field(&record, c)) {
            Some(title) => title.to_string(),
            None => {
                skipped += 1;
                continue;
            }
        };
        let id = match field(&record, id_col) {
            Some(id) => id.to_string(),
            None => (row + 1).to_string(),
        };
        let release_year = field(&record, year_col)
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or(fallback_year);

        items.push(Manhwa {
            id,
            title,
            author: UNKNOWN_AUTHOR.to_string(),
            description: field(&record, description_col)
                .unwrap_or(DEFAULT_DESCRIPTION)
                .to_string(),
            genres: split_features(field(&record, genres_col)),
            tags: split_features(field(&record, tags_col)),
            art_style: UNKNOWN_ATTRIBUTE.to_string(),
            status: UNKNOWN_ATTRIBUTE.to_string(),
            release_year,
            rating: 0.0,
            popularity: 0.0,
            cover_image: field(&record, cover_col).unwrap_or(DEFAULT_COVER).to_string(),
            chapters: 0,
        });
    }

    if skipped > 0 {
        warn!(skipped, source, "catalog rows dropped");
    }
    info!(items = items.len(), source, "catalog rows parsed");
    Ok(Catalog::from_items(items))
}

/// Fetch a trimmed, non-empty field by optional column index.
fn field<'r>(record: &'r csv::StringRecord, col: Option<usize>) -> Option<&'r str> {
    col.and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Split a comma-separated feature list, dropping empty entries.
fn split_features(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}
