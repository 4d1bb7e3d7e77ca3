//! The similarity engine.
//!
//! Everything here is a pure function of a catalog snapshot plus a query.
//! [`vectorize`] turns feature lists into TF-IDF vectors, [`cosine`] compares
//! them with a full audit trail, [`factors`] adds the auxiliary score bonuses,
//! [`evaluate`] grades predictions against heuristic relevance, [`report`]
//! assembles the per-pair explanation, and [`rank`] runs the bulk
//! recommendation paths.

pub mod cosine;
pub mod evaluate;
pub mod factors;
pub mod rank;
pub mod report;
pub mod vectorize;
