//! Catalog data sources.
//!
//! # Responsibility
//! - Hold the groups shown by the hub UI and answer id lookups.
//! - Provide the built-in placeholder catalog.
//!
//! # Invariants
//! - Data sources are constructed explicitly and passed by reference.

pub mod data_source;
pub mod sample;
