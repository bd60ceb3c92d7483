//! # Catalog Validator
//!
//! Normalizes raw pack sizes into a [`PackCatalog`]: distinct, strictly
//! positive, sorted ascending. Non-positive entries are dropped; an input
//! with nothing usable left is an [`PackingError::EmptyCatalog`].

use serde::Serialize;

use crate::error::PackingError;

/// A validated, immutable set of pack sizes.
///
/// Non-empty by construction. The engine never caches one across calls;
/// callers build a fresh catalog from whatever source is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PackCatalog {
    sizes: Vec<u64>,
}

impl PackCatalog {
    /// Build a catalog from raw sizes, keeping the distinct positive values.
    pub fn new<I>(sizes: I) -> Result<Self, PackingError>
    where
        I: IntoIterator<Item = i64>,
    {
        let mut sizes: Vec<u64> = sizes
            .into_iter()
            .filter_map(|s| u64::try_from(s).ok())
            .filter(|&s| s > 0)
            .collect();
        sizes.sort_unstable();
        sizes.dedup();

        if sizes.is_empty() {
            return Err(PackingError::EmptyCatalog);
        }
        Ok(Self { sizes })
    }

    /// Sizes in ascending order.
    pub fn sizes(&self) -> &[u64] {
        &self.sizes
    }

    /// Largest pack size.
    pub fn max_size(&self) -> u64 {
        // Non-empty by construction.
        self.sizes[self.sizes.len() - 1]
    }

    /// Whether `size` is one of the catalog sizes.
    pub fn contains(&self, size: u64) -> bool {
        self.sizes.binary_search(&size).is_ok()
    }
}
