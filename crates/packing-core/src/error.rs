//! # Engine Errors
//!
//! Every failure names the precondition that did not hold, so callers can
//! produce a precise message. No partial result accompanies an error.

use thiserror::Error;

/// Errors returned by [`crate::compute`] and [`crate::PackCatalog::new`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PackingError {
    /// The order quantity was zero or negative.
    #[error("items ordered must be positive, got {order}")]
    InvalidOrder {
        /// The rejected order quantity.
        order: i64,
    },

    /// No positive pack size remained after normalizing the catalog.
    #[error("no pack sizes configured")]
    EmptyCatalog,

    /// No shippable total was found inside the search window.
    ///
    /// Cannot happen for a validated, non-empty catalog. Seeing it means the
    /// catalog and the solver disagree about their invariants.
    #[error("unable to fulfil order of {order} with largest pack size {max_size}")]
    Infeasible {
        /// The order quantity.
        order: u64,
        /// Largest pack size in the catalog.
        max_size: u64,
    },

    /// The `[0, order + max_size]` search window cannot be indexed or allocated.
    #[error("search window for order {order} with largest pack size {max_size} exceeds addressable memory")]
    WindowOverflow {
        /// The order quantity.
        order: u64,
        /// Largest pack size in the catalog.
        max_size: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_order_message_names_value() {
        let err = PackingError::InvalidOrder { order: -3 };
        assert_eq!(err.to_string(), "items ordered must be positive, got -3");
    }

    #[test]
    fn empty_catalog_message() {
        assert_eq!(
            PackingError::EmptyCatalog.to_string(),
            "no pack sizes configured"
        );
    }

    #[test]
    fn infeasible_message_carries_context() {
        let err = PackingError::Infeasible {
            order: 10,
            max_size: 7,
        };
        let msg = err.to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains('7'));
    }
}
