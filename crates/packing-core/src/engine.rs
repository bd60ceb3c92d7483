//! # Engine Entry Point
//!
//! A single synchronous function with no retained state:
//!
//! 1. reject orders `<= 0` ([`PackingError::InvalidOrder`]);
//! 2. (from raw sizes only) normalize the catalog ([`PackingError::EmptyCatalog`]);
//! 3. find the minimal shippable total `T`;
//! 4. find the fewest packs summing to exactly `T`;
//! 5. return the [`PackSolution`].
//!
//! Memory and time are `O(order + max_size)`. Bounding the order is left to
//! the caller; a window too large to allocate is a
//! [`PackingError::WindowOverflow`].

use crate::catalog::PackCatalog;
use crate::error::PackingError;
use crate::reachability::{self, SearchWindow};
use crate::reconstruct;
use crate::solution::PackSolution;
use crate::table::TableTooLarge;

/// Compute the optimal packing of `order` items over `catalog`.
pub fn compute(order: i64, catalog: &PackCatalog) -> Result<PackSolution, PackingError> {
    let order = u64::try_from(order)
        .ok()
        .filter(|&o| o > 0)
        .ok_or(PackingError::InvalidOrder { order })?;

    let infeasible = || {
        let err = PackingError::Infeasible {
            order,
            max_size: catalog.max_size(),
        };
        tracing::error!(
            order,
            catalog = ?catalog.sizes(),
            "invariant violation: {err}"
        );
        err
    };

    let overflow = |_: TableTooLarge| PackingError::WindowOverflow {
        order,
        max_size: catalog.max_size(),
    };

    let window = SearchWindow::new(order, catalog)?;
    let total = reachability::minimal_total(&window)
        .map_err(overflow)?
        .ok_or_else(infeasible)?;
    let packs = reconstruct::min_packs(total, window.sizes())
        .map_err(overflow)?
        .ok_or_else(infeasible)?;
    let solution = PackSolution::new(order, packs);

    tracing::debug!(
        order,
        total_items = solution.total_items(),
        total_packs = solution.total_packs(),
        "computed pack solution"
    );
    Ok(solution)
}

/// Validate raw `sizes` into a catalog, then [`compute`].
///
/// The order is checked first, so an invalid order is reported even when
/// the catalog is also empty.
pub fn compute_from_sizes(order: i64, sizes: &[i64]) -> Result<PackSolution, PackingError> {
    if order <= 0 {
        return Err(PackingError::InvalidOrder { order });
    }
    let catalog = PackCatalog::new(sizes.iter().copied())?;
    compute(order, &catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STANDARD: [i64; 5] = [250, 500, 1000, 2000, 5000];

    fn pairs(solution: &PackSolution) -> Vec<(u64, u64)> {
        solution
            .packs()
            .iter()
            .map(|l| (l.size(), l.quantity()))
            .collect()
    }

    #[test]
    fn order_of_one() {
        let s = compute_from_sizes(1, &STANDARD).unwrap();
        assert_eq!(pairs(&s), vec![(250, 1)]);
        assert_eq!(s.total_items(), 250);
        assert_eq!(s.total_packs(), 1);
    }

    #[test]
    fn order_equal_to_smallest_pack() {
        let s = compute_from_sizes(250, &STANDARD).unwrap();
        assert_eq!(pairs(&s), vec![(250, 1)]);
        assert_eq!(s.total_items(), 250);
        assert_eq!(s.excess(), 0);
    }

    #[test]
    fn one_over_smallest_pack_ships_next_size() {
        let s = compute_from_sizes(251, &STANDARD).unwrap();
        assert_eq!(pairs(&s), vec![(500, 1)]);
        assert_eq!(s.total_items(), 500);
    }

    #[test]
    fn five_hundred_one() {
        let s = compute_from_sizes(501, &STANDARD).unwrap();
        assert_eq!(pairs(&s), vec![(500, 1), (250, 1)]);
        assert_eq!(s.total_items(), 750);
        assert_eq!(s.total_packs(), 2);
    }

    #[test]
    fn twelve_thousand_one() {
        let s = compute_from_sizes(12001, &STANDARD).unwrap();
        assert_eq!(pairs(&s), vec![(5000, 2), (2000, 1), (250, 1)]);
        assert_eq!(s.total_items(), 12250);
        assert_eq!(s.total_packs(), 4);
        assert_eq!(s.excess(), 249);
    }

    #[test]
    fn single_size_catalog() {
        let s = compute_from_sizes(501, &[250]).unwrap();
        assert_eq!(pairs(&s), vec![(250, 3)]);
        assert_eq!(s.total_items(), 750);
    }

    #[test]
    fn non_multiple_sizes_large_order() {
        let s = compute_from_sizes(500_000, &[23, 31, 53]).unwrap();
        assert_eq!(s.total_items(), 500_000);
        assert_eq!(pairs(&s), vec![(53, 9429), (31, 7), (23, 2)]);
    }

    #[test]
    fn zero_order_is_invalid() {
        assert_eq!(
            compute_from_sizes(0, &STANDARD),
            Err(PackingError::InvalidOrder { order: 0 })
        );
    }

    #[test]
    fn negative_order_is_invalid() {
        let catalog = PackCatalog::new(STANDARD).unwrap();
        assert_eq!(
            compute(-5, &catalog),
            Err(PackingError::InvalidOrder { order: -5 })
        );
    }

    #[test]
    fn invalid_order_reported_before_empty_catalog() {
        assert_eq!(
            compute_from_sizes(0, &[]),
            Err(PackingError::InvalidOrder { order: 0 })
        );
    }

    #[test]
    fn window_too_large_to_allocate_is_an_error() {
        let max = i64::MAX as u64;
        assert_eq!(
            compute_from_sizes(i64::MAX, &[i64::MAX]),
            Err(PackingError::WindowOverflow {
                order: max,
                max_size: max
            })
        );
    }

    #[test]
    fn empty_catalog() {
        assert_eq!(compute_from_sizes(10, &[]), Err(PackingError::EmptyCatalog));
    }

    #[test]
    fn all_non_positive_catalog() {
        assert_eq!(
            compute_from_sizes(10, &[0, -250]),
            Err(PackingError::EmptyCatalog)
        );
    }

    #[test]
    fn duplicates_and_junk_are_ignored() {
        let s = compute_from_sizes(501, &[500, -1, 250, 0, 500, 250]).unwrap();
        assert_eq!(pairs(&s), vec![(500, 1), (250, 1)]);
    }

    #[test]
    fn identical_inputs_identical_solutions() {
        let a = compute_from_sizes(9_999, &[3, 7, 11, 250]).unwrap();
        let b = compute_from_sizes(9_999, &[250, 11, 7, 3]).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json_bytes(&a),
            serde_json_bytes(&b),
            "serialized solutions must be byte-identical"
        );
    }

    fn serde_json_bytes(s: &PackSolution) -> Vec<u8> {
        serde_json::to_vec(s).unwrap()
    }
}
