//! # Reachability Solver
//!
//! Finds the smallest total `T >= order` expressible as a non-negative
//! integer combination of catalog sizes.
//!
//! ## Window bound
//!
//! Any minimal `T` satisfies `T < order + max_size`. If it did not, removing
//! one largest pack would leave a total still `>= order`, contradicting
//! minimality. The sweep therefore only covers `[0, order + max_size]`, so
//! its cost scales with the order size rather than with the packs shipped.
//!
//! ## Sweep
//!
//! Unbounded-knapsack forward pass: `0` is reachable; for increasing `i`, a
//! reachable `i` marks `i + size` reachable for every size that stays in the
//! window. Reachability of `i` is final once the sweep arrives at `i`, so the
//! first reachable `i >= order` is the answer and the sweep stops there.

use crate::catalog::PackCatalog;
use crate::error::PackingError;
use crate::table::{self, TableTooLarge};

/// Search bounds and catalog sizes converted to native indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchWindow {
    order: usize,
    end: usize,
    sizes: Vec<usize>,
}

impl SearchWindow {
    /// Build the window `[0, order + max_size]` for `order` over `catalog`.
    ///
    /// Fails with [`PackingError::WindowOverflow`] when the upper bound does
    /// not fit a `usize` on this platform.
    pub fn new(order: u64, catalog: &PackCatalog) -> Result<Self, PackingError> {
        let max_size = catalog.max_size();
        let overflow = || PackingError::WindowOverflow { order, max_size };

        let end = order
            .checked_add(max_size)
            .and_then(|end| usize::try_from(end).ok())
            .ok_or_else(overflow)?;
        let order = usize::try_from(order).map_err(|_| overflow())?;
        // Every size is <= max_size, which fits because `end` does.
        let sizes = catalog
            .sizes()
            .iter()
            .map(|&s| usize::try_from(s).map_err(|_| overflow()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { order, end, sizes })
    }

    /// Requested quantity.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Inclusive upper bound of the window.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Catalog sizes, ascending.
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }
}

/// Smallest reachable total `>= window.order()`, or `None` if the window
/// holds none.
///
/// Fails when the window's table cannot be allocated.
pub fn minimal_total(window: &SearchWindow) -> Result<Option<usize>, TableTooLarge> {
    let mut reachable = table::filled(window.end, false)?;
    reachable[0] = true;

    for i in 0..=window.end {
        if !reachable[i] {
            continue;
        }
        if i >= window.order {
            return Ok(Some(i));
        }
        for &size in &window.sizes {
            match i.checked_add(size) {
                Some(next) if next <= window.end => reachable[next] = true,
                // Sizes are ascending; larger ones overshoot too.
                _ => break,
            }
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total_for(order: u64, sizes: &[i64]) -> Option<usize> {
        let catalog = PackCatalog::new(sizes.iter().copied()).unwrap();
        let window = SearchWindow::new(order, &catalog).unwrap();
        minimal_total(&window).unwrap()
    }

    #[test]
    fn window_spans_order_plus_largest_size() {
        let catalog = PackCatalog::new([250, 500, 5000]).unwrap();
        let window = SearchWindow::new(12001, &catalog).unwrap();
        assert_eq!(window.order(), 12001);
        assert_eq!(window.end(), 17001);
        assert_eq!(window.sizes(), &[250, 500, 5000]);
    }

    #[test]
    fn exact_multiple_is_its_own_total() {
        assert_eq!(total_for(750, &[250]), Some(750));
    }

    #[test]
    fn rounds_up_to_next_reachable() {
        assert_eq!(total_for(501, &[250]), Some(750));
        assert_eq!(total_for(251, &[250, 500]), Some(500));
        assert_eq!(total_for(12001, &[250, 500, 1000, 2000, 5000]), Some(12250));
    }

    #[test]
    fn uses_combinations_not_just_multiples() {
        // 23 + 31 = 54 beats 3 × 23 = 69 and 2 × 31 = 62.
        assert_eq!(total_for(54, &[23, 31, 53]), Some(54));
        assert_eq!(total_for(55, &[23, 31, 53]), Some(62));
    }

    #[test]
    fn order_of_one_ships_smallest_size() {
        assert_eq!(total_for(1, &[7, 3, 11]), Some(3));
    }

    #[test]
    fn overflowing_window_is_reported() {
        let catalog = PackCatalog::new([i64::MAX]).unwrap();
        let err = SearchWindow::new(u64::MAX, &catalog).unwrap_err();
        assert!(matches!(err, PackingError::WindowOverflow { .. }));
    }
}
