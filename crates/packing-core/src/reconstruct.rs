//! # Minimal-Pack Reconstructor
//!
//! Given a total `T` already fixed by the reachability phase, finds the
//! decomposition of exactly `T` into catalog sizes with the fewest packs.
//!
//! `cost[s]` is the minimum pack count summing to `s`:
//! `cost[0] = 0`, `cost[s] = 1 + min(cost[s - size])` over sizes `<= s`
//! whose remainder is reachable. The walk back from `T` picks, at each step,
//! a size whose remainder achieves `cost[s] - 1`. When several do, the
//! larger pack size wins, which keeps the output deterministic.

use crate::solution::PackLine;
use crate::table::{self, TableTooLarge};

/// Marks a sum with no decomposition.
const UNREACHABLE: usize = usize::MAX;

/// Fewest-pack decomposition of `total` over `sizes` (ascending, distinct,
/// positive), as lines in descending size order.
///
/// Returns `None` if `total` cannot be expressed with `sizes`, and an error
/// if the cost table cannot be allocated.
pub fn min_packs(total: usize, sizes: &[usize]) -> Result<Option<Vec<PackLine>>, TableTooLarge> {
    let cost = cost_table(total, sizes)?;
    if cost[total] == UNREACHABLE {
        return Ok(None);
    }
    Ok(walk_back(&cost, total, sizes))
}

/// Follow `cost` down from `total`, largest qualifying size first.
fn walk_back(cost: &[usize], total: usize, sizes: &[usize]) -> Option<Vec<PackLine>> {
    let mut quantities = vec![0u64; sizes.len()];
    let mut remaining = total;
    while remaining > 0 {
        let (idx, size) = sizes
            .iter()
            .copied()
            .enumerate()
            .rev()
            .find(|&(_, size)| {
                size <= remaining
                    && cost[remaining - size] != UNREACHABLE
                    && cost[remaining - size] + 1 == cost[remaining]
            })?;
        quantities[idx] += 1;
        remaining -= size;
    }

    sizes
        .iter()
        .zip(quantities)
        .rev()
        .filter(|&(_, quantity)| quantity > 0)
        .map(|(&size, quantity)| {
            u64::try_from(size)
                .ok()
                .map(|size| PackLine::new(size, quantity))
        })
        .collect()
}

/// Minimum pack count for every sum in `0..=total`.
fn cost_table(total: usize, sizes: &[usize]) -> Result<Vec<usize>, TableTooLarge> {
    let mut cost = table::filled(total, UNREACHABLE)?;
    cost[0] = 0;

    for s in 1..=total {
        let best = sizes
            .iter()
            .take_while(|&&size| size <= s)
            .map(|&size| cost[s - size])
            .filter(|&c| c != UNREACHABLE)
            .min();
        if let Some(best) = best {
            cost[s] = best + 1;
        }
    }

    Ok(cost)
}
