//! # Pack Solution
//!
//! The immutable result of one computation. Lines are ordered by descending
//! pack size so equality checks and rendered output are deterministic.

use serde::Serialize;

/// One pack size and how many packs of it ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PackLine {
    size: u64,
    quantity: u64,
}

impl PackLine {
    pub(crate) fn new(size: u64, quantity: u64) -> Self {
        Self { size, quantity }
    }

    /// Items per pack.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Number of packs of this size. Always `> 0` inside a solution.
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Items contributed by this line.
    pub fn items(&self) -> u64 {
        self.size * self.quantity
    }
}

/// How an order is fulfilled.
///
/// `total_items` is the smallest shippable total `>= items_ordered`, and
/// `total_packs` is the fewest packs summing to exactly that total.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PackSolution {
    items_ordered: u64,
    total_items: u64,
    total_packs: u64,
    packs: Vec<PackLine>,
}

impl PackSolution {
    pub(crate) fn new(items_ordered: u64, packs: Vec<PackLine>) -> Self {
        let total_items = packs.iter().map(PackLine::items).sum();
        let total_packs = packs.iter().map(PackLine::quantity).sum();
        Self {
            items_ordered,
            total_items,
            total_packs,
            packs,
        }
    }

    /// Quantity the solution answers.
    pub fn items_ordered(&self) -> u64 {
        self.items_ordered
    }

    /// Items shipped: `Σ size × quantity`.
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Packs shipped: `Σ quantity`.
    pub fn total_packs(&self) -> u64 {
        self.total_packs
    }

    /// Items shipped beyond the order.
    pub fn excess(&self) -> u64 {
        self.total_items - self.items_ordered
    }

    /// Lines in descending size order.
    pub fn packs(&self) -> &[PackLine] {
        &self.packs
    }

    /// Quantity shipped of `size`, zero if the size is unused.
    pub fn quantity_of(&self, size: u64) -> u64 {
        self.packs
            .iter()
            .find(|line| line.size == size)
            .map_or(0, PackLine::quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_derive_from_lines() {
        let solution = PackSolution::new(
            12001,
            vec![
                PackLine::new(5000, 2),
                PackLine::new(2000, 1),
                PackLine::new(250, 1),
            ],
        );
        assert_eq!(solution.total_items(), 12250);
        assert_eq!(solution.total_packs(), 4);
        assert_eq!(solution.excess(), 249);
        assert_eq!(solution.quantity_of(5000), 2);
        assert_eq!(solution.quantity_of(1000), 0);
    }

    #[test]
    fn serializes_with_field_names() {
        let solution = PackSolution::new(1, vec![PackLine::new(250, 1)]);
        let json = serde_json::to_value(&solution).unwrap();
        assert_eq!(json["items_ordered"], 1);
        assert_eq!(json["total_items"], 250);
        assert_eq!(json["total_packs"], 1);
        assert_eq!(json["packs"][0]["size"], 250);
        assert_eq!(json["packs"][0]["quantity"], 1);
    }
}
