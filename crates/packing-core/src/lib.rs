//! # packing-core — Pack Optimization Engine
//!
//! Computes how to fulfil an order using whole packs drawn from a catalog of
//! pack sizes, each usable any number of times. Two objectives are applied
//! lexicographically:
//!
//! 1. ship the fewest items possible, never fewer than ordered;
//! 2. among all ways to ship that total, use the fewest packs.
//!
//! ## Pipeline
//!
//! ```text
//! raw sizes ──► PackCatalog::new ──► reachability::minimal_total ──► reconstruct::min_packs ──► PackSolution
//! ```
//!
//! The two phases stay separate: the first fixes the shipped total `T`, the
//! second minimizes pack count for exactly `T`. A single pass over reachable
//! sums can satisfy objective 1 while missing objective 2.
//!
//! ## Crate Policy
//!
//! - No I/O, no shared state. Every call takes its own catalog snapshot.
//! - No `.unwrap()` outside tests.
//! - Leaf of the workspace dependency DAG.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod reachability;
pub mod reconstruct;
pub mod solution;
pub mod table;

pub use catalog::PackCatalog;
pub use engine::{compute, compute_from_sizes};
pub use error::PackingError;
pub use solution::{PackLine, PackSolution};
