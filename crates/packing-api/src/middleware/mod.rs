//! # Middleware
//!
//! - `metrics` — request counters and latency histograms.
//! - `cors` — CORS policy for the JSON API.

pub mod cors;
pub mod metrics;
