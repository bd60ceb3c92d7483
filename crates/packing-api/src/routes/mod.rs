//! # Route Modules
//!
//! - `calculate` — order calculation and current catalog (`/api/v1/calculate`, `/api/v1/config`).
//! - `pack_sizes` — pack-size catalog CRUD (`/api/v1/pack-sizes`).
//! - `web` — HTML order form at `/`.

pub mod calculate;
pub mod pack_sizes;
pub mod web;
