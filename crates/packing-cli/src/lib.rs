//! # packing-cli — Command Line for the Pack Optimization Engine
//!
//! Provides the `packs` command.
//!
//! ## Subcommands
//!
//! - `packs calculate` — solve one order and print the packs.
//! - `packs migrate` — apply catalog schema migrations to the configured database.
//!
//! ```bash
//! packs calculate --items 12001
//! packs calculate --items 500000 --sizes 23,31,53 --json
//! DATABASE_URL=postgres://localhost/packing packs migrate
//! ```

pub mod calculate;
pub mod migrate;

use std::path::Path;

use anyhow::{Context, Result};
use packing_api::config::AppConfig;

/// Load configuration from `path`, or from `CONFIG_PATH`/`config.yaml` when absent.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => AppConfig::load_default().context("failed to load config"),
    }
}

/// Run `fut` to completion on a fresh current-thread runtime.
pub(crate) fn block_on<F: std::future::Future>(fut: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    Ok(runtime.block_on(fut))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_config_path_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("packs.yaml");
        std::fs::write(&path, "packs:\n  sizes: [23, 31, 53]\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.packs.sizes, vec![23, 31, 53]);
    }

    #[test]
    fn undecodable_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("packs.yaml");
        std::fs::write(&path, "packs: [not, a, map]\n").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("failed to load config"));
    }
}
