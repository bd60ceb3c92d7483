//! # Migrate Subcommand
//!
//! Applies the embedded catalog migrations to the configured database. The
//! service also migrates on startup; this exists for deploy pipelines that
//! migrate ahead of rollout.

use anyhow::{bail, Context, Result};
use clap::Args;
use packing_api::config::AppConfig;
use packing_api::db;

/// Arguments for the `packs migrate` subcommand.
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// List the embedded migrations without connecting.
    #[arg(long)]
    pub list: bool,
}

/// Execute the migrate subcommand.
pub fn run_migrate(args: &MigrateArgs, config: &AppConfig) -> Result<u8> {
    if args.list {
        for migration in db::MIGRATOR.iter() {
            println!("{} {}", migration.version, migration.description);
        }
        return Ok(0);
    }

    if !config.database.is_configured() {
        bail!("no database configured; set DATABASE_URL or database.url in the config file");
    }

    crate::block_on(async {
        let Some(pool) = db::connect(&config.database)
            .await
            .context("failed to connect to database")?
        else {
            bail!("no database configured");
        };
        db::migrate(&pool).await.context("migration failed")?;
        pool.close().await;
        Ok::<_, anyhow::Error>(())
    })??;

    tracing::info!("migrations applied");
    println!("migrations applied");
    Ok(0)
}
