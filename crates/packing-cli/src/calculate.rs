//! # Calculate Subcommand
//!
//! Solves one order offline. The catalog comes from `--sizes` when given,
//! otherwise from the configured database, otherwise from `packs.sizes` in
//! the config file.

use anyhow::{bail, Context, Result};
use clap::Args;
use packing_api::config::AppConfig;
use packing_api::db;
use packing_api::routes::calculate::CalculateResponse;
use packing_core::PackSolution;

/// Arguments for the `packs calculate` subcommand.
#[derive(Args, Debug)]
pub struct CalculateArgs {
    /// Number of items ordered.
    #[arg(long, short, allow_negative_numbers = true)]
    pub items: i64,

    /// Pack sizes to use instead of the configured catalog (comma separated).
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub sizes: Option<Vec<i64>>,

    /// Print the result as JSON, in the same shape as `POST /api/v1/calculate`.
    #[arg(long)]
    pub json: bool,
}

/// Execute the calculate subcommand, writing the result to stdout.
pub fn run_calculate(args: &CalculateArgs, config: &AppConfig) -> Result<u8> {
    let limit = config.limits.max_order;
    if args.items > limit {
        bail!(
            "items ordered must not exceed {limit}, got {} (raise limits.max_order to allow more)",
            args.items
        );
    }
    let sizes = resolve_sizes(args, config)?;
    tracing::debug!(items = args.items, ?sizes, "calculating");

    let solution = packing_core::compute_from_sizes(args.items, &sizes)?;

    let output = if args.json {
        render_json(&solution)?
    } else {
        render_table(&solution)
    };
    println!("{output}");
    Ok(0)
}

fn resolve_sizes(args: &CalculateArgs, config: &AppConfig) -> Result<Vec<i64>> {
    if let Some(sizes) = &args.sizes {
        return Ok(sizes.clone());
    }
    if !config.database.is_configured() {
        return Ok(config.packs.sizes.clone());
    }
    crate::block_on(async {
        let Some(pool) = db::connect(&config.database).await? else {
            bail!("database configuration disappeared while connecting");
        };
        let sizes = db::pack_sizes::list_sizes(&pool)
            .await
            .context("failed to read pack sizes")?;
        pool.close().await;
        Ok::<_, anyhow::Error>(sizes)
    })?
}

/// Serialize `solution` as the API does.
pub fn render_json(solution: &PackSolution) -> Result<String> {
    serde_json::to_string_pretty(&CalculateResponse::from(solution))
        .context("failed to serialize result")
}

/// Human-readable summary with one row per pack size.
pub fn render_table(solution: &PackSolution) -> String {
    let mut rows = vec![format!("{:>10}  {:>10}", "PACK SIZE", "QUANTITY")];
    rows.extend(
        solution
            .packs()
            .iter()
            .map(|line| format!("{:>10}  {:>10}", line.size(), line.quantity())),
    );
    rows.push(String::new());
    rows.push(format!("Items ordered:       {}", solution.items_ordered()));
    rows.push(format!("Total items shipped: {}", solution.total_items()));
    rows.push(format!("Total packs:         {}", solution.total_packs()));
    rows.push(format!("Excess items:        {}", solution.excess()));
    rows.join("\n")
}
