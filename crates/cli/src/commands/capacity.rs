//! Capacity command implementation.

use anyhow::Result;
use colored::Colorize;
use serde_json::json;

use realloc_rs_planner::ReallocationCapacity;

use crate::cli::{CapacityArgs, OutputFormat};
use crate::commands::{load_snapshot, parse_market};
use crate::output::format_capacity_table;

pub async fn run_capacity(args: &CapacityArgs, format: OutputFormat) -> Result<()> {
    let target = parse_market(&args.market)?;
    let store = load_snapshot(&args.vaults, args.chain.0, args.api_url.as_deref()).await?;

    let mut capacities: Vec<ReallocationCapacity> = store
        .snapshot()
        .values()
        .filter_map(|vault| vault.reallocation_capacity(target))
        .collect();
    capacities.sort_by(|a, b| b.total.cmp(&a.total).then(a.vault.cmp(&b.vault)));

    let best = store.total_available_extra_liquidity(target);

    match format {
        OutputFormat::Table => {
            println!("{}", format_capacity_table(&capacities));
            if best.is_zero() {
                println!(
                    "{}",
                    "No vault can source liquidity into this market.".yellow()
                );
            } else {
                println!("Best single-vault capacity: {}", best.to_string().green());
            }
        }
        OutputFormat::Json => {
            let vaults: Vec<_> = capacities
                .iter()
                .map(|c| {
                    json!({
                        "vault": c.vault.to_string(),
                        "targetMaxIn": c.target_max_in.to_string(),
                        "total": c.total.to_string(),
                        "sources": c
                            .sources
                            .iter()
                            .map(|(id, pullable)| json!({
                                "market": id.to_string(),
                                "pullable": pullable.to_string(),
                            }))
                            .collect::<Vec<_>>(),
                    })
                })
                .collect();
            let output = json!({
                "market": target.to_string(),
                "chain": u64::from(args.chain.0),
                "bestSingleVault": best.to_string(),
                "vaults": vaults,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
