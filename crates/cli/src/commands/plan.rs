//! Plan command implementation.

use alloy_chains::NamedChain;
use alloy_primitives::U256;
use anyhow::{bail, Context, Result};
use colored::Colorize;
use serde_json::json;

use realloc_rs_contracts::{
    connect_http, require_allocator_deployment, verify_live, ReallocationPlan,
};
use realloc_rs_planner::MarketId;

use crate::cli::{OutputFormat, PlanArgs};
use crate::commands::{load_snapshot, parse_market};
use crate::output::format_plan_detail;

pub async fn run_plan(args: &PlanArgs, format: OutputFormat) -> Result<()> {
    let target = parse_market(&args.market)?;
    let requested = U256::from_str_radix(args.amount.trim(), 10)
        .with_context(|| format!("Invalid amount: {}", args.amount))?;

    require_allocator_deployment(args.chain.0)?;
    let store = load_snapshot(&args.vaults, args.chain.0, args.api_url.as_deref()).await?;

    let Some(plan) = store.compute_reallocation(target, requested) else {
        match format {
            OutputFormat::Table => println!(
                "{}",
                "No reallocation possible: no vault can source liquidity into this market.".red()
            ),
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&json!({ "plan": null }))?);
            }
        }
        return Ok(());
    };

    let verification = if args.verify {
        let rpc_url = args
            .rpc_url
            .as_deref()
            .context("--verify requires --rpc-url or ETH_RPC_URL")?;
        Some(verify_plan(&plan, args.chain.0, rpc_url).await?)
    } else {
        None
    };

    match format {
        OutputFormat::Table => {
            println!("{}", format_plan_detail(&plan, requested));
            if let Some(rows) = &verification {
                print_verification(rows);
            }
        }
        OutputFormat::Json => {
            let withdrawals: Vec<_> = plan
                .withdrawals
                .iter()
                .map(|w| {
                    json!({
                        "market": w.market_params.id().to_string(),
                        "amount": w.amount.to_string(),
                    })
                })
                .collect();
            let output = json!({
                "plan": {
                    "vault": plan.vault.to_string(),
                    "to": plan.to.to_string(),
                    "value": plan.value().to_string(),
                    "requested": requested.to_string(),
                    "total": plan.total_withdrawn().to_string(),
                    "targetMarket": plan.target_market_params.id().to_string(),
                    "withdrawals": withdrawals,
                    "calldata": plan.calldata.to_string(),
                },
                "verification": verification.as_ref().map(|rows| {
                    rows.iter()
                        .map(|row| {
                            json!({
                                "market": row.market.to_string(),
                                "planned": row.planned.to_string(),
                                "live": row.live.map(|v| v.to_string()),
                                "ok": row.ok,
                            })
                        })
                        .collect::<Vec<_>>()
                }),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

struct VerifyRow {
    market: MarketId,
    planned: U256,
    live: Option<U256>,
    ok: bool,
}

/// Re-read the plan's markets on-chain and compare against the snapshot
/// the plan was built from.
async fn verify_plan(
    plan: &ReallocationPlan,
    chain: NamedChain,
    rpc_url: &str,
) -> Result<Vec<VerifyRow>> {
    let deployment = require_allocator_deployment(chain)?;
    let provider = connect_http(rpc_url)?;

    let target_id = plan.target_market_params.id();
    let mut ids: Vec<MarketId> = plan
        .withdrawals
        .iter()
        .map(|w| w.market_params.id())
        .collect();
    ids.push(target_id);

    let live = verify_live(&provider, &deployment, plan.vault, &ids).await?;
    if live.is_empty() {
        bail!("Live verification failed: no market could be read");
    }

    let mut rows: Vec<VerifyRow> = plan
        .withdrawals
        .iter()
        .map(|w| {
            let id = w.market_params.id();
            let pullable = live.get(&id).map(|data| data.pullable());
            VerifyRow {
                market: id,
                planned: w.amount,
                live: pullable,
                ok: pullable.is_some_and(|p| p >= w.amount),
            }
        })
        .collect();

    // Inbound room at the target caps the whole transaction
    let max_in = live.get(&target_id).map(|data| data.flow_caps.max_in);
    rows.push(VerifyRow {
        market: target_id,
        planned: plan.total_withdrawn(),
        live: max_in,
        ok: max_in.is_some_and(|cap| cap >= plan.total_withdrawn()),
    });

    Ok(rows)
}

fn print_verification(rows: &[VerifyRow]) {
    println!("\n{}", "Live Verification".cyan().bold());
    for row in rows {
        let live = row
            .live
            .map_or_else(|| "unreadable".to_string(), |v| v.to_string());
        let status = if row.ok {
            "OK".green()
        } else {
            "STALE".red()
        };
        println!(
            "  {}  planned {} / live {}  [{}]",
            row.market, row.planned, live, status
        );
    }
    if rows.iter().all(|row| row.ok) {
        println!("{}", "Plan still holds against chain state.".green());
    } else {
        println!(
            "{}",
            "Snapshot has drifted; refetch and rebuild the plan before sending.".yellow()
        );
    }
}
