//! Command implementations.

mod capacity;
mod plan;

pub use capacity::run_capacity;
pub use plan::run_plan;

use alloy_chains::NamedChain;
use alloy_primitives::Address;
use anyhow::{Context, Result};

use realloc_rs_feed::{CapacitySnapshotStore, FeedClient, FeedConfig};
use realloc_rs_planner::MarketId;

fn feed_client(api_url: Option<&str>) -> Result<FeedClient> {
    let config = match api_url {
        Some(url) => FeedConfig::new().with_api_url(url.parse().context("Invalid API URL")?),
        None => FeedConfig::new(),
    };
    Ok(FeedClient::with_config(config))
}

fn parse_market(s: &str) -> Result<MarketId> {
    s.parse()
        .with_context(|| format!("Invalid market id: {}", s))
}

fn parse_vaults(vaults: &[String]) -> Result<Vec<Address>> {
    vaults
        .iter()
        .map(|s| {
            s.parse()
                .with_context(|| format!("Invalid vault address: {}", s))
        })
        .collect()
}

/// Fetch a fresh capacity snapshot for the given vaults.
async fn load_snapshot(
    vaults: &[String],
    chain: NamedChain,
    api_url: Option<&str>,
) -> Result<CapacitySnapshotStore> {
    let client = feed_client(api_url)?;
    let vaults = parse_vaults(vaults)?;

    let mut store = CapacitySnapshotStore::new(client, chain);
    store.fetch(&vaults).await;
    Ok(store)
}
