//! Live on-chain verification of snapshot capacity data.
//!
//! The indexed feed lags the chain; this layer reads the current flow
//! caps, vault position and market totals directly, batched into a single
//! multicall so every read observes the same block. Its output is
//! advisory: it supersedes the snapshot for the caller's final check but
//! is never written back into the snapshot store.

use std::collections::HashMap;

use alloy::sol_types::SolCall;
use alloy_primitives::{Address, U256};
use tracing::warn;

use realloc_rs_planner::{FlowCaps, MarketId, MarketTotals};

use crate::bindings::{IMorpho, IMulticall3, IPublicAllocator};
use crate::deployments::Deployment;
use crate::error::{ContractError, Result};
use crate::provider::HttpProvider;

/// Fresh chain state for one (vault, market) pair.
#[derive(Debug, Clone, Copy)]
pub struct LiveMarketData {
    /// Current flow caps for the pair
    pub flow_caps: FlowCaps,
    /// The vault's current supply shares in the market
    pub supply_shares: U256,
    /// Current market totals for share-to-asset conversion
    pub totals: MarketTotals,
}

impl LiveMarketData {
    /// The vault's supply in the market, in assets, rounded down.
    pub fn supply_assets(&self) -> U256 {
        self.totals.supply_assets(self.supply_shares)
    }

    /// Assets pullable from the market right now.
    pub fn pullable(&self) -> U256 {
        self.supply_assets().min(self.flow_caps.max_out)
    }
}

/// Reads flow caps, the vault's position, and market totals for every
/// market in one `aggregate3` call.
///
/// A market whose three reads do not all succeed and decode is left out
/// of the result entirely: absent means unknown, never zero, and nothing
/// is filled in from cache.
pub async fn verify_live(
    provider: &HttpProvider,
    deployment: &Deployment,
    vault: Address,
    market_ids: &[MarketId],
) -> Result<HashMap<MarketId, LiveMarketData>> {
    let mut calls = Vec::with_capacity(market_ids.len() * 3);
    for id in market_ids {
        calls.push(IMulticall3::Call3 {
            target: deployment.public_allocator,
            allowFailure: true,
            callData: IPublicAllocator::flowCapsCall { vault, id: *id }
                .abi_encode()
                .into(),
        });
        calls.push(IMulticall3::Call3 {
            target: deployment.morpho,
            allowFailure: true,
            callData: IMorpho::positionCall { id: *id, user: vault }
                .abi_encode()
                .into(),
        });
        calls.push(IMulticall3::Call3 {
            target: deployment.morpho,
            allowFailure: true,
            callData: IMorpho::marketCall { id: *id }.abi_encode().into(),
        });
    }

    let multicall = IMulticall3::new(deployment.multicall3, provider);
    let results = multicall
        .aggregate3(calls)
        .call()
        .await
        .map_err(|e| ContractError::ReadFailed(format!("multicall failed: {}", e)))?;

    Ok(merge_market_results(market_ids, &results))
}

/// Folds raw multicall results back into per-market data, dropping any
/// market with a failed or undecodable read.
pub fn merge_market_results(
    market_ids: &[MarketId],
    results: &[IMulticall3::Result],
) -> HashMap<MarketId, LiveMarketData> {
    let mut live = HashMap::new();
    for (i, id) in market_ids.iter().enumerate() {
        let Some(chunk) = results.get(i * 3..i * 3 + 3) else {
            warn!(market = %id, "missing multicall results, excluding market");
            continue;
        };
        if chunk.iter().any(|r| !r.success) {
            warn!(market = %id, "live read failed, excluding market");
            continue;
        }

        let caps = IPublicAllocator::flowCapsCall::abi_decode_returns(&chunk[0].returnData);
        let position = IMorpho::positionCall::abi_decode_returns(&chunk[1].returnData);
        let market = IMorpho::marketCall::abi_decode_returns(&chunk[2].returnData);
        let (Ok(caps), Ok(position), Ok(market)) = (caps, position, market) else {
            warn!(market = %id, "live read returned undecodable data, excluding market");
            continue;
        };

        live.insert(
            *id,
            LiveMarketData {
                flow_caps: FlowCaps {
                    max_in: U256::from(caps.maxIn),
                    max_out: U256::from(caps.maxOut),
                },
                supply_shares: position.supplyShares,
                totals: MarketTotals {
                    total_supply_assets: U256::from(market.totalSupplyAssets),
                    total_supply_shares: U256::from(market.totalSupplyShares),
                },
            },
        );
    }
    live
}
