//! Per-vault reallocation capacity.
//!
//! Derives, for a vault and a chosen target market, how much the public
//! allocator could pull out of each of the vault's other markets and how
//! much of that the target market can actually accept.

use std::collections::HashMap;

use alloy_primitives::{Address, U256};

use crate::market::{FlowCaps, MarketId, MarketParams, MarketTotals};

/// One market a vault supplies, as seen by the allocator.
#[derive(Debug, Clone, Default)]
pub struct VaultMarketCapacity {
    /// Remaining inbound/outbound flow caps for this (vault, market) pair
    pub flow_caps: FlowCaps,
    /// The vault's supply position in the market, in shares
    pub supply_shares: U256,
    /// Market totals used to convert shares to assets
    pub totals: MarketTotals,
    /// Full market params when the snapshot could resolve them. A market
    /// without params can still be ranked but is dropped at plan build
    /// time, since the on-chain call needs the full tuple.
    pub params: Option<MarketParams>,
}

impl VaultMarketCapacity {
    /// The vault's supply in this market, in assets, rounded down.
    pub fn supply_assets(&self) -> U256 {
        self.totals.supply_assets(self.supply_shares)
    }

    /// Assets the allocator can pull out of this market right now: bounded
    /// by both the vault's position and the remaining outflow cap.
    pub fn pullable(&self) -> U256 {
        self.supply_assets().min(self.flow_caps.max_out)
    }
}

/// One vault's public-allocator view: the flat reallocation fee plus flow
/// caps and supply position for every market it participates in.
#[derive(Debug, Clone)]
pub struct AllocatorVault {
    /// The vault's address
    pub address: Address,
    /// Flat fee in the chain's native asset, charged per reallocation call
    /// regardless of how many markets are touched
    pub fee: U256,
    /// Capacity data for every market the vault supplies
    pub markets: HashMap<MarketId, VaultMarketCapacity>,
}

/// Pullable capacity of one vault toward one target market.
#[derive(Debug, Clone)]
pub struct ReallocationCapacity {
    /// The vault this capacity belongs to
    pub vault: Address,
    /// `(source market, pullable assets)` pairs, target excluded, zero
    /// entries dropped, ordered descending by pullable amount with
    /// ascending market id as tie-break
    pub sources: Vec<(MarketId, U256)>,
    /// The target market's remaining inbound cap for this vault
    pub target_max_in: U256,
    /// Deliverable total: the source sum capped by `target_max_in`. This
    /// is the ranking key; source capacity the target cannot accept does
    /// not count.
    pub total: U256,
}

impl AllocatorVault {
    /// Computes the capacity the allocator could move into `target` from
    /// this vault's other markets.
    ///
    /// Returns `None` when the vault does not supply the target market at
    /// all, since the target's inbound cap is then unknown.
    pub fn reallocation_capacity(&self, target: MarketId) -> Option<ReallocationCapacity> {
        let target_market = self.markets.get(&target)?;
        let target_max_in = target_market.flow_caps.max_in;

        let mut sources: Vec<(MarketId, U256)> = self
            .markets
            .iter()
            .filter(|(id, _)| **id != target)
            .map(|(id, market)| (*id, market.pullable()))
            .filter(|(_, pullable)| !pullable.is_zero())
            .collect();

        // Deterministic order regardless of map iteration order
        sources.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let sum = sources
            .iter()
            .fold(U256::ZERO, |acc, (_, pullable)| acc.saturating_add(*pullable));

        Some(ReallocationCapacity {
            vault: self.address,
            sources,
            target_max_in,
            total: sum.min(target_max_in),
        })
    }
}
