//! Capacity snapshot store and the plan computation pipeline.

use std::collections::HashMap;

use alloy_chains::NamedChain;
use alloy_primitives::{Address, U256};
use futures::future::join_all;
use tracing::{debug, warn};

use realloc_rs_contracts::{allocator_deployment, build_reallocation, ReallocationPlan};
use realloc_rs_planner::{
    allocate_withdrawals, resolve_withdrawals, select_vault, AllocatorVault, MarketId,
    MarketParams, ReallocationCapacity,
};

use crate::client::FeedClient;
use crate::convert::to_allocator_vault;
use crate::error::Result;

/// Snapshot of every candidate vault's allocator capacity.
///
/// The snapshot map is the only shared state in the subsystem. It is
/// replaced wholesale on every fetch, so readers always see a consistent
/// set; plan computation is a pure synchronous read over it and holds
/// nothing across calls.
#[derive(Debug)]
pub struct CapacitySnapshotStore {
    client: FeedClient,
    chain: NamedChain,
    vaults: Vec<Address>,
    snapshot: HashMap<Address, AllocatorVault>,
}

impl CapacitySnapshotStore {
    /// Create an empty store for one chain.
    pub fn new(client: FeedClient, chain: NamedChain) -> Self {
        Self {
            client,
            chain,
            vaults: Vec::new(),
            snapshot: HashMap::new(),
        }
    }

    /// Fetch the allocator view of every vault in parallel and replace the
    /// snapshot.
    ///
    /// A vault whose fetch fails is simply absent from the new snapshot:
    /// capacity unknown must never read as capacity zero, and one slow or
    /// broken vault must not block the others.
    pub async fn fetch(&mut self, vaults: &[Address]) {
        self.vaults = vaults.to_vec();

        let futures: Vec<_> = vaults
            .iter()
            .map(|vault| self.fetch_vault(*vault))
            .collect();
        let results = join_all(futures).await;

        let mut snapshot = HashMap::new();
        for (vault, result) in vaults.iter().zip(results) {
            match result {
                Ok(Some(parsed)) => {
                    snapshot.insert(*vault, parsed);
                }
                Ok(None) => debug!(%vault, "vault has no usable allocator data"),
                Err(e) => warn!(%vault, error = %e, "feed fetch failed, omitting vault"),
            }
        }
        self.snapshot = snapshot;
    }

    async fn fetch_vault(&self, vault: Address) -> Result<Option<AllocatorVault>> {
        let record = self.client.get_allocator_vault(vault, self.chain).await?;
        Ok(to_allocator_vault(&record))
    }

    /// Re-run the last fetch against the same vault set.
    pub async fn refetch(&mut self) {
        let vaults = self.vaults.clone();
        self.fetch(&vaults).await;
    }

    /// The currently resident snapshot.
    pub fn snapshot(&self) -> &HashMap<Address, AllocatorVault> {
        &self.snapshot
    }

    /// The most extra liquidity a single reallocation transaction can
    /// deliver into `target` right now.
    pub fn total_available_extra_liquidity(&self, target: MarketId) -> U256 {
        total_available_extra_liquidity(self.chain, &self.snapshot, target)
    }

    /// Whether any vault can source liquidity into `target` at all.
    pub fn can_source_liquidity(&self, target: MarketId) -> bool {
        !self.total_available_extra_liquidity(target).is_zero()
    }

    /// Plan a reallocation delivering `extra_amount` into `target`.
    pub fn compute_reallocation(
        &self,
        target: MarketId,
        extra_amount: U256,
    ) -> Option<ReallocationPlan> {
        compute_reallocation(self.chain, &self.snapshot, target, extra_amount)
    }
}

fn capacities(
    snapshot: &HashMap<Address, AllocatorVault>,
    target: MarketId,
) -> Vec<ReallocationCapacity> {
    snapshot
        .values()
        .filter_map(|vault| vault.reallocation_capacity(target))
        .collect()
}

/// The best single-vault deliverable total toward `target`.
///
/// Plans never aggregate across vaults, so the honest answer is the best
/// single vault's capped total, not a sum over all of them. Zero on a
/// chain without an allocator deployment.
pub fn total_available_extra_liquidity(
    chain: NamedChain,
    snapshot: &HashMap<Address, AllocatorVault>,
    target: MarketId,
) -> U256 {
    if allocator_deployment(chain).is_none() {
        return U256::ZERO;
    }
    capacities(snapshot, target)
        .iter()
        .map(|capacity| capacity.total)
        .max()
        .unwrap_or(U256::ZERO)
}

/// Plan a reallocation delivering `extra_amount` into `target`, pure over
/// the resident snapshot.
///
/// Returns `None` when the chain has no allocator, no vault has positive
/// capacity, or plan assembly hits an integrity fault. A plan covering
/// less than `extra_amount` is returned as-is: the caller compares the
/// plan's total against its request and decides whether a partial fill is
/// acceptable.
pub fn compute_reallocation(
    chain: NamedChain,
    snapshot: &HashMap<Address, AllocatorVault>,
    target: MarketId,
    extra_amount: U256,
) -> Option<ReallocationPlan> {
    if extra_amount.is_zero() {
        return None;
    }
    let Some(deployment) = allocator_deployment(chain) else {
        debug!(chain = %chain, "no public allocator on this chain");
        return None;
    };

    let candidates = capacities(snapshot, target);
    let selected = select_vault(&candidates, extra_amount)?;
    let vault = snapshot.get(&selected.vault)?;

    // Demand beyond the target's inbound cap can never be delivered
    let demand = extra_amount.min(selected.target_max_in);
    let amounts = allocate_withdrawals(&selected.sources, demand);

    let params_table: HashMap<MarketId, MarketParams> = vault
        .markets
        .iter()
        .filter_map(|(id, market)| market.params.clone().map(|params| (*id, params)))
        .collect();

    let resolved = match resolve_withdrawals(&amounts, &params_table, target) {
        Ok(resolved) => resolved,
        Err(e) => {
            warn!(vault = %vault.address, error = %e, "withdrawal resolution failed");
            return None;
        }
    };
    for id in &resolved.unresolved {
        warn!(vault = %vault.address, market = %id, "market params unresolved, dropped from plan");
    }

    let Some(target_params) = vault
        .markets
        .get(&target)
        .and_then(|market| market.params.clone())
    else {
        warn!(vault = %vault.address, market = %target, "target market params unresolved");
        return None;
    };

    build_reallocation(
        deployment.public_allocator,
        vault.address,
        vault.fee,
        &resolved,
        &target_params,
    )
}
