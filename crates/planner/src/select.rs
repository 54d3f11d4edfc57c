//! Vault selection policy.

use alloy_primitives::U256;

use crate::capacity::ReallocationCapacity;

/// Picks the single vault to source liquidity from.
///
/// Candidates are ranked descending by deliverable total; the first vault
/// that can fully cover `requested` wins. When none can, the vault with
/// the largest total is returned instead, so one transaction still moves
/// as much as possible rather than failing outright. A plan never draws
/// from more than one vault.
///
/// Returns `None` when every candidate's total is zero.
pub fn select_vault(
    candidates: &[ReallocationCapacity],
    requested: U256,
) -> Option<&ReallocationCapacity> {
    let mut ranked: Vec<&ReallocationCapacity> = candidates
        .iter()
        .filter(|candidate| !candidate.total.is_zero())
        .collect();
    if ranked.is_empty() {
        return None;
    }

    // Vault address tie-break keeps selection deterministic
    ranked.sort_by(|a, b| b.total.cmp(&a.total).then(a.vault.cmp(&b.vault)));

    ranked
        .iter()
        .find(|candidate| candidate.total >= requested)
        .copied()
        .or_else(|| ranked.first().copied())
}
