//! Greedy withdrawal allocation under per-market caps.

use alloy_primitives::U256;

use crate::market::MarketId;

/// Fills `requested` from `sources` (market, pullable) pairs, largest
/// source first.
///
/// Largest-first touches the fewest markets, which keeps calldata size and
/// gas minimal: a single large source always beats several small ones when
/// one is available. Ties break by ascending market id so identical
/// snapshots always allocate identically.
///
/// When aggregate capacity is short of `requested`, the maximal achievable
/// partial set is returned; whether a partial fill is acceptable is the
/// caller's decision. A zero-capacity input yields the empty set.
pub fn allocate_withdrawals(
    sources: &[(MarketId, U256)],
    requested: U256,
) -> Vec<(MarketId, U256)> {
    let mut ordered: Vec<(MarketId, U256)> = sources
        .iter()
        .filter(|(_, pullable)| !pullable.is_zero())
        .copied()
        .collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut remaining = requested;
    let mut taken = Vec::new();
    for (id, pullable) in ordered {
        if remaining.is_zero() {
            break;
        }
        let amount = remaining.min(pullable);
        taken.push((id, amount));
        remaining -= amount;
    }
    taken
}
