//! Withdrawal resolution and canonical ordering.

use std::collections::HashMap;

use alloy_primitives::U256;

use crate::error::{PlanError, Result};
use crate::market::{MarketId, MarketParams};

/// A debit from one source market, addressed by full params as the
/// on-chain call requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Withdrawal {
    /// Full parameter tuple of the source market
    pub market_params: MarketParams,
    /// Assets to withdraw from it
    pub amount: U256,
}

/// Outcome of resolving allocator output into withdrawal structs.
#[derive(Debug, Clone)]
pub struct ResolvedWithdrawals {
    /// Withdrawals sorted strictly ascending by market id byte value
    pub withdrawals: Vec<Withdrawal>,
    /// Markets dropped because their full params could not be resolved
    pub unresolved: Vec<MarketId>,
}

impl ResolvedWithdrawals {
    /// Sum of all withdrawal amounts.
    pub fn total(&self) -> U256 {
        self.withdrawals
            .iter()
            .fold(U256::ZERO, |acc, w| acc.saturating_add(w.amount))
    }
}

/// Resolves `(market, amount)` pairs against the params table and puts
/// them in the canonical order the allocator contract requires.
///
/// A market missing from the table is dropped and reported in
/// `unresolved`: partial coverage with a diagnostic beats failing the
/// whole plan. The encoding preconditions are hard errors, since hitting
/// one means upstream state is corrupt:
///
/// - the target market must not appear among the sources
/// - no market may appear twice
/// - at least one withdrawal must survive resolution
pub fn resolve_withdrawals(
    amounts: &[(MarketId, U256)],
    params: &HashMap<MarketId, MarketParams>,
    target: MarketId,
) -> Result<ResolvedWithdrawals> {
    let mut entries: Vec<(MarketId, Withdrawal)> = Vec::with_capacity(amounts.len());
    let mut unresolved = Vec::new();

    for (id, amount) in amounts {
        if *id == target {
            return Err(PlanError::TargetMarketInWithdrawals { market_id: *id });
        }
        match params.get(id) {
            Some(market_params) => entries.push((
                *id,
                Withdrawal {
                    market_params: market_params.clone(),
                    amount: *amount,
                },
            )),
            None => unresolved.push(*id),
        }
    }

    entries.sort_by(|a, b| a.0.cmp(&b.0));
    for pair in entries.windows(2) {
        if pair[0].0 == pair[1].0 {
            return Err(PlanError::DuplicateWithdrawal { market_id: pair[0].0 });
        }
    }

    if entries.is_empty() {
        return Err(PlanError::EmptyWithdrawals);
    }

    Ok(ResolvedWithdrawals {
        withdrawals: entries.into_iter().map(|(_, w)| w).collect(),
        unresolved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, FixedBytes};

    fn id(byte: u8) -> MarketId {
        FixedBytes::repeat_byte(byte)
    }

    fn params_for(byte: u8) -> MarketParams {
        MarketParams {
            loan_token: Address::repeat_byte(byte),
            collateral_token: Address::repeat_byte(byte.wrapping_add(1)),
            oracle: Address::repeat_byte(byte.wrapping_add(2)),
            irm: Address::repeat_byte(byte.wrapping_add(3)),
            lltv: U256::from(u64::from(byte)),
        }
    }

    fn table(bytes: &[u8]) -> HashMap<MarketId, MarketParams> {
        bytes.iter().map(|b| (id(*b), params_for(*b))).collect()
    }

    #[test]
    fn test_sorts_ascending_by_market_id() {
        let amounts = vec![
            (id(0x03), U256::from(100)),
            (id(0x01), U256::from(200)),
            (id(0x02), U256::from(300)),
        ];
        let resolved =
            resolve_withdrawals(&amounts, &table(&[0x01, 0x02, 0x03]), id(0xff)).unwrap();

        let lltvs: Vec<U256> = resolved
            .withdrawals
            .iter()
            .map(|w| w.market_params.lltv)
            .collect();
        assert_eq!(lltvs, vec![U256::from(1), U256::from(2), U256::from(3)]);
        assert_eq!(resolved.total(), U256::from(600));
    }

    #[test]
    fn test_unresolvable_market_is_dropped_not_fatal() {
        let amounts = vec![(id(0x01), U256::from(100)), (id(0x09), U256::from(50))];
        let resolved = resolve_withdrawals(&amounts, &table(&[0x01]), id(0xff)).unwrap();

        assert_eq!(resolved.withdrawals.len(), 1);
        assert_eq!(resolved.unresolved, vec![id(0x09)]);
    }

    #[test]
    fn test_target_in_sources_is_an_error() {
        let amounts = vec![(id(0x01), U256::from(100))];
        let err = resolve_withdrawals(&amounts, &table(&[0x01]), id(0x01)).unwrap_err();
        assert_eq!(err, PlanError::TargetMarketInWithdrawals { market_id: id(0x01) });
    }

    #[test]
    fn test_duplicate_market_is_an_error() {
        let amounts = vec![(id(0x01), U256::from(100)), (id(0x01), U256::from(50))];
        let err = resolve_withdrawals(&amounts, &table(&[0x01]), id(0xff)).unwrap_err();
        assert_eq!(err, PlanError::DuplicateWithdrawal { market_id: id(0x01) });
    }

    #[test]
    fn test_empty_set_is_an_error() {
        let err = resolve_withdrawals(&[], &table(&[0x01]), id(0xff)).unwrap_err();
        assert_eq!(err, PlanError::EmptyWithdrawals);

        // All entries unresolvable also leaves an empty set
        let amounts = vec![(id(0x09), U256::from(100))];
        let err = resolve_withdrawals(&amounts, &table(&[0x01]), id(0xff)).unwrap_err();
        assert_eq!(err, PlanError::EmptyWithdrawals);
    }
}
