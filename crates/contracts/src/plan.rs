//! Reallocation plan assembly and calldata encoding.

use alloy::sol_types::SolCall;
use alloy_primitives::{Address, Bytes, U256};
use tracing::warn;

use realloc_rs_planner::{MarketParams, ResolvedWithdrawals, Withdrawal};

use crate::bindings::{self, IPublicAllocator};

/// A ready-to-sign reallocation.
///
/// The plan is a pure, immutable value: `{to, value, calldata}` describe
/// the transaction that pulls the withdrawals into the target market, for
/// a caller to submit directly or merge into a larger multicall. Nothing
/// here signs or broadcasts.
#[derive(Debug, Clone)]
pub struct ReallocationPlan {
    /// The vault liquidity is sourced from
    pub vault: Address,
    /// The vault's flat reallocation fee, attached verbatim as the
    /// transaction value; never derived or rounded
    pub fee: U256,
    /// Withdrawals sorted strictly ascending by market id
    pub withdrawals: Vec<Withdrawal>,
    /// Full params of the market receiving the liquidity
    pub target_market_params: MarketParams,
    /// The public allocator contract to call
    pub to: Address,
    /// ABI-encoded `reallocateTo` call
    pub calldata: Bytes,
}

impl ReallocationPlan {
    /// The native-asset value to send with the transaction.
    pub fn value(&self) -> U256 {
        self.fee
    }

    /// Sum of all withdrawal amounts. A caller compares this against the
    /// amount it asked for to detect a partial fill.
    pub fn total_withdrawn(&self) -> U256 {
        self.withdrawals
            .iter()
            .fold(U256::ZERO, |acc, w| acc.saturating_add(w.amount))
    }
}

/// Encodes the full reallocation call.
///
/// The withdrawal set must be non-empty, strictly ascending by market id,
/// free of the target market, and hold only amounts representable as
/// uint128; the contract is assumed to revert on
/// violations, so nothing is encoded when one is detected. That situation
/// is a data-integrity fault: it is logged and `None` is returned rather
/// than surfacing a user-facing error.
pub fn build_reallocation(
    public_allocator: Address,
    vault: Address,
    fee: U256,
    resolved: &ResolvedWithdrawals,
    target: &MarketParams,
) -> Option<ReallocationPlan> {
    let withdrawals = &resolved.withdrawals;
    if withdrawals.is_empty() {
        warn!(%vault, "refusing to encode an empty withdrawal set");
        return None;
    }

    let target_id = target.id();
    let mut prev = None;
    for withdrawal in withdrawals {
        let id = withdrawal.market_params.id();
        if id == target_id {
            warn!(%vault, market = %id, "target market present in withdrawals");
            return None;
        }
        if let Some(prev) = prev {
            if id <= prev {
                warn!(%vault, market = %id, "withdrawals unsorted or duplicated");
                return None;
            }
        }
        prev = Some(id);
    }

    // Amounts are bounded by flow caps, which are uint128 on-chain; an
    // amount that does not fit came from corrupt feed data and must not
    // be narrowed into different calldata
    let mut encoded = Vec::with_capacity(withdrawals.len());
    for withdrawal in withdrawals {
        let Ok(amount) = u128::try_from(withdrawal.amount) else {
            warn!(
                %vault,
                market = %withdrawal.market_params.id(),
                amount = %withdrawal.amount,
                "withdrawal amount exceeds uint128 range"
            );
            return None;
        };
        encoded.push(bindings::Withdrawal {
            marketParams: bindings::MarketParams::from(&withdrawal.market_params),
            amount,
        });
    }

    let call = IPublicAllocator::reallocateToCall {
        vault,
        withdrawals: encoded,
        supplyMarketParams: bindings::MarketParams::from(target),
    };

    Some(ReallocationPlan {
        vault,
        fee,
        withdrawals: withdrawals.clone(),
        target_market_params: target.clone(),
        to: public_allocator,
        calldata: call.abi_encode().into(),
    })
}
