//! Market identity and per-market protocol state.

use alloy_primitives::{keccak256, Address, FixedBytes, U256};

use crate::math::mul_div_down;

/// Type alias for a 32-byte market ID: the keccak256 hash of the market's
/// parameter tuple. Ordering over the raw byte value is the canonical
/// withdrawal order required by the allocator contract.
pub type MarketId = FixedBytes<32>;

/// The five-field tuple that defines a lending market.
///
/// The on-chain call addresses markets by full parameters, not by id, so
/// every withdrawal must carry the complete tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketParams {
    /// The asset being lent and borrowed
    pub loan_token: Address,
    /// The collateral asset (zero for idle markets)
    pub collateral_token: Address,
    /// Price oracle (zero for idle markets)
    pub oracle: Address,
    /// Interest rate model (zero for idle markets)
    pub irm: Address,
    /// Liquidation LTV (WAD-scaled)
    pub lltv: U256,
}

impl MarketParams {
    /// Returns the market id: keccak256 of the ABI encoding of the tuple.
    ///
    /// The encoding is five 32-byte words with addresses left-padded, the
    /// same layout as Solidity's `abi.encode` of the params struct.
    pub fn id(&self) -> MarketId {
        let mut buf = [0u8; 160];
        buf[12..32].copy_from_slice(self.loan_token.as_slice());
        buf[44..64].copy_from_slice(self.collateral_token.as_slice());
        buf[76..96].copy_from_slice(self.oracle.as_slice());
        buf[108..128].copy_from_slice(self.irm.as_slice());
        buf[128..160].copy_from_slice(&self.lltv.to_be_bytes::<32>());
        keccak256(buf)
    }
}

/// Aggregate supply-side totals of a market, used to convert a vault's
/// supply shares into assets at the market's current exchange rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarketTotals {
    /// The amount of loan assets supplied in total on the market
    pub total_supply_assets: U256,
    /// The total supply shares representing lender positions
    pub total_supply_shares: U256,
}

impl MarketTotals {
    /// Converts `shares` to assets, rounding down.
    ///
    /// Rounding must match the protocol's own conversion so the planner
    /// never promises more than a withdrawal can deliver. A market with no
    /// shares converts to zero.
    pub fn supply_assets(&self, shares: U256) -> U256 {
        mul_div_down(shares, self.total_supply_assets, self.total_supply_shares)
    }
}

/// Flow cap bounds for one (vault, market) pair.
///
/// Decremented by every reallocation by any actor, so a snapshot of these
/// values is stale the moment it is taken. The planner treats them as
/// externally-owned advisory bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlowCaps {
    /// Maximum assets that can still flow into the market
    pub max_in: U256,
    /// Maximum assets that can still flow out of the market
    pub max_out: U256,
}
