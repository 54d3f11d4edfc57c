//! Conversion from feed wire records into planner value types.
//!
//! Parsing is strict: a vault or field that cannot be parsed is dropped
//! with a diagnostic, never substituted with a default. Missing capacity
//! data must read as "unknown", not "zero", everywhere downstream.

use std::collections::HashMap;

use alloy_primitives::{Address, B256, U256};
use tracing::warn;

use realloc_rs_planner::{
    AllocatorVault, FlowCaps, MarketId, MarketParams, MarketTotals, VaultMarketCapacity,
};

use crate::client::{AllocationRecord, MarketRecord, VaultRecord};

fn parse_u256(s: &str) -> Option<U256> {
    U256::from_str_radix(s, 10).ok()
}

fn parse_address(s: &str) -> Option<Address> {
    s.parse().ok()
}

fn parse_market_id(s: &str) -> Option<MarketId> {
    s.parse::<B256>().ok()
}

/// Builds the planner's view of one vault.
///
/// Returns `None` when the record is unusable: no allocator config means
/// the vault cannot be sourced from at all, and an unparseable fee or
/// address makes every plan against it untrustworthy.
pub fn to_allocator_vault(record: &VaultRecord) -> Option<AllocatorVault> {
    let Some(address) = parse_address(&record.address) else {
        warn!(vault = %record.address, "unparseable vault address, dropping vault");
        return None;
    };
    let config = record.public_allocator_config.as_ref()?;
    let Some(fee) = parse_u256(&config.fee) else {
        warn!(%address, "unparseable allocator fee, dropping vault");
        return None;
    };

    let mut flow_caps: HashMap<MarketId, FlowCaps> = HashMap::new();
    for cap in &config.flow_caps {
        let Some(id) = parse_market_id(&cap.market.unique_key) else {
            warn!(%address, market = %cap.market.unique_key, "unparseable market key");
            continue;
        };
        let (Some(max_in), Some(max_out)) = (parse_u256(&cap.max_in), parse_u256(&cap.max_out))
        else {
            warn!(%address, market = %id, "unparseable flow caps");
            continue;
        };
        flow_caps.insert(id, FlowCaps { max_in, max_out });
    }

    let mut markets = HashMap::new();
    if let Some(state) = &record.state {
        for allocation in &state.allocation {
            let Some((id, capacity)) = to_market_capacity(address, allocation, &flow_caps)
            else {
                continue;
            };
            markets.insert(id, capacity);
        }
    }

    Some(AllocatorVault {
        address,
        fee,
        markets,
    })
}

fn to_market_capacity(
    vault: Address,
    allocation: &AllocationRecord,
    flow_caps: &HashMap<MarketId, FlowCaps>,
) -> Option<(MarketId, VaultMarketCapacity)> {
    let Some(id) = parse_market_id(&allocation.market.unique_key) else {
        warn!(%vault, market = %allocation.market.unique_key, "unparseable market key");
        return None;
    };
    let Some(supply_shares) = parse_u256(&allocation.supply_shares) else {
        warn!(%vault, market = %id, "unparseable supply shares, dropping market");
        return None;
    };

    let totals = allocation
        .market
        .state
        .as_ref()
        .and_then(|state| {
            Some(MarketTotals {
                total_supply_assets: parse_u256(&state.supply_assets)?,
                total_supply_shares: parse_u256(&state.supply_shares)?,
            })
        })
        .unwrap_or_default();

    // A market the curator gave no flow caps cannot be moved by the
    // allocator at all; zero caps express exactly that.
    let caps = flow_caps.get(&id).copied().unwrap_or_default();

    let params = to_market_params(&allocation.market);
    if params.is_none() {
        warn!(%vault, market = %id, "market params unresolvable from feed");
    }

    Some((
        id,
        VaultMarketCapacity {
            flow_caps: caps,
            supply_shares,
            totals,
            params,
        },
    ))
}

fn to_market_params(market: &MarketRecord) -> Option<MarketParams> {
    // Idle markets have no collateral, oracle or IRM; the protocol
    // addresses them with zero addresses.
    let collateral_token = match &market.collateral_asset {
        Some(asset) => parse_address(&asset.address)?,
        None => Address::ZERO,
    };
    let oracle = match market.oracle_address.as_deref() {
        Some(s) => parse_address(s)?,
        None => Address::ZERO,
    };
    let irm = match market.irm_address.as_deref() {
        Some(s) => parse_address(s)?,
        None => Address::ZERO,
    };

    Some(MarketParams {
        loan_token: parse_address(&market.loan_asset.address)?,
        collateral_token,
        oracle,
        irm,
        lltv: parse_u256(&market.lltv)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{
        AllocatorConfigRecord, AssetRecord, FlowCapRecord, MarketKeyRecord, MarketStateRecord,
        VaultStateRecord,
    };

    const VAULT: &str = "0xbeef01735c132ada46aa9aa4c54623caa92a64cb";
    const LOAN: &str = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";
    const MARKET_A: &str =
        "0x0101010101010101010101010101010101010101010101010101010101010101";

    fn market_record(key: &str) -> MarketRecord {
        MarketRecord {
            unique_key: key.to_string(),
            loan_asset: AssetRecord {
                address: LOAN.to_string(),
            },
            collateral_asset: None,
            oracle_address: None,
            irm_address: None,
            lltv: "0".to_string(),
            state: Some(MarketStateRecord {
                supply_assets: "1000000".to_string(),
                supply_shares: "1000000".to_string(),
            }),
        }
    }

    fn record() -> VaultRecord {
        VaultRecord {
            address: VAULT.to_string(),
            public_allocator_config: Some(AllocatorConfigRecord {
                fee: "1000000000000000".to_string(),
                flow_caps: vec![FlowCapRecord {
                    market: MarketKeyRecord {
                        unique_key: MARKET_A.to_string(),
                    },
                    max_in: "500".to_string(),
                    max_out: "400".to_string(),
                }],
            }),
            state: Some(VaultStateRecord {
                allocation: vec![AllocationRecord {
                    supply_shares: "250".to_string(),
                    market: market_record(MARKET_A),
                }],
            }),
        }
    }

    #[test]
    fn test_converts_complete_record() {
        let vault = to_allocator_vault(&record()).unwrap();
        assert_eq!(vault.fee, U256::from(1_000_000_000_000_000u64));
        assert_eq!(vault.markets.len(), 1);

        let id: MarketId = MARKET_A.parse().unwrap();
        let market = &vault.markets[&id];
        assert_eq!(market.flow_caps.max_in, U256::from(500));
        assert_eq!(market.flow_caps.max_out, U256::from(400));
        assert_eq!(market.supply_assets(), U256::from(250));
        assert!(market.params.is_some());
    }

    #[test]
    fn test_vault_without_allocator_config_dropped() {
        let mut r = record();
        r.public_allocator_config = None;
        assert!(to_allocator_vault(&r).is_none());
    }

    #[test]
    fn test_unparseable_fee_drops_vault() {
        let mut r = record();
        if let Some(config) = r.public_allocator_config.as_mut() {
            config.fee = "not a number".to_string();
        }
        assert!(to_allocator_vault(&r).is_none());
    }

    #[test]
    fn test_market_without_flow_caps_gets_zero_caps() {
        let mut r = record();
        if let Some(config) = r.public_allocator_config.as_mut() {
            config.flow_caps.clear();
        }
        let vault = to_allocator_vault(&r).unwrap();
        let id: MarketId = MARKET_A.parse().unwrap();
        assert_eq!(vault.markets[&id].flow_caps, FlowCaps::default());
        assert_eq!(vault.markets[&id].pullable(), U256::ZERO);
    }

    #[test]
    fn test_idle_market_params_use_zero_addresses() {
        let vault = to_allocator_vault(&record()).unwrap();
        let id: MarketId = MARKET_A.parse().unwrap();
        let params = vault.markets[&id].params.as_ref().unwrap();
        assert_eq!(params.collateral_token, Address::ZERO);
        assert_eq!(params.oracle, Address::ZERO);
        assert_eq!(params.irm, Address::ZERO);
    }

    #[test]
    fn test_unparseable_market_params_kept_as_capacity_only() {
        let mut r = record();
        if let Some(state) = r.state.as_mut() {
            state.allocation[0].market.loan_asset.address = "bogus".to_string();
        }
        let vault = to_allocator_vault(&r).unwrap();
        let id: MarketId = MARKET_A.parse().unwrap();
        // Capacity survives for ranking, params are gone
        assert!(vault.markets[&id].params.is_none());
        assert_eq!(vault.markets[&id].pullable(), U256::from(250));
    }
}
