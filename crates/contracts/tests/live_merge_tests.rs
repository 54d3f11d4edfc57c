//! Unit tests for live verification result merging.
//!
//! The multicall itself needs a chain; these tests exercise the merge of
//! raw per-call results into per-market data, including the exclusion of
//! markets with failed or undecodable reads.

use alloy::sol_types::SolValue;
use alloy_primitives::{Bytes, FixedBytes, U256};

use realloc_rs_contracts::bindings::IMulticall3;
use realloc_rs_contracts::live::merge_market_results;
use realloc_rs_planner::MarketId;

fn id(byte: u8) -> MarketId {
    FixedBytes::repeat_byte(byte)
}

fn ok(data: Vec<u8>) -> IMulticall3::Result {
    IMulticall3::Result {
        success: true,
        returnData: Bytes::from(data),
    }
}

fn failed() -> IMulticall3::Result {
    IMulticall3::Result {
        success: false,
        returnData: Bytes::new(),
    }
}

/// Encoded return data of flowCaps(address,bytes32).
fn flow_caps_return(max_in: u128, max_out: u128) -> Vec<u8> {
    (max_in, max_out).abi_encode()
}

/// Encoded return data of position(bytes32,address).
fn position_return(supply_shares: u64) -> Vec<u8> {
    (U256::from(supply_shares), 0u128, 0u128).abi_encode()
}

/// Encoded return data of market(bytes32), with a 1:1 share/asset rate.
fn market_return(total_supply: u128) -> Vec<u8> {
    (total_supply, total_supply, 0u128, 0u128, 0u128, 0u128).abi_encode()
}

fn healthy_triple(supply_shares: u64, max_out: u128) -> Vec<IMulticall3::Result> {
    vec![
        ok(flow_caps_return(1_000_000, max_out)),
        ok(position_return(supply_shares)),
        ok(market_return(1_000_000)),
    ]
}

#[test]
fn test_merges_all_successful_markets() {
    let ids = vec![id(0x01), id(0x02)];
    let mut results = healthy_triple(500, 400);
    results.extend(healthy_triple(300, 1_000));

    let live = merge_market_results(&ids, &results);
    assert_eq!(live.len(), 2);

    // Pullable is bounded by max_out for the first market, by supply for the second
    assert_eq!(live[&id(0x01)].pullable(), U256::from(400));
    assert_eq!(live[&id(0x02)].pullable(), U256::from(300));
}

#[test]
fn test_failed_market_excluded_others_kept() {
    // Three candidate markets; the middle one's position read fails
    let ids = vec![id(0x01), id(0x02), id(0x03)];
    let mut results = healthy_triple(500, 500);
    results.push(ok(flow_caps_return(0, 0)));
    results.push(failed());
    results.push(ok(market_return(1_000_000)));
    results.extend(healthy_triple(300, 300));

    let live = merge_market_results(&ids, &results);
    assert_eq!(live.len(), 2);
    assert!(live.contains_key(&id(0x01)));
    assert!(!live.contains_key(&id(0x02)));
    assert!(live.contains_key(&id(0x03)));
}

#[test]
fn test_undecodable_return_excluded() {
    let ids = vec![id(0x01)];
    let results = vec![
        ok(vec![0x01, 0x02]), // truncated flow caps data
        ok(position_return(500)),
        ok(market_return(1_000_000)),
    ];

    let live = merge_market_results(&ids, &results);
    assert!(live.is_empty());
}

#[test]
fn test_truncated_result_list_excluded() {
    // Two markets requested but results for only one and a half returned
    let ids = vec![id(0x01), id(0x02)];
    let mut results = healthy_triple(500, 500);
    results.push(ok(flow_caps_return(0, 0)));

    let live = merge_market_results(&ids, &results);
    assert_eq!(live.len(), 1);
    assert!(live.contains_key(&id(0x01)));
}

#[test]
fn test_supply_assets_uses_live_exchange_rate() {
    let ids = vec![id(0x01)];
    // 2:1 asset/share rate: 1000 shares -> 2000 assets
    let results = vec![
        ok(flow_caps_return(0, u128::MAX)),
        ok(position_return(1_000)),
        ok((2_000_000u128, 1_000_000u128, 0u128, 0u128, 0u128, 0u128).abi_encode()),
    ];

    let live = merge_market_results(&ids, &results);
    assert_eq!(live[&id(0x01)].supply_assets(), U256::from(2_000));
}
