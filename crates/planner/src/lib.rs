//! Reallocation Planning SDK
//!
//! This crate implements the pure computation half of the public allocator
//! reallocation planner: given a snapshot of each vault's flow caps and
//! supply positions, it decides which vault to source liquidity from, how
//! much to pull out of each of its markets, and produces a canonically
//! ordered withdrawal set ready for calldata encoding.
//!
//! # Overview
//!
//! - Derive pullable capacity per (vault, market) pair from flow caps and
//!   supply positions
//! - Rank vaults by how much they can actually deliver into a target market
//! - Fill a requested amount greedily under per-market caps
//! - Resolve and order withdrawals the way the allocator contract requires
//!
//! Everything here is synchronous and free of I/O; fetching snapshot data
//! and encoding calldata live in the feed and contracts crates.
//!
//! # Example
//!
//! ```rust,ignore
//! use realloc_rs_planner::{allocate_withdrawals, select_vault};
//!
//! let candidates: Vec<_> = vaults
//!     .values()
//!     .filter_map(|v| v.reallocation_capacity(target))
//!     .collect();
//! let best = select_vault(&candidates, requested)?;
//! let amounts = allocate_withdrawals(&best.sources, requested);
//! ```

pub mod allocate;
pub mod capacity;
pub mod error;
pub mod market;
pub mod math;
pub mod select;
pub mod withdrawal;

// Re-export commonly used types
pub use error::{PlanError, Result};

pub use allocate::allocate_withdrawals;
pub use capacity::{AllocatorVault, ReallocationCapacity, VaultMarketCapacity};
pub use market::{FlowCaps, MarketId, MarketParams, MarketTotals};
pub use math::mul_div_down;
pub use select::select_vault;
pub use withdrawal::{resolve_withdrawals, ResolvedWithdrawals, Withdrawal};
