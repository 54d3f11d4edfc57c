//! Indexed feed client and capacity snapshot store.
//!
//! This crate owns the I/O side of the reallocation planner: it pulls each
//! vault's public-allocator view (fee, flow caps, supply positions) from
//! the indexed GraphQL feed, converts it into planner value types, and
//! keeps the result in a [`CapacitySnapshotStore`] that plan computation
//! reads synchronously.
//!
//! # Example
//!
//! ```rust,ignore
//! use realloc_rs_feed::{CapacitySnapshotStore, FeedClient};
//! use alloy_chains::NamedChain;
//!
//! let mut store = CapacitySnapshotStore::new(FeedClient::new(), NamedChain::Mainnet);
//! store.fetch(&vaults).await;
//!
//! if store.can_source_liquidity(target) {
//!     let plan = store.compute_reallocation(target, amount);
//! }
//! ```

pub mod client;
pub mod convert;
pub mod error;
pub mod store;

pub use client::{FeedClient, FeedConfig, DEFAULT_API_URL};
pub use convert::to_allocator_vault;
pub use error::{FeedError, Result};
pub use store::CapacitySnapshotStore;
