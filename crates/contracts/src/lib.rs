//! Contract bindings and on-chain plumbing for the reallocation planner.
//!
//! This crate provides Solidity bindings for the lending protocol and its
//! public allocator, per-chain deployment addresses, calldata encoding for
//! reallocation plans, and a multicall-batched live verification read.
//!
//! Nothing in this crate signs or submits transactions: a
//! [`ReallocationPlan`] carries `{to, value, calldata}` for a caller to
//! embed in its own transaction flow.
//!
//! # Example
//!
//! ```no_run
//! use realloc_rs_contracts::{connect_http, require_allocator_deployment, verify_live};
//! use alloy_chains::NamedChain;
//! use alloy_primitives::Address;
//!
//! #[tokio::main]
//! async fn main() -> realloc_rs_contracts::Result<()> {
//!     let provider = connect_http("https://eth.llamarpc.com")?;
//!     let deployment = require_allocator_deployment(NamedChain::Mainnet)?;
//!
//!     let vault: Address = "0x...".parse().unwrap();
//!     let live = verify_live(&provider, &deployment, vault, &[]).await?;
//!     Ok(())
//! }
//! ```

pub mod bindings;
pub mod deployments;
pub mod error;
pub mod live;
pub mod plan;
pub mod provider;

pub use deployments::{allocator_deployment, require_allocator_deployment, Deployment};
pub use error::{ContractError, Result};
pub use live::{verify_live, LiveMarketData};
pub use plan::{build_reallocation, ReallocationPlan};
pub use provider::{connect_http, HttpProvider};
