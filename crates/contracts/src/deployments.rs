//! Per-chain deployment addresses for the protocol contracts.

use alloy_chains::NamedChain;
use alloy_primitives::{address, Address};

use crate::error::{ContractError, Result};

/// The contract addresses the planner needs on one chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
    /// The core lending protocol (positions, market state)
    pub morpho: Address,
    /// The shared public allocator contract
    pub public_allocator: Address,
    /// The canonical Multicall3 aggregator
    pub multicall3: Address,
}

// The core protocol deploys to the same address on every supported chain.
const MORPHO_BLUE: Address = address!("BBBBBbbBBb9cC5e90e3b3Af64bdAF62C37EEFFCb");

// Canonical Multicall3, identical address on all chains.
const MULTICALL3: Address = address!("cA11bde05977b3631167028862bE2a173976CA11");

/// Returns the deployment for `chain`, or `None` when no public allocator
/// is deployed there.
///
/// A chain without a deployment leaves the whole reallocation subsystem
/// inert: no capacity can be sourced and no plan is ever produced.
pub fn allocator_deployment(chain: NamedChain) -> Option<Deployment> {
    let public_allocator = match chain {
        NamedChain::Mainnet => address!("fd32fA2ca22c76dD6E550706Ad913FC6CE91c75D"),
        NamedChain::Base => address!("A090dD1a701408Df1d4d0B85b716c87565f90467"),
        _ => return None,
    };

    Some(Deployment {
        morpho: MORPHO_BLUE,
        public_allocator,
        multicall3: MULTICALL3,
    })
}

/// Like [`allocator_deployment`] but with an error for callers that need
/// to report why a chain cannot be used.
pub fn require_allocator_deployment(chain: NamedChain) -> Result<Deployment> {
    allocator_deployment(chain).ok_or_else(|| ContractError::UnsupportedChain(chain.to_string()))
}
