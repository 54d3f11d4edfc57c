//! Error types for the feed crate.

use alloy_primitives::Address;
use thiserror::Error;

/// Errors that can occur when talking to the indexed feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Vault not found.
    #[error("Vault not found: {address} on chain {chain_id}")]
    VaultNotFound { address: Address, chain_id: u64 },
}

/// Result type alias for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;
