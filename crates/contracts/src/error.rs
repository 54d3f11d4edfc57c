//! Error types for the contracts crate.

use thiserror::Error;

/// Errors that can occur when reading chain state.
#[derive(Debug, Error)]
pub enum ContractError {
    /// RPC connection failed.
    #[error("RPC connection failed: {0}")]
    RpcConnection(String),

    /// An on-chain read failed.
    #[error("On-chain read failed: {0}")]
    ReadFailed(String),

    /// No public allocator is deployed on the chain.
    #[error("No public allocator deployed on chain {0}")]
    UnsupportedChain(String),
}

/// Result type alias for contract operations.
pub type Result<T> = std::result::Result<T, ContractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_rpc_connection() {
        let error = ContractError::RpcConnection("connection refused".to_string());
        assert_eq!(error.to_string(), "RPC connection failed: connection refused");
    }

    #[test]
    fn test_error_display_read_failed() {
        let error = ContractError::ReadFailed("execution reverted".to_string());
        assert_eq!(error.to_string(), "On-chain read failed: execution reverted");
    }

    #[test]
    fn test_error_display_unsupported_chain() {
        let error = ContractError::UnsupportedChain("polygon".to_string());
        assert_eq!(
            error.to_string(),
            "No public allocator deployed on chain polygon"
        );
    }
}
