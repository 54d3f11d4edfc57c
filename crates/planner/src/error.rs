//! Error types for the planner crate.

use thiserror::Error;

use crate::market::MarketId;

/// Errors that can occur while assembling a withdrawal set.
///
/// These are encoding preconditions: hitting one means the planner state is
/// inconsistent, not that the user asked for something impossible. Callers
/// log them and degrade to "no plan".
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    /// No withdrawal survived resolution
    #[error("Withdrawal set is empty")]
    EmptyWithdrawals,

    /// The same market appears twice in the withdrawal set
    #[error("Duplicate withdrawal for market {market_id}")]
    DuplicateWithdrawal { market_id: MarketId },

    /// The target market appears among the source markets
    #[error("Target market {market_id} present in withdrawals")]
    TargetMarketInWithdrawals { market_id: MarketId },
}

/// Result type alias for planner operations.
pub type Result<T> = std::result::Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::FixedBytes;

    #[test]
    fn test_error_display() {
        assert_eq!(
            PlanError::EmptyWithdrawals.to_string(),
            "Withdrawal set is empty"
        );

        let id = FixedBytes::repeat_byte(0xab);
        let error = PlanError::DuplicateWithdrawal { market_id: id };
        assert!(error.to_string().starts_with("Duplicate withdrawal for market 0xabab"));
    }
}
