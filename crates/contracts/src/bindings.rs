//! Solidity interface definitions.

use alloy::sol;

sol! {
    /// The five-field tuple that addresses a market on-chain.
    #[derive(Debug, PartialEq, Eq)]
    struct MarketParams {
        address loanToken;
        address collateralToken;
        address oracle;
        address irm;
        uint256 lltv;
    }

    /// A single withdrawal inside a reallocation call.
    #[derive(Debug, PartialEq, Eq)]
    struct Withdrawal {
        MarketParams marketParams;
        uint128 amount;
    }

    #[sol(rpc)]
    interface IMorpho {
        function market(bytes32 id) external view returns (
            uint128 totalSupplyAssets,
            uint128 totalSupplyShares,
            uint128 totalBorrowAssets,
            uint128 totalBorrowShares,
            uint128 lastUpdate,
            uint128 fee
        );
        function position(bytes32 id, address user) external view returns (
            uint256 supplyShares,
            uint128 borrowShares,
            uint128 collateral
        );
        function idToMarketParams(bytes32 id) external view returns (MarketParams memory marketParams);
    }

    #[sol(rpc)]
    interface IPublicAllocator {
        function fee(address vault) external view returns (uint256);
        function flowCaps(address vault, bytes32 id) external view returns (uint128 maxIn, uint128 maxOut);
        function reallocateTo(
            address vault,
            Withdrawal[] calldata withdrawals,
            MarketParams calldata supplyMarketParams
        ) external payable;
    }

    #[sol(rpc)]
    interface IMulticall3 {
        struct Call3 {
            address target;
            bool allowFailure;
            bytes callData;
        }

        struct Result {
            bool success;
            bytes returnData;
        }

        function aggregate3(Call3[] calldata calls) external payable returns (Result[] memory returnData);
    }
}

impl From<&realloc_rs_planner::MarketParams> for MarketParams {
    fn from(params: &realloc_rs_planner::MarketParams) -> Self {
        Self {
            loanToken: params.loan_token,
            collateralToken: params.collateral_token,
            oracle: params.oracle,
            irm: params.irm,
            lltv: params.lltv,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::sol_types::SolValue;
    use alloy_primitives::{keccak256, Address, U256};

    #[test]
    fn test_sol_params_encoding_matches_planner_id() {
        // The planner hashes its own hand-rolled encoding; the sol! struct
        // must produce the identical id
        let params = realloc_rs_planner::MarketParams {
            loan_token: Address::repeat_byte(0x01),
            collateral_token: Address::repeat_byte(0x02),
            oracle: Address::repeat_byte(0x03),
            irm: Address::repeat_byte(0x04),
            lltv: U256::from(860_000_000_000_000_000u64),
        };
        let sol_params = MarketParams::from(&params);
        assert_eq!(keccak256(sol_params.abi_encode()), params.id());
    }
}
