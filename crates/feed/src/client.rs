//! GraphQL client for the indexed public-allocator feed.

use alloy_chains::NamedChain;
use alloy_primitives::Address;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::error::{FeedError, Result};

/// Default indexed API endpoint.
pub const DEFAULT_API_URL: &str = "https://blue-api.morpho.org/graphql";

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// GraphQL API URL.
    pub api_url: Url,
}

impl Default for FeedConfig {
    // Parsing the constant URL literal cannot fail
    #[allow(clippy::expect_used)]
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("Invalid default API URL"),
        }
    }
}

impl FeedConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom API URL.
    pub fn with_api_url(mut self, url: Url) -> Self {
        self.api_url = url;
        self
    }
}

/// Client for querying vault allocator data from the indexed feed.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http_client: Client,
    config: FeedConfig,
}

impl Default for FeedClient {
    fn default() -> Self {
        Self::new()
    }
}

/// One query per vault: the vault's allocator config (fee and flow caps)
/// plus its allocation in every market it participates in, including the
/// market totals needed to convert shares to assets and the full params
/// needed to address the market on-chain.
const ALLOCATOR_VAULT_QUERY: &str = r"query AllocatorVault($address: String!, $chainId: Int!) {
  vaultByAddress(address: $address, chainId: $chainId) {
    address
    publicAllocatorConfig {
      fee
      flowCaps {
        market { uniqueKey }
        maxIn
        maxOut
      }
    }
    state {
      allocation {
        supplyShares
        market {
          uniqueKey
          loanAsset { address }
          collateralAsset { address }
          oracleAddress
          irmAddress
          lltv
          state {
            supplyAssets
            supplyShares
          }
        }
      }
    }
  }
}";

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AllocatorVaultData {
    vault_by_address: Option<VaultRecord>,
}

/// Wire record for one vault, string-encoded as the feed delivers it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultRecord {
    pub address: String,
    pub public_allocator_config: Option<AllocatorConfigRecord>,
    pub state: Option<VaultStateRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocatorConfigRecord {
    pub fee: String,
    #[serde(default)]
    pub flow_caps: Vec<FlowCapRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowCapRecord {
    pub market: MarketKeyRecord,
    pub max_in: String,
    pub max_out: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketKeyRecord {
    pub unique_key: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultStateRecord {
    #[serde(default)]
    pub allocation: Vec<AllocationRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRecord {
    pub supply_shares: String,
    pub market: MarketRecord,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketRecord {
    pub unique_key: String,
    pub loan_asset: AssetRecord,
    pub collateral_asset: Option<AssetRecord>,
    pub oracle_address: Option<String>,
    pub irm_address: Option<String>,
    pub lltv: String,
    pub state: Option<MarketStateRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketStateRecord {
    pub supply_assets: String,
    pub supply_shares: String,
}

impl FeedClient {
    /// Create a new feed client with default configuration.
    pub fn new() -> Self {
        Self {
            http_client: Client::new(),
            config: FeedConfig::default(),
        }
    }

    /// Create a new feed client with custom configuration.
    pub fn with_config(config: FeedConfig) -> Self {
        Self {
            http_client: Client::new(),
            config,
        }
    }

    /// Execute a GraphQL query.
    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let response = self
            .http_client
            .post(self.config.api_url.as_str())
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let response_body: GraphQlResponse<T> = response.json().await?;

        if let Some(errors) = response_body.errors {
            if !errors.is_empty() {
                return Err(FeedError::GraphQl(
                    errors
                        .iter()
                        .map(|e| e.message.clone())
                        .collect::<Vec<_>>()
                        .join("; "),
                ));
            }
        }

        response_body
            .data
            .ok_or_else(|| FeedError::Parse("No data in response".to_string()))
    }

    /// Fetch one vault's public-allocator view.
    pub async fn get_allocator_vault(
        &self,
        address: Address,
        chain: NamedChain,
    ) -> Result<VaultRecord> {
        let chain_id = u64::from(chain);
        let variables = json!({
            "address": address.to_string(),
            "chainId": chain_id,
        });

        let data: AllocatorVaultData = self.execute(ALLOCATOR_VAULT_QUERY, variables).await?;

        data.vault_by_address.ok_or(FeedError::VaultNotFound {
            address,
            chain_id,
        })
    }
}
