//! Provider type definitions for read-only contract access.

use alloy::{
    network::Ethereum,
    providers::{
        fillers::{
            BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller,
        },
        Identity, ProviderBuilder, RootProvider,
    },
};

use crate::error::{ContractError, Result};

/// The recommended fillers type from `ProviderBuilder::new()`.
pub type RecommendedFillers =
    JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>;

/// The concrete read-only provider type.
///
/// No wallet filler: this subsystem only reads chain state and hands back
/// encoded calls for someone else to sign.
pub type HttpProvider =
    FillProvider<JoinFill<Identity, RecommendedFillers>, RootProvider<Ethereum>, Ethereum>;

/// Connect a read-only provider to an HTTP RPC endpoint.
pub fn connect_http(rpc_url: &str) -> Result<HttpProvider> {
    let url: url::Url = rpc_url
        .parse()
        .map_err(|e| ContractError::RpcConnection(format!("{}", e)))?;
    Ok(ProviderBuilder::new().connect_http(url))
}
