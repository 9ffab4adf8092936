use alloy::network::Ethereum;
use alloy::providers::fillers::{
    BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller,
};
use alloy::providers::{Identity, ProviderBuilder, RootProvider};
use url::Url;

/// HTTP provider with the recommended gas, nonce and chain id fillers.
///
/// No wallet filler is attached: transactions are signed by the node for its
/// unlocked development accounts.
pub type HttpProvider = FillProvider<
    JoinFill<Identity, JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>>,
    RootProvider,
    Ethereum,
>;

/// Creates a new HTTP provider for the given node endpoint
#[must_use]
pub fn create_http_provider(endpoint: Url) -> HttpProvider {
    ProviderBuilder::new().on_http(endpoint)
}
