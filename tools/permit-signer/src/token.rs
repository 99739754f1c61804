//! Read-only access to an EIP-2612 token.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use ethers::{
    contract::abigen,
    providers::{Http, Middleware, Provider},
    types::{Address, U256},
};
use tracing::debug;

abigen!(
    PermitToken,
    r#"[
        function name() external view returns (string)
        function nonces(address owner) external view returns (uint256)
        function DOMAIN_SEPARATOR() external view returns (bytes32)
    ]"#
);

/// Source of the on-chain facts a permit depends on, implemented over JSON-RPC and by
/// test doubles.
#[async_trait]
pub trait PermitTokenReader: Send + Sync {
    async fn chain_id(&self) -> Result<U256>;

    /// ERC-20 `name()`, which doubles as the EIP-712 domain name.
    async fn name(&self) -> Result<String>;

    /// EIP-2612 `nonces(owner)`.
    async fn nonce(&self, owner: Address) -> Result<U256>;

    async fn domain_separator(&self) -> Result<[u8; 32]> {
        Err(anyhow!("DOMAIN_SEPARATOR() is not available from this reader"))
    }
}

/// Reader backed by an HTTP JSON-RPC provider.
pub struct RpcTokenReader {
    provider: Arc<Provider<Http>>,
    token: PermitToken<Provider<Http>>,
}

impl RpcTokenReader {
    /// Builds the provider without contacting the node.
    pub fn connect(rpc_url: &str, token: Address) -> Result<Self> {
        let provider = Provider::<Http>::try_from(rpc_url).context("invalid RPC URL")?;
        let provider = Arc::new(provider);
        let token = PermitToken::new(token, provider.clone());
        Ok(Self { provider, token })
    }
}

#[async_trait]
impl PermitTokenReader for RpcTokenReader {
    async fn chain_id(&self) -> Result<U256> {
        let chain_id = self.provider.get_chainid().await?;
        debug!(%chain_id, "eth_chainId");
        Ok(chain_id)
    }

    async fn name(&self) -> Result<String> {
        let name = self.token.name().call().await?;
        debug!(token = ?self.token.address(), %name, "name()");
        Ok(name)
    }

    async fn nonce(&self, owner: Address) -> Result<U256> {
        let nonce = self.token.nonces(owner).call().await?;
        debug!(token = ?self.token.address(), ?owner, %nonce, "nonces(owner)");
        Ok(nonce)
    }

    async fn domain_separator(&self) -> Result<[u8; 32]> {
        Ok(self.token.domain_separator().call().await?)
    }
}
