use ethers::types::H256;

/// Problems with the command line / environment, detected before any RPC call.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing --{0}")]
    Missing(&'static str),

    #[error("Invalid --{name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Self-check failures after signing (or before, for the domain separator).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("recovered signer {recovered} does not match owner {owner}")]
    SignerMismatch { owner: String, recovered: String },

    #[error("digest mismatch: struct encoding {payload:?}, typed data {typed_data:?}")]
    DigestMismatch { payload: H256, typed_data: H256 },

    #[error(
        "token DOMAIN_SEPARATOR {onchain:?} does not match computed {computed:?} (wrong name or --domain-version?)"
    )]
    DomainSeparatorMismatch { onchain: H256, computed: H256 },
}
