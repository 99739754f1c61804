//! Command line and environment resolution.
//!
//! Everything is optional at the clap layer so that a missing value is reported as
//! `Missing --<flag>` with exit status 1, the same as any other failure.

use clap::Parser;
use ethers::{
    signers::LocalWallet,
    types::{Address, U256},
};

use crate::{constants::DEFAULT_DOMAIN_VERSION, error::ConfigError};

/// Sign an EIP-2612 permit for an ERC-20 token and print the signature.
///
/// The token name and the owner's nonce are read from the chain; the owner is the
/// address of `--pk`.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Cli {
    /// JSON-RPC endpoint of the chain the token lives on.
    #[arg(long, env = "RPC_URL")]
    pub rpc: Option<String>,

    /// Private key of the permit owner (hex string, `0x` optional).
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub pk: Option<String>,

    /// Token contract (also the EIP-712 verifying contract).
    #[arg(long)]
    pub token: Option<String>,

    /// Address being approved to spend.
    #[arg(long)]
    pub spender: Option<String>,

    /// Allowance in base units (decimal or 0x hex).
    #[arg(long)]
    pub value: Option<String>,

    /// Unix timestamp after which the permit is invalid (decimal or 0x hex).
    #[arg(long)]
    pub deadline: Option<String>,

    /// EIP-712 domain version of the token (USDC uses "2").
    #[arg(long, default_value = DEFAULT_DOMAIN_VERSION)]
    pub domain_version: String,

    /// Compare the token's DOMAIN_SEPARATOR() with the locally computed one before signing.
    #[arg(long)]
    pub verify_domain: bool,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Fully validated inputs.
#[derive(Debug, Clone)]
pub struct PermitArgs {
    pub rpc_url: String,
    pub wallet: LocalWallet,
    pub token: Address,
    pub spender: Address,
    pub value: U256,
    pub deadline: U256,
    pub domain_version: String,
    pub verify_domain: bool,
    pub json: bool,
}

impl PermitArgs {
    /// Check presence of every required value (in flag order), then parse them.
    pub fn resolve(cli: Cli) -> Result<Self, ConfigError> {
        let rpc_url = required("rpc", cli.rpc)?;
        let pk = required("pk", cli.pk)?;
        let token = required("token", cli.token)?;
        let spender = required("spender", cli.spender)?;
        let value = required("value", cli.value)?;
        let deadline = required("deadline", cli.deadline)?;

        let domain_version = cli.domain_version.trim().to_string();
        if domain_version.is_empty() {
            return Err(ConfigError::Missing("domain-version"));
        }

        Ok(Self {
            rpc_url,
            wallet: parse_private_key(&pk)?,
            token: parse_address("token", &token)?,
            spender: parse_address("spender", &spender)?,
            value: parse_u256("value", &value)?,
            deadline: parse_u256("deadline", &deadline)?,
            domain_version,
            verify_domain: cli.verify_domain,
            json: cli.json,
        })
    }
}

fn required(name: &'static str, value: Option<String>) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ConfigError::Missing(name)),
    }
}

pub fn parse_address(name: &'static str, raw: &str) -> Result<Address, ConfigError> {
    raw.parse::<Address>().map_err(|e| ConfigError::Invalid {
        name,
        reason: format!("`{raw}` is not a 20-byte hex address ({e})"),
    })
}

/// Parse a `uint256` written in decimal or `0x`-prefixed hex.
pub fn parse_u256(name: &'static str, raw: &str) -> Result<U256, ConfigError> {
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some("") => Err("no digits after 0x".to_string()),
        Some(digits) => U256::from_str_radix(digits, 16).map_err(|e| e.to_string()),
        None => U256::from_dec_str(raw).map_err(|e| e.to_string()),
    };
    parsed.map_err(|reason| ConfigError::Invalid {
        name,
        reason: format!("`{raw}` is not a uint256 ({reason})"),
    })
}

/// Build the signing wallet. The key itself never appears in error messages.
pub fn parse_private_key(raw: &str) -> Result<LocalWallet, ConfigError> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    let bytes = hex::decode(digits).map_err(|e| ConfigError::Invalid {
        name: "pk",
        reason: format!("private key is not valid hex ({e})"),
    })?;
    if bytes.len() != 32 {
        return Err(ConfigError::Invalid {
            name: "pk",
            reason: format!("private key must be 32 bytes, got {}", bytes.len()),
        });
    }
    LocalWallet::from_bytes(&bytes).map_err(|_| ConfigError::Invalid {
        name: "pk",
        reason: "private key is not a valid secp256k1 scalar".to_string(),
    })
}
