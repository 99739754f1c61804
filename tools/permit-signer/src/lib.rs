//! EIP-2612 permit signing.
//!
//! Reads the token name and the owner's nonce over JSON-RPC, builds the EIP-712 `Permit`
//! payload, signs it with a local key and checks the result by recovering the signer.

use anyhow::{Context, Result};
use ethers::{
    signers::Signer,
    types::{transaction::eip712::Eip712, H256},
    utils::to_checksum,
};
use tracing::info;

pub mod config;
pub mod constants;
pub mod deadline;
pub mod error;
pub mod output;
pub mod permit;
pub mod token;


use crate::{
    config::PermitArgs,
    error::VerifyError,
    permit::{PermitDomain, PermitMessage, PermitPayload, SignedPermit},
    token::PermitTokenReader,
};

/// Gather the on-chain inputs from `reader` and build the payload to sign.
pub async fn build_payload<R>(args: &PermitArgs, reader: &R) -> Result<PermitPayload>
where
    R: PermitTokenReader + ?Sized,
{
    let owner = args.wallet.address();
    info!(owner = %to_checksum(&owner, None), "derived permit owner");

    let name = reader.name().await.context("reading token name()")?;
    let nonce = reader
        .nonce(owner)
        .await
        .context("reading token nonces(owner)")?;
    let chain_id = reader.chain_id().await.context("reading chain id")?;
    info!(%name, %nonce, %chain_id, "fetched token state");

    deadline::log_deadline(args.deadline);

    Ok(PermitPayload {
        domain: PermitDomain {
            name,
            version: args.domain_version.clone(),
            chain_id,
            verifying_contract: args.token,
        },
        message: PermitMessage {
            owner,
            spender: args.spender,
            value: args.value,
            nonce,
            deadline: args.deadline,
        },
    })
}

/// Compare the token's own `DOMAIN_SEPARATOR()` with the one derived from `payload`.
pub async fn verify_domain<R>(payload: &PermitPayload, reader: &R) -> Result<()>
where
    R: PermitTokenReader + ?Sized,
{
    let onchain = H256::from(
        reader
            .domain_separator()
            .await
            .context("reading token DOMAIN_SEPARATOR()")?,
    );
    let computed = H256::from(payload.domain_separator()?);
    if onchain != computed {
        return Err(VerifyError::DomainSeparatorMismatch { onchain, computed }.into());
    }
    info!(separator = ?computed, "domain separator matches token");
    Ok(())
}

/// Full pass: read, optionally verify the domain, sign and self-check.
pub async fn sign<R>(args: &PermitArgs, reader: &R) -> Result<SignedPermit>
where
    R: PermitTokenReader + ?Sized,
{
    let payload = build_payload(args, reader).await?;
    if args.verify_domain {
        verify_domain(&payload, reader).await?;
    }

    let signed = permit::sign_permit(&args.wallet, payload).await?;
    info!(
        digest = ?signed.digest,
        recovered = %to_checksum(&signed.recovered, None),
        "permit signed"
    );
    Ok(signed)
}
