//! EIP-712 encoding and signing of the EIP-2612 `Permit` struct.

use anyhow::{Context, Result};
use ethers::{
    abi::{self, Token},
    signers::{LocalWallet, Signer},
    types::{
        transaction::eip712::{EIP712Domain, Eip712, Eip712Error, TypedData},
        Address, Signature, H256, U256,
    },
    utils::{keccak256, to_checksum},
};
use serde_json::{json, Map, Value};

use crate::{
    constants::{DOMAIN_FIELDS, PERMIT_FIELDS, PERMIT_PRIMARY_TYPE, PERMIT_TYPE},
    error::VerifyError,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermitDomain {
    pub name: String,
    pub version: String,
    pub chain_id: U256,
    pub verifying_contract: Address,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermitMessage {
    pub owner: Address,
    pub spender: Address,
    pub value: U256,
    pub nonce: U256,
    pub deadline: U256,
}

/// A permit message bound to its token domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermitPayload {
    pub domain: PermitDomain,
    pub message: PermitMessage,
}

impl Eip712 for PermitPayload {
    type Error = Eip712Error;

    fn domain(&self) -> Result<EIP712Domain, Self::Error> {
        Ok(EIP712Domain {
            name: Some(self.domain.name.clone()),
            version: Some(self.domain.version.clone()),
            chain_id: Some(self.domain.chain_id),
            verifying_contract: Some(self.domain.verifying_contract),
            salt: None,
        })
    }

    fn type_hash() -> Result<[u8; 32], Self::Error> {
        Ok(keccak256(PERMIT_TYPE))
    }

    fn struct_hash(&self) -> Result<[u8; 32], Self::Error> {
        let m = &self.message;
        let encoded = abi::encode(&[
            Token::FixedBytes(Self::type_hash()?.to_vec()),
            Token::Address(m.owner),
            Token::Address(m.spender),
            Token::Uint(m.value),
            Token::Uint(m.nonce),
            Token::Uint(m.deadline),
        ]);
        Ok(keccak256(encoded))
    }
}

impl PermitPayload {
    /// The `{ types, primaryType, domain, message }` document wallets and
    /// `eth_signTypedData_v4` expect. Numbers are decimal strings.
    pub fn typed_data_json(&self) -> Value {
        let d = &self.domain;
        let m = &self.message;
        let mut types = Map::new();
        types.insert("EIP712Domain".into(), type_fields(&DOMAIN_FIELDS));
        types.insert(PERMIT_PRIMARY_TYPE.into(), type_fields(&PERMIT_FIELDS));
        json!({
            "types": types,
            "primaryType": PERMIT_PRIMARY_TYPE,
            "domain": {
                "name": d.name,
                "version": d.version,
                "chainId": d.chain_id.to_string(),
                "verifyingContract": to_checksum(&d.verifying_contract, None),
            },
            "message": {
                "owner": to_checksum(&m.owner, None),
                "spender": to_checksum(&m.spender, None),
                "value": m.value.to_string(),
                "nonce": m.nonce.to_string(),
                "deadline": m.deadline.to_string(),
            },
        })
    }

    /// Generic typed-data view of the same payload, encoded by ethers' schema-driven
    /// encoder rather than the fixed struct layout above.
    pub fn typed_data(&self) -> Result<TypedData, serde_json::Error> {
        serde_json::from_value(self.typed_data_json())
    }

    pub fn digest(&self) -> Result<H256, Eip712Error> {
        self.encode_eip712().map(H256::from)
    }
}

fn type_fields(fields: &[(&str, &str)]) -> Value {
    Value::Array(
        fields
            .iter()
            .map(|(name, ty)| {
                let mut field = Map::new();
                field.insert("name".into(), Value::from(*name));
                field.insert("type".into(), Value::from(*ty));
                Value::Object(field)
            })
            .collect(),
    )
}

/// Result of signing, already checked by recovery.
#[derive(Clone, Debug)]
pub struct SignedPermit {
    pub payload: PermitPayload,
    pub digest: H256,
    pub signature: Signature,
    pub recovered: Address,
}

impl SignedPermit {
    /// 65-byte `r || s || v`, 0x-prefixed.
    pub fn encoded(&self) -> String {
        format!("0x{}", hex::encode(self.signature.to_vec()))
    }

    pub fn r(&self) -> H256 {
        word(self.signature.r)
    }

    pub fn s(&self) -> H256 {
        word(self.signature.s)
    }

    pub fn v(&self) -> u64 {
        self.signature.v
    }
}

fn word(x: U256) -> H256 {
    let mut buf = [0u8; 32];
    x.to_big_endian(&mut buf);
    H256::from(buf)
}

/// Sign `payload` with `wallet`, then recompute the digest through the generic
/// typed-data encoder and recover the signer from it.
pub async fn sign_permit(wallet: &LocalWallet, payload: PermitPayload) -> Result<SignedPermit> {
    let signature = wallet
        .sign_typed_data(&payload)
        .await
        .context("signing permit typed data")?;

    let digest = payload.digest()?;
    let typed_digest = H256::from(
        payload
            .typed_data()
            .context("building typed data")?
            .encode_eip712()?,
    );
    if digest != typed_digest {
        return Err(VerifyError::DigestMismatch {
            payload: digest,
            typed_data: typed_digest,
        }
        .into());
    }

    let recovered = signature
        .recover(typed_digest)
        .context("recovering signer from signature")?;
    if recovered != payload.message.owner {
        return Err(VerifyError::SignerMismatch {
            owner: to_checksum(&payload.message.owner, None),
            recovered: to_checksum(&recovered, None),
        }
        .into());
    }

    Ok(SignedPermit {
        payload,
        digest,
        signature,
        recovered,
    })
}
