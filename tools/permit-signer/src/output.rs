use std::fmt;

use ethers::utils::to_checksum;
use serde::Serialize;
use serde_json::Value;

use crate::permit::SignedPermit;

/// What gets printed on success.
#[derive(Clone, Debug, Serialize)]
pub struct PermitReport {
    pub owner: String,
    pub recovered: String,
    pub digest: String,
    pub signature: String,
    pub v: u64,
    pub r: String,
    pub s: String,
    /// Full EIP-712 document that was signed (JSON output only).
    pub typed_data: Value,
}

impl From<&SignedPermit> for PermitReport {
    fn from(signed: &SignedPermit) -> Self {
        Self {
            owner: to_checksum(&signed.payload.message.owner, None),
            recovered: to_checksum(&signed.recovered, None),
            digest: format!("{:?}", signed.digest),
            signature: signed.encoded(),
            v: signed.v(),
            r: format!("{:?}", signed.r()),
            s: format!("{:?}", signed.s()),
            typed_data: signed.payload.typed_data_json(),
        }
    }
}

impl fmt::Display for PermitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "owner:     {}", self.owner)?;
        writeln!(f, "recovered: {}", self.recovered)?;
        writeln!(f, "digest:    {}", self.digest)?;
        writeln!(f, "signature: {}", self.signature)?;
        writeln!(f, "v: {}", self.v)?;
        writeln!(f, "r: {}", self.r)?;
        writeln!(f, "s: {}", self.s)
    }
}
