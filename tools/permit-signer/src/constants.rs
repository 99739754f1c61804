/// EIP-712 domain version used by most EIP-2612 tokens (OpenZeppelin `ERC20Permit`).
pub const DEFAULT_DOMAIN_VERSION: &str = "1";

pub const PERMIT_PRIMARY_TYPE: &str = "Permit";

/// Field layout of the EIP-2612 `Permit` struct, in encoding order.
pub const PERMIT_FIELDS: [(&str, &str); 5] = [
    ("owner", "address"),
    ("spender", "address"),
    ("value", "uint256"),
    ("nonce", "uint256"),
    ("deadline", "uint256"),
];

/// Canonical type string; its keccak256 is the `PERMIT_TYPEHASH` tokens hard-code.
pub const PERMIT_TYPE: &str =
    "Permit(address owner,address spender,uint256 value,uint256 nonce,uint256 deadline)";

/// Domain fields in the order the EIP-712 domain type string lists them.
pub const DOMAIN_FIELDS: [(&str, &str); 4] = [
    ("name", "string"),
    ("version", "string"),
    ("chainId", "uint256"),
    ("verifyingContract", "address"),
];
