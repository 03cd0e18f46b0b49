//! 20-byte account addresses.
//!
//! The address is the low 20 bytes of Keccak-256 over the 64-byte raw public
//! key (uncompressed encoding without its 0x04 prefix). VeChain shares this
//! scheme with Ethereum, including the EIP-55 mixed-case checksum.

use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Result, decode_hex};
use crate::hash::keccak256;
use crate::public_key::PublicKey;

/// Address length in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Account address (20 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// Create from raw 20-byte address.
    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Create from a public key.
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let hash = keccak256(&public_key.to_raw_bytes());
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&hash[32 - ADDRESS_LEN..]);
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Lowercase hex with `0x` prefix.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// EIP-55 checksummed hex with `0x` prefix.
    pub fn to_checksum_string(&self) -> String {
        let addr_hex = hex::encode(self.0);
        let hash = keccak256(addr_hex.as_bytes());

        let mut result = String::with_capacity(2 + 2 * ADDRESS_LEN);
        result.push_str("0x");

        for (i, c) in addr_hex.chars().enumerate() {
            let hash_nibble = (hash[i / 2] >> (4 * (1 - i % 2))) & 0xf;
            if c.is_ascii_alphabetic() && hash_nibble >= 8 {
                result.push(c.to_ascii_uppercase());
            } else {
                result.push(c);
            }
        }

        result
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum_string())
    }
}

impl FromStr for Address {
    type Err = Error;

    /// Parse 40 hex digits with optional `0x`. Checksum casing is not enforced.
    fn from_str(s: &str) -> Result<Self> {
        let bytes = decode_hex(s)?;
        let bytes: [u8; ADDRESS_LEN] =
            bytes
                .as_slice()
                .try_into()
                .map_err(|_| Error::InvalidLength {
                    expected: ADDRESS_LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self(bytes))
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<Address> for [u8; ADDRESS_LEN] {
    fn from(addr: Address) -> Self {
        addr.0
    }
}
