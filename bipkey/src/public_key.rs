//! secp256k1 public keys.

use k256::elliptic_curve::sec1::ToEncodedPoint;

use crate::address::Address;
use crate::error::{Error, Result, decode_hex};

/// Compressed SEC1 encoding length.
pub const COMPRESSED_LEN: usize = 33;

/// Uncompressed SEC1 encoding length (leading 0x04).
pub const UNCOMPRESSED_LEN: usize = 65;

/// A point on secp256k1 derived from a [`PrivateKey`](crate::PrivateKey).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey {
    inner: k256::PublicKey,
}

impl PublicKey {
    /// Parse a SEC1 encoding: 33 bytes (0x02/0x03) or 65 bytes (0x04).
    ///
    /// Fails with [`Error::InvalidPublicKey`] on any other length or prefix, or
    /// when the coordinates are not on the curve.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        let well_formed = match bytes {
            [0x02 | 0x03, ..] => bytes.len() == COMPRESSED_LEN,
            [0x04, ..] => bytes.len() == UNCOMPRESSED_LEN,
            _ => false,
        };
        if !well_formed {
            return Err(Error::InvalidPublicKey);
        }
        let inner = k256::PublicKey::from_sec1_bytes(bytes).map_err(|_| Error::InvalidPublicKey)?;
        Ok(Self { inner })
    }

    /// Parse a hex-encoded SEC1 key, with or without `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = decode_hex(s)?;
        Self::from_sec1_bytes(&bytes)
    }

    /// Serialize to compressed bytes (33 bytes).
    pub fn to_compressed_bytes(&self) -> [u8; COMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(true);
        let mut result = [0u8; COMPRESSED_LEN];
        result.copy_from_slice(point.as_bytes());
        result
    }

    /// Serialize to uncompressed bytes (65 bytes with 0x04 prefix).
    pub fn to_uncompressed_bytes(&self) -> [u8; UNCOMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(false);
        let mut result = [0u8; UNCOMPRESSED_LEN];
        result.copy_from_slice(point.as_bytes());
        result
    }

    /// Serialize in the requested form.
    pub fn to_sec1_bytes(&self, compressed: bool) -> Vec<u8> {
        if compressed {
            self.to_compressed_bytes().to_vec()
        } else {
            self.to_uncompressed_bytes().to_vec()
        }
    }

    /// Get the raw 64-byte public key (without 0x04 prefix).
    pub fn to_raw_bytes(&self) -> [u8; 64] {
        let uncompressed = self.to_uncompressed_bytes();
        let mut result = [0u8; 64];
        result.copy_from_slice(&uncompressed[1..]);
        result
    }

    /// Derive the address.
    pub fn to_address(&self) -> Address {
        Address::from_public_key(self)
    }
}

impl From<k256::PublicKey> for PublicKey {
    fn from(inner: k256::PublicKey) -> Self {
        Self { inner }
    }
}

impl core::str::FromStr for PublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}
