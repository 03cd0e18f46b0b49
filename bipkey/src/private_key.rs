//! secp256k1 private keys.
//!
//! A [`PrivateKey`] is always a valid scalar: nonzero and below the curve
//! order. The scalar is zeroized on drop and never printed.

use k256::SecretKey;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::address::Address;
use crate::error::{Error, Result, decode_hex};
use crate::public_key::PublicKey;

/// Private key length in bytes.
pub const PRIVATE_KEY_LEN: usize = 32;

/// secp256k1 private key.
#[derive(Clone)]
pub struct PrivateKey {
    inner: SecretKey,
}

impl PrivateKey {
    /// Generate a new random private key.
    pub fn random() -> Self {
        Self::random_with_rng(&mut OsRng)
    }

    /// Generate a private key from the supplied CSPRNG.
    pub fn random_with_rng<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self {
            inner: SecretKey::random(rng),
        }
    }

    /// Create from 32 big-endian bytes.
    ///
    /// Fails with [`Error::InvalidPrivateKey`] when the scalar is zero or not
    /// below the curve order, and [`Error::InvalidLength`] for other lengths.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PRIVATE_KEY_LEN {
            return Err(Error::InvalidLength {
                expected: PRIVATE_KEY_LEN,
                actual: bytes.len(),
            });
        }
        let inner = SecretKey::from_slice(bytes).map_err(|_| Error::InvalidPrivateKey)?;
        Ok(Self { inner })
    }

    /// Parse a 64-digit hex string, with or without `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = decode_hex(s)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize to 32 big-endian bytes.
    pub fn to_bytes(&self) -> Zeroizing<[u8; PRIVATE_KEY_LEN]> {
        Zeroizing::new(self.inner.to_bytes().into())
    }

    /// Export as lowercase hex (without 0x prefix).
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(&*self.to_bytes()))
    }

    /// Derive the corresponding public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from(self.inner.public_key())
    }

    /// Get the corresponding address.
    pub fn address(&self) -> Address {
        self.public_key().to_address()
    }

    pub(crate) fn as_secret_key(&self) -> &SecretKey {
        &self.inner
    }

    pub(crate) const fn from_secret_key(inner: SecretKey) -> Self {
        Self { inner }
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        // SecretKey equality is constant-time.
        self.inner == other.inner
    }
}

impl Eq for PrivateKey {}

impl core::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "PrivateKey([REDACTED])")
    }
}

impl core::str::FromStr for PrivateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}
