//! Password-encrypted private key storage.
//!
//! Documents follow Web3 Secret Storage version 3:
//!
//! - scrypt (or, on import only, PBKDF2-HMAC-SHA256) stretches the password
//!   into a derived key `dk`
//! - AES-128-CTR under `dk[0..16]` encrypts the 32-byte private key
//! - `mac = keccak256(dk[16..32] || ciphertext)` authenticates the ciphertext
//!
//! Decryption validates the document structure first, then runs the KDF,
//! then compares MACs in constant time. Nothing is decrypted unless the MAC
//! matches.

mod cipher;
mod document;
mod kdf;

use core::fmt;
use core::str::FromStr;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

pub use cipher::{AES_128_CTR, IV_LEN};
pub use document::{KEYSTORE_VERSION, Keystore, MAC_LEN};
pub use kdf::{Kdf, MAX_PBKDF2_ROUNDS, MAX_SCRYPT_MEMORY, Pbkdf2Params, ScryptParams};

use crate::error::{Error, Result};
use crate::hash::keccak256_concat;
use crate::private_key::{PRIVATE_KEY_LEN, PrivateKey};

/// Salt length for newly encrypted documents.
pub const SALT_LEN: usize = 32;

/// Named scrypt cost presets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EncryptionLevel {
    /// n = 4096, r = 8, p = 6. Fast enough for phones.
    #[default]
    Light,
    /// n = 262144, r = 8, p = 1.
    Standard,
}

impl EncryptionLevel {
    /// Scrypt parameters for this level.
    pub const fn params(self) -> ScryptParams {
        match self {
            Self::Light => ScryptParams::LIGHT,
            Self::Standard => ScryptParams::STANDARD,
        }
    }
}

impl fmt::Display for EncryptionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Standard => write!(f, "standard"),
        }
    }
}

impl FromStr for EncryptionLevel {
    type Err = String;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "standard" => Ok(Self::Standard),
            other => Err(format!("unknown encryption level {other:?}, expected light or standard")),
        }
    }
}

/// Settings used when producing new keystore documents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeystoreConfig {
    scrypt: ScryptParams,
}

impl KeystoreConfig {
    /// Use a named preset.
    pub const fn new(level: EncryptionLevel) -> Self {
        Self {
            scrypt: level.params(),
        }
    }

    /// Use explicit scrypt parameters with a 32-byte derived key.
    pub fn custom(n: u64, r: u32, p: u32) -> Result<Self> {
        Ok(Self {
            scrypt: ScryptParams::new(n, r, p, 32)?,
        })
    }

    /// Scrypt parameters written into new documents.
    pub const fn scrypt(&self) -> &ScryptParams {
        &self.scrypt
    }
}

impl Default for KeystoreConfig {
    fn default() -> Self {
        Self::new(EncryptionLevel::default())
    }
}

impl From<EncryptionLevel> for KeystoreConfig {
    fn from(level: EncryptionLevel) -> Self {
        Self::new(level)
    }
}

/// Encrypt `key` under `password` with fresh operating-system randomness.
pub fn encrypt(key: &PrivateKey, password: &str, config: &KeystoreConfig) -> Result<Keystore> {
    encrypt_with_rng(key, password, config, &mut OsRng)
}

/// Encrypt `key` under `password`, drawing salt, IV and id from `rng`.
pub fn encrypt_with_rng<R: RngCore + CryptoRng>(
    key: &PrivateKey,
    password: &str,
    config: &KeystoreConfig,
    rng: &mut R,
) -> Result<Keystore> {
    let mut salt = vec![0u8; SALT_LEN];
    let mut iv = [0u8; IV_LEN];
    let mut id = [0u8; 16];
    rng.try_fill_bytes(&mut salt).map_err(|_| Error::CryptoError)?;
    rng.try_fill_bytes(&mut iv).map_err(|_| Error::CryptoError)?;
    rng.try_fill_bytes(&mut id).map_err(|_| Error::CryptoError)?;

    let kdf = Kdf::Scrypt {
        params: config.scrypt,
        salt,
    };
    let derived = kdf.derive_key(password.as_bytes())?;

    let mut ciphertext = key.to_bytes().to_vec();
    cipher::apply_keystream(&derived[..16], &iv, &mut ciphertext)?;
    let mac = keccak256_concat(&[&derived[16..32], ciphertext.as_slice()]);

    let address = key.address();
    tracing::debug!(%address, kdf = kdf.name(), "encrypted keystore");

    Ok(Keystore {
        id: Some(uuid::Builder::from_random_bytes(id).into_uuid().to_string()),
        address: Some(address),
        iv,
        ciphertext,
        kdf,
        mac,
    })
}

/// Recover the private key from `keystore`.
///
/// # Errors
///
/// [`Error::InvalidPassword`] when the MAC does not match. No plaintext is
/// produced in that case.
pub fn decrypt(keystore: &Keystore, password: &str) -> Result<PrivateKey> {
    let derived = keystore.kdf.derive_key(password.as_bytes())?;

    let mac = keccak256_concat(&[&derived[16..32], keystore.ciphertext.as_slice()]);
    if !bool::from(mac.ct_eq(&keystore.mac)) {
        tracing::debug!("keystore mac mismatch");
        return Err(Error::InvalidPassword);
    }

    let mut plaintext = Zeroizing::new([0u8; PRIVATE_KEY_LEN]);
    plaintext.copy_from_slice(&keystore.ciphertext);
    cipher::apply_keystream(&derived[..16], &keystore.iv, &mut *plaintext)?;

    let key = PrivateKey::from_bytes(&*plaintext)
        .map_err(|_| Error::InvalidKeystore("decrypted key is not a valid secp256k1 scalar".into()))?;

    if let Some(expected) = keystore.address() {
        let actual = key.address();
        if *expected != actual {
            tracing::warn!(%expected, %actual, "keystore address does not match decrypted key");
        }
    }

    Ok(key)
}

/// Parse `json` and decrypt it. Structure is validated before the KDF runs.
pub fn decrypt_json(json: &str, password: &str) -> Result<PrivateKey> {
    decrypt(&Keystore::from_json(json)?, password)
}
