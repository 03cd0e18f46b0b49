//! Error types for derivation, key algebra and keystore operations.

use core::fmt;

use zeroize::Zeroizing;

/// Errors that can occur inside the derivation and keystore core.
///
/// These never cross the [`bridge`](crate::bridge) boundary; the bridge
/// translates them into an [`ErrorCode`](crate::bridge::ErrorCode).
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Requested entropy strength is not one of 128, 160, 192, 224 or 256 bits.
    InvalidStrength(u32),
    /// Mnemonic failed word-count, wordlist or checksum validation.
    Mnemonic(bip39::Error),
    /// Derivation path text could not be parsed.
    InvalidDerivationPath(String),
    /// Derivation went deeper than 255 levels.
    MaxDepthExceeded,
    /// Child derivation at this raw index produced an unusable key.
    InvalidChildKey(u32),
    /// Seed length outside the 16..=64 byte range accepted for a master key.
    InvalidSeedLength(usize),
    /// Private key scalar is zero, not below the curve order, or malformed.
    InvalidPrivateKey,
    /// Public key is not a valid SEC1 point encoding.
    InvalidPublicKey,
    /// Input was not valid hexadecimal.
    InvalidEncoding,
    /// Input had the wrong byte length.
    InvalidLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },
    /// Keystore document is structurally malformed.
    InvalidKeystore(String),
    /// Keystore MAC did not match the supplied password.
    InvalidPassword,
    /// A cryptographic primitive rejected its parameters.
    CryptoError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStrength(bits) => {
                write!(f, "invalid strength {bits}, must be 128, 160, 192, 224 or 256 bits")
            }
            Self::Mnemonic(e) => write!(f, "mnemonic error: {e}"),
            Self::InvalidDerivationPath(reason) => write!(f, "invalid derivation path: {reason}"),
            Self::MaxDepthExceeded => write!(f, "derivation depth exceeds 255"),
            Self::InvalidChildKey(index) => {
                write!(f, "child key derivation at index {index:#010x} produced an invalid key")
            }
            Self::InvalidSeedLength(len) => {
                write!(f, "invalid seed length {len}, must be between 16 and 64 bytes")
            }
            Self::InvalidPrivateKey => write!(f, "invalid private key"),
            Self::InvalidPublicKey => write!(f, "invalid public key"),
            Self::InvalidEncoding => write!(f, "invalid hex encoding"),
            Self::InvalidLength { expected, actual } => {
                write!(f, "invalid length: expected {expected} bytes, got {actual}")
            }
            Self::InvalidKeystore(reason) => write!(f, "invalid keystore: {reason}"),
            Self::InvalidPassword => write!(f, "invalid password"),
            Self::CryptoError => write!(f, "cryptographic operation failed"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Mnemonic(e) => Some(e),
            _ => None,
        }
    }
}

impl From<bip39::Error> for Error {
    fn from(err: bip39::Error) -> Self {
        Self::Mnemonic(err)
    }
}

impl From<hex::FromHexError> for Error {
    fn from(_: hex::FromHexError) -> Self {
        Self::InvalidEncoding
    }
}

/// A convenient Result type alias for bipkey operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Decode a hex string, tolerating an optional `0x` prefix.
///
/// The output is wiped on drop since callers feed private keys through here.
pub(crate) fn decode_hex(input: &str) -> Result<Zeroizing<Vec<u8>>> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    Ok(Zeroizing::new(hex::decode(digits)?))
}
