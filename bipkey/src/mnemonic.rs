//! BIP-39 entropy and mnemonic codec.
//!
//! Entropy of 128 to 256 bits is drawn from the operating system CSPRNG,
//! extended with a SHA-256 checksum of `bits / 32` bits and split into 11-bit
//! groups indexing the English wordlist. Validation reverses the process and
//! recomputes the checksum.
//!
//! # Example
//!
//! ```
//! use bipkey::mnemonic::{self, Strength};
//!
//! let phrase = mnemonic::generate(Strength::Bits128).unwrap();
//! assert_eq!(phrase.word_count(), 12);
//! assert!(mnemonic::is_valid(phrase.phrase()));
//! ```

use core::fmt;
use core::str::FromStr;

use bip39::Language;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::types::Seed;

/// Entropy strength accepted for mnemonic generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strength {
    /// 128 bits, 12 words.
    Bits128,
    /// 160 bits, 15 words.
    Bits160,
    /// 192 bits, 18 words.
    Bits192,
    /// 224 bits, 21 words.
    Bits224,
    /// 256 bits, 24 words.
    Bits256,
}

impl Strength {
    /// All supported strengths, weakest first.
    pub const ALL: [Self; 5] = [
        Self::Bits128,
        Self::Bits160,
        Self::Bits192,
        Self::Bits224,
        Self::Bits256,
    ];

    /// Entropy size in bits.
    pub const fn bits(self) -> u32 {
        match self {
            Self::Bits128 => 128,
            Self::Bits160 => 160,
            Self::Bits192 => 192,
            Self::Bits224 => 224,
            Self::Bits256 => 256,
        }
    }

    /// Entropy size in bytes.
    pub const fn entropy_len(self) -> usize {
        (self.bits() / 8) as usize
    }

    /// Checksum length in bits.
    pub const fn checksum_bits(self) -> u32 {
        self.bits() / 32
    }

    /// Number of words in a mnemonic of this strength.
    pub const fn word_count(self) -> usize {
        ((self.bits() + self.checksum_bits()) / 11) as usize
    }

    /// Strength implied by a mnemonic word count.
    pub const fn from_word_count(words: usize) -> Option<Self> {
        match words {
            12 => Some(Self::Bits128),
            15 => Some(Self::Bits160),
            18 => Some(Self::Bits192),
            21 => Some(Self::Bits224),
            24 => Some(Self::Bits256),
            _ => None,
        }
    }
}

impl TryFrom<u32> for Strength {
    type Error = Error;

    fn try_from(bits: u32) -> Result<Self> {
        match bits {
            128 => Ok(Self::Bits128),
            160 => Ok(Self::Bits160),
            192 => Ok(Self::Bits192),
            224 => Ok(Self::Bits224),
            256 => Ok(Self::Bits256),
            other => Err(Error::InvalidStrength(other)),
        }
    }
}

/// A checksum-validated English BIP-39 mnemonic.
///
/// The phrase is held in a zeroizing buffer and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Mnemonic {
    phrase: Zeroizing<String>,
    word_count: usize,
}

impl Mnemonic {
    /// Parse and validate a phrase.
    ///
    /// Words are separated by any whitespace; the stored phrase is normalized
    /// to single spaces.
    pub fn parse(phrase: &str) -> Result<Self> {
        let inner = bip39::Mnemonic::parse_in(Language::English, phrase)?;
        Ok(Self::from_inner(&inner))
    }

    /// Encode raw entropy (16, 20, 24, 28 or 32 bytes) as a mnemonic.
    pub fn from_entropy(entropy: &[u8]) -> Result<Self> {
        let inner = bip39::Mnemonic::from_entropy_in(Language::English, entropy)?;
        Ok(Self::from_inner(&inner))
    }

    fn from_inner(inner: &bip39::Mnemonic) -> Self {
        Self {
            phrase: Zeroizing::new(inner.to_string()),
            word_count: inner.word_count(),
        }
    }

    /// The space-separated phrase.
    #[inline]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Number of words in the phrase.
    #[inline]
    pub const fn word_count(&self) -> usize {
        self.word_count
    }

    /// Strength of the entropy behind this phrase.
    pub fn strength(&self) -> Strength {
        // Only valid word counts survive parsing.
        Strength::from_word_count(self.word_count).unwrap_or(Strength::Bits128)
    }

    /// Recover the raw entropy bytes.
    pub fn to_entropy(&self) -> Result<Zeroizing<Vec<u8>>> {
        let inner = bip39::Mnemonic::parse_in_normalized(Language::English, &self.phrase)?;
        Ok(Zeroizing::new(inner.to_entropy()))
    }

    /// Stretch the phrase and passphrase into the 64-byte seed.
    ///
    /// PBKDF2-HMAC-SHA512, 2048 rounds, salt `"mnemonic" + passphrase`, both
    /// NFKD-normalized.
    pub fn to_seed(&self, passphrase: &str) -> Result<Seed> {
        let inner = bip39::Mnemonic::parse_in_normalized(Language::English, &self.phrase)?;
        Ok(Seed::new(inner.to_seed(passphrase)))
    }
}

impl FromStr for Mnemonic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mnemonic")
            .field("word_count", &self.word_count)
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

/// Generate a mnemonic from fresh operating-system randomness.
pub fn generate(strength: Strength) -> Result<Mnemonic> {
    generate_with_rng(strength, &mut OsRng)
}

/// Generate a mnemonic drawing entropy from the supplied CSPRNG.
pub fn generate_with_rng<R: RngCore + CryptoRng>(
    strength: Strength,
    rng: &mut R,
) -> Result<Mnemonic> {
    let mut entropy = Zeroizing::new([0u8; 32]);
    let len = strength.entropy_len();
    rng.try_fill_bytes(&mut entropy[..len])
        .map_err(|_| Error::CryptoError)?;
    let mnemonic = Mnemonic::from_entropy(&entropy[..len])?;
    tracing::debug!(bits = strength.bits(), words = mnemonic.word_count(), "generated mnemonic");
    Ok(mnemonic)
}

/// Check a phrase against word count, wordlist and checksum.
///
/// Returns the specific failure; see [`is_valid`] for the boolean form.
pub fn validate(phrase: &str) -> Result<()> {
    bip39::Mnemonic::parse_in(Language::English, phrase)?;
    Ok(())
}

/// Whether a phrase is a valid English BIP-39 mnemonic. Never fails.
pub fn is_valid(phrase: &str) -> bool {
    match validate(phrase) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(reason = %e, "mnemonic rejected");
            false
        }
    }
}

/// Position of a word in the English wordlist.
pub fn word_index(word: &str) -> Option<u16> {
    Language::English.find_word(word)
}
