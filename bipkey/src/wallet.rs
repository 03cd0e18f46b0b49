//! Mnemonic-backed HD wallet.

use crate::Error;
use crate::extended_key;
use crate::hdpath::DerivationPath;
use crate::mnemonic::{self, Mnemonic, Strength};
use crate::private_key::PrivateKey;
use crate::types::Seed;

/// An HD wallet: a validated mnemonic and the seed stretched from it.
///
/// The same mnemonic with a different passphrase produces an unrelated seed,
/// and so an unrelated key tree.
#[derive(Debug)]
pub struct Wallet {
    /// BIP39 mnemonic phrase.
    mnemonic: Mnemonic,
    /// Seed derived from mnemonic + passphrase.
    seed: Seed,
    /// Whether a non-empty passphrase was used.
    has_passphrase: bool,
}

impl Wallet {
    /// Generate a new wallet with a random mnemonic.
    ///
    /// # Arguments
    ///
    /// * `strength` - Entropy size, which fixes the word count
    /// * `passphrase` - Optional BIP39 passphrase
    pub fn generate(strength: Strength, passphrase: Option<&str>) -> Result<Self, Error> {
        let mnemonic = mnemonic::generate(strength)?;
        Self::from_parsed(mnemonic, passphrase)
    }

    /// Create a wallet from raw entropy bytes.
    pub fn from_entropy(entropy: &[u8], passphrase: Option<&str>) -> Result<Self, Error> {
        let mnemonic = Mnemonic::from_entropy(entropy)?;
        Self::from_parsed(mnemonic, passphrase)
    }

    /// Create a wallet from an existing mnemonic phrase.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Mnemonic`] if the phrase fails word-count, wordlist or
    /// checksum validation. No seed is computed in that case.
    pub fn from_mnemonic(phrase: &str, passphrase: Option<&str>) -> Result<Self, Error> {
        let mnemonic = Mnemonic::parse(phrase)?;
        Self::from_parsed(mnemonic, passphrase)
    }

    fn from_parsed(mnemonic: Mnemonic, passphrase: Option<&str>) -> Result<Self, Error> {
        let passphrase = passphrase.unwrap_or("");
        let seed = mnemonic.to_seed(passphrase)?;
        Ok(Self {
            mnemonic,
            seed,
            has_passphrase: !passphrase.is_empty(),
        })
    }

    /// Get the mnemonic phrase.
    ///
    /// **Security Warning**: Handle this value carefully as it can
    /// reconstruct all derived keys.
    #[inline]
    pub fn mnemonic(&self) -> &str {
        self.mnemonic.phrase()
    }

    /// Get the seed bytes for key derivation.
    #[inline]
    pub fn seed(&self) -> &[u8; 64] {
        self.seed.as_bytes()
    }

    /// Check if a passphrase was used to derive the seed.
    pub const fn has_passphrase(&self) -> bool {
        self.has_passphrase
    }

    /// Get the word count of the mnemonic.
    #[inline]
    pub const fn word_count(&self) -> usize {
        self.mnemonic.word_count()
    }

    /// Derive the private key at `path`.
    pub fn derive_key(&self, path: &DerivationPath) -> Result<PrivateKey, Error> {
        extended_key::derive_key(self.seed.as_bytes(), path)
    }
}

/// Stretch a mnemonic and passphrase into a 64-byte seed.
///
/// Fails with [`Error::Mnemonic`] unless the phrase is a valid mnemonic.
pub fn seed_from_mnemonic(phrase: &str, passphrase: &str) -> Result<Seed, Error> {
    Mnemonic::parse(phrase)?.to_seed(passphrase)
}
