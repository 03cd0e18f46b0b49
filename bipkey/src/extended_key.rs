//! BIP-32 hierarchical deterministic key derivation over secp256k1.

use hmac::{Hmac, Mac};
use k256::elliptic_curve::PrimeField;
use k256::{FieldBytes, Scalar, SecretKey};
use sha2::Sha512;
use zeroize::{Zeroize, Zeroizing};

use crate::error::{Error, Result};
use crate::hash::fingerprint;
use crate::hdpath::{ChildIndex, DerivationPath};
use crate::private_key::PrivateKey;
use crate::public_key::PublicKey;

type HmacSha512 = Hmac<Sha512>;

/// HMAC key for master key generation.
const MASTER_KEY_SALT: &[u8] = b"Bitcoin seed";

/// BIP-32 extended private key: a private key paired with a chain code.
///
/// Keys are automatically zeroized on drop.
#[derive(Clone)]
pub struct ExtendedPrivateKey {
    /// The underlying private key
    private_key: PrivateKey,
    /// Chain code for key derivation
    chain_code: [u8; 32],
    /// Depth in the derivation tree (0 for master)
    depth: u8,
    /// Parent key fingerprint (first 4 bytes of RIPEMD-160(SHA-256) of the parent public key)
    parent_fingerprint: [u8; 4],
    /// Child index that produced this key
    child_index: u32,
}

impl Drop for ExtendedPrivateKey {
    fn drop(&mut self) {
        self.chain_code.zeroize();
    }
}

impl ExtendedPrivateKey {
    /// Compute the master key from a seed.
    ///
    /// `I = HMAC-SHA512(key = "Bitcoin seed", data = seed)`; the left half is
    /// the master private key and the right half the chain code.
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        if seed.len() < 16 || seed.len() > 64 {
            return Err(Error::InvalidSeedLength(seed.len()));
        }

        let mut mac = HmacSha512::new_from_slice(MASTER_KEY_SALT).map_err(|_| Error::CryptoError)?;
        mac.update(seed);
        let mut result = Zeroizing::new([0u8; 64]);
        result.copy_from_slice(&mac.finalize().into_bytes());

        // First 32 bytes are the private key, last 32 are the chain code
        let private_key = PrivateKey::from_bytes(&result[..32])?;

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&result[32..]);

        Ok(Self {
            private_key,
            chain_code,
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_index: 0,
        })
    }

    /// Derive the child at `index`.
    ///
    /// Hardened: `HMAC-SHA512(c_par, 0x00 || k_par || i)`.
    /// Normal: `HMAC-SHA512(c_par, serP(K_par) || i)`.
    /// The child key is `parse256(IL) + k_par (mod n)`; an `IL >= n` or a zero
    /// child is reported as [`Error::InvalidChildKey`].
    pub fn derive_child(&self, index: ChildIndex) -> Result<Self> {
        if self.depth == u8::MAX {
            return Err(Error::MaxDepthExceeded);
        }

        let child_index = index.to_u32();
        let parent_public = self.private_key.public_key();

        let mut mac = HmacSha512::new_from_slice(&self.chain_code).map_err(|_| Error::CryptoError)?;
        if index.is_hardened() {
            mac.update(&[0u8]);
            mac.update(&*self.private_key.to_bytes());
        } else {
            mac.update(&parent_public.to_compressed_bytes());
        }
        mac.update(&child_index.to_be_bytes());
        let mut result = Zeroizing::new([0u8; 64]);
        result.copy_from_slice(&mac.finalize().into_bytes());

        let (il, ir) = result.split_at(32);

        let tweak: Option<Scalar> = Scalar::from_repr(FieldBytes::clone_from_slice(il)).into();
        let tweak = tweak.ok_or(Error::InvalidChildKey(child_index))?;
        let parent_scalar = *self.private_key.as_secret_key().to_nonzero_scalar();
        let child_scalar = tweak + parent_scalar;

        let child_secret = SecretKey::from_bytes(&child_scalar.to_bytes())
            .map_err(|_| Error::InvalidChildKey(child_index))?;

        let parent_fingerprint = fingerprint(&parent_public.to_compressed_bytes());

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(ir);

        Ok(Self {
            private_key: PrivateKey::from_secret_key(child_secret),
            chain_code,
            depth: self.depth + 1,
            parent_fingerprint,
            child_index,
        })
    }

    /// Walk every component of `path` in order starting from this key.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self> {
        path.indices()
            .iter()
            .try_fold(self.clone(), |key, index| key.derive_child(*index))
    }

    /// Get a reference to the underlying private key.
    #[inline]
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// Get the corresponding public key.
    #[inline]
    pub fn public_key(&self) -> PublicKey {
        self.private_key.public_key()
    }

    /// Get a reference to the chain code.
    #[inline]
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// Get the depth in the derivation tree.
    #[inline]
    pub const fn depth(&self) -> u8 {
        self.depth
    }

    /// Get the parent fingerprint.
    #[inline]
    pub const fn parent_fingerprint(&self) -> &[u8; 4] {
        &self.parent_fingerprint
    }

    /// Get the child index.
    #[inline]
    pub const fn child_index(&self) -> u32 {
        self.child_index
    }
}

impl core::fmt::Debug for ExtendedPrivateKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ExtendedPrivateKey")
            .field("depth", &self.depth)
            .field("child_index", &self.child_index)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// Derive the private key at `path` from a BIP-39 seed.
///
/// Deterministic: the same seed and path always give the same key.
pub fn derive_key(seed: &[u8], path: &DerivationPath) -> Result<PrivateKey> {
    tracing::debug!(%path, "deriving private key");
    let master = ExtendedPrivateKey::from_seed(seed)?;
    let derived = master.derive_path(path)?;
    Ok(derived.private_key().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    // BIP-32 test vector 1
    const TEST_SEED_1: &[u8] = &hex_literal::hex!("000102030405060708090a0b0c0d0e0f");

    fn derive(path: &str) -> ExtendedPrivateKey {
        ExtendedPrivateKey::from_seed(TEST_SEED_1)
            .unwrap()
            .derive_path(&path.parse().unwrap())
            .unwrap()
    }

    mod vector_1 {
        use super::*;

        #[test]
        fn master() {
            let master = ExtendedPrivateKey::from_seed(TEST_SEED_1).unwrap();
            assert_eq!(master.depth(), 0);
            assert_eq!(
                *master.private_key().to_bytes(),
                hex_literal::hex!("e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35")
            );
            assert_eq!(
                master.chain_code(),
                &hex_literal::hex!("873dff81c02f525623fd1fe5167eac3a55a049de3d314bb42ee227ffed37d508")
            );
        }

        #[test]
        fn hardened_child() {
            let key = derive("m/0'");
            assert_eq!(key.depth(), 1);
            assert_eq!(key.child_index(), 0x8000_0000);
            assert_eq!(key.parent_fingerprint(), &hex_literal::hex!("3442193e"));
            assert_eq!(
                *key.private_key().to_bytes(),
                hex_literal::hex!("edb2e14f9ee77d26dd93b4ecede8d16ed408ce149b6cd80b0715a2d911a0afea")
            );
            assert_eq!(
                key.chain_code(),
                &hex_literal::hex!("47fdacbd0f1097043b78c63c20c34ef4ed9a111d980047ad16282c7ae6236141")
            );
        }

        #[test]
        fn normal_child() {
            let key = derive("m/0'/1");
            assert_eq!(
                *key.private_key().to_bytes(),
                hex_literal::hex!("3c6cb8d0f6a264c91ea8b5030fadaa8e538b020f0a387421a12de9319dc93368")
            );
        }

        #[test]
        fn deep_path() {
            assert_eq!(
                *derive("m/0'/1/2'").private_key().to_bytes(),
                hex_literal::hex!("cbce0d719ecf7431d88e6a89fa1483e02e35092af60c042b1df2ff59fa424dca")
            );
            assert_eq!(
                *derive("m/0'/1/2'/2").private_key().to_bytes(),
                hex_literal::hex!("0f479245fb19a38a1954c5c7c0ebab2f9bdfd96a17563ef28a6a4b1a2a764ef4")
            );
            let last = derive("m/0'/1/2'/2/1000000000");
            assert_eq!(last.depth(), 5);
            assert_eq!(
                *last.private_key().to_bytes(),
                hex_literal::hex!("471b76e389e528d6de6d816857e012c5455051cad6660850e58372a6c3e6e7c8")
            );
        }
    }

    #[test]
    fn step_by_step_matches_path() {
        let master = ExtendedPrivateKey::from_seed(TEST_SEED_1).unwrap();
        let stepped = master
            .derive_child(ChildIndex::Hardened(0))
            .and_then(|k| k.derive_child(ChildIndex::Normal(1)))
            .unwrap();
        assert_eq!(stepped.private_key(), derive("m/0'/1").private_key());
    }

    #[test]
    fn master_path_returns_master_key() {
        let master = ExtendedPrivateKey::from_seed(TEST_SEED_1).unwrap();
        assert_eq!(derive("m").private_key(), master.private_key());
    }

    #[test]
    fn hardened_and_normal_siblings_differ() {
        assert_ne!(derive("m/0'").private_key(), derive("m/0").private_key());
    }

    #[test]
    fn rejects_bad_seed_lengths() {
        assert!(matches!(
            ExtendedPrivateKey::from_seed(&[0u8; 15]),
            Err(Error::InvalidSeedLength(15))
        ));
        assert!(matches!(
            ExtendedPrivateKey::from_seed(&[0u8; 65]),
            Err(Error::InvalidSeedLength(65))
        ));
    }

    #[test]
    fn derive_key_is_deterministic() {
        let path: DerivationPath = "m/44'/818'/0'/0/0".parse().unwrap();
        let a = derive_key(TEST_SEED_1, &path).unwrap();
        let b = derive_key(TEST_SEED_1, &path).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn debug_is_redacted() {
        let master = ExtendedPrivateKey::from_seed(TEST_SEED_1).unwrap();
        assert!(format!("{master:?}").contains("[REDACTED]"));
    }
}
