//! Digests used for addresses, key fingerprints and the keystore MAC.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use sha3::Keccak256;

/// Keccak-256 (the pre-standard SHA-3 padding Ethereum and VeChain use).
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    keccak256_concat(&[data])
}

/// Keccak-256 over `parts` read back to back.
pub fn keccak256_concat(parts: &[&[u8]]) -> [u8; 32] {
    parts
        .iter()
        .fold(Keccak256::new(), |hasher, part| hasher.chain_update(part))
        .finalize()
        .into()
}

/// BIP-32 key fingerprint: the first four bytes of RIPEMD-160(SHA-256(key)).
pub(crate) fn fingerprint(compressed_public_key: &[u8]) -> [u8; 4] {
    let digest = Ripemd160::digest(Sha256::digest(compressed_public_key));
    let mut out = [0u8; 4];
    out.copy_from_slice(&digest[..4]);
    out
}
