//! AES-128-CTR keystream for keystore ciphertext.

use aes::Aes128;
use ctr::cipher::{KeyIvInit, StreamCipher};

use crate::error::{Error, Result};

type Aes128Ctr = ctr::Ctr128BE<Aes128>;

/// Identifier written to the `cipher` field.
pub const AES_128_CTR: &str = "aes-128-ctr";

/// IV length for AES-128-CTR.
pub const IV_LEN: usize = 16;

/// Encrypt or decrypt `data` in place. CTR mode is its own inverse.
pub(crate) fn apply_keystream(key: &[u8], iv: &[u8; IV_LEN], data: &mut [u8]) -> Result<()> {
    let mut cipher = Aes128Ctr::new_from_slices(key, iv).map_err(|_| Error::CryptoError)?;
    cipher.apply_keystream(data);
    Ok(())
}
