//! Password key derivation for keystore documents.

use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Largest scrypt working set accepted from a document (`128 * r * n` bytes).
pub const MAX_SCRYPT_MEMORY: u64 = 1 << 30;

/// Largest total scrypt work accepted from a document (`128 * r * n * p` bytes mixed).
pub const MAX_SCRYPT_WORK: u64 = 1 << 31;

/// Largest PBKDF2 iteration count accepted from a document.
pub const MAX_PBKDF2_ROUNDS: u32 = 10_000_000;

/// Derived key length range; the first 32 bytes are split into cipher and MAC keys.
const MIN_DKLEN: usize = 32;
const MAX_DKLEN: usize = 64;

/// Validated scrypt cost parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScryptParams {
    log_n: u8,
    r: u32,
    p: u32,
    dklen: usize,
}

impl ScryptParams {
    /// Cost used by mobile wallets: n = 4096, r = 8, p = 6.
    pub const LIGHT: Self = Self {
        log_n: 12,
        r: 8,
        p: 6,
        dklen: 32,
    };

    /// Cost recommended for desktop use: n = 262144, r = 8, p = 1.
    pub const STANDARD: Self = Self {
        log_n: 18,
        r: 8,
        p: 1,
        dklen: 32,
    };

    /// Validate scrypt parameters.
    ///
    /// `n` must be a power of two greater than one, `r` and `p` positive,
    /// `dklen` between 32 and 64, the working set `128 * r * n` no larger
    /// than [`MAX_SCRYPT_MEMORY`] and the total work `128 * r * n * p` no
    /// larger than [`MAX_SCRYPT_WORK`].
    pub fn new(n: u64, r: u32, p: u32, dklen: usize) -> Result<Self> {
        if n < 2 || !n.is_power_of_two() {
            return Err(invalid(format!("scrypt n must be a power of two above 1, got {n}")));
        }
        if r == 0 || p == 0 {
            return Err(invalid(format!("scrypt r and p must be positive, got r={r} p={p}")));
        }
        check_dklen(dklen)?;
        let Some(memory) = 128u64
            .checked_mul(u64::from(r))
            .and_then(|m| m.checked_mul(n))
            .filter(|m| *m <= MAX_SCRYPT_MEMORY)
        else {
            return Err(invalid(format!("scrypt cost n={n} r={r} exceeds memory limit")));
        };
        if memory.checked_mul(u64::from(p)).is_none_or(|work| work > MAX_SCRYPT_WORK) {
            return Err(invalid(format!("scrypt cost n={n} r={r} p={p} exceeds work limit")));
        }

        let params = Self {
            log_n: n.trailing_zeros() as u8,
            r,
            p,
            dklen,
        };
        // Let the scrypt crate apply its own bounds (e.g. p * r < 2^30).
        params.to_scrypt()?;
        Ok(params)
    }

    /// CPU/memory cost `n`.
    pub const fn n(&self) -> u64 {
        1u64 << self.log_n
    }

    /// Block size `r`.
    pub const fn r(&self) -> u32 {
        self.r
    }

    /// Parallelism `p`.
    pub const fn p(&self) -> u32 {
        self.p
    }

    /// Derived key length in bytes.
    pub const fn dklen(&self) -> usize {
        self.dklen
    }

    fn to_scrypt(self) -> Result<scrypt::Params> {
        scrypt::Params::new(self.log_n, self.r, self.p, self.dklen)
            .map_err(|e| invalid(format!("scrypt parameters rejected: {e}")))
    }
}

/// Validated PBKDF2-HMAC-SHA256 parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pbkdf2Params {
    c: u32,
    dklen: usize,
}

impl Pbkdf2Params {
    /// The only pseudo-random function accepted.
    pub const PRF: &'static str = "hmac-sha256";

    /// Validate an iteration count and derived key length.
    pub fn new(c: u32, dklen: usize) -> Result<Self> {
        if c == 0 || c > MAX_PBKDF2_ROUNDS {
            return Err(invalid(format!(
                "pbkdf2 iteration count must be in 1..={MAX_PBKDF2_ROUNDS}, got {c}"
            )));
        }
        check_dklen(dklen)?;
        Ok(Self { c, dklen })
    }

    /// Iteration count.
    pub const fn c(&self) -> u32 {
        self.c
    }

    /// Derived key length in bytes.
    pub const fn dklen(&self) -> usize {
        self.dklen
    }
}

/// A key derivation function together with its salt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Kdf {
    /// `"scrypt"`
    Scrypt {
        /// Cost parameters.
        params: ScryptParams,
        /// Salt bytes.
        salt: Vec<u8>,
    },
    /// `"pbkdf2"` with HMAC-SHA256
    Pbkdf2 {
        /// Cost parameters.
        params: Pbkdf2Params,
        /// Salt bytes.
        salt: Vec<u8>,
    },
}

impl Kdf {
    /// Identifier written to the `kdf` field.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Scrypt { .. } => "scrypt",
            Self::Pbkdf2 { .. } => "pbkdf2",
        }
    }

    /// Salt bytes.
    pub fn salt(&self) -> &[u8] {
        match self {
            Self::Scrypt { salt, .. } | Self::Pbkdf2 { salt, .. } => salt,
        }
    }

    /// Stretch `password` into `dklen` key bytes.
    pub fn derive_key(&self, password: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        match self {
            Self::Scrypt { params, salt } => {
                tracing::debug!(n = params.n(), r = params.r(), p = params.p(), "running scrypt");
                let mut key = Zeroizing::new(vec![0u8; params.dklen]);
                scrypt::scrypt(password, salt, &params.to_scrypt()?, &mut key)
                    .map_err(|_| Error::CryptoError)?;
                Ok(key)
            }
            Self::Pbkdf2 { params, salt } => {
                tracing::debug!(c = params.c, "running pbkdf2");
                let mut key = Zeroizing::new(vec![0u8; params.dklen]);
                pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, params.c, &mut key);
                Ok(key)
            }
        }
    }
}

fn check_dklen(dklen: usize) -> Result<()> {
    if (MIN_DKLEN..=MAX_DKLEN).contains(&dklen) {
        Ok(())
    } else {
        Err(invalid(format!("dklen must be in {MIN_DKLEN}..={MAX_DKLEN}, got {dklen}")))
    }
}

fn invalid(reason: String) -> Error {
    Error::InvalidKeystore(reason)
}
