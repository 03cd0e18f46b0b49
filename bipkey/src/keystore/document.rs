//! Web3 Secret Storage (version 3) documents.
//!
//! Parsing goes through serde wire structs and then a validation pass into
//! [`Keystore`]; every structural problem surfaces as
//! [`Error::InvalidKeystore`] before any key derivation runs.

use serde::Deserialize;
use serde_json::Value;

use super::cipher::{AES_128_CTR, IV_LEN};
use super::kdf::{Kdf, Pbkdf2Params, ScryptParams};
use crate::address::Address;
use crate::error::{Error, Result};
use crate::private_key::PRIVATE_KEY_LEN;

/// The only document version understood.
pub const KEYSTORE_VERSION: u32 = 3;

/// MAC length (Keccak-256).
pub const MAC_LEN: usize = 32;

#[derive(Deserialize)]
struct KeystoreJson {
    version: u32,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(alias = "Crypto")]
    crypto: CryptoJson,
}

#[derive(Deserialize)]
struct CryptoJson {
    cipher: String,
    ciphertext: String,
    cipherparams: CipherParamsJson,
    kdf: String,
    kdfparams: Value,
    mac: String,
}

#[derive(Deserialize)]
struct CipherParamsJson {
    iv: String,
}

#[derive(Deserialize)]
struct ScryptParamsJson {
    dklen: usize,
    n: u64,
    p: u32,
    r: u32,
    salt: String,
}

#[derive(Deserialize)]
struct Pbkdf2ParamsJson {
    c: u32,
    dklen: usize,
    prf: String,
    salt: String,
}

/// A structurally valid, still encrypted keystore.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keystore {
    pub(crate) id: Option<String>,
    pub(crate) address: Option<Address>,
    pub(crate) iv: [u8; IV_LEN],
    pub(crate) ciphertext: Vec<u8>,
    pub(crate) kdf: Kdf,
    pub(crate) mac: [u8; MAC_LEN],
}

impl Keystore {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let wire: KeystoreJson = serde_json::from_str(json).map_err(malformed)?;
        Self::from_wire(wire)
    }

    /// Validate an already-parsed JSON value.
    pub fn from_value(value: &Value) -> Result<Self> {
        let wire = KeystoreJson::deserialize(value).map_err(malformed)?;
        Self::from_wire(wire)
    }

    fn from_wire(wire: KeystoreJson) -> Result<Self> {
        if wire.version != KEYSTORE_VERSION {
            return Err(invalid(format!("unsupported version {}", wire.version)));
        }

        let crypto = wire.crypto;
        if crypto.cipher != AES_128_CTR {
            return Err(invalid(format!("unsupported cipher {:?}", crypto.cipher)));
        }
        let iv = decode_fixed::<IV_LEN>("cipherparams.iv", &crypto.cipherparams.iv)?;
        let mac = decode_fixed::<MAC_LEN>("mac", &crypto.mac)?;
        let ciphertext = decode_field("ciphertext", &crypto.ciphertext)?;
        if ciphertext.len() != PRIVATE_KEY_LEN {
            return Err(invalid(format!(
                "ciphertext must be {PRIVATE_KEY_LEN} bytes, got {}",
                ciphertext.len()
            )));
        }
        let kdf = parse_kdf(&crypto.kdf, crypto.kdfparams)?;

        let address = match wire.address.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(text) => Some(
                text.parse::<Address>()
                    .map_err(|_| invalid(format!("malformed address {text:?}")))?,
            ),
        };

        Ok(Self {
            id: wire.id,
            address,
            iv,
            ciphertext,
            kdf,
            mac,
        })
    }

    /// Document identifier, when present.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Address the document claims to hold the key for.
    pub const fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// Key derivation function and salt.
    pub const fn kdf(&self) -> &Kdf {
        &self.kdf
    }

    /// Serialize to a JSON value.
    pub fn to_value(&self) -> Value {
        let kdfparams = match &self.kdf {
            Kdf::Scrypt { params, salt } => serde_json::json!({
                "dklen": params.dklen(),
                "n": params.n(),
                "p": params.p(),
                "r": params.r(),
                "salt": hex::encode(salt),
            }),
            Kdf::Pbkdf2 { params, salt } => serde_json::json!({
                "c": params.c(),
                "dklen": params.dklen(),
                "prf": Pbkdf2Params::PRF,
                "salt": hex::encode(salt),
            }),
        };

        let mut document = serde_json::json!({
            "version": KEYSTORE_VERSION,
            "crypto": {
                "cipher": AES_128_CTR,
                "ciphertext": hex::encode(&self.ciphertext),
                "cipherparams": { "iv": hex::encode(self.iv) },
                "kdf": self.kdf.name(),
                "kdfparams": kdfparams,
                "mac": hex::encode(self.mac),
            },
        });
        if let Some(id) = &self.id {
            document["id"] = Value::from(id.as_str());
        }
        if let Some(address) = &self.address {
            document["address"] = Value::from(address.to_string());
        }
        document
    }

    /// Serialize to a compact JSON string.
    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }
}

impl core::str::FromStr for Keystore {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_json(s)
    }
}

fn parse_kdf(name: &str, params: Value) -> Result<Kdf> {
    match name {
        "scrypt" => {
            let p: ScryptParamsJson = serde_json::from_value(params).map_err(malformed)?;
            Ok(Kdf::Scrypt {
                params: ScryptParams::new(p.n, p.r, p.p, p.dklen)?,
                salt: decode_salt(&p.salt)?,
            })
        }
        "pbkdf2" => {
            let p: Pbkdf2ParamsJson = serde_json::from_value(params).map_err(malformed)?;
            if p.prf != Pbkdf2Params::PRF {
                return Err(invalid(format!("unsupported pbkdf2 prf {:?}", p.prf)));
            }
            Ok(Kdf::Pbkdf2 {
                params: Pbkdf2Params::new(p.c, p.dklen)?,
                salt: decode_salt(&p.salt)?,
            })
        }
        other => Err(invalid(format!("unsupported kdf {other:?}"))),
    }
}

fn decode_salt(text: &str) -> Result<Vec<u8>> {
    let salt = decode_field("kdfparams.salt", text)?;
    if salt.is_empty() {
        return Err(invalid("empty kdf salt".to_owned()));
    }
    Ok(salt)
}

fn decode_field(field: &str, text: &str) -> Result<Vec<u8>> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(digits).map_err(|_| invalid(format!("{field} is not valid hex")))
}

fn decode_fixed<const N: usize>(field: &str, text: &str) -> Result<[u8; N]> {
    let bytes = decode_field(field, text)?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| invalid(format!("{field} must be {N} bytes, got {}", bytes.len())))
}

fn malformed(err: serde_json::Error) -> Error {
    invalid(err.to_string())
}

fn invalid(reason: String) -> Error {
    Error::InvalidKeystore(reason)
}

/// Web3 Secret Storage test vector; the password is `testpassword`.
#[cfg(test)]
pub(super) const PBKDF2_DOCUMENT: &str = r#"{
    "crypto": {
        "cipher": "aes-128-ctr",
        "cipherparams": { "iv": "6087dab2f9fdbbfaddc31a909735c1e6" },
        "ciphertext": "5318b4d5bcd28de64ee5559e671353e16f075ecae9f99c7a79a38af5f869aa46",
        "kdf": "pbkdf2",
        "kdfparams": {
            "c": 262144,
            "dklen": 32,
            "prf": "hmac-sha256",
            "salt": "ae3cd4e7013836a3df6bd7241b12db061dbe2c6785853cce422d148a624ce0bd"
        },
        "mac": "517ead924a9d0dc3124507e3393d175ce3ff7c1e96529c6c555ce9e51205e9b2"
    },
    "id": "3198bc9c-6672-5ab3-d995-4942343ae5b6",
    "version": 3
}"#;
