//! Command facade over mnemonic, derivation, key and keystore operations.
//!
//! Seven named operations take primitive arguments (strings, integers, JSON
//! objects) and return either a typed [`Payload`] or one [`ErrorCode`].
//! Library [`Error`]s never cross this boundary.
//!
//! Checks run in a fixed order: argument shape ([`ErrorCode::InvalidArgs`]),
//! then structure (mnemonic, path, keystore document), then the checks that
//! need cryptographic work (key validity, password).

use core::fmt;
use core::str::FromStr;

use serde_json::Value;
use zeroize::Zeroizing;

use crate::address::ADDRESS_LEN;
use crate::error::Error;
use crate::extended_key;
use crate::hdpath::DerivationPath;
use crate::keystore::{self, Keystore, KeystoreConfig};
use crate::mnemonic::{self, Mnemonic, Strength};
use crate::private_key::{PRIVATE_KEY_LEN, PrivateKey};
use crate::public_key::{PublicKey, UNCOMPRESSED_LEN};

/// Result type for bridge operations.
pub type BridgeResult<T> = core::result::Result<T, ErrorCode>;

/// The fixed set of failure codes reported across the bridge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    /// Missing argument, wrong argument type, unsupported strength or unknown method.
    InvalidArgs = 0,
    /// Mnemonic failed word-count, wordlist or checksum validation.
    InvalidMnemonic = 1,
    /// Private key is malformed, zero or not below the curve order.
    InvalidPrivateKey = 2,
    /// Public key is not a valid SEC1 encoding.
    InvalidPublicKey = 3,
    /// Keystore document is structurally malformed.
    InvalidKeystore = 4,
    /// Keystore MAC did not match the password.
    InvalidPassword = 5,
    /// Derivation path could not be parsed or walked.
    InvalidDerivationPath = 6,
}

impl ErrorCode {
    /// All codes in numeric order.
    pub const ALL: [Self; 7] = [
        Self::InvalidArgs,
        Self::InvalidMnemonic,
        Self::InvalidPrivateKey,
        Self::InvalidPublicKey,
        Self::InvalidKeystore,
        Self::InvalidPassword,
        Self::InvalidDerivationPath,
    ];

    /// The wire integer.
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// The variant name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::InvalidArgs => "InvalidArgs",
            Self::InvalidMnemonic => "InvalidMnemonic",
            Self::InvalidPrivateKey => "InvalidPrivateKey",
            Self::InvalidPublicKey => "InvalidPublicKey",
            Self::InvalidKeystore => "InvalidKeystore",
            Self::InvalidPassword => "InvalidPassword",
            Self::InvalidDerivationPath => "InvalidDerivationPath",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

impl std::error::Error for ErrorCode {}

impl TryFrom<i32> for ErrorCode {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|code| code.code() == value)
            .ok_or(value)
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl From<Error> for ErrorCode {
    /// Context-free translation. Operations that know which input was at
    /// fault (for example bad hex in a public key) override this.
    fn from(err: Error) -> Self {
        match err {
            Error::Mnemonic(_) => Self::InvalidMnemonic,
            Error::InvalidDerivationPath(_) | Error::MaxDepthExceeded | Error::InvalidChildKey(_) => {
                Self::InvalidDerivationPath
            }
            Error::InvalidPrivateKey => Self::InvalidPrivateKey,
            Error::InvalidPublicKey => Self::InvalidPublicKey,
            Error::InvalidKeystore(_) => Self::InvalidKeystore,
            Error::InvalidPassword => Self::InvalidPassword,
            _ => Self::InvalidArgs,
        }
    }
}

/// The seven operations exposed by the bridge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    /// `generateRandomMnemonic(strength: int)`
    GenerateRandomMnemonic,
    /// `isValidMnemonic(mnemonic: string)`
    IsValidMnemonic,
    /// `decryptedByMnemonic(mnemonic: string, path: string)`
    DecryptedByMnemonic,
    /// `decryptedByKeystore(keystore: object, password: string)`
    DecryptedByKeystore,
    /// `encrypt(privateKeyHex: string, password: string)`
    Encrypt,
    /// `privateToPublic(privateKeyHex: string)`
    PrivateToPublic,
    /// `publicToAddress(publicKeyHex: string)`
    PublicToAddress,
}

impl Method {
    /// All methods.
    pub const ALL: [Self; 7] = [
        Self::GenerateRandomMnemonic,
        Self::IsValidMnemonic,
        Self::DecryptedByMnemonic,
        Self::DecryptedByKeystore,
        Self::Encrypt,
        Self::PrivateToPublic,
        Self::PublicToAddress,
    ];

    /// Wire name of the method.
    pub const fn name(self) -> &'static str {
        match self {
            Self::GenerateRandomMnemonic => "generateRandomMnemonic",
            Self::IsValidMnemonic => "isValidMnemonic",
            Self::DecryptedByMnemonic => "decryptedByMnemonic",
            Self::DecryptedByKeystore => "decryptedByKeystore",
            Self::Encrypt => "encrypt",
            Self::PrivateToPublic => "privateToPublic",
            Self::PublicToAddress => "publicToAddress",
        }
    }

    /// Number of positional arguments the method takes.
    pub const fn arity(self) -> usize {
        match self {
            Self::GenerateRandomMnemonic
            | Self::IsValidMnemonic
            | Self::PrivateToPublic
            | Self::PublicToAddress => 1,
            Self::DecryptedByMnemonic | Self::DecryptedByKeystore | Self::Encrypt => 2,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = ErrorCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.name() == s)
            .ok_or(ErrorCode::InvalidArgs)
    }
}

/// Successful result of a bridge call.
#[derive(Clone, PartialEq, Eq)]
pub enum Payload {
    /// Space-separated mnemonic phrase.
    Mnemonic(Zeroizing<String>),
    /// Mnemonic validity.
    Validity(bool),
    /// Raw 32-byte private key.
    PrivateKey(Zeroizing<[u8; PRIVATE_KEY_LEN]>),
    /// Keystore document as JSON text.
    Keystore(String),
    /// Uncompressed 65-byte public key.
    PublicKey([u8; UNCOMPRESSED_LEN]),
    /// 20-byte address.
    Address([u8; ADDRESS_LEN]),
}

impl Payload {
    /// Render as JSON. Byte payloads become lowercase hex without prefix.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Mnemonic(phrase) => Value::from(phrase.as_str()),
            Self::Validity(valid) => Value::Bool(*valid),
            Self::PrivateKey(bytes) => Value::from(hex::encode(&**bytes)),
            Self::Keystore(json) => Value::from(json.as_str()),
            Self::PublicKey(bytes) => Value::from(hex::encode(bytes)),
            Self::Address(bytes) => Value::from(hex::encode(bytes)),
        }
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mnemonic(_) => f.write_str("Mnemonic([REDACTED])"),
            Self::Validity(valid) => f.debug_tuple("Validity").field(valid).finish(),
            Self::PrivateKey(_) => f.write_str("PrivateKey([REDACTED])"),
            Self::Keystore(json) => f.debug_tuple("Keystore").field(json).finish(),
            Self::PublicKey(bytes) => write!(f, "PublicKey({})", hex::encode(bytes)),
            Self::Address(bytes) => write!(f, "Address({})", hex::encode(bytes)),
        }
    }
}

/// Entry point for the seven bridge operations.
#[derive(Clone, Debug, Default)]
pub struct Bridge {
    keystore: KeystoreConfig,
}

impl Bridge {
    /// Create a bridge that encrypts with `keystore` settings.
    pub const fn new(keystore: KeystoreConfig) -> Self {
        Self { keystore }
    }

    /// Settings used by [`Bridge::encrypt`].
    pub const fn keystore_config(&self) -> &KeystoreConfig {
        &self.keystore
    }

    /// Dispatch `method` with positional JSON arguments.
    ///
    /// Missing or mistyped arguments yield [`ErrorCode::InvalidArgs`]. Extra
    /// trailing arguments are ignored.
    pub fn handle(&self, method: Method, args: &[Value]) -> BridgeResult<Payload> {
        tracing::debug!(%method, args = args.len(), "bridge call");
        let result = match method {
            Method::GenerateRandomMnemonic => {
                let strength = int_arg(args, 0)?;
                self.generate_random_mnemonic(strength).map(Payload::Mnemonic)
            }
            Method::IsValidMnemonic => Ok(Payload::Validity(self.is_valid_mnemonic(str_arg(args, 0)?))),
            Method::DecryptedByMnemonic => self
                .decrypted_by_mnemonic(str_arg(args, 0)?, str_arg(args, 1)?)
                .map(Payload::PrivateKey),
            Method::DecryptedByKeystore => {
                let document = args
                    .first()
                    .filter(|value| value.is_object())
                    .ok_or(ErrorCode::InvalidArgs)?;
                self.decrypted_by_keystore(document, str_arg(args, 1)?)
                    .map(Payload::PrivateKey)
            }
            Method::Encrypt => self
                .encrypt(str_arg(args, 0)?, str_arg(args, 1)?)
                .map(Payload::Keystore),
            Method::PrivateToPublic => self.private_to_public(str_arg(args, 0)?).map(Payload::PublicKey),
            Method::PublicToAddress => self.public_to_address(str_arg(args, 0)?).map(Payload::Address),
        };
        if let Err(code) = &result {
            tracing::debug!(%method, %code, "bridge call failed");
        }
        result
    }

    /// Dispatch by wire method name. Unknown names yield [`ErrorCode::InvalidArgs`].
    pub fn handle_named(&self, method: &str, args: &[Value]) -> BridgeResult<Payload> {
        self.handle(method.parse()?, args)
    }

    /// Generate a fresh mnemonic. `strength` is in bits: 128, 160, 192, 224 or 256.
    pub fn generate_random_mnemonic(&self, strength: i32) -> BridgeResult<Zeroizing<String>> {
        let strength = u32::try_from(strength)
            .ok()
            .and_then(|bits| Strength::try_from(bits).ok())
            .ok_or(ErrorCode::InvalidArgs)?;
        let mnemonic = mnemonic::generate(strength).map_err(|_| ErrorCode::InvalidArgs)?;
        Ok(Zeroizing::new(mnemonic.phrase().to_owned()))
    }

    /// Whether `mnemonic` is a valid English BIP-39 phrase.
    pub fn is_valid_mnemonic(&self, mnemonic: &str) -> bool {
        mnemonic::is_valid(mnemonic)
    }

    /// Derive the private key at `path` from `mnemonic` with an empty passphrase.
    pub fn decrypted_by_mnemonic(
        &self,
        mnemonic: &str,
        path: &str,
    ) -> BridgeResult<Zeroizing<[u8; PRIVATE_KEY_LEN]>> {
        let mnemonic = Mnemonic::parse(mnemonic).map_err(|_| ErrorCode::InvalidMnemonic)?;
        let path = DerivationPath::parse(path).map_err(|_| ErrorCode::InvalidDerivationPath)?;
        let seed = mnemonic.to_seed("").map_err(|_| ErrorCode::InvalidMnemonic)?;
        let key = extended_key::derive_key(seed.as_bytes(), &path)
            .map_err(|_| ErrorCode::InvalidDerivationPath)?;
        Ok(key.to_bytes())
    }

    /// Decrypt a keystore document.
    pub fn decrypted_by_keystore(
        &self,
        document: &Value,
        password: &str,
    ) -> BridgeResult<Zeroizing<[u8; PRIVATE_KEY_LEN]>> {
        let keystore = Keystore::from_value(document).map_err(|_| ErrorCode::InvalidKeystore)?;
        let key = keystore::decrypt(&keystore, password).map_err(|err| match err {
            Error::InvalidPassword => ErrorCode::InvalidPassword,
            _ => ErrorCode::InvalidKeystore,
        })?;
        Ok(key.to_bytes())
    }

    /// Encrypt a hex private key into a keystore JSON string.
    pub fn encrypt(&self, private_key_hex: &str, password: &str) -> BridgeResult<String> {
        let key = PrivateKey::from_hex(private_key_hex).map_err(|_| ErrorCode::InvalidPrivateKey)?;
        let keystore = keystore::encrypt(&key, password, &self.keystore)
            .map_err(|_| ErrorCode::InvalidPrivateKey)?;
        Ok(keystore.to_json())
    }

    /// Uncompressed public key for a hex private key.
    pub fn private_to_public(&self, private_key_hex: &str) -> BridgeResult<[u8; UNCOMPRESSED_LEN]> {
        let key = PrivateKey::from_hex(private_key_hex).map_err(|_| ErrorCode::InvalidPrivateKey)?;
        Ok(key.public_key().to_uncompressed_bytes())
    }

    /// Address for a hex SEC1 public key, compressed or uncompressed.
    pub fn public_to_address(&self, public_key_hex: &str) -> BridgeResult<[u8; ADDRESS_LEN]> {
        let key = PublicKey::from_hex(public_key_hex).map_err(|_| ErrorCode::InvalidPublicKey)?;
        Ok(*key.to_address().as_bytes())
    }
}

fn str_arg(args: &[Value], index: usize) -> BridgeResult<&str> {
    args.get(index)
        .and_then(Value::as_str)
        .ok_or(ErrorCode::InvalidArgs)
}

fn int_arg(args: &[Value], index: usize) -> BridgeResult<i32> {
    args.get(index)
        .and_then(Value::as_i64)
        .and_then(|value| i32::try_from(value).ok())
        .ok_or(ErrorCode::InvalidArgs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
    const ETH_PATH: &str = "m/44'/60'/0'/0/0";
    const ETH_KEY: [u8; 32] =
        hex_literal::hex!("1ab42cc412b618bdea3a599e3c9bae199ebf030895b039e9db1e30dafb12b727");
    const TEST_KEY: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    fn bridge() -> Bridge {
        Bridge::new(KeystoreConfig::custom(1024, 8, 1).unwrap())
    }

    mod error_code_tests {
        use super::*;

        #[test]
        fn fixed_integers() {
            let codes: Vec<i32> = ErrorCode::ALL.iter().map(|c| c.code()).collect();
            assert_eq!(codes, [0, 1, 2, 3, 4, 5, 6]);
            assert_eq!(ErrorCode::InvalidDerivationPath as i32, 6);
        }

        #[test]
        fn try_from_i32() {
            for code in ErrorCode::ALL {
                assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
            }
            assert_eq!(ErrorCode::try_from(7), Err(7));
            assert_eq!(ErrorCode::try_from(-1), Err(-1));
        }

        #[test]
        fn translates_library_errors() {
            assert_eq!(ErrorCode::from(Error::InvalidPassword), ErrorCode::InvalidPassword);
            assert_eq!(ErrorCode::from(Error::MaxDepthExceeded), ErrorCode::InvalidDerivationPath);
            assert_eq!(
                ErrorCode::from(Error::InvalidKeystore("x".into())),
                ErrorCode::InvalidKeystore
            );
            assert_eq!(ErrorCode::from(Error::InvalidStrength(100)), ErrorCode::InvalidArgs);
            assert_eq!(ErrorCode::InvalidPassword.to_string(), "InvalidPassword (5)");
        }
    }

    mod method_tests {
        use super::*;

        #[test]
        fn names_round_trip() {
            for method in Method::ALL {
                assert_eq!(method.name().parse::<Method>(), Ok(method));
            }
            assert_eq!("signTransaction".parse::<Method>(), Err(ErrorCode::InvalidArgs));
            assert_eq!("Encrypt".parse::<Method>(), Err(ErrorCode::InvalidArgs));
        }
    }

    mod mnemonic_tests {
        use super::*;

        #[test]
        fn generates_every_strength() {
            for (bits, words) in [(128, 12), (160, 15), (192, 18), (224, 21), (256, 24)] {
                let phrase = bridge().generate_random_mnemonic(bits).unwrap();
                assert_eq!(phrase.split(' ').count(), words);
                assert!(bridge().is_valid_mnemonic(&phrase));
            }
        }

        #[test]
        fn rejects_bad_strength() {
            for bits in [0, -128, 64, 100, 129, 512] {
                assert_eq!(
                    bridge().generate_random_mnemonic(bits),
                    Err(ErrorCode::InvalidArgs),
                    "accepted {bits}"
                );
            }
        }

        #[test]
        fn validity() {
            assert!(bridge().is_valid_mnemonic(TEST_MNEMONIC));
            assert!(!bridge().is_valid_mnemonic(&TEST_MNEMONIC.replace("about", "abandon")));
            assert!(!bridge().is_valid_mnemonic("abandon abandon abandon"));
            assert!(!bridge().is_valid_mnemonic(""));
        }

        #[test]
        fn derives_known_key() {
            let key = bridge().decrypted_by_mnemonic(TEST_MNEMONIC, ETH_PATH).unwrap();
            assert_eq!(*key, ETH_KEY);

            let key = bridge().decrypted_by_mnemonic(TEST_MNEMONIC, crate::DEFAULT_PATH).unwrap();
            assert_eq!(
                *key,
                hex_literal::hex!("307f098332f41fe361243bcfb6b5605bf7c31052c3cde7a57434cd3199c7f6c0")
            );
        }

        #[test]
        fn mnemonic_checked_before_path() {
            assert_eq!(
                bridge().decrypted_by_mnemonic("not a mnemonic", ETH_PATH),
                Err(ErrorCode::InvalidMnemonic)
            );
            assert_eq!(
                bridge().decrypted_by_mnemonic("not a mnemonic", "garbage"),
                Err(ErrorCode::InvalidMnemonic)
            );
            assert_eq!(
                bridge().decrypted_by_mnemonic(TEST_MNEMONIC, "44'/60'/0'/0/0"),
                Err(ErrorCode::InvalidDerivationPath)
            );
            assert_eq!(
                bridge().decrypted_by_mnemonic(TEST_MNEMONIC, "m/44'/x/0"),
                Err(ErrorCode::InvalidDerivationPath)
            );
        }
    }

    mod key_tests {
        use super::*;

        #[test]
        fn private_to_public_is_uncompressed() {
            let public = bridge().private_to_public(TEST_KEY).unwrap();
            assert_eq!(public[0], 0x04);
            assert_eq!(public.len(), 65);
        }

        #[test]
        fn public_to_address_composes() {
            let public = bridge().private_to_public(TEST_KEY).unwrap();
            let address = bridge().public_to_address(&hex::encode(public)).unwrap();
            assert_eq!(address, hex_literal::hex!("2c7536e3605d9c16a7a3d7b1898e529396a65c23"));

            let compressed = PrivateKey::from_hex(TEST_KEY).unwrap().public_key().to_compressed_bytes();
            assert_eq!(bridge().public_to_address(&hex::encode(compressed)).unwrap(), address);
        }

        #[test]
        fn invalid_hex_maps_to_key_kind() {
            assert_eq!(bridge().private_to_public("xyz"), Err(ErrorCode::InvalidPrivateKey));
            assert_eq!(bridge().private_to_public(""), Err(ErrorCode::InvalidPrivateKey));
            assert_eq!(bridge().private_to_public(&"00".repeat(32)), Err(ErrorCode::InvalidPrivateKey));
            assert_eq!(bridge().public_to_address("xyz"), Err(ErrorCode::InvalidPublicKey));
            assert_eq!(bridge().public_to_address("04abcd"), Err(ErrorCode::InvalidPublicKey));
            assert_eq!(bridge().encrypt("xyz", "pw"), Err(ErrorCode::InvalidPrivateKey));
        }
    }

    mod keystore_tests {
        use super::*;

        #[test]
        fn encrypt_then_decrypt() {
            let json = bridge().encrypt(TEST_KEY, "secret").unwrap();
            let document: Value = serde_json::from_str(&json).unwrap();
            let key = bridge().decrypted_by_keystore(&document, "secret").unwrap();
            assert_eq!(hex::encode(*key), TEST_KEY);
        }

        #[test]
        fn wrong_password() {
            let json = bridge().encrypt(TEST_KEY, "secret").unwrap();
            let document: Value = serde_json::from_str(&json).unwrap();
            assert_eq!(
                bridge().decrypted_by_keystore(&document, "Secret"),
                Err(ErrorCode::InvalidPassword)
            );
        }

        #[test]
        fn malformed_document() {
            let json = bridge().encrypt(TEST_KEY, "secret").unwrap();
            let mut document: Value = serde_json::from_str(&json).unwrap();
            document.as_object_mut().unwrap().remove("crypto");
            assert_eq!(
                bridge().decrypted_by_keystore(&document, "secret"),
                Err(ErrorCode::InvalidKeystore)
            );
            assert_eq!(
                bridge().decrypted_by_keystore(&json!({}), "secret"),
                Err(ErrorCode::InvalidKeystore)
            );
        }
    }

    mod dispatch_tests {
        use super::*;

        #[test]
        fn routes_each_method() {
            let bridge = bridge();
            assert!(matches!(
                bridge.handle(Method::GenerateRandomMnemonic, &[json!(128)]),
                Ok(Payload::Mnemonic(_))
            ));
            assert_eq!(
                bridge.handle(Method::IsValidMnemonic, &[json!(TEST_MNEMONIC)]),
                Ok(Payload::Validity(true))
            );
            assert_eq!(
                bridge.handle(Method::DecryptedByMnemonic, &[json!(TEST_MNEMONIC), json!(ETH_PATH)]),
                Ok(Payload::PrivateKey(Zeroizing::new(ETH_KEY)))
            );

            let Ok(Payload::Keystore(json)) =
                bridge.handle(Method::Encrypt, &[json!(TEST_KEY), json!("pw")])
            else {
                panic!("encrypt failed");
            };
            let document: Value = serde_json::from_str(&json).unwrap();
            let decrypted = bridge
                .handle(Method::DecryptedByKeystore, &[document, json!("pw")])
                .unwrap();
            assert_eq!(decrypted.to_json(), json!(TEST_KEY));

            let Ok(Payload::PublicKey(public)) =
                bridge.handle(Method::PrivateToPublic, &[json!(TEST_KEY)])
            else {
                panic!("privateToPublic failed");
            };
            assert_eq!(
                bridge
                    .handle(Method::PublicToAddress, &[json!(hex::encode(public))])
                    .unwrap()
                    .to_json(),
                json!("2c7536e3605d9c16a7a3d7b1898e529396a65c23")
            );
        }

        #[test]
        fn rejects_bad_arguments() {
            let bridge = bridge();
            for (method, args) in [
                (Method::GenerateRandomMnemonic, vec![]),
                (Method::GenerateRandomMnemonic, vec![json!("128")]),
                (Method::GenerateRandomMnemonic, vec![json!(1u64 << 40)]),
                (Method::IsValidMnemonic, vec![json!(12)]),
                (Method::DecryptedByMnemonic, vec![json!(TEST_MNEMONIC)]),
                (Method::DecryptedByKeystore, vec![json!("{}"), json!("pw")]),
                (Method::DecryptedByKeystore, vec![json!({}), json!(null)]),
                (Method::Encrypt, vec![json!(TEST_KEY)]),
                (Method::PrivateToPublic, vec![json!(null)]),
                (Method::PublicToAddress, vec![json!(["04"])]),
            ] {
                assert_eq!(
                    bridge.handle(method, &args),
                    Err(ErrorCode::InvalidArgs),
                    "{method} accepted {args:?}"
                );
            }
        }

        #[test]
        fn unknown_method_name() {
            assert_eq!(
                bridge().handle_named("signTransaction", &[]),
                Err(ErrorCode::InvalidArgs)
            );
            assert_eq!(
                bridge().handle_named("isValidMnemonic", &[json!(TEST_MNEMONIC)]),
                Ok(Payload::Validity(true))
            );
        }

        #[test]
        fn payload_debug_is_redacted() {
            let payload = Payload::PrivateKey(Zeroizing::new(ETH_KEY));
            assert_eq!(format!("{payload:?}"), "PrivateKey([REDACTED])");
            let payload = Payload::Mnemonic(Zeroizing::new(TEST_MNEMONIC.to_owned()));
            assert!(!format!("{payload:?}").contains("abandon"));
        }
    }
}
