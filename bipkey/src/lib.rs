//! # bipkey - BIP-39/32/44 Key Derivation and Keystore Core
//!
//! Deterministic key derivation and password-encrypted key storage for
//! secp256k1 account chains such as VeChain (SLIP-44 coin type 818) and
//! Ethereum.
//!
//! ## Features
//!
//! - **Mnemonics**: BIP-39 generation, validation and seed stretching
//! - **HD derivation**: BIP-32 master and child keys along BIP-44 paths
//! - **Key algebra**: public keys, Keccak-256 addresses with EIP-55 checksums
//! - **Keystores**: Web3 Secret Storage v3 with scrypt and AES-128-CTR
//! - **Bridge**: a seven-operation facade returning typed payloads or fixed error codes
//!
//! Secrets live in zeroizing buffers and are redacted from `Debug` output.
//!
//! ```no_run
//! use bipkey::{DerivationPath, Wallet};
//!
//! let wallet = Wallet::from_mnemonic(
//!     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
//!     None,
//! )?;
//! let key = wallet.derive_key(&DerivationPath::vechain(0, 0, 0)?)?;
//! println!("{}", key.address());
//! # Ok::<(), bipkey::Error>(())
//! ```

#![warn(
    missing_docs,
    rust_2018_idioms,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::doc_markdown,
    clippy::missing_const_for_fn,
    clippy::uninlined_format_args,
    clippy::return_self_not_must_use,
    clippy::cast_possible_truncation,
    clippy::similar_names,
    clippy::unreadable_literal,
    clippy::missing_fields_in_debug
)]
#![forbid(unsafe_code)]

pub mod address;
pub mod bridge;
pub mod error;
pub mod extended_key;
pub mod hash;
pub mod hdpath;
pub mod keystore;
pub mod mnemonic;
pub mod private_key;
pub mod public_key;
pub mod types;
pub mod wallet;

pub use address::Address;
pub use bridge::{Bridge, BridgeResult, ErrorCode, Method, Payload};
pub use error::{Error, Result};
pub use extended_key::{ExtendedPrivateKey, derive_key};
pub use hdpath::{ChildIndex, DEFAULT_PATH, DerivationPath, VECHAIN_COIN_TYPE};
pub use keystore::{EncryptionLevel, Keystore, KeystoreConfig};
pub use mnemonic::{Mnemonic, Strength};
pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use types::{SecretBytes, Seed};
pub use wallet::{Wallet, seed_from_mnemonic};
