//! CLI command definitions and handlers.

mod call;
mod derive;
mod key;
mod keystore;
mod mnemonic;

use bipkey::EncryptionLevel;
pub use call::CallCommand;
use clap::{Parser, Subcommand};
pub use derive::DeriveCommand;
pub use key::KeyCommand;
pub use keystore::KeystoreCommand;
pub use mnemonic::MnemonicCommand;

/// bipkey - BIP-39/32/44 key derivation and keystore tool.
#[derive(Parser)]
#[command(name = "bipkey")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Scrypt cost for new keystores (light or standard).
    #[arg(long, global = true, env = "BIPKEY_KDF_LEVEL", default_value = "light")]
    pub kdf_level: EncryptionLevel,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Generate and validate BIP-39 mnemonics.
    #[command(name = "mnemonic", alias = "mn")]
    Mnemonic(MnemonicCommand),

    /// Derive a private key and address from a mnemonic.
    Derive(DeriveCommand),

    /// Encrypt and decrypt Web3 keystore files.
    #[command(name = "keystore", alias = "ks")]
    Keystore(KeystoreCommand),

    /// Public key and address conversions.
    Key(KeyCommand),

    /// Invoke a bridge method with JSON arguments.
    Call(CallCommand),
}
