//! Key conversion CLI commands.

use bipkey::{Address, Bridge, PrivateKey};
use clap::{Args, Subcommand};
use colored::Colorize;
use zeroize::Zeroizing;

/// Public key and address conversions.
#[derive(Args)]
pub struct KeyCommand {
    #[command(subcommand)]
    command: KeySubcommand,
}

#[derive(Subcommand)]
enum KeySubcommand {
    /// Public key for a private key.
    Public {
        /// Private key in hex format (with or without 0x prefix).
        #[arg(short, long)]
        key: String,

        /// Print the 33-byte compressed form instead of 65 bytes.
        #[arg(short, long)]
        compressed: bool,
    },

    /// Address for a SEC1 public key (compressed or uncompressed).
    Address {
        /// Public key in hex format.
        #[arg(short, long)]
        public_key: String,
    },
}

impl KeyCommand {
    /// Execute the key command.
    pub fn execute(self, bridge: &Bridge) -> Result<(), Box<dyn std::error::Error>> {
        match self.command {
            KeySubcommand::Public { key, compressed } => {
                let key = Zeroizing::new(key);
                let public_key = if compressed {
                    PrivateKey::from_hex(&key)?.public_key().to_sec1_bytes(true)
                } else {
                    bridge.private_to_public(&key)?.to_vec()
                };
                println!();
                println!("      {}   0x{}", "Public Key".cyan().bold(), hex::encode(public_key).green());
                println!();
            }
            KeySubcommand::Address { public_key } => {
                let address = Address::from_bytes(bridge.public_to_address(&public_key)?);
                println!();
                println!("      {}      {}", "Address".cyan().bold(), address.to_string().green());
                println!("      {}    {}", "Lowercase".cyan().bold(), address.to_hex().dimmed());
                println!();
            }
        }
        Ok(())
    }
}
