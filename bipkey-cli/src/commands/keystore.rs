//! Keystore CLI commands.

use std::path::PathBuf;

use bipkey::Bridge;
use clap::{Args, Subcommand};
use colored::Colorize;
use zeroize::Zeroizing;

/// Web3 keystore operations.
#[derive(Args)]
pub struct KeystoreCommand {
    #[command(subcommand)]
    command: KeystoreSubcommand,
}

#[derive(Subcommand)]
enum KeystoreSubcommand {
    /// Encrypt a private key into a keystore document.
    Encrypt {
        /// Private key in hex format (with or without 0x prefix).
        #[arg(short, long)]
        key: String,

        /// Encryption password.
        #[arg(short, long, env = "BIPKEY_PASSWORD", hide_env_values = true)]
        password: String,

        /// Write the document here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decrypt a keystore document and print its private key.
    Decrypt {
        /// Keystore JSON file.
        file: PathBuf,

        /// Decryption password.
        #[arg(short, long, env = "BIPKEY_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

impl KeystoreCommand {
    /// Execute the keystore command.
    pub fn execute(self, bridge: &Bridge) -> Result<(), Box<dyn std::error::Error>> {
        match self.command {
            KeystoreSubcommand::Encrypt { key, password, output } => {
                let key = Zeroizing::new(key);
                let password = Zeroizing::new(password);
                let json = bridge.encrypt(&key, &password)?;
                match output {
                    Some(path) => {
                        std::fs::write(&path, &json)?;
                        tracing::info!(path = %path.display(), "wrote keystore");
                        println!();
                        println!("      {}         {}", "File".cyan().bold(), path.display().to_string().green());
                        println!("      {}          {}", "KDF".cyan().bold(), describe_kdf(bridge).dimmed());
                        println!();
                    }
                    None => println!("{json}"),
                }
            }
            KeystoreSubcommand::Decrypt { file, password } => {
                let password = Zeroizing::new(password);
                let text = std::fs::read_to_string(&file)?;
                let document: serde_json::Value = serde_json::from_str(&text)?;
                let key = bridge.decrypted_by_keystore(&document, &password)?;
                let key = bipkey::PrivateKey::from_bytes(&*key)?;

                println!();
                println!("      {}      {}", "Address".cyan().bold(), key.address().to_string().green());
                println!("      {}  0x{}", "Private Key".cyan().bold(), key.to_hex().as_str());
                println!();
            }
        }
        Ok(())
    }
}

fn describe_kdf(bridge: &Bridge) -> String {
    let params = bridge.keystore_config().scrypt();
    format!("scrypt n={} r={} p={}", params.n(), params.r(), params.p())
}
