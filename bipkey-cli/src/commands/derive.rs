//! Key derivation CLI command.

use bipkey::{DEFAULT_PATH, DerivationPath, Wallet};
use clap::Args;
use colored::Colorize;

/// Derive keys along a BIP-32 path.
#[derive(Args)]
pub struct DeriveCommand {
    /// BIP39 mnemonic phrase.
    #[arg(short, long, env = "BIPKEY_MNEMONIC", hide_env_values = true)]
    mnemonic: String,

    /// BIP39 passphrase (optional extra security).
    #[arg(short, long)]
    passphrase: Option<String>,

    /// Derivation path, e.g. m/44'/818'/0'/0/0.
    #[arg(long, default_value = DEFAULT_PATH)]
    path: DerivationPath,

    /// Number of consecutive addresses to derive from the last path index.
    #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    count: u32,
}

impl DeriveCommand {
    /// Execute the derive command.
    pub fn execute(self) -> Result<(), Box<dyn std::error::Error>> {
        let wallet = Wallet::from_mnemonic(&self.mnemonic, self.passphrase.as_deref())?;
        let paths = consecutive_paths(&self.path, self.count)?;

        println!();
        if wallet.has_passphrase() {
            println!("      {}   {}", "Passphrase".cyan().bold(), "(set)".dimmed());
            println!();
        }
        for (i, path) in paths.iter().enumerate() {
            let key = wallet.derive_key(path)?;
            print_key(path, &key);
            if i + 1 < paths.len() {
                println!();
            }
        }
        println!();
        Ok(())
    }
}

/// `count` paths starting at `base`, incrementing its last index.
///
/// The master path has no index to increment and is returned once.
fn consecutive_paths(base: &DerivationPath, count: u32) -> Result<Vec<DerivationPath>, bipkey::Error> {
    let Some((last, parent)) = base.indices().split_last() else {
        return Ok(vec![base.clone()]);
    };
    (0..count)
        .map(|offset| {
            let child = last.checked_add(offset)?;
            Ok(DerivationPath::new(parent.to_vec()).child(child))
        })
        .collect()
}

#[rustfmt::skip]
fn print_key(path: &DerivationPath, key: &bipkey::PrivateKey) {
    let public_key = key.public_key();
    println!("      {}         {}", "Path".cyan().bold(), path);
    println!("      {}      {}", "Address".cyan().bold(), key.address().to_string().green());
    println!("      {}  0x{}", "Private Key".cyan().bold(), key.to_hex().as_str());
    println!("      {}   0x{}", "Public Key".cyan().bold(), hex::encode(public_key.to_compressed_bytes()).dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(paths: &[DerivationPath]) -> Vec<String> {
        paths.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn increments_normal_last_index() {
        let base: DerivationPath = "m/44'/818'/0'/0/7".parse().unwrap();
        let paths = consecutive_paths(&base, 3).unwrap();
        assert_eq!(texts(&paths), ["m/44'/818'/0'/0/7", "m/44'/818'/0'/0/8", "m/44'/818'/0'/0/9"]);
    }

    #[test]
    fn keeps_hardened_last_index() {
        let base: DerivationPath = "m/44'/818'/0'".parse().unwrap();
        let paths = consecutive_paths(&base, 2).unwrap();
        assert_eq!(texts(&paths), ["m/44'/818'/0'", "m/44'/818'/1'"]);
    }

    #[test]
    fn master_path_yields_itself() {
        let paths = consecutive_paths(&DerivationPath::master(), 5).unwrap();
        assert_eq!(texts(&paths), ["m"]);
    }

    #[test]
    fn rejects_index_overflow() {
        let last: DerivationPath = "m/0/2147483647".parse().unwrap();
        assert_eq!(consecutive_paths(&last, 1).unwrap().len(), 1);
        assert!(matches!(
            consecutive_paths(&last, 2),
            Err(bipkey::Error::InvalidDerivationPath(_))
        ));

        let hardened: DerivationPath = "m/2147483647'".parse().unwrap();
        assert!(consecutive_paths(&hardened, 2).is_err());
    }

    #[test]
    fn count_must_be_positive() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            derive: DeriveCommand,
        }

        let mnemonic = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
        assert!(Wrapper::try_parse_from(["bipkey", "--mnemonic", mnemonic, "--count", "0"]).is_err());
        let parsed = Wrapper::try_parse_from(["bipkey", "--mnemonic", mnemonic, "--count", "2"]).unwrap();
        assert_eq!(parsed.derive.count, 2);
    }
}
