//! Mnemonic CLI commands.

use bipkey::{Mnemonic, Strength, mnemonic};
use clap::{Args, Subcommand};
use colored::Colorize;

/// Mnemonic operations.
#[derive(Args)]
pub struct MnemonicCommand {
    #[command(subcommand)]
    command: MnemonicSubcommand,
}

#[derive(Subcommand)]
enum MnemonicSubcommand {
    /// Generate a new random mnemonic.
    Generate {
        /// Entropy in bits (128, 160, 192, 224 or 256).
        #[arg(short, long, default_value = "128")]
        strength: u32,
    },

    /// Check word count, wordlist membership and checksum.
    Validate {
        /// BIP39 mnemonic phrase.
        mnemonic: String,
    },
}

impl MnemonicCommand {
    /// Execute the mnemonic command.
    pub fn execute(self) -> Result<(), Box<dyn std::error::Error>> {
        match self.command {
            MnemonicSubcommand::Generate { strength } => {
                let strength = Strength::try_from(strength)?;
                let mnemonic = mnemonic::generate(strength)?;
                print_generated(&mnemonic, strength);
            }
            MnemonicSubcommand::Validate { mnemonic } => {
                mnemonic::validate(&mnemonic)?;
                let words = mnemonic.split_whitespace().count();
                println!();
                println!("      {}        {}", "Valid".cyan().bold(), "yes".green());
                println!("      {}        {words} words", "Words".cyan().bold());
                println!();
            }
        }
        Ok(())
    }
}

#[rustfmt::skip]
fn print_generated(mnemonic: &Mnemonic, strength: Strength) {
    println!();
    println!("      {}     {}", "Mnemonic".cyan().bold(), mnemonic.phrase().green());
    println!("      {}        {} words", "Words".cyan().bold(), mnemonic.word_count());
    println!("      {}     {} bits", "Strength".cyan().bold(), strength.bits());
    println!();
}
