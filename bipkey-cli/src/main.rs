//! bipkey - derive, inspect and encrypt secp256k1 account keys.
//!
//! Mnemonics, BIP-44 derivation and Web3 keystores from the command line,
//! plus a raw `call` mode speaking the bridge's method/argument contract.

mod commands;

use bipkey::{Bridge, KeystoreConfig};
use clap::Parser;
use commands::{Cli, Commands};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` wins over `-v` when set.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let bridge = Bridge::new(KeystoreConfig::from(cli.kdf_level));
    tracing::debug!(kdf_level = %cli.kdf_level, "starting");

    match cli.command {
        Commands::Mnemonic(cmd) => cmd.execute()?,
        Commands::Derive(cmd) => cmd.execute()?,
        Commands::Keystore(cmd) => cmd.execute(&bridge)?,
        Commands::Key(cmd) => cmd.execute(&bridge)?,
        Commands::Call(cmd) => cmd.execute(&bridge)?,
    }
    Ok(())
}
