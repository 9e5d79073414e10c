//! ChessPerm - hide a message in an image, keyed by a chess game or password.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use chessperm::{Engine, EngineConfig, EngineError, ErrorKind};

mod commands;

use commands::{CanonicalizeArgs, CapacityArgs, DecryptArgs, EncryptArgs};

/// ChessPerm - hide a message in an image, keyed by a chess game or password
///
/// Encryption writes a stego PNG and a private-key file. The receiver needs
/// both, plus the same game or password, to recover the message.
#[derive(Parser)]
#[command(name = "chessperm")]
#[command(version)]
#[command(about = "Hide messages in images, keyed by a chess game or password")]
struct Cli {
    /// JSON engine config (password policy, Argon2 cost, carrier size)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a message into a stego image
    Encrypt(EncryptArgs),

    /// Recover a message from a stego image
    Decrypt(DecryptArgs),

    /// Show how many message bytes a carrier can hold
    Capacity(CapacityArgs),

    /// Print the canonical move list of a game, one ply per line
    Canonicalize(CanonicalizeArgs),
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let engine = Engine::new(config);

    match cli.command {
        Commands::Encrypt(args) => commands::encrypt(&engine, &mut rand::rngs::OsRng, args),
        Commands::Decrypt(args) => commands::decrypt(&engine, args),
        Commands::Capacity(args) => commands::capacity(&engine, args),
        Commands::Canonicalize(args) => commands::canonicalize(args),
    }
}

/// The pipeline error kind behind `err`, or `InvalidInput` for CLI-level
/// failures such as unreadable files.
fn error_kind(err: &anyhow::Error) -> ErrorKind {
    err.chain()
        .find_map(|e| e.downcast_ref::<EngineError>())
        .map(EngineError::kind)
        .unwrap_or(ErrorKind::InvalidInput)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {err:#}", error_kind(&err));
            ExitCode::FAILURE
        }
    }
}
