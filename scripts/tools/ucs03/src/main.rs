//! UCS03 command line tool
//!
//! Usage:
//!   ucs03 decode 0x0000...            decode an instruction to JSON
//!   ucs03 decode --packet 0x...       decode a packet
//!   ucs03 encode order.json           encode a JSON instruction
//!   ucs03 path 1 2 3                  pack channel hops into a uint256
//!   ucs03 path --decode 0x200000001   unpack a path
//!   ucs03 opcodes                     list known instructions

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};
use ucs03_config::{Ucs03Config, DEFAULT_LOG_LEVEL};

/// Handle for replacing the bootstrap filter once the config is loaded
type FilterHandle = reload::Handle<EnvFilter, Registry>;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "ucs03")]
#[command(about = "UCS03 instruction codec tool")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence,
    /// the config file's `log_level` applies when neither is set
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Enable JSON logging format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode hex bytes and print the instruction tree as JSON
    Decode {
        /// `0x`-prefixed or bare hex
        hex: String,
        /// Input is a packet rather than a bare instruction
        #[arg(long)]
        packet: bool,
        /// Keep the packet's instruction as an undecoded envelope
        #[arg(long, requires = "packet")]
        raw: bool,
    },
    /// Encode a JSON instruction (or packet) and print hex
    Encode {
        /// JSON file, or `-` for stdin
        input: String,
        /// Input is a packet rather than a bare instruction
        #[arg(long)]
        packet: bool,
    },
    /// Pack channel hops into a path, or unpack one
    Path {
        /// Channel ids in travel order
        #[arg(required_unless_present = "decode")]
        hops: Vec<u32>,
        /// Path to unpack (decimal or `0x` hex)
        #[arg(long, conflicts_with = "hops")]
        decode: Option<String>,
    },
    /// List registered (version, opcode) pairs
    Opcodes,
    /// Print the effective configuration as TOML
    Config,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter_handle = init_logging(&cli)?;
    let config = Ucs03Config::load(cli.config.as_deref())?;
    if let Some(handle) = filter_handle {
        handle.reload(EnvFilter::try_new(&config.log_level)?)?;
    }
    debug!(?config, "effective configuration");

    let output = match cli.command {
        Commands::Decode { hex, packet, raw } => {
            commands::decode(&hex, packet, raw, &config.limits)?
        }
        Commands::Encode { input, packet } => {
            let json = commands::read_input(&input)?;
            commands::encode(&json, packet)?
        }
        Commands::Path { hops, decode } => match decode {
            Some(path) => commands::unpack_path(&path)?,
            None => commands::pack_path(&hops)?,
        },
        Commands::Opcodes => commands::opcodes(),
        Commands::Config => config.to_toml()?,
    };

    println!("{output}");
    Ok(())
}

/// Install the subscriber before anything logs. The returned handle is set
/// when the level came from neither `RUST_LOG` nor `--log-level`, so the
/// config file may still choose it.
fn init_logging(cli: &Cli) -> Result<Option<FilterHandle>> {
    let (filter, pinned) = bootstrap_filter(
        cli.log_level.as_deref(),
        EnvFilter::try_from_default_env().ok(),
    )?;

    let (filter, handle) = reload::Layer::new(filter);
    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }

    Ok((!pinned).then_some(handle))
}

/// Filter used until the config is loaded, and whether it is final
fn bootstrap_filter(
    cli_level: Option<&str>,
    from_env: Option<EnvFilter>,
) -> Result<(EnvFilter, bool)> {
    let pinned = from_env.is_some() || cli_level.is_some();
    let filter = match from_env {
        Some(filter) => filter,
        None => EnvFilter::try_new(cli_level.unwrap_or(DEFAULT_LOG_LEVEL))?,
    };
    Ok((filter, pinned))
}
