// CLI tool for launching Token-2022 tokens
//
// Creates a mint with embedded metadata, the issuer's holding account and
// (optionally) the initial supply, or just reports the account size and rent.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::utils::resolve_config;

#[derive(Parser)]
#[command(name = "token-launch")]
#[command(about = "Launch Token-2022 mints with embedded metadata", long_about = None)]
#[command(version)]
struct Cli {
    /// Cluster moniker (localnet, devnet, mainnet) or RPC URL
    #[arg(long, short = 'u')]
    url: Option<String>,

    /// Path to issuer keypair file
    #[arg(long, short = 'k')]
    keypair: Option<String>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<String>,

    /// Commitment level to wait for
    #[arg(long)]
    commitment: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new token
    Create(commands::create::CreateCmd),

    /// Show account size and rent for a token without submitting anything
    Size(commands::size::SizeCmd),
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "token_launch_sdk=debug,token_launch=debug"
    } else {
        "token_launch_sdk=info,token_launch=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = resolve_config(
        cli.config.as_deref(),
        cli.url.as_deref(),
        cli.keypair.as_deref(),
        cli.commitment.as_deref(),
    )?;

    match cli.command {
        Commands::Create(cmd) => commands::create::execute(cmd, config).await,
        Commands::Size(cmd) => commands::size::execute(cmd, config).await,
    }
}
