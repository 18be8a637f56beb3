// Utility functions for CLI commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use token_launch_sdk::{SdkConfig, SupplyParsing, TokenForm, TokenSpec};

/// Token description shared by `create` and `size`
#[derive(Args, Debug)]
pub struct TokenArgs {
    /// TOML file describing the token, instead of the individual flags
    #[arg(
        long,
        conflicts_with_all = ["name", "symbol", "uri", "decimals", "supply", "description", "no_mintable"]
    )]
    pub spec: Option<PathBuf>,

    /// Token name
    #[arg(long, required_unless_present = "spec")]
    pub name: Option<String>,

    /// Token symbol
    #[arg(long, required_unless_present = "spec")]
    pub symbol: Option<String>,

    /// Off-chain metadata URI
    #[arg(long)]
    pub uri: Option<String>,

    /// Decimal places (default 9)
    #[arg(long)]
    pub decimals: Option<String>,

    /// Initial supply in whole tokens (default 0)
    #[arg(long)]
    pub supply: Option<String>,

    /// Informational description, not written on-chain
    #[arg(long)]
    pub description: Option<String>,

    /// Skip issuing an initial supply
    #[arg(long)]
    pub no_mintable: bool,

    /// Take leading digits of --supply and treat anything else as zero
    #[arg(long)]
    pub lenient_supply: bool,
}

impl TokenArgs {
    /// Apply the input flags that override configuration
    pub fn configure(&self, config: SdkConfig) -> SdkConfig {
        if self.lenient_supply {
            config.with_supply_parsing(SupplyParsing::Lenient)
        } else {
            config
        }
    }

    pub fn into_spec(self, config: &SdkConfig) -> Result<TokenSpec> {
        if let Some(path) = self.spec {
            return TokenSpec::from_toml_file(&path)
                .with_context(|| format!("Failed to load token spec from {}", path.display()));
        }

        let defaults = TokenForm::default();
        let form = TokenForm {
            name: self.name.unwrap_or_default(),
            symbol: self.symbol.unwrap_or_default(),
            uri: self.uri.unwrap_or(defaults.uri),
            description: self.description.unwrap_or_default(),
            decimals: self.decimals.unwrap_or(defaults.decimals),
            initial_supply: self.supply.unwrap_or(defaults.initial_supply),
            mintable: !self.no_mintable,
        };

        form.into_spec(config.supply_parsing).context("Invalid token input")
    }
}

/// Build the effective configuration: file (or localnet) overridden by flags
pub fn resolve_config(
    path: Option<&str>,
    url: Option<&str>,
    keypair: Option<&str>,
    commitment: Option<&str>,
) -> Result<SdkConfig> {
    let mut config = match path {
        Some(path) => SdkConfig::load(expand_tilde(path)?)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => SdkConfig::localnet(),
    };

    if let Some(url) = url {
        config = config.with_rpc_url(SdkConfig::for_cluster(url).rpc_url);
    }
    if let Some(keypair) = keypair {
        config = config.with_keypair_path(keypair.to_string());
    }
    if let Some(commitment) = commitment {
        config = config.with_commitment(commitment.to_string());
        config.commitment_config()?;
    }
    Ok(config)
}

/// Expand a leading ~ to the home directory
pub fn expand_tilde(path: &str) -> Result<String> {
    if path.starts_with('~') {
        let home = std::env::var("HOME").context("HOME environment variable not set")?;
        Ok(path.replacen('~', &home, 1))
    } else {
        Ok(path.to_string())
    }
}

/// Format lamports as SOL
pub fn sol(lamports: u64) -> String {
    format!("{:.9} SOL", lamports as f64 / 1_000_000_000.0)
}

/// Print success message with checkmark
pub fn success(msg: &str) {
    println!("[OK] {}", msg);
}

/// Print info message
pub fn info(msg: &str) {
    println!("[INFO] {}", msg);
}

/// Print warning message
pub fn warn(msg: &str) {
    eprintln!("[WARN] {}", msg);
}

/// Print error message
pub fn error(msg: &str) {
    eprintln!("[ERROR] {}", msg);
}
