use std::{fs, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};
use solana_sdk::commitment_config::CommitmentConfig;

use crate::core::{SdkError, SdkResult};
use crate::form::SupplyParsing;
use crate::instructions::SupplyScaling;

/// SDK configuration for connecting to a cluster and launching tokens
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SdkConfig {
    /// RPC endpoint URL
    pub rpc_url: String,

    /// Commitment level submissions wait for (processed, confirmed, finalized)
    #[serde(default = "default_commitment")]
    pub commitment: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Path to the issuer keypair
    #[serde(default = "default_keypair_path")]
    pub keypair_path: String,

    /// How raw supply text is parsed
    #[serde(default)]
    pub supply_parsing: SupplyParsing,

    /// How whole-token supply is scaled to base units
    #[serde(default)]
    pub supply_scaling: SupplyScaling,
}

fn default_commitment() -> String {
    "confirmed".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_keypair_path() -> String {
    "~/.config/solana/id.json".to_string()
}

impl SdkConfig {
    fn with_url(rpc_url: &str) -> Self {
        Self {
            rpc_url: rpc_url.to_string(),
            commitment: default_commitment(),
            timeout: default_timeout(),
            keypair_path: default_keypair_path(),
            supply_parsing: SupplyParsing::default(),
            supply_scaling: SupplyScaling::default(),
        }
    }

    pub fn localnet() -> Self {
        Self::with_url("http://localhost:8899")
    }

    pub fn devnet() -> Self {
        Self::with_url("https://api.devnet.solana.com")
    }

    pub fn mainnet() -> Self {
        Self::with_url("https://api.mainnet-beta.solana.com")
    }

    /// Resolve a cluster moniker or a literal URL
    pub fn for_cluster(cluster: &str) -> Self {
        match cluster {
            "localnet" | "localhost" | "l" => Self::localnet(),
            "devnet" | "d" => Self::devnet(),
            "mainnet" | "mainnet-beta" | "m" => Self::mainnet(),
            url => Self::with_url(url),
        }
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> SdkResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SdkError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        let config: SdkConfig = toml::from_str(&content).map_err(|e| {
            SdkError::Config(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> SdkResult<()> {
        if self.rpc_url.is_empty() {
            return Err(SdkError::Config("rpc_url must not be empty".to_string()));
        }
        if self.timeout == 0 {
            return Err(SdkError::Config("timeout must be greater than 0".to_string()));
        }
        self.commitment_config()?;
        Ok(())
    }

    pub fn commitment_config(&self) -> SdkResult<CommitmentConfig> {
        CommitmentConfig::from_str(&self.commitment)
            .map_err(|e| SdkError::Config(format!("Invalid commitment '{}': {:?}", self.commitment, e)))
    }

    pub fn with_rpc_url(mut self, url: String) -> Self {
        self.rpc_url = url;
        self
    }

    pub fn with_commitment(mut self, commitment: String) -> Self {
        self.commitment = commitment;
        self
    }

    pub fn with_keypair_path(mut self, path: String) -> Self {
        self.keypair_path = path;
        self
    }

    pub fn with_supply_parsing(mut self, parsing: SupplyParsing) -> Self {
        self.supply_parsing = parsing;
        self
    }

    pub fn with_supply_scaling(mut self, scaling: SupplyScaling) -> Self {
        self.supply_scaling = scaling;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_monikers() {
        assert_eq!(SdkConfig::for_cluster("devnet").rpc_url, "https://api.devnet.solana.com");
        assert_eq!(SdkConfig::for_cluster("l").rpc_url, "http://localhost:8899");
        assert_eq!(
            SdkConfig::for_cluster("https://rpc.example.com").rpc_url,
            "https://rpc.example.com"
        );
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: SdkConfig = toml::from_str(r#"rpc_url = "http://localhost:8899""#).unwrap();
        assert_eq!(config.commitment, "confirmed");
        assert_eq!(config.timeout, 30);
        assert_eq!(config.supply_parsing, SupplyParsing::Strict);
        assert_eq!(config.supply_scaling, SupplyScaling::FixedNineDecimals);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_scaling_options() {
        let config: SdkConfig = toml::from_str(
            r#"
            rpc_url = "http://localhost:8899"
            supply_parsing = "lenient"
            supply_scaling = "mint-decimals"
            "#,
        )
        .unwrap();
        assert_eq!(config.supply_parsing, SupplyParsing::Lenient);
        assert_eq!(config.supply_scaling, SupplyScaling::MintDecimals);
    }

    #[test]
    fn test_rejects_bad_commitment() {
        let config = SdkConfig::localnet().with_commitment("eventually".to_string());
        assert!(matches!(config.validate(), Err(SdkError::Config(_))));
    }

    #[test]
    fn test_supply_setters_override_defaults() {
        let config = SdkConfig::devnet()
            .with_supply_parsing(SupplyParsing::Lenient)
            .with_supply_scaling(SupplyScaling::MintDecimals);
        assert_eq!(config.supply_parsing, SupplyParsing::Lenient);
        assert_eq!(config.supply_scaling, SupplyScaling::MintDecimals);
        assert_eq!(config.rpc_url, "https://api.devnet.solana.com");
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = SdkConfig::localnet();
        config.timeout = 0;
        assert!(config.validate().is_err());
    }
}
