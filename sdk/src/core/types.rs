use std::{fmt, fs, path::Path};

use serde::{Deserialize, Serialize};
use solana_sdk::signature::{Keypair, Signer};

use crate::core::{defaults, SdkError, SdkResult};
use crate::prelude::*;

/// Declared intent for a new token. Built once per launch and moved into
/// the launcher; nothing reads mutable form state after that.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSpec {
    pub name: String,
    pub symbol: String,
    /// Pointer to off-chain metadata JSON
    pub uri: String,
    /// Informational only, never written on-chain
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    /// Whole-token units, scaled to base units at issuance
    #[serde(default)]
    pub initial_supply: u64,
    /// Gates the supply issuance step
    #[serde(default = "default_mintable")]
    pub mintable: bool,
}

fn default_decimals() -> u8 {
    defaults::DECIMALS
}

fn default_mintable() -> bool {
    defaults::MINTABLE
}

impl TokenSpec {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            uri: uri.into(),
            description: String::new(),
            decimals: defaults::DECIMALS,
            initial_supply: 0,
            mintable: defaults::MINTABLE,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_decimals(mut self, decimals: u8) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn with_initial_supply(mut self, initial_supply: u64) -> Self {
        self.initial_supply = initial_supply;
        self
    }

    pub fn with_mintable(mut self, mintable: bool) -> Self {
        self.mintable = mintable;
        self
    }

    /// Load a token spec from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> SdkResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SdkError::Config(format!("Failed to read token spec {}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            SdkError::MalformedInput(format!("Failed to parse token spec {}: {}", path.display(), e))
        })
    }
}

/// Fresh keypair whose public key becomes the mint address.
///
/// Owned by exactly one launch run and never persisted. Losing it after the
/// mint exists does not endanger funds (the issuer holds mint authority),
/// but the address cannot be regenerated, so callers that need it must
/// record `pubkey()`.
pub struct MintIdentity {
    keypair: Keypair,
}

impl MintIdentity {
    pub fn generate() -> Self {
        Self {
            keypair: Keypair::new(),
        }
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    pub(crate) fn keypair(&self) -> &Keypair {
        &self.keypair
    }
}

impl fmt::Debug for MintIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MintIdentity")
            .field("pubkey", &self.pubkey())
            .finish_non_exhaustive()
    }
}

/// Launch state machine. Transitions only move forward; `Failed` is
/// reachable from every non-terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LaunchState {
    Idle,
    Sizing,
    MintTxSubmitted,
    ActivationTxSubmitted,
    SupplyTxSubmitted,
    Done,
    Failed,
}

impl LaunchState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, LaunchState::Done | LaunchState::Failed)
    }
}

impl fmt::Display for LaunchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LaunchState::Idle => "idle",
            LaunchState::Sizing => "sizing",
            LaunchState::MintTxSubmitted => "mint-tx-submitted",
            LaunchState::ActivationTxSubmitted => "activation-tx-submitted",
            LaunchState::SupplyTxSubmitted => "supply-tx-submitted",
            LaunchState::Done => "done",
            LaunchState::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_from_toml_applies_defaults() {
        let spec: TokenSpec = toml::from_str(
            r#"
            name = "Foo"
            symbol = "FOO"
            uri = "https://x/y.json"
            "#,
        )
        .unwrap();

        assert_eq!(spec.decimals, 9);
        assert_eq!(spec.initial_supply, 0);
        assert!(spec.mintable);
        assert!(spec.description.is_empty());
    }

    #[test]
    fn test_mint_identities_are_unique() {
        let a = MintIdentity::generate();
        let b = MintIdentity::generate();
        assert_ne!(a.pubkey(), b.pubkey());
    }

    #[test]
    fn test_terminal_states() {
        assert!(LaunchState::Done.is_terminal());
        assert!(LaunchState::Failed.is_terminal());
        assert!(!LaunchState::Sizing.is_terminal());
    }
}
