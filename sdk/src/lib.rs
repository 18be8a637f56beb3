/// Token Launch SDK
///
/// Provisions a Token-2022 mint that carries its own metadata:
/// - Account sizing and rent for the metadata-carrying mint
/// - Mint provisioning (account, metadata pointer, mint, metadata)
/// - Holding account activation
/// - Optional initial supply issuance
/// - A sequential launch workflow over pluggable ledger and wallet collaborators
pub mod client;
pub mod config;
pub mod core;
pub mod form;
pub mod instructions;
pub mod launcher;
pub mod layout;
pub mod prelude;
pub mod testing;

pub use client::{KeypairWallet, Ledger, RpcLedger, Wallet};
pub use config::SdkConfig;
pub use crate::core::*;
pub use form::{SupplyParsing, TokenForm};
pub use instructions::{
    AccountActivation, LaunchTransactionBuilder, MintProvisioning, SupplyIssuance, SupplyScaling,
};
pub use launcher::{FundingCheck, LaunchFailure, LaunchObserver, LaunchReceipt, TokenLauncher};
pub use layout::{AccountLayout, PackedMetadata, RentCalculator};

// Token program used for every launch
pub use spl_token_2022::ID as TOKEN_PROGRAM_ID;
