//! Ledger and wallet collaborators
//!
//! The launcher only talks to the network and the signer through these two
//! traits. `RpcLedger` and `KeypairWallet` are the production adapters;
//! `crate::testing` provides in-memory ones.

pub mod base;
pub mod wallet;

use async_trait::async_trait;
use solana_sdk::transaction::Transaction;

use crate::core::SdkResult;
use crate::prelude::*;

pub use base::RpcLedger;
pub use wallet::KeypairWallet;

/// Remote ledger: rent rule, head reference, and transaction submission
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Lamports that keep an account of `data_len` bytes rent exempt
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> SdkResult<u64>;

    /// Latest blockhash to stamp a transaction with
    async fn latest_blockhash(&self) -> SdkResult<Hash>;

    /// Submit a fully signed transaction and wait until it is confirmed
    async fn send_and_confirm(&self, transaction: &Transaction) -> SdkResult<Signature>;

    /// Balance of an account in lamports
    async fn balance(&self, pubkey: &Pubkey) -> SdkResult<u64>;
}

/// Issuer identity: pays fees, holds mint authority, signs and submits
#[async_trait]
pub trait Wallet: Send + Sync {
    fn pubkey(&self) -> Pubkey;

    /// Add the issuer signature to a (possibly partially signed)
    /// transaction and submit it through `ledger`
    async fn send_transaction(
        &self,
        transaction: Transaction,
        ledger: &dyn Ledger,
    ) -> SdkResult<Signature>;
}
