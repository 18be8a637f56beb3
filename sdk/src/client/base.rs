use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{commitment_config::CommitmentConfig, transaction::Transaction};
use tracing::debug;

use crate::client::Ledger;
use crate::config::SdkConfig;
use crate::core::{SdkError, SdkResult};
use crate::prelude::*;

/// RPC-backed ledger
pub struct RpcLedger {
    rpc: Arc<RpcClient>,
}

impl RpcLedger {
    pub fn new(rpc: Arc<RpcClient>) -> Self {
        Self { rpc }
    }

    pub fn from_config(config: &SdkConfig) -> SdkResult<Self> {
        let rpc = RpcClient::new_with_timeout_and_commitment(
            config.rpc_url.clone(),
            Duration::from_secs(config.timeout),
            config.commitment_config()?,
        );
        Ok(Self::new(Arc::new(rpc)))
    }

    /// Get the RPC endpoint URL
    pub fn rpc_url(&self) -> String {
        self.rpc.url()
    }

    pub fn commitment(&self) -> CommitmentConfig {
        self.rpc.commitment()
    }
}

#[async_trait]
impl Ledger for RpcLedger {
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> SdkResult<u64> {
        self.rpc
            .get_minimum_balance_for_rent_exemption(data_len)
            .await
            .map_err(SdkError::Rpc)
    }

    async fn latest_blockhash(&self) -> SdkResult<Hash> {
        self.rpc.get_latest_blockhash().await.map_err(SdkError::Rpc)
    }

    async fn send_and_confirm(&self, transaction: &Transaction) -> SdkResult<Signature> {
        debug!(
            url = %self.rpc.url(),
            instructions = transaction.message.instructions.len(),
            "Submitting transaction"
        );
        self.rpc
            .send_and_confirm_transaction(transaction)
            .await
            .map_err(SdkError::Rpc)
    }

    async fn balance(&self, pubkey: &Pubkey) -> SdkResult<u64> {
        self.rpc.get_balance(pubkey).await.map_err(SdkError::Rpc)
    }
}
