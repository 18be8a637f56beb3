use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use solana_sdk::{
    signature::{read_keypair_file, Keypair, Signer},
    transaction::Transaction,
};
use tracing::info;

use crate::client::{Ledger, Wallet};
use crate::core::{SdkError, SdkResult};
use crate::prelude::*;

/// Wallet backed by a local keypair
pub struct KeypairWallet {
    keypair: Arc<Keypair>,
}

impl KeypairWallet {
    pub fn new(keypair: Arc<Keypair>) -> Self {
        Self { keypair }
    }

    pub fn from_file(path: impl AsRef<Path>) -> SdkResult<Self> {
        let path = path.as_ref();
        let keypair = read_keypair_file(path).map_err(|e| {
            SdkError::Config(format!("Failed to load keypair from {}: {}", path.display(), e))
        })?;
        Ok(Self::new(Arc::new(keypair)))
    }
}

#[async_trait]
impl Wallet for KeypairWallet {
    fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    async fn send_transaction(
        &self,
        mut transaction: Transaction,
        ledger: &dyn Ledger,
    ) -> SdkResult<Signature> {
        // Same blockhash keeps any co-signatures already present
        let blockhash = transaction.message.recent_blockhash;
        transaction
            .try_partial_sign(&[self.keypair.as_ref()], blockhash)
            .map_err(|e| SdkError::Signing(e.to_string()))?;

        let signature = ledger.send_and_confirm(&transaction).await?;
        info!(%signature, "Transaction confirmed");
        Ok(signature)
    }
}
