//! Token launch workflow
//!
//! A launch is a strictly sequential pipeline of independent transactions:
//!
//! 1. mint provisioning (create account, metadata pointer, mint, metadata)
//! 2. account activation (issuer's associated token account)
//! 3. supply issuance, only for mintable tokens
//!
//! Every step waits for the previous step's transaction to be confirmed by
//! the ledger. The first failure stops the run. Nothing is retried or rolled
//! back, so a failure after step 1 leaves a live mint behind; `LaunchFailure`
//! reports the mint address and the signatures that already landed.

use std::sync::Arc;

use solana_sdk::transaction::Transaction;
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use crate::client::{Ledger, Wallet};
use crate::core::{
    LaunchState, LaunchStep, MintIdentity, SdkError, SdkResult, TokenSpec, LAMPORTS_PER_SIGNATURE,
};
use crate::instructions::{AccountActivation, MintProvisioning, SupplyIssuance, SupplyScaling};
use crate::layout::{AccountLayout, PackedMetadata, RentCalculator};
use crate::prelude::*;

/// Receives every state transition of a launch
pub trait LaunchObserver: Send + Sync {
    fn on_transition(&self, from: LaunchState, to: LaunchState);
}

/// Outcome of a completed launch
#[derive(Clone, Debug, PartialEq)]
pub struct LaunchReceipt {
    pub mint: Pubkey,
    pub holding_account: Pubkey,
    pub layout: AccountLayout,
    pub rent_lamports: u64,
    /// Raw base units minted, `None` when the token is not mintable
    pub minted_amount: Option<u64>,
    pub signatures: Vec<(LaunchStep, Signature)>,
}

impl LaunchReceipt {
    pub fn signature(&self, step: LaunchStep) -> Option<Signature> {
        find_signature(&self.signatures, step)
    }
}

/// A launch that stopped before `Done`
#[derive(Debug, Error)]
#[error("launch of mint {mint} failed after {reached}: {error}")]
pub struct LaunchFailure {
    /// Address of the mint keypair generated for this run
    pub mint: Pubkey,
    /// Last state reached before the failure
    pub reached: LaunchState,
    /// Transactions that landed before the failure
    pub signatures: Vec<(LaunchStep, Signature)>,
    #[source]
    pub error: SdkError,
}

impl LaunchFailure {
    /// True when earlier transactions already changed on-chain state
    pub fn is_partial(&self) -> bool {
        !self.signatures.is_empty()
    }

    pub fn signature(&self, step: LaunchStep) -> Option<Signature> {
        find_signature(&self.signatures, step)
    }
}

fn find_signature(signatures: &[(LaunchStep, Signature)], step: LaunchStep) -> Option<Signature> {
    signatures
        .iter()
        .find(|(s, _)| *s == step)
        .map(|(_, signature)| *signature)
}

/// Issuer balance against everything a launch spends
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FundingCheck {
    pub balance: u64,
    /// Rent for the mint account with its metadata
    pub mint_rent: u64,
    /// Rent for the holding account created by activation
    pub holding_rent: u64,
    /// Signature fees for every transaction of the launch
    pub fee_allowance: u64,
}

impl FundingCheck {
    pub fn required(&self) -> u64 {
        self.mint_rent
            .saturating_add(self.holding_rent)
            .saturating_add(self.fee_allowance)
    }

    pub fn is_sufficient(&self) -> bool {
        self.balance >= self.required()
    }

    pub fn shortfall(&self) -> u64 {
        self.required().saturating_sub(self.balance)
    }
}

// Mint provisioning carries two signatures (issuer and mint), the other
// steps one each
fn launch_signatures(mintable: bool) -> u64 {
    if mintable {
        4
    } else {
        3
    }
}

struct Progress {
    state: LaunchState,
    signatures: Vec<(LaunchStep, Signature)>,
    observer: Option<Arc<dyn LaunchObserver>>,
}

impl Progress {
    fn new(observer: Option<Arc<dyn LaunchObserver>>) -> Self {
        Self {
            state: LaunchState::Idle,
            signatures: Vec::new(),
            observer,
        }
    }

    fn advance(&mut self, to: LaunchState) {
        let from = self.state;
        debug!(%from, %to, "Launch state transition");
        if let Some(observer) = &self.observer {
            observer.on_transition(from, to);
        }
        self.state = to;
    }

    fn landed(&mut self, step: LaunchStep, signature: Signature, to: LaunchState) {
        self.signatures.push((step, signature));
        self.advance(to);
    }
}

/// Drives one token launch at a time per call; runs share no state
pub struct TokenLauncher<L, W> {
    ledger: Arc<L>,
    wallet: Arc<W>,
    scaling: SupplyScaling,
    observer: Option<Arc<dyn LaunchObserver>>,
}

impl<L: Ledger, W: Wallet> TokenLauncher<L, W> {
    pub fn new(ledger: Arc<L>, wallet: Arc<W>) -> Self {
        Self {
            ledger,
            wallet,
            scaling: SupplyScaling::default(),
            observer: None,
        }
    }

    pub fn with_scaling(mut self, scaling: SupplyScaling) -> Self {
        self.scaling = scaling;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn LaunchObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    /// Compare the issuer balance with the rent and fees a launch of `spec`
    /// will spend. Advisory only: nothing is reserved, so the balance can
    /// still change before the launch runs.
    pub async fn preflight(&self, spec: &TokenSpec) -> SdkResult<FundingCheck> {
        let issuer = self.wallet.pubkey();
        let layout = AccountLayout::estimate(spec)?;
        let check = FundingCheck {
            balance: self.ledger.balance(&issuer).await?,
            mint_rent: RentCalculator::rent_exempt_minimum(&*self.ledger, &layout).await?,
            holding_rent: RentCalculator::holding_account_minimum(&*self.ledger).await?,
            fee_allowance: launch_signatures(spec.mintable) * LAMPORTS_PER_SIGNATURE,
        };

        if check.is_sufficient() {
            debug!(balance = check.balance, required = check.required(), "Issuer can fund the launch");
        } else {
            warn!(
                %issuer,
                balance = check.balance,
                required = check.required(),
                "Issuer balance does not cover the launch"
            );
        }
        Ok(check)
    }

    /// Create the mint, its holding account and (if mintable) the initial
    /// supply. Each call generates a fresh mint identity.
    #[instrument(skip_all, fields(symbol = %spec.symbol))]
    pub async fn launch(&self, spec: TokenSpec) -> Result<LaunchReceipt, LaunchFailure> {
        let mint = MintIdentity::generate();
        let mint_address = mint.pubkey();
        let mut progress = Progress::new(self.observer.clone());
        info!(mint = %mint_address, issuer = %self.wallet.pubkey(), "Starting token launch");

        match self.run(&spec, mint, &mut progress).await {
            Ok(receipt) => {
                progress.advance(LaunchState::Done);
                info!(mint = %receipt.mint, "Token created successfully");
                Ok(receipt)
            }
            Err(error) => {
                let reached = progress.state;
                error!(mint = %mint_address, %reached, %error, "Token launch aborted");
                progress.advance(LaunchState::Failed);
                Err(LaunchFailure {
                    mint: mint_address,
                    reached,
                    signatures: progress.signatures,
                    error,
                })
            }
        }
    }

    async fn run(
        &self,
        spec: &TokenSpec,
        mint: MintIdentity,
        progress: &mut Progress,
    ) -> SdkResult<LaunchReceipt> {
        let issuer = self.wallet.pubkey();
        let mint_address = mint.pubkey();
        progress.advance(LaunchState::Sizing);

        // Resolved before anything is submitted so bad input never leaves a
        // half-created token behind
        let raw_supply = if spec.mintable {
            Some(self.scaling.raw_amount(spec.initial_supply, spec.decimals)?)
        } else {
            None
        };

        let packed = PackedMetadata::new(spec, &mint_address, &issuer)?;
        let layout = AccountLayout::for_metadata(&packed)?;
        let rent_lamports = RentCalculator::rent_exempt_minimum(&*self.ledger, &layout).await?;
        info!(
            mint_len = layout.mint_len,
            metadata_len = layout.metadata_len,
            rent_lamports,
            "Sized mint account"
        );

        let step = LaunchStep::MintProvisioning;
        let blockhash = self.blockhash_for(step).await?;
        let transaction =
            MintProvisioning::new(spec, layout, rent_lamports).transaction(&issuer, &mint, blockhash)?;
        drop(mint);
        let signature = self.submit(step, transaction).await?;
        progress.landed(step, signature, LaunchState::MintTxSubmitted);

        let step = LaunchStep::AccountActivation;
        let activation = AccountActivation::new(issuer, mint_address);
        let holding_account = activation.holding_address();
        let blockhash = self.blockhash_for(step).await?;
        let signature = self.submit(step, activation.transaction(blockhash)?).await?;
        progress.landed(step, signature, LaunchState::ActivationTxSubmitted);

        let minted_amount = match raw_supply {
            Some(raw_amount) => {
                let step = LaunchStep::SupplyIssuance;
                let issuance = SupplyIssuance::new(issuer, mint_address, holding_account, raw_amount);
                let blockhash = self.blockhash_for(step).await?;
                let signature = self.submit(step, issuance.transaction(blockhash)?).await?;
                progress.landed(step, signature, LaunchState::SupplyTxSubmitted);
                Some(raw_amount)
            }
            None => {
                debug!("Token is not mintable, skipping supply issuance");
                None
            }
        };

        Ok(LaunchReceipt {
            mint: mint_address,
            holding_account,
            layout,
            rent_lamports,
            minted_amount,
            signatures: progress.signatures.clone(),
        })
    }

    async fn blockhash_for(&self, step: LaunchStep) -> SdkResult<Hash> {
        self.ledger
            .latest_blockhash()
            .await
            .map_err(|e| SdkError::submission(step, format!("blockhash unavailable: {}", e)))
    }

    async fn submit(&self, step: LaunchStep, transaction: Transaction) -> SdkResult<Signature> {
        info!(%step, "Submitting transaction");
        match self
            .wallet
            .send_transaction(transaction, &*self.ledger)
            .await
        {
            Ok(signature) => {
                info!(%step, %signature, "Transaction accepted");
                Ok(signature)
            }
            Err(e @ SdkError::SubmissionFailure { .. }) => Err(e),
            Err(e) => Err(SdkError::submission(step, e)),
        }
    }
}
