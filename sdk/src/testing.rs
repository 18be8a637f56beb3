//! Testing utilities for token launches
//!
//! In-memory ledger, wallet and observer that let a full launch run without
//! a cluster. The ledger applies the default rent rule, verifies every
//! signature, and records each accepted transaction in submission order.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_sdk::{
    rent::Rent,
    signature::{Keypair, Signer},
    transaction::Transaction,
};

use crate::client::{Ledger, Wallet};
use crate::core::{LaunchState, SdkError, SdkResult};
use crate::launcher::LaunchObserver;
use crate::prelude::*;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Ledger double with scripted failures
#[derive(Default)]
pub struct MockLedger {
    rent: Rent,
    submitted: Mutex<Vec<Transaction>>,
    attempts: AtomicUsize,
    reject_attempt: Option<usize>,
    fail_rent: bool,
    fail_blockhash: bool,
    balances: Mutex<HashMap<Pubkey, u64>>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the n-th submission (1-based)
    pub fn rejecting_attempt(mut self, attempt: usize) -> Self {
        self.reject_attempt = Some(attempt);
        self
    }

    pub fn failing_rent_query(mut self) -> Self {
        self.fail_rent = true;
        self
    }

    pub fn failing_blockhash(mut self) -> Self {
        self.fail_blockhash = true;
        self
    }

    pub fn with_balance(self, pubkey: Pubkey, lamports: u64) -> Self {
        lock(&self.balances).insert(pubkey, lamports);
        self
    }

    /// Transactions accepted so far, in order
    pub fn submitted(&self) -> Vec<Transaction> {
        lock(&self.submitted).clone()
    }

    /// Every submission that reached the ledger, accepted or not
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn rent(&self) -> &Rent {
        &self.rent
    }

    fn rejection(reason: &str) -> SdkError {
        SdkError::Rpc(ClientError::from(ClientErrorKind::Custom(reason.to_string())))
    }
}

#[async_trait]
impl Ledger for MockLedger {
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> SdkResult<u64> {
        if self.fail_rent {
            return Err(Self::rejection("rent query unavailable"));
        }
        Ok(self.rent.minimum_balance(data_len))
    }

    async fn latest_blockhash(&self) -> SdkResult<Hash> {
        if self.fail_blockhash {
            return Err(Self::rejection("blockhash unavailable"));
        }
        Ok(Hash::new_unique())
    }

    async fn send_and_confirm(&self, transaction: &Transaction) -> SdkResult<Signature> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if self.reject_attempt == Some(attempt) {
            return Err(Self::rejection("transaction rejected"));
        }
        transaction
            .verify()
            .map_err(|e| SdkError::Signing(format!("signature verification failed: {}", e)))?;

        lock(&self.submitted).push(transaction.clone());
        Ok(transaction.signatures[0])
    }

    async fn balance(&self, pubkey: &Pubkey) -> SdkResult<u64> {
        Ok(lock(&self.balances).get(pubkey).copied().unwrap_or(0))
    }
}

/// Wallet double that signs with a local keypair and can decline a request
pub struct MockWallet {
    keypair: Keypair,
    decline_call: Option<usize>,
    calls: AtomicUsize,
}

impl MockWallet {
    pub fn new() -> Self {
        Self {
            keypair: Keypair::new(),
            decline_call: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Decline the n-th signing request (1-based)
    pub fn declining_call(mut self, call: usize) -> Self {
        self.decline_call = Some(call);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockWallet {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Wallet for MockWallet {
    fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    async fn send_transaction(
        &self,
        mut transaction: Transaction,
        ledger: &dyn Ledger,
    ) -> SdkResult<Signature> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.decline_call == Some(call) {
            return Err(SdkError::Signing("request declined by wallet".to_string()));
        }
        let blockhash = transaction.message.recent_blockhash;
        transaction
            .try_partial_sign(&[&self.keypair], blockhash)
            .map_err(|e| SdkError::Signing(e.to_string()))?;
        ledger.send_and_confirm(&transaction).await
    }
}

/// Observer that keeps every transition it sees
#[derive(Default)]
pub struct RecordingObserver {
    transitions: Mutex<Vec<(LaunchState, LaunchState)>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transitions(&self) -> Vec<(LaunchState, LaunchState)> {
        lock(&self.transitions).clone()
    }

    /// Target states in the order they were entered
    pub fn states(&self) -> Vec<LaunchState> {
        lock(&self.transitions).iter().map(|(_, to)| *to).collect()
    }
}

impl LaunchObserver for RecordingObserver {
    fn on_transition(&self, from: LaunchState, to: LaunchState) {
        lock(&self.transitions).push((from, to));
    }
}
