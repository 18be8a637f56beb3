use solana_sdk::{signature::Keypair, transaction::Transaction};

use crate::core::{SdkError, SdkResult};
use crate::prelude::*;

/// Builder for the transactions of a launch run
pub struct LaunchTransactionBuilder {
    payer: Pubkey,
    instructions: Vec<Instruction>,
    blockhash: Option<Hash>,
}

impl LaunchTransactionBuilder {
    /// Start a transaction paid for by `payer`
    pub fn new(payer: Pubkey) -> Self {
        Self {
            payer,
            instructions: Vec::new(),
            blockhash: None,
        }
    }

    /// Append an instruction; instructions execute in insertion order
    pub fn add_instruction(mut self, instruction: Instruction) -> Self {
        self.instructions.push(instruction);
        self
    }

    pub fn add_instructions(mut self, instructions: Vec<Instruction>) -> Self {
        self.instructions.extend(instructions);
        self
    }

    /// Stamp the transaction with the ledger head reference
    pub fn with_blockhash(mut self, blockhash: Hash) -> Self {
        self.blockhash = Some(blockhash);
        self
    }

    /// Build an unsigned transaction
    pub fn build(self) -> SdkResult<Transaction> {
        if self.instructions.is_empty() {
            return Err(SdkError::InvalidParameters(
                "transaction has no instructions".to_string(),
            ));
        }
        let blockhash = self.blockhash.ok_or_else(|| {
            SdkError::InvalidParameters("transaction has no recent blockhash".to_string())
        })?;

        let mut transaction = Transaction::new_with_payer(&self.instructions, Some(&self.payer));
        transaction.message.recent_blockhash = blockhash;
        Ok(transaction)
    }

    /// Build and sign with `co_signers`, leaving the payer signature empty
    pub fn build_partially_signed(self, co_signers: &[&Keypair]) -> SdkResult<Transaction> {
        let mut transaction = self.build()?;
        let blockhash = transaction.message.recent_blockhash;
        transaction
            .try_partial_sign(co_signers, blockhash)
            .map_err(|e| SdkError::Signing(e.to_string()))?;
        Ok(transaction)
    }
}
