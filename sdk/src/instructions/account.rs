use solana_sdk::transaction::Transaction;
use spl_associated_token_account::{
    get_associated_token_address_with_program_id, instruction::create_associated_token_account,
};

use crate::core::{token_program_id, SdkResult};
use crate::instructions::LaunchTransactionBuilder;
use crate::prelude::*;

/// Creates the issuer's associated token account for a mint.
///
/// The mint account must already exist on-chain when this transaction is
/// processed.
pub struct AccountActivation {
    issuer: Pubkey,
    mint: Pubkey,
}

impl AccountActivation {
    pub fn new(issuer: Pubkey, mint: Pubkey) -> Self {
        Self { issuer, mint }
    }

    /// Deterministic holding account address for (issuer, mint)
    pub fn holding_address(&self) -> Pubkey {
        get_associated_token_address_with_program_id(&self.issuer, &self.mint, &token_program_id())
    }

    pub fn instruction(&self) -> Instruction {
        create_associated_token_account(&self.issuer, &self.issuer, &self.mint, &token_program_id())
    }

    pub fn transaction(&self, blockhash: Hash) -> SdkResult<Transaction> {
        LaunchTransactionBuilder::new(self.issuer)
            .add_instruction(self.instruction())
            .with_blockhash(blockhash)
            .build()
    }
}
