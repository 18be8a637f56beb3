use serde::{Deserialize, Serialize};
use solana_sdk::transaction::Transaction;
use tracing::warn;

use crate::core::{
    token_program_id, SdkError, SdkResult, FIXED_SUPPLY_DECIMALS, FIXED_SUPPLY_MULTIPLIER,
};
use crate::instructions::LaunchTransactionBuilder;
use crate::prelude::*;

/// Conversion from whole-token supply to raw base units
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SupplyScaling {
    /// Always multiply by 10^9, whatever the mint's decimals. Mints with
    /// other decimals receive the wrong raw amount.
    #[default]
    FixedNineDecimals,
    /// Multiply by 10^decimals
    MintDecimals,
}

impl SupplyScaling {
    pub fn raw_amount(&self, whole_tokens: u64, decimals: u8) -> SdkResult<u64> {
        let multiplier = match self {
            SupplyScaling::FixedNineDecimals => {
                if decimals != FIXED_SUPPLY_DECIMALS {
                    warn!(
                        decimals,
                        "Fixed 1e9 supply scaling used for a mint with different decimals"
                    );
                }
                FIXED_SUPPLY_MULTIPLIER
            }
            SupplyScaling::MintDecimals => 10u64.checked_pow(u32::from(decimals)).ok_or_else(|| {
                SdkError::MalformedInput(format!("decimals {} overflow the base-unit scale", decimals))
            })?,
        };

        whole_tokens.checked_mul(multiplier).ok_or_else(|| {
            SdkError::MalformedInput(format!(
                "initial supply {} overflows u64 when scaled by {}",
                whole_tokens, multiplier
            ))
        })
    }
}

/// Mints the initial supply into the holding account, authorized by the issuer
pub struct SupplyIssuance {
    issuer: Pubkey,
    mint: Pubkey,
    holding_account: Pubkey,
    raw_amount: u64,
}

impl SupplyIssuance {
    pub fn new(issuer: Pubkey, mint: Pubkey, holding_account: Pubkey, raw_amount: u64) -> Self {
        Self {
            issuer,
            mint,
            holding_account,
            raw_amount,
        }
    }

    pub fn raw_amount(&self) -> u64 {
        self.raw_amount
    }

    pub fn instruction(&self) -> SdkResult<Instruction> {
        let ix = spl_token_2022::instruction::mint_to(
            &token_program_id(),
            &self.mint,
            &self.holding_account,
            &self.issuer,
            &[],
            self.raw_amount,
        )?;
        Ok(ix)
    }

    pub fn transaction(&self, blockhash: Hash) -> SdkResult<Transaction> {
        LaunchTransactionBuilder::new(self.issuer)
            .add_instruction(self.instruction()?)
            .with_blockhash(blockhash)
            .build()
    }
}
