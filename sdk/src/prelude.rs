//! Prelude module for common imports

pub use solana_sdk::{hash::Hash, instruction::Instruction, pubkey::Pubkey, signature::Signature};
