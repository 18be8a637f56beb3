//! Mint provisioning: the first transaction of a launch
//!
//! Instruction order is mandatory. Each instruction relies on the account
//! state written by the one before it inside the same atomic transaction:
//! the metadata pointer must be initialized before the mint, and the
//! metadata can only be written into an initialized mint.

use solana_sdk::{system_instruction, transaction::Transaction};
use spl_token_2022::extension::metadata_pointer;

use crate::core::{token_program_id, MintIdentity, SdkResult, TokenSpec};
use crate::instructions::LaunchTransactionBuilder;
use crate::layout::AccountLayout;
use crate::prelude::*;

/// Builds the create-account, metadata-pointer, initialize-mint and
/// initialize-metadata sequence for a new mint
pub struct MintProvisioning<'a> {
    spec: &'a TokenSpec,
    layout: AccountLayout,
    lamports: u64,
}

impl<'a> MintProvisioning<'a> {
    /// `lamports` must be the rent-exempt minimum for `layout.total_len()`
    pub fn new(spec: &'a TokenSpec, layout: AccountLayout, lamports: u64) -> Self {
        Self {
            spec,
            layout,
            lamports,
        }
    }

    pub fn instructions(&self, issuer: &Pubkey, mint: &Pubkey) -> SdkResult<Vec<Instruction>> {
        let program_id = token_program_id();

        // Allocated at the extension size only; metadata initialization
        // reallocates using the lamports funded here.
        let create_account = system_instruction::create_account(
            issuer,
            mint,
            self.lamports,
            self.layout.mint_len as u64,
            &program_id,
        );

        let init_pointer = metadata_pointer::instruction::initialize(
            &program_id,
            mint,
            Some(*issuer),
            Some(*mint),
        )?;

        let init_mint = spl_token_2022::instruction::initialize_mint(
            &program_id,
            mint,
            issuer,
            None,
            self.spec.decimals,
        )?;

        let init_metadata = spl_token_metadata_interface::instruction::initialize(
            &program_id,
            mint,
            issuer,
            mint,
            issuer,
            self.spec.name.clone(),
            self.spec.symbol.clone(),
            self.spec.uri.clone(),
        );

        Ok(vec![create_account, init_pointer, init_mint, init_metadata])
    }

    /// Transaction paid by the issuer and co-signed by the new mint
    pub fn transaction(
        &self,
        issuer: &Pubkey,
        mint: &MintIdentity,
        blockhash: Hash,
    ) -> SdkResult<Transaction> {
        let instructions = self.instructions(issuer, &mint.pubkey())?;
        LaunchTransactionBuilder::new(*issuer)
            .add_instructions(instructions)
            .with_blockhash(blockhash)
            .build_partially_signed(&[mint.keypair()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PackedMetadata;
    use solana_sdk::system_program;
    use spl_token_2022::instruction::TokenInstruction;
    use spl_token_metadata_interface::instruction::TokenMetadataInstruction;

    fn build(spec: &TokenSpec) -> (Pubkey, Pubkey, AccountLayout, Vec<Instruction>) {
        let issuer = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let packed = PackedMetadata::new(spec, &mint, &issuer).unwrap();
        let layout = AccountLayout::for_metadata(&packed).unwrap();
        let ixs = MintProvisioning::new(spec, layout, 4_000_000)
            .instructions(&issuer, &mint)
            .unwrap();
        (issuer, mint, layout, ixs)
    }

    #[test]
    fn test_instruction_order() {
        let spec = TokenSpec::new("Foo", "FOO", "https://x/y.json");
        let (_, _, _, ixs) = build(&spec);

        assert_eq!(ixs.len(), 4);
        assert_eq!(ixs[0].program_id, system_program::id());
        assert!(matches!(
            TokenInstruction::unpack(&ixs[1].data),
            Ok(TokenInstruction::MetadataPointerExtension)
        ));
        assert!(matches!(
            TokenInstruction::unpack(&ixs[2].data),
            Ok(TokenInstruction::InitializeMint { .. })
        ));
        assert!(matches!(
            TokenMetadataInstruction::unpack(&ixs[3].data),
            Ok(TokenMetadataInstruction::Initialize(_))
        ));
        for ix in &ixs[1..] {
            assert_eq!(ix.program_id, token_program_id());
        }
    }

    #[test]
    fn test_create_account_targets_mint_with_extension_space() {
        let spec = TokenSpec::new("Foo", "FOO", "https://x/y.json");
        let (issuer, mint, layout, ixs) = build(&spec);

        let create = &ixs[0];
        assert_eq!(create.accounts[0].pubkey, issuer);
        assert!(create.accounts[0].is_signer);
        assert_eq!(create.accounts[1].pubkey, mint);
        assert!(create.accounts[1].is_signer);

        // CreateAccount: u32 tag, lamports, space, owner
        assert_eq!(&create.data[0..4], &0u32.to_le_bytes());
        assert_eq!(&create.data[4..12], &4_000_000u64.to_le_bytes());
        assert_eq!(&create.data[12..20], &(layout.mint_len as u64).to_le_bytes());
        assert_eq!(&create.data[20..52], token_program_id().as_ref());
    }

    #[test]
    fn test_pointer_points_at_mint_itself() {
        let spec = TokenSpec::new("Foo", "FOO", "https://x/y.json");
        let (issuer, mint, _, ixs) = build(&spec);

        let data = &ixs[1].data;
        // extension tag, initialize tag, authority, metadata address
        assert_eq!(data[1], 0);
        assert_eq!(&data[2..34], issuer.as_ref());
        assert_eq!(&data[34..66], mint.as_ref());
    }

    #[test]
    fn test_mint_has_issuer_authority_and_no_freeze() {
        let spec = TokenSpec::new("Foo", "FOO", "https://x/y.json").with_decimals(6);
        let (issuer, _, _, ixs) = build(&spec);

        match TokenInstruction::unpack(&ixs[2].data).unwrap() {
            TokenInstruction::InitializeMint {
                decimals,
                mint_authority,
                freeze_authority,
            } => {
                assert_eq!(decimals, 6);
                assert_eq!(mint_authority, issuer);
                assert!(freeze_authority.is_none());
            }
            other => panic!("unexpected instruction {:?}", other),
        }
    }

    #[test]
    fn test_metadata_carries_spec_fields() {
        let spec = TokenSpec::new("Foo", "FOO", "https://x/y.json")
            .with_description("not written on-chain");
        let (issuer, mint, _, ixs) = build(&spec);

        let init = &ixs[3];
        match TokenMetadataInstruction::unpack(&init.data).unwrap() {
            TokenMetadataInstruction::Initialize(data) => {
                assert_eq!(data.name, "Foo");
                assert_eq!(data.symbol, "FOO");
                assert_eq!(data.uri, "https://x/y.json");
            }
            other => panic!("unexpected instruction {:?}", other),
        }
        // metadata, update authority, mint, mint authority
        let keys: Vec<Pubkey> = init.accounts.iter().map(|a| a.pubkey).collect();
        assert_eq!(keys, vec![mint, issuer, mint, issuer]);
        assert!(init.accounts[3].is_signer);
    }

    #[test]
    fn test_transaction_is_co_signed_by_mint_only() {
        let spec = TokenSpec::new("Foo", "FOO", "https://x/y.json");
        let issuer = Pubkey::new_unique();
        let mint = MintIdentity::generate();
        let layout = AccountLayout::estimate(&spec).unwrap();
        let blockhash = Hash::new_unique();

        let tx = MintProvisioning::new(&spec, layout, 1)
            .transaction(&issuer, &mint, blockhash)
            .unwrap();

        assert_eq!(tx.message.account_keys[0], issuer);
        assert_eq!(tx.message.recent_blockhash, blockhash);
        assert_eq!(tx.signatures[0], Signature::default());
        let mint_index = tx
            .message
            .account_keys
            .iter()
            .position(|k| *k == mint.pubkey())
            .unwrap();
        assert_ne!(tx.signatures[mint_index], Signature::default());
    }
}
