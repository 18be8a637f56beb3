//! End-to-end launches against the in-memory ledger and wallet

use std::sync::Arc;

use solana_sdk::{
    system_instruction::SystemInstruction, system_program, transaction::Transaction,
};
use spl_token_2022::instruction::TokenInstruction;
use spl_token_metadata_interface::instruction::TokenMetadataInstruction;
use token_launch_sdk::testing::{MockLedger, MockWallet, RecordingObserver};
use token_launch_sdk::{
    token_program_id, LaunchState, LaunchStep, SdkError, SupplyParsing, SupplyScaling, TokenForm,
    TokenLauncher, Wallet,
};

fn form(decimals: &str, supply: &str, mintable: bool) -> TokenForm {
    TokenForm {
        name: "Foo".to_string(),
        symbol: "FOO".to_string(),
        uri: "https://x/y.json".to_string(),
        decimals: decimals.to_string(),
        initial_supply: supply.to_string(),
        mintable,
        ..TokenForm::default()
    }
}

fn launcher(ledger: MockLedger, wallet: MockWallet) -> TokenLauncher<MockLedger, MockWallet> {
    TokenLauncher::new(Arc::new(ledger), Arc::new(wallet))
}

fn program_ids(tx: &Transaction) -> Vec<solana_sdk::pubkey::Pubkey> {
    (0..tx.message.instructions.len())
        .map(|i| *tx.message.program_id(i).unwrap())
        .collect()
}

#[tokio::test]
async fn test_mintable_launch_submits_three_transactions_in_order() {
    let spec = form("6", "100", true)
        .into_spec(SupplyParsing::Strict)
        .unwrap();
    let launcher = launcher(MockLedger::new(), MockWallet::new());
    let issuer = launcher.wallet().pubkey();

    let receipt = launcher.launch(spec).await.unwrap();
    let submitted = launcher.ledger().submitted();
    assert_eq!(submitted.len(), 3);

    // Mint provisioning
    let mint_tx = &submitted[0];
    assert_eq!(
        program_ids(mint_tx),
        vec![
            system_program::id(),
            token_program_id(),
            token_program_id(),
            token_program_id()
        ]
    );
    let ixs = &mint_tx.message.instructions;
    match bincode::deserialize::<SystemInstruction>(&ixs[0].data).unwrap() {
        SystemInstruction::CreateAccount {
            lamports,
            space,
            owner,
        } => {
            assert_eq!(
                lamports,
                launcher
                    .ledger()
                    .rent()
                    .minimum_balance(receipt.layout.total_len())
            );
            assert_eq!(space, receipt.layout.mint_len as u64);
            assert_eq!(owner, token_program_id());
        }
        other => panic!("unexpected system instruction {:?}", other),
    }
    assert!(matches!(
        TokenInstruction::unpack(&ixs[1].data),
        Ok(TokenInstruction::MetadataPointerExtension)
    ));
    assert!(matches!(
        TokenInstruction::unpack(&ixs[2].data),
        Ok(TokenInstruction::InitializeMint { decimals: 6, .. })
    ));
    match TokenMetadataInstruction::unpack(&ixs[3].data).unwrap() {
        TokenMetadataInstruction::Initialize(init) => {
            assert_eq!(init.name, "Foo");
            assert_eq!(init.symbol, "FOO");
            assert_eq!(init.uri, "https://x/y.json");
        }
        other => panic!("unexpected metadata instruction {:?}", other),
    }
    assert!(mint_tx.message.account_keys.contains(&receipt.mint));

    // Account activation
    assert_eq!(
        program_ids(&submitted[1]),
        vec![spl_associated_token_account::id()]
    );

    // Supply issuance, scaled by a fixed 10^9 even at 6 decimals
    let supply_tx = &submitted[2];
    assert_eq!(program_ids(supply_tx), vec![token_program_id()]);
    assert!(matches!(
        TokenInstruction::unpack(&supply_tx.message.instructions[0].data),
        Ok(TokenInstruction::MintTo {
            amount: 100_000_000_000
        })
    ));
    assert!(supply_tx.message.account_keys.contains(&receipt.holding_account));

    for tx in &submitted {
        assert_eq!(tx.message.account_keys[0], issuer);
    }
    assert_eq!(
        receipt.signature(LaunchStep::SupplyIssuance),
        Some(supply_tx.signatures[0])
    );
}

#[tokio::test]
async fn test_scaling_by_mint_decimals() {
    let spec = form("6", "100", true)
        .into_spec(SupplyParsing::Strict)
        .unwrap();
    let launcher = launcher(MockLedger::new(), MockWallet::new())
        .with_scaling(SupplyScaling::MintDecimals);

    let receipt = launcher.launch(spec).await.unwrap();
    assert_eq!(receipt.minted_amount, Some(100_000_000));
}

#[tokio::test]
async fn test_non_mintable_launch_has_no_supply_transaction() {
    let spec = form("9", "not a number", false)
        .into_spec(SupplyParsing::Strict)
        .unwrap();
    let launcher = launcher(MockLedger::new(), MockWallet::new());

    let receipt = launcher.launch(spec).await.unwrap();
    let submitted = launcher.ledger().submitted();
    assert_eq!(submitted.len(), 2);
    assert_eq!(receipt.minted_amount, None);
    assert_eq!(
        program_ids(&submitted[1]),
        vec![spl_associated_token_account::id()]
    );
}

#[tokio::test]
async fn test_declined_mint_transaction_stops_the_launch() {
    let observer = Arc::new(RecordingObserver::new());
    let spec = form("9", "5", true)
        .into_spec(SupplyParsing::Strict)
        .unwrap();
    let launcher = launcher(MockLedger::new(), MockWallet::new().declining_call(1))
        .with_observer(observer.clone());

    let failure = launcher.launch(spec).await.unwrap_err();

    assert!(matches!(
        failure.error,
        SdkError::SubmissionFailure {
            step: LaunchStep::MintProvisioning,
            ..
        }
    ));
    assert_eq!(launcher.wallet().calls(), 1);
    assert!(launcher.ledger().submitted().is_empty());
    assert_eq!(
        observer.states(),
        vec![LaunchState::Sizing, LaunchState::Failed]
    );
}

#[tokio::test]
async fn test_rejected_mint_transaction_never_attempts_activation() {
    let spec = form("9", "5", true)
        .into_spec(SupplyParsing::Strict)
        .unwrap();
    let launcher = launcher(MockLedger::new().rejecting_attempt(1), MockWallet::new());

    let failure = launcher.launch(spec).await.unwrap_err();

    assert_eq!(failure.reached, LaunchState::Sizing);
    assert_eq!(launcher.ledger().attempts(), 1);
    assert_eq!(launcher.wallet().calls(), 1);
    assert!(!failure.is_partial());
}

#[tokio::test]
async fn test_rejected_activation_never_issues_supply() {
    let spec = form("9", "5", true)
        .into_spec(SupplyParsing::Strict)
        .unwrap();
    let launcher = launcher(MockLedger::new().rejecting_attempt(2), MockWallet::new());

    let failure = launcher.launch(spec).await.unwrap_err();

    assert_eq!(failure.reached, LaunchState::MintTxSubmitted);
    assert_eq!(failure.error.failed_step(), Some(LaunchStep::AccountActivation));
    assert_eq!(launcher.ledger().submitted().len(), 1);
    assert_eq!(launcher.ledger().attempts(), 2);
    assert!(failure.signature(LaunchStep::MintProvisioning).is_some());
}

#[tokio::test]
async fn test_rent_query_failure_is_sizing_failure() {
    let spec = form("9", "5", true)
        .into_spec(SupplyParsing::Strict)
        .unwrap();
    let launcher = launcher(MockLedger::new().failing_rent_query(), MockWallet::new());

    let failure = launcher.launch(spec).await.unwrap_err();

    assert!(matches!(failure.error, SdkError::SizingFailure(_)));
    assert_eq!(failure.reached, LaunchState::Sizing);
    assert_eq!(launcher.wallet().calls(), 0);
}

#[test]
fn test_strict_parsing_rejects_malformed_supply() {
    for supply in ["", "abc", "-5", "1.5"] {
        let result = form("9", supply, true).into_spec(SupplyParsing::Strict);
        assert!(
            matches!(result, Err(SdkError::MalformedInput(_))),
            "supply {:?} should be rejected",
            supply
        );
    }
}

#[tokio::test]
async fn test_lenient_parsing_mints_zero_for_garbage() {
    let spec = form("9", "abc", true)
        .into_spec(SupplyParsing::Lenient)
        .unwrap();
    assert_eq!(spec.initial_supply, 0);

    let launcher = launcher(MockLedger::new(), MockWallet::new());
    let receipt = launcher.launch(spec).await.unwrap();

    // Mintable tokens always get a supply transaction, even for zero
    assert_eq!(receipt.minted_amount, Some(0));
    assert_eq!(launcher.ledger().submitted().len(), 3);
}

#[tokio::test]
async fn test_nine_decimal_supply_scaling() {
    let spec = form("9", "5", true)
        .into_spec(SupplyParsing::Strict)
        .unwrap();
    let launcher = launcher(MockLedger::new(), MockWallet::new());

    let receipt = launcher.launch(spec).await.unwrap();
    assert_eq!(receipt.minted_amount, Some(5_000_000_000));
}

#[tokio::test]
async fn test_preflight_against_issuer_balance() {
    let spec = form("9", "5", true)
        .into_spec(SupplyParsing::Strict)
        .unwrap();
    let wallet = MockWallet::new();
    let issuer = wallet.pubkey();

    let funded = launcher(MockLedger::new().with_balance(issuer, 1_000_000_000), wallet);
    let check = funded.preflight(&spec).await.unwrap();
    assert!(check.is_sufficient());
    assert!(check.holding_rent > 0);
    assert!(check.fee_allowance > 0);
    assert_eq!(check.required(), check.mint_rent + check.holding_rent + check.fee_allowance);

    // Enough for the mint alone, not for activation and fees
    let wallet = MockWallet::new();
    let issuer = wallet.pubkey();
    let short = launcher(MockLedger::new().with_balance(issuer, check.mint_rent), wallet);
    let check = short.preflight(&spec).await.unwrap();
    assert_eq!(check.balance, check.mint_rent);
    assert!(!check.is_sufficient());
    assert_eq!(check.shortfall(), check.holding_rent + check.fee_allowance);
}
