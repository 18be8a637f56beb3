//! Basic usage example for the Token Launch SDK
//!
//! Runs a complete launch against the in-memory ledger, so it needs no
//! cluster. Swap `MockLedger`/`MockWallet` for `RpcLedger`/`KeypairWallet`
//! to launch for real.

use std::sync::Arc;

use token_launch_sdk::testing::{MockLedger, MockWallet};
use token_launch_sdk::{AccountLayout, SdkConfig, SupplyParsing, TokenForm, TokenLauncher};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("=== Token Launch SDK Basic Usage ===\n");

    // 1. Configuration
    let config = SdkConfig::devnet();
    println!("SDK Configuration:");
    println!("  RPC URL: {}", config.rpc_url);
    println!("  Commitment: {}", config.commitment);

    // 2. Raw input, frozen into a spec
    let form = TokenForm {
        name: "Foo".to_string(),
        symbol: "FOO".to_string(),
        uri: "https://x/y.json".to_string(),
        initial_supply: "100".to_string(),
        ..TokenForm::default()
    };
    let spec = form.into_spec(SupplyParsing::Strict)?;

    // 3. Size before launching
    let layout = AccountLayout::estimate(&spec)?;
    println!("\nAccount layout:");
    println!("  Mint with pointer: {} bytes", layout.mint_len);
    println!("  Metadata entry:    {} bytes", layout.metadata_len);
    println!("  Total:             {} bytes", layout.total_len());

    // 4. Launch
    let ledger = Arc::new(MockLedger::new());
    let wallet = Arc::new(MockWallet::new());
    let launcher = TokenLauncher::new(ledger.clone(), wallet)
        .with_scaling(config.supply_scaling);

    match launcher.launch(spec).await {
        Ok(receipt) => {
            println!("\nToken created");
            println!("  Mint: {}", receipt.mint);
            println!("  Holding account: {}", receipt.holding_account);
            println!("  Rent: {} lamports", receipt.rent_lamports);
            if let Some(amount) = receipt.minted_amount {
                println!("  Minted: {} base units", amount);
            }
            for (step, signature) in &receipt.signatures {
                println!("  {}: {}", step, signature);
            }
        }
        Err(failure) => {
            println!("\nLaunch failed after {}: {}", failure.reached, failure.error);
        }
    }

    println!("\nTransactions submitted: {}", ledger.submitted().len());
    Ok(())
}
