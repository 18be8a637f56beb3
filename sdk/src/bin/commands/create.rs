// Token creation command

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use serde_json::json;
use token_launch_sdk::{
    KeypairWallet, LaunchReceipt, Ledger, RpcLedger, SdkConfig, SupplyScaling, TokenLauncher,
    TokenSpec, Wallet,
};

use super::utils::{error, expand_tilde, info, sol, success, warn, TokenArgs};

#[derive(Args)]
pub struct CreateCmd {
    #[command(flatten)]
    token: TokenArgs,

    /// Scale the supply by the mint's decimals instead of a fixed 10^9
    #[arg(long)]
    scale_by_decimals: bool,

    /// Warn before launching if the issuer cannot cover rent and fees
    #[arg(long)]
    check_balance: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

pub async fn execute(cmd: CreateCmd, config: SdkConfig) -> Result<()> {
    let mut config = cmd.token.configure(config);
    if cmd.scale_by_decimals {
        config = config.with_supply_scaling(SupplyScaling::MintDecimals);
    }
    let spec = cmd.token.into_spec(&config)?;

    let ledger = Arc::new(RpcLedger::from_config(&config)?);
    let wallet = Arc::new(KeypairWallet::from_file(expand_tilde(&config.keypair_path)?)?);

    info(&format!(
        "Launching {} ({}) on {} at {:?} commitment",
        spec.name,
        spec.symbol,
        ledger.rpc_url(),
        ledger.commitment().commitment
    ));

    let launcher = TokenLauncher::new(ledger, wallet).with_scaling(config.supply_scaling);

    if cmd.check_balance {
        check_balance(&launcher, &spec).await?;
    }

    match launcher.launch(spec).await {
        Ok(receipt) => {
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&receipt_json(&receipt))?);
            } else {
                print_receipt(&receipt);
            }
            Ok(())
        }
        Err(failure) => {
            error(&format!("Launch failed after {}: {}", failure.reached, failure.error));
            if failure.is_partial() {
                warn(&format!("Mint {} was already created", failure.mint));
                for (step, signature) in &failure.signatures {
                    warn(&format!("  {}: {}", step, signature));
                }
            }
            Err(failure.into())
        }
    }
}

async fn check_balance<L: Ledger, W: Wallet>(
    launcher: &TokenLauncher<L, W>,
    spec: &TokenSpec,
) -> Result<()> {
    let check = launcher.preflight(spec).await?;
    let breakdown = format!(
        "mint rent {} + holding account rent {} + fees {}",
        sol(check.mint_rent),
        sol(check.holding_rent),
        sol(check.fee_allowance)
    );

    if check.is_sufficient() {
        info(&format!(
            "Issuer balance {} covers {} ({})",
            sol(check.balance),
            sol(check.required()),
            breakdown
        ));
    } else {
        warn(&format!(
            "Issuer balance {} is {} short of {} ({}); the launch will likely fail",
            sol(check.balance),
            sol(check.shortfall()),
            sol(check.required()),
            breakdown
        ));
    }
    Ok(())
}

fn print_receipt(receipt: &LaunchReceipt) {
    success(&format!("Token created! Mint: {}", receipt.mint));
    info(&format!("Holding account: {}", receipt.holding_account));
    info(&format!(
        "Account size: {} bytes ({} mint + {} metadata), rent {}",
        receipt.layout.total_len(),
        receipt.layout.mint_len,
        receipt.layout.metadata_len,
        sol(receipt.rent_lamports)
    ));
    if let Some(amount) = receipt.minted_amount {
        info(&format!("Minted {} base units", amount));
    }
    for (step, signature) in &receipt.signatures {
        info(&format!("{} signature: {}", step, signature));
    }
}

fn receipt_json(receipt: &LaunchReceipt) -> serde_json::Value {
    let signatures: Vec<_> = receipt
        .signatures
        .iter()
        .map(|(step, signature)| json!({ "step": step.to_string(), "signature": signature.to_string() }))
        .collect();

    json!({
        "mint": receipt.mint.to_string(),
        "holding_account": receipt.holding_account.to_string(),
        "mint_len": receipt.layout.mint_len,
        "metadata_len": receipt.layout.metadata_len,
        "rent_lamports": receipt.rent_lamports,
        "minted_amount": receipt.minted_amount,
        "signatures": signatures,
    })
}
