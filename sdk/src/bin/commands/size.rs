// Account size and rent report

use anyhow::Result;
use clap::Args;
use serde_json::json;
use solana_sdk::rent::Rent;
use token_launch_sdk::{AccountLayout, RentCalculator, RpcLedger, SdkConfig};

use super::utils::{info, sol, TokenArgs};

#[derive(Args)]
pub struct SizeCmd {
    #[command(flatten)]
    token: TokenArgs,

    /// Use the default rent rule instead of asking the cluster
    #[arg(long)]
    offline: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

pub async fn execute(cmd: SizeCmd, config: SdkConfig) -> Result<()> {
    let config = cmd.token.configure(config);
    let spec = cmd.token.into_spec(&config)?;
    let layout = AccountLayout::estimate(&spec)?;

    let rent = if cmd.offline {
        Rent::default().minimum_balance(layout.total_len())
    } else {
        let ledger = RpcLedger::from_config(&config)?;
        RentCalculator::rent_exempt_minimum(&ledger, &layout).await?
    };

    if cmd.json {
        let report = json!({
            "mint_len": layout.mint_len,
            "metadata_len": layout.metadata_len,
            "total_len": layout.total_len(),
            "rent_lamports": rent,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        info(&format!("Mint with pointer: {} bytes", layout.mint_len));
        info(&format!("Metadata entry:    {} bytes", layout.metadata_len));
        info(&format!("Total:             {} bytes", layout.total_len()));
        info(&format!("Rent-exempt minimum: {} ({} lamports)", sol(rent), rent));
    }
    Ok(())
}
