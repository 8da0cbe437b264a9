use clap::Parser;

use crate::{query, reader};

/// Top level CLI struct
#[derive(Parser)]
#[command(name = "asof")]
#[command(about = "Query an ERC-20 balance as of a calendar date")]
pub struct Cli {
    /// Wallet address to query
    #[arg(long)]
    pub wallet: String,

    /// Token contract address
    #[arg(long)]
    pub token: String,

    /// Calendar date, YYYY-MM-DD or RFC 3339
    #[arg(long)]
    pub date: String,

    /// Ethereum JSON-RPC endpoint
    #[arg(long, env = "ETH_RPC_URL")]
    pub rpc_url: String,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl Cli {
    pub async fn handle(&self) -> crate::Result<()> {
        let wallet = query::parse_address(&self.wallet)?;
        let token = query::parse_address(&self.token)?;
        let reader = reader::connect_http(&self.rpc_url)?;

        let report = query::balance_at_date(&reader, wallet, token, &self.date).await?;

        let output = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        }
        .expect("report serialization is infallible");
        println!("{output}");

        Ok(())
    }
}
