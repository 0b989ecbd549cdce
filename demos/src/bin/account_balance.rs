//! Demo 2: Account Balance
//!
//! Showcases: signed requests, NTP timestamps, private market endpoints
//!
//! Requires CRYPTOMKT_API_KEY and CRYPTOMKT_API_SECRET.
//! Set USE_SYSTEM_CLOCK=1 to skip the NTP lookup.
//!
//! Run: cargo run --bin account_balance

use colored::*;
use cryptomkt_auth::{Credentials, SystemClock};
use cryptomkt_rest::{ClientConfig, CryptoMktClient, OrdersQuery, RestError};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  ACCOUNT BALANCE".cyan().bold());
    println!("{}", "  CryptoMarket private endpoints".cyan());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let mut config = ClientConfig::new().with_credentials(Credentials::from_env()?);
    if std::env::var("USE_SYSTEM_CLOCK").is_ok() {
        config = config.with_clock(SystemClock);
    }
    let client = CryptoMktClient::with_config(config)?;

    let balances = match client.balance().await {
        Ok(balances) => balances,
        Err(e) if e.is_auth_failure() => {
            println!("{} Credentials rejected: {}", "✗".red(), e);
            return Ok(());
        }
        Err(RestError::Clock(e)) => {
            println!("{} Could not get network time: {}", "✗".red(), e);
            println!("  Retry with USE_SYSTEM_CLOCK=1");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!(
        "  {:<8} {:>18} {:>18} {:>18}",
        "WALLET".white().bold(),
        "AVAILABLE".white().bold(),
        "HELD".white().bold(),
        "TOTAL".white().bold()
    );
    println!("  {}", "─".repeat(64));
    for balance in &balances {
        println!(
            "  {:<8} {:>18} {:>18} {:>18}",
            balance.wallet.yellow(),
            balance.available,
            balance.held(),
            balance.balance
        );
    }
    println!();

    let market = std::env::args().nth(1).unwrap_or_else(|| "ETHCLP".to_string());
    let orders = client
        .market()?
        .active_orders(&OrdersQuery::new(&market))
        .await?;

    println!("{} {} active orders on {}", "✓".green(), orders.len(), market);
    for order in orders.iter() {
        let remaining = order.amount.remaining.unwrap_or(order.amount.original);
        println!(
            "  {} {:<4} {:>14} @ {:<14} {}",
            order.id.dimmed(),
            order.side,
            remaining,
            order.price,
            order.created_at.dimmed()
        );
    }

    Ok(())
}
