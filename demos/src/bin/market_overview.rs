//! Demo 1: Market Overview
//!
//! Showcases: public endpoints, tolerant decimal parsing, pagination
//!
//! Run: cargo run --bin market_overview [MARKET]

use chrono::{Duration, Utc};
use colored::*;
use cryptomkt_rest::{BookQuery, CryptoMktClient, OrderSide, TradesQuery};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let market = std::env::args().nth(1).unwrap_or_else(|| "ETHCLP".to_string());

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  MARKET OVERVIEW".cyan().bold());
    println!("{}", format!("  CryptoMarket public data for {market}").cyan());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = CryptoMktClient::new()?;

    let markets = client.markets().await?;
    println!("{} {} markets listed", "✓".green(), markets.len());
    println!("  {}\n", markets.join(", ").dimmed());

    match client.ticker(&market).await? {
        Some(ticker) => {
            println!("  {:<12} {:>16}", "LAST".white().bold(), fmt_opt(ticker.last_price));
            println!("  {:<12} {:>16}", "BID", fmt_opt(ticker.bid).green());
            println!("  {:<12} {:>16}", "ASK", fmt_opt(ticker.ask).red());
            println!("  {:<12} {:>16}", "SPREAD", fmt_opt(ticker.spread()));
            println!("  {:<12} {:>16}", "24H VOLUME", fmt_opt(ticker.volume));
        }
        None => println!("{} No ticker for {}", "✗".red(), market),
    }
    println!();

    for side in [OrderSide::Buy, OrderSide::Sell] {
        let book = client
            .public()
            .book(&BookQuery::new(&market, side).with_limit(5))
            .await?;
        println!("  {} ({} entries)", side.to_string().to_uppercase().white().bold(), book.len());
        for entry in book.iter().take(5) {
            println!("    {:>16} @ {:<16}", entry.amount, entry.price);
        }
    }
    println!();

    let today = Utc::now().date_naive();
    let trades = client
        .public()
        .trades(&TradesQuery::new(&market).between(today - Duration::days(1), today))
        .await?;
    println!("  {} trades in the last day", trades.len().to_string().yellow());
    if trades.next_page().is_some() {
        println!("  {}", "(more pages available)".dimmed());
    }

    Ok(())
}

fn fmt_opt(value: Option<rust_decimal::Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
