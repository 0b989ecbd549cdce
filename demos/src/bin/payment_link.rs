//! Demo 3: Payment Link
//!
//! Showcases: payment gateway, business status codes, status polling
//!
//! Requires CRYPTOMKT_API_KEY and CRYPTOMKT_API_SECRET.
//!
//! Run: cargo run --bin payment_link <AMOUNT_CLP> <RECEIVER_EMAIL>

use colored::*;
use cryptomkt_auth::Credentials;
use cryptomkt_rest::{CryptoMktClient, PaymentRequest, PaymentStatus, RestError};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const POLL_INTERVAL: Duration = Duration::from_secs(15);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(amount), Some(receiver)) = (args.next(), args.next()) else {
        eprintln!("usage: payment_link <AMOUNT_CLP> <RECEIVER_EMAIL>");
        std::process::exit(2);
    };
    let amount = Decimal::from_str(&amount)?;

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  PAYMENT LINK".cyan().bold());
    println!("{}", "  CryptoMarket payment gateway".cyan());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = CryptoMktClient::with_credentials(Credentials::from_env()?)?;
    let request = PaymentRequest::new(amount, "CLP", receiver)
        .with_external_id(format!("demo-{}", chrono::Utc::now().timestamp()));

    let order = client.create_payment(&request).await?;
    println!("{} Payment order {} created", "✓".green(), order.id.yellow());
    if let Some(url) = &order.payment_url {
        println!("  Pay at: {}", url.underline());
    }
    if let (Some(expected), Some(currency)) = (order.expected_amount, &order.expected_currency) {
        println!("  Expecting {} {}", expected, currency);
    }
    println!();

    loop {
        tokio::time::sleep(POLL_INTERVAL).await;

        match client.payment_status(&order.id).await {
            Ok(current) => {
                println!("  {} {}", "status:".dimmed(), current.status.as_str());
                if current.status == PaymentStatus::Success {
                    println!("{} Payment received", "✓".green());
                    break;
                }
            }
            Err(RestError::Payment { status, .. }) => {
                println!("{} Payment failed: {}", "✗".red(), status);
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
