/*
[INPUT]:  KC_API_KEY / KC_API_SECRET / KC_API_PASSPHRASE environment variables
[OUTPUT]: Order placement and cancellation on the sandbox hosts
[POS]:    Examples - trading operations
[UPDATE]: When trading API changes
*/

use kucoin_adapter::*;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Example: place and cancel a far-from-market spot limit order on the sandbox
#[tokio::main]
async fn main() {
    println!("=== KuCoin Trading Example (sandbox) ===\n");

    let credentials = match (
        std::env::var("KC_API_KEY"),
        std::env::var("KC_API_SECRET"),
        std::env::var("KC_API_PASSPHRASE"),
    ) {
        (Ok(key), Ok(secret), Ok(passphrase)) => Credentials::new(key, secret, passphrase),
        _ => {
            eprintln!("Set KC_API_KEY, KC_API_SECRET and KC_API_PASSPHRASE to run this example");
            return;
        }
    };

    let client = match KucoinClient::builder()
        .endpoints(EndpointConfig::sandbox())
        .credentials(credentials)
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ Authenticated sandbox client created");

    match client.accounts(Some("USDT"), Some(AccountType::Trade)).await {
        Ok(accounts) => {
            for account in accounts {
                println!(
                    "  {} {} available={}",
                    account.account_type, account.currency, account.available
                );
            }
        }
        Err(e) if e.is_auth_error() => {
            eprintln!("✗ Credentials rejected: {}", e);
            return;
        }
        Err(e) => println!("✗ Error: {}", e),
    }

    let order = SpotOrderRequest::limit(
        "BTC-USDT",
        Side::Buy,
        Decimal::from_str("1000").unwrap_or_default(),
        Decimal::from_str("0.0001").unwrap_or_default(),
    );
    println!("\nPlacing {:?} order...", order.order_type);
    let placed = match client.place_spot_order(order).await {
        Ok(placed) => {
            println!("✓ Order placed: {}", placed.order_id);
            placed
        }
        Err(e) => {
            println!("✗ Error: {}", e);
            return;
        }
    };

    match client.cancel_spot_order(&placed.order_id).await {
        Ok(cancelled) => println!("✓ Cancelled: {:?}", cancelled.cancelled_order_ids),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Trading example complete");
}
