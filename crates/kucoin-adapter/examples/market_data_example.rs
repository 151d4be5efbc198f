/*
[INPUT]:  Optional market filter (e.g., "USDS")
[OUTPUT]: Spot symbols and active futures contracts
[POS]:    Examples - public queries on both hosts
[UPDATE]: When adding new public endpoints
*/

use kucoin_adapter::*;

/// Example: Query public reference data (no credentials required)
#[tokio::main]
async fn main() {
    println!("=== KuCoin Public Data Example ===\n");

    let client = match KucoinClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created (no credentials needed for public endpoints)\n");

    println!("Querying spot symbols in the USDS market...");
    match client.spot_symbols(Some("USDS")).await {
        Ok(symbols) => {
            println!("✓ {} symbols", symbols.len());
            for symbol in symbols.iter().take(5) {
                println!(
                    "  {} tick={} min_size={}",
                    symbol.symbol, symbol.price_increment, symbol.base_min_size
                );
            }
        }
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying active futures contracts...");
    match client.futures_contracts().await {
        Ok(contracts) => {
            println!("✓ {} contracts", contracts.len());
            for contract in contracts.iter().take(5) {
                println!(
                    "  {} mark={} max_leverage={}",
                    contract.symbol, contract.mark_price, contract.max_leverage
                );
            }
        }
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Public data example complete");
}
