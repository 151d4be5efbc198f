/*
[INPUT]:  Parsed subcommand and a configured client
[OUTPUT]: JSON value of the operation result
[POS]:    Command layer - maps subcommands onto client operations
[UPDATE]: When adding subcommands or client operations
*/

use clap::{Args, Subcommand};
use kucoin_adapter::{
    AccountType, FuturesFillsQuery, FuturesOrderRequest, FuturesOrdersQuery, KucoinClient,
    OrderStatus, PageRequest, Result, Side, SpotFillsQuery, SpotOrderRequest, SpotOrdersQuery,
};
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List spot trading pairs
    Symbols {
        #[arg(long)]
        market: Option<String>,
    },
    /// List active futures contracts
    Contracts,
    /// Spot account balances
    Accounts {
        #[arg(long)]
        currency: Option<String>,
        #[arg(long = "type", value_parser = parse_wire::<AccountType>)]
        account_type: Option<AccountType>,
    },
    /// Futures account overview
    FuturesAccount {
        #[arg(long)]
        currency: Option<String>,
    },
    /// List orders
    Orders {
        #[arg(long)]
        futures: bool,
        #[arg(long, value_parser = parse_wire::<OrderStatus>)]
        status: Option<OrderStatus>,
        #[arg(long)]
        symbol: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one order
    Order {
        order_id: String,
        #[arg(long)]
        futures: bool,
    },
    /// Cancel one order
    Cancel {
        order_id: String,
        #[arg(long)]
        futures: bool,
    },
    /// List fills
    Fills {
        #[arg(long)]
        futures: bool,
        #[arg(long)]
        order_id: Option<String>,
        #[arg(long)]
        symbol: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Place a spot order; market order when no price is given
    PlaceSpot {
        #[arg(long)]
        symbol: String,
        #[arg(long, value_parser = parse_wire::<Side>)]
        side: Side,
        #[arg(long)]
        size: Decimal,
        #[arg(long)]
        price: Option<Decimal>,
        #[arg(long)]
        client_oid: Option<String>,
    },
    /// Place a futures order; market order when no price is given
    PlaceFutures {
        #[arg(long)]
        symbol: String,
        #[arg(long, value_parser = parse_wire::<Side>)]
        side: Side,
        /// Contracts
        #[arg(long)]
        size: u64,
        #[arg(long)]
        leverage: Decimal,
        #[arg(long)]
        price: Option<Decimal>,
        #[arg(long)]
        reduce_only: bool,
        #[arg(long)]
        client_oid: Option<String>,
    },
    /// Show the position of one futures contract
    Position { symbol: String },
    /// List open futures positions
    Positions {
        #[arg(long)]
        currency: Option<String>,
    },
}

#[derive(Args, Debug, Clone, Copy)]
pub struct PageArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long, default_value_t = 50)]
    pub page_size: u32,
}

impl From<PageArgs> for PageRequest {
    fn from(args: PageArgs) -> Self {
        PageRequest::new(args.page, args.page_size)
    }
}

impl Command {
    /// Whether the operation changes account state
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::Cancel { .. } | Command::PlaceSpot { .. } | Command::PlaceFutures { .. }
        )
    }

    pub async fn run(&self, client: &KucoinClient) -> Result<Value> {
        match self {
            Command::Symbols { market } => to_json(client.spot_symbols(market.as_deref()).await?),
            Command::Contracts => to_json(client.futures_contracts().await?),
            Command::Accounts {
                currency,
                account_type,
            } => to_json(client.accounts(currency.as_deref(), *account_type).await?),
            Command::FuturesAccount { currency } => {
                to_json(client.futures_account(currency.as_deref()).await?)
            }
            Command::Orders {
                futures: false,
                status,
                symbol,
                page,
            } => {
                let query = SpotOrdersQuery {
                    status: *status,
                    symbol: symbol.clone(),
                    ..Default::default()
                };
                to_json(client.spot_orders(&query, (*page).into()).await?)
            }
            Command::Orders {
                futures: true,
                status,
                symbol,
                page,
            } => {
                let query = FuturesOrdersQuery {
                    status: *status,
                    symbol: symbol.clone(),
                    ..Default::default()
                };
                to_json(client.futures_orders(&query, (*page).into()).await?)
            }
            Command::Order { order_id, futures } => {
                if *futures {
                    to_json(client.futures_order(order_id).await?)
                } else {
                    to_json(client.spot_order(order_id).await?)
                }
            }
            Command::Cancel { order_id, futures } => {
                if *futures {
                    to_json(client.cancel_futures_order(order_id).await?)
                } else {
                    to_json(client.cancel_spot_order(order_id).await?)
                }
            }
            Command::Fills {
                futures: false,
                order_id,
                symbol,
                page,
            } => {
                let query = SpotFillsQuery {
                    order_id: order_id.clone(),
                    symbol: symbol.clone(),
                    ..Default::default()
                };
                to_json(client.spot_fills(&query, (*page).into()).await?)
            }
            Command::Fills {
                futures: true,
                order_id,
                symbol,
                page,
            } => {
                let query = FuturesFillsQuery {
                    order_id: order_id.clone(),
                    symbol: symbol.clone(),
                    ..Default::default()
                };
                to_json(client.futures_fills(&query, (*page).into()).await?)
            }
            Command::PlaceSpot {
                symbol,
                side,
                size,
                price,
                client_oid,
            } => {
                let mut order = match price {
                    Some(price) => SpotOrderRequest::limit(symbol.as_str(), *side, *price, *size),
                    None => SpotOrderRequest::market(symbol.as_str(), *side, *size),
                };
                order.client_oid = client_oid.clone();
                to_json(client.place_spot_order(order).await?)
            }
            Command::PlaceFutures {
                symbol,
                side,
                size,
                leverage,
                price,
                reduce_only,
                client_oid,
            } => {
                let mut order = match price {
                    Some(price) => {
                        FuturesOrderRequest::limit(symbol.as_str(), *side, *leverage, *price, *size)
                    }
                    None => FuturesOrderRequest::market(symbol.as_str(), *side, *leverage, *size),
                };
                order.reduce_only = reduce_only.then_some(true);
                order.client_oid = client_oid.clone();
                to_json(client.place_futures_order(order).await?)
            }
            Command::Position { symbol } => to_json(client.futures_position(symbol).await?),
            Command::Positions { currency } => {
                to_json(client.futures_positions(currency.as_deref()).await?)
            }
        }
    }
}

fn to_json<T: Serialize>(value: T) -> Result<Value> {
    serde_json::to_value(value).map_err(kucoin_adapter::KucoinError::Serialization)
}

/// Parse a flag value using the venue's wire name, e.g. `buy` or `active`
pub fn parse_wire<T: DeserializeOwned>(raw: &str) -> std::result::Result<T, String> {
    serde_json::from_value(Value::String(raw.to_string()))
        .map_err(|_| format!("unsupported value {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(subcommand)]
        command: Command,
    }

    #[test]
    fn test_parse_wire() {
        assert_eq!(parse_wire::<Side>("sell"), Ok(Side::Sell));
        assert_eq!(parse_wire::<AccountType>("trade"), Ok(AccountType::Trade));
        assert!(parse_wire::<Side>("SELL").is_err());
    }

    #[test]
    fn test_parse_place_spot() {
        let cli = TestCli::try_parse_from([
            "test", "place-spot", "--symbol", "BTC-USDT", "--side", "buy", "--size", "0.01",
            "--price", "25000.5",
        ])
        .unwrap();

        match &cli.command {
            Command::PlaceSpot { side, price, .. } => {
                assert_eq!(*side, Side::Buy);
                assert_eq!(*price, Some("25000.5".parse().unwrap()));
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(cli.command.is_mutating());
    }

    #[test]
    fn test_parse_orders_defaults_page() {
        let cli = TestCli::try_parse_from(["test", "orders", "--futures", "--status", "done"])
            .unwrap();
        match cli.command {
            Command::Orders {
                futures,
                status,
                page,
                ..
            } => {
                assert!(futures);
                assert_eq!(status, Some(OrderStatus::Done));
                assert_eq!(PageRequest::from(page), PageRequest::default());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
