/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed payloads carried in the `data` field of responses
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{OrderType, Side};

/// Spot trading pair from GET /api/v2/symbols
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    pub symbol: String,
    pub name: String,
    pub base_currency: String,
    pub quote_currency: String,
    pub fee_currency: String,
    pub market: String,
    #[serde(default, with = "lenient_decimal")]
    pub base_min_size: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub quote_min_size: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub base_max_size: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub quote_max_size: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub base_increment: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub quote_increment: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub price_increment: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub price_limit_rate: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub min_funds: Decimal,
    #[serde(default)]
    pub is_margin_enabled: bool,
    #[serde(default)]
    pub enable_trading: bool,
}

/// Spot account balance from GET /api/v1/accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub currency: String,
    #[serde(rename = "type")]
    pub account_type: String,
    #[serde(default, with = "lenient_decimal")]
    pub balance: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub available: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub holds: Decimal,
}

/// Acknowledgement of a placed spot or futures order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPlaced {
    pub order_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginOrderPlaced {
    pub order_id: String,
    #[serde(default, with = "lenient_decimal")]
    pub borrow_size: Decimal,
    #[serde(default)]
    pub loan_apply_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelledOrders {
    #[serde(default)]
    pub cancelled_order_ids: Vec<String>,
}

/// Spot fill from GET /api/v1/fills
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fill {
    pub symbol: String,
    pub trade_id: String,
    pub order_id: String,
    #[serde(default)]
    pub counter_order_id: Option<String>,
    pub side: Side,
    /// "taker" or "maker"
    pub liquidity: String,
    #[serde(default)]
    pub force_taker: bool,
    #[serde(default, with = "lenient_decimal")]
    pub price: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub size: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub funds: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub fee: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub fee_rate: Decimal,
    pub fee_currency: String,
    #[serde(default)]
    pub stop: Option<String>,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub created_at: i64,
    #[serde(default)]
    pub trade_type: Option<String>,
}

/// Spot order from GET /api/v1/orders and /api/v1/orders/{orderId}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotOrder {
    pub id: String,
    pub symbol: String,
    #[serde(default)]
    pub op_type: Option<String>,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub side: Side,
    #[serde(default, with = "lenient_decimal")]
    pub price: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub size: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub funds: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub deal_funds: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub deal_size: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub fee: Decimal,
    #[serde(default)]
    pub fee_currency: Option<String>,
    #[serde(default)]
    pub stp: Option<String>,
    #[serde(default)]
    pub stop: Option<String>,
    #[serde(default)]
    pub stop_triggered: bool,
    #[serde(default, with = "lenient_decimal")]
    pub stop_price: Decimal,
    #[serde(default)]
    pub time_in_force: Option<String>,
    #[serde(default)]
    pub post_only: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub iceberg: bool,
    #[serde(default, with = "lenient_decimal")]
    pub visible_size: Decimal,
    #[serde(default)]
    pub cancel_after: i64,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub client_oid: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub cancel_exist: bool,
    pub created_at: i64,
    #[serde(default)]
    pub trade_type: Option<String>,
}

/// Futures account overview from GET /api/v1/account-overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuturesAccount {
    /// marginBalance + unrealised PNL
    #[serde(default, with = "lenient_decimal")]
    pub account_equity: Decimal,
    #[serde(default, rename = "unrealisedPNL", with = "lenient_decimal")]
    pub unrealised_pnl: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub margin_balance: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub position_margin: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub order_margin: Decimal,
    /// Held for withdrawals and transfers out
    #[serde(default, with = "lenient_decimal")]
    pub frozen_funds: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub available_balance: Decimal,
    pub currency: String,
}

/// Futures order from GET /api/v1/orders and /api/v1/orders/{orderId}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuturesOrder {
    pub id: String,
    pub symbol: String,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub side: Side,
    #[serde(default, with = "lenient_decimal")]
    pub price: Decimal,
    /// Contracts
    pub size: u64,
    #[serde(default, with = "lenient_decimal")]
    pub value: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub deal_value: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub deal_size: Decimal,
    #[serde(default)]
    pub stp: Option<String>,
    #[serde(default)]
    pub stop: Option<String>,
    #[serde(default)]
    pub stop_price_type: Option<String>,
    #[serde(default)]
    pub stop_triggered: bool,
    #[serde(default, with = "lenient_decimal")]
    pub stop_price: Decimal,
    #[serde(default)]
    pub time_in_force: Option<String>,
    #[serde(default)]
    pub post_only: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub iceberg: bool,
    #[serde(default, with = "lenient_decimal")]
    pub leverage: Decimal,
    #[serde(default)]
    pub force_hold: bool,
    #[serde(default)]
    pub close_order: bool,
    #[serde(default, with = "lenient_decimal")]
    pub visible_size: Decimal,
    #[serde(default)]
    pub client_oid: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub cancel_exist: bool,
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: Option<i64>,
    #[serde(default)]
    pub end_at: Option<i64>,
    #[serde(default)]
    pub order_time: Option<i64>,
    #[serde(default)]
    pub settle_currency: Option<String>,
    pub status: String,
    #[serde(default, with = "lenient_decimal")]
    pub filled_size: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub filled_value: Decimal,
    #[serde(default)]
    pub reduce_only: bool,
}

/// Futures fill from GET /api/v1/fills
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuturesFill {
    pub symbol: String,
    pub trade_id: String,
    pub order_id: String,
    pub side: Side,
    pub liquidity: String,
    #[serde(default)]
    pub force_taker: bool,
    #[serde(default, with = "lenient_decimal")]
    pub price: Decimal,
    /// Contracts
    pub size: u64,
    #[serde(default, with = "lenient_decimal")]
    pub value: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub fee_rate: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub fix_fee: Decimal,
    pub fee_currency: String,
    #[serde(default)]
    pub stop: Option<String>,
    #[serde(default, with = "lenient_decimal")]
    pub fee: Decimal,
    pub order_type: OrderType,
    /// trade, liquidation, ADL or settlement
    pub trade_type: String,
    pub created_at: i64,
    #[serde(default)]
    pub settle_currency: Option<String>,
    /// Nanoseconds
    #[serde(default)]
    pub trade_time: Option<i64>,
}

/// Futures position from GET /api/v1/position and /api/v1/positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuturesPosition {
    pub id: String,
    pub symbol: String,
    #[serde(default)]
    pub auto_deposit: bool,
    #[serde(default, with = "lenient_decimal")]
    pub maint_margin_req: Decimal,
    #[serde(default)]
    pub risk_limit: i64,
    #[serde(default, with = "lenient_decimal")]
    pub real_leverage: Decimal,
    #[serde(default)]
    pub cross_mode: bool,
    #[serde(default, with = "lenient_decimal")]
    pub delev_percentage: Decimal,
    #[serde(default)]
    pub opening_timestamp: i64,
    #[serde(default)]
    pub current_timestamp: i64,
    /// Signed; negative when short
    #[serde(default)]
    pub current_qty: i64,
    #[serde(default, with = "lenient_decimal")]
    pub current_cost: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub current_comm: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub unrealised_cost: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub realised_gross_cost: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub realised_cost: Decimal,
    #[serde(default)]
    pub is_open: bool,
    #[serde(default, with = "lenient_decimal")]
    pub mark_price: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub mark_value: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub pos_cost: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub pos_cross: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub pos_init: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub pos_comm: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub pos_loss: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub pos_margin: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub pos_maint: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub maint_margin: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub realised_gross_pnl: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub realised_pnl: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub unrealised_pnl: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub unrealised_pnl_pcnt: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub unrealised_roe_pcnt: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub avg_entry_price: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub liquidation_price: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub bankrupt_price: Decimal,
    #[serde(default)]
    pub settle_currency: Option<String>,
    #[serde(default, with = "lenient_decimal")]
    pub maintain_margin: Decimal,
    #[serde(default)]
    pub risk_limit_level: i64,
}

/// Tradable futures contract from GET /api/v1/contracts/active
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractInfo {
    pub symbol: String,
    pub root_symbol: String,
    #[serde(rename = "type")]
    pub contract_type: String,
    pub base_currency: String,
    pub quote_currency: String,
    pub settle_currency: String,
    #[serde(default)]
    pub max_order_qty: u64,
    #[serde(default, with = "lenient_decimal")]
    pub max_price: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub lot_size: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub tick_size: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub multiplier: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub initial_margin: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub maintain_margin: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub maker_fee_rate: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub taker_fee_rate: Decimal,
    #[serde(default)]
    pub is_inverse: bool,
    #[serde(default)]
    pub is_quanto: bool,
    #[serde(default, with = "lenient_decimal")]
    pub mark_price: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub index_price: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub last_trade_price: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub funding_fee_rate: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub max_leverage: Decimal,
    pub status: String,
}

/// Decimals that may arrive as strings, numbers, `null` or `""`.
///
/// Absent values decode as zero; values always serialise as strings.
mod lenient_decimal {
    use super::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;
    use std::str::FromStr;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match &value {
            Value::Null => Ok(Decimal::ZERO),
            Value::String(raw) if raw.trim().is_empty() => Ok(Decimal::ZERO),
            Value::String(raw) => parse(raw.trim()).map_err(serde::de::Error::custom),
            Value::Number(number) => parse(&number.to_string()).map_err(serde::de::Error::custom),
            _ => Err(serde::de::Error::custom("invalid decimal value")),
        }
    }

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    // Very small rates come back in exponent form, e.g. "1E-8"
    fn parse(raw: &str) -> Result<Decimal, rust_decimal::Error> {
        Decimal::from_str(raw).or_else(|_| Decimal::from_scientific(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[test]
    fn account_decodes_string_balances() {
        let account: Account = serde_json::from_value(json!({
            "id": "5bd6e9286d99522a52e458de",
            "currency": "BTC",
            "type": "trade",
            "balance": "237582.04299",
            "available": "237582.032",
            "holds": "0.01099"
        }))
        .unwrap();

        assert_eq!(account.account_type, "trade");
        assert_eq!(account.balance, dec("237582.04299"));
        assert_eq!(account.holds, dec("0.01099"));
    }

    #[test]
    fn lenient_decimal_accepts_null_empty_number_and_exponent() {
        let placed: MarginOrderPlaced = serde_json::from_value(json!({
            "orderId": "a",
            "borrowSize": null,
            "loanApplyId": null
        }))
        .unwrap();
        assert_eq!(placed.borrow_size, Decimal::ZERO);
        assert_eq!(placed.loan_apply_id, None);

        let account: FuturesAccount = serde_json::from_value(json!({
            "accountEquity": 99.8999305281,
            "unrealisedPNL": "",
            "marginBalance": "1E-8",
            "currency": "XBT"
        }))
        .unwrap();
        assert_eq!(account.account_equity, dec("99.8999305281"));
        assert_eq!(account.unrealised_pnl, Decimal::ZERO);
        assert_eq!(account.margin_balance, dec("0.00000001"));
        assert_eq!(account.available_balance, Decimal::ZERO);
    }

    #[test]
    fn lenient_decimal_rejects_garbage() {
        let result = serde_json::from_value::<Account>(json!({
            "id": "1",
            "currency": "BTC",
            "type": "main",
            "balance": "abc"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn fill_decodes_with_null_optionals() {
        let fill: Fill = serde_json::from_value(json!({
            "symbol": "BTC-USDT",
            "tradeId": "5c35c02709e4f67d5266954e",
            "orderId": "5c35c02703aa673ceec2a168",
            "counterOrderId": null,
            "side": "buy",
            "liquidity": "taker",
            "forceTaker": true,
            "price": "0.083",
            "size": "0.8424304",
            "funds": "0.0699217232",
            "fee": "0",
            "feeRate": "0",
            "feeCurrency": "USDT",
            "stop": "",
            "type": "limit",
            "createdAt": 1547026472000i64,
            "tradeType": "TRADE"
        }))
        .unwrap();

        assert_eq!(fill.side, Side::Buy);
        assert_eq!(fill.order_type, OrderType::Limit);
        assert_eq!(fill.size, dec("0.8424304"));
        assert!(fill.counter_order_id.is_none());
    }

    #[test]
    fn short_position_has_negative_quantity() {
        let position: FuturesPosition = serde_json::from_value(json!({
            "id": "5ce3cda60c19fc0d4e9ae7cd",
            "symbol": "XBTUSDTM",
            "crossMode": false,
            "currentQty": -3,
            "markPrice": "7947.83",
            "avgEntryPrice": 7947.83,
            "liquidationPrice": null,
            "isOpen": true,
            "riskLimitLevel": 1
        }))
        .unwrap();

        assert_eq!(position.current_qty, -3);
        assert_eq!(position.mark_price, dec("7947.83"));
        assert_eq!(position.liquidation_price, Decimal::ZERO);
        assert!(position.is_open);
    }

    #[test]
    fn decimals_serialise_as_strings() {
        let placed = MarginOrderPlaced {
            order_id: "a".into(),
            borrow_size: dec("1.50"),
            loan_apply_id: None,
        };
        let value = serde_json::to_value(&placed).unwrap();
        assert_eq!(value["borrowSize"], "1.50");
    }
}
