/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed order bodies and list filters
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{
    MarginMode, OrderStatus, OrderType, SelfTradePrevention, Side, StopDirection, StopPriceType,
    TimeInForce, TradeType,
};
use crate::http::Params;

/// Body of POST /api/v1/orders on the spot host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotOrderRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_oid: Option<String>,
    pub side: Side,
    pub symbol: String,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stp: Option<SelfTradePrevention>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_type: Option<TradeType>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Decimal>,
    /// Market orders only; exclusive with `size`
    #[serde(default, with = "rust_decimal::serde::str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funds: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    /// Seconds, GTT orders only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_after: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iceberg: Option<bool>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_size: Option<Decimal>,
}

impl SpotOrderRequest {
    pub fn limit(symbol: impl Into<String>, side: Side, price: Decimal, size: Decimal) -> Self {
        Self {
            order_type: OrderType::Limit,
            price: Some(price),
            time_in_force: Some(TimeInForce::Gtc),
            ..Self::market(symbol, side, size)
        }
    }

    pub fn market(symbol: impl Into<String>, side: Side, size: Decimal) -> Self {
        Self {
            client_oid: None,
            side,
            symbol: symbol.into(),
            order_type: OrderType::Market,
            remark: None,
            stp: None,
            trade_type: None,
            price: None,
            size: Some(size),
            funds: None,
            time_in_force: None,
            cancel_after: None,
            post_only: None,
            hidden: None,
            iceberg: None,
            visible_size: None,
        }
    }

    pub fn client_oid(mut self, client_oid: impl Into<String>) -> Self {
        self.client_oid = Some(client_oid.into());
        self
    }
}

/// Body of POST /api/v1/margin/order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginOrderRequest {
    #[serde(flatten)]
    pub order: SpotOrderRequest,
    pub margin_model: MarginMode,
    pub auto_borrow: bool,
}

/// Body of POST /api/v1/orders on the futures host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuturesOrderRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_oid: Option<String>,
    pub side: Side,
    pub symbol: String,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(with = "rust_decimal::serde::str")]
    pub leverage: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<StopDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_price_type: Option<StopPriceType>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduce_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_order: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_hold: Option<bool>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Number of contracts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iceberg: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_size: Option<u64>,
}

impl FuturesOrderRequest {
    pub fn limit(
        symbol: impl Into<String>,
        side: Side,
        leverage: Decimal,
        price: Decimal,
        size: u64,
    ) -> Self {
        Self {
            order_type: OrderType::Limit,
            price: Some(price),
            time_in_force: Some(TimeInForce::Gtc),
            ..Self::market(symbol, side, leverage, size)
        }
    }

    pub fn market(symbol: impl Into<String>, side: Side, leverage: Decimal, size: u64) -> Self {
        Self {
            client_oid: None,
            side,
            symbol: symbol.into(),
            order_type: OrderType::Market,
            leverage,
            remark: None,
            stop: None,
            stop_price_type: None,
            stop_price: None,
            reduce_only: None,
            close_order: None,
            force_hold: None,
            price: None,
            size: Some(size),
            time_in_force: None,
            post_only: None,
            hidden: None,
            iceberg: None,
            visible_size: None,
        }
    }

    pub fn client_oid(mut self, client_oid: impl Into<String>) -> Self {
        self.client_oid = Some(client_oid.into());
        self
    }
}

/// Filters for GET /api/v1/fills on the spot host.
///
/// When `order_id` is set the server ignores the other filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpotFillsQuery {
    pub order_id: Option<String>,
    pub symbol: Option<String>,
    pub side: Option<Side>,
    pub order_type: Option<OrderType>,
    /// Milliseconds since epoch
    pub start_at: Option<u64>,
    pub end_at: Option<u64>,
    pub trade_type: Option<TradeType>,
}

impl SpotFillsQuery {
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .insert_opt("orderId", self.order_id.as_deref())
            .insert_opt("symbol", self.symbol.as_deref())
            .insert_opt("side", self.side)
            .insert_opt("type", self.order_type)
            .insert_opt("startAt", self.start_at)
            .insert_opt("endAt", self.end_at)
            .insert_opt("tradeType", self.trade_type);
        params
    }
}

/// Filters for GET /api/v1/orders on the spot host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpotOrdersQuery {
    pub status: Option<OrderStatus>,
    pub symbol: Option<String>,
    pub side: Option<Side>,
    pub order_type: Option<OrderType>,
    pub trade_type: Option<TradeType>,
    pub start_at: Option<u64>,
    pub end_at: Option<u64>,
}

impl SpotOrdersQuery {
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .insert_opt("status", self.status)
            .insert_opt("symbol", self.symbol.as_deref())
            .insert_opt("side", self.side)
            .insert_opt("type", self.order_type)
            .insert_opt("tradeType", self.trade_type)
            .insert_opt("startAt", self.start_at)
            .insert_opt("endAt", self.end_at);
        params
    }
}

/// Filters for GET /api/v1/orders on the futures host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FuturesOrdersQuery {
    pub status: Option<OrderStatus>,
    pub symbol: Option<String>,
    pub side: Option<Side>,
    pub order_type: Option<OrderType>,
    pub start_at: Option<u64>,
    pub end_at: Option<u64>,
}

impl FuturesOrdersQuery {
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .insert_opt("status", self.status)
            .insert_opt("symbol", self.symbol.as_deref())
            .insert_opt("side", self.side)
            .insert_opt("type", self.order_type)
            .insert_opt("startAt", self.start_at)
            .insert_opt("endAt", self.end_at);
        params
    }
}

/// Filters for GET /api/v1/fills on the futures host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FuturesFillsQuery {
    pub order_id: Option<String>,
    pub symbol: Option<String>,
    pub side: Option<Side>,
    pub order_type: Option<OrderType>,
    pub start_at: Option<u64>,
    pub end_at: Option<u64>,
}

impl FuturesFillsQuery {
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .insert_opt("orderId", self.order_id.as_deref())
            .insert_opt("symbol", self.symbol.as_deref())
            .insert_opt("side", self.side)
            .insert_opt("type", self.order_type)
            .insert_opt("startAt", self.start_at)
            .insert_opt("endAt", self.end_at);
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn test_spot_limit_order_body() {
        let req = SpotOrderRequest::limit("BTC-USDT", Side::Buy, dec("10000"), dec("0.00001"))
            .client_oid("123");
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "clientOid": "123",
                "side": "buy",
                "symbol": "BTC-USDT",
                "type": "limit",
                "price": "10000",
                "size": "0.00001",
                "timeInForce": "GTC",
            })
        );
    }

    #[test]
    fn test_margin_order_flattens_spot_fields() {
        let req = MarginOrderRequest {
            order: SpotOrderRequest::market("ETH-USDT", Side::Sell, dec("1")),
            margin_model: MarginMode::Cross,
            auto_borrow: true,
        };
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["marginModel"], "cross");
        assert_eq!(body["autoBorrow"], true);
        assert_eq!(body["type"], "market");
        assert_eq!(body["size"], "1");
    }

    #[test]
    fn test_futures_order_body() {
        let req = FuturesOrderRequest::limit("XBTUSDTM", Side::Sell, dec("5"), dec("30000.5"), 3);
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["leverage"], "5");
        assert_eq!(body["price"], "30000.5");
        assert_eq!(body["size"], 3);
        assert_eq!(body["type"], "limit");
        assert!(body.get("stopPrice").is_none());
    }

    #[test]
    fn test_fills_query_params() {
        let query = SpotFillsQuery {
            symbol: Some("BTC-USDT".into()),
            side: Some(Side::Sell),
            start_at: Some(1_700_000_000_000),
            trade_type: Some(TradeType::Trade),
            ..Default::default()
        };
        let params = query.to_params();
        assert_eq!(params.get("symbol"), Some("BTC-USDT"));
        assert_eq!(params.get("side"), Some("sell"));
        assert_eq!(params.get("startAt"), Some("1700000000000"));
        assert_eq!(params.get("tradeType"), Some("TRADE"));
        assert_eq!(params.get("orderId"), None);
        assert_eq!(params.len(), 4);
    }

    #[test]
    fn test_empty_query_has_no_params() {
        assert!(FuturesOrdersQuery::default().to_params().is_empty());
        assert!(SpotOrdersQuery::default().to_params().is_empty());
    }
}
