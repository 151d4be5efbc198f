/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    Limit,
    Market,
    LimitStop,
    MarketStop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeInForce {
    #[serde(rename = "GTC")]
    Gtc,
    #[serde(rename = "GTT")]
    Gtt,
    #[serde(rename = "IOC")]
    Ioc,
    #[serde(rename = "FOK")]
    Fok,
}

/// Self-trade prevention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelfTradePrevention {
    /// Cancel newest
    #[serde(rename = "CN")]
    CancelNewest,
    /// Cancel oldest
    #[serde(rename = "CO")]
    CancelOldest,
    /// Cancel both
    #[serde(rename = "CB")]
    CancelBoth,
    /// Decrease and cancel
    #[serde(rename = "DC")]
    DecreaseAndCancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeType {
    Trade,
    MarginTrade,
    MarginIsolatedTrade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginMode {
    Cross,
    Isolated,
}

/// Order list filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Active,
    Done,
}

/// Price a futures stop order triggers on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopPriceType {
    /// Trade price
    #[serde(rename = "TP")]
    Trade,
    /// Index price
    #[serde(rename = "IP")]
    Index,
    /// Mark price
    #[serde(rename = "MP")]
    Mark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopDirection {
    Down,
    Up,
}

/// Spot account type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Main,
    Trade,
    Margin,
    Isolated,
}

// Query parameters use the same wire names as the JSON bodies
macro_rules! wire_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    let value = serde_json::to_value(self).map_err(|_| fmt::Error)?;
                    f.write_str(value.as_str().unwrap_or_default())
                }
            }
        )*
    };
}

wire_display!(
    Side,
    OrderType,
    TimeInForce,
    SelfTradePrevention,
    TradeType,
    MarginMode,
    OrderStatus,
    StopPriceType,
    StopDirection,
    AccountType,
);
