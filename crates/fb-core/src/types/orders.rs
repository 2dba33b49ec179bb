//! Order payloads passed to the SDK.
//!
//! Payloads are built either from command-line options (already validated
//! by clap) or from JSON arguments (`batch-place`, `condition place-*`). JSON
//! builders accept both CLI and SDK spellings of enum values.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{FbError, FbResult};
use crate::types::enums::*;
use crate::types::json_util::{
    as_array, as_object, int_field, int_or, parse_or, str_field, str_or, text_of,
};

pub const PRICE_REQUIRED: &str = "--price is required for limit orders";

// ---------------------------------------------------------------------------
// Stock
// ---------------------------------------------------------------------------

/// A stock order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockOrder {
    pub buy_sell: BuySell,
    pub symbol: String,
    pub price: Option<String>,
    pub quantity: i64,
    pub market_type: MarketType,
    pub price_type: PriceType,
    pub time_in_force: TimeInForce,
    pub order_type: OrderType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_def: Option<String>,
}

impl StockOrder {
    /// Limit orders need a price.
    pub fn validate(&self) -> FbResult<()> {
        if self.price_type == PriceType::Limit && self.price.is_none() {
            return Err(FbError::Validation(PRICE_REQUIRED.to_string()));
        }
        Ok(())
    }

    /// Build from a JSON order definition.
    ///
    /// `symbol`, `buy_sell` and `quantity` are required; the rest default to
    /// a common-lot limit ROD cash order.
    pub fn from_json(def: &Value) -> FbResult<Self> {
        let obj = as_object(def, "order")?;
        Ok(Self {
            buy_sell: str_field(obj, "buy_sell")?.parse()?,
            symbol: str_field(obj, "symbol")?,
            price: Some(str_or(obj, "price", "")),
            quantity: int_field(obj, "quantity")?,
            market_type: parse_or(obj, "market_type", "common")?,
            price_type: parse_or(obj, "price_type", "limit")?,
            time_in_force: parse_or(obj, "time_in_force", "ROD")?,
            order_type: parse_or(obj, "order_type", "stock")?,
            user_def: user_def(obj),
        })
    }

    /// Build every order of a JSON array.
    pub fn list_from_json(defs: &Value) -> FbResult<Vec<Self>> {
        as_array(defs, "orders")?.iter().map(Self::from_json).collect()
    }
}

fn user_def(obj: &Map<String, Value>) -> Option<String> {
    obj.get("user_def").map(text_of).filter(|s| !s.is_empty())
}

/// One entry of `batch-modify-price`: `{order_no, price}`.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceUpdate {
    pub order_no: String,
    pub price: String,
}

/// One entry of `batch-modify-quantity`: `{order_no, quantity}`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityUpdate {
    pub order_no: String,
    pub quantity: i64,
}

impl PriceUpdate {
    pub fn list_from_json(defs: &Value) -> FbResult<Vec<Self>> {
        as_array(defs, "updates")?
            .iter()
            .map(|d| {
                let obj = as_object(d, "update")?;
                Ok(Self { order_no: str_field(obj, "order_no")?, price: str_field(obj, "price")? })
            })
            .collect()
    }
}

impl QuantityUpdate {
    pub fn list_from_json(defs: &Value) -> FbResult<Vec<Self>> {
        as_array(defs, "updates")?
            .iter()
            .map(|d| {
                let obj = as_object(d, "update")?;
                Ok(Self { order_no: str_field(obj, "order_no")?, quantity: int_field(obj, "quantity")? })
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Futures / options
// ---------------------------------------------------------------------------

/// A futures/options order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FutOptOrder {
    pub buy_sell: BuySell,
    pub symbol: String,
    pub price: Option<String>,
    pub lot: i64,
    pub market_type: FutOptMarketType,
    pub price_type: FutOptPriceType,
    pub time_in_force: TimeInForce,
    pub order_type: FutOptOrderType,
}

impl FutOptOrder {
    pub fn validate(&self) -> FbResult<()> {
        if self.price_type == FutOptPriceType::Limit && self.price.is_none() {
            return Err(FbError::Validation(PRICE_REQUIRED.to_string()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Conditional orders
// ---------------------------------------------------------------------------

/// Monitoring window shared by all conditional placements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionWindow {
    pub start_date: String,
    pub end_date: String,
    pub stop_sign: StopSign,
}

impl ConditionWindow {
    pub fn from_json(params: &Map<String, Value>) -> FbResult<Self> {
        Ok(Self {
            start_date: str_field(params, "start_date")?,
            end_date: str_field(params, "end_date")?,
            stop_sign: str_field(params, "stop_sign")?.parse()?,
        })
    }
}

/// A trigger. `trading_type`, `trigger_content` and `operator` are SDK
/// enum member names passed through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    pub trading_type: String,
    pub symbol: String,
    pub trigger_content: String,
    pub price: String,
    pub operator: String,
}

impl Condition {
    pub fn from_json(def: &Value) -> FbResult<Self> {
        let obj = as_object(def, "condition")?;
        Ok(Self {
            trading_type: str_field(obj, "trading_type")?,
            symbol: str_field(obj, "symbol")?,
            trigger_content: str_field(obj, "trigger_content")?,
            price: str_field(obj, "price")?,
            operator: str_field(obj, "operator")?,
        })
    }

    pub fn list_from_json(defs: &Value) -> FbResult<Vec<Self>> {
        as_array(defs, "conditions")?.iter().map(Self::from_json).collect()
    }
}

/// Trailing stop/profit order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrailOrder {
    pub symbol: String,
    pub price: String,
    /// SDK `Direction` member name.
    pub direction: String,
    pub tick_num: i64,
    pub buy_sell: BuySell,
    pub quantity: i64,
    pub price_type: PriceType,
    pub diff: i64,
    pub time_in_force: TimeInForce,
    pub order_type: OrderType,
}

impl TrailOrder {
    /// `quantity` falls back to `lot`, then 1.
    pub fn from_json(def: &Value) -> FbResult<Self> {
        let obj = as_object(def, "trail_order")?;
        let quantity = match obj.get("quantity") {
            Some(_) => int_field(obj, "quantity")?,
            None => int_or(obj, "lot", 1)?,
        };
        Ok(Self {
            symbol: str_field(obj, "symbol")?,
            price: str_field(obj, "price")?,
            direction: str_field(obj, "direction")?,
            tick_num: int_field(obj, "tick_num")?,
            buy_sell: str_field(obj, "buy_sell")?.parse()?,
            quantity,
            price_type: parse_or(obj, "price_type", "Limit")?,
            diff: int_or(obj, "diff", 0)?,
            time_in_force: parse_or(obj, "time_in_force", "ROD")?,
            order_type: parse_or(obj, "order_type", "Stock")?,
        })
    }
}

/// Time-slice split plan. `method` is an SDK `TimeSliceOrderType` member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitDescription {
    pub method: String,
    pub interval: i64,
    pub single_quantity: i64,
    pub total_quantity: i64,
    pub start_time: String,
}

impl SplitDescription {
    pub fn from_json(def: &Value) -> FbResult<Self> {
        let obj = as_object(def, "split")?;
        Ok(Self {
            method: str_field(obj, "method")?,
            interval: int_field(obj, "interval")?,
            single_quantity: int_field(obj, "single_quantity")?,
            total_quantity: int_field(obj, "total_quantity")?,
            start_time: str_field(obj, "start_time")?,
        })
    }
}
