//! Conditional order operations.
//!
//! The SDK has one condition client per product class; `scope` selects it.
//! Time-slice operations exist on the stock client only.

use fb_core::types::{Condition, ConditionWindow, SplitDescription, StockOrder, TrailOrder};
use serde::Serialize;
use serde_json::{Map, Value};

/// Which SDK condition client handles the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionScope {
    Stock,
    FutOpt,
}

impl ConditionScope {
    pub fn from_flag(futopt: bool) -> Self {
        if futopt { Self::FutOpt } else { Self::Stock }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method", content = "params")]
pub enum ConditionRequest {
    #[serde(rename = "condition.get_condition")]
    GetCondition { scope: ConditionScope },

    #[serde(rename = "condition.get_condition_by_guid")]
    GetConditionByGuid { scope: ConditionScope, guid: String },

    #[serde(rename = "condition.cancel_condition")]
    CancelCondition { scope: ConditionScope, guid: String },

    #[serde(rename = "condition.get_condition_history")]
    GetConditionHistory { scope: ConditionScope, start_date: String, end_date: String },

    #[serde(rename = "condition.get_trail_order")]
    GetTrailOrder { scope: ConditionScope },

    #[serde(rename = "condition.get_trail_history")]
    GetTrailHistory { scope: ConditionScope, start_date: String, end_date: String },

    #[serde(rename = "condition.get_time_slice_order")]
    GetTimeSliceOrder { batch_no: String },

    #[serde(rename = "condition.get_day_trade_condition")]
    GetDayTradeCondition { scope: ConditionScope },

    #[serde(rename = "condition.single_condition")]
    SingleCondition {
        scope: ConditionScope,
        #[serde(flatten)]
        window: ConditionWindow,
        condition: Condition,
        order: StockOrder,
    },

    #[serde(rename = "condition.multi_condition")]
    MultiCondition {
        scope: ConditionScope,
        #[serde(flatten)]
        window: ConditionWindow,
        conditions: Vec<Condition>,
        order: StockOrder,
    },

    #[serde(rename = "condition.trail_profit")]
    TrailProfit {
        scope: ConditionScope,
        #[serde(flatten)]
        window: ConditionWindow,
        trail_order: TrailOrder,
    },

    #[serde(rename = "condition.time_slice_order")]
    TimeSliceOrder {
        #[serde(flatten)]
        window: ConditionWindow,
        split: SplitDescription,
        order: StockOrder,
    },

    /// Keyword arguments forwarded as given.
    #[serde(rename = "condition.tpsl_order")]
    TpslOrder {
        scope: ConditionScope,
        #[serde(flatten)]
        params: Map<String, Value>,
    },

    #[serde(rename = "condition.day_trade_condition")]
    DayTradeCondition {
        scope: ConditionScope,
        #[serde(flatten)]
        params: Map<String, Value>,
    },

    #[serde(rename = "condition.single_condition_with_tpsl")]
    SingleConditionWithTpsl {
        scope: ConditionScope,
        #[serde(flatten)]
        params: Map<String, Value>,
    },

    #[serde(rename = "condition.multi_condition_with_tpsl")]
    MultiConditionWithTpsl {
        scope: ConditionScope,
        #[serde(flatten)]
        params: Map<String, Value>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SdkRequest;
    use fb_core::types::StopSign;
    use serde_json::json;

    #[test]
    fn window_is_flattened_into_params() {
        let req = SdkRequest::from(ConditionRequest::TrailProfit {
            scope: ConditionScope::from_flag(true),
            window: ConditionWindow {
                start_date: "2024-06-01".into(),
                end_date: "2024-06-30".into(),
                stop_sign: StopSign::Full,
            },
            trail_order: TrailOrder::from_json(&json!({
                "symbol": "2330", "price": "600", "direction": "Up", "tick_num": 1, "buy_sell": "Buy"
            }))
            .unwrap(),
        });
        let (method, params) = req.into_wire().unwrap();
        assert_eq!(method, "condition.trail_profit");
        assert_eq!(params["scope"], json!("futopt"));
        assert_eq!(params["stop_sign"], json!("Full"));
        assert_eq!(params["trail_order"]["buy_sell"], json!("Buy"));
    }

    #[test]
    fn passthrough_params_keep_caller_keys() {
        let mut params = Map::new();
        params.insert("start_date".into(), json!("2024-06-01"));
        params.insert("tpsl".into(), json!({"tp": {"price": "600"}}));
        let req = SdkRequest::from(ConditionRequest::TpslOrder { scope: ConditionScope::Stock, params });
        let (_, wire) = req.into_wire().unwrap();
        assert_eq!(wire, json!({"scope": "stock", "start_date": "2024-06-01", "tpsl": {"tp": {"price": "600"}}}));
    }
}
