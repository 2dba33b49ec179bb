//! Stock trading operations.

use fb_core::SdkValue;
use fb_core::types::{Market, MarketType, StockOrder};
use serde::Serialize;

/// A price change bound to an existing order record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceModification {
    pub target: SdkValue,
    pub price: String,
}

/// A quantity change bound to an existing order record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantityModification {
    pub target: SdkValue,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method", content = "params")]
pub enum StockRequest {
    #[serde(rename = "stock.place_order")]
    PlaceOrder { order: StockOrder },

    #[serde(rename = "stock.get_order_results")]
    GetOrderResults,

    #[serde(rename = "stock.cancel_order")]
    CancelOrder { target: SdkValue },

    #[serde(rename = "stock.modify_price")]
    ModifyPrice(PriceModification),

    #[serde(rename = "stock.modify_quantity")]
    ModifyQuantity(QuantityModification),

    #[serde(rename = "stock.order_result_detail")]
    OrderResultDetail { order_no: String },

    #[serde(rename = "stock.order_history")]
    OrderHistory { start_date: String, end_date: String },

    #[serde(rename = "stock.filled_history")]
    FilledHistory { start_date: String, end_date: String },

    #[serde(rename = "stock.batch_place_order")]
    BatchPlaceOrder { orders: Vec<StockOrder> },

    #[serde(rename = "stock.batch_cancel_order")]
    BatchCancelOrder { targets: Vec<SdkValue> },

    #[serde(rename = "stock.batch_modify_price")]
    BatchModifyPrice { modifications: Vec<PriceModification> },

    #[serde(rename = "stock.batch_modify_volume")]
    BatchModifyVolume { modifications: Vec<QuantityModification> },

    #[serde(rename = "stock.create_batch_order")]
    CreateBatchOrder { orders: Vec<StockOrder> },

    #[serde(rename = "stock.get_batch_order")]
    GetBatchOrder { batch_no: String },

    #[serde(rename = "stock.get_batch_order_list")]
    GetBatchOrderList,

    #[serde(rename = "stock.query_symbol_quote")]
    QuerySymbolQuote { symbol: String, market_type: MarketType },

    #[serde(rename = "stock.query_symbol_snapshot")]
    QuerySymbolSnapshot {
        market_type: MarketType,
        #[serde(skip_serializing_if = "Option::is_none")]
        stock_types: Option<Vec<String>>,
    },

    #[serde(rename = "stock.query_market_price_change")]
    QueryMarketPriceChange {
        #[serde(skip_serializing_if = "Option::is_none")]
        market: Option<Market>,
    },

    #[serde(rename = "stock.day_trade_quota")]
    DayTradeQuota,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SdkRequest;
    use serde_json::json;

    #[test]
    fn modify_price_wire_shape() {
        let req = SdkRequest::from(StockRequest::ModifyPrice(PriceModification {
            target: SdkValue::from("order"),
            price: "580".into(),
        }));
        let (method, params) = req.into_wire().unwrap();
        assert_eq!(method, "stock.modify_price");
        assert_eq!(params, json!({"target": "order", "price": "580"}));
    }

    #[test]
    fn optional_params_are_omitted() {
        let req = SdkRequest::from(StockRequest::QueryMarketPriceChange { market: None });
        assert_eq!(req.into_wire().unwrap().1, json!({}));

        let req = SdkRequest::from(StockRequest::QuerySymbolSnapshot {
            market_type: MarketType::Common,
            stock_types: Some(vec!["stock".into(), "margin".into()]),
        });
        assert_eq!(
            req.into_wire().unwrap().1,
            json!({"market_type": "Common", "stock_types": ["stock", "margin"]})
        );
    }
}
