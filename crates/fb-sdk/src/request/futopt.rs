//! Futures and options trading operations.

use fb_core::SdkValue;
use fb_core::types::FutOptOrder;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method", content = "params")]
pub enum FutOptRequest {
    #[serde(rename = "futopt.place_order")]
    PlaceOrder { order: FutOptOrder },

    #[serde(rename = "futopt.order_result")]
    OrderResult,

    #[serde(rename = "futopt.filled_result")]
    FilledResult,

    #[serde(rename = "futopt.cancel_order")]
    CancelOrder { target: SdkValue },

    #[serde(rename = "futopt.modify_price")]
    ModifyPrice { target: SdkValue, price: String },

    #[serde(rename = "futopt.modify_volume")]
    ModifyVolume { target: SdkValue, lot: i64 },

    #[serde(rename = "futopt.inventories")]
    Inventories,

    #[serde(rename = "futopt.settlements")]
    Settlements,
}
