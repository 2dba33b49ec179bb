//! The closed catalog of SDK operations.
//!
//! Each domain enum serializes adjacently tagged, giving the wire shape
//!
//! ```json
//! { "method": "stock.place_order", "params": { "order": { .. } } }
//! ```
//!
//! | Domain       | Method prefix                        |
//! |--------------|--------------------------------------|
//! | stock        | `stock.`                             |
//! | accounting   | `accounting.`                        |
//! | futopt       | `futopt.`                            |
//! | condition    | `condition.` (client chosen by `scope`) |
//! | market data  | `marketdata.stock.` / `marketdata.futopt.` |

pub mod accounting;
pub mod condition;
pub mod futopt;
pub mod marketdata;
pub mod stock;

use serde::Serialize;
use serde_json::Value;

pub use accounting::AccountingRequest;
pub use condition::{ConditionRequest, ConditionScope};
pub use futopt::FutOptRequest;
pub use marketdata::MarketDataRequest;
pub use stock::StockRequest;

/// Any SDK operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SdkRequest {
    Stock(StockRequest),
    Accounting(AccountingRequest),
    FutOpt(FutOptRequest),
    Condition(ConditionRequest),
    MarketData(MarketDataRequest),
}

impl SdkRequest {
    /// Split into `(method, params)`. Operations without parameters get an
    /// empty object.
    pub fn into_wire(&self) -> serde_json::Result<(String, Value)> {
        let mut v = serde_json::to_value(self)?;
        let method = v.get("method").and_then(Value::as_str).unwrap_or_default().to_string();
        let params = v
            .as_object_mut()
            .and_then(|m| m.remove("params"))
            .unwrap_or_else(|| Value::Object(Default::default()));
        Ok((method, params))
    }

    /// Method name, for logs.
    pub fn method(&self) -> String {
        self.into_wire().map(|(m, _)| m).unwrap_or_default()
    }

    /// Whether the operation runs without an account.
    pub fn is_market_data(&self) -> bool {
        matches!(self, Self::MarketData(_))
    }
}

impl From<StockRequest> for SdkRequest {
    fn from(r: StockRequest) -> Self {
        Self::Stock(r)
    }
}

impl From<AccountingRequest> for SdkRequest {
    fn from(r: AccountingRequest) -> Self {
        Self::Accounting(r)
    }
}

impl From<FutOptRequest> for SdkRequest {
    fn from(r: FutOptRequest) -> Self {
        Self::FutOpt(r)
    }
}

impl From<ConditionRequest> for SdkRequest {
    fn from(r: ConditionRequest) -> Self {
        Self::Condition(r)
    }
}

impl From<MarketDataRequest> for SdkRequest {
    fn from(r: MarketDataRequest) -> Self {
        Self::MarketData(r)
    }
}
