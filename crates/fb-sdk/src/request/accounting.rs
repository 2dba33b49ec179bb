//! Account queries.

use fb_core::types::SettlementRange;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method", content = "params")]
pub enum AccountingRequest {
    #[serde(rename = "accounting.inventories")]
    Inventories,

    #[serde(rename = "accounting.unrealized_gains_and_loses")]
    UnrealizedGainsAndLoses,

    #[serde(rename = "accounting.query_settlement")]
    QuerySettlement { range: SettlementRange },

    #[serde(rename = "accounting.margin_quota")]
    MarginQuota { symbol: String },

    #[serde(rename = "accounting.bank_remain")]
    BankRemain,

    #[serde(rename = "accounting.maintenance")]
    Maintenance,

    #[serde(rename = "accounting.realized_profit_loss")]
    RealizedProfitLoss,

    #[serde(rename = "accounting.realized_profit_loss_summary")]
    RealizedProfitLossSummary,
}
