//! `fubon account ...`

use fb_core::error::FbResult;
use fb_sdk::request::{AccountingRequest, StockRequest};
use fb_sdk::BrokerSdk;
use serde_json::Value;

use crate::cli::AccountCmd;
use crate::dispatch::Dispatcher;

pub async fn run<S: BrokerSdk>(cmd: AccountCmd, d: &mut Dispatcher<S>) -> FbResult<Value> {
    match cmd {
        AccountCmd::Inventory { account } => d.list(account.account_index, AccountingRequest::Inventories).await,
        AccountCmd::Unrealized { account } => {
            d.list(account.account_index, AccountingRequest::UnrealizedGainsAndLoses).await
        }
        AccountCmd::Settlement { range, account } => {
            d.single(account.account_index, AccountingRequest::QuerySettlement { range }).await
        }
        AccountCmd::MarginQuota { symbol, account } => {
            d.single(account.account_index, AccountingRequest::MarginQuota { symbol }).await
        }
        AccountCmd::BankBalance { account } => d.single(account.account_index, AccountingRequest::BankRemain).await,
        AccountCmd::Maintenance { account } => d.single(account.account_index, AccountingRequest::Maintenance).await,
        AccountCmd::Realized { account } => {
            d.list(account.account_index, AccountingRequest::RealizedProfitLoss).await
        }
        AccountCmd::RealizedSummary { account } => {
            d.single(account.account_index, AccountingRequest::RealizedProfitLossSummary).await
        }
        AccountCmd::DayTradeQuota { account } => d.single(account.account_index, StockRequest::DayTradeQuota).await,
    }
}
