//! `fubon stock ...`

use fb_core::error::{FbError, FbResult};
use fb_core::types::json_util::parse_json;
use fb_core::types::{BuySell, PriceUpdate, QuantityUpdate, StockOrder};
use fb_core::SdkValue;
use fb_sdk::request::stock::{PriceModification, QuantityModification};
use fb_sdk::request::StockRequest;
use fb_sdk::{Account, BrokerSdk};
use serde_json::Value;
use tracing::info;

use crate::cli::{StockCmd, StockOrderArgs};
use crate::dispatch::Dispatcher;

pub async fn run<S: BrokerSdk>(cmd: StockCmd, d: &mut Dispatcher<S>) -> FbResult<Value> {
    match cmd {
        StockCmd::Buy(args) => place(BuySell::Buy, args, d).await,
        StockCmd::Sell(args) => place(BuySell::Sell, args, d).await,
        StockCmd::Orders { account } => d.list(account.account_index, StockRequest::GetOrderResults).await,
        StockCmd::Cancel { order_no, account } => {
            let acc = d.account(account.account_index).await?;
            let target = find(d, &acc, &order_no)
                .await?
                .ok_or_else(|| FbError::NotFound(format!("Order {order_no} not found in current order results")))?;
            d.single_for(&acc, StockRequest::CancelOrder { target }).await
        }
        StockCmd::ModifyPrice { order_no, new_price, account } => {
            let acc = d.account(account.account_index).await?;
            let target = find(d, &acc, &order_no).await?.ok_or_else(|| not_found(&order_no))?;
            let req = StockRequest::ModifyPrice(PriceModification { target, price: new_price });
            d.single_for(&acc, req).await
        }
        StockCmd::ModifyQuantity { order_no, new_quantity, account } => {
            let acc = d.account(account.account_index).await?;
            let target = find(d, &acc, &order_no).await?.ok_or_else(|| not_found(&order_no))?;
            let req = StockRequest::ModifyQuantity(QuantityModification { target, quantity: new_quantity });
            d.single_for(&acc, req).await
        }
        StockCmd::OrderDetail { order_no, account } => {
            d.single(account.account_index, StockRequest::OrderResultDetail { order_no }).await
        }
        StockCmd::OrderHistory { range, account } => {
            let req = StockRequest::OrderHistory { start_date: range.from, end_date: range.to };
            d.list(account.account_index, req).await
        }
        StockCmd::FilledHistory { range, account } => {
            let req = StockRequest::FilledHistory { start_date: range.from, end_date: range.to };
            d.list(account.account_index, req).await
        }
        StockCmd::BatchPlace { orders_json, account } => {
            let acc = d.account(account.account_index).await?;
            let orders = StockOrder::list_from_json(&parse_json(&orders_json)?)?;
            d.single_for(&acc, StockRequest::BatchPlaceOrder { orders }).await
        }
        StockCmd::BatchCancel { order_nos, account } => {
            let acc = d.account(account.account_index).await?;
            let book = d.order_book(&acc, StockRequest::GetOrderResults.into()).await?;
            let targets: Vec<SdkValue> = book
                .iter()
                .filter(|(no, _)| order_nos.contains(no))
                .map(|(_, record)| record.clone())
                .collect();
            let missing: Vec<&str> = order_nos
                .iter()
                .filter(|no| !book.iter().any(|(found, _)| found == *no))
                .map(String::as_str)
                .collect();
            if !missing.is_empty() {
                return Err(FbError::NotFound(format!("Orders not found: {}", missing.join(", "))));
            }
            d.single_for(&acc, StockRequest::BatchCancelOrder { targets }).await
        }
        StockCmd::BatchModifyPrice { updates_json, account } => {
            let acc = d.account(account.account_index).await?;
            let updates = PriceUpdate::list_from_json(&parse_json(&updates_json)?)?;
            let book = d.order_book(&acc, StockRequest::GetOrderResults.into()).await?;
            let modifications = updates
                .into_iter()
                .map(|u| {
                    let target = lookup(&book, &u.order_no)?;
                    Ok(PriceModification { target, price: u.price })
                })
                .collect::<FbResult<Vec<_>>>()?;
            d.single_for(&acc, StockRequest::BatchModifyPrice { modifications }).await
        }
        StockCmd::BatchModifyQuantity { updates_json, account } => {
            let acc = d.account(account.account_index).await?;
            let updates = QuantityUpdate::list_from_json(&parse_json(&updates_json)?)?;
            let book = d.order_book(&acc, StockRequest::GetOrderResults.into()).await?;
            let modifications = updates
                .into_iter()
                .map(|u| {
                    let target = lookup(&book, &u.order_no)?;
                    Ok(QuantityModification { target, quantity: u.quantity })
                })
                .collect::<FbResult<Vec<_>>>()?;
            d.single_for(&acc, StockRequest::BatchModifyVolume { modifications }).await
        }
        StockCmd::BatchCreate { orders_json, account } => {
            let acc = d.account(account.account_index).await?;
            let orders = StockOrder::list_from_json(&parse_json(&orders_json)?)?;
            d.single_for(&acc, StockRequest::CreateBatchOrder { orders }).await
        }
        StockCmd::BatchGet { batch_no, account } => {
            d.single(account.account_index, StockRequest::GetBatchOrder { batch_no }).await
        }
        StockCmd::BatchList { account } => d.list(account.account_index, StockRequest::GetBatchOrderList).await,
        StockCmd::SymbolQuote { symbol, market_type, account } => {
            d.single(account.account_index, StockRequest::QuerySymbolQuote { symbol, market_type }).await
        }
        StockCmd::SymbolSnapshot { market_type, stock_types, account } => {
            let stock_types = stock_types
                .filter(|s| !s.is_empty())
                .map(|s| s.split(',').map(str::to_string).collect());
            d.list(account.account_index, StockRequest::QuerySymbolSnapshot { market_type, stock_types }).await
        }
        StockCmd::PriceChange { market, account } => {
            d.single(account.account_index, StockRequest::QueryMarketPriceChange { market }).await
        }
    }
}

async fn place<S: BrokerSdk>(buy_sell: BuySell, args: StockOrderArgs, d: &mut Dispatcher<S>) -> FbResult<Value> {
    let acc = d.account(args.account.account_index).await?;
    let order = StockOrder {
        buy_sell,
        symbol: args.symbol,
        price: args.price,
        quantity: args.quantity,
        market_type: args.market_type,
        price_type: args.price_type,
        time_in_force: args.time_in_force,
        order_type: args.order_type,
        user_def: args.user_def,
    };
    order.validate()?;
    info!(
        "[stock] {} {} x{} @ {}",
        order.buy_sell,
        order.symbol,
        order.quantity,
        order.price.as_deref().unwrap_or(order.price_type.sdk_name())
    );
    d.single_for(&acc, StockRequest::PlaceOrder { order }).await
}

async fn find<S: BrokerSdk>(d: &Dispatcher<S>, acc: &Account, order_no: &str) -> FbResult<Option<SdkValue>> {
    d.find_order(acc, StockRequest::GetOrderResults.into(), order_no).await
}

fn not_found(order_no: &str) -> FbError {
    FbError::NotFound(format!("Order {order_no} not found"))
}

/// Batch updates bind to the last record with the order number.
fn lookup(book: &[(String, SdkValue)], order_no: &str) -> FbResult<SdkValue> {
    book.iter()
        .rev()
        .find(|(no, _)| no == order_no)
        .map(|(_, record)| record.clone())
        .ok_or_else(|| not_found(order_no))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fb_core::normalize;
    use serde_json::json;

    #[test]
    fn lookup_last_match() {
        let book = vec![
            ("A1".to_string(), SdkValue::from(json!({"order_no": "A1", "seq": 1}))),
            ("A1".to_string(), SdkValue::from(json!({"order_no": "A1", "seq": 2}))),
        ];
        assert_eq!(normalize(&lookup(&book, "A1").unwrap())["seq"], 2);
        assert_eq!(lookup(&book, "B9").unwrap_err().to_string(), "Order B9 not found");
    }
}
