//! `fubon futopt ...`

use fb_core::error::{FbError, FbResult};
use fb_core::types::{BuySell, FutOptOrder};
use fb_core::SdkValue;
use fb_sdk::request::FutOptRequest;
use fb_sdk::{Account, BrokerSdk};
use serde_json::Value;
use tracing::info;

use crate::cli::{FutOptCmd, FutOptOrderArgs};
use crate::dispatch::Dispatcher;

pub async fn run<S: BrokerSdk>(cmd: FutOptCmd, d: &mut Dispatcher<S>) -> FbResult<Value> {
    match cmd {
        FutOptCmd::Buy(args) => place(BuySell::Buy, args, d).await,
        FutOptCmd::Sell(args) => place(BuySell::Sell, args, d).await,
        FutOptCmd::Orders { account } => d.list(account.account_index, FutOptRequest::OrderResult).await,
        FutOptCmd::Filled { account } => d.list(account.account_index, FutOptRequest::FilledResult).await,
        FutOptCmd::Cancel { order_no, account } => {
            let acc = d.account(account.account_index).await?;
            let target = find(d, &acc, &order_no)
                .await?
                .ok_or_else(|| FbError::NotFound(format!("Order {order_no} not found in current order results")))?;
            d.single_for(&acc, FutOptRequest::CancelOrder { target }).await
        }
        FutOptCmd::ModifyPrice { order_no, new_price, account } => {
            let acc = d.account(account.account_index).await?;
            let target = find(d, &acc, &order_no).await?.ok_or_else(|| not_found(&order_no))?;
            d.single_for(&acc, FutOptRequest::ModifyPrice { target, price: new_price }).await
        }
        FutOptCmd::ModifyQuantity { order_no, new_quantity, account } => {
            let acc = d.account(account.account_index).await?;
            let target = find(d, &acc, &order_no).await?.ok_or_else(|| not_found(&order_no))?;
            d.single_for(&acc, FutOptRequest::ModifyVolume { target, lot: new_quantity }).await
        }
        FutOptCmd::Inventories { account } => d.list(account.account_index, FutOptRequest::Inventories).await,
        FutOptCmd::Settlements { account } => d.single(account.account_index, FutOptRequest::Settlements).await,
    }
}

async fn place<S: BrokerSdk>(buy_sell: BuySell, args: FutOptOrderArgs, d: &mut Dispatcher<S>) -> FbResult<Value> {
    let acc = d.account(args.account.account_index).await?;
    let order = FutOptOrder {
        buy_sell,
        symbol: args.symbol,
        price: args.price,
        lot: args.lot,
        market_type: args.market_type,
        price_type: args.price_type,
        time_in_force: args.time_in_force,
        order_type: args.order_type,
    };
    order.validate()?;
    info!("[futopt] {} {} x{} ({})", order.buy_sell, order.symbol, order.lot, order.market_type);
    d.single_for(&acc, FutOptRequest::PlaceOrder { order }).await
}

async fn find<S: BrokerSdk>(d: &Dispatcher<S>, acc: &Account, order_no: &str) -> FbResult<Option<SdkValue>> {
    d.find_order(acc, FutOptRequest::OrderResult.into(), order_no).await
}

fn not_found(order_no: &str) -> FbError {
    FbError::NotFound(format!("Order {order_no} not found"))
}
