//! `fubon condition ...`
//!
//! Placement commands take one JSON object. Structured placements
//! (`place-single`, `place-multi`, `place-trail`, `place-timeslice`) are
//! decoded into typed payloads; the TPSL and day-trade variants forward the
//! object as keyword arguments.

use fb_core::error::FbResult;
use fb_core::types::json_util::{as_object, parse_json, required};
use fb_core::types::{Condition, ConditionWindow, SplitDescription, StockOrder, TrailOrder};
use fb_sdk::request::{ConditionRequest, ConditionScope};
use fb_sdk::BrokerSdk;
use serde_json::{Map, Value};

use crate::cli::ConditionCmd;
use crate::dispatch::Dispatcher;

pub async fn run<S: BrokerSdk>(cmd: ConditionCmd, d: &mut Dispatcher<S>) -> FbResult<Value> {
    use ConditionRequest as Cr;

    let scope = |futopt: bool| ConditionScope::from_flag(futopt);
    match cmd {
        ConditionCmd::List { sel } => {
            d.list(sel.account.account_index, Cr::GetCondition { scope: scope(sel.futopt) }).await
        }
        ConditionCmd::Get { guid, sel } => {
            let req = Cr::GetConditionByGuid { scope: scope(sel.futopt), guid };
            d.single(sel.account.account_index, req).await
        }
        ConditionCmd::Cancel { guid, sel } => {
            let req = Cr::CancelCondition { scope: scope(sel.futopt), guid };
            d.single(sel.account.account_index, req).await
        }
        ConditionCmd::History { range, sel } => {
            let req = Cr::GetConditionHistory { scope: scope(sel.futopt), start_date: range.from, end_date: range.to };
            d.list(sel.account.account_index, req).await
        }
        ConditionCmd::TrailList { sel } => {
            d.list(sel.account.account_index, Cr::GetTrailOrder { scope: scope(sel.futopt) }).await
        }
        ConditionCmd::TrailHistory { range, sel } => {
            let req = Cr::GetTrailHistory { scope: scope(sel.futopt), start_date: range.from, end_date: range.to };
            d.list(sel.account.account_index, req).await
        }
        ConditionCmd::TimesliceGet { batch_no, account } => {
            d.single(account.account_index, Cr::GetTimeSliceOrder { batch_no }).await
        }
        ConditionCmd::DayTradeList { sel } => {
            d.list(sel.account.account_index, Cr::GetDayTradeCondition { scope: scope(sel.futopt) }).await
        }
        ConditionCmd::PlaceSingle { params_json, sel } => {
            let acc = d.account(sel.account.account_index).await?;
            let req = single_condition(scope(sel.futopt), &params_json)?;
            d.single_for(&acc, req).await
        }
        ConditionCmd::PlaceMulti { params_json, sel } => {
            let acc = d.account(sel.account.account_index).await?;
            let req = multi_condition(scope(sel.futopt), &params_json)?;
            d.single_for(&acc, req).await
        }
        ConditionCmd::PlaceTrail { params_json, sel } => {
            let acc = d.account(sel.account.account_index).await?;
            let req = trail_profit(scope(sel.futopt), &params_json)?;
            d.single_for(&acc, req).await
        }
        ConditionCmd::PlaceTimeslice { params_json, account } => {
            let acc = d.account(account.account_index).await?;
            let req = time_slice(&params_json)?;
            d.single_for(&acc, req).await
        }
        ConditionCmd::PlaceTpsl { params_json, sel } => {
            let acc = d.account(sel.account.account_index).await?;
            let params = keyword_args(&params_json)?;
            d.single_for(&acc, Cr::TpslOrder { scope: scope(sel.futopt), params }).await
        }
        ConditionCmd::PlaceDayTrade { params_json, sel } => {
            let acc = d.account(sel.account.account_index).await?;
            let params = keyword_args(&params_json)?;
            d.single_for(&acc, Cr::DayTradeCondition { scope: scope(sel.futopt), params }).await
        }
        ConditionCmd::PlaceSingleTpsl { params_json, sel } => {
            let acc = d.account(sel.account.account_index).await?;
            let params = keyword_args(&params_json)?;
            d.single_for(&acc, Cr::SingleConditionWithTpsl { scope: scope(sel.futopt), params }).await
        }
        ConditionCmd::PlaceMultiTpsl { params_json, sel } => {
            let acc = d.account(sel.account.account_index).await?;
            let params = keyword_args(&params_json)?;
            d.single_for(&acc, Cr::MultiConditionWithTpsl { scope: scope(sel.futopt), params }).await
        }
    }
}

// ---------------------------------------------------------------------------
// JSON payload decoding
// ---------------------------------------------------------------------------

fn keyword_args(text: &str) -> FbResult<Map<String, Value>> {
    let params = parse_json(text)?;
    Ok(as_object(&params, "params")?.clone())
}

pub fn single_condition(scope: ConditionScope, text: &str) -> FbResult<ConditionRequest> {
    let params = parse_json(text)?;
    let obj = as_object(&params, "params")?;
    Ok(ConditionRequest::SingleCondition {
        scope,
        window: ConditionWindow::from_json(obj)?,
        condition: Condition::from_json(required(obj, "condition")?)?,
        order: StockOrder::from_json(required(obj, "order")?)?,
    })
}

pub fn multi_condition(scope: ConditionScope, text: &str) -> FbResult<ConditionRequest> {
    let params = parse_json(text)?;
    let obj = as_object(&params, "params")?;
    Ok(ConditionRequest::MultiCondition {
        scope,
        window: ConditionWindow::from_json(obj)?,
        conditions: Condition::list_from_json(required(obj, "conditions")?)?,
        order: StockOrder::from_json(required(obj, "order")?)?,
    })
}

pub fn trail_profit(scope: ConditionScope, text: &str) -> FbResult<ConditionRequest> {
    let params = parse_json(text)?;
    let obj = as_object(&params, "params")?;
    Ok(ConditionRequest::TrailProfit {
        scope,
        window: ConditionWindow::from_json(obj)?,
        trail_order: TrailOrder::from_json(required(obj, "trail_order")?)?,
    })
}

pub fn time_slice(text: &str) -> FbResult<ConditionRequest> {
    let params = parse_json(text)?;
    let obj = as_object(&params, "params")?;
    Ok(ConditionRequest::TimeSliceOrder {
        window: ConditionWindow::from_json(obj)?,
        split: SplitDescription::from_json(required(obj, "split")?)?,
        order: StockOrder::from_json(required(obj, "order")?)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fb_core::FbError;
    use fb_sdk::SdkRequest;
    use serde_json::json;

    const ORDER: &str = r#"{"buy_sell":"Buy","symbol":"2881","price":"66","quantity":2000}"#;

    #[test]
    fn single_condition_payload() {
        let text = format!(
            r#"{{"start_date":"2024-06-01","end_date":"2024-06-30","stop_sign":"Full",
                "condition":{{"trading_type":"Reference","symbol":"2881","trigger_content":"MatchedPrice","price":66,"operator":"LessThan"}},
                "order":{ORDER}}}"#
        );
        let req = single_condition(ConditionScope::Stock, &text).unwrap();
        let (method, params) = SdkRequest::from(req).into_wire().unwrap();
        assert_eq!(method, "condition.single_condition");
        assert_eq!(params["scope"], "stock");
        assert_eq!(params["stop_sign"], "Full");
        assert_eq!(params["condition"]["price"], "66");
        assert_eq!(params["order"]["price_type"], "Limit");
        assert_eq!(params["order"]["market_type"], "Common");
    }

    #[test]
    fn trail_quantity_falls_back_to_lot() {
        let text = r#"{"start_date":"2024-06-01","end_date":"2024-06-30","stop_sign":"UntilEnd",
            "trail_order":{"symbol":"TXFA4","price":"17000","direction":"Up","tick_num":5,"buy_sell":"Sell","lot":3}}"#;
        let req = trail_profit(ConditionScope::FutOpt, text).unwrap();
        let (_, params) = SdkRequest::from(req).into_wire().unwrap();
        assert_eq!(params["scope"], "futopt");
        assert_eq!(params["trail_order"]["quantity"], 3);
        assert_eq!(params["trail_order"]["order_type"], "Stock");
    }

    #[test]
    fn missing_key_is_an_operation_failure() {
        let err = single_condition(ConditionScope::Stock, r#"{"start_date":"2024-06-01"}"#).unwrap_err();
        assert!(matches!(err, FbError::Sdk(_)));
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn bad_stop_sign_is_rejected() {
        let text = format!(
            r#"{{"start_date":"a","end_date":"b","stop_sign":"Never","split":{{}},"order":{ORDER}}}"#
        );
        assert!(time_slice(&text).is_err());
    }

    #[test]
    fn keyword_args_must_be_object() {
        assert!(keyword_args("[1,2]").is_err());
        let params = keyword_args(r#"{"start_date":"2024-06-01","tpsl":{}}"#).unwrap();
        assert_eq!(Value::Object(params), json!({"start_date": "2024-06-01", "tpsl": {}}));
    }
}
