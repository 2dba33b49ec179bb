//! Market data REST operations.
//!
//! Parameter names follow the market data API (`stdDev`, `fastPeriod`,
//! `from`, `to`); absent options are omitted rather than sent as null.

use fb_core::types::{
    ChangeKind, Direction, Exchange, HistoryTimeframe, Market, TickerType, Timeframe, TradeKind,
};
use serde::Serialize;

/// `type` value selecting odd-lot data.
pub const ODD_LOT: &str = "oddlot";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolQuery {
    pub symbol: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl SymbolQuery {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self { symbol: symbol.into(), kind: None }
    }

    pub fn odd_lot(mut self, odd_lot: bool) -> Self {
        self.kind = odd_lot.then(|| ODD_LOT.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandlesQuery {
    pub symbol: String,
    pub timeframe: Timeframe,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradesQuery {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoversQuery {
    pub market: Market,
    pub direction: Direction,
    pub change: ChangeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivesQuery {
    pub market: Market,
    pub trade: TradeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryQuery {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    pub timeframe: HistoryTimeframe,
    /// The API takes the string `"true"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjusted: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickersQuery {
    #[serde(rename = "type")]
    pub kind: TickerType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<Exchange>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FutOptTickersQuery {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Technical indicator query; each indicator uses a subset of the options.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorQuery {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<HistoryTimeframe>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_dev: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fast_period: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slow_period: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal_period: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CapitalChangesQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method", content = "params")]
pub enum MarketDataRequest {
    // --- stock intraday ---
    #[serde(rename = "marketdata.stock.intraday.quote")]
    StockQuote(SymbolQuery),
    #[serde(rename = "marketdata.stock.intraday.ticker")]
    StockTicker(SymbolQuery),
    #[serde(rename = "marketdata.stock.intraday.candles")]
    StockCandles(CandlesQuery),
    #[serde(rename = "marketdata.stock.intraday.trades")]
    StockTrades(TradesQuery),
    #[serde(rename = "marketdata.stock.intraday.volumes")]
    StockVolumes(SymbolQuery),
    #[serde(rename = "marketdata.stock.intraday.tickers")]
    StockTickers(TickersQuery),

    // --- stock snapshot ---
    #[serde(rename = "marketdata.stock.snapshot.quotes")]
    SnapshotQuotes { market: Market },
    #[serde(rename = "marketdata.stock.snapshot.movers")]
    SnapshotMovers(MoversQuery),
    #[serde(rename = "marketdata.stock.snapshot.actives")]
    SnapshotActives(ActivesQuery),

    // --- stock historical ---
    #[serde(rename = "marketdata.stock.historical.candles")]
    HistoricalCandles(HistoryQuery),
    #[serde(rename = "marketdata.stock.historical.stats")]
    HistoricalStats(SymbolQuery),

    // --- stock technical ---
    #[serde(rename = "marketdata.stock.technical.bbands")]
    Bbands(IndicatorQuery),
    #[serde(rename = "marketdata.stock.technical.kdj")]
    Kdj(IndicatorQuery),
    #[serde(rename = "marketdata.stock.technical.macd")]
    Macd(IndicatorQuery),
    #[serde(rename = "marketdata.stock.technical.rsi")]
    Rsi(IndicatorQuery),
    #[serde(rename = "marketdata.stock.technical.sma")]
    Sma(IndicatorQuery),

    // --- stock corporate actions ---
    #[serde(rename = "marketdata.stock.corporate_actions.capital_changes")]
    CapitalChanges(CapitalChangesQuery),

    // --- futures / options ---
    #[serde(rename = "marketdata.futopt.intraday.quote")]
    FutOptQuote(SymbolQuery),
    #[serde(rename = "marketdata.futopt.intraday.ticker")]
    FutOptTicker(SymbolQuery),
    #[serde(rename = "marketdata.futopt.intraday.tickers")]
    FutOptTickers(FutOptTickersQuery),
    #[serde(rename = "marketdata.futopt.intraday.candles")]
    FutOptCandles(CandlesQuery),
    #[serde(rename = "marketdata.futopt.intraday.trades")]
    FutOptTrades(TradesQuery),
    #[serde(rename = "marketdata.futopt.intraday.volumes")]
    FutOptVolumes(SymbolQuery),
    #[serde(rename = "marketdata.futopt.historical.candles")]
    FutOptHistoricalCandles(HistoryQuery),
    #[serde(rename = "marketdata.futopt.historical.stats")]
    FutOptHistoricalStats(SymbolQuery),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SdkRequest;
    use serde_json::json;

    fn params(req: MarketDataRequest) -> serde_json::Value {
        SdkRequest::from(req).into_wire().unwrap().1
    }

    #[test]
    fn odd_lot_sets_type() {
        let p = params(MarketDataRequest::StockQuote(SymbolQuery::new("2330").odd_lot(true)));
        assert_eq!(p, json!({"symbol": "2330", "type": "oddlot"}));
        let p = params(MarketDataRequest::StockQuote(SymbolQuery::new("2330").odd_lot(false)));
        assert_eq!(p, json!({"symbol": "2330"}));
    }

    #[test]
    fn macd_uses_api_names() {
        let p = params(MarketDataRequest::Macd(IndicatorQuery {
            symbol: "2330".into(),
            timeframe: Some(HistoryTimeframe::Day),
            fast_period: Some(12),
            slow_period: Some(26),
            signal_period: Some(9),
            ..Default::default()
        }));
        assert_eq!(
            p,
            json!({"symbol": "2330", "timeframe": "D", "fastPeriod": 12, "slowPeriod": 26, "signalPeriod": 9})
        );
    }

    #[test]
    fn history_adjusted_is_text() {
        let p = params(MarketDataRequest::HistoricalCandles(HistoryQuery {
            symbol: "2330".into(),
            from: Some("2024-01-01".into()),
            to: None,
            timeframe: HistoryTimeframe::Week,
            adjusted: Some("true".into()),
        }));
        assert_eq!(p, json!({"symbol": "2330", "from": "2024-01-01", "timeframe": "W", "adjusted": "true"}));
    }
}
