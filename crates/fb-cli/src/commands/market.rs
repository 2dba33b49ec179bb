//! `fubon market ...`: REST market data, no account needed.

use fb_core::error::FbResult;
use fb_sdk::request::marketdata::{
    ActivesQuery, CandlesQuery, CapitalChangesQuery, FutOptTickersQuery, HistoryQuery,
    IndicatorQuery, MoversQuery, ODD_LOT, SymbolQuery, TickersQuery, TradesQuery,
};
use fb_sdk::request::MarketDataRequest as Md;
use fb_sdk::BrokerSdk;
use serde_json::Value;

use crate::cli::{HistoryArgs, MarketCmd, TradesArgs};
use crate::dispatch::Dispatcher;

pub async fn run<S: BrokerSdk>(cmd: MarketCmd, d: &mut Dispatcher<S>) -> FbResult<Value> {
    d.market(request(cmd)).await
}

/// Map a market command to its market data request.
pub fn request(cmd: MarketCmd) -> Md {
    match cmd {
        MarketCmd::Quote { symbol, odd_lot } => Md::StockQuote(SymbolQuery::new(symbol).odd_lot(odd_lot)),
        MarketCmd::Ticker { symbol, odd_lot } => Md::StockTicker(SymbolQuery::new(symbol).odd_lot(odd_lot)),
        MarketCmd::Candles { symbol, timeframe, odd_lot } => {
            let kind = odd_lot.then(|| ODD_LOT.to_string());
            Md::StockCandles(CandlesQuery { symbol, timeframe, kind })
        }
        MarketCmd::Trades(args) => Md::StockTrades(trades(args)),
        MarketCmd::Volumes { symbol } => Md::StockVolumes(SymbolQuery::new(symbol)),
        MarketCmd::Snapshot { market } => Md::SnapshotQuotes { market },
        MarketCmd::Movers { market, direction, change } => {
            Md::SnapshotMovers(MoversQuery { market, direction, change })
        }
        MarketCmd::Actives { market, trade } => Md::SnapshotActives(ActivesQuery { market, trade }),
        MarketCmd::History(args) => Md::HistoricalCandles(history(args)),
        MarketCmd::Stats { symbol } => Md::HistoricalStats(SymbolQuery::new(symbol)),
        MarketCmd::Tickers { kind, exchange } => Md::StockTickers(TickersQuery { kind, exchange }),
        MarketCmd::Bbands { symbol, timeframe, period, std_dev } => Md::Bbands(IndicatorQuery {
            symbol,
            timeframe: Some(timeframe),
            period,
            std_dev,
            ..Default::default()
        }),
        MarketCmd::Kdj { symbol, timeframe, period } => {
            Md::Kdj(IndicatorQuery { symbol, timeframe: Some(timeframe), period, ..Default::default() })
        }
        MarketCmd::Macd { symbol, timeframe, fast, slow, signal } => Md::Macd(IndicatorQuery {
            symbol,
            timeframe: Some(timeframe),
            fast_period: fast,
            slow_period: slow,
            signal_period: signal,
            ..Default::default()
        }),
        MarketCmd::Rsi { symbol, timeframe, period } => {
            Md::Rsi(IndicatorQuery { symbol, timeframe: Some(timeframe), period, ..Default::default() })
        }
        MarketCmd::Sma { symbol, timeframe, period } => {
            Md::Sma(IndicatorQuery { symbol, timeframe: Some(timeframe), period, ..Default::default() })
        }
        MarketCmd::CapitalChanges { from, to, symbol } => {
            Md::CapitalChanges(CapitalChangesQuery { from, to, symbol })
        }
        MarketCmd::FutoptQuote { symbol } => Md::FutOptQuote(SymbolQuery::new(symbol)),
        MarketCmd::FutoptTicker { symbol } => Md::FutOptTicker(SymbolQuery::new(symbol)),
        MarketCmd::FutoptTickers { kind } => Md::FutOptTickers(FutOptTickersQuery { kind }),
        MarketCmd::FutoptCandles { symbol, timeframe } => {
            Md::FutOptCandles(CandlesQuery { symbol, timeframe, kind: None })
        }
        MarketCmd::FutoptTrades(args) => Md::FutOptTrades(trades(args)),
        MarketCmd::FutoptVolumes { symbol } => Md::FutOptVolumes(SymbolQuery::new(symbol)),
        MarketCmd::FutoptHistory(args) => Md::FutOptHistoricalCandles(history(args)),
        MarketCmd::FutoptStats { symbol } => Md::FutOptHistoricalStats(SymbolQuery::new(symbol)),
    }
}

fn trades(args: TradesArgs) -> TradesQuery {
    TradesQuery { symbol: args.symbol, limit: args.limit, offset: args.offset }
}

fn history(args: HistoryArgs) -> HistoryQuery {
    HistoryQuery {
        symbol: args.symbol,
        from: args.from,
        to: args.to,
        timeframe: args.timeframe,
        adjusted: args.adjusted.then(|| "true".to_string()),
    }
}
