//! The `fubon` command tree.
//!
//! Groups mirror the SDK domains. Choice-valued options are the
//! [`fb_core::types`] enums, so clap rejects unknown spellings before any
//! command runs.

use clap::{Args, Parser, Subcommand};
use fb_core::types::{
    ChangeKind, Direction, Exchange, FutOptMarketType, FutOptOrderType, FutOptPriceType,
    HistoryTimeframe, Market, MarketType, OrderType, PriceType, SettlementRange, StreamChannel,
    TickerType, TimeInForce, Timeframe, TradeKind,
};

/// Fubon Neo trading CLI.
///
/// Every command prints one JSON document. Login first with:
/// fubon login --id <ID> --password <PW> --cert-path <PATH>
#[derive(Parser, Debug)]
#[command(name = "fubon", version, about = "Fubon Neo trading CLI (JSON output)")]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error). Logs go to stderr.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Optional log directory for file output.
    #[arg(long, global = true)]
    pub log_dir: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Login, logout and session status
    Login(LoginArgs),

    /// Stock orders and order queries
    Stock {
        #[command(subcommand)]
        cmd: StockCmd,
    },

    /// Account queries (inventory, P&L, settlement, balances)
    Account {
        #[command(subcommand)]
        cmd: AccountCmd,
    },

    /// Market data (quotes, candles, snapshots, rankings, indicators)
    Market {
        #[command(subcommand)]
        cmd: MarketCmd,
    },

    /// Streaming market data and account callbacks (JSON lines)
    Realtime {
        #[command(subcommand)]
        cmd: RealtimeCmd,
    },

    /// Futures and options orders
    Futopt {
        #[command(subcommand)]
        cmd: FutOptCmd,
    },

    /// Conditional orders (TPSL, trailing, time-slice, day-trade)
    Condition {
        #[command(subcommand)]
        cmd: ConditionCmd,
    },

    /// Ask the AI assistant a one-shot question
    Ask(AskArgs),

    /// Interactive AI chat that can run suggested commands
    Chat,

    /// Local settings (AI key, model, gateway URL)
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

/// `--account-index`, shared by every account-bound command.
#[derive(Args, Debug, Clone, Copy)]
pub struct AccountSel {
    /// Account index
    #[arg(long, default_value_t = 0)]
    pub account_index: usize,
}

// ---------------------------------------------------------------------------
// login
// ---------------------------------------------------------------------------

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Personal ID
    #[arg(long = "id")]
    pub personal_id: Option<String>,

    /// Login password
    #[arg(long)]
    pub password: Option<String>,

    /// Path to certificate file
    #[arg(long)]
    pub cert_path: Option<String>,

    /// Certificate password (defaults to the personal ID)
    #[arg(long)]
    pub cert_password: Option<String>,

    #[command(subcommand)]
    pub action: Option<LoginAction>,
}

#[derive(Subcommand, Debug)]
pub enum LoginAction {
    /// Clear saved session credentials
    Logout,
    /// Show whether a session is saved
    Status,
}

// ---------------------------------------------------------------------------
// stock
// ---------------------------------------------------------------------------

#[derive(Args, Debug)]
pub struct StockOrderArgs {
    /// Stock symbol, e.g. 2330
    pub symbol: String,

    /// Number of shares (1000 = one board lot)
    pub quantity: i64,

    /// Limit price. Omit for market orders.
    #[arg(long)]
    pub price: Option<String>,

    #[arg(long, value_enum, default_value_t = PriceType::Limit)]
    pub price_type: PriceType,

    #[arg(long, value_enum, default_value_t = TimeInForce::Rod)]
    pub time_in_force: TimeInForce,

    #[arg(long, value_enum, default_value_t = OrderType::Stock)]
    pub order_type: OrderType,

    #[arg(long, value_enum, default_value_t = MarketType::Common)]
    pub market_type: MarketType,

    /// User-defined tag (max 10 alphanumeric chars)
    #[arg(long)]
    pub user_def: Option<String>,

    #[command(flatten)]
    pub account: AccountSel,
}

/// `--from` / `--to`, both required.
#[derive(Args, Debug, Clone)]
pub struct DateRange {
    /// Start date (yyyy-MM-dd)
    #[arg(long = "from")]
    pub from: String,

    /// End date (yyyy-MM-dd)
    #[arg(long = "to")]
    pub to: String,
}

#[derive(Subcommand, Debug)]
pub enum StockCmd {
    /// Place a BUY order
    Buy(StockOrderArgs),

    /// Place a SELL order
    Sell(StockOrderArgs),

    /// List today's orders
    Orders {
        #[command(flatten)]
        account: AccountSel,
    },

    /// Cancel an order by order number
    Cancel {
        order_no: String,
        #[command(flatten)]
        account: AccountSel,
    },

    /// Change the price of an open order
    ModifyPrice {
        order_no: String,
        new_price: String,
        #[command(flatten)]
        account: AccountSel,
    },

    /// Change the quantity of an open order
    ModifyQuantity {
        order_no: String,
        new_quantity: i64,
        #[command(flatten)]
        account: AccountSel,
    },

    /// Order detail with modification history
    OrderDetail {
        order_no: String,
        #[command(flatten)]
        account: AccountSel,
    },

    /// Historical orders (max 30-day range)
    OrderHistory {
        #[command(flatten)]
        range: DateRange,
        #[command(flatten)]
        account: AccountSel,
    },

    /// Historical fills (max 30-day range)
    FilledHistory {
        #[command(flatten)]
        range: DateRange,
        #[command(flatten)]
        account: AccountSel,
    },

    /// Place several orders at once. ORDERS_JSON is an array of order objects.
    BatchPlace {
        orders_json: String,
        #[command(flatten)]
        account: AccountSel,
    },

    /// Cancel several orders by order number
    BatchCancel {
        #[arg(required = true)]
        order_nos: Vec<String>,
        #[command(flatten)]
        account: AccountSel,
    },

    /// Modify several prices. UPDATES_JSON is an array of {order_no, price}.
    BatchModifyPrice {
        updates_json: String,
        #[command(flatten)]
        account: AccountSel,
    },

    /// Modify several quantities. UPDATES_JSON is an array of {order_no, quantity}.
    BatchModifyQuantity {
        updates_json: String,
        #[command(flatten)]
        account: AccountSel,
    },

    /// Create a named batch order (same JSON as batch-place)
    BatchCreate {
        orders_json: String,
        #[command(flatten)]
        account: AccountSel,
    },

    /// Show one batch order
    BatchGet {
        batch_no: String,
        #[command(flatten)]
        account: AccountSel,
    },

    /// List batch orders
    BatchList {
        #[command(flatten)]
        account: AccountSel,
    },

    /// Quote with tradability flags
    SymbolQuote {
        symbol: String,
        #[arg(long, value_enum, default_value_t = MarketType::Common)]
        market_type: MarketType,
        #[command(flatten)]
        account: AccountSel,
    },

    /// Quote snapshot for all holdings
    SymbolSnapshot {
        #[arg(long, value_enum, default_value_t = MarketType::Common)]
        market_type: MarketType,
        /// Comma-separated stock types filter, e.g. stock,margin
        #[arg(long)]
        stock_types: Option<String>,
        #[command(flatten)]
        account: AccountSel,
    },

    /// Up/down limit price change report
    PriceChange {
        /// Market to query. Omit to query all holdings.
        #[arg(long, value_enum)]
        market: Option<Market>,
        #[command(flatten)]
        account: AccountSel,
    },
}

// ---------------------------------------------------------------------------
// account
// ---------------------------------------------------------------------------

#[derive(Subcommand, Debug)]
pub enum AccountCmd {
    /// Stock inventory
    Inventory {
        #[command(flatten)]
        account: AccountSel,
    },
    /// Unrealized gains and losses
    Unrealized {
        #[command(flatten)]
        account: AccountSel,
    },
    /// Settlement amounts
    Settlement {
        #[arg(long, value_enum, default_value_t = SettlementRange::Today)]
        range: SettlementRange,
        #[command(flatten)]
        account: AccountSel,
    },
    /// Margin and short quota for a symbol
    MarginQuota {
        symbol: String,
        #[command(flatten)]
        account: AccountSel,
    },
    /// Bank balance
    BankBalance {
        #[command(flatten)]
        account: AccountSel,
    },
    /// Margin maintenance ratio
    Maintenance {
        #[command(flatten)]
        account: AccountSel,
    },
    /// Realized profit and loss
    Realized {
        #[command(flatten)]
        account: AccountSel,
    },
    /// Realized profit and loss summary
    RealizedSummary {
        #[command(flatten)]
        account: AccountSel,
    },
    /// Day-trade quota
    DayTradeQuota {
        #[command(flatten)]
        account: AccountSel,
    },
}

// ---------------------------------------------------------------------------
// market
// ---------------------------------------------------------------------------

#[derive(Args, Debug)]
pub struct HistoryArgs {
    pub symbol: String,
    /// Start date (yyyy-MM-dd)
    #[arg(long = "from")]
    pub from: Option<String>,
    /// End date (yyyy-MM-dd)
    #[arg(long = "to")]
    pub to: Option<String>,
    #[arg(long, value_enum, default_value_t = HistoryTimeframe::Day)]
    pub timeframe: HistoryTimeframe,
    /// Use adjusted prices
    #[arg(long)]
    pub adjusted: bool,
}

#[derive(Args, Debug)]
pub struct TradesArgs {
    pub symbol: String,
    /// Max number of trades
    #[arg(long)]
    pub limit: Option<i64>,
    /// Offset for pagination
    #[arg(long)]
    pub offset: Option<i64>,
}

#[derive(Subcommand, Debug)]
pub enum MarketCmd {
    /// Intraday quote
    Quote {
        symbol: String,
        #[arg(long)]
        odd_lot: bool,
    },
    /// Ticker info (name, reference price, limits)
    Ticker {
        symbol: String,
        #[arg(long)]
        odd_lot: bool,
    },
    /// Intraday candles
    Candles {
        symbol: String,
        #[arg(long, value_enum, default_value_t = Timeframe::M5)]
        timeframe: Timeframe,
        #[arg(long)]
        odd_lot: bool,
    },
    /// Intraday trades
    Trades(TradesArgs),
    /// Volume at price
    Volumes { symbol: String },
    /// Market-wide quote snapshot
    Snapshot {
        #[arg(value_enum)]
        market: Market,
    },
    /// Top gainers / losers
    Movers {
        #[arg(value_enum)]
        market: Market,
        #[arg(long, value_enum, default_value_t = Direction::Up)]
        direction: Direction,
        #[arg(long, value_enum, default_value_t = ChangeKind::Percent)]
        change: ChangeKind,
    },
    /// Most active by volume or value
    Actives {
        #[arg(value_enum)]
        market: Market,
        #[arg(long, value_enum, default_value_t = TradeKind::Volume)]
        trade: TradeKind,
    },
    /// Historical candles
    History(HistoryArgs),
    /// 52-week statistics
    Stats { symbol: String },
    /// Ticker list
    Tickers {
        #[arg(long = "type", value_enum, default_value_t = TickerType::Equity)]
        kind: TickerType,
        #[arg(long, value_enum)]
        exchange: Option<Exchange>,
    },
    /// Bollinger bands
    Bbands {
        symbol: String,
        #[arg(long, value_enum, default_value_t = HistoryTimeframe::Day)]
        timeframe: HistoryTimeframe,
        #[arg(long)]
        period: Option<i64>,
        /// Standard deviation multiplier
        #[arg(long)]
        std_dev: Option<f64>,
    },
    /// KDJ stochastic
    Kdj {
        symbol: String,
        #[arg(long, value_enum, default_value_t = HistoryTimeframe::Day)]
        timeframe: HistoryTimeframe,
        #[arg(long)]
        period: Option<i64>,
    },
    /// MACD
    Macd {
        symbol: String,
        #[arg(long, value_enum, default_value_t = HistoryTimeframe::Day)]
        timeframe: HistoryTimeframe,
        #[arg(long)]
        fast: Option<i64>,
        #[arg(long)]
        slow: Option<i64>,
        #[arg(long)]
        signal: Option<i64>,
    },
    /// Relative strength index
    Rsi {
        symbol: String,
        #[arg(long, value_enum, default_value_t = HistoryTimeframe::Day)]
        timeframe: HistoryTimeframe,
        #[arg(long)]
        period: Option<i64>,
    },
    /// Simple moving average
    Sma {
        symbol: String,
        #[arg(long, value_enum, default_value_t = HistoryTimeframe::Day)]
        timeframe: HistoryTimeframe,
        #[arg(long)]
        period: Option<i64>,
    },
    /// Capital changes (splits, reductions)
    CapitalChanges {
        #[arg(long = "from")]
        from: Option<String>,
        #[arg(long = "to")]
        to: Option<String>,
        #[arg(long)]
        symbol: Option<String>,
    },
    /// Futures/options intraday quote
    FutoptQuote { symbol: String },
    /// Futures/options contract info
    FutoptTicker { symbol: String },
    /// Futures/options contract list
    FutoptTickers {
        /// Contract type filter
        #[arg(long = "type")]
        kind: Option<String>,
    },
    /// Futures/options intraday candles
    FutoptCandles {
        symbol: String,
        #[arg(long, value_enum, default_value_t = Timeframe::M5)]
        timeframe: Timeframe,
    },
    /// Futures/options intraday trades
    FutoptTrades(TradesArgs),
    /// Futures/options volume at price
    FutoptVolumes { symbol: String },
    /// Futures/options historical candles
    FutoptHistory(HistoryArgs),
    /// Futures/options statistics
    FutoptStats { symbol: String },
}

// ---------------------------------------------------------------------------
// realtime
// ---------------------------------------------------------------------------

#[derive(Subcommand, Debug)]
pub enum RealtimeCmd {
    /// Stream market data for a symbol until interrupted
    Subscribe {
        symbol: String,
        #[arg(long, value_enum, default_value_t = StreamChannel::Trades)]
        channel: StreamChannel,
    },
    /// Stream order, fill and system callbacks until interrupted
    Callbacks {
        #[command(flatten)]
        account: AccountSel,
    },
}

// ---------------------------------------------------------------------------
// futopt
// ---------------------------------------------------------------------------

#[derive(Args, Debug)]
pub struct FutOptOrderArgs {
    /// Contract symbol, e.g. TXFA4
    pub symbol: String,

    /// Number of contracts
    pub lot: i64,

    /// Limit price. Omit for market orders.
    #[arg(long)]
    pub price: Option<String>,

    #[arg(long, value_enum, default_value_t = FutOptPriceType::Limit)]
    pub price_type: FutOptPriceType,

    #[arg(long, value_enum, default_value_t = TimeInForce::Rod)]
    pub time_in_force: TimeInForce,

    /// New position, cover (close), or auto
    #[arg(long, value_enum, default_value_t = FutOptOrderType::New)]
    pub order_type: FutOptOrderType,

    #[arg(long, value_enum, default_value_t = FutOptMarketType::Future)]
    pub market_type: FutOptMarketType,

    #[command(flatten)]
    pub account: AccountSel,
}

#[derive(Subcommand, Debug)]
pub enum FutOptCmd {
    /// Place a BUY order
    Buy(FutOptOrderArgs),
    /// Place a SELL order
    Sell(FutOptOrderArgs),
    /// List today's orders
    Orders {
        #[command(flatten)]
        account: AccountSel,
    },
    /// List today's fills
    Filled {
        #[command(flatten)]
        account: AccountSel,
    },
    /// Cancel an order by order number
    Cancel {
        order_no: String,
        #[command(flatten)]
        account: AccountSel,
    },
    /// Change the price of an open order
    ModifyPrice {
        order_no: String,
        new_price: String,
        #[command(flatten)]
        account: AccountSel,
    },
    /// Change the lot count of an open order
    ModifyQuantity {
        order_no: String,
        new_quantity: i64,
        #[command(flatten)]
        account: AccountSel,
    },
    /// Open positions
    Inventories {
        #[command(flatten)]
        account: AccountSel,
    },
    /// Settlement amounts
    Settlements {
        #[command(flatten)]
        account: AccountSel,
    },
}

// ---------------------------------------------------------------------------
// condition
// ---------------------------------------------------------------------------

/// `--futopt` and `--account-index`.
#[derive(Args, Debug, Clone, Copy)]
pub struct ConditionSel {
    /// Use the futures/options condition client
    #[arg(long)]
    pub futopt: bool,
    #[command(flatten)]
    pub account: AccountSel,
}

#[derive(Subcommand, Debug)]
pub enum ConditionCmd {
    /// List active conditional orders
    List {
        #[command(flatten)]
        sel: ConditionSel,
    },
    /// Show one conditional order
    Get {
        guid: String,
        #[command(flatten)]
        sel: ConditionSel,
    },
    /// Cancel a conditional order
    Cancel {
        guid: String,
        #[command(flatten)]
        sel: ConditionSel,
    },
    /// Conditional order history
    History {
        #[command(flatten)]
        range: DateRange,
        #[command(flatten)]
        sel: ConditionSel,
    },
    /// List trailing orders
    TrailList {
        #[command(flatten)]
        sel: ConditionSel,
    },
    /// Trailing order history
    TrailHistory {
        #[command(flatten)]
        range: DateRange,
        #[command(flatten)]
        sel: ConditionSel,
    },
    /// Show a time-slice order (stock only)
    TimesliceGet {
        batch_no: String,
        #[command(flatten)]
        account: AccountSel,
    },
    /// List day-trade conditions
    DayTradeList {
        #[command(flatten)]
        sel: ConditionSel,
    },
    /// Single-condition order.
    /// PARAMS_JSON: {start_date, end_date, stop_sign, condition, order}
    PlaceSingle {
        params_json: String,
        #[command(flatten)]
        sel: ConditionSel,
    },
    /// Multi-condition order.
    /// PARAMS_JSON: {start_date, end_date, stop_sign, conditions: [..], order}
    PlaceMulti {
        params_json: String,
        #[command(flatten)]
        sel: ConditionSel,
    },
    /// Take-profit / stop-loss order (keyword arguments as JSON)
    PlaceTpsl {
        params_json: String,
        #[command(flatten)]
        sel: ConditionSel,
    },
    /// Trailing stop/profit order.
    /// PARAMS_JSON: {start_date, end_date, stop_sign, trail_order}
    PlaceTrail {
        params_json: String,
        #[command(flatten)]
        sel: ConditionSel,
    },
    /// Time-slice order (stock only).
    /// PARAMS_JSON: {start_date, end_date, stop_sign, split, order}
    PlaceTimeslice {
        params_json: String,
        #[command(flatten)]
        account: AccountSel,
    },
    /// Day-trade condition order (keyword arguments as JSON)
    PlaceDayTrade {
        params_json: String,
        #[command(flatten)]
        sel: ConditionSel,
    },
    /// Single condition with TPSL (keyword arguments as JSON)
    PlaceSingleTpsl {
        params_json: String,
        #[command(flatten)]
        sel: ConditionSel,
    },
    /// Multi condition with TPSL (keyword arguments as JSON)
    PlaceMultiTpsl {
        params_json: String,
        #[command(flatten)]
        sel: ConditionSel,
    },
}

// ---------------------------------------------------------------------------
// ask / config
// ---------------------------------------------------------------------------

#[derive(Args, Debug)]
pub struct AskArgs {
    pub question: String,

    /// Offer to run the suggested commands
    #[arg(long, short = 'x')]
    pub execute: bool,

    /// Print one JSON object instead of formatted text
    #[arg(long)]
    pub json_output: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Set a value (openai-key, ai-model, ai-base-url, gateway-url)
    Set { key: String, value: String },
    /// Print one value
    Get { key: String },
    /// Print all stored values
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn stock_buy_defaults() {
        let cli = Cli::try_parse_from(["fubon", "stock", "buy", "2330", "1000"]).unwrap();
        let Some(Command::Stock { cmd: StockCmd::Buy(args) }) = cli.command else {
            panic!("expected stock buy");
        };
        assert_eq!(args.price, None);
        assert_eq!(args.price_type, PriceType::Limit);
        assert_eq!(args.time_in_force, TimeInForce::Rod);
        assert_eq!(args.order_type, OrderType::Stock);
        assert_eq!(args.market_type, MarketType::Common);
        assert_eq!(args.account.account_index, 0);
    }

    #[test]
    fn cli_spellings_are_accepted() {
        let cli = Cli::try_parse_from([
            "fubon", "stock", "sell", "2330", "2000", "--price", "580",
            "--price-type", "limit-up", "--order-type", "day-trade", "--account-index", "1",
        ])
        .unwrap();
        let Some(Command::Stock { cmd: StockCmd::Sell(args) }) = cli.command else {
            panic!("expected stock sell");
        };
        assert_eq!(args.price_type, PriceType::LimitUp);
        assert_eq!(args.order_type, OrderType::DayTrade);
        assert_eq!(args.account.account_index, 1);
    }

    #[test]
    fn unknown_choice_is_usage_error() {
        assert!(Cli::try_parse_from(["fubon", "stock", "buy", "2330", "1", "--price-type", "best"]).is_err());
        assert!(Cli::try_parse_from(["fubon", "market", "snapshot", "NYSE"]).is_err());
    }

    #[test]
    fn login_options_are_optional() {
        let cli = Cli::try_parse_from(["fubon", "login", "--id", "A123456789"]).unwrap();
        let Some(Command::Login(args)) = cli.command else { panic!("expected login") };
        assert_eq!(args.personal_id.as_deref(), Some("A123456789"));
        assert!(args.password.is_none());
        assert!(args.action.is_none());

        let cli = Cli::try_parse_from(["fubon", "login", "status"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Login(LoginArgs { action: Some(LoginAction::Status), .. }))));
    }

    #[test]
    fn batch_cancel_needs_an_order() {
        assert!(Cli::try_parse_from(["fubon", "stock", "batch-cancel"]).is_err());
        let cli = Cli::try_parse_from(["fubon", "stock", "batch-cancel", "A1", "A2"]).unwrap();
        let Some(Command::Stock { cmd: StockCmd::BatchCancel { order_nos, .. } }) = cli.command else {
            panic!("expected batch-cancel");
        };
        assert_eq!(order_nos, ["A1", "A2"]);
    }

    #[test]
    fn global_log_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["fubon", "market", "quote", "2330", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.log_level, "debug");
        assert!(cli.log_dir.is_none());
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["fubon"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn market_defaults() {
        let cli = Cli::try_parse_from(["fubon", "market", "history", "2330"]).unwrap();
        let Some(Command::Market { cmd: MarketCmd::History(args) }) = cli.command else {
            panic!("expected market history");
        };
        assert_eq!(args.timeframe, HistoryTimeframe::Day);
        assert!(!args.adjusted);

        let cli = Cli::try_parse_from(["fubon", "market", "tickers", "--type", "INDEX"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Market { cmd: MarketCmd::Tickers { kind: TickerType::Index, exchange: None } })
        ));
    }
}
