//! SDK enumerations and their command-line spellings.
//!
//! Every enum carries one fixed table mapping the CLI spelling (what a user
//! types, e.g. `limit-up`) to the SDK constant name (what goes on the wire,
//! e.g. `LimitUp`). Parsing accepts either spelling so that JSON batch
//! payloads may use both.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FbError;

macro_rules! sdk_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $variant:ident => $cli:literal / $sdk:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
        pub enum $name {
            $(
                #[value(name = $cli)]
                $variant,
            )+
        }

        impl $name {
            /// SDK constant name.
            pub fn sdk_name(self) -> &'static str {
                match self {
                    $( Self::$variant => $sdk, )+
                }
            }

            /// Command-line spelling.
            pub fn cli_name(self) -> &'static str {
                match self {
                    $( Self::$variant => $cli, )+
                }
            }
        }

        impl FromStr for $name {
            type Err = FbError;

            #[allow(unreachable_patterns)]
            fn from_str(s: &str) -> Result<Self, FbError> {
                match s {
                    $( $cli | $sdk => Ok(Self::$variant), )+
                    other => Err(FbError::Sdk(format!(
                        concat!("invalid ", stringify!($name), " '{}'"),
                        other
                    ))),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.sdk_name())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.sdk_name())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Stock orders
// ---------------------------------------------------------------------------

sdk_enum! {
    /// Order side.
    BuySell {
        Buy => "buy" / "Buy",
        Sell => "sell" / "Sell",
    }
}

sdk_enum! {
    /// Stock order price type.
    PriceType {
        Limit => "limit" / "Limit",
        Market => "market" / "Market",
        LimitUp => "limit-up" / "LimitUp",
        LimitDown => "limit-down" / "LimitDown",
        Reference => "reference" / "Reference",
    }
}

sdk_enum! {
    /// Order lifetime.
    TimeInForce {
        Rod => "ROD" / "ROD",
        Ioc => "IOC" / "IOC",
        Fok => "FOK" / "FOK",
    }
}

sdk_enum! {
    /// Stock order type (cash, margin, short, ..).
    OrderType {
        Stock => "stock" / "Stock",
        Margin => "margin" / "Margin",
        Short => "short" / "Short",
        Sbl => "sbl" / "SBL",
        DayTrade => "day-trade" / "DayTrade",
    }
}

sdk_enum! {
    /// Stock trading session / lot type.
    MarketType {
        Common => "common" / "Common",
        Odd => "odd" / "Odd",
        IntradayOdd => "intraday-odd" / "IntradayOdd",
        Fixing => "fixing" / "Fixing",
        Emg => "emg" / "Emg",
        EmgOdd => "emg-odd" / "EmgOdd",
    }
}

sdk_enum! {
    /// Exchange segment for price-change queries.
    Market {
        Tse => "TSE" / "TSE",
        Otc => "OTC" / "OTC",
        Esb => "ESB" / "ESB",
        Tib => "TIB" / "TIB",
        Psb => "PSB" / "PSB",
    }
}

sdk_enum! {
    /// Settlement date range.
    SettlementRange {
        Today => "0d" / "0d",
        OneDay => "1d" / "1d",
        TwoDays => "2d" / "2d",
        ThreeDays => "3d" / "3d",
    }
}

// ---------------------------------------------------------------------------
// Futures / options orders
// ---------------------------------------------------------------------------

sdk_enum! {
    /// Futures/options price type.
    FutOptPriceType {
        Limit => "limit" / "Limit",
        Market => "market" / "Market",
        MarketRange => "market-range" / "MarketRange",
    }
}

sdk_enum! {
    /// Futures/options position effect.
    FutOptOrderType {
        New => "new" / "New",
        Cover => "cover" / "Cover",
        Auto => "auto" / "Auto",
    }
}

sdk_enum! {
    /// Futures/options session and product class.
    FutOptMarketType {
        Future => "future" / "Future",
        FutureNight => "future-night" / "FutureNight",
        Option => "option" / "Option",
        OptionNight => "option-night" / "OptionNight",
    }
}

// ---------------------------------------------------------------------------
// Conditional orders
// ---------------------------------------------------------------------------

sdk_enum! {
    /// When a multi-condition order stops monitoring.
    StopSign {
        Full => "Full" / "Full",
        Partial => "Partial" / "Partial",
        UntilEnd => "UntilEnd" / "UntilEnd",
    }
}

// ---------------------------------------------------------------------------
// Market data
// ---------------------------------------------------------------------------

sdk_enum! {
    /// Intraday candle width in minutes.
    Timeframe {
        M1 => "1" / "1",
        M5 => "5" / "5",
        M10 => "10" / "10",
        M15 => "15" / "15",
        M30 => "30" / "30",
        M60 => "60" / "60",
    }
}

sdk_enum! {
    /// Historical candle width.
    HistoryTimeframe {
        M1 => "1" / "1",
        M5 => "5" / "5",
        M10 => "10" / "10",
        M15 => "15" / "15",
        M30 => "30" / "30",
        M60 => "60" / "60",
        Day => "D" / "D",
        Week => "W" / "W",
        Month => "M" / "M",
    }
}

sdk_enum! {
    /// Movers direction.
    Direction {
        Up => "up" / "up",
        Down => "down" / "down",
    }
}

sdk_enum! {
    /// Movers ranking basis.
    ChangeKind {
        Percent => "percent" / "percent",
        Value => "value" / "value",
    }
}

sdk_enum! {
    /// Actives ranking basis.
    TradeKind {
        Volume => "volume" / "volume",
        Value => "value" / "value",
    }
}

sdk_enum! {
    /// Stock ticker list category.
    TickerType {
        Equity => "EQUITY" / "EQUITY",
        Index => "INDEX" / "INDEX",
        Warrant => "WARRANT" / "WARRANT",
        OddLot => "ODDLOT" / "ODDLOT",
    }
}

sdk_enum! {
    /// Listing exchange.
    Exchange {
        Twse => "TWSE" / "TWSE",
        Tpex => "TPEx" / "TPEx",
    }
}

sdk_enum! {
    /// Realtime subscription channel.
    StreamChannel {
        Trades => "trades" / "trades",
        Aggregates => "aggregates" / "aggregates",
        Candles => "candles" / "candles",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn cli_spelling_maps_to_sdk_constant() {
        assert_eq!(PriceType::LimitUp.sdk_name(), "LimitUp");
        assert_eq!(OrderType::DayTrade.sdk_name(), "DayTrade");
        assert_eq!(OrderType::Sbl.sdk_name(), "SBL");
        assert_eq!(MarketType::IntradayOdd.sdk_name(), "IntradayOdd");
        assert_eq!(FutOptMarketType::OptionNight.sdk_name(), "OptionNight");
    }

    #[test]
    fn both_spellings_parse() {
        assert_eq!("limit-up".parse::<PriceType>().unwrap(), PriceType::LimitUp);
        assert_eq!("LimitUp".parse::<PriceType>().unwrap(), PriceType::LimitUp);
        assert_eq!("day-trade".parse::<OrderType>().unwrap(), OrderType::DayTrade);
        assert_eq!("Buy".parse::<BuySell>().unwrap(), BuySell::Buy);
        assert!("sideways".parse::<BuySell>().is_err());
    }

    #[test]
    fn clap_accepts_cli_spelling_only() {
        assert_eq!(<PriceType as ValueEnum>::from_str("limit-down", false).unwrap(), PriceType::LimitDown);
        assert!(<PriceType as ValueEnum>::from_str("LimitDown", false).is_err());
        assert_eq!(<TimeInForce as ValueEnum>::from_str("IOC", false).unwrap(), TimeInForce::Ioc);
        assert_eq!(<Exchange as ValueEnum>::from_str("TPEx", false).unwrap(), Exchange::Tpex);
    }

    #[test]
    fn serializes_as_sdk_name() {
        assert_eq!(serde_json::to_string(&MarketType::EmgOdd).unwrap(), "\"EmgOdd\"");
        let parsed: FutOptOrderType = serde_json::from_str("\"cover\"").unwrap();
        assert_eq!(parsed, FutOptOrderType::Cover);
    }
}
