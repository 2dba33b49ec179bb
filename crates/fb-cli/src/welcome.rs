//! Screen printed by a bare `fubon`.

pub fn welcome() -> String {
    format!(
        "\
fubon {version} - Fubon Neo trading CLI

Every command prints one JSON document on stdout.

Command groups:
  login       login, logout, session status
  stock       stock orders and order queries
  account     inventory, P&L, settlement, balances
  market      quotes, candles, snapshots, rankings, indicators
  realtime    streaming market data and account callbacks
  futopt      futures and options orders
  condition   conditional, trailing and time-sliced orders
  ask         one-shot AI question
  chat        interactive AI chat
  config      local settings (AI key, model, gateway URL)

Examples:
  fubon login --id A123456789 --password **** --cert-path ./cert.pfx
  fubon account inventory
  fubon market quote 2330
  fubon stock buy 2330 1000 --price 580
  fubon ask \"how do I check today's fills?\"

Run `fubon <group> --help` for details.",
        version = env!("CARGO_PKG_VERSION")
    )
}
