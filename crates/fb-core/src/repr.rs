//! Parser for the SDK's debug-representation text.
//!
//! Some SDK handles expose nothing but a debug string of the form
//!
//! ```text
//! TypeName { field: value, other: Nested { a: 1, b: "x" }, flag: True }
//! ```
//!
//! [`parse_repr`] turns that text into a JSON object. It never fails: text
//! that does not have the outer `Name { .. }` shape comes back unchanged as
//! a JSON string, and fields without a `:` are dropped.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Number, Value};

static OUTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\w+\s*\{(.*)\}\s*$").expect("static repr pattern")
});

/// Parse `Name { k: v, .. }` text into a JSON object.
///
/// | Value text            | Result                 |
/// |-----------------------|------------------------|
/// | `None` / `null`       | `null`                 |
/// | `True` / `true`       | `true`                 |
/// | `False` / `false`     | `false`                |
/// | `"quoted"`            | `"quoted"`             |
/// | `42` / `-1.5`         | number                 |
/// | `Inner { .. }`        | nested object          |
/// | anything else         | raw string (`Side.Buy`)|
pub fn parse_repr(text: &str) -> Value {
    let Some(caps) = OUTER.captures(text) else {
        return Value::String(text.to_string());
    };
    let inner = caps.get(1).map_or("", |m| m.as_str()).trim();
    let mut out = Map::new();
    if inner.is_empty() {
        return Value::Object(out);
    }

    for part in split_top_level(inner) {
        let Some((key, val)) = part.split_once(':') else {
            continue;
        };
        out.insert(key.trim().to_string(), parse_scalar(val.trim()));
    }
    Value::Object(out)
}

/// Split on commas at bracket depth zero. Fragments are trimmed; empty
/// fragments are dropped.
fn split_top_level(inner: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0;

    for (i, c) in inner.char_indices() {
        match c {
            '(' | '{' | '[' => depth += 1,
            ')' | '}' | ']' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(inner[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(inner[start..].trim());
    parts.retain(|p| !p.is_empty());
    parts
}

fn parse_scalar(val: &str) -> Value {
    match val {
        "None" | "null" => return Value::Null,
        "True" | "true" => return Value::Bool(true),
        "False" | "false" => return Value::Bool(false),
        _ => {}
    }

    if val.len() >= 2 && val.starts_with('"') && val.ends_with('"') {
        return Value::String(val[1..val.len() - 1].to_string());
    }
    if let Ok(i) = val.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Ok(u) = val.parse::<u64>() {
        return Value::Number(u.into());
    }
    if is_integer_literal(val) {
        // Beyond 64 bits: keep the exact digits.
        return Value::String(val.to_string());
    }
    if let Some(n) = val.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(n);
    }
    if val.contains('{') {
        return parse_repr(val);
    }
    Value::String(val.to_string())
}

fn is_integer_literal(val: &str) -> bool {
    let digits = val.strip_prefix('-').unwrap_or(val);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_fields() {
        let v = parse_repr(r#"Name { a: 1, b: True, c: "x", d: None }"#);
        assert_eq!(v, json!({"a": 1, "b": true, "c": "x", "d": null}));
    }

    #[test]
    fn nested_commas_stay_together() {
        let v = parse_repr("Outer { x: Inner { p: 1, q: 2 }, y: 3 }");
        assert_eq!(v, json!({"x": {"p": 1, "q": 2}, "y": 3}));
        assert_eq!(v.as_object().map(|m| m.len()), Some(2));
    }

    #[test]
    fn non_matching_text_is_returned_unchanged() {
        assert_eq!(parse_repr("hello"), json!("hello"));
        assert_eq!(parse_repr("{a: 1}"), json!("{a: 1}"));
    }

    #[test]
    fn large_integers_stay_exact() {
        let v = parse_repr("T { n: 99999999999999999999, m: 9223372036854775808, k: -99999999999999999999 }");
        assert_eq!(v["m"], json!(9223372036854775808u64));
        assert_eq!(v["n"], json!("99999999999999999999"));
        assert_eq!(v["k"], json!("-99999999999999999999"));
    }

    #[test]
    fn empty_body_is_empty_map() {
        assert_eq!(parse_repr("Obj {}"), json!({}));
        assert_eq!(parse_repr("Obj {   }"), json!({}));
    }

    #[test]
    fn lowercase_literals_and_floats() {
        let v = parse_repr("T { ok: true, bad: false, none: null, px: 580.5, neg: -3 }");
        assert_eq!(v, json!({"ok": true, "bad": false, "none": null, "px": 580.5, "neg": -3}));
    }

    #[test]
    fn enum_tokens_are_kept_verbatim() {
        let v = parse_repr("Order { buy_sell: BSAction.Buy, price_type: PriceType.Limit }");
        assert_eq!(v, json!({"buy_sell": "BSAction.Buy", "price_type": "PriceType.Limit"}));
    }

    #[test]
    fn fields_without_colon_are_dropped() {
        let v = parse_repr("T { a: 1, garbage, b: 2 }");
        assert_eq!(v, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn value_keeps_text_after_first_colon() {
        let v = parse_repr(r#"T { time: "09:30:00", raw: 12:00 }"#);
        assert_eq!(v, json!({"time": "09:30:00", "raw": "12:00"}));
    }

    #[test]
    fn brackets_and_parens_guard_commas() {
        let v = parse_repr("T { items: [1, 2, 3], pair: (a, b), n: 1 }");
        assert_eq!(v, json!({"items": "[1, 2, 3]", "pair": "(a, b)", "n": 1}));
    }

    #[test]
    fn multiline_body() {
        let v = parse_repr("Account {\n    name: \"A\",\n    branch_no: \"6460\",\n}");
        assert_eq!(v, json!({"name": "A", "branch_no": "6460"}));
    }

    #[test]
    fn unparseable_nested_value_stays_text() {
        let v = parse_repr("T { x: [Inner { a: 1 }] }");
        assert_eq!(v, json!({"x": "[Inner { a: 1 }]"}));
    }

    #[test]
    fn key_order_follows_text() {
        let v = parse_repr("T { z: 1, a: 2, m: 3 }");
        let keys: Vec<&String> = v.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }
}
