//! Conversion of raw SDK values into plain JSON trees.
//!
//! | Input                        | Output                                   |
//! |------------------------------|------------------------------------------|
//! | null / bool / number / string| unchanged                                |
//! | list                         | list, order kept                         |
//! | map                          | object, key order kept                   |
//! | object with fields           | object of public fields                  |
//! | object without fields + repr | [`parse_repr`] of the repr               |
//! | opaque handle                | [`parse_repr`] if the text has `{`, else the text |
//!
//! Non-finite floats have no JSON form and become `null`.

use serde_json::{Map, Number, Value};

use crate::repr::parse_repr;
use crate::value::{SdkObject, SdkValue};

/// Convert an SDK value into a JSON value.
pub fn normalize(value: &SdkValue) -> Value {
    match value {
        SdkValue::Null => Value::Null,
        SdkValue::Bool(b) => Value::Bool(*b),
        SdkValue::Int(i) => Value::Number((*i).into()),
        SdkValue::UInt(u) => Value::Number((*u).into()),
        SdkValue::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
        SdkValue::Str(s) => Value::String(s.clone()),
        SdkValue::List(items) => Value::Array(items.iter().map(normalize).collect()),
        SdkValue::Map(map) => {
            Value::Object(map.iter().map(|(k, v)| (k.to_string(), normalize(v))).collect())
        }
        SdkValue::Object(obj) => normalize_object(obj),
        SdkValue::Opaque(handle) => from_repr_text(&handle.repr),
    }
}

fn normalize_object(obj: &SdkObject) -> Value {
    if obj.fields.is_empty() {
        if let Some(repr) = &obj.repr {
            return from_repr_text(repr);
        }
    }

    let mut out = Map::new();
    for (name, v) in obj.fields.iter() {
        if obj.is_private(name) {
            continue;
        }
        out.insert(name.to_string(), normalize(v));
    }
    Value::Object(out)
}

fn from_repr_text(text: &str) -> Value {
    if text.contains('{') { parse_repr(text) } else { Value::String(text.to_string()) }
}

/// Normalize every item of a list-bearing result's `data` member.
pub fn normalize_data(result: &SdkValue) -> Value {
    Value::Array(result.data_items().iter().map(normalize).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{FieldMap, OpaqueHandle};
    use serde_json::json;

    fn sdk(text: &str) -> SdkValue {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn scalars_are_identity() {
        assert_eq!(normalize(&SdkValue::Null), Value::Null);
        assert_eq!(normalize(&SdkValue::Bool(true)), json!(true));
        assert_eq!(normalize(&SdkValue::Int(-7)), json!(-7));
        assert_eq!(normalize(&SdkValue::Float(1.25)), json!(1.25));
        assert_eq!(normalize(&SdkValue::from("2330")), json!("2330"));
    }

    #[test]
    fn unsigned_above_i64_is_identity() {
        let v = sdk("18446744073709551615");
        assert_eq!(v, SdkValue::UInt(u64::MAX));
        assert_eq!(normalize(&v), json!(u64::MAX));
        assert_eq!(normalize(&SdkValue::from(json!(9223372036854775808u64))), json!(9223372036854775808u64));
        let nested = normalize(&sdk(r#"{"$type":"Fill","$fields":{"seq":18446744073709551615}}"#));
        assert_eq!(nested, json!({"seq": u64::MAX}));
    }

    #[test]
    fn non_finite_float_becomes_null() {
        assert_eq!(normalize(&SdkValue::Float(f64::NAN)), Value::Null);
    }

    #[test]
    fn lists_keep_length_and_order() {
        let v = normalize(&sdk(r#"[3, "b", null, [1]]"#));
        assert_eq!(v, json!([3, "b", null, [1]]));
    }

    #[test]
    fn maps_keep_key_order() {
        let v = normalize(&sdk(r#"{"z": 1, "a": {"y": 2, "b": 3}}"#));
        let keys: Vec<&String> = v.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["z", "a"]);
        let inner: Vec<&String> = v["a"].as_object().unwrap().keys().collect();
        assert_eq!(inner, ["y", "b"]);
    }

    #[test]
    fn object_private_fields_are_excluded() {
        let v = normalize(&sdk(
            r#"{"$type":"Order","$fields":{"order_no":"x1","_ptr":1,"seq":"9"},"$private":["seq"]}"#,
        ));
        assert_eq!(v, json!({"order_no": "x1", "_ptr": 1}));
    }

    #[test]
    fn nested_objects_recurse() {
        let v = normalize(&sdk(
            r#"{"$type":"Result","$fields":{"is_success":true,"data":[{"$type":"Inv","$fields":{"stock_no":"2330"}}]}}"#,
        ));
        assert_eq!(v, json!({"is_success": true, "data": [{"stock_no": "2330"}]}));
    }

    #[test]
    fn fieldless_object_falls_back_to_repr() {
        let obj = SdkObject {
            type_name: "Account".into(),
            fields: FieldMap::new(),
            private: Vec::new(),
            repr: Some(r#"Account { name: "Wang", account: "26" }"#.into()),
        };
        assert_eq!(normalize(&SdkValue::Object(obj)), json!({"name": "Wang", "account": "26"}));
    }

    #[test]
    fn opaque_handles() {
        let parsed = SdkValue::Opaque(OpaqueHandle { repr: "Acc { id: 1 }".into() });
        assert_eq!(normalize(&parsed), json!({"id": 1}));

        let plain = SdkValue::Opaque(OpaqueHandle { repr: "BSAction.Buy".into() });
        assert_eq!(normalize(&plain), json!("BSAction.Buy"));
    }

    #[test]
    fn data_list_extraction() {
        let v = sdk(r#"{"$type":"Result","$fields":{"is_success":true,"data":[{"a":1}]}}"#);
        assert_eq!(normalize_data(&v), json!([{"a": 1}]));
        assert_eq!(normalize_data(&SdkValue::Null), json!([]));
    }
}
