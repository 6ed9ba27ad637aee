//! JSON body helpers shared by the endpoint groups

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

pub(crate) fn to_json(payload: impl Serialize) -> Result<Value> {
    serde_json::to_value(payload).map_err(|e| Error::Serialization(e.to_string()))
}

/// `{root: payload}`, the envelope create/update endpoints expect.
pub(crate) fn wrap(root: &str, payload: impl Serialize) -> Result<Value> {
    let mut map = Map::new();
    map.insert(root.to_owned(), to_json(payload)?);
    Ok(Value::Object(map))
}

/// Object from `(key, value)` pairs, skipping `None` values.
pub(crate) fn object<const N: usize>(fields: [(&str, Option<Value>); N]) -> Value {
    Value::Object(
        fields
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| (k.to_owned(), v)))
            .collect(),
    )
}

/// A flag moved from the query string into a JSON body: `true`/`false`
/// become booleans, anything else stays a string.
pub(crate) fn flag(raw: String) -> Value {
    match raw.as_str() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wrap_nests_payload_under_root() {
        let body = wrap("club", json!({"name": "Fans"})).unwrap();
        assert_eq!(body, json!({"club": {"name": "Fans"}}));
    }

    #[test]
    fn object_skips_missing_fields() {
        let body = object([
            ("broadcast", None),
            ("comment", Some(json!({"body": "hi"}))),
            ("frontend", Some(json!(true))),
        ]);
        assert_eq!(body, json!({"comment": {"body": "hi"}, "frontend": true}));
    }

    #[test]
    fn flag_parses_booleans_only() {
        assert_eq!(flag("true".into()), json!(true));
        assert_eq!(flag("false".into()), json!(false));
        assert_eq!(flag("1".into()), json!("1"));
    }
}
