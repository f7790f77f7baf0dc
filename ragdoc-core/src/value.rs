use std::collections::HashMap;

pub type Value = serde_json::Value;

/// Document metadata. Values should stay flat scalars (string, number, bool) so vector
/// stores can index them.
pub type Metadata = HashMap<String, Value>;

/// Renders a metadata value the way it should appear inside prompt text.
///
/// Strings are emitted without quotes; everything else uses its compact JSON form.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Canonical JSON encoding of metadata with keys in sorted order.
pub(crate) fn canonical_metadata(metadata: &Metadata) -> String {
    let mut entries: Vec<(&String, &Value)> = metadata.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut out = String::from("{");
    for (idx, (key, value)) in entries.into_iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        out.push_str(&Value::String(key.clone()).to_string());
        out.push(':');
        out.push_str(&value.to_string());
    }
    out.push('}');
    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn render_value_strips_string_quotes() {
        assert_eq!(render_value(&json!("plain")), "plain");
        assert_eq!(render_value(&json!(42)), "42");
        assert_eq!(render_value(&json!(1.5)), "1.5");
        assert_eq!(render_value(&json!(true)), "true");
        assert_eq!(render_value(&json!(["a", 1])), "[\"a\",1]");
    }

    #[test]
    fn canonical_metadata_is_insertion_order_independent() {
        let mut first = Metadata::new();
        first.insert("b".to_string(), json!(2));
        first.insert("a".to_string(), json!("x"));

        let mut second = Metadata::new();
        second.insert("a".to_string(), json!("x"));
        second.insert("b".to_string(), json!(2));

        assert_eq!(canonical_metadata(&first), canonical_metadata(&second));
        assert_eq!(canonical_metadata(&first), "{\"a\":\"x\",\"b\":2}");
    }
}
