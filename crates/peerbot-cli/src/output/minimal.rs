use serde_json::Value;

/// Headline fields, in priority order.
const PRIORITY_KEYS: [&str; 8] = [
    "precision_at_k",
    "top_similarity",
    "excluded",
    "outcome",
    "rcept_no",
    "revenue",
    "count",
    "corp_name",
];

/// Print just the key answer value from the output.
///
/// Looks for well-known fields in the result object, then in its `metrics`
/// block, then falls back to the first field.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        let metrics = map.get("metrics").and_then(Value::as_object);
        for key in &PRIORITY_KEYS {
            let found = map
                .get(*key)
                .or_else(|| metrics.and_then(|m| m.get(*key)));
            if let Some(val) = found {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
