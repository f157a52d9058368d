use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::primary_rows;

/// Columns shown for row tables; other fields are left to `--output json`.
const ROW_COLUMNS: [&str; 12] = [
    "corp_name",
    "corp_code",
    "market",
    "similarity",
    "scale_value",
    "status",
    "reason_code",
    "last_error",
    "id",
    "target_label",
    "revenue",
    "estimated",
];

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_object(map);
            }
        }
        Value::Array(arr) => print_rows(arr),
        _ => println!("{}", value),
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    match result {
        Value::Object(res_map) => print_object(res_map),
        other => println!("{}", format_value(other)),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Scalar fields as a Field/Value table, then the row-shaped field, if any.
fn print_object(map: &Map<String, Value>) {
    let rows = primary_rows(map);
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if rows.is_some_and(|(row_key, _)| row_key == key.as_str()) {
            continue;
        }
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    println!("{}", Table::from(builder));

    if let Some((key, arr)) = rows {
        println!("\n{}:", key);
        print_rows(arr);
    }
}

fn print_rows(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            println!("{}", format_value(item));
        }
        return;
    };

    let mut headers: Vec<&str> = ROW_COLUMNS
        .iter()
        .copied()
        .filter(|c| first.contains_key(*c))
        .collect();
    if headers.is_empty() {
        headers = first.keys().map(String::as_str).collect();
    }

    let mut builder = Builder::default();
    builder.push_record(headers.iter().copied());
    for item in arr.iter().filter_map(Value::as_object) {
        builder.push_record(
            headers
                .iter()
                .map(|h| item.get(*h).map(format_value).unwrap_or_default()),
        );
    }
    println!("{}", Table::from(builder));
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
