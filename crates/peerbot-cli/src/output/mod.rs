pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Result fields holding the row-shaped part of an output, in lookup order.
const ROW_KEYS: [&str; 7] = [
    "peers",
    "results",
    "entries",
    "candidates",
    "sets",
    "peers_table",
    "golden_peers",
];

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// First non-empty array of objects under a known row key.
pub(crate) fn primary_rows(map: &Map<String, Value>) -> Option<(&str, &[Value])> {
    ROW_KEYS.iter().find_map(|key| match map.get(*key) {
        Some(Value::Array(rows)) if rows.first().is_some_and(Value::is_object) => {
            Some((*key, rows.as_slice()))
        }
        _ => None,
    })
}
