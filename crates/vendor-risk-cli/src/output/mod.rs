pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Shape of a command result for the row-oriented formats.
pub enum Rows {
    /// One `field, value` pair per line, from an object or envelope `result`.
    Fields(Vec<(String, Value)>),
    /// A list of records sharing the first record's keys (`vrg tiers`).
    Records {
        headers: Vec<String>,
        rows: Vec<Vec<Value>>,
    },
}

pub fn to_rows(value: &Value) -> Rows {
    match value {
        Value::Array(items) => {
            let headers: Vec<String> = match items.first() {
                Some(Value::Object(first)) => first.keys().cloned().collect(),
                _ => Vec::new(),
            };
            let rows = items
                .iter()
                .filter_map(Value::as_object)
                .map(|record| {
                    headers
                        .iter()
                        .map(|h| record.get(h).cloned().unwrap_or(Value::Null))
                        .collect()
                })
                .collect();
            Rows::Records { headers, rows }
        }
        Value::Object(map) => {
            let fields = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            Rows::Fields(flatten_fields(fields))
        }
        other => Rows::Fields(vec![("value".to_string(), other.clone())]),
    }
}

/// Flatten nested objects into dotted keys (`letter_grades.overall`) so
/// row-based formats show each grade on its own line. Arrays stay intact.
pub fn flatten_fields(map: &Map<String, Value>) -> Vec<(String, Value)> {
    let mut rows = Vec::new();
    flatten_into("", map, &mut rows);
    rows
}

fn flatten_into(prefix: &str, map: &Map<String, Value>, rows: &mut Vec<(String, Value)>) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match val {
            Value::Object(inner) if !inner.is_empty() => flatten_into(&name, inner, rows),
            _ => rows.push((name, val.clone())),
        }
    }
}
