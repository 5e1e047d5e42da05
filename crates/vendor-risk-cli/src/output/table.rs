use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{to_rows, Rows};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    let mut builder = Builder::default();
    match to_rows(value) {
        Rows::Fields(fields) => {
            builder.push_record(["Field", "Value"]);
            for (key, val) in fields {
                builder.push_record([key, format_value(&val)]);
            }
        }
        Rows::Records { headers, rows } => {
            if rows.is_empty() {
                println!("(empty)");
                return;
            }
            builder.push_record(headers);
            for row in rows {
                builder.push_record(row.iter().map(format_value));
            }
        }
    }
    println!("{}", Table::from(builder));

    if let Value::Object(envelope) = value {
        print_envelope_notes(envelope);
    }
}

fn print_envelope_notes(envelope: &serde_json::Map<String, Value>) {
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
    if let Some(Value::String(computed_at)) = envelope
        .get("metadata")
        .and_then(|m| m.get("computed_at"))
    {
        println!("Computed at: {}", computed_at);
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}
