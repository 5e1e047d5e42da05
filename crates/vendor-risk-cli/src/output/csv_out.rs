use serde_json::Value;
use std::io;

use super::{to_rows, Rows};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let written = match to_rows(value) {
        Rows::Fields(fields) => wtr.write_record(["field", "value"]).and_then(|_| {
            fields
                .iter()
                .try_for_each(|(key, val)| wtr.write_record([key.clone(), format_csv_value(val)]))
        }),
        Rows::Records { headers, rows } => wtr.write_record(&headers).and_then(|_| {
            rows.iter()
                .try_for_each(|row| wtr.write_record(row.iter().map(format_csv_value)))
        }),
    };

    if let Err(e) = written.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        eprintln!("Error writing CSV: {}", e);
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}
