//! Newline-delimited JSON output
//!
//! Records are separated by `\n` with no trailing newline after the last one.

use crate::domain::Result;
use serde::Serialize;
use std::io::Write;

/// Writes `records` as NDJSON, returning the number of records written
pub fn write_ndjson<W: Write, T: Serialize>(writer: &mut W, records: &[T]) -> Result<usize> {
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            writer.write_all(b"\n")?;
        }
        serde_json::to_writer(&mut *writer, record)?;
    }
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn render(records: &[Value]) -> String {
        let mut out = Vec::new();
        write_ndjson(&mut out, records).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_three_records_two_separators() {
        let out = render(&[json!({"a": 1}), json!({"a": 2}), json!({"a": 3})]);
        assert_eq!(out.matches('\n').count(), 2);
        assert!(!out.ends_with('\n'));
        assert_eq!(out, "{\"a\":1}\n{\"a\":2}\n{\"a\":3}");
    }

    #[test]
    fn test_single_and_empty() {
        assert_eq!(render(&[json!({"a": 1})]), "{\"a\":1}");
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn test_each_line_parses_back() {
        let records = vec![
            json!({"blast_id": 1, "stats": {"total": {"open_total": 4}}}),
            json!({"blast_id": 2, "name": "line\nbreak"}),
        ];
        let out = render(&records);
        let parsed: Vec<Value> = out
            .split('\n')
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(parsed, records);
    }
}
