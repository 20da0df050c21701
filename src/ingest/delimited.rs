//! Row-oriented text tables (the portal's datasets.csv family).

use crate::domain::model::{DatasetRecord, Record, DATASET_COLUMNS};
use std::collections::HashMap;

/// Quote state while scanning a line. The quote character toggles between
/// the two; delimiters only split fields in `Bare`.
enum FieldState {
    Bare,
    Quoted,
}

/// Parses a delimited text table into records with the given column names.
///
/// The first line is assumed to be a header and is skipped without being
/// validated. Rows that yield fewer values than `columns` are skipped; extra
/// trailing values are ignored. Unterminated quotes are tolerated and simply
/// consume the rest of the line.
pub fn parse_delimited(text: &str, delimiter: char, columns: &[&str]) -> Vec<Record> {
    let lines: Vec<&str> = text.trim().lines().collect();
    if lines.len() < 2 {
        return Vec::new();
    }

    let mut records = Vec::new();
    for line in &lines[1..] {
        let values = split_fields(line, delimiter);
        if values.len() < columns.len() {
            continue;
        }

        let mut data = HashMap::new();
        for (name, value) in columns.iter().zip(values) {
            data.insert((*name).to_string(), serde_json::Value::String(value));
        }
        records.push(Record { data });
    }

    records
}

/// Typed view over the community-datasets table.
pub fn parse_datasets(text: &str) -> Vec<DatasetRecord> {
    parse_delimited(text, ',', &DATASET_COLUMNS)
        .iter()
        .filter_map(DatasetRecord::from_record)
        .collect()
}

fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut state = FieldState::Bare;

    for ch in line.chars() {
        if ch == '"' {
            state = match state {
                FieldState::Bare => FieldState::Quoted,
                FieldState::Quoted => FieldState::Bare,
            };
        } else if ch == delimiter && matches!(state, FieldState::Bare) {
            values.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(ch);
        }
    }
    values.push(current.trim().to_string());

    values
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: [&str; 3] = ["a", "b", "c"];

    #[test]
    fn test_quoted_field_keeps_delimiter() {
        let text = "a,b,c\nfirst,\"middle, with comma\",last";
        let records = parse_delimited(text, ',', &COLUMNS);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].field("a"), "first");
        assert_eq!(records[0].field("b"), "middle, with comma");
        assert_eq!(records[0].field("c"), "last");
    }

    #[test]
    fn test_order_preserved() {
        let text = "a,b,c\n1,x,y\n2,x,y\n3,x,y";
        let records = parse_delimited(text, ',', &COLUMNS);
        let ids: Vec<&str> = records.iter().map(|r| r.field("a")).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_parse_is_pure() {
        let text = "a,b,c\n1,\"two, three\",4\nalpha,beta,gamma";
        let first = parse_delimited(text, ',', &COLUMNS);
        let second = parse_delimited(text, ',', &COLUMNS);
        assert_eq!(first, second);
    }

    #[test]
    fn test_short_rows_skipped() {
        let text = "a,b,c\nonly,two\n1,2,3";
        let records = parse_delimited(text, ',', &COLUMNS);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].field("a"), "1");
    }

    #[test]
    fn test_extra_values_ignored() {
        let text = "a,b,c\n1,2,3,4,5";
        let records = parse_delimited(text, ',', &COLUMNS);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].field("c"), "3");
        assert!(records[0].get_str("d").is_none());
    }

    #[test]
    fn test_unterminated_quote_consumes_line() {
        let text = "a,b,c\n1,\"no closing quote, here,2,3";
        let records = parse_delimited(text, ',', &COLUMNS);
        // The open quote swallows every later delimiter, leaving two fields.
        assert!(records.is_empty());
    }

    #[test]
    fn test_fields_trimmed() {
        let text = "a,b,c\n  1 , spaced out ,3\r";
        let records = parse_delimited(text, ',', &COLUMNS);
        assert_eq!(records[0].field("a"), "1");
        assert_eq!(records[0].field("b"), "spaced out");
        assert_eq!(records[0].field("c"), "3");
    }

    #[test]
    fn test_header_only_is_empty() {
        assert!(parse_delimited("a,b,c", ',', &COLUMNS).is_empty());
        assert!(parse_delimited("", ',', &COLUMNS).is_empty());
    }

    #[test]
    fn test_parse_datasets_typed() {
        let text = "submitter_name,dataset_type,description,email,file_address\n\
                    Asha Rao,DR,\"Fundus scans, graded twice\",asha@example.org,datasets/dr.parquet";
        let datasets = parse_datasets(text);
        assert_eq!(datasets.len(), 1);
        assert_eq!(datasets[0].submitter_name, "Asha Rao");
        assert_eq!(datasets[0].description, "Fundus scans, graded twice");
        assert_eq!(datasets[0].file_name(), "dr.parquet");
    }

    #[test]
    fn test_alternate_delimiter() {
        let text = "a;b;c\n1;2;3";
        let records = parse_delimited(text, ';', &COLUMNS);
        assert_eq!(records[0].field("b"), "2");
    }
}
