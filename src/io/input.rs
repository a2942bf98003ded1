//! File record input
//!
//! Accepts either a flat JSON array of records or scc's `--by-file` output,
//! which groups files under one object per language.

use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::core::{Error, FileRecord, Result, ResultExt};

#[derive(Debug, Deserialize)]
struct SccLanguage {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Files", default)]
    files: Vec<Value>,
}

fn is_scc_language(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|object| object.contains_key("Name") && object.contains_key("Files"))
}

fn decode_record(index: usize, value: Value) -> Result<FileRecord> {
    FileRecord::deserialize(value).map_err(|source| Error::InvalidRecord { index, source })
}

fn decode_flat(items: Vec<Value>) -> Result<Vec<FileRecord>> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, value)| decode_record(index, value))
        .collect()
}

fn decode_scc(languages: Vec<Value>) -> Result<Vec<FileRecord>> {
    let mut records = Vec::new();
    for (position, value) in languages.into_iter().enumerate() {
        let language = SccLanguage::deserialize(value).map_err(|e| {
            Error::InputShape(format!("scc language entry #{position}: {e}"))
        })?;
        for value in language.files {
            let mut record = decode_record(records.len(), value)?;
            if record.language.trim().is_empty() {
                record.language = language.name.clone();
            }
            // scc reports paths relative to its argument, usually `./`
            if let Some(stripped) = record.path.strip_prefix("./") {
                record.path = stripped.to_string();
            }
            records.push(record);
        }
    }
    Ok(records)
}

/// Decode a parsed document after deciding its shape.
///
/// The shape is chosen from the JSON structure alone, so a bad field in one
/// record reports that record instead of a failed match against every shape.
fn records_from_document(document: Value) -> Result<Vec<FileRecord>> {
    match document {
        Value::Array(items) if items.first().is_some_and(is_scc_language) => decode_scc(items),
        Value::Array(items) => decode_flat(items),
        Value::Object(mut object) => match object.remove("files") {
            Some(Value::Array(items)) => decode_flat(items),
            Some(_) => Err(Error::InputShape("`files` must be an array".to_string())),
            None => Err(Error::InputShape(
                "expected an array of records, an scc by-file array or an object with `files`"
                    .to_string(),
            )),
        },
        _ => Err(Error::InputShape(
            "expected a JSON array or object at the top level".to_string(),
        )),
    }
}

/// Parse records from a JSON string.
pub fn parse_records(json: &str) -> Result<Vec<FileRecord>> {
    let document: Value = serde_json::from_str(json)?;
    records_from_document(document)
}

/// Parse records from any reader.
pub fn read_records_from(reader: impl Read) -> Result<Vec<FileRecord>> {
    let document: Value = serde_json::from_reader(BufReader::new(reader))?;
    let records = records_from_document(document)?;
    tracing::debug!(records = records.len(), "Read file records");
    Ok(records)
}

/// Read records from a JSON file.
pub fn read_records(path: &Path) -> Result<Vec<FileRecord>> {
    let file = File::open(path)
        .map_err(Error::from)
        .context(format!("Failed to open {}", path.display()))?;
    read_records_from(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_flat_array() {
        let records = parse_records(indoc! {r#"
            [
              {"path": "src/a.py", "language": "Python", "lines_code": 100},
              {"path": "src/b.py", "language": "Python", "lines_code": 50, "complexity": 3}
            ]
        "#})
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].complexity, 3);
        assert_eq!(records[0].lines_total, 0);
    }

    #[test]
    fn test_scc_by_file_document() {
        let records = parse_records(indoc! {r#"
            [
              {"Name": "Go", "Code": 30, "Files": [
                {"Location": "./cmd/main.go", "Language": "Go", "Lines": 40, "Code": 30,
                 "Comment": 5, "Blank": 5, "Complexity": 4, "Bytes": 900}
              ]},
              {"Name": "YAML", "Files": [
                {"Location": "deploy/app.yaml", "Lines": 10, "Code": 10}
              ]}
            ]
        "#})
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].path, "cmd/main.go");
        assert_eq!(records[0].lines_blank, 5);
        assert_eq!(records[0].bytes, 900);
        assert_eq!(records[1].language, "YAML");
    }

    #[test]
    fn test_wrapped_document() {
        let records = parse_records(r#"{"files": [{"path": "a.rs"}]}"#).unwrap();
        assert_eq!(records, vec![FileRecord::new("a.rs", "")]);
    }

    #[test]
    fn test_malformed_input_is_parse_error() {
        let err = parse_records(r#"{"nope": true}"#).unwrap_err();
        assert_eq!(err.code(), crate::core::ErrorCode::PARSE_INPUT);
    }

    #[test]
    fn test_bad_field_names_the_record() {
        let err = parse_records(indoc! {r#"
            [
              {"path": "a.py", "lines_code": 1},
              {"path": "b.py", "lines_code": 2},
              {"path": "c.py", "lines_code": -5}
            ]
        "#})
        .unwrap_err();

        assert!(matches!(err, Error::InvalidRecord { index: 2, .. }));
        let text = err.to_string();
        assert!(text.contains("record #2"), "{text}");
        assert!(text.contains("invalid value"), "{text}");
        assert!(!text.contains("untagged"), "{text}");
        assert_eq!(err.code(), crate::core::ErrorCode::PARSE_INPUT);
    }

    #[test]
    fn test_bad_field_in_scc_document_names_the_record() {
        let err = parse_records(indoc! {r#"
            [
              {"Name": "Go", "Files": [{"Location": "a.go", "Code": 3}]},
              {"Name": "Rust", "Files": [{"Location": "b.rs", "Code": "many"}]}
            ]
        "#})
        .unwrap_err();

        assert!(matches!(err, Error::InvalidRecord { index: 1, .. }));
    }

    #[test]
    fn test_wrapped_files_must_be_array() {
        let err = parse_records(r#"{"files": {"path": "a.rs"}}"#).unwrap_err();
        assert!(matches!(err, Error::InputShape(_)));
    }

    #[test]
    fn test_syntax_error_keeps_position() {
        let err = parse_records("[{\"path\": \"a.rs\",}]").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = read_records(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to open"));
    }
}
