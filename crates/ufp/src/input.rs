//! Record input: files or stdin, flattened into individually named records.
//!
//! A document may be a single record, an array of records, or a
//! bootstrap-style object whose values are record lists (`cameras`,
//! `sensors`, ...) or single records (`nvr`).

use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use ufp_core::convert::has_model_key;

use crate::error::CliError;

/// One raw record plus a human-readable location (`file[3]`, `file:cameras[0]`).
#[derive(Debug)]
pub struct SourcedRecord {
    pub source: String,
    pub value: Value,
}

/// Read every input document and flatten it into records, in input order.
pub fn read_inputs(files: &[PathBuf]) -> Result<Vec<SourcedRecord>, CliError> {
    let mut records = Vec::new();
    if files.is_empty() {
        let doc = read_document(Path::new("-"))?;
        flatten_document("stdin", doc, &mut records);
        return Ok(records);
    }

    for path in files {
        let doc = read_document(path)?;
        let label = if path.as_os_str() == "-" {
            "stdin".to_owned()
        } else {
            path.display().to_string()
        };
        flatten_document(&label, doc, &mut records);
    }
    debug!(count = records.len(), "read input records");
    Ok(records)
}

fn read_document(path: &Path) -> Result<Value, CliError> {
    let label = path.display().to_string();
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| CliError::Read {
                path: "stdin".into(),
                source,
            })?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: label.clone(),
            source,
        })?
    };

    serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: label,
        source,
    })
}

/// Split a parsed document into records.
///
/// An object without a model key is walked one level deep for record lists;
/// if nothing record-shaped turns up, the object itself is passed through so
/// the dispatcher reports why it is not a record.
pub fn flatten_document(label: &str, doc: Value, out: &mut Vec<SourcedRecord>) {
    match doc {
        Value::Array(items) => {
            for (i, value) in items.into_iter().enumerate() {
                out.push(SourcedRecord {
                    source: format!("{label}[{i}]"),
                    value,
                });
            }
        }
        Value::Object(map) if !has_model_key(&map) => {
            let before = out.len();
            for (key, value) in &map {
                match value {
                    Value::Array(items) if items.iter().any(is_record) => {
                        for (i, item) in items.iter().enumerate() {
                            out.push(SourcedRecord {
                                source: format!("{label}:{key}[{i}]"),
                                value: item.clone(),
                            });
                        }
                    }
                    Value::Object(_) if is_record(value) => out.push(SourcedRecord {
                        source: format!("{label}:{key}"),
                        value: value.clone(),
                    }),
                    _ => {}
                }
            }
            if out.len() == before {
                out.push(SourcedRecord {
                    source: label.to_owned(),
                    value: Value::Object(map),
                });
            }
        }
        value => out.push(SourcedRecord {
            source: label.to_owned(),
            value,
        }),
    }
}

fn is_record(value: &Value) -> bool {
    value.as_object().is_some_and(has_model_key)
}
