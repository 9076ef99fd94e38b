//! Annotation records and their JSON-lines source.
//!
//! A record carries at least `entity` and `confidence`. Any other
//! field is kept as-is and written back out when the record is
//! published. The encoded form always starts with `entity` and
//! `confidence`, followed by the remaining fields in key order.

use std::collections::BTreeMap;
use std::io::BufRead;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::{Result, VidsplitError};

/// One annotation produced by the upstream labelling service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub entity: String,
    pub confidence: f64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl AnnotationRecord {
    pub fn new(entity: impl Into<String>, confidence: f64) -> Self {
        Self {
            entity: entity.into(),
            confidence,
            extra: BTreeMap::new(),
        }
    }

    /// Attach a pass-through field
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Build a record from an arbitrary JSON value.
    ///
    /// # Errors
    ///
    /// `InvalidRecord` if `entity` or `confidence` is missing or
    /// has the wrong type.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| VidsplitError::InvalidRecord(e.to_string()))
    }

    /// Parse one JSON object
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| VidsplitError::InvalidRecord(e.to_string()))
    }

    /// Encode as a single-line JSON message
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Iterator over the records of a JSON-lines stream.
///
/// Blank lines are skipped. Malformed lines yield an
/// `InvalidRecord` error naming the line number; iteration
/// continues with the next line.
pub struct JsonLinesRecords<R> {
    lines: std::io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> JsonLinesRecords<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl<R: BufRead> Iterator for JsonLinesRecords<R> {
    type Item = Result<AnnotationRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_no += 1;

            let line = match line {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            if line.trim().is_empty() {
                continue;
            }

            let line_no = self.line_no;
            return Some(AnnotationRecord::from_json(&line).map_err(|e| match e {
                VidsplitError::InvalidRecord(message) => {
                    VidsplitError::InvalidRecord(format!("line {line_no}: {message}"))
                }
                other => other,
            }));
        }
    }
}
