//! Claim records
//!
//! One record pairs the ground truth a synthetic claim was generated from
//! with the fields an extractor pulled out of the claim text.

use crate::error::{Error, Result};
use crate::value::FieldValue;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Field name to value mapping for one side of a record
pub type FieldMap = HashMap<String, FieldValue>;

static ABSENT: FieldValue = FieldValue::Absent;

/// A validated claim record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    pub ground_truth: FieldMap,
    #[serde(rename = "extracted_data")]
    pub extracted: FieldMap,
    /// Seconds spent by the extractor on this record
    #[serde(default)]
    pub processing_time: f64,
}

impl Record {
    pub fn new(id: u64, ground_truth: FieldMap, extracted: FieldMap, processing_time: f64) -> Self {
        Self {
            id,
            ground_truth,
            extracted,
            processing_time,
        }
    }

    /// Ground-truth value for `key`, [`FieldValue::Absent`] when missing
    pub fn ground_truth(&self, key: &str) -> &FieldValue {
        self.ground_truth.get(key).unwrap_or(&ABSENT)
    }

    /// Extracted value for `key`, [`FieldValue::Absent`] when missing
    pub fn extracted(&self, key: &str) -> &FieldValue {
        self.extracted.get(key).unwrap_or(&ABSENT)
    }

    /// Parse one JSON Lines entry. `line` is only used for diagnostics.
    pub fn from_json_line(line: usize, text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| Error::malformed(line, None, format!("invalid JSON: {}", e)))?;
        Self::from_value(line, value)
    }

    /// Build a record from an already-parsed JSON value.
    ///
    /// Missing or non-mapping `ground_truth`/`extracted_data` make the record
    /// malformed; individual missing fields inside them are fine.
    pub fn from_value(line: usize, value: Value) -> Result<Self> {
        let Value::Object(mut object) = value else {
            return Err(Error::malformed(line, None, "record is not a JSON object"));
        };

        let id = match object.get("id") {
            Some(Value::Number(n)) => n.as_u64(),
            _ => None,
        };
        let Some(id) = id else {
            return Err(Error::malformed(line, None, "missing or non-integer id"));
        };

        let ground_truth = take_mapping(&mut object, "ground_truth")
            .map_err(|reason| Error::malformed(line, Some(id), reason))?;
        let extracted = take_mapping(&mut object, "extracted_data")
            .map_err(|reason| Error::malformed(line, Some(id), reason))?;

        let processing_time = match object.get("processing_time") {
            None | Some(Value::Null) => 0.0,
            Some(v) => v.as_f64().ok_or_else(|| {
                Error::malformed(line, Some(id), "processing_time is not a number")
            })?,
        };
        if !processing_time.is_finite() || processing_time < 0.0 {
            return Err(Error::malformed(
                line,
                Some(id),
                format!("invalid processing_time {}", processing_time),
            ));
        }

        Ok(Self::new(id, ground_truth, extracted, processing_time))
    }
}

fn take_mapping(
    object: &mut serde_json::Map<String, Value>,
    key: &str,
) -> std::result::Result<FieldMap, String> {
    match object.remove(key) {
        Some(Value::Object(map)) => Ok(map
            .into_iter()
            .map(|(k, v)| (k, FieldValue::from(v)))
            .collect()),
        None | Some(Value::Null) => Err(format!("missing {} mapping", key)),
        Some(_) => Err(format!("{} is not a mapping", key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Result<Record> {
        Record::from_value(1, value)
    }

    #[test]
    fn test_parse_complete_record() {
        let record = parse(json!({
            "id": 7,
            "ground_truth": {"fecha": "2024-03-01", "vehiculo_tercero": null},
            "extracted_data": {"fecha": "2024-03-01"},
            "processing_time": 1.5
        }))
        .unwrap();

        assert_eq!(record.id, 7);
        assert_eq!(record.processing_time, 1.5);
        assert_eq!(record.ground_truth("fecha"), &FieldValue::scalar("2024-03-01"));
        assert_eq!(record.ground_truth("vehiculo_tercero"), &FieldValue::Absent);
        assert_eq!(record.extracted("ubicacion"), &FieldValue::Absent);
    }

    #[test]
    fn test_missing_processing_time_defaults_to_zero() {
        let record = parse(json!({
            "id": 1,
            "ground_truth": {},
            "extracted_data": {}
        }))
        .unwrap();
        assert_eq!(record.processing_time, 0.0);
    }

    #[test]
    fn test_missing_extracted_data_is_malformed() {
        let err = parse(json!({"id": 3, "ground_truth": {}})).unwrap_err();
        match err {
            Error::MalformedRecord { line, id, reason } => {
                assert_eq!(line, 1);
                assert_eq!(id, Some(3));
                assert!(reason.contains("extracted_data"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_null_ground_truth_is_malformed() {
        let err = parse(json!({"id": 3, "ground_truth": null, "extracted_data": {}})).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { .. }));
    }

    #[test]
    fn test_non_mapping_side_is_malformed() {
        let err = parse(json!({"id": 3, "ground_truth": "x", "extracted_data": {}})).unwrap_err();
        assert!(err.to_string().contains("not a mapping"));
    }

    #[test]
    fn test_missing_id_is_malformed() {
        let err = parse(json!({"ground_truth": {}, "extracted_data": {}})).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { id: None, .. }));
    }

    #[test]
    fn test_negative_processing_time_is_malformed() {
        let err = parse(json!({
            "id": 1,
            "ground_truth": {},
            "extracted_data": {},
            "processing_time": -0.5
        }))
        .unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { .. }));
    }

    #[test]
    fn test_invalid_json_line() {
        let err = Record::from_json_line(12, "{not json").unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { line: 12, id: None, .. }));
    }

    #[test]
    fn test_serialize_uses_extracted_data_key() {
        let record = Record::new(1, FieldMap::new(), FieldMap::new(), 0.0);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"extracted_data\""));
    }
}
