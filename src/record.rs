//! Input and output record shapes.
//!
//! An [`InputRecord`] is one object of the collection export. Only the keys
//! the memory game needs are read; everything else in the object is ignored.
//! [`OutputRecord::from_input`] projects it onto the five published fields.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ReduceError, Result};
use crate::identifier::extract_id;

/// A record's date as found in the export: either text or a JSON number.
///
/// The value is carried through unchanged, so `1999` stays a number and
/// `"1999"` stays a string in the output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DateValue {
    /// A textual date or year such as `"1871"` or `"um 1600"`.
    Text(String),
    /// A numeric year.
    Number(serde_json::Number),
}

struct DateValueVisitor;

impl Visitor<'_> for DateValueVisitor {
    type Value = DateValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("`date` as a string or a number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<DateValue, E> {
        Ok(DateValue::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<DateValue, E> {
        Ok(DateValue::Text(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<DateValue, E> {
        Ok(DateValue::Number(v.into()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<DateValue, E> {
        Ok(DateValue::Number(v.into()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<DateValue, E> {
        serde_json::Number::from_f64(v)
            .map(DateValue::Number)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Float(v), &self))
    }
}

impl<'de> Deserialize<'de> for DateValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(DateValueVisitor)
    }
}

impl From<&str> for DateValue {
    fn from(value: &str) -> Self {
        DateValue::Text(value.to_string())
    }
}

impl From<i64> for DateValue {
    fn from(value: i64) -> Self {
        DateValue::Number(value.into())
    }
}

/// One catalogued item as read from the input array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InputRecord {
    /// Reference string carrying the embedded identifier. Kept untyped so
    /// a missing or non-string value surfaces as an extraction error.
    #[serde(default)]
    pub back: Option<Value>,
    /// Display or access URI.
    pub uri: String,
    /// Human-readable title.
    pub title: String,
    /// Year or date.
    pub date: DateValue,
    /// Owning institution.
    pub owner: String,
}

impl InputRecord {
    /// Decode the record at `index` of the input array.
    ///
    /// # Errors
    ///
    /// Returns [`ReduceError::InvalidRecord`] if the value is not an object or
    /// a required field is missing or mistyped.
    pub fn from_value(value: &Value, index: usize) -> Result<Self> {
        InputRecord::deserialize(value).map_err(|e| ReduceError::InvalidRecord {
            index,
            reason: e.to_string(),
        })
    }
}

/// The five-field projection written for the memory game.
///
/// Fields are declared in lexicographic order; serialization emits them in
/// declaration order, so every object is written with sorted keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// Embedded identifier taken from `back`.
    pub id: String,
    /// Owning institution.
    pub owner: String,
    /// Human-readable title.
    pub title: String,
    /// Display or access URI.
    pub uri: String,
    /// The input `date`, unchanged.
    pub year: DateValue,
}

impl OutputRecord {
    /// Project an input record, deriving `id` from its `back` reference.
    ///
    /// # Errors
    ///
    /// Returns [`ReduceError::Extraction`] if `back` is missing, not a string,
    /// or does not contain an embedded identifier.
    pub fn from_input(record: &InputRecord) -> Result<Self> {
        let back = match &record.back {
            Some(Value::String(s)) => s.as_str(),
            Some(other) => {
                return Err(ReduceError::Extraction {
                    index: None,
                    reason: format!("`back` is not a string: {other}"),
                })
            },
            None => {
                return Err(ReduceError::Extraction {
                    index: None,
                    reason: "missing `back` field".to_string(),
                })
            },
        };

        Ok(OutputRecord {
            id: extract_id(back)?,
            owner: record.owner.clone(),
            title: record.title.clone(),
            uri: record.uri.clone(),
            year: record.date.clone(),
        })
    }
}

/// Decode and project the record at `index` of the input array.
///
/// # Errors
///
/// Returns [`ReduceError::InvalidRecord`] for a malformed object and
/// [`ReduceError::Extraction`] (carrying `index`) when no identifier can be
/// derived.
pub fn reduce_value(value: &Value, index: usize) -> Result<OutputRecord> {
    let record = InputRecord::from_value(value, index)?;
    OutputRecord::from_input(&record).map_err(|e| e.at(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "back": "x/record_42_media/y",
            "front": "x/record_42_media/front.jpg",
            "uri": "u1",
            "title": "T",
            "date": "1999",
            "owner": "O"
        })
    }

    #[test]
    fn test_projection_copies_fields() {
        let out = reduce_value(&sample(), 0).unwrap();
        assert_eq!(
            out,
            OutputRecord {
                id: "42".to_string(),
                owner: "O".to_string(),
                title: "T".to_string(),
                uri: "u1".to_string(),
                year: DateValue::from("1999"),
            }
        );
    }

    #[test]
    fn test_numeric_date_stays_number() {
        let mut value = sample();
        value["date"] = json!(1999);
        let out = reduce_value(&value, 0).unwrap();
        assert_eq!(out.year, DateValue::from(1999));
        assert_eq!(serde_json::to_value(&out).unwrap()["year"], json!(1999));
    }

    #[test]
    fn test_serialized_keys_sorted() {
        let out = reduce_value(&sample(), 0).unwrap();
        let text = serde_json::to_string(&out).unwrap();
        assert_eq!(
            text,
            r#"{"id":"42","owner":"O","title":"T","uri":"u1","year":"1999"}"#
        );
    }

    #[test]
    fn test_missing_back_is_extraction_error() {
        let mut value = sample();
        value.as_object_mut().unwrap().remove("back");
        let err = reduce_value(&value, 4).unwrap_err();
        assert!(matches!(err, ReduceError::Extraction { index: Some(4), .. }));
    }

    #[test]
    fn test_non_string_back_is_extraction_error() {
        let mut value = sample();
        value["back"] = json!(17);
        let err = reduce_value(&value, 0).unwrap_err();
        assert!(matches!(err, ReduceError::Extraction { .. }));
    }

    #[test]
    fn test_unmatched_back_is_extraction_error() {
        let mut value = sample();
        value["back"] = json!("no-match-here");
        let err = reduce_value(&value, 2).unwrap_err();
        assert!(matches!(err, ReduceError::Extraction { index: Some(2), .. }));
    }

    #[test]
    fn test_missing_title_is_invalid_record() {
        let mut value = sample();
        value.as_object_mut().unwrap().remove("title");
        let err = reduce_value(&value, 5).unwrap_err();
        match err {
            ReduceError::InvalidRecord { index, reason } => {
                assert_eq!(index, 5);
                assert!(reason.contains("title"));
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_null_date_names_field_and_types() {
        let mut value = sample();
        value["date"] = Value::Null;
        let err = reduce_value(&value, 0).unwrap_err();
        match err {
            ReduceError::InvalidRecord { index, reason } => {
                assert_eq!(index, 0);
                assert!(reason.contains("`date`"), "{reason}");
                assert!(reason.contains("string or a number"), "{reason}");
                assert!(reason.contains("null"), "{reason}");
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_fractional_date_stays_number() {
        let mut value = sample();
        value["date"] = json!(1623.5);
        let out = reduce_value(&value, 0).unwrap();
        assert_eq!(serde_json::to_value(&out).unwrap()["year"], json!(1623.5));
    }

    #[test]
    fn test_non_object_is_invalid_record() {
        let err = reduce_value(&json!("just a string"), 1).unwrap_err();
        assert!(matches!(err, ReduceError::InvalidRecord { index: 1, .. }));
    }
}
