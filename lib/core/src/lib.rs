//! # claimcheck core
//!
//! Core types shared by the claimcheck crates:
//!
//! - [`FieldValue`] - absent, scalar or composite field value
//! - [`Record`] - one claim with its ground truth and extracted fields
//! - [`Error`] - the error taxonomy, including malformed records
//!
//! ## Example
//!
//! ```rust
//! use claimcheck_core::{FieldValue, Record};
//!
//! let line = r#"{"id": 1, "ground_truth": {"fecha": "2024-05-02"},
//!               "extracted_data": {"fecha": "2024-05-02"}, "processing_time": 2.1}"#;
//! let record = Record::from_json_line(1, line).unwrap();
//! assert_eq!(record.extracted("fecha"), &FieldValue::scalar("2024-05-02"));
//! assert_eq!(record.extracted("vehiculo_tercero"), &FieldValue::Absent);
//! ```

pub mod error;
pub mod record;
pub mod value;

pub use error::{Error, Result};
pub use record::{FieldMap, Record};
pub use value::FieldValue;
