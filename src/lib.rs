//! # claimcheck
//!
//! Validates structured data extracted from noisy free-text claim records
//! against the ground truth the claims were generated from.
//!
//! Extraction output rarely matches the ground truth byte for byte: street
//! names lose their punctuation, "Ford Fiesta" comes back as "fiesta ford",
//! and the insured vehicle gets confused with the third party's. claimcheck
//! tolerates that noise and reports per-field accuracy, role swaps and a
//! diagnostic line for every mismatch.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! claimcheck data/processed_claims.jsonl
//! claimcheck data/processed_claims.jsonl --format json --output summary.json
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use claimcheck::prelude::*;
//! use serde_json::json;
//!
//! let record = Record::from_value(1, json!({
//!     "id": 1,
//!     "ground_truth": {"vehiculo_asegurado": "Toyota Corolla", "vehiculo_tercero": "Ford Fiesta"},
//!     "extracted_data": {"vehiculo_asegurado": "Ford Fiesta", "vehiculo_tercero": "Toyota Corolla"},
//!     "processing_time": 1.4
//! })).unwrap();
//!
//! let evaluation = Evaluator::new(ValidationSchema::claims()).unwrap().evaluate(&[record]);
//! assert_eq!(evaluation.metrics.swap_count(), 1);
//! ```
//!
//! ## Crate Structure
//!
//! - `claimcheck-core` - Field values, records and errors
//! - `claimcheck-similarity` - Normalization, fuzzy scores, field policies, swap detection
//! - `claimcheck-report` - Batch evaluation, metrics and reports
//! - `claimcheck-storage` - JSON Lines batch source and report sink

// Re-export core types
pub use claimcheck_core::{Error, FieldMap, FieldValue, Record, Result};

// Re-export matching
pub use claimcheck_similarity::{
    FieldMatcher, FieldSpec, MatchPolicy, MatchStatus, MatchVerdict, RecordVerdict, SchemaError,
    SwapDetector, ValidationSchema,
};

// Re-export reporting
pub use claimcheck_report::{
    AggregateMetrics, Diagnostic, Evaluation, Evaluator, FieldCounter, Reporter, SkippedRecord,
    Summary,
};

// Re-export storage
pub use claimcheck_storage::{Batch, JsonlSource, ReportSink};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AggregateMetrics, Batch, Diagnostic, Error, Evaluation, Evaluator, FieldMatcher,
        FieldSpec, FieldValue, JsonlSource, MatchPolicy, MatchStatus, MatchVerdict, Record,
        RecordVerdict, ReportSink, Reporter, Result, SkippedRecord, Summary, ValidationSchema,
    };
}

/// Text normalization and similarity scores
pub mod text {
    pub use claimcheck_similarity::{
        canonicalize, normalize, normalize_text, sequence_ratio, token_overlap, tokenize,
    };
}
