//! # claimcheck similarity
//!
//! Field matching for extracted claim data.
//!
//! Compares values an extractor pulled out of noisy claim text with the
//! ground truth, tolerating case, punctuation, word order, filler words and
//! small misspellings.
//!
//! ## Features
//!
//! - **Normalization**: lower-case, punctuation-free, whitespace-collapsed text
//! - **Canonical forms**: order- and filler-invariant keys for vehicle values
//! - **Fuzzy scores**: token-set overlap and LCS-based character ratio
//! - **Field policies**: vehicle, description and literal matching
//! - **Swap detection**: insured/third-party vehicle role confusion
//!
//! ## Example
//!
//! ```rust
//! use claimcheck_core::Record;
//! use claimcheck_similarity::{FieldMatcher, MatchStatus, ValidationSchema};
//! use serde_json::json;
//!
//! let record = Record::from_value(1, json!({
//!     "id": 1,
//!     "ground_truth": {"vehiculo_asegurado": "Toyota Corolla", "vehiculo_tercero": "Ford Fiesta"},
//!     "extracted_data": {"vehiculo_asegurado": "Ford Fiesta", "vehiculo_tercero": "Toyota Corolla"}
//! })).unwrap();
//!
//! let matcher = FieldMatcher::new(ValidationSchema::claims()).unwrap();
//! let verdict = matcher.evaluate(&record);
//! assert!(verdict.has_swap());
//! assert_eq!(verdict.get("vehiculo_asegurado").unwrap().status(), MatchStatus::Swapped);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  normalize  │────>│  distance   │────>│   matcher   │
//! │ (canonical) │     │ (overlap,   │     │ (policies)  │
//! └─────────────┘     │  sequence)  │     └─────────────┘
//!                     └─────────────┘            │
//!       ┌─────────────┐                   ┌─────────────┐
//!       │   schema    │──────────────────>│    swap     │
//!       │ (field map) │                   │ (pairing)   │
//!       └─────────────┘                   └─────────────┘
//! ```

pub mod distance;
pub mod matcher;
pub mod normalize;
pub mod schema;
pub mod swap;

// Re-export main types for convenience
pub use distance::{sequence_ratio, token_overlap};
pub use matcher::{
    is_description_match, is_literal_match, is_vehicle_match, policy_match, FieldMatcher,
    MatchStatus, MatchVerdict, RecordVerdict, DESCRIPTION_OVERLAP_THRESHOLD,
    DESCRIPTION_SEQUENCE_THRESHOLD, VEHICLE_OVERLAP_THRESHOLD, VEHICLE_SEQUENCE_THRESHOLD,
};
pub use normalize::{canonicalize, canonicalize_text, normalize, normalize_text, tokenize};
pub use schema::{fields, FieldSpec, MatchPolicy, SchemaError, ValidationSchema};
pub use swap::SwapDetector;
