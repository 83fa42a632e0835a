//! Per-field matching policies
//!
//! Dispatches each field comparison to its policy (vehicle, description or
//! literal) and falls back to swap detection for failed vehicle fields.

use crate::distance::{sequence_ratio, token_overlap};
use crate::normalize::{canonicalize, normalize};
use crate::schema::{FieldSpec, MatchPolicy, SchemaError, ValidationSchema};
use crate::swap::SwapDetector;
use claimcheck_core::{FieldValue, Record};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Minimum token overlap for two vehicle values to match
pub const VEHICLE_OVERLAP_THRESHOLD: f64 = 0.6;
/// Minimum sequence ratio (lower-cased raw text) for two vehicle values to match
pub const VEHICLE_SEQUENCE_THRESHOLD: f64 = 0.7;
/// Minimum token overlap for two descriptions to match
pub const DESCRIPTION_OVERLAP_THRESHOLD: f64 = 0.5;
/// Minimum sequence ratio (normalized text) for two descriptions to match
pub const DESCRIPTION_SEQUENCE_THRESHOLD: f64 = 0.6;

/// Vehicle comparison: canonical equality, then token overlap, then
/// character similarity.
pub fn is_vehicle_match(ground_truth: &FieldValue, extracted: &FieldValue) -> bool {
    let gt_canon = canonicalize(ground_truth);
    let ext_canon = canonicalize(extracted);
    if gt_canon == ext_canon {
        // also covers both sides being empty
        return true;
    }

    let gt_raw = ground_truth.flatten();
    let ext_raw = extracted.flatten();
    if token_overlap(&gt_raw, &ext_raw) >= VEHICLE_OVERLAP_THRESHOLD {
        return true;
    }

    sequence_ratio(&gt_raw.to_lowercase(), &ext_raw.to_lowercase()) >= VEHICLE_SEQUENCE_THRESHOLD
}

/// Short free-text comparison with conservative thresholds
pub fn is_description_match(ground_truth: &FieldValue, extracted: &FieldValue) -> bool {
    if ground_truth.is_empty() && extracted.is_empty() {
        return true;
    }

    if token_overlap(&ground_truth.flatten(), &extracted.flatten()) >= DESCRIPTION_OVERLAP_THRESHOLD {
        return true;
    }

    sequence_ratio(&normalize(ground_truth), &normalize(extracted)) >= DESCRIPTION_SEQUENCE_THRESHOLD
}

/// Normalized equality, or one side contained in the other
pub fn is_literal_match(ground_truth: &FieldValue, extracted: &FieldValue) -> bool {
    let gt_norm = normalize(ground_truth);
    let ext_norm = normalize(extracted);

    if gt_norm == ext_norm {
        return true;
    }

    !gt_norm.is_empty()
        && !ext_norm.is_empty()
        && (gt_norm.contains(&ext_norm) || ext_norm.contains(&gt_norm))
}

/// Apply one matching policy
pub fn policy_match(policy: MatchPolicy, ground_truth: &FieldValue, extracted: &FieldValue) -> bool {
    match policy {
        MatchPolicy::Vehicle => is_vehicle_match(ground_truth, extracted),
        MatchPolicy::Description => is_description_match(ground_truth, extracted),
        MatchPolicy::Literal => is_literal_match(ground_truth, extracted),
    }
}

/// Outcome of one field comparison
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Match,
    NoMatch,
    Swapped,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchStatus::Match => "MATCH",
            MatchStatus::NoMatch => "NO_MATCH",
            MatchStatus::Swapped => "SWAPPED",
        };
        f.write_str(label)
    }
}

/// Verdict for one field of one record.
///
/// `swapped` is only ever set on a failed vehicle comparison.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MatchVerdict {
    pub field: String,
    pub matched: bool,
    pub swapped: bool,
}

impl MatchVerdict {
    pub fn status(&self) -> MatchStatus {
        match (self.matched, self.swapped) {
            (true, _) => MatchStatus::Match,
            (false, true) => MatchStatus::Swapped,
            (false, false) => MatchStatus::NoMatch,
        }
    }
}

/// All field verdicts for one record, in schema order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordVerdict {
    pub record_id: u64,
    pub verdicts: Vec<MatchVerdict>,
}

impl RecordVerdict {
    /// True if any field of the record was assigned to the wrong role
    pub fn has_swap(&self) -> bool {
        self.verdicts.iter().any(|v| v.swapped)
    }

    pub fn mismatches(&self) -> impl Iterator<Item = &MatchVerdict> {
        self.verdicts.iter().filter(|v| !v.matched)
    }

    pub fn get(&self, field: &str) -> Option<&MatchVerdict> {
        self.verdicts.iter().find(|v| v.field == field)
    }
}

/// Matches records field by field according to a schema
#[derive(Debug, Clone)]
pub struct FieldMatcher {
    schema: ValidationSchema,
}

impl FieldMatcher {
    /// Build a matcher, rejecting schemas that fail [`ValidationSchema::validate`]
    pub fn new(schema: ValidationSchema) -> Result<Self, SchemaError> {
        schema.validate()?;
        Ok(Self { schema })
    }

    pub fn schema(&self) -> &ValidationSchema {
        &self.schema
    }

    /// Compare one field of a record.
    ///
    /// Returns `None` when the field is optional and either side is empty.
    pub fn evaluate_field(&self, spec: &FieldSpec, record: &Record) -> Option<MatchVerdict> {
        let ground_truth = record.ground_truth(&spec.ground_truth);
        let extracted = record.extracted(&spec.extracted);

        if spec.optional && (ground_truth.is_empty() || extracted.is_empty()) {
            return None;
        }

        let matched = policy_match(spec.policy, ground_truth, extracted);
        let swapped = !matched
            && spec.policy == MatchPolicy::Vehicle
            && SwapDetector::new(&self.schema).detect(spec, record);

        if swapped {
            debug!(record = record.id, field = %spec.extracted, "vehicle role swap detected");
        }

        Some(MatchVerdict {
            field: spec.extracted.clone(),
            matched,
            swapped,
        })
    }

    /// Compare every field of a record
    pub fn evaluate(&self, record: &Record) -> RecordVerdict {
        let verdicts = self
            .schema
            .fields
            .iter()
            .filter_map(|spec| self.evaluate_field(spec, record))
            .collect();

        RecordVerdict {
            record_id: record.id,
            verdicts,
        }
    }
}

impl Default for FieldMatcher {
    fn default() -> Self {
        Self {
            schema: ValidationSchema::claims(),
        }
    }
}
