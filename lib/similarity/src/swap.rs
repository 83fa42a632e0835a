//! Role-swap detection for paired vehicle fields
//!
//! When the insured vehicle's extracted value fails to match its own ground
//! truth but does match the third party's ground truth (or the other way
//! round), the extractor confused the two roles. That is reported as a swap
//! instead of a plain mismatch.

use crate::matcher::is_vehicle_match;
use crate::schema::{FieldSpec, ValidationSchema};
use claimcheck_core::Record;

/// Cross-checks failed vehicle comparisons against the paired field
#[derive(Debug, Clone, Copy)]
pub struct SwapDetector<'a> {
    schema: &'a ValidationSchema,
}

impl<'a> SwapDetector<'a> {
    pub fn new(schema: &'a ValidationSchema) -> Self {
        Self { schema }
    }

    /// True when the extracted value of `spec` belongs to its partner field.
    ///
    /// Only meaningful after `spec` failed its own comparison. The partner
    /// check uses the vehicle rule unchanged, so an empty extraction
    /// cross-matches an empty partner ground truth.
    pub fn detect(&self, spec: &FieldSpec, record: &Record) -> bool {
        let Some(partner) = self.schema.swap_partner(spec) else {
            return false;
        };

        is_vehicle_match(
            record.ground_truth(&partner.ground_truth),
            record.extracted(&spec.extracted),
        )
    }
}
