//! Mismatch diagnostics and the validation summary
//!
//! Renders an [`Evaluation`] either as a fixed-width text table (one line
//! per failed comparison followed by the summary block) or as JSON.

use crate::batch::Evaluation;
use crate::metrics::AggregateMetrics;
use claimcheck_core::{Error, FieldValue, Record, Result};
use claimcheck_similarity::{FieldSpec, MatchStatus};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::io::Write;

/// Longest value shown in the table before truncation
pub const DISPLAY_WIDTH: usize = 28;
const TRUNCATION_MARKER: &str = "..";
const RULE_WIDTH: usize = 110;

/// One failed field comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub record_id: u64,
    pub field: String,
    pub ground_truth: FieldValue,
    pub extracted: FieldValue,
    pub status: MatchStatus,
}

impl Diagnostic {
    pub fn new(record: &Record, spec: &FieldSpec, status: MatchStatus) -> Self {
        Self {
            record_id: record.id,
            field: spec.extracted.clone(),
            ground_truth: record.ground_truth(&spec.ground_truth).clone(),
            extracted: record.extracted(&spec.extracted).clone(),
            status,
        }
    }
}

/// A record left out of the batch because it could not be validated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub reason: String,
}

impl SkippedRecord {
    pub fn from_error(line: usize, err: &Error) -> Self {
        match err {
            Error::MalformedRecord { line, id, reason } => Self {
                line: *line,
                id: *id,
                reason: reason.clone(),
            },
            other => Self {
                line,
                id: None,
                reason: other.to_string(),
            },
        }
    }
}

/// Accuracy of one field, as a percentage
#[derive(Debug, Clone, PartialEq)]
pub struct FieldAccuracy {
    pub field: String,
    pub matches: u64,
    pub total: u64,
    pub percentage: f64,
}

/// Batch-level summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_claims: u64,
    pub skipped_records: usize,
    pub mean_processing_time: f64,
    #[serde(serialize_with = "serialize_accuracy")]
    pub field_accuracy: Vec<FieldAccuracy>,
    pub swap_count: u64,
    /// Percentage of records with a role swap
    pub swap_rate: f64,
}

impl Summary {
    pub fn from_metrics(metrics: &AggregateMetrics, skipped_records: usize) -> Self {
        let field_accuracy = metrics
            .fields()
            .map(|(name, counter)| FieldAccuracy {
                field: name.to_string(),
                matches: counter.matches,
                total: counter.total,
                percentage: counter.accuracy() * 100.0,
            })
            .collect();

        Self {
            total_claims: metrics.record_count(),
            skipped_records,
            mean_processing_time: metrics.mean_processing_time(),
            field_accuracy,
            swap_count: metrics.swap_count(),
            swap_rate: metrics.swap_rate() * 100.0,
        }
    }

    /// Accuracy percentage of a field
    pub fn accuracy(&self, field: &str) -> Option<f64> {
        self.field_accuracy
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.percentage)
    }
}

fn serialize_accuracy<S: Serializer>(
    fields: &[FieldAccuracy],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(fields.len()))?;
    for f in fields {
        map.serialize_entry(&f.field, &f.percentage)?;
    }
    map.end()
}

/// Cut display strings to [`DISPLAY_WIDTH`] chars plus a marker
pub fn truncate_for_display(text: &str) -> String {
    if text.chars().count() > DISPLAY_WIDTH {
        let head: String = text.chars().take(DISPLAY_WIDTH).collect();
        format!("{}{}", head, TRUNCATION_MARKER)
    } else {
        text.to_string()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    diagnostics: &'a [Diagnostic],
    skipped: &'a [SkippedRecord],
    summary: Summary,
}

/// Renders one evaluation
pub struct Reporter<'a> {
    evaluation: &'a Evaluation,
    skipped: &'a [SkippedRecord],
}

impl<'a> Reporter<'a> {
    pub fn new(evaluation: &'a Evaluation, skipped: &'a [SkippedRecord]) -> Self {
        Self {
            evaluation,
            skipped,
        }
    }

    pub fn summary(&self) -> Summary {
        Summary::from_metrics(&self.evaluation.metrics, self.skipped.len())
    }

    /// Mismatch table followed by the summary block
    pub fn write_table<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(
            out,
            "{:<5} | {:<20} | {:<30} | {:<30} | {}",
            "ID", "Field", "Ground truth", "Extracted", "Status"
        )?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

        for d in &self.evaluation.diagnostics {
            writeln!(
                out,
                "{:<5} | {:<20} | {:<30} | {:<30} | {}",
                d.record_id,
                d.field,
                truncate_for_display(&d.ground_truth.to_string()),
                truncate_for_display(&d.extracted.to_string()),
                d.status
            )?;
        }
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

        for s in self.skipped {
            match s.id {
                Some(id) => writeln!(out, "skipped line {} (id {}): {}", s.line, id, s.reason)?,
                None => writeln!(out, "skipped line {}: {}", s.line, s.reason)?,
            }
        }

        self.write_summary(out)
    }

    fn write_summary<W: Write>(&self, out: &mut W) -> Result<()> {
        let summary = self.summary();

        writeln!(out)?;
        writeln!(out, "=== VALIDATION REPORT ===")?;
        writeln!(out, "Records processed: {}", summary.total_claims)?;
        writeln!(out, "Records skipped: {}", summary.skipped_records)?;
        writeln!(out, "Mean processing time: {:.2}s", summary.mean_processing_time)?;

        writeln!(out)?;
        writeln!(out, "Field accuracy:")?;
        for f in &summary.field_accuracy {
            writeln!(
                out,
                "  - {:<25}: {:>6.1}%  ({}/{})",
                f.field, f.percentage, f.matches, f.total
            )?;
        }

        writeln!(out)?;
        writeln!(
            out,
            "Vehicle role swaps: {} records ({:.1}%)",
            summary.swap_count, summary.swap_rate
        )?;
        Ok(())
    }

    /// Diagnostics, skipped records and summary as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        let report = JsonReport {
            diagnostics: &self.evaluation.diagnostics,
            skipped: self.skipped,
            summary: self.summary(),
        };
        serde_json::to_string_pretty(&report).map_err(|e| Error::Serialization(e.to_string()))
    }
}
