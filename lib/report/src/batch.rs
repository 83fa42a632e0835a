//! Batch evaluation
//!
//! Drives the field matcher over a materialized batch of records and
//! collects metrics plus mismatch diagnostics. Large batches can be split
//! into partitions scored in parallel; each partition owns its aggregator
//! and the partials are merged afterwards.

use crate::metrics::AggregateMetrics;
use crate::report::Diagnostic;
use claimcheck_core::{Error, Record, Result};
use claimcheck_similarity::{FieldMatcher, ValidationSchema};
use rayon::prelude::*;
use tracing::{debug, info};

/// Result of evaluating one batch
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub metrics: AggregateMetrics,
    /// One entry per failed field comparison, in record order
    pub diagnostics: Vec<Diagnostic>,
}

impl Evaluation {
    pub fn empty(schema: &ValidationSchema) -> Self {
        Self {
            metrics: AggregateMetrics::for_schema(schema),
            diagnostics: Vec::new(),
        }
    }

    /// Append the results of a later partition
    pub fn merge(&mut self, other: Evaluation) {
        self.metrics.merge(other.metrics);
        self.diagnostics.extend(other.diagnostics);
    }
}

#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    matcher: FieldMatcher,
}

impl Evaluator {
    /// Fails with [`Error::InvalidConfig`] when the schema does not validate
    pub fn new(schema: ValidationSchema) -> Result<Self> {
        let matcher =
            FieldMatcher::new(schema).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        Ok(Self { matcher })
    }

    pub fn matcher(&self) -> &FieldMatcher {
        &self.matcher
    }

    pub fn schema(&self) -> &ValidationSchema {
        self.matcher.schema()
    }

    /// Score records sequentially
    pub fn evaluate(&self, records: &[Record]) -> Evaluation {
        info!(records = records.len(), "scoring batch");
        let evaluation = self.score_all(records);
        log_finished(&evaluation);
        evaluation
    }

    fn score_all(&self, records: &[Record]) -> Evaluation {
        let mut evaluation = Evaluation::empty(self.schema());
        for record in records {
            self.score_record(record, &mut evaluation);
        }
        evaluation
    }

    /// Score contiguous partitions in parallel and merge them in order.
    ///
    /// Produces the same metrics and diagnostics as [`Evaluator::evaluate`].
    pub fn evaluate_partitioned(&self, records: &[Record], partitions: usize) -> Evaluation {
        let partitions = partitions.max(1);
        if partitions == 1 || records.len() < 2 {
            return self.evaluate(records);
        }

        let chunk_size = records.len().div_ceil(partitions);
        info!(
            records = records.len(),
            partitions, chunk_size, "scoring batch in parallel"
        );

        let partials: Vec<Evaluation> = records
            .par_chunks(chunk_size)
            .map(|chunk| self.score_all(chunk))
            .collect();

        let mut evaluation = Evaluation::empty(self.schema());
        for partial in partials {
            evaluation.merge(partial);
        }
        log_finished(&evaluation);
        evaluation
    }

    fn score_record(&self, record: &Record, evaluation: &mut Evaluation) {
        let verdict = self.matcher.evaluate(record);
        debug!(
            record = record.id,
            mismatches = verdict.mismatches().count(),
            swap = verdict.has_swap(),
            "record scored"
        );

        for v in verdict.mismatches() {
            if let Some(spec) = self.schema().get_field(&v.field) {
                evaluation
                    .diagnostics
                    .push(Diagnostic::new(record, spec, v.status()));
            }
        }

        evaluation.metrics.record(&verdict, record.processing_time);
    }
}

fn log_finished(evaluation: &Evaluation) {
    info!(
        records = evaluation.metrics.record_count(),
        swaps = evaluation.metrics.swap_count(),
        mismatches = evaluation.diagnostics.len(),
        "batch scored"
    );
}
