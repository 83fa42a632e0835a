//! Batch accuracy metrics
//!
//! One [`AggregateMetrics`] value accumulates the verdicts of one batch run.
//! Counters only ever grow, and partial aggregates from disjoint partitions
//! merge by field-wise summation, so the final numbers do not depend on the
//! order records were scored in.

use ahash::AHashMap;
use claimcheck_similarity::{RecordVerdict, ValidationSchema};
use serde::Serialize;

/// Per-field comparison counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FieldCounter {
    pub total: u64,
    pub matches: u64,
    pub swaps: u64,
}

impl FieldCounter {
    /// `matches / total`, 0.0 when nothing was compared
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.matches as f64 / self.total as f64
        }
    }

    fn add(&mut self, other: &FieldCounter) {
        self.total += other.total;
        self.matches += other.matches;
        self.swaps += other.swaps;
    }
}

#[derive(Debug, Clone, Default)]
pub struct AggregateMetrics {
    // report order of the fields
    order: Vec<String>,
    fields: AHashMap<String, FieldCounter>,
    record_count: u64,
    swap_count: u64,
    processing_times: Vec<f64>,
}

impl AggregateMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-register the schema's fields so they report in schema order,
    /// even when optional ones are never compared.
    pub fn for_schema(schema: &ValidationSchema) -> Self {
        let mut metrics = Self::new();
        for spec in &schema.fields {
            metrics.counter_mut(&spec.extracted);
        }
        metrics
    }

    fn counter_mut(&mut self, field: &str) -> &mut FieldCounter {
        if !self.fields.contains_key(field) {
            self.order.push(field.to_string());
        }
        self.fields.entry(field.to_string()).or_default()
    }

    /// Fold one record's verdicts into the counters
    pub fn record(&mut self, verdict: &RecordVerdict, processing_time: f64) {
        for v in &verdict.verdicts {
            let counter = self.counter_mut(&v.field);
            counter.total += 1;
            if v.matched {
                counter.matches += 1;
            }
            if v.swapped {
                counter.swaps += 1;
            }
        }

        // at most once per record, however many fields swapped
        if verdict.has_swap() {
            self.swap_count += 1;
        }
        self.record_count += 1;
        self.processing_times.push(processing_time);
    }

    /// Merge a partial aggregate from a disjoint partition
    pub fn merge(&mut self, other: AggregateMetrics) {
        for field in &other.order {
            if let Some(counter) = other.fields.get(field) {
                self.counter_mut(field).add(counter);
            }
        }
        self.record_count += other.record_count;
        self.swap_count += other.swap_count;
        self.processing_times.extend(other.processing_times);
    }

    pub fn field(&self, name: &str) -> Option<&FieldCounter> {
        self.fields.get(name)
    }

    /// Counters in report order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldCounter)> {
        self.order
            .iter()
            .filter_map(|name| self.fields.get(name).map(|c| (name.as_str(), c)))
    }

    /// Accuracy of a field in [0.0, 1.0]; 0.0 for unknown fields
    pub fn accuracy(&self, name: &str) -> f64 {
        self.field(name).map_or(0.0, FieldCounter::accuracy)
    }

    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Records with at least one role swap
    pub fn swap_count(&self) -> u64 {
        self.swap_count
    }

    /// Fraction of records with a role swap
    pub fn swap_rate(&self) -> f64 {
        if self.record_count == 0 {
            0.0
        } else {
            self.swap_count as f64 / self.record_count as f64
        }
    }

    pub fn processing_times(&self) -> &[f64] {
        &self.processing_times
    }

    pub fn mean_processing_time(&self) -> f64 {
        if self.processing_times.is_empty() {
            return 0.0;
        }
        self.processing_times.iter().sum::<f64>() / self.processing_times.len() as f64
    }

    pub fn max_processing_time(&self) -> f64 {
        self.processing_times.iter().copied().fold(0.0, f64::max)
    }
}
