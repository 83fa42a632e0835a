//! # claimcheck report
//!
//! Batch evaluation and reporting on top of the claimcheck matcher.
//!
//! - [`Evaluator`] scores a batch of records, sequentially or in parallel
//!   partitions
//! - [`AggregateMetrics`] holds per-field totals and matches, the swap count
//!   and processing times of one run
//! - [`Reporter`] renders mismatch diagnostics and the summary as a table or
//!   JSON
//!
//! ## Example
//!
//! ```rust
//! use claimcheck_core::Record;
//! use claimcheck_report::{Evaluator, Reporter};
//! use serde_json::json;
//!
//! let record = Record::from_value(1, json!({
//!     "id": 1,
//!     "ground_truth": {"lugar": "Av. Corrientes"},
//!     "extracted_data": {"ubicacion": "corrientes"},
//!     "processing_time": 0.8
//! })).unwrap();
//!
//! let evaluation = Evaluator::default().evaluate(&[record]);
//! let summary = Reporter::new(&evaluation, &[]).summary();
//! assert_eq!(summary.accuracy("ubicacion"), Some(100.0));
//! ```

pub mod batch;
pub mod metrics;
pub mod report;

pub use batch::{Evaluation, Evaluator};
pub use metrics::{AggregateMetrics, FieldCounter};
pub use report::{
    truncate_for_display, Diagnostic, FieldAccuracy, Reporter, SkippedRecord, Summary,
    DISPLAY_WIDTH,
};
