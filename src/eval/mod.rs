//! Dependency-accuracy evaluation.
//!
//! - [`counters`] — per-label counter buckets
//! - [`evaluator`] — lockstep streaming, aggregation, and report rendering

pub mod counters;
pub mod evaluator;

pub use counters::LabelCounters;
pub use evaluator::{ColumnLayout, DepEvaluator, EvalReport, LabelRow};
