//! Streaming dependency-accuracy evaluation.
//!
//! [`DepEvaluator`] reads a gold corpus and a system corpus in strict
//! lockstep — line *i* of one corresponds to line *i* of the other,
//! including the blank sentence-boundary lines — classifies every aligned
//! token into its gold dependency label, and renders per-label and
//! aggregate LAS/UAS/LS.
//!
//! A run either completes and yields an [`EvalReport`], or fails with an
//! [`EvalError`] and yields nothing. Counters from an aborted stream are
//! dropped with the run.

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::errors::{CorpusFile, EvalError, EvalResult};
use crate::eval::counters::LabelCounters;

/// Column indices for the head id and dependency label within one corpus.
///
/// Gold and system files may use different layouts, so each side carries
/// its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnLayout {
    /// 0-based column of the head id.
    pub head: usize,
    /// 0-based column of the dependency label.
    pub deprel: usize,
}

impl ColumnLayout {
    pub fn new(head: usize, deprel: usize) -> Self {
        Self { head, deprel }
    }
}

// ============================================================================
// Evaluator
// ============================================================================

/// Configuration for one gold/system comparison.
#[derive(Debug, Clone)]
pub struct DepEvaluator {
    gold: ColumnLayout,
    system: ColumnLayout,
    delimiter: char,
}

impl DepEvaluator {
    /// Create an evaluator with the given column layouts and the default
    /// tab delimiter.
    pub fn new(gold: ColumnLayout, system: ColumnLayout) -> Self {
        Self {
            gold,
            system,
            delimiter: '\t',
        }
    }

    /// Use a different column delimiter.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Open both files and evaluate them.
    pub fn evaluate_paths(
        &self,
        gold: impl AsRef<Path>,
        system: impl AsRef<Path>,
    ) -> EvalResult<EvalReport> {
        let gold = gold.as_ref();
        let system = system.as_ref();
        let gold_reader =
            BufReader::new(File::open(gold).map_err(|e| EvalError::open(gold, e))?);
        let system_reader =
            BufReader::new(File::open(system).map_err(|e| EvalError::open(system, e))?);
        self.evaluate(gold_reader, system_reader)
    }

    /// Stream both corpora in lockstep and accumulate per-label counters.
    ///
    /// Every gold line consumes one system line, blank or not. A blank
    /// (post-trim) gold line is a sentence boundary: it contributes nothing
    /// to any counter and its system counterpart is discarded unread.
    /// Extra system lines after the gold file ends are ignored; a system
    /// file that ends first is an alignment failure.
    pub fn evaluate<G, S>(&self, gold: G, system: S) -> EvalResult<EvalReport>
    where
        G: BufRead,
        S: BufRead,
    {
        let mut buckets: FxHashMap<String, LabelCounters> = FxHashMap::default();
        let mut system_lines = system.lines();

        for (idx, gold_line) in gold.lines().enumerate() {
            let line_no = idx as u64 + 1;
            let gold_line = gold_line.map_err(|e| EvalError::io(CorpusFile::Gold, line_no, e))?;
            let system_line = system_lines
                .next()
                .ok_or(EvalError::Alignment { line: line_no })?
                .map_err(|e| EvalError::io(CorpusFile::System, line_no, e))?;

            if gold_line.trim().is_empty() {
                continue;
            }

            let gold_cols: Vec<&str> = gold_line.split(self.delimiter).collect();
            let system_cols: Vec<&str> = system_line.split(self.delimiter).collect();

            let gold_label = column(&gold_cols, self.gold.deprel, CorpusFile::Gold, line_no)?;
            let gold_head = column(&gold_cols, self.gold.head, CorpusFile::Gold, line_no)?;
            let system_label =
                column(&system_cols, self.system.deprel, CorpusFile::System, line_no)?;
            let system_head =
                column(&system_cols, self.system.head, CorpusFile::System, line_no)?;

            buckets
                .entry(gold_label.to_string())
                .or_default()
                .record(gold_label == system_label, gold_head == system_head);
        }

        // The ALL row is a derived reduction over the buckets, not a
        // separately tracked running total.
        let mut all = LabelCounters::default();
        for counters in buckets.values() {
            all.merge(counters);
        }
        if all.total == 0 {
            return Err(EvalError::EmptyCorpus);
        }

        let mut labels: Vec<LabelRow> = buckets
            .into_iter()
            .map(|(label, counters)| LabelRow { label, counters })
            .collect();
        labels.sort_by(|a, b| a.label.cmp(&b.label));

        #[cfg(feature = "tracing")]
        tracing::debug!(
            tokens = all.total,
            labels = labels.len(),
            "evaluation complete"
        );

        Ok(EvalReport { all, labels })
    }
}

fn column<'a>(
    cols: &[&'a str],
    index: usize,
    file: CorpusFile,
    line: u64,
) -> EvalResult<&'a str> {
    cols.get(index)
        .copied()
        .ok_or(EvalError::MissingColumn { file, line, index })
}

// ============================================================================
// Report
// ============================================================================

/// One per-label row of the report.
#[derive(Debug, Clone, Serialize)]
pub struct LabelRow {
    pub label: String,
    pub counters: LabelCounters,
}

/// The result of a completed evaluation run.
///
/// `all` is the aggregate over every label; `labels` is sorted
/// alphabetically. Rendering via [`fmt::Display`] produces the fixed-width
/// table; [`EvalReport::to_json`] produces the machine-readable form.
#[derive(Debug, Clone, Serialize)]
pub struct EvalReport {
    pub all: LabelCounters,
    pub labels: Vec<LabelRow>,
}

const HLINE: &str = "------------------------------------------------------------";

impl EvalReport {
    /// Serialize the report as JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    fn write_row(&self, f: &mut fmt::Formatter<'_>, label: &str, c: &LabelCounters) -> fmt::Result {
        writeln!(
            f,
            "{:>10}{:>10}{:>10.2}{:>10.2}{:>10.2}{:>10.2}",
            label,
            c.total,
            c.dist(self.all.total),
            c.las(),
            c.uas(),
            c.ls()
        )
    }
}

impl fmt::Display for EvalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{HLINE}")?;
        writeln!(
            f,
            "{:>10}{:>10}{:>10}{:>10}{:>10}{:>10}",
            "Label", "Count", "Dist.", "LAS", "UAS", "LS"
        )?;
        writeln!(f, "{HLINE}")?;
        self.write_row(f, "ALL", &self.all)?;
        writeln!(f, "{HLINE}")?;
        for row in &self.labels {
            self.write_row(f, &row.label, &row.counters)?;
        }
        writeln!(f, "{HLINE}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    // CoNLL-ish fixture: ID FORM HEAD DEPREL, tab-separated.
    const GOLD: &str = "1\tThe\t2\tdet\n2\tdog\t3\tnsubj\n3\tbarks\t0\troot\n\n\
                        1\tCats\t2\tnsubj\n2\tsleep\t0\troot\n";

    fn evaluator() -> DepEvaluator {
        DepEvaluator::new(ColumnLayout::new(2, 3), ColumnLayout::new(2, 3))
    }

    fn run(gold: &str, system: &str) -> EvalResult<EvalReport> {
        evaluator().evaluate(Cursor::new(gold), Cursor::new(system))
    }

    #[test]
    fn test_identical_files_score_100_everywhere() {
        let report = run(GOLD, GOLD).unwrap();
        assert_eq!(report.all.total, 5);
        assert_eq!(report.all.las(), 100.0);
        assert_eq!(report.all.uas(), 100.0);
        assert_eq!(report.all.ls(), 100.0);
        for row in &report.labels {
            assert_eq!(row.counters.las(), 100.0);
        }
    }

    #[test]
    fn test_labels_are_alphabetical() {
        let report = run(GOLD, GOLD).unwrap();
        let labels: Vec<&str> = report.labels.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["det", "nsubj", "root"]);
    }

    #[test]
    fn test_aggregate_is_sum_of_buckets() {
        let report = run(GOLD, GOLD).unwrap();
        let mut sum = LabelCounters::default();
        for row in &report.labels {
            sum.merge(&row.counters);
        }
        assert_eq!(sum, report.all);
    }

    #[test]
    fn test_wrong_head_right_label() {
        // nsubj line's head changed: label still matches, head does not.
        let gold = "1\ta\t2\tnsubj\n2\tb\t0\troot\n";
        let system = "1\ta\t3\tnsubj\n2\tb\t0\troot\n";
        let report = run(gold, system).unwrap();

        let nsubj = &report.labels[0];
        assert_eq!(nsubj.label, "nsubj");
        assert_eq!(nsubj.counters.las(), 0.0);
        assert_eq!(nsubj.counters.uas(), 0.0);
        assert_eq!(nsubj.counters.ls(), 100.0);
        assert_eq!(report.all.las(), 50.0);
    }

    #[test]
    fn test_wrong_label_right_head() {
        let gold = "1\ta\t2\tnsubj\n";
        let system = "1\ta\t2\tdobj\n";
        let report = run(gold, system).unwrap();
        let c = &report.labels[0].counters;
        assert_eq!(c.both, 0);
        assert_eq!(c.head, 1);
        assert_eq!(c.label, 0);
        assert_eq!(c.total, 1);
    }

    #[test]
    fn test_blank_lines_consume_system_lines_but_count_nothing() {
        let gold = "1\ta\t0\troot\n\n1\tb\t0\troot\n";
        // The system's middle line is garbage; it must be ignored because
        // the gold line is blank.
        let system = "1\ta\t0\troot\nnot\teven\tcolumns\n1\tb\t0\troot\n";
        let report = run(gold, system).unwrap();
        assert_eq!(report.all.total, 2);
        assert_eq!(report.all.las(), 100.0);
    }

    #[test]
    fn test_system_ending_early_is_alignment_error() {
        let gold = "1\ta\t0\troot\n1\tb\t0\troot\n";
        let system = "1\ta\t0\troot\n";
        let err = run(gold, system).unwrap_err();
        assert!(err.is_alignment());
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_alignment_checked_even_on_blank_gold_line() {
        // Lockstep includes boundary lines: a trailing blank gold line
        // still needs a system counterpart.
        let gold = "1\ta\t0\troot\n\n";
        let system = "1\ta\t0\troot\n";
        assert!(run(gold, system).unwrap_err().is_alignment());
    }

    #[test]
    fn test_extra_system_lines_are_ignored() {
        let gold = "1\ta\t0\troot\n";
        let system = "1\ta\t0\troot\n1\tb\t0\troot\n1\tc\t0\troot\n";
        let report = run(gold, system).unwrap();
        assert_eq!(report.all.total, 1);
    }

    #[test]
    fn test_empty_corpus_is_an_error() {
        assert!(matches!(run("", ""), Err(EvalError::EmptyCorpus)));
        assert!(matches!(run("\n\n", "\n\n"), Err(EvalError::EmptyCorpus)));
    }

    #[test]
    fn test_missing_column_is_reported_with_position() {
        let gold = "1\ta\n";
        let system = "1\ta\t0\troot\n";
        let err = run(gold, system).unwrap_err();
        match err {
            EvalError::MissingColumn { line, index, .. } => {
                assert_eq!(line, 1);
                // deprel column is looked up first.
                assert_eq!(index, 3);
            }
            other => panic!("expected MissingColumn, got {other}"),
        }
    }

    #[test]
    fn test_gold_and_system_layouts_are_independent() {
        let gold = "1\ta\t2\tnsubj\n";
        // System file carries head/deprel in columns 0 and 1.
        let system = "2\tnsubj\n";
        let evaluator =
            DepEvaluator::new(ColumnLayout::new(2, 3), ColumnLayout::new(0, 1));
        let report = evaluator
            .evaluate(Cursor::new(gold), Cursor::new(system))
            .unwrap();
        assert_eq!(report.all.las(), 100.0);
    }

    #[test]
    fn test_custom_delimiter() {
        let gold = "1 a 2 nsubj\n";
        let evaluator = evaluator().with_delimiter(' ');
        let report = evaluator
            .evaluate(Cursor::new(gold), Cursor::new(gold))
            .unwrap();
        assert_eq!(report.all.total, 1);
    }

    #[test]
    fn test_report_rendering_matches_fixed_format() {
        let gold = "1\tx\t2\tnsubj\n2\ty\t0\troot\n";
        let report = run(gold, gold).unwrap();
        let expected = "\
------------------------------------------------------------
     Label     Count     Dist.       LAS       UAS        LS
------------------------------------------------------------
       ALL         2    100.00    100.00    100.00    100.00
------------------------------------------------------------
     nsubj         1     50.00    100.00    100.00    100.00
      root         1     50.00    100.00    100.00    100.00
------------------------------------------------------------
";
        assert_eq!(report.to_string(), expected);
    }

    #[test]
    fn test_report_json_shape() {
        let gold = "1\tx\t0\troot\n";
        let report = run(gold, gold).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["all"]["total"], 1);
        assert_eq!(value["labels"][0]["label"], "root");
        assert_eq!(value["labels"][0]["counters"]["both"], 1);
    }

    #[test]
    fn test_evaluate_paths_reports_open_failure() {
        let err = evaluator()
            .evaluate_paths("/nonexistent/gold.conll", "/nonexistent/system.conll")
            .unwrap_err();
        assert!(matches!(err, EvalError::Open { .. }));
    }
}
