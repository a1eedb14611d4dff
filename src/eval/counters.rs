//! Per-label accuracy counters.

use serde::{Deserialize, Serialize};

/// The four counters tracked for one gold dependency label.
///
/// Monotonically incremented, never decremented. The fields obey
/// `both <= head <= total` and `both <= label <= total`, which makes
/// `LAS <= UAS` and `LAS <= LS` hold for every rendered row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCounters {
    /// Head and label both correct.
    pub both: u64,
    /// Head correct (label ignored).
    pub head: u64,
    /// Label correct (head ignored).
    pub label: u64,
    /// Occurrences of this gold label.
    pub total: u64,
}

impl LabelCounters {
    /// Record one aligned token.
    ///
    /// The branch structure mirrors the reference accounting: the label
    /// match is checked first and gates `both`, while `head` is tracked by
    /// an independent check. The resulting counts equal the independent
    /// formulation (`both` incremented iff both match) — see
    /// `test_record_equals_independent_formulation`.
    pub fn record(&mut self, label_match: bool, head_match: bool) {
        if label_match {
            self.label += 1;
            if head_match {
                self.both += 1;
            }
        }
        if head_match {
            self.head += 1;
        }
        self.total += 1;
    }

    /// Add another bucket's counts into this one.
    pub fn merge(&mut self, other: &LabelCounters) {
        self.both += other.both;
        self.head += other.head;
        self.label += other.label;
        self.total += other.total;
    }

    /// Labeled attachment score, as a percentage.
    pub fn las(&self) -> f64 {
        self.pct(self.both)
    }

    /// Unlabeled attachment score, as a percentage.
    pub fn uas(&self) -> f64 {
        self.pct(self.head)
    }

    /// Label score, as a percentage.
    pub fn ls(&self) -> f64 {
        self.pct(self.label)
    }

    /// This bucket's share of `grand_total` occurrences, as a percentage.
    pub fn dist(&self, grand_total: u64) -> f64 {
        if grand_total == 0 {
            return 0.0;
        }
        100.0 * self.total as f64 / grand_total as f64
    }

    fn pct(&self, n: u64) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        100.0 * n as f64 / self.total as f64
    }
}
