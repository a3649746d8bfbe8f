// afib-core
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Threshold comparator and confusion-matrix accumulator (component H).

use alloc::string::String;
use core::fmt;

/// Confusion matrix accumulated over every sample of one record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Confusion {
    pub tp: u64,
    pub fp: u64,
    pub fn_: u64,
    pub tn: u64,
}

impl Confusion {
    /// Start an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in one sample's prediction against its ground truth.
    pub fn record(&mut self, predict: bool, actual: bool) {
        match (predict, actual) {
            (true, true) => self.tp += 1,
            (true, false) => self.fp += 1,
            (false, true) => self.fn_ += 1,
            (false, false) => self.tn += 1,
        }
    }

    /// Total number of samples folded into this matrix.
    pub fn total(&self) -> u64 {
        self.tp + self.fp + self.fn_ + self.tn
    }

    /// Derive the percentage metrics for this matrix, truncating each division toward zero and
    /// reporting 0 wherever the relevant denominator is zero (no division is performed).
    pub fn metrics(&self) -> Metrics {
        let se = ratio_pct(self.tp, self.tp + self.fn_);
        let sp = ratio_pct(self.tn, self.tn + self.fp);
        let ppv = ratio_pct(self.tp, self.tp + self.fp);
        let acc = ratio_pct(self.tp + self.tn, self.total());
        Metrics { se, sp, ppv, acc }
    }
}

fn ratio_pct(numer: u64, denom: u64) -> u64 {
    if denom == 0 {
        0
    } else {
        numer * 100 / denom
    }
}

/// Integer-truncated percentage metrics derived from a [`Confusion`] matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub se: u64,
    pub sp: u64,
    pub ppv: u64,
    pub acc: u64,
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Se={} Sp={} PPV={} ACC={}", self.se, self.sp, self.ppv, self.acc)
    }
}

/// Running mean of per-record [`Metrics`], counting only records whose denominator was
/// positive for the metric in question.
#[derive(Debug, Clone, Copy, Default)]
pub struct AverageMetrics {
    se_sum: u64,
    se_n: u64,
    sp_sum: u64,
    sp_n: u64,
    ppv_sum: u64,
    ppv_n: u64,
    acc_sum: u64,
    acc_n: u64,
}

impl AverageMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in one record's confusion matrix, skipping any metric whose denominator was zero.
    pub fn add(&mut self, c: &Confusion) {
        if c.tp + c.fn_ > 0 {
            self.se_sum += ratio_pct(c.tp, c.tp + c.fn_);
            self.se_n += 1;
        }
        if c.tn + c.fp > 0 {
            self.sp_sum += ratio_pct(c.tn, c.tn + c.fp);
            self.sp_n += 1;
        }
        if c.tp + c.fp > 0 {
            self.ppv_sum += ratio_pct(c.tp, c.tp + c.fp);
            self.ppv_n += 1;
        }
        if c.total() > 0 {
            self.acc_sum += ratio_pct(c.tp + c.tn, c.total());
            self.acc_n += 1;
        }
    }

    /// Average percentages across every record folded in so far, as `(value, num_records)`.
    pub fn averages(&self) -> Metrics {
        Metrics {
            se: checked_avg(self.se_sum, self.se_n),
            sp: checked_avg(self.sp_sum, self.sp_n),
            ppv: checked_avg(self.ppv_sum, self.ppv_n),
            acc: checked_avg(self.acc_sum, self.acc_n),
        }
    }
}

impl fmt::Display for AverageMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.averages();
        write!(f, "Average: Se={}% Sp={}% PPV={}% ACC={}%", m.se, m.sp, m.ppv, m.acc)
    }
}

fn checked_avg(sum: u64, n: u64) -> u64 {
    if n == 0 {
        0
    } else {
        sum / n
    }
}

/// `predict = H >= threshold`, where both sides are compared as `f32`.
pub fn classify(entropy: f32, threshold: f32) -> bool {
    entropy >= threshold
}

/// One record's summary: its name, confusion matrix, and derived metrics, ready for a one-line
/// report.
#[derive(Debug, Clone)]
pub struct RecordSummary {
    pub name: String,
    pub confusion: Confusion,
    pub metrics: Metrics,
}

impl RecordSummary {
    pub fn new(name: String, confusion: Confusion) -> Self {
        let metrics = confusion.metrics();
        RecordSummary { name, confusion, metrics }
    }
}

impl fmt::Display for RecordSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Record: {} TP={} FP={} FN={} TN={} Se={}% Sp={}% PPV={}% ACC={}%",
            self.name,
            self.confusion.tp,
            self.confusion.fp,
            self.confusion.fn_,
            self.confusion.tn,
            self.metrics.se,
            self.metrics.sp,
            self.metrics.ppv,
            self.metrics.acc,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_e4_metrics_arithmetic() {
        let c = Confusion { tp: 3, fp: 1, fn_: 2, tn: 4 };
        let m = c.metrics();
        assert_eq!(m.se, 60);
        assert_eq!(m.sp, 80);
        assert_eq!(m.ppv, 75);
        assert_eq!(m.acc, 70);
    }

    #[test]
    fn scenario_e5_degenerate_divisor_is_all_zero() {
        let c = Confusion::default();
        let m = c.metrics();
        assert_eq!(m, Metrics::default());
    }

    #[test]
    fn classify_is_monotone_and_inclusive_at_threshold() {
        assert!(!classify(0.352_999, 0.353));
        assert!(classify(0.353, 0.353));
        assert!(classify(0.5, 0.353));
    }

    #[test]
    fn averages_skip_records_with_zero_denominator() {
        let mut avg = AverageMetrics::new();
        avg.add(&Confusion { tp: 0, fp: 0, fn_: 0, tn: 0 });
        avg.add(&Confusion { tp: 3, fp: 1, fn_: 2, tn: 4 });
        let m = avg.averages();
        // Only the second record has any positive denominator, so it alone sets the average.
        assert_eq!(m.se, 60);
        assert_eq!(m.acc, 70);
    }

    #[test]
    fn confusion_total_counts_every_sample() {
        let mut c = Confusion::new();
        c.record(true, true);
        c.record(true, false);
        c.record(false, true);
        c.record(false, false);
        assert_eq!(c.total(), 4);
    }

    #[test]
    fn record_summary_display_matches_the_mandated_line() {
        let c = Confusion { tp: 3, fp: 1, fn_: 2, tn: 4 };
        let summary = RecordSummary::new(String::from("100"), c);
        assert_eq!(
            alloc::format!("{}", summary),
            "Record: 100 TP=3 FP=1 FN=2 TN=4 Se=60% Sp=80% PPV=75% ACC=70%"
        );
    }
}
