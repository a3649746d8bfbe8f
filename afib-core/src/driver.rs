// afib-core
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Record driver (component I): turns a stream of QRS and rhythm annotations into RR-intervals
//! and a ground-truth AF flag, and drives a [`crate::pipeline::Pipeline`] over them.
//!
//! Reading the annotation byte stream itself (the MIT-BIH/AFDB/LTAFDB record formats) is out of
//! scope here; callers supply an [`Iterator`] of already-decoded [`AnnotationEvent`]s, which is
//! all the core needs to reproduce the driver's timestamp rescaling, two-stream merge, and
//! rhythm-state tracking.

use alloc::string::String;
use alloc::vec::Vec;

use crate::classifier::Confusion;
use crate::config::DetectorConfig;
use crate::error::{empty_record_error, Result};
use crate::pipeline::Pipeline;

/// One decoded annotation: a QRS beat (which the driver turns into an RR-interval) or a rhythm
/// change (which the driver uses to track ground-truth AF state).
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationKind {
    /// A beat annotation; its timestamp becomes the next RR boundary.
    Qrs,
    /// A rhythm-change annotation; `aux` is the auxiliary label string.
    Rhythm { aux: String },
}

/// A single annotation event as produced by an external record source.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationEvent {
    /// Sample-clock timestamp in the record's *original* annotation frequency.
    pub time: u64,
    pub kind: AnnotationKind,
}

/// Rescales a timestamp from the record's original annotation frequency to `sps`.
///
/// `tps` is `max(sps, orig_ann_frequency)`: the rescale only ever refines a coarser clock onto
/// a finer (or equal) one. The `+0.5`-then-floor is a round-to-nearest; the trailing decrement
/// corrects for the rare case where rounding overshoots what the inverse scale would produce.
fn rescale_time(t: u64, sps: f64, tps: f64) -> u64 {
    let scaled = (t as f64 * sps / tps + 0.5).floor();
    let mut t_prime = scaled as u64;
    // Overshoot check: if scaling back up (tps/sps) passes the original time, we rounded up
    // past it and must pull back by one tick.
    if tps > 0.0 && (t_prime as f64 * tps / sps) > t as f64 {
        t_prime = t_prime.saturating_sub(1);
    }
    t_prime
}

/// Ground truth AF state, updated by the rhythm-annotation stream.
///
/// Per §4.I: AF is true from a rhythm annotation whose auxiliary string begins with `"(AFIB"`,
/// and false from any other rhythm annotation; QRS annotations never change it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RhythmState {
    afib: bool,
}

impl RhythmState {
    fn apply(&mut self, aux: &str) {
        self.afib = aux.starts_with("(AFIB");
    }
}

/// Drives a [`Pipeline`] over one record's worth of annotations, merging the QRS and rhythm
/// streams by timestamp and producing a per-sample `(predict, actual)` trace plus the record's
/// confusion matrix.
///
/// `qrs` and `rhythm` are consumed in lockstep, always advancing whichever has the smaller next
/// timestamp, so a rhythm annotation co-located with a QRS annotation is folded into the
/// ground-truth state before that QRS turns into an RR and is classified.
pub struct RecordDriver {
    config: DetectorConfig,
    orig_ann_frequency: f64,
}

impl RecordDriver {
    /// Build a driver for one record. `orig_ann_frequency` is the annotation clock's native
    /// sampling rate, used together with [`DetectorConfig::sps_override`] to derive `tps`.
    pub fn new(config: DetectorConfig, orig_ann_frequency: f64) -> Self {
        RecordDriver { config, orig_ann_frequency }
    }

    /// Run the full record: merge `qrs`/`rhythm` by timestamp, rescale, derive RR-intervals,
    /// track ground truth, and fold every sample into a fresh [`Pipeline`] and [`Confusion`].
    ///
    /// Returns [`crate::error::Error::EmptyRecord`] if no RR interval was ever produced (fewer
    /// than two QRS annotations): such a record contributes nothing and should be skipped by
    /// the caller rather than counted in cross-record averages.
    pub fn run<I, J>(&self, qrs: I, rhythm: J) -> Result<RecordSummary>
    where
        I: IntoIterator<Item = AnnotationEvent>,
        J: IntoIterator<Item = AnnotationEvent>,
    {
        let sps = self.config.sps_override;
        let tps = sps.max(self.orig_ann_frequency);

        let mut qrs = qrs.into_iter().peekable();
        let mut rhythm = rhythm.into_iter().peekable();

        let mut pipeline = Pipeline::new(self.config);
        let mut confusion = Confusion::new();
        let mut rhythm_state = RhythmState::default();
        let mut debug: Vec<crate::pipeline::DebugSample> = Vec::new();

        let mut prev_qrs_time: Option<u64> = None;
        let mut samples_seen = 0usize;

        loop {
            let next_is_rhythm = match (qrs.peek(), rhythm.peek()) {
                (Some(q), Some(r)) => r.time <= q.time,
                (None, Some(_)) => true,
                (Some(_), None) => false,
                (None, None) => break,
            };

            if next_is_rhythm {
                let ev = rhythm.next().expect("peeked Some");
                if let AnnotationKind::Rhythm { aux } = ev.kind {
                    rhythm_state.apply(&aux);
                }
            } else {
                let ev = qrs.next().expect("peeked Some");
                let time = rescale_time(ev.time, sps, tps);
                if let Some(prev) = prev_qrs_time {
                    let rr = time.saturating_sub(prev);
                    let rr = u16::try_from(rr).unwrap_or(u16::MAX);
                    let step = pipeline.step(rr);
                    confusion.record(step.predict, rhythm_state.afib);
                    if let Some(d) = step.debug {
                        debug.push(d);
                    }
                    samples_seen += 1;
                }
                prev_qrs_time = Some(time);
            }
        }

        if samples_seen == 0 {
            return empty_record_error();
        }

        Ok(RecordSummary { confusion, debug })
    }
}

/// One record's fold-up: the confusion matrix and, if [`DetectorConfig::debug_dump`] was set,
/// the per-sample debug trace.
#[derive(Debug, Clone)]
pub struct RecordSummary {
    pub confusion: Confusion,
    pub debug: Vec<crate::pipeline::DebugSample>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qrs_at(times: &[u64]) -> Vec<AnnotationEvent> {
        times.iter().map(|&time| AnnotationEvent { time, kind: AnnotationKind::Qrs }).collect()
    }

    #[test]
    fn rescale_is_identity_when_tps_equals_sps() {
        assert_eq!(rescale_time(1000, 250.0, 250.0), 1000);
    }

    #[test]
    fn rescale_halves_time_when_original_clock_is_twice_as_fast() {
        // tps = 500 (faster original clock), sps = 250: scale factor 1/2.
        assert_eq!(rescale_time(1000, 250.0, 500.0), 500);
    }

    #[test]
    fn rescale_corrects_a_round_to_nearest_overshoot() {
        // sps=2, tps=3: t=1 scales to (1*2/3 + 0.5).floor() = 1, but scaling 1 back up
        // (1*3/2 = 1.5) overshoots the original t=1, so the overshoot check must pull it
        // back down to 0.
        assert_eq!(rescale_time(1, 2.0, 3.0), 0);
    }

    #[test]
    fn empty_record_is_reported_not_panicked() {
        let driver = RecordDriver::new(DetectorConfig::default(), 250.0);
        let result = driver.run(qrs_at(&[]), Vec::<AnnotationEvent>::new());
        assert!(result.is_err());
    }

    #[test]
    fn single_qrs_with_no_successor_is_also_an_empty_record() {
        let driver = RecordDriver::new(DetectorConfig::default(), 250.0);
        let result = driver.run(qrs_at(&[1000]), Vec::<AnnotationEvent>::new());
        assert!(result.is_err());
    }

    #[test]
    fn constant_rr_stream_with_no_afib_yields_no_true_positives() {
        let driver = RecordDriver::new(DetectorConfig::default(), 250.0);
        let times: Vec<u64> = (0..200).map(|i| i * 300).collect();
        let summary = driver.run(qrs_at(&times), Vec::<AnnotationEvent>::new()).unwrap();
        assert_eq!(summary.confusion.tp, 0);
        assert_eq!(summary.confusion.total(), 199);
    }

    #[test]
    fn afib_rhythm_annotation_marks_subsequent_beats_as_ground_truth_positive() {
        let driver = RecordDriver::new(DetectorConfig::default(), 250.0);
        let times: Vec<u64> = (0..50).map(|i| i * 300).collect();
        let rhythm = alloc::vec![AnnotationEvent {
            time: 0,
            kind: AnnotationKind::Rhythm { aux: String::from("(AFIB") },
        }];
        let summary = driver.run(qrs_at(&times), rhythm).unwrap();
        // Every sample after the co-located rhythm annotation is folded in with actual=true.
        assert_eq!(summary.confusion.tp + summary.confusion.fn_, 49);
    }

    #[test]
    fn non_afib_rhythm_annotation_clears_ground_truth() {
        let driver = RecordDriver::new(DetectorConfig::default(), 250.0);
        let times: Vec<u64> = (0..50).map(|i| i * 300).collect();
        let rhythm = alloc::vec![
            AnnotationEvent { time: 0, kind: AnnotationKind::Rhythm { aux: String::from("(AFIB") } },
            AnnotationEvent { time: 3000, kind: AnnotationKind::Rhythm { aux: String::from("(N") } },
        ];
        let summary = driver.run(qrs_at(&times), rhythm).unwrap();
        assert!(summary.confusion.tp + summary.confusion.fn_ < 49);
    }
}
