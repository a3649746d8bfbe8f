// afib-core
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wires the filter cascade, symbolic coder, word encoder, and entropy engine into the full
//! per-sample detection pipeline.

use crate::classifier::classify;
use crate::coder::{SymbolicCoder, WordEncoder};
use crate::config::DetectorConfig;
use crate::entropy::EntropyState;
use crate::filters::{HighRefFilter, LowRefFilter, MedianFilter};

/// Per-sample debug tap, populated only when [`DetectorConfig::debug_dump`] is set.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebugSample {
    pub y: u16,
    pub xl: i32,
    pub xh: i32,
    pub s: u8,
    pub w: u16,
    pub h: f32,
}

/// One step's output: the AF decision, the entropy value it was derived from, and an optional
/// debug tap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutput {
    pub predict: bool,
    pub entropy: f32,
    pub debug: Option<DebugSample>,
}

/// The full causal pipeline (components B through H), minus the driver and classifier's
/// cross-record accumulation.
#[derive(Clone)]
pub struct Pipeline {
    config: DetectorConfig,
    median: MedianFilter,
    low_ref: LowRefFilter,
    high_ref: HighRefFilter,
    symbolic: SymbolicCoder,
    word: WordEncoder,
    entropy: EntropyState,
}

impl Pipeline {
    /// Create a new pipeline with empty (zeroed) filter history.
    pub fn new(config: DetectorConfig) -> Self {
        Pipeline {
            config,
            median: MedianFilter::new(),
            low_ref: LowRefFilter::new(),
            high_ref: HighRefFilter::new(),
            symbolic: SymbolicCoder::new(),
            word: WordEncoder::new(),
            entropy: EntropyState::new(),
        }
    }

    /// Access the configuration this pipeline was built with.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Push one RR-interval through every stage and return the resulting decision.
    ///
    /// The symbolic coder's delta is computed against the raw `rr`, not the median output `y`:
    /// only the low- and high-reference filters see the smoothed value.
    pub fn step(&mut self, rr: u16) -> StepOutput {
        let y = self.median.update(rr);
        let xl = self.low_ref.update(y as i32);
        let xh = self.high_ref.update(xl);
        let s = self.symbolic.update(rr as i32, xl, xh);
        let w = self.word.update(s);
        let h = self.entropy.update(w);
        let predict = classify(h, self.config.threshold);

        let debug = self.config.debug_dump.then(|| DebugSample { y, xl, xh, s, w, h });

        StepOutput { predict, entropy: h, debug }
    }
}
