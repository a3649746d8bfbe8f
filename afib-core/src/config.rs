// afib-core
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Run-time configuration for the detector.

/// The entropy threshold above (or at) which a sample is classified as AF, per the original
/// detector's calibration. Changing this is equivalent to changing the detector's behavior.
pub const DEFAULT_THRESHOLD: f32 = 0.353;

/// Sampling rate assumed when a record source does not report one.
pub const DEFAULT_SPS: f64 = 250.0;

/// Options controlling a [`crate::pipeline::Pipeline`] and the record driver around it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorConfig {
    /// Entropy cutoff for the AF decision: `predict = H >= threshold`.
    pub threshold: f32,
    /// Sampling rate (Hz) to assume when the record source omits one.
    pub sps_override: f64,
    /// When set, the pipeline additionally produces a [`crate::pipeline::DebugSample`] per step.
    pub debug_dump: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig { threshold: DEFAULT_THRESHOLD, sps_override: DEFAULT_SPS, debug_dump: false }
    }
}
