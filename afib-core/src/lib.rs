// afib-core
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Streaming detection of atrial fibrillation (AF) from a sequence of RR-intervals.
//!
//! The crate implements a causal, sample-at-a-time pipeline: a running median, two cascaded
//! reference integrators, a symbolic coder, a word encoder, and a sliding-window Shannon-entropy
//! estimator. Every stage is a small state machine with no hidden global state, so two streams can
//! run concurrently as long as they hold independent [`pipeline::Pipeline`] instances.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod classifier;
pub mod coder;
pub mod config;
pub mod driver;
pub mod entropy;
pub mod error;
pub mod filters;
pub mod pipeline;
pub mod pitable;

pub use classifier::{AverageMetrics, Confusion, Metrics};
pub use config::DetectorConfig;
pub use error::{Error, Result};
pub use pipeline::{DebugSample, Pipeline, StepOutput};
