// afib-core
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The causal filter cascade (components B, C, D): running median, low-reference integrator,
//! and high-reference integrator.

mod high_ref;
mod low_ref;
mod median;

pub use high_ref::HighRefFilter;
pub use low_ref::{LowRefFilter, LOW_REF_ORDER};
pub use median::{MedianFilter, MEDIAN_SIZE};
