// afib-core
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The symbolic coder and word encoder (components E, F).

mod symbolic;
mod word;

pub use symbolic::SymbolicCoder;
pub use word::WordEncoder;
