// afib-core
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `pitable` module holds the precomputed scaled-log contribution table used by the
//! [`crate::entropy`] engine. The table is a process-wide constant: every [`crate::entropy::EntropyState`]
//! reads it directly rather than holding its own copy.

/// Number of entries in [`PI`], and the size of the entropy engine's sliding window.
pub const WINDOW_SIZE: usize = 127;

/// `PI[c]` is the (scaled, integer) contribution of a word that occurs `c` times in the current
/// 127-word window. `PI[0] = 0` by construction: a word that is absent from the window
/// contributes nothing, which is what lets [`crate::entropy::EntropyState`] maintain its running
/// sum with two subtractions per step instead of a full re-scan.
///
/// These values are not derived at run time; they must be reproduced bit-for-bit, as the
/// detector's numeric output depends on them exactly.
#[rustfmt::skip]
pub const PI: [u32; WINDOW_SIZE] = [
    0,     7874,  13495, 18265, 22483, 26290, 29770, 32977, 35952, 38723, 41313,
    43740, 46019, 48162, 50181, 52083, 53877, 55569, 57165, 58671, 60092, 61431,
    62693, 63880, 64997, 66047, 67031, 67953, 68815, 69618, 70366, 71059, 71700,
    72290, 72830, 73323, 73770, 74171, 74529, 74843, 75116, 75348, 75541, 75695,
    75811, 75890, 75933, 75941, 75914, 75854, 75760, 75633, 75475, 75285, 75065,
    74815, 74535, 74226, 73889, 73523, 73130, 72710, 72263, 71790, 71292, 70767,
    70218, 69645, 69046, 68425, 67779, 67110, 66419, 65704, 64968, 64209, 63429,
    62628, 61805, 60962, 60098, 59213, 58309, 57385, 56441, 55478, 54495, 53494,
    52474, 51436, 50379, 49305, 48212, 47102, 45974, 44829, 43667, 42488, 41292,
    40080, 38851, 37606, 36345, 35068, 33775, 32467, 31143, 29803, 28449, 27079,
    25695, 24296, 22882, 21453, 20011, 18553, 17082, 15597, 14098, 12585, 11059,
    9519,  7965,  6398,  4818,  3225,  1619,
];
