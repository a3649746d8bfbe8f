// afib-core
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sliding-window Shannon-entropy engine (component G): the highest-weighted stage, maintaining
//! a 127-word window's frequency multiset, cardinality, and scaled-log sum incrementally.

use crate::pitable::{PI, WINDOW_SIZE};

/// Number of distinct words a 3-symbol, base-10 triple can take (`9*256 + 9*16 + 9 + 1`).
pub const MAX_WORD: usize = 2458;

/// Highest valid index into [`PI`]; a word occurring in every slot of the window clamps here
/// rather than indexing one past the end (the original table has no 127th entry).
const MAX_FREQ_INDEX: u32 = (WINDOW_SIZE - 1) as u32;

/// State for the streaming entropy estimator (component G).
///
/// `freq` tracks, for every possible word, how many of the last (up to 127) words equal it.
/// `win` is the sliding window itself, recording which word occupies each of the 127 slots so
/// the oldest one can be evicted in O(1) instead of rescanning `freq`.
#[derive(Clone)]
pub struct EntropyState {
    freq: [u32; MAX_WORD],
    win: [u16; WINDOW_SIZE],
    pointer: usize,
    count: usize,
    k: u32,
    s: f32,
}

impl Default for EntropyState {
    fn default() -> Self {
        Self::new()
    }
}

impl EntropyState {
    /// Create a new, empty entropy state. History before the first sample is an empty window.
    pub fn new() -> Self {
        EntropyState {
            freq: [0; MAX_WORD],
            win: [0; WINDOW_SIZE],
            pointer: 0,
            count: 0,
            k: 0,
            s: 0.0,
        }
    }

    /// Consume one step's word and return the updated entropy estimate `H`.
    ///
    /// The word is clamped into `0..MAX_WORD` defensively; a conformant caller (the word
    /// encoder) never produces an out-of-range value, but the clamp keeps this stage safe
    /// against misuse on its own.
    pub fn update(&mut self, word: u16) -> f32 {
        let idx = (word as usize).min(MAX_WORD - 1);
        if idx != word as usize {
            log::warn!("entropy: word {} out of range, clamped to {}", word, idx);
        }

        if self.count < WINDOW_SIZE {
            self.fill_step(idx);
        } else {
            self.slide_step(idx);
        }

        self.pointer = (self.pointer + 1) % WINDOW_SIZE;

        (self.k as f32 / WINDOW_SIZE as f32) * (self.s / 1_000_000.0)
    }

    fn fill_step(&mut self, idx: usize) {
        let te_in = self.freq[idx];
        if te_in == 0 {
            self.k += 1;
        }
        self.freq[idx] += 1;
        let new_count = self.freq[idx].min(MAX_FREQ_INDEX);
        self.s += pi(new_count) - pi(te_in.min(MAX_FREQ_INDEX));

        self.win[self.pointer] = idx as u16;
        self.count += 1;
    }

    fn slide_step(&mut self, idx: usize) {
        let old_idx = self.win[self.pointer] as usize;
        let te_in = self.freq[idx];
        let te_out = self.freq[old_idx];

        self.win[self.pointer] = idx as u16;

        if self.freq[old_idx] > 0 {
            self.freq[old_idx] -= 1;
        }
        self.freq[idx] += 1;

        let new_in = self.freq[idx].min(MAX_FREQ_INDEX);
        let new_out = self.freq[old_idx].min(MAX_FREQ_INDEX);
        self.s += (pi(new_in) - pi(te_in.min(MAX_FREQ_INDEX)))
            + (pi(new_out) - pi(te_out.min(MAX_FREQ_INDEX)));

        if te_in == 0 && (te_out > 1 || te_out == 0) {
            self.k += 1;
        } else if te_in != 0 && self.freq[old_idx] == 0 && te_out == 1 {
            self.k -= 1;
        }
    }
}

fn pi(count: u32) -> f32 {
    PI[count as usize] as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cold_start_127_identical_words_has_unit_cardinality() {
        let mut e = EntropyState::new();
        let mut h = 0.0;
        for _ in 0..127 {
            h = e.update(42);
        }
        assert_eq!(e.k, 1);
        let expected_s = PI[126] as f32;
        assert!((e.s - expected_s).abs() < 1e-3);
        let expected_h = (1.0 / 127.0) * (expected_s / 1_000_000.0);
        assert!((h - expected_h).abs() < 1e-6);
    }

    #[test]
    fn all_distinct_words_has_full_cardinality() {
        let mut e = EntropyState::new();
        let mut h = 0.0;
        for w in 0..127u16 {
            h = e.update(w);
        }
        assert_eq!(e.k, 127);
        let expected_s = 127.0 * PI[1] as f32;
        assert!((e.s - expected_s).abs() < 1e-2);
        let expected_h = (127.0 / 127.0) * (expected_s / 1_000_000.0);
        assert!((h - expected_h).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_word_clamps_instead_of_panicking() {
        let mut e = EntropyState::new();
        e.update(u16::MAX);
        assert_eq!(e.k, 1);
    }

    #[test]
    fn frequency_never_underflows_on_a_fully_saturated_word() {
        // Every slot in the window holds the same word: each slide evicts and re-inserts the
        // same index, so `freq[old_idx]` touches the `> 0` guard on the decrement every step.
        let mut e = EntropyState::new();
        for _ in 0..400 {
            e.update(7);
        }
        assert_eq!(e.freq[7], WINDOW_SIZE as u32);
    }

    #[test]
    fn entropy_is_non_negative_and_bounded_once_full() {
        let mut e = EntropyState::new();
        let max_pi = *PI.iter().max().unwrap() as f32;
        let bound = (127.0 / 127.0) * (127.0 * max_pi / 1_000_000.0);
        for n in 0..300u16 {
            let h = e.update(n % 50);
            assert!(h >= 0.0);
            if n >= 126 {
                assert!(h <= bound + 1e-4);
            }
        }
    }
}
