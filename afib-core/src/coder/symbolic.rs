// afib-core
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Symbolic coder: maps a delta between two delayed streams to a symbol in `0..=9`, using
//! thresholds derived from the current high-reference output.

/// Depth of the raw-RR delay line.
const X_DELAY: usize = 63;

/// Depth of the low-reference delay line.
const XL_DELAY: usize = 47;

/// State for the symbolic coder (component E).
///
/// `x_buf` and `xl_buf` are independent circular buffers; each is read (the oldest sample)
/// before being overwritten with the current-step input, exactly as the filter stages do.
#[derive(Debug, Clone)]
pub struct SymbolicCoder {
    x_buf: [i32; X_DELAY],
    xl_buf: [i32; XL_DELAY],
    x_head: usize,
    xl_head: usize,
}

impl Default for SymbolicCoder {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolicCoder {
    /// Create a new coder with both delay lines initialized to zero.
    pub fn new() -> Self {
        SymbolicCoder {
            x_buf: [0; X_DELAY],
            xl_buf: [0; XL_DELAY],
            x_head: 0,
            xl_head: 0,
        }
    }

    /// Consume one step's `x` (raw RR), `xl` (low-ref output), and `xh` (high-ref output),
    /// returning a symbol in `0..=9`.
    pub fn update(&mut self, x: i32, xl: i32, xh: i32) -> u8 {
        let x_delayed = self.x_buf[self.x_head];
        self.x_buf[self.x_head] = x;
        self.x_head = (self.x_head + 1) % X_DELAY;

        let xl_delayed = self.xl_buf[self.xl_head];
        self.xl_buf[self.xl_head] = xl;
        self.xl_head = (self.xl_head + 1) % XL_DELAY;

        let delta = x_delayed - xl_delayed;

        let t1 = xh >> 4;
        let t2 = xh >> 3;
        let t3 = t1 + t2;
        let t4 = xh >> 2;
        let t5 = t4 + t1;

        if delta < -t4 {
            0
        } else if delta < -t3 {
            1
        } else if delta < -t2 {
            2
        } else if delta < -t1 {
            3
        } else if delta < t1 {
            4
        } else if delta < t2 {
            5
        } else if delta < t3 {
            6
        } else if delta < t4 {
            7
        } else if delta < t5 {
            8
        } else {
            9
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warm_up_with_zero_history_reads_zero_delays() {
        // With xh = 0 all thresholds are zero, so delta = 0 - 0 = 0 is not strictly less
        // than any of them and falls through to the catch-all bucket: symbol 9.
        let mut c = SymbolicCoder::new();
        assert_eq!(c.update(300, 0, 0), 9);
    }

    #[test]
    fn zero_high_ref_pushes_positive_delta_to_top_bucket() {
        // Once the delay lines have settled to zero and xh stays zero, any positive delta
        // exceeds every (zero) threshold and lands in the catch-all bucket.
        let mut c = SymbolicCoder::new();
        for _ in 0..70 {
            c.update(300, 0, 0);
        }
        assert_eq!(c.update(300, 0, 0), 9);
    }

    #[test]
    fn negative_delta_below_every_threshold_is_symbol_zero() {
        // With xh = 0 all thresholds are zero, so any negative delta is below -t4 (== 0).
        let mut c = SymbolicCoder::new();
        for _ in 0..70 {
            c.update(0, 0, 0);
        }
        assert_eq!(c.update(0, 300, 0), 0);
    }
}
