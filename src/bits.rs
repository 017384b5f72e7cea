// src/bits.rs

//! 1-bit row packing in the binary PBM layout.

/// Computes the number of bytes in one packed 1-bit row.
///
/// Rows are padded to the nearest byte.
///
/// # Parameters
/// * `width` - The width of the image in pixels.
///
/// # Returns
/// * The number of bytes per row.
#[inline]
pub const fn row_bytes(width: usize) -> usize {
    width.div_ceil(8)
}

/// Mask selecting column `col` within its byte. Column 0 is the MSB.
#[inline(always)]
const fn bit_mask(col: usize) -> u8 {
    0x80 >> (col & 7)
}

/// One row of a monochrome bitmap, eight columns per byte, MSB first.
///
/// Only columns in `[0, width)` are ever set; the padding bits of the last
/// byte stay zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedRow {
    bytes: Vec<u8>,
    width: usize,
}

impl PackedRow {
    pub fn new(width: usize) -> Self {
        Self {
            bytes: vec![0; row_bytes(width)],
            width,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Resets every bit to 0 (white).
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    /// Sets column `col`. Columns past the width are ignored.
    #[inline]
    pub fn set(&mut self, col: usize) {
        if col < self.width {
            self.bytes[col >> 3] |= bit_mask(col);
        }
    }

    pub fn get(&self, col: usize) -> bool {
        col < self.width && self.bytes[col >> 3] & bit_mask(col) != 0
    }

    /// Sets column `col` when `result` is non-negative.
    #[inline]
    pub fn record(&mut self, col: usize, result: f32) {
        if result >= 0.0 {
            self.set(col);
        }
    }

    /// Records one batch of results for consecutive columns starting at
    /// `first_col`. Lanes that fall past the width are dropped.
    pub fn record_batch(&mut self, first_col: usize, results: &[f32]) {
        let lanes = self.width.saturating_sub(first_col).min(results.len());
        for (lane, &result) in results[..lanes].iter().enumerate() {
            self.record(first_col + lane, result);
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
