// src/grid.rs

//! Mapping from pixel indices to sample coordinates.

use crate::error::{RenderError, Result};

/// Default side length of the rendered image.
pub const DEFAULT_SIZE: u32 = 512;

/// Rounds `n` up to the next multiple of `stride`.
pub const fn next_stride(n: usize, stride: usize) -> usize {
    n.div_ceil(stride) * stride
}

/// An N×N sampling grid spanning [-1, 1] on both axes.
///
/// Columns run left to right from -1 to 1; rows run top to bottom from 1 to
/// -1, so row 0 is the top of the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    size: usize,
    scale: f64,
}

impl Grid {
    pub fn new(size: u32) -> Result<Self> {
        if size < 2 {
            return Err(RenderError::DegenerateSize(size.into()));
        }
        let size = size as usize;
        Ok(Self {
            size,
            scale: 2.0 / (size - 1) as f64,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Coordinate of column `col`. Padding columns past the edge extrapolate.
    pub fn column(&self, col: usize) -> f32 {
        (col as f64 * self.scale - 1.0) as f32
    }

    /// Coordinate of row `row`, inverted so the image reads top-down.
    pub fn row(&self, row: usize) -> f32 {
        (-(row as f64 * self.scale - 1.0)) as f32
    }

    /// Bytes in one packed row.
    pub fn row_bytes(&self) -> usize {
        crate::bits::row_bytes(self.size)
    }
}
