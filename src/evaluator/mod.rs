// src/evaluator/mod.rs

//! The evaluator contract consumed by the sampler.
//!
//! An evaluator is three batch functions over fixed-width `f32` vectors:
//!
//! ```text
//!   x(block)            column coordinate  ->  row-basis vector    (x_size wide)
//!   y(None, block)      row coordinate     ->  column-basis vector (y_size wide)
//!   xy(x, y, out)       row-basis, column-basis -> result scalar   (xy_size == 1)
//! ```
//!
//! Every call operates on a block of `stride` lanes. A block of width `w`
//! holds `w * stride` floats, component-major: component `k` of lane `l`
//! lives at `k * stride + l`. Before `x` and `y` run, the sampler seeds
//! component 0 of each lane with that lane's coordinate; the constructor
//! overwrites the block in place. With `stride == 1` the layout degenerates
//! to one plain contiguous vector.

pub mod shapes;

use crate::error::{RenderError, Result};

pub use shapes::{Disc, HalfPlane, Ring};

/// A batch evaluator whose result sign is rasterized.
pub trait Evaluator {
    /// Width of the row-basis vector produced by [`Evaluator::x`].
    fn x_size(&self) -> usize;

    /// Width of the column-basis vector produced by [`Evaluator::y`].
    fn y_size(&self) -> usize;

    /// Width of the combined result. Must be 1.
    fn xy_size(&self) -> usize {
        1
    }

    /// Number of lanes per call. Must be a power of two.
    fn stride(&self) -> usize {
        1
    }

    /// Builds row-basis vectors in place from the seeded column coordinates.
    fn x(&self, x_out: &mut [f32]);

    /// Builds column-basis vectors in place from the seeded row coordinates.
    ///
    /// `unused` is a vestigial slot in the contract; the sampler always
    /// passes `None`.
    fn y(&self, unused: Option<&[f32]>, y_out: &mut [f32]);

    /// Combines one block of row-basis and column-basis vectors into
    /// `stride` results.
    fn xy(&self, x_in: &[f32], y_in: &[f32], xy_out: &mut [f32]);
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
    fn x_size(&self) -> usize {
        (**self).x_size()
    }

    fn y_size(&self) -> usize {
        (**self).y_size()
    }

    fn xy_size(&self) -> usize {
        (**self).xy_size()
    }

    fn stride(&self) -> usize {
        (**self).stride()
    }

    fn x(&self, x_out: &mut [f32]) {
        (**self).x(x_out)
    }

    fn y(&self, unused: Option<&[f32]>, y_out: &mut [f32]) {
        (**self).y(unused, y_out)
    }

    fn xy(&self, x_in: &[f32], y_in: &[f32], xy_out: &mut [f32]) {
        (**self).xy(x_in, y_in, xy_out)
    }
}

/// Declared shape of an evaluator, checked once before a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Widths {
    pub x: usize,
    pub y: usize,
    pub stride: usize,
}

impl Widths {
    /// Reads and validates the widths an evaluator declares.
    ///
    /// # Panics
    /// If `xy_size` is not 1. A multi-component result has no sign to
    /// rasterize, so the harness and evaluator disagree about the contract.
    pub fn of<E: Evaluator + ?Sized>(evaluator: &E) -> Result<Self> {
        assert_eq!(evaluator.xy_size(), 1, "evaluator result width must be 1");

        let widths = Widths {
            x: evaluator.x_size(),
            y: evaluator.y_size(),
            stride: evaluator.stride(),
        };
        if widths.x == 0 || widths.y == 0 {
            return Err(RenderError::Evaluator(format!(
                "basis widths must be non-zero (x_size={}, y_size={})",
                widths.x, widths.y
            )));
        }
        if !widths.stride.is_power_of_two() {
            return Err(RenderError::Evaluator(format!(
                "stride must be a power of two, got {}",
                widths.stride
            )));
        }
        Ok(widths)
    }
}
