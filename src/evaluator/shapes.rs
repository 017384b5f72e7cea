// src/evaluator/shapes.rs

//! Analytic evaluators shipped with the binary.
//!
//! Each one is separable into a per-column and a per-row basis, works on any
//! power-of-two stride, and computes every lane independently, so scalar and
//! batched renders of the same shape agree bit for bit.

use super::Evaluator;

/// Lane count used when a shape is built without an explicit stride.
pub const DEFAULT_STRIDE: usize = 4;

/// `x + y >= 0`: the half plane above the anti-diagonal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfPlane {
    stride: usize,
}

impl HalfPlane {
    pub fn new(stride: usize) -> Self {
        Self { stride }
    }
}

impl Default for HalfPlane {
    fn default() -> Self {
        Self::new(DEFAULT_STRIDE)
    }
}

impl Evaluator for HalfPlane {
    fn x_size(&self) -> usize {
        1
    }

    fn y_size(&self) -> usize {
        1
    }

    fn stride(&self) -> usize {
        self.stride
    }

    // The seeded coordinate already is the basis.
    fn x(&self, _x_out: &mut [f32]) {}

    fn y(&self, _unused: Option<&[f32]>, _y_out: &mut [f32]) {}

    fn xy(&self, x_in: &[f32], y_in: &[f32], xy_out: &mut [f32]) {
        for ((out, x), y) in xy_out.iter_mut().zip(x_in).zip(y_in) {
            *out = x + y;
        }
    }
}

/// `radius² - x² - y² >= 0`: a filled disc centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    radius: f32,
    stride: usize,
}

impl Disc {
    pub fn new(radius: f32, stride: usize) -> Self {
        Self { radius, stride }
    }
}

impl Evaluator for Disc {
    fn x_size(&self) -> usize {
        1
    }

    fn y_size(&self) -> usize {
        1
    }

    fn stride(&self) -> usize {
        self.stride
    }

    fn x(&self, x_out: &mut [f32]) {
        for v in x_out.iter_mut().take(self.stride) {
            *v *= *v;
        }
    }

    fn y(&self, _unused: Option<&[f32]>, y_out: &mut [f32]) {
        for v in y_out.iter_mut().take(self.stride) {
            *v *= *v;
        }
    }

    fn xy(&self, x_in: &[f32], y_in: &[f32], xy_out: &mut [f32]) {
        let r2 = self.radius * self.radius;
        for ((out, xx), yy) in xy_out.iter_mut().zip(x_in).zip(y_in) {
            *out = r2 - (xx + yy);
        }
    }
}

/// `(outer² - d²)(d² - inner²) >= 0` with `d² = x² + y²`: an annulus.
///
/// Both bases carry two components, `[v², v]`, so this shape exercises the
/// component-major block layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    inner: f32,
    outer: f32,
    stride: usize,
}

impl Ring {
    pub fn new(inner: f32, outer: f32, stride: usize) -> Self {
        Self {
            inner,
            outer,
            stride,
        }
    }

    fn expand(&self, block: &mut [f32]) {
        let (squares, linear) = block.split_at_mut(self.stride);
        for (sq, lin) in squares.iter_mut().zip(linear.iter_mut()) {
            *lin = *sq;
            *sq *= *sq;
        }
    }
}

impl Evaluator for Ring {
    fn x_size(&self) -> usize {
        2
    }

    fn y_size(&self) -> usize {
        2
    }

    fn stride(&self) -> usize {
        self.stride
    }

    fn x(&self, x_out: &mut [f32]) {
        self.expand(x_out);
    }

    fn y(&self, _unused: Option<&[f32]>, y_out: &mut [f32]) {
        self.expand(y_out);
    }

    fn xy(&self, x_in: &[f32], y_in: &[f32], xy_out: &mut [f32]) {
        let inner2 = self.inner * self.inner;
        let outer2 = self.outer * self.outer;
        for (lane, out) in xy_out.iter_mut().enumerate().take(self.stride) {
            let d2 = x_in[lane] + y_in[lane];
            *out = (outer2 - d2) * (d2 - inner2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_plane_sums_lanes() {
        let plane = HalfPlane::new(4);
        let mut out = [0.0; 4];
        plane.xy(&[-1.0, 0.0, 0.5, 1.0], &[1.0, -0.25, 0.5, -2.0], &mut out);
        assert_eq!(out, [0.0, -0.25, 1.0, -1.0]);
    }

    #[test]
    fn disc_squares_in_place() {
        let disc = Disc::new(0.5, 2);
        let mut x = [0.5, -1.0];
        disc.x(&mut x);
        assert_eq!(x, [0.25, 1.0]);

        let mut out = [0.0; 2];
        disc.xy(&x, &[0.0, 0.0], &mut out);
        assert_eq!(out, [0.0, -0.75]);
    }

    #[test]
    fn ring_expands_component_major() {
        let ring = Ring::new(0.25, 0.75, 2);
        // Seeded lanes 0.5 and -1.0 in component 0.
        let mut block = [0.5, -1.0, 0.0, 0.0];
        ring.x(&mut block);
        assert_eq!(block, [0.25, 1.0, 0.5, -1.0]);
    }

    #[test]
    fn ring_sign_matches_annulus() {
        let ring = Ring::new(0.25, 0.75, 1);
        let eval = |x: f32, y: f32| {
            let mut xb = [x, 0.0];
            let mut yb = [y, 0.0];
            ring.x(&mut xb);
            ring.y(None, &mut yb);
            let mut out = [0.0];
            ring.xy(&xb, &yb, &mut out);
            out[0]
        };
        assert!(eval(0.5, 0.0) >= 0.0);
        assert!(eval(0.0, 0.0) < 0.0);
        assert!(eval(1.0, 1.0) < 0.0);
    }
}
