//! Shared helpers for integration tests: a P4 decoder and an instrumented
//! evaluator.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use sign_raster::Evaluator;

/// A decoded P4 bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pbm {
    pub width: usize,
    pub height: usize,
    pub rows: Vec<Vec<u8>>,
}

impl Pbm {
    /// Decodes a P4 stream, panicking on anything malformed.
    pub fn decode(bytes: &[u8]) -> Pbm {
        let newline = bytes
            .iter()
            .position(|&b| b == b'\n')
            .expect("header terminated by newline");
        let header = std::str::from_utf8(&bytes[..newline]).expect("ascii header");
        let fields: Vec<&str> = header.split(' ').collect();
        assert_eq!(fields.len(), 3, "header {:?}", header);
        assert_eq!(fields[0], "P4");
        let width: usize = fields[1].parse().expect("width");
        let height: usize = fields[2].parse().expect("height");

        let row_len = (width + 7) / 8;
        let body = &bytes[newline + 1..];
        assert_eq!(body.len(), row_len * height, "body length");
        let rows = body.chunks(row_len).map(<[u8]>::to_vec).collect();
        Pbm {
            width,
            height,
            rows,
        }
    }

    pub fn pixel(&self, col: usize, row: usize) -> bool {
        self.rows[row][col >> 3] & (0x80 >> (col & 7)) != 0
    }

    /// Bits of the last byte of each row that lie past the width.
    pub fn padding_bits(&self, row: usize) -> u8 {
        let used = self.width % 8;
        if used == 0 {
            0
        } else {
            self.rows[row][self.rows[row].len() - 1] & (0xFF >> used)
        }
    }
}

/// Evaluator computing `f(x, y)` lane by lane from single-component bases,
/// while recording how it is driven.
pub struct Recorder<F: Fn(f32, f32) -> f32> {
    pub stride: usize,
    pub f: F,
    pub x_calls: Cell<usize>,
    pub y_calls: Cell<usize>,
    pub xy_calls: Cell<usize>,
    pub x_seeds: RefCell<Vec<f32>>,
    pub y_seeds: RefCell<Vec<f32>>,
    pub saw_unused_arg: Cell<bool>,
    pub misaligned: Cell<bool>,
    pub bad_length: Cell<bool>,
}

impl<F: Fn(f32, f32) -> f32> Recorder<F> {
    pub fn new(stride: usize, f: F) -> Self {
        Recorder {
            stride,
            f,
            x_calls: Cell::new(0),
            y_calls: Cell::new(0),
            xy_calls: Cell::new(0),
            x_seeds: RefCell::new(Vec::new()),
            y_seeds: RefCell::new(Vec::new()),
            saw_unused_arg: Cell::new(false),
            misaligned: Cell::new(false),
            bad_length: Cell::new(false),
        }
    }

    fn check(&self, buf: &[f32]) {
        if (buf.as_ptr() as usize) % (self.stride * 4) != 0 {
            self.misaligned.set(true);
        }
        if buf.len() != self.stride {
            self.bad_length.set(true);
        }
    }
}

impl<F: Fn(f32, f32) -> f32> Evaluator for Recorder<F> {
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
        self.check(x_out);
        self.x_calls.set(self.x_calls.get() + 1);
        self.x_seeds.borrow_mut().extend_from_slice(x_out);
    }

    fn y(&self, unused: Option<&[f32]>, y_out: &mut [f32]) {
        self.check(y_out);
        if unused.is_some() {
            self.saw_unused_arg.set(true);
        }
        self.y_calls.set(self.y_calls.get() + 1);
        self.y_seeds.borrow_mut().extend_from_slice(y_out);
    }

    fn xy(&self, x_in: &[f32], y_in: &[f32], xy_out: &mut [f32]) {
        self.check(x_in);
        self.check(y_in);
        self.check(xy_out);
        self.xy_calls.set(self.xy_calls.get() + 1);
        for ((out, &x), &y) in xy_out.iter_mut().zip(x_in).zip(y_in) {
            *out = (self.f)(x, y);
        }
    }
}

pub fn render_bytes<E: Evaluator + ?Sized>(evaluator: &E, size: u32) -> Vec<u8> {
    let mut out = Vec::new();
    sign_raster::render(evaluator, size, &mut out).expect("render succeeds");
    out
}
