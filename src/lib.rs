// src/lib.rs

//! Sign rasterizer.
//!
//! Samples an injected [`Evaluator`] over an N×N grid spanning [-1, 1] and
//! writes the sign of every sample as a binary PBM ("P4") bitmap: a pixel is
//! set (black) where the evaluator returns a non-negative value.
//!
//! The evaluator runs in batches of its declared stride. Stride 1 is the
//! plain scalar path; wider strides amortize one column-basis call over
//! `stride` rows and one combine call over `stride` columns, and produce the
//! same bytes.

pub mod bits;
pub mod buffer;
pub mod cli;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod grid;
pub mod pbm;
pub mod sampler;

pub use config::RenderConfig;
pub use error::{RenderError, Result};
pub use evaluator::Evaluator;
pub use sampler::{render, RenderSummary, Sampler};
