// src/error.rs

//! Error types for the render pipeline.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("invalid size argument {arg:?}: {reason}")]
    Usage { arg: String, reason: &'static str },
    #[error("grid size must be at least 2, got {0}")]
    DegenerateSize(u64),
    #[error("evaluator contract violated: {0}")]
    Evaluator(String),
    #[error("buffer of {lanes} vectors of width {width} overflows the address space")]
    SizeOverflow { width: usize, lanes: usize },
    #[error("failed to allocate {bytes} bytes aligned to {align}")]
    Allocation { bytes: usize, align: usize },
    #[error("packed row has {got} bytes, expected {expected}")]
    RowLength { expected: usize, got: usize },
    #[error("bitmap declares {expected} rows but {got} were written")]
    RowCount { expected: usize, got: usize },
    #[error("failed to load config {path}: {reason}")]
    Config { path: String, reason: String },
    #[error("output stream error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
