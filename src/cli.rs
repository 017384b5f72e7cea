// src/cli.rs

//! Command line: `sign-raster [size]`.

use clap::Parser;

use crate::error::{RenderError, Result};
use crate::grid::Grid;

/// Parses a size argument.
///
/// Accepts an optional leading `+`, then a hex (`0x`/`0X`), octal (leading
/// `0`) or decimal whole number. Anything left over after the digits is an
/// error, as is an empty string or a value that does not fit in `u32`.
pub fn parse_size(arg: &str) -> Result<u32> {
    let usage = |reason: &'static str| RenderError::Usage {
        arg: arg.to_string(),
        reason,
    };

    let unsigned = arg.strip_prefix('+').unwrap_or(arg);
    let (digits, radix) = if let Some(hex) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        (hex, 16)
    } else if unsigned.len() > 1 && unsigned.starts_with('0') {
        (&unsigned[1..], 8)
    } else {
        (unsigned, 10)
    };

    if digits.is_empty() {
        return Err(usage("expected a number"));
    }
    if !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(usage("trailing characters after number"));
    }
    u32::from_str_radix(digits, radix).map_err(|_| usage("number too large"))
}

/// Parses a size argument and rejects grids smaller than 2×2.
pub fn parse_grid_size(arg: &str) -> Result<u32> {
    let size = parse_size(arg)?;
    Grid::new(size)?;
    Ok(size)
}

/// Render a sign bitmap of the configured evaluator as binary PBM on stdout.
#[derive(Parser, Debug)]
#[command(name = "sign-raster", version)]
pub struct Cli {
    /// Number of pixels wide/tall to render (decimal, 0x hex or 0 octal).
    /// Defaults to the configured size.
    #[arg(value_parser = parse_grid_size)]
    pub size: Option<u32>,
}
