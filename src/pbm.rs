// src/pbm.rs

//! Binary PBM ("P4") stream writer.
//!
//! <https://netpbm.sourceforge.net/doc/pbm.html>
//!
//! The stream is the ASCII header `P4 <width> <height>\n` followed by
//! `height` rows of `ceil(width / 8)` bytes, with nothing in between.

use std::io::Write;

use log::trace;

use crate::bits::row_bytes;
use crate::error::{RenderError, Result};

pub struct PbmWriter<W: Write> {
    sink: W,
    width: usize,
    height: usize,
    rows_written: usize,
}

impl<W: Write> PbmWriter<W> {
    /// Writes the header and returns a writer ready for `height` rows.
    pub fn new(mut sink: W, width: usize, height: usize) -> Result<Self> {
        writeln!(sink, "P4 {} {}", width, height)?;
        Ok(Self {
            sink,
            width,
            height,
            rows_written: 0,
        })
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Writes one packed row verbatim.
    pub fn write_row(&mut self, row: &[u8]) -> Result<()> {
        let expected = row_bytes(self.width);
        if row.len() != expected {
            return Err(RenderError::RowLength {
                expected,
                got: row.len(),
            });
        }
        if self.rows_written == self.height {
            return Err(RenderError::RowCount {
                expected: self.height,
                got: self.rows_written + 1,
            });
        }
        self.sink.write_all(row)?;
        self.rows_written += 1;
        trace!("PbmWriter: row {}/{}", self.rows_written, self.height);
        Ok(())
    }

    /// Checks that every declared row was written, flushes, and hands the
    /// sink back.
    pub fn finish(mut self) -> Result<W> {
        if self.rows_written != self.height {
            return Err(RenderError::RowCount {
                expected: self.height,
                got: self.rows_written,
            });
        }
        self.sink.flush()?;
        Ok(self.sink)
    }
}
